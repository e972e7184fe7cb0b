//! Tabular export of a generated dataset
//!
//! One header row, then one row per record in generation order. Files are
//! written to a temporary sibling and renamed into place, so a failed export
//! never leaves a partial file at the target path.

mod row;
mod workbook;

pub use row::{format_date, format_money, COLUMNS};
pub use workbook::{write_xlsx, SHEET_NAME};

use crate::policy::PolicyDataset;
use row::{CsvRow, JsonRow};
use rust_xlsxwriter::XlsxError;
use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while writing the output file
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("I/O error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XLSX error: {0}")]
    Xlsx(#[from] XlsxError),

    /// I/O failure on a caller-supplied writer; file exports report `Io` instead
    #[error("I/O error: {0}")]
    Write(#[from] io::Error),
}

impl ExportError {
    /// Attach the file path to any I/O failure underneath this error
    fn at_path(self, path: &Path) -> Self {
        let source = match self {
            ExportError::Write(source) => source,
            ExportError::Csv(err) if err.is_io_error() => io::Error::from(err),
            ExportError::Json(err) if err.is_io() => io::Error::from(err),
            ExportError::Xlsx(XlsxError::IoError(source)) => source,
            other => return other,
        };
        ExportError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Output file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Styled spreadsheet with a filterable table
    #[default]
    Xlsx,
    Csv,
    Json,
}

impl ExportFormat {
    /// Infer the format from a file extension; `.csv` and `.json` select those
    /// formats, anything else is a spreadsheet
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => ExportFormat::Csv,
            Some(ext) if ext.eq_ignore_ascii_case("json") => ExportFormat::Json,
            _ => ExportFormat::Xlsx,
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xlsx" => Ok(ExportFormat::Xlsx),
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!(
                "unknown export format '{}' (expected xlsx, csv or json)",
                other
            )),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Xlsx => f.write_str("xlsx"),
            ExportFormat::Csv => f.write_str("csv"),
            ExportFormat::Json => f.write_str("json"),
        }
    }
}

/// Write the dataset as CSV to any writer
pub fn write_csv<W: Write>(dataset: &PolicyDataset, writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in dataset {
        csv_writer.serialize(CsvRow::new(record, &dataset.static_terms))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write the dataset as a JSON array of rows to any writer
pub fn write_json<W: Write>(dataset: &PolicyDataset, mut writer: W) -> Result<(), ExportError> {
    let rows: Vec<JsonRow<'_>> = dataset
        .iter()
        .map(|record| JsonRow::new(record, &dataset.static_terms))
        .collect();
    serde_json::to_writer_pretty(&mut writer, &rows)?;
    writer.flush()?;
    Ok(())
}

/// Write the dataset to `path` in the given format
pub fn write_dataset<P: AsRef<Path>>(
    dataset: &PolicyDataset,
    path: P,
    format: ExportFormat,
) -> Result<(), ExportError> {
    let path = path.as_ref();
    let tmp_path = temporary_path(path);

    let result = write_to_file(dataset, &tmp_path, format).and_then(|()| {
        fs::rename(&tmp_path, path).map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })
    });

    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    } else {
        log::info!("Wrote {} rows as {} to {}", dataset.len(), format, path.display());
    }
    result
}

fn write_to_file(
    dataset: &PolicyDataset,
    path: &Path,
    format: ExportFormat,
) -> Result<(), ExportError> {
    let file = File::create(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_format(dataset, format, BufWriter::new(file))
        .map_err(|err| err.at_path(path))
}

fn write_format<W: Write>(
    dataset: &PolicyDataset,
    format: ExportFormat,
    writer: W,
) -> Result<(), ExportError> {
    match format {
        ExportFormat::Xlsx => write_xlsx(dataset, writer),
        ExportFormat::Csv => write_csv(dataset, writer),
        ExportFormat::Json => write_json(dataset, writer),
    }
}

/// Hidden sibling of the target used while writing
fn temporary_path(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "policy_data".to_string());
    path.with_file_name(format!(".{}.tmp", file_name))
}
