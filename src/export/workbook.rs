//! Styled spreadsheet output
//!
//! One worksheet holding a single table over every row: bold filled headers
//! with an autofilter, a frozen header row, money as numbers shown `#,##0.00`
//! and dates as real date cells.

use super::{ExportError, COLUMNS};
use crate::config::StaticTerms;
use crate::policy::{PolicyDataset, PolicyRecord};
use rust_xlsxwriter::{
    Color, ColNum, Format, FormatAlign, FormatBorder, RowNum, Table, TableColumn, TableStyle,
    Workbook, Worksheet, XlsxError,
};
use std::io::Write;

/// Name of the worksheet holding the policy table
pub const SHEET_NAME: &str = "Policy_Data";

/// Column widths in character units, in `COLUMNS` order
const COLUMN_WIDTHS: [f64; 15] = [
    15.0, 12.0, 10.0, 12.0, 10.0, 10.0, 15.0, 15.0, 20.0, 12.0, 12.0, 12.0, 15.0, 20.0, 15.0,
];

const HEADER_FILL: u32 = 0xD9E1F2;

struct CellFormats {
    text: Format,
    date: Format,
    money: Format,
}

impl CellFormats {
    fn new() -> Self {
        let cell = Format::new().set_border(FormatBorder::Thin);
        Self {
            date: cell.clone().set_num_format("yyyy-mm-dd"),
            money: cell.clone().set_num_format("#,##0.00"),
            text: cell,
        }
    }
}

/// Write the dataset as an `.xlsx` workbook to any writer
pub fn write_xlsx<W: Write>(dataset: &PolicyDataset, mut writer: W) -> Result<(), ExportError> {
    let mut workbook = build_workbook(dataset)?;
    let buffer = workbook.save_to_buffer()?;
    writer.write_all(&buffer)?;
    writer.flush()?;
    Ok(())
}

fn build_workbook(dataset: &PolicyDataset) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    let formats = CellFormats::new();
    for (i, record) in dataset.iter().enumerate() {
        let row = RowNum::try_from(i + 1)
            .map_err(|_| XlsxError::RowColumnLimitError)?;
        write_record(sheet, row, record, &dataset.static_terms, &formats)?;
    }

    for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
        sheet.set_column_width(col as ColNum, *width)?;
    }

    let last_row = RowNum::try_from(dataset.len())
        .map_err(|_| XlsxError::RowColumnLimitError)?;
    let last_col = (COLUMNS.len() - 1) as ColNum;
    sheet.add_table(0, 0, last_row, last_col, &policy_table())?;
    sheet.set_freeze_panes(1, 0)?;

    Ok(workbook)
}

fn policy_table() -> Table {
    let header = Format::new()
        .set_bold()
        .set_text_wrap()
        .set_align(FormatAlign::Top)
        .set_background_color(Color::RGB(HEADER_FILL))
        .set_border(FormatBorder::Thin);

    let columns: Vec<TableColumn> = COLUMNS
        .iter()
        .map(|name| TableColumn::new().set_header(*name).set_header_format(&header))
        .collect();

    Table::new()
        .set_style(TableStyle::Medium2)
        .set_autofilter(true)
        .set_columns(&columns)
}

fn write_record(
    sheet: &mut Worksheet,
    row: RowNum,
    record: &PolicyRecord,
    terms: &StaticTerms,
    formats: &CellFormats,
) -> Result<(), XlsxError> {
    let CellFormats { text, date, money } = formats;

    sheet.write_string_with_format(row, 0, &record.policy_number, text)?;
    sheet.write_date_with_format(row, 1, record.date_of_birth, date)?;
    sheet.write_number_with_format(row, 2, record.entry_age, text)?;
    sheet.write_date_with_format(row, 3, record.purchase_date, date)?;
    sheet.write_number_with_format(row, 4, record.policy_term, text)?;
    sheet.write_number_with_format(row, 5, record.premium_payment_term, text)?;
    sheet.write_number_with_format(row, 6, record.sum_assured, money)?;
    sheet.write_number_with_format(row, 7, record.annual_premium, money)?;
    sheet.write_string_with_format(row, 8, &terms.premium_payment_timing, text)?;
    sheet.write_string_with_format(row, 9, record.status.as_str(), text)?;
    match record.death_date {
        Some(death_date) => sheet.write_date_with_format(row, 10, death_date, date)?,
        None => sheet.write_blank(row, 10, date)?,
    };
    sheet.write_date_with_format(row, 11, record.expiry_date, date)?;
    sheet.write_string_with_format(row, 12, &terms.underwriting_class, text)?;
    sheet.write_string_with_format(row, 13, &terms.surrender_value, text)?;
    sheet.write_string_with_format(row, 14, &terms.reserve_basis, text)?;
    Ok(())
}
