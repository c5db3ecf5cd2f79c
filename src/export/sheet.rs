//! Writes the export matrix as xlsx or csv bytes.

use rust_xlsxwriter::{Workbook, XlsxError};

use crate::{Error, export::ExportMatrix};

/// The name of the single worksheet in the xlsx export.
pub const SHEET_NAME: &str = "Expenditures";

/// The heading of the category column.
const CATEGORY_HEADING: &str = "Category";

/// Write `matrix` to an in-memory xlsx workbook.
///
/// # Errors
/// Returns [Error::SheetError] if the workbook could not be built, e.g. a
/// title is too long for a cell.
pub fn write_xlsx(matrix: &ExportMatrix) -> Result<Vec<u8>, Error> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME).map_err(sheet_error)?;

    worksheet
        .write_string(0, 0, CATEGORY_HEADING)
        .map_err(sheet_error)?;
    for (column, title) in matrix.titles.iter().enumerate() {
        worksheet
            .write_string(0, column_number(column)?, title)
            .map_err(sheet_error)?;
    }

    for (index, row) in matrix.rows.iter().enumerate() {
        let row_number = u32::try_from(index + 1)
            .map_err(|_| Error::SheetError(format!("too many rows: {}", index + 1)))?;

        worksheet
            .write_string(row_number, 0, &row.label)
            .map_err(sheet_error)?;
        for (column, total) in row.totals.iter().enumerate() {
            worksheet
                .write_number(row_number, column_number(column)?, *total)
                .map_err(sheet_error)?;
        }
    }

    workbook.save_to_buffer().map_err(sheet_error)
}

/// Write `matrix` as csv with a header row.
///
/// # Errors
/// Returns [Error::SheetError] if the csv could not be written.
pub fn write_csv(matrix: &ExportMatrix) -> Result<Vec<u8>, Error> {
    let mut writer = csv::Writer::from_writer(vec![]);

    let header = std::iter::once(CATEGORY_HEADING).chain(matrix.titles.iter().map(String::as_str));
    writer.write_record(header).map_err(csv_error)?;

    for row in &matrix.rows {
        let record = std::iter::once(row.label.clone())
            .chain(row.totals.iter().map(|total| total.to_string()));
        writer.write_record(record).map_err(csv_error)?;
    }

    writer
        .into_inner()
        .map_err(|error| Error::SheetError(error.to_string()))
}

/// The sheet column for the `index`th range, after the category column.
fn column_number(index: usize) -> Result<u16, Error> {
    u16::try_from(index + 1)
        .map_err(|_| Error::SheetError(format!("too many date ranges: {}", index + 1)))
}

fn sheet_error(error: XlsxError) -> Error {
    Error::SheetError(error.to_string())
}

fn csv_error(error: csv::Error) -> Error {
    Error::SheetError(error.to_string())
}
