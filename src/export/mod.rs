//! Exporting per-category totals over several date ranges as a spreadsheet.

mod endpoint;
mod matrix;
mod sheet;

pub use endpoint::{export_csv_endpoint, export_excel_endpoint};
pub use matrix::{ExportMatrix, ExportRange, build_export_matrix};
pub use sheet::{write_csv, write_xlsx};
