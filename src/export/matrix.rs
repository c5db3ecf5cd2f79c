//! Builds the category by date range table of totals.

use std::collections::{BTreeMap, HashMap};

use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    category::{Category, get_all_categories},
    date_range::DateRange,
    stats::aggregate,
    timestamp::Timestamp,
};

/// The row label used for expenditures without a category.
///
/// A category may also be called this. Its row is then one of the sorted
/// category rows while the uncategorized row is always the last one, and the
/// two are never merged.
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// A titled date range to total, i.e. one column of the export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRange {
    /// The inclusive start of the range.
    pub start: Timestamp,
    /// The exclusive end of the range.
    pub end: Timestamp,
    /// The column heading.
    pub title: String,
}

/// One category's totals, one per range.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    /// The category name, or [UNCATEGORIZED_LABEL].
    pub label: String,
    /// The totals in the same order as the requested ranges.
    pub totals: Vec<f64>,
}

/// The totals for every category over every requested range.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportMatrix {
    /// The range titles in request order.
    pub titles: Vec<String>,
    /// Every category sorted by name, then the uncategorized row.
    pub rows: Vec<ExportRow>,
}

/// Total every category over each of `ranges`.
///
/// Every category gets a row even if it has no expenditures in any range.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is a SQL error.
pub fn build_export_matrix(
    ranges: &[ExportRange],
    connection: &Connection,
) -> Result<ExportMatrix, Error> {
    let categories = get_all_categories(connection)?;

    let columns = ranges
        .iter()
        .map(|range| {
            aggregate(
                Some(DateRange {
                    start: range.start,
                    end: range.end,
                }),
                connection,
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    let titles = ranges.iter().map(|range| range.title.clone()).collect();

    Ok(merge_columns(&categories, titles, &columns))
}

/// Merge per-range totals keyed by category name into the export matrix.
fn merge_columns(
    categories: &[Category],
    titles: Vec<String>,
    columns: &[BTreeMap<String, f64>],
) -> ExportMatrix {
    let mut rows: Vec<ExportRow> = categories
        .iter()
        .map(|category| ExportRow {
            label: category.name.to_string(),
            totals: vec![0.0; columns.len()],
        })
        .chain(std::iter::once(ExportRow {
            label: UNCATEGORIZED_LABEL.to_owned(),
            totals: vec![0.0; columns.len()],
        }))
        .collect();

    let uncategorized_row = categories.len();
    let row_by_name: HashMap<&str, usize> = categories
        .iter()
        .enumerate()
        .map(|(row, category)| (category.name.as_ref(), row))
        .chain(std::iter::once(("", uncategorized_row)))
        .collect();

    for (column, totals) in columns.iter().enumerate() {
        for (name, total) in totals {
            match row_by_name.get(name.as_str()) {
                Some(&row) => rows[row].totals[column] += total,
                None => tracing::warn!("Dropping total for unknown category \"{name}\""),
            }
        }
    }

    ExportMatrix { titles, rows }
}
