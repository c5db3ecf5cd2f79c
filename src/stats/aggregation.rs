//! Sums expenditure amounts per category.

use std::collections::BTreeMap;

use rusqlite::{Connection, Row, params_from_iter};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    database_id::CategoryId,
    date_range::DateRange,
    expenditure::{BuiltQuery, QueryParam},
};

/// The sum of the expenditures in one category.
///
/// Uncategorized expenditures are grouped under a `null` ID and name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// The category ID, `None` for uncategorized expenditures.
    pub id: Option<CategoryId>,
    /// The category name, `None` for uncategorized expenditures.
    pub name: Option<String>,
    /// The sum of the amounts.
    pub total: f64,
}

/// Build the totals query, optionally restricted to `date_range`.
fn build_totals_query(date_range: Option<DateRange>) -> BuiltQuery {
    let mut where_clause_parts = vec!["expenditure.deleted_at IS NULL"];
    let mut params = vec![];

    if let Some(date_range) = date_range {
        where_clause_parts.push("expenditure.date >= ?1 AND expenditure.date < ?2");
        params.push(QueryParam::Timestamp(date_range.start));
        params.push(QueryParam::Timestamp(date_range.end));
    }

    // SQLite sorts NULL first, so the uncategorized row leads.
    let sql = format!(
        "SELECT category.id, category.name, TOTAL(expenditure.amount) FROM expenditure \
        LEFT JOIN category ON expenditure.category_id = category.id \
        WHERE {} \
        GROUP BY expenditure.category_id \
        ORDER BY category.name ASC",
        where_clause_parts.join(" AND ")
    );

    BuiltQuery { sql, params }
}

/// Get the total per category of the live expenditures in `date_range`, or
/// of all live expenditures if there is no range.
///
/// Only categories with at least one matching expenditure are returned.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is a SQL error.
pub fn category_totals(
    date_range: Option<DateRange>,
    connection: &Connection,
) -> Result<Vec<CategoryTotal>, Error> {
    let query = build_totals_query(date_range);

    connection
        .prepare(&query.sql)?
        .query_map(params_from_iter(query.params.iter()), map_row)?
        .map(|maybe_total| maybe_total.map_err(Error::SqlError))
        .collect()
}

/// Get the totals keyed by category name.
///
/// Uncategorized expenditures are keyed by the empty string, and that key is
/// always present even when there are none.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is a SQL error.
pub fn aggregate(
    date_range: Option<DateRange>,
    connection: &Connection,
) -> Result<BTreeMap<String, f64>, Error> {
    let mut totals: BTreeMap<String, f64> = category_totals(date_range, connection)?
        .into_iter()
        .map(|row| (row.name.unwrap_or_default(), row.total))
        .collect();

    totals.entry(String::new()).or_insert(0.0);

    Ok(totals)
}

fn map_row(row: &Row) -> Result<CategoryTotal, rusqlite::Error> {
    Ok(CategoryTotal {
        id: row.get(0)?,
        name: row.get(1)?,
        total: row.get(2)?,
    })
}
