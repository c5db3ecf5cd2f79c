//! Builds the SQL for listing expenditures from a [ListingDirective].
//!
//! Only whitelisted column names and the `ASC`/`DESC` keywords are written
//! into the SQL text. Dates, limits and offsets are always bound parameters.

use rusqlite::{
    ToSql,
    types::{ToSqlOutput, Value},
};

use crate::{
    expenditure::{ListingDirective, SortColumn},
    timestamp::Timestamp,
};

/// The columns and join shared by every query that returns expenditures.
pub(crate) const SELECT_EXPENDITURE: &str = "SELECT expenditure.id, expenditure.amount, \
    expenditure.date, category.id, category.name FROM expenditure \
    LEFT JOIN category ON expenditure.category_id = category.id";

/// A value bound to a placeholder in a generated query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryParam {
    /// A date bound.
    Timestamp(Timestamp),
    /// A limit or offset.
    Integer(i64),
}

impl ToSql for QueryParam {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            QueryParam::Timestamp(timestamp) => timestamp.to_sql(),
            QueryParam::Integer(integer) => Ok(ToSqlOutput::Owned(Value::Integer(*integer))),
        }
    }
}

/// SQL text and the parameters for its numbered placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltQuery {
    /// The SQL with `?N` placeholders.
    pub sql: String,
    /// The values for the placeholders, in placeholder order.
    pub params: Vec<QueryParam>,
}

/// Build the listing query for `directive`.
///
/// Clauses are applied in a fixed order: date range, ordering, limit and then
/// offset. Soft-deleted expenditures are always excluded.
pub fn build_listing_query(directive: &ListingDirective) -> BuiltQuery {
    let mut query_string_parts = vec![SELECT_EXPENDITURE.to_owned()];
    let mut where_clause_parts = vec!["expenditure.deleted_at IS NULL".to_owned()];
    let mut params = vec![];

    if let Some(date_range) = directive.date_range {
        where_clause_parts.push(format!(
            "expenditure.date >= ?{} AND expenditure.date < ?{}",
            params.len() + 1,
            params.len() + 2,
        ));
        params.push(QueryParam::Timestamp(date_range.start));
        params.push(QueryParam::Timestamp(date_range.end));
    }

    query_string_parts.push(format!("WHERE {}", where_clause_parts.join(" AND ")));

    if let Some(sort) = directive.sort {
        let mut order_clause = format!("ORDER BY {} {}", sort.column.as_sql(), sort.order.as_sql());
        // Ties on amount or date come back in insertion order.
        if sort.column != SortColumn::Id {
            order_clause.push_str(", expenditure.id ASC");
        }
        query_string_parts.push(order_clause);
    }

    query_string_parts.push(format!(
        "LIMIT ?{} OFFSET ?{}",
        params.len() + 1,
        params.len() + 2
    ));
    params.push(QueryParam::Integer(saturating_i64(directive.pagination.limit)));
    params.push(QueryParam::Integer(saturating_i64(directive.pagination.offset)));

    BuiltQuery {
        sql: query_string_parts.join(" "),
        params,
    }
}

/// SQLite integers are signed, offsets past `i64::MAX` skip everything anyway.
fn saturating_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
