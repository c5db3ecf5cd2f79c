//! Converts expenditure records into the JSON bodies sent to clients.

use serde::{Deserialize, Serialize};

use crate::{
    category::Category,
    database_id::{CategoryId, ExpenditureId},
    expenditure::Expenditure,
    pagination::Pagination,
    timestamp::Timestamp,
};

/// The public shape of a category nested in an expenditure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryResponse {
    /// The category ID.
    pub id: CategoryId,
    /// The category name.
    pub name: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name.to_string(),
        }
    }
}

/// The public shape of an expenditure.
///
/// `category` is always present and is `null` for uncategorized expenditures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenditureResponse {
    /// The expenditure ID.
    pub id: ExpenditureId,
    /// The signed amount.
    pub amount: f64,
    /// The date as an RFC 3339 timestamp in UTC.
    pub date: Timestamp,
    /// The category, if any.
    pub category: Option<CategoryResponse>,
}

impl From<Expenditure> for ExpenditureResponse {
    fn from(expenditure: Expenditure) -> Self {
        Self {
            id: expenditure.id,
            amount: expenditure.amount,
            date: expenditure.date,
            category: expenditure.category.map(CategoryResponse::from),
        }
    }
}

/// A page of expenditures with the paging that was actually applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenditureListResponse {
    /// The expenditures on this page.
    pub data: Vec<ExpenditureResponse>,
    /// The effective limit.
    pub limit: u64,
    /// The effective offset.
    pub offset: u64,
}

impl ExpenditureListResponse {
    /// Wrap `expenditures` with the `pagination` used to fetch them.
    pub fn new(expenditures: Vec<Expenditure>, pagination: Pagination) -> Self {
        Self {
            data: expenditures.into_iter().map(ExpenditureResponse::from).collect(),
            limit: pagination.limit,
            offset: pagination.offset,
        }
    }
}
