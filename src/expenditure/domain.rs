//! The expenditure data records.

use crate::{
    category::{Category, CategoryName},
    database_id::ExpenditureId,
    timestamp::Timestamp,
};

/// An expenditure as stored in the database, with its category joined in.
#[derive(Debug, Clone, PartialEq)]
pub struct Expenditure {
    /// The ID of the expenditure.
    pub id: ExpenditureId,
    /// The amount of money spent. Negative amounts are refunds.
    pub amount: f64,
    /// When the money was spent.
    pub date: Timestamp,
    /// The category the expenditure belongs to, if any.
    pub category: Option<Category>,
}

/// The data needed to create an expenditure.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpenditure {
    /// The amount of money spent.
    pub amount: f64,
    /// When the money was spent.
    pub date: Timestamp,
    /// The name of the category, which is created if it does not exist.
    pub category: Option<CategoryName>,
}

/// What to do with the category of an expenditure being updated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryChange {
    /// Leave the category as is.
    #[default]
    Keep,
    /// Remove the category from the expenditure.
    Clear,
    /// Move the expenditure to the named category, creating it if needed.
    Set(CategoryName),
}

impl CategoryChange {
    /// Interpret the `category` field of an update request.
    ///
    /// A missing or null field keeps the category. A field that is empty after
    /// trimming clears it.
    pub fn from_field(field: Option<&str>) -> Self {
        match field {
            None => CategoryChange::Keep,
            Some(raw_name) => match CategoryName::normalize(raw_name) {
                Some(name) => CategoryChange::Set(name),
                None => CategoryChange::Clear,
            },
        }
    }
}

/// A partial update to an expenditure. `None` fields keep their value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenditureUpdate {
    /// The new amount.
    pub amount: Option<f64>,
    /// The new date.
    pub date: Option<Timestamp>,
    /// The change to the category.
    pub category: CategoryChange,
}
