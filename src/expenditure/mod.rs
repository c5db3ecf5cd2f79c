//! Expenditures: parsing listing requests, building their queries, storing
//! and serving them.

mod create_endpoint;
mod db;
mod delete_endpoint;
mod directive;
mod domain;
mod get_endpoint;
mod list_endpoint;
mod query;
mod response;
mod sort;
mod update_endpoint;

pub use create_endpoint::create_expenditure_endpoint;
pub use db::{
    create_expenditure, create_expenditure_table, delete_expenditure, get_expenditure,
    query_expenditures, update_expenditure,
};
pub use delete_endpoint::delete_expenditure_endpoint;
pub use directive::{ListingConfig, ListingDirective, ListingParams};
pub use domain::{CategoryChange, Expenditure, ExpenditureUpdate, NewExpenditure};
pub use get_endpoint::get_expenditure_endpoint;
pub use list_endpoint::list_expenditures_endpoint;
pub use query::{BuiltQuery, QueryParam};
pub use response::{ExpenditureListResponse, ExpenditureResponse};
pub use sort::{Sort, SortColumn, SortSeparator};
pub use update_endpoint::update_expenditure_endpoint;
