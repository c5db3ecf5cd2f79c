//! Categories for grouping expenditures.

mod db;
mod domain;
mod list_endpoint;
mod resolver;
mod update_endpoint;

pub use db::{create_category_table, find_category_by_name, get_all_categories, rename_category};
pub use domain::{Category, CategoryName};
pub use list_endpoint::get_categories_endpoint;
pub use resolver::resolve_category;
pub use update_endpoint::update_category_endpoint;

#[cfg(test)]
pub use db::{get_category, insert_category};
#[cfg(test)]
pub use list_endpoint::CategoryList;
