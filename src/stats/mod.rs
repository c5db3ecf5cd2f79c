//! Per-category totals of expenditures.

mod aggregation;
mod endpoint;

pub use aggregation::{CategoryTotal, aggregate, category_totals};
pub use endpoint::category_stats_endpoint;
