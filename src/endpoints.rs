//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/expenditures/{expenditure_id}', use [format_endpoint].

/// The route to list and create expenditures.
pub const EXPENDITURES: &str = "/api/expenditures";
/// The route to fetch, update and delete a single expenditure.
pub const EXPENDITURE: &str = "/api/expenditures/{expenditure_id}";
/// The route to list categories.
pub const CATEGORIES: &str = "/api/categories";
/// The route to rename a category.
pub const CATEGORY: &str = "/api/categories/{category_id}";
/// The route for the total spent per category.
pub const CATEGORY_STATS: &str = "/api/stats/categories";
/// The route to download the per-category totals as an xlsx file.
pub const EXCEL_EXPORT: &str = "/api/exports/excel";
/// The route to download the per-category totals as a csv file.
pub const CSV_EXPORT: &str = "/api/exports/csv";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/api/categories/{category_id}', '{category_id}' is the parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// the original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
