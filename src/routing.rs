//! Application router configuration.

use axum::{
    Router,
    response::{IntoResponse, Response},
    routing::{get, post},
};

use crate::{
    AppState, Error,
    category::{get_categories_endpoint, update_category_endpoint},
    endpoints,
    expenditure::{
        create_expenditure_endpoint, delete_expenditure_endpoint, get_expenditure_endpoint,
        list_expenditures_endpoint, update_expenditure_endpoint,
    },
    export::{export_csv_endpoint, export_excel_endpoint},
    stats::category_stats_endpoint,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            endpoints::EXPENDITURES,
            get(list_expenditures_endpoint).post(create_expenditure_endpoint),
        )
        .route(
            endpoints::EXPENDITURE,
            get(get_expenditure_endpoint)
                .post(update_expenditure_endpoint)
                .delete(delete_expenditure_endpoint),
        )
        .route(endpoints::CATEGORIES, get(get_categories_endpoint))
        .route(endpoints::CATEGORY, post(update_category_endpoint))
        .route(endpoints::CATEGORY_STATS, get(category_stats_endpoint))
        .route(endpoints::EXCEL_EXPORT, post(export_excel_endpoint))
        .route(endpoints::CSV_EXPORT, post(export_csv_endpoint))
        .fallback(get_404_not_found)
        .with_state(state)
}

async fn get_404_not_found() -> Response {
    Error::NotFound.into_response()
}
