//! Endpoint for the per-category totals.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State},
};
use axum_extra::extract::WithRejection;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    app_state::lock_connection,
    date_range::DateRangeParams,
    stats::{CategoryTotal, category_totals},
};

/// The state needed for the category totals.
#[derive(Debug, Clone)]
pub struct CategoryStatsState {
    /// The database connection for reading expenditures.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CategoryStatsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that returns the total spent per category, optionally
/// within the `start` and `end` query parameters.
pub async fn category_stats_endpoint(
    State(state): State<CategoryStatsState>,
    WithRejection(Query(pairs), _): WithRejection<Query<Vec<(String, String)>>, Error>,
) -> Result<Json<Vec<CategoryTotal>>, Error> {
    let date_range = DateRangeParams::from_pairs(pairs).parse()?;

    let connection = lock_connection(&state.db_connection)?;
    let totals = category_totals(date_range, &connection)?;

    tracing::debug!("Returning {} category totals", totals.len());

    Ok(Json(totals))
}
