//! Endpoint for listing expenditures with filtering, sorting and paging.

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
    expenditure::{ExpenditureListResponse, ListingConfig, ListingParams, query_expenditures},
};

/// The state needed for listing expenditures.
#[derive(Debug, Clone)]
pub struct ListExpendituresState {
    /// How the listing parameters are interpreted.
    pub listing_config: ListingConfig,
    /// The database connection for reading expenditures.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ListExpendituresState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            listing_config: state.listing_config,
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that returns a page of expenditures.
///
/// Responds with the effective `limit` and `offset` alongside the data.
pub async fn list_expenditures_endpoint(
    State(state): State<ListExpendituresState>,
    WithRejection(Query(pairs), _): WithRejection<Query<Vec<(String, String)>>, Error>,
) -> Result<Json<ExpenditureListResponse>, Error> {
    let params = ListingParams::from_pairs(pairs);
    let directive = state.listing_config.parse(&params)?;

    let connection = lock_connection(&state.db_connection)?;
    let expenditures = query_expenditures(&directive, &connection)?;

    Ok(Json(ExpenditureListResponse::new(
        expenditures,
        directive.pagination,
    )))
}
