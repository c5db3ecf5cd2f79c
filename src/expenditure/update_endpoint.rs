//! Endpoint for partially updating an expenditure.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
};
use axum_extra::extract::WithRejection;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    app_state::lock_connection,
    database_id::{PathId, row_id},
    expenditure::{CategoryChange, ExpenditureResponse, ExpenditureUpdate, update_expenditure},
    timestamp::Timestamp,
};

/// The state needed to update an expenditure.
#[derive(Debug, Clone)]
pub struct UpdateExpenditureState {
    /// The database connection for managing expenditures.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpdateExpenditureState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The request body for updating an expenditure. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateExpenditureData {
    /// The new amount.
    #[serde(default)]
    pub amount: Option<f64>,
    /// The new date.
    #[serde(default)]
    pub date: Option<Timestamp>,
    /// The new category name. An empty name removes the category.
    #[serde(default)]
    pub category: Option<String>,
}

impl From<UpdateExpenditureData> for ExpenditureUpdate {
    fn from(data: UpdateExpenditureData) -> Self {
        Self {
            amount: data.amount,
            date: data.date,
            category: CategoryChange::from_field(data.category.as_deref()),
        }
    }
}

/// A route handler for updating an expenditure, responds with the updated
/// expenditure.
pub async fn update_expenditure_endpoint(
    State(state): State<UpdateExpenditureState>,
    WithRejection(Path(expenditure_id), _): WithRejection<Path<PathId>, Error>,
    WithRejection(Json(data), _): WithRejection<Json<UpdateExpenditureData>, Error>,
) -> Result<Json<ExpenditureResponse>, Error> {
    let expenditure_id = row_id(expenditure_id)?;
    let connection = lock_connection(&state.db_connection)?;
    let expenditure = update_expenditure(expenditure_id, data.into(), &connection)?;

    tracing::info!("Updated expenditure {expenditure_id}");

    Ok(Json(expenditure.into()))
}
