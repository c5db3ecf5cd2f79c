//! Endpoint for creating an expenditure.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::{HeaderName, StatusCode, header::LOCATION},
};
use axum_extra::extract::WithRejection;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    app_state::lock_connection,
    category::CategoryName,
    endpoints::{self, format_endpoint},
    expenditure::{ExpenditureResponse, NewExpenditure, create_expenditure},
    timestamp::Timestamp,
};

/// The state needed to create an expenditure.
#[derive(Debug, Clone)]
pub struct CreateExpenditureState {
    /// The database connection for managing expenditures.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateExpenditureState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The request body for creating an expenditure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateExpenditureData {
    /// The amount of money spent.
    pub amount: f64,
    /// When the money was spent, as an RFC 3339 timestamp.
    pub date: Timestamp,
    /// The category name. Blank or missing means no category.
    #[serde(default)]
    pub category: Option<String>,
}

impl From<CreateExpenditureData> for NewExpenditure {
    fn from(data: CreateExpenditureData) -> Self {
        Self {
            amount: data.amount,
            date: data.date,
            category: data.category.as_deref().and_then(CategoryName::normalize),
        }
    }
}

/// A route handler for creating an expenditure, responds with the created
/// expenditure, `201 Created` and its URI in the `Location` header.
pub async fn create_expenditure_endpoint(
    State(state): State<CreateExpenditureState>,
    WithRejection(Json(data), _): WithRejection<Json<CreateExpenditureData>, Error>,
) -> Result<
    (
        StatusCode,
        [(HeaderName, String); 1],
        Json<ExpenditureResponse>,
    ),
    Error,
> {
    let connection = lock_connection(&state.db_connection)?;
    let expenditure = create_expenditure(data.into(), &connection)?;

    tracing::info!("Created expenditure {}", expenditure.id);

    let location = format_endpoint(endpoints::EXPENDITURE, expenditure.id);

    Ok((
        StatusCode::CREATED,
        [(LOCATION, location)],
        Json(expenditure.into()),
    ))
}
