//! Spendlog is a backend for tracking personal expenditures.
//!
//! This library provides a JSON REST API for recording expenditures, listing
//! them with filtering, sorting and pagination, summing them per category and
//! exporting those sums as a spreadsheet.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    extract::rejection::{FormRejection, JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde::Serialize;
use tokio::signal;

mod app_state;
mod category;
mod database_id;
mod date_range;
mod db;
mod endpoints;
mod export;
mod expenditure;
mod logging;
mod pagination;
mod routing;
mod stats;
mod timestamp;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use category::{Category, CategoryName};
pub use database_id::{CategoryId, DatabaseId, ExpenditureId};
pub use date_range::DateRange;
pub use db::initialize as initialize_db;
pub use expenditure::{Expenditure, ListingConfig, SortSeparator};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use pagination::{PaginationConfig, ZeroLimitPolicy};
pub use routing::build_router;
pub use timestamp::{Timestamp, TimestampError};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// Only one of the `start` and `end` query parameters was given.
    ///
    /// A date range needs both ends, or neither for no date filter.
    #[error("start and end must be given together")]
    MismatchedDateRange,

    /// A date could not be parsed as an RFC 3339 timestamp.
    ///
    /// Callers should pass in the name of the parameter and the parse error.
    #[error("could not parse {0} as an RFC 3339 timestamp: {1}")]
    InvalidDate(&'static str, String),

    /// A path parameter, e.g. an ID, was not valid.
    #[error("invalid path parameter: {0}")]
    InvalidPath(String),

    /// The query string could not be parsed.
    #[error("invalid query string: {0}")]
    InvalidQuery(String),

    /// The request body could not be parsed.
    #[error("invalid request body: {0}")]
    InvalidBody(String),

    /// An empty string was used to name a category.
    #[error("category name cannot be empty")]
    EmptyCategoryName,

    /// A category with the given name already exists.
    #[error("the category \"{0}\" already exists")]
    DuplicateCategoryName(String),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to update an expenditure that does not exist
    #[error("tried to update an expenditure that is not in the database")]
    UpdateMissingExpenditure,

    /// Tried to delete an expenditure that does not exist
    #[error("tried to delete an expenditure that is not in the database")]
    DeleteMissingExpenditure,

    /// Tried to update a category that does not exist
    #[error("tried to update a category that is not in the database")]
    UpdateMissingCategory,

    /// A category name could not be resolved to an ID after repeated
    /// insert conflicts.
    #[error("could not resolve the category \"{0}\"")]
    CategoryResolutionFailed(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// The export spreadsheet could not be built.
    #[error("could not build the spreadsheet: {0}")]
    SheetError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Error::InvalidPath(rejection.body_text())
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Error::InvalidQuery(rejection.body_text())
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::InvalidBody(rejection.body_text())
    }
}

impl From<FormRejection> for Error {
    fn from(rejection: FormRejection) -> Self {
        Error::InvalidBody(rejection.body_text())
    }
}

/// The JSON body sent with every error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::MismatchedDateRange
            | Error::InvalidDate(_, _)
            | Error::InvalidPath(_)
            | Error::InvalidQuery(_)
            | Error::InvalidBody(_)
            | Error::EmptyCategoryName
            | Error::DuplicateCategoryName(_) => StatusCode::BAD_REQUEST,
            Error::NotFound
            | Error::UpdateMissingExpenditure
            | Error::DeleteMissingExpenditure
            | Error::UpdateMissingCategory => StatusCode::NOT_FOUND,
            Error::CategoryResolutionFailed(_)
            | Error::SqlError(_)
            | Error::DatabaseLockError
            | Error::SheetError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            // These errors are not intended to be shown to the client.
            tracing::error!("An unexpected error occurred: {}", self);
            "an unexpected error occurred, check the server logs for more details".to_owned()
        } else {
            tracing::info!("Rejecting request: {}", self);
            self.to_string()
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
