//! Endpoints that download the per-category totals for several date ranges.

use std::sync::{Arc, Mutex};

use axum::{
    Form, Json,
    extract::{FromRef, FromRequest, Request, State},
    http::header::CONTENT_TYPE,
};
use axum_extra::response::Attachment;
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    app_state::lock_connection,
    export::{ExportMatrix, ExportRange, build_export_matrix, write_csv, write_xlsx},
};

const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

/// The state needed to export totals.
#[derive(Debug, Clone)]
pub struct ExportState {
    /// The database connection for reading expenditures.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ExportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The ranges to export, one column each.
///
/// Sent either as a JSON list of `{start, end, title}` ranges, or as the same
/// list encoded as a JSON string in the `ranges` field of a url-encoded form so
/// that a plain HTML form can download the file.
#[derive(Debug)]
pub struct ExportRanges(pub Vec<ExportRange>);

#[derive(Debug, Deserialize)]
struct RangesForm {
    ranges: String,
}

impl<S> FromRequest<S> for ExportRanges
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = request
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"));

        if is_form {
            let Form(form) = Form::<RangesForm>::from_request(request, state).await?;

            serde_json::from_str(&form.ranges)
                .map(Self)
                .map_err(|error| Error::InvalidBody(format!("invalid ranges field: {error}")))
        } else {
            let Json(ranges) = Json::<Vec<ExportRange>>::from_request(request, state).await?;

            Ok(Self(ranges))
        }
    }
}

/// A route handler that responds with the totals as `export.xlsx`.
pub async fn export_excel_endpoint(
    State(state): State<ExportState>,
    ExportRanges(ranges): ExportRanges,
) -> Result<Attachment<Vec<u8>>, Error> {
    let matrix = load_matrix(&state, &ranges)?;
    let bytes = write_xlsx(&matrix)?;

    tracing::info!(
        "Exported {} categories over {} ranges as xlsx",
        matrix.rows.len(),
        ranges.len()
    );

    Ok(Attachment::new(bytes)
        .filename("export.xlsx")
        .content_type(XLSX_CONTENT_TYPE))
}

/// A route handler that responds with the totals as `export.csv`.
///
/// Takes the same body as [export_excel_endpoint].
pub async fn export_csv_endpoint(
    State(state): State<ExportState>,
    ExportRanges(ranges): ExportRanges,
) -> Result<Attachment<Vec<u8>>, Error> {
    let matrix = load_matrix(&state, &ranges)?;
    let bytes = write_csv(&matrix)?;

    tracing::info!(
        "Exported {} categories over {} ranges as csv",
        matrix.rows.len(),
        ranges.len()
    );

    Ok(Attachment::new(bytes)
        .filename("export.csv")
        .content_type(CSV_CONTENT_TYPE))
}

fn load_matrix(state: &ExportState, ranges: &[ExportRange]) -> Result<ExportMatrix, Error> {
    let connection = lock_connection(&state.db_connection)?;
    build_export_matrix(ranges, &connection)
}
