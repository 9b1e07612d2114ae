use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use log::debug;
use std::sync::Arc;
use time::Date;

use crate::{
    dates::{clamp_window, parse_date, today},
    responses::{range_summary, RangeSummary},
    ApiError, AppState, ErrorBody,
};

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}",
    params(
         ("start" = String, Path, description = "First day of the range, YYYY-MM-DD"),
    ),
    responses(
        (status = OK, description = "Temperature summary from `start` through today, or `{\"error\": \"no data\"}` when the range misses the dataset", content_type = "application/json", body = RangeSummary),
        (status = BAD_REQUEST, description = "Date is not formatted as YYYY-MM-DD", body = ErrorBody),
        (status = NOT_FOUND, description = "The dataset holds no measurements", body = ErrorBody),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query the dataset", body = ErrorBody)
    ))]
pub async fn temperature_since(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<RangeSummary>, ApiError> {
    let Path(start) = path.map_err(path_rejection)?;
    let start = parse_param(&start)?;
    summarize(&state, start, today()).await
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}/{end}",
    params(
         ("start" = String, Path, description = "First day of the range, YYYY-MM-DD"),
         ("end" = String, Path, description = "Last day of the range, YYYY-MM-DD"),
    ),
    responses(
        (status = OK, description = "Temperature summary for the range, or `{\"error\": \"no data\"}` when the range misses the dataset", content_type = "application/json", body = RangeSummary),
        (status = BAD_REQUEST, description = "Date is not formatted as YYYY-MM-DD", body = ErrorBody),
        (status = NOT_FOUND, description = "The dataset holds no measurements", body = ErrorBody),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query the dataset", body = ErrorBody)
    ))]
pub async fn temperature_range(
    State(state): State<Arc<AppState>>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> Result<Json<RangeSummary>, ApiError> {
    let Path((start, end)) = path.map_err(path_rejection)?;
    let start = parse_param(&start)?;
    let end = parse_param(&end)?;
    summarize(&state, start, end).await
}

// Segments that are not valid UTF-8 once percent-decoded never reach parse_param
fn path_rejection(rejection: PathRejection) -> ApiError {
    ApiError::InvalidDateFormat(rejection.body_text())
}

fn parse_param(value: &str) -> Result<Date, ApiError> {
    parse_date(value).map_err(|_| ApiError::InvalidDateFormat(value.to_owned()))
}

// The aggregate runs over the requested range as given, while the reported
// date_from/date_to are clamped to the dataset's span.
async fn summarize(
    state: &AppState,
    start: Date,
    end: Date,
) -> Result<Json<RangeSummary>, ApiError> {
    let stats = state.climate_db.temperature_aggregate(start, end).await?;
    let latest = state.climate_db.latest_date().await?;
    let earliest = state.climate_db.earliest_date().await?;

    let window = clamp_window(start, end, earliest, latest);
    debug!(
        "range {} to {} clamped to {:?} within {} to {}",
        start, end, window, earliest, latest
    );

    range_summary(&stats, window)
        .map(Json)
        .ok_or(ApiError::NoDataInRange)
}
