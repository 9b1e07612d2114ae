use axum::{extract::State, Json};
use std::{collections::BTreeMap, sync::Arc};

use crate::{
    dates::window_start,
    responses::{precipitation_map, PrecipitationMap},
    ApiError, AppState, ErrorBody,
};

#[utoipa::path(
    get,
    path = "/api/v1.0/precipitation",
    responses(
        (status = OK, description = "Precipitation by date for the twelve months ending on the latest recorded date", content_type = "application/json", body = BTreeMap<String, Option<f64>>),
        (status = NOT_FOUND, description = "The dataset holds no measurements", body = ErrorBody),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query the dataset", body = ErrorBody)
    ))]
pub async fn precipitation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PrecipitationMap>, ApiError> {
    let latest = state.climate_db.latest_date().await?;
    let readings = state
        .climate_db
        .precipitation_since(window_start(latest))
        .await?;

    Ok(Json(precipitation_map(readings)))
}
