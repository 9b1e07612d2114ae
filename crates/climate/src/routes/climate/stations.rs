use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{
    responses::{station_list, StationRecord},
    ApiError, AppState, ErrorBody,
};

#[utoipa::path(
    get,
    path = "/api/v1.0/stations",
    responses(
        (status = OK, description = "Every station in the dataset", content_type = "application/json", body = Vec<StationRecord>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query the dataset", body = ErrorBody)
    ))]
pub async fn stations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<StationRecord>>, ApiError> {
    let stations = state.climate_db.all_stations().await?;
    Ok(Json(station_list(stations)))
}
