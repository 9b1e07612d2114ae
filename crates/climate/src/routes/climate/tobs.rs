use axum::{extract::State, Json};
use log::debug;
use std::{collections::BTreeMap, sync::Arc};

use crate::{
    dates::window_start,
    responses::{temperature_map, TemperatureMap},
    ApiError, AppState, ErrorBody,
};

#[utoipa::path(
    get,
    path = "/api/v1.0/tobs",
    responses(
        (status = OK, description = "Observed temperature by date for the most active station over the last twelve months of data", content_type = "application/json", body = BTreeMap<String, f64>),
        (status = NOT_FOUND, description = "The dataset holds no measurements", body = ErrorBody),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query the dataset", body = ErrorBody)
    ))]
pub async fn tobs(State(state): State<Arc<AppState>>) -> Result<Json<TemperatureMap>, ApiError> {
    let latest = state.climate_db.latest_date().await?;
    let station = state.climate_db.most_active_station().await?;
    debug!("most active station: {}", station);

    let readings = state
        .climate_db
        .temperatures_for_station_since(&station, window_start(latest))
        .await?;

    Ok(Json(temperature_map(readings)))
}
