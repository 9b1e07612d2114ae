//! Reshapes query rows into the JSON bodies served by the API.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::Date;
use utoipa::ToSchema;

use crate::{
    dates::format_date,
    db::{PrecipitationReading, Station, TemperatureReading, TemperatureStats},
};

/// Date (`YYYY-MM-DD`) to precipitation, `null` where none was recorded
pub type PrecipitationMap = BTreeMap<String, Option<f64>>;

/// Date (`YYYY-MM-DD`) to observed temperature
pub type TemperatureMap = BTreeMap<String, f64>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StationRecord {
    pub id: i64,
    pub station: String,
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>,
}

impl From<Station> for StationRecord {
    fn from(value: Station) -> Self {
        Self {
            id: value.id,
            station: value.station,
            name: value.name,
            latitude: finite(value.latitude),
            longitude: finite(value.longitude),
            elevation: finite(value.elevation),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RangeSummary {
    #[serde(rename = "minimum temperature")]
    pub minimum_temperature: f64,
    #[serde(rename = "average temperature")]
    pub average_temperature: f64,
    #[serde(rename = "maximum temperature")]
    pub maximum_temperature: f64,
    pub date_from: String,
    pub date_to: String,
}

/// Sorts readings by date and keys them by date.
///
/// Several stations report on the same day; for a repeated date the reading
/// that sorts last replaces the earlier ones.
pub fn precipitation_map(mut readings: Vec<PrecipitationReading>) -> PrecipitationMap {
    readings.sort_by(|a, b| a.date.cmp(&b.date));

    let mut by_date = PrecipitationMap::new();
    for reading in readings {
        by_date.insert(reading.date, finite(reading.prcp));
    }
    by_date
}

/// Same overwrite-on-repeat contract as [`precipitation_map`].
pub fn temperature_map(mut readings: Vec<TemperatureReading>) -> TemperatureMap {
    readings.sort_by(|a, b| a.date.cmp(&b.date));

    let mut by_date = TemperatureMap::new();
    for reading in readings.into_iter().filter(|r| r.tobs.is_finite()) {
        by_date.insert(reading.date, reading.tobs);
    }
    by_date
}

pub fn station_list(stations: Vec<Station>) -> Vec<StationRecord> {
    stations.into_iter().map(StationRecord::from).collect()
}

/// Builds the summary for a clamped `[date_from, date_to]` window.
///
/// `None` when the window is empty or the aggregate matched no rows.
pub fn range_summary(
    stats: &TemperatureStats,
    window: Option<(Date, Date)>,
) -> Option<RangeSummary> {
    let (date_from, date_to) = window?;
    let (min, avg, max) = (finite(stats.min)?, finite(stats.avg)?, finite(stats.max)?);

    Some(RangeSummary {
        minimum_temperature: round2(min),
        average_temperature: round2(avg),
        maximum_temperature: round2(max),
        date_from: format_date(date_from),
        date_to: format_date(date_to),
    })
}

// Halves go to the even neighbour
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

// NaN and infinities have no JSON representation
fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}
