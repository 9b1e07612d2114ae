mod sqlite;

use async_trait::async_trait;
use sqlx::FromRow;
use time::Date;

pub use sqlite::ClimateAccess;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to query sqlite: {0}")]
    Query(#[from] sqlx::Error),
    #[error("No measurements found in dataset")]
    EmptyDataset,
    #[error("Stored date is not a valid YYYY-MM-DD value: {0}")]
    StoredDate(String),
}

/// Read-only access to the climate observation dataset.
///
/// Every call acquires its own connection and releases it before returning,
/// on success and on error.
#[async_trait]
pub trait ClimateData: Sync + Send {
    /// Most recent `measurement.date`
    async fn latest_date(&self) -> Result<Date, Error>;
    /// Oldest `measurement.date`
    async fn earliest_date(&self) -> Result<Date, Error>;
    /// All readings dated on or after `start`, in storage order
    async fn precipitation_since(&self, start: Date) -> Result<Vec<PrecipitationReading>, Error>;
    async fn all_stations(&self) -> Result<Vec<Station>, Error>;
    /// Station with the most measurement rows, ties going to the first one stored
    async fn most_active_station(&self) -> Result<String, Error>;
    async fn temperatures_for_station_since(
        &self,
        station_id: &str,
        start: Date,
    ) -> Result<Vec<TemperatureReading>, Error>;
    /// Min/avg/max of `tobs` over `[start, end]`, all `None` when no rows match
    async fn temperature_aggregate(&self, start: Date, end: Date)
        -> Result<TemperatureStats, Error>;
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Station {
    pub id: i64,
    /// Station code, e.g. `USC00519281`
    pub station: String,
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct PrecipitationReading {
    pub date: String,
    pub prcp: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct TemperatureReading {
    pub date: String,
    pub tobs: f64,
}

#[derive(Debug, Clone, Default, PartialEq, FromRow)]
pub struct TemperatureStats {
    pub min: Option<f64>,
    pub avg: Option<f64>,
    pub max: Option<f64>,
}
