use async_trait::async_trait;
use log::{debug, info};
use sqlx::{
    pool::PoolConnection,
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions},
    Sqlite,
};
use std::{str::FromStr, time::Duration};
use time::Date;

use super::{
    ClimateData, Error, PrecipitationReading, Station, TemperatureReading, TemperatureStats,
};
use crate::dates::{format_date, parse_date};

pub struct ClimateAccess {
    pool: SqlitePool,
}

impl ClimateAccess {
    /// Opens a read-only pool over an existing dataset file
    pub async fn new(path: &str, max_connections: u32) -> Result<Self, Error> {
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", path))?
            .read_only(true)
            .create_if_missing(false)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await?;

        info!("SQLite dataset opened read-only at: {}", path);
        Ok(Self::from_pool(pool))
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Check that the dataset answers queries and has the tables we read from.
    pub async fn health_check(&self) -> Result<(), Error> {
        let mut conn = self.connection().await?;

        sqlx::query("SELECT 1").fetch_one(&mut *conn).await?;
        let measurements: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM measurement")
            .fetch_one(&mut *conn)
            .await?;
        let stations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM station")
            .fetch_one(&mut *conn)
            .await?;

        info!(
            "dataset ready: {} measurements, {} stations",
            measurements, stations
        );
        Ok(())
    }

    // The pooled connection goes back to the pool when the guard drops,
    // including when a query below bails out early with `?`.
    async fn connection(&self) -> Result<PoolConnection<Sqlite>, Error> {
        Ok(self.pool.acquire().await?)
    }

    async fn boundary_date(&self, sql: &'static str) -> Result<Date, Error> {
        let mut conn = self.connection().await?;
        let value: Option<String> = sqlx::query_scalar(sql).fetch_one(&mut *conn).await?;
        let value = value.ok_or(Error::EmptyDataset)?;

        parse_date(&value).map_err(|_| Error::StoredDate(value))
    }
}

#[async_trait]
impl ClimateData for ClimateAccess {
    async fn latest_date(&self) -> Result<Date, Error> {
        self.boundary_date("SELECT MAX(date) FROM measurement").await
    }

    async fn earliest_date(&self) -> Result<Date, Error> {
        self.boundary_date("SELECT MIN(date) FROM measurement").await
    }

    async fn precipitation_since(&self, start: Date) -> Result<Vec<PrecipitationReading>, Error> {
        let mut conn = self.connection().await?;
        let readings = sqlx::query_as::<_, PrecipitationReading>(
            "SELECT date, CAST(prcp AS REAL) AS prcp
             FROM measurement
             WHERE date >= ?",
        )
        .bind(format_date(start))
        .fetch_all(&mut *conn)
        .await?;

        debug!("{} precipitation readings since {}", readings.len(), start);
        Ok(readings)
    }

    async fn all_stations(&self) -> Result<Vec<Station>, Error> {
        let mut conn = self.connection().await?;
        let stations = sqlx::query_as::<_, Station>(
            "SELECT id, station, name,
                    CAST(latitude AS REAL) AS latitude,
                    CAST(longitude AS REAL) AS longitude,
                    CAST(elevation AS REAL) AS elevation
             FROM station
             ORDER BY rowid",
        )
        .fetch_all(&mut *conn)
        .await?;

        Ok(stations)
    }

    async fn most_active_station(&self) -> Result<String, Error> {
        let mut conn = self.connection().await?;
        let station: Option<String> = sqlx::query_scalar(
            "SELECT station
             FROM measurement
             GROUP BY station
             ORDER BY COUNT(*) DESC, MIN(rowid) ASC
             LIMIT 1",
        )
        .fetch_optional(&mut *conn)
        .await?;

        station.ok_or(Error::EmptyDataset)
    }

    async fn temperatures_for_station_since(
        &self,
        station_id: &str,
        start: Date,
    ) -> Result<Vec<TemperatureReading>, Error> {
        let mut conn = self.connection().await?;
        let readings = sqlx::query_as::<_, TemperatureReading>(
            "SELECT date, CAST(tobs AS REAL) AS tobs
             FROM measurement
             WHERE station = ? AND date >= ? AND tobs IS NOT NULL",
        )
        .bind(station_id)
        .bind(format_date(start))
        .fetch_all(&mut *conn)
        .await?;

        debug!(
            "{} temperature readings for {} since {}",
            readings.len(),
            station_id,
            start
        );
        Ok(readings)
    }

    async fn temperature_aggregate(
        &self,
        start: Date,
        end: Date,
    ) -> Result<TemperatureStats, Error> {
        let mut conn = self.connection().await?;
        let stats = sqlx::query_as::<_, TemperatureStats>(
            "SELECT CAST(MIN(tobs) AS REAL) AS min,
                    CAST(AVG(tobs) AS REAL) AS avg,
                    CAST(MAX(tobs) AS REAL) AS max
             FROM measurement
             WHERE date >= ? AND date <= ?",
        )
        .bind(format_date(start))
        .bind(format_date(end))
        .fetch_one(&mut *conn)
        .await?;

        Ok(stats)
    }
}
