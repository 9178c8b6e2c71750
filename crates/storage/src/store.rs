//! Climate Store
//!
//! Every query runs in its own short-lived session: the connection is opened,
//! used for exactly one statement and closed. On an error path the `?`
//! drops the connection, which releases it as well.

use std::path::{Path, PathBuf};

use date_validator::{DateBounds, IsoDate};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::Connection;
use tracing::{debug, info};

use crate::records::{Measurement, PrecipitationReading, Station, TemperatureStats};
use crate::schema;
use crate::StorageError;

/// Read-only handle to the dataset file
#[derive(Debug, Clone)]
pub struct ClimateStore {
    options: SqliteConnectOptions,
    path: PathBuf,
}

impl ClimateStore {
    /// Open the dataset and verify its schema.
    ///
    /// Fails when the file does not exist or either table lacks a required
    /// column. Callers treat this as fatal.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let options = SqliteConnectOptions::new()
            .filename(&path)
            .read_only(true)
            .create_if_missing(false);

        let store = Self { options, path };
        store.verify_schema().await?;

        info!("Opened climate dataset at {}", store.path.display());
        Ok(store)
    }

    async fn session(&self) -> Result<SqliteConnection, StorageError> {
        Ok(SqliteConnection::connect_with(&self.options).await?)
    }

    async fn verify_schema(&self) -> Result<(), StorageError> {
        let mut session = self.session().await?;
        schema::verify_table::<Measurement>(&mut session).await?;
        schema::verify_table::<Station>(&mut session).await?;
        session.close().await?;
        Ok(())
    }

    /// Precipitation for every row on or after `cutoff`, ascending by date
    pub async fn precipitation_since(
        &self,
        cutoff: IsoDate,
    ) -> Result<Vec<PrecipitationReading>, StorageError> {
        let mut session = self.session().await?;
        let rows: Vec<PrecipitationReading> = sqlx::query_as(
            "SELECT date, prcp FROM measurement WHERE date >= ?1 ORDER BY date ASC",
        )
        .bind(cutoff.to_string())
        .fetch_all(&mut session)
        .await?;
        session.close().await?;

        debug!("Fetched {} precipitation rows since {}", rows.len(), cutoff);
        Ok(rows)
    }

    /// Distinct station identifiers in the order SQLite yields them
    pub async fn distinct_stations(&self) -> Result<Vec<String>, StorageError> {
        let mut session = self.session().await?;
        let stations: Vec<String> = sqlx::query_scalar("SELECT DISTINCT station FROM station")
            .fetch_all(&mut session)
            .await?;
        session.close().await?;

        debug!("Fetched {} stations", stations.len());
        Ok(stations)
    }

    /// Temperature observations of one station on or after `cutoff`, unordered
    pub async fn temperatures_for_station_since(
        &self,
        station: &str,
        cutoff: IsoDate,
    ) -> Result<Vec<f64>, StorageError> {
        let mut session = self.session().await?;
        let temps: Vec<f64> =
            sqlx::query_scalar("SELECT tobs FROM measurement WHERE station = ?1 AND date >= ?2")
                .bind(station)
                .bind(cutoff.to_string())
                .fetch_all(&mut session)
                .await?;
        session.close().await?;

        debug!("Fetched {} observations for {} since {}", temps.len(), station, cutoff);
        Ok(temps)
    }

    /// Min, max and average temperature on or after `start`
    pub async fn temperature_stats_since(
        &self,
        start: IsoDate,
    ) -> Result<TemperatureStats, StorageError> {
        let mut session = self.session().await?;
        let stats: TemperatureStats = sqlx::query_as(
            "SELECT MIN(tobs) AS min, MAX(tobs) AS max, AVG(tobs) AS avg \
             FROM measurement WHERE date >= ?1",
        )
        .bind(start.to_string())
        .fetch_one(&mut session)
        .await?;
        session.close().await?;

        debug!("Temperature stats since {}: {:?}", start, stats);
        Ok(stats)
    }

    /// Min, max and average temperature within `[start, end]`
    pub async fn temperature_stats_between(
        &self,
        start: IsoDate,
        end: IsoDate,
    ) -> Result<TemperatureStats, StorageError> {
        let mut session = self.session().await?;
        let stats: TemperatureStats = sqlx::query_as(
            "SELECT MIN(tobs) AS min, MAX(tobs) AS max, AVG(tobs) AS avg \
             FROM measurement WHERE date >= ?1 AND date <= ?2",
        )
        .bind(start.to_string())
        .bind(end.to_string())
        .fetch_one(&mut session)
        .await?;
        session.close().await?;

        debug!("Temperature stats {}..={}: {:?}", start, end, stats);
        Ok(stats)
    }

    /// Earliest and latest measurement dates
    pub async fn date_bounds(&self) -> Result<DateBounds, StorageError> {
        let mut session = self.session().await?;
        let (earliest, latest): (Option<String>, Option<String>) =
            sqlx::query_as("SELECT MIN(date), MAX(date) FROM measurement")
                .fetch_one(&mut session)
                .await?;
        session.close().await?;

        match (earliest, latest) {
            (Some(earliest), Some(latest)) => Ok(DateBounds::new(
                parse_stored_date(&earliest)?,
                parse_stored_date(&latest)?,
            )),
            _ => Err(StorageError::EmptyDataset),
        }
    }
}

fn parse_stored_date(raw: &str) -> Result<IsoDate, StorageError> {
    IsoDate::parse(raw).map_err(|_| StorageError::InvalidStoredDate(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{FixtureDatabase, MEASUREMENT_DDL, STATION_DDL};

    fn date(s: &str) -> IsoDate {
        IsoDate::parse(s).unwrap()
    }

    #[tokio::test]
    async fn test_open_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = ClimateStore::open(dir.path().join("absent.sqlite")).await;
        assert!(matches!(result, Err(StorageError::Database(_))));
        assert!(!dir.path().join("absent.sqlite").exists());
    }

    #[tokio::test]
    async fn test_open_rejects_missing_columns() {
        let fixture = FixtureDatabase::with_schema(&[
            "CREATE TABLE measurement (id INTEGER PRIMARY KEY, station TEXT, date TEXT, prcp FLOAT)",
            STATION_DDL,
        ])
        .await
        .unwrap();

        match fixture.open_store().await {
            Err(StorageError::SchemaMismatch { table, missing }) => {
                assert_eq!(table, "measurement");
                assert_eq!(missing, vec!["tobs"]);
            }
            other => panic!("expected schema mismatch, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_open_rejects_missing_table() {
        let fixture = FixtureDatabase::with_schema(&[MEASUREMENT_DDL]).await.unwrap();
        let err = fixture.open_store().await.unwrap_err();
        assert!(matches!(err, StorageError::SchemaMismatch { table: "station", .. }));
    }

    #[tokio::test]
    async fn test_precipitation_since_filters_and_orders() {
        let fixture = FixtureDatabase::sample().await.unwrap();
        let store = fixture.open_store().await.unwrap();

        let rows = store.precipitation_since(date("2016-08-23")).await.unwrap();
        assert_eq!(rows.len(), 5);
        assert!(rows.iter().all(|r| r.date.as_str() >= "2016-08-23"));
        assert!(rows.windows(2).all(|w| w[0].date <= w[1].date));
        assert!(rows.iter().any(|r| r.date == "2017-01-01" && r.prcp.is_none()));
    }

    #[tokio::test]
    async fn test_distinct_stations() {
        let fixture = FixtureDatabase::sample().await.unwrap();
        let store = fixture.open_store().await.unwrap();

        let mut stations = store.distinct_stations().await.unwrap();
        stations.sort();
        assert_eq!(stations, vec!["USC00519281", "USC00519397"]);
    }

    #[tokio::test]
    async fn test_temperatures_for_station_since() {
        let fixture = FixtureDatabase::sample().await.unwrap();
        let store = fixture.open_store().await.unwrap();

        let mut temps = store
            .temperatures_for_station_since("USC00519281", date("2016-08-23"))
            .await
            .unwrap();
        temps.sort_by(f64::total_cmp);
        assert_eq!(temps, vec![70.0, 75.0, 80.0]);

        let none = store
            .temperatures_for_station_since("USC00000000", date("2016-08-23"))
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_temperature_stats_since() {
        let fixture = FixtureDatabase::sample().await.unwrap();
        let store = fixture.open_store().await.unwrap();

        let stats = store.temperature_stats_since(date("2017-01-01")).await.unwrap();
        assert_eq!(stats.min, Some(75.0));
        assert_eq!(stats.max, Some(81.0));
        assert!((stats.avg.unwrap() - 236.0 / 3.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_temperature_stats_between_inclusive() {
        let fixture = FixtureDatabase::sample().await.unwrap();
        let store = fixture.open_store().await.unwrap();

        let stats = store
            .temperature_stats_between(date("2016-08-23"), date("2016-08-23"))
            .await
            .unwrap();
        assert_eq!(stats.min, Some(70.0));
        assert_eq!(stats.max, Some(72.0));
        assert_eq!(stats.avg, Some(71.0));
    }

    #[tokio::test]
    async fn test_temperature_stats_empty_window_is_null() {
        let fixture = FixtureDatabase::sample().await.unwrap();
        let store = fixture.open_store().await.unwrap();

        let stats = store
            .temperature_stats_between(date("2016-09-01"), date("2016-12-31"))
            .await
            .unwrap();
        assert_eq!(stats, TemperatureStats::default());
    }

    #[tokio::test]
    async fn test_date_bounds() {
        let fixture = FixtureDatabase::sample().await.unwrap();
        let store = fixture.open_store().await.unwrap();

        let bounds = store.date_bounds().await.unwrap();
        assert_eq!(bounds.earliest, date("2016-08-22"));
        assert_eq!(bounds.latest, date("2017-08-23"));
    }

    #[tokio::test]
    async fn test_date_bounds_empty_dataset() {
        let fixture = FixtureDatabase::create(&[], &[]).await.unwrap();
        let store = fixture.open_store().await.unwrap();
        assert!(matches!(store.date_bounds().await, Err(StorageError::EmptyDataset)));
    }

    #[tokio::test]
    async fn test_store_does_not_write() {
        let fixture = FixtureDatabase::sample().await.unwrap();
        let store = fixture.open_store().await.unwrap();

        let mut session = store.session().await.unwrap();
        let result = sqlx::query("DELETE FROM measurement").execute(&mut session).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_query_after_file_removed_fails() {
        let fixture = FixtureDatabase::sample().await.unwrap();
        let store = fixture.open_store().await.unwrap();
        drop(fixture);

        assert!(matches!(store.distinct_stations().await, Err(StorageError::Database(_))));
    }
}
