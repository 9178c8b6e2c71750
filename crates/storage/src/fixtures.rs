//! Throwaway SQLite datasets for tests.
//!
//! The tables mirror the layout of the published Hawaii climate file,
//! including the surrogate `id` columns and station location attributes.

use std::path::{Path, PathBuf};

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::Connection;
use tempfile::TempDir;

use crate::records::{Measurement, Station};
use crate::{ClimateStore, StorageError};

pub const MEASUREMENT_DDL: &str = "CREATE TABLE measurement (
    id INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
    station TEXT,
    date TEXT,
    prcp FLOAT,
    tobs FLOAT
)";

pub const STATION_DDL: &str = "CREATE TABLE station (
    id INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
    station TEXT,
    name TEXT,
    latitude FLOAT,
    longitude FLOAT,
    elevation FLOAT
)";

/// A dataset file living in its own temporary directory.
///
/// The directory is removed when the fixture is dropped.
pub struct FixtureDatabase {
    _dir: TempDir,
    path: PathBuf,
}

impl FixtureDatabase {
    /// Create a database file by running the given DDL statements
    pub async fn with_schema(statements: &[&str]) -> Result<Self, sqlx::Error> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("climate.sqlite");

        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true);
        let mut conn = SqliteConnection::connect_with(&options).await?;
        for statement in statements.iter().copied() {
            sqlx::query(statement).execute(&mut conn).await?;
        }
        conn.close().await?;

        Ok(Self { _dir: dir, path })
    }

    /// Create a database with the standard tables holding the given rows
    pub async fn create(
        measurements: &[Measurement],
        stations: &[Station],
    ) -> Result<Self, sqlx::Error> {
        let fixture = Self::with_schema(&[MEASUREMENT_DDL, STATION_DDL]).await?;
        fixture.insert(measurements, stations).await?;
        Ok(fixture)
    }

    /// Standard tables filled with [`sample_measurements`] and [`sample_stations`]
    pub async fn sample() -> Result<Self, sqlx::Error> {
        Self::create(&sample_measurements(), &sample_stations()).await
    }

    async fn insert(
        &self,
        measurements: &[Measurement],
        stations: &[Station],
    ) -> Result<(), sqlx::Error> {
        let options = SqliteConnectOptions::new().filename(&self.path);
        let mut conn = SqliteConnection::connect_with(&options).await?;
        let mut tx = conn.begin().await?;

        for m in measurements {
            sqlx::query("INSERT INTO measurement (station, date, prcp, tobs) VALUES (?1, ?2, ?3, ?4)")
                .bind(&m.station)
                .bind(&m.date)
                .bind(m.prcp)
                .bind(m.tobs)
                .execute(&mut *tx)
                .await?;
        }

        for s in stations {
            sqlx::query(
                "INSERT INTO station (station, name, latitude, longitude, elevation) VALUES (?1, ?2, ?3, ?4, ?5)",
            )
            .bind(&s.station)
            .bind(&s.name)
            .bind(s.latitude)
            .bind(s.longitude)
            .bind(s.elevation)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        conn.close().await
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a read-only store over this file
    pub async fn open_store(&self) -> Result<ClimateStore, StorageError> {
        ClimateStore::open(&self.path).await
    }
}

/// Two stations, dates straddling the 2016-08-23 cutoff.
///
/// Earliest date 2016-08-22, latest 2017-08-23.
pub fn sample_measurements() -> Vec<Measurement> {
    vec![
        Measurement::new("USC00519281", "2016-08-22", Some(0.5), 60.0),
        Measurement::new("USC00519281", "2016-08-23", Some(0.0), 70.0),
        Measurement::new("USC00519397", "2016-08-23", Some(0.1), 72.0),
        Measurement::new("USC00519281", "2017-01-01", None, 75.0),
        Measurement::new("USC00519281", "2017-08-23", Some(1.2), 80.0),
        Measurement::new("USC00519397", "2017-08-23", Some(0.0), 81.0),
    ]
}

/// The station table lists `USC00519281` twice to exercise `DISTINCT`
pub fn sample_stations() -> Vec<Station> {
    vec![
        Station::new("USC00519397", "WAIKIKI 717.2, HI US"),
        Station::new("USC00519281", "WAIHEE 837.5, HI US"),
        Station::new("USC00519281", "WAIHEE 837.5, HI US"),
    ]
}
