//! Record Types
//!
//! Static declarations of the two dataset tables and the row shapes the
//! store returns.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use sqlx::FromRow;

/// A table the store expects to find in the dataset file
pub trait TableSchema {
    /// Table name
    const TABLE: &'static str;
    /// Columns that must be present. Extra columns are ignored.
    const REQUIRED_COLUMNS: &'static [&'static str];
}

/// One weather observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub station: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// Precipitation, missing on some days
    pub prcp: Option<f64>,
    /// Temperature observation
    pub tobs: f64,
}

impl Measurement {
    pub fn new(station: &str, date: &str, prcp: Option<f64>, tobs: f64) -> Self {
        Self {
            station: station.to_string(),
            date: date.to_string(),
            prcp,
            tobs,
        }
    }
}

impl TableSchema for Measurement {
    const TABLE: &'static str = "measurement";
    const REQUIRED_COLUMNS: &'static [&'static str] = &["station", "date", "prcp", "tobs"];
}

/// A weather reporting site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub station: String,
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>,
}

impl Station {
    pub fn new(station: &str, name: &str) -> Self {
        Self {
            station: station.to_string(),
            name: name.to_string(),
            latitude: None,
            longitude: None,
            elevation: None,
        }
    }
}

impl TableSchema for Station {
    const TABLE: &'static str = "station";
    const REQUIRED_COLUMNS: &'static [&'static str] = &["station", "name"];
}

/// Precipitation on one date.
///
/// Serializes as the single-key object `{"<date>": <prcp>}`.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct PrecipitationReading {
    pub date: String,
    pub prcp: Option<f64>,
}

impl Serialize for PrecipitationReading {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.date, &self.prcp)?;
        map.end()
    }
}

/// Aggregate temperature statistics.
///
/// Each field is `None` when no rows matched the filter.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, FromRow)]
pub struct TemperatureStats {
    #[serde(rename = "Temp Min")]
    pub min: Option<f64>,
    #[serde(rename = "Temp Max")]
    pub max: Option<f64>,
    #[serde(rename = "Temp Avg")]
    pub avg: Option<f64>,
}
