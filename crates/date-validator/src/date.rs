//! Canonical ISO calendar dates
//!
//! Dates in the measurement table are stored as `YYYY-MM-DD` text and the
//! store filters them with plain string comparison. That is only sound when
//! every date crossing the boundary is zero-padded and four-digit-year, so
//! string order and calendar order coincide. `IsoDate` only admits that form.

use std::fmt;
use std::str::FromStr;

use chrono::{Days, NaiveDate};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

/// Wire format of every date the API accepts or emits
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const CANONICAL_LEN: usize = 10;

/// A calendar date that renders as canonical `YYYY-MM-DD`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoDate(NaiveDate);

impl IsoDate {
    /// Parse a strict `YYYY-MM-DD` string.
    ///
    /// Inputs chrono would otherwise tolerate (`2017-1-5`, `+2017-01-05`)
    /// are rejected because they would not sort correctly as text.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidFormat {
            input: input.to_string(),
        };

        if input.len() != CANONICAL_LEN {
            return Err(invalid());
        }

        let date = NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|_| invalid())?;
        let parsed = Self(date);

        // Round trip guards against non-padded fields of the right total length
        if parsed.to_string() != input {
            return Err(invalid());
        }

        Ok(parsed)
    }

    /// Build from calendar components
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .filter(|d| d.to_string().len() == CANONICAL_LEN)
    }

    /// The date `days` days earlier, if representable
    pub fn days_before(self, days: u32) -> Option<Self> {
        self.0
            .checked_sub_days(Days::new(u64::from(days)))
            .map(Self)
            .filter(|d| d.to_string().len() == CANONICAL_LEN)
    }
}

impl fmt::Display for IsoDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for IsoDate {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for IsoDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for IsoDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(|_| de::Error::custom(format!("invalid date `{raw}`, expected YYYY-MM-DD")))
    }
}
