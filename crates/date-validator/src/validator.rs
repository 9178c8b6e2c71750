//! Range Checks Against Dataset Bounds

use serde::Serialize;
use tracing::debug;

use crate::date::IsoDate;
use crate::error::ValidationError;

/// Inclusive date range with `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: IsoDate,
    end: IsoDate,
}

impl DateRange {
    /// Create a range. Equal endpoints are a valid single-day range.
    pub fn new(start: IsoDate, end: IsoDate) -> Result<Self, ValidationError> {
        if start > end {
            return Err(ValidationError::StartAfterEnd { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parse both endpoints, then check their order
    pub fn parse(start: &str, end: &str) -> Result<Self, ValidationError> {
        let start = IsoDate::parse(start)?;
        let end = IsoDate::parse(end)?;
        Self::new(start, end)
    }

    pub fn start(&self) -> IsoDate {
        self.start
    }

    pub fn end(&self) -> IsoDate {
        self.end
    }
}

/// Earliest and latest measurement dates in the dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateBounds {
    pub earliest: IsoDate,
    pub latest: IsoDate,
}

impl DateBounds {
    pub fn new(earliest: IsoDate, latest: IsoDate) -> Self {
        Self { earliest, latest }
    }

    /// Check a single date lies within `[earliest, latest]`
    pub fn check_date(&self, date: IsoDate) -> Result<(), ValidationError> {
        if date < self.earliest || date > self.latest {
            debug!("Date {} outside [{}, {}]", date, self.earliest, self.latest);
            return Err(ValidationError::DateOutOfRange {
                earliest: self.earliest,
                latest: self.latest,
            });
        }
        Ok(())
    }

    /// Check a range against the bounds.
    ///
    /// Only `start` is compared with `earliest` and only `end` with `latest`.
    /// Because `DateRange` already guarantees `start <= end`, this is
    /// equivalent to full containment.
    pub fn check_range(&self, range: &DateRange) -> Result<(), ValidationError> {
        if range.start < self.earliest || range.end > self.latest {
            debug!(
                "Range {}..={} outside [{}, {}]",
                range.start, range.end, self.earliest, self.latest
            );
            return Err(ValidationError::DatesOutOfRange {
                earliest: self.earliest,
                latest: self.latest,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> IsoDate {
        IsoDate::parse(s).unwrap()
    }

    fn bounds() -> DateBounds {
        DateBounds::new(date("2010-01-01"), date("2017-08-23"))
    }

    #[test]
    fn test_range_allows_equal_dates() {
        let range = DateRange::parse("2017-01-01", "2017-01-01").unwrap();
        assert_eq!(range.start(), range.end());
    }

    #[test]
    fn test_range_rejects_reversed_dates() {
        let err = DateRange::parse("2017-02-01", "2017-01-01").unwrap_err();
        assert_eq!(err.to_string(), "Start date must be before end date");
    }

    #[test]
    fn test_range_format_error_wins_over_order() {
        let err = DateRange::parse("2017-13-40", "2016-01-01").unwrap_err();
        assert_eq!(err.to_string(), "Date format should be YYYY-MM-DD");
        let err = DateRange::parse("2017-01-01", "2017-13-40").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
    }

    #[test]
    fn test_check_date_inclusive_bounds() {
        let bounds = bounds();
        assert!(bounds.check_date(date("2010-01-01")).is_ok());
        assert!(bounds.check_date(date("2017-08-23")).is_ok());
        assert!(bounds.check_date(date("2009-12-31")).is_err());
        assert!(bounds.check_date(date("2017-08-24")).is_err());
    }

    #[test]
    fn test_out_of_range_message_mentions_bounds() {
        let err = bounds().check_date(date("2001-01-01")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Date out of range. Date should be between 2010-01-01 and 2017-08-23"
        );
    }

    #[test]
    fn test_check_range() {
        let bounds = bounds();
        assert!(bounds.check_range(&DateRange::parse("2010-01-01", "2017-08-23").unwrap()).is_ok());

        let err = bounds
            .check_range(&DateRange::parse("2009-12-31", "2012-01-01").unwrap())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Dates out of range. Dates should be between 2010-01-01 and 2017-08-23"
        );
        assert!(bounds.check_range(&DateRange::parse("2012-01-01", "2018-01-01").unwrap()).is_err());
    }
}
