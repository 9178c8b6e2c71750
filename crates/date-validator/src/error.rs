//! Validation Error Types

use thiserror::Error;

use crate::IsoDate;

/// Errors raised while validating user supplied dates.
///
/// The display strings are returned to API clients verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Input is not a canonical `YYYY-MM-DD` calendar date
    #[error("Date format should be YYYY-MM-DD")]
    InvalidFormat { input: String },

    /// Range start falls after range end
    #[error("Start date must be before end date")]
    StartAfterEnd { start: IsoDate, end: IsoDate },

    /// Single date outside the dataset bounds
    #[error("Date out of range. Date should be between {earliest} and {latest}")]
    DateOutOfRange { earliest: IsoDate, latest: IsoDate },

    /// Date range outside the dataset bounds
    #[error("Dates out of range. Dates should be between {earliest} and {latest}")]
    DatesOutOfRange { earliest: IsoDate, latest: IsoDate },
}
