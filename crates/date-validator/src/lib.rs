//! Date Validation
//!
//! Strict `YYYY-MM-DD` parsing and dataset range checks for the climate API.

mod date;
mod error;
mod validator;

pub use date::{IsoDate, DATE_FORMAT};
pub use error::ValidationError;
pub use validator::{DateBounds, DateRange};
