//! Landing Page

use axum::response::Html;

/// Route listing shown at `/`
pub const HOME_PAGE: &str = concat!(
    "Welcome!<br/><br/>",
    "Available Routes:<br/>",
    "/api/v1.0/precipitation<br/>",
    "/api/v1.0/stations<br/>",
    "/api/v1.0/tobs<br/><br/>",
    "Or search for the min, max, and average temperature for a specific date or date range (format yyyy-mm-dd)<br/>",
    "Date example: /api/v1.0/2016-08-03<br/>",
    "Date range example: /api/v1.0/2016-08-03/2017-01-10",
);

/// List available routes
pub async fn index() -> Html<&'static str> {
    Html(HOME_PAGE)
}
