//! Temperature Statistics Routes

use axum::{
    extract::{Path, State},
    Json,
};
use date_validator::{DateRange, IsoDate};
use std::sync::Arc;
use storage::TemperatureStats;

use crate::{ApiError, AppState};

/// One-element list holding the aggregate
pub type StatsResponse = Json<Vec<TemperatureStats>>;

/// Min, max and average temperature from `start` onwards
pub async fn get_stats_since(
    State(state): State<Arc<AppState>>,
    Path(start): Path<String>,
) -> Result<StatsResponse, ApiError> {
    let start = IsoDate::parse(&start)?;

    let bounds = state.store.date_bounds().await?;
    bounds.check_date(start)?;

    let stats = state.store.temperature_stats_since(start).await?;
    Ok(Json(vec![stats]))
}

/// Min, max and average temperature within `[start, end]`
pub async fn get_stats_between(
    State(state): State<Arc<AppState>>,
    Path((start, end)): Path<(String, String)>,
) -> Result<StatsResponse, ApiError> {
    let range = DateRange::parse(&start, &end)?;

    let bounds = state.store.date_bounds().await?;
    bounds.check_range(&range)?;

    let stats = state
        .store
        .temperature_stats_between(range.start(), range.end())
        .await?;
    Ok(Json(vec![stats]))
}
