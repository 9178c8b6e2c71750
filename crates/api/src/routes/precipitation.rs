//! Precipitation Routes

use axum::{extract::State, Json};
use std::sync::Arc;
use storage::PrecipitationReading;

use crate::{ApiError, AppState};

/// Last twelve months of precipitation.
///
/// One `{date: prcp}` object per measurement row, ascending by date. Rows
/// sharing a date stay separate objects.
pub async fn get_precipitation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<PrecipitationReading>>, ApiError> {
    let readings = state.store.precipitation_since(state.cutoff).await?;
    Ok(Json(readings))
}
