//! Temperature Observation Routes

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{ApiError, AppState};

/// Last twelve months of temperature observations for the configured station
pub async fn get_tobs(State(state): State<Arc<AppState>>) -> Result<Json<Vec<f64>>, ApiError> {
    let temps = state
        .store
        .temperatures_for_station_since(&state.tobs_station, state.cutoff)
        .await?;
    Ok(Json(temps))
}
