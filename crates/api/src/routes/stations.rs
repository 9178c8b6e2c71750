//! Station Routes

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{ApiError, AppState};

/// Distinct station identifiers
pub async fn get_stations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(state.store.distinct_stations().await?))
}
