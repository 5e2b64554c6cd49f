// src/handlers/time_ranges.rs

use axum::Json;

use crate::models::time_range::{TimeRange, TimeRangeOption};

// GET /api/time-ranges (opções do seletor de período)
#[utoipa::path(
    get,
    path = "/api/time-ranges",
    tag = "Time Ranges",
    responses(
        (status = 200, description = "Períodos disponíveis, na ordem do seletor", body = Vec<TimeRangeOption>)
    )
)]
pub async fn list_time_ranges() -> Json<Vec<TimeRangeOption>> {
    Json(TimeRange::ALL.into_iter().map(TimeRangeOption::from).collect())
}
