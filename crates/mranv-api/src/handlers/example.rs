//! Timestamp endpoint

use axum::Json;
use chrono::Utc;
use mranv_core::TimestampResponse;

/// Return the server's current time
///
/// # Example Response
///
/// ```json
/// { "time": "2024-03-15T14:25:30.123Z" }
/// ```
pub async fn get_time() -> Json<TimestampResponse> {
    Json(TimestampResponse::at(Utc::now()))
}
