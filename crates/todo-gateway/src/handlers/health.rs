use axum::extract::State;
use axum::http::StatusCode;
use tracing::warn;

use crate::model::HealthResponse;
use crate::response::PrettyJson;
use crate::state::AppState;

pub async fn health_handler(
    State(state): State<AppState>,
) -> (StatusCode, PrettyJson<HealthResponse>) {
    match state.repository().ping().await {
        Ok(()) => (StatusCode::OK, PrettyJson(HealthResponse { status: "ok" })),
        Err(err) => {
            warn!(error = %err, "store ping failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                PrettyJson(HealthResponse {
                    status: "unavailable",
                }),
            )
        }
    }
}
