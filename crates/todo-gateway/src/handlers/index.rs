use axum::extract::State;

use crate::model::RoutesResponse;
use crate::response::PrettyJson;
use crate::state::AppState;

/// Lists every route registered on the router.
pub async fn index_handler(State(state): State<AppState>) -> PrettyJson<RoutesResponse> {
    PrettyJson(RoutesResponse {
        routes: state.routes().to_vec(),
    })
}
