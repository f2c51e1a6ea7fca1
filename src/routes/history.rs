use axum::{extract::State, routing::get, Json, Router};

use crate::models::{AppState, HistoryResponse};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/history", get(get_history))
        .with_state(state)
}

/// Session history in submission order
async fn get_history(State(state): State<AppState>) -> Json<HistoryResponse> {
    Json(HistoryResponse {
        entries: state.history.all(),
    })
}
