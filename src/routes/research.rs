use axum::{
    extract::State,
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::info;

use crate::history::SessionHistoryEntry;
use crate::models::{AppState, ErrorResponse, ResearchRequest};
use crate::pipeline::{PipelineRun, RunStatus};
use crate::types::AppError;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/research", post(start_research))
        .with_state(state)
}

/// Run the full pipeline for one submission.
///
/// The caller receives either a completed run or an error body; a run is
/// appended to session history whenever it reached a terminal state, so
/// failed submissions are replayable too.
async fn start_research(
    State(state): State<AppState>,
    Json(request): Json<ResearchRequest>,
) -> Result<Json<PipelineRun>, (StatusCode, Json<ErrorResponse>)> {
    info!(topic = %request.topic, age = request.age, include_visual = request.include_visual, "Received research request");

    let run = state
        .orchestrator
        .run(&request.topic, request.age, request.include_visual)
        .await
        .map_err(|e| {
            let status = match &e {
                AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
                AppError::Configuration(_) => StatusCode::SERVICE_UNAVAILABLE,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (
                status,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
        })?;

    if let Some(entry) = SessionHistoryEntry::from_run(&run) {
        state.history.append(entry);
    }

    match &run.status {
        RunStatus::Failed { stage_id, reason } => Err((
            StatusCode::BAD_GATEWAY,
            Json(ErrorResponse {
                error: format!("pipeline failed at stage {stage_id}: {reason}"),
            }),
        )),
        _ => Ok(Json(run)),
    }
}
