use axum::{extract::State, Json};

use super::helpers::{error_response, ApiResult};
use crate::api::types::{HistoryRow, SaveResponse};
use crate::api::ServerState;

pub async fn handle_history(State(state): State<ServerState>) -> Json<Vec<HistoryRow>> {
    let session = state.session.lock().await;
    Json(session.history().iter().map(HistoryRow::from).collect())
}

pub async fn handle_save(State(state): State<ServerState>) -> ApiResult<Json<SaveResponse>> {
    let session = state.session.lock().await;
    let saved = session.save().map_err(error_response)?;
    Ok(Json(SaveResponse {
        saved,
        path: session.store().path().display().to_string(),
    }))
}
