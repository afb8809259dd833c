use axum::{extract::State, Json};

use super::helpers::{error_response, ApiResult};
use crate::api::types::{EvaluateRequest, EvaluateResponse};
use crate::api::ServerState;
use crate::rules::GOLDEN_RULES;

pub async fn handle_evaluate(
    State(state): State<ServerState>,
    Json(req): Json<EvaluateRequest>,
) -> ApiResult<Json<EvaluateResponse>> {
    let mut session = state.session.lock().await;
    let evaluation = session
        .evaluate(&req.prompt)
        .await
        .map_err(error_response)?;
    Ok(Json(evaluation.into()))
}

pub async fn handle_rules() -> &'static str {
    GOLDEN_RULES
}
