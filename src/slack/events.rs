use std::sync::Arc;

use axum::{extract::State, Json};
use hyper::{header::CONTENT_TYPE, HeaderMap, StatusCode};
use serde_json::{json, Value};

use super::payloads::{parse_interaction, InteractionPayload};
use super::service::Service;
use super::state::AppState;

pub type ErrorResponse = (StatusCode, Json<Value>);

pub fn error_response(status: StatusCode) -> ErrorResponse {
    (
        status,
        Json(json!({
            "statusCode": status.as_u16(),
            "message": status.canonical_reason().unwrap_or("Unknown"),
        })),
    )
}

/// Slack interaction webhook
pub async fn execute(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: String,
) -> Result<StatusCode, ErrorResponse> {
    log::trace!("received interaction: {}", body);

    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");
    let payload = parse_interaction(content_type, &body).map_err(|err| {
        log::debug!("could not parse interaction payload: {}", err);
        error_response(StatusCode::BAD_REQUEST)
    })?;

    if !dispatch(&state.service, &payload).await {
        log::error!("interaction {} failed", payload.kind);
        return Err(error_response(StatusCode::INTERNAL_SERVER_ERROR));
    }

    Ok(StatusCode::OK)
}

/// Runs the operation matching the interaction type. Types the app does not
/// handle succeed without doing anything.
pub async fn dispatch(service: &Service, payload: &InteractionPayload) -> bool {
    match payload.kind.as_str() {
        "shortcut" => match payload.trigger_id.as_deref() {
            Some(trigger_id) => service.call_modal(payload.team_id(), trigger_id).await,
            None => {
                log::debug!("shortcut without trigger id");
                false
            }
        },
        "view_submission" => service.get_modal_values(payload).await,
        "block_actions" => service.update_modal(payload).await,
        other => {
            log::debug!("ignoring interaction of type {}", other);
            true
        }
    }
}
