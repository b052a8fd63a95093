use std::sync::Arc;

use axum::{extract::State, Json};
use hyper::StatusCode;
use serde::Deserialize;

use crate::views::entities::{section, EphemeralResponse};
use crate::views::MessageView;

use super::state::AppState;

/// Slack command
/// Example: team_id=T0001&user_id=U0001&command=%2Fzettel&text=sent&trigger_id=<trigger_id>
#[derive(Deserialize, Debug)]
pub struct CommandRequest {
    pub team_id: String,
    pub user_id: String,
    #[serde(default)]
    pub text: String,
}

pub async fn execute(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<Json<EphemeralResponse>, StatusCode> {
    log::trace!("received command: {}", body);

    let payload = serde_urlencoded::from_str::<CommandRequest>(&body).map_err(|err| {
        log::debug!("could not parse command: {}", err);
        StatusCode::BAD_REQUEST
    })?;
    let messages = state.service.locale.messages();

    let digest = match payload.text.split_whitespace().next().unwrap_or("") {
        "sent" | "보낸" => {
            state
                .service
                .sharing_links(&payload.team_id, &payload.user_id)
                .await
        }
        "received" | "받은" => {
            state
                .service
                .shared_links(&payload.team_id, &payload.user_id)
                .await
        }
        _ => Some(text(messages.command_usage)),
    };

    Ok(Json(EphemeralResponse::new(
        digest.unwrap_or_else(|| text(messages.command_failure)),
    )))
}

fn text(message: &str) -> MessageView {
    MessageView::blocks(vec![section(message)])
}
