use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// URL verification handshake
#[derive(Deserialize, Debug)]
pub struct ChallengeRequest {
    pub challenge: Option<Value>,
}

#[derive(Serialize, Debug)]
pub struct ChallengeResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub challenge: Option<Value>,
}

pub async fn execute(Json(body): Json<ChallengeRequest>) -> Json<ChallengeResponse> {
    log::trace!("received url verification: {:?}", body);

    Json(ChallengeResponse {
        challenge: body.challenge,
    })
}
