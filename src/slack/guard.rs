use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{request::Parts, Request},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use futures::TryStreamExt;
use hmac::{Hmac, Mac};
use hyper::{HeaderMap, StatusCode};
use sha2::Sha256;

use super::state::AppState;

const TIMESTAMP_HEADER: &str = "x-slack-request-timestamp";
const SIGNATURE_HEADER: &str = "x-slack-signature";
const MAX_REQUEST_AGE_SECS: i64 = 300;

struct Guard {
    parts: Parts,
    body: String,
}

impl Guard {
    async fn new(request: Request<Body>) -> Result<Self, StatusCode> {
        let (parts, mut body) = request.into_parts();
        let body = response_to_string(&mut body).await?;

        Ok(Self { parts, body })
    }

    fn validate_signature(&self, secret: &str) -> Result<(), StatusCode> {
        let headers: &HeaderMap = &self.parts.headers;
        let (timestamp, received_signature) =
            match (headers.get(TIMESTAMP_HEADER), headers.get(SIGNATURE_HEADER)) {
                (Some(timestamp), Some(signature)) => (timestamp, signature),
                _ => {
                    log::trace!("unable to find authentication headers");
                    return Err(StatusCode::BAD_REQUEST);
                }
            };
        log::debug!(
            "verifying signature: {}={:?},{}={:?}",
            TIMESTAMP_HEADER,
            timestamp,
            SIGNATURE_HEADER,
            received_signature
        );

        let timestamp: i64 = timestamp
            .to_str()
            .unwrap_or("")
            .parse()
            .unwrap_or(0);

        // the timestamp must not differ from local time by more than five minutes
        if (Utc::now().timestamp() - timestamp).abs() > MAX_REQUEST_AGE_SECS {
            log::trace!("request is too old");
            return Err(StatusCode::UNAUTHORIZED);
        }

        let base_str = format!("v0:{}:{}", timestamp, self.body);
        let expected_signature = calculate_signature(&base_str, secret)?;

        if expected_signature.as_bytes() != received_signature.as_bytes() {
            log::trace!("signature mismatch");
            return Err(StatusCode::UNAUTHORIZED);
        }

        log::debug!("signature verified");
        Ok(())
    }

    fn request(self) -> Request<Body> {
        Request::from_parts(self.parts, Body::from(self.body))
    }
}

/// Rejects requests that were not signed with the app's signing secret.
pub async fn validate(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
    next: Next<Body>,
) -> Result<Response, StatusCode> {
    let secret = match &state.signing_secret {
        Some(secret) => secret,
        None => return Ok(next.run(request).await),
    };
    let guard = Guard::new(request).await?;
    log::trace!("guard: validating signature");
    guard.validate_signature(secret)?;
    Ok(next.run(guard.request()).await)
}

async fn response_to_string(stream: &mut Body) -> Result<String, StatusCode> {
    let entire_body = stream
        .try_fold(Vec::new(), |mut data, chunk| async move {
            data.extend_from_slice(&chunk);
            Ok(data)
        })
        .await
        .map_err(|err| {
            log::error!("could not read from body stream: {}", err);
            StatusCode::BAD_REQUEST
        })?;
    let entire_body = String::from_utf8(entire_body).map_err(|err| {
        log::error!("request was not valid utf-8: {}", err);
        StatusCode::BAD_REQUEST
    })?;
    Ok(entire_body)
}

pub fn calculate_signature(base_str: &str, secret: &str) -> Result<String, StatusCode> {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).map_err(|err| {
        log::error!("could not create signature key: {}", err);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    mac.update(base_str.as_bytes());
    let result = mac.finalize().into_bytes();
    Ok(format!("v0={}", hex::encode(result)))
}
