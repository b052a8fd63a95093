use std::{fmt::Display, sync::Arc};

use axum::extract::{Query, State};
use serde::Deserialize;

use super::state::AppState;

pub const ACKNOWLEDGEMENT: &str = "hello";

#[derive(Deserialize)]
pub struct OAuthQuery {
    pub code: Option<String>,
    pub error: Option<String>,
}

impl Display for OAuthQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(err) = &self.error {
            return write!(f, "error={}", err);
        }
        if self.code.is_some() {
            return write!(f, "code=<redacted>");
        }
        write!(f, "empty")
    }
}

/// Registers the workspace in the background. The installation flow always
/// gets the acknowledgement, whatever happens to the registration.
pub async fn execute(
    State(state): State<Arc<AppState>>,
    Query(query): Query<OAuthQuery>,
) -> &'static str {
    log::trace!("received oauth authorization: {}", query);

    match query.code.clone() {
        Some(code) => {
            tokio::spawn(async move {
                if !state.service.access_workspace(&code).await {
                    log::warn!("workspace registration failed");
                }
            });
        }
        None => log::warn!("oauth callback without code: {}", query),
    }

    ACKNOWLEDGEMENT
}
