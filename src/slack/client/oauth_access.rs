use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::slack::client;

const REQUIRED_SCOPES: [&str; 3] = ["commands", "chat:write", "users:read"];

#[derive(Serialize)]
pub struct ClientRequest<'a> {
    pub client_id: &'a str,
    pub client_secret: &'a str,
    pub code: &'a str,
}

// Keeps the secret out of the request trace.
impl std::fmt::Debug for ClientRequest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ClientRequest {{ client_id: {} }}", self.client_id)
    }
}

#[derive(Deserialize)]
pub struct ClientRawResponse {
    pub token_type: Option<String>,
    pub access_token: Option<String>,
    pub bot_user_id: Option<String>,
    pub team: Option<ClientTeam>,
    pub scope: Option<String>,
}

#[derive(Deserialize)]
pub struct ClientTeam {
    pub id: String,
}

/// A validated bot installation.
#[derive(Debug, Clone, PartialEq)]
pub struct OAuthAccess {
    pub team_id: String,
    pub access_token: String,
    pub bot_user_id: Option<String>,
}

impl TryFrom<ClientRawResponse> for OAuthAccess {
    type Error = client::Error;

    fn try_from(value: ClientRawResponse) -> Result<Self, Self::Error> {
        let token_type = value.token_type.ok_or("no token type")?;
        if token_type != "bot" {
            return Err(format!("expected bot token but found {}", token_type).into());
        }

        let granted: HashSet<&str> = value
            .scope
            .as_deref()
            .ok_or("no scope")?
            .split(',')
            .collect();
        if let Some(missing) = REQUIRED_SCOPES
            .iter()
            .find(|scope| !granted.contains(*scope))
        {
            return Err(format!("oauth access does not contain scope {}", missing).into());
        }

        Ok(Self {
            team_id: value.team.ok_or("no team")?.id,
            access_token: value.access_token.ok_or("no access token")?,
            bot_user_id: value.bot_user_id,
        })
    }
}

pub async fn execute(
    client: &client::core::Client,
    request: ClientRequest<'_>,
) -> Result<OAuthAccess, client::Error> {
    client
        .post_form("https://slack.com/api/oauth.v2.access", &request)
        .await?
        .api::<ClientRawResponse>()
        .await?
        .try_into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(token_type: &str, scope: &str) -> ClientRawResponse {
        serde_json::from_value(serde_json::json!({
            "token_type": token_type,
            "access_token": "xoxb-1",
            "bot_user_id": "B0001",
            "team": {"id": "T0001"},
            "scope": scope,
        }))
        .unwrap()
    }

    #[test]
    fn it_should_accept_a_bot_token_with_the_required_scopes() {
        let access: OAuthAccess = raw("bot", "commands,chat:write,users:read,im:write")
            .try_into()
            .unwrap();

        assert_eq!(
            access,
            OAuthAccess {
                team_id: "T0001".to_string(),
                access_token: "xoxb-1".to_string(),
                bot_user_id: Some("B0001".to_string()),
            }
        );
    }

    #[test]
    fn it_should_reject_user_tokens() {
        let result: Result<OAuthAccess, client::Error> =
            raw("user", "commands,chat:write,users:read").try_into();

        assert!(result.is_err());
    }

    #[test]
    fn it_should_reject_missing_scopes() {
        let result: Result<OAuthAccess, client::Error> = raw("bot", "commands,chat:write").try_into();

        assert_eq!(
            result.unwrap_err().message,
            "oauth access does not contain scope users:read"
        );
    }
}
