use serde::{Deserialize, Serialize};

use crate::slack::client;

const SLACKBOT_USER_ID: &str = "USLACKBOT";
const PAGE_LIMIT: u32 = 200;

#[derive(Serialize, Debug)]
pub struct ClientQuery {
    pub team_id: String,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

#[derive(Deserialize)]
pub struct ClientResponse {
    #[serde(default = "Vec::new")]
    pub members: Vec<ClientUser>,
    pub response_metadata: Option<ResponseMetadata>,
}

#[derive(Deserialize)]
pub struct ResponseMetadata {
    #[serde(default)]
    pub next_cursor: String,
}

#[derive(Deserialize, Debug)]
pub struct ClientUser {
    pub id: String,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub is_bot: bool,
}

impl ClientUser {
    /// Deleted accounts, bots and slackbot never receive links.
    pub fn is_member(&self) -> bool {
        !self.deleted && !self.is_bot && self.id != SLACKBOT_USER_ID
    }
}

#[derive(Clone)]
pub struct Client {
    pub team_id: String,
    pub client: client::core::Client,
}

pub fn new(client: client::core::Client, team_id: &str) -> Client {
    Client {
        team_id: team_id.to_string(),
        client,
    }
}

impl Client {
    /// Ids of every human member, following `users.list` pagination.
    pub async fn execute(self) -> Result<Vec<String>, client::Error> {
        let mut member_ids = Vec::new();
        let mut cursor: Option<String> = None;
        loop {
            let page: ClientResponse = self
                .client
                .get(
                    "https://slack.com/api/users.list",
                    Some(&ClientQuery {
                        team_id: self.team_id.clone(),
                        limit: PAGE_LIMIT,
                        cursor: cursor.take(),
                    }),
                )
                .await?
                .api()
                .await?;

            member_ids.extend(
                page.members
                    .into_iter()
                    .filter(ClientUser::is_member)
                    .map(|user| user.id),
            );

            match page.response_metadata {
                Some(metadata) if !metadata.next_cursor.is_empty() => {
                    cursor = Some(metadata.next_cursor)
                }
                _ => break,
            }
        }
        Ok(member_ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_should_keep_only_human_members() {
        let body = r#"{
            "ok": true,
            "members": [
                {"id": "U0001", "deleted": false, "is_bot": false},
                {"id": "U0002", "deleted": true},
                {"id": "B0001", "is_bot": true},
                {"id": "USLACKBOT"},
                {"id": "U0003"}
            ],
            "response_metadata": {"next_cursor": ""}
        }"#;

        let page: ClientResponse = serde_json::from_str(body).unwrap();
        let ids: Vec<String> = page
            .members
            .into_iter()
            .filter(ClientUser::is_member)
            .map(|user| user.id)
            .collect();

        assert_eq!(ids, vec!["U0001", "U0003"]);
    }
}
