use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Tag {
    pub id: String,
    pub name: String,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct User {
    pub slack_user_id: String,
    pub team_id: String,
}

impl User {
    pub fn new(slack_user_id: impl Into<String>, team_id: impl Into<String>) -> Self {
        Self {
            slack_user_id: slack_user_id.into(),
            team_id: team_id.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Link {
    pub id: Uuid,
    pub url: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub sharing_user: User,
    pub shared_users: Vec<User>,
    pub tags: Vec<Tag>,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Workspace {
    pub team_id: String,
    pub access_token: String,
    pub bot_user_id: Option<String>,
}

impl std::fmt::Display for Workspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // the access token never goes to the logs
        write!(
            f,
            "team_id={}, bot_user_id={}",
            self.team_id,
            self.bot_user_id.as_deref().unwrap_or("none")
        )
    }
}
