use chrono::{TimeZone, Utc};
use uuid::Uuid;

use super::entities::{Link, Tag, User, Workspace};

pub const TEAM_ID: &str = "T0001";
pub const SHARING_USER_ID: &str = "U0001";
pub const LINK_ID: &str = "0e8b2d3c-4a6f-4f2a-9c1d-7b5e8f9a0b1c";

pub fn mock_tags() -> Vec<Tag> {
    vec![
        Tag {
            id: "tag-1".to_string(),
            name: "개발".to_string(),
        },
        Tag {
            id: "tag-2".to_string(),
            name: "디자인".to_string(),
        },
        Tag {
            id: "tag-3".to_string(),
            name: "회고".to_string(),
        },
    ]
}

pub fn mock_sharing_user() -> User {
    User::new(SHARING_USER_ID, TEAM_ID)
}

pub fn mock_shared_users() -> Vec<User> {
    vec![User::new("U0002", TEAM_ID), User::new("U0003", TEAM_ID)]
}

pub fn mock_link() -> Link {
    Link {
        id: Uuid::parse_str(LINK_ID).expect("mock link id is a valid uuid"),
        url: "https://example.com/post".to_string(),
        content: "읽어볼 만한 글".to_string(),
        created_at: Utc.with_ymd_and_hms(2023, 3, 5, 1, 0, 0).unwrap(),
        sharing_user: mock_sharing_user(),
        shared_users: mock_shared_users(),
        tags: vec![mock_tags()[0].clone()],
    }
}

pub fn mock_workspace() -> Workspace {
    Workspace {
        team_id: TEAM_ID.to_string(),
        access_token: "xoxb-workspace".to_string(),
        bot_user_id: Some("B0001".to_string()),
    }
}
