use std::sync::Arc;

use chrono::Utc;
use itertools::Itertools;
use uuid::Uuid;

use crate::domain::entities::{Link, User};
use crate::repository::errors::FindAllError;
use crate::repository::link::Repository;

#[derive(Debug, Clone, PartialEq)]
pub enum Recipients {
    Selected(Vec<String>),
    AllMembers,
}

#[derive(Debug, Clone)]
pub struct Request {
    pub team_id: String,
    pub sharing_user_id: String,
    pub recipients: Recipients,
    pub tag_ids: Vec<String>,
    pub url: String,
    pub content: String,
}

#[derive(Debug, PartialEq)]
pub struct Response {
    pub link: Link,
    pub recipients: Vec<User>,
    pub to_all_members: bool,
}

#[derive(Debug, PartialEq)]
pub enum Error {
    BadRequest,
    Unknown,
}

impl From<FindAllError> for Error {
    fn from(value: FindAllError) -> Self {
        match value {
            FindAllError::Unknown => Error::Unknown,
        }
    }
}

/// Resolves the recipients and tags of a submission into a link. The link is
/// not stored; see `save_link` once it has been delivered.
pub async fn execute(repo: Arc<dyn Repository>, req: Request) -> Result<Response, Error> {
    let url = req.url.trim().to_string();
    if url.is_empty() {
        log::debug!("share_link: rejected link without url");
        return Err(Error::BadRequest);
    }

    let sharing_user = User::new(req.sharing_user_id.clone(), req.team_id.clone());
    let to_all_members = req.recipients == Recipients::AllMembers;
    let recipients: Vec<User> = match req.recipients {
        Recipients::Selected(ids) => ids
            .into_iter()
            .unique()
            .map(|id| User::new(id, req.team_id.clone()))
            .collect(),
        Recipients::AllMembers => repo
            .find_users(req.team_id.clone())
            .await?
            .into_iter()
            .filter(|user| *user != sharing_user)
            .collect(),
    };
    if recipients.is_empty() {
        log::debug!("share_link: no recipients for team {}", req.team_id);
        return Err(Error::BadRequest);
    }

    let tags = if req.tag_ids.is_empty() {
        vec![]
    } else {
        repo.find_tags(req.tag_ids).await?
    };

    let link = Link {
        id: Uuid::new_v4(),
        url,
        content: req.content,
        created_at: Utc::now(),
        sharing_user,
        shared_users: recipients.clone(),
        tags,
    };

    log::trace!(
        "share_link: prepared link {} for {} recipients",
        link.id,
        recipients.len()
    );

    Ok(Response {
        link,
        recipients,
        to_all_members,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::mocks;
    use crate::repository::link::InMemoryRepository;

    fn request(recipients: Recipients) -> Request {
        Request {
            team_id: mocks::TEAM_ID.to_string(),
            sharing_user_id: mocks::SHARING_USER_ID.to_string(),
            recipients,
            tag_ids: vec!["tag-1".to_string(), "tag-3".to_string()],
            url: " https://example.com/post ".to_string(),
            content: "같이 읽어요".to_string(),
        }
    }

    #[tokio::test]
    async fn it_should_prepare_the_link_for_the_selected_users() {
        let repo = Arc::new(InMemoryRepository::with_tags(mocks::mock_tags()));

        let result = execute(
            repo.clone(),
            request(Recipients::Selected(vec![
                "U0002".to_string(),
                "U0003".to_string(),
                "U0002".to_string(),
            ])),
        )
        .await
        .unwrap();

        assert!(!result.to_all_members);
        assert_eq!(result.recipients, mocks::mock_shared_users());
        assert_eq!(result.link.url, "https://example.com/post");
        assert_eq!(
            result.link.tags.iter().map(|tag| tag.id.as_str()).collect::<Vec<_>>(),
            vec!["tag-1", "tag-3"]
        );

        assert_eq!(result.link.shared_users, mocks::mock_shared_users());

        let stored = repo
            .find_links_by_sharing_user(mocks::mock_sharing_user())
            .await
            .unwrap();
        assert!(stored.is_empty());
    }

    #[tokio::test]
    async fn it_should_share_with_every_member_except_the_sharer() {
        let repo = Arc::new(InMemoryRepository::new());
        let mut members = mocks::mock_shared_users();
        members.push(mocks::mock_sharing_user());
        members.push(User::new("U0100", "another-team"));
        repo.upsert_users(members).await.unwrap();

        let result = execute(repo, request(Recipients::AllMembers))
            .await
            .unwrap();

        assert!(result.to_all_members);
        assert_eq!(result.recipients, mocks::mock_shared_users());
        assert_eq!(result.link.shared_users, mocks::mock_shared_users());
    }

    #[tokio::test]
    async fn it_should_return_bad_request_without_url() {
        let repo = Arc::new(InMemoryRepository::new());
        let mut req = request(Recipients::Selected(vec!["U0002".to_string()]));
        req.url = "   ".to_string();

        assert_eq!(execute(repo, req).await, Err(Error::BadRequest));
    }

    #[tokio::test]
    async fn it_should_return_bad_request_without_recipients() {
        let repo = Arc::new(InMemoryRepository::new());

        assert_eq!(
            execute(repo, request(Recipients::AllMembers)).await,
            Err(Error::BadRequest)
        );
    }
}
