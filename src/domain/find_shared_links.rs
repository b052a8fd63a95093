use std::sync::Arc;

use crate::domain::entities::{Link, User};
use crate::repository::errors::FindAllError;
use crate::repository::link::Repository;

pub struct Request {
    pub team_id: String,
    pub user_id: String,
}

#[derive(Debug, PartialEq)]
pub struct Response {
    pub links: Vec<Link>,
}

#[derive(Debug, PartialEq)]
pub enum Error {
    Unknown,
}

impl From<FindAllError> for Error {
    fn from(value: FindAllError) -> Self {
        match value {
            FindAllError::Unknown => Error::Unknown,
        }
    }
}

pub async fn execute(repo: Arc<dyn Repository>, req: Request) -> Result<Response, Error> {
    Ok(Response {
        links: repo
            .find_links_by_shared_user(User::new(req.user_id, req.team_id))
            .await?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::mocks;
    use crate::repository::link::InMemoryRepository;

    #[tokio::test]
    async fn it_should_return_links_shared_with_the_user() {
        let repo = Arc::new(InMemoryRepository::new());
        repo.insert_link(mocks::mock_link()).await.unwrap();

        let result = execute(
            repo.clone(),
            Request {
                team_id: mocks::TEAM_ID.to_string(),
                user_id: "U0003".to_string(),
            },
        )
        .await;
        assert_eq!(
            result,
            Ok(Response {
                links: vec![mocks::mock_link()]
            })
        );

        let result = execute(
            repo,
            Request {
                team_id: "another-team".to_string(),
                user_id: "U0003".to_string(),
            },
        )
        .await;
        assert_eq!(result, Ok(Response { links: vec![] }));
    }
}
