use std::sync::Arc;

use crate::repository::{errors::FindError, workspace::Repository};

pub struct Request {
    pub team_id: String,
}

#[derive(Debug, PartialEq)]
pub enum Error {
    NotInstalled,
    Unknown,
}

impl From<FindError> for Error {
    fn from(value: FindError) -> Self {
        match value {
            FindError::NotFound => Error::NotInstalled,
            FindError::Unknown => Error::Unknown,
        }
    }
}

pub async fn execute(repo: Arc<dyn Repository>, req: Request) -> Result<String, Error> {
    Ok(repo.find_by_team(req.team_id).await?.access_token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::mocks;
    use crate::repository::workspace::InMemoryRepository;

    #[tokio::test]
    async fn it_should_return_the_token_of_the_installed_workspace() {
        let repo = Arc::new(InMemoryRepository::new());
        repo.insert(mocks::mock_workspace()).await.unwrap();

        let result = execute(
            repo,
            Request {
                team_id: mocks::TEAM_ID.to_string(),
            },
        )
        .await;

        assert_eq!(result, Ok("xoxb-workspace".to_string()));
    }

    #[tokio::test]
    async fn it_should_return_not_installed_for_unknown_teams() {
        let repo = Arc::new(InMemoryRepository::new());

        let result = execute(
            repo,
            Request {
                team_id: "unknown".to_string(),
            },
        )
        .await;

        assert_eq!(result, Err(Error::NotInstalled));
    }
}
