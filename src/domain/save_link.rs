use std::sync::Arc;

use crate::domain::entities::Link;
use crate::repository::{errors::InsertError, link::Repository};

pub struct Request {
    pub link: Link,
}

#[derive(Debug, PartialEq)]
pub struct Response {
    pub link: Link,
}

#[derive(Debug, PartialEq)]
pub enum Error {
    Conflict,
    Unknown,
}

impl From<InsertError> for Error {
    fn from(value: InsertError) -> Self {
        match value {
            InsertError::Conflict => Error::Conflict,
            InsertError::Unknown => Error::Unknown,
        }
    }
}

pub async fn execute(repo: Arc<dyn Repository>, req: Request) -> Result<Response, Error> {
    let link = repo.insert_link(req.link).await?;
    log::trace!("save_link: saved link {}", link.id);

    Ok(Response { link })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::mocks;
    use crate::repository::link::InMemoryRepository;

    #[tokio::test]
    async fn it_should_store_the_link() {
        let repo = Arc::new(InMemoryRepository::new());

        let result = execute(
            repo.clone(),
            Request {
                link: mocks::mock_link(),
            },
        )
        .await;

        assert_eq!(
            result,
            Ok(Response {
                link: mocks::mock_link()
            })
        );
        assert_eq!(
            repo.find_links_by_shared_user(mocks::mock_shared_users()[1].clone())
                .await
                .unwrap(),
            vec![mocks::mock_link()]
        );
    }

    #[tokio::test]
    async fn it_should_return_conflict_when_the_link_exists() {
        let repo = Arc::new(InMemoryRepository::new());
        repo.insert_link(mocks::mock_link()).await.unwrap();

        let result = execute(
            repo,
            Request {
                link: mocks::mock_link(),
            },
        )
        .await;

        assert_eq!(result, Err(Error::Conflict));
    }
}
