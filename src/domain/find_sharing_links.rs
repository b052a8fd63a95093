use std::sync::Arc;

use crate::domain::entities::{Link, User};
use crate::repository::errors::{CountError, FindAllError};
use crate::repository::link::Repository;

pub struct Request {
    pub team_id: String,
    pub user_id: String,
}

#[derive(Debug, PartialEq)]
pub struct Response {
    pub links: Vec<Link>,
    /// Members the sharer could have shared with, the sharer excluded.
    pub total_recipient_count: usize,
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

impl From<CountError> for Error {
    fn from(value: CountError) -> Self {
        match value {
            CountError::Unknown => Error::Unknown,
        }
    }
}

pub async fn execute(repo: Arc<dyn Repository>, req: Request) -> Result<Response, Error> {
    let sharing_user = User::new(req.user_id, req.team_id);
    let links = repo.find_links_by_sharing_user(sharing_user.clone()).await?;
    let others = repo.count_other_users(sharing_user).await?;

    Ok(Response {
        links,
        total_recipient_count: others as usize,
    })
}
