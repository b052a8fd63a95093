use std::sync::Arc;

use itertools::Itertools;

use crate::domain::entities::User;
use crate::repository::{errors::InsertError, link::Repository};

pub struct Request {
    pub team_id: String,
    pub slack_user_ids: Vec<String>,
}

#[derive(Debug, PartialEq)]
pub struct Response {
    pub saved: usize,
}

#[derive(Debug, PartialEq)]
pub enum Error {
    Unknown,
}

impl From<InsertError> for Error {
    fn from(value: InsertError) -> Self {
        match value {
            InsertError::Conflict | InsertError::Unknown => Error::Unknown,
        }
    }
}

pub async fn execute(repo: Arc<dyn Repository>, req: Request) -> Result<Response, Error> {
    let users: Vec<User> = req
        .slack_user_ids
        .into_iter()
        .unique()
        .map(|id| User::new(id, req.team_id.clone()))
        .collect();

    let saved = repo.upsert_users(users).await?;
    Ok(Response { saved })
}
