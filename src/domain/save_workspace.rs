use std::sync::Arc;

use crate::repository::{
    errors::{FindError, InsertError, UpdateError},
    workspace::Repository,
};

use super::entities::Workspace;

pub struct Request {
    pub team_id: String,
    pub access_token: String,
    pub bot_user_id: Option<String>,
}

impl From<Request> for Workspace {
    fn from(value: Request) -> Self {
        Self {
            team_id: value.team_id,
            access_token: value.access_token,
            bot_user_id: value.bot_user_id,
        }
    }
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

impl From<UpdateError> for Error {
    fn from(value: UpdateError) -> Self {
        match value {
            UpdateError::NotFound | UpdateError::Unknown => Error::Unknown,
        }
    }
}

/// Inserts the workspace or replaces the token of an existing installation.
pub async fn execute(repo: Arc<dyn Repository>, req: Request) -> Result<Workspace, Error> {
    let result = match repo.find_by_team(req.team_id.clone()).await {
        Ok(..) => repo.update(req.into()).await?,
        Err(FindError::NotFound) => repo.insert(req.into()).await?,
        Err(FindError::Unknown) => return Err(Error::Unknown),
    };

    Ok(result)
}
