use std::sync::Arc;

use crate::domain::entities::Tag;
use crate::repository::{errors::FindAllError, link::Repository};

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

#[derive(Debug, PartialEq)]
pub struct Response {
    pub tags: Vec<Tag>,
}

pub async fn execute(repo: Arc<dyn Repository>) -> Result<Response, Error> {
    Ok(Response {
        tags: repo.find_all_tags().await?,
    })
}
