use std::sync::Mutex;

use async_trait::async_trait;
use bson::doc;

use crate::domain::entities::Workspace;

use super::errors::{FindError, InsertError, UpdateError};

#[async_trait]
pub trait Repository: Send + Sync {
    async fn insert(&self, workspace: Workspace) -> Result<Workspace, InsertError>;
    async fn update(&self, workspace: Workspace) -> Result<Workspace, UpdateError>;
    async fn find_by_team(&self, team_id: String) -> Result<Workspace, FindError>;
}

pub struct MongoDbRepository {
    db: mongodb::Database,
}

impl MongoDbRepository {
    pub async fn new(
        uri: &str,
        database: &str,
        pool_size: u32,
    ) -> Result<MongoDbRepository, mongodb::error::Error> {
        // Parse a connection string into an options struct.
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;
        client_options.max_pool_size = Some(pool_size);

        let client = mongodb::Client::with_options(client_options)?;
        let db = client.database(database);

        db.run_command(doc! {"ping": 1}, None).await?;

        Ok(MongoDbRepository { db })
    }
}

#[async_trait]
impl Repository for MongoDbRepository {
    async fn insert(&self, workspace: Workspace) -> Result<Workspace, InsertError> {
        match self.find_by_team(workspace.team_id.clone()).await {
            Ok(..) => return Err(InsertError::Conflict),
            Err(error) if error != FindError::NotFound => return Err(InsertError::Unknown),
            _ => (),
        };

        self.db
            .collection::<Workspace>("workspaces")
            .insert_one(&workspace, None)
            .await?;

        Ok(workspace)
    }

    async fn update(&self, workspace: Workspace) -> Result<Workspace, UpdateError> {
        let filter = doc! {"team_id": workspace.team_id.clone()};
        let update = doc! {"$set": bson::to_document(&workspace)?};
        let result = self
            .db
            .collection::<Workspace>("workspaces")
            .update_one(filter, update, None)
            .await?;

        if result.matched_count == 0 {
            return Err(UpdateError::NotFound);
        }
        Ok(workspace)
    }

    async fn find_by_team(&self, team_id: String) -> Result<Workspace, FindError> {
        let filter = doc! { "team_id": team_id };
        let workspace = self
            .db
            .collection::<Workspace>("workspaces")
            .find_one(filter, None)
            .await?;

        match workspace {
            Some(workspace) => Ok(workspace),
            None => Err(FindError::NotFound),
        }
    }
}

pub struct InMemoryRepository {
    workspaces: Mutex<Vec<Workspace>>,
}

impl InMemoryRepository {
    pub fn new() -> InMemoryRepository {
        InMemoryRepository {
            workspaces: Mutex::new(vec![]),
        }
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn insert(&self, workspace: Workspace) -> Result<Workspace, InsertError> {
        let mut lock = self.workspaces.lock().map_err(|_| InsertError::Unknown)?;
        if lock.iter().any(|stored| stored.team_id == workspace.team_id) {
            return Err(InsertError::Conflict);
        }
        lock.push(workspace.clone());
        Ok(workspace)
    }

    async fn update(&self, workspace: Workspace) -> Result<Workspace, UpdateError> {
        let mut lock = self.workspaces.lock().map_err(|_| UpdateError::Unknown)?;
        match lock
            .iter_mut()
            .find(|stored| stored.team_id == workspace.team_id)
        {
            Some(stored) => {
                *stored = workspace.clone();
                Ok(workspace)
            }
            None => Err(UpdateError::NotFound),
        }
    }

    async fn find_by_team(&self, team_id: String) -> Result<Workspace, FindError> {
        let lock = self.workspaces.lock().map_err(|_| FindError::Unknown)?;
        lock.iter()
            .find(|stored| stored.team_id == team_id)
            .cloned()
            .ok_or(FindError::NotFound)
    }
}
