use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use bson::doc;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{Link, Tag, User};

use super::errors::{CountError, FindAllError, InsertError};

#[async_trait]
pub trait Repository: Send + Sync {
    async fn find_all_tags(&self) -> Result<Vec<Tag>, FindAllError>;
    async fn find_tags(&self, ids: Vec<String>) -> Result<Vec<Tag>, FindAllError>;

    async fn insert_link(&self, link: Link) -> Result<Link, InsertError>;
    async fn find_links_by_sharing_user(&self, user: User) -> Result<Vec<Link>, FindAllError>;
    async fn find_links_by_shared_user(&self, user: User) -> Result<Vec<Link>, FindAllError>;

    async fn find_users(&self, team_id: String) -> Result<Vec<User>, FindAllError>;
    /// Counts the members of the user's team other than the user.
    async fn count_other_users(&self, user: User) -> Result<u64, CountError>;
    async fn upsert_users(&self, users: Vec<User>) -> Result<usize, InsertError>;
}

/// Shape of a link as stored in the `links` collection.
#[derive(Deserialize, Serialize, Clone, Debug)]
struct LinkDocument {
    id: String,
    url: String,
    content: String,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    created_at: DateTime<Utc>,
    sharing_user: User,
    shared_users: Vec<User>,
    tags: Vec<Tag>,
}

impl From<Link> for LinkDocument {
    fn from(value: Link) -> Self {
        Self {
            id: value.id.to_string(),
            url: value.url,
            content: value.content,
            created_at: value.created_at,
            sharing_user: value.sharing_user,
            shared_users: value.shared_users,
            tags: value.tags,
        }
    }
}

impl TryFrom<LinkDocument> for Link {
    type Error = FindAllError;

    fn try_from(value: LinkDocument) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&value.id).map_err(|err| {
            log::error!("stored link has an invalid id {}: {}", value.id, err);
            FindAllError::Unknown
        })?;
        Ok(Self {
            id,
            url: value.url,
            content: value.content,
            created_at: value.created_at,
            sharing_user: value.sharing_user,
            shared_users: value.shared_users,
            tags: value.tags,
        })
    }
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
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;
        client_options.max_pool_size = Some(pool_size);

        let client = mongodb::Client::with_options(client_options)?;
        let db = client.database(database);

        db.run_command(doc! {"ping": 1}, None).await?;

        Ok(MongoDbRepository { db })
    }

    async fn find_links(&self, filter: bson::Document) -> Result<Vec<Link>, FindAllError> {
        let options = mongodb::options::FindOptions::builder()
            .sort(doc! { "created_at": -1 })
            .build();
        let documents: Vec<LinkDocument> = self
            .db
            .collection::<LinkDocument>("links")
            .find(filter, options)
            .await?
            .try_collect()
            .await?;

        documents.into_iter().map(Link::try_from).collect()
    }
}

#[async_trait]
impl Repository for MongoDbRepository {
    async fn find_all_tags(&self) -> Result<Vec<Tag>, FindAllError> {
        let tags = self
            .db
            .collection::<Tag>("tags")
            .find(None, None)
            .await?
            .try_collect()
            .await?;
        Ok(tags)
    }

    async fn find_tags(&self, ids: Vec<String>) -> Result<Vec<Tag>, FindAllError> {
        let tags = self
            .db
            .collection::<Tag>("tags")
            .find(doc! { "id": { "$in": ids } }, None)
            .await?
            .try_collect()
            .await?;
        Ok(tags)
    }

    async fn insert_link(&self, link: Link) -> Result<Link, InsertError> {
        let collection = self.db.collection::<LinkDocument>("links");
        let existing = collection
            .find_one(doc! { "id": link.id.to_string() }, None)
            .await?;
        if existing.is_some() {
            return Err(InsertError::Conflict);
        }

        collection
            .insert_one(LinkDocument::from(link.clone()), None)
            .await?;

        Ok(link)
    }

    async fn find_links_by_sharing_user(&self, user: User) -> Result<Vec<Link>, FindAllError> {
        self.find_links(doc! {
            "sharing_user.slack_user_id": user.slack_user_id,
            "sharing_user.team_id": user.team_id,
        })
        .await
    }

    async fn find_links_by_shared_user(&self, user: User) -> Result<Vec<Link>, FindAllError> {
        self.find_links(doc! {
            "shared_users": {
                "$elemMatch": {
                    "slack_user_id": user.slack_user_id,
                    "team_id": user.team_id,
                }
            }
        })
        .await
    }

    async fn find_users(&self, team_id: String) -> Result<Vec<User>, FindAllError> {
        let users = self
            .db
            .collection::<User>("users")
            .find(doc! { "team_id": team_id }, None)
            .await?
            .try_collect()
            .await?;
        Ok(users)
    }

    async fn count_other_users(&self, user: User) -> Result<u64, CountError> {
        Ok(self
            .db
            .collection::<User>("users")
            .count_documents(
                doc! {
                    "team_id": user.team_id,
                    "slack_user_id": { "$ne": user.slack_user_id },
                },
                None,
            )
            .await?)
    }

    async fn upsert_users(&self, users: Vec<User>) -> Result<usize, InsertError> {
        let collection = self.db.collection::<User>("users");
        let options = mongodb::options::UpdateOptions::builder()
            .upsert(true)
            .build();

        for user in users.iter() {
            let filter = doc! {
                "slack_user_id": user.slack_user_id.clone(),
                "team_id": user.team_id.clone(),
            };
            let update = doc! { "$set": bson::to_document(user)? };
            collection
                .update_one(filter, update, options.clone())
                .await?;
        }

        Ok(users.len())
    }
}

pub struct InMemoryRepository {
    tags: Mutex<Vec<Tag>>,
    links: Mutex<Vec<Link>>,
    users: Mutex<Vec<User>>,
}

impl InMemoryRepository {
    pub fn new() -> InMemoryRepository {
        InMemoryRepository {
            tags: Mutex::new(vec![]),
            links: Mutex::new(vec![]),
            users: Mutex::new(vec![]),
        }
    }

    pub fn with_tags(tags: Vec<Tag>) -> InMemoryRepository {
        InMemoryRepository {
            tags: Mutex::new(tags),
            ..Self::new()
        }
    }

    fn lock<T>(mutex: &Mutex<T>) -> Option<MutexGuard<'_, T>> {
        match mutex.lock() {
            Ok(lock) => Some(lock),
            Err(err) => {
                log::error!("in-memory repository lock is poisoned: {}", err);
                None
            }
        }
    }

    fn find_links<F>(&self, predicate: F) -> Result<Vec<Link>, FindAllError>
    where
        F: Fn(&Link) -> bool,
    {
        let lock = Self::lock(&self.links).ok_or(FindAllError::Unknown)?;
        let mut links: Vec<Link> = lock.iter().filter(|link| predicate(link)).cloned().collect();
        links.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(links)
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn find_all_tags(&self) -> Result<Vec<Tag>, FindAllError> {
        let lock = Self::lock(&self.tags).ok_or(FindAllError::Unknown)?;
        Ok(lock.clone())
    }

    async fn find_tags(&self, ids: Vec<String>) -> Result<Vec<Tag>, FindAllError> {
        let lock = Self::lock(&self.tags).ok_or(FindAllError::Unknown)?;
        Ok(lock
            .iter()
            .filter(|tag| ids.contains(&tag.id))
            .cloned()
            .collect())
    }

    async fn insert_link(&self, link: Link) -> Result<Link, InsertError> {
        let mut lock = Self::lock(&self.links).ok_or(InsertError::Unknown)?;
        if lock.iter().any(|stored| stored.id == link.id) {
            return Err(InsertError::Conflict);
        }
        lock.push(link.clone());
        Ok(link)
    }

    async fn find_links_by_sharing_user(&self, user: User) -> Result<Vec<Link>, FindAllError> {
        self.find_links(|link| link.sharing_user == user)
    }

    async fn find_links_by_shared_user(&self, user: User) -> Result<Vec<Link>, FindAllError> {
        self.find_links(|link| link.shared_users.contains(&user))
    }

    async fn find_users(&self, team_id: String) -> Result<Vec<User>, FindAllError> {
        let lock = Self::lock(&self.users).ok_or(FindAllError::Unknown)?;
        Ok(lock
            .iter()
            .filter(|user| user.team_id == team_id)
            .cloned()
            .collect())
    }

    async fn count_other_users(&self, user: User) -> Result<u64, CountError> {
        let lock = Self::lock(&self.users).ok_or(CountError::Unknown)?;
        Ok(lock
            .iter()
            .filter(|member| member.team_id == user.team_id && **member != user)
            .count() as u64)
    }

    async fn upsert_users(&self, users: Vec<User>) -> Result<usize, InsertError> {
        let mut lock = Self::lock(&self.users).ok_or(InsertError::Unknown)?;
        for user in users.iter() {
            if !lock.contains(user) {
                lock.push(user.clone());
            }
        }
        Ok(users.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::mocks;

    #[tokio::test]
    async fn it_should_find_only_the_requested_tags() {
        let repo = InMemoryRepository::with_tags(mocks::mock_tags());

        let tags = repo
            .find_tags(vec!["tag-2".to_string(), "missing".to_string()])
            .await
            .unwrap();

        assert_eq!(tags, vec![mocks::mock_tags()[1].clone()]);
    }

    #[tokio::test]
    async fn it_should_return_conflict_when_inserting_the_same_link_twice() {
        let repo = InMemoryRepository::new();
        let link = mocks::mock_link();

        assert!(repo.insert_link(link.clone()).await.is_ok());

        match repo.insert_link(link).await {
            Err(err) => assert_eq!(err, InsertError::Conflict),
            _ => unreachable!("link must not be inserted twice"),
        }
    }

    #[tokio::test]
    async fn it_should_find_links_newest_first() {
        let repo = InMemoryRepository::new();
        let older = mocks::mock_link();
        let mut newer = mocks::mock_link();
        newer.id = Uuid::new_v4();
        newer.created_at = older.created_at + chrono::Duration::days(1);

        repo.insert_link(older.clone()).await.unwrap();
        repo.insert_link(newer.clone()).await.unwrap();

        let links = repo
            .find_links_by_sharing_user(mocks::mock_sharing_user())
            .await
            .unwrap();
        assert_eq!(links, vec![newer.clone(), older.clone()]);

        let links = repo
            .find_links_by_shared_user(mocks::mock_shared_users()[0].clone())
            .await
            .unwrap();
        assert_eq!(links, vec![newer, older]);
    }

    #[tokio::test]
    async fn it_should_not_duplicate_users_on_upsert() {
        let repo = InMemoryRepository::new();

        repo.upsert_users(mocks::mock_shared_users()).await.unwrap();
        repo.upsert_users(mocks::mock_shared_users()).await.unwrap();

        let count = repo
            .count_other_users(mocks::mock_sharing_user())
            .await
            .unwrap();
        assert_eq!(count, mocks::mock_shared_users().len() as u64);
        assert_eq!(
            repo.count_other_users(User::new("U0002", "other"))
                .await
                .unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn it_should_count_team_members_other_than_the_user() {
        let repo = InMemoryRepository::new();
        repo.upsert_users(mocks::mock_shared_users()).await.unwrap();

        let count = repo
            .count_other_users(mocks::mock_shared_users()[0].clone())
            .await
            .unwrap();
        assert_eq!(count, mocks::mock_shared_users().len() as u64 - 1);
    }
}
