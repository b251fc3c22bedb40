use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::entities::users::UserEntity;

/// Operator accounts. Hashing happens in the use case layer; this trait
/// only ever sees password hashes.
#[async_trait]
#[automock]
pub trait UserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserEntity>>;
    async fn list(&self) -> Result<Vec<UserEntity>>;
    async fn insert(&self, user: UserEntity) -> Result<()>;
    /// Replaces the record stored under `username`, which also covers
    /// renames.
    async fn update(&self, username: &str, user: UserEntity) -> Result<bool>;
    async fn delete(&self, username: &str) -> Result<bool>;
}
