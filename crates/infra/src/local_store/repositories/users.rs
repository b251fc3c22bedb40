use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::local_store::snapshot::SnapshotStore;
use domain::{entities::users::UserEntity, repositories::users::UserRepository};

pub struct UserLocalStore {
    store: Arc<SnapshotStore>,
}

impl UserLocalStore {
    pub fn new(store: Arc<SnapshotStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for UserLocalStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserEntity>> {
        Ok(self.store.with_auth(|snapshot| {
            snapshot
                .users
                .iter()
                .find(|user| user.username == username)
                .cloned()
        }))
    }

    async fn list(&self) -> Result<Vec<UserEntity>> {
        Ok(self.store.with_auth(|snapshot| snapshot.users.clone()))
    }

    async fn insert(&self, user: UserEntity) -> Result<()> {
        self.store.with_auth_mut(|snapshot| snapshot.users.push(user))
    }

    async fn update(&self, username: &str, user: UserEntity) -> Result<bool> {
        self.store.with_auth_mut(|snapshot| {
            match snapshot
                .users
                .iter_mut()
                .find(|existing| existing.username == username)
            {
                Some(existing) => {
                    *existing = user;
                    true
                }
                None => false,
            }
        })
    }

    async fn delete(&self, username: &str) -> Result<bool> {
        self.store.with_auth_mut(|snapshot| {
            let before = snapshot.users.len();
            snapshot.users.retain(|user| user.username != username);
            snapshot.users.len() != before
        })
    }
}
