use serde::{Deserialize, Serialize};

use crate::entities::users::UserEntity;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertUserModel {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// Partial user update keyed by the original username; `username` renames
/// the account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserModel {
    pub username: Option<String>,
    pub password: Option<String>,
    pub is_admin: Option<bool>,
}

/// User view without credential material.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UserDto {
    pub username: String,
    pub is_admin: bool,
}

impl From<UserEntity> for UserDto {
    fn from(value: UserEntity) -> Self {
        Self {
            username: value.username,
            is_admin: value.is_admin,
        }
    }
}
