use std::sync::Arc;

use anyhow::anyhow;
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;
use tracing::{error, info, warn};

use domain::{
    entities::users::UserEntity,
    repositories::users::UserRepository,
    value_objects::users::{InsertUserModel, UpdateUserModel, UserDto},
};

#[derive(Debug, Error)]
pub enum UserError {
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("username is already taken")]
    UsernameTaken,
    #[error("user not found")]
    UserNotFound,
    #[error("the built-in admin account cannot be deleted")]
    ProtectedUser,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl UserError {
    pub fn status_code(&self) -> u16 {
        match self {
            UserError::InvalidCredentials => 401,
            UserError::UsernameTaken => 409,
            UserError::UserNotFound => 404,
            UserError::ProtectedUser => 403,
            UserError::Internal(_) => 500,
        }
    }
}

pub type UserResult<T> = std::result::Result<T, UserError>;

pub fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| anyhow!("failed to hash password: {err}"))
}

pub struct UserUseCase<U>
where
    U: UserRepository + Send + Sync + 'static,
{
    user_repo: Arc<U>,
    seed_admin_username: String,
}

impl<U> UserUseCase<U>
where
    U: UserRepository + Send + Sync + 'static,
{
    pub fn new(user_repo: Arc<U>, seed_admin_username: String) -> Self {
        Self {
            user_repo,
            seed_admin_username,
        }
    }

    /// Checks a login attempt. Unknown usernames and wrong passwords are
    /// indistinguishable to the caller.
    pub async fn verify_credentials(&self, username: &str, password: &str) -> UserResult<UserDto> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await
            .map_err(|err| {
                error!(username, store_error = ?err, "users: failed to load user");
                UserError::Internal(err)
            })?
            .ok_or_else(|| {
                warn!(username, "users: login attempt for unknown user");
                UserError::InvalidCredentials
            })?;

        let parsed_hash = PasswordHash::new(&user.password_hash)
            .map_err(|err| UserError::Internal(anyhow!("corrupt password hash: {err}")))?;

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| {
                warn!(username, "users: password mismatch");
                UserError::InvalidCredentials
            })?;

        info!(username, "users: credentials verified");
        Ok(user.into())
    }

    pub async fn list_users(&self) -> UserResult<Vec<UserDto>> {
        let users = self.user_repo.list().await.map_err(|err| {
            error!(store_error = ?err, "users: failed to list users");
            UserError::Internal(err)
        })?;
        Ok(users.into_iter().map(UserDto::from).collect())
    }

    pub async fn add_user(&self, user: InsertUserModel) -> UserResult<UserDto> {
        let existing = self
            .user_repo
            .find_by_username(&user.username)
            .await
            .map_err(UserError::Internal)?;
        if existing.is_some() {
            let err = UserError::UsernameTaken;
            warn!(
                username = %user.username,
                status = err.status_code(),
                "users: username already taken"
            );
            return Err(err);
        }

        let entity = UserEntity {
            username: user.username,
            password_hash: hash_password(&user.password).map_err(UserError::Internal)?,
            is_admin: user.is_admin,
        };

        self.user_repo
            .insert(entity.clone())
            .await
            .map_err(|err| {
                error!(username = %entity.username, store_error = ?err, "users: failed to insert user");
                UserError::Internal(err)
            })?;

        info!(username = %entity.username, is_admin = entity.is_admin, "users: user added");
        Ok(entity.into())
    }

    pub async fn update_user(&self, username: &str, update: UpdateUserModel) -> UserResult<UserDto> {
        let current = self
            .user_repo
            .find_by_username(username)
            .await
            .map_err(UserError::Internal)?
            .ok_or_else(|| {
                warn!(username, "users: user to update not found");
                UserError::UserNotFound
            })?;

        if let Some(new_username) = update.username.as_deref() {
            if new_username != username {
                let taken = self
                    .user_repo
                    .find_by_username(new_username)
                    .await
                    .map_err(UserError::Internal)?
                    .is_some();
                if taken {
                    warn!(username, new_username, "users: rename target already taken");
                    return Err(UserError::UsernameTaken);
                }
            }
        }

        let entity = UserEntity {
            username: update.username.unwrap_or(current.username),
            password_hash: match update.password.as_deref() {
                Some(password) => hash_password(password).map_err(UserError::Internal)?,
                None => current.password_hash,
            },
            is_admin: update.is_admin.unwrap_or(current.is_admin),
        };

        let updated = self
            .user_repo
            .update(username, entity.clone())
            .await
            .map_err(|err| {
                error!(username, store_error = ?err, "users: failed to update user");
                UserError::Internal(err)
            })?;

        if !updated {
            warn!(username, "users: user to update vanished");
            return Err(UserError::UserNotFound);
        }

        info!(username, new_username = %entity.username, "users: user updated");
        Ok(entity.into())
    }

    pub async fn delete_user(&self, username: &str) -> UserResult<()> {
        if username == self.seed_admin_username {
            let err = UserError::ProtectedUser;
            warn!(
                username,
                status = err.status_code(),
                "users: refused to delete the built-in admin"
            );
            return Err(err);
        }

        let deleted = self.user_repo.delete(username).await.map_err(|err| {
            error!(username, store_error = ?err, "users: failed to delete user");
            UserError::Internal(err)
        })?;

        if !deleted {
            warn!(username, "users: user to delete not found");
            return Err(UserError::UserNotFound);
        }

        info!(username, "users: user deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::repositories::users::MockUserRepository;

    fn usecase_with(repo: MockUserRepository) -> UserUseCase<MockUserRepository> {
        UserUseCase::new(Arc::new(repo), "admin".to_string())
    }

    #[tokio::test]
    async fn verifies_a_hashed_password_round_trip() {
        let hash = hash_password("epa1b2c3d4").unwrap();
        let user = UserEntity {
            username: "admin".to_string(),
            password_hash: hash,
            is_admin: true,
        };

        let mut user_repo = MockUserRepository::new();
        user_repo.expect_find_by_username().returning(move |_| {
            let user = user.clone();
            Box::pin(async move { Ok(Some(user)) })
        });

        let usecase = usecase_with(user_repo);

        let verified = usecase
            .verify_credentials("admin", "epa1b2c3d4")
            .await
            .unwrap();
        assert!(verified.is_admin);

        let rejected = usecase.verify_credentials("admin", "wrong").await;
        assert!(matches!(rejected, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn unknown_users_fail_like_bad_passwords() {
        let mut user_repo = MockUserRepository::new();
        user_repo
            .expect_find_by_username()
            .returning(|_| Box::pin(async { Ok(None) }));

        let usecase = usecase_with(user_repo);

        let result = usecase.verify_credentials("ghost", "whatever").await;
        assert!(matches!(result, Err(UserError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn the_seed_admin_cannot_be_deleted() {
        let user_repo = MockUserRepository::new();
        let usecase = usecase_with(user_repo);

        let result = usecase.delete_user("admin").await;
        assert!(matches!(result, Err(UserError::ProtectedUser)));
    }

    #[tokio::test]
    async fn duplicate_usernames_are_rejected() {
        let mut user_repo = MockUserRepository::new();
        user_repo.expect_find_by_username().returning(|_| {
            Box::pin(async {
                Ok(Some(UserEntity {
                    username: "taken".to_string(),
                    password_hash: String::new(),
                    is_admin: false,
                }))
            })
        });

        let usecase = usecase_with(user_repo);

        let result = usecase
            .add_user(InsertUserModel {
                username: "taken".to_string(),
                password: "secret".to_string(),
                is_admin: false,
            })
            .await;

        assert!(matches!(result, Err(UserError::UsernameTaken)));
    }
}
