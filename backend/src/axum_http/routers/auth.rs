use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::{
    auth::{self, AuthUser},
    axum_http::error_responses::usecase_error_response,
    config::config_model::DotEnvyConfig,
};
use application::usecases::users::UserUseCase;
use domain::repositories::users::UserRepository;
use infra::local_store::{repositories::users::UserLocalStore, snapshot::SnapshotStore};

pub fn routes(store: Arc<SnapshotStore>, config: Arc<DotEnvyConfig>) -> Router {
    let user_repository = UserLocalStore::new(Arc::clone(&store));
    let user_usecase = UserUseCase::new(
        Arc::new(user_repository),
        config.seed_admin.username.clone(),
    );

    Router::new()
        .route("/login", post(login))
        .route("/me", get(me))
        .with_state((Arc::new(user_usecase), config))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub username: String,
    pub is_admin: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

pub async fn login<U>(
    State((user_usecase, config)): State<(Arc<UserUseCase<U>>, Arc<DotEnvyConfig>)>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync,
{
    let user = match user_usecase
        .verify_credentials(&payload.username, &payload.password)
        .await
    {
        Ok(user) => user,
        Err(err) => return usecase_error_response(err.status_code(), err.to_string()),
    };

    match auth::issue_token(
        &user.username,
        user.is_admin,
        &config.auth.jwt_secret,
        config.auth.token_ttl_seconds,
    ) {
        Ok(token) => (
            StatusCode::OK,
            Json(SessionResponse {
                username: user.username,
                is_admin: user.is_admin,
                token: Some(token),
            }),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn me(auth: AuthUser) -> impl IntoResponse {
    Json(SessionResponse {
        username: auth.username,
        is_admin: auth.is_admin,
        token: None,
    })
}
