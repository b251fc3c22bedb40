use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};

use crate::{
    auth::AdminUser, axum_http::error_responses::usecase_error_response,
    config::config_model::DotEnvyConfig,
};
use application::usecases::{system::SystemUseCase, users::UserUseCase};
use domain::{
    repositories::{system::SystemRepository, users::UserRepository},
    value_objects::{
        settings::UpdateSettingsModel,
        users::{InsertUserModel, UpdateUserModel},
    },
};
use infra::local_store::{
    repositories::{system::SystemLocalStore, users::UserLocalStore},
    snapshot::SnapshotStore,
};

pub fn routes(store: Arc<SnapshotStore>, config: Arc<DotEnvyConfig>) -> Router {
    let user_repository = UserLocalStore::new(Arc::clone(&store));
    let user_usecase = UserUseCase::new(
        Arc::new(user_repository),
        config.seed_admin.username.clone(),
    );

    let system_repository = SystemLocalStore::new(Arc::clone(&store));
    let system_usecase = SystemUseCase::new(Arc::new(system_repository));

    Router::new()
        .route("/users", get(list_users).post(add_user))
        .route("/users/:username", put(update_user).delete(delete_user))
        .route("/settings", get(get_settings).put(update_settings))
        .route("/reset", post(reset_to_initial_data))
        .with_state((Arc::new(user_usecase), Arc::new(system_usecase)))
}

type AdminState<U, S> = (Arc<UserUseCase<U>>, Arc<SystemUseCase<S>>);

pub async fn list_users<U, S>(
    State((user_usecase, _)): State<AdminState<U, S>>,
    _admin: AdminUser,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync,
    S: SystemRepository + Send + Sync,
{
    match user_usecase.list_users().await {
        Ok(users) => (StatusCode::OK, Json(users)).into_response(),
        Err(err) => usecase_error_response(err.status_code(), err.to_string()),
    }
}

pub async fn add_user<U, S>(
    State((user_usecase, _)): State<AdminState<U, S>>,
    _admin: AdminUser,
    Json(insert_user_model): Json<InsertUserModel>,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync,
    S: SystemRepository + Send + Sync,
{
    match user_usecase.add_user(insert_user_model).await {
        Ok(user) => (StatusCode::CREATED, Json(user)).into_response(),
        Err(err) => usecase_error_response(err.status_code(), err.to_string()),
    }
}

pub async fn update_user<U, S>(
    State((user_usecase, _)): State<AdminState<U, S>>,
    _admin: AdminUser,
    Path(username): Path<String>,
    Json(update_user_model): Json<UpdateUserModel>,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync,
    S: SystemRepository + Send + Sync,
{
    match user_usecase.update_user(&username, update_user_model).await {
        Ok(user) => (StatusCode::OK, Json(user)).into_response(),
        Err(err) => usecase_error_response(err.status_code(), err.to_string()),
    }
}

pub async fn delete_user<U, S>(
    State((user_usecase, _)): State<AdminState<U, S>>,
    _admin: AdminUser,
    Path(username): Path<String>,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync,
    S: SystemRepository + Send + Sync,
{
    match user_usecase.delete_user(&username).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => usecase_error_response(err.status_code(), err.to_string()),
    }
}

pub async fn get_settings<U, S>(
    State((_, system_usecase)): State<AdminState<U, S>>,
    _admin: AdminUser,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync,
    S: SystemRepository + Send + Sync,
{
    match system_usecase.settings().await {
        Ok(settings) => (StatusCode::OK, Json(settings)).into_response(),
        Err(err) => usecase_error_response(err.status_code(), err.to_string()),
    }
}

pub async fn update_settings<U, S>(
    State((_, system_usecase)): State<AdminState<U, S>>,
    _admin: AdminUser,
    Json(update_settings_model): Json<UpdateSettingsModel>,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync,
    S: SystemRepository + Send + Sync,
{
    match system_usecase.update_settings(update_settings_model).await {
        Ok(settings) => (StatusCode::OK, Json(settings)).into_response(),
        Err(err) => usecase_error_response(err.status_code(), err.to_string()),
    }
}

pub async fn reset_to_initial_data<U, S>(
    State((_, system_usecase)): State<AdminState<U, S>>,
    _admin: AdminUser,
) -> impl IntoResponse
where
    U: UserRepository + Send + Sync,
    S: SystemRepository + Send + Sync,
{
    match system_usecase.reset_to_initial_data().await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => usecase_error_response(err.status_code(), err.to_string()),
    }
}
