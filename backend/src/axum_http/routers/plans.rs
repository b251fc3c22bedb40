use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use uuid::Uuid;

use crate::{auth::AuthUser, axum_http::error_responses::usecase_error_response};
use application::usecases::plans::PlanUseCase;
use domain::{
    repositories::{customers::CustomerRepository, plans::PlanRepository},
    value_objects::plans::{InsertPlanModel, UpdatePlanModel},
};
use infra::local_store::{
    repositories::{customers::CustomerLocalStore, plans::PlanLocalStore},
    snapshot::SnapshotStore,
};

pub fn routes(store: Arc<SnapshotStore>) -> Router {
    let plan_repository = PlanLocalStore::new(Arc::clone(&store));
    let customer_repository = CustomerLocalStore::new(Arc::clone(&store));
    let plan_usecase = PlanUseCase::new(Arc::new(plan_repository), Arc::new(customer_repository));

    Router::new()
        .route("/", get(list_plans).post(add_plan))
        .route("/:plan_id", get(get_plan).put(update_plan).delete(delete_plan))
        .with_state(Arc::new(plan_usecase))
}

pub async fn list_plans<P, C>(
    State(plan_usecase): State<Arc<PlanUseCase<P, C>>>,
    auth: AuthUser,
) -> impl IntoResponse
where
    P: PlanRepository + Send + Sync,
    C: CustomerRepository + Send + Sync,
{
    match plan_usecase.list_plans(&auth.username).await {
        Ok(plans) => (StatusCode::OK, Json(plans)).into_response(),
        Err(err) => usecase_error_response(err.status_code(), err.to_string()),
    }
}

pub async fn get_plan<P, C>(
    State(plan_usecase): State<Arc<PlanUseCase<P, C>>>,
    auth: AuthUser,
    Path(plan_id): Path<Uuid>,
) -> impl IntoResponse
where
    P: PlanRepository + Send + Sync,
    C: CustomerRepository + Send + Sync,
{
    match plan_usecase.get_plan(&auth.username, plan_id).await {
        Ok(plan) => (StatusCode::OK, Json(plan)).into_response(),
        Err(err) => usecase_error_response(err.status_code(), err.to_string()),
    }
}

pub async fn add_plan<P, C>(
    State(plan_usecase): State<Arc<PlanUseCase<P, C>>>,
    auth: AuthUser,
    Json(insert_plan_model): Json<InsertPlanModel>,
) -> impl IntoResponse
where
    P: PlanRepository + Send + Sync,
    C: CustomerRepository + Send + Sync,
{
    match plan_usecase.add_plan(&auth.username, insert_plan_model).await {
        Ok(plan) => (StatusCode::CREATED, Json(plan)).into_response(),
        Err(err) => usecase_error_response(err.status_code(), err.to_string()),
    }
}

pub async fn update_plan<P, C>(
    State(plan_usecase): State<Arc<PlanUseCase<P, C>>>,
    auth: AuthUser,
    Path(plan_id): Path<Uuid>,
    Json(update_plan_model): Json<UpdatePlanModel>,
) -> impl IntoResponse
where
    P: PlanRepository + Send + Sync,
    C: CustomerRepository + Send + Sync,
{
    match plan_usecase
        .update_plan(&auth.username, plan_id, update_plan_model)
        .await
    {
        Ok(plan) => (StatusCode::OK, Json(plan)).into_response(),
        Err(err) => usecase_error_response(err.status_code(), err.to_string()),
    }
}

pub async fn delete_plan<P, C>(
    State(plan_usecase): State<Arc<PlanUseCase<P, C>>>,
    auth: AuthUser,
    Path(plan_id): Path<Uuid>,
) -> impl IntoResponse
where
    P: PlanRepository + Send + Sync,
    C: CustomerRepository + Send + Sync,
{
    match plan_usecase.delete_plan(&auth.username, plan_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => usecase_error_response(err.status_code(), err.to_string()),
    }
}
