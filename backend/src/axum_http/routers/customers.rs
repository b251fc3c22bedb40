use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use uuid::Uuid;

use crate::{auth::AuthUser, axum_http::error_responses::usecase_error_response};
use application::usecases::customers::CustomerUseCase;
use domain::{
    repositories::{customers::CustomerRepository, plans::PlanRepository},
    value_objects::{
        customers::{InsertCustomerModel, UpdateCustomerModel},
        subscriptions::{InsertSubscriptionModel, RenewSubscriptionModel},
    },
};
use infra::local_store::{
    repositories::{customers::CustomerLocalStore, plans::PlanLocalStore},
    snapshot::SnapshotStore,
};

pub fn routes(store: Arc<SnapshotStore>) -> Router {
    let customer_repository = CustomerLocalStore::new(Arc::clone(&store));
    let plan_repository = PlanLocalStore::new(Arc::clone(&store));
    let customer_usecase =
        CustomerUseCase::new(Arc::new(customer_repository), Arc::new(plan_repository));

    Router::new()
        .route("/", get(list_customers).post(add_customer))
        .route(
            "/:customer_id",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
        .route("/:customer_id/subscriptions", post(add_subscription))
        .route(
            "/:customer_id/subscriptions/:subscription_id/renew",
            post(renew_subscription),
        )
        .route(
            "/:customer_id/subscriptions/:subscription_id",
            delete(remove_subscription),
        )
        .with_state(Arc::new(customer_usecase))
}

pub async fn list_customers<C, P>(
    State(customer_usecase): State<Arc<CustomerUseCase<C, P>>>,
    auth: AuthUser,
) -> impl IntoResponse
where
    C: CustomerRepository + Send + Sync,
    P: PlanRepository + Send + Sync,
{
    match customer_usecase.list_customer_details(&auth.username).await {
        Ok(details) => (StatusCode::OK, Json(details)).into_response(),
        Err(err) => usecase_error_response(err.status_code(), err.to_string()),
    }
}

pub async fn get_customer<C, P>(
    State(customer_usecase): State<Arc<CustomerUseCase<C, P>>>,
    auth: AuthUser,
    Path(customer_id): Path<Uuid>,
) -> impl IntoResponse
where
    C: CustomerRepository + Send + Sync,
    P: PlanRepository + Send + Sync,
{
    match customer_usecase
        .get_customer_by_id(&auth.username, customer_id)
        .await
    {
        Ok(details) => (StatusCode::OK, Json(details)).into_response(),
        Err(err) => usecase_error_response(err.status_code(), err.to_string()),
    }
}

pub async fn add_customer<C, P>(
    State(customer_usecase): State<Arc<CustomerUseCase<C, P>>>,
    auth: AuthUser,
    Json(insert_customer_model): Json<InsertCustomerModel>,
) -> impl IntoResponse
where
    C: CustomerRepository + Send + Sync,
    P: PlanRepository + Send + Sync,
{
    match customer_usecase
        .add_customer(&auth.username, insert_customer_model)
        .await
    {
        Ok(customer) => (StatusCode::CREATED, Json(customer)).into_response(),
        Err(err) => usecase_error_response(err.status_code(), err.to_string()),
    }
}

pub async fn update_customer<C, P>(
    State(customer_usecase): State<Arc<CustomerUseCase<C, P>>>,
    auth: AuthUser,
    Path(customer_id): Path<Uuid>,
    Json(update_customer_model): Json<UpdateCustomerModel>,
) -> impl IntoResponse
where
    C: CustomerRepository + Send + Sync,
    P: PlanRepository + Send + Sync,
{
    match customer_usecase
        .update_customer(&auth.username, customer_id, update_customer_model)
        .await
    {
        Ok(customer) => (StatusCode::OK, Json(customer)).into_response(),
        Err(err) => usecase_error_response(err.status_code(), err.to_string()),
    }
}

pub async fn delete_customer<C, P>(
    State(customer_usecase): State<Arc<CustomerUseCase<C, P>>>,
    auth: AuthUser,
    Path(customer_id): Path<Uuid>,
) -> impl IntoResponse
where
    C: CustomerRepository + Send + Sync,
    P: PlanRepository + Send + Sync,
{
    match customer_usecase
        .delete_customer(&auth.username, customer_id)
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => usecase_error_response(err.status_code(), err.to_string()),
    }
}

pub async fn add_subscription<C, P>(
    State(customer_usecase): State<Arc<CustomerUseCase<C, P>>>,
    auth: AuthUser,
    Path(customer_id): Path<Uuid>,
    Json(insert_subscription_model): Json<InsertSubscriptionModel>,
) -> impl IntoResponse
where
    C: CustomerRepository + Send + Sync,
    P: PlanRepository + Send + Sync,
{
    match customer_usecase
        .add_subscription(&auth.username, customer_id, insert_subscription_model)
        .await
    {
        Ok(subscription) => (StatusCode::CREATED, Json(subscription)).into_response(),
        Err(err) => usecase_error_response(err.status_code(), err.to_string()),
    }
}

pub async fn renew_subscription<C, P>(
    State(customer_usecase): State<Arc<CustomerUseCase<C, P>>>,
    auth: AuthUser,
    Path((customer_id, subscription_id)): Path<(Uuid, Uuid)>,
    Json(renew_subscription_model): Json<RenewSubscriptionModel>,
) -> impl IntoResponse
where
    C: CustomerRepository + Send + Sync,
    P: PlanRepository + Send + Sync,
{
    match customer_usecase
        .renew_subscription(
            &auth.username,
            customer_id,
            subscription_id,
            renew_subscription_model,
        )
        .await
    {
        Ok(subscription) => (StatusCode::OK, Json(subscription)).into_response(),
        Err(err) => usecase_error_response(err.status_code(), err.to_string()),
    }
}

pub async fn remove_subscription<C, P>(
    State(customer_usecase): State<Arc<CustomerUseCase<C, P>>>,
    auth: AuthUser,
    Path((customer_id, subscription_id)): Path<(Uuid, Uuid)>,
) -> impl IntoResponse
where
    C: CustomerRepository + Send + Sync,
    P: PlanRepository + Send + Sync,
{
    match customer_usecase
        .remove_subscription(&auth.username, customer_id, subscription_id)
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => usecase_error_response(err.status_code(), err.to_string()),
    }
}
