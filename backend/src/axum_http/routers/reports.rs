use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};

use crate::{auth::AuthUser, axum_http::error_responses::usecase_error_response};
use application::usecases::{analytics::AnalyticsUseCase, reports::ReportUseCase};
use domain::repositories::{
    customers::CustomerRepository, plans::PlanRepository, reports::ReportRepository,
};
use infra::local_store::{
    repositories::{
        customers::CustomerLocalStore, plans::PlanLocalStore, reports::ReportLocalStore,
    },
    snapshot::SnapshotStore,
};

pub fn routes(store: Arc<SnapshotStore>) -> Router {
    let report_repository = ReportLocalStore::new(Arc::clone(&store));
    let report_usecase = ReportUseCase::new(Arc::new(report_repository));

    let customer_repository = CustomerLocalStore::new(Arc::clone(&store));
    let plan_repository = PlanLocalStore::new(Arc::clone(&store));
    let analytics_usecase =
        AnalyticsUseCase::new(Arc::new(customer_repository), Arc::new(plan_repository));

    Router::new()
        .route("/", get(list_reports))
        .route("/analytics", get(analytics_overview))
        .route("/:report_id/visibility", put(toggle_report_visibility))
        .with_state((Arc::new(report_usecase), Arc::new(analytics_usecase)))
}

type ReportsState<R, C, P> = (Arc<ReportUseCase<R>>, Arc<AnalyticsUseCase<C, P>>);

pub async fn list_reports<R, C, P>(
    State((report_usecase, _)): State<ReportsState<R, C, P>>,
    _auth: AuthUser,
) -> impl IntoResponse
where
    R: ReportRepository + Send + Sync,
    C: CustomerRepository + Send + Sync,
    P: PlanRepository + Send + Sync,
{
    match report_usecase.list_reports().await {
        Ok(reports) => (StatusCode::OK, Json(reports)).into_response(),
        Err(err) => usecase_error_response(err.status_code(), err.to_string()),
    }
}

pub async fn toggle_report_visibility<R, C, P>(
    State((report_usecase, _)): State<ReportsState<R, C, P>>,
    _auth: AuthUser,
    Path(report_id): Path<String>,
) -> impl IntoResponse
where
    R: ReportRepository + Send + Sync,
    C: CustomerRepository + Send + Sync,
    P: PlanRepository + Send + Sync,
{
    match report_usecase.toggle_visibility(&report_id).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(err) => usecase_error_response(err.status_code(), err.to_string()),
    }
}

pub async fn analytics_overview<R, C, P>(
    State((_, analytics_usecase)): State<ReportsState<R, C, P>>,
    auth: AuthUser,
) -> impl IntoResponse
where
    R: ReportRepository + Send + Sync,
    C: CustomerRepository + Send + Sync,
    P: PlanRepository + Send + Sync,
{
    match analytics_usecase.overview(&auth.username).await {
        Ok(overview) => (StatusCode::OK, Json(overview)).into_response(),
        Err(err) => usecase_error_response(err.status_code(), err.to_string()),
    }
}
