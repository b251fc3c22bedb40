use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use domain::{
    entities::plans::PlanEntity,
    repositories::{customers::CustomerRepository, plans::PlanRepository},
    value_objects::plans::{InsertPlanModel, UpdatePlanModel},
};

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("plan not found")]
    PlanNotFound,
    #[error("plan name is required")]
    MissingName,
    #[error("plan duration must be at least one day")]
    InvalidDuration,
    #[error("plan is referenced by existing subscriptions")]
    PlanInUse,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl PlanError {
    pub fn status_code(&self) -> u16 {
        match self {
            PlanError::PlanNotFound => 404,
            PlanError::MissingName | PlanError::InvalidDuration => 400,
            PlanError::PlanInUse => 409,
            PlanError::Internal(_) => 500,
        }
    }
}

pub type PlanResult<T> = std::result::Result<T, PlanError>;

pub struct PlanUseCase<P, C>
where
    P: PlanRepository + Send + Sync + 'static,
    C: CustomerRepository + Send + Sync + 'static,
{
    plan_repo: Arc<P>,
    customer_repo: Arc<C>,
}

impl<P, C> PlanUseCase<P, C>
where
    P: PlanRepository + Send + Sync + 'static,
    C: CustomerRepository + Send + Sync + 'static,
{
    pub fn new(plan_repo: Arc<P>, customer_repo: Arc<C>) -> Self {
        Self {
            plan_repo,
            customer_repo,
        }
    }

    pub async fn list_plans(&self, owner_id: &str) -> PlanResult<Vec<PlanEntity>> {
        let plans = self.plan_repo.list(owner_id).await.map_err(|err| {
            error!(owner_id, store_error = ?err, "plans: failed to list plans");
            PlanError::Internal(err)
        })?;
        info!(owner_id, plan_count = plans.len(), "plans: catalog loaded");
        Ok(plans)
    }

    pub async fn get_plan(&self, owner_id: &str, plan_id: Uuid) -> PlanResult<PlanEntity> {
        self.plan_repo
            .find_by_id(owner_id, plan_id)
            .await
            .map_err(|err| {
                error!(owner_id, %plan_id, store_error = ?err, "plans: failed to load plan");
                PlanError::Internal(err)
            })?
            .ok_or_else(|| {
                warn!(owner_id, %plan_id, "plans: plan not found");
                PlanError::PlanNotFound
            })
    }

    pub async fn add_plan(&self, owner_id: &str, plan: InsertPlanModel) -> PlanResult<PlanEntity> {
        Self::validate_name(Some(&plan.name))?;
        Self::validate_duration(Some(plan.duration_days))?;

        let created = self.plan_repo.insert(owner_id, plan).await.map_err(|err| {
            error!(owner_id, store_error = ?err, "plans: failed to insert plan");
            PlanError::Internal(err)
        })?;

        info!(owner_id, plan_id = %created.id, "plans: plan added");
        Ok(created)
    }

    pub async fn update_plan(
        &self,
        owner_id: &str,
        plan_id: Uuid,
        update: UpdatePlanModel,
    ) -> PlanResult<PlanEntity> {
        Self::validate_name(update.name.as_deref())?;
        Self::validate_duration(update.duration_days)?;

        let updated = self
            .plan_repo
            .update(owner_id, plan_id, update)
            .await
            .map_err(|err| {
                error!(owner_id, %plan_id, store_error = ?err, "plans: failed to update plan");
                PlanError::Internal(err)
            })?
            .ok_or_else(|| {
                warn!(owner_id, %plan_id, "plans: plan to update not found");
                PlanError::PlanNotFound
            })?;

        info!(owner_id, %plan_id, "plans: plan updated");
        Ok(updated)
    }

    /// Deletion is refused while any customer of any owner still references
    /// the plan; the catalog is left untouched in that case.
    pub async fn delete_plan(&self, owner_id: &str, plan_id: Uuid) -> PlanResult<()> {
        let in_use = self.customer_repo.plan_in_use(plan_id).await.map_err(|err| {
            error!(owner_id, %plan_id, store_error = ?err, "plans: failed to check plan references");
            PlanError::Internal(err)
        })?;

        if in_use {
            let err = PlanError::PlanInUse;
            warn!(
                owner_id,
                %plan_id,
                status = err.status_code(),
                "plans: delete blocked, plan is in use"
            );
            return Err(err);
        }

        let deleted = self
            .plan_repo
            .delete(owner_id, plan_id)
            .await
            .map_err(|err| {
                error!(owner_id, %plan_id, store_error = ?err, "plans: failed to delete plan");
                PlanError::Internal(err)
            })?;

        if !deleted {
            warn!(owner_id, %plan_id, "plans: plan to delete not found");
            return Err(PlanError::PlanNotFound);
        }

        info!(owner_id, %plan_id, "plans: plan deleted");
        Ok(())
    }

    fn validate_name(name: Option<&str>) -> PlanResult<()> {
        if let Some(name) = name {
            if name.trim().is_empty() {
                let err = PlanError::MissingName;
                warn!(status = err.status_code(), "plans: rejected empty plan name");
                return Err(err);
            }
        }
        Ok(())
    }

    fn validate_duration(duration_days: Option<i64>) -> PlanResult<()> {
        if let Some(duration_days) = duration_days {
            if duration_days <= 0 {
                let err = PlanError::InvalidDuration;
                warn!(
                    duration_days,
                    status = err.status_code(),
                    "plans: rejected non-positive duration"
                );
                return Err(err);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::repositories::{customers::MockCustomerRepository, plans::MockPlanRepository};
    use mockall::predicate::eq;

    fn sample_plan(id: Uuid, owner_id: &str) -> PlanEntity {
        PlanEntity {
            id,
            name: "Premium".to_string(),
            price_minor: 5990,
            cost_minor: Some(2990),
            duration_days: 30,
            description: "Full access".to_string(),
            owner_id: owner_id.to_string(),
        }
    }

    #[tokio::test]
    async fn delete_is_blocked_while_the_plan_is_referenced() {
        let plan_id = Uuid::new_v4();

        let plan_repo = MockPlanRepository::new();
        let mut customer_repo = MockCustomerRepository::new();

        customer_repo
            .expect_plan_in_use()
            .with(eq(plan_id))
            .returning(|_| Box::pin(async { Ok(true) }));

        let usecase = PlanUseCase::new(Arc::new(plan_repo), Arc::new(customer_repo));

        let result = usecase.delete_plan("alice", plan_id).await;

        // The plan repository mock has no delete expectation: reaching it
        // would fail the test, which is the point.
        assert!(matches!(result, Err(PlanError::PlanInUse)));
    }

    #[tokio::test]
    async fn delete_succeeds_for_unreferenced_plans() {
        let plan_id = Uuid::new_v4();

        let mut plan_repo = MockPlanRepository::new();
        let mut customer_repo = MockCustomerRepository::new();

        customer_repo
            .expect_plan_in_use()
            .with(eq(plan_id))
            .returning(|_| Box::pin(async { Ok(false) }));

        plan_repo
            .expect_delete()
            .withf(move |owner_id, id| owner_id == "alice" && *id == plan_id)
            .returning(|_, _| Box::pin(async { Ok(true) }));

        let usecase = PlanUseCase::new(Arc::new(plan_repo), Arc::new(customer_repo));

        assert!(usecase.delete_plan("alice", plan_id).await.is_ok());
    }

    #[tokio::test]
    async fn add_rejects_non_positive_durations() {
        let plan_repo = MockPlanRepository::new();
        let customer_repo = MockCustomerRepository::new();
        let usecase = PlanUseCase::new(Arc::new(plan_repo), Arc::new(customer_repo));

        let result = usecase
            .add_plan(
                "alice",
                InsertPlanModel {
                    name: "Premium".to_string(),
                    price_minor: 5990,
                    cost_minor: None,
                    duration_days: 0,
                    description: String::new(),
                },
            )
            .await;

        assert!(matches!(result, Err(PlanError::InvalidDuration)));
    }

    #[tokio::test]
    async fn get_plan_surfaces_not_found() {
        let plan_id = Uuid::new_v4();

        let mut plan_repo = MockPlanRepository::new();
        plan_repo
            .expect_find_by_id()
            .returning(|_, _| Box::pin(async { Ok(None) }));
        let customer_repo = MockCustomerRepository::new();

        let usecase = PlanUseCase::new(Arc::new(plan_repo), Arc::new(customer_repo));

        let result = usecase.get_plan("alice", plan_id).await;
        assert!(matches!(result, Err(PlanError::PlanNotFound)));
    }

    #[tokio::test]
    async fn list_passes_the_owner_through() {
        let mut plan_repo = MockPlanRepository::new();
        let owner_plan = sample_plan(Uuid::new_v4(), "alice");
        let expected = owner_plan.clone();

        plan_repo
            .expect_list()
            .withf(|owner_id| owner_id == "alice")
            .returning(move |_| {
                let plan = owner_plan.clone();
                Box::pin(async move { Ok(vec![plan]) })
            });

        let customer_repo = MockCustomerRepository::new();
        let usecase = PlanUseCase::new(Arc::new(plan_repo), Arc::new(customer_repo));

        let plans = usecase.list_plans("alice").await.unwrap();
        assert_eq!(plans, vec![expected]);
    }
}
