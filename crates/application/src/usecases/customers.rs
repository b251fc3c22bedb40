use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::usecases::{renewal, subscription_details};
use domain::{
    entities::{
        customers::{CustomerEntity, SubscriptionEntity},
        plans::PlanEntity,
    },
    repositories::{customers::CustomerRepository, plans::PlanRepository},
    value_objects::{
        customers::{InsertCustomerModel, UpdateCustomerModel},
        subscriptions::{CustomerWithPlanDetails, InsertSubscriptionModel, RenewSubscriptionModel},
    },
};

#[derive(Debug, Error)]
pub enum CustomerError {
    #[error("customer not found")]
    CustomerNotFound,
    #[error("subscription not found")]
    SubscriptionNotFound,
    #[error("plan not found")]
    PlanNotFound,
    #[error("customer name is required")]
    MissingName,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CustomerError {
    pub fn status_code(&self) -> u16 {
        match self {
            CustomerError::CustomerNotFound
            | CustomerError::SubscriptionNotFound
            | CustomerError::PlanNotFound => 404,
            CustomerError::MissingName => 400,
            CustomerError::Internal(_) => 500,
        }
    }
}

pub type CustomerResult<T> = std::result::Result<T, CustomerError>;

pub struct CustomerUseCase<C, P>
where
    C: CustomerRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    customer_repo: Arc<C>,
    plan_repo: Arc<P>,
}

impl<C, P> CustomerUseCase<C, P>
where
    C: CustomerRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    pub fn new(customer_repo: Arc<C>, plan_repo: Arc<P>) -> Self {
        Self {
            customer_repo,
            plan_repo,
        }
    }

    /// Derived listing: every read recomputes day counts and statuses
    /// against the current clock.
    pub async fn list_customer_details(
        &self,
        owner_id: &str,
    ) -> CustomerResult<Vec<CustomerWithPlanDetails>> {
        let customers = self.load_customers(owner_id).await?;
        let plans = self.load_plans(owner_id).await?;

        let details =
            subscription_details::list_customer_details(&customers, &plans, owner_id, Utc::now())
                .map_err(CustomerError::Internal)?;

        info!(
            owner_id,
            customer_count = details.len(),
            "customers: details listed"
        );
        Ok(details)
    }

    pub async fn get_customer_by_id(
        &self,
        owner_id: &str,
        customer_id: Uuid,
    ) -> CustomerResult<CustomerWithPlanDetails> {
        let customer = self.load_customer(owner_id, customer_id).await?;
        let plans = self.load_plans(owner_id).await?;

        subscription_details::customer_detail(&customer, &plans, Utc::now())
            .map_err(CustomerError::Internal)?
            .ok_or_else(|| {
                warn!(
                    owner_id,
                    %customer_id,
                    "customers: no resolvable subscriptions for customer"
                );
                CustomerError::CustomerNotFound
            })
    }

    pub async fn add_customer(
        &self,
        owner_id: &str,
        customer: InsertCustomerModel,
    ) -> CustomerResult<CustomerEntity> {
        if customer.name.trim().is_empty() {
            let err = CustomerError::MissingName;
            warn!(
                owner_id,
                status = err.status_code(),
                "customers: rejected empty customer name"
            );
            return Err(err);
        }

        let created = self
            .customer_repo
            .insert(owner_id, customer)
            .await
            .map_err(|err| {
                error!(owner_id, store_error = ?err, "customers: failed to insert customer");
                CustomerError::Internal(err)
            })?;

        info!(owner_id, customer_id = %created.id, "customers: customer added");
        Ok(created)
    }

    pub async fn update_customer(
        &self,
        owner_id: &str,
        customer_id: Uuid,
        update: UpdateCustomerModel,
    ) -> CustomerResult<CustomerEntity> {
        let updated = self
            .customer_repo
            .update(owner_id, customer_id, update)
            .await
            .map_err(|err| {
                error!(owner_id, %customer_id, store_error = ?err, "customers: failed to update customer");
                CustomerError::Internal(err)
            })?
            .ok_or_else(|| {
                warn!(owner_id, %customer_id, "customers: customer to update not found");
                CustomerError::CustomerNotFound
            })?;

        info!(owner_id, %customer_id, "customers: customer updated");
        Ok(updated)
    }

    pub async fn delete_customer(&self, owner_id: &str, customer_id: Uuid) -> CustomerResult<()> {
        let deleted = self
            .customer_repo
            .delete(owner_id, customer_id)
            .await
            .map_err(|err| {
                error!(owner_id, %customer_id, store_error = ?err, "customers: failed to delete customer");
                CustomerError::Internal(err)
            })?;

        if !deleted {
            warn!(owner_id, %customer_id, "customers: customer to delete not found");
            return Err(CustomerError::CustomerNotFound);
        }

        info!(owner_id, %customer_id, "customers: customer deleted");
        Ok(())
    }

    pub async fn add_subscription(
        &self,
        owner_id: &str,
        customer_id: Uuid,
        subscription: InsertSubscriptionModel,
    ) -> CustomerResult<SubscriptionEntity> {
        self.require_plan(owner_id, subscription.plan_id).await?;

        let entity = SubscriptionEntity {
            id: Uuid::new_v4(),
            plan_id: subscription.plan_id,
            start_date: subscription.start_date.unwrap_or_else(Utc::now),
        };

        let added = self
            .customer_repo
            .add_subscription(owner_id, customer_id, entity.clone())
            .await
            .map_err(|err| {
                error!(owner_id, %customer_id, store_error = ?err, "customers: failed to add subscription");
                CustomerError::Internal(err)
            })?;

        if !added {
            warn!(owner_id, %customer_id, "customers: customer for new subscription not found");
            return Err(CustomerError::CustomerNotFound);
        }

        info!(
            owner_id,
            %customer_id,
            subscription_id = %entity.id,
            plan_id = %entity.plan_id,
            "customers: subscription added"
        );
        Ok(entity)
    }

    /// Renews one subscription in place, carrying unused days forward; the
    /// customer's other subscriptions are untouched.
    pub async fn renew_subscription(
        &self,
        owner_id: &str,
        customer_id: Uuid,
        subscription_id: Uuid,
        renew: RenewSubscriptionModel,
    ) -> CustomerResult<SubscriptionEntity> {
        let customer = self.load_customer(owner_id, customer_id).await?;
        let subscription = customer
            .subscriptions
            .iter()
            .find(|sub| sub.id == subscription_id)
            .ok_or_else(|| {
                warn!(owner_id, %customer_id, %subscription_id, "customers: subscription to renew not found");
                CustomerError::SubscriptionNotFound
            })?;

        let plans = self.load_plans(owner_id).await?;
        let now = Utc::now();

        // The current classification drives the carry-forward; an inactive
        // customer therefore always renews into a fresh cycle.
        let current_detail = subscription_details::customer_detail(&customer, &plans, now)
            .map_err(CustomerError::Internal)?
            .and_then(|detail| {
                detail
                    .subscriptions
                    .into_iter()
                    .find(|sub| sub.id == subscription_id)
            })
            .ok_or_else(|| {
                warn!(owner_id, %customer_id, %subscription_id, "customers: subscription to renew is unresolvable");
                CustomerError::SubscriptionNotFound
            })?;

        let target_plan_id = renew.plan_id.unwrap_or(current_detail.plan.id);
        if !plans.iter().any(|plan| plan.id == target_plan_id) {
            warn!(owner_id, %customer_id, plan_id = %target_plan_id, "customers: renewal target plan not found");
            return Err(CustomerError::PlanNotFound);
        }

        let outcome = renewal::renew(subscription, &current_detail, renew.plan_id, now)
            .map_err(CustomerError::Internal)?;

        let updated = self
            .customer_repo
            .update_subscription(
                owner_id,
                customer_id,
                subscription_id,
                outcome.plan_id,
                outcome.start_date,
            )
            .await
            .map_err(|err| {
                error!(owner_id, %customer_id, %subscription_id, store_error = ?err, "customers: failed to persist renewal");
                CustomerError::Internal(err)
            })?;

        if !updated {
            warn!(owner_id, %customer_id, %subscription_id, "customers: renewal target vanished");
            return Err(CustomerError::SubscriptionNotFound);
        }

        info!(
            owner_id,
            %customer_id,
            %subscription_id,
            plan_id = %outcome.plan_id,
            carried_days = current_detail.days_remaining.max(0),
            "customers: subscription renewed"
        );

        Ok(SubscriptionEntity {
            id: subscription_id,
            plan_id: outcome.plan_id,
            start_date: outcome.start_date,
        })
    }

    pub async fn remove_subscription(
        &self,
        owner_id: &str,
        customer_id: Uuid,
        subscription_id: Uuid,
    ) -> CustomerResult<()> {
        let removed = self
            .customer_repo
            .remove_subscription(owner_id, customer_id, subscription_id)
            .await
            .map_err(|err| {
                error!(owner_id, %customer_id, %subscription_id, store_error = ?err, "customers: failed to remove subscription");
                CustomerError::Internal(err)
            })?;

        if !removed {
            warn!(owner_id, %customer_id, %subscription_id, "customers: subscription to remove not found");
            return Err(CustomerError::SubscriptionNotFound);
        }

        info!(owner_id, %customer_id, %subscription_id, "customers: subscription removed");
        Ok(())
    }

    async fn load_customers(&self, owner_id: &str) -> CustomerResult<Vec<CustomerEntity>> {
        self.customer_repo.list(owner_id).await.map_err(|err| {
            error!(owner_id, store_error = ?err, "customers: failed to list customers");
            CustomerError::Internal(err)
        })
    }

    async fn load_customer(
        &self,
        owner_id: &str,
        customer_id: Uuid,
    ) -> CustomerResult<CustomerEntity> {
        self.customer_repo
            .find_by_id(owner_id, customer_id)
            .await
            .map_err(|err| {
                error!(owner_id, %customer_id, store_error = ?err, "customers: failed to load customer");
                CustomerError::Internal(err)
            })?
            .ok_or_else(|| {
                warn!(owner_id, %customer_id, "customers: customer not found");
                CustomerError::CustomerNotFound
            })
    }

    async fn load_plans(&self, owner_id: &str) -> CustomerResult<Vec<PlanEntity>> {
        self.plan_repo.list(owner_id).await.map_err(|err| {
            error!(owner_id, store_error = ?err, "customers: failed to list plans");
            CustomerError::Internal(err)
        })
    }

    async fn require_plan(&self, owner_id: &str, plan_id: Uuid) -> CustomerResult<()> {
        self.plan_repo
            .find_by_id(owner_id, plan_id)
            .await
            .map_err(|err| {
                error!(owner_id, %plan_id, store_error = ?err, "customers: failed to load plan");
                CustomerError::Internal(err)
            })?
            .ok_or_else(|| {
                warn!(owner_id, %plan_id, "customers: plan for new subscription not found");
                CustomerError::PlanNotFound
            })
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use domain::{
        entities::plans::PlanEntity,
        repositories::{customers::MockCustomerRepository, plans::MockPlanRepository},
        value_objects::enums::customer_statuses::CustomerStatus,
    };

    fn sample_plan(id: Uuid, owner_id: &str, duration_days: i64) -> PlanEntity {
        PlanEntity {
            id,
            name: "Premium".to_string(),
            price_minor: 5990,
            cost_minor: Some(2990),
            duration_days,
            description: String::new(),
            owner_id: owner_id.to_string(),
        }
    }

    fn sample_customer(owner_id: &str, subscriptions: Vec<SubscriptionEntity>) -> CustomerEntity {
        CustomerEntity {
            id: Uuid::new_v4(),
            name: "Pedro Santos".to_string(),
            email: "pedro.santos@example.com".to_string(),
            phone: None,
            status: CustomerStatus::Active,
            owner_id: owner_id.to_string(),
            subscriptions,
        }
    }

    #[tokio::test]
    async fn renewal_backdates_the_start_by_the_remaining_days() {
        let plan = sample_plan(Uuid::new_v4(), "alice", 30);
        let subscription = SubscriptionEntity {
            id: Uuid::new_v4(),
            plan_id: plan.id,
            start_date: Utc::now() - Duration::days(20),
        };
        let customer = sample_customer("alice", vec![subscription.clone()]);
        let customer_id = customer.id;
        let subscription_id = subscription.id;
        let plan_id = plan.id;

        let mut customer_repo = MockCustomerRepository::new();
        let mut plan_repo = MockPlanRepository::new();

        customer_repo.expect_find_by_id().returning(move |_, _| {
            let customer = customer.clone();
            Box::pin(async move { Ok(Some(customer)) })
        });
        plan_repo.expect_list().returning(move |_| {
            let plan = plan.clone();
            Box::pin(async move { Ok(vec![plan]) })
        });
        customer_repo
            .expect_update_subscription()
            .withf(move |owner_id, cid, sid, pid, start_date| {
                // 10 days remain on a 30-day plan started 20 days ago, so
                // the new anchor must sit 10 days in the past.
                let expected = Utc::now() - Duration::days(10);
                owner_id == "alice"
                    && *cid == customer_id
                    && *sid == subscription_id
                    && *pid == plan_id
                    && (*start_date - expected).num_seconds().abs() <= 1
            })
            .returning(|_, _, _, _, _| Box::pin(async { Ok(true) }));

        let usecase = CustomerUseCase::new(Arc::new(customer_repo), Arc::new(plan_repo));

        let renewed = usecase
            .renew_subscription(
                "alice",
                customer_id,
                subscription_id,
                RenewSubscriptionModel::default(),
            )
            .await
            .unwrap();

        assert_eq!(renewed.plan_id, plan_id);
    }

    #[tokio::test]
    async fn renewal_rejects_unknown_target_plans() {
        let plan = sample_plan(Uuid::new_v4(), "alice", 30);
        let subscription = SubscriptionEntity {
            id: Uuid::new_v4(),
            plan_id: plan.id,
            start_date: Utc::now() - Duration::days(5),
        };
        let customer = sample_customer("alice", vec![subscription.clone()]);
        let customer_id = customer.id;

        let mut customer_repo = MockCustomerRepository::new();
        let mut plan_repo = MockPlanRepository::new();

        customer_repo.expect_find_by_id().returning(move |_, _| {
            let customer = customer.clone();
            Box::pin(async move { Ok(Some(customer)) })
        });
        plan_repo.expect_list().returning(move |_| {
            let plan = plan.clone();
            Box::pin(async move { Ok(vec![plan]) })
        });

        let usecase = CustomerUseCase::new(Arc::new(customer_repo), Arc::new(plan_repo));

        let result = usecase
            .renew_subscription(
                "alice",
                customer_id,
                subscription.id,
                RenewSubscriptionModel {
                    plan_id: Some(Uuid::new_v4()),
                },
            )
            .await;

        assert!(matches!(result, Err(CustomerError::PlanNotFound)));
    }

    #[tokio::test]
    async fn add_subscription_requires_an_existing_plan() {
        let customer_id = Uuid::new_v4();

        let customer_repo = MockCustomerRepository::new();
        let mut plan_repo = MockPlanRepository::new();
        plan_repo
            .expect_find_by_id()
            .returning(|_, _| Box::pin(async { Ok(None) }));

        let usecase = CustomerUseCase::new(Arc::new(customer_repo), Arc::new(plan_repo));

        let result = usecase
            .add_subscription(
                "alice",
                customer_id,
                InsertSubscriptionModel {
                    plan_id: Uuid::new_v4(),
                    start_date: None,
                },
            )
            .await;

        assert!(matches!(result, Err(CustomerError::PlanNotFound)));
    }

    #[tokio::test]
    async fn add_customer_rejects_blank_names() {
        let customer_repo = MockCustomerRepository::new();
        let plan_repo = MockPlanRepository::new();
        let usecase = CustomerUseCase::new(Arc::new(customer_repo), Arc::new(plan_repo));

        let result = usecase
            .add_customer(
                "alice",
                InsertCustomerModel {
                    name: "   ".to_string(),
                    email: "lead@example.com".to_string(),
                    phone: None,
                    status: CustomerStatus::Active,
                },
            )
            .await;

        assert!(matches!(result, Err(CustomerError::MissingName)));
    }
}
