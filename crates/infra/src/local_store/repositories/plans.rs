use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::local_store::snapshot::SnapshotStore;
use domain::{
    entities::plans::PlanEntity,
    repositories::plans::PlanRepository,
    value_objects::plans::{InsertPlanModel, UpdatePlanModel},
};

pub struct PlanLocalStore {
    store: Arc<SnapshotStore>,
}

impl PlanLocalStore {
    pub fn new(store: Arc<SnapshotStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PlanRepository for PlanLocalStore {
    async fn insert(&self, owner_id: &str, plan: InsertPlanModel) -> Result<PlanEntity> {
        let entity = PlanEntity {
            id: Uuid::new_v4(),
            name: plan.name,
            price_minor: plan.price_minor,
            cost_minor: plan.cost_minor,
            duration_days: plan.duration_days,
            description: plan.description,
            owner_id: owner_id.to_string(),
        };

        let created = entity.clone();
        self.store
            .with_subscription_mut(|snapshot| snapshot.plans.push(entity))?;
        Ok(created)
    }

    async fn update(
        &self,
        owner_id: &str,
        plan_id: Uuid,
        update: UpdatePlanModel,
    ) -> Result<Option<PlanEntity>> {
        self.store.with_subscription_mut(|snapshot| {
            let plan = snapshot
                .plans
                .iter_mut()
                .find(|plan| plan.id == plan_id && plan.owner_id == owner_id)?;

            if let Some(name) = update.name {
                plan.name = name;
            }
            if let Some(price_minor) = update.price_minor {
                plan.price_minor = price_minor;
            }
            if let Some(cost_minor) = update.cost_minor {
                plan.cost_minor = Some(cost_minor);
            }
            if let Some(duration_days) = update.duration_days {
                plan.duration_days = duration_days;
            }
            if let Some(description) = update.description {
                plan.description = description;
            }

            Some(plan.clone())
        })
    }

    async fn delete(&self, owner_id: &str, plan_id: Uuid) -> Result<bool> {
        self.store.with_subscription_mut(|snapshot| {
            let before = snapshot.plans.len();
            snapshot
                .plans
                .retain(|plan| !(plan.id == plan_id && plan.owner_id == owner_id));
            snapshot.plans.len() != before
        })
    }

    async fn find_by_id(&self, owner_id: &str, plan_id: Uuid) -> Result<Option<PlanEntity>> {
        Ok(self.store.with_subscription(|snapshot| {
            snapshot
                .plans
                .iter()
                .find(|plan| plan.id == plan_id && plan.owner_id == owner_id)
                .cloned()
        }))
    }

    async fn list(&self, owner_id: &str) -> Result<Vec<PlanEntity>> {
        Ok(self.store.with_subscription(|snapshot| {
            snapshot
                .plans
                .iter()
                .filter(|plan| plan.owner_id == owner_id)
                .cloned()
                .collect()
        }))
    }
}
