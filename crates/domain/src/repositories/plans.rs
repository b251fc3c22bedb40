use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::entities::plans::PlanEntity;
use crate::value_objects::plans::{InsertPlanModel, UpdatePlanModel};

/// Plan catalog access, scoped to the owning account on every call.
#[async_trait]
#[automock]
pub trait PlanRepository {
    async fn insert(&self, owner_id: &str, plan: InsertPlanModel) -> Result<PlanEntity>;
    async fn update(
        &self,
        owner_id: &str,
        plan_id: Uuid,
        update: UpdatePlanModel,
    ) -> Result<Option<PlanEntity>>;
    async fn delete(&self, owner_id: &str, plan_id: Uuid) -> Result<bool>;
    async fn find_by_id(&self, owner_id: &str, plan_id: Uuid) -> Result<Option<PlanEntity>>;
    async fn list(&self, owner_id: &str) -> Result<Vec<PlanEntity>>;
}
