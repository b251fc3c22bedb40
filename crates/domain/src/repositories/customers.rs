use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::automock;
use uuid::Uuid;

use crate::entities::customers::{CustomerEntity, SubscriptionEntity};
use crate::value_objects::customers::{InsertCustomerModel, UpdateCustomerModel};

/// Customer records and their embedded subscription lists, scoped to the
/// owning account. `plan_in_use` is the one deliberately unscoped read: a
/// plan referenced by any owner's customer must not be deleted.
#[async_trait]
#[automock]
pub trait CustomerRepository {
    async fn insert(&self, owner_id: &str, customer: InsertCustomerModel)
    -> Result<CustomerEntity>;
    async fn update(
        &self,
        owner_id: &str,
        customer_id: Uuid,
        update: UpdateCustomerModel,
    ) -> Result<Option<CustomerEntity>>;
    async fn delete(&self, owner_id: &str, customer_id: Uuid) -> Result<bool>;
    async fn find_by_id(&self, owner_id: &str, customer_id: Uuid)
    -> Result<Option<CustomerEntity>>;
    async fn list(&self, owner_id: &str) -> Result<Vec<CustomerEntity>>;

    async fn add_subscription(
        &self,
        owner_id: &str,
        customer_id: Uuid,
        subscription: SubscriptionEntity,
    ) -> Result<bool>;
    async fn update_subscription(
        &self,
        owner_id: &str,
        customer_id: Uuid,
        subscription_id: Uuid,
        plan_id: Uuid,
        start_date: DateTime<Utc>,
    ) -> Result<bool>;
    async fn remove_subscription(
        &self,
        owner_id: &str,
        customer_id: Uuid,
        subscription_id: Uuid,
    ) -> Result<bool>;

    async fn plan_in_use(&self, plan_id: Uuid) -> Result<bool>;
}
