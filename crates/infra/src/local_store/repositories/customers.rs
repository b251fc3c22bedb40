use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::local_store::snapshot::SnapshotStore;
use domain::{
    entities::customers::{CustomerEntity, SubscriptionEntity},
    repositories::customers::CustomerRepository,
    value_objects::customers::{InsertCustomerModel, UpdateCustomerModel},
};

pub struct CustomerLocalStore {
    store: Arc<SnapshotStore>,
}

impl CustomerLocalStore {
    pub fn new(store: Arc<SnapshotStore>) -> Self {
        Self { store }
    }
}

fn find_customer_mut<'a>(
    customers: &'a mut [CustomerEntity],
    owner_id: &str,
    customer_id: Uuid,
) -> Option<&'a mut CustomerEntity> {
    customers
        .iter_mut()
        .find(|customer| customer.id == customer_id && customer.owner_id == owner_id)
}

#[async_trait]
impl CustomerRepository for CustomerLocalStore {
    async fn insert(
        &self,
        owner_id: &str,
        customer: InsertCustomerModel,
    ) -> Result<CustomerEntity> {
        let entity = CustomerEntity {
            id: Uuid::new_v4(),
            name: customer.name,
            email: customer.email,
            phone: customer.phone,
            status: customer.status,
            owner_id: owner_id.to_string(),
            subscriptions: Vec::new(),
        };

        let created = entity.clone();
        self.store
            .with_subscription_mut(|snapshot| snapshot.customers.push(entity))?;
        Ok(created)
    }

    async fn update(
        &self,
        owner_id: &str,
        customer_id: Uuid,
        update: UpdateCustomerModel,
    ) -> Result<Option<CustomerEntity>> {
        self.store.with_subscription_mut(|snapshot| {
            let customer = find_customer_mut(&mut snapshot.customers, owner_id, customer_id)?;

            if let Some(name) = update.name {
                customer.name = name;
            }
            if let Some(email) = update.email {
                customer.email = email;
            }
            if let Some(phone) = update.phone {
                customer.phone = Some(phone);
            }
            if let Some(status) = update.status {
                customer.status = status;
            }

            Some(customer.clone())
        })
    }

    async fn delete(&self, owner_id: &str, customer_id: Uuid) -> Result<bool> {
        self.store.with_subscription_mut(|snapshot| {
            let before = snapshot.customers.len();
            snapshot
                .customers
                .retain(|customer| !(customer.id == customer_id && customer.owner_id == owner_id));
            snapshot.customers.len() != before
        })
    }

    async fn find_by_id(
        &self,
        owner_id: &str,
        customer_id: Uuid,
    ) -> Result<Option<CustomerEntity>> {
        Ok(self.store.with_subscription(|snapshot| {
            snapshot
                .customers
                .iter()
                .find(|customer| customer.id == customer_id && customer.owner_id == owner_id)
                .cloned()
        }))
    }

    async fn list(&self, owner_id: &str) -> Result<Vec<CustomerEntity>> {
        Ok(self.store.with_subscription(|snapshot| {
            snapshot
                .customers
                .iter()
                .filter(|customer| customer.owner_id == owner_id)
                .cloned()
                .collect()
        }))
    }

    async fn add_subscription(
        &self,
        owner_id: &str,
        customer_id: Uuid,
        subscription: SubscriptionEntity,
    ) -> Result<bool> {
        self.store.with_subscription_mut(|snapshot| {
            match find_customer_mut(&mut snapshot.customers, owner_id, customer_id) {
                Some(customer) => {
                    customer.subscriptions.push(subscription);
                    true
                }
                None => false,
            }
        })
    }

    async fn update_subscription(
        &self,
        owner_id: &str,
        customer_id: Uuid,
        subscription_id: Uuid,
        plan_id: Uuid,
        start_date: DateTime<Utc>,
    ) -> Result<bool> {
        self.store.with_subscription_mut(|snapshot| {
            let Some(customer) = find_customer_mut(&mut snapshot.customers, owner_id, customer_id)
            else {
                return false;
            };

            match customer
                .subscriptions
                .iter_mut()
                .find(|sub| sub.id == subscription_id)
            {
                Some(subscription) => {
                    subscription.plan_id = plan_id;
                    subscription.start_date = start_date;
                    true
                }
                None => false,
            }
        })
    }

    async fn remove_subscription(
        &self,
        owner_id: &str,
        customer_id: Uuid,
        subscription_id: Uuid,
    ) -> Result<bool> {
        self.store.with_subscription_mut(|snapshot| {
            let Some(customer) = find_customer_mut(&mut snapshot.customers, owner_id, customer_id)
            else {
                return false;
            };

            let before = customer.subscriptions.len();
            customer.subscriptions.retain(|sub| sub.id != subscription_id);
            customer.subscriptions.len() != before
        })
    }

    async fn plan_in_use(&self, plan_id: Uuid) -> Result<bool> {
        // Deliberately unscoped: a plan referenced by any owner's customer
        // blocks deletion.
        Ok(self.store.with_subscription(|snapshot| {
            snapshot.customers.iter().any(|customer| {
                customer
                    .subscriptions
                    .iter()
                    .any(|sub| sub.plan_id == plan_id)
            })
        }))
    }
}
