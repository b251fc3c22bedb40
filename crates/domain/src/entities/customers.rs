use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::value_objects::enums::customer_statuses::CustomerStatus;

/// One enrollment of a customer into a plan, anchored by its start date.
/// End date and status are derived on read, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubscriptionEntity {
    pub id: Uuid,
    pub plan_id: Uuid,
    pub start_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomerEntity {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub status: CustomerStatus,
    pub owner_id: String,
    pub subscriptions: Vec<SubscriptionEntity>,
}
