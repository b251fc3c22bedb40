use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::plans::PlanEntity;
use crate::value_objects::enums::{
    customer_statuses::CustomerStatus, subscription_statuses::SubscriptionStatus,
};

/// One subscription joined with its plan and classified against the clock.
/// Recomputed on every read, never persisted.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SubscriptionDetail {
    pub id: Uuid,
    pub plan: PlanEntity,
    pub start_date: DateTime<Utc>,
    pub days_remaining: i64,
    pub status: SubscriptionStatus,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CustomerWithPlanDetails {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub status: CustomerStatus,
    pub subscriptions: Vec<SubscriptionDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertSubscriptionModel {
    pub plan_id: Uuid,
    /// Defaults to the current instant when absent.
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
}

/// Renewal request; `plan_id` switches the subscription to another plan,
/// absent keeps the current one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenewSubscriptionModel {
    #[serde(default)]
    pub plan_id: Option<Uuid>,
}
