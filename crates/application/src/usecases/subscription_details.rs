use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use domain::{
    entities::{
        customers::{CustomerEntity, SubscriptionEntity},
        plans::PlanEntity,
    },
    value_objects::{
        enums::{customer_statuses::CustomerStatus, subscription_statuses::SubscriptionStatus},
        subscriptions::{CustomerWithPlanDetails, SubscriptionDetail},
    },
};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Classifies one subscription against its plan at the given instant.
///
/// `now` is a parameter rather than an internal clock read so callers and
/// tests pin the evaluation instant. The day count is a ceiling: a
/// subscription expiring later today still reports one day remaining.
pub fn compute_subscription_detail(
    subscription: &SubscriptionEntity,
    plan: &PlanEntity,
    now: DateTime<Utc>,
) -> Result<SubscriptionDetail> {
    let end_date = Duration::try_days(plan.duration_days)
        .and_then(|duration| subscription.start_date.checked_add_signed(duration))
        .context("failed to compute subscription end date")?;

    let days_remaining = div_ceil_i64(end_date.signed_duration_since(now).num_milliseconds(), MILLIS_PER_DAY);

    Ok(SubscriptionDetail {
        id: subscription.id,
        plan: plan.clone(),
        start_date: subscription.start_date,
        days_remaining,
        status: SubscriptionStatus::from_days_remaining(days_remaining),
    })
}

/// Joins every subscription of the owner's customers with its plan.
///
/// Subscriptions whose plan cannot be resolved within the owner's catalog
/// are dropped, and customers left without a single resolvable subscription
/// are dropped with them. Input order is preserved for the survivors.
pub fn list_customer_details(
    customers: &[CustomerEntity],
    plans: &[PlanEntity],
    owner_id: &str,
    now: DateTime<Utc>,
) -> Result<Vec<CustomerWithPlanDetails>> {
    let mut details = Vec::new();

    for customer in customers.iter().filter(|c| c.owner_id == owner_id) {
        let mut subscriptions = Vec::with_capacity(customer.subscriptions.len());
        for subscription in &customer.subscriptions {
            let Some(plan) = find_plan(plans, owner_id, subscription.plan_id) else {
                continue;
            };
            subscriptions.push(compute_subscription_detail(subscription, plan, now)?);
        }

        if subscriptions.is_empty() {
            continue;
        }

        details.push(to_customer_details(customer, subscriptions));
    }

    Ok(details)
}

/// Detail view of a single customer.
///
/// An inactive customer's subscriptions are all reported as expired with
/// zero days remaining, skipping the date arithmetic. Resolves to `None`
/// when no subscription survives the plan join.
pub fn customer_detail(
    customer: &CustomerEntity,
    plans: &[PlanEntity],
    now: DateTime<Utc>,
) -> Result<Option<CustomerWithPlanDetails>> {
    let mut subscriptions = Vec::with_capacity(customer.subscriptions.len());

    for subscription in &customer.subscriptions {
        let Some(plan) = find_plan(plans, &customer.owner_id, subscription.plan_id) else {
            continue;
        };

        let detail = if customer.status == CustomerStatus::Inactive {
            SubscriptionDetail {
                id: subscription.id,
                plan: plan.clone(),
                start_date: subscription.start_date,
                days_remaining: 0,
                status: SubscriptionStatus::Expired,
            }
        } else {
            compute_subscription_detail(subscription, plan, now)?
        };
        subscriptions.push(detail);
    }

    if subscriptions.is_empty() {
        return Ok(None);
    }

    Ok(Some(to_customer_details(customer, subscriptions)))
}

fn div_ceil_i64(a: i64, b: i64) -> i64 {
    let d = a.div_euclid(b);
    let r = a.rem_euclid(b);
    if r > 0 { d + 1 } else { d }
}

fn find_plan<'a>(plans: &'a [PlanEntity], owner_id: &str, plan_id: Uuid) -> Option<&'a PlanEntity> {
    plans
        .iter()
        .find(|plan| plan.owner_id == owner_id && plan.id == plan_id)
}

fn to_customer_details(
    customer: &CustomerEntity,
    subscriptions: Vec<SubscriptionDetail>,
) -> CustomerWithPlanDetails {
    CustomerWithPlanDetails {
        id: customer.id,
        name: customer.name.clone(),
        email: customer.email.clone(),
        phone: customer.phone.clone(),
        status: customer.status,
        subscriptions,
    }
}
