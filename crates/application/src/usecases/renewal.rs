use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use domain::{
    entities::customers::SubscriptionEntity, value_objects::subscriptions::SubscriptionDetail,
};

/// New anchor values for a renewed subscription.
#[derive(Debug, Clone, PartialEq)]
pub struct RenewalOutcome {
    pub start_date: DateTime<Utc>,
    pub plan_id: Uuid,
}

/// Computes the new anchor for a renewed subscription.
///
/// While days remain, the start is backdated by exactly that many whole
/// days, so the next expiry lands at `now + duration + remaining` and the
/// paid-but-unused time is kept. An expired subscription restarts at `now`
/// with a full fresh cycle. The plan id is rewritten unconditionally, even
/// when the plan does not change.
pub fn renew(
    subscription: &SubscriptionEntity,
    current_detail: &SubscriptionDetail,
    new_plan_id: Option<Uuid>,
    now: DateTime<Utc>,
) -> Result<RenewalOutcome> {
    let plan_id = new_plan_id.unwrap_or(subscription.plan_id);

    let start_date = if current_detail.days_remaining > 0 {
        Duration::try_days(current_detail.days_remaining)
            .and_then(|remaining| now.checked_sub_signed(remaining))
            .context("failed to backdate renewed subscription start")?
    } else {
        now
    };

    Ok(RenewalOutcome {
        start_date,
        plan_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::subscription_details::compute_subscription_detail;
    use chrono::TimeZone;
    use domain::{
        entities::plans::PlanEntity,
        value_objects::enums::subscription_statuses::SubscriptionStatus,
    };

    fn plan(id: Uuid, duration_days: i64) -> PlanEntity {
        PlanEntity {
            id,
            name: "Premium".to_string(),
            price_minor: 5990,
            cost_minor: Some(2990),
            duration_days,
            description: String::new(),
            owner_id: "alice".to_string(),
        }
    }

    fn detail(subscription: &SubscriptionEntity, plan: &PlanEntity, days_remaining: i64) -> SubscriptionDetail {
        SubscriptionDetail {
            id: subscription.id,
            plan: plan.clone(),
            start_date: subscription.start_date,
            days_remaining,
            status: SubscriptionStatus::from_days_remaining(days_remaining),
        }
    }

    #[test]
    fn carries_remaining_days_forward() {
        let now = Utc.with_ymd_and_hms(2024, 1, 20, 0, 0, 0).unwrap();
        let plan = plan(Uuid::new_v4(), 30);
        let subscription = SubscriptionEntity {
            id: Uuid::new_v4(),
            plan_id: plan.id,
            start_date: now - Duration::days(20),
        };
        let current = detail(&subscription, &plan, 10);

        let outcome = renew(&subscription, &current, None, now).unwrap();

        assert_eq!(
            outcome.start_date,
            Utc.with_ymd_and_hms(2024, 1, 10, 0, 0, 0).unwrap()
        );
        assert_eq!(outcome.plan_id, subscription.plan_id);
    }

    #[test]
    fn carried_days_stack_on_top_of_the_new_cycle() {
        let now = Utc.with_ymd_and_hms(2024, 1, 20, 0, 0, 0).unwrap();
        let old_plan = plan(Uuid::new_v4(), 30);
        let new_plan = plan(Uuid::new_v4(), 60);
        let subscription = SubscriptionEntity {
            id: Uuid::new_v4(),
            plan_id: old_plan.id,
            start_date: now - Duration::days(20),
        };
        let current = detail(&subscription, &old_plan, 10);

        let outcome = renew(&subscription, &current, Some(new_plan.id), now).unwrap();
        let renewed = SubscriptionEntity {
            id: subscription.id,
            plan_id: outcome.plan_id,
            start_date: outcome.start_date,
        };
        let renewed_detail = compute_subscription_detail(&renewed, &new_plan, now).unwrap();

        assert_eq!(renewed_detail.days_remaining, 60 - 10);
    }

    #[test]
    fn expired_subscription_restarts_today() {
        let now = Utc.with_ymd_and_hms(2024, 1, 20, 0, 0, 0).unwrap();
        let plan = plan(Uuid::new_v4(), 30);
        let subscription = SubscriptionEntity {
            id: Uuid::new_v4(),
            plan_id: plan.id,
            start_date: now - Duration::days(45),
        };

        for days_remaining in [0, -15] {
            let current = detail(&subscription, &plan, days_remaining);
            let outcome = renew(&subscription, &current, None, now).unwrap();
            assert_eq!(outcome.start_date, now);
        }
    }

    #[test]
    fn keeps_the_plan_when_none_is_requested() {
        let now = Utc.with_ymd_and_hms(2024, 1, 20, 0, 0, 0).unwrap();
        let plan = plan(Uuid::new_v4(), 30);
        let subscription = SubscriptionEntity {
            id: Uuid::new_v4(),
            plan_id: plan.id,
            start_date: now - Duration::days(5),
        };
        let current = detail(&subscription, &plan, 25);

        let outcome = renew(&subscription, &current, None, now).unwrap();

        assert_eq!(outcome.plan_id, subscription.plan_id);
    }
}
