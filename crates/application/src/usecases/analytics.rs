use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{error, info};

use crate::usecases::subscription_details;
use domain::{
    repositories::{customers::CustomerRepository, plans::PlanRepository},
    value_objects::{
        analytics::{AnalyticsOverview, RevenueSummary},
        enums::{customer_statuses::CustomerStatus, subscription_statuses::SubscriptionStatus},
        subscriptions::CustomerWithPlanDetails,
    },
};

const DAYS_PER_MONTH: f64 = 30.0;
const MONTHS_PER_YEAR: f64 = 12.0;

fn is_paying(status: SubscriptionStatus) -> bool {
    matches!(
        status,
        SubscriptionStatus::Active | SubscriptionStatus::Warning
    )
}

/// Counts subscriptions (not customers) in the given status.
pub fn count_by_status(details: &[CustomerWithPlanDetails], status: SubscriptionStatus) -> usize {
    details
        .iter()
        .map(|customer| {
            customer
                .subscriptions
                .iter()
                .filter(|sub| sub.status == status)
                .count()
        })
        .sum()
}

/// Profit projected over a 30-day month from currently paying subscriptions.
///
/// Each active or warning subscription contributes its per-cycle margin
/// spread over the plan duration; expired subscriptions contribute nothing.
/// Plain linear sum, no discounting.
pub fn expected_monthly_profit(details: &[CustomerWithPlanDetails]) -> f64 {
    details
        .iter()
        .flat_map(|customer| &customer.subscriptions)
        .filter(|sub| is_paying(sub.status))
        .map(|sub| {
            let profit_per_cycle =
                (sub.plan.price_minor - sub.plan.cost_minor.unwrap_or(0)) as f64;
            profit_per_cycle / sub.plan.duration_days as f64 * DAYS_PER_MONTH
        })
        .sum()
}

/// Twelve times the monthly projection, not an independent yearly model.
pub fn expected_yearly_profit(details: &[CustomerWithPlanDetails]) -> f64 {
    expected_monthly_profit(details) * MONTHS_PER_YEAR
}

/// Mean charge price of paying subscriptions; zero when none qualify.
pub fn average_subscription_value(details: &[CustomerWithPlanDetails]) -> f64 {
    let mut total = 0i64;
    let mut count = 0usize;

    for sub in details
        .iter()
        .flat_map(|customer| &customer.subscriptions)
        .filter(|sub| is_paying(sub.status))
    {
        total += sub.plan.price_minor;
        count += 1;
    }

    if count == 0 {
        return 0.0;
    }
    total as f64 / count as f64
}

/// Gross charge and cost totals across every subscription regardless of
/// status.
pub fn revenue_summary(details: &[CustomerWithPlanDetails]) -> RevenueSummary {
    let mut summary = RevenueSummary::default();

    for sub in details.iter().flat_map(|customer| &customer.subscriptions) {
        summary.total_revenue_minor += sub.plan.price_minor;
        summary.total_cost_minor += sub.plan.cost_minor.unwrap_or(0);
    }
    summary.profit_minor = summary.total_revenue_minor - summary.total_cost_minor;
    summary
}

/// Customers marked active that hold at least one active subscription.
pub fn count_active_customers(details: &[CustomerWithPlanDetails]) -> usize {
    details
        .iter()
        .filter(|customer| {
            customer.status == CustomerStatus::Active
                && customer
                    .subscriptions
                    .iter()
                    .any(|sub| sub.status == SubscriptionStatus::Active)
        })
        .count()
}

/// Customers holding at least one subscription in the warning window.
pub fn count_expiring_customers(details: &[CustomerWithPlanDetails]) -> usize {
    details
        .iter()
        .filter(|customer| {
            customer
                .subscriptions
                .iter()
                .any(|sub| sub.status == SubscriptionStatus::Warning)
        })
        .count()
}

pub fn overview(details: &[CustomerWithPlanDetails]) -> AnalyticsOverview {
    AnalyticsOverview {
        active_subscriptions: count_by_status(details, SubscriptionStatus::Active),
        expiring_subscriptions: count_by_status(details, SubscriptionStatus::Warning),
        expired_subscriptions: count_by_status(details, SubscriptionStatus::Expired),
        active_customers: count_active_customers(details),
        expiring_customers: count_expiring_customers(details),
        expected_monthly_profit_minor: expected_monthly_profit(details),
        expected_yearly_profit_minor: expected_yearly_profit(details),
        average_subscription_value_minor: average_subscription_value(details),
        revenue: revenue_summary(details),
    }
}

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AnalyticsError {
    pub fn status_code(&self) -> u16 {
        match self {
            AnalyticsError::Internal(_) => 500,
        }
    }
}

pub type AnalyticsResult<T> = std::result::Result<T, AnalyticsError>;

pub struct AnalyticsUseCase<C, P>
where
    C: CustomerRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    customer_repo: Arc<C>,
    plan_repo: Arc<P>,
}

impl<C, P> AnalyticsUseCase<C, P>
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

    pub async fn overview(&self, owner_id: &str) -> AnalyticsResult<AnalyticsOverview> {
        let customers = self.customer_repo.list(owner_id).await.map_err(|err| {
            error!(owner_id, store_error = ?err, "analytics: failed to load customers");
            AnalyticsError::Internal(err)
        })?;
        let plans = self.plan_repo.list(owner_id).await.map_err(|err| {
            error!(owner_id, store_error = ?err, "analytics: failed to load plans");
            AnalyticsError::Internal(err)
        })?;

        let details =
            subscription_details::list_customer_details(&customers, &plans, owner_id, Utc::now())
                .map_err(AnalyticsError::Internal)?;

        let overview = overview(&details);
        info!(
            owner_id,
            active_subscriptions = overview.active_subscriptions,
            expiring_subscriptions = overview.expiring_subscriptions,
            "analytics: overview computed"
        );
        Ok(overview)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use domain::{
        entities::plans::PlanEntity, value_objects::subscriptions::SubscriptionDetail,
    };
    use uuid::Uuid;

    fn plan(price_minor: i64, cost_minor: Option<i64>, duration_days: i64) -> PlanEntity {
        PlanEntity {
            id: Uuid::new_v4(),
            name: "Premium".to_string(),
            price_minor,
            cost_minor,
            duration_days,
            description: String::new(),
            owner_id: "alice".to_string(),
        }
    }

    fn customer_with(
        status: CustomerStatus,
        subscriptions: Vec<SubscriptionDetail>,
    ) -> CustomerWithPlanDetails {
        CustomerWithPlanDetails {
            id: Uuid::new_v4(),
            name: "Maria Oliveira".to_string(),
            email: "maria.oliveira@example.com".to_string(),
            phone: None,
            status,
            subscriptions,
        }
    }

    fn detail(plan: PlanEntity, days_remaining: i64) -> SubscriptionDetail {
        SubscriptionDetail {
            id: Uuid::new_v4(),
            plan,
            start_date: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            days_remaining,
            status: SubscriptionStatus::from_days_remaining(days_remaining),
        }
    }

    #[test]
    fn monthly_profit_spreads_the_cycle_margin_over_thirty_days() {
        // 59.90 charged, 29.90 cost, 30-day cycle: 30.00 projected per month.
        let details = vec![customer_with(
            CustomerStatus::Active,
            vec![detail(plan(5990, Some(2990), 30), 20)],
        )];

        assert_eq!(expected_monthly_profit(&details), 3000.0);
    }

    #[test]
    fn missing_cost_counts_as_full_margin() {
        let details = vec![customer_with(
            CustomerStatus::Active,
            vec![detail(plan(5990, None, 30), 20)],
        )];

        assert_eq!(expected_monthly_profit(&details), 5990.0);
    }

    #[test]
    fn expired_subscriptions_contribute_no_profit() {
        let details = vec![customer_with(
            CustomerStatus::Active,
            vec![
                detail(plan(5990, Some(2990), 30), 20),
                detail(plan(9990, Some(2990), 30), 0),
            ],
        )];

        assert_eq!(expected_monthly_profit(&details), 3000.0);
    }

    #[test]
    fn yearly_profit_is_exactly_twelve_months() {
        let details = vec![customer_with(
            CustomerStatus::Active,
            vec![
                detail(plan(5990, Some(2990), 30), 20),
                detail(plan(29990, Some(10000), 365), 3),
            ],
        )];

        assert_eq!(
            expected_yearly_profit(&details),
            expected_monthly_profit(&details) * 12.0
        );
    }

    #[test]
    fn average_subscription_value_ignores_expired_and_handles_empty() {
        let details = vec![customer_with(
            CustomerStatus::Active,
            vec![
                detail(plan(2990, None, 30), 10),
                detail(plan(5990, None, 30), 4),
                detail(plan(99990, None, 30), -2),
            ],
        )];

        assert_eq!(average_subscription_value(&details), 4490.0);
        assert_eq!(average_subscription_value(&[]), 0.0);
    }

    #[test]
    fn count_by_status_counts_subscriptions_not_customers() {
        let details = vec![
            customer_with(
                CustomerStatus::Active,
                vec![
                    detail(plan(2990, None, 30), 10),
                    detail(plan(5990, None, 30), 12),
                ],
            ),
            customer_with(
                CustomerStatus::Active,
                vec![detail(plan(2990, None, 30), 3)],
            ),
        ];

        assert_eq!(count_by_status(&details, SubscriptionStatus::Active), 2);
        assert_eq!(count_by_status(&details, SubscriptionStatus::Warning), 1);
        assert_eq!(count_by_status(&details, SubscriptionStatus::Expired), 0);
    }

    #[test]
    fn revenue_summary_spans_every_status() {
        let details = vec![customer_with(
            CustomerStatus::Active,
            vec![
                detail(plan(5990, Some(2990), 30), 20),
                detail(plan(2990, None, 30), -5),
            ],
        )];

        let summary = revenue_summary(&details);
        assert_eq!(summary.total_revenue_minor, 8980);
        assert_eq!(summary.total_cost_minor, 2990);
        assert_eq!(summary.profit_minor, 5990);
    }

    #[test]
    fn active_customer_count_requires_an_active_subscription() {
        let details = vec![
            customer_with(
                CustomerStatus::Active,
                vec![detail(plan(2990, None, 30), 20)],
            ),
            customer_with(
                CustomerStatus::Active,
                vec![detail(plan(2990, None, 30), 3)],
            ),
            customer_with(
                CustomerStatus::Inactive,
                vec![detail(plan(2990, None, 30), 20)],
            ),
        ];

        assert_eq!(count_active_customers(&details), 1);
        assert_eq!(count_expiring_customers(&details), 1);
    }
}
