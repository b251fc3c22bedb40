use serde::Serialize;

/// Gross revenue and cost across every subscription, regardless of status.
/// Minor currency units.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct RevenueSummary {
    pub total_revenue_minor: i64,
    pub total_cost_minor: i64,
    pub profit_minor: i64,
}

/// Portfolio aggregates for the dashboard and reports pages.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AnalyticsOverview {
    pub active_subscriptions: usize,
    pub expiring_subscriptions: usize,
    pub expired_subscriptions: usize,
    pub active_customers: usize,
    pub expiring_customers: usize,
    pub expected_monthly_profit_minor: f64,
    pub expected_yearly_profit_minor: f64,
    pub average_subscription_value_minor: f64,
    pub revenue: RevenueSummary,
}
