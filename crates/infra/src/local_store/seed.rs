use chrono::{Duration, Utc};
use uuid::Uuid;

use domain::{
    entities::{
        customers::{CustomerEntity, SubscriptionEntity},
        plans::PlanEntity,
    },
    value_objects::{enums::customer_statuses::CustomerStatus, reports::ReportCard},
};

use super::snapshot::SubscriptionSnapshot;

// Fixed ids so reseeding produces the same catalog.
const BASIC_PLAN: Uuid = Uuid::from_u128(0x5375_6273_6372_6970_6c79_0000_0000_0001);
const PREMIUM_PLAN: Uuid = Uuid::from_u128(0x5375_6273_6372_6970_6c79_0000_0000_0002);
const BUSINESS_PLAN: Uuid = Uuid::from_u128(0x5375_6273_6372_6970_6c79_0000_0000_0003);
const ANNUAL_PLAN: Uuid = Uuid::from_u128(0x5375_6273_6372_6970_6c79_0000_0000_0004);

/// Starter catalog installed when the store is empty: the demo plans and
/// customers a fresh operator sees on first login.
pub fn initial_subscription_snapshot(owner_id: &str) -> SubscriptionSnapshot {
    let now = Utc::now();

    let plans = vec![
        plan(
            BASIC_PLAN,
            "Basic",
            2990,
            30,
            "Basic access to the services",
            owner_id,
        ),
        plan(
            PREMIUM_PLAN,
            "Premium",
            5990,
            30,
            "Full access with priority support",
            owner_id,
        ),
        plan(
            BUSINESS_PLAN,
            "Business",
            9990,
            30,
            "For small companies with multiple seats",
            owner_id,
        ),
        plan(
            ANNUAL_PLAN,
            "Annual Basic",
            29990,
            365,
            "Basic plan billed yearly",
            owner_id,
        ),
    ];

    let customers = vec![
        customer(
            "Joao Silva",
            "joao.silva@example.com",
            Some("(11) 98765-4321"),
            owner_id,
            vec![subscription(BASIC_PLAN, now - Duration::days(15))],
        ),
        customer(
            "Maria Oliveira",
            "maria.oliveira@example.com",
            None,
            owner_id,
            vec![subscription(PREMIUM_PLAN, now - Duration::days(30))],
        ),
        customer(
            "Pedro Santos",
            "pedro.santos@example.com",
            Some("(21) 99876-5432"),
            owner_id,
            vec![
                subscription(BUSINESS_PLAN, now - Duration::days(5)),
                subscription(BASIC_PLAN, now),
            ],
        ),
        customer(
            "Ana Costa",
            "ana.costa@example.com",
            None,
            owner_id,
            vec![subscription(ANNUAL_PLAN, now)],
        ),
    ];

    SubscriptionSnapshot {
        plans,
        customers,
        reports: default_report_cards(),
    }
}

pub fn default_report_cards() -> Vec<ReportCard> {
    vec![
        card(
            "monthly-profit",
            "Expected Monthly Profit",
            "Monthly profit estimate based on active subscriptions",
        ),
        card(
            "yearly-profit",
            "Expected Yearly Profit",
            "Yearly profit estimate based on active subscriptions",
        ),
        card(
            "expiring-subscriptions",
            "Expiring Subscriptions",
            "Customers whose subscriptions expire within the next 5 days",
        ),
        card(
            "renewal-rate",
            "Renewal Rate",
            "Share of customers that renew their subscriptions",
        ),
        card(
            "avg-subscription-value",
            "Average Subscription Value",
            "Mean value of the active subscriptions",
        ),
        card(
            "customer-retention",
            "Customer Retention",
            "Customer retention over time",
        ),
        card(
            "profit-per-plan",
            "Profit per Plan",
            "Profit distribution across plan tiers",
        ),
    ]
}

fn plan(
    id: Uuid,
    name: &str,
    price_minor: i64,
    duration_days: i64,
    description: &str,
    owner_id: &str,
) -> PlanEntity {
    PlanEntity {
        id,
        name: name.to_string(),
        price_minor,
        cost_minor: None,
        duration_days,
        description: description.to_string(),
        owner_id: owner_id.to_string(),
    }
}

fn customer(
    name: &str,
    email: &str,
    phone: Option<&str>,
    owner_id: &str,
    subscriptions: Vec<SubscriptionEntity>,
) -> CustomerEntity {
    CustomerEntity {
        id: Uuid::new_v4(),
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.map(str::to_string),
        status: CustomerStatus::Active,
        owner_id: owner_id.to_string(),
        subscriptions,
    }
}

fn subscription(plan_id: Uuid, start_date: chrono::DateTime<Utc>) -> SubscriptionEntity {
    SubscriptionEntity {
        id: Uuid::new_v4(),
        plan_id,
        start_date,
    }
}

fn card(id: &str, title: &str, description: &str) -> ReportCard {
    ReportCard {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        visible: true,
    }
}
