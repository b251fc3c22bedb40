pub mod customer_statuses;
pub mod subscription_statuses;
