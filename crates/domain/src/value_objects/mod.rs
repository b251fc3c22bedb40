pub mod analytics;
pub mod customers;
pub mod enums;
pub mod plans;
pub mod reports;
pub mod settings;
pub mod subscriptions;
pub mod users;
