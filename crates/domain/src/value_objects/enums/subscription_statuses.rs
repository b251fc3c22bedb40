use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Subscriptions within this many remaining days are classified as warning.
pub const EXPIRY_WARNING_DAYS: i64 = 5;

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    #[default]
    Active,
    Warning,
    Expired,
}

impl Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Warning => "warning",
            SubscriptionStatus::Expired => "expired",
        };
        write!(f, "{}", status)
    }
}

impl SubscriptionStatus {
    pub fn from_str(value: &str) -> Self {
        match value {
            "active" => SubscriptionStatus::Active,
            "warning" => SubscriptionStatus::Warning,
            "expired" => SubscriptionStatus::Expired,
            _ => SubscriptionStatus::Expired,
        }
    }

    /// Zero or negative days are already expired; the warning window is
    /// inclusive at both ends.
    pub fn from_days_remaining(days_remaining: i64) -> Self {
        if days_remaining <= 0 {
            SubscriptionStatus::Expired
        } else if days_remaining <= EXPIRY_WARNING_DAYS {
            SubscriptionStatus::Warning
        } else {
            SubscriptionStatus::Active
        }
    }
}
