use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SystemSettings {
    pub notification_email: String,
    pub enable_email_notifications: bool,
    /// Shown in the admin panel. The derivation engine classifies with its
    /// own fixed five-day window and does not read this value.
    pub subscription_warning_days: i64,
    pub company_name: String,
    pub allow_user_registration: bool,
    pub theme: String,
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            notification_email: "admin@example.com".to_string(),
            enable_email_notifications: true,
            subscription_warning_days: 7,
            company_name: "Subscriply".to_string(),
            allow_user_registration: false,
            theme: "light".to_string(),
        }
    }
}

/// Partial settings update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSettingsModel {
    pub notification_email: Option<String>,
    pub enable_email_notifications: Option<bool>,
    pub subscription_warning_days: Option<i64>,
    pub company_name: Option<String>,
    pub allow_user_registration: Option<bool>,
    pub theme: Option<String>,
}
