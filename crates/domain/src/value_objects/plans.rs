use serde::{Deserialize, Serialize};

/// Payload for creating a plan. The owner is taken from the session, not
/// the payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertPlanModel {
    pub name: String,
    pub price_minor: i64,
    #[serde(default)]
    pub cost_minor: Option<i64>,
    pub duration_days: i64,
    #[serde(default)]
    pub description: String,
}

/// Partial plan update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePlanModel {
    pub name: Option<String>,
    pub price_minor: Option<i64>,
    pub cost_minor: Option<i64>,
    pub duration_days: Option<i64>,
    pub description: Option<String>,
}
