use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A subscription tier. `price_minor` is what the customer is charged per
/// cycle; `cost_minor` is what the operator pays upstream for the same
/// cycle. Both are minor currency units.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanEntity {
    pub id: Uuid,
    pub name: String,
    pub price_minor: i64,
    /// `None` means zero cost (full margin), not missing data.
    pub cost_minor: Option<i64>,
    pub duration_days: i64,
    pub description: String,
    pub owner_id: String,
}
