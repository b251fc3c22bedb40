use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CustomerStatus {
    #[default]
    Active,
    Inactive,
}

impl Display for CustomerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            CustomerStatus::Active => "active",
            CustomerStatus::Inactive => "inactive",
        };
        write!(f, "{}", status)
    }
}

impl CustomerStatus {
    pub fn from_str(value: &str) -> Self {
        match value {
            "active" => CustomerStatus::Active,
            "inactive" => CustomerStatus::Inactive,
            _ => CustomerStatus::Inactive,
        }
    }
}
