use serde::{Deserialize, Serialize};

use crate::value_objects::enums::customer_statuses::CustomerStatus;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertCustomerModel {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub status: CustomerStatus,
}

/// Partial customer update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCustomerModel {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: Option<CustomerStatus>,
}
