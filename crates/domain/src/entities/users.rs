use serde::{Deserialize, Serialize};

/// An operator account. The username doubles as the ownership partition key
/// for plans and customers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserEntity {
    pub username: String,
    /// Argon2 PHC string, never the raw password.
    pub password_hash: String,
    pub is_admin: bool,
}
