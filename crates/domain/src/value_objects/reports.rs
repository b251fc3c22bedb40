use serde::{Deserialize, Serialize};

/// A report panel the operator can show or hide. Visibility is persisted
/// alongside the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportCard {
    pub id: String,
    pub title: String,
    pub description: String,
    pub visible: bool,
}
