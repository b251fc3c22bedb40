use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::value_objects::reports::ReportCard;

#[async_trait]
#[automock]
pub trait ReportRepository {
    async fn list(&self) -> Result<Vec<ReportCard>>;
    async fn toggle_visibility(&self, report_id: &str) -> Result<Option<ReportCard>>;
}
