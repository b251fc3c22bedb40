use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::value_objects::settings::{SystemSettings, UpdateSettingsModel};

#[async_trait]
#[automock]
pub trait SystemRepository {
    async fn settings(&self) -> Result<SystemSettings>;
    async fn update_settings(&self, update: UpdateSettingsModel) -> Result<SystemSettings>;
    /// Reinstalls the seed catalog and customers; accounts, settings and
    /// report visibility are untouched.
    async fn reset_to_initial_data(&self) -> Result<()>;
}
