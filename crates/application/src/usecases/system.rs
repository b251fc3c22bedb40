use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info};

use domain::{
    repositories::system::SystemRepository,
    value_objects::settings::{SystemSettings, UpdateSettingsModel},
};

#[derive(Debug, Error)]
pub enum SystemError {
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl SystemError {
    pub fn status_code(&self) -> u16 {
        match self {
            SystemError::Internal(_) => 500,
        }
    }
}

pub type SystemResult<T> = std::result::Result<T, SystemError>;

pub struct SystemUseCase<S>
where
    S: SystemRepository + Send + Sync + 'static,
{
    system_repo: Arc<S>,
}

impl<S> SystemUseCase<S>
where
    S: SystemRepository + Send + Sync + 'static,
{
    pub fn new(system_repo: Arc<S>) -> Self {
        Self { system_repo }
    }

    pub async fn settings(&self) -> SystemResult<SystemSettings> {
        self.system_repo.settings().await.map_err(|err| {
            error!(store_error = ?err, "system: failed to load settings");
            SystemError::Internal(err)
        })
    }

    pub async fn update_settings(
        &self,
        update: UpdateSettingsModel,
    ) -> SystemResult<SystemSettings> {
        let settings = self.system_repo.update_settings(update).await.map_err(|err| {
            error!(store_error = ?err, "system: failed to update settings");
            SystemError::Internal(err)
        })?;

        info!("system: settings updated");
        Ok(settings)
    }

    pub async fn reset_to_initial_data(&self) -> SystemResult<()> {
        self.system_repo.reset_to_initial_data().await.map_err(|err| {
            error!(store_error = ?err, "system: failed to reset to initial data");
            SystemError::Internal(err)
        })?;

        info!("system: store reset to initial data");
        Ok(())
    }
}
