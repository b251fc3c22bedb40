use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::local_store::snapshot::SnapshotStore;
use domain::{
    repositories::system::SystemRepository,
    value_objects::settings::{SystemSettings, UpdateSettingsModel},
};

pub struct SystemLocalStore {
    store: Arc<SnapshotStore>,
}

impl SystemLocalStore {
    pub fn new(store: Arc<SnapshotStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SystemRepository for SystemLocalStore {
    async fn settings(&self) -> Result<SystemSettings> {
        Ok(self.store.with_auth(|snapshot| snapshot.settings.clone()))
    }

    async fn update_settings(&self, update: UpdateSettingsModel) -> Result<SystemSettings> {
        self.store.with_auth_mut(|snapshot| {
            let settings = &mut snapshot.settings;

            if let Some(notification_email) = update.notification_email {
                settings.notification_email = notification_email;
            }
            if let Some(enable_email_notifications) = update.enable_email_notifications {
                settings.enable_email_notifications = enable_email_notifications;
            }
            if let Some(subscription_warning_days) = update.subscription_warning_days {
                settings.subscription_warning_days = subscription_warning_days;
            }
            if let Some(company_name) = update.company_name {
                settings.company_name = company_name;
            }
            if let Some(allow_user_registration) = update.allow_user_registration {
                settings.allow_user_registration = allow_user_registration;
            }
            if let Some(theme) = update.theme {
                settings.theme = theme;
            }

            settings.clone()
        })
    }

    async fn reset_to_initial_data(&self) -> Result<()> {
        self.store.reset_to_initial_data()
    }
}
