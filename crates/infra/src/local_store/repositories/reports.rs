use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::local_store::snapshot::SnapshotStore;
use domain::{repositories::reports::ReportRepository, value_objects::reports::ReportCard};

pub struct ReportLocalStore {
    store: Arc<SnapshotStore>,
}

impl ReportLocalStore {
    pub fn new(store: Arc<SnapshotStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ReportRepository for ReportLocalStore {
    async fn list(&self) -> Result<Vec<ReportCard>> {
        Ok(self
            .store
            .with_subscription(|snapshot| snapshot.reports.clone()))
    }

    async fn toggle_visibility(&self, report_id: &str) -> Result<Option<ReportCard>> {
        self.store.with_subscription_mut(|snapshot| {
            let card = snapshot
                .reports
                .iter_mut()
                .find(|card| card.id == report_id)?;
            card.visible = !card.visible;
            Some(card.clone())
        })
    }
}
