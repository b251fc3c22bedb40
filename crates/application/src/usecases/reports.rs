use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, warn};

use domain::{repositories::reports::ReportRepository, value_objects::reports::ReportCard};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("report not found")]
    ReportNotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ReportError {
    pub fn status_code(&self) -> u16 {
        match self {
            ReportError::ReportNotFound => 404,
            ReportError::Internal(_) => 500,
        }
    }
}

pub type ReportResult<T> = std::result::Result<T, ReportError>;

pub struct ReportUseCase<R>
where
    R: ReportRepository + Send + Sync + 'static,
{
    report_repo: Arc<R>,
}

impl<R> ReportUseCase<R>
where
    R: ReportRepository + Send + Sync + 'static,
{
    pub fn new(report_repo: Arc<R>) -> Self {
        Self { report_repo }
    }

    pub async fn list_reports(&self) -> ReportResult<Vec<ReportCard>> {
        self.report_repo.list().await.map_err(|err| {
            error!(store_error = ?err, "reports: failed to list report cards");
            ReportError::Internal(err)
        })
    }

    pub async fn toggle_visibility(&self, report_id: &str) -> ReportResult<ReportCard> {
        let card = self
            .report_repo
            .toggle_visibility(report_id)
            .await
            .map_err(|err| {
                error!(report_id, store_error = ?err, "reports: failed to toggle visibility");
                ReportError::Internal(err)
            })?
            .ok_or_else(|| {
                warn!(report_id, "reports: report card not found");
                ReportError::ReportNotFound
            })?;

        info!(report_id, visible = card.visible, "reports: visibility toggled");
        Ok(card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::repositories::reports::MockReportRepository;

    #[tokio::test]
    async fn toggling_an_unknown_card_is_not_found() {
        let mut report_repo = MockReportRepository::new();
        report_repo
            .expect_toggle_visibility()
            .returning(|_| Box::pin(async { Ok(None) }));

        let usecase = ReportUseCase::new(Arc::new(report_repo));

        let result = usecase.toggle_visibility("no-such-report").await;
        assert!(matches!(result, Err(ReportError::ReportNotFound)));
    }
}
