use nexns_application::use_cases::SyncAllDomainsUseCase;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Periodically reloads the full dataset and swaps the index.
///
/// The first tick is skipped: the initial load happens during bootstrap.
pub struct DatasetResyncJob {
    sync_all: Arc<SyncAllDomainsUseCase>,
    interval: Duration,
    shutdown: CancellationToken,
}

impl DatasetResyncJob {
    pub fn new(sync_all: Arc<SyncAllDomainsUseCase>, interval: Duration) -> Self {
        Self {
            sync_all,
            interval,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        if self.interval.is_zero() {
            info!("Dataset resync job disabled");
            return;
        }
        info!(
            interval_secs = self.interval.as_secs(),
            "Starting dataset resync job"
        );

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(self.interval);
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("DatasetResyncJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        match self.sync_all.execute().await {
                            Ok(summary) => info!(
                                loaded = summary.loaded,
                                rejected = summary.rejected,
                                "DatasetResyncJob: resync completed"
                            ),
                            Err(e) => error!(error = %e, "DatasetResyncJob: resync failed"),
                        }
                    }
                }
            }
        });
    }
}
