use nexns_application::ports::NotificationSource;
use nexns_application::use_cases::{HandleNotificationUseCase, SyncAllDomainsUseCase};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerState {
    Disconnected,
    Connecting,
    Connected,
}

/// Supervises the controller's notification channel.
///
/// Reconnects forever with a fixed backoff. Every successful connection is
/// followed by a full resync so that events missed while disconnected are
/// recovered; events are then applied one at a time in receipt order.
pub struct NotificationListenerJob {
    source: Arc<dyn NotificationSource>,
    sync_all: Arc<SyncAllDomainsUseCase>,
    handle_notification: Arc<HandleNotificationUseCase>,
    backoff: Duration,
    state: watch::Sender<ListenerState>,
    shutdown: CancellationToken,
}

impl NotificationListenerJob {
    pub fn new(
        source: Arc<dyn NotificationSource>,
        sync_all: Arc<SyncAllDomainsUseCase>,
        handle_notification: Arc<HandleNotificationUseCase>,
    ) -> Self {
        let (state, _) = watch::channel(ListenerState::Disconnected);
        Self {
            source,
            sync_all,
            handle_notification,
            backoff: Duration::from_secs(5),
            state,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn subscribe_state(&self) -> watch::Receiver<ListenerState> {
        self.state.subscribe()
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            backoff_ms = self.backoff.as_millis() as u64,
            "Starting notification listener job"
        );
        tokio::spawn(async move { self.run().await });
    }

    /// Runs until the cancellation token fires.
    pub async fn run(&self) {
        'supervise: loop {
            self.state.send_replace(ListenerState::Connecting);

            let connected = tokio::select! {
                _ = self.shutdown.cancelled() => break 'supervise,
                result = self.source.connect() => result,
            };

            match connected {
                Ok(mut stream) => {
                    self.state.send_replace(ListenerState::Connected);
                    info!("Notification channel connected");

                    let resync = tokio::select! {
                        _ = self.shutdown.cancelled() => break 'supervise,
                        result = self.sync_all.execute() => result,
                    };
                    if let Err(e) = resync {
                        warn!(
                            error = %e,
                            "Full resync after connect failed; serving previous data"
                        );
                    }

                    loop {
                        let next = tokio::select! {
                            _ = self.shutdown.cancelled() => break 'supervise,
                            next = stream.next_event() => next,
                        };

                        match next {
                            Ok(Some(event)) => {
                                if let Err(e) = self.handle_notification.execute(&event).await {
                                    warn!(
                                        domain_id = event.domain,
                                        error = %e,
                                        "Failed to apply notification"
                                    );
                                }
                            }
                            Ok(None) => {
                                warn!("Notification channel closed by controller");
                                break;
                            }
                            Err(e) => {
                                warn!(error = %e, "Notification channel failed");
                                break;
                            }
                        }
                    }
                }
                Err(e) => warn!(error = %e, "Notification channel connect failed"),
            }

            self.state.send_replace(ListenerState::Disconnected);
            tokio::select! {
                _ = self.shutdown.cancelled() => break 'supervise,
                _ = tokio::time::sleep(self.backoff) => {}
            }
        }

        self.state.send_replace(ListenerState::Disconnected);
        info!("NotificationListenerJob: shutting down");
    }
}
