use nexns_domain::config::ControllerConfig;
use nexns_infrastructure::controller::{ControllerClient, ControllerNotificationSource};
use std::sync::Arc;
use tracing::info;

pub struct Controller {
    pub datasets: Arc<ControllerClient>,
    pub notifications: Arc<ControllerNotificationSource>,
}

impl Controller {
    pub fn new(config: &ControllerConfig) -> anyhow::Result<Self> {
        info!(url = %config.base_url(), "Configuring controller client");

        Ok(Self {
            datasets: Arc::new(ControllerClient::new(config)?),
            notifications: Arc::new(ControllerNotificationSource::new(config)?),
        })
    }
}
