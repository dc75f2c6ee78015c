use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

/// Serializes use cases that fetch from the controller and then write the
/// index.
///
/// A full sync holds the gate from fetch to swap, so a notification that
/// arrives mid-dump is applied after the swap instead of being overwritten
/// by the older dump. Clones share the same gate.
#[derive(Clone, Default)]
pub struct UpdateGate {
    lock: Arc<Mutex<()>>,
}

impl UpdateGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn enter(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().await
    }
}
