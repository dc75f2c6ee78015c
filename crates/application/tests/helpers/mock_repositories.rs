#![allow(dead_code)]
#![allow(unused_imports)]

use async_trait::async_trait;
use nexns_application::ports::{DatasetSource, DomainStore, NotificationSource, NotificationStream};
use nexns_domain::{DatasetNotification, DomainData, DomainError};
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct MockDatasetSource {
    datasets: Arc<RwLock<Vec<DomainData>>>,
    should_fail: Arc<RwLock<bool>>,
    fetch_all_calls: Arc<AtomicUsize>,
    fetch_domain_calls: Arc<AtomicUsize>,
    fetch_delay: Arc<Mutex<std::time::Duration>>,
}

impl MockDatasetSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_datasets(datasets: Vec<DomainData>) -> Self {
        let source = Self::new();
        *source.datasets.write().await = datasets;
        source
    }

    pub async fn set_datasets(&self, datasets: Vec<DomainData>) {
        *self.datasets.write().await = datasets;
    }

    pub async fn set_should_fail(&self, fail: bool) {
        *self.should_fail.write().await = fail;
    }

    /// `fetch_all` snapshots the datasets, then waits this long before
    /// returning them.
    pub fn set_fetch_delay(&self, delay: std::time::Duration) {
        *self.fetch_delay.lock().unwrap() = delay;
    }

    pub fn fetch_all_calls(&self) -> usize {
        self.fetch_all_calls.load(Ordering::SeqCst)
    }

    pub fn fetch_domain_calls(&self) -> usize {
        self.fetch_domain_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DatasetSource for MockDatasetSource {
    async fn fetch_all(&self) -> Result<Vec<DomainData>, DomainError> {
        if *self.should_fail.read().await {
            self.fetch_all_calls.fetch_add(1, Ordering::SeqCst);
            return Err(DomainError::ControllerRequest("mock failure".to_string()));
        }
        let snapshot = self.datasets.read().await.clone();
        self.fetch_all_calls.fetch_add(1, Ordering::SeqCst);
        let delay = *self.fetch_delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        Ok(snapshot)
    }

    async fn fetch_domain(&self, domain_id: i64) -> Result<DomainData, DomainError> {
        self.fetch_domain_calls.fetch_add(1, Ordering::SeqCst);
        if *self.should_fail.read().await {
            return Err(DomainError::ControllerRequest("mock failure".to_string()));
        }
        self.datasets
            .read()
            .await
            .iter()
            .find(|d| d.domain.id == domain_id)
            .cloned()
            .ok_or_else(|| DomainError::ControllerStatus {
                status: 404,
                url: format!("api/v1/domain/{}/dump/", domain_id),
            })
    }
}

/// Keyed by domain name, like the real index.
#[derive(Clone, Default)]
pub struct MockDomainStore {
    datasets: Arc<Mutex<BTreeMap<String, DomainData>>>,
    replace_calls: Arc<AtomicUsize>,
}

impl MockDomainStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<DomainData> {
        self.datasets.lock().unwrap().get(name).cloned()
    }

    pub fn names(&self) -> Vec<String> {
        self.datasets.lock().unwrap().keys().cloned().collect()
    }

    pub fn replace_calls(&self) -> usize {
        self.replace_calls.load(Ordering::SeqCst)
    }
}

impl DomainStore for MockDomainStore {
    fn replace_all(&self, datasets: Vec<DomainData>) -> Result<usize, DomainError> {
        self.replace_calls.fetch_add(1, Ordering::SeqCst);
        let mut map = self.datasets.lock().unwrap();
        map.clear();
        for data in datasets {
            map.insert(data.domain.name.clone(), data);
        }
        Ok(map.len())
    }

    fn upsert(&self, dataset: DomainData) -> Result<(), DomainError> {
        self.datasets
            .lock()
            .unwrap()
            .insert(dataset.domain.name.clone(), dataset);
        Ok(())
    }

    fn remove(&self, name: &str) -> bool {
        self.datasets.lock().unwrap().remove(name).is_some()
    }

    fn name_for_id(&self, domain_id: i64) -> Option<String> {
        self.datasets
            .lock()
            .unwrap()
            .values()
            .find(|d| d.domain.id == domain_id)
            .map(|d| d.domain.name.clone())
    }

    fn len(&self) -> usize {
        self.datasets.lock().unwrap().len()
    }
}

/// One scripted outcome of `connect`.
pub enum MockConnection {
    Refused,
    /// Delivers the events, then reports a clean close.
    Events(Vec<DatasetNotification>),
    /// Delivers the events, then fails mid-stream.
    EventsThenError(Vec<DatasetNotification>),
}

#[derive(Clone, Default)]
pub struct MockNotificationSource {
    script: Arc<Mutex<VecDeque<MockConnection>>>,
    connect_calls: Arc<AtomicUsize>,
}

impl MockNotificationSource {
    pub fn new(script: Vec<MockConnection>) -> Self {
        Self {
            script: Arc::new(Mutex::new(script.into())),
            connect_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn connect_calls(&self) -> usize {
        self.connect_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NotificationSource for MockNotificationSource {
    async fn connect(&self) -> Result<Box<dyn NotificationStream>, DomainError> {
        self.connect_calls.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(MockConnection::Events(events)) => Ok(Box::new(MockNotificationStream {
                events: events.into(),
                fail_at_end: false,
            })),
            Some(MockConnection::EventsThenError(events)) => Ok(Box::new(MockNotificationStream {
                events: events.into(),
                fail_at_end: true,
            })),
            Some(MockConnection::Refused) | None => Err(DomainError::NotificationChannel(
                "connection refused".to_string(),
            )),
        }
    }
}

pub struct MockNotificationStream {
    events: VecDeque<DatasetNotification>,
    fail_at_end: bool,
}

#[async_trait]
impl NotificationStream for MockNotificationStream {
    async fn next_event(&mut self) -> Result<Option<DatasetNotification>, DomainError> {
        match self.events.pop_front() {
            Some(event) => Ok(Some(event)),
            None if self.fail_at_end => Err(DomainError::NotificationChannel(
                "connection reset".to_string(),
            )),
            None => Ok(None),
        }
    }
}
