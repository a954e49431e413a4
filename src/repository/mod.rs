//! Resource repositories
//!
//! Each repository caches one backend collection. The cache is only ever replaced
//! wholesale by a successful `load`; writes go to the backend and are followed by
//! a full reload rather than a local merge.

pub mod resources;

use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::api::{ApiClient, ApiError};
use crate::types::Assignment;

pub use resources::{Assignments, Doctors, Patients};

/// A collection exposed by the backend at `PATH` and listed under `LIST_KEY`
pub trait Resource: Send + Sync + 'static {
    type Record: DeserializeOwned + Clone + PartialEq + Send + Sync + 'static;
    type Input: Serialize + Send + Sync;

    const PATH: &'static str;
    const LIST_KEY: &'static str;
    /// Inline notice shown in place of the list when a load fails
    const LOAD_ERROR: &'static str;

    fn id(record: &Self::Record) -> &str;
}

/// Resources whose records can be edited in place (`PUT PATH/:id`)
pub trait Updatable: Resource {}

/// Outcome of the most recent load
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loaded,
    Failed(String),
}

pub struct Repository<R: Resource> {
    api: ApiClient,
    cache: RwLock<Vec<R::Record>>,
    state: RwLock<LoadState>,
    /// Serializes loads so the load that starts last is the one that lands last
    load_lock: Mutex<()>,
    /// Bumped by `reset`; a load started before the bump never commits
    generation: AtomicU64,
    _resource: PhantomData<R>,
}

impl<R: Resource> Repository<R> {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            cache: RwLock::new(Vec::new()),
            state: RwLock::new(LoadState::Idle),
            load_lock: Mutex::new(()),
            generation: AtomicU64::new(0),
            _resource: PhantomData,
        }
    }

    /// Fetch the whole collection and replace the cache.
    ///
    /// On failure the cache is left as it was and the load state records the error.
    /// A response that arrives after a `reset` is dropped and nothing is cached.
    pub async fn load(&self) -> Result<usize, ApiError> {
        let _guard = self.load_lock.lock().await;
        let generation = self.generation.load(Ordering::SeqCst);

        let result = self.fetch_all().await;

        let mut cache = self.cache.write().expect("cache lock poisoned");
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!("Dropping {} response from before reset", R::LIST_KEY);
            return result.map(|_| 0);
        }

        match result {
            Ok(records) => {
                let count = records.len();
                *cache = records;
                *self.state.write().expect("load state lock poisoned") = LoadState::Loaded;
                tracing::info!("Loaded {} {}", count, R::LIST_KEY);
                Ok(count)
            }
            Err(e) => {
                tracing::error!("Failed to load {}: {}", R::LIST_KEY, e);
                *self.state.write().expect("load state lock poisoned") =
                    LoadState::Failed(R::LOAD_ERROR.to_string());
                Err(e)
            }
        }
    }

    /// Fetch the collection without touching the cache.
    pub async fn fetch_all(&self) -> Result<Vec<R::Record>, ApiError> {
        let body: Value = self.api.get(R::PATH).await?;
        parse_list::<R::Record>(body, R::LIST_KEY)
    }

    pub async fn create(&self, input: &R::Input) -> Result<(), ApiError> {
        let _: Value = self.api.post(R::PATH, input).await?;
        tracing::info!("Created record in {}", R::LIST_KEY);
        self.resync().await;
        Ok(())
    }

    /// Delete a record. Confirmation is the caller's responsibility.
    pub async fn remove(&self, id: &str) -> Result<(), ApiError> {
        self.api.delete(&record_path::<R>(id)).await?;
        tracing::info!("Deleted {} from {}", id, R::LIST_KEY);
        self.resync().await;
        Ok(())
    }

    pub fn snapshot(&self) -> Vec<R::Record> {
        self.cache.read().expect("cache lock poisoned").clone()
    }

    pub fn find(&self, id: &str) -> Option<R::Record> {
        self.cache
            .read()
            .expect("cache lock poisoned")
            .iter()
            .find(|record| R::id(record) == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.cache.read().expect("cache lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn load_state(&self) -> LoadState {
        self.state.read().expect("load state lock poisoned").clone()
    }

    /// Forget cached records, e.g. when the session ends. Loads still in
    /// flight are discarded when they complete.
    pub fn reset(&self) {
        let mut cache = self.cache.write().expect("cache lock poisoned");
        self.generation.fetch_add(1, Ordering::SeqCst);
        cache.clear();
        *self.state.write().expect("load state lock poisoned") = LoadState::Idle;
    }

    /// Reload after a successful write. A failed reload is recorded in the
    /// load state; the write itself still succeeded.
    async fn resync(&self) {
        if let Err(e) = self.load().await {
            tracing::debug!("Reload of {} after write failed: {}", R::LIST_KEY, e);
        }
    }
}

impl<R: Updatable> Repository<R> {
    pub async fn update(&self, id: &str, input: &R::Input) -> Result<(), ApiError> {
        let _: Value = self.api.put(&record_path::<R>(id), input).await?;
        tracing::info!("Updated {} in {}", id, R::LIST_KEY);
        self.resync().await;
        Ok(())
    }
}

impl Repository<Assignments> {
    /// Assignments of one patient, fetched without touching the cache.
    pub async fn for_patient(&self, patient_id: &str) -> Result<Vec<Assignment>, ApiError> {
        let body: Value = self.api.get(&record_path::<Assignments>(patient_id)).await?;
        parse_list(body, Assignments::LIST_KEY)
    }
}

fn record_path<R: Resource>(id: &str) -> String {
    format!("{}/{}", R::PATH, id)
}

fn parse_list<T: DeserializeOwned>(mut body: Value, key: &'static str) -> Result<Vec<T>, ApiError> {
    let list = body
        .get_mut(key)
        .map(Value::take)
        .ok_or_else(|| <serde_json::Error as serde::de::Error>::missing_field(key))?;
    Ok(serde_json::from_value(list)?)
}
