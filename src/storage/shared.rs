use std::sync::Arc;

use chrono::{DateTime, NaiveDateTime, Utc};
use parking_lot::{RwLock, RwLockReadGuard};

use super::{Dataset, Error, Record};

/// A dataset shared between one writer and any number of pollers.
///
/// The write lock serializes `add_data` calls; readers see whole batches only.
#[derive(Debug)]
pub struct SharedDataset<V> {
    inner: Arc<RwLock<Dataset<V>>>,
}

impl<V> Clone for SharedDataset<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> SharedDataset<V> {
    pub fn new(dataset: Dataset<V>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(dataset)),
        }
    }

    pub fn add_data<I>(&self, records: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = Record<V>>,
    {
        self.inner.write().add_data(records)
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Dataset<V>> {
        self.inner.read()
    }

    pub fn last_timestamp(&self, name: &str) -> Result<Option<NaiveDateTime>, Error> {
        self.inner.read().last_timestamp(name)
    }
}

/// Runs a processing step only when new data has arrived.
///
/// The gate remembers the newest timestamp it has seen on a reference
/// variable; the loop that polls it lives with the caller.
pub struct UpdateGate {
    reference: String,
    last_seen: NaiveDateTime,
    updated: bool,
    setup: Option<Box<dyn FnMut() + Send>>,
}

impl UpdateGate {
    pub fn new(reference: &str) -> Self {
        Self {
            reference: reference.to_lowercase(),
            last_seen: DateTime::<Utc>::UNIX_EPOCH.naive_utc(),
            updated: false,
            setup: None,
        }
    }

    /// Registers a step rerun by [`UpdateGate::reset`]
    pub fn with_setup(mut self, setup: impl FnMut() + Send + 'static) -> Self {
        self.setup = Some(Box::new(setup));
        self
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn last_seen(&self) -> NaiveDateTime {
        self.last_seen
    }

    /// Whether the most recent poll ran the processing step
    pub fn updated(&self) -> bool {
        self.updated
    }

    /// Calls `process` if the reference variable advanced since the last poll.
    pub fn poll<V, F>(&mut self, dataset: &Dataset<V>, process: F) -> Result<bool, Error>
    where
        F: FnOnce(&Dataset<V>),
    {
        let newest = dataset.last_timestamp(&self.reference)?;
        self.updated = match newest {
            Some(ts) if ts > self.last_seen => {
                process(dataset);
                self.last_seen = ts;
                true
            }
            _ => false,
        };
        Ok(self.updated)
    }

    pub fn poll_shared<V, F>(&mut self, dataset: &SharedDataset<V>, process: F) -> Result<bool, Error>
    where
        F: FnOnce(&Dataset<V>),
    {
        let guard = dataset.read();
        self.poll(&*guard, process)
    }

    /// Reruns the setup step, if any
    pub fn reset(&mut self) {
        if let Some(setup) = self.setup.as_mut() {
            setup();
        }
    }
}
