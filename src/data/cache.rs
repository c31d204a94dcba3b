use std::collections::HashMap;
use std::sync::Arc;

use super::loader::{LoadError, Source};
use super::model::CountyIncomeRecord;

/// Shared, immutable result of one load.
pub type Records = Arc<Vec<CountyIncomeRecord>>;

// ---------------------------------------------------------------------------
// LoadCache – caller-owned memo of load results
// ---------------------------------------------------------------------------

/// Load results keyed by [`Source::cache_key`].
///
/// Only successful loads are stored. Uploads have no key and always go
/// through the loader.
#[derive(Debug, Default)]
pub struct LoadCache {
    entries: HashMap<String, Records>,
}

impl LoadCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached records for `source`, loading them on a miss.
    pub fn get_or_load<F>(&mut self, source: &Source, loader: F) -> Result<Records, LoadError>
    where
        F: FnOnce(&Source) -> Result<Vec<CountyIncomeRecord>, LoadError>,
    {
        let Some(key) = source.cache_key() else {
            return loader(source).map(Arc::new);
        };
        if let Some(hit) = self.entries.get(&key) {
            log::debug!("Cache hit for {key}");
            return Ok(Arc::clone(hit));
        }
        let records = Arc::new(loader(source)?);
        self.entries.insert(key, Arc::clone(&records));
        Ok(records)
    }

    /// Drop the cached entry for `source` and load it again.
    pub fn refresh<F>(&mut self, source: &Source, loader: F) -> Result<Records, LoadError>
    where
        F: FnOnce(&Source) -> Result<Vec<CountyIncomeRecord>, LoadError>,
    {
        if let Some(key) = source.cache_key() {
            self.invalidate(&key);
        }
        self.get_or_load(source, loader)
    }

    /// Remove one entry. Returns whether it was present.
    pub fn invalidate(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
