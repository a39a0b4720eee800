//! Ledger snapshot cache keyed by source content
//!
//! A snapshot is reused only while the source bytes, the load options and
//! the category table are all unchanged. Any difference produces a fresh
//! parse and categorisation. There is no time-based expiry.

use finstatements_loader::{CsvLedgerParser, LedgerSource, LoadOptions};
use finstatements_utils::content_fingerprint;
use std::sync::{Arc, RwLock};

use crate::error::{CoreError, CoreResult};
use crate::models::Ledger;
use crate::types::CategoryMap;

#[derive(Debug)]
struct CachedSnapshot {
    fingerprint: String,
    options: LoadOptions,
    categories: CategoryMap,
    ledger: Arc<Ledger>,
}

impl CachedSnapshot {
    fn matches(&self, fingerprint: &str, options: &LoadOptions, categories: &CategoryMap) -> bool {
        self.fingerprint == fingerprint && self.options == *options && self.categories == *categories
    }
}

/// Shared, read-only ledger snapshots
#[derive(Debug, Default)]
pub struct SnapshotCache {
    slot: RwLock<Option<CachedSnapshot>>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot for `source`, reloading when its content or the
    /// interpretation of that content changed
    pub fn load(
        &self,
        source: &dyn LedgerSource,
        options: &LoadOptions,
        categories: &CategoryMap,
    ) -> CoreResult<Arc<Ledger>> {
        let origin = source.describe();
        let content = source
            .read_bytes()
            .map_err(|e| CoreError::data_unavailable(origin.clone(), &e))?;
        let fingerprint = content_fingerprint(&content);

        {
            let slot = self.slot.read().unwrap_or_else(|e| e.into_inner());
            if let Some(cached) = slot.as_ref() {
                if cached.matches(&fingerprint, options, categories) {
                    log::debug!("Reusing ledger snapshot {} for {}", fingerprint, origin);
                    return Ok(Arc::clone(&cached.ledger));
                }
            }
        }

        let records = CsvLedgerParser::parse(&content, options)
            .map_err(|e| CoreError::data_unavailable(origin.clone(), &e))?;
        let ledger = Arc::new(Ledger::from_records(records, categories)?);
        log::info!("Loaded ledger snapshot {} ({} entries) from {}", fingerprint, ledger.len(), origin);

        let mut slot = self.slot.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(CachedSnapshot {
            fingerprint,
            options: options.clone(),
            categories: categories.clone(),
            ledger: Arc::clone(&ledger),
        });
        Ok(ledger)
    }

    /// Fingerprint of the cached snapshot, if any
    pub fn fingerprint(&self) -> Option<String> {
        let slot = self.slot.read().unwrap_or_else(|e| e.into_inner());
        slot.as_ref().map(|c| c.fingerprint.clone())
    }

    pub fn clear(&self) {
        let mut slot = self.slot.write().unwrap_or_else(|e| e.into_inner());
        *slot = None;
    }
}
