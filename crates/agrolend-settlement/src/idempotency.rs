use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::error::SettlementError;
use crate::types::SettlementRecord;

/// Compare-and-set idempotency guard over payment references.
///
/// Claiming a reference must be atomic with respect to other claims so two
/// concurrent settlements for the same payment can never both reach the
/// mint step.
pub trait ReferenceStore: Send + Sync {
    /// Atomically claim a reference for settlement. Returns `false` when
    /// the reference is already in flight or a prior record blocks retry.
    fn claim(&self, reference: &str) -> Result<bool, SettlementError>;

    /// Persist the final record for a claimed reference and release the
    /// in-flight claim.
    fn record(&self, record: &SettlementRecord) -> Result<(), SettlementError>;

    /// Fetch the last recorded outcome for a reference.
    fn get(&self, reference: &str) -> Result<Option<SettlementRecord>, SettlementError>;
}

/// In-memory reference store. Records do not survive a restart; the node
/// uses a RocksDB-backed store in production.
#[derive(Default)]
pub struct MemoryReferenceStore {
    inflight: DashMap<String, ()>,
    records: DashMap<String, SettlementRecord>,
}

impl MemoryReferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReferenceStore for MemoryReferenceStore {
    fn claim(&self, reference: &str) -> Result<bool, SettlementError> {
        match self.inflight.entry(reference.to_string()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                if let Some(record) = self.records.get(reference) {
                    if record.blocks_retry() {
                        return Ok(false);
                    }
                }
                slot.insert(());
                Ok(true)
            }
        }
    }

    fn record(&self, record: &SettlementRecord) -> Result<(), SettlementError> {
        self.records
            .insert(record.reference.clone(), record.clone());
        self.inflight.remove(&record.reference);
        Ok(())
    }

    fn get(&self, reference: &str) -> Result<Option<SettlementRecord>, SettlementError> {
        Ok(self.records.get(reference).map(|r| r.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agrolend_core::{SettlementKind, SettlementState, SettlementStep};

    fn record(state: SettlementState, compensated: bool) -> SettlementRecord {
        SettlementRecord::new("ref-1", SettlementKind::Supply, state, None, compensated)
    }

    #[test]
    fn test_claim_is_exclusive() {
        let store = MemoryReferenceStore::new();
        assert!(store.claim("ref-1").unwrap());
        assert!(!store.claim("ref-1").unwrap());
        // Other references are unaffected.
        assert!(store.claim("ref-2").unwrap());
    }

    #[test]
    fn test_record_releases_claim() {
        let store = MemoryReferenceStore::new();
        assert!(store.claim("ref-1").unwrap());
        store
            .record(&record(
                SettlementState::Failed {
                    step: SettlementStep::Mint,
                    reason: "boom".into(),
                },
                true,
            ))
            .unwrap();
        // Compensated failure: retry allowed.
        assert!(store.claim("ref-1").unwrap());
    }

    #[test]
    fn test_done_record_blocks_claim() {
        let store = MemoryReferenceStore::new();
        assert!(store.claim("ref-1").unwrap());
        store.record(&record(SettlementState::Done, false)).unwrap();
        assert!(!store.claim("ref-1").unwrap());
    }

    #[test]
    fn test_uncompensated_failure_blocks_claim() {
        let store = MemoryReferenceStore::new();
        assert!(store.claim("ref-1").unwrap());
        store
            .record(&record(
                SettlementState::Failed {
                    step: SettlementStep::Settle,
                    reason: "boom".into(),
                },
                false,
            ))
            .unwrap();
        assert!(!store.claim("ref-1").unwrap());
    }

    #[test]
    fn test_get_returns_recorded_outcome() {
        let store = MemoryReferenceStore::new();
        assert!(store.get("ref-1").unwrap().is_none());
        store.claim("ref-1").unwrap();
        let rec = record(SettlementState::Done, false);
        store.record(&rec).unwrap();
        assert_eq!(store.get("ref-1").unwrap(), Some(rec));
    }
}
