//! RocksDB-backed settlement record storage.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use rocksdb::{ColumnFamilyDescriptor, Options, DB};
use std::path::Path;

use agrolend_settlement::{ReferenceStore, SettlementError, SettlementRecord};

/// Column family names for different data types.
const CF_SETTLEMENTS: &str = "settlements";

/// Durable `ReferenceStore`: settlement records in RocksDB, in-flight claims
/// in memory.
///
/// Claims are process-local on purpose. A single node signs with a single
/// admin key, so the DashMap claim set is the one writer that matters; the
/// database exists so finished records survive a restart.
pub struct SettlementStore {
    db: DB,
    inflight: DashMap<String, ()>,
}

impl SettlementStore {
    /// Open or create the database at the given path.
    pub fn open(path: &Path) -> Result<Self, SettlementError> {
        std::fs::create_dir_all(path).map_err(|e| SettlementError::Store(e.to_string()))?;

        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors = vec![ColumnFamilyDescriptor::new(
            CF_SETTLEMENTS,
            Options::default(),
        )];

        let db = DB::open_cf_descriptors(&opts, path, cf_descriptors)
            .map_err(|e| SettlementError::Store(e.to_string()))?;

        Ok(Self {
            db,
            inflight: DashMap::new(),
        })
    }

    fn read_record(&self, reference: &str) -> Result<Option<SettlementRecord>, SettlementError> {
        let cf = self
            .db
            .cf_handle(CF_SETTLEMENTS)
            .ok_or_else(|| SettlementError::Store("settlements column family missing".into()))?;
        let bytes = self
            .db
            .get_cf(&cf, reference.as_bytes())
            .map_err(|e| SettlementError::Store(e.to_string()))?;
        match bytes {
            Some(bytes) => {
                let record = serde_json::from_slice(&bytes)
                    .map_err(|e| SettlementError::Store(e.to_string()))?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }
}

impl ReferenceStore for SettlementStore {
    fn claim(&self, reference: &str) -> Result<bool, SettlementError> {
        match self.inflight.entry(reference.to_string()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                if let Some(record) = self.read_record(reference)? {
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
        let cf = self
            .db
            .cf_handle(CF_SETTLEMENTS)
            .ok_or_else(|| SettlementError::Store("settlements column family missing".into()))?;
        let bytes =
            serde_json::to_vec(record).map_err(|e| SettlementError::Store(e.to_string()))?;
        self.db
            .put_cf(&cf, record.reference.as_bytes(), bytes)
            .map_err(|e| SettlementError::Store(e.to_string()))?;
        self.inflight.remove(&record.reference);
        Ok(())
    }

    fn get(&self, reference: &str) -> Result<Option<SettlementRecord>, SettlementError> {
        self.read_record(reference)
    }
}
