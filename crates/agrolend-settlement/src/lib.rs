pub mod error;
pub mod idempotency;
pub mod orchestrator;
pub mod types;

pub use error::SettlementError;
pub use idempotency::{MemoryReferenceStore, ReferenceStore};
pub use orchestrator::SettlementOrchestrator;
pub use types::SettlementRecord;
