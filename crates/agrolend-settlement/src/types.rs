use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use agrolend_core::{SettlementKind, SettlementState};

/// Durable outcome of a settlement attempt, keyed by payment reference.
///
/// Doubles as the idempotency record: once a reference is recorded as
/// settled (or failed without the mint being unwound), it can never be
/// claimed again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementRecord {
    pub reference: String,
    pub kind: SettlementKind,
    pub state: SettlementState,
    /// Hash of the final (or failing) transaction, when one was mined.
    pub tx_id: Option<String>,
    /// Whether the chain was left in its pre-settlement state: either
    /// nothing was minted, or the mint was burned back after a later step
    /// failed. Compensated failures may be retried.
    pub compensated: bool,
    pub updated_at: DateTime<Utc>,
}

impl SettlementRecord {
    pub fn new(
        reference: impl Into<String>,
        kind: SettlementKind,
        state: SettlementState,
        tx_id: Option<String>,
        compensated: bool,
    ) -> Self {
        Self {
            reference: reference.into(),
            kind,
            state,
            tx_id,
            compensated,
            updated_at: Utc::now(),
        }
    }

    /// Whether this record permanently blocks another settlement attempt
    /// for the same reference.
    pub fn blocks_retry(&self) -> bool {
        match &self.state {
            SettlementState::Done => true,
            SettlementState::Failed { .. } => !self.compensated,
            // Non-final records should never be persisted; treat them as
            // blocking out of caution.
            _ => true,
        }
    }
}
