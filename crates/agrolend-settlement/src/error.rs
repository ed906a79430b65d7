/// Settlement-layer errors.
///
/// Business failures (invalid reference, failed chain call, duplicate
/// settlement) are not errors — they travel as `TransactionResult`. Only
/// infrastructure faults end up here.
#[derive(Debug, thiserror::Error)]
pub enum SettlementError {
    #[error("reference store error: {0}")]
    Store(String),

    #[error("internal error: {0}")]
    Internal(String),
}
