/// Core errors shared across the settlement bridge.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid settlement transition from {from} on {event}")]
    InvalidStateTransition { from: String, event: String },

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("unknown fiat token: {0}")]
    UnknownToken(String),

    #[error("pool {pool} is not paired with fiat token {fiat}")]
    PoolMismatch { fiat: String, pool: String },
}
