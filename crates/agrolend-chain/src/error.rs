/// Chain-client construction errors.
///
/// Runtime submission failures never surface as errors — they are converted
/// into `TransactionResult` so a single chain call can never take down a
/// request handler.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    #[error("invalid admin private key: {0}")]
    InvalidKey(String),

    #[error("invalid RPC URL: {0}")]
    InvalidRpcUrl(String),
}
