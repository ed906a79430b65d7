pub mod bindings;
pub mod client;
pub mod error;
pub mod signer;

pub use bindings::{FiatToken, LendingPool};
pub use client::{ChainClient, EvmChainClient};
pub use error::ChainError;
pub use signer::AdminSigner;
