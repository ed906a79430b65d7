pub mod client;
pub mod error;
pub mod resolver;
pub mod types;

pub use client::{BankGateway, PaystackClient, DEFAULT_BASE_URL};
pub use error::ProviderError;
pub use resolver::{reference_from_verification, PaystackResolver, ReferenceResolver};
pub use types::{Bank, PayoutRequest, ResolvedAccount, SettlementMetadata, TransferData, VerificationData};
