pub mod error;
pub mod registry;
pub mod state_machine;
pub mod types;

pub use error::CoreError;
pub use registry::{TokenInfo, TokenRegistry};
pub use state_machine::{SettlementEvent, SettlementState, SettlementStateMachine, SettlementStep};
pub use types::{parse_amount, PaymentProvider, SettlementKind, SettlementReference, TransactionResult};
