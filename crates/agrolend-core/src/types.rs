use std::fmt;

use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Outcome of a chain-mutating operation.
///
/// `success = true` implies `tx_id` holds the hash of a mined, non-reverted
/// transaction. A reverted transaction still carries its hash so operators
/// can inspect the spent gas, but is never reported as success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_id: Option<String>,
    pub message: String,
}

impl TransactionResult {
    /// A mined, non-reverted transaction.
    pub fn confirmed(tx_id: impl Into<String>) -> Self {
        Self {
            success: true,
            tx_id: Some(tx_id.into()),
            message: "Transaction confirmed.".into(),
        }
    }

    /// A mined transaction whose execution reverted.
    pub fn reverted(tx_id: impl Into<String>) -> Self {
        Self {
            success: false,
            tx_id: Some(tx_id.into()),
            message: "Transaction was reverted".into(),
        }
    }

    /// A failure before any transaction was mined (submission error,
    /// validation error, business rejection). Carries no hash.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            tx_id: None,
            message: message.into(),
        }
    }
}

/// Supported payment providers for off-chain fiat collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentProvider {
    Paystack,
}

impl fmt::Display for PaymentProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Paystack => write!(f, "paystack"),
        }
    }
}

/// Which pool entry point a settlement targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettlementKind {
    /// Deposit liquidity into the pool on the payer's behalf.
    Supply,
    /// Repay an outstanding loan on the payer's behalf.
    Repay,
}

impl fmt::Display for SettlementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Supply => write!(f, "supply"),
            Self::Repay => write!(f, "repay"),
        }
    }
}

/// Settlement parameters extracted from a confirmed provider payment.
///
/// Immutable once resolved; consumed exactly once per settlement attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementReference {
    /// Lending pool contract receiving the final supply/repay call.
    pub pool: Address,
    /// Fiat token contract to mint and approve.
    pub fiat: Address,
    /// Amount in the fiat token's smallest unit.
    pub amount: U256,
    /// The end user credited by the pool call (not the admin address).
    pub behalf_of: Address,
}

/// Parse an amount given as a positive decimal integer string in the
/// token's smallest unit.
pub fn parse_amount(raw: &str) -> Result<U256, CoreError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoreError::InvalidAmount(format!(
            "expected a decimal integer string, got {raw:?}"
        )));
    }
    let amount = U256::from_str_radix(raw, 10)
        .map_err(|e| CoreError::InvalidAmount(format!("{raw:?}: {e}")))?;
    if amount.is_zero() {
        return Err(CoreError::InvalidAmount("amount must be positive".into()));
    }
    Ok(amount)
}
