use alloy::primitives::{address, Address};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::SettlementReference;

/// A fiat token and its associated lending pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    /// Currency symbol (e.g. "USDC").
    pub symbol: String,
    /// Fiat token contract address.
    pub fiat: Address,
    /// Lending pool contract address paired with the token.
    pub pool: Address,
    /// Token decimal precision.
    pub decimals: u8,
}

/// Static mapping from currency symbol to fiat token and pool addresses.
///
/// Configuration data — never mutated at runtime. Settlement parameters
/// resolved from a payment provider are only accepted when both addresses
/// appear here and are correctly paired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRegistry {
    tokens: Vec<TokenInfo>,
}

impl TokenRegistry {
    pub fn new(tokens: Vec<TokenInfo>) -> Self {
        Self { tokens }
    }

    /// Look up a token by currency symbol.
    pub fn by_symbol(&self, symbol: &str) -> Option<&TokenInfo> {
        self.tokens.iter().find(|t| t.symbol == symbol)
    }

    /// Look up a token by its fiat contract address.
    pub fn by_fiat(&self, fiat: Address) -> Option<&TokenInfo> {
        self.tokens.iter().find(|t| t.fiat == fiat)
    }

    /// All registered currency symbols.
    pub fn symbols(&self) -> Vec<&str> {
        self.tokens.iter().map(|t| t.symbol.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Validate that a resolved reference targets a known fiat token and the
    /// pool actually paired with it. The caller must never cross a token with
    /// another token's pool.
    pub fn validate_reference(&self, reference: &SettlementReference) -> Result<(), CoreError> {
        let token = self
            .by_fiat(reference.fiat)
            .ok_or_else(|| CoreError::UnknownToken(reference.fiat.to_string()))?;
        if token.pool != reference.pool {
            return Err(CoreError::PoolMismatch {
                fiat: reference.fiat.to_string(),
                pool: reference.pool.to_string(),
            });
        }
        Ok(())
    }
}

impl Default for TokenRegistry {
    /// The testnet deployment the platform currently runs against.
    fn default() -> Self {
        Self::new(vec![
            TokenInfo {
                symbol: "USDC".into(),
                fiat: address!("2de3704dd711dd0dd2fe884c839cc4d4e7dedc58"),
                pool: address!("8d6883aab2dc30dc515017401c66db0db3fd93ef"),
                decimals: 6,
            },
            TokenInfo {
                symbol: "EURC".into(),
                fiat: address!("f36184fec60231a1224de879374bf5069a1fcb0b"),
                pool: address!("cf934d7d3ceda918ee5a581b96aef09028065469"),
                decimals: 6,
            },
            TokenInfo {
                symbol: "NGNC".into(),
                fiat: address!("fb17e5e510a72885b8b7ba30ce33b8ccdaba5dbe"),
                pool: address!("12b1639724058f953fa1f5b108402c83aa58d0fd"),
                decimals: 2,
            },
        ])
    }
}
