use std::time::Duration;

use alloy::contract::Error as ContractError;
use alloy::network::Ethereum;
use alloy::primitives::{Address, U256};
use alloy::providers::{DynProvider, PendingTransactionBuilder, Provider, ProviderBuilder};
use async_trait::async_trait;

use agrolend_core::TransactionResult;

use crate::bindings::{FiatToken, LendingPool};
use crate::error::ChainError;
use crate::signer::AdminSigner;

/// Submits admin-signed state-changing calls and awaits confirmation.
///
/// Every method returns a `TransactionResult` — submission errors, receipt
/// timeouts, and reverts are all folded into it. No call is ever retried
/// here; retry policy belongs to the caller.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// The administrative address transactions are signed with.
    fn admin_address(&self) -> Address;

    /// Mint `amount` of the fiat token to `to`.
    async fn mint(&self, fiat: Address, amount: U256, to: Address) -> TransactionResult;

    /// Burn `amount` of the fiat token held by `from`.
    async fn burn(&self, fiat: Address, amount: U256, from: Address) -> TransactionResult;

    /// Approve `spender` to pull `amount` of the fiat token from the admin.
    async fn approve(&self, fiat: Address, spender: Address, amount: U256) -> TransactionResult;

    /// Supply `amount` into the pool, credited to `behalf_of`.
    async fn supply(&self, pool: Address, amount: U256, behalf_of: Address) -> TransactionResult;

    /// Repay `amount` of `behalf_of`'s loan in the pool.
    async fn repay(&self, pool: Address, amount: U256, behalf_of: Address) -> TransactionResult;
}

/// `ChainClient` backed by an Ethereum-compatible JSON-RPC endpoint.
///
/// Nonce and gas management are delegated to the provider's filler stack;
/// concurrent submissions from the admin address may race at the nonce layer.
pub struct EvmChainClient {
    provider: DynProvider,
    admin: Address,
    receipt_timeout: Duration,
    confirmations: u64,
}

impl EvmChainClient {
    /// Build a client over an HTTP JSON-RPC endpoint, signing with the
    /// injected admin signer.
    pub fn connect(
        rpc_url: &str,
        signer: AdminSigner,
        receipt_timeout: Duration,
        confirmations: u64,
    ) -> Result<Self, ChainError> {
        let url: reqwest::Url = rpc_url
            .parse()
            .map_err(|e| ChainError::InvalidRpcUrl(format!("{rpc_url}: {e}")))?;
        let admin = signer.address();
        let provider = ProviderBuilder::new()
            .wallet(signer.into_wallet())
            .connect_http(url)
            .erased();
        tracing::info!(rpc_url, %admin, "chain client connected");
        Ok(Self {
            provider,
            admin,
            receipt_timeout,
            confirmations,
        })
    }

    /// Await the receipt for a submitted call and fold the outcome into a
    /// `TransactionResult`.
    async fn confirm(
        &self,
        op: &'static str,
        sent: Result<PendingTransactionBuilder<Ethereum>, ContractError>,
    ) -> TransactionResult {
        let pending = match sent {
            Ok(pending) => pending,
            Err(e) => {
                tracing::warn!(op, error = %e, "transaction submission failed");
                return TransactionResult::failure(format!("transaction submission failed: {e}"));
            }
        };

        let receipt = match pending
            .with_required_confirmations(self.confirmations)
            .with_timeout(Some(self.receipt_timeout))
            .get_receipt()
            .await
        {
            Ok(receipt) => receipt,
            Err(e) => {
                tracing::warn!(op, error = %e, "receipt wait failed");
                return TransactionResult::failure(format!("transaction confirmation failed: {e}"));
            }
        };

        if receipt.status() {
            tracing::info!(op, tx_id = %receipt.transaction_hash, "transaction confirmed");
            TransactionResult::confirmed(receipt.transaction_hash.to_string())
        } else {
            tracing::warn!(op, tx_id = %receipt.transaction_hash, "transaction reverted");
            TransactionResult::reverted(receipt.transaction_hash.to_string())
        }
    }
}

#[async_trait]
impl ChainClient for EvmChainClient {
    fn admin_address(&self) -> Address {
        self.admin
    }

    async fn mint(&self, fiat: Address, amount: U256, to: Address) -> TransactionResult {
        tracing::info!(%fiat, %amount, %to, "calling mint");
        let token = FiatToken::new(fiat, self.provider.clone());
        self.confirm("mint", token.mint(amount, to).send().await)
            .await
    }

    async fn burn(&self, fiat: Address, amount: U256, from: Address) -> TransactionResult {
        tracing::info!(%fiat, %amount, %from, "calling burn");
        let token = FiatToken::new(fiat, self.provider.clone());
        self.confirm("burn", token.burn(amount, from).send().await)
            .await
    }

    async fn approve(&self, fiat: Address, spender: Address, amount: U256) -> TransactionResult {
        tracing::info!(%fiat, %spender, %amount, "calling approve");
        let token = FiatToken::new(fiat, self.provider.clone());
        self.confirm("approve", token.approve(spender, amount).send().await)
            .await
    }

    async fn supply(&self, pool: Address, amount: U256, behalf_of: Address) -> TransactionResult {
        tracing::info!(%pool, %amount, %behalf_of, "calling supply");
        let contract = LendingPool::new(pool, self.provider.clone());
        self.confirm("supply", contract.supply(amount, behalf_of).send().await)
            .await
    }

    async fn repay(&self, pool: Address, amount: U256, behalf_of: Address) -> TransactionResult {
        tracing::info!(%pool, %amount, %behalf_of, "calling repay");
        let contract = LendingPool::new(pool, self.provider.clone());
        self.confirm("repay", contract.repay(amount, behalf_of).send().await)
            .await
    }
}
