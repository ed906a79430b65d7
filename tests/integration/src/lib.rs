//! Shared test doubles for the integration tests.
//!
//! `ScriptedChain` stands in for the EVM client: each primitive returns a
//! pre-scripted `TransactionResult` and records how it was called, so tests
//! can assert on call order, counts, and arguments without a chain.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use alloy::primitives::{address, Address, U256};
use async_trait::async_trait;

use agrolend_chain::ChainClient;
use agrolend_core::{
    PaymentProvider, SettlementReference, TokenRegistry, TransactionResult,
};
use agrolend_provider::ReferenceResolver;

/// The anvil dev account the tests treat as the admin signer.
pub const ADMIN: Address = address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266");
/// An end-user address settlements are credited to.
pub const USER: Address = address!("70997970c51812dc3a010c7d01b50e0d17dc79c8");

/// One scripted chain primitive: a canned result plus call accounting.
pub struct ScriptedOp {
    result: Mutex<TransactionResult>,
    calls: AtomicUsize,
    last_args: Mutex<Option<(Address, U256, Address)>>,
}

impl ScriptedOp {
    pub fn confirming(tag: &str) -> Self {
        Self {
            result: Mutex::new(TransactionResult::confirmed(format!("0x{tag}"))),
            calls: AtomicUsize::new(0),
            last_args: Mutex::new(None),
        }
    }

    /// Replace the scripted result, e.g. to make a later attempt succeed.
    pub fn set_result(&self, result: TransactionResult) {
        *self.result.lock().unwrap() = result;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_args(&self) -> Option<(Address, U256, Address)> {
        *self.last_args.lock().unwrap()
    }

    fn invoke(&self, a: Address, b: U256, c: Address) -> TransactionResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_args.lock().unwrap() = Some((a, b, c));
        self.result.lock().unwrap().clone()
    }
}

/// `ChainClient` double with one `ScriptedOp` per primitive.
pub struct ScriptedChain {
    pub mint: ScriptedOp,
    pub burn: ScriptedOp,
    pub approve: ScriptedOp,
    pub supply: ScriptedOp,
    pub repay: ScriptedOp,
}

impl ScriptedChain {
    pub fn confirming() -> Self {
        Self {
            mint: ScriptedOp::confirming("mint"),
            burn: ScriptedOp::confirming("burn"),
            approve: ScriptedOp::confirming("approve"),
            supply: ScriptedOp::confirming("supply"),
            repay: ScriptedOp::confirming("repay"),
        }
    }
}

impl Default for ScriptedChain {
    fn default() -> Self {
        Self::confirming()
    }
}

#[async_trait]
impl ChainClient for ScriptedChain {
    fn admin_address(&self) -> Address {
        ADMIN
    }

    async fn mint(&self, fiat: Address, amount: U256, to: Address) -> TransactionResult {
        self.mint.invoke(fiat, amount, to)
    }

    async fn burn(&self, fiat: Address, amount: U256, from: Address) -> TransactionResult {
        self.burn.invoke(fiat, amount, from)
    }

    async fn approve(&self, fiat: Address, spender: Address, amount: U256) -> TransactionResult {
        self.approve.invoke(fiat, amount, spender)
    }

    async fn supply(&self, pool: Address, amount: U256, behalf_of: Address) -> TransactionResult {
        self.supply.invoke(pool, amount, behalf_of)
    }

    async fn repay(&self, pool: Address, amount: U256, behalf_of: Address) -> TransactionResult {
        self.repay.invoke(pool, amount, behalf_of)
    }
}

/// Resolver double returning a fixed `SettlementReference` for any input.
pub struct StaticResolver {
    pub resolved: Option<SettlementReference>,
}

#[async_trait]
impl ReferenceResolver for StaticResolver {
    async fn resolve(
        &self,
        _reference: &str,
        _provider: PaymentProvider,
    ) -> Option<SettlementReference> {
        self.resolved.clone()
    }
}

/// A valid USDC settlement reference against the default registry.
pub fn usdc_reference(amount: u64) -> SettlementReference {
    let registry = TokenRegistry::default();
    let token = registry
        .by_symbol("USDC")
        .expect("default registry has USDC")
        .clone();
    SettlementReference {
        pool: token.pool,
        fiat: token.fiat,
        amount: U256::from(amount),
        behalf_of: USER,
    }
}
