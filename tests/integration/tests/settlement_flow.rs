//! Integration test: Full settlement lifecycle across crates.
//!
//! Drives the orchestrator from agrolend-settlement against the shared
//! scripted chain double, the default token registry from agrolend-core,
//! and the in-memory reference store.

use std::sync::Arc;

use alloy::primitives::U256;

use agrolend_core::{PaymentProvider, SettlementKind, SettlementState, TokenRegistry};
use agrolend_integration_tests::{usdc_reference, ScriptedChain, StaticResolver, ADMIN, USER};
use agrolend_settlement::{MemoryReferenceStore, ReferenceStore, SettlementOrchestrator};

fn orchestrator(
    chain: Arc<ScriptedChain>,
    resolved: Option<agrolend_core::SettlementReference>,
    store: Arc<dyn ReferenceStore>,
) -> SettlementOrchestrator {
    SettlementOrchestrator::new(
        chain,
        Arc::new(StaticResolver { resolved }),
        store,
        TokenRegistry::default(),
    )
}

// =========================================================================
// Full pipeline: resolve → mint → approve → supply/repay
// =========================================================================

#[tokio::test]
async fn test_supply_settlement_end_to_end() {
    let chain = Arc::new(ScriptedChain::confirming());
    let reference = usdc_reference(2_500_000);
    let store: Arc<dyn ReferenceStore> = Arc::new(MemoryReferenceStore::new());
    let orch = orchestrator(chain.clone(), Some(reference.clone()), store.clone());

    let result = orch
        .supply_on_behalf("PS_ref_001", PaymentProvider::Paystack)
        .await
        .expect("no infrastructure fault");

    assert!(result.success);
    assert_eq!(result.tx_id.as_deref(), Some("0xsupply"));

    // Mint was fronted to the admin address.
    assert_eq!(
        chain.mint.last_args(),
        Some((reference.fiat, reference.amount, ADMIN))
    );
    // The pool was approved for exactly the minted amount.
    assert_eq!(
        chain.approve.last_args(),
        Some((reference.fiat, reference.amount, reference.pool))
    );
    // The final pool call credits the end user with the full amount.
    assert_eq!(
        chain.supply.last_args(),
        Some((reference.pool, U256::from(2_500_000u64), USER))
    );
    assert_eq!(chain.burn.calls(), 0);

    // The durable record marks the settlement done.
    let record = store.get("PS_ref_001").unwrap().expect("record written");
    assert_eq!(record.state, SettlementState::Done);
    assert_eq!(record.kind, SettlementKind::Supply);
    assert_eq!(record.tx_id.as_deref(), Some("0xsupply"));
}

#[tokio::test]
async fn test_repay_settlement_end_to_end() {
    let chain = Arc::new(ScriptedChain::confirming());
    let store: Arc<dyn ReferenceStore> = Arc::new(MemoryReferenceStore::new());
    let orch = orchestrator(chain.clone(), Some(usdc_reference(40_000)), store.clone());

    let result = orch
        .repay_on_behalf("PS_ref_002", PaymentProvider::Paystack)
        .await
        .unwrap();

    assert!(result.success);
    assert_eq!(chain.repay.calls(), 1);
    assert_eq!(chain.supply.calls(), 0);
    assert_eq!(
        store.get("PS_ref_002").unwrap().unwrap().kind,
        SettlementKind::Repay
    );
}

// =========================================================================
// Failure propagation and compensation across the pipeline
// =========================================================================

#[tokio::test]
async fn test_reverted_settle_step_compensates_and_allows_retry() {
    let chain = Arc::new(ScriptedChain::confirming());
    chain
        .supply
        .set_result(agrolend_core::TransactionResult::reverted("0xdead"));
    let store: Arc<dyn ReferenceStore> = Arc::new(MemoryReferenceStore::new());
    let orch = orchestrator(chain.clone(), Some(usdc_reference(100)), store.clone());

    let result = orch
        .supply_on_behalf("PS_ref_003", PaymentProvider::Paystack)
        .await
        .unwrap();

    assert!(!result.success);
    assert_eq!(result.message, "Transaction was reverted");
    assert_eq!(result.tx_id.as_deref(), Some("0xdead"));
    // Submitted once, never resubmitted, minted amount burned back.
    assert_eq!(chain.supply.calls(), 1);
    assert_eq!(chain.burn.calls(), 1);
    assert!(store.get("PS_ref_003").unwrap().unwrap().compensated);

    // The pool comes back; the same payment can now settle.
    chain
        .supply
        .set_result(agrolend_core::TransactionResult::confirmed("0xsupply2"));
    let result = orch
        .supply_on_behalf("PS_ref_003", PaymentProvider::Paystack)
        .await
        .unwrap();
    assert!(result.success);
    assert_eq!(result.tx_id.as_deref(), Some("0xsupply2"));
    assert_eq!(chain.mint.calls(), 2);
}

#[tokio::test]
async fn test_settled_reference_stays_settled() {
    let chain = Arc::new(ScriptedChain::confirming());
    let store: Arc<dyn ReferenceStore> = Arc::new(MemoryReferenceStore::new());
    let orch = orchestrator(chain.clone(), Some(usdc_reference(100)), store);

    let first = orch
        .supply_on_behalf("PS_ref_004", PaymentProvider::Paystack)
        .await
        .unwrap();
    assert!(first.success);

    // Replay of the same payment, even as a repay, changes nothing on chain.
    let replay = orch
        .repay_on_behalf("PS_ref_004", PaymentProvider::Paystack)
        .await
        .unwrap();
    assert!(!replay.success);
    assert_eq!(replay.message, "Reference already settled.");
    assert_eq!(chain.mint.calls(), 1);
    assert_eq!(chain.repay.calls(), 0);
}

// =========================================================================
// Concurrency: duplicate webhook delivery
// =========================================================================

#[tokio::test]
async fn test_concurrent_duplicate_requests_mint_once() {
    let chain = Arc::new(ScriptedChain::confirming());
    let orch = Arc::new(orchestrator(
        chain.clone(),
        Some(usdc_reference(100)),
        Arc::new(MemoryReferenceStore::new()),
    ));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let orch = orch.clone();
        handles.push(tokio::spawn(async move {
            orch.supply_on_behalf("PS_ref_005", PaymentProvider::Paystack)
                .await
                .unwrap()
        }));
    }

    let mut successes = 0;
    for handle in handles {
        if handle.await.unwrap().success {
            successes += 1;
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(chain.mint.calls(), 1);
    assert_eq!(chain.supply.calls(), 1);
}
