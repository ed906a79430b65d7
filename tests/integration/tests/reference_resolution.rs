//! Integration test: provider payloads flowing into registry validation.
//!
//! Verifies that a raw Paystack verification payload resolves into
//! settlement parameters the default token registry accepts, and that the
//! trust boundary holds: anything the registry does not know is rejected
//! before the orchestrator would touch the chain.

use agrolend_core::TokenRegistry;
use agrolend_provider::{reference_from_verification, VerificationData};

fn payload(pool: &str, fiat: &str, amount: serde_json::Value) -> VerificationData {
    serde_json::from_value(serde_json::json!({
        "status": "success",
        "reference": "PS_ref_100",
        "currency": "USD",
        "metadata": {
            "pool": pool,
            "fiat": fiat,
            "amount": amount,
            "behalfOf": "0x70997970C51812dc3A010C7d01b50e0d17dc79C8",
        }
    }))
    .expect("valid payload")
}

#[test]
fn test_provider_payload_accepted_by_registry() {
    let registry = TokenRegistry::default();
    let usdc = registry.by_symbol("USDC").unwrap();

    let data = payload(
        &usdc.pool.to_string(),
        &usdc.fiat.to_string(),
        serde_json::json!("1000000"),
    );
    let reference = reference_from_verification(&data).expect("resolves");
    assert!(registry.validate_reference(&reference).is_ok());
}

#[test]
fn test_numeric_amount_from_legacy_client_accepted() {
    let registry = TokenRegistry::default();
    let ngnc = registry.by_symbol("NGNC").unwrap();

    // The browser client historically serialized the amount as a number.
    let data = payload(
        &ngnc.pool.to_string(),
        &ngnc.fiat.to_string(),
        serde_json::json!(500000),
    );
    let reference = reference_from_verification(&data).expect("resolves");
    assert!(registry.validate_reference(&reference).is_ok());
}

#[test]
fn test_unknown_deployment_rejected_by_registry() {
    let registry = TokenRegistry::default();

    let data = payload(
        "0x0000000000000000000000000000000000000001",
        "0x0000000000000000000000000000000000000002",
        serde_json::json!("1000"),
    );
    // Resolution itself succeeds; the registry is the gate.
    let reference = reference_from_verification(&data).expect("resolves");
    assert!(registry.validate_reference(&reference).is_err());
}

#[test]
fn test_crossed_pool_and_token_rejected() {
    let registry = TokenRegistry::default();
    let usdc = registry.by_symbol("USDC").unwrap();
    let eurc = registry.by_symbol("EURC").unwrap();

    let data = payload(
        &eurc.pool.to_string(),
        &usdc.fiat.to_string(),
        serde_json::json!("1000"),
    );
    let reference = reference_from_verification(&data).expect("resolves");
    assert!(registry.validate_reference(&reference).is_err());
}
