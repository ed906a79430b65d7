use std::sync::Arc;

use alloy::primitives::Address;
use async_trait::async_trait;

use agrolend_core::{parse_amount, PaymentProvider, SettlementReference};

use crate::client::PaystackClient;
use crate::types::VerificationData;

/// Translates a payment-provider reference into settlement parameters.
///
/// `None` is a definitive "do not settle" signal: unverified payment,
/// malformed metadata, or a failed provider call. Resolution is never
/// retried here.
#[async_trait]
pub trait ReferenceResolver: Send + Sync {
    async fn resolve(
        &self,
        reference: &str,
        provider: PaymentProvider,
    ) -> Option<SettlementReference>;
}

/// Resolver backed by the Paystack verification endpoint.
pub struct PaystackResolver {
    client: Arc<PaystackClient>,
}

impl PaystackResolver {
    pub fn new(client: Arc<PaystackClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ReferenceResolver for PaystackResolver {
    async fn resolve(
        &self,
        reference: &str,
        provider: PaymentProvider,
    ) -> Option<SettlementReference> {
        match provider {
            PaymentProvider::Paystack => {}
        }

        let data = match self.client.verify_transaction(reference).await {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(reference, error = %e, "reference verification failed");
                return None;
            }
        };

        let resolved = reference_from_verification(&data);
        if resolved.is_none() {
            tracing::warn!(
                reference,
                status = %data.status,
                "verified payload did not yield settlement parameters"
            );
        }
        resolved
    }
}

/// Extract a `SettlementReference` from a verification payload.
///
/// Pure mapping: a fixed payload always yields the same result. Requires
/// provider status "success", complete metadata, parseable addresses, and a
/// positive integer amount.
pub fn reference_from_verification(data: &VerificationData) -> Option<SettlementReference> {
    if data.status != "success" {
        return None;
    }
    let metadata = data.metadata.as_ref()?;
    let pool: Address = metadata.pool.parse().ok()?;
    let fiat: Address = metadata.fiat.parse().ok()?;
    let behalf_of: Address = metadata.behalf_of.parse().ok()?;
    let amount = parse_amount(&metadata.amount).ok()?;
    Some(SettlementReference {
        pool,
        fiat,
        amount,
        behalf_of,
    })
}
