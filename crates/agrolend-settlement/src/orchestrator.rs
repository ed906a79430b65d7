use std::sync::Arc;

use uuid::Uuid;

use agrolend_chain::ChainClient;
use agrolend_core::{
    CoreError, PaymentProvider, SettlementEvent, SettlementKind, SettlementReference,
    SettlementState, SettlementStateMachine, SettlementStep, TokenRegistry, TransactionResult,
};
use agrolend_provider::ReferenceResolver;

use crate::error::SettlementError;
use crate::idempotency::ReferenceStore;
use crate::types::SettlementRecord;

/// Executes the fixed mint → approve → supply/repay sequence that realizes
/// a confirmed off-chain payment on chain.
///
/// The sequence is linear with no back-edges: the first failing step
/// terminates the settlement and its `TransactionResult` is surfaced to the
/// caller unchanged. No step is ever retried. When a step fails after a
/// successful mint, the orchestrator attempts a compensating burn so the
/// payment can be retried once the cause is fixed.
pub struct SettlementOrchestrator {
    chain: Arc<dyn ChainClient>,
    resolver: Arc<dyn ReferenceResolver>,
    store: Arc<dyn ReferenceStore>,
    registry: TokenRegistry,
}

impl SettlementOrchestrator {
    pub fn new(
        chain: Arc<dyn ChainClient>,
        resolver: Arc<dyn ReferenceResolver>,
        store: Arc<dyn ReferenceStore>,
        registry: TokenRegistry,
    ) -> Self {
        Self {
            chain,
            resolver,
            store,
            registry,
        }
    }

    /// Settle a confirmed payment as a pool supply on the payer's behalf.
    pub async fn supply_on_behalf(
        &self,
        reference: &str,
        provider: PaymentProvider,
    ) -> Result<TransactionResult, SettlementError> {
        self.settle(reference, provider, SettlementKind::Supply)
            .await
    }

    /// Settle a confirmed payment as a loan repayment on the payer's behalf.
    pub async fn repay_on_behalf(
        &self,
        reference: &str,
        provider: PaymentProvider,
    ) -> Result<TransactionResult, SettlementError> {
        self.settle(reference, provider, SettlementKind::Repay)
            .await
    }

    /// The last recorded outcome for a reference, if any.
    pub fn outcome(&self, reference: &str) -> Result<Option<SettlementRecord>, SettlementError> {
        self.store.get(reference)
    }

    async fn settle(
        &self,
        reference: &str,
        provider: PaymentProvider,
        kind: SettlementKind,
    ) -> Result<TransactionResult, SettlementError> {
        let attempt_id = Uuid::now_v7();
        tracing::info!(%attempt_id, reference, %provider, %kind, "settlement started");

        let state = SettlementState::Started;

        // RESOLVE_REFERENCE — no chain mutation has happened yet, so a
        // rejection here is fully safe.
        let Some(resolved) = self.resolver.resolve(reference, provider).await else {
            tracing::warn!(%attempt_id, reference, "reference did not resolve");
            return Ok(TransactionResult::failure("Invalid reference."));
        };

        if let Err(e) = self.registry.validate_reference(&resolved) {
            tracing::warn!(%attempt_id, reference, error = %e, "registry validation failed");
            let message = match e {
                CoreError::UnknownToken(_) => "Unknown fiat token.",
                CoreError::PoolMismatch { .. } => "Pool does not match fiat token.",
                _ => "Invalid reference.",
            };
            return Ok(TransactionResult::failure(message));
        }

        let state = advance(&state, SettlementEvent::ReferenceResolved)?;

        // Claim the reference before the first chain mutation. Exactly one
        // concurrent attempt per reference gets past this point.
        if !self.store.claim(reference)? {
            tracing::warn!(%attempt_id, reference, "duplicate settlement attempt rejected");
            return Ok(TransactionResult::failure("Reference already settled."));
        }

        let admin = self.chain.admin_address();

        // MINT — the bridge fronts the fiat liquidity to the admin address
        // before forwarding it into the pool on the user's behalf.
        let mint = self
            .chain
            .mint(resolved.fiat, resolved.amount, admin)
            .await;
        if !mint.success {
            let state = advance(
                &state,
                SettlementEvent::StepFailed {
                    step: SettlementStep::Mint,
                    reason: mint.message.clone(),
                },
            )?;
            // Nothing was minted, so the chain is already unwound.
            self.finish(reference, kind, state, mint.tx_id.clone(), true)?;
            return Ok(mint);
        }
        let state = advance(&state, SettlementEvent::MintConfirmed)?;

        // APPROVE — the admin authorizes the pool to pull the minted amount.
        let approve = self
            .chain
            .approve(resolved.fiat, resolved.pool, resolved.amount)
            .await;
        if !approve.success {
            let compensated = self.compensate(&resolved, reference, admin).await;
            let state = advance(
                &state,
                SettlementEvent::StepFailed {
                    step: SettlementStep::Approve,
                    reason: approve.message.clone(),
                },
            )?;
            self.finish(reference, kind, state, approve.tx_id.clone(), compensated)?;
            return Ok(approve);
        }
        let state = advance(&state, SettlementEvent::ApproveConfirmed)?;

        // SUPPLY | REPAY — credited to the end user, not the admin.
        let settled = match kind {
            SettlementKind::Supply => {
                self.chain
                    .supply(resolved.pool, resolved.amount, resolved.behalf_of)
                    .await
            }
            SettlementKind::Repay => {
                self.chain
                    .repay(resolved.pool, resolved.amount, resolved.behalf_of)
                    .await
            }
        };
        if !settled.success {
            let compensated = self.compensate(&resolved, reference, admin).await;
            let state = advance(
                &state,
                SettlementEvent::StepFailed {
                    step: SettlementStep::Settle,
                    reason: settled.message.clone(),
                },
            )?;
            self.finish(reference, kind, state, settled.tx_id.clone(), compensated)?;
            return Ok(settled);
        }
        let state = advance(&state, SettlementEvent::SettleConfirmed)?;

        self.finish(reference, kind, state, settled.tx_id.clone(), false)?;
        tracing::info!(
            %attempt_id,
            reference,
            tx_id = settled.tx_id.as_deref().unwrap_or(""),
            "settlement complete"
        );
        Ok(settled)
    }

    /// Burn the minted amount back out of the admin address after a
    /// mid-sequence failure. Best effort: a failed burn leaves the reference
    /// permanently blocked for manual follow-up.
    async fn compensate(
        &self,
        resolved: &SettlementReference,
        reference: &str,
        admin: alloy::primitives::Address,
    ) -> bool {
        let burn = self
            .chain
            .burn(resolved.fiat, resolved.amount, admin)
            .await;
        if burn.success {
            tracing::info!(
                reference,
                tx_id = burn.tx_id.as_deref().unwrap_or(""),
                "compensating burn confirmed"
            );
        } else {
            tracing::error!(
                reference,
                message = %burn.message,
                "compensating burn failed; minted funds remain with admin"
            );
        }
        burn.success
    }

    fn finish(
        &self,
        reference: &str,
        kind: SettlementKind,
        state: SettlementState,
        tx_id: Option<String>,
        compensated: bool,
    ) -> Result<(), SettlementError> {
        let record = SettlementRecord::new(reference, kind, state, tx_id, compensated);
        tracing::info!(reference, state = %record.state, compensated, "settlement recorded");
        self.store.record(&record)
    }
}

fn advance(
    state: &SettlementState,
    event: SettlementEvent,
) -> Result<SettlementState, SettlementError> {
    SettlementStateMachine::transition(state, event)
        .map_err(|e| SettlementError::Internal(e.to_string()))
}
