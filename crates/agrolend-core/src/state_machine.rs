use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The on-chain steps a settlement moves through after resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettlementStep {
    /// Resolving the payment reference with the provider.
    Resolve,
    /// Minting fiat tokens to the admin address.
    Mint,
    /// Approving the pool to pull the minted amount.
    Approve,
    /// The final supply or repay call on the pool.
    Settle,
}

impl fmt::Display for SettlementStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolve => write!(f, "resolve"),
            Self::Mint => write!(f, "mint"),
            Self::Approve => write!(f, "approve"),
            Self::Settle => write!(f, "settle"),
        }
    }
}

/// The settlement lifecycle.
///
/// Linear, no back-edges: each step either advances or terminates the
/// settlement with an explicit failed step and reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettlementState {
    /// Settlement attempt created; nothing resolved yet.
    Started,
    /// Reference resolved and validated against the registry.
    Resolved,
    /// Fiat minted to the admin address.
    Minted,
    /// Pool approved to pull the minted amount.
    Approved,
    /// Final pool call confirmed — settlement complete.
    Done,
    /// Terminal failure at a specific step.
    Failed { step: SettlementStep, reason: String },
}

impl SettlementState {
    /// Whether this is a terminal state.
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Done | Self::Failed { .. })
    }
}

impl fmt::Display for SettlementState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Started => write!(f, "Started"),
            Self::Resolved => write!(f, "Resolved"),
            Self::Minted => write!(f, "Minted"),
            Self::Approved => write!(f, "Approved"),
            Self::Done => write!(f, "Done"),
            Self::Failed { step, reason } => write!(f, "Failed({step}: {reason})"),
        }
    }
}

/// Events that advance a settlement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettlementEvent {
    ReferenceResolved,
    MintConfirmed,
    ApproveConfirmed,
    SettleConfirmed,
    StepFailed { step: SettlementStep, reason: String },
}

impl fmt::Display for SettlementEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReferenceResolved => write!(f, "ReferenceResolved"),
            Self::MintConfirmed => write!(f, "MintConfirmed"),
            Self::ApproveConfirmed => write!(f, "ApproveConfirmed"),
            Self::SettleConfirmed => write!(f, "SettleConfirmed"),
            Self::StepFailed { step, .. } => write!(f, "StepFailed({step})"),
        }
    }
}

/// Drives settlement state transitions.
///
/// Valid transitions:
/// - Started  → Resolved (ReferenceResolved)
/// - Resolved → Minted   (MintConfirmed)
/// - Minted   → Approved (ApproveConfirmed)
/// - Approved → Done     (SettleConfirmed)
/// - Started  → Failed   (StepFailed at resolve)
/// - Resolved → Failed   (StepFailed at mint)
/// - Minted   → Failed   (StepFailed at approve)
/// - Approved → Failed   (StepFailed at settle)
pub struct SettlementStateMachine;

impl SettlementStateMachine {
    /// Attempt a transition; invalid ones are rejected, including any event
    /// against a terminal state and failures reported for the wrong step.
    pub fn transition(
        current: &SettlementState,
        event: SettlementEvent,
    ) -> Result<SettlementState, CoreError> {
        let new_state = match (current, &event) {
            (SettlementState::Started, SettlementEvent::ReferenceResolved) => {
                SettlementState::Resolved
            }
            (SettlementState::Resolved, SettlementEvent::MintConfirmed) => SettlementState::Minted,
            (SettlementState::Minted, SettlementEvent::ApproveConfirmed) => {
                SettlementState::Approved
            }
            (SettlementState::Approved, SettlementEvent::SettleConfirmed) => SettlementState::Done,

            (SettlementState::Started, SettlementEvent::StepFailed { step, reason })
                if *step == SettlementStep::Resolve =>
            {
                SettlementState::Failed {
                    step: *step,
                    reason: reason.clone(),
                }
            }
            (SettlementState::Resolved, SettlementEvent::StepFailed { step, reason })
                if *step == SettlementStep::Mint =>
            {
                SettlementState::Failed {
                    step: *step,
                    reason: reason.clone(),
                }
            }
            (SettlementState::Minted, SettlementEvent::StepFailed { step, reason })
                if *step == SettlementStep::Approve =>
            {
                SettlementState::Failed {
                    step: *step,
                    reason: reason.clone(),
                }
            }
            (SettlementState::Approved, SettlementEvent::StepFailed { step, reason })
                if *step == SettlementStep::Settle =>
            {
                SettlementState::Failed {
                    step: *step,
                    reason: reason.clone(),
                }
            }

            _ => {
                return Err(CoreError::InvalidStateTransition {
                    from: current.to_string(),
                    event: event.to_string(),
                });
            }
        };

        tracing::debug!(
            from = %current,
            to = %new_state,
            event = %event,
            "settlement state transition"
        );

        Ok(new_state)
    }
}
