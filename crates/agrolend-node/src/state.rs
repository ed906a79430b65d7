//! Shared state for the HTTP API.

use std::sync::Arc;
use std::time::Instant;

use agrolend_chain::ChainClient;
use agrolend_core::TokenRegistry;
use agrolend_provider::BankGateway;
use agrolend_settlement::SettlementOrchestrator;

/// Everything a request handler needs, shared behind an `Arc`.
pub struct AppState {
    pub orchestrator: SettlementOrchestrator,
    pub chain: Arc<dyn ChainClient>,
    pub bank: Arc<dyn BankGateway>,
    pub registry: TokenRegistry,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(
        orchestrator: SettlementOrchestrator,
        chain: Arc<dyn ChainClient>,
        bank: Arc<dyn BankGateway>,
        registry: TokenRegistry,
    ) -> Self {
        Self {
            orchestrator,
            chain,
            bank,
            registry,
            start_time: Instant::now(),
        }
    }
}
