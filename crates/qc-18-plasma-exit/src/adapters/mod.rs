//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements outbound port traits: an in-memory ledger, placeholder
//! proof verifiers and the deferred challenge settlement.

mod in_memory_ledger;
mod proof_verifier;
mod settlement;

pub use in_memory_ledger::{identity_from_label, InMemoryLedger, LedgerCell};
pub use proof_verifier::RejectingProofVerifier;
#[cfg(any(test, feature = "test-utils"))]
pub use proof_verifier::PermissiveProofVerifier;
pub use settlement::DeferredSettlement;
