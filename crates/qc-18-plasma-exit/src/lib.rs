//! # QC-18 Plasma Exit Verification
//!
//! Rules that let users move a fungible token (UDT) into protocol
//! custody, claim it back through a disputable exit, and release it once
//! the dispute window has closed.
//!
//! **Subsystem ID:** 18
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Lifecycle
//!
//! | Phase | Consumes | Produces |
//! |-------|----------|----------|
//! | Deposit | free UDT | escrowed UDT + Deposited exit tokens |
//! | StartWithdraw | Deposited exit tokens | PendingWithdrawal exit tokens (+ refund) |
//! | Challenge | a PendingWithdrawal claim + fraud proof | the same claim, unchanged |
//! | Withdraw | a PendingWithdrawal claim + escrowed UDT | released UDT |
//!
//! Every phase is a pure predicate over one transaction: pass, or the
//! first violated rule as a `RejectionReason`.
//!
//! ## Security Notes
//!
//! - The dispute window extends while the chain is congested, so a
//!   claim cannot outrun challengers who could not get a block slot.
//! - Withdrawals must cite uncongested blocks after the claim started.
//! - Proof verification is injected. The default rejects everything;
//!   `PermissiveProofVerifier` exists for tests only and is compiled in
//!   only with the `test-utils` feature.
//!
//! ## Module Structure
//!
//! ```text
//! qc-18-plasma-exit/
//! ├── domain/          # cells, statuses, codec, config, errors, invariants
//! ├── algorithms/      # challenge period policy, congestion evidence
//! ├── ports/           # ExitValidationApi, LedgerView, ProofVerifier, ChallengeSettlement
//! ├── adapters/        # InMemoryLedger, placeholder verifiers, deferred settlement
//! ├── context.rs       # per-call ValidationContext
//! ├── reader.rs        # typed cell access
//! ├── phases/          # deposit, start_withdraw, challenge, withdraw
//! └── service.rs       # ExitTransactionValidator
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod context;
pub mod domain;
pub mod phases;
pub mod ports;
pub mod reader;
pub mod service;

// Re-exports
pub use adapters::{
    identity_from_label, DeferredSettlement, InMemoryLedger, LedgerCell, RejectingProofVerifier,
};
pub use algorithms::{
    count_congestion_evidence, invariant_congestion_evidence, ChallengePeriodPolicy,
};
pub use context::ValidationContext;
pub use domain::{
    BlockInfo, CellField, CellLocation, CodecError, ConfigError, ExitStatus, ExitTokenCell,
    ExitTokenCodec, ExitTokenData, FungibleTokenCell, Hash, LedgerError, Phase, PlasmaExitConfig,
    ProofKind, RejectionReason, ScriptCategory, Source, Transaction, BASE_CHALLENGE_PERIOD,
    BLOCK_MAX_CYCLES, CONGESTION_THRESHOLD_PERCENT, REQUIRED_EVIDENCE_BLOCKS,
};
pub use ports::{ChallengeSettlement, ExitValidationApi, InvocationArgs, LedgerView, ProofVerifier};
pub use reader::CellReader;
pub use service::{ExitTransactionValidator, ValidationRequest};

// Test utilities (requires `test-utils`)
#[cfg(feature = "test-utils")]
pub use adapters::PermissiveProofVerifier;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
