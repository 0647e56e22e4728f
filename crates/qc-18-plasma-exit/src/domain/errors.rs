//! # Domain Errors
//!
//! Rejection reasons for exit transactions, plus the ledger and
//! configuration errors that can accompany them.
//!
//! Every check is fail-fast: the first violated rule aborts validation
//! with exactly one `RejectionReason`.

use super::value_objects::{CellLocation, ExitStatus, ProofKind};
use thiserror::Error;

/// Hash type (32-byte script / block identity).
pub type Hash = [u8; 32];

/// Why a transaction was rejected.
///
/// Derives `PartialEq` so repeated validation of the same inputs can be
/// compared verdict-for-verdict.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RejectionReason {
    /// Missing or malformed phase selector, binding parameter or proof.
    #[error("Argument error: {0}")]
    ArgumentError(String),

    /// Token or claim type does not match the expected identity.
    #[error("Type mismatch at {at}")]
    TypeMismatch {
        /// Offending cell
        at: CellLocation,
    },

    /// Custody lock does not match the required identity.
    #[error("Lock mismatch at {at}")]
    LockMismatch {
        /// Offending cell
        at: CellLocation,
    },

    /// Exit token has the wrong status for this phase.
    #[error("Status mismatch at {at}: expected {expected:?}, found {found:?}")]
    StatusMismatch {
        /// Offending cell
        at: CellLocation,
        /// Status the phase requires
        expected: ExitStatus,
        /// Status actually recorded
        found: ExitStatus,
    },

    /// Conservation sums or cardinality constraints disagree.
    #[error("Count mismatch ({what}): expected {expected}, got {actual}")]
    CountMismatch {
        /// Which quantity was compared
        what: &'static str,
        /// Required value
        expected: u64,
        /// Observed value
        actual: u64,
    },

    /// Withdrawal attempted before the dispute window closed.
    #[error("Challenge window not elapsed: deadline {deadline}, valid_since {valid_since}")]
    WindowNotElapsed {
        /// Dispute deadline height
        deadline: u64,
        /// Transaction's valid_since bound
        valid_since: u64,
    },

    /// Challenge attempted after the dispute window closed.
    #[error("Challenge window expired: deadline {deadline}, current height {current_height}")]
    WindowExpired {
        /// Dispute deadline height
        deadline: u64,
        /// Current chain height
        current_height: u64,
    },

    /// Start-withdraw output records a start height in the past.
    #[error("Retroactive start height at {at}: {start_height} < {current_height}")]
    RetroactiveStartHeight {
        /// Offending cell
        at: CellLocation,
        /// Recorded start height
        start_height: u64,
        /// Current chain height
        current_height: u64,
    },

    /// Fraud proof or ownership signature failed verification.
    #[error("{0} rejected")]
    ProofRejected(ProofKind),

    /// Not enough uncongested block dependencies were supplied.
    #[error("Congestion evidence insufficient: {qualifying}/{required} blocks")]
    CongestionEvidenceInsufficient {
        /// Qualifying block dependencies
        qualifying: usize,
        /// Required block dependencies
        required: usize,
    },

    /// Cell data does not follow the fixed layout.
    #[error("Malformed cell at {at}: {reason}")]
    MalformedCell {
        /// Offending cell
        at: CellLocation,
        /// Decoder message
        reason: String,
    },

    /// Host ledger could not supply a required item.
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

/// Failures reported by a `LedgerView` implementation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// Cell index outside the transaction.
    #[error("Index out of bound: {0}")]
    IndexOutOfBound(CellLocation),

    /// Item the host is expected to provide is absent.
    #[error("Item missing: {0}")]
    ItemMissing(String),
}

/// Invalid `PlasmaExitConfig` values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A parameter that must be positive is zero.
    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    /// Congestion threshold outside 1..=100.
    #[error("Congestion threshold must be within 1..=100, got {0}")]
    ThresholdOutOfRange(u64),

    /// Config document could not be parsed.
    #[error("Invalid config document: {0}")]
    Parse(String),
}
