//! # Domain Value Objects
//!
//! Immutable value types for exit verification.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where a cell is read from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    /// Cells consumed by the transaction.
    Input,
    /// Cells created by the transaction.
    Output,
    /// The cell running this script.
    Current,
}

/// Which script of a cell to identify.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScriptCategory {
    /// Type script: what kind of token the cell holds.
    Type,
    /// Lock script: who may spend the cell.
    Lock,
}

/// Readable cell field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum CellField {
    /// Cell data bytes.
    Data,
}

/// Position of a cell within a transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellLocation {
    /// Inputs, outputs or current.
    pub source: Source,
    /// Index within the source.
    pub index: usize,
}

impl CellLocation {
    /// Create a new location.
    pub fn new(source: Source, index: usize) -> Self {
        Self { source, index }
    }

    /// Input at `index`.
    pub fn input(index: usize) -> Self {
        Self::new(Source::Input, index)
    }

    /// Output at `index`.
    pub fn output(index: usize) -> Self {
        Self::new(Source::Output, index)
    }
}

impl fmt::Display for CellLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match self.source {
            Source::Input => "input",
            Source::Output => "output",
            Source::Current => "current",
        };
        write!(f, "{}[{}]", source, self.index)
    }
}

/// Exit token lifecycle status.
///
/// Wire codes: 0 = Deposited, 1 = PendingWithdrawal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExitStatus {
    /// Claim minted against escrowed funds.
    #[default]
    Deposited,
    /// Withdrawal started; dispute window running.
    PendingWithdrawal,
}

impl ExitStatus {
    /// Decode a wire status code.
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            0 => Some(Self::Deposited),
            1 => Some(Self::PendingWithdrawal),
            _ => None,
        }
    }

    /// Wire status code.
    pub fn code(&self) -> u64 {
        match self {
            Self::Deposited => 0,
            Self::PendingWithdrawal => 1,
        }
    }

    /// Check if transition is valid.
    ///
    /// `Deposited -> Deposited` is the refunded portion of a partial
    /// start-withdraw; `PendingWithdrawal -> PendingWithdrawal` is a
    /// challenge re-emitting the claim.
    pub fn can_transition_to(&self, next: ExitStatus) -> bool {
        matches!(
            (self, next),
            (Self::Deposited, Self::PendingWithdrawal)
                | (Self::Deposited, Self::Deposited)
                | (Self::PendingWithdrawal, Self::PendingWithdrawal)
        )
    }
}

/// Validation phase selected by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Lock UDT under custody, mint Deposited exit tokens.
    Deposit,
    /// Move Deposited exit tokens to PendingWithdrawal.
    StartWithdraw,
    /// Dispute a PendingWithdrawal claim inside its window.
    Challenge,
    /// Release escrowed UDT after the window closed.
    Withdraw,
}

impl Phase {
    /// All phases, in lifecycle order.
    pub const ALL: [Phase; 4] = [
        Phase::Deposit,
        Phase::StartWithdraw,
        Phase::Challenge,
        Phase::Withdraw,
    ];

    /// Selector string used by the host.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::StartWithdraw => "start_withdraw",
            Self::Challenge => "challenge",
            Self::Withdraw => "withdraw",
        }
    }

    /// Whether the phase consumes an auxiliary proof.
    pub fn requires_aux_proof(&self) -> bool {
        matches!(self, Self::Challenge | Self::Withdraw)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|phase| phase.as_str() == s)
            .ok_or_else(|| format!("unknown phase selector: {:?}", s))
    }
}

/// Kind of auxiliary proof handed to the `ProofVerifier`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProofKind {
    /// Evidence that a pending claim is invalid.
    FraudProof,
    /// Evidence that the withdrawer owns the claim.
    OwnershipSignature,
}

impl fmt::Display for ProofKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FraudProof => f.write_str("Fraud proof"),
            Self::OwnershipSignature => f.write_str("Ownership signature"),
        }
    }
}

/// Block metadata exposed by the host ledger.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockInfo {
    /// Block height.
    pub height: u64,
    /// Cycles consumed by all transactions in the block.
    pub tx_cycles: u64,
}

impl BlockInfo {
    /// Create block info.
    pub fn new(height: u64, tx_cycles: u64) -> Self {
        Self { height, tx_cycles }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ExitStatus::from_code(0), Some(ExitStatus::Deposited));
        assert_eq!(ExitStatus::from_code(1), Some(ExitStatus::PendingWithdrawal));
        assert_eq!(ExitStatus::from_code(2), None);
        assert_eq!(ExitStatus::PendingWithdrawal.code(), 1);
    }

    #[test]
    fn test_status_transitions() {
        assert!(ExitStatus::Deposited.can_transition_to(ExitStatus::PendingWithdrawal));
        assert!(ExitStatus::Deposited.can_transition_to(ExitStatus::Deposited));
        assert!(ExitStatus::PendingWithdrawal.can_transition_to(ExitStatus::PendingWithdrawal));
        assert!(!ExitStatus::PendingWithdrawal.can_transition_to(ExitStatus::Deposited));
    }

    #[test]
    fn test_phase_from_str() {
        assert_eq!("deposit".parse::<Phase>(), Ok(Phase::Deposit));
        assert_eq!("start_withdraw".parse::<Phase>(), Ok(Phase::StartWithdraw));
        assert_eq!("challenge".parse::<Phase>(), Ok(Phase::Challenge));
        assert_eq!("withdraw".parse::<Phase>(), Ok(Phase::Withdraw));
        assert!("Withdraw".parse::<Phase>().is_err());
        assert!("".parse::<Phase>().is_err());
    }

    #[test]
    fn test_phase_aux_proof() {
        assert!(!Phase::Deposit.requires_aux_proof());
        assert!(!Phase::StartWithdraw.requires_aux_proof());
        assert!(Phase::Challenge.requires_aux_proof());
        assert!(Phase::Withdraw.requires_aux_proof());
    }

    #[test]
    fn test_cell_location_display() {
        assert_eq!(CellLocation::input(0).to_string(), "input[0]");
        assert_eq!(CellLocation::output(3).to_string(), "output[3]");
    }
}
