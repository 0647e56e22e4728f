//! # Phase Checks
//!
//! One module per phase of the exit lifecycle:
//!
//! ```text
//! UDT ──deposit──► Deposited ──start_withdraw──► PendingWithdrawal ──withdraw──► UDT
//!                                                   │        ▲
//!                                                   └challenge┘ (inside the window)
//! ```
//!
//! Each check reads cells through the per-call `ValidationContext` and
//! stops at the first violated rule.

pub mod challenge;
pub mod deposit;
pub mod start_withdraw;
pub mod withdraw;

pub use challenge::verify_challenge;
pub use deposit::verify_deposit;
pub use start_withdraw::verify_start_withdraw;
pub use withdraw::verify_withdraw;

use crate::domain::{CellLocation, ExitStatus, ExitTokenCell, Hash, RejectionReason};
use crate::reader::CellReader;

/// Require the cell's type identity to be `expected`.
pub(crate) fn expect_type(
    reader: &CellReader<'_>,
    at: CellLocation,
    expected: &Hash,
) -> Result<(), RejectionReason> {
    if reader.type_id(at)?.as_ref() != Some(expected) {
        return Err(RejectionReason::TypeMismatch { at });
    }
    Ok(())
}

/// Require the cell's lock identity to be `expected`.
pub(crate) fn expect_lock(
    reader: &CellReader<'_>,
    at: CellLocation,
    expected: &Hash,
) -> Result<(), RejectionReason> {
    if &reader.lock_id(at)? != expected {
        return Err(RejectionReason::LockMismatch { at });
    }
    Ok(())
}

/// Require the exit token's status to be `expected`.
pub(crate) fn expect_status(
    reader: &CellReader<'_>,
    at: CellLocation,
    expected: ExitStatus,
) -> Result<(), RejectionReason> {
    let found = reader.status(at)?;
    if found != expected {
        return Err(RejectionReason::StatusMismatch {
            at,
            expected,
            found,
        });
    }
    Ok(())
}

/// Read a PendingWithdrawal claim of this protocol instance.
pub(crate) fn read_pending_claim(
    reader: &CellReader<'_>,
    at: CellLocation,
    own_identity: &Hash,
) -> Result<(ExitTokenCell, u64), RejectionReason> {
    expect_type(reader, at, own_identity)?;
    expect_status(reader, at, ExitStatus::PendingWithdrawal)?;
    let claim = reader.exit_token(at)?;
    let start_height = claim
        .start_withdraw_height
        .ok_or_else(|| RejectionReason::MalformedCell {
            at,
            reason: "pending claim without start height".into(),
        })?;
    Ok((claim, start_height))
}
