//! # Domain Invariants
//!
//! Conservation and cardinality rules shared by the phase checks.

use super::errors::RejectionReason;

/// Invariant: sums never silently wrap.
///
/// An amount total that does not fit in `u64` cannot be conserved, so
/// overflow is reported as a count mismatch.
pub fn checked_accumulate(
    what: &'static str,
    total: u64,
    amount: u64,
) -> Result<u64, RejectionReason> {
    total
        .checked_add(amount)
        .ok_or(RejectionReason::CountMismatch {
            what,
            expected: u64::MAX - total,
            actual: amount,
        })
}

/// Invariant: two conserved quantities are equal.
pub fn invariant_amounts_equal(
    what: &'static str,
    expected: u64,
    actual: u64,
) -> Result<(), RejectionReason> {
    if expected != actual {
        return Err(RejectionReason::CountMismatch {
            what,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Invariant: exact number of inputs or outputs.
pub fn invariant_cardinality(
    what: &'static str,
    expected: usize,
    actual: usize,
) -> Result<(), RejectionReason> {
    invariant_amounts_equal(what, expected as u64, actual as u64)
}

/// Invariant: a quantity is non-zero.
pub fn invariant_non_zero(what: &'static str, amount: u64) -> Result<(), RejectionReason> {
    if amount == 0 {
        return Err(RejectionReason::CountMismatch {
            what,
            expected: 1,
            actual: 0,
        });
    }
    Ok(())
}
