//! # Deposit
//!
//! Free UDT in, escrowed UDT plus Deposited exit tokens out, all three
//! legs equal.

use super::{expect_status, expect_type};
use crate::context::ValidationContext;
use crate::domain::{
    checked_accumulate, invariant_amounts_equal, invariant_non_zero, CellLocation, ExitStatus,
    RejectionReason,
};
use tracing::debug;

/// Validate a deposit transaction.
///
/// - inputs: UDT of the binding type, not already in custody
/// - outputs: UDT locked in custody, or Deposited exit tokens; nothing else
/// - `sum(inputs) == sum(escrowed) == sum(minted)`
pub fn verify_deposit(ctx: &ValidationContext<'_>) -> Result<(), RejectionReason> {
    let tx = ctx.transaction();
    let reader = ctx.reader();

    invariant_non_zero("deposit inputs", tx.inputs.len() as u64)?;

    let mut udt_in = 0u64;
    for index in 0..tx.inputs.len() {
        let at = CellLocation::input(index);
        expect_type(&reader, at, ctx.binding_token_id())?;
        if &reader.lock_id(at)? == ctx.custody_lock() {
            return Err(RejectionReason::LockMismatch { at });
        }
        udt_in = checked_accumulate("deposit input amount", udt_in, reader.amount(at)?)?;
    }

    let mut escrowed_out = 0u64;
    let mut minted_out = 0u64;
    for index in 0..tx.outputs.len() {
        let at = CellLocation::output(index);
        let type_id = reader.type_id(at)?;

        if type_id.as_ref() == Some(ctx.binding_token_id()) {
            if &reader.lock_id(at)? != ctx.custody_lock() {
                return Err(RejectionReason::LockMismatch { at });
            }
            escrowed_out =
                checked_accumulate("escrowed output amount", escrowed_out, reader.amount(at)?)?;
        } else if type_id.as_ref() == Some(ctx.own_identity()) {
            expect_status(&reader, at, ExitStatus::Deposited)?;
            minted_out =
                checked_accumulate("minted exit token amount", minted_out, reader.amount(at)?)?;
        } else {
            return Err(RejectionReason::TypeMismatch { at });
        }
    }

    debug!(
        "[qc-18] Deposit sums: in={} escrowed={} minted={}",
        udt_in, escrowed_out, minted_out
    );

    invariant_amounts_equal("escrowed output amount", udt_in, escrowed_out)?;
    invariant_amounts_equal("minted exit token amount", udt_in, minted_out)?;
    Ok(())
}
