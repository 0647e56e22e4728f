//! # Start Withdraw
//!
//! Deposited exit tokens in; PendingWithdrawal tokens (plus an optional
//! refunded Deposited portion) out, all held in custody so a challenger
//! or the protocol can arbitrate the later spend.

use super::{expect_lock, expect_status, expect_type};
use crate::context::ValidationContext;
use crate::domain::{
    checked_accumulate, invariant_amounts_equal, invariant_non_zero, CellLocation, ExitStatus,
    RejectionReason,
};
use tracing::debug;

/// Validate a start-withdraw transaction.
pub fn verify_start_withdraw(ctx: &ValidationContext<'_>) -> Result<(), RejectionReason> {
    let tx = ctx.transaction();
    let reader = ctx.reader();

    let mut deposited_in = 0u64;
    for index in 0..tx.inputs.len() {
        let at = CellLocation::input(index);
        expect_type(&reader, at, ctx.own_identity())?;
        expect_status(&reader, at, ExitStatus::Deposited)?;
        deposited_in =
            checked_accumulate("deposited input amount", deposited_in, reader.amount(at)?)?;
    }

    let mut withdrawing_out = 0u64;
    let mut refunded_out = 0u64;
    for index in 0..tx.outputs.len() {
        let at = CellLocation::output(index);
        expect_type(&reader, at, ctx.own_identity())?;
        expect_lock(&reader, at, ctx.custody_lock())?;

        let amount = reader.amount(at)?;
        match reader.status(at)? {
            ExitStatus::PendingWithdrawal => {
                let start_height = reader.start_withdraw_height(at)?;
                if start_height < ctx.current_height() {
                    return Err(RejectionReason::RetroactiveStartHeight {
                        at,
                        start_height,
                        current_height: ctx.current_height(),
                    });
                }
                withdrawing_out =
                    checked_accumulate("pending withdrawal amount", withdrawing_out, amount)?;
            }
            ExitStatus::Deposited => {
                refunded_out = checked_accumulate("refunded amount", refunded_out, amount)?;
            }
        }
    }

    debug!(
        "[qc-18] Start-withdraw sums: in={} withdrawing={} refunded={}",
        deposited_in, withdrawing_out, refunded_out
    );

    let total_out =
        checked_accumulate("start-withdraw output amount", withdrawing_out, refunded_out)?;
    invariant_amounts_equal("start-withdraw output amount", deposited_in, total_out)?;
    invariant_non_zero("pending withdrawal amount", withdrawing_out)?;
    Ok(())
}
