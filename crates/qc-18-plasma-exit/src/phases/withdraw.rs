//! # Withdraw
//!
//! Releases escrowed UDT against a pending claim once its dispute window
//! has closed.
//!
//! ```text
//! input[0]  exit token, PendingWithdrawal ─┐
//! input[1]  UDT in custody                 ├─► output[0]  UDT, same amount
//! block deps: ≥ N uncongested after start ─┘
//! ```

use super::{expect_lock, expect_type, read_pending_claim};
use crate::algorithms::{
    count_congestion_evidence, invariant_congestion_evidence, ChallengePeriodPolicy,
};
use crate::context::ValidationContext;
use crate::domain::{
    invariant_amounts_equal, invariant_cardinality, CellLocation, Phase, ProofKind,
    RejectionReason,
};
use crate::ports::ProofVerifier;
use tracing::debug;

/// Validate a withdraw transaction.
///
/// `required_evidence` is the number of distinct uncongested block
/// dependencies the transaction must cite.
pub fn verify_withdraw(
    ctx: &ValidationContext<'_>,
    policy: &ChallengePeriodPolicy,
    verifier: &dyn ProofVerifier,
    required_evidence: usize,
) -> Result<(), RejectionReason> {
    let tx = ctx.transaction();
    let reader = ctx.reader();
    let signature = ctx.require_aux_proof(Phase::Withdraw)?;

    invariant_cardinality("withdraw inputs", 2, tx.inputs.len())?;
    let (claim, start_height) =
        read_pending_claim(&reader, CellLocation::input(0), ctx.own_identity())?;

    let deadline = policy.deadline_for(start_height, ctx.current_height(), ctx.ledger())?;
    debug!(
        "[qc-18] Withdraw window: start={} deadline={} valid_since={}",
        start_height, deadline, tx.valid_since
    );
    if deadline >= tx.valid_since {
        return Err(RejectionReason::WindowNotElapsed {
            deadline,
            valid_since: tx.valid_since,
        });
    }

    if !verifier.verify_ownership(&claim, signature) {
        return Err(RejectionReason::ProofRejected(ProofKind::OwnershipSignature));
    }

    let escrow = CellLocation::input(1);
    expect_type(&reader, escrow, ctx.binding_token_id())?;
    expect_lock(&reader, escrow, ctx.custody_lock())?;
    let escrowed = reader.amount(escrow)?;
    invariant_amounts_equal("escrowed amount", claim.amount, escrowed)?;

    let qualifying =
        count_congestion_evidence(policy, ctx.ledger(), &tx.block_deps, start_height)?;
    invariant_congestion_evidence(qualifying, required_evidence)?;

    invariant_cardinality("withdraw outputs", 1, tx.outputs.len())?;
    let released = CellLocation::output(0);
    expect_type(&reader, released, ctx.binding_token_id())?;
    invariant_amounts_equal("released amount", escrowed, reader.amount(released)?)
}
