//! # Challenge
//!
//! A pending claim contested with a fraud proof while its dispute window
//! is still open. The claim passes through unchanged; redirecting the
//! escrowed UDT is left to the `ChallengeSettlement` hook.

use super::{expect_type, read_pending_claim};
use crate::algorithms::ChallengePeriodPolicy;
use crate::context::ValidationContext;
use crate::domain::{
    invariant_amounts_equal, invariant_cardinality, CellLocation, ExitStatus, Phase, ProofKind,
    RejectionReason,
};
use crate::ports::{ChallengeSettlement, ProofVerifier};
use tracing::debug;

/// Validate a challenge transaction.
pub fn verify_challenge(
    ctx: &ValidationContext<'_>,
    policy: &ChallengePeriodPolicy,
    verifier: &dyn ProofVerifier,
    settlement: &dyn ChallengeSettlement,
) -> Result<(), RejectionReason> {
    let tx = ctx.transaction();
    let reader = ctx.reader();
    let proof = ctx.require_aux_proof(Phase::Challenge)?;

    invariant_cardinality("challenge inputs", 1, tx.inputs.len())?;
    let (claim, start_height) =
        read_pending_claim(&reader, CellLocation::input(0), ctx.own_identity())?;

    let current_height = ctx.current_height();
    let deadline = policy.deadline_for(start_height, current_height, ctx.ledger())?;
    debug!(
        "[qc-18] Challenge window: start={} deadline={} current={}",
        start_height, deadline, current_height
    );
    if current_height > deadline {
        return Err(RejectionReason::WindowExpired {
            deadline,
            current_height,
        });
    }

    if !verifier.verify_fraud_proof(&claim, proof) {
        return Err(RejectionReason::ProofRejected(ProofKind::FraudProof));
    }

    invariant_cardinality("challenge outputs", 1, tx.outputs.len())?;
    let out = CellLocation::output(0);
    expect_type(&reader, out, ctx.own_identity())?;
    let found = reader.status(out)?;
    if !claim.status.can_transition_to(found) {
        return Err(RejectionReason::StatusMismatch {
            at: out,
            expected: ExitStatus::PendingWithdrawal,
            found,
        });
    }
    invariant_amounts_equal("challenged claim amount", claim.amount, reader.amount(out)?)?;

    settlement.check_settlement(&claim, tx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{
        DeferredSettlement, InMemoryLedger, LedgerCell, PermissiveProofVerifier,
        RejectingProofVerifier,
    };
    use crate::domain::{ExitTokenCell, ExitTokenData, Transaction};

    const OWN: [u8; 32] = [1u8; 32];
    const UDT: [u8; 32] = [2u8; 32];
    const PROOF: &[u8] = b"fraud";

    fn pending(amount: u64, start: u64) -> LedgerCell {
        LedgerCell::exit_token(&ExitTokenData::pending(amount, start), OWN, OWN)
    }

    /// Claim started at 1000, evaluated at `current_height`.
    fn claim_at(current_height: u64) -> InMemoryLedger {
        InMemoryLedger::new(OWN)
            .with_chain(current_height - 1, |_| 0)
            .with_input(pending(10, 1000))
            .with_output(pending(10, 1000))
    }

    fn run_with(
        ledger: &InMemoryLedger,
        verifier: &dyn ProofVerifier,
        settlement: &dyn ChallengeSettlement,
    ) -> Result<(), RejectionReason> {
        let ctx = ValidationContext::load(ledger, UDT, Some(PROOF))?;
        verify_challenge(&ctx, &ChallengePeriodPolicy::default(), verifier, settlement)
    }

    fn run(ledger: &InMemoryLedger) -> Result<(), RejectionReason> {
        run_with(ledger, &PermissiveProofVerifier, &DeferredSettlement)
    }

    #[test]
    fn test_challenge_inside_window() {
        assert!(run(&claim_at(1050)).is_ok());
        assert!(run(&claim_at(1099)).is_ok());
    }

    #[test]
    fn test_challenge_at_deadline() {
        assert!(run(&claim_at(1100)).is_ok());
    }

    #[test]
    fn test_challenge_after_window() {
        assert_eq!(
            run(&claim_at(1101)),
            Err(RejectionReason::WindowExpired {
                deadline: 1100,
                current_height: 1101
            })
        );
    }

    #[test]
    fn test_challenge_requires_proof() {
        let ledger = claim_at(1050);
        let ctx = ValidationContext::load(&ledger, UDT, None).unwrap();
        let result = verify_challenge(
            &ctx,
            &ChallengePeriodPolicy::default(),
            &PermissiveProofVerifier,
            &DeferredSettlement,
        );
        assert!(matches!(result, Err(RejectionReason::ArgumentError(_))));
    }

    #[test]
    fn test_challenge_proof_rejected() {
        assert_eq!(
            run_with(&claim_at(1050), &RejectingProofVerifier, &DeferredSettlement),
            Err(RejectionReason::ProofRejected(ProofKind::FraudProof))
        );
    }

    #[test]
    fn test_challenge_rejects_two_inputs() {
        let ledger = claim_at(1050).with_input(pending(5, 1000));
        assert_eq!(
            run(&ledger),
            Err(RejectionReason::CountMismatch {
                what: "challenge inputs",
                expected: 1,
                actual: 2
            })
        );
    }

    #[test]
    fn test_challenge_rejects_deposited_claim() {
        let ledger = InMemoryLedger::new(OWN)
            .with_chain(1049, |_| 0)
            .with_input(LedgerCell::exit_token(&ExitTokenData::deposited(10), OWN, OWN))
            .with_output(pending(10, 1000));
        assert!(matches!(
            run(&ledger),
            Err(RejectionReason::StatusMismatch {
                expected: ExitStatus::PendingWithdrawal,
                ..
            })
        ));
    }

    #[test]
    fn test_challenge_rejects_reverted_status() {
        let ledger = InMemoryLedger::new(OWN)
            .with_chain(1049, |_| 0)
            .with_input(pending(10, 1000))
            .with_output(LedgerCell::exit_token(&ExitTokenData::deposited(10), OWN, OWN));
        assert_eq!(
            run(&ledger),
            Err(RejectionReason::StatusMismatch {
                at: CellLocation::output(0),
                expected: ExitStatus::PendingWithdrawal,
                found: ExitStatus::Deposited
            })
        );
    }

    #[test]
    fn test_challenge_rejects_changed_amount() {
        let ledger = InMemoryLedger::new(OWN)
            .with_chain(1049, |_| 0)
            .with_input(pending(10, 1000))
            .with_output(pending(7, 1000));
        assert_eq!(
            run(&ledger),
            Err(RejectionReason::CountMismatch {
                what: "challenged claim amount",
                expected: 10,
                actual: 7
            })
        );
    }

    #[test]
    fn test_challenge_rejects_missing_output() {
        let ledger = InMemoryLedger::new(OWN)
            .with_chain(1049, |_| 0)
            .with_input(pending(10, 1000));
        assert!(matches!(
            run(&ledger),
            Err(RejectionReason::CountMismatch {
                what: "challenge outputs",
                ..
            })
        ));
    }

    #[test]
    fn test_challenge_window_extended_by_congestion() {
        // Blocks 1000..=1100 full: window shifts to [1100, 1200].
        let ledger = InMemoryLedger::new(OWN)
            .with_chain(1149, |h| if h <= 1100 { 99_000_000 } else { 0 })
            .with_input(pending(10, 1000))
            .with_output(pending(10, 1000));
        assert!(run(&ledger).is_ok());
    }

    struct RefuseSettlement;

    impl ChallengeSettlement for RefuseSettlement {
        fn check_settlement(
            &self,
            _claim: &ExitTokenCell,
            _transaction: &Transaction,
        ) -> Result<(), RejectionReason> {
            Err(RejectionReason::ArgumentError("settlement refused".into()))
        }
    }

    #[test]
    fn test_challenge_runs_settlement_hook() {
        assert_eq!(
            run_with(&claim_at(1050), &PermissiveProofVerifier, &RefuseSettlement),
            Err(RejectionReason::ArgumentError("settlement refused".into()))
        );
    }
}
