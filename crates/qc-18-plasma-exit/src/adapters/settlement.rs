//! Challenge Settlement Adapter
//!
//! Implements `ChallengeSettlement` as a pass-through.

use crate::domain::{ExitTokenCell, RejectionReason, Transaction};
use crate::ports::ChallengeSettlement;
use tracing::debug;

/// Accepts every challenge that passed the exit rules.
///
/// Redirecting the escrowed UDT of a proven-fraudulent claim is left to
/// a later spend outside these rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct DeferredSettlement;

impl ChallengeSettlement for DeferredSettlement {
    fn check_settlement(
        &self,
        claim: &ExitTokenCell,
        transaction: &Transaction,
    ) -> Result<(), RejectionReason> {
        debug!(
            "[qc-18] Settlement deferred for challenged claim of {} ({} outputs)",
            claim.amount,
            transaction.outputs.len()
        );
        Ok(())
    }
}
