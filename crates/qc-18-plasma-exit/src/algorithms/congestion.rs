//! # Congestion Evidence
//!
//! A withdrawal must cite block dependencies showing the chain had spare
//! capacity after the withdrawal started; otherwise congestion might
//! have justified a longer dispute window than the one it is racing.

use super::challenge_period::ChallengePeriodPolicy;
use crate::domain::{Hash, RejectionReason};
use crate::ports::LedgerView;
use std::collections::HashSet;
use tracing::debug;

/// Count block dependencies that qualify as evidence of an open chain.
///
/// A dependency qualifies when its block is known, lies strictly after
/// `start_height`, and is not congested. Duplicate hashes count once.
pub fn count_congestion_evidence(
    policy: &ChallengePeriodPolicy,
    ledger: &dyn LedgerView,
    block_deps: &[Hash],
    start_height: u64,
) -> Result<usize, RejectionReason> {
    let mut seen = HashSet::with_capacity(block_deps.len());
    let mut qualifying = 0;

    for hash in block_deps {
        if !seen.insert(*hash) {
            continue;
        }
        if let Some(block) = ledger.load_block(hash)? {
            if block.height > start_height && !policy.is_congested(&block) {
                qualifying += 1;
            }
        }
    }

    debug!(
        "[qc-18] Congestion evidence: {}/{} block deps qualify after height {}",
        qualifying,
        block_deps.len(),
        start_height
    );
    Ok(qualifying)
}

/// Invariant: at least `required` qualifying block dependencies.
pub fn invariant_congestion_evidence(
    qualifying: usize,
    required: usize,
) -> Result<(), RejectionReason> {
    if qualifying < required {
        return Err(RejectionReason::CongestionEvidenceInsufficient {
            qualifying,
            required,
        });
    }
    Ok(())
}
