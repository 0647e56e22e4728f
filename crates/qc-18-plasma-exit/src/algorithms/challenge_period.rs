//! # Challenge Period Policy
//!
//! Computes the dispute deadline for a withdrawal started at a given
//! height.
//!
//! The fixed policy always answers `start + base_period`. The adaptive
//! policy extends the window by another `base_period` for every full
//! window the chain spent congested, so claimants are not penalised for
//! being unable to land a challenge while blocks are full:
//!
//! ```text
//! start ── base ──► deadline            every block ≥ threshold?
//!                   │                   and chain already past deadline?
//!                   └─ yes: shift both ends by base, retest
//!                   └─ no:  deadline is final
//! ```

use crate::domain::{
    BlockInfo, ConfigError, PlasmaExitConfig, RejectionReason, BASE_CHALLENGE_PERIOD,
    BLOCK_MAX_CYCLES, CONGESTION_THRESHOLD_PERCENT,
};
use crate::ports::LedgerView;
use tracing::debug;

/// Dispute deadline calculator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChallengePeriodPolicy {
    base_period: u64,
    block_max_cycles: u64,
    threshold_percent: u64,
    extension: bool,
}

impl ChallengePeriodPolicy {
    /// Build the policy a configuration describes.
    ///
    /// # Errors
    ///
    /// The configuration's own `validate` error; a zero period never
    /// becomes a policy.
    pub fn from_config(config: &PlasmaExitConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            base_period: config.base_challenge_period,
            block_max_cycles: config.block_max_cycles,
            threshold_percent: config.congestion_threshold_percent,
            extension: config.congestion_extension,
        })
    }

    /// Constant window of `base_period` blocks.
    pub fn fixed(base_period: u64) -> Result<Self, ConfigError> {
        Self::from_config(&PlasmaExitConfig {
            base_challenge_period: base_period,
            ..PlasmaExitConfig::fixed()
        })
    }

    /// Window extended under congestion.
    pub fn adaptive(
        base_period: u64,
        block_max_cycles: u64,
        threshold_percent: u64,
    ) -> Result<Self, ConfigError> {
        Self::from_config(&PlasmaExitConfig {
            base_challenge_period: base_period,
            block_max_cycles,
            congestion_threshold_percent: threshold_percent,
            ..PlasmaExitConfig::default()
        })
    }

    /// Base window length.
    pub fn base_period(&self) -> u64 {
        self.base_period
    }

    /// Whether congestion extends the window.
    pub fn is_adaptive(&self) -> bool {
        self.extension
    }

    /// A block is congested once it consumed at least the threshold
    /// share of the cycle ceiling.
    pub fn is_congested(&self, block: &BlockInfo) -> bool {
        u128::from(block.tx_cycles) * 100
            >= u128::from(self.block_max_cycles) * u128::from(self.threshold_percent)
    }

    /// Dispute deadline for a withdrawal started at `start_height`.
    ///
    /// Never earlier than `start_height + base_period`; never extended
    /// past a window the chain has not finished yet, so the loop is
    /// bounded by `current_height`.
    pub fn deadline_for(
        &self,
        start_height: u64,
        current_height: u64,
        ledger: &dyn LedgerView,
    ) -> Result<u64, RejectionReason> {
        let base_deadline = start_height.saturating_add(self.base_period);
        if !self.extension {
            return Ok(base_deadline);
        }

        let mut window_start = start_height;
        let mut deadline = base_deadline;
        while current_height > deadline
            && self.is_window_congested(window_start, deadline, current_height, ledger)?
        {
            let (Some(next_start), Some(next_deadline)) = (
                window_start.checked_add(self.base_period),
                deadline.checked_add(self.base_period),
            ) else {
                break;
            };
            window_start = next_start;
            deadline = next_deadline;
        }

        if deadline != base_deadline {
            debug!(
                "[qc-18] Challenge window extended under congestion: {} -> {}",
                base_deadline, deadline
            );
        }
        Ok(deadline)
    }

    /// Every block in `[from, to]` congested. Requires `to < current_height`.
    ///
    /// A block the ledger cannot supply makes the window uncongested.
    fn is_window_congested(
        &self,
        from: u64,
        to: u64,
        current_height: u64,
        ledger: &dyn LedgerView,
    ) -> Result<bool, RejectionReason> {
        let tip = current_height - 1;
        for height in from..=to {
            match ledger.load_ancestor_block(tip - height)? {
                Some(block) if self.is_congested(&block) => {}
                _ => return Ok(false),
            }
        }
        Ok(true)
    }
}

impl Default for ChallengePeriodPolicy {
    fn default() -> Self {
        Self {
            base_period: BASE_CHALLENGE_PERIOD,
            block_max_cycles: BLOCK_MAX_CYCLES,
            threshold_percent: CONGESTION_THRESHOLD_PERCENT,
            extension: true,
        }
    }
}
