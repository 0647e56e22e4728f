//! # Exit Verification Service
//!
//! Application service implementing `ExitValidationApi`.
//!
//! ## Architecture
//!
//! - Implements the inbound port (`ExitValidationApi`)
//! - Consumes the outbound ports (`LedgerView` per call, `ProofVerifier`
//!   and `ChallengeSettlement` injected once)
//! - Delegates each phase to `phases/`
//!
//! The service holds configuration only. Every call builds its own
//! `ValidationContext`, so one instance can serve many threads.

use crate::adapters::{DeferredSettlement, RejectingProofVerifier};
use crate::algorithms::ChallengePeriodPolicy;
use crate::context::{missing_aux_proof, ValidationContext};
use crate::domain::{ConfigError, Hash, Phase, PlasmaExitConfig, RejectionReason};
use crate::phases::{verify_challenge, verify_deposit, verify_start_withdraw, verify_withdraw};
use crate::ports::{ChallengeSettlement, ExitValidationApi, LedgerView, ProofVerifier};
use rayon::prelude::*;
use tracing::{debug, info, warn};

/// One entry of a batch validation.
#[derive(Clone)]
pub struct ValidationRequest<'a> {
    /// Ledger exposing the transaction.
    pub ledger: &'a dyn LedgerView,
    /// Selected phase.
    pub phase: Phase,
    /// UDT type escrowed by the protocol instance.
    pub binding_token_id: Hash,
    /// Fraud proof or ownership signature.
    pub aux_proof: Option<Vec<u8>>,
}

/// Exit transaction validator.
pub struct ExitTransactionValidator<
    P: ProofVerifier = RejectingProofVerifier,
    S: ChallengeSettlement = DeferredSettlement,
> {
    config: PlasmaExitConfig,
    policy: ChallengePeriodPolicy,
    verifier: P,
    settlement: S,
}

impl<P: ProofVerifier> ExitTransactionValidator<P, DeferredSettlement> {
    /// Create a validator with the deferred settlement hook.
    pub fn new(config: PlasmaExitConfig, verifier: P) -> Result<Self, ConfigError> {
        let policy = ChallengePeriodPolicy::from_config(&config)?;
        info!(
            "[qc-18] Exit validator ready: base period {} blocks, {} policy, {} evidence blocks",
            config.base_challenge_period,
            if policy.is_adaptive() { "adaptive" } else { "fixed" },
            config.required_evidence_blocks
        );
        Ok(Self {
            config,
            policy,
            verifier,
            settlement: DeferredSettlement,
        })
    }
}

impl<P: ProofVerifier, S: ChallengeSettlement> ExitTransactionValidator<P, S> {
    /// Replace the challenge settlement hook.
    pub fn with_settlement<T: ChallengeSettlement>(
        self,
        settlement: T,
    ) -> ExitTransactionValidator<P, T> {
        ExitTransactionValidator {
            config: self.config,
            policy: self.policy,
            verifier: self.verifier,
            settlement,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &PlasmaExitConfig {
        &self.config
    }

    /// Dispute window policy derived from the configuration.
    pub fn policy(&self) -> &ChallengePeriodPolicy {
        &self.policy
    }

    /// Validate independent requests in parallel.
    ///
    /// Verdicts come back in request order and equal what sequential
    /// `validate` calls would return.
    pub fn validate_batch(
        &self,
        requests: &[ValidationRequest<'_>],
    ) -> Vec<Result<(), RejectionReason>> {
        debug!("[qc-18] Validating batch of {} transactions", requests.len());
        requests
            .par_iter()
            .map(|request| {
                self.validate(
                    request.ledger,
                    request.phase,
                    &request.binding_token_id,
                    request.aux_proof.as_deref(),
                )
            })
            .collect()
    }

    fn dispatch(&self, ctx: &ValidationContext<'_>, phase: Phase) -> Result<(), RejectionReason> {
        match phase {
            Phase::Deposit => verify_deposit(ctx),
            Phase::StartWithdraw => verify_start_withdraw(ctx),
            Phase::Challenge => {
                verify_challenge(ctx, &self.policy, &self.verifier, &self.settlement)
            }
            Phase::Withdraw => verify_withdraw(
                ctx,
                &self.policy,
                &self.verifier,
                self.config.required_evidence_blocks,
            ),
        }
    }
}

impl Default for ExitTransactionValidator {
    fn default() -> Self {
        Self {
            config: PlasmaExitConfig::default(),
            policy: ChallengePeriodPolicy::default(),
            verifier: RejectingProofVerifier,
            settlement: DeferredSettlement,
        }
    }
}

impl<P, S> ExitValidationApi for ExitTransactionValidator<P, S>
where
    P: ProofVerifier,
    S: ChallengeSettlement,
{
    fn validate(
        &self,
        ledger: &dyn LedgerView,
        phase: Phase,
        binding_token_id: &Hash,
        aux_proof: Option<&[u8]>,
    ) -> Result<(), RejectionReason> {
        debug!("[qc-18] Validating {} transaction", phase);

        let result = if phase.requires_aux_proof() && aux_proof.is_none() {
            Err(missing_aux_proof(phase))
        } else {
            ValidationContext::load(ledger, *binding_token_id, aux_proof)
                .and_then(|ctx| self.dispatch(&ctx, phase))
        };

        match &result {
            Ok(()) => info!("[qc-18] {} transaction accepted", phase),
            Err(reason) => warn!("[qc-18] {} transaction rejected: {}", phase, reason),
        }
        result
    }
}
