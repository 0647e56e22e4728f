//! Proof Verifier Adapters
//!
//! Implements `ProofVerifier` for hosts that have not wired a real
//! fraud-proof or signature scheme.

use crate::domain::ExitTokenCell;
use crate::ports::ProofVerifier;
#[cfg(any(test, feature = "test-utils"))]
use tracing::debug;
use tracing::warn;

/// Rejects every proof. The safe default.
///
/// With this verifier no challenge and no withdrawal can succeed until
/// the deployment injects a real scheme.
#[derive(Clone, Copy, Debug, Default)]
pub struct RejectingProofVerifier;

impl ProofVerifier for RejectingProofVerifier {
    fn verify_fraud_proof(&self, _claim: &ExitTokenCell, _proof: &[u8]) -> bool {
        warn!("[qc-18] No fraud-proof scheme configured, rejecting");
        false
    }

    fn verify_ownership(&self, _claim: &ExitTokenCell, _signature: &[u8]) -> bool {
        warn!("[qc-18] No ownership scheme configured, rejecting");
        false
    }
}

/// Accepts every proof.
///
/// For tests of non-cryptographic rules only. Never deploy it: any
/// party could then withdraw any pending claim.
/// Requires feature: `test-utils`
#[cfg(any(test, feature = "test-utils"))]
#[derive(Clone, Copy, Debug, Default)]
pub struct PermissiveProofVerifier;

#[cfg(any(test, feature = "test-utils"))]
impl ProofVerifier for PermissiveProofVerifier {
    fn verify_fraud_proof(&self, claim: &ExitTokenCell, proof: &[u8]) -> bool {
        debug!(
            "[qc-18] Permissive fraud-proof check ({} bytes) for claim of {}",
            proof.len(),
            claim.amount
        );
        true
    }

    fn verify_ownership(&self, claim: &ExitTokenCell, signature: &[u8]) -> bool {
        debug!(
            "[qc-18] Permissive ownership check ({} bytes) for claim of {}",
            signature.len(),
            claim.amount
        );
        true
    }
}
