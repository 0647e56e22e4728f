//! # Validation Context
//!
//! Immutable snapshot built once per validation call and threaded
//! through every phase check. The running script's identity and the
//! current chain height are looked up here exactly once; nothing
//! survives the call.

use crate::domain::{
    Hash, LedgerError, Phase, ProofKind, RejectionReason, ScriptCategory, Source, Transaction,
};
use crate::ports::LedgerView;
use crate::reader::CellReader;

/// Per-call validation state.
pub struct ValidationContext<'a> {
    ledger: &'a dyn LedgerView,
    transaction: Transaction,
    own_identity: Hash,
    binding_token_id: Hash,
    current_height: u64,
    aux_proof: Option<&'a [u8]>,
}

impl<'a> ValidationContext<'a> {
    /// Snapshot the ledger for one call.
    ///
    /// The current height is the tip's height plus one: the transaction
    /// lands, at the earliest, in the next block.
    pub fn load(
        ledger: &'a dyn LedgerView,
        binding_token_id: Hash,
        aux_proof: Option<&'a [u8]>,
    ) -> Result<Self, RejectionReason> {
        let own_identity = ledger
            .load_script_identity(0, Source::Current, ScriptCategory::Type)?
            .ok_or_else(|| LedgerError::ItemMissing("type identity of running script".into()))?;

        if binding_token_id == own_identity {
            return Err(RejectionReason::ArgumentError(
                "binding token id must differ from the exit token identity".into(),
            ));
        }

        let tip = ledger
            .load_ancestor_block(0)?
            .ok_or_else(|| LedgerError::ItemMissing("tip block".into()))?;
        let transaction = ledger.load_transaction()?;

        Ok(Self {
            ledger,
            transaction,
            own_identity,
            binding_token_id,
            current_height: tip.height.saturating_add(1),
            aux_proof,
        })
    }

    /// Ledger this call reads from.
    pub fn ledger(&self) -> &'a dyn LedgerView {
        self.ledger
    }

    /// Cell reader over the same ledger.
    pub fn reader(&self) -> CellReader<'a> {
        CellReader::new(self.ledger)
    }

    /// Transaction under validation.
    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    /// Type identity of exit tokens issued by this instance.
    pub fn own_identity(&self) -> &Hash {
        &self.own_identity
    }

    /// Lock identity of cells in protocol custody.
    ///
    /// The escrow address is the protocol's own script identity.
    pub fn custody_lock(&self) -> &Hash {
        &self.own_identity
    }

    /// UDT type this instance escrows.
    pub fn binding_token_id(&self) -> &Hash {
        &self.binding_token_id
    }

    /// Height the transaction is evaluated at.
    pub fn current_height(&self) -> u64 {
        self.current_height
    }

    /// Auxiliary proof bytes required by `phase`.
    pub fn require_aux_proof(&self, phase: Phase) -> Result<&'a [u8], RejectionReason> {
        self.aux_proof.ok_or_else(|| missing_aux_proof(phase))
    }
}

/// Rejection for a proof-carrying phase invoked without its proof.
pub(crate) fn missing_aux_proof(phase: Phase) -> RejectionReason {
    let kind = match phase {
        Phase::Withdraw => ProofKind::OwnershipSignature,
        _ => ProofKind::FraudProof,
    };
    RejectionReason::ArgumentError(format!(
        "{} phase requires an auxiliary proof ({})",
        phase, kind
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryLedger;

    #[test]
    fn test_load_snapshot() {
        let ledger = InMemoryLedger::new([1u8; 32])
            .with_chain(1199, |_| 0)
            .with_valid_since(1200);
        let ctx = ValidationContext::load(&ledger, [2u8; 32], None).unwrap();
        assert_eq!(ctx.current_height(), 1200);
        assert_eq!(ctx.own_identity(), &[1u8; 32]);
        assert_eq!(ctx.custody_lock(), &[1u8; 32]);
        assert_eq!(ctx.binding_token_id(), &[2u8; 32]);
        assert_eq!(ctx.transaction().valid_since, 1200);
    }

    #[test]
    fn test_missing_identity() {
        let ledger = InMemoryLedger::default().with_chain(10, |_| 0);
        assert!(matches!(
            ValidationContext::load(&ledger, [2u8; 32], None),
            Err(RejectionReason::Ledger(LedgerError::ItemMissing(_)))
        ));
    }

    #[test]
    fn test_missing_tip() {
        let ledger = InMemoryLedger::new([1u8; 32]);
        assert!(matches!(
            ValidationContext::load(&ledger, [2u8; 32], None),
            Err(RejectionReason::Ledger(LedgerError::ItemMissing(_)))
        ));
    }

    #[test]
    fn test_binding_equal_to_identity() {
        let ledger = InMemoryLedger::new([1u8; 32]).with_chain(10, |_| 0);
        assert!(matches!(
            ValidationContext::load(&ledger, [1u8; 32], None),
            Err(RejectionReason::ArgumentError(_))
        ));
    }

    #[test]
    fn test_require_aux_proof() {
        let ledger = InMemoryLedger::new([1u8; 32]).with_chain(10, |_| 0);
        let ctx = ValidationContext::load(&ledger, [2u8; 32], None).unwrap();
        let err = ctx.require_aux_proof(Phase::Withdraw).unwrap_err();
        assert!(err.to_string().contains("Ownership signature"));

        let proof = [7u8; 4];
        let ctx = ValidationContext::load(&ledger, [2u8; 32], Some(&proof[..])).unwrap();
        assert_eq!(ctx.require_aux_proof(Phase::Challenge).unwrap(), &proof);
    }
}
