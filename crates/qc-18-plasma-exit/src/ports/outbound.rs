//! # Outbound Ports
//!
//! Capabilities the validator consumes: read-only ledger access, proof
//! verification, and the challenge settlement hook.

use crate::domain::{
    BlockInfo, CellField, ExitTokenCell, Hash, LedgerError, RejectionReason, ScriptCategory,
    Source, Transaction,
};

/// Read-only view of one transaction and its ancestor chain.
///
/// Supplied by the host for a single validation call. Implementations
/// must be deterministic: the same view always answers the same way.
pub trait LedgerView: Send + Sync {
    /// The transaction under validation.
    fn load_transaction(&self) -> Result<Transaction, LedgerError>;

    /// `length` bytes of `field` starting at `offset`.
    ///
    /// Returns fewer bytes when the field is shorter; an empty vector
    /// when `offset` is past its end.
    fn load_cell_field(
        &self,
        source: Source,
        index: usize,
        field: CellField,
        offset: usize,
        length: usize,
    ) -> Result<Vec<u8>, LedgerError>;

    /// Hash of the cell's type or lock script. `None` when the cell has
    /// no script of that category.
    fn load_script_identity(
        &self,
        index: usize,
        source: Source,
        category: ScriptCategory,
    ) -> Result<Option<Hash>, LedgerError>;

    /// Ancestor block `height_offset` blocks behind the tip (0 = tip).
    fn load_ancestor_block(&self, height_offset: u64) -> Result<Option<BlockInfo>, LedgerError>;

    /// Block by hash.
    fn load_block(&self, hash: &Hash) -> Result<Option<BlockInfo>, LedgerError>;
}

/// Fraud-proof and ownership verification.
///
/// The validator never assumes a particular scheme; deployments inject
/// the implementation.
pub trait ProofVerifier: Send + Sync {
    /// Does `proof` show that the pending `claim` is fraudulent?
    fn verify_fraud_proof(&self, claim: &ExitTokenCell, proof: &[u8]) -> bool;

    /// Does `signature` prove ownership of `claim`?
    fn verify_ownership(&self, claim: &ExitTokenCell, signature: &[u8]) -> bool;
}

/// Settlement of a successful challenge.
///
/// How a proven-fraudulent claim redirects the escrowed UDT away from
/// its claimant is not defined by the exit rules. This hook runs after a
/// challenge passes every other check and may impose further
/// constraints on the transaction.
pub trait ChallengeSettlement: Send + Sync {
    /// Accept or reject the challenge transaction's settlement.
    fn check_settlement(
        &self,
        claim: &ExitTokenCell,
        transaction: &Transaction,
    ) -> Result<(), RejectionReason>;
}

impl<T: ProofVerifier + ?Sized> ProofVerifier for Box<T> {
    fn verify_fraud_proof(&self, claim: &ExitTokenCell, proof: &[u8]) -> bool {
        (**self).verify_fraud_proof(claim, proof)
    }

    fn verify_ownership(&self, claim: &ExitTokenCell, signature: &[u8]) -> bool {
        (**self).verify_ownership(claim, signature)
    }
}
