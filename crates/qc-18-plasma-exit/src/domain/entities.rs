//! # Domain Entities
//!
//! Cells and transactions as the validator sees them. None of these are
//! owned by the validator; they are snapshots read through `LedgerView`
//! for the duration of one call.

use super::codec::ExitTokenData;
use super::errors::Hash;
use super::value_objects::ExitStatus;
use serde::{Deserialize, Serialize};

/// Free or escrowed value of one fungible token kind (UDT).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FungibleTokenCell {
    /// Token quantity.
    pub amount: u64,
    /// Token kind.
    pub type_id: Option<Hash>,
    /// Spending authority.
    pub lock_id: Hash,
}

impl FungibleTokenCell {
    /// Whether the cell holds the given token kind.
    pub fn is_token(&self, token_id: &Hash) -> bool {
        self.type_id.as_ref() == Some(token_id)
    }
}

/// Claim against escrowed UDT, tracked through the exit lifecycle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitTokenCell {
    /// Claimed quantity.
    pub amount: u64,
    /// Lifecycle status.
    pub status: ExitStatus,
    /// Height the withdrawal started at; set iff PendingWithdrawal.
    pub start_withdraw_height: Option<u64>,
    /// Issuing protocol instance.
    pub type_id: Option<Hash>,
    /// Spending authority.
    pub lock_id: Hash,
}

impl ExitTokenCell {
    /// Assemble a cell from decoded data and its script identities.
    pub fn from_parts(data: ExitTokenData, type_id: Option<Hash>, lock_id: Hash) -> Self {
        Self {
            amount: data.amount(),
            status: data.status(),
            start_withdraw_height: data.start_withdraw_height(),
            type_id,
            lock_id,
        }
    }
}

/// Reference to a previous transaction output.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutPoint {
    /// Creating transaction.
    pub tx_hash: Hash,
    /// Output index within it.
    pub index: u32,
}

/// Transaction input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellInput {
    /// Consumed cell.
    pub previous_output: OutPoint,
}

/// Transaction output header; contents are read per field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellOutput {
    /// Native capacity of the cell.
    pub capacity: u64,
}

/// Candidate transaction, read-only.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Consumed cells, in order.
    pub inputs: Vec<CellInput>,
    /// Created cells, in order.
    pub outputs: Vec<CellOutput>,
    /// Earliest height the transaction may be committed at.
    pub valid_since: u64,
    /// Block dependencies, used as congestion evidence.
    pub block_deps: Vec<Hash>,
}
