//! In-Memory Ledger Adapter
//!
//! Implements `LedgerView` over plain vectors and maps. Deterministic:
//! out-points and identities are derived with SHA-256 from indices and
//! labels, never from randomness or wall-clock time.

use crate::domain::{
    BlockInfo, CellField, CellInput, CellLocation, CellOutput, ExitTokenCodec, ExitTokenData,
    Hash, LedgerError, OutPoint, ScriptCategory, Source, Transaction,
};
use crate::ports::LedgerView;
use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// Default capacity given to cells built by the helpers.
const DEFAULT_CAPACITY: u64 = 142;

/// Derive a reproducible 32-byte identity from a label.
pub fn identity_from_label(label: &str) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(label.as_bytes());
    hasher.finalize().into()
}

fn outpoint_hash(index: usize) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(b"qc-18/outpoint");
    hasher.update((index as u64).to_le_bytes());
    hasher.finalize().into()
}

/// A cell held by the in-memory ledger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerCell {
    /// Raw cell data.
    pub data: Vec<u8>,
    /// Type script hash.
    pub type_id: Option<Hash>,
    /// Lock script hash.
    pub lock_id: Hash,
    /// Native capacity.
    pub capacity: u64,
}

impl LedgerCell {
    /// Cell with arbitrary data.
    pub fn raw(data: Vec<u8>, type_id: Option<Hash>, lock_id: Hash) -> Self {
        Self {
            data,
            type_id,
            lock_id,
            capacity: DEFAULT_CAPACITY,
        }
    }

    /// Fungible token cell.
    pub fn fungible(amount: u64, type_id: Hash, lock_id: Hash) -> Self {
        Self::raw(ExitTokenCodec::encode_fungible(amount), Some(type_id), lock_id)
    }

    /// Exit token cell.
    pub fn exit_token(data: &ExitTokenData, type_id: Hash, lock_id: Hash) -> Self {
        Self::raw(ExitTokenCodec::encode_exit(data), Some(type_id), lock_id)
    }
}

/// Deterministic in-memory `LedgerView`.
#[derive(Clone, Debug, Default)]
pub struct InMemoryLedger {
    own_identity: Option<Hash>,
    inputs: Vec<LedgerCell>,
    outputs: Vec<LedgerCell>,
    valid_since: u64,
    /// Index 0 is the tip.
    ancestors: Vec<BlockInfo>,
    blocks: HashMap<Hash, BlockInfo>,
    block_deps: Vec<Hash>,
}

impl InMemoryLedger {
    /// Ledger whose running script has type identity `own_identity`.
    pub fn new(own_identity: Hash) -> Self {
        Self {
            own_identity: Some(own_identity),
            ..Self::default()
        }
    }

    /// Append an input cell.
    pub fn with_input(mut self, cell: LedgerCell) -> Self {
        self.inputs.push(cell);
        self
    }

    /// Append an output cell.
    pub fn with_output(mut self, cell: LedgerCell) -> Self {
        self.outputs.push(cell);
        self
    }

    /// Set the transaction's `valid_since`.
    pub fn with_valid_since(mut self, height: u64) -> Self {
        self.valid_since = height;
        self
    }

    /// Ancestor chain from genesis to `tip`, with `cycles_at(height)`
    /// cycles per block.
    pub fn with_chain(self, tip: u64, cycles_at: impl Fn(u64) -> u64) -> Self {
        self.with_chain_from(0, tip, cycles_at)
    }

    /// Ancestor chain covering only `lowest..=tip`.
    pub fn with_chain_from(
        mut self,
        lowest: u64,
        tip: u64,
        cycles_at: impl Fn(u64) -> u64,
    ) -> Self {
        self.ancestors = (lowest..=tip)
            .rev()
            .map(|height| BlockInfo::new(height, cycles_at(height)))
            .collect();
        self
    }

    /// Register a block and cite it as a block dependency.
    pub fn with_block_dep(mut self, hash: Hash, block: BlockInfo) -> Self {
        self.blocks.insert(hash, block);
        self.block_deps.push(hash);
        self
    }

    fn cell(&self, source: Source, index: usize) -> Result<&LedgerCell, LedgerError> {
        let cells = match source {
            Source::Input => self.inputs.as_slice(),
            Source::Output => self.outputs.as_slice(),
            Source::Current => &[],
        };
        cells
            .get(index)
            .ok_or(LedgerError::IndexOutOfBound(CellLocation::new(source, index)))
    }
}

impl LedgerView for InMemoryLedger {
    fn load_transaction(&self) -> Result<Transaction, LedgerError> {
        let inputs = (0..self.inputs.len())
            .map(|index| CellInput {
                previous_output: OutPoint {
                    tx_hash: outpoint_hash(index),
                    index: index as u32,
                },
            })
            .collect();
        let outputs = self
            .outputs
            .iter()
            .map(|cell| CellOutput {
                capacity: cell.capacity,
            })
            .collect();

        Ok(Transaction {
            inputs,
            outputs,
            valid_since: self.valid_since,
            block_deps: self.block_deps.clone(),
        })
    }

    fn load_cell_field(
        &self,
        source: Source,
        index: usize,
        field: CellField,
        offset: usize,
        length: usize,
    ) -> Result<Vec<u8>, LedgerError> {
        let cell = self.cell(source, index)?;
        let bytes = match field {
            CellField::Data => &cell.data,
        };
        let start = offset.min(bytes.len());
        let end = offset.saturating_add(length).min(bytes.len());
        Ok(bytes[start..end].to_vec())
    }

    fn load_script_identity(
        &self,
        index: usize,
        source: Source,
        category: ScriptCategory,
    ) -> Result<Option<Hash>, LedgerError> {
        if source == Source::Current {
            return Ok(match category {
                ScriptCategory::Type => self.own_identity,
                ScriptCategory::Lock => None,
            });
        }
        let cell = self.cell(source, index)?;
        Ok(match category {
            ScriptCategory::Type => cell.type_id,
            ScriptCategory::Lock => Some(cell.lock_id),
        })
    }

    fn load_ancestor_block(&self, height_offset: u64) -> Result<Option<BlockInfo>, LedgerError> {
        Ok(usize::try_from(height_offset)
            .ok()
            .and_then(|offset| self.ancestors.get(offset))
            .copied())
    }

    fn load_block(&self, hash: &Hash) -> Result<Option<BlockInfo>, LedgerError> {
        Ok(self.blocks.get(hash).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_from_label_deterministic() {
        assert_eq!(identity_from_label("udt"), identity_from_label("udt"));
        assert_ne!(identity_from_label("udt"), identity_from_label("plasma"));
    }

    #[test]
    fn test_transaction_shape() {
        let ledger = InMemoryLedger::new([1u8; 32])
            .with_input(LedgerCell::fungible(10, [2u8; 32], [3u8; 32]))
            .with_output(LedgerCell::fungible(10, [2u8; 32], [1u8; 32]))
            .with_output(LedgerCell::exit_token(
                &ExitTokenData::deposited(10),
                [1u8; 32],
                [3u8; 32],
            ))
            .with_valid_since(77);
        let tx = ledger.load_transaction().unwrap();
        assert_eq!(tx.inputs.len(), 1);
        assert_eq!(tx.outputs.len(), 2);
        assert_eq!(tx.valid_since, 77);
        assert_eq!(tx.inputs[0].previous_output.index, 0);
    }

    #[test]
    fn test_load_cell_field_slices() {
        let ledger = InMemoryLedger::new([1u8; 32]).with_output(LedgerCell::exit_token(
            &ExitTokenData::pending(5, 1000),
            [1u8; 32],
            [1u8; 32],
        ));
        let status = ledger
            .load_cell_field(Source::Output, 0, CellField::Data, 8, 8)
            .unwrap();
        assert_eq!(status, 1u64.to_le_bytes());
        let past_end = ledger
            .load_cell_field(Source::Output, 0, CellField::Data, 40, 8)
            .unwrap();
        assert!(past_end.is_empty());
    }

    #[test]
    fn test_index_out_of_bound() {
        let ledger = InMemoryLedger::new([1u8; 32]);
        assert_eq!(
            ledger.load_script_identity(0, Source::Input, ScriptCategory::Type),
            Err(LedgerError::IndexOutOfBound(CellLocation::input(0)))
        );
    }

    #[test]
    fn test_current_identity() {
        let ledger = InMemoryLedger::new([1u8; 32]);
        assert_eq!(
            ledger.load_script_identity(0, Source::Current, ScriptCategory::Type),
            Ok(Some([1u8; 32]))
        );
        assert_eq!(
            InMemoryLedger::default().load_script_identity(0, Source::Current, ScriptCategory::Type),
            Ok(None)
        );
    }

    #[test]
    fn test_ancestors_indexed_from_tip() {
        let ledger = InMemoryLedger::new([1u8; 32]).with_chain(10, |h| h * 100);
        assert_eq!(ledger.load_ancestor_block(0).unwrap(), Some(BlockInfo::new(10, 1000)));
        assert_eq!(ledger.load_ancestor_block(10).unwrap(), Some(BlockInfo::new(0, 0)));
        assert_eq!(ledger.load_ancestor_block(11).unwrap(), None);
    }
}
