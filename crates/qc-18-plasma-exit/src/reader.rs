//! # Cell Reader
//!
//! Typed access to transaction cells through a `LedgerView`: script
//! identities plus data decoded with `ExitTokenCodec`. Single fields are
//! loaded by offset; whole cells are loaded at once and decoded by the
//! codec.

use crate::domain::{
    CellField, CellLocation, CodecError, ExitStatus, ExitTokenCell, ExitTokenCodec,
    FungibleTokenCell, Hash, LedgerError, RejectionReason, ScriptCategory,
};
use crate::ports::LedgerView;

/// Reads and decodes cells of the transaction under validation.
#[derive(Clone, Copy)]
pub struct CellReader<'a> {
    ledger: &'a dyn LedgerView,
}

impl<'a> CellReader<'a> {
    /// Wrap a ledger view.
    pub fn new(ledger: &'a dyn LedgerView) -> Self {
        Self { ledger }
    }

    /// Type script identity, if any.
    pub fn type_id(&self, at: CellLocation) -> Result<Option<Hash>, RejectionReason> {
        Ok(self
            .ledger
            .load_script_identity(at.index, at.source, ScriptCategory::Type)?)
    }

    /// Lock script identity. Every cell has one.
    pub fn lock_id(&self, at: CellLocation) -> Result<Hash, RejectionReason> {
        self.ledger
            .load_script_identity(at.index, at.source, ScriptCategory::Lock)?
            .ok_or_else(|| LedgerError::ItemMissing(format!("lock script of {}", at)).into())
    }

    /// Token quantity at offset 0.
    pub fn amount(&self, at: CellLocation) -> Result<u64, RejectionReason> {
        let bytes = self.load(at, ExitTokenCodec::AMOUNT_OFFSET, ExitTokenCodec::FIELD_LEN)?;
        ExitTokenCodec::decode_fungible(&bytes).map_err(|e| malformed(at, e))
    }

    /// Exit token status at offset 8.
    pub fn status(&self, at: CellLocation) -> Result<ExitStatus, RejectionReason> {
        let bytes = self.load(at, ExitTokenCodec::STATUS_OFFSET, ExitTokenCodec::FIELD_LEN)?;
        ExitTokenCodec::decode_status(&bytes).map_err(|e| malformed(at, e))
    }

    /// Start-withdraw height at offset 16.
    pub fn start_withdraw_height(&self, at: CellLocation) -> Result<u64, RejectionReason> {
        let bytes = self.load(
            at,
            ExitTokenCodec::START_HEIGHT_OFFSET,
            ExitTokenCodec::FIELD_LEN,
        )?;
        ExitTokenCodec::decode_field("start_withdraw_height", &bytes)
            .map_err(|e| malformed(at, e))
    }

    /// Whole fungible token cell.
    pub fn fungible(&self, at: CellLocation) -> Result<FungibleTokenCell, RejectionReason> {
        Ok(FungibleTokenCell {
            amount: self.amount(at)?,
            type_id: self.type_id(at)?,
            lock_id: self.lock_id(at)?,
        })
    }

    /// Whole exit token cell; the start height is decoded only for
    /// pending claims.
    pub fn exit_token(&self, at: CellLocation) -> Result<ExitTokenCell, RejectionReason> {
        let bytes = self.load(at, 0, ExitTokenCodec::EXIT_DATA_LEN)?;
        let data = ExitTokenCodec::decode_exit(&bytes).map_err(|e| malformed(at, e))?;
        Ok(ExitTokenCell::from_parts(
            data,
            self.type_id(at)?,
            self.lock_id(at)?,
        ))
    }

    fn load(
        &self,
        at: CellLocation,
        offset: usize,
        length: usize,
    ) -> Result<Vec<u8>, RejectionReason> {
        Ok(self
            .ledger
            .load_cell_field(at.source, at.index, CellField::Data, offset, length)?)
    }
}

fn malformed(at: CellLocation, err: CodecError) -> RejectionReason {
    RejectionReason::MalformedCell {
        at,
        reason: err.to_string(),
    }
}
