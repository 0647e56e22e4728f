//! # Cell Data Codec
//!
//! Fixed little-endian layout of fungible token and exit token cell data.
//!
//! | Field                 | Offset | Length |
//! |-----------------------|--------|--------|
//! | amount                | 0      | 8      |
//! | status                | 8      | 8      |
//! | start_withdraw_height | 16     | 8      |
//!
//! A fungible token cell carries only `amount`. `start_withdraw_height`
//! is present only when status is PendingWithdrawal. Trailing bytes are
//! ignored.

use super::value_objects::ExitStatus;
use serde::Serialize;
use thiserror::Error;

/// Decoding failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CodecError {
    /// Fewer bytes than the field needs.
    #[error("{field} truncated: expected {expected} bytes, got {actual}")]
    Truncated {
        /// Field being read
        field: &'static str,
        /// Bytes required
        expected: usize,
        /// Bytes available
        actual: usize,
    },

    /// Status code other than 0 or 1.
    #[error("unknown status code {0}")]
    UnknownStatus(u64),
}

/// Data portion of an exit token cell.
///
/// Built only through `deposited` and `pending`, so a start height is
/// present exactly when the status is PendingWithdrawal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExitTokenData {
    amount: u64,
    status: ExitStatus,
    start_withdraw_height: Option<u64>,
}

impl ExitTokenData {
    /// Freshly minted claim.
    pub fn deposited(amount: u64) -> Self {
        Self {
            amount,
            status: ExitStatus::Deposited,
            start_withdraw_height: None,
        }
    }

    /// Claim whose withdrawal started at `start_height`.
    pub fn pending(amount: u64, start_height: u64) -> Self {
        Self {
            amount,
            status: ExitStatus::PendingWithdrawal,
            start_withdraw_height: Some(start_height),
        }
    }

    /// Claimed quantity.
    pub fn amount(&self) -> u64 {
        self.amount
    }

    /// Lifecycle status.
    pub fn status(&self) -> ExitStatus {
        self.status
    }

    /// Start height; `Some` iff PendingWithdrawal.
    pub fn start_withdraw_height(&self) -> Option<u64> {
        self.start_withdraw_height
    }
}

/// Encoder/decoder for the fixed cell layout.
pub struct ExitTokenCodec;

impl ExitTokenCodec {
    /// Width of every field.
    pub const FIELD_LEN: usize = 8;
    /// Offset of `amount`.
    pub const AMOUNT_OFFSET: usize = 0;
    /// Offset of `status`.
    pub const STATUS_OFFSET: usize = 8;
    /// Offset of `start_withdraw_height`.
    pub const START_HEIGHT_OFFSET: usize = 16;
    /// Longest exit token encoding.
    pub const EXIT_DATA_LEN: usize = 3 * Self::FIELD_LEN;

    /// Encode fungible token data.
    pub fn encode_fungible(amount: u64) -> Vec<u8> {
        amount.to_le_bytes().to_vec()
    }

    /// Encode exit token data.
    pub fn encode_exit(data: &ExitTokenData) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::EXIT_DATA_LEN);
        out.extend_from_slice(&data.amount.to_le_bytes());
        out.extend_from_slice(&data.status.code().to_le_bytes());
        if let Some(height) = data.start_withdraw_height {
            out.extend_from_slice(&height.to_le_bytes());
        }
        out
    }

    /// Decode one 8-byte little-endian field.
    pub fn decode_field(field: &'static str, bytes: &[u8]) -> Result<u64, CodecError> {
        let raw: [u8; 8] = bytes
            .get(..Self::FIELD_LEN)
            .and_then(|b| b.try_into().ok())
            .ok_or(CodecError::Truncated {
                field,
                expected: Self::FIELD_LEN,
                actual: bytes.len(),
            })?;
        Ok(u64::from_le_bytes(raw))
    }

    /// Decode a status field.
    pub fn decode_status(bytes: &[u8]) -> Result<ExitStatus, CodecError> {
        let code = Self::decode_field("status", bytes)?;
        ExitStatus::from_code(code).ok_or(CodecError::UnknownStatus(code))
    }

    /// Decode fungible token data.
    pub fn decode_fungible(data: &[u8]) -> Result<u64, CodecError> {
        Self::decode_field("amount", Self::slice(data, Self::AMOUNT_OFFSET))
    }

    /// Decode exit token data.
    pub fn decode_exit(data: &[u8]) -> Result<ExitTokenData, CodecError> {
        let amount = Self::decode_field("amount", Self::slice(data, Self::AMOUNT_OFFSET))?;
        let status = Self::decode_status(Self::slice(data, Self::STATUS_OFFSET))?;
        Ok(match status {
            ExitStatus::Deposited => ExitTokenData::deposited(amount),
            ExitStatus::PendingWithdrawal => ExitTokenData::pending(
                amount,
                Self::decode_field(
                    "start_withdraw_height",
                    Self::slice(data, Self::START_HEIGHT_OFFSET),
                )?,
            ),
        })
    }

    fn slice(data: &[u8], offset: usize) -> &[u8] {
        data.get(offset..).unwrap_or(&[])
    }
}
