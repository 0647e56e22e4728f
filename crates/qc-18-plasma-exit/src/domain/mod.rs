//! # Domain Module
//!
//! Core domain types for exit verification: cells, statuses, the cell
//! data layout, configuration and rejection reasons. No I/O.

pub mod codec;
pub mod config;
pub mod entities;
pub mod errors;
pub mod invariants;
pub mod value_objects;

pub use codec::{CodecError, ExitTokenCodec, ExitTokenData};
pub use config::*;
pub use entities::*;
pub use errors::*;
pub use invariants::*;
pub use value_objects::*;
