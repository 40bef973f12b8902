//! Core Sui ledger types shared across the pond workspace.
//!
//! This crate models the slice of the Sui data model the pond scripts
//! touch: 32-byte addresses and object IDs, base58 digests, Move type
//! tags, the programmable transaction block (PTB) wire types, and the
//! JSON-RPC response types for effects and object changes.
//!
//! Everything here is plain data. Building, signing and submitting
//! transactions lives in `pond-sdk`.

#![forbid(unsafe_code)]
#![warn(missing_debug_implementations, rust_2018_idioms)]

pub mod address;
pub mod digest;
pub mod effects;
pub mod error;
pub mod transaction;
pub mod type_tag;

pub use address::{ObjectId, SuiAddress, ADDRESS_LENGTH};
pub use digest::{ObjectDigest, TransactionDigest};
pub use effects::{
    ExecutionStatus, ObjectChange, Owner, TransactionBlockResponse, TransactionEffects,
};
pub use error::TypeError;
pub use transaction::{
    Argument, CallArg, Command, GasData, ObjectArg, ObjectRef, ProgrammableMoveCall,
    ProgrammableTransaction, TransactionData, TransactionExpiration, TransactionKind,
};
pub use type_tag::{Identifier, StructTag, TypeTag};

/// The singleton Clock object (`0x6`), readable by every transaction.
pub const CLOCK_OBJECT: ObjectId = ObjectId::new({
    let mut bytes = [0u8; address::ADDRESS_LENGTH];
    bytes[address::ADDRESS_LENGTH - 1] = 6;
    bytes
});

/// The Sui framework package (`0x2`: coin, balance, transfer, ...).
pub const SUI_FRAMEWORK: ObjectId = ObjectId::new({
    let mut bytes = [0u8; address::ADDRESS_LENGTH];
    bytes[address::ADDRESS_LENGTH - 1] = 2;
    bytes
});

/// Fully qualified type of the native gas coin.
pub const SUI_COIN_TYPE: &str = "0x2::sui::SUI";
