//! Programmable transaction block (PTB) wire types.
//!
//! These mirror the ledger's binary layout for `TransactionData`. Enum
//! variant order and struct field order are both load-bearing: the
//! serialized bytes are what gets signed and submitted, so any
//! rearrangement produces transactions the validators reject.

use crate::address::{ObjectId, SuiAddress};
use crate::digest::ObjectDigest;
use crate::type_tag::{Identifier, TypeTag};
use serde::{Deserialize, Serialize};

/// A reference to an owned object at a specific version.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectRef {
    /// The object's ID.
    pub id: ObjectId,
    /// The version the transaction was built against.
    pub version: u64,
    /// The digest of the object at that version.
    pub digest: ObjectDigest,
}

impl ObjectRef {
    /// Creates an object reference.
    pub fn new(id: ObjectId, version: u64, digest: ObjectDigest) -> Self {
        Self {
            id,
            version,
            digest,
        }
    }
}

/// An input slot of a programmable transaction block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallArg {
    /// BCS-encoded bytes of a plain value (integers, addresses, vectors).
    Pure(Vec<u8>),
    /// A reference to an on-chain object.
    Object(ObjectArg),
}

/// How an object input is passed to the transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectArg {
    /// An object owned by the sender, pinned at a version and digest.
    ImmOrOwnedObject(ObjectRef),
    /// A shared object, referenced by its initial shared version.
    SharedObject {
        /// The object's ID.
        id: ObjectId,
        /// The version at which the object became shared.
        initial_shared_version: u64,
        /// Whether the transaction takes the object mutably.
        mutable: bool,
    },
    /// An object sent to the sender but not yet received.
    Receiving(ObjectRef),
}

impl ObjectArg {
    /// Returns the ID of the referenced object.
    pub fn id(&self) -> ObjectId {
        match self {
            ObjectArg::ImmOrOwnedObject(obj_ref) | ObjectArg::Receiving(obj_ref) => obj_ref.id,
            ObjectArg::SharedObject { id, .. } => *id,
        }
    }
}

/// A single command within a programmable transaction block.
///
/// The scripts only issue the first four; the trailing variants exist
/// to keep the enum's layout identical to the ledger's.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Call a Move entry function.
    MoveCall(Box<ProgrammableMoveCall>),
    /// Transfer objects to a recipient address.
    TransferObjects(Vec<Argument>, Argument),
    /// Split amounts off a coin, producing one new coin per amount.
    SplitCoins(Argument, Vec<Argument>),
    /// Merge source coins into a destination coin.
    MergeCoins(Argument, Vec<Argument>),
    /// Publish a package: module bytecode plus dependency package IDs.
    Publish(Vec<Vec<u8>>, Vec<ObjectId>),
    /// Build a Move vector, optionally annotated with its element type.
    MakeMoveVec(Option<TypeTag>, Vec<Argument>),
    /// Upgrade a package: bytecode, dependencies, the package being
    /// upgraded, and the upgrade ticket.
    Upgrade(Vec<Vec<u8>>, Vec<ObjectId>, ObjectId, Argument),
}

/// The payload of a [`Command::MoveCall`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgrammableMoveCall {
    /// The package containing the function.
    pub package: ObjectId,
    /// The module within the package.
    pub module: Identifier,
    /// The function name.
    pub function: Identifier,
    /// Type arguments to the function.
    pub type_arguments: Vec<TypeTag>,
    /// Value arguments, referencing inputs or prior results.
    pub arguments: Vec<Argument>,
}

/// An argument to a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Argument {
    /// The gas coin. Only usable by value with `TransferObjects`.
    GasCoin,
    /// The input at the given index.
    Input(u16),
    /// The sole result of the command at the given index.
    Result(u16),
    /// One element of a multi-result command: (command index, result index).
    NestedResult(u16, u16),
}

/// A programmable transaction: inputs plus the commands that consume them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgrammableTransaction {
    /// Input slots, referenced by commands as `Input(i)`.
    pub inputs: Vec<CallArg>,
    /// Commands, executed in order.
    pub commands: Vec<Command>,
}

/// The kind of transaction. Programmable blocks are variant zero;
/// system transaction kinds are not modeled here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    /// A user-built programmable transaction block.
    ProgrammableTransaction(ProgrammableTransaction),
}

/// Gas parameters for a transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasData {
    /// Coins paying for gas.
    pub payment: Vec<ObjectRef>,
    /// The address owning the payment coins.
    pub owner: SuiAddress,
    /// Gas price in MIST per unit.
    pub price: u64,
    /// Maximum gas spend in MIST.
    pub budget: u64,
}

/// When the transaction stops being valid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionExpiration {
    /// Valid until executed.
    None,
    /// Valid until the end of the given epoch.
    Epoch(u64),
}

/// The signed payload of a transaction, version 1.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDataV1 {
    /// What the transaction does.
    pub kind: TransactionKind,
    /// The sending address.
    pub sender: SuiAddress,
    /// Gas payment, price and budget.
    pub gas_data: GasData,
    /// Expiration, usually [`TransactionExpiration::None`].
    pub expiration: TransactionExpiration,
}

/// The versioned transaction envelope. This is the value that gets
/// BCS-serialized, signed and submitted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionData {
    /// The only version currently defined.
    V1(TransactionDataV1),
}

impl TransactionData {
    /// Assembles a v1 programmable transaction with no expiration.
    pub fn new_programmable(
        sender: SuiAddress,
        pt: ProgrammableTransaction,
        gas_data: GasData,
    ) -> Self {
        TransactionData::V1(TransactionDataV1 {
            kind: TransactionKind::ProgrammableTransaction(pt),
            sender,
            gas_data,
            expiration: TransactionExpiration::None,
        })
    }

    /// Returns the sender address.
    pub fn sender(&self) -> SuiAddress {
        match self {
            TransactionData::V1(data) => data.sender,
        }
    }

    /// Returns the gas budget in MIST.
    pub fn gas_budget(&self) -> u64 {
        match self {
            TransactionData::V1(data) => data.gas_data.budget,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_ref() -> ObjectRef {
        ObjectRef::new(
            ObjectId::from_hex("0xabc").unwrap(),
            5,
            ObjectDigest::new([3u8; 32]),
        )
    }

    #[test]
    fn test_call_arg_variant_order() {
        let pure = bcs::to_bytes(&CallArg::Pure(vec![1, 2])).unwrap();
        assert_eq!(pure, vec![0, 2, 1, 2]);

        let obj = bcs::to_bytes(&CallArg::Object(ObjectArg::ImmOrOwnedObject(test_ref()))).unwrap();
        assert_eq!(obj[0], 1); // CallArg::Object
        assert_eq!(obj[1], 0); // ObjectArg::ImmOrOwnedObject
    }

    #[test]
    fn test_shared_object_layout() {
        let arg = ObjectArg::SharedObject {
            id: ObjectId::from_hex("0x6").unwrap(),
            initial_shared_version: 1,
            mutable: false,
        };
        let bytes = bcs::to_bytes(&arg).unwrap();
        // variant 1, 32-byte ID, u64 version, bool mutable.
        assert_eq!(bytes.len(), 1 + 32 + 8 + 1);
        assert_eq!(bytes[0], 1);
        assert_eq!(bytes[33], 1); // version little-endian
        assert_eq!(bytes[41], 0); // mutable = false
    }

    #[test]
    fn test_object_ref_layout() {
        let bytes = bcs::to_bytes(&test_ref()).unwrap();
        // 32-byte ID, u64 version, length-prefixed 32-byte digest.
        assert_eq!(bytes.len(), 32 + 8 + 33);
        assert_eq!(bytes[32], 5);
    }

    #[test]
    fn test_argument_variant_order() {
        assert_eq!(bcs::to_bytes(&Argument::GasCoin).unwrap(), vec![0]);
        assert_eq!(bcs::to_bytes(&Argument::Input(3)).unwrap(), vec![1, 3, 0]);
        assert_eq!(bcs::to_bytes(&Argument::Result(1)).unwrap(), vec![2, 1, 0]);
        assert_eq!(
            bcs::to_bytes(&Argument::NestedResult(2, 1)).unwrap(),
            vec![3, 2, 0, 1, 0]
        );
    }

    #[test]
    fn test_command_variant_order() {
        let split = Command::SplitCoins(Argument::GasCoin, vec![Argument::Input(0)]);
        assert_eq!(bcs::to_bytes(&split).unwrap()[0], 2);

        let transfer =
            Command::TransferObjects(vec![Argument::NestedResult(0, 0)], Argument::Input(1));
        assert_eq!(bcs::to_bytes(&transfer).unwrap()[0], 1);

        let merge = Command::MergeCoins(Argument::GasCoin, vec![Argument::Result(0)]);
        assert_eq!(bcs::to_bytes(&merge).unwrap()[0], 3);
    }

    #[test]
    fn test_trailing_command_variants() {
        let publish = Command::Publish(vec![], vec![]);
        assert_eq!(bcs::to_bytes(&publish).unwrap(), vec![4, 0, 0]);

        let make_vec = Command::MakeMoveVec(None, vec![Argument::Input(0)]);
        assert_eq!(bcs::to_bytes(&make_vec).unwrap()[0], 5);

        let upgrade = Command::Upgrade(
            vec![],
            vec![],
            ObjectId::from_hex("0x2").unwrap(),
            Argument::Result(0),
        );
        assert_eq!(bcs::to_bytes(&upgrade).unwrap()[0], 6);
    }

    #[test]
    fn test_transaction_data_layout() {
        let pt = ProgrammableTransaction {
            inputs: vec![],
            commands: vec![],
        };
        let gas = GasData {
            payment: vec![test_ref()],
            owner: SuiAddress::from_hex("0x1").unwrap(),
            price: 1000,
            budget: 10_000_000,
        };
        let data = TransactionData::new_programmable(SuiAddress::from_hex("0x1").unwrap(), pt, gas);
        let bytes = bcs::to_bytes(&data).unwrap();
        // V1 envelope, ProgrammableTransaction kind, empty inputs,
        // empty commands, then sender.
        assert_eq!(&bytes[..4], &[0, 0, 0, 0]);
        assert_eq!(bytes[4 + 31], 1); // sender 0x1

        let back: TransactionData = bcs::from_bytes(&bytes).unwrap();
        assert_eq!(data, back);
        assert_eq!(back.gas_budget(), 10_000_000);
    }

    #[test]
    fn test_expiration_none_is_single_byte() {
        assert_eq!(
            bcs::to_bytes(&TransactionExpiration::None).unwrap(),
            vec![0]
        );
        assert_eq!(
            bcs::to_bytes(&TransactionExpiration::Epoch(2)).unwrap(),
            vec![1, 2, 0, 0, 0, 0, 0, 0, 0]
        );
    }
}
