//! Programmable transaction block builder.
//!
//! The builder hands out typed argument handles instead of raw
//! indices. Each handle remembers which builder created it, so an
//! argument from one transaction cannot be spliced into another, and
//! results of earlier commands can only be referenced after the
//! command that produces them exists. Inputs are recorded by value or
//! object ID only; versions and digests are resolved against the
//! fullnode at submission time.

use crate::error::{SdkError, SdkResult};
use pond_sdk_types::{
    Argument, Command, Identifier, ObjectId, ProgrammableMoveCall, TypeError, TypeTag,
};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

static BUILDER_COUNTER: AtomicU64 = AtomicU64::new(0);

/// An argument handle scoped to the builder that created it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TxArgument {
    builder_id: u64,
    arg: Argument,
}

impl TxArgument {
    /// The underlying wire-format argument.
    pub fn as_argument(&self) -> Argument {
        self.arg
    }
}

/// The results of a move call, indexable into typed handles.
#[derive(Clone, Copy, Debug)]
pub struct CallResults {
    builder_id: u64,
    command_index: u16,
}

impl CallResults {
    /// The sole result of the call.
    pub fn single(&self) -> TxArgument {
        TxArgument {
            builder_id: self.builder_id,
            arg: Argument::Result(self.command_index),
        }
    }

    /// The `index`-th result of a call returning several values.
    pub fn nth(&self, index: u16) -> TxArgument {
        TxArgument {
            builder_id: self.builder_id,
            arg: Argument::NestedResult(self.command_index, index),
        }
    }
}

/// An input slot recorded by the builder, before on-chain resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransactionInput {
    /// BCS bytes of a plain value.
    Pure(Vec<u8>),
    /// An object, to be resolved to a reference at submission.
    Object(ObjectId),
}

/// Builds a programmable transaction block command by command.
///
/// # Example
///
/// ```rust
/// use pond_sdk::TransactionBuilder;
/// use pond_sdk_types::SuiAddress;
///
/// let mut tx = TransactionBuilder::new();
/// let amount = tx.pure(&1000u64).unwrap();
/// let coins = tx.split_coins(tx.gas_coin(), vec![amount]).unwrap();
/// let recipient = tx.pure(&SuiAddress::from_hex("0x2").unwrap()).unwrap();
/// tx.transfer_objects(coins, recipient).unwrap();
/// tx.set_gas_budget(10_000_000);
/// let prepared = tx.finish().unwrap();
/// assert_eq!(prepared.commands().len(), 2);
/// ```
#[derive(Debug)]
pub struct TransactionBuilder {
    id: u64,
    inputs: Vec<TransactionInput>,
    commands: Vec<Command>,
    gas_budget: Option<u64>,
    gas_price: Option<u64>,
}

impl TransactionBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self {
            id: BUILDER_COUNTER.fetch_add(1, Ordering::Relaxed),
            inputs: Vec::new(),
            commands: Vec::new(),
            gas_budget: None,
            gas_price: None,
        }
    }

    /// A handle to the gas coin. It may be split from, or transferred
    /// whole, in which case the remainder after gas still goes with it.
    pub fn gas_coin(&self) -> TxArgument {
        TxArgument {
            builder_id: self.id,
            arg: Argument::GasCoin,
        }
    }

    /// Adds a pure input (integer, address, vector of plain values).
    pub fn pure<T: Serialize + ?Sized>(&mut self, value: &T) -> SdkResult<TxArgument> {
        let bytes = bcs::to_bytes(value)?;
        self.push_input(TransactionInput::Pure(bytes))
    }

    /// Adds an object input by ID. The same ID always maps to the same
    /// input slot, so repeated uses of a shared object do not conflict.
    pub fn object(&mut self, id: ObjectId) -> SdkResult<TxArgument> {
        let existing = self
            .inputs
            .iter()
            .position(|input| matches!(input, TransactionInput::Object(existing) if *existing == id));
        match existing {
            Some(index) => Ok(TxArgument {
                builder_id: self.id,
                arg: Argument::Input(index as u16),
            }),
            None => self.push_input(TransactionInput::Object(id)),
        }
    }

    /// Splits `amounts` off `coin`, returning one handle per new coin.
    pub fn split_coins(
        &mut self,
        coin: TxArgument,
        amounts: Vec<TxArgument>,
    ) -> SdkResult<Vec<TxArgument>> {
        let coin = self.check(coin)?;
        let amounts = self.check_all(amounts)?;
        let count = amounts.len();
        let index = self.push_command(Command::SplitCoins(coin, amounts))?;
        Ok((0..count)
            .map(|i| TxArgument {
                builder_id: self.id,
                arg: Argument::NestedResult(index, i as u16),
            })
            .collect())
    }

    /// Calls a Move function. `target` is `package::module::function`.
    pub fn move_call(
        &mut self,
        target: &str,
        type_arguments: Vec<TypeTag>,
        arguments: Vec<TxArgument>,
    ) -> SdkResult<CallResults> {
        let (package, module, function) = parse_target(target)?;
        let arguments = self.check_all(arguments)?;
        let index = self.push_command(Command::MoveCall(Box::new(ProgrammableMoveCall {
            package,
            module,
            function,
            type_arguments,
            arguments,
        })))?;
        Ok(CallResults {
            builder_id: self.id,
            command_index: index,
        })
    }

    /// Transfers `objects` to `recipient` (a pure address input).
    pub fn transfer_objects(
        &mut self,
        objects: Vec<TxArgument>,
        recipient: TxArgument,
    ) -> SdkResult<()> {
        let objects = self.check_all(objects)?;
        let recipient = self.check(recipient)?;
        self.push_command(Command::TransferObjects(objects, recipient))?;
        Ok(())
    }

    /// Merges `sources` into `destination`.
    pub fn merge_coins(
        &mut self,
        destination: TxArgument,
        sources: Vec<TxArgument>,
    ) -> SdkResult<()> {
        let destination = self.check(destination)?;
        let sources = self.check_all(sources)?;
        self.push_command(Command::MergeCoins(destination, sources))?;
        Ok(())
    }

    /// Sets the gas budget in MIST. Required before [`finish`].
    ///
    /// [`finish`]: TransactionBuilder::finish
    pub fn set_gas_budget(&mut self, budget: u64) {
        self.gas_budget = Some(budget);
    }

    /// Pins the gas price instead of using the network reference price.
    pub fn set_gas_price(&mut self, price: u64) {
        self.gas_price = Some(price);
    }

    /// Seals the block. Fails if no gas budget was set.
    pub fn finish(self) -> SdkResult<PreparedTransaction> {
        let gas_budget = self.gas_budget.ok_or(SdkError::MissingGasBudget)?;
        Ok(PreparedTransaction {
            inputs: self.inputs,
            commands: self.commands,
            gas_budget,
            gas_price: self.gas_price,
        })
    }

    fn push_input(&mut self, input: TransactionInput) -> SdkResult<TxArgument> {
        let index = u16::try_from(self.inputs.len())
            .map_err(|_| SdkError::builder("too many inputs"))?;
        self.inputs.push(input);
        Ok(TxArgument {
            builder_id: self.id,
            arg: Argument::Input(index),
        })
    }

    fn push_command(&mut self, command: Command) -> SdkResult<u16> {
        let index = u16::try_from(self.commands.len())
            .map_err(|_| SdkError::builder("too many commands"))?;
        self.commands.push(command);
        Ok(index)
    }

    fn check(&self, argument: TxArgument) -> SdkResult<Argument> {
        if argument.builder_id != self.id {
            return Err(SdkError::ForeignArgument);
        }
        Ok(argument.arg)
    }

    fn check_all(&self, arguments: Vec<TxArgument>) -> SdkResult<Vec<Argument>> {
        arguments.into_iter().map(|a| self.check(a)).collect()
    }
}

impl Default for TransactionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A sealed transaction block, awaiting gas selection and object
/// resolution by the client.
#[derive(Clone, Debug)]
pub struct PreparedTransaction {
    inputs: Vec<TransactionInput>,
    commands: Vec<Command>,
    gas_budget: u64,
    gas_price: Option<u64>,
}

impl PreparedTransaction {
    /// The recorded input slots, in order.
    pub fn inputs(&self) -> &[TransactionInput] {
        &self.inputs
    }

    /// The commands, in execution order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// The gas budget in MIST.
    pub fn gas_budget(&self) -> u64 {
        self.gas_budget
    }

    /// The pinned gas price, if one was set.
    pub fn gas_price(&self) -> Option<u64> {
        self.gas_price
    }

    /// IDs of all object inputs.
    pub fn object_ids(&self) -> Vec<ObjectId> {
        self.inputs
            .iter()
            .filter_map(|input| match input {
                TransactionInput::Object(id) => Some(*id),
                TransactionInput::Pure(_) => None,
            })
            .collect()
    }
}

fn parse_target(target: &str) -> SdkResult<(ObjectId, Identifier, Identifier)> {
    let mut parts = target.split("::");
    let (Some(package), Some(module), Some(function), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(TypeError::InvalidTarget(target.to_string()).into());
    };
    Ok((
        ObjectId::from_hex(package)?,
        Identifier::new(module)?,
        Identifier::new(function)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inputs_are_ordered_and_objects_deduped() {
        let mut tx = TransactionBuilder::new();
        let clock = ObjectId::from_hex("0x6").unwrap();
        let a = tx.object(clock).unwrap();
        let amount = tx.pure(&90u64).unwrap();
        let b = tx.object(clock).unwrap();
        assert_eq!(a, b);
        assert_eq!(amount.as_argument(), Argument::Input(1));
        tx.set_gas_budget(1);
        assert_eq!(tx.finish().unwrap().inputs().len(), 2);
    }

    #[test]
    fn test_split_coins_returns_nested_results() {
        let mut tx = TransactionBuilder::new();
        let a = tx.pure(&100u64).unwrap();
        let b = tx.pure(&200u64).unwrap();
        let coins = tx.split_coins(tx.gas_coin(), vec![a, b]).unwrap();
        assert_eq!(coins[0].as_argument(), Argument::NestedResult(0, 0));
        assert_eq!(coins[1].as_argument(), Argument::NestedResult(0, 1));
    }

    #[test]
    fn test_move_call_results_chain() {
        let mut tx = TransactionBuilder::new();
        let pond = tx.object(ObjectId::from_hex("0xc1").unwrap()).unwrap();
        let first = tx.move_call("0x9a::buck::borrow", vec![], vec![pond]).unwrap();
        let second = tx
            .move_call("0x9a::buck::repay", vec![], vec![first.single()])
            .unwrap();
        assert_eq!(first.single().as_argument(), Argument::Result(0));
        assert_eq!(second.nth(1).as_argument(), Argument::NestedResult(1, 1));
    }

    #[test]
    fn test_foreign_argument_rejected() {
        let mut a = TransactionBuilder::new();
        let mut b = TransactionBuilder::new();
        let handle = a.pure(&1u64).unwrap();
        let result = b.split_coins(b.gas_coin(), vec![handle]);
        assert!(matches!(result, Err(SdkError::ForeignArgument)));
    }

    #[test]
    fn test_finish_requires_gas_budget() {
        let tx = TransactionBuilder::new();
        assert!(matches!(tx.finish(), Err(SdkError::MissingGasBudget)));
    }

    #[test]
    fn test_transfer_objects_command_shape() {
        let mut tx = TransactionBuilder::new();
        let amount = tx.pure(&1000u64).unwrap();
        let coins = tx.split_coins(tx.gas_coin(), vec![amount]).unwrap();
        let dest = tx.pure(&[0u8; 32]).unwrap();
        tx.transfer_objects(coins, dest).unwrap();
        tx.set_gas_budget(10_000_000);
        let prepared = tx.finish().unwrap();
        match &prepared.commands()[1] {
            Command::TransferObjects(objects, recipient) => {
                assert_eq!(objects, &vec![Argument::NestedResult(0, 0)]);
                assert_eq!(recipient, &Argument::Input(1));
            }
            other => panic!("expected transfer, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_target_rejects_malformed() {
        assert!(parse_target("0x2::coin").is_err());
        assert!(parse_target("0x2::coin::split::extra").is_err());
        assert!(parse_target("zz::coin::split").is_err());
        assert!(parse_target("0x2::coin::split").is_ok());
    }

    #[test]
    fn test_object_ids_lists_objects_only() {
        let mut tx = TransactionBuilder::new();
        tx.pure(&1u64).unwrap();
        let id = ObjectId::from_hex("0xf6").unwrap();
        tx.object(id).unwrap();
        tx.set_gas_budget(1);
        assert_eq!(tx.finish().unwrap().object_ids(), vec![id]);
    }
}
