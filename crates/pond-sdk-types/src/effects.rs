//! JSON-RPC response types for executed transactions.
//!
//! The execution endpoint returns effects and object changes as JSON
//! with camelCase keys and stringified u64s. These types only decode
//! the fields the scripts read and print.

use crate::address::{ObjectId, SuiAddress};
use crate::digest::{ObjectDigest, TransactionDigest};
use serde::{Deserialize, Serialize};

/// The response to a transaction execution request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionBlockResponse {
    /// The transaction digest.
    pub digest: TransactionDigest,
    /// Execution effects, present when requested in the options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effects: Option<TransactionEffects>,
    /// Object changes, present when requested in the options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_changes: Option<Vec<ObjectChange>>,
    /// True when the fullnode waited for local execution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmed_local_execution: Option<bool>,
}

impl TransactionBlockResponse {
    /// Returns the execution status, if effects were returned.
    pub fn status(&self) -> Option<&ExecutionStatus> {
        self.effects.as_ref().map(|e| &e.status)
    }

    /// True when effects were returned and report success.
    pub fn is_success(&self) -> bool {
        self.status().map(|s| s.is_success()).unwrap_or(false)
    }
}

/// The subset of transaction effects the scripts inspect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionEffects {
    /// Whether execution succeeded on chain.
    pub status: ExecutionStatus,
    /// Gas charged for the transaction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_used: Option<GasCostSummary>,
    /// The epoch the transaction executed in, as a decimal string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executed_epoch: Option<String>,
    /// Digest of the executed transaction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_digest: Option<TransactionDigest>,
}

/// On-chain execution outcome.
///
/// The RPC encodes this as `{"status": "success"}` or
/// `{"status": "failure", "error": "..."}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionStatus {
    /// Either `success` or `failure`.
    pub status: String,
    /// The abort or error description, set on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExecutionStatus {
    /// True when the status string reports success.
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

/// Gas charges, each a decimal string of MIST.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasCostSummary {
    /// Cost of computation.
    pub computation_cost: String,
    /// Cost of storage writes.
    pub storage_cost: String,
    /// Rebate for freed storage.
    pub storage_rebate: String,
    /// The portion of storage cost that is never rebated.
    #[serde(default)]
    pub non_refundable_storage_fee: String,
}

/// Who owns an object after the transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    /// Owned by an account address.
    AddressOwner(SuiAddress),
    /// Owned by another object (dynamic fields).
    ObjectOwner(SuiAddress),
    /// Shared, accessible to every transaction.
    Shared {
        /// The version at which the object became shared.
        initial_shared_version: u64,
    },
    /// Frozen, readable by everyone and owned by no one.
    Immutable,
}

/// One entry of the `objectChanges` array.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ObjectChange {
    /// A package was published.
    #[serde(rename_all = "camelCase")]
    Published {
        /// ID of the new package.
        package_id: ObjectId,
        /// Package version, as a decimal string.
        version: String,
        /// Digest of the package object.
        digest: ObjectDigest,
        /// Module names in the package.
        modules: Vec<String>,
    },
    /// An object changed hands.
    #[serde(rename_all = "camelCase")]
    Transferred {
        /// The transaction sender.
        sender: SuiAddress,
        /// The new owner.
        recipient: Owner,
        /// The object's Move type.
        object_type: String,
        /// The object's ID.
        object_id: ObjectId,
        /// New version, as a decimal string.
        version: String,
        /// Digest at the new version.
        digest: ObjectDigest,
    },
    /// An existing object was modified.
    #[serde(rename_all = "camelCase")]
    Mutated {
        /// The transaction sender.
        sender: SuiAddress,
        /// The owner after mutation.
        owner: Owner,
        /// The object's Move type.
        object_type: String,
        /// The object's ID.
        object_id: ObjectId,
        /// New version, as a decimal string.
        version: String,
        /// Version before the transaction.
        previous_version: String,
        /// Digest at the new version.
        digest: ObjectDigest,
    },
    /// An object was deleted.
    #[serde(rename_all = "camelCase")]
    Deleted {
        /// The transaction sender.
        sender: SuiAddress,
        /// The object's Move type.
        object_type: String,
        /// The object's ID.
        object_id: ObjectId,
        /// Version at deletion, as a decimal string.
        version: String,
    },
    /// An object was wrapped into another object.
    #[serde(rename_all = "camelCase")]
    Wrapped {
        /// The transaction sender.
        sender: SuiAddress,
        /// The object's Move type.
        object_type: String,
        /// The object's ID.
        object_id: ObjectId,
        /// Version at wrapping, as a decimal string.
        version: String,
    },
    /// A new object was created.
    #[serde(rename_all = "camelCase")]
    Created {
        /// The transaction sender.
        sender: SuiAddress,
        /// The initial owner.
        owner: Owner,
        /// The object's Move type.
        object_type: String,
        /// The object's ID.
        object_id: ObjectId,
        /// Initial version, as a decimal string.
        version: String,
        /// Digest at the initial version.
        digest: ObjectDigest,
    },
}

impl ObjectChange {
    /// The ID of the object the change concerns.
    pub fn object_id(&self) -> ObjectId {
        match self {
            ObjectChange::Published { package_id, .. } => *package_id,
            ObjectChange::Transferred { object_id, .. }
            | ObjectChange::Mutated { object_id, .. }
            | ObjectChange::Deleted { object_id, .. }
            | ObjectChange::Wrapped { object_id, .. }
            | ObjectChange::Created { object_id, .. } => *object_id,
        }
    }
}
