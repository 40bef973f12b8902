//! Account address and object ID types.
//!
//! Sui addresses and object IDs are both 32-byte values, typically
//! displayed as 64 hexadecimal characters with a `0x` prefix. Short
//! forms like `0x2` (the framework package) or `0x6` (the Clock) are
//! zero-padded on the left.

use crate::error::TypeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The length of an address in bytes.
pub const ADDRESS_LENGTH: usize = 32;

/// A 32-byte Sui account address.
///
/// # Example
///
/// ```rust
/// use pond_sdk_types::SuiAddress;
///
/// let addr = SuiAddress::from_hex("0x2").unwrap();
/// assert_eq!(
///     addr.to_string(),
///     "0x0000000000000000000000000000000000000000000000000000000000000002"
/// );
/// assert_eq!(addr.to_short_string(), "0x2");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SuiAddress([u8; ADDRESS_LENGTH]);

impl SuiAddress {
    /// The "zero" address (all zeros).
    pub const ZERO: Self = Self([0u8; ADDRESS_LENGTH]);

    /// Creates an address from a byte array.
    pub const fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Creates an address from a hex string (with or without `0x` prefix).
    ///
    /// Short addresses are zero-padded on the left. Empty strings and a
    /// bare `0x` prefix are rejected.
    pub fn from_hex(hex_str: &str) -> Result<Self, TypeError> {
        let trimmed = hex_str.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if digits.is_empty() {
            return Err(TypeError::InvalidAddress(
                "address must contain at least one hex digit".to_string(),
            ));
        }
        if digits.len() > ADDRESS_LENGTH * 2 {
            return Err(TypeError::InvalidAddress(format!(
                "address too long: {} characters (max {})",
                digits.len(),
                ADDRESS_LENGTH * 2
            )));
        }

        let padded = format!("{digits:0>64}");
        let bytes = hex::decode(&padded)
            .map_err(|e| TypeError::InvalidAddress(format!("{trimmed}: {e}")))?;

        let mut address = [0u8; ADDRESS_LENGTH];
        address.copy_from_slice(&bytes);
        Ok(Self(address))
    }

    /// Creates an address from a byte slice.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TypeError> {
        if bytes.len() != ADDRESS_LENGTH {
            return Err(TypeError::InvalidAddress(format!(
                "expected {} bytes, got {}",
                ADDRESS_LENGTH,
                bytes.len()
            )));
        }
        let mut address = [0u8; ADDRESS_LENGTH];
        address.copy_from_slice(bytes);
        Ok(Self(address))
    }

    /// Returns the address as a byte slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the address as a byte array.
    pub fn to_bytes(&self) -> [u8; ADDRESS_LENGTH] {
        self.0
    }

    /// Returns the full-form hex string with `0x` prefix.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Returns the short display form with leading zeros trimmed.
    pub fn to_short_string(&self) -> String {
        let hex = hex::encode(self.0);
        let trimmed = hex.trim_start_matches('0');
        if trimmed.is_empty() {
            "0x0".to_string()
        } else {
            format!("0x{trimmed}")
        }
    }

    /// Returns true if this is the zero address.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; ADDRESS_LENGTH]
    }
}

impl fmt::Display for SuiAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for SuiAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SuiAddress({})", self.to_short_string())
    }
}

impl FromStr for SuiAddress {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

// Human-readable formats (JSON) carry the hex string; the binary
// format (BCS) carries the raw 32 bytes with no length prefix, which
// is the layout the ledger expects for addresses.
impl Serialize for SuiAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_hex())
        } else {
            self.0.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for SuiAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            Self::from_hex(&s).map_err(serde::de::Error::custom)
        } else {
            let bytes = <[u8; ADDRESS_LENGTH]>::deserialize(deserializer)?;
            Ok(Self(bytes))
        }
    }
}

/// A 32-byte on-chain object identifier.
///
/// Object IDs share the representation of addresses but name a unit of
/// on-chain state (a coin, a shared protocol object, a package) rather
/// than an account.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(SuiAddress);

impl ObjectId {
    /// The "zero" object ID.
    pub const ZERO: Self = Self(SuiAddress::ZERO);

    /// Creates an object ID from a byte array.
    pub const fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(SuiAddress::new(bytes))
    }

    /// Creates an object ID from a hex string.
    pub fn from_hex(hex_str: &str) -> Result<Self, TypeError> {
        SuiAddress::from_hex(hex_str).map(Self)
    }

    /// Returns the ID as a byte slice.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Returns the full-form hex string with `0x` prefix.
    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }

    /// Returns the short display form with leading zeros trimmed.
    pub fn to_short_string(&self) -> String {
        self.0.to_short_string()
    }

    /// Returns the underlying address.
    pub fn as_address(&self) -> SuiAddress {
        self.0
    }
}

impl From<SuiAddress> for ObjectId {
    fn from(address: SuiAddress) -> Self {
        Self(address)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.to_short_string())
    }
}

impl FromStr for ObjectId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}
