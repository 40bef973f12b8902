//! Object and transaction digests.
//!
//! Digests on Sui are 32-byte values rendered as base58 strings in
//! JSON and carried as length-prefixed bytes in the binary format.

use crate::error::TypeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const DIGEST_LENGTH: usize = 32;

fn decode_base58(s: &str) -> Result<[u8; DIGEST_LENGTH], TypeError> {
    let bytes = bs58::decode(s)
        .into_vec()
        .map_err(|e| TypeError::InvalidDigest(format!("{s}: {e}")))?;
    if bytes.len() != DIGEST_LENGTH {
        return Err(TypeError::InvalidDigest(format!(
            "expected {} bytes, got {}",
            DIGEST_LENGTH,
            bytes.len()
        )));
    }
    let mut digest = [0u8; DIGEST_LENGTH];
    digest.copy_from_slice(&bytes);
    Ok(digest)
}

macro_rules! digest_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name([u8; DIGEST_LENGTH]);

        impl $name {
            /// The all-zero digest.
            pub const ZERO: Self = Self([0u8; DIGEST_LENGTH]);

            /// Creates a digest from a byte array.
            pub const fn new(bytes: [u8; DIGEST_LENGTH]) -> Self {
                Self(bytes)
            }

            /// Parses a digest from its base58 string form.
            pub fn from_base58(s: &str) -> Result<Self, TypeError> {
                decode_base58(s).map(Self)
            }

            /// Returns the digest as a byte slice.
            pub fn as_bytes(&self) -> &[u8] {
                &self.0
            }

            /// Returns the base58 string form.
            pub fn to_base58(&self) -> String {
                bs58::encode(&self.0).into_string()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.to_base58())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.to_base58())
            }
        }

        impl FromStr for $name {
            type Err = TypeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_base58(s)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                if serializer.is_human_readable() {
                    serializer.serialize_str(&self.to_base58())
                } else {
                    serializer.serialize_bytes(&self.0)
                }
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                if deserializer.is_human_readable() {
                    let s = String::deserialize(deserializer)?;
                    Self::from_base58(&s).map_err(serde::de::Error::custom)
                } else {
                    let bytes = <Vec<u8>>::deserialize(deserializer)?;
                    let digest = Self::from_bytes(&bytes).map_err(serde::de::Error::custom)?;
                    Ok(digest)
                }
            }
        }

        impl $name {
            fn from_bytes(bytes: &[u8]) -> Result<Self, TypeError> {
                if bytes.len() != DIGEST_LENGTH {
                    return Err(TypeError::InvalidDigest(format!(
                        "expected {} bytes, got {}",
                        DIGEST_LENGTH,
                        bytes.len()
                    )));
                }
                let mut digest = [0u8; DIGEST_LENGTH];
                digest.copy_from_slice(bytes);
                Ok(Self(digest))
            }
        }
    };
}

digest_type!(
    /// The digest of an on-chain object at a specific version.
    ObjectDigest
);

digest_type!(
    /// The digest identifying a submitted transaction.
    TransactionDigest
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base58_round_trip() {
        let digest = ObjectDigest::new([7u8; 32]);
        let encoded = digest.to_base58();
        let decoded = ObjectDigest::from_base58(&encoded).unwrap();
        assert_eq!(digest, decoded);
    }

    #[test]
    fn test_rejects_wrong_length() {
        // "abc" decodes to fewer than 32 bytes.
        assert!(ObjectDigest::from_base58("abc").is_err());
    }

    #[test]
    fn test_rejects_invalid_alphabet() {
        // '0' and 'l' are not in the base58 alphabet.
        assert!(TransactionDigest::from_base58("0l0l").is_err());
    }

    #[test]
    fn test_json_is_base58_string() {
        let digest = ObjectDigest::new([1u8; 32]);
        let json = serde_json::to_string(&digest).unwrap();
        assert_eq!(json, format!("\"{}\"", digest.to_base58()));
    }

    #[test]
    fn test_bcs_is_length_prefixed() {
        let digest = ObjectDigest::new([9u8; 32]);
        let bytes = bcs::to_bytes(&digest).unwrap();
        // ULEB length prefix (32) followed by the raw bytes.
        assert_eq!(bytes.len(), 33);
        assert_eq!(bytes[0], 32);
        let back: ObjectDigest = bcs::from_bytes(&bytes).unwrap();
        assert_eq!(digest, back);
    }
}
