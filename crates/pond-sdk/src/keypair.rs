//! Ed25519 signing keys and the Sui signature envelope.
//!
//! Sui derives an account address from a key by hashing a one-byte
//! scheme flag followed by the public key with blake2b-256. Signatures
//! over a transaction cover an intent-prefixed blake2b-256 digest of
//! the BCS bytes, and are submitted as
//! `base64(flag || signature || public_key)`.

use crate::error::{SdkError, SdkResult};
use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use ed25519_dalek::{Keypair, PublicKey, SecretKey, Signer};
use pond_sdk_types::{SuiAddress, TransactionData, ADDRESS_LENGTH};

type Blake2b256 = Blake2b<U32>;

/// Scheme flag for pure ed25519 keys.
pub const ED25519_FLAG: u8 = 0x00;

/// Intent prefix for user transaction data: scope, version, app.
pub const TRANSACTION_INTENT: [u8; 3] = [0, 0, 0];

/// Environment variable holding the private key.
pub const PRIVATE_KEY_ENV: &str = "POND_KEY";

const SEED_LENGTH: usize = 32;

/// An ed25519 keypair bound to its derived Sui address.
pub struct Ed25519Keypair {
    keypair: Keypair,
    address: SuiAddress,
}

impl Ed25519Keypair {
    /// Generates a fresh random keypair.
    pub fn generate() -> Self {
        let keypair = Keypair::generate(&mut rand::rngs::OsRng);
        let address = derive_address(&keypair.public);
        Self { keypair, address }
    }

    /// Builds a keypair from a 32-byte seed.
    pub fn from_seed_bytes(seed: &[u8]) -> SdkResult<Self> {
        if seed.len() != SEED_LENGTH {
            return Err(SdkError::invalid_key(format!(
                "expected {SEED_LENGTH}-byte seed, got {} bytes",
                seed.len()
            )));
        }
        let secret =
            SecretKey::from_bytes(seed).map_err(|e| SdkError::invalid_key(e.to_string()))?;
        let public = PublicKey::from(&secret);
        let address = derive_address(&public);
        Ok(Self {
            keypair: Keypair { secret, public },
            address,
        })
    }

    /// Builds a keypair from a hex-encoded 32-byte seed.
    pub fn from_hex(hex_str: &str) -> SdkResult<Self> {
        let trimmed = hex_str.trim();
        let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        let bytes = hex::decode(digits).map_err(|e| SdkError::invalid_key(e.to_string()))?;
        Self::from_seed_bytes(&bytes)
    }

    /// Builds a keypair from the wallet export format:
    /// `base64(flag || seed)`, 33 bytes, with the ed25519 flag.
    pub fn from_base64_export(encoded: &str) -> SdkResult<Self> {
        let bytes =
            base64::decode(encoded.trim()).map_err(|e| SdkError::invalid_key(e.to_string()))?;
        if bytes.len() != SEED_LENGTH + 1 {
            return Err(SdkError::invalid_key(format!(
                "expected {} bytes of flag || seed, got {}",
                SEED_LENGTH + 1,
                bytes.len()
            )));
        }
        if bytes[0] != ED25519_FLAG {
            return Err(SdkError::invalid_key(format!(
                "unsupported key scheme flag {:#04x}",
                bytes[0]
            )));
        }
        Self::from_seed_bytes(&bytes[1..])
    }

    /// Reads the key from `POND_KEY`, accepting either the base64
    /// wallet export or a hex seed.
    pub fn from_env() -> SdkResult<Self> {
        let value = std::env::var(PRIVATE_KEY_ENV)
            .map_err(|_| SdkError::config(format!("{PRIVATE_KEY_ENV} is not set")))?;
        Self::from_base64_export(&value).or_else(|_| Self::from_hex(&value))
    }

    /// The Sui address derived from the public key.
    pub fn address(&self) -> SuiAddress {
        self.address
    }

    /// The raw 32-byte public key.
    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.keypair.public.to_bytes()
    }

    /// Computes the digest that gets signed for a transaction: the
    /// blake2b-256 hash of the intent prefix followed by the BCS bytes.
    pub fn signing_digest(tx_bytes: &[u8]) -> [u8; 32] {
        let mut hasher = Blake2b256::new();
        hasher.update(TRANSACTION_INTENT);
        hasher.update(tx_bytes);
        hasher.finalize().into()
    }

    /// Signs a transaction, returning the base64 serialized signature
    /// the execution endpoint expects.
    pub fn sign_transaction(&self, data: &TransactionData) -> SdkResult<String> {
        let tx_bytes = bcs::to_bytes(data)?;
        Ok(self.sign_tx_bytes(&tx_bytes))
    }

    /// Signs pre-serialized transaction bytes.
    pub fn sign_tx_bytes(&self, tx_bytes: &[u8]) -> String {
        let digest = Self::signing_digest(tx_bytes);
        let signature = self.keypair.sign(&digest);

        let mut serialized = Vec::with_capacity(1 + 64 + 32);
        serialized.push(ED25519_FLAG);
        serialized.extend_from_slice(&signature.to_bytes());
        serialized.extend_from_slice(&self.keypair.public.to_bytes());
        base64::encode(&serialized)
    }
}

fn derive_address(public: &PublicKey) -> SuiAddress {
    let mut hasher = Blake2b256::new();
    hasher.update([ED25519_FLAG]);
    hasher.update(public.as_bytes());
    let digest: [u8; ADDRESS_LENGTH] = hasher.finalize().into();
    SuiAddress::new(digest)
}

impl Clone for Ed25519Keypair {
    fn clone(&self) -> Self {
        let secret = SecretKey::from_bytes(self.keypair.secret.as_bytes())
            .expect("secret bytes round-trip");
        let public = self.keypair.public;
        Self {
            keypair: Keypair { secret, public },
            address: self.address,
        }
    }
}

impl std::fmt::Debug for Ed25519Keypair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material.
        f.debug_struct("Ed25519Keypair")
            .field("address", &self.address)
            .finish()
    }
}
