//! Signed approvals.
//!
//! A permit authorizes `spender` to move `value` of the owner's balance
//! without an on-chain approval. The signed digest is
//! `blake3("\x19\x01" || domain_separator || struct_hash)`, where the domain
//! separator binds the asset and the struct hash binds
//! `(owner, spender, value, nonce, deadline)`. Owners sign with the ed25519
//! key their address is made from.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use pairswap_core::{Address, PERMIT_DIGEST_PREFIX, PERMIT_DOMAIN, PERMIT_TYPEHASH};

use crate::error::{AssetError, AssetResult};

/// Address of the account controlled by `key`
pub fn account_address(key: &VerifyingKey) -> Address {
    Address::new(key.to_bytes())
}

/// Domain separator for permits on one asset
pub fn domain_separator(asset: &Address, name: &str) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new();
    hasher.update(PERMIT_DOMAIN);
    hasher.update(name.as_bytes());
    hasher.update(asset.as_bytes());
    *hasher.finalize().as_bytes()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermitMessage {
    pub owner: Address,
    pub spender: Address,
    pub value: u128,
    pub nonce: u64,
    pub deadline: u64,
}

impl PermitMessage {
    pub fn struct_hash(&self) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new();
        hasher.update(blake3::hash(PERMIT_TYPEHASH).as_bytes());
        hasher.update(self.owner.as_bytes());
        hasher.update(self.spender.as_bytes());
        hasher.update(&self.value.to_be_bytes());
        hasher.update(&self.nonce.to_be_bytes());
        hasher.update(&self.deadline.to_be_bytes());
        *hasher.finalize().as_bytes()
    }

    /// The bytes owners sign
    pub fn digest(&self, domain_separator: &[u8; 32]) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new();
        hasher.update(PERMIT_DIGEST_PREFIX);
        hasher.update(domain_separator);
        hasher.update(&self.struct_hash());
        *hasher.finalize().as_bytes()
    }

    pub fn sign(&self, domain_separator: &[u8; 32], key: &SigningKey) -> PermitSignature {
        let signature = key.sign(&self.digest(domain_separator));
        PermitSignature(signature.to_bytes())
    }

    /// Check the signature was produced by the owner's key
    pub fn verify(&self, domain_separator: &[u8; 32], signature: &PermitSignature) -> AssetResult<()> {
        let key = VerifyingKey::from_bytes(self.owner.as_bytes())
            .map_err(|_| AssetError::InvalidSignature)?;
        let signature = Signature::from_bytes(&signature.0);
        key.verify(&self.digest(domain_separator), &signature)
            .map_err(|_| AssetError::InvalidSignature)
    }
}

/// Raw ed25519 signature bytes
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PermitSignature(pub [u8; 64]);

impl std::fmt::Debug for PermitSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PermitSignature({:02x}{:02x}..)", self.0[0], self.0[1])
    }
}
