//! # Identities & Addresses
//!
//! Every participant in Meridian — depositor wallets and deployed
//! components alike — is identified by a 20-byte address rendered as
//! `0x` + 40 lowercase hex characters.
//!
//! Account addresses are sampled at random (the devnet has no real key
//! infrastructure; a wallet is its address). Component addresses are
//! *content-derived*: `BLAKE3(deployer || nonce)` truncated to 20 bytes,
//! so the same deployer deploying in the same order always produces the
//! same addresses — no registry needed, no coordination required.

use rand::RngCore;

use crate::config::{ADDRESS_BYTES, ADDRESS_PREFIX};

/// A participant identity. Lowercase `0x`-prefixed hex, 20-byte payload.
///
/// Kept as a plain `String` alias: addresses cross serialization and
/// display boundaries constantly, and the ledgers key their maps by them.
pub type Address = String;

/// Samples a fresh random account address.
pub fn random_address() -> Address {
    let mut bytes = [0u8; ADDRESS_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    encode_address(&bytes)
}

/// Derives the address of the `nonce`-th component deployed by `deployer`.
///
/// The hash input is `deployer` (UTF-8 bytes), a `0x00` separator, and the
/// nonce as 8 big-endian bytes. The separator prevents ambiguity between a
/// deployer suffix and the nonce prefix. The first [`ADDRESS_BYTES`] bytes
/// of the BLAKE3 digest become the address payload.
pub fn derive_contract_address(deployer: &str, nonce: u64) -> Address {
    let mut preimage = Vec::with_capacity(deployer.len() + 9);
    preimage.extend_from_slice(deployer.as_bytes());
    preimage.push(0x00);
    preimage.extend_from_slice(&nonce.to_be_bytes());

    let digest = blake3::hash(&preimage);
    encode_address(&digest.as_bytes()[..ADDRESS_BYTES])
}

/// Returns `true` if `s` is a well-formed address: the `0x` prefix followed
/// by exactly 40 lowercase hex characters.
pub fn is_valid_address(s: &str) -> bool {
    match s.strip_prefix(ADDRESS_PREFIX) {
        Some(body) => {
            body.len() == ADDRESS_BYTES * 2
                && body
                    .chars()
                    .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        }
        None => false,
    }
}

fn encode_address(bytes: &[u8]) -> Address {
    format!("{}{}", ADDRESS_PREFIX, hex::encode(bytes))
}
