// Copyright (c) 2026 Meridian Labs. MIT License.
// See LICENSE for details.

//! # Meridian Protocol — Core Library
//!
//! The value layer underneath the Meridian staking contracts. Everything
//! that holds or moves a balance lives here; everything that decides *when*
//! balances move lives in `meridian-contracts`.
//!
//! ## Architecture
//!
//! - **config** — Policy constants and network parameters. One place, no
//!   scattered magic numbers.
//! - **identity** — Addresses: random account addresses for wallets,
//!   content-derived addresses for deployed components.
//! - **asset** — The fungible-asset layer: the native coin ledger, the
//!   token ledger (allowance-based), and the [`asset::AssetLedger`] trait
//!   the contracts program against.
//!
//! ## Design Philosophy
//!
//! 1. All amounts are `u64` in smallest-unit denomination. No floats, no
//!    division in arithmetic paths.
//! 2. Every fallible money operation uses checked arithmetic and returns a
//!    structured error. Wrapping arithmetic and money do not mix.
//! 3. Every public state type is serializable — ledger state must survive
//!    a snapshot/restore round trip byte-for-byte.

pub mod asset;
pub mod config;
pub mod identity;
