//! # Meridian Staking Contracts
//!
//! The decision layer of the Meridian protocol. These three components
//! encode who may move custodied value, when, and at what cost:
//!
//! - **Staking** — depositors lock the asset, accrue reward eligibility,
//!   and withdraw subject to a time-gated early-exit penalty.
//! - **Reward Distribution** — a custody-and-release primitive: anyone can
//!   trigger a payout, the vault only enforces that the books cover it.
//! - **Yield Pool** — an owner-funded pool with an explicit distributable
//!   counter kept at or below actual custody.
//!
//! ## Design Principles
//!
//! 1. Validate, then commit, then transfer. Every operation checks all of
//!    its preconditions before mutating anything, commits its accounting
//!    before issuing the outbound transfer, and issues at most one
//!    transfer — a failure at any point leaves observable state unchanged.
//! 2. All monetary arithmetic is checked. Wrapping arithmetic and money do
//!    not mix.
//! 3. Privileged operations compare the caller against a stored owner
//!    address — a plain field, checked explicitly, handed off explicitly.
//! 4. Every public type is serializable (serde) for persistence and
//!    snapshotting.

pub mod reward_distribution;
pub mod staking;
pub mod yield_pool;
