//! # Asset Layer — Native Coin & Token Ledgers
//!
//! The asset layer is where custodied value actually lives. The staking
//! contracts never touch balances directly — they ask an [`AssetLedger`]
//! to move value and trust it to refuse anything the books can't cover.
//!
//! ## Architecture
//!
//! ```text
//! native.rs — NativeLedger: the chain's coin, attached-value semantics
//! token.rs  — TokenLedger: allowance-based fungible token (ERC-20 shaped)
//! ```
//!
//! ## Operational Modes
//!
//! A deployment binds each component to exactly one ledger, chosen once at
//! deploy time. The two modes are structurally parallel behind the trait:
//!
//! - **Native mode** — value is attached to the call. [`AssetLedger::pull`]
//!   is a plain transfer from the caller: if the caller holds the amount,
//!   attaching it succeeds.
//! - **Token mode** — value is pulled under a pre-authorized allowance.
//!   `pull` spends the allowance first and fails with
//!   [`AssetError::InsufficientAllowance`] when it falls short.
//!
//! Contract code and contract tests are written once against the trait and
//! run unchanged in both modes.

use thiserror::Error;

use crate::identity::Address;

pub mod native;
pub mod token;

pub use native::NativeLedger;
pub use token::TokenLedger;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur while moving value on a ledger.
#[derive(Debug, Error)]
pub enum AssetError {
    /// The debited account does not hold the requested amount.
    #[error("insufficient balance: {account} holds {available}, requested {requested}")]
    InsufficientBalance {
        /// The account being debited.
        account: Address,
        /// Its current balance.
        available: u64,
        /// The amount that was requested.
        requested: u64,
    },

    /// A pull exceeds what the owner has pre-authorized for the spender.
    #[error(
        "insufficient allowance: {spender} may pull {allowed} from {owner}, requested {requested}"
    )]
    InsufficientAllowance {
        /// The account whose funds are being pulled.
        owner: Address,
        /// The account doing the pulling.
        spender: Address,
        /// The remaining pre-authorized amount.
        allowed: u64,
        /// The amount that was requested.
        requested: u64,
    },

    /// A credit would push an account balance or the total supply past
    /// `u64::MAX`.
    #[error("balance overflow: {account} holds {current}, credit {credit}")]
    Overflow {
        /// The account being credited.
        account: Address,
        /// Its balance before the failed credit.
        current: u64,
        /// The amount that caused the overflow.
        credit: u64,
    },

    /// A privileged ledger operation was invoked by a non-owner.
    #[error("unauthorized: {caller} is not the ledger owner")]
    Unauthorized {
        /// The identity that made the call.
        caller: Address,
    },
}

// ---------------------------------------------------------------------------
// AssetLedger
// ---------------------------------------------------------------------------

/// The asset-movement surface the contracts program against.
///
/// Implementations must be atomic per call: a returned error means no
/// balance, allowance, or supply changed.
pub trait AssetLedger {
    /// Moves `amount` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::InsufficientBalance`] if `from` holds less
    /// than `amount`, [`AssetError::Overflow`] if crediting `to` would
    /// overflow.
    fn transfer(&mut self, from: &str, to: &str, amount: u64) -> Result<(), AssetError>;

    /// Acquires `amount` from `owner` into `spender`'s balance — the
    /// deposit path.
    ///
    /// Native mode treats this as a direct transfer (the owner attaches
    /// the value to the call). Token mode spends `spender`'s allowance
    /// from `owner` first.
    fn pull(&mut self, owner: &str, spender: &str, amount: u64) -> Result<(), AssetError>;

    /// Returns the balance of `account`. Unknown accounts hold zero.
    fn balance_of(&self, account: &str) -> u64;
}
