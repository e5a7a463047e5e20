//! # Yield Pool Contract
//!
//! Custodies surplus value and releases it to designated recipients. The
//! pool keeps an explicit accounting counter (`total_yield_pool`) separate
//! from its raw custodied balance: only value deposited through
//! [`YieldPool::add_yield`] is distributable, so a stray direct transfer
//! into the pool's address raises custody without raising the counter.
//!
//! Invariant: `total_yield_pool ≤ custodied balance`, at every point.
//! Owner deposits move both in lockstep; payouts decrement both in
//! lockstep; nothing else touches the counter.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use meridian_protocol::asset::{AssetError, AssetLedger};
use meridian_protocol::identity::Address;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur during yield pool operations.
#[derive(Debug, Error)]
pub enum YieldError {
    /// A zero amount was supplied where a positive amount is required.
    #[error("invalid yield amount")]
    ZeroAmount,

    /// The requested payout exceeds the distributable pool counter.
    #[error("insufficient pool balance: pool {pool}, requested {requested}")]
    InsufficientPool {
        /// The pool counter at the time of the request.
        pool: u64,
        /// The amount that was requested.
        requested: u64,
    },

    /// A privileged operation was invoked by a non-owner.
    #[error("unauthorized: {caller} is not the owner")]
    Unauthorized {
        /// The identity that made the call.
        caller: Address,
    },

    /// A deposit would push the pool counter past `u64::MAX`.
    #[error("yield pool overflow: pool {pool}, credit {credit}")]
    Overflow {
        /// The counter before the failed deposit.
        pool: u64,
        /// The amount that caused the overflow.
        credit: u64,
    },

    /// The underlying asset movement failed.
    #[error(transparent)]
    Asset(#[from] AssetError),
}

// ---------------------------------------------------------------------------
// Contract
// ---------------------------------------------------------------------------

/// The yield vault: custodied balance on the ledger, distributable counter
/// here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YieldPool {
    /// The pool's own address — where custodied yield sits.
    address: Address,
    /// The only identity allowed to fund the pool.
    owner: Address,
    /// Distributable value. Never exceeds the custodied balance.
    total_yield_pool: u64,
}

impl YieldPool {
    /// Deploys the pool at `address`, owned by `owner`, with an empty
    /// counter.
    pub fn new(address: Address, owner: Address) -> Self {
        Self {
            address,
            owner,
            total_yield_pool: 0,
        }
    }

    /// Funds the pool: pulls `amount` from the caller into custody and
    /// raises the counter in lockstep. Owner only.
    ///
    /// # Errors
    ///
    /// Returns [`YieldError::Unauthorized`] for non-owner callers,
    /// [`YieldError::ZeroAmount`] for a zero deposit, and the pull's
    /// allowance/balance errors verbatim. The counter is only raised
    /// after the pull succeeds, so a failed pull changes nothing.
    pub fn add_yield(
        &mut self,
        ledger: &mut dyn AssetLedger,
        caller: &str,
        amount: u64,
    ) -> Result<(), YieldError> {
        if caller != self.owner {
            return Err(YieldError::Unauthorized {
                caller: caller.to_string(),
            });
        }
        if amount == 0 {
            return Err(YieldError::ZeroAmount);
        }
        let new_pool = self
            .total_yield_pool
            .checked_add(amount)
            .ok_or(YieldError::Overflow {
                pool: self.total_yield_pool,
                credit: amount,
            })?;

        ledger.pull(caller, &self.address, amount)?;
        self.total_yield_pool = new_pool;
        info!(pool = %self.address, amount, total = self.total_yield_pool, "yield added");
        Ok(())
    }

    /// Pays `amount` from the pool to `recipient`. Permissionless.
    ///
    /// The counter is decremented before the outbound transfer is issued.
    ///
    /// # Errors
    ///
    /// Returns [`YieldError::ZeroAmount`] for a zero request and
    /// [`YieldError::InsufficientPool`] when the counter does not cover
    /// it. Either failure leaves all state unchanged.
    pub fn distribute_yield(
        &mut self,
        ledger: &mut dyn AssetLedger,
        recipient: &str,
        amount: u64,
    ) -> Result<(), YieldError> {
        if amount == 0 {
            return Err(YieldError::ZeroAmount);
        }
        if amount > self.total_yield_pool {
            return Err(YieldError::InsufficientPool {
                pool: self.total_yield_pool,
                requested: amount,
            });
        }

        // Counter committed before the outbound transfer.
        self.total_yield_pool -= amount;
        ledger.transfer(&self.address, recipient, amount)?;
        info!(pool = %self.address, recipient = %recipient, amount, total = self.total_yield_pool, "yield distributed");
        Ok(())
    }

    /// Hands ownership to `new_owner`. Owner only, irreversible.
    pub fn transfer_ownership(
        &mut self,
        caller: &str,
        new_owner: Address,
    ) -> Result<(), YieldError> {
        if caller != self.owner {
            return Err(YieldError::Unauthorized {
                caller: caller.to_string(),
            });
        }
        self.owner = new_owner;
        Ok(())
    }

    /// The distributable pool counter.
    pub fn total_yield_pool(&self) -> u64 {
        self.total_yield_pool
    }

    /// The pool's custodied balance on `ledger`.
    pub fn pool_balance(&self, ledger: &dyn AssetLedger) -> u64 {
        ledger.balance_of(&self.address)
    }

    /// The pool's address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// The current owner.
    pub fn owner(&self) -> &str {
        &self.owner
    }
}
