//! # Reward Distribution Contract
//!
//! A raw custody-and-release vault for the reward asset. It carries no
//! accrual schedule and no per-user bookkeeping — the staking contract
//! decides *how much* a claim is worth, this vault only enforces that the
//! custodied balance covers it.
//!
//! Funding is out-of-band: anyone can transfer the asset directly to the
//! vault's address. Payouts are permissionless — any caller can direct a
//! payout to any recipient, because the vault's balance is the only thing
//! being protected and a payout can never exceed it.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use meridian_protocol::asset::{AssetError, AssetLedger};
use meridian_protocol::identity::Address;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur during reward distribution.
#[derive(Debug, Error)]
pub enum RewardError {
    /// A zero-amount payout was requested.
    #[error("no rewards available")]
    ZeroAmount,

    /// The requested payout exceeds the vault's custodied balance.
    #[error("insufficient reward balance: custodied {custodied}, requested {requested}")]
    InsufficientRewards {
        /// The vault's balance at the time of the request.
        custodied: u64,
        /// The amount that was requested.
        requested: u64,
    },

    /// A privileged operation was invoked by a non-owner.
    #[error("unauthorized: {caller} is not the owner")]
    Unauthorized {
        /// The identity that made the call.
        caller: Address,
    },

    /// The underlying asset transfer failed.
    #[error(transparent)]
    Asset(#[from] AssetError),
}

// ---------------------------------------------------------------------------
// Contract
// ---------------------------------------------------------------------------

/// The reward vault. Its custodied balance lives on the asset ledger under
/// [`address`](Self::address); the struct itself holds only identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardDistribution {
    /// The vault's own address — where custodied rewards sit.
    address: Address,
    /// The deployer, retained for the ownership hand-off path.
    owner: Address,
}

impl RewardDistribution {
    /// Deploys the vault at `address`, owned by `owner`.
    pub fn new(address: Address, owner: Address) -> Self {
        Self { address, owner }
    }

    /// Pays `amount` of the custodied asset to `recipient`. Permissionless.
    ///
    /// # Errors
    ///
    /// Returns [`RewardError::ZeroAmount`] for a zero request and
    /// [`RewardError::InsufficientRewards`] when the custodied balance
    /// does not cover it. Either failure leaves all state unchanged.
    pub fn distribute_rewards(
        &self,
        ledger: &mut dyn AssetLedger,
        recipient: &str,
        amount: u64,
    ) -> Result<(), RewardError> {
        if amount == 0 {
            return Err(RewardError::ZeroAmount);
        }

        let custodied = ledger.balance_of(&self.address);
        if amount > custodied {
            return Err(RewardError::InsufficientRewards {
                custodied,
                requested: amount,
            });
        }

        ledger.transfer(&self.address, recipient, amount)?;
        info!(vault = %self.address, recipient = %recipient, amount, "rewards distributed");
        Ok(())
    }

    /// Hands ownership to `new_owner`. Owner only, irreversible.
    pub fn transfer_ownership(
        &mut self,
        caller: &str,
        new_owner: Address,
    ) -> Result<(), RewardError> {
        if caller != self.owner {
            return Err(RewardError::Unauthorized {
                caller: caller.to_string(),
            });
        }
        self.owner = new_owner;
        Ok(())
    }

    /// The vault's custodied balance on `ledger`.
    pub fn reward_balance(&self, ledger: &dyn AssetLedger) -> u64 {
        ledger.balance_of(&self.address)
    }

    /// The vault's address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// The current owner.
    pub fn owner(&self) -> &str {
        &self.owner
    }
}
