//! # Staking Contract
//!
//! The stake ledger: depositors lock the asset, accrue reward eligibility,
//! and withdraw subject to a time-gated early-exit penalty. The lifecycle
//! per depositor is:
//!
//! 1. **Stake** — the asset moves into contract custody; the depositor's
//!    record and the aggregate total grow by the amount, and the stake
//!    clock resets to the transaction time.
//! 2. **Unstake** — the record and aggregate shrink by the full amount.
//!    Inside the minimum stake period the payout is docked by the
//!    basis-point penalty; after it, the payout is exact.
//! 3. **Claim** — the reward vault pays the depositor their current stake
//!    amount, 1:1. No time weighting, no pool share.
//!
//! The reward and yield vaults are deployed independently, so the contract
//! learns their addresses after deployment through owner-gated setters
//! rather than constructor parameters (two-phase wiring). The execution
//! layer resolves the wired distributor address back to a component when a
//! claim runs; the contract re-checks the match before any value moves.
//!
//! Stake records are never deleted — a fully withdrawn depositor keeps a
//! record with amount 0.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use meridian_protocol::asset::{AssetError, AssetLedger};
use meridian_protocol::config::{BPS_DENOMINATOR, MIN_STAKE_PERIOD_SECS, PENALTY_RATE_BPS};
use meridian_protocol::identity::Address;

use crate::reward_distribution::{RewardDistribution, RewardError};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur during staking operations.
#[derive(Debug, Error)]
pub enum StakingError {
    /// A zero-amount deposit was attempted.
    #[error("cannot stake zero")]
    ZeroStake,

    /// A withdrawal exceeds the caller's staked amount.
    #[error("insufficient balance: staked {staked}, requested {requested}")]
    InsufficientStake {
        /// The caller's current stake.
        staked: u64,
        /// The amount that was requested.
        requested: u64,
    },

    /// A privileged operation was invoked by a non-owner.
    #[error("unauthorized: {caller} is not the owner")]
    Unauthorized {
        /// The identity that made the call.
        caller: Address,
    },

    /// A reward claim ran before the distributor was wired.
    #[error("reward distributor is not set")]
    DistributorNotSet,

    /// The execution layer resolved the wired address to the wrong
    /// component.
    #[error("reward distributor mismatch: wired {wired}, resolved {resolved}")]
    DistributorMismatch {
        /// The address stored by the owner.
        wired: Address,
        /// The address of the component that was actually passed in.
        resolved: Address,
    },

    /// A deposit would push a stake or the aggregate past `u64::MAX`.
    #[error("stake overflow: current {current}, credit {credit}")]
    Overflow {
        /// The balance before the failed credit.
        current: u64,
        /// The amount that caused the overflow.
        credit: u64,
    },

    /// The underlying asset movement failed.
    #[error(transparent)]
    Asset(#[from] AssetError),

    /// The reward vault refused the claim.
    #[error(transparent)]
    Reward(#[from] RewardError),
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A depositor's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stake {
    /// Locked amount in smallest units.
    pub amount: u64,
    /// Timestamp of the most recent deposit. Every deposit resets this,
    /// restarting the penalty clock for the entire position.
    pub last_staked_time: DateTime<Utc>,
}

/// The stake ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Staking {
    /// The contract's own address — where staked value is custodied.
    address: Address,
    /// The identity allowed to wire vaults and hand off ownership.
    owner: Address,
    /// Stake records keyed by depositor. Absent ≡ amount 0.
    stakes: HashMap<Address, Stake>,
    /// Aggregate of all stake amounts. Equals the live sum at every
    /// observation point.
    total_staked: u64,
    /// Reward vault address, wired post-deployment.
    reward_distributor: Option<Address>,
    /// Yield vault address, wired post-deployment.
    yield_pool: Option<Address>,
}

impl Staking {
    /// Deploys the contract at `address`, owned by `owner`, with no vaults
    /// wired and nothing staked.
    pub fn new(address: Address, owner: Address) -> Self {
        Self {
            address,
            owner,
            stakes: HashMap::new(),
            total_staked: 0,
            reward_distributor: None,
            yield_pool: None,
        }
    }

    /// The early-exit penalty for withdrawing `amount` inside the minimum
    /// stake period: `amount × PENALTY_RATE_BPS / 10_000`, floored.
    pub fn early_exit_penalty(amount: u64) -> u64 {
        // Widen so the product cannot overflow for any u64 amount.
        (amount as u128 * PENALTY_RATE_BPS as u128 / BPS_DENOMINATOR as u128) as u64
    }

    /// Locks `amount` of the caller's asset in contract custody.
    ///
    /// The caller's record grows by `amount`, the aggregate total grows by
    /// `amount`, and `last_staked_time` resets to `now` — including on
    /// top-ups of an existing position.
    ///
    /// # Errors
    ///
    /// Returns [`StakingError::ZeroStake`] for a zero deposit,
    /// [`StakingError::Overflow`] if the record or aggregate would
    /// overflow, and the pull's allowance/balance errors verbatim. Any
    /// failure leaves all state unchanged.
    pub fn stake(
        &mut self,
        ledger: &mut dyn AssetLedger,
        caller: &str,
        amount: u64,
        now: DateTime<Utc>,
    ) -> Result<(), StakingError> {
        if amount == 0 {
            return Err(StakingError::ZeroStake);
        }

        let current = self.staked_amount(caller);
        let new_amount = current.checked_add(amount).ok_or(StakingError::Overflow {
            current,
            credit: amount,
        })?;
        let new_total = self
            .total_staked
            .checked_add(amount)
            .ok_or(StakingError::Overflow {
                current: self.total_staked,
                credit: amount,
            })?;

        // All record arithmetic is pre-validated, so once the pull lands
        // the commit below cannot fail.
        ledger.pull(caller, &self.address, amount)?;

        self.stakes.insert(
            caller.to_string(),
            Stake {
                amount: new_amount,
                last_staked_time: now,
            },
        );
        self.total_staked = new_total;
        info!(staker = %caller, amount, total_staked = self.total_staked, "staked");
        Ok(())
    }

    /// Releases `amount` of the caller's stake back to them, docking the
    /// early-exit penalty when less than the minimum stake period has
    /// elapsed since their last deposit.
    ///
    /// The stake record and the aggregate total shrink by the full
    /// `amount`; the penalty comes out of the payout, not the accounting.
    /// Returns the amount actually paid out.
    ///
    /// # Errors
    ///
    /// Returns [`StakingError::InsufficientStake`] if `amount` exceeds the
    /// caller's stake, leaving all state unchanged.
    pub fn unstake(
        &mut self,
        ledger: &mut dyn AssetLedger,
        caller: &str,
        amount: u64,
        now: DateTime<Utc>,
    ) -> Result<u64, StakingError> {
        let staked = self.staked_amount(caller);
        if amount > staked {
            return Err(StakingError::InsufficientStake {
                staked,
                requested: amount,
            });
        }

        // The record exists whenever staked > 0; a zero-amount withdrawal
        // against an absent record has nothing to update or pay.
        let Some(record) = self.stakes.get_mut(caller) else {
            return Ok(0);
        };

        let elapsed = now.signed_duration_since(record.last_staked_time);
        let penalty = if elapsed.num_seconds() < MIN_STAKE_PERIOD_SECS {
            Self::early_exit_penalty(amount)
        } else {
            0
        };
        let payout = amount - penalty;

        // Accounting commits before the outbound transfer.
        record.amount -= amount;
        self.total_staked -= amount;

        ledger.transfer(&self.address, caller, payout)?;
        info!(
            staker = %caller,
            amount,
            penalty,
            payout,
            total_staked = self.total_staked,
            "unstaked"
        );
        Ok(payout)
    }

    /// Claims the caller's reward: their current stake amount, paid 1:1
    /// from the wired reward vault. Returns the amount paid.
    ///
    /// # Errors
    ///
    /// Returns [`StakingError::DistributorNotSet`] before wiring,
    /// [`StakingError::DistributorMismatch`] if the resolved component
    /// does not match the wired address, and the vault's own refusals
    /// verbatim (a zero stake claims zero, which the vault rejects).
    pub fn claim_reward(
        &self,
        distributor: &RewardDistribution,
        ledger: &mut dyn AssetLedger,
        caller: &str,
    ) -> Result<u64, StakingError> {
        let wired = self
            .reward_distributor
            .as_deref()
            .ok_or(StakingError::DistributorNotSet)?;
        if distributor.address() != wired {
            return Err(StakingError::DistributorMismatch {
                wired: wired.to_string(),
                resolved: distributor.address().to_string(),
            });
        }

        let amount = self.staked_amount(caller);
        distributor.distribute_rewards(ledger, caller, amount)?;
        info!(staker = %caller, amount, "reward claimed");
        Ok(amount)
    }

    /// Wires the reward vault address. Owner only.
    pub fn set_reward_distributor(
        &mut self,
        caller: &str,
        distributor: Address,
    ) -> Result<(), StakingError> {
        self.ensure_owner(caller)?;
        self.reward_distributor = Some(distributor);
        Ok(())
    }

    /// Wires the yield vault address. Owner only.
    pub fn set_yield_pool(&mut self, caller: &str, pool: Address) -> Result<(), StakingError> {
        self.ensure_owner(caller)?;
        self.yield_pool = Some(pool);
        Ok(())
    }

    /// Hands ownership to `new_owner`. Owner only, irreversible.
    pub fn transfer_ownership(
        &mut self,
        caller: &str,
        new_owner: Address,
    ) -> Result<(), StakingError> {
        self.ensure_owner(caller)?;
        self.owner = new_owner;
        Ok(())
    }

    fn ensure_owner(&self, caller: &str) -> Result<(), StakingError> {
        if caller != self.owner {
            return Err(StakingError::Unauthorized {
                caller: caller.to_string(),
            });
        }
        Ok(())
    }

    /// The caller's stake record, if they ever deposited.
    pub fn stake_of(&self, account: &str) -> Option<Stake> {
        self.stakes.get(account).copied()
    }

    /// The caller's staked amount. Absent record ≡ 0.
    pub fn staked_amount(&self, account: &str) -> u64 {
        self.stakes.get(account).map(|s| s.amount).unwrap_or(0)
    }

    /// Aggregate staked amount across all depositors.
    pub fn total_staked(&self) -> u64 {
        self.total_staked
    }

    /// The contract's address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// The current owner.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// The wired reward vault address, if set.
    pub fn reward_distributor(&self) -> Option<&str> {
        self.reward_distributor.as_deref()
    }

    /// The wired yield vault address, if set.
    pub fn yield_pool(&self) -> Option<&str> {
        self.yield_pool.as_deref()
    }
}
