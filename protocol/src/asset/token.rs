//! # Token Ledger
//!
//! Allowance-based fungible token, shaped like the ERC-20 contract it
//! replaces: per-account balances, owner-gated minting, and a two-step
//! approve/pull flow so components can acquire deposits without holding
//! the depositor's keys.
//!
//! The protocol deploys two well-known instances: MeridianStake (`MRDS`),
//! the stakeable asset, and MeridianReward (`MRDR`), the asset the yield
//! pool distributes. Both start with the full initial supply credited to
//! the deployer.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{AssetError, AssetLedger};
use crate::config::{INITIAL_TOKEN_SUPPLY, TOKEN_DECIMALS};
use crate::identity::Address;

/// A fungible token balance book with allowances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenLedger {
    /// Human-readable token name (e.g., "MeridianStake").
    name: String,
    /// Ticker symbol (e.g., "MRDS").
    symbol: String,
    /// Display decimal places. The ledger itself never divides.
    decimals: u8,
    /// The identity allowed to mint and to hand off ownership.
    owner: Address,
    /// Current total supply in smallest units.
    total_supply: u64,
    /// Balances keyed by address. Absent ≡ zero.
    balances: HashMap<Address, u64>,
    /// Allowances: owner → (spender → remaining amount).
    allowances: HashMap<Address, HashMap<Address, u64>>,
}

impl TokenLedger {
    /// Creates a token with zero supply. Use [`mint`](Self::mint) (owner
    /// only) to put units into circulation.
    pub fn new(name: &str, symbol: &str, decimals: u8, owner: Address) -> Self {
        Self {
            name: name.to_string(),
            symbol: symbol.to_string(),
            decimals,
            owner,
            total_supply: 0,
            balances: HashMap::new(),
            allowances: HashMap::new(),
        }
    }

    /// Deploys the MeridianStake token with the initial supply credited to
    /// `owner`.
    pub fn staking_token(owner: Address) -> Self {
        Self::with_initial_supply("MeridianStake", "MRDS", owner)
    }

    /// Deploys the MeridianReward token with the initial supply credited
    /// to `owner`.
    pub fn reward_token(owner: Address) -> Self {
        Self::with_initial_supply("MeridianReward", "MRDR", owner)
    }

    fn with_initial_supply(name: &str, symbol: &str, owner: Address) -> Self {
        let mut ledger = Self::new(name, symbol, TOKEN_DECIMALS, owner.clone());
        ledger.total_supply = INITIAL_TOKEN_SUPPLY;
        ledger.balances.insert(owner, INITIAL_TOKEN_SUPPLY);
        ledger
    }

    /// Mints `amount` new units to `to`. Owner only.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::Unauthorized`] for non-owner callers and
    /// [`AssetError::Overflow`] if the supply or the recipient balance
    /// would exceed `u64::MAX`.
    pub fn mint(&mut self, caller: &str, to: &str, amount: u64) -> Result<(), AssetError> {
        if caller != self.owner {
            return Err(AssetError::Unauthorized {
                caller: caller.to_string(),
            });
        }

        let new_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(AssetError::Overflow {
                account: to.to_string(),
                current: self.total_supply,
                credit: amount,
            })?;
        let current = self.balance_of(to);
        let new_balance = current.checked_add(amount).ok_or(AssetError::Overflow {
            account: to.to_string(),
            current,
            credit: amount,
        })?;

        self.total_supply = new_supply;
        self.balances.insert(to.to_string(), new_balance);
        debug!(token = %self.symbol, to = %to, amount, "minted");
        Ok(())
    }

    /// Pre-authorizes `spender` to pull up to `amount` from `owner`.
    /// Overwrites any prior allowance for the pair.
    pub fn approve(&mut self, owner: &str, spender: &str, amount: u64) {
        self.allowances
            .entry(owner.to_string())
            .or_default()
            .insert(spender.to_string(), amount);
        debug!(token = %self.symbol, owner = %owner, spender = %spender, amount, "approved");
    }

    /// Remaining allowance from `owner` to `spender`.
    pub fn allowance(&self, owner: &str, spender: &str) -> u64 {
        self.allowances
            .get(owner)
            .and_then(|per_spender| per_spender.get(spender))
            .copied()
            .unwrap_or(0)
    }

    /// Moves `amount` from `from` to `to` under `spender`'s allowance.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::InsufficientAllowance`] before touching any
    /// balance if the allowance falls short; balance errors are those of
    /// [`AssetLedger::transfer`].
    pub fn transfer_from(
        &mut self,
        spender: &str,
        from: &str,
        to: &str,
        amount: u64,
    ) -> Result<(), AssetError> {
        let allowed = self.allowance(from, spender);
        if allowed < amount {
            return Err(AssetError::InsufficientAllowance {
                owner: from.to_string(),
                spender: spender.to_string(),
                allowed,
                requested: amount,
            });
        }

        self.transfer(from, to, amount)?;

        // Consume the allowance only after the transfer is known good, so
        // a failed transfer leaves the approval intact.
        self.allowances
            .entry(from.to_string())
            .or_default()
            .insert(spender.to_string(), allowed - amount);
        Ok(())
    }

    /// Hands ownership to `new_owner`. Owner only, irreversible.
    pub fn transfer_ownership(&mut self, caller: &str, new_owner: Address) -> Result<(), AssetError> {
        if caller != self.owner {
            return Err(AssetError::Unauthorized {
                caller: caller.to_string(),
            });
        }
        debug!(token = %self.symbol, from = %self.owner, to = %new_owner, "ownership transferred");
        self.owner = new_owner;
        Ok(())
    }

    /// Token name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ticker symbol.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Display decimals.
    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    /// Current total supply.
    pub fn total_supply(&self) -> u64 {
        self.total_supply
    }

    /// The minting/ownership identity.
    pub fn owner(&self) -> &str {
        &self.owner
    }
}

impl AssetLedger for TokenLedger {
    fn transfer(&mut self, from: &str, to: &str, amount: u64) -> Result<(), AssetError> {
        let from_balance = self.balance_of(from);
        if from_balance < amount {
            return Err(AssetError::InsufficientBalance {
                account: from.to_string(),
                available: from_balance,
                requested: amount,
            });
        }

        if from == to {
            return Ok(());
        }

        let to_balance = self.balance_of(to);
        let new_to = to_balance.checked_add(amount).ok_or(AssetError::Overflow {
            account: to.to_string(),
            current: to_balance,
            credit: amount,
        })?;

        self.balances.insert(from.to_string(), from_balance - amount);
        self.balances.insert(to.to_string(), new_to);
        debug!(token = %self.symbol, from = %from, to = %to, amount, "transfer");
        Ok(())
    }

    /// Allowance semantics: the spender pulls into its own balance under a
    /// prior [`approve`](TokenLedger::approve).
    fn pull(&mut self, owner: &str, spender: &str, amount: u64) -> Result<(), AssetError> {
        self.transfer_from(spender, owner, spender, amount)
    }

    fn balance_of(&self, account: &str) -> u64 {
        self.balances.get(account).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{INITIAL_TOKEN_SUPPLY, TOKEN_DECIMALS};

    fn deployer() -> Address {
        "0xdeployer".to_string()
    }

    #[test]
    fn staking_token_metadata_and_supply() {
        let token = TokenLedger::staking_token(deployer());
        assert_eq!(token.name(), "MeridianStake");
        assert_eq!(token.symbol(), "MRDS");
        assert_eq!(token.decimals(), TOKEN_DECIMALS);
        assert_eq!(token.total_supply(), INITIAL_TOKEN_SUPPLY);
        // The whole supply starts with the deployer.
        assert_eq!(token.balance_of("0xdeployer"), INITIAL_TOKEN_SUPPLY);
        assert_eq!(token.owner(), "0xdeployer");
    }

    #[test]
    fn reward_token_metadata() {
        let token = TokenLedger::reward_token(deployer());
        assert_eq!(token.name(), "MeridianReward");
        assert_eq!(token.symbol(), "MRDR");
        assert_eq!(token.total_supply(), INITIAL_TOKEN_SUPPLY);
    }

    #[test]
    fn transfer_between_accounts() {
        let mut token = TokenLedger::staking_token(deployer());
        token.transfer("0xdeployer", "0xuser1", 50).unwrap();
        assert_eq!(token.balance_of("0xuser1"), 50);

        token.transfer("0xuser1", "0xuser2", 25).unwrap();
        assert_eq!(token.balance_of("0xuser1"), 25);
        assert_eq!(token.balance_of("0xuser2"), 25);
        // Transfers never change supply.
        assert_eq!(token.total_supply(), INITIAL_TOKEN_SUPPLY);
    }

    #[test]
    fn transfer_without_balance_rejected() {
        let mut token = TokenLedger::staking_token(deployer());
        let result = token.transfer("0xuser1", "0xdeployer", 1);
        assert!(matches!(
            result.unwrap_err(),
            AssetError::InsufficientBalance { .. }
        ));
        assert_eq!(token.balance_of("0xdeployer"), INITIAL_TOKEN_SUPPLY);
    }

    #[test]
    fn owner_can_mint() {
        let mut token = TokenLedger::staking_token(deployer());
        token.mint("0xdeployer", "0xuser1", 1_000).unwrap();
        assert_eq!(token.balance_of("0xuser1"), 1_000);
        assert_eq!(token.total_supply(), INITIAL_TOKEN_SUPPLY + 1_000);
    }

    #[test]
    fn non_owner_mint_rejected() {
        let mut token = TokenLedger::staking_token(deployer());
        let result = token.mint("0xuser1", "0xuser1", 1_000);
        assert!(matches!(
            result.unwrap_err(),
            AssetError::Unauthorized { .. }
        ));
        assert_eq!(token.total_supply(), INITIAL_TOKEN_SUPPLY);
    }

    #[test]
    fn approve_then_pull() {
        let mut token = TokenLedger::staking_token(deployer());
        token.approve("0xdeployer", "0xpool", 500);
        assert_eq!(token.allowance("0xdeployer", "0xpool"), 500);

        token.pull("0xdeployer", "0xpool", 300).unwrap();
        assert_eq!(token.balance_of("0xpool"), 300);
        assert_eq!(token.allowance("0xdeployer", "0xpool"), 200);
    }

    #[test]
    fn pull_beyond_allowance_rejected() {
        let mut token = TokenLedger::staking_token(deployer());
        token.approve("0xdeployer", "0xpool", 100);

        let result = token.pull("0xdeployer", "0xpool", 101);
        assert!(matches!(
            result.unwrap_err(),
            AssetError::InsufficientAllowance {
                allowed: 100,
                requested: 101,
                ..
            }
        ));
        // Nothing moved, allowance intact.
        assert_eq!(token.balance_of("0xpool"), 0);
        assert_eq!(token.allowance("0xdeployer", "0xpool"), 100);
    }

    #[test]
    fn pull_without_any_approval_rejected() {
        let mut token = TokenLedger::staking_token(deployer());
        let result = token.pull("0xdeployer", "0xpool", 1);
        assert!(matches!(
            result.unwrap_err(),
            AssetError::InsufficientAllowance { allowed: 0, .. }
        ));
    }

    #[test]
    fn failed_transfer_from_preserves_allowance() {
        let mut token = TokenLedger::staking_token(deployer());
        // Allowance exceeds the owner's balance: approval succeeds, the
        // pull fails on balance, and the approval survives.
        token.transfer("0xdeployer", "0xpoor", 10).unwrap();
        token.approve("0xpoor", "0xpool", 1_000);

        let result = token.pull("0xpoor", "0xpool", 500);
        assert!(matches!(
            result.unwrap_err(),
            AssetError::InsufficientBalance { .. }
        ));
        assert_eq!(token.allowance("0xpoor", "0xpool"), 1_000);
        assert_eq!(token.balance_of("0xpoor"), 10);
    }

    #[test]
    fn ownership_handoff() {
        let mut token = TokenLedger::staking_token(deployer());
        token
            .transfer_ownership("0xdeployer", "0xnew".to_string())
            .unwrap();
        assert_eq!(token.owner(), "0xnew");

        // The old owner is now locked out.
        let result = token.mint("0xdeployer", "0xdeployer", 1);
        assert!(matches!(
            result.unwrap_err(),
            AssetError::Unauthorized { .. }
        ));
        // The new owner can mint.
        token.mint("0xnew", "0xnew", 1).unwrap();
    }

    #[test]
    fn non_owner_ownership_handoff_rejected() {
        let mut token = TokenLedger::staking_token(deployer());
        let result = token.transfer_ownership("0xuser1", "0xuser1".to_string());
        assert!(matches!(
            result.unwrap_err(),
            AssetError::Unauthorized { .. }
        ));
        assert_eq!(token.owner(), "0xdeployer");
    }

    #[test]
    fn serialization_roundtrip() {
        let mut token = TokenLedger::reward_token(deployer());
        token.transfer("0xdeployer", "0xuser1", 77).unwrap();
        token.approve("0xuser1", "0xpool", 33);

        let json = serde_json::to_string(&token).expect("serialize");
        let restored: TokenLedger = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored.balance_of("0xuser1"), 77);
        assert_eq!(restored.allowance("0xuser1", "0xpool"), 33);
        assert_eq!(restored.total_supply(), token.total_supply());
    }
}
