//! # Native Coin Ledger
//!
//! Balance book for the chain's native coin. There is no allowance
//! machinery here: a native deposit means the caller attached the value to
//! the call, which this ledger models as a direct transfer from the caller
//! to the receiving component.
//!
//! Coins enter circulation through [`NativeLedger::fund`] — the devnet
//! genesis/faucet path. There is no burn; the books only ever redistribute
//! what was issued.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{AssetError, AssetLedger};
use crate::identity::Address;

/// The native coin balance book.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NativeLedger {
    /// Balances in smallest units, keyed by address. Absent ≡ zero.
    balances: HashMap<Address, u64>,
    /// Sum of all coins ever issued via [`fund`](Self::fund).
    total_issued: u64,
}

impl NativeLedger {
    /// Creates an empty ledger. No accounts, nothing issued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues `amount` new coins to `account`.
    ///
    /// This is the genesis/faucet path, not a transfer — total issuance
    /// grows by `amount`.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::Overflow`] if the account balance or total
    /// issuance would exceed `u64::MAX`.
    pub fn fund(&mut self, account: &str, amount: u64) -> Result<(), AssetError> {
        let current = self.balance_of(account);
        let new_balance = current.checked_add(amount).ok_or(AssetError::Overflow {
            account: account.to_string(),
            current,
            credit: amount,
        })?;
        let new_issued = self
            .total_issued
            .checked_add(amount)
            .ok_or(AssetError::Overflow {
                account: account.to_string(),
                current: self.total_issued,
                credit: amount,
            })?;

        self.balances.insert(account.to_string(), new_balance);
        self.total_issued = new_issued;
        debug!(account = %account, amount, "native coins issued");
        Ok(())
    }

    /// Total coins issued over the ledger's lifetime.
    pub fn total_issued(&self) -> u64 {
        self.total_issued
    }

    /// Number of accounts with a balance entry (including zeroed ones).
    pub fn account_count(&self) -> usize {
        self.balances.len()
    }
}

impl AssetLedger for NativeLedger {
    fn transfer(&mut self, from: &str, to: &str, amount: u64) -> Result<(), AssetError> {
        let from_balance = self.balance_of(from);
        if from_balance < amount {
            return Err(AssetError::InsufficientBalance {
                account: from.to_string(),
                available: from_balance,
                requested: amount,
            });
        }

        // Self-transfers must not double-apply against a stale read.
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
        debug!(from = %from, to = %to, amount, "native transfer");
        Ok(())
    }

    /// Attached-value semantics: the owner sends the amount along with the
    /// call, so the pull is a plain transfer into the spender.
    fn pull(&mut self, owner: &str, spender: &str, amount: u64) -> Result<(), AssetError> {
        self.transfer(owner, spender, amount)
    }

    fn balance_of(&self, account: &str) -> u64 {
        self.balances.get(account).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fund_creates_balance_and_tracks_issuance() {
        let mut ledger = NativeLedger::new();
        ledger.fund("0xaa", 1_000).unwrap();
        ledger.fund("0xbb", 500).unwrap();

        assert_eq!(ledger.balance_of("0xaa"), 1_000);
        assert_eq!(ledger.balance_of("0xbb"), 500);
        assert_eq!(ledger.total_issued(), 1_500);
    }

    #[test]
    fn unknown_account_holds_zero() {
        let ledger = NativeLedger::new();
        assert_eq!(ledger.balance_of("0xnobody"), 0);
    }

    #[test]
    fn transfer_moves_value() {
        let mut ledger = NativeLedger::new();
        ledger.fund("0xaa", 1_000).unwrap();

        ledger.transfer("0xaa", "0xbb", 400).unwrap();
        assert_eq!(ledger.balance_of("0xaa"), 600);
        assert_eq!(ledger.balance_of("0xbb"), 400);
        // Conservation: transfers never change issuance.
        assert_eq!(ledger.total_issued(), 1_000);
    }

    #[test]
    fn transfer_insufficient_balance_rejected() {
        let mut ledger = NativeLedger::new();
        ledger.fund("0xaa", 100).unwrap();

        let result = ledger.transfer("0xaa", "0xbb", 200);
        assert!(matches!(
            result.unwrap_err(),
            AssetError::InsufficientBalance {
                available: 100,
                requested: 200,
                ..
            }
        ));
        // Failed call leaves the books untouched.
        assert_eq!(ledger.balance_of("0xaa"), 100);
        assert_eq!(ledger.balance_of("0xbb"), 0);
    }

    #[test]
    fn transfer_to_self_is_a_no_op() {
        let mut ledger = NativeLedger::new();
        ledger.fund("0xaa", 100).unwrap();
        ledger.transfer("0xaa", "0xaa", 60).unwrap();
        assert_eq!(ledger.balance_of("0xaa"), 100);
    }

    #[test]
    fn pull_is_a_direct_transfer() {
        let mut ledger = NativeLedger::new();
        ledger.fund("0xuser", 1_000).unwrap();

        ledger.pull("0xuser", "0xcontract", 250).unwrap();
        assert_eq!(ledger.balance_of("0xuser"), 750);
        assert_eq!(ledger.balance_of("0xcontract"), 250);
    }

    #[test]
    fn fund_overflow_rejected() {
        let mut ledger = NativeLedger::new();
        ledger.fund("0xaa", u64::MAX).unwrap();
        assert!(ledger.fund("0xaa", 1).is_err());
        assert_eq!(ledger.balance_of("0xaa"), u64::MAX);
    }

    #[test]
    fn credit_overflow_rejected_without_debit() {
        let mut ledger = NativeLedger::new();
        ledger.fund("0xbb", u64::MAX).unwrap();
        ledger.fund("0xcc", 10).unwrap();

        let result = ledger.transfer("0xcc", "0xbb", 5);
        assert!(matches!(result.unwrap_err(), AssetError::Overflow { .. }));
        assert_eq!(ledger.balance_of("0xcc"), 10);
        assert_eq!(ledger.balance_of("0xbb"), u64::MAX);
    }

    #[test]
    fn serialization_roundtrip() {
        let mut ledger = NativeLedger::new();
        ledger.fund("0xaa", 123).unwrap();

        let json = serde_json::to_string(&ledger).expect("serialize");
        let restored: NativeLedger = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored.balance_of("0xaa"), 123);
        assert_eq!(restored.total_issued(), 123);
    }
}
