//! # Devnet State
//!
//! The persisted deployment: every ledger and contract, snapshotted to a
//! JSON file between commands. One command is one transaction — load,
//! execute, save — so a failed command leaves the file exactly as it was.
//!
//! The layout mirrors the production deployment: the staking contract and
//! the reward vault live on the native ledger (attached-value mode), while
//! the yield pool is funded from the reward token under allowances
//! (pull mode).

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use meridian_contracts::reward_distribution::RewardDistribution;
use meridian_contracts::staking::Staking;
use meridian_contracts::yield_pool::YieldPool;
use meridian_protocol::asset::{AssetLedger, NativeLedger, TokenLedger};
use meridian_protocol::identity::{derive_contract_address, is_valid_address, random_address, Address};

/// A complete devnet deployment.
#[derive(Debug, Serialize, Deserialize)]
pub struct DevnetState {
    /// Identifies this deployment across commands and log lines.
    pub deployment_id: Uuid,
    /// When `init` ran.
    pub created_at: DateTime<Utc>,
    /// All accounts. Index 0 is the admin that deployed everything.
    pub accounts: Vec<Address>,
    /// The native coin ledger — staking and reward custody.
    pub native: NativeLedger,
    /// The reward token — yield pool custody.
    pub reward_token: TokenLedger,
    /// The stake ledger contract.
    pub staking: Staking,
    /// The reward vault contract.
    pub distributor: RewardDistribution,
    /// The yield vault contract.
    pub yield_pool: YieldPool,
}

impl DevnetState {
    /// Deploys a fresh devnet: generates accounts, issues genesis coins,
    /// deploys and wires the three contracts, and funds the reward vault.
    pub fn deploy(user_accounts: usize, genesis: u64, reward_fund: u64) -> Result<Self> {
        let admin = random_address();
        let mut accounts = vec![admin.clone()];
        accounts.extend((0..user_accounts).map(|_| random_address()));

        let mut native = NativeLedger::new();
        for account in &accounts {
            native.fund(account, genesis)?;
        }

        let staking_addr = derive_contract_address(&admin, 0);
        let distributor_addr = derive_contract_address(&admin, 1);
        let pool_addr = derive_contract_address(&admin, 2);

        let mut staking = Staking::new(staking_addr, admin.clone());
        let distributor = RewardDistribution::new(distributor_addr.clone(), admin.clone());
        let yield_pool = YieldPool::new(pool_addr, admin.clone());

        staking.set_reward_distributor(&admin, distributor_addr.clone())?;
        staking.set_yield_pool(&admin, yield_pool.address().to_string())?;

        native
            .transfer(&admin, &distributor_addr, reward_fund)
            .context("funding the reward vault at deployment")?;

        let reward_token = TokenLedger::reward_token(admin);

        Ok(Self {
            deployment_id: Uuid::new_v4(),
            created_at: Utc::now(),
            accounts,
            native,
            reward_token,
            staking,
            distributor,
            yield_pool,
        })
    }

    /// Loads the devnet from `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("no devnet state at {} — run `meridian init`", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("corrupt devnet state at {}", path.display()))
    }

    /// Saves the devnet to `path`, pretty-printed so the file doubles as a
    /// readable deployment record.
    pub fn save(&self, path: &Path) -> Result<()> {
        let raw = serde_json::to_string_pretty(self).context("serializing devnet state")?;
        fs::write(path, raw)
            .with_context(|| format!("writing devnet state to {}", path.display()))
    }

    /// The admin account.
    pub fn admin(&self) -> &str {
        &self.accounts[0]
    }

    /// Resolves an account spec: either a `0x…` address or an index into
    /// [`accounts`](Self::accounts).
    pub fn resolve_account(&self, spec: &str) -> Result<Address> {
        if is_valid_address(spec) {
            return Ok(spec.to_string());
        }
        if let Ok(index) = spec.parse::<usize>() {
            match self.accounts.get(index) {
                Some(address) => return Ok(address.clone()),
                None => bail!(
                    "account index {} out of range (devnet has {} accounts)",
                    index,
                    self.accounts.len()
                ),
            }
        }
        bail!("'{}' is neither a 0x… address nor an account index", spec)
    }

    /// Native balance helper for status output.
    pub fn native_balance(&self, account: &str) -> u64 {
        self.native.balance_of(account)
    }
}
