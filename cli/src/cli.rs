//! # CLI Interface
//!
//! Command-line argument structure for the `meridian` devnet driver,
//! defined with `clap` derive. Every subcommand is one transaction against
//! the persisted devnet: load the state file, execute, save.
//!
//! Accounts may be referenced either by full `0x…` address or by index
//! into the account list printed by `init` (index 0 is the admin).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Meridian staking protocol devnet driver.
///
/// Deploys an in-memory devnet — native ledger, reward token, and the
/// three staking contracts — into a JSON state file, then drives the
/// public operation surface against it one command at a time.
#[derive(Parser, Debug)]
#[command(
    name = "meridian",
    about = "Meridian staking protocol devnet driver",
    version,
    propagate_version = true
)]
pub struct MeridianCli {
    /// Path to the devnet state file.
    #[arg(
        long,
        short = 's',
        env = "MERIDIAN_STATE_FILE",
        default_value = "devnet.json",
        global = true
    )]
    pub state_file: PathBuf,

    /// Log output format: "pretty" or "json".
    #[arg(long, env = "MERIDIAN_LOG_FORMAT", default_value = "pretty", global = true)]
    pub log_format: String,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the `meridian` binary.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Deploy a fresh devnet: accounts, ledgers, contracts, wiring, and
    /// initial vault funding. Overwrites any existing state file.
    Init(InitArgs),
    /// Print the deployment: accounts, balances, stakes, and vault state.
    Status,
    /// Stake native coins from an account.
    Stake(AmountFromArgs),
    /// Unstake from an account. Early exits pay the basis-point penalty.
    Unstake(AmountFromArgs),
    /// Claim the caller's reward (their staked amount, 1:1).
    Claim(FromArgs),
    /// Send native coins from an account into the reward vault's custody.
    FundRewards(AdminAmountArgs),
    /// Approve and deposit reward tokens into the yield pool (admin only).
    AddYield(AdminAmountArgs),
    /// Pay out from the reward vault to a recipient. Permissionless.
    DistributeRewards(AmountToArgs),
    /// Pay out from the yield pool to a recipient. Permissionless.
    DistributeYield(AmountToArgs),
}

/// Arguments for the `init` subcommand.
#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Number of non-admin accounts to create.
    #[arg(long, default_value_t = 2)]
    pub accounts: usize,

    /// Native coins issued to every account at genesis, in smallest units.
    #[arg(long, default_value_t = 100_000_000_000)]
    pub genesis: u64,

    /// Native coins moved into the reward vault at deployment, in
    /// smallest units.
    #[arg(long, default_value_t = 10_000_000_000)]
    pub reward_fund: u64,
}

/// Caller plus amount, for deposits and withdrawals.
#[derive(Parser, Debug)]
pub struct AmountFromArgs {
    /// Calling account: `0x…` address or account index.
    #[arg(long, default_value = "1")]
    pub from: String,

    /// Amount in smallest units.
    pub amount: u64,
}

/// Caller plus amount, defaulting to the admin account, for funding
/// operations.
#[derive(Parser, Debug)]
pub struct AdminAmountArgs {
    /// Calling account: `0x…` address or account index.
    #[arg(long, default_value = "0")]
    pub from: String,

    /// Amount in smallest units.
    pub amount: u64,
}

/// Caller only, for claims.
#[derive(Parser, Debug)]
pub struct FromArgs {
    /// Calling account: `0x…` address or account index.
    #[arg(long, default_value = "1")]
    pub from: String,
}

/// Recipient plus amount, for permissionless payouts.
#[derive(Parser, Debug)]
pub struct AmountToArgs {
    /// Recipient account: `0x…` address or account index.
    #[arg(long)]
    pub to: String,

    /// Amount in smallest units.
    pub amount: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        // Ensures the derive macros produce a valid CLI definition.
        MeridianCli::command().debug_assert();
    }
}
