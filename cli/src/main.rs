// Copyright (c) 2026 Meridian Labs. MIT License.
// See LICENSE for details.

//! # Meridian Devnet Driver
//!
//! Entry point for the `meridian` binary. Deploys an in-memory devnet into
//! a JSON state file and drives the staking protocol's public operation
//! surface against it, one command per transaction:
//!
//! - `init`               — deploy accounts, ledgers, contracts; wire and fund
//! - `status`             — print the whole deployment
//! - `stake` / `unstake`  — depositor operations (penalty applies to early exits)
//! - `claim`              — claim the caller's 1:1 reward
//! - `fund-rewards`       — out-of-band funding of the reward vault
//! - `add-yield`          — approve + deposit into the yield pool (admin)
//! - `distribute-rewards` / `distribute-yield` — permissionless payouts

mod cli;
mod logging;
mod state;

use anyhow::Result;
use chrono::Utc;
use clap::Parser;

use meridian_protocol::asset::AssetLedger;
use meridian_protocol::config::format_units;

use cli::{Commands, MeridianCli};
use logging::LogFormat;
use state::DevnetState;

fn main() -> Result<()> {
    let cli = MeridianCli::parse();
    logging::init_logging(
        "meridian=info,meridian_contracts=info,meridian_protocol=info",
        LogFormat::from_str_lossy(&cli.log_format),
    );

    let path = cli.state_file.as_path();
    match cli.command {
        Commands::Init(args) => {
            let state = DevnetState::deploy(args.accounts, args.genesis, args.reward_fund)?;
            state.save(path)?;
            tracing::info!(
                deployment_id = %state.deployment_id,
                state_file = %path.display(),
                accounts = state.accounts.len(),
                "devnet deployed"
            );

            println!("devnet deployed ({})", state.deployment_id);
            println!("  staking:     {}", state.staking.address());
            println!("  distributor: {}", state.distributor.address());
            println!("  yield pool:  {}", state.yield_pool.address());
            println!("accounts (index 0 is the admin):");
            for (index, account) in state.accounts.iter().enumerate() {
                println!(
                    "  [{}] {}  {} native",
                    index,
                    account,
                    format_units(state.native_balance(account))
                );
            }
            Ok(())
        }

        Commands::Status => {
            let state = DevnetState::load(path)?;
            print_status(&state);
            Ok(())
        }

        Commands::Stake(args) => {
            let mut state = DevnetState::load(path)?;
            let caller = state.resolve_account(&args.from)?;
            state
                .staking
                .stake(&mut state.native, &caller, args.amount, Utc::now())?;
            state.save(path)?;

            println!(
                "staked {} from {} (stake now {}, total staked {})",
                format_units(args.amount),
                caller,
                format_units(state.staking.staked_amount(&caller)),
                format_units(state.staking.total_staked())
            );
            Ok(())
        }

        Commands::Unstake(args) => {
            let mut state = DevnetState::load(path)?;
            let caller = state.resolve_account(&args.from)?;
            let payout =
                state
                    .staking
                    .unstake(&mut state.native, &caller, args.amount, Utc::now())?;
            state.save(path)?;

            let penalty = args.amount - payout;
            if penalty > 0 {
                println!(
                    "unstaked {} from {}: paid {} (early-exit penalty {})",
                    format_units(args.amount),
                    caller,
                    format_units(payout),
                    format_units(penalty)
                );
            } else {
                println!(
                    "unstaked {} from {}: paid in full",
                    format_units(args.amount),
                    caller
                );
            }
            Ok(())
        }

        Commands::Claim(args) => {
            let mut state = DevnetState::load(path)?;
            let caller = state.resolve_account(&args.from)?;
            let paid = state
                .staking
                .claim_reward(&state.distributor, &mut state.native, &caller)?;
            state.save(path)?;

            println!("claimed {} for {}", format_units(paid), caller);
            Ok(())
        }

        Commands::FundRewards(args) => {
            let mut state = DevnetState::load(path)?;
            let from = state.resolve_account(&args.from)?;
            let vault = state.distributor.address().to_string();
            state.native.transfer(&from, &vault, args.amount)?;
            state.save(path)?;

            println!(
                "funded reward vault with {} (balance now {})",
                format_units(args.amount),
                format_units(state.distributor.reward_balance(&state.native))
            );
            Ok(())
        }

        Commands::AddYield(args) => {
            let mut state = DevnetState::load(path)?;
            let caller = state.resolve_account(&args.from)?;
            let pool = state.yield_pool.address().to_string();

            // Approve-then-deposit, the same two steps a wallet performs.
            state.reward_token.approve(&caller, &pool, args.amount);
            state
                .yield_pool
                .add_yield(&mut state.reward_token, &caller, args.amount)?;
            state.save(path)?;

            println!(
                "added {} yield (pool now {})",
                format_units(args.amount),
                format_units(state.yield_pool.total_yield_pool())
            );
            Ok(())
        }

        Commands::DistributeRewards(args) => {
            let mut state = DevnetState::load(path)?;
            let recipient = state.resolve_account(&args.to)?;
            state
                .distributor
                .distribute_rewards(&mut state.native, &recipient, args.amount)?;
            state.save(path)?;

            println!(
                "distributed {} rewards to {} (vault now {})",
                format_units(args.amount),
                recipient,
                format_units(state.distributor.reward_balance(&state.native))
            );
            Ok(())
        }

        Commands::DistributeYield(args) => {
            let mut state = DevnetState::load(path)?;
            let recipient = state.resolve_account(&args.to)?;
            state
                .yield_pool
                .distribute_yield(&mut state.reward_token, &recipient, args.amount)?;
            state.save(path)?;

            println!(
                "distributed {} yield to {} (pool now {})",
                format_units(args.amount),
                recipient,
                format_units(state.yield_pool.total_yield_pool())
            );
            Ok(())
        }
    }
}

/// Prints the full deployment: contracts, vault state, and per-account
/// balances and stakes.
fn print_status(state: &DevnetState) {
    println!("deployment {} ({})", state.deployment_id, state.created_at);
    println!(
        "staking {} — total staked {}",
        state.staking.address(),
        format_units(state.staking.total_staked())
    );
    println!(
        "reward vault {} — custodied {}",
        state.distributor.address(),
        format_units(state.distributor.reward_balance(&state.native))
    );
    println!(
        "yield pool {} — distributable {} / custodied {}",
        state.yield_pool.address(),
        format_units(state.yield_pool.total_yield_pool()),
        format_units(state.yield_pool.pool_balance(&state.reward_token))
    );
    println!("accounts:");
    for (index, account) in state.accounts.iter().enumerate() {
        let stake = state
            .staking
            .stake_of(account)
            .map(|s| format!("{} staked since {}", format_units(s.amount), s.last_staked_time))
            .unwrap_or_else(|| "no stake".to_string());
        println!(
            "  [{}] {}  native {}  {} {}  ({})",
            index,
            account,
            format_units(state.native_balance(account)),
            state.reward_token.symbol(),
            format_units(state.reward_token.balance_of(account)),
            stake
        );
    }
}
