//! # Protocol Configuration & Constants
//!
//! Every policy constant in Meridian lives here. If you're hardcoding a
//! number anywhere else in the workspace, move it here first.
//!
//! These values are part of the deployed contracts' observable behavior —
//! changing them after a deployment changes what depositors were promised,
//! so treat edits as protocol changes, not refactors.

// ---------------------------------------------------------------------------
// Staking Policy
// ---------------------------------------------------------------------------

/// Minimum stake period in seconds. Withdrawals made before this much time
/// has elapsed since the depositor's last stake incur the early-exit
/// penalty. 7 days.
pub const MIN_STAKE_PERIOD_SECS: i64 = 7 * 24 * 60 * 60;

/// Early-exit penalty rate in basis points. 500 = 5% of the withdrawn
/// amount is forfeited when unstaking inside the minimum stake period.
pub const PENALTY_RATE_BPS: u64 = 500;

/// Basis-point denominator. 10_000 bps = 100%.
pub const BPS_DENOMINATOR: u64 = 10_000;

// ---------------------------------------------------------------------------
// Asset Parameters
// ---------------------------------------------------------------------------

/// Decimal places for the protocol's tokens and the native coin. 8, same
/// as Bitcoin — the `decimals` value is display-only, the ledgers never
/// divide.
pub const TOKEN_DECIMALS: u8 = 8;

/// One whole token/coin in smallest units, at [`TOKEN_DECIMALS`] places.
pub const UNIT: u64 = 100_000_000;

/// Initial supply minted to the deployer of each protocol token:
/// 1,000,000 whole tokens.
pub const INITIAL_TOKEN_SUPPLY: u64 = 1_000_000 * UNIT;

/// Ticker symbol of the native coin.
pub const NATIVE_SYMBOL: &str = "MRD";

// ---------------------------------------------------------------------------
// Addresses
// ---------------------------------------------------------------------------

/// Address payload length in bytes. 20 bytes, rendered as `0x` + 40 hex
/// characters.
pub const ADDRESS_BYTES: usize = 20;

/// Display prefix for addresses.
pub const ADDRESS_PREFIX: &str = "0x";

// ---------------------------------------------------------------------------
// Utility
// ---------------------------------------------------------------------------

/// Formats a smallest-unit amount as a whole-unit decimal string, for
/// logs and CLI output. `125_000_000` → `"1.25"`.
pub fn format_units(amount: u64) -> String {
    let whole = amount / UNIT;
    let frac = amount % UNIT;
    if frac == 0 {
        return whole.to_string();
    }
    let frac_str = format!("{:08}", frac);
    format!("{}.{}", whole, frac_str.trim_end_matches('0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_stake_period_is_seven_days() {
        assert_eq!(MIN_STAKE_PERIOD_SECS, 604_800);
    }

    #[test]
    fn penalty_rate_is_five_percent() {
        assert_eq!(PENALTY_RATE_BPS, 500);
        assert!(PENALTY_RATE_BPS < BPS_DENOMINATOR);
    }

    #[test]
    fn unit_matches_decimals() {
        assert_eq!(UNIT, 10u64.pow(TOKEN_DECIMALS as u32));
    }

    #[test]
    fn initial_supply_is_one_million_tokens() {
        assert_eq!(INITIAL_TOKEN_SUPPLY / UNIT, 1_000_000);
    }

    #[test]
    fn format_units_whole_amounts() {
        assert_eq!(format_units(0), "0");
        assert_eq!(format_units(UNIT), "1");
        assert_eq!(format_units(42 * UNIT), "42");
    }

    #[test]
    fn format_units_fractional_amounts() {
        assert_eq!(format_units(UNIT + UNIT / 4), "1.25");
        assert_eq!(format_units(1), "0.00000001");
        assert_eq!(format_units(UNIT / 2), "0.5");
    }
}
