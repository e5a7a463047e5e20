//! Integration tests for the asset layer.
//!
//! These tests drive both ledger implementations through the
//! [`AssetLedger`] trait with the same scenarios, proving the two
//! operational modes (attached-value vs. pull-with-allowance) stay
//! behaviorally parallel wherever the contracts rely on them.
//!
//! Each test builds its own ledgers. No shared state, no ordering
//! dependencies.

use meridian_protocol::asset::{AssetError, AssetLedger, NativeLedger, TokenLedger};

const USER: &str = "0xuser";
const CONTRACT: &str = "0xcontract";

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

/// Builds a native ledger with `amount` issued to [`USER`].
fn native_with_user_funds(amount: u64) -> NativeLedger {
    let mut ledger = NativeLedger::new();
    ledger.fund(USER, amount).expect("genesis funding");
    ledger
}

/// Builds a token ledger where [`USER`] holds `amount` and has approved
/// [`CONTRACT`] for the same amount.
fn token_with_user_funds(amount: u64) -> TokenLedger {
    let mut ledger = TokenLedger::staking_token("0xissuer".to_string());
    ledger
        .transfer("0xissuer", USER, amount)
        .expect("seed user balance");
    ledger.approve(USER, CONTRACT, amount);
    ledger
}

/// Runs `scenario` once per operational mode, with 1_000 units in the
/// user's hands (and, in token mode, approved to the contract).
fn in_both_modes(scenario: impl Fn(&mut dyn AssetLedger)) {
    let mut native = native_with_user_funds(1_000);
    scenario(&mut native);

    let mut token = token_with_user_funds(1_000);
    scenario(&mut token);
}

// ---------------------------------------------------------------------------
// Mode-Parallel Behavior
// ---------------------------------------------------------------------------

#[test]
fn pull_acquires_into_spender_custody() {
    in_both_modes(|ledger| {
        ledger.pull(USER, CONTRACT, 400).unwrap();
        assert_eq!(ledger.balance_of(USER), 600);
        assert_eq!(ledger.balance_of(CONTRACT), 400);
    });
}

#[test]
fn pull_beyond_user_means_rejected_atomically() {
    in_both_modes(|ledger| {
        let result = ledger.pull(USER, CONTRACT, 1_001);
        assert!(result.is_err());
        assert_eq!(ledger.balance_of(USER), 1_000);
        assert_eq!(ledger.balance_of(CONTRACT), 0);
    });
}

#[test]
fn custody_release_round_trip_conserves_value() {
    in_both_modes(|ledger| {
        ledger.pull(USER, CONTRACT, 1_000).unwrap();
        ledger.transfer(CONTRACT, USER, 250).unwrap();
        ledger.transfer(CONTRACT, USER, 750).unwrap();
        assert_eq!(ledger.balance_of(USER), 1_000);
        assert_eq!(ledger.balance_of(CONTRACT), 0);
    });
}

#[test]
fn release_beyond_custody_rejected() {
    in_both_modes(|ledger| {
        ledger.pull(USER, CONTRACT, 300).unwrap();
        let result = ledger.transfer(CONTRACT, USER, 301);
        assert!(matches!(
            result.unwrap_err(),
            AssetError::InsufficientBalance { .. }
        ));
        assert_eq!(ledger.balance_of(CONTRACT), 300);
    });
}

// ---------------------------------------------------------------------------
// Mode-Specific Edges
// ---------------------------------------------------------------------------

#[test]
fn token_mode_requires_allowance_even_with_balance() {
    let mut ledger = TokenLedger::staking_token("0xissuer".to_string());
    ledger.transfer("0xissuer", USER, 1_000).unwrap();
    // No approval issued: the pull must fail on allowance, not balance.
    let result = ledger.pull(USER, CONTRACT, 100);
    assert!(matches!(
        result.unwrap_err(),
        AssetError::InsufficientAllowance { allowed: 0, .. }
    ));
}

#[test]
fn native_mode_needs_no_prior_authorization() {
    let mut ledger = native_with_user_funds(1_000);
    // Attached value: holding the coins is the only requirement.
    ledger.pull(USER, CONTRACT, 1_000).unwrap();
    assert_eq!(ledger.balance_of(CONTRACT), 1_000);
}

#[test]
fn token_allowance_depletes_across_pulls() {
    let mut ledger = token_with_user_funds(1_000);
    ledger.pull(USER, CONTRACT, 600).unwrap();
    ledger.pull(USER, CONTRACT, 400).unwrap();
    // The approval is exhausted even though nothing says the user would
    // refuse a further deposit.
    let result = ledger.pull(USER, CONTRACT, 1);
    assert!(matches!(
        result.unwrap_err(),
        AssetError::InsufficientAllowance { .. }
    ));
}

// ---------------------------------------------------------------------------
// Snapshot / Restore
// ---------------------------------------------------------------------------

#[test]
fn ledger_state_survives_snapshot_restore() {
    let mut token = token_with_user_funds(1_000);
    token.pull(USER, CONTRACT, 450).unwrap();

    let snapshot = serde_json::to_string(&token).unwrap();
    let restored: TokenLedger = serde_json::from_str(&snapshot).unwrap();

    assert_eq!(restored.balance_of(USER), token.balance_of(USER));
    assert_eq!(restored.balance_of(CONTRACT), 450);
    assert_eq!(restored.allowance(USER, CONTRACT), 550);
}
