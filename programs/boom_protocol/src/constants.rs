// Centralized Protocol Constants

// Round & Lottery Limits
// ======================

/// Upper bound on `lottery_spots` for a round.
/// The drawn winner positions are stored inline on the round record, so this also
/// fixes the size of `PresaleRound`.
pub const MAX_LOTTERY_SPOTS: u32 = 100;

/// Deposit records that `end_presale_and_lottery` will mark in the same instruction.
/// Anything beyond this is reconciled afterwards with `mark_winner`.
pub const MAX_BATCH: usize = 16;

// Pool / AMM Constants
// ====================

/// Basis-point denominator for `fee_bps` (10_000 = 100%).
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Fixed-point scale used when reporting `sol_reserve / token_reserve`.
pub const PRICE_SCALE: u128 = 1_000_000_000;

/// Fee used by operational tooling when creating pools (0.5%).
pub const DEFAULT_POOL_FEE_BPS: u16 = 50;

// Sequencer Defaults (Devnet)
// ===========================

/// Default presale window in seconds.
pub const DEFAULT_COOLDOWN_SECS: i64 = 60;

/// Default number of lottery winners per round.
pub const DEFAULT_LOTTERY_SPOTS: u32 = 25;

/// Default minimum deposit (0.01 SOL).
pub const DEFAULT_MIN_DEPOSIT: u64 = 10_000_000;

/// Default maximum deposit (1 SOL).
pub const DEFAULT_MAX_DEPOSIT: u64 = 1_000_000_000;

/// Round id the sequencer reports before any round has been started.
pub const INITIAL_ROUND_ID: u64 = 0;
