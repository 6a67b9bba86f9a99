use anchor_lang::prelude::*;

use crate::state::{ExplosionReason, SwapDirection, WinnerSelection};

#[event]
pub struct SequencerInitialized {
    pub authority: Pubkey,
    pub default_cooldown: i64,
    pub default_lottery_spots: u32,
    pub default_min_deposit: u64,
    pub default_max_deposit: u64,
}

#[event]
pub struct RoundDefaultsUpdated {
    pub default_cooldown: i64,
    pub default_lottery_spots: u32,
    pub default_min_deposit: u64,
    pub default_max_deposit: u64,
    pub auto_advance_enabled: bool,
}

#[event]
pub struct PresaleStarted {
    pub round_id: u64,
    pub start_time: i64,
    pub end_time: i64,
    pub lottery_spots: u32,
    pub min_deposit: u64,
    pub max_deposit: u64,
    pub auto_started: bool,
}

#[event]
pub struct DepositMade {
    pub round_id: u64,
    pub depositor: Pubkey,
    pub amount: u64,
    pub position: u32,
    pub total_deposited: u64,
    pub total_depositors: u32,
}

#[event]
pub struct PresaleFinalized {
    pub round_id: u64,
    pub total_deposited: u64,
    pub total_depositors: u32,
    pub winners_count: u32,
    pub selection: WinnerSelection,
    pub lottery_seed: [u8; 32],
    pub marked_in_batch: u32,
}

#[event]
pub struct WinnerMarked {
    pub round_id: u64,
    pub depositor: Pubkey,
    pub position: u32,
    pub marked_by: Pubkey,
}

#[event]
pub struct RefundClaimed {
    pub round_id: u64,
    pub depositor: Pubkey,
    pub amount: u64,
}

#[event]
pub struct ProceedsWithdrawn {
    pub round_id: u64,
    pub authority: Pubkey,
    pub amount: u64,
}

#[event]
pub struct PresaleTokenRegistered {
    pub round_id: u64,
    pub mint: Pubkey,
    pub total_supply: u64,
    pub tokens_per_winner: u64,
    pub winners_count: u32,
}

#[event]
pub struct WinnerTokensClaimed {
    pub round_id: u64,
    pub winner: Pubkey,
    pub amount: u64,
}

#[event]
pub struct ExplosionArmed {
    pub round_id: u64,
    pub cap_hash: [u8; 32],
    pub explosion_deadline: i64,
}

#[event]
pub struct PresaleExploded {
    pub round_id: u64,
    pub reason: ExplosionReason,
    pub explosion_time: i64,
    pub revealed_cap: u64,
}

#[event]
pub struct PoolCreated {
    pub round_id: u64,
    pub pool: Pubkey,
    pub mint: Pubkey,
    pub fee_bps: u16,
}

#[event]
pub struct LiquidityDeposited {
    pub round_id: u64,
    pub provider: Pubkey,
    pub token_amount: u64,
    pub sol_amount: u64,
    pub sol_reserve: u64,
    pub token_reserve: u64,
}

#[event]
pub struct ReservesSynced {
    pub round_id: u64,
    pub sol_reserve: u64,
    pub token_reserve: u64,
    /// Lamports per token scaled by PRICE_SCALE (0 while the pool holds no tokens).
    pub price: u128,
}

#[event]
pub struct SwapExecuted {
    pub round_id: u64,
    pub trader: Pubkey,
    pub direction: SwapDirection,
    pub amount_in: u64,
    pub amount_out: u64,
    pub sol_reserve: u64,
    pub token_reserve: u64,
    pub price: u128,
}
