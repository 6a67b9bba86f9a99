use anchor_lang::prelude::*;

pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;
pub mod utils;
pub mod contexts;
pub mod constants;

pub use utils::*;
pub use instructions::*;
pub use state::*;
pub use errors::*;
pub use contexts::*;
pub use constants::*;

declare_id!("GC56De2SrwjGsCCFimwqxzxwjpHBEsubP3AV1yXwVtrn");

#[program]
pub mod boom_protocol {
    use super::*;
    use crate::instructions::{explosion, issuance, lottery, pool, presale, sequencer};

    // ----------------------------
    // Round sequencer
    // ----------------------------
    pub fn init_round_sequencer(
        ctx: Context<InitRoundSequencer>,
        default_cooldown: i64,
        default_lottery_spots: u32,
        default_min_deposit: u64,
        default_max_deposit: u64,
    ) -> Result<()> {
        sequencer::init_round_sequencer(
            ctx,
            default_cooldown,
            default_lottery_spots,
            default_min_deposit,
            default_max_deposit,
        )
    }

    pub fn update_round_defaults(
        ctx: Context<UpdateRoundDefaults>,
        default_cooldown: Option<i64>,
        default_lottery_spots: Option<u32>,
        default_min_deposit: Option<u64>,
        default_max_deposit: Option<u64>,
        auto_advance_enabled: Option<bool>,
    ) -> Result<()> {
        sequencer::update_round_defaults(
            ctx,
            default_cooldown,
            default_lottery_spots,
            default_min_deposit,
            default_max_deposit,
            auto_advance_enabled,
        )
    }

    pub fn auto_start_next_round(ctx: Context<AutoStartNextRound>, new_round_id: u64) -> Result<()> {
        sequencer::auto_start_next_round(ctx, new_round_id)
    }

    // ----------------------------
    // Presale
    // ----------------------------
    pub fn start_presale(
        ctx: Context<StartPresale>,
        round_id: u64,
        cooldown: i64,
        lottery_spots: u32,
        min_deposit: u64,
        max_deposit: u64,
    ) -> Result<()> {
        presale::start_presale(ctx, round_id, cooldown, lottery_spots, min_deposit, max_deposit)
    }

    pub fn deposit_presale(ctx: Context<DepositPresale>, amount: u64) -> Result<()> {
        presale::deposit_presale(ctx, amount)
    }

    pub fn end_presale_and_lottery<'info>(
        ctx: Context<'_, '_, '_, 'info, EndPresaleAndLottery<'info>>,
        winner_indexes: Vec<u32>,
    ) -> Result<()> {
        lottery::end_presale_and_lottery(ctx, winner_indexes)
    }

    pub fn mark_winner(ctx: Context<MarkWinner>) -> Result<()> {
        lottery::mark_winner(ctx)
    }

    pub fn claim_refund(ctx: Context<ClaimRefund>) -> Result<()> {
        presale::claim_refund(ctx)
    }

    pub fn withdraw_presale_proceeds(ctx: Context<WithdrawPresaleProceeds>) -> Result<()> {
        presale::withdraw_presale_proceeds(ctx)
    }

    // ----------------------------
    // Token issuance
    // ----------------------------
    pub fn register_presale_token(
        ctx: Context<RegisterPresaleToken>,
        round_id: u64,
        total_supply: u64,
        tokens_per_winner: u64,
    ) -> Result<()> {
        issuance::register_presale_token(ctx, round_id, total_supply, tokens_per_winner)
    }

    pub fn claim_winner_tokens(ctx: Context<ClaimWinnerTokens>) -> Result<()> {
        issuance::claim_winner_tokens(ctx)
    }

    // ----------------------------
    // Explosion gate
    // ----------------------------
    pub fn init_presale_explosion(
        ctx: Context<InitPresaleExplosion>,
        round_id: u64,
        cap_hash: [u8; 32],
        explosion_deadline: i64,
    ) -> Result<()> {
        explosion::init_presale_explosion(ctx, round_id, cap_hash, explosion_deadline)
    }

    pub fn trigger_presale_explosion_time(ctx: Context<TriggerExplosionTime>) -> Result<()> {
        explosion::trigger_presale_explosion_time(ctx)
    }

    pub fn trigger_presale_explosion_cap(
        ctx: Context<TriggerExplosionCap>,
        revealed_cap: u64,
        salt: [u8; 32],
    ) -> Result<()> {
        explosion::trigger_presale_explosion_cap(ctx, revealed_cap, salt)
    }

    // ----------------------------
    // Pool
    // ----------------------------
    pub fn create_pool(ctx: Context<CreatePool>, round_id: u64, fee_bps: u16) -> Result<()> {
        pool::create_pool(ctx, round_id, fee_bps)
    }

    pub fn deposit_liquidity(
        ctx: Context<DepositLiquidity>,
        token_amount: u64,
        sol_amount: u64,
    ) -> Result<()> {
        pool::deposit_liquidity(ctx, token_amount, sol_amount)
    }

    pub fn deposit_pool_tokens<'info>(
        ctx: Context<'_, '_, 'info, 'info, DepositPoolTokens<'info>>,
        amount: u64,
    ) -> Result<()> {
        pool::deposit_pool_tokens(ctx, amount)
    }

    pub fn sync_pool_reserves(ctx: Context<SyncPoolReserves>) -> Result<()> {
        pool::sync_pool_reserves(ctx)
    }

    pub fn swap<'info>(
        ctx: Context<'_, '_, 'info, 'info, Swap<'info>>,
        amount_in: u64,
        min_amount_out: u64,
        direction: SwapDirection,
    ) -> Result<()> {
        pool::swap(ctx, amount_in, min_amount_out, direction)
    }
}
