use anchor_lang::prelude::*;

use crate::errors::BoomError;
use crate::events::{ExplosionArmed, PresaleExploded};
use crate::instructions::pool::vault_sol_balance;
use crate::state::PresaleExplosion;
use crate::{InitPresaleExplosion, TriggerExplosionCap, TriggerExplosionTime};

pub fn init_presale_explosion(
    ctx: Context<InitPresaleExplosion>,
    round_id: u64,
    cap_hash: [u8; 32],
    explosion_deadline: i64,
) -> Result<()> {
    require_keys_eq!(
        ctx.accounts.presale_round.authority,
        ctx.accounts.authority.key(),
        BoomError::Unauthorized
    );

    let now = Clock::get()?.unix_timestamp;
    ctx.accounts.presale_explosion.arm(
        round_id,
        cap_hash,
        explosion_deadline,
        now,
        ctx.bumps.presale_explosion,
    )?;

    emit!(ExplosionArmed {
        round_id,
        cap_hash,
        explosion_deadline,
    });

    Ok(())
}

fn emit_exploded(gate: &PresaleExplosion) {
    msg!("round {} exploded ({:?})", gate.round_id, gate.explosion_reason);
    emit!(PresaleExploded {
        round_id: gate.round_id,
        reason: gate.explosion_reason,
        explosion_time: gate.explosion_time,
        revealed_cap: gate.revealed_cap,
    });
}

pub fn trigger_presale_explosion_time(ctx: Context<TriggerExplosionTime>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let gate = &mut ctx.accounts.presale_explosion;
    gate.trigger_time(now)?;
    ctx.accounts.sequencer.record_explosion(gate.round_id);

    emit_exploded(gate);
    Ok(())
}

/// Opens the cap commitment and fires if the pool, freshly synced, is valued at or
/// above the revealed cap.
pub fn trigger_presale_explosion_cap(
    ctx: Context<TriggerExplosionCap>,
    revealed_cap: u64,
    salt: [u8; 32],
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let sol_balance = vault_sol_balance(&ctx.accounts.sol_vault.to_account_info())?;
    let pool = &mut ctx.accounts.pool;
    pool.sync(sol_balance, ctx.accounts.token_vault.amount, now);
    let live_valuation = pool.valuation(ctx.accounts.presale_token.total_supply);

    let gate = &mut ctx.accounts.presale_explosion;
    gate.trigger_cap(revealed_cap, &salt, live_valuation, now)?;
    ctx.accounts.sequencer.record_explosion(gate.round_id);

    emit_exploded(gate);
    Ok(())
}
