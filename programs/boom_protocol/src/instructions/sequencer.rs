use anchor_lang::prelude::*;

use crate::errors::BoomError;
use crate::events::{PresaleStarted, RoundDefaultsUpdated, SequencerInitialized};
use crate::state::RoundParams;
use crate::{AutoStartNextRound, InitRoundSequencer, UpdateRoundDefaults};

pub fn init_round_sequencer(
    ctx: Context<InitRoundSequencer>,
    default_cooldown: i64,
    default_lottery_spots: u32,
    default_min_deposit: u64,
    default_max_deposit: u64,
) -> Result<()> {
    let defaults = RoundParams {
        cooldown: default_cooldown,
        lottery_spots: default_lottery_spots,
        min_deposit: default_min_deposit,
        max_deposit: default_max_deposit,
    };

    let seq = &mut ctx.accounts.sequencer;
    seq.initialize(ctx.accounts.authority.key(), defaults, ctx.bumps.sequencer)?;

    emit!(SequencerInitialized {
        authority: seq.authority,
        default_cooldown,
        default_lottery_spots,
        default_min_deposit,
        default_max_deposit,
    });

    Ok(())
}

pub fn update_round_defaults(
    ctx: Context<UpdateRoundDefaults>,
    default_cooldown: Option<i64>,
    default_lottery_spots: Option<u32>,
    default_min_deposit: Option<u64>,
    default_max_deposit: Option<u64>,
    auto_advance_enabled: Option<bool>,
) -> Result<()> {
    let seq = &mut ctx.accounts.sequencer;
    require_keys_eq!(seq.authority, ctx.accounts.authority.key(), BoomError::Unauthorized);

    seq.apply_updates(
        default_cooldown,
        default_lottery_spots,
        default_min_deposit,
        default_max_deposit,
        auto_advance_enabled,
    )?;

    emit!(RoundDefaultsUpdated {
        default_cooldown: seq.default_cooldown,
        default_lottery_spots: seq.default_lottery_spots,
        default_min_deposit: seq.default_min_deposit,
        default_max_deposit: seq.default_max_deposit,
        auto_advance_enabled: seq.auto_advance_enabled,
    });

    Ok(())
}

/// Permissionless crank: opens `current_round + 1` with the stored defaults once the
/// current round has exploded.
pub fn auto_start_next_round(ctx: Context<AutoStartNextRound>, new_round_id: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let seq = &mut ctx.accounts.sequencer;
    seq.check_auto_advance(new_round_id, ctx.accounts.previous_explosion.is_exploded)?;

    let previous_round = seq.current_round;
    let params = seq.defaults();

    let round = &mut ctx.accounts.presale_round;
    round.open(seq.authority, new_round_id, &params, now, ctx.bumps.presale_round)?;

    seq.issue_round_id(new_round_id)?;
    seq.record_explosion(previous_round);

    emit!(PresaleStarted {
        round_id: new_round_id,
        start_time: round.start_time,
        end_time: round.end_time,
        lottery_spots: round.lottery_spots,
        min_deposit: round.min_deposit,
        max_deposit: round.max_deposit,
        auto_started: true,
    });

    Ok(())
}
