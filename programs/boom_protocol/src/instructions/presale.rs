use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, Transfer};

use crate::errors::BoomError;
use crate::events::{DepositMade, PresaleStarted, ProceedsWithdrawn, RefundClaimed};
use crate::state::RoundParams;
use crate::{ClaimRefund, DepositPresale, StartPresale, WithdrawPresaleProceeds};

/// Moves lamports out of a program-owned escrow.
fn release_lamports(from: &AccountInfo, to: &AccountInfo, amount: u64) -> Result<()> {
    let from_balance = from
        .lamports()
        .checked_sub(amount)
        .ok_or(BoomError::MathOverflow)?;
    let to_balance = to
        .lamports()
        .checked_add(amount)
        .ok_or(BoomError::MathOverflow)?;

    **from.try_borrow_mut_lamports()? = from_balance;
    **to.try_borrow_mut_lamports()? = to_balance;
    Ok(())
}

pub fn start_presale(
    ctx: Context<StartPresale>,
    round_id: u64,
    cooldown: i64,
    lottery_spots: u32,
    min_deposit: u64,
    max_deposit: u64,
) -> Result<()> {
    let seq = &mut ctx.accounts.sequencer;
    require_keys_eq!(seq.authority, ctx.accounts.authority.key(), BoomError::Unauthorized);
    seq.issue_round_id(round_id)?;

    let params = RoundParams {
        cooldown,
        lottery_spots,
        min_deposit,
        max_deposit,
    };
    let now = Clock::get()?.unix_timestamp;

    let round = &mut ctx.accounts.presale_round;
    round.open(seq.authority, round_id, &params, now, ctx.bumps.presale_round)?;

    emit!(PresaleStarted {
        round_id,
        start_time: round.start_time,
        end_time: round.end_time,
        lottery_spots,
        min_deposit,
        max_deposit,
        auto_started: false,
    });

    Ok(())
}

pub fn deposit_presale(ctx: Context<DepositPresale>, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let depositor = ctx.accounts.depositor.key();

    let round = &mut ctx.accounts.presale_round;
    let position = round.accept_deposit(
        &mut ctx.accounts.user_deposit,
        depositor,
        amount,
        now,
        ctx.bumps.user_deposit,
    )?;
    let (round_id, total_deposited, total_depositors) =
        (round.round_id, round.total_deposited, round.total_depositors);

    // round PDA escrows the SOL until refund / withdrawal
    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            Transfer {
                from: ctx.accounts.depositor.to_account_info(),
                to: ctx.accounts.presale_round.to_account_info(),
            },
        ),
        amount,
    )?;

    emit!(DepositMade {
        round_id,
        depositor,
        amount,
        position,
        total_deposited,
        total_depositors,
    });

    Ok(())
}

pub fn claim_refund(ctx: Context<ClaimRefund>) -> Result<()> {
    let round = &mut ctx.accounts.presale_round;
    let amount = round.refund(&mut ctx.accounts.user_deposit)?;
    let round_id = round.round_id;

    release_lamports(
        &ctx.accounts.presale_round.to_account_info(),
        &ctx.accounts.depositor.to_account_info(),
        amount,
    )?;

    emit!(RefundClaimed {
        round_id,
        depositor: ctx.accounts.depositor.key(),
        amount,
    });

    Ok(())
}

pub fn withdraw_presale_proceeds(ctx: Context<WithdrawPresaleProceeds>) -> Result<()> {
    let round = &mut ctx.accounts.presale_round;
    require_keys_eq!(round.authority, ctx.accounts.authority.key(), BoomError::Unauthorized);

    let amount = round.take_proceeds()?;
    let round_id = round.round_id;

    release_lamports(
        &ctx.accounts.presale_round.to_account_info(),
        &ctx.accounts.authority.to_account_info(),
        amount,
    )?;

    emit!(ProceedsWithdrawn {
        round_id,
        authority: ctx.accounts.authority.key(),
        amount,
    });

    Ok(())
}
