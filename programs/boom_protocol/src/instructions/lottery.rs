use anchor_lang::prelude::*;

use crate::constants::MAX_BATCH;
use crate::errors::BoomError;
use crate::events::{PresaleFinalized, WinnerMarked};
use crate::state::UserDeposit;
use crate::utils::{lottery_seed, recent_slot_hash, DEPOSIT_SEED};
use crate::{EndPresaleAndLottery, MarkWinner};

/// Finalizes the round, fixes the winner set, and marks any deposits passed in
/// `remaining_accounts` (writable, at most MAX_BATCH).
pub fn end_presale_and_lottery<'info>(
    ctx: Context<'_, '_, '_, 'info, EndPresaleAndLottery<'info>>,
    winner_indexes: Vec<u32>,
) -> Result<()> {
    require!(
        ctx.remaining_accounts.len() <= MAX_BATCH,
        BoomError::TooManyEntries
    );

    let round = &mut ctx.accounts.presale_round;
    require_keys_eq!(round.authority, ctx.accounts.authority.key(), BoomError::Unauthorized);

    let clock = Clock::get()?;
    let slot_hash = {
        let data = ctx
            .accounts
            .recent_slothashes
            .try_borrow_data()
            .map_err(|_| error!(BoomError::AccountBorrowFailed))?;
        recent_slot_hash(&data)?
    };
    let seed = lottery_seed(round.round_id, round.total_depositors, &slot_hash, clock.slot);

    let selection = round.finalize(clock.unix_timestamp, &winner_indexes, seed)?;
    msg!(
        "round {} finalized: {:?}, {} of {} win",
        round.round_id,
        selection,
        round.winners_count,
        round.total_depositors
    );

    let round_le = round.round_id.to_le_bytes();
    let mut marked_in_batch: u32 = 0;

    for deposit_ai in ctx.remaining_accounts.iter() {
        require!(
            deposit_ai.owner == ctx.program_id,
            BoomError::DepositNotOwnedByProgram
        );

        let mut deposit: UserDeposit = {
            let data = deposit_ai
                .try_borrow_data()
                .map_err(|_| error!(BoomError::AccountBorrowFailed))?;
            let mut slice: &[u8] = &data;
            UserDeposit::try_deserialize(&mut slice)?
        };

        let expected = Pubkey::create_program_address(
            &[
                DEPOSIT_SEED,
                &round_le,
                deposit.depositor.as_ref(),
                &[deposit.bump],
            ],
            ctx.program_id,
        )
        .map_err(|_| error!(BoomError::DepositPdaMismatch))?;
        require_keys_eq!(expected, *deposit_ai.key, BoomError::DepositPdaMismatch);

        if round.apply_lottery_result(&mut deposit)? {
            let mut data = deposit_ai
                .try_borrow_mut_data()
                .map_err(|_| error!(BoomError::AccountBorrowFailed))?;
            let mut w = std::io::Cursor::new(&mut data[..]);
            deposit.try_serialize(&mut w)?;
            marked_in_batch += 1;
        }
    }

    emit!(PresaleFinalized {
        round_id: round.round_id,
        total_deposited: round.total_deposited,
        total_depositors: round.total_depositors,
        winners_count: round.winners_count,
        selection,
        lottery_seed: round.lottery_seed,
        marked_in_batch,
    });

    Ok(())
}

/// Audited reconciliation path: confirms one deposit the lottery already selected.
pub fn mark_winner(ctx: Context<MarkWinner>) -> Result<()> {
    let round = &mut ctx.accounts.presale_round;
    require_keys_eq!(round.authority, ctx.accounts.authority.key(), BoomError::Unauthorized);

    let deposit = &mut ctx.accounts.user_deposit;
    round.mark_winner(deposit)?;

    msg!("manual mark: round {} position {}", round.round_id, deposit.position);
    emit!(WinnerMarked {
        round_id: round.round_id,
        depositor: deposit.depositor,
        position: deposit.position,
        marked_by: ctx.accounts.authority.key(),
    });

    Ok(())
}
