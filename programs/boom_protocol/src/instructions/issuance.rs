use anchor_lang::prelude::*;
use anchor_lang::solana_program::program_option::COption;
use anchor_spl::token_2022::{self, MintTo};

use crate::errors::BoomError;
use crate::events::{PresaleTokenRegistered, WinnerTokensClaimed};
use crate::utils::transfer_hook_program_id;
use crate::{ClaimWinnerTokens, RegisterPresaleToken, MINT_AUTHORITY_SEED};

pub fn register_presale_token(
    ctx: Context<RegisterPresaleToken>,
    round_id: u64,
    total_supply: u64,
    tokens_per_winner: u64,
) -> Result<()> {
    let round = &ctx.accounts.presale_round;
    require_keys_eq!(round.authority, ctx.accounts.authority.key(), BoomError::Unauthorized);

    // claims and pool seeding both mint through the round PDA
    let mint = &ctx.accounts.mint;
    require!(
        mint.mint_authority == COption::Some(ctx.accounts.mint_authority.key()),
        BoomError::InvalidMintAuthority
    );

    // without a hook the mint would trade freely before the explosion
    let hook_program = {
        let info = mint.to_account_info();
        let data = info
            .try_borrow_data()
            .map_err(|_| error!(BoomError::AccountBorrowFailed))?;
        transfer_hook_program_id(&data)?
    };
    require!(hook_program.is_some(), BoomError::MissingTransferHook);

    let token = &mut ctx.accounts.presale_token;
    token.register(
        round,
        mint.key(),
        mint.decimals,
        total_supply,
        tokens_per_winner,
        ctx.bumps.presale_token,
    )?;

    emit!(PresaleTokenRegistered {
        round_id,
        mint: token.mint,
        total_supply,
        tokens_per_winner,
        winners_count: token.winners_count,
    });

    Ok(())
}

pub fn claim_winner_tokens(ctx: Context<ClaimWinnerTokens>) -> Result<()> {
    ctx.accounts
        .user_deposit
        .claim(ctx.accounts.presale_explosion.is_exploded)?;
    let amount = ctx.accounts.presale_token.record_claim()?;

    let round_id = ctx.accounts.presale_token.round_id;
    let round_le = round_id.to_le_bytes();
    let signer_seeds: &[&[&[u8]]] = &[&[
        MINT_AUTHORITY_SEED,
        &round_le,
        &[ctx.bumps.mint_authority],
    ]];

    // mint_to never invokes the transfer hook
    token_2022::mint_to(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            MintTo {
                mint: ctx.accounts.mint.to_account_info(),
                to: ctx.accounts.winner_token_account.to_account_info(),
                authority: ctx.accounts.mint_authority.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
    )?;

    emit!(WinnerTokensClaimed {
        round_id,
        winner: ctx.accounts.winner.key(),
        amount,
    });

    Ok(())
}
