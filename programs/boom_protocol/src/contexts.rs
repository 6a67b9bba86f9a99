// programs/boom_protocol/src/contexts.rs

use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token_2022::Token2022;
use anchor_spl::token_interface::{Mint, TokenAccount};

use crate::errors::BoomError;
use crate::state::{Pool, PresaleExplosion, PresaleRound, PresaleToken, RoundSequencer, UserDeposit};

// ----------------------------
// Sequencer
// ----------------------------

#[derive(Accounts)]
pub struct InitRoundSequencer<'info> {
    #[account(
        init_if_needed,
        payer = authority,
        space = 8 + RoundSequencer::INIT_SPACE,
        seeds = [crate::SEQUENCER_SEED],
        bump
    )]
    pub sequencer: Account<'info, RoundSequencer>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct UpdateRoundDefaults<'info> {
    #[account(
        mut,
        seeds = [crate::SEQUENCER_SEED],
        bump = sequencer.bump,
    )]
    pub sequencer: Account<'info, RoundSequencer>,

    pub authority: Signer<'info>,
}

#[derive(Accounts)]
#[instruction(new_round_id: u64)]
pub struct AutoStartNextRound<'info> {
    #[account(
        mut,
        seeds = [crate::SEQUENCER_SEED],
        bump = sequencer.bump,
    )]
    pub sequencer: Account<'info, RoundSequencer>,

    #[account(
        seeds = [crate::EXPLOSION_SEED, sequencer.current_round.to_le_bytes().as_ref()],
        bump = previous_explosion.bump,
    )]
    pub previous_explosion: Account<'info, PresaleExplosion>,

    #[account(
        init,
        payer = payer,
        space = 8 + PresaleRound::INIT_SPACE,
        seeds = [crate::PRESALE_SEED, new_round_id.to_le_bytes().as_ref()],
        bump
    )]
    pub presale_round: Account<'info, PresaleRound>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

// ----------------------------
// Round lifecycle
// ----------------------------

#[derive(Accounts)]
#[instruction(round_id: u64)]
pub struct StartPresale<'info> {
    #[account(
        mut,
        seeds = [crate::SEQUENCER_SEED],
        bump = sequencer.bump,
    )]
    pub sequencer: Account<'info, RoundSequencer>,

    #[account(
        init,
        payer = authority,
        space = 8 + PresaleRound::INIT_SPACE,
        seeds = [crate::PRESALE_SEED, round_id.to_le_bytes().as_ref()],
        bump
    )]
    pub presale_round: Account<'info, PresaleRound>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct DepositPresale<'info> {
    #[account(
        mut,
        seeds = [crate::PRESALE_SEED, presale_round.round_id.to_le_bytes().as_ref()],
        bump = presale_round.bump,
    )]
    pub presale_round: Account<'info, PresaleRound>,

    // init_if_needed so a repeat deposit reaches DuplicateDepositor instead of a runtime error
    #[account(
        init_if_needed,
        payer = depositor,
        space = 8 + UserDeposit::INIT_SPACE,
        seeds = [
            crate::DEPOSIT_SEED,
            presale_round.round_id.to_le_bytes().as_ref(),
            depositor.key().as_ref()
        ],
        bump
    )]
    pub user_deposit: Account<'info, UserDeposit>,

    #[account(mut)]
    pub depositor: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct EndPresaleAndLottery<'info> {
    #[account(
        mut,
        seeds = [crate::PRESALE_SEED, presale_round.round_id.to_le_bytes().as_ref()],
        bump = presale_round.bump,
    )]
    pub presale_round: Account<'info, PresaleRound>,

    pub authority: Signer<'info>,

    /// CHECK: SlotHashes sysvar (lottery seed). Address enforced.
    #[account(address = anchor_lang::solana_program::sysvar::slot_hashes::ID)]
    pub recent_slothashes: UncheckedAccount<'info>,
    // deposits via remaining_accounts (writable)
}

#[derive(Accounts)]
pub struct MarkWinner<'info> {
    #[account(
        mut,
        seeds = [crate::PRESALE_SEED, presale_round.round_id.to_le_bytes().as_ref()],
        bump = presale_round.bump,
    )]
    pub presale_round: Account<'info, PresaleRound>,

    #[account(
        mut,
        seeds = [
            crate::DEPOSIT_SEED,
            presale_round.round_id.to_le_bytes().as_ref(),
            user_deposit.depositor.as_ref()
        ],
        bump = user_deposit.bump,
    )]
    pub user_deposit: Account<'info, UserDeposit>,

    pub authority: Signer<'info>,
}

#[derive(Accounts)]
pub struct ClaimRefund<'info> {
    #[account(
        mut,
        seeds = [crate::PRESALE_SEED, presale_round.round_id.to_le_bytes().as_ref()],
        bump = presale_round.bump,
    )]
    pub presale_round: Account<'info, PresaleRound>,

    #[account(
        mut,
        seeds = [
            crate::DEPOSIT_SEED,
            presale_round.round_id.to_le_bytes().as_ref(),
            depositor.key().as_ref()
        ],
        bump = user_deposit.bump,
        has_one = depositor,
    )]
    pub user_deposit: Account<'info, UserDeposit>,

    #[account(mut)]
    pub depositor: Signer<'info>,
}

#[derive(Accounts)]
pub struct WithdrawPresaleProceeds<'info> {
    #[account(
        mut,
        seeds = [crate::PRESALE_SEED, presale_round.round_id.to_le_bytes().as_ref()],
        bump = presale_round.bump,
    )]
    pub presale_round: Account<'info, PresaleRound>,

    #[account(mut)]
    pub authority: Signer<'info>,
}

// ----------------------------
// Token issuance
// ----------------------------

#[derive(Accounts)]
#[instruction(round_id: u64)]
pub struct RegisterPresaleToken<'info> {
    #[account(
        seeds = [crate::PRESALE_SEED, round_id.to_le_bytes().as_ref()],
        bump = presale_round.bump,
    )]
    pub presale_round: Account<'info, PresaleRound>,

    #[account(
        init,
        payer = authority,
        space = 8 + PresaleToken::INIT_SPACE,
        seeds = [crate::PRESALE_TOKEN_SEED, round_id.to_le_bytes().as_ref()],
        bump
    )]
    pub presale_token: Account<'info, PresaleToken>,

    #[account(mint::token_program = token_program)]
    pub mint: InterfaceAccount<'info, Mint>,

    /// CHECK: PDA only ever used as the mint authority signer.
    #[account(
        seeds = [crate::MINT_AUTHORITY_SEED, round_id.to_le_bytes().as_ref()],
        bump
    )]
    pub mint_authority: UncheckedAccount<'info>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub token_program: Program<'info, Token2022>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct ClaimWinnerTokens<'info> {
    #[account(
        mut,
        seeds = [crate::PRESALE_TOKEN_SEED, presale_token.round_id.to_le_bytes().as_ref()],
        bump = presale_token.bump,
    )]
    pub presale_token: Account<'info, PresaleToken>,

    #[account(
        seeds = [crate::EXPLOSION_SEED, presale_token.round_id.to_le_bytes().as_ref()],
        bump = presale_explosion.bump,
    )]
    pub presale_explosion: Account<'info, PresaleExplosion>,

    #[account(
        mut,
        seeds = [
            crate::DEPOSIT_SEED,
            presale_token.round_id.to_le_bytes().as_ref(),
            winner.key().as_ref()
        ],
        bump = user_deposit.bump,
        constraint = user_deposit.depositor == winner.key() @ BoomError::NotAWinner,
    )]
    pub user_deposit: Account<'info, UserDeposit>,

    #[account(mut, address = presale_token.mint @ BoomError::InvalidMint)]
    pub mint: InterfaceAccount<'info, Mint>,

    /// CHECK: PDA mint authority. Address enforced by seeds/bump.
    #[account(
        seeds = [crate::MINT_AUTHORITY_SEED, presale_token.round_id.to_le_bytes().as_ref()],
        bump
    )]
    pub mint_authority: UncheckedAccount<'info>,

    #[account(
        mut,
        token::mint = mint,
        token::authority = winner,
        token::token_program = token_program,
    )]
    pub winner_token_account: InterfaceAccount<'info, TokenAccount>,

    pub winner: Signer<'info>,

    pub token_program: Program<'info, Token2022>,
}

// ----------------------------
// Explosion gate
// ----------------------------

#[derive(Accounts)]
#[instruction(round_id: u64)]
pub struct InitPresaleExplosion<'info> {
    #[account(
        seeds = [crate::PRESALE_SEED, round_id.to_le_bytes().as_ref()],
        bump = presale_round.bump,
    )]
    pub presale_round: Account<'info, PresaleRound>,

    #[account(
        seeds = [crate::PRESALE_TOKEN_SEED, round_id.to_le_bytes().as_ref()],
        bump = presale_token.bump,
    )]
    pub presale_token: Account<'info, PresaleToken>,

    #[account(
        init,
        payer = authority,
        space = 8 + PresaleExplosion::INIT_SPACE,
        seeds = [crate::EXPLOSION_SEED, round_id.to_le_bytes().as_ref()],
        bump
    )]
    pub presale_explosion: Account<'info, PresaleExplosion>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct TriggerExplosionTime<'info> {
    #[account(
        mut,
        seeds = [crate::EXPLOSION_SEED, presale_explosion.round_id.to_le_bytes().as_ref()],
        bump = presale_explosion.bump,
    )]
    pub presale_explosion: Account<'info, PresaleExplosion>,

    #[account(
        mut,
        seeds = [crate::SEQUENCER_SEED],
        bump = sequencer.bump,
    )]
    pub sequencer: Account<'info, RoundSequencer>,

    pub caller: Signer<'info>,
}

#[derive(Accounts)]
pub struct TriggerExplosionCap<'info> {
    #[account(
        mut,
        seeds = [crate::EXPLOSION_SEED, presale_explosion.round_id.to_le_bytes().as_ref()],
        bump = presale_explosion.bump,
    )]
    pub presale_explosion: Account<'info, PresaleExplosion>,

    #[account(
        mut,
        seeds = [crate::SEQUENCER_SEED],
        bump = sequencer.bump,
    )]
    pub sequencer: Account<'info, RoundSequencer>,

    #[account(
        seeds = [crate::PRESALE_TOKEN_SEED, presale_explosion.round_id.to_le_bytes().as_ref()],
        bump = presale_token.bump,
    )]
    pub presale_token: Account<'info, PresaleToken>,

    #[account(
        mut,
        seeds = [crate::POOL_SEED, presale_explosion.round_id.to_le_bytes().as_ref()],
        bump = pool.bump,
    )]
    pub pool: Account<'info, Pool>,

    #[account(address = pool.token_vault)]
    pub token_vault: InterfaceAccount<'info, TokenAccount>,

    /// CHECK: System-owned PDA vault. Address enforced by seeds/bump.
    #[account(
        seeds = [crate::SOL_VAULT_SEED, presale_explosion.round_id.to_le_bytes().as_ref()],
        bump = pool.sol_vault_bump,
    )]
    pub sol_vault: UncheckedAccount<'info>,

    pub caller: Signer<'info>,
}

// ----------------------------
// Pool
// ----------------------------

#[derive(Accounts)]
#[instruction(round_id: u64)]
pub struct CreatePool<'info> {
    #[account(
        seeds = [crate::PRESALE_SEED, round_id.to_le_bytes().as_ref()],
        bump = presale_round.bump,
    )]
    pub presale_round: Account<'info, PresaleRound>,

    #[account(
        seeds = [crate::PRESALE_TOKEN_SEED, round_id.to_le_bytes().as_ref()],
        bump = presale_token.bump,
    )]
    pub presale_token: Account<'info, PresaleToken>,

    #[account(
        address = presale_token.mint @ BoomError::InvalidMint,
        mint::token_program = token_program,
    )]
    pub mint: InterfaceAccount<'info, Mint>,

    #[account(
        init,
        payer = authority,
        space = 8 + Pool::INIT_SPACE,
        seeds = [crate::POOL_SEED, round_id.to_le_bytes().as_ref()],
        bump
    )]
    pub pool: Account<'info, Pool>,

    #[account(
        init,
        payer = authority,
        associated_token::mint = mint,
        associated_token::authority = pool,
        associated_token::token_program = token_program,
    )]
    pub token_vault: InterfaceAccount<'info, TokenAccount>,

    /// CHECK: system-owned vault PDA, holds lamports, no data
    #[account(
        init,
        payer = authority,
        space = 0,
        owner = anchor_lang::solana_program::system_program::ID,
        seeds = [crate::SOL_VAULT_SEED, round_id.to_le_bytes().as_ref()],
        bump
    )]
    pub sol_vault: UncheckedAccount<'info>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub token_program: Program<'info, Token2022>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct DepositLiquidity<'info> {
    #[account(
        mut,
        seeds = [crate::POOL_SEED, pool.round_id.to_le_bytes().as_ref()],
        bump = pool.bump,
    )]
    pub pool: Account<'info, Pool>,

    #[account(
        seeds = [crate::PRESALE_SEED, pool.round_id.to_le_bytes().as_ref()],
        bump = presale_round.bump,
    )]
    pub presale_round: Account<'info, PresaleRound>,

    #[account(
        mut,
        seeds = [crate::PRESALE_TOKEN_SEED, pool.round_id.to_le_bytes().as_ref()],
        bump = presale_token.bump,
    )]
    pub presale_token: Account<'info, PresaleToken>,

    #[account(mut, address = pool.mint @ BoomError::InvalidMint)]
    pub mint: InterfaceAccount<'info, Mint>,

    /// CHECK: PDA mint authority. Address enforced by seeds/bump.
    #[account(
        seeds = [crate::MINT_AUTHORITY_SEED, pool.round_id.to_le_bytes().as_ref()],
        bump
    )]
    pub mint_authority: UncheckedAccount<'info>,

    #[account(mut, address = pool.token_vault)]
    pub token_vault: InterfaceAccount<'info, TokenAccount>,

    /// CHECK: System-owned PDA vault. Address enforced by seeds/bump.
    #[account(
        mut,
        seeds = [crate::SOL_VAULT_SEED, pool.round_id.to_le_bytes().as_ref()],
        bump = pool.sol_vault_bump,
    )]
    pub sol_vault: UncheckedAccount<'info>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub token_program: Program<'info, Token2022>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct DepositPoolTokens<'info> {
    #[account(
        mut,
        seeds = [crate::POOL_SEED, pool.round_id.to_le_bytes().as_ref()],
        bump = pool.bump,
    )]
    pub pool: Account<'info, Pool>,

    #[account(address = pool.mint @ BoomError::InvalidMint)]
    pub mint: InterfaceAccount<'info, Mint>,

    #[account(mut, address = pool.token_vault)]
    pub token_vault: InterfaceAccount<'info, TokenAccount>,

    /// CHECK: System-owned PDA vault. Address enforced by seeds/bump.
    #[account(
        seeds = [crate::SOL_VAULT_SEED, pool.round_id.to_le_bytes().as_ref()],
        bump = pool.sol_vault_bump,
    )]
    pub sol_vault: UncheckedAccount<'info>,

    #[account(
        mut,
        token::mint = mint,
        token::authority = depositor,
        token::token_program = token_program,
    )]
    pub source_token_account: InterfaceAccount<'info, TokenAccount>,

    pub depositor: Signer<'info>,

    pub token_program: Program<'info, Token2022>,
    // transfer-hook extra accounts via remaining_accounts
}

#[derive(Accounts)]
pub struct SyncPoolReserves<'info> {
    #[account(
        mut,
        seeds = [crate::POOL_SEED, pool.round_id.to_le_bytes().as_ref()],
        bump = pool.bump,
    )]
    pub pool: Account<'info, Pool>,

    #[account(address = pool.token_vault)]
    pub token_vault: InterfaceAccount<'info, TokenAccount>,

    /// CHECK: System-owned PDA vault. Address enforced by seeds/bump.
    #[account(
        seeds = [crate::SOL_VAULT_SEED, pool.round_id.to_le_bytes().as_ref()],
        bump = pool.sol_vault_bump,
    )]
    pub sol_vault: UncheckedAccount<'info>,
}

#[derive(Accounts)]
pub struct Swap<'info> {
    #[account(
        mut,
        seeds = [crate::POOL_SEED, pool.round_id.to_le_bytes().as_ref()],
        bump = pool.bump,
    )]
    pub pool: Account<'info, Pool>,

    #[account(
        seeds = [crate::EXPLOSION_SEED, pool.round_id.to_le_bytes().as_ref()],
        bump = presale_explosion.bump,
    )]
    pub presale_explosion: Account<'info, PresaleExplosion>,

    #[account(address = pool.mint @ BoomError::InvalidMint)]
    pub mint: InterfaceAccount<'info, Mint>,

    #[account(mut, address = pool.token_vault)]
    pub token_vault: InterfaceAccount<'info, TokenAccount>,

    /// CHECK: System-owned PDA vault. Address enforced by seeds/bump.
    #[account(
        mut,
        seeds = [crate::SOL_VAULT_SEED, pool.round_id.to_le_bytes().as_ref()],
        bump = pool.sol_vault_bump,
    )]
    pub sol_vault: UncheckedAccount<'info>,

    #[account(
        mut,
        token::mint = mint,
        token::authority = user,
        token::token_program = token_program,
    )]
    pub user_token_account: InterfaceAccount<'info, TokenAccount>,

    #[account(mut)]
    pub user: Signer<'info>,

    pub token_program: Program<'info, Token2022>,
    pub system_program: Program<'info, System>,
    // transfer-hook extra accounts via remaining_accounts
}
