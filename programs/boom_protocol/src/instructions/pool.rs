use anchor_lang::prelude::*;
use anchor_lang::solana_program::{program::invoke_signed, system_instruction};
use anchor_lang::system_program::{self, Transfer};
use anchor_spl::token_2022::{self, spl_token_2022, MintTo};

use crate::errors::BoomError;
use crate::events::{LiquidityDeposited, PoolCreated, ReservesSynced, SwapExecuted};
use crate::state::SwapDirection;
use crate::{
    CreatePool, DepositLiquidity, DepositPoolTokens, Swap, SyncPoolReserves, MINT_AUTHORITY_SEED,
    POOL_SEED, SOL_VAULT_SEED,
};

/// Spendable lamports in the SOL vault (its rent-exempt floor is never part of the reserve).
pub(crate) fn vault_sol_balance(sol_vault: &AccountInfo) -> Result<u64> {
    let floor = Rent::get()?.minimum_balance(0);
    Ok(sol_vault.lamports().saturating_sub(floor))
}

/// Token-2022 `transfer_checked` that resolves the mint's transfer-hook accounts
/// from `extra` (the caller's remaining accounts).
#[allow(clippy::too_many_arguments)]
fn transfer_through_gate<'info>(
    token_program: &AccountInfo<'info>,
    from: &AccountInfo<'info>,
    mint: &AccountInfo<'info>,
    to: &AccountInfo<'info>,
    authority: &AccountInfo<'info>,
    extra: &[AccountInfo<'info>],
    amount: u64,
    decimals: u8,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    spl_token_2022::onchain::invoke_transfer_checked(
        token_program.key,
        from.clone(),
        mint.clone(),
        to.clone(),
        authority.clone(),
        extra,
        amount,
        decimals,
        signer_seeds,
    )?;
    Ok(())
}

pub fn create_pool(ctx: Context<CreatePool>, round_id: u64, fee_bps: u16) -> Result<()> {
    require_keys_eq!(
        ctx.accounts.presale_round.authority,
        ctx.accounts.authority.key(),
        BoomError::Unauthorized
    );

    let pool = &mut ctx.accounts.pool;
    pool.initialize(
        round_id,
        ctx.accounts.mint.key(),
        ctx.accounts.token_vault.key(),
        fee_bps,
        ctx.bumps.pool,
        ctx.bumps.sol_vault,
    )?;

    emit!(PoolCreated {
        round_id,
        pool: pool.key(),
        mint: pool.mint,
        fee_bps,
    });

    Ok(())
}

/// Seeds the pool: tokens are minted from the pool allocation straight into the
/// vault, SOL comes from the authority.
pub fn deposit_liquidity(
    ctx: Context<DepositLiquidity>,
    token_amount: u64,
    sol_amount: u64,
) -> Result<()> {
    require_keys_eq!(
        ctx.accounts.presale_round.authority,
        ctx.accounts.authority.key(),
        BoomError::Unauthorized
    );

    let round_le = ctx.accounts.pool.round_id.to_le_bytes();

    if token_amount > 0 {
        ctx.accounts.presale_token.reserve_pool_mint(token_amount)?;

        let signer_seeds: &[&[&[u8]]] = &[&[
            MINT_AUTHORITY_SEED,
            &round_le,
            &[ctx.bumps.mint_authority],
        ]];
        token_2022::mint_to(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                MintTo {
                    mint: ctx.accounts.mint.to_account_info(),
                    to: ctx.accounts.token_vault.to_account_info(),
                    authority: ctx.accounts.mint_authority.to_account_info(),
                },
                signer_seeds,
            ),
            token_amount,
        )?;
    }

    if sol_amount > 0 {
        system_program::transfer(
            CpiContext::new(
                ctx.accounts.system_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.authority.to_account_info(),
                    to: ctx.accounts.sol_vault.to_account_info(),
                },
            ),
            sol_amount,
        )?;
    }

    ctx.accounts.token_vault.reload()?;
    let sol_balance = vault_sol_balance(&ctx.accounts.sol_vault.to_account_info())?;
    let now = Clock::get()?.unix_timestamp;

    let pool = &mut ctx.accounts.pool;
    pool.sync(sol_balance, ctx.accounts.token_vault.amount, now);

    emit!(LiquidityDeposited {
        round_id: pool.round_id,
        provider: ctx.accounts.authority.key(),
        token_amount,
        sol_amount,
        sol_reserve: pool.sol_reserve,
        token_reserve: pool.token_reserve,
    });

    Ok(())
}

/// Adds existing tokens to the vault with a hooked transfer. Before the explosion
/// this only passes if the pool is whitelisted on the gate.
pub fn deposit_pool_tokens<'info>(
    ctx: Context<'_, '_, 'info, 'info, DepositPoolTokens<'info>>,
    amount: u64,
) -> Result<()> {
    require!(amount > 0, BoomError::DepositOutOfRange);

    transfer_through_gate(
        &ctx.accounts.token_program.to_account_info(),
        &ctx.accounts.source_token_account.to_account_info(),
        &ctx.accounts.mint.to_account_info(),
        &ctx.accounts.token_vault.to_account_info(),
        &ctx.accounts.depositor.to_account_info(),
        ctx.remaining_accounts,
        amount,
        ctx.accounts.mint.decimals,
        &[],
    )?;

    ctx.accounts.token_vault.reload()?;
    let sol_balance = vault_sol_balance(&ctx.accounts.sol_vault.to_account_info())?;
    let now = Clock::get()?.unix_timestamp;

    let pool = &mut ctx.accounts.pool;
    pool.sync(sol_balance, ctx.accounts.token_vault.amount, now);

    emit!(LiquidityDeposited {
        round_id: pool.round_id,
        provider: ctx.accounts.depositor.key(),
        token_amount: amount,
        sol_amount: 0,
        sol_reserve: pool.sol_reserve,
        token_reserve: pool.token_reserve,
    });

    Ok(())
}

pub fn sync_pool_reserves(ctx: Context<SyncPoolReserves>) -> Result<()> {
    let sol_balance = vault_sol_balance(&ctx.accounts.sol_vault.to_account_info())?;
    let now = Clock::get()?.unix_timestamp;

    let pool = &mut ctx.accounts.pool;
    pool.sync(sol_balance, ctx.accounts.token_vault.amount, now);

    emit!(ReservesSynced {
        round_id: pool.round_id,
        sol_reserve: pool.sol_reserve,
        token_reserve: pool.token_reserve,
        price: pool.price().unwrap_or(0),
    });

    Ok(())
}

pub fn swap<'info>(
    ctx: Context<'_, '_, 'info, 'info, Swap<'info>>,
    amount_in: u64,
    min_amount_out: u64,
    direction: SwapDirection,
) -> Result<()> {
    require!(
        ctx.accounts.presale_explosion.is_exploded,
        BoomError::PoolNotTrading
    );
    if amount_in == 0 {
        return Ok(());
    }

    let now = Clock::get()?.unix_timestamp;
    let sol_balance = vault_sol_balance(&ctx.accounts.sol_vault.to_account_info())?;

    let pool = &mut ctx.accounts.pool;
    pool.sync(sol_balance, ctx.accounts.token_vault.amount, now);
    let outcome = pool.apply_swap(amount_in, min_amount_out, direction)?;

    let round_id = pool.round_id;
    let round_le = round_id.to_le_bytes();
    let pool_bump = pool.bump;
    let vault_bump = pool.sol_vault_bump;
    let (sol_reserve, token_reserve) = (pool.sol_reserve, pool.token_reserve);
    let price = pool.price().unwrap_or(0);
    let decimals = ctx.accounts.mint.decimals;

    match direction {
        SwapDirection::Buy => {
            system_program::transfer(
                CpiContext::new(
                    ctx.accounts.system_program.to_account_info(),
                    Transfer {
                        from: ctx.accounts.user.to_account_info(),
                        to: ctx.accounts.sol_vault.to_account_info(),
                    },
                ),
                amount_in,
            )?;

            let signer_seeds: &[&[&[u8]]] = &[&[POOL_SEED, &round_le, &[pool_bump]]];
            transfer_through_gate(
                &ctx.accounts.token_program.to_account_info(),
                &ctx.accounts.token_vault.to_account_info(),
                &ctx.accounts.mint.to_account_info(),
                &ctx.accounts.user_token_account.to_account_info(),
                &ctx.accounts.pool.to_account_info(),
                ctx.remaining_accounts,
                outcome.amount_out,
                decimals,
                signer_seeds,
            )?;
        }
        SwapDirection::Sell => {
            transfer_through_gate(
                &ctx.accounts.token_program.to_account_info(),
                &ctx.accounts.user_token_account.to_account_info(),
                &ctx.accounts.mint.to_account_info(),
                &ctx.accounts.token_vault.to_account_info(),
                &ctx.accounts.user.to_account_info(),
                ctx.remaining_accounts,
                amount_in,
                decimals,
                &[],
            )?;

            let ix = system_instruction::transfer(
                &ctx.accounts.sol_vault.key(),
                &ctx.accounts.user.key(),
                outcome.amount_out,
            );
            let signer_seeds: &[&[u8]] = &[SOL_VAULT_SEED, &round_le, &[vault_bump]];
            invoke_signed(
                &ix,
                &[
                    ctx.accounts.sol_vault.to_account_info(),
                    ctx.accounts.user.to_account_info(),
                    ctx.accounts.system_program.to_account_info(),
                ],
                &[signer_seeds],
            )?;
        }
    }

    emit!(SwapExecuted {
        round_id,
        trader: ctx.accounts.user.key(),
        direction,
        amount_in,
        amount_out: outcome.amount_out,
        sol_reserve,
        token_reserve,
        price,
    });

    Ok(())
}
