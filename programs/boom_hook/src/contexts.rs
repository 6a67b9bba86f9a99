// programs/boom_hook/src/contexts.rs

use anchor_lang::prelude::*;
use anchor_spl::token_interface::Mint;
use boom_protocol::{PresaleExplosion, PresaleToken, EXPLOSION_SEED, PRESALE_TOKEN_SEED};
use spl_tlv_account_resolution::state::ExtraAccountMetaList;

use crate::errors::HookError;
use crate::gate::RESTRICTED_META_COUNT;
use crate::state::{GateState, HookConfig, WhitelistEntry};

// ----------------------------
// Config / whitelist
// ----------------------------

#[derive(Accounts)]
pub struct InitializeHook<'info> {
    #[account(
        init,
        payer = authority,
        space = 8 + HookConfig::INIT_SPACE,
        seeds = [crate::HOOK_CONFIG_SEED],
        bump
    )]
    pub config: Account<'info, HookConfig>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(official_lp: Pubkey)]
pub struct AddWhitelist<'info> {
    #[account(
        seeds = [crate::HOOK_CONFIG_SEED],
        bump = config.bump,
        has_one = authority @ HookError::Unauthorized,
    )]
    pub config: Account<'info, HookConfig>,

    #[account(
        init,
        payer = authority,
        space = 8 + WhitelistEntry::INIT_SPACE,
        seeds = [crate::WHITELIST_SEED, mint.key().as_ref(), official_lp.as_ref()],
        bump
    )]
    pub whitelist_entry: Account<'info, WhitelistEntry>,

    pub mint: InterfaceAccount<'info, Mint>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct RemoveWhitelist<'info> {
    #[account(
        seeds = [crate::HOOK_CONFIG_SEED],
        bump = config.bump,
        has_one = authority @ HookError::Unauthorized,
    )]
    pub config: Account<'info, HookConfig>,

    #[account(
        mut,
        close = authority,
        seeds = [
            crate::WHITELIST_SEED,
            whitelist_entry.mint.as_ref(),
            whitelist_entry.official_lp.as_ref()
        ],
        bump = whitelist_entry.bump,
    )]
    pub whitelist_entry: Account<'info, WhitelistEntry>,

    #[account(mut)]
    pub authority: Signer<'info>,
}

// ----------------------------
// Extra account meta list
// ----------------------------

#[derive(Accounts)]
#[instruction(round_id: u64)]
pub struct InitializeExtraAccountMetaList<'info> {
    #[account(
        seeds = [crate::HOOK_CONFIG_SEED],
        bump = config.bump,
        has_one = authority @ HookError::Unauthorized,
    )]
    pub config: Account<'info, HookConfig>,

    #[account(
        seeds = [PRESALE_TOKEN_SEED, round_id.to_le_bytes().as_ref()],
        seeds::program = boom_protocol::ID,
        bump = presale_token.bump,
        constraint = presale_token.mint == mint.key() @ HookError::MintMismatch,
    )]
    pub presale_token: Account<'info, PresaleToken>,

    pub mint: InterfaceAccount<'info, Mint>,

    /// CHECK: TLV ExtraAccountMetaList, written by the handler.
    #[account(
        init,
        payer = authority,
        space = ExtraAccountMetaList::size_of(RESTRICTED_META_COUNT)?,
        seeds = [crate::META_LIST_SEED, mint.key().as_ref()],
        bump
    )]
    pub extra_account_meta_list: UncheckedAccount<'info>,

    #[account(
        init,
        payer = authority,
        space = 8 + GateState::INIT_SPACE,
        seeds = [crate::GATE_SEED, mint.key().as_ref()],
        bump
    )]
    pub gate_state: Account<'info, GateState>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(round_id: u64)]
pub struct InitializeExtraAccountMetaListEmpty<'info> {
    #[account(
        seeds = [PRESALE_TOKEN_SEED, round_id.to_le_bytes().as_ref()],
        seeds::program = boom_protocol::ID,
        bump = presale_token.bump,
        constraint = presale_token.mint == mint.key() @ HookError::MintMismatch,
    )]
    pub presale_token: Account<'info, PresaleToken>,

    #[account(
        seeds = [EXPLOSION_SEED, round_id.to_le_bytes().as_ref()],
        seeds::program = boom_protocol::ID,
        bump = presale_explosion.bump,
    )]
    pub presale_explosion: Account<'info, PresaleExplosion>,

    pub mint: InterfaceAccount<'info, Mint>,

    /// CHECK: TLV ExtraAccountMetaList, written by the handler.
    #[account(
        init,
        payer = payer,
        space = ExtraAccountMetaList::size_of(0)?,
        seeds = [crate::META_LIST_SEED, mint.key().as_ref()],
        bump
    )]
    pub extra_account_meta_list: UncheckedAccount<'info>,

    #[account(
        init,
        payer = payer,
        space = 8 + GateState::INIT_SPACE,
        seeds = [crate::GATE_SEED, mint.key().as_ref()],
        bump
    )]
    pub gate_state: Account<'info, GateState>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct UpgradeExtraAccountMetaList<'info> {
    #[account(
        mut,
        seeds = [crate::GATE_SEED, mint.key().as_ref()],
        bump = gate_state.bump,
    )]
    pub gate_state: Account<'info, GateState>,

    #[account(
        seeds = [EXPLOSION_SEED, gate_state.round_id.to_le_bytes().as_ref()],
        seeds::program = boom_protocol::ID,
        bump = presale_explosion.bump,
    )]
    pub presale_explosion: Account<'info, PresaleExplosion>,

    #[account(address = gate_state.mint @ HookError::MintMismatch)]
    pub mint: InterfaceAccount<'info, Mint>,

    /// CHECK: TLV ExtraAccountMetaList, rewritten in place.
    #[account(
        mut,
        seeds = [crate::META_LIST_SEED, mint.key().as_ref()],
        bump
    )]
    pub extra_account_meta_list: UncheckedAccount<'info>,

    pub caller: Signer<'info>,
}
