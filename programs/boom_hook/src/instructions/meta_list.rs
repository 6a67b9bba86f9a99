use anchor_lang::prelude::*;
use spl_tlv_account_resolution::{account::ExtraAccountMeta, state::ExtraAccountMetaList};
use spl_transfer_hook_interface::instruction::ExecuteInstruction;

use crate::errors::HookError;
use crate::events::GateOpened;
use crate::gate::restricted_extra_account_metas;
use crate::state::GateMode;
use crate::{
    InitializeExtraAccountMetaList, InitializeExtraAccountMetaListEmpty,
    UpgradeExtraAccountMetaList,
};

fn write_meta_list(info: &AccountInfo, metas: &[ExtraAccountMeta]) -> Result<()> {
    let mut data = info.try_borrow_mut_data()?;
    ExtraAccountMetaList::init::<ExecuteInstruction>(&mut data, metas)?;
    Ok(())
}

/// Restricted list for a freshly registered round mint.
pub fn initialize_extra_account_meta_list(
    ctx: Context<InitializeExtraAccountMetaList>,
    round_id: u64,
) -> Result<()> {
    write_meta_list(
        &ctx.accounts.extra_account_meta_list.to_account_info(),
        &restricted_extra_account_metas()?,
    )?;

    let now = Clock::get()?.unix_timestamp;
    ctx.accounts.gate_state.init(
        ctx.accounts.mint.key(),
        round_id,
        GateMode::Restricted,
        now,
        ctx.bumps.gate_state,
    );
    Ok(())
}

pub fn initialize_extra_account_meta_list_empty(
    ctx: Context<InitializeExtraAccountMetaListEmpty>,
    round_id: u64,
) -> Result<()> {
    require!(
        ctx.accounts.presale_explosion.is_exploded,
        HookError::TradingNotOpen
    );

    write_meta_list(&ctx.accounts.extra_account_meta_list.to_account_info(), &[])?;

    let now = Clock::get()?.unix_timestamp;
    let mint = ctx.accounts.mint.key();
    ctx.accounts
        .gate_state
        .init(mint, round_id, GateMode::Open, now, ctx.bumps.gate_state);

    emit!(GateOpened {
        mint,
        round_id,
        opened_at: now,
    });
    Ok(())
}

/// Permissionless once the round has exploded: drops every extra account so
/// Token-2022 stops asking the gate about whitelists.
pub fn upgrade_extra_account_meta_list(ctx: Context<UpgradeExtraAccountMetaList>) -> Result<()> {
    require!(
        ctx.accounts.presale_explosion.is_exploded,
        HookError::TradingNotOpen
    );

    let now = Clock::get()?.unix_timestamp;
    let gate = &mut ctx.accounts.gate_state;
    gate.open(now)?;

    {
        let info = ctx.accounts.extra_account_meta_list.to_account_info();
        let mut data = info.try_borrow_mut_data()?;
        data.fill(0);
        ExtraAccountMetaList::init::<ExecuteInstruction>(&mut data, &[])?;
    }

    msg!("gate open for mint {}", gate.mint);
    emit!(GateOpened {
        mint: gate.mint,
        round_id: gate.round_id,
        opened_at: now,
    });
    Ok(())
}
