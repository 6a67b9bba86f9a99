use anchor_lang::prelude::*;

use crate::events::{WhitelistAdded, WhitelistRemoved};
use crate::{AddWhitelist, InitializeHook, RemoveWhitelist};

pub fn initialize_hook(ctx: Context<InitializeHook>) -> Result<()> {
    let config = &mut ctx.accounts.config;
    config.authority = ctx.accounts.authority.key();
    config.bump = ctx.bumps.config;
    Ok(())
}

pub fn add_whitelist(ctx: Context<AddWhitelist>, official_lp: Pubkey) -> Result<()> {
    let entry = &mut ctx.accounts.whitelist_entry;
    entry.mint = ctx.accounts.mint.key();
    entry.official_lp = official_lp;
    entry.added_at = Clock::get()?.unix_timestamp;
    entry.bump = ctx.bumps.whitelist_entry;

    emit!(WhitelistAdded {
        mint: entry.mint,
        official_lp,
    });
    Ok(())
}

pub fn remove_whitelist(ctx: Context<RemoveWhitelist>) -> Result<()> {
    let entry = &ctx.accounts.whitelist_entry;
    emit!(WhitelistRemoved {
        mint: entry.mint,
        official_lp: entry.official_lp,
    });
    Ok(())
}
