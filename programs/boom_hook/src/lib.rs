use anchor_lang::prelude::*;

pub mod errors;
pub mod events;
pub mod gate;
pub mod instructions;
pub mod state;
pub mod contexts;

pub use instructions::*;
pub use state::*;
pub use errors::*;
pub use contexts::*;

pub const HOOK_CONFIG_SEED: &[u8] = b"hook_config";
pub const GATE_SEED: &[u8] = b"gate";
pub const WHITELIST_SEED: &[u8] = b"whitelist";
/// Fixed by the transfer-hook interface.
pub const META_LIST_SEED: &[u8] = b"extra-account-metas";

declare_id!("CzgS4YQmsGxatMVJiKehgGgf12tbtQEM7s4AAyNzWWK9");

#[program]
pub mod boom_hook {
    use super::*;
    use crate::instructions::{execute, meta_list, whitelist};

    pub fn initialize_hook(ctx: Context<InitializeHook>) -> Result<()> {
        whitelist::initialize_hook(ctx)
    }

    pub fn add_whitelist(ctx: Context<AddWhitelist>, official_lp: Pubkey) -> Result<()> {
        whitelist::add_whitelist(ctx, official_lp)
    }

    pub fn remove_whitelist(ctx: Context<RemoveWhitelist>) -> Result<()> {
        whitelist::remove_whitelist(ctx)
    }

    pub fn initialize_extra_account_meta_list(
        ctx: Context<InitializeExtraAccountMetaList>,
        round_id: u64,
    ) -> Result<()> {
        meta_list::initialize_extra_account_meta_list(ctx, round_id)
    }

    pub fn initialize_extra_account_meta_list_empty(
        ctx: Context<InitializeExtraAccountMetaListEmpty>,
        round_id: u64,
    ) -> Result<()> {
        meta_list::initialize_extra_account_meta_list_empty(ctx, round_id)
    }

    pub fn upgrade_extra_account_meta_list(ctx: Context<UpgradeExtraAccountMetaList>) -> Result<()> {
        meta_list::upgrade_extra_account_meta_list(ctx)
    }

    /// Token-2022 calls the hook with the interface discriminator, not an Anchor one.
    pub fn fallback<'info>(
        program_id: &Pubkey,
        accounts: &'info [AccountInfo<'info>],
        data: &[u8],
    ) -> Result<()> {
        execute::execute(program_id, accounts, data)
    }
}
