use anchor_lang::prelude::*;
use spl_tlv_account_resolution::{account::ExtraAccountMeta, seeds::Seed};

use crate::errors::HookError;
use crate::state::GateMode;
use crate::{GATE_SEED, WHITELIST_SEED};

/// `sha256("spl-transfer-hook-interface:execute")[..8]`
pub const EXECUTE_DISCRIMINATOR: [u8; 8] = [105, 37, 101, 197, 75, 251, 102, 26];

// Execute account order: fixed interface accounts, then our extras in list order.
pub const SOURCE_INDEX: usize = 0;
pub const MINT_INDEX: usize = 1;
pub const DESTINATION_INDEX: usize = 2;
pub const META_LIST_INDEX: usize = 4;
pub const GATE_INDEX: usize = 5;
pub const DESTINATION_WHITELIST_INDEX: usize = 6;
pub const SOURCE_WHITELIST_INDEX: usize = 7;

pub const RESTRICTED_META_COUNT: usize = 3;

/// Token account layout: mint (32) then owner (32).
const OWNER_OFFSET: usize = 32;

/// Extra accounts Token-2022 resolves for every transfer while the gate is restricted.
pub fn restricted_extra_account_metas() -> Result<Vec<ExtraAccountMeta>> {
    let whitelist_for = |token_account_index: u8| {
        ExtraAccountMeta::new_with_seeds(
            &[
                Seed::Literal { bytes: WHITELIST_SEED.to_vec() },
                Seed::AccountKey { index: MINT_INDEX as u8 },
                Seed::AccountData {
                    account_index: token_account_index,
                    data_index: OWNER_OFFSET as u8,
                    length: 32,
                },
            ],
            false,
            false,
        )
    };

    Ok(vec![
        ExtraAccountMeta::new_with_seeds(
            &[
                Seed::Literal { bytes: GATE_SEED.to_vec() },
                Seed::AccountKey { index: MINT_INDEX as u8 },
            ],
            false,
            false,
        )?,
        whitelist_for(DESTINATION_INDEX as u8)?,
        whitelist_for(SOURCE_INDEX as u8)?,
    ])
}

/// Returns the transfer amount of an `Execute` payload.
pub fn parse_execute(data: &[u8]) -> Result<u64> {
    require!(data.len() >= 16, HookError::InvalidInstruction);
    let (disc, rest) = data.split_at(8);
    require!(disc == EXECUTE_DISCRIMINATOR, HookError::InvalidInstruction);

    let mut amount = [0u8; 8];
    amount.copy_from_slice(&rest[..8]);
    Ok(u64::from_le_bytes(amount))
}

pub fn token_account_owner(data: &[u8]) -> Result<Pubkey> {
    let raw = data
        .get(OWNER_OFFSET..OWNER_OFFSET + 32)
        .ok_or(HookError::InvalidTokenAccount)?;
    let mut owner = [0u8; 32];
    owner.copy_from_slice(raw);
    Ok(Pubkey::new_from_array(owner))
}

pub fn check_transfer(mode: GateMode, source_whitelisted: bool, destination_whitelisted: bool) -> Result<()> {
    if mode == GateMode::Open {
        return Ok(());
    }
    require!(
        source_whitelisted || destination_whitelisted,
        HookError::DestinationNotWhitelisted
    );
    Ok(())
}
