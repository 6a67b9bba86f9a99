use anchor_lang::prelude::*;
use spl_tlv_account_resolution::state::ExtraAccountMetaList;
use spl_transfer_hook_interface::instruction::ExecuteInstruction;

use crate::errors::HookError;
use crate::gate::{
    check_transfer, parse_execute, token_account_owner, DESTINATION_INDEX,
    DESTINATION_WHITELIST_INDEX, GATE_INDEX, META_LIST_INDEX, MINT_INDEX, SOURCE_INDEX,
    SOURCE_WHITELIST_INDEX,
};
use crate::state::{GateState, WhitelistEntry};
use crate::META_LIST_SEED;

fn is_whitelisted(info: &AccountInfo, program_id: &Pubkey, mint: &Pubkey, owner: &Pubkey) -> bool {
    if info.owner != program_id {
        return false;
    }
    let Ok(data) = info.try_borrow_data() else {
        return false;
    };
    match WhitelistEntry::try_deserialize(&mut &data[..]) {
        Ok(entry) => entry.approves(mint, owner),
        Err(_) => false,
    }
}

fn load_gate(info: &AccountInfo, program_id: &Pubkey) -> Result<GateState> {
    require_keys_eq!(*info.owner, *program_id, HookError::InvalidGateState);
    let data = info.try_borrow_data()?;
    GateState::try_deserialize(&mut &data[..]).map_err(|_| error!(HookError::InvalidGateState))
}

/// Token-2022 `Execute`: runs on every transfer of a gated mint.
pub fn execute<'info>(
    program_id: &Pubkey,
    accounts: &'info [AccountInfo<'info>],
    data: &[u8],
) -> Result<()> {
    let amount = parse_execute(data)?;
    require!(
        accounts.len() > META_LIST_INDEX,
        HookError::InvalidExtraAccountMetas
    );

    let mint = accounts[MINT_INDEX].key;
    let meta_list = &accounts[META_LIST_INDEX];
    let (expected, _) = Pubkey::find_program_address(&[META_LIST_SEED, mint.as_ref()], program_id);
    require_keys_eq!(*meta_list.key, expected, HookError::InvalidExtraAccountMetas);

    {
        let list = meta_list.try_borrow_data()?;
        ExtraAccountMetaList::check_account_infos::<ExecuteInstruction>(
            accounts,
            data,
            program_id,
            &list,
        )?;
    }

    // empty list: the gate has been opened
    if accounts.len() <= GATE_INDEX {
        return Ok(());
    }
    require!(
        accounts.len() > SOURCE_WHITELIST_INDEX,
        HookError::InvalidExtraAccountMetas
    );

    let gate = load_gate(&accounts[GATE_INDEX], program_id)?;
    require_keys_eq!(gate.mint, *mint, HookError::MintMismatch);

    let source_owner = token_account_owner(&accounts[SOURCE_INDEX].try_borrow_data()?)?;
    let dest_owner = token_account_owner(&accounts[DESTINATION_INDEX].try_borrow_data()?)?;

    let dest_ok = is_whitelisted(&accounts[DESTINATION_WHITELIST_INDEX], program_id, mint, &dest_owner);
    let source_ok = is_whitelisted(&accounts[SOURCE_WHITELIST_INDEX], program_id, mint, &source_owner);

    check_transfer(gate.mode, source_ok, dest_ok).map_err(|e| {
        msg!(
            "transfer blocked: {} of mint {} from {} to {}",
            amount,
            mint,
            source_owner,
            dest_owner
        );
        e
    })
}
