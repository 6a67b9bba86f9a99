use anchor_lang::prelude::*;
use anchor_spl::token_2022::spl_token_2022::extension::transfer_hook::TransferHook;
use anchor_spl::token_2022::spl_token_2022::extension::{BaseStateWithExtensions, StateWithExtensions};
use anchor_spl::token_2022::spl_token_2022::state::Mint as MintState;
use solana_sha256_hasher::hashv;

use crate::constants::{BPS_DENOMINATOR, PRICE_SCALE};
use crate::errors::BoomError;

// -----------------
// Seeds / constants
// -----------------
pub const SEQUENCER_SEED: &[u8] = b"round_sequencer";
pub const PRESALE_SEED: &[u8] = b"presale";
pub const DEPOSIT_SEED: &[u8] = b"deposit";

pub const PRESALE_TOKEN_SEED: &[u8] = b"presale_token";
pub const MINT_AUTHORITY_SEED: &[u8] = b"mint_authority";
pub const EXPLOSION_SEED: &[u8] = b"presale_explosion";

pub const POOL_SEED: &[u8] = b"pool";
pub const SOL_VAULT_SEED: &[u8] = b"sol_vault";

// -------------------------
// Mint extensions
// -------------------------

/// Program named by the mint's TransferHook extension, `None` when the mint has
/// no hook (or an unset one).
pub fn transfer_hook_program_id(mint_data: &[u8]) -> Result<Option<Pubkey>> {
    let mint = StateWithExtensions::<MintState>::unpack(mint_data)?;
    Ok(mint
        .get_extension::<TransferHook>()
        .ok()
        .and_then(|hook| Option::<Pubkey>::from(hook.program_id)))
}

// -------------------------
// Cap commitment
// -------------------------

/// Commitment the authority publishes at `init_presale_explosion` and later
/// opens with `trigger_presale_explosion_cap`.
pub fn cap_commitment(round_id: u64, revealed_cap: u64, salt: &[u8; 32]) -> [u8; 32] {
    hashv(&[
        b"boom:cap".as_ref(),
        round_id.to_le_bytes().as_ref(),
        revealed_cap.to_le_bytes().as_ref(),
        salt.as_ref(),
    ])
    .to_bytes()
}

// -------------------------
// Lottery
// -------------------------

/// Most recent hash from the SlotHashes sysvar data
/// (`u64 len` followed by `(slot u64, hash [u8; 32])` entries, newest first).
pub fn recent_slot_hash(data: &[u8]) -> Result<[u8; 32]> {
    require!(data.len() >= 48, BoomError::SlotHashesUnavailable);

    let mut len = [0u8; 8];
    len.copy_from_slice(&data[0..8]);
    require!(u64::from_le_bytes(len) > 0, BoomError::SlotHashesUnavailable);

    let mut hash = [0u8; 32];
    hash.copy_from_slice(&data[16..48]);
    Ok(hash)
}

/// Seed recorded on the round at finalization; anyone can recompute it from
/// the finalizing slot and that slot's SlotHashes entry.
pub fn lottery_seed(round_id: u64, total_depositors: u32, slot_hash: &[u8; 32], slot: u64) -> [u8; 32] {
    hashv(&[
        b"boom:lottery".as_ref(),
        round_id.to_le_bytes().as_ref(),
        total_depositors.to_le_bytes().as_ref(),
        slot_hash.as_ref(),
        slot.to_le_bytes().as_ref(),
    ])
    .to_bytes()
}

fn draw_u64(seed: &[u8; 32], step: u32) -> u64 {
    let h = hashv(&[b"boom:draw".as_ref(), seed.as_ref(), step.to_le_bytes().as_ref()]).to_bytes();
    let mut b = [0u8; 8];
    b.copy_from_slice(&h[..8]);
    u64::from_le_bytes(b)
}

/// Draws `min(picks, population)` distinct deposit positions out of
/// `0..population` (Floyd's sampling). Result is sorted ascending.
pub fn draw_winner_positions(seed: &[u8; 32], population: u32, picks: u32) -> Vec<u32> {
    let k = picks.min(population);
    let mut chosen: Vec<u32> = Vec::with_capacity(k as usize);

    for j in (population - k)..population {
        let t = (draw_u64(seed, j) % (u64::from(j) + 1)) as u32;
        if chosen.contains(&t) {
            chosen.push(j);
        } else {
            chosen.push(t);
        }
    }

    chosen.sort_unstable();
    chosen
}

/// Validates an operator-supplied winner list and returns it sorted.
pub fn normalize_winner_indexes(indexes: &[u32], population: u32, expected: u32) -> Result<Vec<u32>> {
    require!(indexes.len() == expected as usize, BoomError::WinnerCountMismatch);

    let mut sorted = indexes.to_vec();
    sorted.sort_unstable();
    for (i, idx) in sorted.iter().enumerate() {
        require!(*idx < population, BoomError::WinnerIndexOutOfRange);
        if i > 0 {
            require!(sorted[i - 1] != *idx, BoomError::DuplicateWinnerIndex);
        }
    }
    Ok(sorted)
}

// -------------------------
// Constant-product math
// -------------------------

/// `reserve_out * in * (10000 - fee) / (reserve_in * 10000 + in * (10000 - fee))`, rounded down.
pub fn quote_amount_out(amount_in: u64, reserve_in: u64, reserve_out: u64, fee_bps: u16) -> Result<u64> {
    require!(u64::from(fee_bps) <= BPS_DENOMINATOR, BoomError::InvalidFeeBps);
    require!(reserve_in > 0 && reserve_out > 0, BoomError::InsufficientLiquidity);

    let in_after_fee = u128::from(amount_in)
        .checked_mul(u128::from(BPS_DENOMINATOR - u64::from(fee_bps)))
        .ok_or(BoomError::MathOverflow)?;

    let numerator = u128::from(reserve_out)
        .checked_mul(in_after_fee)
        .ok_or(BoomError::MathOverflow)?;
    let denominator = u128::from(reserve_in)
        .checked_mul(u128::from(BPS_DENOMINATOR))
        .and_then(|v| v.checked_add(in_after_fee))
        .ok_or(BoomError::MathOverflow)?;

    let out = numerator / denominator;
    u64::try_from(out).map_err(|_| error!(BoomError::MathOverflow))
}

/// `sol_reserve / token_reserve` scaled by `PRICE_SCALE`.
pub fn spot_price(sol_reserve: u64, token_reserve: u64) -> Option<u128> {
    if token_reserve == 0 {
        return None;
    }
    Some(u128::from(sol_reserve) * PRICE_SCALE / u128::from(token_reserve))
}

/// Market valuation in lamports: full supply priced at the pool's spot price.
pub fn valuation(total_supply: u64, sol_reserve: u64, token_reserve: u64) -> Option<u128> {
    if token_reserve == 0 {
        return None;
    }
    Some(u128::from(total_supply) * u128::from(sol_reserve) / u128::from(token_reserve))
}

#[inline(always)]
pub fn reserve_product(a: u64, b: u64) -> u128 {
    u128::from(a) * u128::from(b)
}
