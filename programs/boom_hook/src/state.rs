use anchor_lang::prelude::*;

use crate::errors::HookError;

#[account]
#[derive(InitSpace)]
pub struct HookConfig {
    pub authority: Pubkey,
    pub bump: u8,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace, Default)]
pub enum GateMode {
    /// Only transfers touching a whitelisted LP pass.
    #[default]
    Restricted,
    Open,
}

/// Per-mint gate. Created alongside the mint's ExtraAccountMetaList.
#[account]
#[derive(InitSpace, Default)]
pub struct GateState {
    pub mint: Pubkey,
    pub round_id: u64,
    pub mode: GateMode,
    pub opened_at: i64,
    pub bump: u8,
}

impl GateState {
    pub fn init(&mut self, mint: Pubkey, round_id: u64, mode: GateMode, now: i64, bump: u8) {
        self.mint = mint;
        self.round_id = round_id;
        self.mode = mode;
        self.opened_at = if mode == GateMode::Open { now } else { 0 };
        self.bump = bump;
    }

    /// One-way. There is no path back to `Restricted`.
    pub fn open(&mut self, now: i64) -> Result<()> {
        require!(self.mode != GateMode::Open, HookError::AlreadyOpen);
        self.mode = GateMode::Open;
        self.opened_at = now;
        Ok(())
    }
}

#[account]
#[derive(InitSpace)]
pub struct WhitelistEntry {
    pub mint: Pubkey,
    /// Owner of the approved token account (the pool PDA for the round's own pool).
    pub official_lp: Pubkey,
    pub added_at: i64,
    pub bump: u8,
}

impl WhitelistEntry {
    pub fn approves(&self, mint: &Pubkey, token_owner: &Pubkey) -> bool {
        self.mint == *mint && self.official_lp == *token_owner
    }
}
