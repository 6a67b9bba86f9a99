use anchor_lang::prelude::*;

#[event]
pub struct WhitelistAdded {
    pub mint: Pubkey,
    pub official_lp: Pubkey,
}

#[event]
pub struct WhitelistRemoved {
    pub mint: Pubkey,
    pub official_lp: Pubkey,
}

#[event]
pub struct GateOpened {
    pub mint: Pubkey,
    pub round_id: u64,
    pub opened_at: i64,
}
