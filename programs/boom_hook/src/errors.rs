use anchor_lang::prelude::*;

#[error_code]
pub enum HookError {
    // -----------------
    // Authorization
    // -----------------
    #[msg("Unauthorized")]
    Unauthorized,

    // -----------------
    // Transfer policy
    // -----------------
    #[msg("Neither side of the transfer is a whitelisted LP")]
    DestinationNotWhitelisted,
    #[msg("Round has not exploded; trading is not open")]
    TradingNotOpen,
    #[msg("Gate already open")]
    AlreadyOpen,

    // -----------------
    // Validation
    // -----------------
    #[msg("Mint does not match the registered presale token")]
    MintMismatch,
    #[msg("Not a transfer-hook execute instruction")]
    InvalidInstruction,
    #[msg("Token account data too short")]
    InvalidTokenAccount,
    #[msg("Extra account meta list mismatch")]
    InvalidExtraAccountMetas,
    #[msg("Gate state missing or invalid")]
    InvalidGateState,
}
