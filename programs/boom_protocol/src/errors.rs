use anchor_lang::prelude::*;

#[error_code]
pub enum BoomError {
    // -----------------
    // Authorization
    // -----------------
    #[msg("Unauthorized")]
    Unauthorized,

    // -----------------
    // Sequencer
    // -----------------
    #[msg("Round sequencer already initialized")]
    AlreadyInitialized,
    #[msg("Round id already issued")]
    RoundAlreadyExists,
    #[msg("Round id must follow the current round")]
    InvalidRoundId,
    #[msg("Auto advance is disabled")]
    AutoAdvanceDisabled,
    #[msg("Previous round has not exploded")]
    PreviousRoundNotExploded,

    // -----------------
    // Validation
    // -----------------
    #[msg("Cooldown must be positive")]
    InvalidCooldown,
    #[msg("Lottery spots out of range")]
    InvalidLotterySpots,
    #[msg("Deposit bounds invalid (need 0 < min <= max)")]
    InvalidDepositBounds,
    #[msg("Deposit amount outside round bounds")]
    DepositOutOfRange,
    #[msg("Depositor already has a deposit in this round")]
    DuplicateDepositor,
    #[msg("Invalid fee bps (must be 0..=10_000).")]
    InvalidFeeBps,
    #[msg("Mint authority must be the round mint authority PDA")]
    InvalidMintAuthority,
    #[msg("Mint does not match the registered presale token")]
    InvalidMint,
    #[msg("Mint has no transfer hook program")]
    MissingTransferHook,
    #[msg("Deposit PDA mismatch")]
    DepositPdaMismatch,
    #[msg("Deposit not owned by program")]
    DepositNotOwnedByProgram,
    #[msg("Too many entries")]
    TooManyEntries,
    #[msg("Failed to borrow account data")]
    AccountBorrowFailed,
    #[msg("Recent slot hashes unavailable")]
    SlotHashesUnavailable,

    // -----------------
    // Round lifecycle
    // -----------------
    #[msg("Round is not open for deposits")]
    RoundNotOpen,
    #[msg("Round has not ended yet")]
    TooEarly,
    #[msg("Round already finalized")]
    AlreadyFinalized,
    #[msg("Round not finalized")]
    RoundNotFinalized,

    // -----------------
    // Lottery
    // -----------------
    #[msg("Winner list must name exactly min(spots, depositors) positions")]
    WinnerCountMismatch,
    #[msg("Winner index out of range")]
    WinnerIndexOutOfRange,
    #[msg("Duplicate winner index")]
    DuplicateWinnerIndex,
    #[msg("Deposit already marked as winner")]
    AlreadyWinner,
    #[msg("Not a winner")]
    NotAWinner,
    #[msg("Winners cannot refund")]
    WinnerCannotRefund,
    #[msg("Already claimed")]
    AlreadyClaimed,
    #[msg("Nothing to withdraw")]
    NothingToWithdraw,

    // -----------------
    // Token issuance
    // -----------------
    #[msg("tokens_per_winner * winners exceeds supply")]
    SupplyExceeded,
    #[msg("Trading has not started")]
    TradingNotStarted,

    // -----------------
    // Explosion gate
    // -----------------
    #[msg("Already exploded")]
    AlreadyExploded,
    #[msg("Explosion deadline must be in the future")]
    DeadlineInPast,
    #[msg("No trigger armed (need a deadline or a cap commitment)")]
    NoTriggerArmed,
    #[msg("No explosion deadline set")]
    NoDeadlineSet,
    #[msg("Explosion deadline not reached")]
    DeadlineNotReached,
    #[msg("No cap commitment")]
    NoCapCommitted,
    #[msg("Revealed cap does not match commitment")]
    InvalidCapReveal,
    #[msg("Pool valuation below revealed cap")]
    CapNotReached,

    // -----------------
    // Pool
    // -----------------
    #[msg("Pool is not trading")]
    PoolNotTrading,
    #[msg("Slippage exceeded")]
    SlippageExceeded,
    #[msg("Insufficient pool liquidity")]
    InsufficientLiquidity,

    // -----------------
    // Arithmetic
    // -----------------
    #[msg("Math overflow")]
    MathOverflow,
}
