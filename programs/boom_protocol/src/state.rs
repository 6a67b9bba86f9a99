use anchor_lang::prelude::*;

use crate::constants::{
    BPS_DENOMINATOR, DEFAULT_COOLDOWN_SECS, DEFAULT_LOTTERY_SPOTS, DEFAULT_MAX_DEPOSIT,
    DEFAULT_MIN_DEPOSIT, MAX_LOTTERY_SPOTS,
};
use crate::errors::BoomError;
use crate::utils::{
    cap_commitment, draw_winner_positions, normalize_winner_indexes, quote_amount_out, spot_price,
    valuation,
};

/// Parameters a round is opened with. Also the shape of the sequencer defaults.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundParams {
    pub cooldown: i64,
    pub lottery_spots: u32,
    pub min_deposit: u64,
    pub max_deposit: u64,
}

/// Devnet defaults, the values operational tooling seeds the sequencer with.
impl Default for RoundParams {
    fn default() -> Self {
        Self {
            cooldown: DEFAULT_COOLDOWN_SECS,
            lottery_spots: DEFAULT_LOTTERY_SPOTS,
            min_deposit: DEFAULT_MIN_DEPOSIT,
            max_deposit: DEFAULT_MAX_DEPOSIT,
        }
    }
}

impl RoundParams {
    pub fn validate(&self) -> Result<()> {
        require!(self.cooldown > 0, BoomError::InvalidCooldown);
        require!(
            self.lottery_spots > 0 && self.lottery_spots <= MAX_LOTTERY_SPOTS,
            BoomError::InvalidLotterySpots
        );
        require!(
            self.min_deposit > 0 && self.min_deposit <= self.max_deposit,
            BoomError::InvalidDepositBounds
        );
        Ok(())
    }
}

// -----------------
// Sequencer
// -----------------

#[account]
#[derive(InitSpace, Default)]
pub struct RoundSequencer {
    pub authority: Pubkey,
    pub current_round: u64,
    pub last_explosion_round: u64,
    pub auto_advance_enabled: bool,
    pub default_cooldown: i64,
    pub default_lottery_spots: u32,
    pub default_min_deposit: u64,
    pub default_max_deposit: u64,
    pub bump: u8,
}

impl RoundSequencer {
    pub fn is_initialized(&self) -> bool {
        self.authority != Pubkey::default()
    }

    pub fn initialize(&mut self, authority: Pubkey, defaults: RoundParams, bump: u8) -> Result<()> {
        require!(!self.is_initialized(), BoomError::AlreadyInitialized);
        defaults.validate()?;

        self.authority = authority;
        self.current_round = crate::constants::INITIAL_ROUND_ID;
        self.last_explosion_round = crate::constants::INITIAL_ROUND_ID;
        self.auto_advance_enabled = true;
        self.set_defaults(&defaults);
        self.bump = bump;
        Ok(())
    }

    pub fn defaults(&self) -> RoundParams {
        RoundParams {
            cooldown: self.default_cooldown,
            lottery_spots: self.default_lottery_spots,
            min_deposit: self.default_min_deposit,
            max_deposit: self.default_max_deposit,
        }
    }

    fn set_defaults(&mut self, p: &RoundParams) {
        self.default_cooldown = p.cooldown;
        self.default_lottery_spots = p.lottery_spots;
        self.default_min_deposit = p.min_deposit;
        self.default_max_deposit = p.max_deposit;
    }

    /// `None` leaves a field unchanged; the merged set must still be valid.
    pub fn apply_updates(
        &mut self,
        cooldown: Option<i64>,
        lottery_spots: Option<u32>,
        min_deposit: Option<u64>,
        max_deposit: Option<u64>,
        auto_advance: Option<bool>,
    ) -> Result<()> {
        let current = self.defaults();
        let merged = RoundParams {
            cooldown: cooldown.unwrap_or(current.cooldown),
            lottery_spots: lottery_spots.unwrap_or(current.lottery_spots),
            min_deposit: min_deposit.unwrap_or(current.min_deposit),
            max_deposit: max_deposit.unwrap_or(current.max_deposit),
        };
        merged.validate()?;

        self.set_defaults(&merged);
        if let Some(enabled) = auto_advance {
            self.auto_advance_enabled = enabled;
        }
        Ok(())
    }

    /// Round ids are issued strictly increasing.
    pub fn issue_round_id(&mut self, round_id: u64) -> Result<()> {
        require!(round_id > self.current_round, BoomError::RoundAlreadyExists);
        self.current_round = round_id;
        Ok(())
    }

    pub fn check_auto_advance(&self, new_round_id: u64, previous_exploded: bool) -> Result<()> {
        require!(self.auto_advance_enabled, BoomError::AutoAdvanceDisabled);
        let expected = self
            .current_round
            .checked_add(1)
            .ok_or(BoomError::MathOverflow)?;
        require!(new_round_id == expected, BoomError::InvalidRoundId);
        require!(previous_exploded, BoomError::PreviousRoundNotExploded);
        Ok(())
    }

    pub fn record_explosion(&mut self, round_id: u64) {
        if round_id > self.last_explosion_round {
            self.last_explosion_round = round_id;
        }
    }
}

// -----------------
// Round
// -----------------

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace, Default)]
pub enum WinnerSelection {
    #[default]
    Pending,
    /// spots >= depositors: everyone wins.
    PassThrough,
    /// Seeded draw without replacement.
    Draw,
    /// Operator-supplied list.
    Explicit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundStatus {
    Open,
    Ended,
    Finalized,
}

// `#[max_len]` on `winner_positions` needs a literal
const _: () = assert!(MAX_LOTTERY_SPOTS == 100);

#[account]
#[derive(InitSpace, Default)]
pub struct PresaleRound {
    pub authority: Pubkey,
    pub round_id: u64,
    pub start_time: i64,
    pub end_time: i64,
    pub lottery_spots: u32,
    pub min_deposit: u64,
    pub max_deposit: u64,
    pub total_deposited: u64,
    pub total_depositors: u32,
    pub is_finalized: bool,
    pub bump: u8,

    pub winner_selection: WinnerSelection,
    pub lottery_seed: [u8; 32],
    pub winners_count: u32,
    pub finalized_at: i64,
    pub marked_winners: u32,

    // lamport accounting for the escrow held by this PDA
    pub winner_deposits: u64,
    pub refunded_total: u64,
    pub proceeds_withdrawn: u64,

    /// Sorted winning positions for `Draw` / `Explicit`. Bounded by MAX_LOTTERY_SPOTS.
    #[max_len(100)]
    pub winner_positions: Vec<u32>,
}

impl PresaleRound {
    pub fn open(
        &mut self,
        authority: Pubkey,
        round_id: u64,
        params: &RoundParams,
        now: i64,
        bump: u8,
    ) -> Result<()> {
        params.validate()?;

        self.authority = authority;
        self.round_id = round_id;
        self.start_time = now;
        self.end_time = now
            .checked_add(params.cooldown)
            .ok_or(BoomError::MathOverflow)?;
        self.lottery_spots = params.lottery_spots;
        self.min_deposit = params.min_deposit;
        self.max_deposit = params.max_deposit;
        self.total_deposited = 0;
        self.total_depositors = 0;
        self.is_finalized = false;
        self.bump = bump;
        self.winner_selection = WinnerSelection::Pending;
        Ok(())
    }

    pub fn status(&self, now: i64) -> RoundStatus {
        if self.is_finalized {
            RoundStatus::Finalized
        } else if now < self.end_time {
            RoundStatus::Open
        } else {
            RoundStatus::Ended
        }
    }

    /// Records `deposit` as this round's next entry and returns its position.
    pub fn accept_deposit(
        &mut self,
        deposit: &mut UserDeposit,
        depositor: Pubkey,
        amount: u64,
        now: i64,
        bump: u8,
    ) -> Result<u32> {
        require!(!deposit.is_open(), BoomError::DuplicateDepositor);
        require!(self.status(now) == RoundStatus::Open, BoomError::RoundNotOpen);
        require!(
            amount >= self.min_deposit && amount <= self.max_deposit,
            BoomError::DepositOutOfRange
        );

        let position = self.total_depositors;
        self.total_deposited = self
            .total_deposited
            .checked_add(amount)
            .ok_or(BoomError::MathOverflow)?;
        self.total_depositors = self
            .total_depositors
            .checked_add(1)
            .ok_or(BoomError::MathOverflow)?;

        deposit.depositor = depositor;
        deposit.round_id = self.round_id;
        deposit.amount = amount;
        deposit.deposit_time = now;
        deposit.is_winner = false;
        deposit.claimed = false;
        deposit.bump = bump;
        deposit.position = position;
        deposit.refunded = false;

        Ok(position)
    }

    pub fn max_winners(&self) -> u32 {
        self.lottery_spots.min(self.total_depositors)
    }

    /// Closes the round and fixes the winner set. `explicit` may close the round early.
    pub fn finalize(&mut self, now: i64, explicit: &[u32], seed: [u8; 32]) -> Result<WinnerSelection> {
        require!(!self.is_finalized, BoomError::AlreadyFinalized);
        if explicit.is_empty() {
            require!(now >= self.end_time, BoomError::TooEarly);
        }

        let population = self.total_depositors;
        let k = self.max_winners();

        let (selection, positions) = if self.lottery_spots >= population {
            if !explicit.is_empty() {
                normalize_winner_indexes(explicit, population, population)?;
            }
            (WinnerSelection::PassThrough, Vec::new())
        } else if !explicit.is_empty() {
            (
                WinnerSelection::Explicit,
                normalize_winner_indexes(explicit, population, k)?,
            )
        } else {
            self.lottery_seed = seed;
            (
                WinnerSelection::Draw,
                draw_winner_positions(&seed, population, k),
            )
        };

        self.winner_selection = selection;
        self.winner_positions = positions;
        self.winners_count = k;
        self.finalized_at = now;
        self.is_finalized = true;
        Ok(selection)
    }

    pub fn is_winning_position(&self, position: u32) -> bool {
        match self.winner_selection {
            WinnerSelection::Pending => false,
            WinnerSelection::PassThrough => position < self.total_depositors,
            WinnerSelection::Draw | WinnerSelection::Explicit => {
                self.winner_positions.binary_search(&position).is_ok()
            }
        }
    }

    /// Copies the recorded outcome onto `deposit`. Returns whether it was marked.
    pub fn apply_lottery_result(&mut self, deposit: &mut UserDeposit) -> Result<bool> {
        require!(self.is_finalized, BoomError::RoundNotFinalized);
        require!(deposit.round_id == self.round_id, BoomError::DepositPdaMismatch);

        if deposit.is_winner || !self.is_winning_position(deposit.position) {
            return Ok(false);
        }
        deposit.is_winner = true;
        self.winner_deposits = self
            .winner_deposits
            .checked_add(deposit.amount)
            .ok_or(BoomError::MathOverflow)?;
        Ok(true)
    }

    /// Operator path: only ever confirms a position the lottery already selected.
    pub fn mark_winner(&mut self, deposit: &mut UserDeposit) -> Result<()> {
        require!(self.is_finalized, BoomError::RoundNotFinalized);
        require!(!deposit.is_winner, BoomError::AlreadyWinner);
        require!(self.is_winning_position(deposit.position), BoomError::NotAWinner);

        self.apply_lottery_result(deposit)?;
        self.marked_winners = self
            .marked_winners
            .checked_add(1)
            .ok_or(BoomError::MathOverflow)?;
        Ok(())
    }

    /// Returns the lamports owed to a losing depositor.
    pub fn refund(&mut self, deposit: &mut UserDeposit) -> Result<u64> {
        require!(self.is_finalized, BoomError::RoundNotFinalized);
        require!(
            !self.is_winning_position(deposit.position),
            BoomError::WinnerCannotRefund
        );
        require!(!deposit.refunded, BoomError::AlreadyClaimed);

        deposit.refunded = true;
        self.refunded_total = self
            .refunded_total
            .checked_add(deposit.amount)
            .ok_or(BoomError::MathOverflow)?;
        Ok(deposit.amount)
    }

    /// Winner deposits already marked but not yet withdrawn by the authority.
    pub fn take_proceeds(&mut self) -> Result<u64> {
        let available = self
            .winner_deposits
            .checked_sub(self.proceeds_withdrawn)
            .ok_or(BoomError::MathOverflow)?;
        require!(available > 0, BoomError::NothingToWithdraw);
        self.proceeds_withdrawn = self.winner_deposits;
        Ok(available)
    }
}

// -----------------
// Deposit
// -----------------

#[account]
#[derive(InitSpace, Default)]
pub struct UserDeposit {
    pub depositor: Pubkey,
    pub round_id: u64,
    pub amount: u64,
    pub deposit_time: i64,
    pub is_winner: bool,
    pub claimed: bool,
    pub bump: u8,
    /// Arrival order within the round (0-based).
    pub position: u32,
    pub refunded: bool,
}

impl UserDeposit {
    pub fn is_open(&self) -> bool {
        self.depositor != Pubkey::default()
    }

    pub fn claim(&mut self, exploded: bool) -> Result<()> {
        require!(self.is_winner, BoomError::NotAWinner);
        require!(!self.claimed, BoomError::AlreadyClaimed);
        require!(exploded, BoomError::TradingNotStarted);
        self.claimed = true;
        Ok(())
    }
}

// -----------------
// Token issuance
// -----------------

#[account]
#[derive(InitSpace, Default)]
pub struct PresaleToken {
    pub round_id: u64,
    pub mint: Pubkey,
    pub total_supply: u64,
    pub tokens_per_winner: u64,
    pub bump: u8,

    pub decimals: u8,
    pub winners_count: u32,
    pub claimed_count: u32,
    pub pool_minted: u64,
}

impl PresaleToken {
    pub fn register(
        &mut self,
        round: &PresaleRound,
        mint: Pubkey,
        decimals: u8,
        total_supply: u64,
        tokens_per_winner: u64,
        bump: u8,
    ) -> Result<()> {
        require!(round.is_finalized, BoomError::RoundNotFinalized);

        let reserved = u128::from(tokens_per_winner) * u128::from(round.winners_count);
        require!(reserved <= u128::from(total_supply), BoomError::SupplyExceeded);

        self.round_id = round.round_id;
        self.mint = mint;
        self.total_supply = total_supply;
        self.tokens_per_winner = tokens_per_winner;
        self.bump = bump;
        self.decimals = decimals;
        self.winners_count = round.winners_count;
        self.claimed_count = 0;
        self.pool_minted = 0;
        Ok(())
    }

    pub fn winners_reserve(&self) -> Result<u64> {
        self.tokens_per_winner
            .checked_mul(u64::from(self.winners_count))
            .ok_or_else(|| error!(BoomError::MathOverflow))
    }

    /// Supply left over for seeding the pool once every winner has claimed.
    pub fn pool_allocation(&self) -> Result<u64> {
        self.total_supply
            .checked_sub(self.winners_reserve()?)
            .ok_or_else(|| error!(BoomError::SupplyExceeded))
    }

    pub fn record_claim(&mut self) -> Result<u64> {
        require!(self.claimed_count < self.winners_count, BoomError::SupplyExceeded);
        self.claimed_count += 1;
        Ok(self.tokens_per_winner)
    }

    pub fn reserve_pool_mint(&mut self, amount: u64) -> Result<()> {
        let minted = self
            .pool_minted
            .checked_add(amount)
            .ok_or(BoomError::MathOverflow)?;
        require!(minted <= self.pool_allocation()?, BoomError::SupplyExceeded);
        self.pool_minted = minted;
        Ok(())
    }
}

// -----------------
// Explosion gate
// -----------------

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace, Default)]
pub enum ExplosionReason {
    #[default]
    None,
    CapHit,
    TimeLimit,
}

#[account]
#[derive(InitSpace, Default)]
pub struct PresaleExplosion {
    pub round_id: u64,
    pub cap_hash: [u8; 32],
    pub revealed_cap: u64,
    pub explosion_deadline: i64,
    pub is_exploded: bool,
    pub explosion_time: i64,
    pub explosion_reason: ExplosionReason,
    pub bump: u8,
}

impl PresaleExplosion {
    pub fn arm(
        &mut self,
        round_id: u64,
        cap_hash: [u8; 32],
        explosion_deadline: i64,
        now: i64,
        bump: u8,
    ) -> Result<()> {
        require!(
            cap_hash != [0u8; 32] || explosion_deadline != 0,
            BoomError::NoTriggerArmed
        );
        if explosion_deadline != 0 {
            require!(explosion_deadline > now, BoomError::DeadlineInPast);
        }

        self.round_id = round_id;
        self.cap_hash = cap_hash;
        self.revealed_cap = 0;
        self.explosion_deadline = explosion_deadline;
        self.is_exploded = false;
        self.explosion_time = 0;
        self.explosion_reason = ExplosionReason::None;
        self.bump = bump;
        Ok(())
    }

    fn explode(&mut self, now: i64, reason: ExplosionReason) {
        self.is_exploded = true;
        self.explosion_time = now;
        self.explosion_reason = reason;
    }

    pub fn trigger_time(&mut self, now: i64) -> Result<()> {
        require!(!self.is_exploded, BoomError::AlreadyExploded);
        require!(self.explosion_deadline != 0, BoomError::NoDeadlineSet);
        require!(now >= self.explosion_deadline, BoomError::DeadlineNotReached);
        self.explode(now, ExplosionReason::TimeLimit);
        Ok(())
    }

    /// `live_valuation` is the pool valuation computed from freshly synced reserves.
    pub fn trigger_cap(
        &mut self,
        revealed_cap: u64,
        salt: &[u8; 32],
        live_valuation: Option<u128>,
        now: i64,
    ) -> Result<()> {
        require!(!self.is_exploded, BoomError::AlreadyExploded);
        require!(self.cap_hash != [0u8; 32], BoomError::NoCapCommitted);
        require!(
            cap_commitment(self.round_id, revealed_cap, salt) == self.cap_hash,
            BoomError::InvalidCapReveal
        );
        require!(
            live_valuation.is_some_and(|v| v >= u128::from(revealed_cap)),
            BoomError::CapNotReached
        );

        self.revealed_cap = revealed_cap;
        self.explode(now, ExplosionReason::CapHit);
        Ok(())
    }
}

// -----------------
// Pool
// -----------------

/// Borsh tag doubles as an `is_buy` flag (0 = sell, 1 = buy).
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwapDirection {
    /// token in, SOL out
    Sell,
    /// SOL in, token out
    Buy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapOutcome {
    pub amount_in: u64,
    pub amount_out: u64,
}

#[account]
#[derive(InitSpace, Default)]
pub struct Pool {
    pub round_id: u64,
    pub mint: Pubkey,
    pub token_vault: Pubkey,
    pub sol_reserve: u64,
    pub token_reserve: u64,
    pub fee_bps: u16,
    pub sol_vault_bump: u8,
    pub bump: u8,
    pub last_sync_at: i64,
}

impl Pool {
    pub fn initialize(
        &mut self,
        round_id: u64,
        mint: Pubkey,
        token_vault: Pubkey,
        fee_bps: u16,
        bump: u8,
        sol_vault_bump: u8,
    ) -> Result<()> {
        require!(u64::from(fee_bps) <= BPS_DENOMINATOR, BoomError::InvalidFeeBps);

        self.round_id = round_id;
        self.mint = mint;
        self.token_vault = token_vault;
        self.sol_reserve = 0;
        self.token_reserve = 0;
        self.fee_bps = fee_bps;
        self.sol_vault_bump = sol_vault_bump;
        self.bump = bump;
        self.last_sync_at = 0;
        Ok(())
    }

    /// Overwrites the cached reserves with the observed vault balances.
    pub fn sync(&mut self, sol_balance: u64, token_balance: u64, now: i64) {
        self.sol_reserve = sol_balance;
        self.token_reserve = token_balance;
        self.last_sync_at = now;
    }

    fn reserves(&self, direction: SwapDirection) -> (u64, u64) {
        match direction {
            SwapDirection::Buy => (self.sol_reserve, self.token_reserve),
            SwapDirection::Sell => (self.token_reserve, self.sol_reserve),
        }
    }

    pub fn quote(&self, amount_in: u64, direction: SwapDirection) -> Result<u64> {
        let (reserve_in, reserve_out) = self.reserves(direction);
        quote_amount_out(amount_in, reserve_in, reserve_out, self.fee_bps)
    }

    /// Prices the trade against the cached reserves and books it.
    /// `amount_in == 0` leaves the pool untouched.
    pub fn apply_swap(
        &mut self,
        amount_in: u64,
        min_amount_out: u64,
        direction: SwapDirection,
    ) -> Result<SwapOutcome> {
        if amount_in == 0 {
            return Ok(SwapOutcome { amount_in: 0, amount_out: 0 });
        }

        let amount_out = self.quote(amount_in, direction)?;
        require!(amount_out >= min_amount_out, BoomError::SlippageExceeded);
        require!(amount_out > 0, BoomError::InsufficientLiquidity);

        let (reserve_in, reserve_out) = self.reserves(direction);
        let new_in = reserve_in
            .checked_add(amount_in)
            .ok_or(BoomError::MathOverflow)?;
        let new_out = reserve_out
            .checked_sub(amount_out)
            .ok_or(BoomError::InsufficientLiquidity)?;

        match direction {
            SwapDirection::Buy => {
                self.sol_reserve = new_in;
                self.token_reserve = new_out;
            }
            SwapDirection::Sell => {
                self.token_reserve = new_in;
                self.sol_reserve = new_out;
            }
        }

        Ok(SwapOutcome { amount_in, amount_out })
    }

    pub fn price(&self) -> Option<u128> {
        spot_price(self.sol_reserve, self.token_reserve)
    }

    pub fn valuation(&self, total_supply: u64) -> Option<u128> {
        valuation(total_supply, self.sol_reserve, self.token_reserve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DEFAULT_POOL_FEE_BPS, PRICE_SCALE};
    use crate::utils::reserve_product;

    const SOL: u64 = 1_000_000_000;

    fn params() -> RoundParams {
        RoundParams {
            lottery_spots: 2,
            ..RoundParams::default()
        }
    }

    fn open_round(p: &RoundParams) -> PresaleRound {
        let mut round = PresaleRound::default();
        round.open(Pubkey::new_unique(), 1, p, 1_000, 255).unwrap();
        round
    }

    fn deposit_n(round: &mut PresaleRound, amounts: &[u64]) -> Vec<UserDeposit> {
        amounts
            .iter()
            .map(|a| {
                let mut d = UserDeposit::default();
                round
                    .accept_deposit(&mut d, Pubkey::new_unique(), *a, 1_010, 254)
                    .unwrap();
                d
            })
            .collect()
    }

    #[test]
    fn sequencer_initializes_once() {
        let mut seq = RoundSequencer::default();
        let authority = Pubkey::new_unique();
        seq.initialize(authority, params(), 1).unwrap();

        assert!(seq.auto_advance_enabled);
        assert_eq!(seq.defaults(), params());

        let e = seq.initialize(Pubkey::new_unique(), params(), 1).unwrap_err();
        assert_eq!(e, BoomError::AlreadyInitialized.into());
        assert_eq!(seq.authority, authority);
    }

    #[test]
    fn sequencer_updates_leave_absent_fields() {
        let mut seq = RoundSequencer::default();
        seq.initialize(Pubkey::new_unique(), params(), 1).unwrap();

        seq.apply_updates(None, Some(9), None, None, Some(false)).unwrap();
        let d = seq.defaults();
        assert_eq!(d.lottery_spots, 9);
        assert_eq!(d.cooldown, 60);
        assert_eq!(d.min_deposit, SOL / 100);
        assert!(!seq.auto_advance_enabled);

        // min above the stored max is rejected and nothing changes
        let e = seq.apply_updates(None, None, Some(2 * SOL), None, None).unwrap_err();
        assert_eq!(e, BoomError::InvalidDepositBounds.into());
        assert_eq!(seq.defaults().min_deposit, SOL / 100);
    }

    #[test]
    fn sequencer_round_ids_and_auto_advance() {
        let mut seq = RoundSequencer::default();
        seq.initialize(Pubkey::new_unique(), params(), 1).unwrap();

        seq.issue_round_id(1).unwrap();
        let e = seq.issue_round_id(1).unwrap_err();
        assert_eq!(e, BoomError::RoundAlreadyExists.into());

        let e = seq.check_auto_advance(2, false).unwrap_err();
        assert_eq!(e, BoomError::PreviousRoundNotExploded.into());
        let e = seq.check_auto_advance(3, true).unwrap_err();
        assert_eq!(e, BoomError::InvalidRoundId.into());
        seq.check_auto_advance(2, true).unwrap();

        seq.auto_advance_enabled = false;
        let e = seq.check_auto_advance(2, true).unwrap_err();
        assert_eq!(e, BoomError::AutoAdvanceDisabled.into());
    }

    #[test]
    fn round_params_validation() {
        let mut p = params();
        p.min_deposit = p.max_deposit + 1;
        assert_eq!(p.validate().unwrap_err(), BoomError::InvalidDepositBounds.into());

        let mut p = params();
        p.lottery_spots = MAX_LOTTERY_SPOTS + 1;
        assert_eq!(p.validate().unwrap_err(), BoomError::InvalidLotterySpots.into());

        let mut p = params();
        p.cooldown = 0;
        assert_eq!(p.validate().unwrap_err(), BoomError::InvalidCooldown.into());

        RoundParams::default().validate().unwrap();
    }

    #[test]
    fn deposits_keep_totals_in_step() {
        let mut round = open_round(&params());
        let deps = deposit_n(&mut round, &[SOL / 10, SOL / 5, SOL / 20]);

        let sum: u64 = deps.iter().map(|d| d.amount).sum();
        assert_eq!(round.total_deposited, sum);
        assert_eq!(round.total_depositors as usize, deps.len());
        assert_eq!(deps.iter().map(|d| d.position).collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn deposit_rejections() {
        let mut round = open_round(&params());
        let who = Pubkey::new_unique();

        let mut d = UserDeposit::default();
        let e = round.accept_deposit(&mut d, who, SOL / 1000, 1_010, 1).unwrap_err();
        assert_eq!(e, BoomError::DepositOutOfRange.into());
        let e = round.accept_deposit(&mut d, who, 2 * SOL, 1_010, 1).unwrap_err();
        assert_eq!(e, BoomError::DepositOutOfRange.into());

        round.accept_deposit(&mut d, who, SOL / 10, 1_010, 1).unwrap();
        let e = round.accept_deposit(&mut d, who, SOL / 10, 1_011, 1).unwrap_err();
        assert_eq!(e, BoomError::DuplicateDepositor.into());

        let mut late = UserDeposit::default();
        let e = round
            .accept_deposit(&mut late, Pubkey::new_unique(), SOL / 10, round.end_time, 1)
            .unwrap_err();
        assert_eq!(e, BoomError::RoundNotOpen.into());

        assert_eq!(round.total_depositors, 1);
        assert_eq!(round.total_deposited, SOL / 10);
    }

    #[test]
    fn deposit_bounds_are_inclusive() {
        let p = params();
        let mut round = open_round(&p);

        let mut at_min = UserDeposit::default();
        round
            .accept_deposit(&mut at_min, Pubkey::new_unique(), p.min_deposit, 1_010, 1)
            .unwrap();
        let mut at_max = UserDeposit::default();
        round
            .accept_deposit(&mut at_max, Pubkey::new_unique(), p.max_deposit, 1_010, 1)
            .unwrap();

        assert_eq!(at_min.amount, p.min_deposit);
        assert_eq!(at_max.amount, p.max_deposit);
        assert_eq!(round.total_deposited, p.min_deposit + p.max_deposit);

        let mut below = UserDeposit::default();
        let e = round
            .accept_deposit(&mut below, Pubkey::new_unique(), p.min_deposit - 1, 1_010, 1)
            .unwrap_err();
        assert_eq!(e, BoomError::DepositOutOfRange.into());
        let e = round
            .accept_deposit(&mut below, Pubkey::new_unique(), p.max_deposit + 1, 1_010, 1)
            .unwrap_err();
        assert_eq!(e, BoomError::DepositOutOfRange.into());
        assert_eq!(round.total_depositors, 2);
    }

    #[test]
    fn finalize_waits_for_end_unless_overridden() {
        let mut round = open_round(&params());
        deposit_n(&mut round, &[SOL / 10, SOL / 10, SOL / 10]);

        let e = round.finalize(1_030, &[], [1u8; 32]).unwrap_err();
        assert_eq!(e, BoomError::TooEarly.into());

        let sel = round.finalize(1_030, &[2, 0], [0u8; 32]).unwrap();
        assert_eq!(sel, WinnerSelection::Explicit);
        assert_eq!(round.winner_positions, vec![0, 2]);

        let e = round.finalize(2_000, &[], [1u8; 32]).unwrap_err();
        assert_eq!(e, BoomError::AlreadyFinalized.into());
    }

    #[test]
    fn pass_through_when_spots_cover_depositors() {
        let mut p = params();
        p.lottery_spots = 5;
        let mut round = open_round(&p);
        let mut deps = deposit_n(&mut round, &[SOL / 10, SOL / 5]);

        let sel = round.finalize(round.end_time, &[], [3u8; 32]).unwrap();
        assert_eq!(sel, WinnerSelection::PassThrough);
        assert_eq!(round.winners_count, 2);

        for d in deps.iter_mut() {
            assert!(round.apply_lottery_result(d).unwrap());
            assert!(d.is_winner);
        }
        assert_eq!(round.winner_deposits, SOL / 10 + SOL / 5);
    }

    #[test]
    fn draw_marks_exactly_spots_winners() {
        let mut round = open_round(&params());
        let mut deps = deposit_n(&mut round, &[SOL / 10; 7]);

        let sel = round.finalize(round.end_time, &[], [42u8; 32]).unwrap();
        assert_eq!(sel, WinnerSelection::Draw);
        assert_eq!(round.lottery_seed, [42u8; 32]);

        let marked = deps
            .iter_mut()
            .filter_map(|d| round.apply_lottery_result(d).ok())
            .filter(|m| *m)
            .count();
        assert_eq!(marked, 2);
        assert_eq!(deps.iter().filter(|d| d.is_winner).count(), 2);
    }

    #[test]
    fn mark_winner_only_confirms_drawn_positions() {
        let mut round = open_round(&params());
        let mut deps = deposit_n(&mut round, &[SOL / 10; 4]);

        let e = round.mark_winner(&mut deps[0]).unwrap_err();
        assert_eq!(e, BoomError::RoundNotFinalized.into());

        round.finalize(round.end_time, &[1, 3], [0u8; 32]).unwrap();

        let e = round.mark_winner(&mut deps[0]).unwrap_err();
        assert_eq!(e, BoomError::NotAWinner.into());

        round.mark_winner(&mut deps[3]).unwrap();
        assert!(deps[3].is_winner);
        let e = round.mark_winner(&mut deps[3]).unwrap_err();
        assert_eq!(e, BoomError::AlreadyWinner.into());
        assert_eq!(round.marked_winners, 1);
    }

    #[test]
    fn losers_refund_once_and_winners_cannot() {
        let mut round = open_round(&params());
        let mut deps = deposit_n(&mut round, &[SOL / 10, SOL / 5, SOL / 20]);
        round.finalize(round.end_time, &[0, 1], [0u8; 32]).unwrap();

        assert_eq!(round.refund(&mut deps[2]).unwrap(), SOL / 20);
        let e = round.refund(&mut deps[2]).unwrap_err();
        assert_eq!(e, BoomError::AlreadyClaimed.into());

        let e = round.refund(&mut deps[0]).unwrap_err();
        assert_eq!(e, BoomError::WinnerCannotRefund.into());
        assert!(!deps[2].claimed);
    }

    #[test]
    fn proceeds_track_marked_winners() {
        let mut round = open_round(&params());
        let mut deps = deposit_n(&mut round, &[SOL / 10, SOL / 5, SOL / 20]);
        round.finalize(round.end_time, &[0, 1], [0u8; 32]).unwrap();

        let e = round.take_proceeds().unwrap_err();
        assert_eq!(e, BoomError::NothingToWithdraw.into());

        round.apply_lottery_result(&mut deps[0]).unwrap();
        assert_eq!(round.take_proceeds().unwrap(), SOL / 10);
        round.apply_lottery_result(&mut deps[1]).unwrap();
        assert_eq!(round.take_proceeds().unwrap(), SOL / 5);
    }

    #[test]
    fn claim_is_exactly_once() {
        let mut d = UserDeposit::default();
        let e = d.claim(true).unwrap_err();
        assert_eq!(e, BoomError::NotAWinner.into());

        d.is_winner = true;
        let e = d.claim(false).unwrap_err();
        assert_eq!(e, BoomError::TradingNotStarted.into());
        assert!(!d.claimed);

        d.claim(true).unwrap();
        let e = d.claim(true).unwrap_err();
        assert_eq!(e, BoomError::AlreadyClaimed.into());
    }

    #[test]
    fn register_checks_finalized_and_supply() {
        let mut round = open_round(&params());
        deposit_n(&mut round, &[SOL / 10; 3]);
        let mint = Pubkey::new_unique();

        let mut tok = PresaleToken::default();
        let e = tok.register(&round, mint, 9, 1_000, 100, 1).unwrap_err();
        assert_eq!(e, BoomError::RoundNotFinalized.into());

        round.finalize(round.end_time, &[], [5u8; 32]).unwrap();
        assert_eq!(round.winners_count, 2);

        let e = tok.register(&round, mint, 9, 1_000, 501, 1).unwrap_err();
        assert_eq!(e, BoomError::SupplyExceeded.into());
        let e = tok.register(&round, mint, 9, 1_000, u64::MAX, 1).unwrap_err();
        assert_eq!(e, BoomError::SupplyExceeded.into());

        tok.register(&round, mint, 9, 1_000, 500, 1).unwrap();
        assert_eq!(tok.pool_allocation().unwrap(), 0);
    }

    #[test]
    fn pool_mints_stay_within_allocation() {
        let mut tok = PresaleToken {
            total_supply: 1_000,
            tokens_per_winner: 300,
            winners_count: 3,
            ..Default::default()
        };
        assert_eq!(tok.pool_allocation().unwrap(), 100);

        tok.reserve_pool_mint(60).unwrap();
        let e = tok.reserve_pool_mint(41).unwrap_err();
        assert_eq!(e, BoomError::SupplyExceeded.into());
        tok.reserve_pool_mint(40).unwrap();
        assert_eq!(tok.pool_minted, 100);

        for _ in 0..3 {
            assert_eq!(tok.record_claim().unwrap(), 300);
        }
        let e = tok.record_claim().unwrap_err();
        assert_eq!(e, BoomError::SupplyExceeded.into());
    }

    #[test]
    fn explosion_arming_rules() {
        let mut gate = PresaleExplosion::default();
        let e = gate.arm(1, [0u8; 32], 0, 100, 1).unwrap_err();
        assert_eq!(e, BoomError::NoTriggerArmed.into());
        let e = gate.arm(1, [0u8; 32], 100, 100, 1).unwrap_err();
        assert_eq!(e, BoomError::DeadlineInPast.into());
        gate.arm(1, [1u8; 32], 0, 100, 1).unwrap();
    }

    #[test]
    fn explosion_by_time_fires_once() {
        let mut gate = PresaleExplosion::default();
        gate.arm(1, [0u8; 32], 500, 100, 1).unwrap();

        let e = gate.trigger_time(499).unwrap_err();
        assert_eq!(e, BoomError::DeadlineNotReached.into());
        assert!(!gate.is_exploded);

        gate.trigger_time(500).unwrap();
        assert!(gate.is_exploded);
        assert_eq!(gate.explosion_reason, ExplosionReason::TimeLimit);

        let e = gate.trigger_time(600).unwrap_err();
        assert_eq!(e, BoomError::AlreadyExploded.into());
    }

    #[test]
    fn explosion_by_cap_and_race_loser() {
        let salt = [9u8; 32];
        let cap = 5 * SOL;
        let mut gate = PresaleExplosion::default();
        gate.arm(7, cap_commitment(7, cap, &salt), 10_000, 100, 1).unwrap();

        let e = gate.trigger_cap(cap + 1, &salt, Some(u128::MAX), 200).unwrap_err();
        assert_eq!(e, BoomError::InvalidCapReveal.into());
        let e = gate.trigger_cap(cap, &salt, Some(u128::from(cap) - 1), 200).unwrap_err();
        assert_eq!(e, BoomError::CapNotReached.into());
        let e = gate.trigger_cap(cap, &salt, None, 200).unwrap_err();
        assert_eq!(e, BoomError::CapNotReached.into());

        gate.trigger_cap(cap, &salt, Some(u128::from(cap)), 200).unwrap();
        assert_eq!(gate.explosion_reason, ExplosionReason::CapHit);
        assert_eq!(gate.revealed_cap, cap);

        // the time path lost the race
        let e = gate.trigger_time(20_000).unwrap_err();
        assert_eq!(e, BoomError::AlreadyExploded.into());
        let e = gate.trigger_cap(cap, &salt, Some(u128::MAX), 300).unwrap_err();
        assert_eq!(e, BoomError::AlreadyExploded.into());
    }

    #[test]
    fn cap_path_requires_commitment() {
        let mut gate = PresaleExplosion::default();
        gate.arm(1, [0u8; 32], 500, 100, 1).unwrap();
        let e = gate.trigger_cap(1, &[0u8; 32], Some(u128::MAX), 200).unwrap_err();
        assert_eq!(e, BoomError::NoCapCommitted.into());
    }

    fn seeded_pool(sol: u64, tokens: u64, fee_bps: u16) -> Pool {
        let mut pool = Pool::default();
        pool.initialize(1, Pubkey::new_unique(), Pubkey::new_unique(), fee_bps, 1, 2)
            .unwrap();
        pool.sync(sol, tokens, 0);
        pool
    }

    #[test]
    fn pool_rejects_bad_fee() {
        let mut pool = Pool::default();
        let e = pool
            .initialize(1, Pubkey::new_unique(), Pubkey::new_unique(), 10_001, 1, 2)
            .unwrap_err();
        assert_eq!(e, BoomError::InvalidFeeBps.into());
    }

    #[test]
    fn zero_swap_is_noop() {
        let mut pool = seeded_pool(SOL, SOL, DEFAULT_POOL_FEE_BPS);
        let before = (pool.sol_reserve, pool.token_reserve);
        let out = pool.apply_swap(0, 0, SwapDirection::Buy).unwrap();
        assert_eq!(out, SwapOutcome { amount_in: 0, amount_out: 0 });
        assert_eq!((pool.sol_reserve, pool.token_reserve), before);
    }

    #[test]
    fn swaps_keep_product_and_respect_slippage() {
        let mut pool = seeded_pool(SOL, SOL, DEFAULT_POOL_FEE_BPS);
        let k0 = reserve_product(pool.sol_reserve, pool.token_reserve);

        let quoted = pool.quote(SOL / 100, SwapDirection::Buy).unwrap();
        let e = pool
            .apply_swap(SOL / 100, quoted + 1, SwapDirection::Buy)
            .unwrap_err();
        assert_eq!(e, BoomError::SlippageExceeded.into());

        let buy = pool.apply_swap(SOL / 100, quoted, SwapDirection::Buy).unwrap();
        assert_eq!(buy.amount_out, 9_851_972);
        let k1 = reserve_product(pool.sol_reserve, pool.token_reserve);
        assert!(k1 >= k0);

        let sell = pool
            .apply_swap(buy.amount_out, 0, SwapDirection::Sell)
            .unwrap();
        assert!(sell.amount_out < SOL / 100);
        assert!(reserve_product(pool.sol_reserve, pool.token_reserve) >= k1);
    }

    #[test]
    fn empty_pool_cannot_trade() {
        let mut pool = seeded_pool(0, 0, DEFAULT_POOL_FEE_BPS);
        let e = pool.apply_swap(10, 0, SwapDirection::Buy).unwrap_err();
        assert_eq!(e, BoomError::InsufficientLiquidity.into());
        // events report 0 when no price exists
        assert_eq!(pool.price(), None);
    }

    #[test]
    fn price_follows_sync() {
        let mut pool = seeded_pool(SOL, SOL, DEFAULT_POOL_FEE_BPS);
        pool.apply_swap(SOL / 10, 0, SwapDirection::Buy).unwrap();

        // external transfers land in the vaults; cache is stale until synced
        let (vault_sol, vault_tokens) = (3 * SOL, SOL);
        assert_ne!(pool.price(), Some(3 * PRICE_SCALE));
        pool.sync(vault_sol, vault_tokens, 50);
        assert_eq!(pool.price(), Some(3 * PRICE_SCALE));
        assert_eq!(pool.last_sync_at, 50);

        pool.sync(vault_sol, vault_tokens, 60);
        assert_eq!(pool.price(), Some(3 * PRICE_SCALE));
    }
}
