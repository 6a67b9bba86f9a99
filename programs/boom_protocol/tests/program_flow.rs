// Runs the built program (target/deploy/boom_protocol.so, located through BPF_OUT_DIR)
// inside solana-program-test.

use anchor_lang::{
    prelude::{AccountMeta, Pubkey},
    solana_program::{instruction::Instruction, sysvar},
    system_program, AccountDeserialize, InstructionData, ToAccountMetas,
};
use boom_protocol::{
    BoomError, PresaleRound, RoundParams, UserDeposit, WinnerSelection, DEPOSIT_SEED,
    PRESALE_SEED, SEQUENCER_SEED,
};
use solana_program_test::{tokio, BanksClientError, ProgramTest, ProgramTestContext};
use solana_sdk::{
    account::Account,
    clock::Clock,
    instruction::InstructionError,
    signature::Keypair,
    signer::Signer,
    transaction::{Transaction, TransactionError},
};

const SOL: u64 = 1_000_000_000;
const ROUND: u64 = 1;

pub struct SetUpTest {
    pub validator: ProgramTest,
    pub authority: Keypair,
    pub depositors: Vec<Keypair>,
}

impl SetUpTest {
    pub fn new(depositors: usize) -> Self {
        let mut validator = ProgramTest::new("boom_protocol", boom_protocol::ID, None);

        let authority = Keypair::new();
        validator.add_account(
            authority.pubkey(),
            Account {
                lamports: 10 * SOL,
                ..Account::default()
            },
        );

        let depositors = (0..depositors)
            .map(|_| {
                let depositor = Keypair::new();
                validator.add_account(
                    depositor.pubkey(),
                    Account {
                        lamports: 2 * SOL,
                        ..Account::default()
                    },
                );
                depositor
            })
            .collect();

        Self {
            validator,
            authority,
            depositors,
        }
    }
}

fn sequencer_pda() -> Pubkey {
    Pubkey::find_program_address(&[SEQUENCER_SEED], &boom_protocol::ID).0
}

fn round_pda(round_id: u64) -> Pubkey {
    Pubkey::find_program_address(&[PRESALE_SEED, &round_id.to_le_bytes()], &boom_protocol::ID).0
}

fn deposit_pda(round_id: u64, depositor: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(
        &[DEPOSIT_SEED, &round_id.to_le_bytes(), depositor.as_ref()],
        &boom_protocol::ID,
    )
    .0
}

async fn send(
    context: &mut ProgramTestContext,
    ix: Instruction,
    payer: &Keypair,
    extra_signers: &[&Keypair],
) -> Result<(), BanksClientError> {
    let mut signers = vec![payer];
    signers.extend_from_slice(extra_signers);
    let tx = Transaction::new_signed_with_payer(
        &[ix],
        Some(&payer.pubkey()),
        &signers,
        context.last_blockhash,
    );
    context.banks_client.process_transaction(tx).await
}

fn custom_error(err: BanksClientError) -> Option<u32> {
    match err.unwrap() {
        TransactionError::InstructionError(_, InstructionError::Custom(code)) => Some(code),
        _ => None,
    }
}

async fn fetch<T: AccountDeserialize>(context: &mut ProgramTestContext, address: Pubkey) -> T {
    let account = context
        .banks_client
        .get_account(address)
        .await
        .unwrap()
        .unwrap();
    T::try_deserialize(&mut account.data.as_slice()).unwrap()
}

async fn lamports(context: &mut ProgramTestContext, address: Pubkey) -> u64 {
    context.banks_client.get_balance(address).await.unwrap()
}

/// SlotHashes is empty until the bank has moved past genesis.
async fn advance_slots(context: &mut ProgramTestContext, slot: u64) {
    context.warp_to_slot(slot).unwrap();
    context.last_blockhash = context.get_new_latest_blockhash().await.unwrap();
}

async fn open_round(context: &mut ProgramTestContext, authority: &Keypair, lottery_spots: u32) {
    let defaults = RoundParams::default();

    let init_ix = Instruction {
        program_id: boom_protocol::ID,
        accounts: boom_protocol::accounts::InitRoundSequencer {
            sequencer: sequencer_pda(),
            authority: authority.pubkey(),
            system_program: system_program::ID,
        }
        .to_account_metas(None),
        data: boom_protocol::instruction::InitRoundSequencer {
            default_cooldown: defaults.cooldown,
            default_lottery_spots: defaults.lottery_spots,
            default_min_deposit: defaults.min_deposit,
            default_max_deposit: defaults.max_deposit,
        }
        .data(),
    };
    send(context, init_ix, authority, &[]).await.unwrap();

    let start_ix = Instruction {
        program_id: boom_protocol::ID,
        accounts: boom_protocol::accounts::StartPresale {
            sequencer: sequencer_pda(),
            presale_round: round_pda(ROUND),
            authority: authority.pubkey(),
            system_program: system_program::ID,
        }
        .to_account_metas(None),
        data: boom_protocol::instruction::StartPresale {
            round_id: ROUND,
            cooldown: defaults.cooldown,
            lottery_spots,
            min_deposit: defaults.min_deposit,
            max_deposit: defaults.max_deposit,
        }
        .data(),
    };
    send(context, start_ix, authority, &[]).await.unwrap();
}

fn deposit_ix(depositor: &Pubkey, amount: u64) -> Instruction {
    Instruction {
        program_id: boom_protocol::ID,
        accounts: boom_protocol::accounts::DepositPresale {
            presale_round: round_pda(ROUND),
            user_deposit: deposit_pda(ROUND, depositor),
            depositor: *depositor,
            system_program: system_program::ID,
        }
        .to_account_metas(None),
        data: boom_protocol::instruction::DepositPresale { amount }.data(),
    }
}

fn end_round_ix(authority: &Pubkey, winner_indexes: Vec<u32>, batch: &[Pubkey]) -> Instruction {
    let mut accounts = boom_protocol::accounts::EndPresaleAndLottery {
        presale_round: round_pda(ROUND),
        authority: *authority,
        recent_slothashes: sysvar::slot_hashes::ID,
    }
    .to_account_metas(None);
    accounts.extend(batch.iter().map(|key| AccountMeta::new(*key, false)));

    Instruction {
        program_id: boom_protocol::ID,
        accounts,
        data: boom_protocol::instruction::EndPresaleAndLottery { winner_indexes }.data(),
    }
}

fn refund_ix(depositor: &Pubkey) -> Instruction {
    Instruction {
        program_id: boom_protocol::ID,
        accounts: boom_protocol::accounts::ClaimRefund {
            presale_round: round_pda(ROUND),
            user_deposit: deposit_pda(ROUND, depositor),
            depositor: *depositor,
        }
        .to_account_metas(None),
        data: boom_protocol::instruction::ClaimRefund {}.data(),
    }
}

#[tokio::test]
async fn operator_list_marks_batch_and_losers_refund() {
    let SetUpTest {
        validator,
        authority,
        depositors,
    } = SetUpTest::new(3);
    let mut context = validator.start_with_context().await;

    open_round(&mut context, &authority, 1).await;

    let amounts = [SOL / 10, SOL / 5, SOL / 4];
    let round_before = lamports(&mut context, round_pda(ROUND)).await;
    for (depositor, amount) in depositors.iter().zip(amounts) {
        send(&mut context, deposit_ix(&depositor.pubkey(), amount), depositor, &[])
            .await
            .unwrap();
    }
    let escrowed = lamports(&mut context, round_pda(ROUND)).await;
    assert_eq!(escrowed, round_before + amounts.iter().sum::<u64>());

    advance_slots(&mut context, 8).await;
    let batch: Vec<Pubkey> = depositors
        .iter()
        .map(|d| deposit_pda(ROUND, &d.pubkey()))
        .collect();

    // a batch entry the program does not own aborts the whole finalization
    let stray = end_round_ix(&authority.pubkey(), vec![1], &[depositors[0].pubkey()]);
    let err = send(&mut context, stray, &authority, &[]).await.unwrap_err();
    assert_eq!(custom_error(err), Some(BoomError::DepositNotOwnedByProgram.into()));
    let round: PresaleRound = fetch(&mut context, round_pda(ROUND)).await;
    assert!(!round.is_finalized);

    let end_ix = end_round_ix(&authority.pubkey(), vec![1], &batch);
    send(&mut context, end_ix, &authority, &[]).await.unwrap();

    let round: PresaleRound = fetch(&mut context, round_pda(ROUND)).await;
    assert!(round.is_finalized);
    assert_eq!(round.winner_selection, WinnerSelection::Explicit);
    assert_eq!(round.winner_positions, vec![1]);
    assert_eq!(round.winners_count, 1);
    assert_eq!(round.winner_deposits, amounts[1]);

    for (i, key) in batch.iter().enumerate() {
        let deposit: UserDeposit = fetch(&mut context, *key).await;
        assert_eq!(deposit.position, i as u32);
        assert_eq!(deposit.is_winner, i == 1);
    }

    // authority pays the fee so the loser's balance moves by the refund only
    let loser = &depositors[0];
    let loser_before = lamports(&mut context, loser.pubkey()).await;
    send(&mut context, refund_ix(&loser.pubkey()), &authority, &[loser])
        .await
        .unwrap();
    assert_eq!(lamports(&mut context, loser.pubkey()).await, loser_before + amounts[0]);
    assert_eq!(lamports(&mut context, round_pda(ROUND)).await, escrowed - amounts[0]);

    context.last_blockhash = context.get_new_latest_blockhash().await.unwrap();
    let err = send(&mut context, refund_ix(&loser.pubkey()), &authority, &[loser])
        .await
        .unwrap_err();
    assert_eq!(custom_error(err), Some(BoomError::AlreadyClaimed.into()));

    let winner = &depositors[1];
    let err = send(&mut context, refund_ix(&winner.pubkey()), &authority, &[winner])
        .await
        .unwrap_err();
    assert_eq!(custom_error(err), Some(BoomError::WinnerCannotRefund.into()));

    let withdraw_ix = Instruction {
        program_id: boom_protocol::ID,
        accounts: boom_protocol::accounts::WithdrawPresaleProceeds {
            presale_round: round_pda(ROUND),
            authority: authority.pubkey(),
        }
        .to_account_metas(None),
        data: boom_protocol::instruction::WithdrawPresaleProceeds {}.data(),
    };
    send(&mut context, withdraw_ix, &authority, &[]).await.unwrap();

    // the unclaimed refund stays escrowed with the rent floor
    assert_eq!(
        lamports(&mut context, round_pda(ROUND)).await,
        round_before + amounts[2]
    );
}

#[tokio::test]
async fn drawn_winners_are_marked_in_the_same_instruction() {
    let SetUpTest {
        validator,
        authority,
        depositors,
    } = SetUpTest::new(5);
    let mut context = validator.start_with_context().await;

    open_round(&mut context, &authority, 2).await;

    let (late, early) = depositors.split_last().unwrap();
    for depositor in early {
        send(&mut context, deposit_ix(&depositor.pubkey(), SOL / 10), depositor, &[])
            .await
            .unwrap();
    }

    advance_slots(&mut context, 16).await;
    let round: PresaleRound = fetch(&mut context, round_pda(ROUND)).await;
    let clock: Clock = context.banks_client.get_sysvar().await.unwrap();
    context.set_sysvar(&Clock {
        unix_timestamp: round.end_time,
        ..clock
    });

    let err = send(&mut context, deposit_ix(&late.pubkey(), SOL / 10), late, &[])
        .await
        .unwrap_err();
    assert_eq!(custom_error(err), Some(BoomError::RoundNotOpen.into()));

    let batch: Vec<Pubkey> = early
        .iter()
        .map(|d| deposit_pda(ROUND, &d.pubkey()))
        .collect();
    send(&mut context, end_round_ix(&authority.pubkey(), vec![], &batch), &authority, &[])
        .await
        .unwrap();

    let round: PresaleRound = fetch(&mut context, round_pda(ROUND)).await;
    assert_eq!(round.winner_selection, WinnerSelection::Draw);
    assert_eq!(round.winners_count, 2);
    assert_eq!(round.winner_positions.len(), 2);
    assert_ne!(round.lottery_seed, [0u8; 32]);

    let mut marked = 0;
    for key in &batch {
        let deposit: UserDeposit = fetch(&mut context, *key).await;
        assert_eq!(
            deposit.is_winner,
            round.winner_positions.contains(&deposit.position)
        );
        marked += u32::from(deposit.is_winner);
    }
    assert_eq!(marked, 2);
    assert_eq!(round.winner_deposits, 2 * (SOL / 10));
}
