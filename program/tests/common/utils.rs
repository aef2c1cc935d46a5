use solana_program::instruction::Instruction;
use solana_program::program_option::COption;
use solana_program::program_pack::Pack;
use solana_program::pubkey::Pubkey;
use solana_program::system_program;
use solana_program_test::{BanksClientError, ProgramTest, ProgramTestContext};
use solana_sdk::account::Account;
use solana_sdk::signature::{Keypair, Signature, Signer};
use solana_sdk::transaction::Transaction;
use tiered_orderbook::instruction::create_orderbook;
use tiered_orderbook::state::{find_directory_address, find_orderbook_address, Side};

/// Seeds an initialized SPL mint into the test environment.
pub fn add_mint(program_test: &mut ProgramTest) -> Pubkey {
    let mint = Pubkey::new_unique();
    let mut mint_data = vec![0; spl_token::state::Mint::LEN];
    spl_token::state::Mint {
        mint_authority: COption::None,
        supply: 1,
        decimals: 6,
        is_initialized: true,
        freeze_authority: COption::None,
    }
    .pack_into_slice(&mut mint_data);
    program_test.add_account(
        mint,
        Account {
            lamports: 1_000_000,
            data: mint_data,
            owner: spl_token::ID,
            ..Account::default()
        },
    );
    mint
}

/// Creates the orderbook and its two directories, with the payer as authority, and
/// returns the orderbook's address.
pub async fn create_orderbook_and_accounts(
    prg_test_ctx: &mut ProgramTestContext,
    base_mint: Pubkey,
    quote_mint: Pubkey,
    tick_size: u64,
    current_price: u64,
) -> Pubkey {
    let authority = prg_test_ctx.payer.pubkey();
    let (orderbook, _) = find_orderbook_address(&authority, &tiered_orderbook::ID);
    let (bid_directory, _) = find_directory_address(&authority, Side::Bid, &tiered_orderbook::ID);
    let (ask_directory, _) = find_directory_address(&authority, Side::Ask, &tiered_orderbook::ID);

    let create_orderbook_instruction = create_orderbook(
        tiered_orderbook::ID,
        create_orderbook::Accounts {
            system_program: &system_program::ID,
            authority: &authority,
            orderbook: &orderbook,
            bid_directory: &bid_directory,
            ask_directory: &ask_directory,
            base_mint: &base_mint,
            quote_mint: &quote_mint,
        },
        create_orderbook::Params {
            tick_size,
            current_price,
        },
    );
    sign_send_instructions(prg_test_ctx, vec![create_orderbook_instruction], vec![])
        .await
        .unwrap();

    orderbook
}

// Utils
pub async fn sign_send_instructions(
    ctx: &mut ProgramTestContext,
    instructions: Vec<Instruction>,
    signers: Vec<&Keypair>,
) -> Result<Signature, BanksClientError> {
    let mut transaction = Transaction::new_with_payer(&instructions, Some(&ctx.payer.pubkey()));
    let mut payer_signers = vec![&ctx.payer];
    for s in signers {
        payer_signers.push(s);
    }
    transaction.partial_sign(&payer_signers, ctx.last_blockhash);
    let signature = transaction.signatures[0];
    ctx.banks_client.process_transaction(transaction).await?;
    Ok(signature)
}
