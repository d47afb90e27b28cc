//! CTC Wallet command-line front-end
//!
//! A thin caller around `ctcwallet-core`: it collects PINs and secrets,
//! drives the wallet state, and turns failures into messages. The wallet
//! record lives in a JSON store inside `--data-dir`.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use ctcwallet_core::vault::{DEFAULT_KDF_ITERATIONS, MAX_KDF_ITERATIONS};
use ctcwallet_core::{
    AppState, FileStore, RevealedSecret, SecretType, SecretVault, VaultParams, WalletError,
    WalletService, WalletSource, WalletStatus,
};
use tracing::{debug, info};
use zeroize::Zeroizing;

/// CTC Wallet
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Directory holding the wallet store (created if missing)
    #[arg(long, env = "CTCWALLET_DATA_DIR", default_value = ".ctcwallet")]
    data_dir: PathBuf,

    /// PBKDF2 iterations for newly encrypted secrets (100000 to 1000000)
    #[arg(
        long,
        env = "CTCWALLET_KDF_ITERATIONS",
        default_value_t = DEFAULT_KDF_ITERATIONS,
        value_parser = clap::value_parser!(u32)
            .range(DEFAULT_KDF_ITERATIONS as i64..=MAX_KDF_ITERATIONS as i64)
    )]
    kdf_iterations: u32,

    /// Six-digit PIN. Read from stdin when omitted.
    #[arg(long, env = "CTCWALLET_PIN", hide_env_values = true, global = true)]
    pin: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a new wallet and print its recovery phrase
    Create,
    /// Import a wallet from a recovery phrase (read from stdin when omitted)
    ImportMnemonic {
        #[arg(long)]
        phrase: Option<String>,
    },
    /// Import a wallet from a hex private key (read from stdin when omitted)
    ImportKey {
        #[arg(long)]
        key: Option<String>,
    },
    /// Check the PIN and show the wallet summary
    Unlock,
    /// Decrypt and print the backed-up recovery phrase or key
    Reveal,
    /// Re-encrypt the secret under a new PIN
    ChangePin {
        /// New six-digit PIN. Read from stdin when omitted.
        #[arg(long)]
        new_pin: Option<String>,
    },
    /// Delete the wallet (forgot PIN). The recovery phrase is needed to restore it.
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
    /// Show whether a wallet exists
    Status,
}

/// Read one line from stdin after printing `prompt` to stderr.
fn prompt_line(prompt: &str) -> Result<Zeroizing<String>> {
    eprint!("{}: ", prompt);
    std::io::stderr().flush().ok();

    let mut line = Zeroizing::new(String::new());
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .with_context(|| format!("Failed to read {}", prompt.to_lowercase()))?;

    Ok(Zeroizing::new(line.trim().to_string()))
}

fn value_or_prompt(value: Option<String>, prompt: &str) -> Result<Zeroizing<String>> {
    match value {
        Some(v) => Ok(Zeroizing::new(v)),
        None => prompt_line(prompt),
    }
}

/// Map core errors to the messages a user should see.
fn user_message(err: &WalletError) -> String {
    match err {
        WalletError::InvalidPin => "Incorrect PIN".to_string(),
        WalletError::NotSetup => "No wallet found. Run `ctcwallet create` first.".to_string(),
        WalletError::AlreadyExists => {
            "A wallet already exists. Run `ctcwallet reset --yes` to remove it.".to_string()
        }
        WalletError::Locked => "Wallet is locked".to_string(),
        WalletError::InvalidSecret(msg) => format!("Invalid secret: {}", msg),
        e if e.is_decryption_failure() => "Unable to decrypt backup".to_string(),
        e => format!("Wallet error: {}", e),
    }
}

fn print_secret(revealed: &RevealedSecret) {
    match revealed.secret_type {
        SecretType::Mnemonic => {
            for (index, word) in revealed.words().iter().enumerate() {
                println!("{:>2}. {}", index + 1, word);
            }
        }
        SecretType::PrivateKey => println!("{}", revealed.secret.expose()),
    }
}

async fn run(args: Args, state: &AppState) -> Result<()> {
    let pin_arg = args.pin;
    let pin = |prompt: &str| value_or_prompt(pin_arg.clone(), prompt);

    match args.command {
        Command::Status => {
            let status = state.status().await;
            println!("Status: {}", status);
            if let Some(ref wallet) = *state.wallet.read().await {
                println!("Address: {}", wallet.address);
                println!("Secret type: {}", wallet.secret_type);
            }
        }
        Command::Create => {
            let pin = pin("PIN")?;
            let mnemonic = state
                .create_wallet(&pin, WalletSource::Generate)
                .await?
                .context("No recovery phrase was generated")?;

            println!("Wallet created. Write down your recovery phrase:");
            for (index, word) in mnemonic.expose().split(' ').enumerate() {
                println!("{:>2}. {}", index + 1, word);
            }
        }
        Command::ImportMnemonic { phrase } => {
            let phrase = value_or_prompt(phrase, "Recovery phrase")?;
            let pin = pin("PIN")?;
            state
                .create_wallet(&pin, WalletSource::Mnemonic(phrase))
                .await?;
            println!("Wallet imported successfully!");
        }
        Command::ImportKey { key } => {
            let key = value_or_prompt(key, "Private key")?;
            let pin = pin("PIN")?;
            state
                .create_wallet(&pin, WalletSource::PrivateKey(key))
                .await?;
            println!("Wallet imported successfully!");
        }
        Command::Unlock => {
            let pin = pin("PIN")?;
            state.unlock(&pin).await?;
            if let Some(ref wallet) = *state.wallet.read().await {
                println!("Welcome back!");
                println!("Address: {}", wallet.address);
                println!("Balance: {}", wallet.balance);
            }
        }
        Command::Reveal => {
            let pin = pin("PIN")?;
            state.unlock(&pin).await?;
            let revealed = state.reveal_secret(&pin).await?;
            print_secret(&revealed);
        }
        Command::ChangePin { new_pin } => {
            let pin = pin("Current PIN")?;
            let new_pin = value_or_prompt(new_pin, "New PIN")?;
            state.unlock(&pin).await?;
            state.change_pin(&pin, &new_pin).await?;
            println!("PIN changed");
        }
        Command::Reset { yes } => {
            if !yes {
                bail!("Refusing to reset without --yes");
            }
            state.reset().await?;
            println!("Wallet reset successfully");
        }
    }

    state.lock().await;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ctcwallet=info,ctcwallet_core=info".into()),
        )
        .init();

    let args = Args::parse();
    debug!("Using data directory {:?}", args.data_dir);

    let store = FileStore::open(&args.data_dir)
        .with_context(|| format!("Failed to open wallet store in {:?}", args.data_dir))?;
    let vault = SecretVault::with_params(VaultParams::with_iterations(args.kdf_iterations));
    let state = AppState::new(WalletService::with_vault(Arc::new(store), vault));

    let status = state
        .initialize()
        .await
        .context("Failed to load wallet")?;
    info!("Wallet status: {}", status);

    if status == WalletStatus::NotSetup
        && matches!(
            args.command,
            Command::Unlock | Command::Reveal | Command::ChangePin { .. }
        )
    {
        bail!("{}", user_message(&WalletError::NotSetup));
    }

    if let Err(e) = run(args, &state).await {
        if let Some(wallet_err) = e.downcast_ref::<WalletError>() {
            bail!("{}", user_message(wallet_err));
        }
        return Err(e);
    }
    Ok(())
}
