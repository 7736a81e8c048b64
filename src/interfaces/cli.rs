use crate::application::engine::TransferEngine;
use crate::application::registry::PixKeyRegistry;
use crate::domain::account::{Account, AccountId, Balance};
use crate::domain::ports::{LedgerStore, LedgerStoreHandle};
use crate::error::{LedgerError, Result, StorageError};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    pub db_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Provision a new account and print its identifier
    OpenAccount {
        /// Externally issued identifier; generated when omitted
        #[arg(long)]
        id: Option<AccountId>,
        /// Opening balance
        #[arg(long, default_value = "0", allow_hyphen_values = true, value_parser = parse_opening_balance)]
        balance: Decimal,
    },
    /// Move funds to another account
    Transfer {
        from: AccountId,
        to: AccountId,
        amount: Decimal,
        #[arg(long, default_value = "Transfer")]
        description: String,
    },
    /// Move funds to the account owning a pix key
    Pay {
        from: AccountId,
        key: String,
        amount: Decimal,
        #[arg(long, default_value = "Pix payment")]
        description: String,
    },
    /// Register a pix key for an account
    RegisterKey { account: AccountId, key: String },
    /// Remove a pix key from an account
    RevokeKey { account: AccountId, key: String },
    /// List the pix keys registered for an account
    Keys { account: AccountId },
    /// Current balance of an account
    Balance { account: AccountId },
    /// Statement entries for an account, newest first
    Statement { account: AccountId },
}

fn parse_opening_balance(raw: &str) -> std::result::Result<Decimal, String> {
    let value: Decimal = raw.parse().map_err(|e: rust_decimal::Error| e.to_string())?;
    if value.is_sign_negative() {
        return Err("opening balance must not be negative".to_string());
    }
    Ok(value)
}

/// Executes one command against the store and prints the outcome.
pub async fn run(command: Command, store: LedgerStoreHandle) -> Result<()> {
    let engine = TransferEngine::new(store.clone());
    let registry = PixKeyRegistry::new(store.clone());

    match command {
        Command::OpenAccount { id, balance } => {
            let account =
                Account::with_balance(id.unwrap_or_default(), Balance::new(balance));
            let id = account.id;
            if !store.insert_account(account).await? {
                return Err(LedgerError::Storage(StorageError::Backend(format!(
                    "account {id} already exists"
                ))));
            }
            println!("{id}");
        }
        Command::Transfer {
            from,
            to,
            amount,
            description,
        } => {
            let receipt = engine
                .transfer_to_account(from, to, amount, &description)
                .await?;
            println!(
                "{}",
                serde_json::to_string_pretty(&receipt).map_err(StorageError::from)?
            );
        }
        Command::Pay {
            from,
            key,
            amount,
            description,
        } => {
            let receipt = engine
                .transfer_by_alias(from, &key, amount, &description)
                .await?;
            println!(
                "{}",
                serde_json::to_string_pretty(&receipt).map_err(StorageError::from)?
            );
        }
        Command::RegisterKey { account, key } => {
            registry.register(account, &key).await?;
            println!("registered {key}");
        }
        Command::RevokeKey { account, key } => {
            registry.revoke(account, &key).await?;
            println!("revoked {key}");
        }
        Command::Keys { account } => {
            for key in registry.list(account).await? {
                println!("{key}");
            }
        }
        Command::Balance { account } => {
            println!("{}", engine.balance(account).await?);
        }
        Command::Statement { account } => {
            let entries = engine.statement(account).await?;
            println!(
                "{}",
                serde_json::to_string_pretty(&entries).map_err(StorageError::from)?
            );
        }
    }
    Ok(())
}
