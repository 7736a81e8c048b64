mod common;

use pix_ledger::application::engine::TransferEngine;
use pix_ledger::domain::account::{AccountId, Balance};
use pix_ledger::domain::statement::Direction;
use pix_ledger::error::LedgerError;
use rust_decimal_macros::dec;

#[tokio::test]
async fn test_transfer_updates_both_balances_and_statements() {
    let x = AccountId::new();
    let y = AccountId::new();
    let store = common::seeded_store(&[(x, dec!(100)), (y, dec!(0))]).await;
    let engine = TransferEngine::new(store);

    let receipt = engine
        .transfer_to_account(x, y, dec!(40), "rent")
        .await
        .unwrap();
    assert_eq!(receipt.new_balance, Balance::new(dec!(60)));

    assert_eq!(engine.balance(x).await.unwrap(), Balance::new(dec!(60)));
    assert_eq!(engine.balance(y).await.unwrap(), Balance::new(dec!(40)));

    let payer = engine.statement(x).await.unwrap();
    assert_eq!(payer.len(), 1);
    assert_eq!(payer[0].direction, Direction::Debit);
    assert_eq!(payer[0].amount, dec!(40));
    assert_eq!(payer[0].description, "rent");
    assert_eq!(payer[0].timestamp, receipt.timestamp);

    let payee = engine.statement(y).await.unwrap();
    assert_eq!(payee.len(), 1);
    assert_eq!(payee[0].direction, Direction::Credit);
    assert_eq!(payee[0].amount, dec!(40));
    // A direct transfer carries the payer's description to both sides.
    assert_eq!(payee[0].description, "rent");
    assert_eq!(payee[0].correlation, payer[0].correlation);
}

#[tokio::test]
async fn test_insufficient_funds_aborts_without_side_effects() {
    let x = AccountId::new();
    let y = AccountId::new();
    let store = common::seeded_store(&[(x, dec!(10)), (y, dec!(0))]).await;
    let engine = TransferEngine::new(store);

    let result = engine.transfer_to_account(x, y, dec!(50), "x").await;
    assert!(matches!(
        result,
        Err(LedgerError::InsufficientFunds {
            requested,
            available,
        }) if requested == dec!(50) && available == dec!(10)
    ));

    assert_eq!(engine.balance(x).await.unwrap(), Balance::new(dec!(10)));
    assert_eq!(engine.balance(y).await.unwrap(), Balance::new(dec!(0)));
    assert!(engine.statement(x).await.unwrap().is_empty());
    assert!(engine.statement(y).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_exact_balance_transfer_succeeds() {
    let x = AccountId::new();
    let y = AccountId::new();
    let store = common::seeded_store(&[(x, dec!(25)), (y, dec!(0))]).await;
    let engine = TransferEngine::new(store);

    engine
        .transfer_to_account(x, y, dec!(25), "all in")
        .await
        .unwrap();
    assert_eq!(engine.balance(x).await.unwrap(), Balance::ZERO);
    assert_eq!(engine.balance(y).await.unwrap(), Balance::new(dec!(25)));
}

#[tokio::test]
async fn test_value_is_conserved_across_a_chain_of_transfers() {
    let a = AccountId::new();
    let b = AccountId::new();
    let c = AccountId::new();
    let store = common::seeded_store(&[(a, dec!(300)), (b, dec!(50)), (c, dec!(0))]).await;
    let engine = TransferEngine::new(store);

    engine.transfer_to_account(a, b, dec!(120), "1").await.unwrap();
    engine.transfer_to_account(b, c, dec!(70), "2").await.unwrap();
    engine.transfer_to_account(c, a, dec!(15.5), "3").await.unwrap();

    let total = engine.balance(a).await.unwrap()
        + engine.balance(b).await.unwrap()
        + engine.balance(c).await.unwrap();
    assert_eq!(total, Balance::new(dec!(350)));

    // Each completed transfer journaled exactly two entries.
    let entries = engine.statement(a).await.unwrap().len()
        + engine.statement(b).await.unwrap().len()
        + engine.statement(c).await.unwrap().len();
    assert_eq!(entries, 6);
}

#[tokio::test]
async fn test_every_transfer_gets_a_distinct_correlation() {
    let x = AccountId::new();
    let y = AccountId::new();
    let store = common::seeded_store(&[(x, dec!(100)), (y, dec!(0))]).await;
    let engine = TransferEngine::new(store);

    let first = engine.transfer_to_account(x, y, dec!(1), "a").await.unwrap();
    let second = engine.transfer_to_account(x, y, dec!(1), "b").await.unwrap();
    assert_ne!(first.correlation, second.correlation);

    let entries = engine.statement(y).await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_ne!(entries[0].correlation, entries[1].correlation);
}
