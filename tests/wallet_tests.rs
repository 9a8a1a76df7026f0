// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use walletbook::models::{NewTransaction, TxKind};
use walletbook::{Ledger, MemoryStore};

fn setup() -> (Ledger<MemoryStore>, i64) {
    let mut ledger = Ledger::load(MemoryStore::new()).unwrap();
    let home = ledger.create_account("Home").unwrap();
    ledger.select_account(home.id).unwrap();
    (ledger, home.id)
}

fn tx<'a>(account_id: i64, wallet_id: i64, kind: TxKind, amount: &'a str) -> NewTransaction<'a> {
    NewTransaction {
        account_id,
        wallet_id: Some(wallet_id),
        kind,
        raw_amount: amount,
        date: "2024-01-01",
        note: None,
    }
}

#[test]
fn new_wallet_starts_at_zero() {
    let (mut ledger, home) = setup();
    let cash = ledger.create_wallet(home, " Cash ").unwrap();
    assert_eq!(cash.name, "Cash");
    assert_eq!(cash.account_id, home);
    assert_eq!(cash.balance, Decimal::ZERO);
}

#[test]
fn blank_wallet_name_is_rejected() {
    let (mut ledger, home) = setup();
    assert!(ledger.create_wallet(home, "   ").unwrap_err().is_validation());
    assert!(ledger.wallets().is_empty());
}

#[test]
fn wallet_needs_existing_account() {
    let (mut ledger, home) = setup();
    assert!(ledger.create_wallet(home + 1000, "Cash").unwrap_err().is_not_found());
    assert!(ledger.wallets().is_empty());
}

#[test]
fn delete_wallet_removes_its_transactions() {
    let (mut ledger, home) = setup();
    let cash = ledger.create_wallet(home, "Cash").unwrap();
    let bank = ledger.create_wallet(home, "Bank").unwrap();
    ledger.create_transaction(tx(home, cash.id, TxKind::Income, "100")).unwrap();
    ledger.create_transaction(tx(home, cash.id, TxKind::Expense, "30")).unwrap();
    ledger.create_transaction(tx(home, bank.id, TxKind::Income, "10")).unwrap();

    assert!(ledger.delete_wallet(cash.id).unwrap());

    assert!(ledger.wallet(cash.id).is_none());
    assert!(ledger.transactions().iter().all(|t| t.wallet_id != cash.id));
    assert_eq!(ledger.transactions().len(), 1);
    assert!(!ledger.delete_wallet(cash.id).unwrap());
}

#[test]
fn rename_wallet() {
    let (mut ledger, home) = setup();
    let cash = ledger.create_wallet(home, "Cash").unwrap();
    ledger.rename_wallet(cash.id, "Pocket").unwrap();
    assert_eq!(ledger.wallet(cash.id).unwrap().name, "Pocket");
    assert!(ledger.rename_wallet(cash.id, "").unwrap_err().is_validation());
    assert!(ledger.rename_wallet(cash.id + 50, "X").unwrap_err().is_validation());
}
