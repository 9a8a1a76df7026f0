// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashSet;
use walletbook::models::{NewTransaction, TxKind};
use walletbook::{KvStore, Ledger, LedgerError, MemoryStore};

fn setup() -> Ledger<MemoryStore> {
    Ledger::load(MemoryStore::new()).unwrap()
}

fn income<'a>(account_id: i64, wallet_id: i64, amount: &'a str) -> NewTransaction<'a> {
    NewTransaction {
        account_id,
        wallet_id: Some(wallet_id),
        kind: TxKind::Income,
        raw_amount: amount,
        date: "2024-01-01",
        note: None,
    }
}

#[test]
fn create_account_trims_name() {
    let mut ledger = setup();
    let acct = ledger.create_account("  Home  ").unwrap();
    assert_eq!(acct.name, "Home");
    assert_eq!(ledger.accounts().len(), 1);
}

#[test]
fn blank_account_name_is_rejected_without_changes() {
    let mut ledger = setup();
    ledger.create_account("Home").unwrap();
    let before = ledger.store().get("accounts").unwrap();

    for bad in ["", "   ", "\t\n"] {
        let err = ledger.create_account(bad).unwrap_err();
        assert!(err.is_validation(), "{bad:?} should be rejected");
    }
    assert_eq!(ledger.accounts().len(), 1);
    assert_eq!(ledger.store().get("accounts").unwrap(), before);
}

#[test]
fn select_unknown_account_is_not_found() {
    let mut ledger = setup();
    let err = ledger.select_account(42).unwrap_err();
    assert!(matches!(err, LedgerError::NotFound { kind: "account", id: 42 }));
    assert_eq!(ledger.selected_account_id(), None);
}

#[test]
fn delete_account_cascades() {
    let mut ledger = setup();
    let home = ledger.create_account("Home").unwrap();
    let work = ledger.create_account("Work").unwrap();
    let cash = ledger.create_wallet(home.id, "Cash").unwrap();
    let bank = ledger.create_wallet(work.id, "Bank").unwrap();
    ledger.create_transaction(income(home.id, cash.id, "100")).unwrap();
    ledger.create_transaction(income(work.id, bank.id, "5")).unwrap();
    ledger.select_account(home.id).unwrap();

    assert!(ledger.delete_account(home.id).unwrap());

    assert!(ledger.account(home.id).is_none());
    assert!(ledger.wallets().iter().all(|w| w.account_id != home.id));
    assert!(ledger.transactions().iter().all(|t| t.account_id != home.id));
    assert_eq!(ledger.selected_account_id(), None);
    // the other account is untouched
    assert_eq!(ledger.wallets().len(), 1);
    assert_eq!(ledger.transactions().len(), 1);
}

#[test]
fn delete_missing_account_is_noop() {
    let mut ledger = setup();
    ledger.create_account("Home").unwrap();
    assert!(!ledger.delete_account(999_999).unwrap());
    assert_eq!(ledger.accounts().len(), 1);
}

#[test]
fn delete_other_account_keeps_selection() {
    let mut ledger = setup();
    let home = ledger.create_account("Home").unwrap();
    let work = ledger.create_account("Work").unwrap();
    ledger.select_account(home.id).unwrap();
    ledger.delete_account(work.id).unwrap();
    assert_eq!(ledger.selected_account_id(), Some(home.id));
}

#[test]
fn rename_account() {
    let mut ledger = setup();
    let home = ledger.create_account("Home").unwrap();
    ledger.rename_account(home.id, " House ").unwrap();
    assert_eq!(ledger.account(home.id).unwrap().name, "House");

    assert!(ledger.rename_account(home.id, "  ").unwrap_err().is_validation());
    assert!(ledger.rename_account(home.id + 100, "X").unwrap_err().is_validation());
    assert_eq!(ledger.account(home.id).unwrap().name, "House");
}

#[test]
fn ids_are_unique_across_entities() {
    let mut ledger = setup();
    let a = ledger.create_account("A").unwrap();
    let b = ledger.create_account("B").unwrap();
    let w = ledger.create_wallet(a.id, "W").unwrap();
    let t = ledger.create_transaction(income(a.id, w.id, "1")).unwrap();
    let ids: HashSet<i64> = [a.id, b.id, w.id, t.id].into_iter().collect();
    assert_eq!(ids.len(), 4);
    assert!(a.id < b.id && b.id < w.id && w.id < t.id);
}
