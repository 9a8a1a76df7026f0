// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use walletbook::{Ledger, MemoryStore, View, ViewSelector};

#[test]
fn empty_ledger_starts_in_account_selection() {
    let ledger = Ledger::load(MemoryStore::new()).unwrap();
    assert_eq!(View::resolve(&ledger), View::AccountSelection);
}

#[test]
fn no_selection_starts_in_account_selection() {
    let mut ledger = Ledger::load(MemoryStore::new()).unwrap();
    ledger.create_account("Home").unwrap();
    assert_eq!(View::resolve(&ledger), View::AccountSelection);
}

#[test]
fn stale_selection_starts_in_account_selection() {
    let store = MemoryStore::new()
        .with(
            "accounts",
            r#"[{"id":1,"name":"Home","createdAt":"2024-01-01T00:00:00Z"}]"#,
        )
        .with("selectedAccountId", "777");
    let ledger = Ledger::load(store).unwrap();
    assert_eq!(ledger.selected_account_id(), Some(777));
    assert_eq!(View::resolve(&ledger), View::AccountSelection);
}

#[test]
fn valid_selection_starts_in_main_ledger() {
    let mut ledger = Ledger::load(MemoryStore::new()).unwrap();
    let home = ledger.create_account("Home").unwrap();
    ledger.select_account(home.id).unwrap();
    let reloaded = Ledger::load(ledger.into_store()).unwrap();
    assert_eq!(View::resolve(&reloaded), View::MainLedger(home.id));
}

#[test]
fn select_switch_and_delete_transitions() {
    let mut ledger = Ledger::load(MemoryStore::new()).unwrap();
    let home = ledger.create_account("Home").unwrap();
    let mut view = ViewSelector::new(&ledger);
    assert_eq!(view.current(), View::AccountSelection);
    assert!(view.require_account().unwrap_err().is_validation());

    assert_eq!(view.select(&mut ledger, home.id).unwrap(), View::MainLedger(home.id));
    assert_eq!(view.require_account().unwrap(), home.id);

    assert_eq!(view.switch_account(), View::AccountSelection);
    // switching keeps the stored selection
    assert_eq!(ledger.selected_account_id(), Some(home.id));

    view.select(&mut ledger, home.id).unwrap();
    ledger.delete_account(home.id).unwrap();
    assert_eq!(view.refresh(&ledger), View::AccountSelection);
    assert_eq!(View::resolve(&ledger), View::AccountSelection);
}

#[test]
fn selecting_a_missing_account_stays_put() {
    let mut ledger = Ledger::load(MemoryStore::new()).unwrap();
    let mut view = ViewSelector::new(&ledger);
    assert!(view.select(&mut ledger, 5).unwrap_err().is_not_found());
    assert_eq!(view.current(), View::AccountSelection);
}

#[test]
fn refresh_keeps_main_ledger_after_unrelated_mutation() {
    let mut ledger = Ledger::load(MemoryStore::new()).unwrap();
    let home = ledger.create_account("Home").unwrap();
    let other = ledger.create_account("Other").unwrap();
    let mut view = ViewSelector::new(&ledger);
    view.select(&mut ledger, home.id).unwrap();
    ledger.delete_account(other.id).unwrap();
    assert_eq!(view.refresh(&ledger), View::MainLedger(home.id));
}
