// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::balances::BalanceSheet;
use crate::commands::{confirmed, overview, required};
use crate::ledger::Ledger;
use crate::store::KvStore;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use crate::view::ViewSelector;
use anyhow::Result;
use serde::Serialize;

pub fn handle<S: KvStore>(ledger: &mut Ledger<S>, m: &clap::ArgMatches) -> Result<()> {
    let mut view = ViewSelector::new(ledger);
    let account_id = view.require_account()?;
    match m.subcommand() {
        Some(("add", sub)) => {
            let wallet = ledger.create_wallet(account_id, required::<String>(sub, "name")?)?;
            println!("Added wallet '{}' (id {})", wallet.name, wallet.id);
        }
        Some(("list", sub)) => {
            let sheet = overview::sheet_for(ledger, account_id)?;
            let data = rows(&sheet, ledger.currency());
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                let table = data
                    .into_iter()
                    .map(|w| vec![w.id.to_string(), w.name, w.balance])
                    .collect();
                println!("{}", pretty_table(&["ID", "Wallet", "Balance"], table));
                println!("Total: {}", overview::total_line(ledger, account_id)?);
            }
            return Ok(());
        }
        Some(("rename", sub)) => {
            let id = *required::<i64>(sub, "id")?;
            owned_wallet(ledger, account_id, id)?;
            ledger.rename_wallet(id, required::<String>(sub, "name")?)?;
            println!("Renamed wallet {}", id);
        }
        Some(("rm", sub)) => {
            let id = *required::<i64>(sub, "id")?;
            if ledger.wallet(id).is_none() {
                println!("No wallet {}", id);
                return Ok(());
            }
            owned_wallet(ledger, account_id, id)?;
            if !confirmed(
                sub,
                "Are you sure you want to delete this wallet and all its transactions?",
            )? {
                println!("Cancelled");
                return Ok(());
            }
            ledger.delete_wallet(id)?;
            println!("Removed wallet {}", id);
        }
        _ => return Ok(()),
    }
    let current = view.refresh(ledger);
    println!("{}", overview::render(ledger, current)?);
    Ok(())
}

/// Wallet commands only touch wallets of the selected account.
fn owned_wallet<S: KvStore>(ledger: &Ledger<S>, account_id: i64, id: i64) -> Result<()> {
    match ledger.wallet(id) {
        Some(w) if w.account_id != account_id => Err(anyhow::anyhow!(
            "Wallet {} belongs to another account",
            id
        )),
        _ => Ok(()),
    }
}

#[derive(Debug, Serialize)]
pub struct WalletRow {
    pub id: i64,
    pub name: String,
    pub balance: String,
}

pub fn rows(sheet: &BalanceSheet, currency: &str) -> Vec<WalletRow> {
    sheet
        .wallets
        .iter()
        .map(|w| WalletRow {
            id: w.wallet_id,
            name: w.name.clone(),
            balance: fmt_money(&w.balance, currency),
        })
        .collect()
}
