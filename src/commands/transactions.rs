// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::{overview, required};
use crate::ledger::Ledger;
use crate::models::{NewTransaction, TxKind};
use crate::store::KvStore;
use crate::utils::{fmt_signed, maybe_print_json, pretty_table};
use crate::view::ViewSelector;
use anyhow::Result;
use serde::Serialize;

pub fn handle<S: KvStore>(ledger: &mut Ledger<S>, m: &clap::ArgMatches) -> Result<()> {
    let mut view = ViewSelector::new(ledger);
    let account_id = view.require_account()?;
    match m.subcommand() {
        Some(("add", sub)) => add(ledger, account_id, sub)?,
        Some(("list", sub)) => {
            let data = rows(ledger, account_id);
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                let table = data
                    .into_iter()
                    .map(|r| vec![r.id.to_string(), r.note, r.wallet, r.date, r.amount])
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["ID", "Note", "Wallet", "Date", "Amount"], table)
                );
            }
            return Ok(());
        }
        Some(("rm", sub)) => {
            let id = *required::<i64>(sub, "id")?;
            match ledger.transaction(id).map(|t| t.account_id) {
                Some(owner) if owner != account_id => {
                    anyhow::bail!("Transaction {} belongs to another account", id)
                }
                Some(_) => {
                    ledger.delete_transaction(id)?;
                    println!("Removed transaction {}", id);
                }
                None => println!("No transaction {}", id),
            }
        }
        _ => return Ok(()),
    }
    let current = view.refresh(ledger);
    println!("{}", overview::render(ledger, current)?);
    Ok(())
}

fn add<S: KvStore>(ledger: &mut Ledger<S>, account_id: i64, sub: &clap::ArgMatches) -> Result<()> {
    let kind: TxKind = required::<String>(sub, "type")?.parse()?;
    let tx = ledger.create_transaction(NewTransaction {
        account_id,
        wallet_id: sub.get_one::<i64>("wallet").copied(),
        kind,
        raw_amount: required::<String>(sub, "amount")?,
        date: required::<String>(sub, "date")?,
        note: sub.get_one::<String>("note").map(|s| s.as_str()),
    })?;
    println!(
        "Recorded {} {} on {} (id {})",
        tx.kind,
        fmt_signed(&tx.amount),
        tx.date,
        tx.id
    );
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub note: String,
    pub wallet: String,
    pub date: String,
    pub kind: String,
    pub amount: String,
}

/// The account's transactions in insertion order.
pub fn rows<S: KvStore>(ledger: &Ledger<S>, account_id: i64) -> Vec<TransactionRow> {
    ledger
        .transactions_for(account_id)
        .map(|t| TransactionRow {
            id: t.id,
            note: t.note().unwrap_or_default().to_string(),
            wallet: ledger
                .wallet(t.wallet_id)
                .map(|w| w.name.clone())
                .unwrap_or_else(|| "N/A".to_string()),
            date: t.date.to_string(),
            kind: t.kind.to_string(),
            amount: fmt_signed(&t.amount),
        })
        .collect()
}
