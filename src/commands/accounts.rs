// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::{confirmed, overview, required};
use crate::ledger::Ledger;
use crate::store::KvStore;
use crate::utils::{maybe_print_json, pretty_table};
use crate::view::{View, ViewSelector};
use anyhow::Result;
use serde::Serialize;

pub fn handle<S: KvStore>(ledger: &mut Ledger<S>, m: &clap::ArgMatches) -> Result<()> {
    if let Some(current) = apply(ledger, m)? {
        println!("{}", overview::render(ledger, current)?);
    }
    Ok(())
}

/// Run an account command; returns the view to show afterwards, if any.
pub fn apply<S: KvStore>(ledger: &mut Ledger<S>, m: &clap::ArgMatches) -> Result<Option<View>> {
    let mut view = ViewSelector::new(ledger);
    match m.subcommand() {
        Some(("add", sub)) => {
            let account = ledger.create_account(required::<String>(sub, "name")?)?;
            println!("Added account '{}' (id {})", account.name, account.id);
            return Ok(Some(View::AccountSelection));
        }
        Some(("list", sub)) => {
            let data = rows(ledger);
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                let table: Vec<Vec<String>> = data
                    .into_iter()
                    .map(|r| {
                        vec![
                            if r.selected { "*".into() } else { String::new() },
                            r.id.to_string(),
                            r.name,
                            r.created_at,
                        ]
                    })
                    .collect();
                println!("{}", pretty_table(&["", "ID", "Name", "Created"], table));
            }
            return Ok(None);
        }
        Some(("select", sub)) => {
            let id = *required::<i64>(sub, "id")?;
            view.select(ledger, id)?;
        }
        Some(("rename", sub)) => {
            let id = *required::<i64>(sub, "id")?;
            ledger.rename_account(id, required::<String>(sub, "name")?)?;
            println!("Renamed account {}", id);
        }
        Some(("rm", sub)) => {
            let id = *required::<i64>(sub, "id")?;
            if ledger.account(id).is_none() {
                println!("No account {}", id);
                return Ok(None);
            }
            let prompt = "Are you sure you want to delete this account? This will delete all associated wallets and transactions.";
            if !confirmed(sub, prompt)? {
                println!("Cancelled");
                return Ok(None);
            }
            ledger.delete_account(id)?;
            println!("Removed account {}", id);
        }
        Some(("switch", _)) => {
            ledger.clear_selection()?;
            view.switch_account();
        }
        _ => return Ok(None),
    }
    Ok(Some(view.refresh(ledger)))
}

#[derive(Debug, Serialize)]
pub struct AccountRow {
    pub id: i64,
    pub name: String,
    pub created_at: String,
    pub selected: bool,
}

pub fn rows<S: KvStore>(ledger: &Ledger<S>) -> Vec<AccountRow> {
    let selected = ledger.selected_account().map(|a| a.id);
    ledger
        .accounts()
        .iter()
        .map(|a| AccountRow {
            id: a.id,
            name: a.name.clone(),
            created_at: a.created_at.format("%Y-%m-%d %H:%M").to_string(),
            selected: selected == Some(a.id),
        })
        .collect()
}
