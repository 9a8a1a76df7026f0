// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Rendering of the two top-level views.

use crate::balances::BalanceSheet;
use crate::commands::accounts::{self, AccountRow};
use crate::commands::transactions::{self, TransactionRow};
use crate::commands::wallets::{self, WalletRow};
use crate::ledger::Ledger;
use crate::store::KvStore;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use crate::view::View;
use anyhow::Result;
use serde::Serialize;

pub fn handle<S: KvStore>(ledger: &mut Ledger<S>, m: &clap::ArgMatches) -> Result<()> {
    let view = View::resolve(ledger);
    let snap = snapshot(ledger, view)?;
    if !maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &snap)? {
        println!("{}", render(ledger, view)?);
    }
    Ok(())
}

#[derive(Debug, Serialize)]
#[serde(tag = "view", rename_all = "camelCase")]
pub enum Snapshot {
    AccountSelection {
        accounts: Vec<AccountRow>,
    },
    MainLedger {
        account_id: i64,
        account: String,
        currency: String,
        wallets: Vec<WalletRow>,
        transactions: Vec<TransactionRow>,
        total: String,
    },
}

/// Balances for `account_id`, writing them back into the wallets when it is
/// the selected account.
pub fn sheet_for<S: KvStore>(ledger: &mut Ledger<S>, account_id: i64) -> Result<BalanceSheet> {
    match ledger.refresh_balances()? {
        Some(sheet) if sheet.account_id == account_id => Ok(sheet),
        _ => Ok(ledger.balances(account_id)?),
    }
}

pub fn snapshot<S: KvStore>(ledger: &mut Ledger<S>, view: View) -> Result<Snapshot> {
    Ok(match view {
        View::AccountSelection => Snapshot::AccountSelection {
            accounts: accounts::rows(ledger),
        },
        View::MainLedger(id) => {
            let sheet = sheet_for(ledger, id)?;
            Snapshot::MainLedger {
                account_id: id,
                account: ledger
                    .account(id)
                    .map(|a| a.name.clone())
                    .unwrap_or_default(),
                currency: ledger.currency().to_string(),
                wallets: wallets::rows(&sheet, ledger.currency()),
                transactions: transactions::rows(ledger, id),
                total: format!("{:.2}", sheet.total.round_dp(2)),
            }
        }
    })
}

/// Full text rendering of `view`.
pub fn render<S: KvStore>(ledger: &mut Ledger<S>, view: View) -> Result<String> {
    Ok(match snapshot(ledger, view)? {
        Snapshot::AccountSelection { accounts } => {
            if accounts.is_empty() {
                return Ok(
                    "No accounts yet. Create one with `walletbook account add <name>`."
                        .to_string(),
                );
            }
            let rows = accounts
                .into_iter()
                .map(|a| vec![a.id.to_string(), a.name])
                .collect();
            format!(
                "Select an account\n{}",
                pretty_table(&["ID", "Account"], rows)
            )
        }
        Snapshot::MainLedger {
            account,
            currency,
            wallets,
            transactions,
            total,
            ..
        } => {
            let mut out = format!("Account: {}\n", account);
            let wallet_rows: Vec<Vec<String>> = wallets
                .into_iter()
                .map(|w| vec![w.id.to_string(), w.name, w.balance])
                .collect();
            out.push_str(&format!(
                "{}\n",
                pretty_table(&["ID", "Wallet", "Balance"], wallet_rows)
            ));
            let tx_rows: Vec<Vec<String>> = transactions
                .into_iter()
                .map(|t| vec![t.id.to_string(), t.note, t.wallet, t.date, t.amount])
                .collect();
            out.push_str(&format!(
                "{}\n",
                pretty_table(&["ID", "Note", "Wallet", "Date", "Amount"], tx_rows)
            ));
            out.push_str(&format!("Total: {} {}", total, currency));
            out
        }
    })
}

/// Total balance line for the selected account, e.g. `70.00 DZD`.
pub fn total_line<S: KvStore>(ledger: &mut Ledger<S>, account_id: i64) -> Result<String> {
    let sheet = sheet_for(ledger, account_id)?;
    Ok(fmt_money(&sheet.total, ledger.currency()))
}
