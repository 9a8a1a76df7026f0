// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Wallet and account balances, derived from transactions on demand.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Transaction, Wallet};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WalletBalance {
    pub wallet_id: i64,
    pub name: String,
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceSheet {
    pub account_id: i64,
    /// In wallet insertion order.
    pub wallets: Vec<WalletBalance>,
    pub total: Decimal,
}

impl BalanceSheet {
    pub fn balance_of(&self, wallet_id: i64) -> Option<Decimal> {
        self.wallets
            .iter()
            .find(|w| w.wallet_id == wallet_id)
            .map(|w| w.balance)
    }
}

/// Sum each of the account's wallets from the account's transactions.
///
/// Transactions that belong to the account but point at a wallet outside it
/// are ignored. Sums are kept at full precision; rounding happens on display.
/// A sum that leaves the `Decimal` range is a validation error.
pub fn compute(
    account_id: i64,
    wallets: &[Wallet],
    transactions: &[Transaction],
) -> LedgerResult<BalanceSheet> {
    let mut out: Vec<WalletBalance> = wallets
        .iter()
        .filter(|w| w.account_id == account_id)
        .map(|w| WalletBalance {
            wallet_id: w.id,
            name: w.name.clone(),
            balance: Decimal::ZERO,
        })
        .collect();

    for t in transactions.iter().filter(|t| t.account_id == account_id) {
        if let Some(w) = out.iter_mut().find(|w| w.wallet_id == t.wallet_id) {
            w.balance = w
                .balance
                .checked_add(t.amount)
                .ok_or_else(|| out_of_range(&w.name))?;
        }
    }

    let total = out.iter().try_fold(Decimal::ZERO, |acc, w| {
        acc.checked_add(w.balance)
            .ok_or_else(|| out_of_range("the account total"))
    })?;
    Ok(BalanceSheet {
        account_id,
        wallets: out,
        total,
    })
}

fn out_of_range(what: &str) -> LedgerError {
    LedgerError::validation(format!("Balance of {} is out of range", what))
}
