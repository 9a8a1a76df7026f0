// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LedgerError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub id: i64,
    pub account_id: i64,
    pub name: String,
    /// Derived from the transactions; see `balances::compute`.
    #[serde(with = "rust_decimal::serde::float", default)]
    pub balance: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Income,
    Expense,
}

impl TxKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxKind::Income => "income",
            TxKind::Expense => "expense",
        }
    }

    /// Signed amount for a user-entered value: expenses are always negative,
    /// income keeps the sign it was entered with.
    pub fn signed(&self, raw: Decimal) -> Decimal {
        match self {
            TxKind::Income => raw,
            TxKind::Expense => -raw.abs(),
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxKind {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TxKind::Income),
            "expense" => Ok(TxKind::Expense),
            other => Err(LedgerError::validation(format!(
                "Unknown transaction type '{}' (use income|expense)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    pub account_id: i64,
    pub wallet_id: i64,
    #[serde(rename = "type")]
    pub kind: TxKind,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub date: NaiveDate,
    #[serde(default)]
    pub note: Option<String>,
}

impl Transaction {
    /// The note, treating an empty string the same as no note.
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref().filter(|n| !n.trim().is_empty())
    }
}

/// Input for `Ledger::create_transaction`, carrying the raw form values.
#[derive(Debug, Clone)]
pub struct NewTransaction<'a> {
    pub account_id: i64,
    pub wallet_id: Option<i64>,
    pub kind: TxKind,
    pub raw_amount: &'a str,
    pub date: &'a str,
    pub note: Option<&'a str>,
}
