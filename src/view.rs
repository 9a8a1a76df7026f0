// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;
use crate::store::KvStore;

/// Which top-level screen is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    AccountSelection,
    MainLedger(i64),
}

impl View {
    /// State on load: the main ledger only when the selection points at an
    /// existing account.
    pub fn resolve<S: KvStore>(ledger: &Ledger<S>) -> View {
        match ledger.selected_account() {
            Some(a) => View::MainLedger(a.id),
            None => View::AccountSelection,
        }
    }

    pub fn account_id(&self) -> Option<i64> {
        match self {
            View::AccountSelection => None,
            View::MainLedger(id) => Some(*id),
        }
    }
}

/// Tracks the active view across mutations within one session.
#[derive(Debug, Clone)]
pub struct ViewSelector {
    current: View,
}

impl ViewSelector {
    pub fn new<S: KvStore>(ledger: &Ledger<S>) -> Self {
        Self {
            current: View::resolve(ledger),
        }
    }

    pub fn current(&self) -> View {
        self.current
    }

    /// `AccountSelection -> MainLedger(id)`, persisting the selection.
    pub fn select<S: KvStore>(&mut self, ledger: &mut Ledger<S>, id: i64) -> LedgerResult<View> {
        ledger.select_account(id)?;
        self.current = View::MainLedger(id);
        Ok(self.current)
    }

    /// Explicit "switch account". The stored selection is kept, so a fresh
    /// load would return to the same ledger.
    pub fn switch_account(&mut self) -> View {
        self.current = View::AccountSelection;
        self.current
    }

    /// Re-evaluate after a mutation; drops back to account selection when the
    /// active account has disappeared.
    pub fn refresh<S: KvStore>(&mut self, ledger: &Ledger<S>) -> View {
        if let View::MainLedger(id) = self.current {
            if ledger.account(id).is_none() {
                self.current = View::AccountSelection;
            }
        }
        self.current
    }

    /// The active account id, or a validation error for screens that need one.
    pub fn require_account(&self) -> LedgerResult<i64> {
        self.current
            .account_id()
            .ok_or_else(|| LedgerError::validation("No account selected; run `account select <id>`"))
    }
}
