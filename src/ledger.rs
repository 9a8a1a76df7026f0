// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The domain store: accounts, their wallets, and the wallets' transactions.
//!
//! A [`Ledger`] owns its [`KvStore`] and writes the full snapshot back to it
//! after every successful mutation. Validation always happens first, and a
//! failed write rolls the in-memory state back, so an operation that fails
//! leaves both memory and storage unchanged.

use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::balances::{self, BalanceSheet};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Account, NewTransaction, Transaction, Wallet};
use crate::store::KvStore;
use crate::utils::{clean_name, parse_amount, parse_date};

pub const KEY_ACCOUNTS: &str = "accounts";
pub const KEY_WALLETS: &str = "wallets";
pub const KEY_TRANSACTIONS: &str = "transactions";
pub const KEY_SELECTED: &str = "selectedAccountId";
pub const KEY_NEXT_ID: &str = "nextId";
pub const KEY_CURRENCY: &str = "currency";

pub const DEFAULT_CURRENCY: &str = "DZD";

pub struct Ledger<S: KvStore> {
    store: S,
    accounts: Vec<Account>,
    wallets: Vec<Wallet>,
    transactions: Vec<Transaction>,
    selected: Option<i64>,
    next_id: i64,
    currency: String,
}

/// In-memory state captured before a mutation, restored if the write fails.
struct Checkpoint {
    accounts: Vec<Account>,
    wallets: Vec<Wallet>,
    transactions: Vec<Transaction>,
    selected: Option<i64>,
    next_id: i64,
    currency: String,
}

fn read_key<S: KvStore, T: DeserializeOwned>(
    store: &S,
    key: &'static str,
) -> LedgerResult<Option<T>> {
    match store.get(key)? {
        None => Ok(None),
        Some(raw) => {
            serde_json::from_str::<Option<T>>(&raw).map_err(|source| LedgerError::Corrupt {
                key,
                source,
            })
        }
    }
}

fn encode<T: Serialize + ?Sized>(v: &T) -> LedgerResult<String> {
    Ok(serde_json::to_string(v)?)
}

impl<S: KvStore> Ledger<S> {
    /// Load a snapshot. Missing keys mean an empty ledger.
    pub fn load(store: S) -> LedgerResult<Self> {
        let accounts: Vec<Account> = read_key(&store, KEY_ACCOUNTS)?.unwrap_or_default();
        let wallets: Vec<Wallet> = read_key(&store, KEY_WALLETS)?.unwrap_or_default();
        let transactions: Vec<Transaction> =
            read_key(&store, KEY_TRANSACTIONS)?.unwrap_or_default();
        let selected: Option<i64> = read_key(&store, KEY_SELECTED)?;
        let stored_next: Option<i64> = read_key(&store, KEY_NEXT_ID)?;
        let currency: Option<String> = read_key(&store, KEY_CURRENCY)?;

        // Snapshots without a counter (random ids) continue above the largest id seen.
        let max_id = accounts
            .iter()
            .map(|a| a.id)
            .chain(wallets.iter().map(|w| w.id))
            .chain(transactions.iter().map(|t| t.id))
            .max()
            .unwrap_or(0);
        let next_id = max_id
            .checked_add(1)
            .ok_or_else(|| LedgerError::validation("Stored ids leave no room for new ones"))?
            .max(stored_next.unwrap_or(1));

        if let Some(id) = selected {
            if !accounts.iter().any(|a| a.id == id) {
                warn!(account_id = id, "selected account no longer exists");
            }
        }
        debug!(
            accounts = accounts.len(),
            wallets = wallets.len(),
            transactions = transactions.len(),
            "ledger loaded"
        );

        Ok(Self {
            store,
            accounts,
            wallets,
            transactions,
            selected,
            next_id,
            currency: currency.unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
        })
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            accounts: self.accounts.clone(),
            wallets: self.wallets.clone(),
            transactions: self.transactions.clone(),
            selected: self.selected,
            next_id: self.next_id,
            currency: self.currency.clone(),
        }
    }

    /// Persist the mutated state, or put `saved` back if the store refuses it.
    fn commit(&mut self, saved: Checkpoint) -> LedgerResult<()> {
        if let Err(e) = self.persist() {
            warn!(error = %e, "write failed, rolling back");
            self.accounts = saved.accounts;
            self.wallets = saved.wallets;
            self.transactions = saved.transactions;
            self.selected = saved.selected;
            self.next_id = saved.next_id;
            self.currency = saved.currency;
            return Err(e);
        }
        Ok(())
    }

    fn persist(&mut self) -> LedgerResult<()> {
        let entries = vec![
            (KEY_ACCOUNTS, encode(&self.accounts)?),
            (KEY_WALLETS, encode(&self.wallets)?),
            (KEY_TRANSACTIONS, encode(&self.transactions)?),
            (KEY_SELECTED, encode(&self.selected)?),
            (KEY_NEXT_ID, encode(&self.next_id)?),
            (KEY_CURRENCY, encode(&self.currency)?),
        ];
        self.store.set_many(entries)?;
        debug!("ledger persisted");
        Ok(())
    }

    fn fresh_id(&mut self) -> LedgerResult<i64> {
        let id = self.next_id;
        self.next_id = id
            .checked_add(1)
            .ok_or_else(|| LedgerError::validation("No ids left to assign"))?;
        Ok(id)
    }

    // --- reads ---

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn wallets(&self) -> &[Wallet] {
        &self.wallets
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// The raw selection pointer; may be dangling after a stale load.
    pub fn selected_account_id(&self) -> Option<i64> {
        self.selected
    }

    /// The selected account, if the pointer resolves.
    pub fn selected_account(&self) -> Option<&Account> {
        self.selected.and_then(|id| self.account(id))
    }

    pub fn account(&self, id: i64) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    pub fn wallet(&self, id: i64) -> Option<&Wallet> {
        self.wallets.iter().find(|w| w.id == id)
    }

    pub fn transaction(&self, id: i64) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn wallets_for(&self, account_id: i64) -> impl Iterator<Item = &Wallet> {
        self.wallets.iter().filter(move |w| w.account_id == account_id)
    }

    pub fn transactions_for(&self, account_id: i64) -> impl Iterator<Item = &Transaction> {
        self.transactions
            .iter()
            .filter(move |t| t.account_id == account_id)
    }

    pub fn balances(&self, account_id: i64) -> LedgerResult<BalanceSheet> {
        balances::compute(account_id, &self.wallets, &self.transactions)
    }

    /// Recompute the stored `balance` of the selected account's wallets.
    /// `None` when no account is selected.
    pub fn refresh_balances(&mut self) -> LedgerResult<Option<BalanceSheet>> {
        let Some(account_id) = self.selected_account().map(|a| a.id) else {
            return Ok(None);
        };
        let sheet = self.balances(account_id)?;
        for w in self.wallets.iter_mut().filter(|w| w.account_id == account_id) {
            if let Some(b) = sheet.balance_of(w.id) {
                w.balance = b;
            }
        }
        Ok(Some(sheet))
    }

    // --- accounts ---

    pub fn create_account(&mut self, name: &str) -> LedgerResult<Account> {
        let name = clean_name(name, "an account")?;
        let saved = self.checkpoint();
        let account = Account {
            id: self.fresh_id()?,
            name,
            created_at: Utc::now(),
        };
        self.accounts.push(account.clone());
        self.commit(saved)?;
        info!(account_id = account.id, name = %account.name, "account created");
        Ok(account)
    }

    pub fn select_account(&mut self, id: i64) -> LedgerResult<()> {
        if self.account(id).is_none() {
            return Err(LedgerError::NotFound { kind: "account", id });
        }
        let saved = self.checkpoint();
        self.selected = Some(id);
        self.commit(saved)?;
        info!(account_id = id, "account selected");
        Ok(())
    }

    pub fn clear_selection(&mut self) -> LedgerResult<()> {
        let saved = self.checkpoint();
        self.selected = None;
        self.commit(saved)
    }

    /// Remove an account with all of its wallets and transactions.
    /// Returns `false` when there was nothing to delete.
    pub fn delete_account(&mut self, id: i64) -> LedgerResult<bool> {
        if self.account(id).is_none() {
            return Ok(false);
        }
        let saved = self.checkpoint();
        self.accounts.retain(|a| a.id != id);
        self.wallets.retain(|w| w.account_id != id);
        self.transactions.retain(|t| t.account_id != id);
        if self.selected == Some(id) {
            self.selected = None;
        }
        self.commit(saved)?;
        info!(account_id = id, "account deleted");
        Ok(true)
    }

    pub fn rename_account(&mut self, id: i64, new_name: &str) -> LedgerResult<()> {
        let name = clean_name(new_name, "an account")?;
        let saved = self.checkpoint();
        let account = self
            .accounts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| LedgerError::validation(format!("Account {} does not exist", id)))?;
        account.name = name;
        self.commit(saved)?;
        info!(account_id = id, "account renamed");
        Ok(())
    }

    // --- wallets ---

    pub fn create_wallet(&mut self, account_id: i64, name: &str) -> LedgerResult<Wallet> {
        let name = clean_name(name, "a wallet")?;
        if self.account(account_id).is_none() {
            return Err(LedgerError::NotFound {
                kind: "account",
                id: account_id,
            });
        }
        let saved = self.checkpoint();
        let wallet = Wallet {
            id: self.fresh_id()?,
            account_id,
            name,
            balance: Default::default(),
        };
        self.wallets.push(wallet.clone());
        self.commit(saved)?;
        info!(wallet_id = wallet.id, account_id, "wallet created");
        Ok(wallet)
    }

    /// Remove a wallet and every transaction recorded against it.
    pub fn delete_wallet(&mut self, id: i64) -> LedgerResult<bool> {
        if self.wallet(id).is_none() {
            return Ok(false);
        }
        let saved = self.checkpoint();
        self.wallets.retain(|w| w.id != id);
        self.transactions.retain(|t| t.wallet_id != id);
        self.commit(saved)?;
        info!(wallet_id = id, "wallet deleted");
        Ok(true)
    }

    pub fn rename_wallet(&mut self, id: i64, new_name: &str) -> LedgerResult<()> {
        let name = clean_name(new_name, "a wallet")?;
        let saved = self.checkpoint();
        let wallet = self
            .wallets
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or_else(|| LedgerError::validation(format!("Wallet {} does not exist", id)))?;
        wallet.name = name;
        self.commit(saved)?;
        info!(wallet_id = id, "wallet renamed");
        Ok(())
    }

    // --- transactions ---

    pub fn create_transaction(&mut self, new: NewTransaction<'_>) -> LedgerResult<Transaction> {
        let raw = parse_amount(new.raw_amount)?;
        let date = parse_date(new.date)?;
        let wallet_id = new
            .wallet_id
            .ok_or_else(|| LedgerError::validation("Please select a wallet"))?;
        let wallet = self.wallet(wallet_id).ok_or(LedgerError::NotFound {
            kind: "wallet",
            id: wallet_id,
        })?;
        if wallet.account_id != new.account_id {
            return Err(LedgerError::validation(format!(
                "Wallet {} does not belong to account {}",
                wallet_id, new.account_id
            )));
        }
        let note = new
            .note
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        let saved = self.checkpoint();
        let tx = Transaction {
            id: self.fresh_id()?,
            account_id: new.account_id,
            wallet_id,
            kind: new.kind,
            amount: new.kind.signed(raw),
            date,
            note,
        };
        self.transactions.push(tx.clone());
        self.commit(saved)?;
        info!(tx_id = tx.id, wallet_id, amount = %tx.amount, "transaction recorded");
        Ok(tx)
    }

    pub fn delete_transaction(&mut self, id: i64) -> LedgerResult<bool> {
        if self.transaction(id).is_none() {
            return Ok(false);
        }
        let saved = self.checkpoint();
        self.transactions.retain(|t| t.id != id);
        self.commit(saved)?;
        info!(tx_id = id, "transaction deleted");
        Ok(true)
    }

    // --- settings ---

    pub fn set_currency(&mut self, code: &str) -> LedgerResult<()> {
        let code = code.trim();
        if code.is_empty() || code.len() > 8 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(LedgerError::validation(format!(
                "Invalid currency code '{}'",
                code
            )));
        }
        let saved = self.checkpoint();
        self.currency = code.to_uppercase();
        self.commit(saved)
    }
}
