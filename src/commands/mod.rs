// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod accounts;
pub mod wallets;
pub mod transactions;
pub mod overview;
pub mod settings;

use anyhow::{Context, Result};

pub(crate) fn required<'a, T>(m: &'a clap::ArgMatches, id: &str) -> Result<&'a T>
where
    T: std::any::Any + Clone + Send + Sync + 'static,
{
    m.get_one::<T>(id)
        .with_context(|| format!("Missing required argument '{}'", id))
}

/// Ask on the terminal unless `--yes` was passed.
pub(crate) fn confirmed(m: &clap::ArgMatches, prompt: &str) -> Result<bool> {
    if m.get_flag("yes") {
        return Ok(true);
    }
    let stdin = std::io::stdin();
    crate::utils::confirm(&mut stdin.lock(), &mut std::io::stdout(), prompt)
}
