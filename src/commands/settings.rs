// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::required;
use crate::ledger::Ledger;
use crate::store::KvStore;
use anyhow::Result;

pub fn handle<S: KvStore>(ledger: &mut Ledger<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            ledger.set_currency(required::<String>(sub, "code")?)?;
            println!("Display currency set to {}", ledger.currency());
        }
        _ => println!("{}", ledger.currency()),
    }
    Ok(())
}
