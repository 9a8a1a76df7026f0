// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use walletbook::{Ledger, cli, commands, db};

const DEFAULT_LOG_LEVEL: &str = "warn";

fn main() -> ExitCode {
    let matches = cli::build_cli().get_matches();
    let level = matches
        .get_one::<String>("log_level")
        .map_or(DEFAULT_LOG_LEVEL, String::as_str);
    init_logger(level);

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(matches: &clap::ArgMatches) -> Result<()> {
    let path = matches.get_one::<PathBuf>("db").cloned();
    let store = db::open_or_init(path.as_deref())?;
    debug!(path = ?path, "storage opened");
    let mut ledger = Ledger::load(store)?;

    match matches.subcommand() {
        Some(("init", _)) => match path {
            Some(p) => println!("Database initialized at {}", p.display()),
            None => println!("Database initialized at {}", db::db_path()?.display()),
        },
        Some(("show", sub)) => commands::overview::handle(&mut ledger, sub)?,
        Some(("account", sub)) => commands::accounts::handle(&mut ledger, sub)?,
        Some(("wallet", sub)) => commands::wallets::handle(&mut ledger, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&mut ledger, sub)?,
        Some(("currency", sub)) => commands::settings::handle(&mut ledger, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}

/// `RUST_LOG` wins; otherwise only this crate logs, at `level`.
fn init_logger(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("walletbook={}", level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
