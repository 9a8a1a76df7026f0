// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};
use std::path::PathBuf;

fn id_arg(help: &'static str) -> Arg {
    Arg::new("id")
        .required(true)
        .value_parser(value_parser!(i64))
        .help(help)
}

fn name_arg() -> Arg {
    Arg::new("name").required(true).help("Display name")
}

fn yes_flag() -> Arg {
    Arg::new("yes")
        .long("yes")
        .short('y')
        .action(ArgAction::SetTrue)
        .help("Skip the confirmation prompt")
}

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

pub fn build_cli() -> Command {
    Command::new("walletbook")
        .about("Accounts, wallets and income/expense tracking")
        .version(clap::crate_version!())
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .env("WALLETBOOK_DB")
                .value_parser(value_parser!(PathBuf))
                .help("Path to the SQLite database (defaults to the platform data dir)"),
        )
        .arg(
            Arg::new("log_level")
                .long("log-level")
                .global(true)
                .value_parser(["error", "warn", "info", "debug", "trace"])
                .help("Log verbosity when RUST_LOG is not set [default: warn]"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(json_flags(
            Command::new("show").about("Show the account list or the selected account's ledger"),
        ))
        .subcommand(
            Command::new("account")
                .about("Manage accounts")
                .subcommand_required(true)
                .subcommand(Command::new("add").arg(name_arg()))
                .subcommand(json_flags(Command::new("list")))
                .subcommand(Command::new("select").arg(id_arg("Account id")))
                .subcommand(
                    Command::new("rename")
                        .arg(id_arg("Account id"))
                        .arg(name_arg()),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete an account with its wallets and transactions")
                        .arg(id_arg("Account id"))
                        .arg(yes_flag()),
                )
                .subcommand(Command::new("switch").about("Return to account selection")),
        )
        .subcommand(
            Command::new("wallet")
                .about("Manage wallets of the selected account")
                .subcommand_required(true)
                .subcommand(Command::new("add").arg(name_arg()))
                .subcommand(json_flags(Command::new("list")))
                .subcommand(
                    Command::new("rename")
                        .arg(id_arg("Wallet id"))
                        .arg(name_arg()),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a wallet with its transactions")
                        .arg(id_arg("Wallet id"))
                        .arg(yes_flag()),
                ),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and list transactions of the selected account")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .arg(
                            Arg::new("wallet")
                                .long("wallet")
                                .value_parser(value_parser!(i64))
                                .help("Wallet id"),
                        )
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .value_parser(["income", "expense"]),
                        )
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .allow_hyphen_values(true),
                        )
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(Arg::new("note").long("note")),
                )
                .subcommand(json_flags(Command::new("list")))
                .subcommand(Command::new("rm").arg(id_arg("Transaction id"))),
        )
        .subcommand(
            Command::new("currency")
                .about("Show or change the display currency")
                .subcommand(
                    Command::new("set").arg(Arg::new("code").required(true).help("e.g. DZD, EUR")),
                ),
        )
}
