// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;
use std::io::{BufRead, Write};
use std::str::FromStr;

use crate::error::{LedgerError, LedgerResult};

pub fn parse_date(s: &str) -> LedgerResult<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return Err(LedgerError::validation("Date is required"));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
        LedgerError::validation(format!("Invalid date '{}', expected YYYY-MM-DD", s))
    })
}

/// Largest accepted absolute amount, exclusive.
pub const AMOUNT_LIMIT: Decimal = Decimal::from_parts(3567587328, 232, 0, false, 0); // 10^12

/// Amounts are stored as JSON numbers (f64); these bounds keep every accepted
/// value exact across a save and reload.
const MAX_SIGNIFICANT_DIGITS: usize = 15;
const MAX_DECIMAL_PLACES: u32 = 8;

/// Parse a user-entered amount. Accepts plain and scientific notation.
pub fn parse_amount(s: &str) -> LedgerResult<Decimal> {
    let s = s.trim();
    if s.is_empty() {
        return Err(LedgerError::validation("Amount is required"));
    }
    let d = Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .map_err(|_| LedgerError::validation(format!("Invalid amount '{}'", s)))?
        .normalize();
    if d.abs() >= AMOUNT_LIMIT {
        return Err(LedgerError::validation(format!(
            "Amount '{}' is too large (limit {})",
            s, AMOUNT_LIMIT
        )));
    }
    if d.scale() > MAX_DECIMAL_PLACES
        || d.mantissa().unsigned_abs().to_string().len() > MAX_SIGNIFICANT_DIGITS
    {
        return Err(LedgerError::validation(format!(
            "Amount '{}' has too many digits",
            s
        )));
    }
    Ok(d)
}

/// Trimmed, non-empty name, e.g. `clean_name(raw, "a wallet")`.
pub fn clean_name(raw: &str, what: &str) -> LedgerResult<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(LedgerError::validation(format!(
            "Please enter {} name",
            what
        )));
    }
    Ok(name.to_string())
}

pub fn fmt_money(d: &Decimal, ccy: &str) -> String {
    format!("{:.2} {}", d.round_dp(2), ccy)
}

/// `+12.5` / `-30` style rendering used in transaction lists.
pub fn fmt_signed(d: &Decimal) -> String {
    let sign = if d.is_sign_negative() && !d.is_zero() {
        '-'
    } else {
        '+'
    };
    format!("{}{}", sign, d.abs().normalize())
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

/// Ask a yes/no question; anything but `y`/`yes` declines.
pub fn confirm<R: BufRead, W: Write>(input: &mut R, output: &mut W, prompt: &str) -> Result<bool> {
    write!(output, "{} [y/N] ", prompt)?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_parsing() {
        assert_eq!(parse_amount(" 12.50 ").unwrap(), Decimal::new(1250, 2));
        assert_eq!(parse_amount("-3").unwrap(), Decimal::from(-3));
        assert_eq!(parse_amount("1e2").unwrap(), Decimal::from(100));
        assert!(parse_amount("").unwrap_err().is_validation());
        assert!(parse_amount("abc").unwrap_err().is_validation());
    }

    #[test]
    fn amount_bounds() {
        assert_eq!(AMOUNT_LIMIT, Decimal::from(1_000_000_000_000i64));
        assert_eq!(
            parse_amount("999999999999.99").unwrap(),
            Decimal::new(99999999999999, 2)
        );
        assert_eq!(parse_amount("0.00000001").unwrap(), Decimal::new(1, 8));
        for bad in [
            "1000000000000",
            "-1e12",
            "79228162514264337593543950335",
            "12345678901234567.89",
            "0.000000001",
            "1.23456789012345678",
        ] {
            assert!(parse_amount(bad).unwrap_err().is_validation(), "{bad}");
        }
    }

    #[test]
    fn date_parsing() {
        assert_eq!(
            parse_date("2024-01-02").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
        );
        assert!(parse_date("  ").unwrap_err().is_validation());
        assert!(parse_date("02/01/2024").unwrap_err().is_validation());
    }

    #[test]
    fn money_formatting() {
        assert_eq!(fmt_money(&Decimal::from(70), "DZD"), "70.00 DZD");
        assert_eq!(fmt_money(&Decimal::new(123456, 4), "EUR"), "12.35 EUR");
        assert_eq!(fmt_signed(&Decimal::new(-3000, 2)), "-30");
        assert_eq!(fmt_signed(&Decimal::new(125, 1)), "+12.5");
    }

    #[test]
    fn confirm_reads_answer() {
        let mut out = Vec::new();
        assert!(confirm(&mut "y\n".as_bytes(), &mut out, "Delete?").unwrap());
        assert!(!confirm(&mut "\n".as_bytes(), &mut out, "Delete?").unwrap());
        assert!(String::from_utf8(out).unwrap().starts_with("Delete? [y/N]"));
    }
}
