//! Locale-formatted amount normalization.
//!
//! Bank exports mix `110,00`, `1,234.56`, `- 5 000,00 ₸` and friends. The
//! rules:
//!   - all whitespace is removed
//!   - a `,` followed by one or two digits and then a non-digit (or the end)
//!     is the decimal separator; any other `,` is thousands grouping
//!   - everything outside `[0-9.-]` is dropped
//!
//! Failures never propagate: the result is zero and a warning is logged.

use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::warn;

/// Parse a raw amount token into a signed decimal. Returns zero on failure.
pub fn parse_amount(raw: &str) -> Decimal {
    let cleaned = normalize(raw);

    if cleaned.is_empty() || cleaned == "-" || cleaned == "." {
        return Decimal::ZERO;
    }

    match Decimal::from_str(&cleaned) {
        Ok(value) => value,
        Err(e) => {
            warn!(raw, cleaned = %cleaned, error = %e, "unparseable amount, using 0");
            Decimal::ZERO
        }
    }
}

/// Apply the separator and stripping rules, leaving only `[0-9.-]`.
fn normalize(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let mut out = String::with_capacity(chars.len());

    for (i, &c) in chars.iter().enumerate() {
        match c {
            ',' => {
                let digits = chars[i + 1..]
                    .iter()
                    .take_while(|c| c.is_ascii_digit())
                    .count();
                if (1..=2).contains(&digits) {
                    out.push('.');
                }
            }
            '0'..='9' | '.' | '-' => out.push(c),
            _ => {}
        }
    }

    out
}
