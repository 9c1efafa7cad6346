//! Per-bank extraction strategies behind one `StatementExtractor` trait.
//!
//! - `generic`: label/table based exports (Halyk and anything unrecognized)
//! - `kaspi`: dense, currency-symbol anchored Kaspi Bank exports

pub mod generic;
pub mod kaspi;

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tenge_core::{Statement, TransactionRecord};
use tenge_finance::categorize;

use crate::classifier::date_tokens;
use crate::config::ParserConfig;
use crate::date::DateParser;

pub use generic::GenericExtractor;
pub use kaspi::KaspiExtractor;

/// Turns raw document text into a `Statement`.
///
/// Implementations never fail: unreadable lines are dropped, missing header
/// labels leave fields empty, and a hopeless document yields an empty
/// statement.
pub trait StatementExtractor: Send + Sync {
    fn profile(&self) -> Profile;

    fn extract(&self, text: &str) -> Statement;
}

/// A named extraction strategy tuned to one bank's export format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    Generic,
    Kaspi,
}

impl Profile {
    pub fn name(&self) -> &'static str {
        match self {
            Profile::Generic => "generic",
            Profile::Kaspi => "kaspi",
        }
    }

    /// Build the extractor for this profile.
    pub fn extractor(self, config: &ParserConfig) -> Box<dyn StatementExtractor> {
        match self {
            Profile::Generic => Box::new(GenericExtractor::new(config)),
            Profile::Kaspi => Box::new(KaspiExtractor::new(config)),
        }
    }
}

/// Build a categorized record from a signed amount.
pub(crate) fn make_record(
    operation_date: NaiveDate,
    processing_date: Option<NaiveDate>,
    description: String,
    signed_amount: Decimal,
    currency: &str,
) -> TransactionRecord {
    let category = categorize(&description);
    let record = TransactionRecord::from_signed(
        operation_date,
        description,
        signed_amount,
        currency,
        category,
    );
    match processing_date {
        Some(date) => record.with_processing_date(date),
        None => record,
    }
}

/// IBAN-like Kazakh account number
pub(crate) fn iban_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\bKZ\d{2}[0-9A-Z]{10,16}\b").expect("iban regex"))
}

/// Masked card number, e.g. `*4421`
pub(crate) fn card_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*\d{4}\b").expect("card regex"))
}

/// First two parseable dates in `text` as (start, end).
pub(crate) fn period_in(text: &str, dates: &DateParser) -> (Option<NaiveDate>, Option<NaiveDate>) {
    let mut found = date_tokens(text).filter_map(|t| dates.try_parse(t));
    (found.next(), found.next())
}

pub(crate) fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
