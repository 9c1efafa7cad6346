//! Transaction-line recognition.
//!
//! A line is a transaction candidate when it carries a date token and an
//! amount token. Dates are blanked out before the amount search so that
//! `04.10.2025` never counts as the amount `04.10`.

use regex::{Captures, Match, Regex};
use std::sync::OnceLock;

/// Which date/amount shapes a classifier accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierProfile {
    /// `DD.MM.YYYY` dates, plain decimal amounts (generic/Halyk exports)
    Strict,
    /// `DD.MM.YY` or `DD.MM.YYYY` dates, amounts next to a currency marker
    /// (Kaspi exports)
    Loose,
}

/// An amount found next to a currency marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkedAmount<'a> {
    /// Signed number text, e.g. `- 1 500,00`
    pub number: &'a str,
    /// Normalized currency code, e.g. `KZT`
    pub currency: &'static str,
    /// Byte range of number + marker in the searched text
    pub start: usize,
    pub end: usize,
}

fn strict_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b\d{2}\.\d{2}\.\d{4}\b").expect("strict date regex"))
}

fn any_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b\d{2}\.\d{2}\.(?:\d{4}|\d{2})\b").expect("date regex"))
}

fn decimal_amount_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[+-]?\d+[.,]\d{1,2}\b").expect("decimal amount regex"))
}

fn marked_amount_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r"(?P<number>(?:[+-][ \t]*)?\d+(?:[ \x{a0}]\d{3})*(?:[.,]\d{1,2})?)",
            r"[ \t]*(?P<currency>₸|KZT|USD|EUR|RUB|\$|€|₽)"
        ))
        .expect("marked amount regex")
    })
}

/// Map a currency marker to its code.
pub fn currency_code(marker: &str) -> &'static str {
    match marker {
        "$" | "USD" => "USD",
        "€" | "EUR" => "EUR",
        "₽" | "RUB" => "RUB",
        _ => "KZT",
    }
}

/// Blank out every date token (2- or 4-digit year) in `line`. Each date is
/// replaced by spaces of the same length, so byte offsets still line up with
/// the original.
pub fn strip_dates(line: &str) -> String {
    any_date_re()
        .replace_all(line, |caps: &Captures| " ".repeat(caps[0].len()))
        .into_owned()
}

/// First amount+currency marker in `text`, dates included in the search.
pub fn find_marked_amount(text: &str) -> Option<MarkedAmount<'_>> {
    let caps = marked_amount_re().captures(text)?;
    let whole = caps.get(0)?;
    Some(MarkedAmount {
        number: caps.name("number")?.as_str(),
        currency: currency_code(caps.name("currency")?.as_str()),
        start: whole.start(),
        end: whole.end(),
    })
}

/// Decides whether a line of extracted text is a transaction record.
#[derive(Debug, Clone, Copy)]
pub struct LineClassifier {
    profile: ClassifierProfile,
}

impl LineClassifier {
    pub const fn new(profile: ClassifierProfile) -> Self {
        Self { profile }
    }

    pub const fn strict() -> Self {
        Self::new(ClassifierProfile::Strict)
    }

    pub const fn loose() -> Self {
        Self::new(ClassifierProfile::Loose)
    }

    pub fn profile(&self) -> ClassifierProfile {
        self.profile
    }

    fn date_re(&self) -> &'static Regex {
        match self.profile {
            ClassifierProfile::Strict => strict_date_re(),
            ClassifierProfile::Loose => any_date_re(),
        }
    }

    /// First date token this profile accepts.
    pub fn find_date<'a>(&self, line: &'a str) -> Option<Match<'a>> {
        self.date_re().find(line)
    }

    /// True when `token` is exactly one date this profile accepts.
    pub fn is_date_token(&self, token: &str) -> bool {
        self.date_re()
            .find(token)
            .is_some_and(|m| m.start() == 0 && m.end() == token.len())
    }

    pub fn is_transaction_line(&self, line: &str) -> bool {
        if self.find_date(line).is_none() {
            return false;
        }

        let rest = strip_dates(line);
        match self.profile {
            ClassifierProfile::Strict => decimal_amount_re().is_match(&rest),
            ClassifierProfile::Loose => marked_amount_re().is_match(&rest),
        }
    }
}

/// True when `line` carries any date token, whatever the profile.
pub fn has_any_date(line: &str) -> bool {
    any_date_re().is_match(line)
}

/// Every date token (2- or 4-digit year) in `text`, in order.
pub fn date_tokens(text: &str) -> impl Iterator<Item = &str> {
    any_date_re().find_iter(text).map(|m| m.as_str())
}
