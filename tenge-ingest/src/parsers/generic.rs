//! Generic (Halyk-style) statement extractor.
//!
//! Expected text after PDF-to-text:
//!   ФИО: Иванов Иван Иванович
//!   ИИН: 900101300123
//!   Текущий счет KZ12601A123456789012 KZT
//!   Входящий баланс: 150 000,00 KZT
//!   Дата проведения операции   Дата обработки   Описание              Сумма
//!   01.09.2025   02.09.2025   Покупка в магазине Magnum          -2500,00 KZT
//!   Всего: ...
//!
//! When the table markers are missing or the table yields nothing, the whole
//! text is scanned line by line, first with the strict classifier and then
//! for any dated, currency-marked amount.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;
use tenge_core::{AccountNumbers, Statement, StatementHeader, TransactionRecord};
use tracing::{debug, info, warn};

use super::{Profile, StatementExtractor, card_re, iban_re, kaspi, make_record, period_in};
use crate::amount::parse_amount;
use crate::classifier::{LineClassifier, currency_code};
use crate::config::ParserConfig;
use crate::date::DateParser;

const CLIENT_NAME_LABEL: &str = "ФИО:";
const IIN_LABEL: &str = "ИИН:";
const ACCOUNT_TYPE_LABEL: &str = "Тип счета:";
const ACCOUNT_TYPE_MARKER: &str = "Текущий счет";
const INCOMING_BALANCE_LABEL: &str = "Входящий баланс:";
const OUTGOING_BALANCE_LABEL: &str = "Исходящий баланс:";
const AVAILABLE_BALANCE_LABEL: &str = "Доступная сумма:";
const STATEMENT_DATE_LABEL: &str = "Дата выписки:";
const PERIOD_LABEL: &str = "Период:";
const BALANCE_DELIMITER: &str = "KZT";

/// Header lines that can look like transactions to the whole-text scan
const HEADER_LABELS: &[&str] = &[
    INCOMING_BALANCE_LABEL,
    OUTGOING_BALANCE_LABEL,
    AVAILABLE_BALANCE_LABEL,
    STATEMENT_DATE_LABEL,
    PERIOD_LABEL,
];

fn amount_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[+-]?\d{1,3}(?:,\d{3})+(?:\.\d{1,2})?$|^[+-]?\d+[.,]\d{1,2}$")
            .expect("amount token regex")
    })
}

fn group_head_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[+-]?\d{1,3}$").expect("group head regex"))
}

/// Text after `label` up to `delimiter` or the end of the label's line,
/// trimmed. `None` when the label is absent or the value is blank.
pub fn value_after_label(text: &str, label: &str, delimiter: Option<&str>) -> Option<String> {
    let start = text.find(label)? + label.len();
    let line = text[start..].lines().next().unwrap_or("");
    let value = match delimiter.and_then(|d| line.find(d)) {
        Some(end) => &line[..end],
        None => line,
    };
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn is_currency_marker(token: &str) -> bool {
    matches!(token, "₸" | "KZT" | "$" | "USD" | "€" | "EUR" | "₽" | "RUB")
}

fn integer_digits(token: &str) -> usize {
    token
        .trim_start_matches(['+', '-'])
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .count()
}

pub struct GenericExtractor {
    dates: DateParser,
    default_currency: String,
    table_start_markers: Vec<String>,
    table_end_markers: Vec<String>,
}

impl GenericExtractor {
    pub fn new(config: &ParserConfig) -> Self {
        Self {
            dates: DateParser::new(config.timezone),
            default_currency: config.default_currency.clone(),
            table_start_markers: config.table_start_markers.clone(),
            table_end_markers: config.table_end_markers.clone(),
        }
    }

    pub fn extract_header(&self, text: &str) -> StatementHeader {
        let balance = |label: &str| {
            value_after_label(text, label, Some(BALANCE_DELIMITER)).map(|v| parse_amount(&v))
        };
        let date = |label: &str| {
            value_after_label(text, label, None).and_then(|v| self.dates.try_parse(&v))
        };

        let account_type = value_after_label(text, ACCOUNT_TYPE_LABEL, None)
            .or_else(|| value_after_label(text, ACCOUNT_TYPE_MARKER, None))
            .or_else(|| {
                text.contains(ACCOUNT_TYPE_MARKER)
                    .then(|| ACCOUNT_TYPE_MARKER.to_string())
            });

        let (period_start, period_end) = value_after_label(text, PERIOD_LABEL, None)
            .map(|v| period_in(&v, &self.dates))
            .unwrap_or((None, None));

        let header = StatementHeader {
            client_name: value_after_label(text, CLIENT_NAME_LABEL, None),
            iin: value_after_label(text, IIN_LABEL, None),
            account_type,
            accounts: self.extract_accounts(text),
            statement_date: date(STATEMENT_DATE_LABEL),
            period_start,
            period_end,
            incoming_balance: balance(INCOMING_BALANCE_LABEL),
            outgoing_balance: balance(OUTGOING_BALANCE_LABEL),
            available_balance: balance(AVAILABLE_BALANCE_LABEL),
        };

        debug!(
            client = ?header.client_name,
            iin = ?header.iin,
            account_type = ?header.account_type,
            incoming = ?header.incoming_balance,
            outgoing = ?header.outgoing_balance,
            "parsed statement header"
        );
        header
    }

    /// Account numbers keyed by the currency code printed on the same line
    /// after them. Unlabelled accounts are taken as KZT.
    fn extract_accounts(&self, text: &str) -> AccountNumbers {
        let mut accounts = AccountNumbers::default();
        for line in text.lines() {
            for m in iban_re().find_iter(line) {
                let currency = line[m.end()..]
                    .split_whitespace()
                    .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()))
                    .find(|t| matches!(*t, "KZT" | "USD" | "EUR"))
                    .unwrap_or("KZT");
                accounts.insert(currency, m.as_str());
            }
        }
        accounts
    }

    /// The slice between the first table-start marker and the first
    /// table-end marker after it.
    pub fn isolate_table<'a>(&self, text: &'a str) -> Option<&'a str> {
        let start = self
            .table_start_markers
            .iter()
            .filter_map(|m| text.find(m.as_str()))
            .min()?;
        let end = self
            .table_end_markers
            .iter()
            .filter_map(|m| text[start..].find(m.as_str()))
            .min()?;
        Some(&text[start..start + end])
    }

    pub fn extract_transactions(&self, text: &str) -> Vec<TransactionRecord> {
        let strict = LineClassifier::strict();

        match self.isolate_table(text) {
            Some(table) => {
                let records = self.parse_lines(table, &strict);
                if !records.is_empty() {
                    return records;
                }
                warn!("transaction table yielded no records, scanning all lines");
            }
            None => warn!("no bounded transaction table found, scanning all lines"),
        }

        let records = self.parse_lines(text, &strict);
        if !records.is_empty() {
            return records;
        }

        debug!("strict scan found nothing, trying currency-marked lines");
        let loose = LineClassifier::loose();
        let records: Vec<TransactionRecord> = text
            .lines()
            .map(str::trim)
            .filter(|line| loose.is_transaction_line(line))
            .filter_map(|line| kaspi::parse_marked_line(line, "", &self.dates))
            .collect();

        if records.is_empty() {
            warn!("no transaction lines recognized");
        }
        records
    }

    fn parse_lines(&self, text: &str, classifier: &LineClassifier) -> Vec<TransactionRecord> {
        text.lines()
            .filter(|line| !HEADER_LABELS.iter().any(|label| line.contains(*label)))
            .filter(|line| classifier.is_transaction_line(line))
            .filter_map(|line| self.parse_token_line(line, classifier))
            .collect()
    }

    /// Parse one row: first date token, optional processing date right after
    /// it, description, then the last amount-shaped token.
    pub fn parse_token_line(
        &self,
        line: &str,
        classifier: &LineClassifier,
    ) -> Option<TransactionRecord> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 2 {
            debug!(line, "skipping line: too few tokens");
            return None;
        }

        let Some(date_idx) = tokens.iter().position(|t| classifier.is_date_token(t)) else {
            debug!(line, "skipping line: no date token");
            return None;
        };
        let Some(amount_idx) = tokens.iter().rposition(|t| amount_token_re().is_match(t)) else {
            debug!(line, "skipping line: no amount token");
            return None;
        };
        if amount_idx <= date_idx {
            debug!(line, "skipping line: amount precedes date");
            return None;
        }

        let operation_date = self.dates.parse(tokens[date_idx]);
        let mut desc_start = date_idx + 1;
        let mut processing_date: Option<NaiveDate> = None;
        if desc_start < amount_idx && classifier.is_date_token(tokens[desc_start]) {
            processing_date = Some(self.dates.parse(tokens[desc_start]));
            desc_start += 1;
        }

        // "-5 000,00" arrives as two tokens; pull the leading groups back in.
        let mut amount_start = amount_idx;
        while amount_start > desc_start
            && integer_digits(tokens[amount_start]) == 3
            && !tokens[amount_start].starts_with(['+', '-'])
            && group_head_re().is_match(tokens[amount_start - 1])
        {
            amount_start -= 1;
        }
        if amount_start > desc_start && matches!(tokens[amount_start - 1], "-" | "+") {
            amount_start -= 1;
        }

        let signed = parse_amount(&tokens[amount_start..=amount_idx].concat());

        let description = tokens[desc_start..amount_start]
            .iter()
            .filter(|t| !card_re().is_match(t))
            .copied()
            .collect::<Vec<_>>()
            .join(" ");

        let currency = tokens[amount_idx + 1..]
            .iter()
            .find(|t| is_currency_marker(t))
            .map(|t| currency_code(t).to_string())
            .unwrap_or_else(|| self.default_currency.clone());

        let record = make_record(operation_date, processing_date, description, signed, &currency);
        Some(match tokens.iter().find_map(|t| card_re().find(t)) {
            Some(card) => record.with_card_number(card.as_str()),
            None => record,
        })
    }
}

impl StatementExtractor for GenericExtractor {
    fn profile(&self) -> Profile {
        Profile::Generic
    }

    fn extract(&self, text: &str) -> Statement {
        info!(profile = "generic", chars = text.len(), "extracting statement");
        let header = self.extract_header(text);
        let transactions = self.extract_transactions(text);
        info!(count = transactions.len(), "parsed transactions");
        Statement::new(header, transactions)
    }
}
