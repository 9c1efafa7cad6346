//! Kaspi Bank statement extractor.
//!
//! Expected extracted-text rows:
//!   04.10.25   - 110,00 ₸   Покупка   Кафе Алматы
//!   05.10.25   + 5 000,00 ₸ Пополнение
//!   С Kaspi Депозита
//!
//! A row is any line with a date, a signed amount and a currency marker. Up to
//! two following lines are folded into the description when they do not look
//! like rows themselves.

use regex::Regex;
use std::sync::OnceLock;
use tenge_core::{AccountNumbers, Statement, StatementHeader, TransactionRecord};
use tracing::{debug, info};

use super::{
    Profile, StatementExtractor, card_re, collapse_whitespace, iban_re, make_record, period_in,
};
use crate::amount::parse_amount;
use crate::classifier::{
    LineClassifier, date_tokens, find_marked_amount, has_any_date, strip_dates,
};
use crate::config::ParserConfig;
use crate::date::DateParser;

const CARD_PRODUCT: &str = "Kaspi Gold";
const MAX_CONTINUATION_LINES: usize = 2;

/// Openings of summary lines. They carry a date and a ₸ amount but are not
/// operations; rows themselves always open with their date.
const SUMMARY_PREFIXES: &[&str] = &["доступно на", "остаток", "за период", "период"];

fn client_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[А-ЯЁ][а-яё]+[ \t]+[А-ЯЁ][а-яё]+[ \t]+[А-ЯЁ][а-яё]+")
            .expect("client name regex")
    })
}

fn is_summary_line(line: &str) -> bool {
    let lower = line.trim_start().to_lowercase();
    SUMMARY_PREFIXES.iter().any(|p| lower.starts_with(p))
}

/// Parse one currency-marked row.
///
/// The first date is the operation date and a second one, if present, the
/// processing date. The description is what remains after removing every
/// date token and the amount+currency token, plus `continuation`
/// (already-joined follow-up lines).
pub fn parse_marked_line(
    line: &str,
    continuation: &str,
    dates: &DateParser,
) -> Option<TransactionRecord> {
    let mut found = date_tokens(line);
    let Some(operation) = found.next() else {
        debug!(line, "skipping line: no date token");
        return None;
    };
    let operation_date = dates.parse(operation);
    let processing_date = found.next().map(|raw| dates.parse(raw));

    let without_dates = strip_dates(line);
    let Some(amount) = find_marked_amount(&without_dates) else {
        debug!(line, "skipping line: no currency-marked amount");
        return None;
    };
    let signed = parse_amount(amount.number);

    let description = collapse_whitespace(&format!(
        "{} {} {}",
        &without_dates[..amount.start],
        &without_dates[amount.end..],
        continuation
    ));

    Some(make_record(operation_date, processing_date, description, signed, amount.currency))
}

pub struct KaspiExtractor {
    dates: DateParser,
}

impl KaspiExtractor {
    pub fn new(config: &ParserConfig) -> Self {
        Self {
            dates: DateParser::new(config.timezone),
        }
    }

    pub fn extract_header(&self, text: &str) -> StatementHeader {
        let loose = LineClassifier::loose();

        let client_name = text
            .lines()
            .filter(|line| !loose.is_transaction_line(line))
            .find_map(|line| client_name_re().find(line))
            .map(|m| m.as_str().to_string());

        let account_type = card_re()
            .find(text)
            .map(|m| format!("{CARD_PRODUCT} {}", m.as_str()));

        let mut accounts = AccountNumbers::default();
        if let Some(m) = iban_re().find(text) {
            accounts.insert("KZT", m.as_str());
        }

        let (period_start, period_end) = text
            .lines()
            .find(|line| line.to_lowercase().contains("период"))
            .map(|line| period_in(line, &self.dates))
            .unwrap_or((None, None));

        let available_balance = text
            .lines()
            .find(|line| line.to_lowercase().contains("доступно"))
            .and_then(|line| {
                let rest = strip_dates(line);
                find_marked_amount(&rest).map(|a| parse_amount(a.number))
            });

        debug!(
            client = ?client_name,
            card = ?account_type,
            account = ?accounts.kzt,
            "parsed Kaspi header"
        );

        StatementHeader {
            client_name,
            account_type,
            accounts,
            period_start,
            period_end,
            available_balance,
            ..StatementHeader::default()
        }
    }

    pub fn extract_transactions(&self, text: &str) -> Vec<TransactionRecord> {
        let loose = LineClassifier::loose();
        let lines: Vec<&str> = text.lines().map(str::trim).collect();
        let mut out = Vec::new();

        let mut i = 0;
        while i < lines.len() {
            let line = lines[i];
            i += 1;
            if line.is_empty() || !loose.is_transaction_line(line) {
                continue;
            }
            if is_summary_line(line) {
                debug!(line, "skipping summary line");
                continue;
            }

            let continuation: Vec<&str> = lines[i..]
                .iter()
                .take(MAX_CONTINUATION_LINES)
                .take_while(|next| {
                    !next.is_empty()
                        && !has_any_date(next)
                        && find_marked_amount(next).is_none()
                })
                .copied()
                .collect();
            i += continuation.len();

            debug!(line, extra = continuation.len(), "found Kaspi transaction line");
            if let Some(record) = parse_marked_line(line, &continuation.join(" "), &self.dates) {
                out.push(record);
            }
        }

        out
    }
}

impl StatementExtractor for KaspiExtractor {
    fn profile(&self) -> Profile {
        Profile::Kaspi
    }

    fn extract(&self, text: &str) -> Statement {
        info!(profile = "kaspi", chars = text.len(), "extracting statement");
        let header = self.extract_header(text);
        let transactions = self.extract_transactions(text);
        info!(count = transactions.len(), "parsed Kaspi transactions");
        Statement::new(header, transactions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use tenge_core::{Category, Direction};

    const KASPI: &str = "\
АО Kaspi Bank
Выписка по Kaspi Gold *4421
Петрова Анна Сергеевна
Номер счета: KZ92722S000012345678
за период с 01.10.25 по 31.10.25
Доступно на 31.10.25 12 345,67 ₸

Дата Сумма Операция Детали
04.10.25 - 110,00 ₸ Покупка Кафе Алматы
05.10.25 + 5 000,00 ₸ Пополнение
С Kaspi Депозита
07.10.25 - 2 350,50 ₸ Покупка
Аптека Биосфера
Алматы
Доп. строка не поглощается
08.10.25 - 1 200,00 ₸ Такси
";

    fn extractor() -> KaspiExtractor {
        KaspiExtractor::new(&ParserConfig::default())
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_single_snippet() {
        let txns = extractor().extract_transactions("04.10.25  - 110,00 ₸  Кафе Алматы");
        assert_eq!(txns.len(), 1);
        let t = &txns[0];
        assert_eq!(t.operation_date, NaiveDate::from_ymd_opt(2025, 10, 4).unwrap());
        assert_eq!(t.amount, dec("110.00"));
        assert_eq!(t.direction, Direction::Expense);
        assert_eq!(t.currency, "KZT");
        assert!(t.description.contains("Кафе Алматы"));
        assert_eq!(t.category, Category::Food);
    }

    #[test]
    fn test_header() {
        let header = extractor().extract_header(KASPI);
        assert_eq!(header.client_name.as_deref(), Some("Петрова Анна Сергеевна"));
        assert_eq!(header.account_type.as_deref(), Some("Kaspi Gold *4421"));
        assert_eq!(header.accounts.kzt.as_deref(), Some("KZ92722S000012345678"));
        assert_eq!(header.period_start, NaiveDate::from_ymd_opt(2025, 10, 1));
        assert_eq!(header.period_end, NaiveDate::from_ymd_opt(2025, 10, 31));
        assert_eq!(header.available_balance, Some(dec("12345.67")));
        assert_eq!(header.iin, None);
    }

    #[test]
    fn test_transactions_with_continuation_lines() {
        let txns = extractor().extract_transactions(KASPI);
        assert_eq!(txns.len(), 4);

        assert_eq!(txns[0].description, "Покупка Кафе Алматы");

        assert_eq!(txns[1].direction, Direction::Income);
        assert_eq!(txns[1].amount, dec("5000.00"));
        assert_eq!(txns[1].description, "Пополнение С Kaspi Депозита");

        assert_eq!(txns[2].amount, dec("2350.50"));
        assert_eq!(txns[2].description, "Покупка Аптека Биосфера Алматы");
        assert_eq!(txns[2].category, Category::Healthcare);

        assert_eq!(txns[3].description, "Такси");
        assert_eq!(txns[3].category, Category::Transport);
    }

    #[test]
    fn test_summary_line_is_not_a_transaction() {
        let txns = extractor().extract_transactions("Доступно на 31.10.25 12 345,67 ₸");
        assert!(txns.is_empty());
    }

    #[test]
    fn test_summary_words_inside_a_row_are_kept() {
        let text = "\
04.10.25 - 5 000,00 ₸ Оплата за период подписки
05.10.25 - 1 000,00 ₸ Остаток долга
Остаток на 31.10.25 6 000,00 ₸
";
        let txns = extractor().extract_transactions(text);
        assert_eq!(txns.len(), 2);
        assert_eq!(txns[0].description, "Оплата за период подписки");
        assert_eq!(txns[0].amount, dec("5000.00"));
        assert_eq!(txns[1].description, "Остаток долга");
        assert_eq!(txns[1].amount, dec("1000.00"));
    }

    #[test]
    fn test_second_date_is_processing_date_not_amount() {
        let dates = DateParser::default();
        let record = parse_marked_line("04.10.25 05.10.25 100,00 ₸ Кафе", "", &dates).unwrap();
        assert_eq!(record.amount, dec("100.00"));
        assert_eq!(record.description, "Кафе");
        assert_eq!(record.operation_date, NaiveDate::from_ymd_opt(2025, 10, 4).unwrap());
        assert_eq!(record.processing_date, NaiveDate::from_ymd_opt(2025, 10, 5).unwrap());

        let txns = extractor().extract_transactions("04.10.25 05.10.2025 - 2 500,00 ₸ Такси\n");
        assert_eq!(txns.len(), 1);
        assert_eq!(txns[0].amount, dec("2500.00"));
        assert_eq!(txns[0].direction, Direction::Expense);
    }

    #[test]
    fn test_malformed_document() {
        let statement = extractor().extract("%PDF-1.4 \u{0} мусор\n\n");
        assert!(statement.transactions.is_empty());
        assert!(statement.header.is_empty());
    }

    #[test]
    fn test_parse_marked_line_other_currency() {
        let dates = DateParser::default();
        let record = parse_marked_line("12.10.2025 Spotify 4,99 $", "", &dates).unwrap();
        assert_eq!(record.currency, "USD");
        assert_eq!(record.description, "Spotify");
        assert!(parse_marked_line("Spotify 4,99 $", "", &dates).is_none());
        assert!(parse_marked_line("12.10.2025 Spotify", "", &dates).is_none());
    }
}
