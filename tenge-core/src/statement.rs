//! The structured result of parsing one bank export document.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::finance::{Direction, TransactionRecord};

/// Account numbers printed in the header, one per currency
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountNumbers {
    pub kzt: Option<String>,
    pub usd: Option<String>,
    pub eur: Option<String>,
}

impl AccountNumbers {
    /// Store `account` under `currency`; unknown currencies are ignored.
    /// The first account seen for a currency wins.
    pub fn insert(&mut self, currency: &str, account: impl Into<String>) -> bool {
        let slot = match currency {
            "KZT" => &mut self.kzt,
            "USD" => &mut self.usd,
            "EUR" => &mut self.eur,
            _ => return false,
        };
        if slot.is_some() {
            return false;
        }
        *slot = Some(account.into());
        true
    }

    pub fn is_empty(&self) -> bool {
        self.kzt.is_none() && self.usd.is_none() && self.eur.is_none()
    }
}

/// Header block of a statement. Every field is optional: a label that is not
/// found in the document simply leaves its field empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StatementHeader {
    pub client_name: Option<String>,
    /// National identification number (ИИН)
    pub iin: Option<String>,
    pub account_type: Option<String>,
    pub accounts: AccountNumbers,
    pub statement_date: Option<NaiveDate>,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    pub incoming_balance: Option<Decimal>,
    pub outgoing_balance: Option<Decimal>,
    pub available_balance: Option<Decimal>,
}

impl StatementHeader {
    pub fn is_empty(&self) -> bool {
        *self == StatementHeader::default()
    }
}

/// One parsed statement: header plus transactions in document order
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Statement {
    pub header: StatementHeader,
    pub transactions: Vec<TransactionRecord>,
}

impl Statement {
    pub fn new(header: StatementHeader, transactions: Vec<TransactionRecord>) -> Self {
        Self {
            header,
            transactions,
        }
    }

    pub fn incomes(&self) -> impl Iterator<Item = &TransactionRecord> {
        self.transactions
            .iter()
            .filter(|t| t.direction == Direction::Income)
    }

    pub fn expenses(&self) -> impl Iterator<Item = &TransactionRecord> {
        self.transactions
            .iter()
            .filter(|t| t.direction == Direction::Expense)
    }

    pub fn is_empty(&self) -> bool {
        self.header.is_empty() && self.transactions.is_empty()
    }
}
