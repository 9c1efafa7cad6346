//! Ledger hand-off: flattens a parsed `Statement` into rows tagged with the
//! owning user, ready for whatever persists them.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;
use tenge_core::{Category, Direction, Statement, TransactionRecord};
use tracing::{info, warn};

use crate::category_rules::categorize;

/// A durable ledger row derived from one `TransactionRecord`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerEntry {
    pub owner_id: String,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub currency: String,
    pub direction: Direction,
    pub category: Category,
    pub description: String,
}

impl LedgerEntry {
    /// Build a row for `owner_id`.
    ///
    /// Records still in the catch-all bucket get one more pass through the
    /// category rules; any other category is kept as assigned.
    pub fn from_record(record: &TransactionRecord, owner_id: &str) -> Self {
        let category = match record.category {
            Category::OtherExpense => categorize(&record.description),
            assigned => assigned,
        };

        Self {
            owner_id: owner_id.to_string(),
            date: record.operation_date,
            amount: record.amount,
            currency: record.currency.clone(),
            direction: record.direction,
            category,
            description: record.description.clone(),
        }
    }
}

/// Emits ledger rows from parsed statements
pub struct LedgerEmitter;

impl LedgerEmitter {
    /// One entry per transaction, in statement order.
    pub fn to_entries(statement: &Statement, owner_id: &str) -> Vec<LedgerEntry> {
        if statement.transactions.is_empty() {
            warn!("statement has no transactions to hand off");
            return Vec::new();
        }

        let entries: Vec<LedgerEntry> = statement
            .transactions
            .iter()
            .map(|record| LedgerEntry::from_record(record, owner_id))
            .collect();

        info!(count = entries.len(), owner = owner_id, "converted transactions to ledger entries");
        entries
    }

    /// Write entries as CSV with a header row.
    pub fn write_csv<W: Write>(entries: &[LedgerEntry], writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        for entry in entries {
            wtr.serialize(entry).context("serializing ledger entry")?;
        }
        wtr.flush().context("flushing ledger csv")?;
        Ok(())
    }
}
