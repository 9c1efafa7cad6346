//! tenge-finance: category rules and the ledger hand-off for parsed statements

pub mod category_rules;
pub mod ledger;

pub use category_rules::{CategoryRule, RULES, categorize};
pub use ledger::{LedgerEmitter, LedgerEntry};
