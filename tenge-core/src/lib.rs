//! tenge-core: data model shared by the statement extraction pipeline

pub mod finance;
pub mod statement;
pub mod time;

pub use finance::{Breakdown, Category, DEFAULT_CURRENCY, Direction, TransactionRecord};
pub use statement::{AccountNumbers, Statement, StatementHeader};
pub use time::{DEFAULT_TIMEZONE, today_in};
