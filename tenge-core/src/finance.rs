//! Transaction record types produced by statement extraction

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Currency assumed when a statement line carries no currency marker
pub const DEFAULT_CURRENCY: &str = "KZT";

/// One normalized ledger line within a statement
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionRecord {
    /// Date the operation happened
    pub operation_date: NaiveDate,
    /// Date the bank processed it (same as `operation_date` unless stated)
    pub processing_date: NaiveDate,
    /// Free-text description as printed on the statement
    pub description: String,
    /// Absolute value, never negative
    pub amount: Decimal,
    /// ISO-ish currency code (KZT, USD, EUR, RUB)
    pub currency: String,
    /// Optional credit/debit/commission columns
    pub breakdown: Option<Breakdown>,
    /// Masked card number (`*1234`) when the line carries one
    pub card_number: Option<String>,
    /// Income or expense, from the sign of the parsed amount
    pub direction: Direction,
    /// Deterministic category
    pub category: Category,
}

/// Credit/debit/commission columns some exports print next to the amount
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Breakdown {
    pub credit: Option<Decimal>,
    pub debit: Option<Decimal>,
    pub commission: Option<Decimal>,
}

/// Money flow direction relative to the account holder
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Direction {
    #[serde(rename = "INCOME")]
    Income,
    #[serde(rename = "EXPENSE")]
    Expense,
}

impl Direction {
    /// Strictly positive amounts are income; zero and negatives are expenses.
    pub fn from_signed(amount: Decimal) -> Self {
        if amount > Decimal::ZERO {
            Direction::Income
        } else {
            Direction::Expense
        }
    }
}

/// Fixed spending/income buckets assigned by keyword rules
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    // Income
    Salary,
    BusinessIncome,
    InvestmentReturn,
    RentalIncome,
    OtherIncome,
    // Expenses
    Food,
    Transport,
    Healthcare,
    Education,
    Entertainment,
    Shopping,
    Utilities,
    Insurance,
    Subscriptions,
    Travel,
    Clothing,
    HomeMaintenance,
    OtherExpense,
}

impl Category {
    /// True for the income-side buckets
    pub fn is_income(&self) -> bool {
        matches!(
            self,
            Category::Salary
                | Category::BusinessIncome
                | Category::InvestmentReturn
                | Category::RentalIncome
                | Category::OtherIncome
        )
    }

    /// Stable upper-case code, same as the serialized form
    pub fn code(&self) -> &'static str {
        match self {
            Category::Salary => "SALARY",
            Category::BusinessIncome => "BUSINESS_INCOME",
            Category::InvestmentReturn => "INVESTMENT_RETURN",
            Category::RentalIncome => "RENTAL_INCOME",
            Category::OtherIncome => "OTHER_INCOME",
            Category::Food => "FOOD",
            Category::Transport => "TRANSPORT",
            Category::Healthcare => "HEALTHCARE",
            Category::Education => "EDUCATION",
            Category::Entertainment => "ENTERTAINMENT",
            Category::Shopping => "SHOPPING",
            Category::Utilities => "UTILITIES",
            Category::Insurance => "INSURANCE",
            Category::Subscriptions => "SUBSCRIPTIONS",
            Category::Travel => "TRAVEL",
            Category::Clothing => "CLOTHING",
            Category::HomeMaintenance => "HOME_MAINTENANCE",
            Category::OtherExpense => "OTHER_EXPENSE",
        }
    }
}

impl TransactionRecord {
    /// Build a record from a signed amount.
    ///
    /// Direction comes from the sign; the stored amount is the absolute value.
    pub fn from_signed(
        operation_date: NaiveDate,
        description: impl Into<String>,
        signed_amount: Decimal,
        currency: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            operation_date,
            processing_date: operation_date,
            description: description.into(),
            amount: signed_amount.abs(),
            currency: currency.into(),
            breakdown: None,
            card_number: None,
            direction: Direction::from_signed(signed_amount),
            category,
        }
    }

    pub fn with_processing_date(mut self, date: NaiveDate) -> Self {
        self.processing_date = date;
        self
    }

    pub fn with_breakdown(mut self, breakdown: Breakdown) -> Self {
        self.breakdown = Some(breakdown);
        self
    }

    pub fn with_card_number(mut self, card: impl Into<String>) -> Self {
        self.card_number = Some(card.into());
        self
    }

    pub fn is_expense(&self) -> bool {
        self.direction == Direction::Expense
    }

    pub fn is_income(&self) -> bool {
        self.direction == Direction::Income
    }

    /// Amount with the direction's sign re-applied
    pub fn signed_amount(&self) -> Decimal {
        match self.direction {
            Direction::Income => self.amount,
            Direction::Expense => -self.amount,
        }
    }
}
