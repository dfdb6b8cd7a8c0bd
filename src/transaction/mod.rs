pub mod raw;

use crate::money::Money;
use anyhow::{bail, Context, Error, Result};
use chrono::NaiveDate;
use std::{
    convert::{TryFrom, TryInto},
    fmt,
    str::FromStr,
};

/// Whether a transaction moved money in or out of cash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Income,
    Expense,
}

impl FromStr for Kind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s.trim().to_lowercase().as_str() {
            "income" => Kind::Income,
            "expense" => Kind::Expense,
            _ => bail!("Invalid transaction type: {}", s),
        })
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Income => f.pad("income"),
            Kind::Expense => f.pad("expense"),
        }
    }
}

/// Immutable ledger entry.
///
/// `amount` is a magnitude, the direction comes from `kind`.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub date: String,
    pub amount: Money,
    pub category: String,
    pub kind: Kind,
    pub description: String,
}

impl Transaction {
    pub fn new(date: &str, amount: Money, category: &str, kind: Kind, description: &str) -> Self {
        Transaction {
            date: date.to_owned(),
            amount,
            category: category.to_owned(),
            kind,
            description: description.to_owned(),
        }
    }

    pub fn income(date: &str, amount: Money, category: &str) -> Self {
        Self::new(date, amount, category, Kind::Income, "")
    }

    pub fn expense(date: &str, amount: Money, category: &str) -> Self {
        Self::new(date, amount, category, Kind::Expense, "")
    }

    /// Calendar date of the transaction if it can be read.
    ///
    /// Datetimes are reduced to their date part.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        let date = self.date.trim();
        date.parse()
            .ok()
            .or_else(|| date.get(..10).and_then(|d| d.parse().ok()))
    }

    /// Amount signed by direction of cash flow, income positive
    pub fn cash_flow(&self) -> Money {
        match self.kind {
            Kind::Income => self.amount,
            Kind::Expense => -self.amount,
        }
    }
}

impl TryFrom<raw::Transaction> for Transaction {
    type Error = Error;

    fn try_from(
        raw::Transaction {
            date,
            amount,
            category,
            r#type,
            description,
        }: raw::Transaction,
    ) -> Result<Self> {
        Ok(Transaction {
            date,
            amount: amount.try_into()?,
            category,
            kind: r#type.parse()?,
            description: description.unwrap_or_default(),
        })
    }
}

impl FromStr for Transaction {
    type Err = Error;

    fn from_str(doc: &str) -> Result<Self> {
        let raw: raw::Transaction = serde_yaml::from_str(doc)
            .with_context(|| format!("Failed to deserialize Transaction:\n{}", doc))?;
        raw.try_into()
            .with_context(|| format!("Failed to convert Transaction:\n{}", doc))
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            date,
            amount,
            category,
            kind,
            description,
        } = self;
        let amount = amount.to_string();
        write!(
            f,
            "{date:10} | {category:20} | {kind:7} | {amount:>12} | {description}"
        )
    }
}

#[cfg(test)]
mod transaction_tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn parse_transaction() -> Result<()> {
        let tx: Transaction = indoc! {"
            date: 2023-01-05
            amount: 500
            category: Cloud
            type: Expense
            description: AWS invoice
        "}
        .parse()?;
        assert_eq!(
            tx,
            Transaction::new("2023-01-05", Money::from(500), "Cloud", Kind::Expense, "AWS invoice")
        );
        Ok(())
    }

    #[test]
    fn parse_transaction_errs() {
        let tx: Result<Transaction> = indoc! {"
            date: 2023-01-05
            amount: 500
            category: Cloud
            type: transfer
        "}
        .parse();
        assert!(matches!(tx, Err(e) if format!("{:#}", e).contains("Invalid transaction type")));
    }

    #[test]
    fn calendar_dates() {
        let tx = |date: &str| Transaction::income(date, Money::from(1), "Misc");
        assert_eq!(
            tx("2023-02-28").calendar_date(),
            NaiveDate::from_ymd_opt(2023, 2, 28)
        );
        assert_eq!(
            tx("2023-02-28T10:15:00Z").calendar_date(),
            NaiveDate::from_ymd_opt(2023, 2, 28)
        );
        assert_eq!(tx("2023-02-30").calendar_date(), None);
        assert_eq!(tx("last tuesday").calendar_date(), None);
        assert_eq!(tx("").calendar_date(), None);
    }
}
