use crate::transaction::Transaction;
use anyhow::{Context, Error, Result};
use chrono::NaiveDate;
use std::{fmt, str::FromStr};

/// Point in time the balance sheet is valued at
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Snapshot {
    /// No cutoff, the whole ledger counts
    #[default]
    Today,
    /// Only transactions dated on or before the cutoff (`YYYY-MM-DD`).
    ///
    /// Datetimes compare by their date prefix so the whole cutoff day counts.
    AsOf(String),
}

impl Snapshot {
    pub fn as_of(date: NaiveDate) -> Self {
        Snapshot::AsOf(date.format("%Y-%m-%d").to_string())
    }

    pub fn includes(&self, tx: &Transaction) -> bool {
        match self {
            Snapshot::Today => true,
            Snapshot::AsOf(cutoff) => {
                let day = tx.date.get(..10).unwrap_or(tx.date.as_str());
                day <= cutoff.as_str()
            }
        }
    }

    /// Truncates the ledger to the snapshot, keeping ledger order
    pub fn filter<'a>(&self, txs: &'a [Transaction]) -> Vec<&'a Transaction> {
        txs.iter().filter(|tx| self.includes(tx)).collect()
    }
}

impl FromStr for Snapshot {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("today") {
            return Ok(Snapshot::Today);
        }
        let date: NaiveDate = s
            .parse()
            .with_context(|| format!("Invalid snapshot date '{}', expected YYYY-MM-DD or today", s))?;
        Ok(Snapshot::as_of(date))
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Snapshot::Today => f.pad("today"),
            Snapshot::AsOf(cutoff) => f.pad(cutoff),
        }
    }
}

#[cfg(test)]
mod snapshot_tests {
    use super::*;
    use crate::money::Money;

    fn ledger() -> Vec<Transaction> {
        vec![
            Transaction::expense("2023-02-10", Money::from(400), "Cloud"),
            Transaction::expense("2023-01-05", Money::from(500), "Cloud"),
            Transaction::expense("2023-01-31", Money::from(600), "Cloud"),
            Transaction::income("2023-03-01", Money::from(50), "Refunds"),
        ]
    }

    #[test]
    fn today_keeps_everything() {
        let txs = ledger();
        assert_eq!(Snapshot::Today.filter(&txs).len(), 4);
    }

    #[test]
    fn as_of_is_inclusive_and_ordered() -> Result<()> {
        let txs = ledger();
        let snapshot: Snapshot = "2023-01-31".parse()?;
        let dates: Vec<_> = snapshot
            .filter(&txs)
            .iter()
            .map(|tx| tx.date.as_str())
            .collect();
        assert_eq!(dates, ["2023-01-05", "2023-01-31"]);
        Ok(())
    }

    #[test]
    fn datetimes_count_on_the_cutoff_day() -> Result<()> {
        let txs = vec![
            Transaction::expense("2023-01-31T10:00:00Z", Money::from(100), "Cloud"),
            Transaction::expense("2023-02-01T00:00:00Z", Money::from(200), "Cloud"),
        ];
        let snapshot: Snapshot = "2023-01-31".parse()?;
        let dates: Vec<_> = snapshot
            .filter(&txs)
            .iter()
            .map(|tx| tx.date.as_str())
            .collect();
        assert_eq!(dates, ["2023-01-31T10:00:00Z"]);
        Ok(())
    }

    #[test]
    fn parse_snapshot() -> Result<()> {
        assert_eq!("Today".parse::<Snapshot>()?, Snapshot::Today);
        assert_eq!(
            " 2023-01-05 ".parse::<Snapshot>()?,
            Snapshot::AsOf("2023-01-05".to_string())
        );
        assert!("yesterday".parse::<Snapshot>().is_err());
        Ok(())
    }
}
