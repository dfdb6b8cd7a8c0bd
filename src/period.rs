use anyhow::{bail, Error, Result};
use chrono::{Datelike, NaiveDate};
use std::{fmt, str::FromStr};

/// Granularity a category cap is enforced over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Period {
    Monthly,
    Quarterly,
    Yearly,
    #[default]
    Lifetime,
}

impl Period {
    /// Bucket key for grouping transactions dated `date`.
    ///
    /// Keys are only ever compared for equality, never ordered or displayed.
    /// `Lifetime` has no buckets so returns None.
    pub fn key(&self, date: NaiveDate) -> Option<String> {
        let (year, month) = (date.year(), date.month());
        match self {
            Period::Monthly => Some(format!("{year}-{month:02}")),
            Period::Quarterly => Some(format!("{year}-Q{}", (month + 2) / 3)),
            Period::Yearly => Some(format!("{year}")),
            Period::Lifetime => None,
        }
    }

    pub fn is_lifetime(&self) -> bool {
        matches!(self, Period::Lifetime)
    }
}

impl FromStr for Period {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s.trim().to_lowercase().as_str() {
            "monthly" => Period::Monthly,
            "quarterly" => Period::Quarterly,
            "yearly" => Period::Yearly,
            "lifetime" => Period::Lifetime,
            _ => bail!("Invalid period: {}", s),
        })
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Period::Monthly => "monthly",
            Period::Quarterly => "quarterly",
            Period::Yearly => "yearly",
            Period::Lifetime => "lifetime",
        };
        write!(f, "{s}")
    }
}
