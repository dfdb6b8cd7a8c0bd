use super::raw;
use crate::{money::Money, period::Period};
use anyhow::{Context, Result};
use std::convert::TryFrom;

/// Governance rule limiting how much of one category counts toward an item
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryLink {
    pub name: String,
    /// Always positive when set
    pub cap: Option<Money>,
    pub period: Period,
}

impl CategoryLink {
    pub fn capped(name: &str, cap: Money, period: Period) -> Self {
        CategoryLink {
            name: name.to_owned(),
            cap: cap.is_positive().then_some(cap),
            period,
        }
    }

    /// Resolves the legacy bare-name shorthand and missing fields into full links.
    ///
    /// Non-positive caps are treated as no cap.
    pub fn normalize(links: &[raw::Link]) -> Result<Vec<Self>> {
        links
            .iter()
            .map(|link| -> Result<Self> {
                let raw::Link::Rule { name, cap, period } = link else {
                    return Ok(CategoryLink::from(link.name()));
                };
                let period = period
                    .as_deref()
                    .map(str::parse::<Period>)
                    .transpose()
                    .with_context(|| format!("Bad period for category link {}", name))?
                    .unwrap_or_default();
                let cap = cap.map(Money::try_from).transpose()?;
                Ok(CategoryLink {
                    name: name.clone(),
                    cap: cap.filter(Money::is_positive),
                    period,
                })
            })
            .collect()
    }

    /// Whether the cap is enforced per bucket rather than once over all time
    pub fn is_bucketed(&self) -> bool {
        self.cap.is_some() && !self.period.is_lifetime()
    }

    /// Key of the transaction category this link governs
    pub fn key(&self) -> String {
        category_key(&self.name)
    }
}

/// Categories are matched without regard to case
pub fn category_key(category: &str) -> String {
    category.to_lowercase()
}

impl From<&str> for CategoryLink {
    fn from(name: &str) -> Self {
        CategoryLink {
            name: name.to_owned(),
            cap: None,
            period: Period::Lifetime,
        }
    }
}
