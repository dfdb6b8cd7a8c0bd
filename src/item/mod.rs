pub mod link;
pub mod raw;

use crate::money::Money;
use anyhow::{bail, Context, Error, Result};
use async_std::fs;
use link::CategoryLink;
use num_traits::Zero;
use std::{
    convert::TryFrom,
    fmt,
    ops::Deref,
    str::FromStr,
};

pub type ItemId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemType {
    Asset,
    Liability,
}

impl FromStr for ItemType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s.trim().to_lowercase().as_str() {
            "asset" => ItemType::Asset,
            "liability" => ItemType::Liability,
            _ => bail!("Invalid item type: {}", s),
        })
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemType::Asset => f.pad("asset"),
            ItemType::Liability => f.pad("liability"),
        }
    }
}

/// Case-insensitive description filter shared by all of an item's categories
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Keywords(Vec<String>);

impl Keywords {
    /// Passes everything when there are no keywords
    pub fn matches(&self, description: &str) -> bool {
        if self.0.is_empty() {
            return true;
        }
        let description = description.to_lowercase();
        self.0.iter().any(|keyword| description.contains(keyword))
    }
}

impl From<&str> for Keywords {
    fn from(list: &str) -> Self {
        Keywords(
            list.split(',')
                .map(|keyword| keyword.trim().to_lowercase())
                .filter(|keyword| !keyword.is_empty())
                .collect(),
        )
    }
}

/// Everything the valuation pipeline needs to compute an item
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Calculation {
    pub initial_value: Money,
    pub links: Vec<CategoryLink>,
    pub keywords: Keywords,
    /// Ignored unless positive
    pub max_value: Option<Money>,
}

/// Where an item's value comes from, never both
#[derive(Debug, Clone, PartialEq)]
pub enum Basis {
    Manual(Money),
    Calculated(Calculation),
}

/// A balance sheet line item
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub item_type: ItemType,
    pub basis: Basis,
}

impl Item {
    pub fn manual(id: &str, name: &str, item_type: ItemType, value: Money) -> Self {
        Item {
            id: id.to_owned(),
            name: name.to_owned(),
            item_type,
            basis: Basis::Manual(value),
        }
    }

    pub fn calculated(id: &str, name: &str, item_type: ItemType, calc: Calculation) -> Self {
        Item {
            id: id.to_owned(),
            name: name.to_owned(),
            item_type,
            basis: Basis::Calculated(calc),
        }
    }
}

impl TryFrom<raw::Item> for Item {
    type Error = Error;

    fn try_from(
        raw::Item {
            id,
            name,
            r#type,
            is_calculated,
            value,
            initial_value,
            linked_categories,
            linked_keywords,
            max_value,
        }: raw::Item,
    ) -> Result<Self> {
        let basis = if is_calculated {
            Basis::Calculated(Calculation {
                initial_value: initial_value
                    .map(Money::try_from)
                    .transpose()?
                    .unwrap_or_else(Money::zero),
                links: CategoryLink::normalize(&linked_categories)?,
                keywords: linked_keywords.as_deref().map(Keywords::from).unwrap_or_default(),
                max_value: max_value.map(Money::try_from).transpose()?,
            })
        } else {
            Basis::Manual(Money::try_from(
                value.context("Value required for manual Item")?,
            )?)
        };
        Ok(Item {
            item_type: r#type.parse()?,
            id,
            name,
            basis,
        })
    }
}

/// The configured balance sheet items in declaration order
#[derive(Debug, Clone, Default)]
pub struct Items(Vec<Item>);

impl Items {
    pub async fn from_file(file: &str) -> Result<Self> {
        let doc = fs::read_to_string(file)
            .await
            .with_context(|| format!("Failed to read Items from {}", file))?;
        doc.parse()
    }
}

impl Deref for Items {
    type Target = [Item];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromStr for Items {
    type Err = Error;

    fn from_str(doc: &str) -> Result<Self> {
        let raw_items: Vec<raw::Item> = serde_yaml::from_str(doc)
            .with_context(|| format!("Failed to deserialize Items:\n{}", doc))?;
        let items = raw_items
            .into_iter()
            .map(|raw_item| {
                let id = raw_item.id.clone();
                Item::try_from(raw_item)
                    .with_context(|| format!("Failed to convert Item: {}", id))
            })
            .collect::<Result<Vec<Item>>>()?;
        Ok(Items(items))
    }
}

#[cfg(test)]
mod item_tests {
    use super::*;
    use crate::period::Period;
    use indoc::indoc;

    #[test]
    fn parse_items() -> Result<()> {
        let items: Items = indoc! {"
            - id: infra
              name: Infrastructure
              type: asset
              isCalculated: true
              initialValue: 250
              linkedCategories:
                - Cloud
                - name: Contractors
                  cap: 10000
                  period: monthly
              linkedKeywords: 'aws, Azure ,'
              maxValue: 50000
            - id: car
              name: Car
              type: Asset
              value: 12000
        "}
        .parse()?;
        assert_eq!(items.len(), 2);
        assert_eq!(
            items[0],
            Item::calculated(
                "infra",
                "Infrastructure",
                ItemType::Asset,
                Calculation {
                    initial_value: Money::from(250),
                    links: vec![
                        CategoryLink::from("Cloud"),
                        CategoryLink::capped("Contractors", Money::from(10000), Period::Monthly),
                    ],
                    keywords: Keywords(vec!["aws".to_string(), "azure".to_string()]),
                    max_value: Some(Money::from(50000)),
                }
            )
        );
        assert_eq!(
            items[1],
            Item::manual("car", "Car", ItemType::Asset, Money::from(12000))
        );
        Ok(())
    }

    #[test]
    fn calculated_defaults() -> Result<()> {
        let items: Items = indoc! {"
            - id: loan
              name: Loan
              type: liability
              isCalculated: true
        "}
        .parse()?;
        assert_eq!(
            items[0].basis,
            Basis::Calculated(Calculation::default())
        );
        Ok(())
    }

    #[test]
    fn manual_item_requires_value() {
        let items: Result<Items> = indoc! {"
            - id: car
              name: Car
              type: asset
        "}
        .parse();
        assert!(matches!(items, Err(e) if format!("{:#}", e).contains("Value required")));
    }

    #[test]
    fn bad_item_type() {
        let items: Result<Items> = indoc! {"
            - id: car
              name: Car
              type: equity
              value: 1
        "}
        .parse();
        assert!(matches!(items, Err(e) if format!("{:#}", e).contains("Invalid item type")));
    }

    #[test]
    fn keyword_matching() {
        let keywords = Keywords::from("aws, gcp");
        assert!(keywords.matches("Monthly AWS bill"));
        assert!(keywords.matches("gcp credits"));
        assert!(!keywords.matches("Azure"));
        assert!(Keywords::from(" , ").matches("anything"));
        assert!(Keywords::default().matches(""));
    }
}
