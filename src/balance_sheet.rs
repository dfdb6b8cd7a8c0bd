use crate::{
    item::{Item, ItemType},
    money::Money,
    valuation::Valuations,
};
use num_traits::Zero;
use std::fmt;

/// A valued line of the balance sheet
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub name: String,
    pub item_type: ItemType,
    pub value: Money,
}

/// Totals for a set of valued items plus the cash position of the ledger.
///
/// Positive cash is an asset, an overdrawn balance is a liability.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceSheet {
    pub lines: Vec<Line>,
    pub cash: Money,
}

impl BalanceSheet {
    pub fn new(items: &[Item], valuations: &Valuations, cash: Money) -> Self {
        let lines = items
            .iter()
            .filter_map(|item| {
                valuations.get(&item.id).map(|value| Line {
                    name: item.name.clone(),
                    item_type: item.item_type,
                    value: *value,
                })
            })
            .collect();
        BalanceSheet { lines, cash }
    }

    fn sum_of(&self, item_type: ItemType) -> Money {
        self.lines
            .iter()
            .filter(|line| line.item_type == item_type)
            .map(|line| line.value)
            .sum()
    }

    pub fn total_assets(&self) -> Money {
        self.sum_of(ItemType::Asset) + self.cash.max(Money::zero())
    }

    pub fn total_liabilities(&self) -> Money {
        self.sum_of(ItemType::Liability) + self.cash.min(Money::zero()).abs()
    }

    pub fn net_worth(&self) -> Money {
        self.total_assets() - self.total_liabilities()
    }
}

impl fmt::Display for BalanceSheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let row = |f: &mut fmt::Formatter<'_>, header: &str, amount: Money| {
            writeln!(f, "{:<32}{:>14}", header, amount.to_string())
        };
        for (item_type, header, total, cash) in [
            (
                ItemType::Asset,
                "Assets",
                self.total_assets(),
                self.cash.max(Money::zero()),
            ),
            (
                ItemType::Liability,
                "Liabilities",
                self.total_liabilities(),
                self.cash.min(Money::zero()).abs(),
            ),
        ] {
            row(f, header, total)?;
            if !cash.is_zero() {
                row(f, "  Cash", cash)?;
            }
            for line in self.lines.iter().filter(|line| line.item_type == item_type) {
                row(f, &format!("  {}", line.name), line.value)?;
            }
        }
        row(f, "Net Worth", self.net_worth())
    }
}

#[cfg(test)]
mod balance_sheet_tests {
    use super::*;
    use crate::item::Calculation;

    fn items() -> Vec<Item> {
        vec![
            Item::manual("car", "Car", ItemType::Asset, Money::from(12000)),
            Item::calculated("infra", "Infrastructure", ItemType::Asset, Calculation::default()),
            Item::manual("loan", "Bank Loan", ItemType::Liability, Money::from(4500)),
        ]
    }

    fn valuations() -> Valuations {
        [
            ("car".to_string(), Money::from(12000)),
            ("infra".to_string(), Money::from(1400)),
            ("loan".to_string(), Money::from(4500)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn positive_cash_is_an_asset() {
        let sheet = BalanceSheet::new(&items(), &valuations(), Money::from(600));
        assert_eq!(sheet.total_assets(), Money::from(14000));
        assert_eq!(sheet.total_liabilities(), Money::from(4500));
        assert_eq!(sheet.net_worth(), Money::from(9500));
    }

    #[test]
    fn negative_cash_is_a_liability() {
        let sheet = BalanceSheet::new(&items(), &valuations(), Money::from(-500));
        assert_eq!(sheet.total_assets(), Money::from(13400));
        assert_eq!(sheet.total_liabilities(), Money::from(5000));
        assert_eq!(sheet.net_worth(), Money::from(8400));
    }

    #[test]
    fn display() {
        let sheet = BalanceSheet::new(&items(), &valuations(), Money::from(-500));
        assert_eq!(
            sheet.to_string(),
            "Assets                               $13400.00\n  \
             Car                                $12000.00\n  \
             Infrastructure                      $1400.00\n\
             Liabilities                           $5000.00\n  \
             Cash                                 $500.00\n  \
             Bank Loan                           $4500.00\n\
             Net Worth                             $8400.00\n"
        );
    }
}
