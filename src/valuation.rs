use crate::{
    item::{
        link::{category_key, CategoryLink},
        Basis, Calculation, Item, ItemId, ItemType,
    },
    money::Money,
    snapshot::Snapshot,
    transaction::{Kind, Transaction},
};
use itertools::Itertools;
use num_traits::Zero;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Value of every item keyed by item id
pub type Valuations = HashMap<ItemId, Money>;

/// Values each item against the ledger as it stood at `snapshot`.
///
/// Manual items keep their entered value. Calculated items are derived from
/// the transactions in their linked categories, never going below zero.
pub fn valuate(items: &[Item], transactions: &[Transaction], snapshot: &Snapshot) -> Valuations {
    let index = CategoryIndex::new(snapshot.filter(transactions));
    items
        .iter()
        .map(|item| {
            let value = value_item(item, &index);
            debug!(item = %item.id, %snapshot, %value, "valued item");
            (item.id.clone(), value)
        })
        .collect()
}

pub fn value_item(item: &Item, index: &CategoryIndex<'_>) -> Money {
    match &item.basis {
        Basis::Manual(value) => *value,
        Basis::Calculated(calc) => {
            finalize(aggregate(item.item_type, calc, index), calc.max_value)
        }
    }
}

/// Signed effect of a transaction on an item.
///
/// Spending into an asset grows it and income drawn from it shrinks it.
/// Liabilities are the other way round: proceeds grow them, repayments shrink them.
pub fn impact(tx: &Transaction, item_type: ItemType) -> Money {
    match (item_type, tx.kind) {
        (ItemType::Asset, Kind::Expense) | (ItemType::Liability, Kind::Income) => tx.amount,
        (ItemType::Asset, Kind::Income) | (ItemType::Liability, Kind::Expense) => -tx.amount,
    }
}

/// Snapshot transactions grouped by category key
#[derive(Debug, Default)]
pub struct CategoryIndex<'a>(HashMap<String, Vec<&'a Transaction>>);

impl<'a> CategoryIndex<'a> {
    pub fn new<I>(txs: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        CategoryIndex(
            txs.into_iter()
                .map(|tx| (category_key(&tx.category), tx))
                .into_group_map(),
        )
    }

    pub fn get(&self, link: &CategoryLink) -> &[&'a Transaction] {
        self.0.get(&link.key()).map(Vec::as_slice).unwrap_or_default()
    }
}

/// Running total of an item before its ceiling and floor are applied
pub fn aggregate(item_type: ItemType, calc: &Calculation, index: &CategoryIndex<'_>) -> Money {
    calc.links.iter().fold(calc.initial_value, |running, link| {
        let txs = index
            .get(link)
            .iter()
            .copied()
            .filter(|tx| calc.keywords.matches(&tx.description));
        running + contribution(link, txs, item_type)
    })
}

/// What one category link adds to the running total.
///
/// Caps only limit positive accumulation, a negative total or bucket passes through.
fn contribution<'a, I>(link: &CategoryLink, txs: I, item_type: ItemType) -> Money
where
    I: Iterator<Item = &'a Transaction>,
{
    if !link.is_bucketed() {
        let total: Money = txs.map(|tx| impact(tx, item_type)).sum();
        return match link.cap {
            Some(cap) if total > cap => cap,
            _ => total,
        };
    }
    txs.filter_map(|tx| {
        let key = tx.calendar_date().and_then(|date| link.period.key(date));
        if key.is_none() {
            warn!(date = %tx.date, category = %tx.category, "skipping undated transaction in {} bucket", link.period);
        }
        key.map(|key| (key, impact(tx, item_type)))
    })
    .into_group_map()
    .into_values()
    .map(|amounts| {
        let amount: Money = amounts.into_iter().sum();
        match link.cap {
            Some(cap) if amount > cap => cap,
            _ => amount,
        }
    })
    .sum()
}

/// Applies the item ceiling if positive then floors at zero
pub fn finalize(running: Money, max_value: Option<Money>) -> Money {
    let running = match max_value {
        Some(max) if max.is_positive() => running.min(max),
        _ => running,
    };
    running.max(Money::zero())
}
