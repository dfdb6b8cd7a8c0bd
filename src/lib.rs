pub mod balance_sheet;
pub mod item;
pub mod lines;
pub mod money;
pub mod period;
pub mod snapshot;
pub mod transaction;
pub mod valuation;

use anyhow::{Error, Result};
use futures::future;
use futures::stream::{Stream, TryStreamExt};
use money::Money;
use snapshot::Snapshot;
use std::borrow::ToOwned;
use transaction::Transaction;
use tracing_subscriber::{fmt, EnvFilter};

pub use valuation::{valuate, Valuations};

/// Installs the global log subscriber, writing to stderr.
///
/// Filtered by `RUST_LOG`, defaulting to warnings from this crate.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("valuations=warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Transaction ledger read from a dir or file of yaml documents, or stdin
pub struct Ledger {
    path: Option<String>,
}

impl Ledger {
    pub fn new(path: Option<&str>) -> Self {
        Ledger {
            path: path.map(ToOwned::to_owned),
        }
    }

    pub fn transactions(&self) -> impl Stream<Item = Result<Transaction>> + use<> {
        lines::documents(self.path.clone()).and_then(|doc: String| async move {
            let tx: Transaction = doc.parse()?;
            Ok::<_, Error>(tx)
        })
    }

    /// Transactions on or before the snapshot, in ledger order
    pub async fn snapshot(&self, snapshot: &Snapshot) -> Result<Vec<Transaction>> {
        self.transactions()
            .try_filter(|tx| future::ready(snapshot.includes(tx)))
            .try_collect()
            .await
    }

    /// Net cash position of the given transactions, income less expenses
    pub fn cash<'a>(txs: impl IntoIterator<Item = &'a Transaction>) -> Money {
        txs.into_iter().map(Transaction::cash_flow).sum()
    }
}
