use anyhow::{Context, Result};
use clap::{Arg, Command};
use itertools::Itertools;
use std::collections::BTreeMap;
use tracing::info;
use valuations::{
    balance_sheet::BalanceSheet, item::Items, snapshot::Snapshot, valuate, Ledger,
};

#[async_std::main]
async fn main() -> Result<()> {
    valuations::init_tracing();

    let items_arg = || {
        Arg::new("items")
            .short('i')
            .long("items")
            .help("The balance sheet items file")
            .value_name("FILE")
            .takes_value(true)
            .required(true)
    };
    let matches = Command::new("Valuations")
        .version("0.1.0")
        .author("Luke Nimtz <luke.nimtz@gmail.com>")
        .about("Values balance sheet items from a transaction ledger")
        .arg(
            Arg::new("ledger")
                .short('l')
                .long("ledger")
                .help("Sets directory or file of transactions or '-' for stdin")
                .value_name("DIR")
                .default_value("./")
                .takes_value(true),
        )
        .arg(
            Arg::new("as of")
                .short('a')
                .long("as-of")
                .help("Values the ledger as it stood on this date (YYYY-MM-DD) or 'today'")
                .value_name("DATE")
                .default_value("today")
                .takes_value(true),
        )
        .subcommand(
            Command::new("items")
                .about("Shows the value of each item")
                .arg(items_arg())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Prints values as a json object keyed by item id"),
                ),
        )
        .subcommand(
            Command::new("summary")
                .about("Shows the balance sheet with totals and cash")
                .arg(items_arg()),
        )
        .subcommand(Command::new("transactions").about("Shows the ledger as of the snapshot"))
        .get_matches();

    let ledger = match matches.value_of("ledger") {
        Some("-") | None => Ledger::new(None),
        Some(path) => Ledger::new(Some(path)),
    };
    let snapshot: Snapshot = matches
        .value_of("as of")
        .unwrap_or("today")
        .parse()?;
    info!(%snapshot, "loading ledger");

    if let Some(items_matches) = matches.subcommand_matches("items") {
        let items_file = items_matches.value_of("items").context("Items file required")?;
        let items = Items::from_file(items_file).await?;
        let txs = ledger.snapshot(&snapshot).await?;
        let valuations = valuate(&items, &txs, &snapshot);
        if items_matches.is_present("json") {
            let by_id: BTreeMap<_, _> = valuations.iter().collect();
            println!("{}", serde_json::to_string_pretty(&by_id)?);
        } else {
            items.iter().for_each(|item| {
                let value = valuations[&item.id].to_string();
                println!("{:32} | {:9} | {:>12}", item.name, item.item_type, value);
            });
        }
    } else if let Some(summary_matches) = matches.subcommand_matches("summary") {
        let items_file = summary_matches.value_of("items").context("Items file required")?;
        let items = Items::from_file(items_file).await?;
        let txs = ledger.snapshot(&snapshot).await?;
        let valuations = valuate(&items, &txs, &snapshot);
        let sheet = BalanceSheet::new(&items, &valuations, Ledger::cash(&txs));
        print!("{}", sheet);
    } else if matches.subcommand_matches("transactions").is_some() {
        ledger
            .snapshot(&snapshot)
            .await?
            .into_iter()
            .sorted_by(|a, b| a.date.cmp(&b.date))
            .for_each(|tx| println!("{}", tx));
    }
    Ok(())
}
