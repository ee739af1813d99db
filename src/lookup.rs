use anyhow::{Context, Result, anyhow};
use log::info;

use crate::{cli::LookupArgs, list, store::JsonStore, table};

pub fn execute(args: &LookupArgs) -> Result<()> {
    let store = JsonStore::load_or_default(&args.store)
        .with_context(|| format!("Loading order store {:?}", args.store))?;

    let matches = store.find_by_suffix(&args.mobile);
    if matches.is_empty() {
        return Err(anyhow!("No orders found for mobile '{}'", args.mobile));
    }

    let headers = vec![
        "Mobile".to_string(),
        "Full Name".to_string(),
        "T-Shirt Name".to_string(),
        "Size".to_string(),
        "Amount".to_string(),
        "Paid".to_string(),
    ];
    let rows = matches
        .iter()
        .map(|order| list::order_row(order))
        .collect::<Vec<_>>();
    table::print_table(&headers, &rows);

    info!(
        "Found {} order(s) for mobile '{}'",
        matches.len(),
        args.mobile
    );
    Ok(())
}
