use anyhow::{Context, Result, anyhow};
use log::info;

use crate::{
    cli::{PaymentArgs, StatusFilter},
    store::JsonStore,
};

pub fn execute(args: &PaymentArgs) -> Result<()> {
    let mut store = JsonStore::load_or_default(&args.store)
        .with_context(|| format!("Loading order store {:?}", args.store))?;

    let paid = args.status == StatusFilter::Paid;
    let changed = store.set_payment_status(&args.mobile, paid);
    if changed == 0 {
        return Err(anyhow!("No orders found for mobile '{}'", args.mobile));
    }

    store
        .save(&args.store)
        .with_context(|| format!("Persisting order store {:?}", args.store))?;
    info!(
        "Marked {changed} order(s) for mobile '{}' as {}",
        args.mobile,
        if paid { "paid" } else { "unpaid" }
    );
    Ok(())
}
