use anyhow::{Context, Result};
use log::info;

use crate::{
    cli::{ListArgs, StatusFilter},
    io_utils,
    store::{JsonStore, Order},
    table,
};

const HEADERS: [&str; 6] = [
    "Mobile",
    "Full Name",
    "T-Shirt Name",
    "Size",
    "Amount",
    "Paid",
];

pub fn execute(args: &ListArgs) -> Result<()> {
    let store = JsonStore::load_or_default(&args.store)
        .with_context(|| format!("Loading order store {:?}", args.store))?;

    let orders = store
        .orders()
        .iter()
        .filter(|order| match args.status {
            Some(StatusFilter::Paid) => order.payment_status,
            Some(StatusFilter::Unpaid) => !order.payment_status,
            None => true,
        })
        .collect::<Vec<_>>();

    if let Some(output) = &args.output {
        let mut writer = io_utils::open_csv_writer(Some(output))?;
        writer
            .write_record(HEADERS)
            .context("Writing output headers")?;
        for order in &orders {
            writer
                .write_record(order_row(order))
                .with_context(|| format!("Writing order for mobile '{}'", order.mobile))?;
        }
        writer.flush().context("Flushing output writer")?;
        info!("Wrote {} order(s) to {:?}", orders.len(), output);
    } else {
        let headers = HEADERS.iter().map(|h| h.to_string()).collect::<Vec<_>>();
        let rows = orders.iter().map(|order| order_row(order)).collect::<Vec<_>>();
        table::print_table(&headers, &rows);
        info!("Listed {} order(s) from {:?}", orders.len(), args.store);
    }
    Ok(())
}

pub(crate) fn order_row(order: &Order) -> Vec<String> {
    vec![
        order.mobile.clone(),
        order.full_name.clone(),
        order.tshirt_name.clone(),
        order.size.clone(),
        format_amount(order.amount),
        if order.payment_status { "yes" } else { "no" }.to_string(),
    ]
}

fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}
