pub mod check;
pub mod cli;
pub mod import;
pub mod io_utils;
pub mod list;
pub mod lookup;
pub mod payment;
pub mod row;
pub mod settings;
pub mod store;
pub mod table;

use std::{env, sync::OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, info};

use crate::cli::{Cli, Commands};
use crate::store::OrderStore;

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("order_managed", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Import(args) => import::execute(&args),
        Commands::Check(args) => check::execute(&args),
        Commands::List(args) => list::execute(&args),
        Commands::Lookup(args) => lookup::execute(&args),
        Commands::Payment(args) => payment::execute(&args),
        Commands::Count(args) => handle_count(&args),
        Commands::Settings(args) => settings::execute(&args),
    }
}

fn handle_count(args: &cli::CountArgs) -> Result<()> {
    let store = store::JsonStore::load_or_default(&args.store)
        .with_context(|| format!("Loading order store {:?}", args.store))?;
    println!("{}", store.count_all());
    info!("{} order(s) in {:?}", store.count_all(), args.store);
    Ok(())
}
