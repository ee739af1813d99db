use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(author, version, about = "Manage t-shirt orders efficiently", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Bulk-import orders from a spreadsheet CSV export (upsert by mobile)
    Import(ImportArgs),
    /// Scan a CSV export and report malformed rows and duplicate mobiles
    Check(CheckArgs),
    /// List stored orders, optionally filtered by payment status
    List(ListArgs),
    /// Find orders by mobile number (matches on the last ten digits)
    Lookup(LookupArgs),
    /// Mark an order paid or unpaid by mobile number
    Payment(PaymentArgs),
    /// Print the number of stored orders
    Count(CountArgs),
    /// Read or write storefront settings (UPI id, images, price)
    Settings(SettingsArgs),
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Input CSV file ('-' for stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Order store JSON file (created if missing)
    #[arg(short = 's', long = "store", default_value = "orders.json")]
    pub store: PathBuf,
    /// Settings JSON file supplying the default amount for new orders
    #[arg(long)]
    pub settings: Option<PathBuf>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Parse and validate only; do not touch the store
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Input CSV file ('-' for stdin)
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Show only the duplicate-mobile table
    #[arg(long = "duplicates-only")]
    pub duplicates_only: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
#[value(rename_all = "kebab-case")]
pub enum StatusFilter {
    Paid,
    Unpaid,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Order store JSON file
    #[arg(short = 's', long = "store", default_value = "orders.json")]
    pub store: PathBuf,
    /// Restrict to paid or unpaid orders
    #[arg(long, value_enum)]
    pub status: Option<StatusFilter>,
    /// Write the listing as CSV to this file instead of rendering a table
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct LookupArgs {
    /// Mobile number to search for
    pub mobile: String,
    /// Order store JSON file
    #[arg(short = 's', long = "store", default_value = "orders.json")]
    pub store: PathBuf,
}

#[derive(Debug, Args)]
pub struct PaymentArgs {
    /// Mobile number of the order (exact match)
    pub mobile: String,
    /// New payment status
    #[arg(long, value_enum)]
    pub status: StatusFilter,
    /// Order store JSON file
    #[arg(short = 's', long = "store", default_value = "orders.json")]
    pub store: PathBuf,
}

#[derive(Debug, Args)]
pub struct CountArgs {
    /// Order store JSON file
    #[arg(short = 's', long = "store", default_value = "orders.json")]
    pub store: PathBuf,
}

#[derive(Debug, Args)]
pub struct SettingsArgs {
    /// Settings JSON file
    #[arg(long, default_value = "settings.json")]
    pub settings: PathBuf,
    #[command(subcommand)]
    pub command: SettingsCommand,
}

#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// Print one setting, or all settings as a table when no key is given
    Get { key: Option<String> },
    /// Store a setting value
    Set { key: String, value: String },
    /// Seed the default settings the storefront expects on first run
    Init,
}
