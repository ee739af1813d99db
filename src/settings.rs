//! Key–value storefront settings (`upi_id`, `qr_image`, `bg_image`,
//! `tshirt_price`), persisted as a flat JSON object.

use std::{collections::BTreeMap, fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    cli::{SettingsArgs, SettingsCommand},
    store::DEFAULT_AMOUNT,
    table,
};

pub const KEY_UPI_ID: &str = "upi_id";
pub const KEY_QR_IMAGE: &str = "qr_image";
pub const KEY_BG_IMAGE: &str = "bg_image";
pub const KEY_TSHIRT_PRICE: &str = "tshirt_price";

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings {
    entries: BTreeMap<String, String>,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("Opening settings file {path:?}"))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Parsing settings file {path:?}"))
    }

    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let file =
            File::create(path).with_context(|| format!("Creating settings file {path:?}"))?;
        serde_json::to_writer_pretty(file, self).context("Writing settings JSON")
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|value| value.as_str())
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    /// Seeds the defaults the storefront expects on first run; existing
    /// values are left alone. Returns how many keys were added.
    pub fn seed_defaults(&mut self) -> usize {
        let defaults = [
            (KEY_UPI_ID, "mobile@upi"),
            (KEY_QR_IMAGE, ""),
            (KEY_BG_IMAGE, ""),
        ];
        let mut added = 0;
        for (key, value) in defaults {
            if !self.entries.contains_key(key) {
                self.entries.insert(key.to_string(), value.to_string());
                added += 1;
            }
        }
        added
    }

    /// Configured unit price, falling back to the stock default when the key
    /// is absent or not numeric.
    pub fn tshirt_price(&self) -> f64 {
        self.get(KEY_TSHIRT_PRICE)
            .and_then(|value| value.trim().parse::<f64>().ok())
            .unwrap_or(DEFAULT_AMOUNT)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

pub fn execute(args: &SettingsArgs) -> Result<()> {
    match &args.command {
        SettingsCommand::Get { key } => {
            let settings = Settings::load_or_default(&args.settings)?;
            match key {
                Some(key) => match settings.get(key) {
                    Some(value) => println!("{value}"),
                    None => println!(),
                },
                None => {
                    let headers = vec!["Key".to_string(), "Value".to_string()];
                    let rows = settings
                        .entries()
                        .map(|(key, value)| vec![key.to_string(), value.to_string()])
                        .collect::<Vec<_>>();
                    table::print_table(&headers, &rows);
                }
            }
            Ok(())
        }
        SettingsCommand::Set { key, value } => {
            let mut settings = Settings::load_or_default(&args.settings)?;
            settings.set(key, value);
            settings.save(&args.settings)?;
            info!("Set '{key}' in {:?}", args.settings);
            Ok(())
        }
        SettingsCommand::Init => {
            let mut settings = Settings::load_or_default(&args.settings)?;
            let added = settings.seed_defaults();
            settings.save(&args.settings)?;
            info!(
                "Seeded {added} default setting(s) into {:?}",
                args.settings
            );
            Ok(())
        }
    }
}
