//! Order persistence: the record type, the store abstraction the import
//! pipeline writes through, and a JSON-file implementation.
//!
//! Storage does not enforce mobile uniqueness; direct inserts may create
//! several records for one number. The import path treats mobile as a merge
//! key and updates the first match, which keeps re-runs idempotent.

use std::{
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fallback unit price when the settings store carries no `tshirt_price`.
pub const DEFAULT_AMOUNT: f64 = 300.0;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("reading order store {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("order store {path:?} is not valid JSON: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("writing order store {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// One customer order. Serialized field names match the original form
/// export, so existing store files remain readable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub full_name: String,
    #[serde(default)]
    pub tshirt_name: String,
    #[serde(default)]
    pub size: String,
    pub mobile: String,
    #[serde(default = "default_amount")]
    pub amount: f64,
    #[serde(default)]
    pub payment_status: bool,
}

fn default_amount() -> f64 {
    DEFAULT_AMOUNT
}

/// The three fields an import row is allowed to touch on an existing order.
#[derive(Debug, Clone, Copy)]
pub struct OrderUpdate<'a> {
    pub full_name: &'a str,
    pub tshirt_name: &'a str,
    pub size: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

/// Minimal store surface the import pipeline needs. Any backend that can
/// look up by mobile and upsert with insert-time defaults qualifies.
pub trait OrderStore {
    fn find_by_mobile(&self, mobile: &str) -> Option<&Order>;

    /// Creates the order if `mobile` is absent, otherwise overwrites name,
    /// t-shirt name, and size in place. `amount` and `payment_status` are
    /// never touched on update; on insert they come from `default_amount`
    /// and `false`.
    fn upsert(
        &mut self,
        mobile: &str,
        update: OrderUpdate<'_>,
        default_amount: f64,
    ) -> Result<UpsertOutcome, StoreError>;

    fn count_all(&self) -> usize;
}

/// Order store persisted as a pretty-printed JSON array.
#[derive(Debug, Default)]
pub struct JsonStore {
    orders: Vec<Order>,
}

impl JsonStore {
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let file = File::open(path).map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = BufReader::new(file);
        let orders = serde_json::from_reader(reader).map_err(|source| StoreError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { orders })
    }

    /// Loads the store, treating a missing file as an empty store. A file
    /// that exists but cannot be read or parsed is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, StoreError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let file = File::create(path).map_err(|source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::to_writer_pretty(file, &self.orders).map_err(|source| {
            StoreError::Write {
                path: path.to_path_buf(),
                source: io::Error::other(source),
            }
        })
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Direct insert without merge-key semantics, as the HTTP layer of the
    /// original system allowed. Used by tests and administrative tooling.
    pub fn insert(&mut self, order: Order) {
        self.orders.push(order);
    }

    /// All orders whose mobile ends with the last ten characters of
    /// `mobile`, so `+91 98765 43210` and `9876543210` find each other.
    pub fn find_by_suffix(&self, mobile: &str) -> Vec<&Order> {
        let suffix = last_ten(mobile);
        self.orders
            .iter()
            .filter(|order| order.mobile.ends_with(suffix))
            .collect()
    }

    /// Sets `payment_status` on every record with this exact mobile and
    /// returns how many changed.
    pub fn set_payment_status(&mut self, mobile: &str, paid: bool) -> usize {
        let mut changed = 0;
        for order in self.orders.iter_mut().filter(|o| o.mobile == mobile) {
            order.payment_status = paid;
            changed += 1;
        }
        changed
    }
}

fn last_ten(mobile: &str) -> &str {
    let digits = mobile.char_indices().rev().nth(9);
    match digits {
        Some((idx, _)) => &mobile[idx..],
        None => mobile,
    }
}

impl OrderStore for JsonStore {
    fn find_by_mobile(&self, mobile: &str) -> Option<&Order> {
        self.orders.iter().find(|order| order.mobile == mobile)
    }

    fn upsert(
        &mut self,
        mobile: &str,
        update: OrderUpdate<'_>,
        default_amount: f64,
    ) -> Result<UpsertOutcome, StoreError> {
        match self.orders.iter_mut().find(|order| order.mobile == mobile) {
            Some(existing) => {
                existing.full_name = update.full_name.to_string();
                existing.tshirt_name = update.tshirt_name.to_string();
                existing.size = update.size.to_string();
                Ok(UpsertOutcome::Updated)
            }
            None => {
                self.orders.push(Order {
                    full_name: update.full_name.to_string(),
                    tshirt_name: update.tshirt_name.to_string(),
                    size: update.size.to_string(),
                    mobile: mobile.to_string(),
                    amount: default_amount,
                    payment_status: false,
                });
                Ok(UpsertOutcome::Inserted)
            }
        }
    }

    fn count_all(&self) -> usize {
        self.orders.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update<'a>(name: &'a str, tshirt: &'a str, size: &'a str) -> OrderUpdate<'a> {
        OrderUpdate {
            full_name: name,
            tshirt_name: tshirt,
            size,
        }
    }

    #[test]
    fn upsert_inserts_with_defaults_then_updates_in_place() {
        let mut store = JsonStore::default();
        let outcome = store
            .upsert("9876543210", update("Asha", "Asha", "M"), 350.0)
            .expect("insert");
        assert_eq!(outcome, UpsertOutcome::Inserted);

        let order = store.find_by_mobile("9876543210").expect("stored order");
        assert_eq!(order.amount, 350.0);
        assert!(!order.payment_status);

        store.set_payment_status("9876543210", true);
        let outcome = store
            .upsert("9876543210", update("Asha K", "Asha", "L"), 999.0)
            .expect("update");
        assert_eq!(outcome, UpsertOutcome::Updated);

        let order = store.find_by_mobile("9876543210").expect("stored order");
        assert_eq!(order.full_name, "Asha K");
        assert_eq!(order.size, "L");
        // Update never touches amount or payment status.
        assert_eq!(order.amount, 350.0);
        assert!(order.payment_status);
        assert_eq!(store.count_all(), 1);
    }

    #[test]
    fn suffix_lookup_ignores_country_prefix() {
        let mut store = JsonStore::default();
        store.insert(Order {
            full_name: "Ravi".into(),
            tshirt_name: String::new(),
            size: "XL".into(),
            mobile: "+919876543210".into(),
            amount: DEFAULT_AMOUNT,
            payment_status: false,
        });
        assert_eq!(store.find_by_suffix("9876543210").len(), 1);
        assert_eq!(store.find_by_suffix("0000000000").len(), 0);
    }

    #[test]
    fn missing_store_file_loads_as_empty() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("orders.json");
        let store = JsonStore::load_or_default(&path).expect("empty store");
        assert_eq!(store.count_all(), 0);
    }

    #[test]
    fn save_then_load_round_trips_records() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("orders.json");

        let mut store = JsonStore::default();
        store
            .upsert("9876543210", update("Asha", "Asha", "M"), DEFAULT_AMOUNT)
            .expect("insert");
        store.save(&path).expect("save");

        let reloaded = JsonStore::load(&path).expect("load");
        assert_eq!(reloaded.orders(), store.orders());
    }

    #[test]
    fn json_field_names_match_the_original_export() {
        let order = Order {
            full_name: "Asha".into(),
            tshirt_name: "Asha".into(),
            size: "M".into(),
            mobile: "9876543210".into(),
            amount: DEFAULT_AMOUNT,
            payment_status: false,
        };
        let json = serde_json::to_string(&order).expect("serialize");
        assert!(json.contains("\"fullName\""));
        assert!(json.contains("\"tshirtName\""));
        assert!(json.contains("\"paymentStatus\""));
    }
}
