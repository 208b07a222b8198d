use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::core::utils::{ensure_dir, write_atomic, PathResolver};
use crate::errors::StoreError;

/// Ledger account names used when generating cheque accounting entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AccountMap {
    pub notes_under_hand: String,
    pub notes_under_collection: String,
    pub notes_payable: String,
    pub customer: String,
    pub supplier: String,
    pub cash: String,
    pub bank: String,
    pub bank_fees: String,
}

impl Default for AccountMap {
    fn default() -> Self {
        Self {
            notes_under_hand: "Notes Under Hand".into(),
            notes_under_collection: "Notes Under Collection".into(),
            notes_payable: "Notes Payable".into(),
            customer: "Customer Account".into(),
            supplier: "Supplier Account".into(),
            cash: "Cash/Safe Account".into(),
            bank: "Bank Account".into(),
            bank_fees: "Bank Fees Account".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Last-resort currency when neither the payment nor the company supplies one.
    #[serde(default = "Config::default_currency_value")]
    pub default_currency: String,
    #[serde(default)]
    pub accounts: AccountMap,
    /// Substrings of `physical_location` that mark cash or safe handling.
    #[serde(default = "Config::default_cash_keywords")]
    pub cash_location_keywords: Vec<String>,
}

impl Config {
    fn default_currency_value() -> String {
        "USD".into()
    }

    fn default_cash_keywords() -> Vec<String> {
        vec!["Cash".into(), "Safe".into()]
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_currency: Self::default_currency_value(),
            accounts: AccountMap::default(),
            cash_location_keywords: Self::default_cash_keywords(),
        }
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, StoreError> {
        Self::from_base(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, StoreError> {
        Self::from_base(base)
    }

    fn from_base(base: PathBuf) -> Result<Self, StoreError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
        })
    }

    pub fn load(&self) -> Result<Config, StoreError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
