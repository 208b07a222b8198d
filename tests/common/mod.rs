#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Mutex;

use cheque_core::{
    config::{Config, ConfigManager},
    domain::{Cheque, ChequeCategory, ChequeStatus, ChequeType, PaymentEntry, PaymentType},
    storage::{JsonStore, TracingNotifier},
    ChequeManager,
};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Creates a manager backed by a JSON store in a unique directory, plus its config manager.
pub fn setup_test_env() -> (ChequeManager, ConfigManager, PathBuf) {
    let base = temp_base();
    let store = JsonStore::new(Some(base.clone())).expect("create json store");
    let config_manager =
        ConfigManager::with_base_dir(base.clone()).expect("create config manager for temp dir");
    let config = config_manager.load().expect("load default config");
    let manager = ChequeManager::new(Box::new(store), Box::new(TracingNotifier), config);
    (manager, config_manager, base)
}

pub fn manager_with(config: Config) -> ChequeManager {
    let store = JsonStore::new(Some(temp_base())).expect("create json store");
    ChequeManager::new(Box::new(store), Box::new(TracingNotifier), config)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn money(units: i64) -> Decimal {
    Decimal::new(units, 0)
}

pub fn incoming(number: &str, status: ChequeStatus) -> Cheque {
    let mut cheque = Cheque::new(number, ChequeCategory::Incoming, money(1000))
        .with_status(status)
        .with_dates(date(2026, 2, 1), date(2026, 3, 1));
    cheque.issuer_name = "CUST-0001".into();
    cheque
}

pub fn outgoing(number: &str, status: ChequeStatus) -> Cheque {
    let mut cheque = Cheque::new(number, ChequeCategory::Outgoing, money(500))
        .with_status(status)
        .with_type(ChequeType::Opened);
    cheque.beneficiary_name = "SUP-0001".into();
    cheque
}

pub fn cheque_receipt(name: &str) -> PaymentEntry {
    let mut entry = PaymentEntry::new(
        name,
        PaymentType::Receive,
        "Acme Trading",
        money(2500),
        date(2026, 4, 1),
    );
    entry.mode_of_payment_type = Some("Cheque".into());
    entry.party = Some("CUST-0007".into());
    entry.set_cheque_number("774411");
    entry.cheque_type = Some(ChequeType::Opened);
    entry.issuer_bank = Some("Banque Misr".into());
    entry.issuer_branch = Some("Heliopolis".into());
    entry.current_status = Some(ChequeStatus::InHand);
    entry.set_maturity_date(date(2026, 5, 1));
    entry
}
