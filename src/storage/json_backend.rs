use serde::{de::DeserializeOwned, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use crate::{
    core::utils::{canonical_name, ensure_dir, write_atomic, PathResolver},
    domain::{Cheque, PaymentEntry},
    errors::StoreError,
};

use super::{
    check_insertable, cheque_name, keep_link, not_found_cheque, not_found_payment_entry,
    DocumentStore, Result,
};

const DOCUMENT_EXTENSION: &str = "json";

/// Stores one pretty-printed JSON file per document under the application data directory.
#[derive(Debug, Clone)]
pub struct JsonStore {
    root: PathBuf,
    cheques_dir: PathBuf,
    payment_entries_dir: PathBuf,
    companies_file: PathBuf,
    company_currencies: BTreeMap<String, String>,
}

impl JsonStore {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = PathResolver::resolve_base(root);
        ensure_dir(&root)?;
        let cheques_dir = PathResolver::cheque_dir_in(&root);
        let payment_entries_dir = PathResolver::payment_entry_dir_in(&root);
        ensure_dir(&cheques_dir)?;
        ensure_dir(&payment_entries_dir)?;
        let companies_file = PathResolver::companies_file_in(&root);
        let company_currencies = if companies_file.exists() {
            read_json(&companies_file)?
        } else {
            BTreeMap::new()
        };
        Ok(Self {
            root,
            cheques_dir,
            payment_entries_dir,
            companies_file,
            company_currencies,
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    pub fn cheque_path(&self, name: &str) -> PathBuf {
        self.cheques_dir
            .join(format!("{}.{}", canonical_name(name), DOCUMENT_EXTENSION))
    }

    pub fn payment_entry_path(&self, name: &str) -> PathBuf {
        self.payment_entries_dir
            .join(format!("{}.{}", canonical_name(name), DOCUMENT_EXTENSION))
    }

    /// Records a company's default currency and refreshes the cached copy.
    pub fn set_company_currency(&mut self, company: &str, currency: &str) -> Result<()> {
        self.company_currencies
            .insert(company.to_string(), currency.to_string());
        write_json(&self.companies_file, &self.company_currencies)
    }

    fn next_cheque_name(&self) -> Result<String> {
        let mut sequence = self.document_files(&self.cheques_dir)?.len() + 1;
        loop {
            let name = cheque_name(sequence);
            if !self.cheque_path(&name).exists() {
                return Ok(name);
            }
            sequence += 1;
        }
    }

    fn document_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut files = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some(DOCUMENT_EXTENSION) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

impl DocumentStore for JsonStore {
    fn insert_cheque(&mut self, cheque: &mut Cheque) -> Result<String> {
        let existing = self.list_cheques()?;
        check_insertable(&existing, cheque)?;
        let name = self.next_cheque_name()?;
        cheque.name = Some(name.clone());
        for entry in &mut cheque.accounting_entries {
            entry.reference_name = Some(name.clone());
        }
        write_json(&self.cheque_path(&name), cheque)?;
        tracing::debug!(cheque = %name, "cheque written to json store");
        Ok(name)
    }

    fn update_cheque(&mut self, cheque: &Cheque) -> Result<()> {
        let name = cheque
            .name
            .as_deref()
            .ok_or(StoreError::Required("name"))?;
        let path = self.cheque_path(name);
        if !path.exists() {
            return Err(not_found_cheque(name));
        }
        write_json(&path, cheque)
    }

    fn load_cheque(&self, name: &str) -> Result<Cheque> {
        let path = self.cheque_path(name);
        if !path.exists() {
            return Err(not_found_cheque(name));
        }
        read_json(&path)
    }

    fn list_cheques(&self) -> Result<Vec<Cheque>> {
        self.document_files(&self.cheques_dir)?
            .iter()
            .map(|path| read_json(path))
            .collect()
    }

    fn save_payment_entry(&mut self, entry: &PaymentEntry) -> Result<()> {
        let existing = self.previous_payment_entry(&entry.name)?;
        let entry = keep_link(existing.as_ref(), entry);
        write_json(&self.payment_entry_path(&entry.name), &entry)
    }

    fn load_payment_entry(&self, name: &str) -> Result<PaymentEntry> {
        let path = self.payment_entry_path(name);
        if !path.exists() {
            return Err(not_found_payment_entry(name));
        }
        read_json(&path)
    }

    fn set_payment_entry_link(&mut self, name: &str, cheque_name: &str) -> Result<()> {
        let mut entry = self.load_payment_entry(name)?;
        entry.linked_cheque = Some(cheque_name.to_string());
        self.save_payment_entry(&entry)
    }

    fn company_default_currency(&self, company: &str) -> Result<Option<String>> {
        Ok(self.company_currencies.get(company).cloned())
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    write_atomic(path, &json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChequeCategory, ChequeStatus, PaymentType};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use tempfile::TempDir;

    fn store_with_temp_dir() -> (JsonStore, TempDir) {
        let temp = TempDir::new().expect("create temp dir");
        let store = JsonStore::new(Some(temp.path().to_path_buf())).expect("create store");
        (store, temp)
    }

    #[test]
    fn insert_update_and_reload() {
        let (mut store, _guard) = store_with_temp_dir();
        let mut cheque = Cheque::new("55", ChequeCategory::Incoming, Decimal::new(10, 0))
            .with_status(ChequeStatus::InHand);
        let name = store.insert_cheque(&mut cheque).unwrap();
        assert!(store.cheque_path(&name).exists());

        cheque.current_status = ChequeStatus::UnderCollection;
        store.update_cheque(&cheque).unwrap();

        let loaded = store.load_cheque(&name).unwrap();
        assert_eq!(loaded.current_status, ChequeStatus::UnderCollection);
        assert_eq!(store.list_cheques().unwrap().len(), 1);
    }

    #[test]
    fn company_currency_survives_reopen() {
        let (mut store, guard) = store_with_temp_dir();
        store.set_company_currency("Acme", "EGP").unwrap();

        let reopened = JsonStore::new(Some(guard.path().to_path_buf())).unwrap();
        assert_eq!(
            reopened.company_default_currency("Acme").unwrap().as_deref(),
            Some("EGP")
        );
        assert!(reopened.company_default_currency("Other").unwrap().is_none());
    }

    #[test]
    fn link_is_written_onto_payment_entry() {
        let (mut store, _guard) = store_with_temp_dir();
        let entry = PaymentEntry::new(
            "ACC-PAY-2026-00001",
            PaymentType::Pay,
            "Acme",
            Decimal::new(75, 0),
            NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
        );
        store.save_payment_entry(&entry).unwrap();
        store
            .set_payment_entry_link(&entry.name, "CHQ-00003")
            .unwrap();

        let reloaded = store.load_payment_entry(&entry.name).unwrap();
        assert_eq!(reloaded.linked_cheque.as_deref(), Some("CHQ-00003"));
    }

    #[test]
    fn missing_documents_report_not_found() {
        let (store, _guard) = store_with_temp_dir();
        assert!(matches!(
            store.load_payment_entry("nope"),
            Err(StoreError::NotFound { doctype: "Payment Entry", .. })
        ));
        assert!(store.previous_cheque("CHQ-00001").unwrap().is_none());
    }
}
