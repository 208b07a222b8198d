use std::collections::{BTreeMap, HashMap};

use crate::domain::{Cheque, PaymentEntry};
use crate::errors::StoreError;

use super::{
    check_insertable, cheque_name, keep_link, not_found_cheque, not_found_payment_entry,
    DocumentStore, Result,
};

/// In-process backend used by tests and embedders that own persistence themselves.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    cheques: BTreeMap<String, Cheque>,
    payment_entries: BTreeMap<String, PaymentEntry>,
    company_currencies: HashMap<String, String>,
    sequence: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_company_currency(
        mut self,
        company: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self {
        self.company_currencies
            .insert(company.into(), currency.into());
        self
    }

    pub fn cheque_count(&self) -> usize {
        self.cheques.len()
    }
}

impl DocumentStore for MemoryStore {
    fn insert_cheque(&mut self, cheque: &mut Cheque) -> Result<String> {
        check_insertable(self.cheques.values(), cheque)?;
        self.sequence += 1;
        let name = cheque_name(self.sequence);
        cheque.name = Some(name.clone());
        for entry in &mut cheque.accounting_entries {
            entry.reference_name = Some(name.clone());
        }
        self.cheques.insert(name.clone(), cheque.clone());
        Ok(name)
    }

    fn update_cheque(&mut self, cheque: &Cheque) -> Result<()> {
        let name = cheque
            .name
            .as_deref()
            .ok_or(StoreError::Required("name"))?;
        let slot = self
            .cheques
            .get_mut(name)
            .ok_or_else(|| not_found_cheque(name))?;
        *slot = cheque.clone();
        Ok(())
    }

    fn load_cheque(&self, name: &str) -> Result<Cheque> {
        self.cheques
            .get(name)
            .cloned()
            .ok_or_else(|| not_found_cheque(name))
    }

    fn list_cheques(&self) -> Result<Vec<Cheque>> {
        Ok(self.cheques.values().cloned().collect())
    }

    fn save_payment_entry(&mut self, entry: &PaymentEntry) -> Result<()> {
        let entry = keep_link(self.payment_entries.get(&entry.name), entry);
        self.payment_entries.insert(entry.name.clone(), entry);
        Ok(())
    }

    fn load_payment_entry(&self, name: &str) -> Result<PaymentEntry> {
        self.payment_entries
            .get(name)
            .cloned()
            .ok_or_else(|| not_found_payment_entry(name))
    }

    fn set_payment_entry_link(&mut self, name: &str, cheque_name: &str) -> Result<()> {
        let entry = self
            .payment_entries
            .get_mut(name)
            .ok_or_else(|| not_found_payment_entry(name))?;
        entry.linked_cheque = Some(cheque_name.to_string());
        Ok(())
    }

    fn company_default_currency(&self, company: &str) -> Result<Option<String>> {
        Ok(self.company_currencies.get(company).cloned())
    }
}
