//! Host collaborator abstraction: document persistence, cached company settings and
//! user-facing notifications.

pub mod json_backend;
pub mod memory;

use std::sync::Mutex;

use crate::domain::{Cheque, PaymentEntry};
use crate::errors::StoreError;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Prefix of host-assigned cheque identifiers (`CHQ-00001`).
pub const CHEQUE_NAME_PREFIX: &str = "CHQ";

/// Abstraction over persistence backends able to hold cheques and payment entries.
pub trait DocumentStore: Send + Sync {
    /// Persists a new cheque, assigns its identifier onto it and returns that identifier.
    fn insert_cheque(&mut self, cheque: &mut Cheque) -> Result<String>;
    /// Overwrites the persisted version of an already inserted cheque.
    fn update_cheque(&mut self, cheque: &Cheque) -> Result<()>;
    fn load_cheque(&self, name: &str) -> Result<Cheque>;
    fn list_cheques(&self) -> Result<Vec<Cheque>>;
    fn save_payment_entry(&mut self, entry: &PaymentEntry) -> Result<()>;
    fn load_payment_entry(&self, name: &str) -> Result<PaymentEntry>;
    /// Writes the back-link field on a persisted payment entry.
    fn set_payment_entry_link(&mut self, name: &str, cheque_name: &str) -> Result<()>;
    /// Cached company setting used as the last currency fallback.
    fn company_default_currency(&self, company: &str) -> Result<Option<String>>;

    /// Last persisted version of a cheque, `None` when it was never stored.
    fn previous_cheque(&self, name: &str) -> Result<Option<Cheque>> {
        match self.load_cheque(name) {
            Ok(cheque) => Ok(Some(cheque)),
            Err(StoreError::NotFound { .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Last persisted version of a payment entry, `None` when it was never stored.
    fn previous_payment_entry(&self, name: &str) -> Result<Option<PaymentEntry>> {
        match self.load_payment_entry(name) {
            Ok(entry) => Ok(Some(entry)),
            Err(StoreError::NotFound { .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }
}

/// Fire-and-forget user-facing messages.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// Emits notifications into the tracing pipeline.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str) {
        tracing::info!(target: "cheque_core::notify", "{message}");
    }
}

/// Keeps every notification so callers can display or assert on them later.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}

/// Enforces the insert constraints shared by every backend: a non-blank cheque number,
/// unique within its category.
pub(crate) fn check_insertable<'a, I>(existing: I, cheque: &Cheque) -> Result<()>
where
    I: IntoIterator<Item = &'a Cheque>,
{
    let number = cheque.cheque_number.trim();
    if number.is_empty() {
        return Err(StoreError::Required("cheque_number"));
    }
    let duplicate = existing
        .into_iter()
        .any(|other| other.category == cheque.category && other.cheque_number.trim() == number);
    if duplicate {
        Err(StoreError::Duplicate(number.to_string()))
    } else {
        Ok(())
    }
}

/// A cheque link, once written, survives later saves of a copy that lacks it.
pub(crate) fn keep_link(existing: Option<&PaymentEntry>, entry: &PaymentEntry) -> PaymentEntry {
    let mut entry = entry.clone();
    if entry.linked_cheque.is_none() {
        entry.linked_cheque = existing.and_then(|stored| stored.linked_cheque.clone());
    }
    entry
}

pub(crate) fn cheque_name(sequence: usize) -> String {
    format!("{CHEQUE_NAME_PREFIX}-{sequence:05}")
}

pub(crate) fn not_found_cheque(name: &str) -> StoreError {
    StoreError::NotFound {
        doctype: "Cheque",
        name: name.to_string(),
    }
}

pub(crate) fn not_found_payment_entry(name: &str) -> StoreError {
    StoreError::NotFound {
        doctype: "Payment Entry",
        name: name.to_string(),
    }
}

pub use json_backend::JsonStore;
pub use memory::MemoryStore;
