use crate::config::Config;
use crate::core::services::{
    AccountingService, EntryOutcome, LifecycleValidator, PaymentEntryBridge, ServiceResult,
};
use crate::domain::{Cheque, Identifiable, PaymentEntry};
use crate::storage::{DocumentStore, Notifier};

/// Facade exposing the host hooks: cheque save, payment-entry submit, and on-demand
/// accounting-entry generation.
pub struct ChequeManager {
    store: Box<dyn DocumentStore>,
    notifier: Box<dyn Notifier>,
    config: Config,
}

impl ChequeManager {
    pub fn new(store: Box<dyn DocumentStore>, notifier: Box<dyn Notifier>, config: Config) -> Self {
        Self {
            store,
            notifier,
            config,
        }
    }

    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Validates and persists a cheque. New cheques are inserted and receive their
    /// identifier; existing ones are checked against their last persisted status.
    pub fn save_cheque(&mut self, cheque: &mut Cheque) -> ServiceResult<String> {
        let name = cheque.name().map(str::to_owned);
        let previous = match name.as_deref() {
            Some(name) => self.store.previous_cheque(name)?,
            None => None,
        };
        if let Err(err) = LifecycleValidator::validate(
            previous.as_ref(),
            cheque,
            &self.config.cash_location_keywords,
        ) {
            tracing::debug!(cheque = %cheque.cheque_number, error = %err, "cheque save rejected");
            return Err(err.into());
        }

        match (name, previous) {
            (Some(name), Some(previous)) => {
                self.store.update_cheque(cheque)?;
                if previous.current_status != cheque.current_status {
                    tracing::info!(
                        cheque = %name,
                        from = %previous.current_status,
                        to = %cheque.current_status,
                        "cheque status changed"
                    );
                }
                Ok(name)
            }
            (Some(name), None) => {
                // Named but never stored: surfaces the backend's not-found error.
                self.store.update_cheque(cheque)?;
                Ok(name)
            }
            (None, _) => {
                let name = self.store.insert_cheque(cheque)?;
                tracing::info!(cheque = %name, status = %cheque.current_status, "cheque created");
                Ok(name)
            }
        }
    }

    /// Generates the cheque's accounting entries unless it already has some, then saves.
    pub fn create_accounting_entries(&mut self, name: &str) -> ServiceResult<EntryOutcome> {
        let mut cheque = self.store.load_cheque(name)?;
        let outcome = AccountingService::ensure_entries(
            &mut cheque,
            &self.config.accounts,
            &self.config.cash_location_keywords,
        );
        if let EntryOutcome::Created(_) = outcome {
            self.save_cheque(&mut cheque)?;
        }
        Ok(outcome)
    }

    /// Runs the cheque bridge on a submitted payment entry, which persists it on success.
    pub fn submit_payment_entry(&mut self, entry: &mut PaymentEntry) -> ServiceResult<Option<String>> {
        PaymentEntryBridge::on_submit(
            entry,
            self.store.as_mut(),
            self.notifier.as_ref(),
            &self.config,
        )
    }
}
