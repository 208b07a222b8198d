//! Creates a cheque record when a cheque-mode payment entry is submitted.

use crate::config::Config;
use crate::core::errors::ValidationError;
use crate::core::services::{LifecycleValidator, ServiceResult};
use crate::domain::common::is_present;
use crate::domain::payment_entry::PAYMENT_ENTRY_DOCTYPE;
use crate::domain::{Cheque, PaymentEntry, PaymentType};
use crate::storage::{DocumentStore, Notifier};

pub struct PaymentEntryBridge;

impl PaymentEntryBridge {
    /// Submission hook. Persists the entry and returns the new cheque's identifier, or
    /// `None` when the entry is not paid by cheque or already links to one. A rejected
    /// submission writes nothing.
    pub fn on_submit(
        entry: &mut PaymentEntry,
        store: &mut dyn DocumentStore,
        notifier: &dyn Notifier,
        config: &Config,
    ) -> ServiceResult<Option<String>> {
        Self::adopt_persisted_link(entry, &*store)?;
        if !Self::applies_to(entry) {
            store.save_payment_entry(entry)?;
            return Ok(None);
        }
        Self::validate_fields(entry)?;

        let mut cheque = Self::build_cheque(entry, &*store, config)?;
        LifecycleValidator::validate(None, &cheque, &config.cash_location_keywords)?;
        let name = store.insert_cheque(&mut cheque)?;
        store.save_payment_entry(entry)?;
        store.set_payment_entry_link(&entry.name, &name)?;
        entry.linked_cheque = Some(name.clone());

        tracing::info!(
            cheque = %name,
            payment_entry = %entry.name,
            "cheque created from payment entry"
        );
        notifier.notify(&format!(
            "Cheque {} created successfully from Payment Entry {}",
            name, entry.name
        ));
        Ok(Some(name))
    }

    pub fn applies_to(entry: &PaymentEntry) -> bool {
        entry.is_cheque_payment() && !entry.is_linked()
    }

    /// Copies a link already written to the stored entry onto a copy that lacks it.
    fn adopt_persisted_link(
        entry: &mut PaymentEntry,
        store: &dyn DocumentStore,
    ) -> ServiceResult<()> {
        if entry.is_linked() {
            return Ok(());
        }
        if let Some(stored) = store.previous_payment_entry(&entry.name)? {
            if stored.is_linked() {
                tracing::debug!(
                    payment_entry = %entry.name,
                    cheque = ?stored.linked_cheque,
                    "payment entry already linked"
                );
                entry.linked_cheque = stored.linked_cheque;
            }
        }
        Ok(())
    }

    /// Fails on the first missing cheque field, in form order.
    pub fn validate_fields(entry: &PaymentEntry) -> Result<(), ValidationError> {
        let missing = if !is_present(entry.cheque_number.as_deref()) {
            Some("Cheque Number")
        } else if entry.cheque_type.is_none() {
            Some("Cheque Type")
        } else if !is_present(entry.issuer_bank.as_deref()) {
            Some("Issuer Bank")
        } else if entry.current_status.is_none() {
            Some("Current Status")
        } else if entry.maturity_date.is_none() {
            Some("Maturity Date")
        } else {
            None
        };
        match missing {
            Some(field) => Err(ValidationError::MissingField { field }),
            None => Ok(()),
        }
    }

    /// Maps the payment entry onto a new, unsaved cheque.
    pub fn build_cheque(
        entry: &PaymentEntry,
        store: &dyn DocumentStore,
        config: &Config,
    ) -> ServiceResult<Cheque> {
        let number = entry.cheque_number.clone().unwrap_or_default();
        let mut cheque = Cheque::new(
            number.trim(),
            entry.payment_type.cheque_category(),
            entry.paid_amount,
        );
        cheque.cheque_type = entry.cheque_type.unwrap_or_default();
        cheque.restriction = entry.cheque_restriction.unwrap_or_default();
        cheque.currency = Some(Self::resolve_currency(entry, store, config)?);
        cheque.issue_date = Some(entry.posting_date);
        cheque.maturity_date = Some(entry.maturity_date.unwrap_or(entry.posting_date));
        cheque.current_status = entry.current_status.unwrap_or_default();

        let party = entry.party.clone().unwrap_or_default();
        if entry.payment_type == PaymentType::Receive {
            cheque.issuer_name = party;
            cheque.beneficiary_name = entry.company.clone();
        } else {
            cheque.issuer_name = entry.company.clone();
            cheque.beneficiary_name = party;
        }

        cheque.issuer_bank = entry.issuer_bank.clone().unwrap_or_default();
        cheque.issuer_branch = entry.issuer_branch.clone().unwrap_or_default();
        cheque.bank_account_no = entry.bank_account_no.clone();
        cheque.related_transaction_type = Some(PAYMENT_ENTRY_DOCTYPE.to_string());
        cheque.related_transaction = Some(entry.name.clone());
        Ok(cheque)
    }

    /// Paid-to account currency, then company currency, then the company's cached default,
    /// then the configured fallback.
    pub fn resolve_currency(
        entry: &PaymentEntry,
        store: &dyn DocumentStore,
        config: &Config,
    ) -> ServiceResult<String> {
        let direct = [&entry.paid_to_account_currency, &entry.company_currency]
            .into_iter()
            .flatten()
            .find(|code| !code.trim().is_empty())
            .cloned();
        if let Some(code) = direct {
            return Ok(code);
        }
        let company_default = store
            .company_default_currency(&entry.company)?
            .filter(|code| !code.trim().is_empty());
        Ok(company_default.unwrap_or_else(|| config.default_currency.clone()))
    }
}
