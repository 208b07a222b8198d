use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::Displayable;

/// Document type recorded on every generated row as the audit back-reference.
pub const CHEQUE_DOCTYPE: &str = "Cheque";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PartyType {
    Customer,
    Supplier,
}

/// One debit-or-credit row in a cheque's ledger-entry collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountingEntry {
    pub id: Uuid,
    pub account: String,
    pub debit: Decimal,
    pub credit: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party_type: Option<PartyType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party: Option<String>,
    pub reference_doctype: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_name: Option<String>,
    pub remarks: String,
}

impl AccountingEntry {
    pub fn debit(account: impl Into<String>, amount: Decimal) -> Self {
        Self::row(account.into(), amount, Decimal::ZERO)
    }

    pub fn credit(account: impl Into<String>, amount: Decimal) -> Self {
        Self::row(account.into(), Decimal::ZERO, amount)
    }

    fn row(account: String, debit: Decimal, credit: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            account,
            debit,
            credit,
            party_type: None,
            party: None,
            reference_doctype: CHEQUE_DOCTYPE.to_string(),
            reference_name: None,
            remarks: String::new(),
        }
    }

    pub fn with_party(mut self, party_type: PartyType, party: Option<String>) -> Self {
        self.party_type = Some(party_type);
        self.party = party.filter(|value| !value.trim().is_empty());
        self
    }

    pub fn is_debit(&self) -> bool {
        self.debit > Decimal::ZERO
    }
}

impl Displayable for AccountingEntry {
    fn display_label(&self) -> String {
        if self.is_debit() {
            format!("{} Dr {}", self.account, self.debit)
        } else {
            format!("{} Cr {}", self.account, self.credit)
        }
    }
}

/// Sums debits and credits of a batch.
pub fn batch_totals(entries: &[AccountingEntry]) -> (Decimal, Decimal) {
    entries.iter().fold((Decimal::ZERO, Decimal::ZERO), |(dr, cr), entry| {
        (dr + entry.debit, cr + entry.credit)
    })
}

pub fn is_balanced(entries: &[AccountingEntry]) -> bool {
    let (debit, credit) = batch_totals(entries);
    debit == credit
}
