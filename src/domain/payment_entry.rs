use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::cheque::{ChequeCategory, ChequeStatus, ChequeType, Restriction};
use crate::domain::common::{is_present, Displayable, Identifiable};

/// Payment-mode classification that routes a payment entry through the cheque bridge.
pub const CHEQUE_MODE: &str = "Cheque";

/// Document type written onto bridged cheques as their provenance.
pub const PAYMENT_ENTRY_DOCTYPE: &str = "Payment Entry";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentType {
    Receive,
    Pay,
    #[serde(rename = "Internal Transfer")]
    InternalTransfer,
}

impl PaymentType {
    /// Receipts become incoming cheques; every other direction is outgoing.
    pub fn cheque_category(&self) -> ChequeCategory {
        match self {
            PaymentType::Receive => ChequeCategory::Incoming,
            PaymentType::Pay | PaymentType::InternalTransfer => ChequeCategory::Outgoing,
        }
    }
}

/// Source financial transaction that may originate a cheque on submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentEntry {
    pub name: String,
    pub payment_type: PaymentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode_of_payment_type: Option<String>,
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party: Option<String>,
    pub paid_amount: Decimal,
    pub posting_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_to_account_currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cheque_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cheque_type: Option<ChequeType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cheque_restriction: Option<Restriction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer_bank: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer_branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_status: Option<ChequeStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maturity_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_account_no: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_no: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_cheque: Option<String>,
}

impl PaymentEntry {
    pub fn new(
        name: impl Into<String>,
        payment_type: PaymentType,
        company: impl Into<String>,
        paid_amount: Decimal,
        posting_date: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            payment_type,
            mode_of_payment_type: None,
            company: company.into(),
            party: None,
            paid_amount,
            posting_date,
            paid_to_account_currency: None,
            company_currency: None,
            cheque_number: None,
            cheque_type: None,
            cheque_restriction: None,
            issuer_bank: None,
            issuer_branch: None,
            current_status: None,
            maturity_date: None,
            bank_account_no: None,
            reference_no: None,
            reference_date: None,
            linked_cheque: None,
        }
    }

    /// Sets the cheque number and mirrors it into the payment reference.
    pub fn set_cheque_number(&mut self, number: impl Into<String>) {
        let number = number.into();
        if !number.trim().is_empty() {
            self.reference_no = Some(number.clone());
        }
        self.cheque_number = Some(number);
    }

    /// Sets the maturity date and mirrors it into the payment reference date.
    pub fn set_maturity_date(&mut self, date: NaiveDate) {
        self.maturity_date = Some(date);
        self.reference_date = Some(date);
    }

    pub fn is_cheque_payment(&self) -> bool {
        self.mode_of_payment_type.as_deref() == Some(CHEQUE_MODE)
    }

    pub fn is_linked(&self) -> bool {
        is_present(self.linked_cheque.as_deref())
    }
}

impl Identifiable for PaymentEntry {
    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }
}

impl Displayable for PaymentEntry {
    fn display_label(&self) -> String {
        format!("{} ({:?} {})", self.name, self.payment_type, self.paid_amount)
    }
}
