use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::accounting::AccountingEntry;
use crate::domain::common::{Displayable, Identifiable};

/// Direction of a cheque relative to the company holding the books.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ChequeCategory {
    Incoming,
    Outgoing,
}

impl fmt::Display for ChequeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChequeCategory::Incoming => f.write_str("Incoming"),
            ChequeCategory::Outgoing => f.write_str("Outgoing"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum ChequeType {
    #[default]
    Opened,
    /// Bank-to-bank clearing only; never cashed at a teller.
    Crossed,
}

impl fmt::Display for ChequeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChequeType::Opened => f.write_str("Opened"),
            ChequeType::Crossed => f.write_str("Crossed"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Restriction {
    #[default]
    None,
    #[serde(rename = "First Beneficiary")]
    FirstBeneficiary,
}

impl fmt::Display for Restriction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Restriction::None => f.write_str("None"),
            Restriction::FirstBeneficiary => f.write_str("First Beneficiary"),
        }
    }
}

/// Real-world handling state of a cheque.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum ChequeStatus {
    #[default]
    Draft,
    #[serde(rename = "In Hand")]
    InHand,
    Issued,
    #[serde(rename = "Under Collection")]
    UnderCollection,
    Cleared,
    Bounced,
    Endorsed,
    Settled,
    Rejected,
    Cancelled,
}

/// Allowed successors for every status. `Cancelled` has none.
pub const TRANSITIONS: [(ChequeStatus, &[ChequeStatus]); 10] = {
    use ChequeStatus::*;
    [
        (Draft, &[InHand, Issued, Cancelled]),
        (InHand, &[UnderCollection, Endorsed, Cleared, Cancelled]),
        (UnderCollection, &[Cleared, Bounced, Cancelled]),
        (Cleared, &[Cancelled]),
        (Bounced, &[UnderCollection, Cancelled]),
        (Endorsed, &[UnderCollection, Cleared, Cancelled]),
        (Issued, &[Settled, Rejected, Cancelled]),
        (Settled, &[Cancelled]),
        (Rejected, &[Issued, Cancelled]),
        (Cancelled, &[]),
    ]
};

impl ChequeStatus {
    pub const ALL: [ChequeStatus; 10] = [
        ChequeStatus::Draft,
        ChequeStatus::InHand,
        ChequeStatus::Issued,
        ChequeStatus::UnderCollection,
        ChequeStatus::Cleared,
        ChequeStatus::Bounced,
        ChequeStatus::Endorsed,
        ChequeStatus::Settled,
        ChequeStatus::Rejected,
        ChequeStatus::Cancelled,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ChequeStatus::Draft => "Draft",
            ChequeStatus::InHand => "In Hand",
            ChequeStatus::Issued => "Issued",
            ChequeStatus::UnderCollection => "Under Collection",
            ChequeStatus::Cleared => "Cleared",
            ChequeStatus::Bounced => "Bounced",
            ChequeStatus::Endorsed => "Endorsed",
            ChequeStatus::Settled => "Settled",
            ChequeStatus::Rejected => "Rejected",
            ChequeStatus::Cancelled => "Cancelled",
        }
    }

    pub fn successors(&self) -> &'static [ChequeStatus] {
        TRANSITIONS
            .iter()
            .find(|(status, _)| status == self)
            .map(|(_, next)| *next)
            .unwrap_or(&[])
    }

    pub fn can_transition_to(&self, next: ChequeStatus) -> bool {
        self.successors().contains(&next)
    }

    pub fn is_terminal(&self) -> bool {
        self.successors().is_empty()
    }
}

impl fmt::Display for ChequeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ChequeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ChequeStatus::ALL
            .iter()
            .copied()
            .find(|status| {
                status.label().eq_ignore_ascii_case(wanted)
                    || format!("{status:?}").eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| format!("unknown cheque status `{wanted}`"))
    }
}

/// A negotiable payment instrument tracked through its handling lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cheque {
    /// Host-assigned identifier; `None` until first inserted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub cheque_number: String,
    pub category: ChequeCategory,
    #[serde(rename = "type", default)]
    pub cheque_type: ChequeType,
    #[serde(default)]
    pub restriction: Restriction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_fees: Option<Decimal>,
    #[serde(default)]
    pub issue_date: Option<NaiveDate>,
    #[serde(default)]
    pub maturity_date: Option<NaiveDate>,
    #[serde(default)]
    pub issuer_name: String,
    #[serde(default)]
    pub issuer_bank: String,
    #[serde(default)]
    pub issuer_branch: String,
    #[serde(default)]
    pub beneficiary_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endorsed_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_account_no: Option<String>,
    #[serde(default)]
    pub current_status: ChequeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_transaction_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_transaction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_location: Option<String>,
    #[serde(default)]
    pub accounting_entries: Vec<AccountingEntry>,
}

impl Cheque {
    /// Creates an unsaved draft cheque with default type and restriction.
    pub fn new(cheque_number: impl Into<String>, category: ChequeCategory, amount: Decimal) -> Self {
        Self {
            name: None,
            cheque_number: cheque_number.into(),
            category,
            cheque_type: ChequeType::default(),
            restriction: Restriction::default(),
            currency: None,
            amount,
            collection_fees: None,
            issue_date: None,
            maturity_date: None,
            issuer_name: String::new(),
            issuer_bank: String::new(),
            issuer_branch: String::new(),
            beneficiary_name: String::new(),
            endorsed_to: None,
            bank_account_no: None,
            current_status: ChequeStatus::Draft,
            related_transaction_type: None,
            related_transaction: None,
            physical_location: None,
            accounting_entries: Vec::new(),
        }
    }

    pub fn with_status(mut self, status: ChequeStatus) -> Self {
        self.current_status = status;
        self
    }

    pub fn with_type(mut self, cheque_type: ChequeType) -> Self {
        self.cheque_type = cheque_type;
        self
    }

    pub fn with_restriction(mut self, restriction: Restriction) -> Self {
        self.restriction = restriction;
        self
    }

    pub fn with_collection_fees(mut self, fees: Decimal) -> Self {
        self.collection_fees = Some(fees);
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.physical_location = Some(location.into());
        self
    }

    pub fn with_dates(mut self, issue: NaiveDate, maturity: NaiveDate) -> Self {
        self.issue_date = Some(issue);
        self.maturity_date = Some(maturity);
        self
    }

    pub fn endorse_to(mut self, supplier: impl Into<String>) -> Self {
        self.endorsed_to = Some(supplier.into());
        self
    }

    /// Collection fees with an absent value read as zero.
    pub fn fees(&self) -> Decimal {
        self.collection_fees.unwrap_or(Decimal::ZERO)
    }

    /// Substring match of the physical location against cash-handling keywords.
    pub fn is_at_cash_location<S: AsRef<str>>(&self, keywords: &[S]) -> bool {
        let location = self.physical_location.as_deref().unwrap_or_default();
        keywords
            .iter()
            .any(|keyword| !keyword.as_ref().is_empty() && location.contains(keyword.as_ref()))
    }
}

impl Identifiable for Cheque {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl Displayable for Cheque {
    fn display_label(&self) -> String {
        format!(
            "Cheque {} ({} {}, {})",
            self.cheque_number, self.category, self.cheque_type, self.current_status
        )
    }
}
