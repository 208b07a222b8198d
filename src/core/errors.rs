use thiserror::Error;

use crate::domain::ChequeStatus;

/// User-facing validation failures. Each one aborts the triggering save or submit.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required when creating a new cheque")]
    MissingField { field: &'static str },
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition { from: ChequeStatus, to: ChequeStatus },
    #[error("First Beneficiary cheques cannot be endorsed.")]
    FirstBeneficiaryEndorsed,
    #[error("Crossed cheques cannot be cashed at teller. They must be deposited.")]
    CrossedChequeCashed,
    #[error("Maturity Date cannot be before Issue Date")]
    MaturityBeforeIssue,
    #[error("Amount must be greater than zero")]
    NonPositiveAmount,
    #[error("Collection Fees cannot be negative")]
    NegativeCollectionFees,
    #[error("Please specify the supplier to whom the cheque is endorsed.")]
    MissingEndorsee,
    #[error("Accounting entries cannot be changed once they have been created")]
    AccountingEntriesChanged,
}
