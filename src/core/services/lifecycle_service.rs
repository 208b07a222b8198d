//! Pre-save consistency checks for cheque records.

use rust_decimal::Decimal;

use crate::core::errors::ValidationError;
use crate::domain::common::is_present;
use crate::domain::{Cheque, ChequeStatus, ChequeType, Restriction};

/// Validates a cheque before every write. Stateless; callers supply the last persisted
/// version (if any) and the cash-location keywords in effect.
pub struct LifecycleValidator;

impl LifecycleValidator {
    /// Runs every check in order and stops at the first violation.
    pub fn validate<S: AsRef<str>>(
        previous: Option<&Cheque>,
        cheque: &Cheque,
        cash_keywords: &[S],
    ) -> Result<(), ValidationError> {
        Self::validate_restrictions(cheque, cash_keywords)?;
        if let Some(previous) = previous {
            Self::validate_transition(previous.current_status, cheque.current_status)?;
            Self::validate_entries_unchanged(previous, cheque)?;
        }
        Self::validate_dates(cheque)?;
        Self::validate_amounts(cheque)?;
        Self::validate_endorsement(cheque)
    }

    /// A changed status must be an allowed successor of the persisted one.
    pub fn validate_transition(
        from: ChequeStatus,
        to: ChequeStatus,
    ) -> Result<(), ValidationError> {
        if from == to || from.can_transition_to(to) {
            Ok(())
        } else {
            Err(ValidationError::InvalidTransition { from, to })
        }
    }

    /// Entries are written once; after that every save must carry them unchanged.
    pub fn validate_entries_unchanged(
        previous: &Cheque,
        cheque: &Cheque,
    ) -> Result<(), ValidationError> {
        if previous.accounting_entries.is_empty()
            || previous.accounting_entries == cheque.accounting_entries
        {
            Ok(())
        } else {
            Err(ValidationError::AccountingEntriesChanged)
        }
    }

    pub fn validate_restrictions<S: AsRef<str>>(
        cheque: &Cheque,
        cash_keywords: &[S],
    ) -> Result<(), ValidationError> {
        if cheque.restriction == Restriction::FirstBeneficiary
            && cheque.current_status == ChequeStatus::Endorsed
        {
            return Err(ValidationError::FirstBeneficiaryEndorsed);
        }
        if cheque.cheque_type == ChequeType::Crossed
            && cheque.current_status == ChequeStatus::Cleared
            && cheque.is_at_cash_location(cash_keywords)
        {
            return Err(ValidationError::CrossedChequeCashed);
        }
        Ok(())
    }

    pub fn validate_dates(cheque: &Cheque) -> Result<(), ValidationError> {
        match (cheque.issue_date, cheque.maturity_date) {
            (Some(issue), Some(maturity)) if maturity < issue => {
                Err(ValidationError::MaturityBeforeIssue)
            }
            _ => Ok(()),
        }
    }

    pub fn validate_amounts(cheque: &Cheque) -> Result<(), ValidationError> {
        if cheque.amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount);
        }
        if cheque.fees() < Decimal::ZERO {
            return Err(ValidationError::NegativeCollectionFees);
        }
        Ok(())
    }

    pub fn validate_endorsement(cheque: &Cheque) -> Result<(), ValidationError> {
        if cheque.current_status == ChequeStatus::Endorsed
            && !is_present(cheque.endorsed_to.as_deref())
        {
            Err(ValidationError::MissingEndorsee)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ChequeCategory;
    use chrono::NaiveDate;

    const KEYWORDS: [&str; 2] = ["Cash", "Safe"];

    fn incoming(status: ChequeStatus) -> Cheque {
        Cheque::new("000777", ChequeCategory::Incoming, Decimal::new(1000, 0)).with_status(status)
    }

    fn check(previous: Option<&Cheque>, cheque: &Cheque) -> Result<(), ValidationError> {
        LifecycleValidator::validate(previous, cheque, &KEYWORDS)
    }

    #[test]
    fn transition_allowed_iff_listed() {
        for from in ChequeStatus::ALL {
            for to in ChequeStatus::ALL {
                let result = LifecycleValidator::validate_transition(from, to);
                if from == to || from.successors().contains(&to) {
                    assert!(result.is_ok(), "{from} -> {to} should pass");
                } else {
                    assert_eq!(
                        result,
                        Err(ValidationError::InvalidTransition { from, to }),
                        "{from} -> {to} should fail"
                    );
                }
            }
        }
    }

    #[test]
    fn first_save_accepts_any_status() {
        let cheque = incoming(ChequeStatus::Cleared).with_location("Bank Vault");
        assert!(check(None, &cheque).is_ok());
    }

    #[test]
    fn update_rejects_skipped_transition() {
        let previous = incoming(ChequeStatus::InHand);
        let next = incoming(ChequeStatus::Bounced);
        assert_eq!(
            check(Some(&previous), &next),
            Err(ValidationError::InvalidTransition {
                from: ChequeStatus::InHand,
                to: ChequeStatus::Bounced,
            })
        );
    }

    #[test]
    fn cancelled_cheque_cannot_move() {
        let previous = incoming(ChequeStatus::Cancelled);
        let next = incoming(ChequeStatus::InHand);
        assert!(check(Some(&previous), &next).is_err());
    }

    #[test]
    fn first_beneficiary_cannot_be_endorsed() {
        let cheque = incoming(ChequeStatus::Endorsed)
            .with_restriction(Restriction::FirstBeneficiary)
            .endorse_to("SUP-0001");
        assert_eq!(
            check(None, &cheque),
            Err(ValidationError::FirstBeneficiaryEndorsed)
        );
    }

    #[test]
    fn crossed_cheque_cannot_clear_at_cash_location() {
        for location in ["Cash Desk", "Head Office Safe"] {
            let cheque = incoming(ChequeStatus::Cleared)
                .with_type(ChequeType::Crossed)
                .with_location(location);
            assert_eq!(
                check(None, &cheque),
                Err(ValidationError::CrossedChequeCashed)
            );
        }
        let deposited = incoming(ChequeStatus::Cleared)
            .with_type(ChequeType::Crossed)
            .with_location("Bank Vault");
        assert!(check(None, &deposited).is_ok());
    }

    #[test]
    fn maturity_must_not_precede_issue() {
        let issue = NaiveDate::from_ymd_opt(2026, 5, 10).unwrap();
        let early = NaiveDate::from_ymd_opt(2026, 5, 9).unwrap();
        let cheque = incoming(ChequeStatus::InHand).with_dates(issue, early);
        assert_eq!(check(None, &cheque), Err(ValidationError::MaturityBeforeIssue));

        let same_day = incoming(ChequeStatus::InHand).with_dates(issue, issue);
        assert!(check(None, &same_day).is_ok());

        let mut only_maturity = incoming(ChequeStatus::InHand);
        only_maturity.maturity_date = Some(early);
        assert!(check(None, &only_maturity).is_ok());
    }

    #[test]
    fn amount_and_fees_bounds() {
        let mut cheque = incoming(ChequeStatus::InHand);
        cheque.amount = Decimal::ZERO;
        assert_eq!(check(None, &cheque), Err(ValidationError::NonPositiveAmount));
        cheque.amount = Decimal::new(-5, 0);
        assert_eq!(check(None, &cheque), Err(ValidationError::NonPositiveAmount));

        let fees = incoming(ChequeStatus::InHand).with_collection_fees(Decimal::new(-1, 2));
        assert_eq!(
            check(None, &fees),
            Err(ValidationError::NegativeCollectionFees)
        );

        let zero_fees = incoming(ChequeStatus::InHand).with_collection_fees(Decimal::ZERO);
        assert!(check(None, &zero_fees).is_ok());
    }

    #[test]
    fn endorsed_requires_endorsee() {
        let previous = incoming(ChequeStatus::InHand);
        let missing = incoming(ChequeStatus::Endorsed);
        assert_eq!(
            check(Some(&previous), &missing),
            Err(ValidationError::MissingEndorsee)
        );
        let endorsed = incoming(ChequeStatus::Endorsed).endorse_to("SUP-0001");
        assert!(check(Some(&previous), &endorsed).is_ok());
    }

    #[test]
    fn posted_entries_are_frozen() {
        use crate::domain::AccountingEntry;

        let mut previous = incoming(ChequeStatus::InHand);
        let mut current = previous.clone().with_status(ChequeStatus::UnderCollection);
        assert!(check(Some(&previous), &current).is_ok());

        previous.accounting_entries = vec![
            AccountingEntry::debit("Notes Under Hand", Decimal::new(1000, 0)),
            AccountingEntry::credit("Customer Account", Decimal::new(1000, 0)),
        ];
        current.accounting_entries = previous.accounting_entries.clone();
        assert!(check(Some(&previous), &current).is_ok());

        current.accounting_entries.clear();
        assert_eq!(
            check(Some(&previous), &current),
            Err(ValidationError::AccountingEntriesChanged)
        );
        current.accounting_entries = previous.accounting_entries.clone();
        current.accounting_entries[1].credit = Decimal::new(900, 0);
        assert_eq!(
            check(Some(&previous), &current),
            Err(ValidationError::AccountingEntriesChanged)
        );
    }
}
