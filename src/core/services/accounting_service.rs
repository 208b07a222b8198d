//! Rule table that turns a cheque's state into balanced ledger-entry requests.

use rust_decimal::Decimal;

use crate::config::AccountMap;
use crate::domain::{
    AccountingEntry, Cheque, ChequeCategory, ChequeStatus, ChequeType, PartyType,
};

/// Result of evaluating the rule table for one cheque.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryPlan {
    Entries(Vec<AccountingEntry>),
    /// No rule covers this combination; nothing should be posted until one is defined.
    Unhandled {
        category: ChequeCategory,
        status: ChequeStatus,
        cheque_type: ChequeType,
    },
}

impl EntryPlan {
    pub fn entries(&self) -> &[AccountingEntry] {
        match self {
            EntryPlan::Entries(entries) => entries,
            EntryPlan::Unhandled { .. } => &[],
        }
    }
}

/// What `ensure_entries` did to the cheque.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryOutcome {
    Created(usize),
    AlreadyPresent,
    Unhandled {
        category: ChequeCategory,
        status: ChequeStatus,
        cheque_type: ChequeType,
    },
}

pub struct AccountingService;

impl AccountingService {
    /// Pure evaluation of the rule table. Rows come back in posting order.
    pub fn plan<S: AsRef<str>>(
        cheque: &Cheque,
        accounts: &AccountMap,
        cash_keywords: &[S],
    ) -> EntryPlan {
        let rows = match cheque.category {
            ChequeCategory::Incoming => Self::incoming_rows(cheque, accounts, cash_keywords),
            ChequeCategory::Outgoing => Self::outgoing_rows(cheque, accounts),
        };
        match rows {
            Some(rows) => EntryPlan::Entries(Self::stamp(cheque, rows)),
            None => EntryPlan::Unhandled {
                category: cheque.category,
                status: cheque.current_status,
                cheque_type: cheque.cheque_type,
            },
        }
    }

    /// Generates entries once. A cheque that already carries entries is left untouched.
    pub fn ensure_entries<S: AsRef<str>>(
        cheque: &mut Cheque,
        accounts: &AccountMap,
        cash_keywords: &[S],
    ) -> EntryOutcome {
        if !cheque.accounting_entries.is_empty() {
            return EntryOutcome::AlreadyPresent;
        }
        match Self::plan(cheque, accounts, cash_keywords) {
            EntryPlan::Entries(entries) => {
                let count = entries.len();
                cheque.accounting_entries.extend(entries);
                tracing::info!(
                    cheque = %cheque.cheque_number,
                    status = %cheque.current_status,
                    rows = count,
                    "accounting entries generated"
                );
                EntryOutcome::Created(count)
            }
            EntryPlan::Unhandled {
                category,
                status,
                cheque_type,
            } => {
                tracing::warn!(
                    cheque = %cheque.cheque_number,
                    %category,
                    %status,
                    %cheque_type,
                    "no accounting rule for cheque state"
                );
                EntryOutcome::Unhandled {
                    category,
                    status,
                    cheque_type,
                }
            }
        }
    }

    fn incoming_rows<S: AsRef<str>>(
        cheque: &Cheque,
        accounts: &AccountMap,
        cash_keywords: &[S],
    ) -> Option<Vec<AccountingEntry>> {
        let amount = cheque.amount;
        let rows = match cheque.current_status {
            ChequeStatus::InHand => vec![
                AccountingEntry::debit(&accounts.notes_under_hand, amount),
                AccountingEntry::credit(&accounts.customer, amount)
                    .with_party(PartyType::Customer, Some(cheque.issuer_name.clone())),
            ],
            ChequeStatus::Endorsed => vec![
                AccountingEntry::debit(&accounts.supplier, amount)
                    .with_party(PartyType::Supplier, cheque.endorsed_to.clone()),
                AccountingEntry::credit(&accounts.notes_under_hand, amount),
            ],
            ChequeStatus::UnderCollection => vec![
                AccountingEntry::debit(&accounts.notes_under_collection, amount),
                AccountingEntry::credit(&accounts.notes_under_hand, amount),
            ],
            ChequeStatus::Cleared => match cheque.cheque_type {
                ChequeType::Opened if cheque.is_at_cash_location(cash_keywords) => vec![
                    AccountingEntry::debit(&accounts.cash, amount),
                    AccountingEntry::credit(&accounts.notes_under_hand, amount),
                ],
                ChequeType::Opened | ChequeType::Crossed => Self::bank_clearing(cheque, accounts),
            },
            _ => return None,
        };
        Some(rows)
    }

    fn bank_clearing(cheque: &Cheque, accounts: &AccountMap) -> Vec<AccountingEntry> {
        let amount = cheque.amount;
        let fees = cheque.fees();
        let mut rows = vec![AccountingEntry::debit(&accounts.bank, amount)];
        if fees > Decimal::ZERO {
            rows.push(AccountingEntry::debit(&accounts.bank_fees, fees));
            rows.push(AccountingEntry::credit(
                &accounts.notes_under_collection,
                amount + fees,
            ));
        } else {
            rows.push(AccountingEntry::credit(&accounts.notes_under_collection, amount));
        }
        rows
    }

    fn outgoing_rows(cheque: &Cheque, accounts: &AccountMap) -> Option<Vec<AccountingEntry>> {
        let amount = cheque.amount;
        let supplier = Some(cheque.beneficiary_name.clone());
        let rows = match cheque.current_status {
            ChequeStatus::Issued => vec![
                AccountingEntry::credit(&accounts.supplier, amount)
                    .with_party(PartyType::Supplier, supplier),
                AccountingEntry::debit(&accounts.notes_payable, amount),
            ],
            ChequeStatus::Settled => vec![
                AccountingEntry::credit(&accounts.notes_payable, amount),
                AccountingEntry::debit(&accounts.bank, amount),
            ],
            ChequeStatus::Rejected => vec![
                AccountingEntry::credit(&accounts.notes_payable, amount),
                AccountingEntry::debit(&accounts.supplier, amount)
                    .with_party(PartyType::Supplier, supplier),
            ],
            _ => return None,
        };
        Some(rows)
    }

    /// Fills the audit back-reference and remark shared by every row of a batch.
    fn stamp(cheque: &Cheque, rows: Vec<AccountingEntry>) -> Vec<AccountingEntry> {
        let remarks = format!("Cheque {} - {}", cheque.cheque_number, cheque.current_status);
        rows.into_iter()
            .map(|mut row| {
                row.reference_name = cheque.name.clone();
                row.remarks = remarks.clone();
                row
            })
            .collect()
    }
}
