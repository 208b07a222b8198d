mod common;

use cheque_core::{
    config::Config,
    domain::{accounting::is_balanced, ChequeStatus, ChequeType},
    EntryOutcome, ServiceError, ValidationError,
};
use common::{incoming, manager_with, money, outgoing, setup_test_env};
use rust_decimal::Decimal;

fn rows(entries: &[cheque_core::domain::AccountingEntry]) -> Vec<(&str, Decimal, Decimal)> {
    entries
        .iter()
        .map(|row| (row.account.as_str(), row.debit, row.credit))
        .collect()
}

#[test]
fn cleared_opened_cheque_at_bank_with_fees() {
    let (mut manager, _, _) = setup_test_env();
    let mut cheque = incoming("200100", ChequeStatus::Cleared)
        .with_type(ChequeType::Opened)
        .with_location("Bank Vault")
        .with_collection_fees(money(50));
    let name = manager.save_cheque(&mut cheque).unwrap();

    assert_eq!(
        manager.create_accounting_entries(&name).unwrap(),
        EntryOutcome::Created(3)
    );
    let stored = manager.store().load_cheque(&name).unwrap();
    assert_eq!(
        rows(&stored.accounting_entries),
        vec![
            ("Bank Account", money(1000), Decimal::ZERO),
            ("Bank Fees Account", money(50), Decimal::ZERO),
            ("Notes Under Collection", Decimal::ZERO, money(1050)),
        ]
    );
    assert!(is_balanced(&stored.accounting_entries));
    assert!(stored
        .accounting_entries
        .iter()
        .all(|row| row.remarks == "Cheque 200100 - Cleared"));
}

#[test]
fn settled_outgoing_cheque() {
    let (mut manager, _, _) = setup_test_env();
    let mut cheque = outgoing("900100", ChequeStatus::Settled);
    let name = manager.save_cheque(&mut cheque).unwrap();

    manager.create_accounting_entries(&name).unwrap();
    let stored = manager.store().load_cheque(&name).unwrap();
    assert_eq!(
        rows(&stored.accounting_entries),
        vec![
            ("Notes Payable", Decimal::ZERO, money(500)),
            ("Bank Account", money(500), Decimal::ZERO),
        ]
    );
}

#[test]
fn second_request_adds_nothing() {
    let (mut manager, _, _) = setup_test_env();
    let mut cheque = incoming("200200", ChequeStatus::InHand);
    let name = manager.save_cheque(&mut cheque).unwrap();

    manager.create_accounting_entries(&name).unwrap();
    assert_eq!(
        manager.create_accounting_entries(&name).unwrap(),
        EntryOutcome::AlreadyPresent
    );
    let stored = manager.store().load_cheque(&name).unwrap();
    assert_eq!(stored.accounting_entries.len(), 2);
}

#[test]
fn entries_are_not_regenerated_after_status_change() {
    let (mut manager, _, _) = setup_test_env();
    let mut cheque = incoming("200300", ChequeStatus::InHand);
    let name = manager.save_cheque(&mut cheque).unwrap();
    manager.create_accounting_entries(&name).unwrap();

    let mut cheque = manager.store().load_cheque(&name).unwrap();
    cheque.current_status = ChequeStatus::UnderCollection;
    manager.save_cheque(&mut cheque).unwrap();

    assert_eq!(
        manager.create_accounting_entries(&name).unwrap(),
        EntryOutcome::AlreadyPresent
    );
}

#[test]
fn uncovered_state_is_reported_and_not_persisted() {
    let (mut manager, _, _) = setup_test_env();
    let mut cheque = outgoing("900200", ChequeStatus::Issued);
    let name = manager.save_cheque(&mut cheque).unwrap();
    cheque.current_status = ChequeStatus::Cancelled;
    manager.save_cheque(&mut cheque).unwrap();

    let outcome = manager.create_accounting_entries(&name).unwrap();
    assert!(matches!(
        outcome,
        EntryOutcome::Unhandled {
            status: ChequeStatus::Cancelled,
            ..
        }
    ));
    let stored = manager.store().load_cheque(&name).unwrap();
    assert!(stored.accounting_entries.is_empty());
}

#[test]
fn configured_accounts_and_keywords_drive_generation() {
    let mut config = Config::default();
    config.accounts.cash = "Treasury Drawer".into();
    config.cash_location_keywords = vec!["Treasury".into()];
    let mut manager = manager_with(config);

    let mut cheque = incoming("200400", ChequeStatus::Cleared).with_location("Treasury Room");
    let name = manager.save_cheque(&mut cheque).unwrap();
    manager.create_accounting_entries(&name).unwrap();

    let stored = manager.store().load_cheque(&name).unwrap();
    assert_eq!(stored.accounting_entries[0].account, "Treasury Drawer");
    assert_eq!(stored.accounting_entries[1].account, "Notes Under Hand");
}

#[test]
fn generated_entries_cannot_be_cleared_or_rewritten() {
    let (mut manager, _, _) = setup_test_env();
    let mut cheque = incoming("200500", ChequeStatus::InHand);
    let name = manager.save_cheque(&mut cheque).unwrap();
    manager.create_accounting_entries(&name).unwrap();

    let mut cleared = manager.store().load_cheque(&name).unwrap();
    cleared.accounting_entries.clear();
    cleared.current_status = ChequeStatus::UnderCollection;
    assert!(matches!(
        manager.save_cheque(&mut cleared),
        Err(ServiceError::Validation(ValidationError::AccountingEntriesChanged))
    ));

    let mut rewritten = manager.store().load_cheque(&name).unwrap();
    rewritten.accounting_entries[0].debit = money(1);
    assert!(manager.save_cheque(&mut rewritten).is_err());

    let stored = manager.store().load_cheque(&name).unwrap();
    assert_eq!(stored.current_status, ChequeStatus::InHand);
    assert_eq!(stored.accounting_entries.len(), 2);
    assert_eq!(
        manager.create_accounting_entries(&name).unwrap(),
        EntryOutcome::AlreadyPresent
    );
}
