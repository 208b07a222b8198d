pub mod accounting;
pub mod cheque;
pub mod common;
pub mod payment_entry;

pub use accounting::{AccountingEntry, PartyType};
pub use cheque::{Cheque, ChequeCategory, ChequeStatus, ChequeType, Restriction};
pub use common::{Displayable, Identifiable};
pub use payment_entry::{PaymentEntry, PaymentType};
