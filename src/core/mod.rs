pub mod cheque_manager;
pub mod errors;
pub mod services;
pub mod utils;

pub use cheque_manager::ChequeManager;
pub use errors::ValidationError;
