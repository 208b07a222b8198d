pub mod accounting_service;
pub mod bridge_service;
pub mod lifecycle_service;

pub use accounting_service::{AccountingService, EntryOutcome, EntryPlan};
pub use bridge_service::PaymentEntryBridge;
pub use lifecycle_service::LifecycleValidator;

use crate::core::errors::ValidationError;
use crate::errors::StoreError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ServiceError {
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            ServiceError::Validation(err) => Some(err),
            ServiceError::Store(_) => None,
        }
    }
}
