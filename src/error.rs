use thiserror::Error;

pub type Result<T> = std::result::Result<T, TxError>;

#[derive(Debug, Error)]
pub enum TxError {
    /// Raised by a commit visitor when pending changes violate a constraint.
    /// Propagated unchanged to the caller of `accept`; aborting the
    /// transaction is the caller's job.
    #[error("constraint validation failed: {0}")]
    ConstraintValidation(String),
    /// Raised by a commit visitor while materializing an added constraint.
    #[error("constraint creation failed: {0}")]
    CreateConstraintFailure(String),
    #[error("unsupported feature: {0}")]
    UnsupportedFeature(&'static str),
    #[error("transaction state corrupted: {0}")]
    Corruption(&'static str),
}
