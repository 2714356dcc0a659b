//! Error taxonomy for K-Means clustering
//! Every fallible operation in the crate reports one of these variants
//! before touching the model or the caller's label storage

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum KmeansError {
    /// A precondition on the caller's arguments does not hold
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Backing storage for centroids or labels could not be reserved
    #[error("failed to allocate {requested} elements for {what}")]
    AllocationFailure {
        what: &'static str,
        requested: usize,
    },
    /// A point does not have the dimension of the model it is compared with
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        expected: usize,
        found: usize,
    },
}

pub type Result<T> = std::result::Result<T, KmeansError>;

impl KmeansError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}
