//! Error conversion from the core error type.

use keyguard_core::{ConflictReason, Error as CoreError};

use crate::Error;

/// Convert a core error to an executor Error, keeping every detail.
impl From<CoreError> for Error {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidInput { reason } => Error::InvalidInput { reason },
            CoreError::NotFound { entity, id } => Error::NotFound {
                entity: entity.to_string(),
                id: id.as_u64(),
            },
            CoreError::Conflict {
                reason: ConflictReason::KeyLocked { id },
            } => Error::KeyLocked { id: id.as_u64() },
            CoreError::Conflict {
                reason:
                    ConflictReason::VersionMismatch {
                        id,
                        expected,
                        actual,
                    },
            } => Error::VersionConflict {
                id: id.as_u64(),
                expected: expected.as_u64(),
                actual: actual.as_u64(),
            },
            CoreError::Internal { message } => Error::Internal { reason: message },
        }
    }
}
