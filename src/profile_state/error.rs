use std::fmt;

use thiserror::Error;

use super::draft::DraftTarget;

/// Errors returned by `ProfileStateManager` operations.
///
/// Every failure is one of these four kinds. Nothing is retried or logged
/// here; the caller decides how to surface it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProfileError {
    #[error("Private mode is on; profile data is locked")]
    PrivacyLocked,

    #[error("Draft conflict on {target}: {reason}")]
    Conflict {
        target: DraftTarget,
        reason: &'static str,
    },

    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("Medication index {index} is out of range (stack has {len} entries)")]
    IndexOutOfRange { index: usize, len: usize },
}

impl ProfileError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Field name for validation failures.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// A commit that did not go through. The draft is handed back so the
/// caller can correct it and try again, or discard it.
pub struct Rejected<D> {
    pub error: ProfileError,
    pub draft: D,
}

impl<D> Rejected<D> {
    pub fn new(error: ProfileError, draft: D) -> Self {
        Self { error, draft }
    }

    pub fn into_error(self) -> ProfileError {
        self.error
    }
}

impl<D> From<Rejected<D>> for ProfileError {
    fn from(rejected: Rejected<D>) -> Self {
        rejected.error
    }
}

impl<D> fmt::Debug for Rejected<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rejected")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<D> fmt::Display for Rejected<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Commit rejected: {}", self.error)
    }
}

impl<D> std::error::Error for Rejected<D> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}
