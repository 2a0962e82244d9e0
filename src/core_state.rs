//! Shared application state around the profile manager.
//!
//! `CoreState` is the handle the presentation layer holds. Every manager
//! call goes through one `Mutex`, so a draft open/commit/discard sequence
//! is atomic with respect to any background sync that shares the handle.

use std::sync::{Mutex, MutexGuard};

use crate::profile_state::{ProfileError, ProfileStateManager};
use crate::snapshot::{SnapshotError, SnapshotProvider};

// ═══════════════════════════════════════════════════════════
// CoreState
// ═══════════════════════════════════════════════════════════

/// Mutex-serialized owner of the session's `ProfileStateManager`.
///
/// Wrap in `Arc` to share between the UI and a sync task.
#[derive(Debug)]
pub struct CoreState {
    manager: Mutex<ProfileStateManager>,
}

impl CoreState {
    pub fn new(manager: ProfileStateManager) -> Self {
        Self {
            manager: Mutex::new(manager),
        }
    }

    /// Build the session state from a snapshot provider.
    pub fn load(provider: &dyn SnapshotProvider) -> Result<Self, CoreError> {
        let snapshot = provider.load()?;
        let manager = ProfileStateManager::from_snapshot(&snapshot)?;
        tracing::info!(
            private_mode = manager.is_private(),
            "Profile state initialised"
        );
        Ok(Self::new(manager))
    }

    /// Acquire the manager for a sequence of calls.
    pub fn lock(&self) -> Result<MutexGuard<'_, ProfileStateManager>, CoreError> {
        self.manager.lock().map_err(|_| CoreError::LockPoisoned)
    }

    /// Run one closure against the manager under the lock.
    pub fn with_manager<R>(
        &self,
        f: impl FnOnce(&mut ProfileStateManager) -> R,
    ) -> Result<R, CoreError> {
        let mut guard = self.lock()?;
        Ok(f(&mut *guard))
    }

    /// Write committed state through `provider`.
    pub fn persist(&self, provider: &dyn SnapshotProvider) -> Result<(), CoreError> {
        let snapshot = self.lock()?.snapshot();
        provider.store(&snapshot)?;
        Ok(())
    }

    /// Convenience read used by status surfaces.
    pub fn is_private(&self) -> Result<bool, CoreError> {
        Ok(self.lock()?.is_private())
    }
}

// ═══════════════════════════════════════════════════════════
// Error types
// ═══════════════════════════════════════════════════════════

/// Errors from CoreState operations.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Internal lock error")]
    LockPoisoned,
    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
