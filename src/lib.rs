pub mod config;
pub mod core_state; // Mutex-serialized shared handle
pub mod models;
pub mod profile_state; // Profile + medication stack manager
pub mod snapshot; // Initial snapshot boundary
pub mod suggestions; // Goal/condition autosuggest

pub use core_state::{CoreError, CoreState};
pub use profile_state::{AllergyAction, ProfileError, ProfileStateManager};

use tracing_subscriber::EnvFilter;

/// Install the fmt subscriber. Safe to call more than once; later calls
/// leave the first subscriber in place.
pub fn init_tracing() {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init()
        .is_ok();

    if installed {
        tracing::info!("{} core v{}", config::APP_NAME, config::APP_VERSION);
    }
}
