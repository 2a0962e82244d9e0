use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "PharmaGuide";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Private mode is on until the user turns it off.
pub const DEFAULT_PRIVATE_MODE: bool = true;

/// File name of the profile snapshot inside the data directory.
pub const SNAPSHOT_FILE_NAME: &str = "profile.json";

/// Get the application data directory
/// ~/PharmaGuide/ on all platforms. Falls back to the working directory
/// when no home directory can be determined.
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Get the path of the on-device profile snapshot
pub fn snapshot_path() -> PathBuf {
    app_data_dir().join(SNAPSHOT_FILE_NAME)
}

/// Filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "pharmaguide_lib=info"
}
