//! Terminal platform: the page surfaces and client-side state as files under
//! the config directory.

mod sources;
mod storage;
mod terminal;

use std::path::{Path, PathBuf};

use ado_core::{AppConfig, CONFIG_FILE_NAME};
use uuid::Uuid;

use crate::bootstrap::Identity;
use crate::error::PlatformError;

pub use sources::{FileConfigStore, LocalIdentitySource, LocalTokenSource, TOKEN_ENV};
pub use storage::JsonFileStore;
pub use terminal::{SystemNavigator, TerminalArea, TerminalScreen, HOME_LOCATION};

pub const TOKEN_FILE: &str = "token";
pub const IDENTITY_FILE: &str = "identity.json";
pub const STORE_FILE: &str = "storage.json";

/// Write a starter setup into `dir`: token, identity, configuration and the
/// sample engine script.
///
/// Existing files are left alone. Returns the files written.
pub fn init_config_dir(dir: &Path, user_id: &str) -> Result<Vec<PathBuf>, PlatformError> {
    std::fs::create_dir_all(dir)?;

    let config = AppConfig::default();
    let identity = Identity {
        user_id: user_id.to_string(),
        config_location: CONFIG_FILE_NAME.to_string(),
    };

    let files: [(PathBuf, String); 4] = [
        (TOKEN_FILE.into(), format!("{}\n", Uuid::new_v4())),
        (
            IDENTITY_FILE.into(),
            serde_json::to_string_pretty(&identity)
                .map_err(|e| PlatformError::Serialize(e.to_string()))?,
        ),
        (
            CONFIG_FILE_NAME.into(),
            toml::to_string_pretty(&config).map_err(|e| PlatformError::Serialize(e.to_string()))?,
        ),
        (config.engine.script.clone(), ado_script::SAMPLE_SCRIPT.to_string()),
    ];

    let mut written = Vec::new();
    for (name, contents) in files {
        let path = dir.join(&name);
        if path.exists() {
            tracing::info!(path = ?path, "keeping existing file");
            continue;
        }
        std::fs::write(&path, contents)?;
        written.push(path);
    }

    Ok(written)
}
