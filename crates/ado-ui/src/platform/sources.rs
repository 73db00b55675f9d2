//! Local token, identity and configuration sources.
//!
//! All of them read files under the config directory and report any failure
//! as "no value".

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::bootstrap::{ConfigStore, Identity, IdentitySource, TokenSource};

/// Environment variable that overrides the token file.
pub const TOKEN_ENV: &str = "ADO_TOKEN";

async fn read_trimmed(path: &Path) -> Option<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(contents) => Some(contents.trim().to_string()),
        Err(e) => {
            tracing::debug!(path = ?path, "read failed: {}", e);
            None
        }
    }
}

/// Token from `$ADO_TOKEN`, falling back to a token file.
#[derive(Debug, Clone)]
pub struct LocalTokenSource {
    path: PathBuf,
    env_var: Option<String>,
}

impl LocalTokenSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            env_var: Some(TOKEN_ENV.to_string()),
        }
    }

    /// Ignore the environment.
    pub fn file_only(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            env_var: None,
        }
    }
}

#[async_trait]
impl TokenSource for LocalTokenSource {
    async fn fetch_token(&self) -> Option<String> {
        if let Some(token) = self
            .env_var
            .as_deref()
            .and_then(|var| std::env::var(var).ok())
            .filter(|token| !token.trim().is_empty())
        {
            return Some(token.trim().to_string());
        }

        read_trimmed(&self.path).await.filter(|t| !t.is_empty())
    }
}

/// Identity stored as JSON.
#[derive(Debug, Clone)]
pub struct LocalIdentitySource {
    path: PathBuf,
}

impl LocalIdentitySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl IdentitySource for LocalIdentitySource {
    async fn fetch_identity(&self) -> Option<Identity> {
        let blob = read_trimmed(&self.path).await?;
        match serde_json::from_str(&blob) {
            Ok(identity) => Some(identity),
            Err(e) => {
                tracing::warn!(path = ?self.path, "identity did not parse: {}", e);
                None
            }
        }
    }
}

/// Configuration blobs as files; relative locations resolve against `root`.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    root: PathBuf,
}

impl FileConfigStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ConfigStore for FileConfigStore {
    async fn fetch(&self, location: &str) -> Option<String> {
        let path = self.root.join(location);
        match tokio::fs::read_to_string(&path).await {
            Ok(blob) => Some(blob),
            Err(e) => {
                tracing::debug!(path = ?path, "config read failed: {}", e);
                None
            }
        }
    }
}
