//! Page bootstrap: authorization, identity, configuration, engine.
//!
//! ```text
//! authorize ──no──> Login
//!     │yes
//! identity (cache, then fetch) ──none──> Login
//!     │
//! config blob ──none / invalid──> Login
//!     │
//! build engine ──error──> Login
//!     │
//!   Ready
//! ```
//!
//! Network failures are treated as "no value"; every failure ends at the
//! login page rather than a blank page.

use std::fmt;
use std::sync::Arc;

use ado_core::{AppConfig, EngineError, QueryEngine};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[cfg(test)]
use mockall::automock;

/// Cookie holding the access token.
pub const TOKEN_COOKIE: &str = "token_id";

/// Valid tokens are UUID-formatted.
pub const TOKEN_LENGTH: usize = 36;

/// Cache key for the serialized identity.
pub const IDENTITY_CACHE_KEY: &str = "ado.identity";

// =============================================================================
// Seams
// =============================================================================

#[cfg_attr(test, automock)]
pub trait CookieJar: Send + Sync {
    fn get(&self, name: &str) -> Option<String>;
    fn set(&self, name: &str, value: &str);
}

#[cfg_attr(test, automock)]
pub trait KeyValueCache: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// Issues access tokens.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// `None` on any failure.
    async fn fetch_token(&self) -> Option<String>;
}

/// Looks up who is using the page.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait IdentitySource: Send + Sync {
    async fn fetch_identity(&self) -> Option<Identity>;
}

/// Fetches configuration blobs.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ConfigStore: Send + Sync {
    async fn fetch(&self, location: &str) -> Option<String>;
}

// =============================================================================
// Authorization
// =============================================================================

/// Whether the page may run.
///
/// An existing token cookie authorizes immediately. Otherwise a fresh token is
/// fetched; only a `TOKEN_LENGTH` token is accepted, and it is stored as the
/// cookie.
pub async fn authorize(cookies: &dyn CookieJar, tokens: &dyn TokenSource) -> bool {
    if cookies.get(TOKEN_COOKIE).is_some() {
        return true;
    }

    let Some(token) = tokens.fetch_token().await else {
        tracing::info!("No access token available");
        return false;
    };

    if token.chars().count() != TOKEN_LENGTH {
        tracing::warn!("Rejecting token of length {}", token.chars().count());
        return false;
    }

    cookies.set(TOKEN_COOKIE, &token);
    true
}

// =============================================================================
// Startup
// =============================================================================

/// User identity and where their configuration lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: String,
    pub config_location: String,
}

/// Why the page went to the login page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginReason {
    Unauthorized,
    NoIdentity,
    NoConfig,
    InvalidConfig(String),
    Engine(String),
}

impl fmt::Display for LoginReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoginReason::Unauthorized => write!(f, "not authorized"),
            LoginReason::NoIdentity => write!(f, "no user identity"),
            LoginReason::NoConfig => write!(f, "configuration not found"),
            LoginReason::InvalidConfig(e) => write!(f, "invalid configuration: {e}"),
            LoginReason::Engine(e) => write!(f, "engine unavailable: {e}"),
        }
    }
}

/// Everything the command bar needs to run.
pub struct Session {
    pub identity: Identity,
    pub config: AppConfig,
    pub engine: Arc<dyn QueryEngine>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("identity", &self.identity)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub enum Startup {
    Ready(Session),
    Login(LoginReason),
}

/// Bootstrap inputs.
pub struct Bootstrap<'a> {
    pub cookies: &'a dyn CookieJar,
    pub tokens: &'a dyn TokenSource,
    pub cache: &'a dyn KeyValueCache,
    pub identities: &'a dyn IdentitySource,
    pub configs: &'a dyn ConfigStore,
}

impl Bootstrap<'_> {
    /// Run the startup sequence.
    pub async fn resolve<F>(self, build_engine: F) -> Startup
    where
        F: FnOnce(&Identity, &AppConfig) -> Result<Arc<dyn QueryEngine>, EngineError>,
    {
        if !authorize(self.cookies, self.tokens).await {
            return Startup::Login(LoginReason::Unauthorized);
        }

        let Some(identity) = self.identity().await else {
            return Startup::Login(LoginReason::NoIdentity);
        };

        let Some(blob) = self.configs.fetch(&identity.config_location).await else {
            tracing::warn!("No configuration at '{}'", identity.config_location);
            return Startup::Login(LoginReason::NoConfig);
        };

        let config = match AppConfig::from_toml_str(&blob) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Configuration did not parse: {}", e);
                return Startup::Login(LoginReason::InvalidConfig(e.to_string()));
            }
        };

        let engine = match build_engine(&identity, &config) {
            Ok(engine) => engine,
            Err(e) => {
                tracing::error!("Failed to build engine: {}", e);
                return Startup::Login(LoginReason::Engine(e.to_string()));
            }
        };

        tracing::info!(user = %identity.user_id, "Bootstrap complete");
        Startup::Ready(Session {
            identity,
            config,
            engine,
        })
    }

    /// Cached identity, or a fresh one which is then cached.
    async fn identity(&self) -> Option<Identity> {
        if let Some(blob) = self.cache.get(IDENTITY_CACHE_KEY) {
            match serde_json::from_str(&blob) {
                Ok(identity) => return Some(identity),
                Err(e) => tracing::debug!("Discarding cached identity: {}", e),
            }
        }

        let identity = self.identities.fetch_identity().await?;
        match serde_json::to_string(&identity) {
            Ok(blob) => self.cache.set(IDENTITY_CACHE_KEY, &blob),
            Err(e) => tracing::warn!("Failed to cache identity: {}", e),
        }
        Some(identity)
    }
}
