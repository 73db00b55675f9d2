//! Core types for the ado command bar.
//!
//! This crate contains the data shared by every other ado crate:
//! - Command parsing and the two-character prefix codes
//! - The tagged `Response` union and search result items
//! - The `QueryEngine` trait implemented by engine handles
//! - Configuration types
//! - Error types

mod command;
mod config;
mod engine;
mod error;
mod question;
mod response;
mod search;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use command::{Command, PrefixCode};
pub use config::{
    config_dir, AppConfig, EngineConfig, TransitionOptions, UrlConfig,
    CONFIG_FILE_NAME,
};
pub use engine::{EngineFuture, QueryEngine};
pub use error::{ConfigError, EngineError, ResponseError};
pub use question::looks_like_question;
pub use response::Response;
pub use search::{decode_items, rewrite_reddit_host, SearchResultItem};
