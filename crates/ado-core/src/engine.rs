//! The Query Engine seam.
//!
//! The engine is an opaque asynchronous service: it answers chat queries,
//! runs web searches, resolves best-guess and community URLs, and classifies
//! questions. The trait returns boxed futures so callers decide how to drive
//! them, and tests can plug in a recording engine.

use futures::future::BoxFuture;

use crate::error::EngineError;
use crate::response::Response;

/// Boxed future returned by every engine operation.
pub type EngineFuture<T> = BoxFuture<'static, Result<T, EngineError>>;

/// Operations the command router relies on.
pub trait QueryEngine: Send + Sync {
    /// Answer a chat query.
    fn query(&self, text: String) -> EngineFuture<Response>;

    /// Run a web search. Returns the serialized `{ "items": [...] }` payload.
    fn search(&self, text: String) -> EngineFuture<String>;

    /// Resolve a single best-guess URL.
    fn lucky(&self, text: String) -> EngineFuture<String>;

    /// Resolve a community path such as `/r/rust`.
    fn find_community(&self, text: String) -> EngineFuture<String>;

    /// Decide whether the text reads as a question.
    fn is_question(&self, text: String) -> EngineFuture<bool>;
}
