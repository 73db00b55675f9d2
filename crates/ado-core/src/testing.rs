//! Recording engine for tests.
//!
//! Enabled for this crate's tests and, through the `testing` feature, for
//! the tests of crates that drive a `QueryEngine`.

use parking_lot::Mutex;
use std::sync::Arc;

use crate::engine::{EngineFuture, QueryEngine};
use crate::error::EngineError;
use crate::response::Response;

/// One recorded engine call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    Query(String),
    Search(String),
    Lucky(String),
    FindCommunity(String),
    IsQuestion(String),
}

/// Engine returning canned answers and recording every call.
#[derive(Clone)]
pub struct MockEngine {
    pub calls: Arc<Mutex<Vec<EngineCall>>>,
    pub query_response: Arc<Mutex<Response>>,
    pub search_json: Arc<Mutex<String>>,
    pub lucky_url: Arc<Mutex<String>>,
    pub community: Arc<Mutex<String>>,
    pub question: Arc<Mutex<bool>>,
    /// When set, every operation fails with this script error.
    pub failure: Arc<Mutex<Option<String>>>,
}

impl MockEngine {
    /// Create a mock with empty answers.
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            query_response: Arc::new(Mutex::new(Response::PlainText {
                text: String::new(),
            })),
            search_json: Arc::new(Mutex::new(r#"{"items":[]}"#.to_string())),
            lucky_url: Arc::new(Mutex::new("https://example.com/".to_string())),
            community: Arc::new(Mutex::new("/r/all".to_string())),
            question: Arc::new(Mutex::new(false)),
            failure: Arc::new(Mutex::new(None)),
        }
    }

    /// Set the chat answer.
    pub fn with_query_response(self, response: Response) -> Self {
        *self.query_response.lock() = response;
        self
    }

    /// Set the search payload.
    pub fn with_search_json(self, json: impl Into<String>) -> Self {
        *self.search_json.lock() = json.into();
        self
    }

    /// Set the best-guess URL.
    pub fn with_lucky_url(self, url: impl Into<String>) -> Self {
        *self.lucky_url.lock() = url.into();
        self
    }

    /// Set the community path.
    pub fn with_community(self, path: impl Into<String>) -> Self {
        *self.community.lock() = path.into();
        self
    }

    /// Set the question classification.
    pub fn with_question(self, question: bool) -> Self {
        *self.question.lock() = question;
        self
    }

    /// Make every operation fail.
    pub fn failing(self, message: impl Into<String>) -> Self {
        *self.failure.lock() = Some(message.into());
        self
    }

    /// Snapshot of the recorded calls.
    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().clone()
    }

    fn answer<T: Send + 'static>(&self, call: EngineCall, value: T) -> EngineFuture<T> {
        self.calls.lock().push(call);
        let failure = self.failure.lock().clone();

        Box::pin(async move {
            match failure {
                Some(message) => Err(EngineError::Script(message)),
                None => Ok(value),
            }
        })
    }
}

impl Default for MockEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryEngine for MockEngine {
    fn query(&self, text: String) -> EngineFuture<Response> {
        let response = self.query_response.lock().clone();
        self.answer(EngineCall::Query(text), response)
    }

    fn search(&self, text: String) -> EngineFuture<String> {
        let json = self.search_json.lock().clone();
        self.answer(EngineCall::Search(text), json)
    }

    fn lucky(&self, text: String) -> EngineFuture<String> {
        let url = self.lucky_url.lock().clone();
        self.answer(EngineCall::Lucky(text), url)
    }

    fn find_community(&self, text: String) -> EngineFuture<String> {
        let path = self.community.lock().clone();
        self.answer(EngineCall::FindCommunity(text), path)
    }

    fn is_question(&self, text: String) -> EngineFuture<bool> {
        let question = *self.question.lock();
        self.answer(EngineCall::IsQuestion(text), question)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_engine_records_calls() {
        let engine = MockEngine::new().with_lucky_url("https://rust-lang.org/");

        let url = engine.lucky("rust".to_string()).await.unwrap();
        assert_eq!(url, "https://rust-lang.org/");
        assert_eq!(engine.calls(), vec![EngineCall::Lucky("rust".to_string())]);
    }

    #[tokio::test]
    async fn test_mock_engine_failing() {
        let engine = MockEngine::new().failing("boom");

        let err = engine.search("rust".to_string()).await.unwrap_err();
        assert_eq!(err.to_string(), "script error: boom");
        assert_eq!(engine.calls().len(), 1);
    }
}
