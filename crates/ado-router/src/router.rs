//! Command dispatch.

use ado_core::{rewrite_reddit_host, Command, EngineError, QueryEngine, Response, UrlConfig};

use crate::table::{Handler, PrefixTable};
use crate::templates::UrlTemplates;

/// What the page should do with a dispatched command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Render into the result area.
    Render(Response),

    /// Leave the page for this destination.
    Navigate(String),
}

/// Maps input lines to exactly one [`Dispatch`].
#[derive(Debug, Clone, Default)]
pub struct Router {
    table: PrefixTable,
    templates: UrlTemplates,
}

impl Router {
    /// Router with the standard prefix table.
    pub fn new(urls: UrlConfig) -> Self {
        Self {
            table: PrefixTable::standard(),
            templates: UrlTemplates::new(urls),
        }
    }

    /// Replace the prefix table.
    pub fn with_table(mut self, table: PrefixTable) -> Self {
        self.table = table;
        self
    }

    /// Resolve one raw input line.
    ///
    /// Engine calls are awaited before returning, so a single dispatch never
    /// renders out of order. Engine failures are returned to the caller.
    pub async fn dispatch(
        &self,
        engine: &dyn QueryEngine,
        raw: &str,
    ) -> Result<Dispatch, EngineError> {
        let command = Command::parse(raw);

        match command.prefix.and_then(|code| self.table.handler(code)) {
            Some(handler) => {
                tracing::debug!("Routing {:?} via {:?}", command.prefix, handler);
                self.run(handler, engine, command.payload).await
            }
            None => self.fallback(engine, command.raw_text).await,
        }
    }

    async fn run(
        &self,
        handler: Handler,
        engine: &dyn QueryEngine,
        payload: String,
    ) -> Result<Dispatch, EngineError> {
        let dispatch = match handler {
            Handler::Search => {
                let items_json = engine.search(payload).await?;
                Dispatch::Render(Response::SearchResults { items_json })
            }
            Handler::Chat => Dispatch::Render(engine.query(payload).await?),
            Handler::Redirect(template) => {
                Dispatch::Navigate(self.templates.redirect(template, &payload))
            }
            Handler::Lucky { hint } => {
                let text = match hint {
                    Some(hint) => format!("{hint}{payload}"),
                    None => payload,
                };
                Dispatch::Navigate(engine.lucky(text).await?)
            }
            Handler::Community => {
                let path = engine.find_community(payload).await?;
                Dispatch::Navigate(self.templates.community(&path))
            }
        };

        Ok(dispatch)
    }

    /// No prefix: ask the engine whether this is a question.
    async fn fallback(
        &self,
        engine: &dyn QueryEngine,
        raw: String,
    ) -> Result<Dispatch, EngineError> {
        if engine.is_question(raw.clone()).await? {
            tracing::debug!("Fallback: question, querying engine");
            Ok(Dispatch::Render(engine.query(raw).await?))
        } else {
            tracing::debug!("Fallback: not a question, resolving best guess");
            let url = engine.lucky(raw).await?;
            Ok(Dispatch::Navigate(rewrite_reddit_host(&url)))
        }
    }
}
