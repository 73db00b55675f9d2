//! Command bar controller.
//!
//! Owns the engine handle, router, renderer and sequencer, and performs the
//! side effect of each dispatch. Engine failures on either entry point are
//! rendered, never propagated.

use std::sync::Arc;

use ado_core::QueryEngine;
use ado_router::{Dispatch, Router};
use url::form_urlencoded;

use crate::renderer::Renderer;
use crate::transition::{Sequencer, TransitionOutcome};

/// Query-string parameter carrying the initial command.
pub const INITIAL_COMMAND_PARAM: &str = "q";

/// What one submission did.
#[derive(Debug, Clone, PartialEq)]
pub enum Submitted {
    /// Blank input, nothing dispatched.
    Ignored,
    /// A response was rendered.
    Rendered,
    /// The engine failed; the error was rendered.
    Failed,
    /// The page navigated away.
    Navigated(TransitionOutcome),
}

pub struct CommandBar {
    engine: Arc<dyn QueryEngine>,
    router: Router,
    renderer: Renderer,
    sequencer: Sequencer,
}

impl CommandBar {
    pub fn new(
        engine: Arc<dyn QueryEngine>,
        router: Router,
        renderer: Renderer,
        sequencer: Sequencer,
    ) -> Self {
        Self {
            engine,
            router,
            renderer,
            sequencer,
        }
    }

    /// Interactive submission: clear, echo the raw line, then dispatch.
    pub async fn submit(&mut self, raw: &str) -> Submitted {
        if raw.trim().is_empty() {
            return Submitted::Ignored;
        }

        self.renderer.clear();
        self.renderer.echo(raw);
        self.dispatch(raw).await
    }

    /// Initial command from the page location. No echo, nothing cleared.
    pub async fn run_initial(&mut self, raw: &str) -> Submitted {
        if raw.trim().is_empty() {
            return Submitted::Ignored;
        }

        tracing::info!("Running initial command");
        self.dispatch(raw).await
    }

    async fn dispatch(&mut self, raw: &str) -> Submitted {
        match self.router.dispatch(self.engine.as_ref(), raw).await {
            Ok(Dispatch::Render(response)) => {
                tracing::debug!("Rendering {} response", response.kind());
                self.renderer.render(response);
                Submitted::Rendered
            }
            Ok(Dispatch::Navigate(destination)) => {
                Submitted::Navigated(self.sequencer.navigate(destination).await)
            }
            Err(e) => {
                tracing::error!("Dispatch failed: {}", e);
                self.renderer.render_error(&e);
                Submitted::Failed
            }
        }
    }
}

/// The initial command carried by a query string such as `?q=s+rust`.
///
/// Accepts the query with or without its leading `?`. Blank values count as
/// absent.
pub fn initial_command(query: &str) -> Option<String> {
    let query = query.strip_prefix('?').unwrap_or(query);

    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == INITIAL_COMMAND_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.trim().is_empty())
}
