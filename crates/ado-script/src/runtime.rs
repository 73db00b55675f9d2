//! Persistent Lua runtime with thread-safe async access.
//!
//! The Lua state is owned by a dedicated OS thread; callers send closures
//! over a channel and await the JSON result.

use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use ado_core::EngineError;
use mlua::Lua;
use tokio::sync::oneshot;

/// Type alias for Lua closure functions.
type LuaFn = Box<dyn FnOnce(&Lua) -> Result<serde_json::Value, String> + Send>;

/// Request types for the Lua runtime thread.
pub enum LuaRequest {
    /// Execute arbitrary code on the Lua thread.
    WithLua {
        func: LuaFn,
        resp: oneshot::Sender<Result<serde_json::Value, String>>,
    },
    Shutdown,
}

/// Lua runtime running on its own OS thread.
///
/// Engine calls arrive from async tasks; the Lua state never leaves the
/// thread that loaded the script.
pub struct LuaRuntime {
    tx: mpsc::Sender<LuaRequest>,
    _handle: JoinHandle<()>,
}

impl LuaRuntime {
    /// Start the runtime thread. MUST use std::thread::spawn, NOT tokio::spawn.
    pub fn new(lua: Lua) -> Self {
        let (tx, rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            tracing::info!("Lua engine thread started");

            while let Ok(request) = rx.recv() {
                match request {
                    LuaRequest::WithLua { func, resp } => {
                        let result = func(&lua);
                        let _ = resp.send(result);
                    }
                    LuaRequest::Shutdown => {
                        tracing::info!("Lua engine thread shutting down");
                        break;
                    }
                }
            }
        });

        Self {
            tx,
            _handle: handle,
        }
    }

    /// Execute a closure on the Lua thread and return its JSON result.
    pub async fn with_lua<F>(&self, f: F) -> Result<serde_json::Value, EngineError>
    where
        F: FnOnce(&Lua) -> Result<serde_json::Value, String> + Send + 'static,
    {
        let (resp_tx, resp_rx) = oneshot::channel();

        self.tx
            .send(LuaRequest::WithLua {
                func: Box::new(f),
                resp: resp_tx,
            })
            .map_err(|_| EngineError::RuntimeUnavailable)?;

        resp_rx
            .await
            .map_err(|_| EngineError::RuntimeUnavailable)?
            .map_err(EngineError::Script)
    }

    /// Execute with a timeout.
    ///
    /// The closure keeps running on the Lua thread after a timeout; only the
    /// caller stops waiting.
    pub async fn with_lua_timeout<F>(
        &self,
        timeout: Duration,
        f: F,
    ) -> Result<serde_json::Value, EngineError>
    where
        F: FnOnce(&Lua) -> Result<serde_json::Value, String> + Send + 'static,
    {
        match tokio::time::timeout(timeout, self.with_lua(f)).await {
            Ok(result) => result,
            Err(_) => Err(EngineError::Timeout { duration: timeout }),
        }
    }

    /// Shutdown the Lua runtime thread.
    pub fn shutdown(&self) {
        let _ = self.tx.send(LuaRequest::Shutdown);
    }
}

impl Drop for LuaRuntime {
    fn drop(&mut self) {
        self.shutdown();
    }
}
