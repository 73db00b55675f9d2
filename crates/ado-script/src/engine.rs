//! Query Engine backed by a Lua script.
//!
//! The script defines a global `engine` table:
//!
//! ```lua
//! engine = {
//!   query = function(text) return { Markdown = "..." } end,  -- required
//!   search = function(text) return '{"items": []}' end,      -- required
//!   lucky = function(text) return "https://..." end,         -- required
//!   find_community = function(text) return "/r/rust" end,    -- required
//!   is_question = function(text) return true end,            -- optional
//! }
//! ```
//!
//! `query` may return a plain string, `"Reset"`, or a response table
//! (`String`, `Markdown`, `UsageString`, `SearchData`). `search` may return
//! the serialized payload or the `{ items = {...} }` table itself.

use std::sync::Arc;
use std::time::Duration;

use ado_core::{looks_like_question, EngineError, EngineFuture, QueryEngine, Response};
use mlua::{Function, Lua, Table, Value};

use crate::api::register_ado_api;
use crate::convert::lua_value_to_json;
use crate::runtime::LuaRuntime;

/// Name of the global table scripts must define.
pub const ENGINE_TABLE: &str = "engine";

const REQUIRED_FUNCTIONS: [&str; 4] = ["query", "search", "lucky", "find_community"];

/// Query Engine handle that forwards every operation to a Lua script.
pub struct ScriptEngine {
    runtime: Arc<LuaRuntime>,
    timeout: Duration,
}

impl ScriptEngine {
    /// Load `source` and check it defines the engine table.
    pub fn from_source(source: &str, name: &str, timeout: Duration) -> Result<Self, EngineError> {
        let lua = Lua::new();
        register_ado_api(&lua).map_err(|e| EngineError::Script(e.to_string()))?;

        lua.load(source)
            .set_name(name)
            .exec()
            .map_err(|e| EngineError::Script(e.to_string()))?;

        validate_engine_table(&lua)?;
        tracing::info!("Engine script '{}' loaded", name);

        Ok(Self {
            runtime: Arc::new(LuaRuntime::new(lua)),
            timeout,
        })
    }

    fn call(&self, function: &'static str, text: String) -> EngineFuture<serde_json::Value> {
        let runtime = self.runtime.clone();
        let timeout = self.timeout;

        Box::pin(async move {
            runtime
                .with_lua_timeout(timeout, move |lua| call_engine_fn(lua, function, text))
                .await
        })
    }
}

fn validate_engine_table(lua: &Lua) -> Result<(), EngineError> {
    let table: Option<Table> = lua
        .globals()
        .get(ENGINE_TABLE)
        .map_err(|_| EngineError::Script(format!("'{ENGINE_TABLE}' must be a table")))?;
    let table = table
        .ok_or_else(|| EngineError::Script(format!("script does not define '{ENGINE_TABLE}'")))?;

    for name in REQUIRED_FUNCTIONS {
        let func: Option<Function> = table
            .get(name)
            .map_err(|_| EngineError::Script(format!("{ENGINE_TABLE}.{name} must be a function")))?;
        if func.is_none() {
            return Err(EngineError::Script(format!(
                "{ENGINE_TABLE}.{name} is not defined"
            )));
        }
    }

    Ok(())
}

/// Call `engine.<function>(text)` on the Lua thread.
///
/// Returns `null` when an optional function is missing.
fn call_engine_fn(lua: &Lua, function: &str, text: String) -> Result<serde_json::Value, String> {
    let table: Table = lua.globals().get(ENGINE_TABLE).map_err(|e| e.to_string())?;
    let func: Option<Function> = table.get(function).map_err(|e| e.to_string())?;

    let Some(func) = func else {
        return Ok(serde_json::Value::Null);
    };

    let value: Value = func
        .call(text)
        .map_err(|e| format!("{ENGINE_TABLE}.{function}: {e}"))?;
    lua_value_to_json(lua, value).map_err(|e| e.to_string())
}

fn expect_string(function: &str, value: serde_json::Value) -> Result<String, EngineError> {
    match value {
        serde_json::Value::String(s) => Ok(s),
        other => Err(EngineError::InvalidResponse(format!(
            "{function} returned {other}, expected a string"
        ))),
    }
}

fn is_empty_object(value: &serde_json::Value) -> bool {
    value.as_object().is_some_and(|map| map.is_empty())
}

impl QueryEngine for ScriptEngine {
    fn query(&self, text: String) -> EngineFuture<Response> {
        let call = self.call("query", text);

        Box::pin(async move {
            let value = call.await?;
            let response = match value {
                serde_json::Value::String(text) if text != "Reset" => Response::PlainText { text },
                other => Response::from_json(&other),
            };
            Ok(response)
        })
    }

    fn search(&self, text: String) -> EngineFuture<String> {
        let call = self.call("search", text);

        Box::pin(async move {
            match call.await? {
                serde_json::Value::String(json) => Ok(json),
                serde_json::Value::Object(mut payload) => {
                    // An empty Lua table converts to `{}`; `items` is always a list.
                    if payload.get("items").is_some_and(is_empty_object) {
                        payload.insert("items".to_string(), serde_json::Value::Array(Vec::new()));
                    }
                    Ok(serde_json::Value::Object(payload).to_string())
                }
                other => Err(EngineError::InvalidResponse(format!(
                    "search returned {other}, expected a payload"
                ))),
            }
        })
    }

    fn lucky(&self, text: String) -> EngineFuture<String> {
        let call = self.call("lucky", text.clone());

        Box::pin(async move {
            let url = expect_string("lucky", call.await?)?;
            if url.trim().is_empty() {
                return Err(EngineError::NotFound(text));
            }
            Ok(url.trim().to_string())
        })
    }

    fn find_community(&self, text: String) -> EngineFuture<String> {
        let call = self.call("find_community", text.clone());

        Box::pin(async move {
            let path = expect_string("find_community", call.await?)?;
            if path.trim().is_empty() {
                return Err(EngineError::NotFound(text));
            }
            Ok(path)
        })
    }

    fn is_question(&self, text: String) -> EngineFuture<bool> {
        let call = self.call("is_question", text.clone());

        Box::pin(async move {
            match call.await? {
                serde_json::Value::Null => Ok(looks_like_question(&text)),
                serde_json::Value::Bool(b) => Ok(b),
                other => Err(EngineError::InvalidResponse(format!(
                    "is_question returned {other}, expected a boolean"
                ))),
            }
        })
    }
}
