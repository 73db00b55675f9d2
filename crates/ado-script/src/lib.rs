//! Lua-scripted Query Engine for the ado command bar.
//!
//! The engine handle is built from a user script defining a global `engine`
//! table. The Lua state lives on a dedicated thread (see [`LuaRuntime`]) and
//! every call is bounded by the configured timeout.

mod api;
mod convert;
mod engine;
mod runtime;

pub use api::register_ado_api;
pub use convert::lua_value_to_json;
pub use engine::{ScriptEngine, ENGINE_TABLE};
pub use runtime::{LuaRequest, LuaRuntime};

/// Sample engine script written by `ado --init`.
pub const SAMPLE_SCRIPT: &str = include_str!("../scripts/engine.lua");
