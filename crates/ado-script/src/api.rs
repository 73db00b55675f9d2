//! Lua bindings available to engine scripts.
//!
//! Registers the `ado` global namespace:
//! - `ado.log(message)` - log through the host's tracing subscriber
//! - `ado.looks_like_question(text)` - the built-in question heuristic
//! - `ado.url_encode(text)` - form-encode a string for query parameters

use mlua::{Lua, Result as LuaResult};
use url::form_urlencoded;

/// Register the `ado` API in a Lua state.
pub fn register_ado_api(lua: &Lua) -> LuaResult<()> {
    let ado = lua.create_table()?;

    ado.set(
        "log",
        lua.create_function(|_, message: String| {
            tracing::info!(target: "ado::script", "{}", message);
            Ok(())
        })?,
    )?;

    ado.set(
        "looks_like_question",
        lua.create_function(|_, text: String| Ok(ado_core::looks_like_question(&text)))?,
    )?;

    ado.set(
        "url_encode",
        lua.create_function(|_, text: String| Ok(url_encode(&text)))?,
    )?;

    lua.globals().set("ado", ado)?;
    Ok(())
}

fn url_encode(text: &str) -> String {
    form_urlencoded::byte_serialize(text.as_bytes()).collect()
}
