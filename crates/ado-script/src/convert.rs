//! Lua <-> JSON value conversion.

use mlua::{Lua, Result as LuaResult, Value};

/// Convert a Lua value to a JSON value.
///
/// Sequences with at least one element become arrays; other tables become
/// objects. Functions, userdata and threads become `null`.
pub fn lua_value_to_json(lua: &Lua, value: Value) -> LuaResult<serde_json::Value> {
    match value {
        Value::Nil => Ok(serde_json::Value::Null),
        Value::Boolean(b) => Ok(serde_json::Value::Bool(b)),
        Value::Integer(i) => Ok(serde_json::Value::Number(i.into())),
        Value::Number(n) => Ok(serde_json::Number::from_f64(n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null)),
        Value::String(s) => Ok(serde_json::Value::String(s.to_str()?.to_string())),
        Value::Table(t) => {
            let is_array = t.clone().pairs::<i64, Value>().all(|r| r.is_ok());

            if is_array && t.raw_len() > 0 {
                let mut arr = Vec::new();
                for pair in t.sequence_values::<Value>() {
                    arr.push(lua_value_to_json(lua, pair?)?);
                }
                Ok(serde_json::Value::Array(arr))
            } else {
                let mut obj = serde_json::Map::new();
                for pair in t.pairs::<String, Value>() {
                    let (k, v) = pair?;
                    obj.insert(k, lua_value_to_json(lua, v)?);
                }
                Ok(serde_json::Value::Object(obj))
            }
        }
        _ => Ok(serde_json::Value::Null),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn eval(lua: &Lua, chunk: &str) -> serde_json::Value {
        let value: Value = lua.load(chunk).eval().unwrap();
        lua_value_to_json(lua, value).unwrap()
    }

    #[test]
    fn test_scalars() {
        let lua = Lua::new();
        assert_eq!(eval(&lua, "return nil"), json!(null));
        assert_eq!(eval(&lua, "return true"), json!(true));
        assert_eq!(eval(&lua, "return 7"), json!(7));
        assert_eq!(eval(&lua, "return 1.5"), json!(1.5));
        assert_eq!(eval(&lua, "return 'Reset'"), json!("Reset"));
    }

    #[test]
    fn test_tables() {
        let lua = Lua::new();
        assert_eq!(
            eval(&lua, "return { String = 'hi' }"),
            json!({ "String": "hi" })
        );
        assert_eq!(
            eval(&lua, "return { items = { { title = 'a', link = 'b' } } }"),
            json!({ "items": [{ "title": "a", "link": "b" }] })
        );
        assert_eq!(eval(&lua, "return {}"), json!({}));
    }
}
