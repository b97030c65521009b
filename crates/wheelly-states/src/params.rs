//! Helpers for reading typed entries out of a state's configured `params`.

use std::collections::HashMap;

use wheelly_agent::Param;

pub fn number(params: &HashMap<String, Param>, key: &str, default: f64) -> f64 {
    params.get(key).and_then(Param::as_f64).unwrap_or(default)
}

pub fn integer(params: &HashMap<String, Param>, key: &str, default: i64) -> i64 {
    params.get(key).and_then(Param::as_i64).unwrap_or(default)
}

pub fn text<'a>(params: &'a HashMap<String, Param>, key: &str) -> Option<&'a str> {
    params.get(key).and_then(Param::as_str)
}
