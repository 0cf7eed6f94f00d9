//! Result encoders for the editor side.

use crate::error::MotionError;
use crate::query::QueryResult;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Json,
    Vim,
    Plain,
}

/// Query failure as handed to the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResult {
    pub mode: String,
    pub err: String,
}

impl ErrorResult {
    pub fn new(mode: impl Into<String>, err: &MotionError) -> Self {
        Self {
            mode: mode.into(),
            err: err.to_string(),
        }
    }
}

pub fn render_result(result: &QueryResult, format: Format) -> Result<String, serde_json::Error> {
    match format {
        Format::Json => serde_json::to_string_pretty(result),
        Format::Vim => Ok(vim_top_level(serde_json::to_value(result)?)),
        Format::Plain => Ok(plain(result)),
    }
}

pub fn render_error(error: &ErrorResult, format: Format) -> Result<String, serde_json::Error> {
    match format {
        Format::Json => serde_json::to_string_pretty(error),
        Format::Vim => Ok(vim_top_level(serde_json::to_value(error)?)),
        Format::Plain => Ok(format!("{}: {}", error.mode, error.err)),
    }
}

// The vim plugin reads the func record from "fn".
fn vim_top_level(mut value: Value) -> String {
    if let Value::Object(map) = &mut value {
        if let Some(func) = map.remove("func") {
            map.insert("fn".to_string(), func);
        }
    }
    let mut out = String::new();
    encode_vim(&mut out, &value);
    out
}

/// Vimscript literal for a JSON value.
pub fn to_vim(value: &Value) -> String {
    let mut out = String::new();
    encode_vim(&mut out, value);
    out
}

fn encode_vim(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "v:true" } else { "v:false" }),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => quote_vim(out, s),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                encode_vim(out, item);
            }
            out.push(']');
        }
        Value::Object(map) => {
            out.push('{');
            for (i, (key, item)) in map.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                quote_vim(out, key);
                out.push_str(": ");
                encode_vim(out, item);
            }
            out.push('}');
        }
    }
}

fn quote_vim(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

fn plain(result: &QueryResult) -> String {
    let mut lines = Vec::new();
    if let Some(func) = &result.func {
        lines.push(func.to_string());
    }
    lines.extend(result.decls.iter().map(|d| d.to_string()));
    if let Some(comment) = &result.comment {
        lines.push(comment.to_string());
    }
    lines.join("\n")
}
