//! esfront host boundary
//!
//! Exposes the `parse`, `transform` and `ast` entry points to a dynamically
//! typed caller. Arguments are validated before any parsing happens, and
//! failures are mapped onto the two error kinds a script host raises.

use esfront::{ExportOptions, SyntaxError};

/// Argument value as passed by the host
#[derive(Debug, Clone, PartialEq)]
pub enum HostValue {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
}

impl HostValue {
    fn as_str(&self) -> Option<&str> {
        match self {
            HostValue::String(s) => Some(s),
            _ => None,
        }
    }

    fn as_bool(&self) -> Option<bool> {
        match self {
            HostValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<&str> for HostValue {
    fn from(s: &str) -> Self {
        HostValue::String(s.to_string())
    }
}

impl From<bool> for HostValue {
    fn from(b: bool) -> Self {
        HostValue::Bool(b)
    }
}

/// Host-facing error
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HostError {
    #[error("TypeError: {0}")]
    Type(String),

    #[error("SyntaxError: {0}")]
    Syntax(#[from] SyntaxError),
}

impl HostError {
    /// Name of the host exception class
    pub fn name(&self) -> &'static str {
        match self {
            HostError::Type(_) => "TypeError",
            HostError::Syntax(_) => "SyntaxError",
        }
    }
}

fn source_argument(args: &[HostValue]) -> Result<&str, HostError> {
    args.first()
        .and_then(HostValue::as_str)
        .ok_or_else(|| HostError::Type("First argument must be a string".into()))
}

fn minify_argument(args: &[HostValue]) -> Result<bool, HostError> {
    args.get(1)
        .and_then(HostValue::as_bool)
        .ok_or_else(|| HostError::Type("Second argument must be a boolean".into()))
}

/// `parse(source)`: canonical dump
pub fn parse(args: &[HostValue]) -> Result<String, HostError> {
    let source = source_argument(args)?;
    Ok(esfront::parse(source)?)
}

/// `transform(source, minify)`: rewritten and printed source
pub fn transform(args: &[HostValue]) -> Result<String, HostError> {
    let source = source_argument(args)?;
    let minify = minify_argument(args)?;
    Ok(esfront::transform(source, minify)?)
}

/// `ast(source)`: ESTree JSON
pub fn ast(args: &[HostValue]) -> Result<String, HostError> {
    ast_with(args, &ExportOptions::default())
}

pub fn ast_with(args: &[HostValue], options: &ExportOptions) -> Result<String, HostError> {
    let source = source_argument(args)?;
    Ok(esfront::ast_with(source, options)?)
}

/// Dispatch an entry point by name
pub fn call(name: &str, args: &[HostValue]) -> Result<String, HostError> {
    tracing::debug!(name, argc = args.len(), "Host call");
    match name {
        "parse" => parse(args),
        "transform" => transform(args),
        "ast" => ast(args),
        _ => Err(HostError::Type(format!("{} is not a function", name))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_names() {
        assert_eq!(HostError::Type("x".into()).name(), "TypeError");
        let err = call("parse", &["a b".into()]).unwrap_err();
        assert_eq!(err.name(), "SyntaxError");
        assert!(err.to_string().starts_with("SyntaxError: Unexpected token"));
    }

    #[test]
    fn test_unknown_entry_point() {
        let err = call("eval", &["1".into()]).unwrap_err();
        assert_eq!(err, HostError::Type("eval is not a function".into()));
    }
}
