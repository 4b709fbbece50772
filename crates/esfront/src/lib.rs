//! esfront
//!
//! ECMAScript front end: a hand-written lexer and parser producing a
//! span-annotated AST, plus three consumers of that tree.
//!
//! Features:
//! - Canonical debug dump (`parse`)
//! - ESTree JSON export (`ast`)
//! - Source printing, pretty or minified, after an optional rewrite pass
//!   that lowers `**` to `Math.pow` (`transform`)

pub mod ast;
pub mod codegen;
pub mod config;
pub mod dump;
pub mod error;
pub mod estree;
pub mod lexer;
pub mod parser;
pub mod token;
pub mod transform;

pub use ast::Program;
pub use config::{ExportOptions, Settings, Style, TransformOptions};
pub use error::{ErrorKind, LexError, SyntaxError};
pub use parser::Parser;

/// Parse `source` into a [`Program`]
pub fn parse_program(source: &str) -> Result<Program, SyntaxError> {
    let program = Parser::new(source)?.parse()?;
    tracing::debug!(bytes = source.len(), statements = program.body.len(), "Parsed program");
    Ok(program)
}

/// Parse `source` and return the canonical dump of its statements
pub fn parse(source: &str) -> Result<String, SyntaxError> {
    let program = parse_program(source)?;
    Ok(dump::dump(&program))
}

/// Parse, rewrite and print `source`
pub fn transform(source: &str, minify: bool) -> Result<String, SyntaxError> {
    let options = TransformOptions {
        style: Style::from_minify(minify),
        ..TransformOptions::default()
    };
    transform_with(source, &options)
}

pub fn transform_with(source: &str, options: &TransformOptions) -> Result<String, SyntaxError> {
    let program = transform::rewrite(parse_program(source)?, &options.settings);
    let output = codegen::print(&program, options.style);
    tracing::debug!(style = ?options.style, bytes = output.len(), "Printed program");
    Ok(output)
}

/// Parse `source` and return its ESTree document as JSON text
pub fn ast(source: &str) -> Result<String, SyntaxError> {
    ast_with(source, &ExportOptions::default())
}

pub fn ast_with(source: &str, options: &ExportOptions) -> Result<String, SyntaxError> {
    let program = parse_program(source)?;
    Ok(estree::to_json(&program, options))
}
