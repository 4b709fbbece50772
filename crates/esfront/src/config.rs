//! Request Configuration
//!
//! Every entry point takes its options by value; nothing is process-wide.

use serde::{Deserialize, Serialize};

/// Rewrite pass settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Replace `a ** b` with `Math.pow(a, b)`
    pub transform_exponentiation: bool,

    /// Replace arrow functions with function expressions
    pub transform_arrow: bool,
}

impl Settings {
    pub fn target_es5() -> Self {
        Self { transform_exponentiation: true, transform_arrow: true }
    }

    pub fn target_es2015() -> Self {
        Self { transform_exponentiation: true, transform_arrow: false }
    }

    /// Print the tree as parsed
    pub fn no_transform() -> Self {
        Self { transform_exponentiation: false, transform_arrow: false }
    }

    /// Preset by target name (`es5`, `es2015`)
    pub fn for_target(name: &str) -> Option<Self> {
        match name {
            "es5" => Some(Self::target_es5()),
            "es2015" | "es6" => Some(Self::target_es2015()),
            _ => None,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::target_es2015()
    }
}

/// Printer output style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    #[default]
    Pretty,
    Minified,
}

impl Style {
    pub fn from_minify(minify: bool) -> Self {
        if minify { Style::Minified } else { Style::Pretty }
    }

    pub fn is_minified(self) -> bool {
        self == Style::Minified
    }
}

/// Options for [`crate::transform_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformOptions {
    pub style: Style,
    pub settings: Settings,
}

impl TransformOptions {
    pub fn minified() -> Self {
        Self { style: Style::Minified, ..Self::default() }
    }
}

/// Options for [`crate::ast_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Export `Program`, `VariableDeclaration`, `VariableDeclarator`,
    /// `FunctionExpression`, `BlockStatement` and `ReturnStatement` with
    /// `start: 0, end: 0`, matching output of earlier releases.
    pub legacy_container_spans: bool,

    /// Indented JSON
    pub pretty: bool,
}
