//! Crate-level error types.

use std::fmt;

/// Errors produced by the twin-annotate crate.
///
/// Lookups never fail through this type: a missing sibling artifact is an
/// ordinary `None`. Only I/O, configuration and construction-time misuse
/// surface here.
#[derive(Debug)]
pub enum AnnotateError {
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// A node name that does not follow the artifact naming scheme.
    InvalidName(String),
    /// Geometry input rejected by a builder (non-finite point, zero size).
    InvalidGeometry(String),
}

impl fmt::Display for AnnotateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::InvalidName(name) => {
                write!(f, "invalid artifact name: {name:?}")
            }
            Self::InvalidGeometry(msg) => {
                write!(f, "invalid geometry: {msg}")
            }
        }
    }
}

impl std::error::Error for AnnotateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AnnotateError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
