//! Parsing of Python source files into domain value objects.

use std::path::PathBuf;

use thiserror::Error;

mod python;

pub use python::{module_name_for_path, PythonParser};

/// Errors from parsing a Python file.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Syntax error in {}", path.display())]
    Syntax { path: PathBuf },

    #[error("Failed to load the Python grammar: {0}")]
    Language(String),

    #[error(
        "Unsupported construct `{kind}` at {}:{line}",
        path.display()
    )]
    UnsupportedConstruct {
        path: PathBuf,
        kind: String,
        line: u32,
    },
}
