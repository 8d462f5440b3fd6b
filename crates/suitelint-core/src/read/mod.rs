//! Reading a project's codebase and test suite from disk.

use std::path::PathBuf;

use thiserror::Error;

mod codebase;
mod collect;
mod suite;

pub use codebase::get_codebase;
pub use collect::{collect_test_items, CollectedItems};
pub use suite::get_pytest_suite;

/// Errors from materializing a codebase or test suite.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error(transparent)]
    Parse(#[from] crate::parser::ParseError),

    #[error("Could not find {}", path.display())]
    MissingDir { path: PathBuf },

    #[error("Failed to walk {}: {message}", path.display())]
    Walk { path: PathBuf, message: String },

    #[error("Failed to run pytest: {0}")]
    Pytest(#[source] std::io::Error),
}
