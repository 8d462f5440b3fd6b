//! Value objects describing a parsed Python project.
//!
//! Everything here is an immutable snapshot produced by the readers in
//! [`crate::read`]; the checking core compares these values and never
//! mutates them.

use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::ProjConfig;

/// A top-level Python function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Func {
    /// Bare identifier, e.g. `get_user_name`.
    pub name: String,

    /// Dotted path unique within the project, e.g. `pkg.users.get_user_name`.
    pub full_name: String,

    /// 1-based line of the `def` itself (decorators excluded).
    pub line_num: u32,

    /// 0-based column of the `def`.
    pub char_offset: u32,

    /// 1-based lines of the decorators above the definition, in source order.
    pub dec_line_nums: Vec<u32>,
}

impl Func {
    /// Whether the function is private by convention.
    pub fn is_underscored(&self) -> bool {
        self.name.starts_with('_')
    }
}

/// A top-level Python class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Class {
    pub name: String,
    pub full_name: String,
    pub line_num: u32,
    pub char_offset: u32,

    /// Functions defined directly in the class body.
    pub funcs: Vec<Func>,
}

impl Class {
    pub fn is_underscored(&self) -> bool {
        self.name.starts_with('_')
    }

    /// Whether the class has at least one directly nested function.
    pub fn has_funcs(&self) -> bool {
        !self.funcs.is_empty()
    }
}

/// A parsed Python source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub path: PathBuf,
    pub funcs: Vec<Func>,
    pub clses: Vec<Class>,

    /// Fully-qualified names imported anywhere in the file.
    ///
    /// `import x` contributes `x`; `from x import y` contributes `x.y`.
    pub imported_objs: BTreeSet<String>,
}

/// A Python codebase: one [`SourceFile`] per discovered module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Codebase {
    pub files: Vec<SourceFile>,
}

/// A pytest test function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PytestFunc {
    pub name: String,
    pub full_name: String,
    pub line_num: u32,
    pub char_offset: u32,

    /// Whether pytest would actually collect this function as a test.
    pub is_collected: bool,
}

/// A pytest test class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PytestClass {
    pub name: String,
    pub full_name: String,
    pub line_num: u32,
    pub char_offset: u32,

    /// Test functions defined directly in the class body.
    pub pytest_funcs: Vec<PytestFunc>,
}

impl PytestClass {
    /// Whether the class contains any test functions of its own.
    pub fn has_funcs(&self) -> bool {
        !self.pytest_funcs.is_empty()
    }
}

/// A pytest test file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PytestFile {
    pub path: PathBuf,
    pub pytest_classes: Vec<PytestClass>,

    /// Test functions defined at module level, outside any class.
    pub lone_pytest_funcs: Vec<PytestFunc>,
    pub imported_objs: BTreeSet<String>,
}

/// A pytest unit test suite.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PytestSuite {
    pub pytest_files: Vec<PytestFile>,
}

/// A Python project: the codebase, its test suite, and the layout they
/// are checked against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    pub codebase: Codebase,
    pub pytest_suite: PytestSuite,
    pub config: ProjConfig,
    pub proj_dir: PathBuf,
}
