//! Configuration for the Python project to be analyzed.
//!
//! Configuration is resolved from multiple sources with the following
//! priority:
//! 1. The `[tool.suitelint]` section of `pyproject.toml`
//! 2. Other manifest sections (`[project].name`, `[tool.setuptools].packages`)
//! 3. Layout heuristics over the project directory
//!
//! Whatever the source, the resolved [`ProjConfig`] is validated as a
//! whole before any checking starts; a layout that cannot be resolved is
//! a fatal configuration error, never a lint finding.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::names::PYPROJECT_TOML_NAME;
use crate::core::rules::{RuleCode, RULE_CODES};

mod heuristics;

pub use heuristics::*;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Could not find {what} directory {}", path.display())]
    MissingDir { what: &'static str, path: PathBuf },

    #[error(
        "Could not automatically determine {what} for the project. \
         Please configure this in pyproject.toml under [tool.suitelint] \
         as `{key} = ...`"
    )]
    CannotInfer { what: &'static str, key: &'static str },
}

/// Configuration for the Python project to be analyzed.
///
/// Constructed once per run via [`ProjConfig::new`] and never mutated by
/// the checking core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjConfig {
    /// Top-level package names under the source root.
    pub pkg_names: Vec<String>,

    /// Source directory, relative to the project root.
    pub src_rel_path: PathBuf,

    /// Tests directory, relative to the project root.
    pub tests_rel_path: PathBuf,

    /// Unit-test subdirectory under the tests directory; `.` means the
    /// tests directory itself.
    pub unittest_dir_name: PathBuf,

    /// Single-package layout where test paths omit the package segment.
    pub use_consolidated_tests_dir: bool,

    /// Rule codes to enforce.
    pub checks: Vec<RuleCode>,
}

impl ProjConfig {
    /// Build a config, enforcing the consolidated-layout invariant:
    /// consolidated mode requires exactly one package and a `.` unit dir.
    pub fn new(
        pkg_names: Vec<String>,
        src_rel_path: PathBuf,
        tests_rel_path: PathBuf,
        unittest_dir_name: PathBuf,
        use_consolidated_tests_dir: bool,
        checks: Vec<RuleCode>,
    ) -> Result<Self, ConfigError> {
        if use_consolidated_tests_dir {
            if pkg_names.len() != 1 {
                return Err(ConfigError::Invalid(format!(
                    "a consolidated tests directory requires exactly one \
                     package, got {:?}",
                    pkg_names
                )));
            }
            if unittest_dir_name != Path::new(".") {
                return Err(ConfigError::Invalid(format!(
                    "a consolidated tests directory requires \
                     unittest_dir_name to be \".\", got {:?}",
                    unittest_dir_name
                )));
            }
        }
        Ok(Self {
            pkg_names,
            src_rel_path,
            tests_rel_path,
            unittest_dir_name,
            use_consolidated_tests_dir,
            checks,
        })
    }

    /// Config for the conventional `src/` + `tests/unit/` layout with all
    /// rules enabled.
    pub fn with_defaults(pkg_names: Vec<String>) -> Self {
        Self {
            pkg_names,
            src_rel_path: PathBuf::from("src"),
            tests_rel_path: PathBuf::from("tests"),
            unittest_dir_name: PathBuf::from("unit"),
            use_consolidated_tests_dir: false,
            checks: RULE_CODES.to_vec(),
        }
    }

    pub fn is_checked(&self, code: RuleCode) -> bool {
        self.checks.contains(&code)
    }
}

/// Schema of the `[tool.suitelint]` section of `pyproject.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlProjConfig {
    pub pkg_names: Option<Vec<String>>,
    pub src_rel_path: Option<PathBuf>,
    pub tests_rel_path: Option<PathBuf>,
    pub unittest_dir_name: Option<PathBuf>,
    pub ignore: Option<Vec<RuleCode>>,
}

#[derive(Debug, Default, Deserialize)]
struct Pyproject {
    #[serde(default)]
    project: PyprojectProject,
    #[serde(default)]
    tool: PyprojectTool,
}

#[derive(Debug, Default, Deserialize)]
struct PyprojectProject {
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct PyprojectTool {
    suitelint: Option<TomlProjConfig>,
    #[serde(default)]
    setuptools: PyprojectSetuptools,
}

#[derive(Debug, Default, Deserialize)]
struct PyprojectSetuptools {
    packages: Option<Vec<String>>,
}

/// Manifest inputs feeding the configuration heuristics.
#[derive(Debug, Default)]
pub struct ManifestConfig {
    pub suitelint: TomlProjConfig,
    pub project_name: Option<String>,
    pub setuptools_pkg_names: Option<Vec<String>>,
}

/// Read the manifest inputs from a `pyproject.toml` file.
///
/// A missing file or a missing `[tool.suitelint]` section is not an
/// error; the heuristics run over whatever was found.
pub fn read_manifest(toml_path: &Path) -> Result<ManifestConfig, ConfigError> {
    if !toml_path.exists() {
        return Ok(ManifestConfig::default());
    }

    let contents = std::fs::read_to_string(toml_path)?;
    let pyproject: Pyproject =
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: toml_path.to_path_buf(),
            source,
        })?;

    Ok(ManifestConfig {
        suitelint: pyproject.tool.suitelint.unwrap_or_default(),
        project_name: pyproject.project.name,
        setuptools_pkg_names: pyproject.tool.setuptools.packages,
    })
}

/// Resolve the full configuration for a project directory.
///
/// Explicit `[tool.suitelint]` values win; anything left unset is filled
/// by the heuristic chain in priority order, then the result is validated
/// against the directories actually on disk.
pub fn get_config(proj_dir: &Path) -> Result<ProjConfig, ConfigError> {
    let manifest = read_manifest(&proj_dir.join(PYPROJECT_TOML_NAME))?;
    resolve_config(proj_dir, manifest)
}

/// Resolve a configuration from already-read manifest inputs.
pub fn resolve_config(
    proj_dir: &Path,
    manifest: ManifestConfig,
) -> Result<ProjConfig, ConfigError> {
    let toml_config = &manifest.suitelint;

    let mut pkg_names = toml_config.pkg_names.clone().or_else(|| {
        heuristics::pkg_names_from_manifest(
            manifest.setuptools_pkg_names.as_deref(),
            manifest.project_name.as_deref(),
        )
    });

    let src_rel_path = match toml_config.src_rel_path.clone() {
        Some(path) => path,
        None => heuristics::infer_src_rel_path(proj_dir, pkg_names.as_deref())
            .ok_or(ConfigError::CannotInfer {
                what: "the source directory",
                key: "src_rel_path",
            })?,
    };
    let src_dir = join_rel(proj_dir, &src_rel_path);
    validate_dir("source", &src_dir)?;

    let mut pkg_names = match pkg_names.take() {
        Some(names) => names,
        None => heuristics::pkg_names_from_src_dir(&src_dir).ok_or(
            ConfigError::CannotInfer {
                what: "the package names",
                key: "pkg_names",
            },
        )?,
    };
    pkg_names.sort();

    let tests_rel_path = match toml_config.tests_rel_path.clone() {
        Some(path) => path,
        None => heuristics::infer_tests_rel_path(proj_dir).ok_or(
            ConfigError::CannotInfer {
                what: "the tests directory",
                key: "tests_rel_path",
            },
        )?,
    };
    let tests_dir = join_rel(proj_dir, &tests_rel_path);
    validate_dir("tests", &tests_dir)?;

    let mut unittest_dir_name = toml_config
        .unittest_dir_name
        .clone()
        .or_else(|| heuristics::infer_unittest_dir_name(&tests_dir));

    let use_consolidated_tests_dir = heuristics::is_consolidated_tests_dir(
        &pkg_names,
        &tests_dir,
        unittest_dir_name.as_deref(),
    );

    let unittest_dir_name = match unittest_dir_name.take() {
        Some(name) => name,
        None if use_consolidated_tests_dir => PathBuf::from("."),
        None => {
            return Err(ConfigError::CannotInfer {
                what: "the unit tests directory",
                key: "unittest_dir_name",
            })
        }
    };
    let unittests_dir = join_rel(&tests_dir, &unittest_dir_name);
    validate_dir("unit tests", &unittests_dir)?;

    if !use_consolidated_tests_dir {
        for pkg_name in &pkg_names {
            validate_dir("package", &src_dir.join(pkg_name))?;
            validate_dir("unit test package", &unittests_dir.join(pkg_name))?;
        }
    }

    let mut checks: Vec<RuleCode> = RULE_CODES
        .iter()
        .copied()
        .filter(|code| {
            !toml_config
                .ignore
                .as_ref()
                .is_some_and(|ignored| ignored.contains(code))
        })
        .collect();
    checks.sort();

    ProjConfig::new(
        pkg_names,
        src_rel_path,
        tests_rel_path,
        unittest_dir_name,
        use_consolidated_tests_dir,
        checks,
    )
}

fn validate_dir(what: &'static str, path: &Path) -> Result<(), ConfigError> {
    if !path.is_dir() {
        return Err(ConfigError::MissingDir {
            what,
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Join a relative path onto a base, skipping `.` components so that a
/// `.` sentinel never shows up inside a resolved path.
pub fn join_rel(base: &Path, rel: &Path) -> PathBuf {
    let mut out = base.to_path_buf();
    for component in rel.components() {
        if component != std::path::Component::CurDir {
            out.push(component);
        }
    }
    out
}
