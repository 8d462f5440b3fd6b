//! Assembling a full project snapshot for checking.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::{get_config, ConfigError, ProjConfig};
use crate::core::paths::{
    main_src_dir, source_path_to_test_path, test_path_to_source_path, unittests_dir,
    PathError,
};
use crate::core::rules::RuleCode;
use crate::domain::Project;
use crate::read::{collect_test_items, get_codebase, get_pytest_suite, ReadError};

/// Errors from resolving or reading a project.
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Read(#[from] ReadError),

    #[error(transparent)]
    Path(#[from] PathError),
}

/// Read a project from a directory: resolve its configuration, collect
/// pytest items if the collection rule is active, then materialize the
/// codebase and test suite.
///
/// When `included_files` is non-empty, checking is restricted to those
/// files plus their mapped counterparts (a source file pulls in its test
/// file and vice versa). `static_only` drops the rules that need to
/// invoke pytest.
pub fn get_project(
    proj_dir: &Path,
    included_files: &[PathBuf],
    static_only: bool,
) -> Result<Project, ProjectError> {
    let mut config = get_config(proj_dir)?;
    if static_only {
        config.checks.retain(|code| code.is_static());
    }

    let collected = if config.is_checked(RuleCode::UncollectedTestFunc) {
        Some(collect_test_items(proj_dir)?)
    } else {
        None
    };

    let mut codebase = get_codebase(proj_dir, &config)?;
    let mut pytest_suite = get_pytest_suite(proj_dir, &config, collected.as_ref())?;

    if !included_files.is_empty() {
        let (src_paths, test_paths) =
            included_path_sets(proj_dir, &config, included_files)?;
        codebase.files.retain(|file| src_paths.contains(&file.path));
        pytest_suite
            .pytest_files
            .retain(|pytest_file| test_paths.contains(&pytest_file.path));
    }

    Ok(Project {
        codebase,
        pytest_suite,
        config,
        proj_dir: proj_dir.to_path_buf(),
    })
}

/// Expand explicitly listed files into the pair of path sets to keep:
/// each source file brings its expected test file and each test file
/// brings its source counterpart. Paths outside both trees are ignored.
fn included_path_sets(
    proj_dir: &Path,
    config: &ProjConfig,
    included_files: &[PathBuf],
) -> Result<(HashSet<PathBuf>, HashSet<PathBuf>), PathError> {
    let src_root = main_src_dir(config, proj_dir);
    let unit_dir = unittests_dir(config, proj_dir);

    let mut src_paths = HashSet::new();
    let mut test_paths = HashSet::new();
    for path in included_files {
        let path = if path.is_absolute() {
            path.clone()
        } else {
            proj_dir.join(path)
        };

        // Test membership first: with src_rel_path = "." the source root
        // would otherwise swallow the tests directory too.
        if path.starts_with(&unit_dir) {
            src_paths.insert(test_path_to_source_path(&path, config, proj_dir)?);
            test_paths.insert(path);
        } else if path.starts_with(&src_root) {
            test_paths.insert(source_path_to_test_path(&path, config, proj_dir)?);
            src_paths.insert(path);
        }
    }
    Ok((src_paths, test_paths))
}
