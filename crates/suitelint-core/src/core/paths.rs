//! Bidirectional mapping between source paths and test paths.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::{join_rel, ProjConfig};
use crate::core::names::PYTEST_FILE_PREFIX;

/// A path handed to the mapper that is not rooted where the configured
/// layout says it should be. Always a wiring or configuration mistake,
/// never a lint finding.
#[derive(Debug, Error)]
pub enum PathError {
    #[error(
        "{} is outside the expected {what} directory {}",
        path.display(),
        prefix.display()
    )]
    OutsideProject {
        path: PathBuf,
        what: &'static str,
        prefix: PathBuf,
    },
}

/// The expected test path for a source file.
///
/// The package-relative structure is preserved under the unit-test
/// directory and the leaf stem gains the `test_` prefix:
/// `src/pkg/sub/x.py` maps to `tests/unit/pkg/sub/test_x.py`. In
/// consolidated mode the single package's subtree maps directly under
/// the tests directory: `src/p/sub/x.py` maps to `tests/sub/test_x.py`.
pub fn source_path_to_test_path(
    path: &Path,
    config: &ProjConfig,
    proj_dir: &Path,
) -> Result<PathBuf, PathError> {
    let src_dir = main_src_dir(config, proj_dir);
    let rel_path =
        path.strip_prefix(&src_dir)
            .map_err(|_| PathError::OutsideProject {
                path: path.to_path_buf(),
                what: "source",
                prefix: src_dir.clone(),
            })?;

    let stem = rel_path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut test_path = unittests_dir(config, proj_dir);
    if let Some(parent) = rel_path.parent() {
        test_path = join_rel(&test_path, parent);
    }
    test_path.push(format!("{PYTEST_FILE_PREFIX}{stem}.py"));
    Ok(test_path)
}

/// Exact inverse of [`source_path_to_test_path`].
pub fn test_path_to_source_path(
    test_path: &Path,
    config: &ProjConfig,
    proj_dir: &Path,
) -> Result<PathBuf, PathError> {
    let unit_dir = unittests_dir(config, proj_dir);
    let rel_path =
        test_path
            .strip_prefix(&unit_dir)
            .map_err(|_| PathError::OutsideProject {
                path: test_path.to_path_buf(),
                what: "unit tests",
                prefix: unit_dir.clone(),
            })?;

    let file_name = rel_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = file_name
        .strip_prefix(PYTEST_FILE_PREFIX)
        .unwrap_or(&file_name)
        .to_string();

    let mut path = main_src_dir(config, proj_dir);
    if let Some(parent) = rel_path.parent() {
        path = join_rel(&path, parent);
    }
    path.push(file_name);
    Ok(path)
}

/// The directory source paths are taken relative to. In consolidated
/// mode the single package's directory itself is the root, so that test
/// paths carry no package segment.
pub fn main_src_dir(config: &ProjConfig, proj_dir: &Path) -> PathBuf {
    let mut src_dir = join_rel(proj_dir, &config.src_rel_path);
    if config.use_consolidated_tests_dir {
        // Invariant from ProjConfig::new: exactly one package.
        if let [pkg_name] = config.pkg_names.as_slice() {
            src_dir.push(pkg_name);
        }
    }
    src_dir
}

/// The directory holding unit tests; the `.` sentinel collapses to the
/// tests directory itself.
pub fn unittests_dir(config: &ProjConfig, proj_dir: &Path) -> PathBuf {
    join_rel(
        &join_rel(proj_dir, &config.tests_rel_path),
        &config.unittest_dir_name,
    )
}
