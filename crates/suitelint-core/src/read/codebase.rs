//! Reading a Python codebase from disk.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use super::ReadError;
use crate::config::{join_rel, ProjConfig};
use crate::domain::Codebase;
use crate::parser::{module_name_for_path, PythonParser};

/// Read the codebase for a project: every `*.py` file under each
/// configured package directory, parsed and sorted by path.
pub fn get_codebase(proj_dir: &Path, config: &ProjConfig) -> Result<Codebase, ReadError> {
    let src_dir = join_rel(proj_dir, &config.src_rel_path);
    if !src_dir.is_dir() {
        return Err(ReadError::MissingDir { path: src_dir });
    }

    let mut paths = Vec::new();
    for pkg_name in &config.pkg_names {
        let pkg_dir = src_dir.join(pkg_name);
        if !pkg_dir.is_dir() {
            return Err(ReadError::MissingDir { path: pkg_dir });
        }
        paths.extend(python_files(&pkg_dir)?);
    }
    paths.sort();

    let parser = PythonParser::new();
    let mut files = Vec::new();
    for path in paths {
        let module_name = module_name_for_path(&path, &src_dir);
        files.push(parser.parse_file(&path, &module_name)?);
    }

    Ok(Codebase { files })
}

/// Collect `*.py` file paths under a directory, gitignore-aware.
pub(crate) fn python_files(dir: &Path) -> Result<Vec<PathBuf>, ReadError> {
    let mut paths = Vec::new();
    for entry in WalkBuilder::new(dir).build() {
        let entry = entry.map_err(|err| ReadError::Walk {
            path: dir.to_path_buf(),
            message: err.to_string(),
        })?;
        let path = entry.path();
        if entry.file_type().is_some_and(|file_type| file_type.is_file())
            && path.extension().is_some_and(|ext| ext == "py")
        {
            paths.push(path.to_path_buf());
        }
    }
    Ok(paths)
}
