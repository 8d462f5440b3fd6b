//! Layout heuristics for unconfigured projects.
//!
//! Each heuristic is a side-effect-free function returning `Option`; the
//! resolver in [`super`] applies them in priority order until one
//! succeeds, then validates the assembled config as a whole. None of
//! them modify anything; they only observe the manifest and the
//! directory tree.

use std::path::{Path, PathBuf};

/// Package names from manifest metadata: prefer the setuptools package
/// list, fall back to the project name.
pub fn pkg_names_from_manifest(
    setuptools_pkg_names: Option<&[String]>,
    project_name: Option<&str>,
) -> Option<Vec<String>> {
    if let Some(names) = setuptools_pkg_names {
        return Some(names.to_vec());
    }
    project_name.map(|name| vec![name.to_string()])
}

/// Package names from the source directory: every child directory whose
/// name is a valid Python identifier.
pub fn pkg_names_from_src_dir(src_dir: &Path) -> Option<Vec<String>> {
    let entries = std::fs::read_dir(src_dir).ok()?;
    let names: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| is_identifier(name))
        .collect();

    if names.is_empty() {
        None
    } else {
        Some(names)
    }
}

/// Source directory: `src/` if present, else the project root itself
/// when the known packages live directly under it.
pub fn infer_src_rel_path(
    proj_dir: &Path,
    pkg_names: Option<&[String]>,
) -> Option<PathBuf> {
    if proj_dir.join("src").exists() {
        return Some(PathBuf::from("src"));
    }

    if let Some(pkg_names) = pkg_names {
        if !pkg_names.is_empty()
            && pkg_names.iter().all(|name| proj_dir.join(name).exists())
        {
            return Some(PathBuf::from("."));
        }
    }

    None
}

/// Tests directory: `tests/` if present.
pub fn infer_tests_rel_path(proj_dir: &Path) -> Option<PathBuf> {
    if proj_dir.join("tests").exists() {
        return Some(PathBuf::from("tests"));
    }
    None
}

/// Unit-test subdirectory: `unit/` under the tests directory if present.
pub fn infer_unittest_dir_name(tests_dir: &Path) -> Option<PathBuf> {
    if tests_dir.join("unit").exists() {
        return Some(PathBuf::from("unit"));
    }
    None
}

/// Detect the consolidated single-package layout: one package, no unit
/// subdirectory configured or found, and no `tests/<pkg>` directory that
/// would indicate a per-package layout.
pub fn is_consolidated_tests_dir(
    pkg_names: &[String],
    tests_dir: &Path,
    unittest_dir_name: Option<&Path>,
) -> bool {
    let [pkg_name] = pkg_names else {
        return false;
    };
    let unit_is_here =
        unittest_dir_name.is_none() || unittest_dir_name == Some(Path::new("."));
    unit_is_here && !tests_dir.join(pkg_name).exists()
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}
