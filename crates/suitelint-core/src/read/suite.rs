//! Reading a pytest unit test suite from disk.

use std::path::Path;

use super::codebase::python_files;
use super::collect::CollectedItems;
use super::ReadError;
use crate::config::ProjConfig;
use crate::core::names::{PYTEST_CLASS_PREFIX, PYTEST_FUNC_PREFIX};
use crate::core::paths::unittests_dir;
use crate::domain::{
    Class, Func, PytestClass, PytestFile, PytestFunc, PytestSuite, SourceFile,
};
use crate::parser::{module_name_for_path, PythonParser};

/// Read the pytest unit test suite for a project.
///
/// Classes named `Test...` are pytest classes and functions named
/// `test...` are pytest functions. When `collected` is `None` (static
/// mode) every test function counts as collected.
pub fn get_pytest_suite(
    proj_dir: &Path,
    config: &ProjConfig,
    collected: Option<&CollectedItems>,
) -> Result<PytestSuite, ReadError> {
    let unit_dir = unittests_dir(config, proj_dir);
    if !unit_dir.is_dir() {
        return Err(ReadError::MissingDir { path: unit_dir });
    }

    let mut paths = python_files(&unit_dir)?;
    paths.sort();

    let parser = PythonParser::new();
    let mut pytest_files = Vec::new();
    for path in paths {
        let module_name = module_name_for_path(&path, &unit_dir);
        let file = parser.parse_file(&path, &module_name)?;
        pytest_files.push(to_pytest_file(file, proj_dir, collected));
    }

    Ok(PytestSuite { pytest_files })
}

fn to_pytest_file(
    file: SourceFile,
    proj_dir: &Path,
    collected: Option<&CollectedItems>,
) -> PytestFile {
    let rel_path = file.path.strip_prefix(proj_dir).unwrap_or(&file.path);

    let pytest_classes = file
        .clses
        .iter()
        .filter(|cls| is_pytest_class(cls))
        .map(|cls| PytestClass {
            name: cls.name.clone(),
            full_name: cls.full_name.clone(),
            line_num: cls.line_num,
            char_offset: cls.char_offset,
            pytest_funcs: cls
                .funcs
                .iter()
                .filter(|func| is_pytest_func(func))
                .map(|func| {
                    let qual_name = format!("{}::{}", cls.name, func.name);
                    to_pytest_func(func, rel_path, &qual_name, collected)
                })
                .collect(),
        })
        .collect();

    let lone_pytest_funcs = file
        .funcs
        .iter()
        .filter(|func| is_pytest_func(func))
        .map(|func| to_pytest_func(func, rel_path, &func.name, collected))
        .collect();

    PytestFile {
        path: file.path,
        pytest_classes,
        lone_pytest_funcs,
        imported_objs: file.imported_objs,
    }
}

fn to_pytest_func(
    func: &Func,
    rel_path: &Path,
    qual_name: &str,
    collected: Option<&CollectedItems>,
) -> PytestFunc {
    let is_collected = match collected {
        Some(items) => items.contains(rel_path, qual_name),
        None => true,
    };
    PytestFunc {
        name: func.name.clone(),
        full_name: func.full_name.clone(),
        line_num: func.line_num,
        char_offset: func.char_offset,
        is_collected,
    }
}

fn is_pytest_class(cls: &Class) -> bool {
    cls.name.starts_with(PYTEST_CLASS_PREFIX)
}

fn is_pytest_func(func: &Func) -> bool {
    func.name.starts_with(PYTEST_FUNC_PREFIX)
}
