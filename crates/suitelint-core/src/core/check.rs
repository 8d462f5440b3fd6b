//! Reconciliation of a codebase against its actual test suite.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crate::core::names::{func_to_test_class_name, is_name_match};
use crate::core::paths::{source_path_to_test_path, PathError};
use crate::core::rules::{RuleCode, Violation};
use crate::domain::{Func, Project, PytestFile};

/// Result of looking up the test file expected for a source file.
///
/// Absence is a valid state, not an error; every rule decides for itself
/// what a missing file means.
enum TestFileLookup<'a> {
    Found(&'a PytestFile),
    NotFound,
}

/// Check whether the test suite is compliant and collect any violations.
///
/// Pure over the already-materialized project snapshot: no I/O, no
/// mutation. Rules evaluate independently and never deduplicate across
/// each other. The result is stably sorted by rule code, then path, then
/// position, so equal inputs give byte-equal reports.
pub fn get_violations(project: &Project) -> Result<Vec<Violation>, PathError> {
    let mut violations = Vec::new();

    let pytest_file_by_rel_path: HashMap<PathBuf, &PytestFile> = project
        .pytest_suite
        .pytest_files
        .iter()
        .map(|pytest_file| {
            (rel_to_proj(&pytest_file.path, &project.proj_dir), pytest_file)
        })
        .collect();

    for file in &project.codebase.files {
        if file.funcs.is_empty() {
            continue;
        }

        let pytest_rel_path = rel_to_proj(
            &source_path_to_test_path(&file.path, &project.config, &project.proj_dir)?,
            &project.proj_dir,
        );
        let lookup = match pytest_file_by_rel_path.get(&pytest_rel_path) {
            Some(pytest_file) => TestFileLookup::Found(pytest_file),
            None => TestFileLookup::NotFound,
        };
        let file_rel_path = rel_to_proj(&file.path, &project.proj_dir);

        for func in &file.funcs {
            if func.is_underscored() {
                continue;
            }

            if project.config.is_checked(RuleCode::MissingTestFunc)
                && !pytest_file_has_func_tests(&lookup, func)
            {
                violations.push(Violation {
                    rule_code: RuleCode::MissingTestFunc,
                    rel_path: file_rel_path.clone(),
                    line_num: func.line_num,
                    char_offset: func.char_offset,
                    fmt_info: BTreeMap::from([
                        ("func".to_string(), func.name.clone()),
                        (
                            "pytest_file_rel_posix".to_string(),
                            as_posix(&pytest_rel_path),
                        ),
                    ]),
                });
            }

            if project.config.is_checked(RuleCode::UnimportedTestedFunc)
                && !pytest_file_imports_func(&lookup, func)
            {
                violations.push(Violation {
                    rule_code: RuleCode::UnimportedTestedFunc,
                    rel_path: file_rel_path.clone(),
                    line_num: func.line_num,
                    char_offset: func.char_offset,
                    fmt_info: BTreeMap::from([
                        ("func_fullname".to_string(), func.full_name.clone()),
                        (
                            "pytest_file_rel_posix".to_string(),
                            as_posix(&pytest_rel_path),
                        ),
                    ]),
                });
            }
        }
    }

    if project.config.is_checked(RuleCode::EmptyPytestClass) {
        violations.extend(empty_pytest_class_violations(project));
    }

    if project.config.is_checked(RuleCode::UncollectedTestFunc) {
        violations.extend(uncollected_test_func_violations(project));
    }

    violations.sort_by(|a, b| {
        (a.rule_code, &a.rel_path, a.line_num, a.char_offset).cmp(&(
            b.rule_code,
            &b.rel_path,
            b.line_num,
            b.char_offset,
        ))
    });
    Ok(violations)
}

/// SUI002: a pytest class with no test functions of its own.
fn empty_pytest_class_violations(project: &Project) -> Vec<Violation> {
    let mut violations = Vec::new();
    for pytest_file in &project.pytest_suite.pytest_files {
        for pytest_class in &pytest_file.pytest_classes {
            if !pytest_class.has_funcs() {
                violations.push(Violation {
                    rule_code: RuleCode::EmptyPytestClass,
                    rel_path: rel_to_proj(&pytest_file.path, &project.proj_dir),
                    line_num: 0,
                    char_offset: 0,
                    fmt_info: BTreeMap::from([(
                        "pytest_class_name".to_string(),
                        pytest_class.name.clone(),
                    )]),
                });
            }
        }
    }
    violations
}

/// SUI104: a test function defined in the suite but not collected by
/// pytest.
fn uncollected_test_func_violations(project: &Project) -> Vec<Violation> {
    let mut violations = Vec::new();
    for pytest_file in &project.pytest_suite.pytest_files {
        let rel_path = rel_to_proj(&pytest_file.path, &project.proj_dir);
        let funcs = pytest_file.lone_pytest_funcs.iter().chain(
            pytest_file
                .pytest_classes
                .iter()
                .flat_map(|pytest_class| pytest_class.pytest_funcs.iter()),
        );
        for pytest_func in funcs {
            if !pytest_func.is_collected {
                violations.push(Violation {
                    rule_code: RuleCode::UncollectedTestFunc,
                    rel_path: rel_path.clone(),
                    line_num: pytest_func.line_num,
                    char_offset: pytest_func.char_offset,
                    fmt_info: BTreeMap::from([(
                        "func_fullname".to_string(),
                        pytest_func.full_name.clone(),
                    )]),
                });
            }
        }
    }
    violations
}

/// Whether the expected test file has a class covering the function.
fn pytest_file_has_func_tests(lookup: &TestFileLookup<'_>, func: &Func) -> bool {
    let pytest_file = match lookup {
        TestFileLookup::Found(pytest_file) => pytest_file,
        TestFileLookup::NotFound => return false,
    };
    let expected = func_to_test_class_name(&func.name);
    pytest_file
        .pytest_classes
        .iter()
        .any(|pytest_class| is_name_match(&pytest_class.name, &expected))
}

/// Whether the expected test file imports the function. Vacuously true
/// when no test file exists: an absent file cannot fail to import
/// anything, and its absence is already SUI001's finding.
fn pytest_file_imports_func(lookup: &TestFileLookup<'_>, func: &Func) -> bool {
    match lookup {
        TestFileLookup::Found(pytest_file) => {
            pytest_file.imported_objs.contains(&func.full_name)
        }
        TestFileLookup::NotFound => true,
    }
}

fn rel_to_proj(path: &Path, proj_dir: &Path) -> PathBuf {
    path.strip_prefix(proj_dir).unwrap_or(path).to_path_buf()
}

/// Render a path with forward slashes regardless of platform.
pub fn as_posix(path: &Path) -> String {
    let parts: Vec<String> = path
        .components()
        .map(|component| component.as_os_str().to_string_lossy().into_owned())
        .collect();
    parts.join("/")
}
