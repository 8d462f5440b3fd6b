//! Naming conventions for pytest files, classes, and functions.

pub const PYTEST_FILE_PREFIX: &str = "test_";
pub const PYTEST_FUNC_PREFIX: &str = "test";
pub const PYTEST_CLASS_PREFIX: &str = "Test";

pub const PYPROJECT_TOML_NAME: &str = "pyproject.toml";

/// The test class expected to cover a function: snake_case to PascalCase
/// with the pytest class prefix.
///
/// Degenerate names (empty, or nothing but underscores) map to the bare
/// prefix.
pub fn func_to_test_class_name(func_name: &str) -> String {
    let pascal: String = func_name
        .split('_')
        .filter(|segment| !segment.is_empty())
        .map(capitalize)
        .collect();
    format!("{PYTEST_CLASS_PREFIX}{pascal}")
}

/// Whether an existing test class name matches the expected one.
///
/// Authors disagree on `TestGetUserName` vs `Test_Get_User_Name`; the
/// comparison tolerates either by stripping underscores and case-folding
/// both sides.
pub fn is_name_match(existing: &str, expected: &str) -> bool {
    normalize(existing) == normalize(expected)
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
