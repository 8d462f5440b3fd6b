//! Collecting the tests pytest would actually execute.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::LazyLock;

use regex::Regex;

use super::ReadError;

/// An item line of `pytest --collect-only -q` output, e.g.
/// `tests/unit/pkg/test_a.py::TestGetA::test_basic[case0]`.
static ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<path>[^\s:][^:]*\.py)::(?P<name>\S+)$").unwrap());

/// The set of test items pytest reports from `--collect-only`.
///
/// Each item is a file path relative to the project root plus the
/// qualified test name within the file (`TestClass::test_x` or a lone
/// `test_x`), with any parametrization id stripped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectedItems {
    items: HashSet<(PathBuf, String)>,
}

impl CollectedItems {
    pub fn insert(&mut self, rel_path: PathBuf, qual_name: String) {
        self.items.insert((rel_path, qual_name));
    }

    pub fn contains(&self, rel_path: &Path, qual_name: &str) -> bool {
        self.items
            .contains(&(rel_path.to_path_buf(), qual_name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Parse the item lines of `pytest --collect-only -q` output.
    pub fn from_quiet_output(output: &str) -> Self {
        let mut collected = Self::default();
        for line in output.lines() {
            let Some(caps) = ITEM_RE.captures(line.trim_end()) else {
                continue;
            };
            let mut qual_name = caps["name"].to_string();
            if let Some(bracket) = qual_name.find('[') {
                qual_name.truncate(bracket);
            }
            collected.insert(PathBuf::from(&caps["path"]), qual_name);
        }
        collected
    }
}

/// Run `pytest --collect-only -q` in the project directory and parse its
/// report. A non-zero pytest exit is not an error here: pytest exits 5
/// when it collects nothing, and collection errors still produce a
/// usable partial listing.
pub fn collect_test_items(proj_dir: &Path) -> Result<CollectedItems, ReadError> {
    let output = Command::new("pytest")
        .arg("--collect-only")
        .arg("-q")
        .current_dir(proj_dir)
        .output()
        .map_err(ReadError::Pytest)?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(CollectedItems::from_quiet_output(&stdout))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_item_lines() {
        let output = "\
tests/unit/pkg/test_a.py::TestGetA::test_basic
tests/unit/pkg/test_a.py::TestGetA::test_param[case0]
tests/unit/pkg/test_a.py::TestGetA::test_param[case1]
tests/unit/pkg/test_b.py::test_lone

3 tests collected in 0.01s
";
        let collected = CollectedItems::from_quiet_output(output);
        assert_eq!(collected.len(), 3);
        assert!(collected.contains(
            Path::new("tests/unit/pkg/test_a.py"),
            "TestGetA::test_basic"
        ));
        assert!(collected.contains(
            Path::new("tests/unit/pkg/test_a.py"),
            "TestGetA::test_param"
        ));
        assert!(collected.contains(Path::new("tests/unit/pkg/test_b.py"), "test_lone"));
    }

    #[test]
    fn test_ignores_summary_and_blank_lines() {
        let output = "no tests ran in 0.01s\n\nwarnings summary\n";
        assert!(CollectedItems::from_quiet_output(output).is_empty());
    }
}
