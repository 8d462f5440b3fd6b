//! The rules enforced by suitelint.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Identifier of a rule enforced by suitelint.
///
/// The variant order defines the reporting order of the codes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum RuleCode {
    /// SUI001: a public function has no matching test class.
    #[serde(rename = "SUI001")]
    MissingTestFunc,

    /// SUI002: a pytest class contains no tests.
    #[serde(rename = "SUI002")]
    EmptyPytestClass,

    /// SUI003: a tested function is not imported by its test file.
    #[serde(rename = "SUI003")]
    UnimportedTestedFunc,

    /// SUI104: a test function is not collected by pytest.
    #[serde(rename = "SUI104")]
    UncollectedTestFunc,
}

/// Every rule code, in reporting order.
pub const RULE_CODES: [RuleCode; 4] = [
    RuleCode::MissingTestFunc,
    RuleCode::EmptyPytestClass,
    RuleCode::UnimportedTestedFunc,
    RuleCode::UncollectedTestFunc,
];

impl RuleCode {
    pub fn as_str(&self) -> &'static str {
        self.rule().code_str
    }

    /// Static rules run from parsed sources alone; non-static rules need
    /// pytest itself to be invoked.
    pub fn is_static(&self) -> bool {
        !matches!(self, RuleCode::UncollectedTestFunc)
    }

    /// Look up the registry entry for this code.
    pub fn rule(&self) -> &'static Rule {
        match self {
            RuleCode::MissingTestFunc => &MISSING_TEST_FUNC,
            RuleCode::EmptyPytestClass => &EMPTY_PYTEST_CLASS,
            RuleCode::UnimportedTestedFunc => &UNIMPORTED_TESTED_FUNC,
            RuleCode::UncollectedTestFunc => &UNCOLLECTED_TEST_FUNC,
        }
    }
}

impl std::fmt::Display for RuleCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A rule enforced by suitelint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub code: RuleCode,
    pub code_str: &'static str,
    pub name: &'static str,

    /// Template with named `{placeholders}` filled from a violation's
    /// format arguments.
    pub description: &'static str,
}

pub const MISSING_TEST_FUNC: Rule = Rule {
    code: RuleCode::MissingTestFunc,
    code_str: "SUI001",
    name: "missing-test-func",
    description: "{func} untested in {pytest_file_rel_posix}",
};

pub const EMPTY_PYTEST_CLASS: Rule = Rule {
    code: RuleCode::EmptyPytestClass,
    code_str: "SUI002",
    name: "empty-pytest-class",
    description: "{pytest_class_name} has no tests",
};

pub const UNIMPORTED_TESTED_FUNC: Rule = Rule {
    code: RuleCode::UnimportedTestedFunc,
    code_str: "SUI003",
    name: "unimported-tested-func",
    description: "{func_fullname} is not imported in {pytest_file_rel_posix}",
};

pub const UNCOLLECTED_TEST_FUNC: Rule = Rule {
    code: RuleCode::UncollectedTestFunc,
    code_str: "SUI104",
    name: "uncollected-test-func",
    description: "{func_fullname} is not collected by pytest",
};

/// A violation of the test suite rules.
///
/// Violations are produced only by [`crate::core::check::get_violations`]
/// and are immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub rule_code: RuleCode,

    /// Path relative to the project root.
    pub rel_path: PathBuf,

    /// 1-based line, or 0 for suite-level findings.
    pub line_num: u32,

    /// 0-based column, or 0 for suite-level findings.
    pub char_offset: u32,

    /// Named values for the rule's description template.
    pub fmt_info: BTreeMap<String, String>,
}

impl Violation {
    /// Fill the rule's description template with this violation's
    /// format arguments.
    pub fn message(&self) -> String {
        let mut msg = self.rule_code.rule().description.to_string();
        for (key, value) in &self.fmt_info {
            msg = msg.replace(&format!("{{{key}}}"), value);
        }
        msg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_order_matches_reporting_order() {
        let mut sorted = RULE_CODES;
        sorted.sort();
        assert_eq!(sorted, RULE_CODES);
    }

    #[test]
    fn test_only_collection_rule_is_nonstatic() {
        let nonstatic: Vec<RuleCode> = RULE_CODES
            .iter()
            .copied()
            .filter(|code| !code.is_static())
            .collect();
        assert_eq!(nonstatic, vec![RuleCode::UncollectedTestFunc]);
    }

    #[test]
    fn test_message_fills_placeholders() {
        let violation = Violation {
            rule_code: RuleCode::MissingTestFunc,
            rel_path: PathBuf::from("src/pkg/a.py"),
            line_num: 3,
            char_offset: 0,
            fmt_info: BTreeMap::from([
                ("func".to_string(), "get_a".to_string()),
                (
                    "pytest_file_rel_posix".to_string(),
                    "tests/unit/pkg/test_a.py".to_string(),
                ),
            ]),
        };
        assert_eq!(
            violation.message(),
            "get_a untested in tests/unit/pkg/test_a.py"
        );
    }
}
