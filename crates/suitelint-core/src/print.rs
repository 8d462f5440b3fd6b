//! Rendering violations for console output.

use crate::core::check::as_posix;
use crate::core::rules::Violation;

/// One diagnostic line: `<rel-path>:<line>:<col>: <CODE> <message>`.
pub fn render_violation(violation: &Violation) -> String {
    format!(
        "{}:{}:{}: {} {}",
        as_posix(&violation.rel_path),
        violation.line_num,
        violation.char_offset,
        violation.rule_code,
        violation.message(),
    )
}

/// Print violations to stderr, one line each.
pub fn print_violations(violations: &[Violation]) {
    for violation in violations {
        eprintln!("{}", render_violation(violation));
    }
}
