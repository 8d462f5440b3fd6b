use std::fs;
use std::path::Path;
use std::process::Command;

fn write_file(root: &Path, rel_path: &str, contents: &str) {
    let path = root.join(rel_path);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn suitelint() -> Command {
    Command::new(env!("CARGO_BIN_EXE_suitelint"))
}

#[test]
fn test_compliant_project_exits_zero() {
    let tmp = tempfile::tempdir().unwrap();
    write_file(
        tmp.path(),
        "pyproject.toml",
        "[tool.suitelint]\npkg_names = [\"pkg\"]\n",
    );
    write_file(tmp.path(), "src/pkg/a.py", "def get_a():\n    return 1\n");
    write_file(
        tmp.path(),
        "tests/unit/pkg/test_a.py",
        "\
from pkg.a import get_a


class TestGetA:
    def test_basic(self):
        assert get_a() == 1
",
    );

    let output = suitelint()
        .arg("--static-only")
        .arg("--project-dir")
        .arg(tmp.path())
        .output()
        .unwrap();

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(output.stderr.is_empty());
}

#[test]
fn test_violating_project_exits_one_with_diagnostics() {
    let tmp = tempfile::tempdir().unwrap();
    write_file(
        tmp.path(),
        "pyproject.toml",
        "[tool.suitelint]\npkg_names = [\"pkg\"]\n",
    );
    write_file(tmp.path(), "src/pkg/a.py", "def get_a():\n    return 1\n");
    fs::create_dir_all(tmp.path().join("tests/unit/pkg")).unwrap();

    let output = suitelint()
        .arg("--static-only")
        .arg("--project-dir")
        .arg(tmp.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("src/pkg/a.py:1:0: SUI001 get_a untested in tests/unit/pkg/test_a.py"),
        "stderr: {stderr}"
    );
}

#[test]
fn test_unconfigurable_project_exits_one_with_error() {
    let tmp = tempfile::tempdir().unwrap();
    write_file(tmp.path(), "pyproject.toml", "[project]\n");

    let output = suitelint()
        .arg("--static-only")
        .arg("--project-dir")
        .arg(tmp.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("suitelint: "), "stderr: {stderr}");
}
