use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use suitelint_core::config::ProjConfig;
use suitelint_core::core::organize::organize_test_suite;
use suitelint_core::domain::{Codebase, Func, SourceFile};

fn func(module: &str, name: &str, line_num: u32) -> Func {
    Func {
        name: name.to_string(),
        full_name: format!("{module}.{name}"),
        line_num,
        char_offset: 0,
        dec_line_nums: Vec::new(),
    }
}

fn source_file(path: &str, funcs: Vec<Func>) -> SourceFile {
    SourceFile {
        path: PathBuf::from(path),
        funcs,
        clses: Vec::new(),
        imported_objs: BTreeSet::new(),
    }
}

#[test]
fn test_one_class_per_public_func() {
    let codebase = Codebase {
        files: vec![source_file(
            "repo/src/pkg/users.py",
            vec![
                func("pkg.users", "get_user", 3),
                func("pkg.users", "delete_user", 9),
            ],
        )],
    };
    let config = ProjConfig::with_defaults(vec!["pkg".to_string()]);

    let suite = organize_test_suite(&codebase, &config, Path::new("repo")).unwrap();

    assert_eq!(suite.pytest_files.len(), 1);
    let pytest_file = &suite.pytest_files[0];
    assert_eq!(
        pytest_file.path,
        Path::new("repo/tests/unit/pkg/test_users.py")
    );
    let names: Vec<&str> = pytest_file
        .pytest_classes
        .iter()
        .map(|cls| cls.name.as_str())
        .collect();
    assert_eq!(names, vec!["TestGetUser", "TestDeleteUser"]);
}

#[test]
fn test_file_without_funcs_contributes_nothing() {
    let codebase = Codebase {
        files: vec![
            source_file("repo/src/pkg/constants.py", Vec::new()),
            source_file("repo/src/pkg/a.py", vec![func("pkg.a", "get_a", 1)]),
        ],
    };
    let config = ProjConfig::with_defaults(vec!["pkg".to_string()]);

    let suite = organize_test_suite(&codebase, &config, Path::new("repo")).unwrap();

    assert_eq!(suite.pytest_files.len(), 1);
    assert_eq!(
        suite.pytest_files[0].path,
        Path::new("repo/tests/unit/pkg/test_a.py")
    );
}

#[test]
fn test_underscored_funcs_are_not_projected() {
    let codebase = Codebase {
        files: vec![source_file(
            "repo/src/pkg/a.py",
            vec![
                func("pkg.a", "_helper", 1),
                func("pkg.a", "get_a", 4),
                func("pkg.a", "__dunderish", 8),
            ],
        )],
    };
    let config = ProjConfig::with_defaults(vec!["pkg".to_string()]);

    let suite = organize_test_suite(&codebase, &config, Path::new("repo")).unwrap();

    let names: Vec<&str> = suite.pytest_files[0]
        .pytest_classes
        .iter()
        .map(|cls| cls.name.as_str())
        .collect();
    assert_eq!(names, vec!["TestGetA"]);
}

#[test]
fn test_all_private_file_projects_an_empty_test_file() {
    let codebase = Codebase {
        files: vec![source_file(
            "repo/src/pkg/internal.py",
            vec![func("pkg.internal", "_only_private", 1)],
        )],
    };
    let config = ProjConfig::with_defaults(vec!["pkg".to_string()]);

    let suite = organize_test_suite(&codebase, &config, Path::new("repo")).unwrap();

    assert_eq!(suite.pytest_files.len(), 1);
    assert!(suite.pytest_files[0].pytest_classes.is_empty());
}

#[test]
fn test_projection_preserves_codebase_file_order() {
    let codebase = Codebase {
        files: vec![
            source_file("repo/src/pkg/b.py", vec![func("pkg.b", "get_b", 1)]),
            source_file("repo/src/pkg/a.py", vec![func("pkg.a", "get_a", 1)]),
        ],
    };
    let config = ProjConfig::with_defaults(vec!["pkg".to_string()]);

    let suite = organize_test_suite(&codebase, &config, Path::new("repo")).unwrap();

    let paths: Vec<&Path> = suite
        .pytest_files
        .iter()
        .map(|pytest_file| pytest_file.path.as_path())
        .collect();
    assert_eq!(
        paths,
        vec![
            Path::new("repo/tests/unit/pkg/test_b.py"),
            Path::new("repo/tests/unit/pkg/test_a.py"),
        ]
    );
}
