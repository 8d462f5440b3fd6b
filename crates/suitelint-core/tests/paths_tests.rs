use std::path::{Path, PathBuf};

use suitelint_core::config::ProjConfig;
use suitelint_core::core::paths::{
    source_path_to_test_path, test_path_to_source_path, PathError,
};
use suitelint_core::core::rules::RULE_CODES;

fn consolidated_config(pkg_name: &str) -> ProjConfig {
    ProjConfig::new(
        vec![pkg_name.to_string()],
        PathBuf::from("src"),
        PathBuf::from("tests"),
        PathBuf::from("."),
        true,
        RULE_CODES.to_vec(),
    )
    .unwrap()
}

#[test]
fn test_source_to_test_path() {
    let config = ProjConfig::with_defaults(vec!["fakemcfake".to_string()]);
    let proj_dir = Path::new("example/subfolder/repo");
    assert_eq!(
        source_path_to_test_path(
            Path::new("example/subfolder/repo/src/fakemcfake/example.py"),
            &config,
            proj_dir,
        )
        .unwrap(),
        Path::new("example/subfolder/repo/tests/unit/fakemcfake/test_example.py"),
    );
}

#[test]
fn test_test_to_source_path() {
    let config = ProjConfig::with_defaults(vec!["fakemcfake".to_string()]);
    let proj_dir = Path::new("example/subfolder/repo");
    assert_eq!(
        test_path_to_source_path(
            Path::new("example/subfolder/repo/tests/unit/fakemcfake/test_example.py"),
            &config,
            proj_dir,
        )
        .unwrap(),
        Path::new("example/subfolder/repo/src/fakemcfake/example.py"),
    );
}

#[test]
fn test_round_trip_through_nested_dirs() {
    let config = ProjConfig::with_defaults(vec!["pkg".to_string()]);
    let proj_dir = Path::new("repo");
    let source = PathBuf::from("repo/src/pkg/deeply/nested/module.py");

    let test_path = source_path_to_test_path(&source, &config, proj_dir).unwrap();
    assert_eq!(
        test_path,
        Path::new("repo/tests/unit/pkg/deeply/nested/test_module.py"),
    );
    assert_eq!(
        test_path_to_source_path(&test_path, &config, proj_dir).unwrap(),
        source,
    );
}

#[test]
fn test_round_trip_from_test_side() {
    let config = ProjConfig::with_defaults(vec!["pkg".to_string()]);
    let proj_dir = Path::new("repo");
    let test_path = PathBuf::from("repo/tests/unit/pkg/test_module.py");

    let source = test_path_to_source_path(&test_path, &config, proj_dir).unwrap();
    assert_eq!(
        source_path_to_test_path(&source, &config, proj_dir).unwrap(),
        test_path,
    );
}

#[test]
fn test_consolidated_layout_drops_pkg_and_unit_segments() {
    let config = consolidated_config("p");
    let proj_dir = Path::new("repo");
    assert_eq!(
        source_path_to_test_path(Path::new("repo/src/p/sub/x.py"), &config, proj_dir)
            .unwrap(),
        Path::new("repo/tests/sub/test_x.py"),
    );
}

#[test]
fn test_consolidated_round_trip() {
    let config = consolidated_config("p");
    let proj_dir = Path::new("repo");
    let source = PathBuf::from("repo/src/p/x.py");

    let test_path = source_path_to_test_path(&source, &config, proj_dir).unwrap();
    assert_eq!(test_path, Path::new("repo/tests/test_x.py"));
    assert_eq!(
        test_path_to_source_path(&test_path, &config, proj_dir).unwrap(),
        source,
    );
}

#[test]
fn test_path_outside_source_root_is_an_error() {
    let config = ProjConfig::with_defaults(vec!["pkg".to_string()]);
    let result = source_path_to_test_path(
        Path::new("elsewhere/pkg/a.py"),
        &config,
        Path::new("repo"),
    );
    match result {
        Err(PathError::OutsideProject { what, prefix, .. }) => {
            assert_eq!(what, "source");
            assert_eq!(prefix, Path::new("repo/src"));
        }
        other => panic!("expected OutsideProject error, got {other:?}"),
    }
}

#[test]
fn test_test_path_outside_unit_dir_is_an_error() {
    let config = ProjConfig::with_defaults(vec!["pkg".to_string()]);
    let result = test_path_to_source_path(
        Path::new("repo/tests/integr/test_a.py"),
        &config,
        Path::new("repo"),
    );
    assert!(matches!(
        result,
        Err(PathError::OutsideProject { what: "unit tests", .. })
    ));
}
