//! Projection of a codebase into its ideal test suite.

use std::collections::BTreeSet;
use std::path::Path;

use crate::config::ProjConfig;
use crate::core::names::func_to_test_class_name;
use crate::core::paths::{source_path_to_test_path, PathError};
use crate::domain::{Codebase, Func, PytestClass, PytestFile, PytestSuite};

/// Compute the test-suite shape that would fully satisfy the convention.
///
/// Every source file with at least one top-level function yields exactly
/// one test file at its mapped path, containing one test class per
/// non-underscored function, in declaration order. Files with no
/// top-level functions contribute nothing; underscored functions are not
/// expected to have dedicated test classes.
pub fn organize_test_suite(
    codebase: &Codebase,
    config: &ProjConfig,
    proj_dir: &Path,
) -> Result<PytestSuite, PathError> {
    let mut pytest_files = Vec::new();

    for file in &codebase.files {
        if file.funcs.is_empty() {
            continue;
        }

        let path = source_path_to_test_path(&file.path, config, proj_dir)?;
        let pytest_classes = file
            .funcs
            .iter()
            .filter(|func| !func.is_underscored())
            .map(func_to_projected_class)
            .collect();

        pytest_files.push(PytestFile {
            path,
            pytest_classes,
            lone_pytest_funcs: Vec::new(),
            imported_objs: BTreeSet::new(),
        });
    }

    Ok(PytestSuite { pytest_files })
}

/// The test class a function is expected to be covered by. Projected
/// classes carry no position and no tests of their own; they describe a
/// shape, not parsed code.
fn func_to_projected_class(func: &Func) -> PytestClass {
    let name = func_to_test_class_name(&func.name);
    PytestClass {
        full_name: name.clone(),
        name,
        line_num: 0,
        char_offset: 0,
        pytest_funcs: Vec::new(),
    }
}
