//! The checking core: path and name mapping, suite projection,
//! reconciliation, and the rule registry.

pub mod check;
pub mod names;
pub mod organize;
pub mod paths;
pub mod rules;
