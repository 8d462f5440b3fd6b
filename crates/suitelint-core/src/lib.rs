pub mod config;
pub mod core;
pub mod domain;
pub mod parser;
pub mod print;
pub mod project;
pub mod read;

pub use crate::config::{get_config, ConfigError, ProjConfig};
pub use crate::core::check::get_violations;
pub use crate::core::rules::{RuleCode, Violation};
pub use crate::domain::Project;
pub use crate::project::{get_project, ProjectError};
