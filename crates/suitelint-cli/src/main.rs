use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use suitelint_core::print::print_violations;
use suitelint_core::{get_project, get_violations};

/// Walking further up than this when looking for the project root means
/// something is wrong with the filesystem.
const MAX_PROJ_DIR_DEPTH: usize = 1000;

#[derive(Parser)]
#[command(name = "suitelint")]
#[command(
    about = "Check that a pytest suite follows the one-test-class-per-function convention",
    long_about = None
)]
struct Cli {
    /// Restrict checking to these files and their mapped counterparts
    files: Vec<PathBuf>,

    /// Skip checks that need to invoke pytest
    #[arg(long)]
    static_only: bool,

    /// Project root; inferred from the working directory when omitted
    #[arg(long)]
    project_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let proj_dir = match cli.project_dir {
        Some(dir) => dir,
        None => match std::env::current_dir().ok().and_then(|cwd| infer_proj_dir(&cwd))
        {
            Some(dir) => dir,
            None => {
                eprintln!("suitelint: could not infer the project directory");
                return ExitCode::FAILURE;
            }
        },
    };

    let project = match get_project(&proj_dir, &cli.files, cli.static_only) {
        Ok(project) => project,
        Err(err) => {
            eprintln!("suitelint: {err}");
            return ExitCode::FAILURE;
        }
    };

    let violations = match get_violations(&project) {
        Ok(violations) => violations,
        Err(err) => {
            eprintln!("suitelint: {err}");
            return ExitCode::FAILURE;
        }
    };

    if violations.is_empty() {
        ExitCode::SUCCESS
    } else {
        print_violations(&violations);
        ExitCode::FAILURE
    }
}

/// Walk upward from the starting directory until a `pyproject.toml`
/// file or a VCS directory marks the project root.
fn infer_proj_dir(start: &Path) -> Option<PathBuf> {
    let mut candidate = start.to_path_buf();
    for _ in 0..MAX_PROJ_DIR_DEPTH {
        if candidate.join("pyproject.toml").is_file() {
            return Some(candidate);
        }
        if [".git", ".hg", ".svn"]
            .iter()
            .any(|vcs_dir| candidate.join(vcs_dir).is_dir())
        {
            return Some(candidate);
        }
        let parent = candidate.parent()?;
        candidate = parent.to_path_buf();
    }
    None
}
