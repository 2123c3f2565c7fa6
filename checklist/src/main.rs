//! Course prerequisite checklist.
//!
//! Keeps the catalog and approval state under `.checklist/`. Each `toggle`
//! is one click: it approves a course whose prerequisites are all approved,
//! unapproves an approved course, and otherwise explains what is missing.

use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use checklist::checklist::open_from_root;
use checklist::core::types::ToggleOutcome;
use checklist::exit_codes;
use checklist::io::init::{InitOptions, init_checklist};
use checklist::io::render::render_board;
use checklist::logging;
use checklist::validate::validate_checklist;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "checklist",
    version,
    about = "Course prerequisite checklist"
)]
struct Cli {
    /// Project root containing `.checklist/`.
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create `.checklist/` with a sample catalog and empty approvals.
    Init {
        /// Overwrite existing files.
        #[arg(short, long)]
        force: bool,
    },
    /// Check catalog against schema and invariants; report ignored references.
    Validate,
    /// Print every course with its approved/blocked state.
    Status,
    /// Toggle approval of a course (one click).
    Toggle {
        /// Course code.
        code: String,
    },
    /// Print the prerequisites of a course that are not yet approved.
    Missing {
        /// Course code.
        code: String,
    },
    /// Clear all approvals.
    Reset,
}

fn main() {
    logging::init();
    let code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            exit_codes::INVALID
        }
    };
    std::process::exit(code);
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let root = cli.root.as_path();
    match cli.command {
        Command::Init { force } => cmd_init(root, force),
        Command::Validate => cmd_validate(root),
        Command::Status => cmd_status(root),
        Command::Toggle { code } => cmd_toggle(root, &code),
        Command::Missing { code } => cmd_missing(root, &code),
        Command::Reset => cmd_reset(root),
    }
}

fn cmd_init(root: &Path, force: bool) -> Result<i32> {
    let paths = init_checklist(root, &InitOptions { force })?;
    println!("initialized {}", paths.checklist_dir.display());
    Ok(exit_codes::OK)
}

fn cmd_validate(root: &Path) -> Result<i32> {
    let outcome = validate_checklist(root)?;
    for warning in &outcome.warnings {
        eprintln!("warning: {}", warning);
    }
    println!(
        "ok: {} courses, {} approved",
        outcome.courses, outcome.approved
    );
    Ok(exit_codes::OK)
}

fn cmd_status(root: &Path) -> Result<i32> {
    let checklist = open_from_root(root)?;
    println!("{}", render_board(checklist.engine(), checklist.warning())?);
    Ok(exit_codes::OK)
}

fn cmd_toggle(root: &Path, code: &str) -> Result<i32> {
    let mut checklist = open_from_root(root)?;
    let report = checklist.click(code);
    if let Some(warning) = checklist.warning() {
        eprintln!("warning: {}", warning);
    }
    let name = checklist.engine().graph().display_name(code).to_string();
    let exit = match &report.outcome {
        ToggleOutcome::Approved => {
            println!("aprobado: {}", name);
            exit_codes::OK
        }
        ToggleOutcome::Unapproved => {
            println!("desaprobado: {}", name);
            exit_codes::OK
        }
        ToggleOutcome::Rejected(rejection) => {
            println!("{}", rejection.message());
            exit_codes::REJECTED
        }
        ToggleOutcome::UnknownCourse => {
            eprintln!("unknown course '{}'", code);
            exit_codes::UNKNOWN_COURSE
        }
    };
    Ok(exit)
}

fn cmd_missing(root: &Path, code: &str) -> Result<i32> {
    let checklist = open_from_root(root)?;
    let engine = checklist.engine();
    if engine.graph().lookup(code).is_none() {
        eprintln!("unknown course '{}'", code);
        return Ok(exit_codes::UNKNOWN_COURSE);
    }
    for missing in engine.missing_prerequisites(code) {
        println!("{}\t{}", missing, engine.graph().display_name(&missing));
    }
    Ok(exit_codes::OK)
}

fn cmd_reset(root: &Path) -> Result<i32> {
    let mut checklist = open_from_root(root)?;
    if !checklist.reset() {
        return Err(anyhow!(
            "reset: {}",
            checklist.warning().unwrap_or("approvals not saved")
        ));
    }
    println!("approvals cleared");
    Ok(exit_codes::OK)
}
