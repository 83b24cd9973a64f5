use clap::Parser;
use std::path::PathBuf;

/// Read-only viewer sidecar for per-class student records.
///
/// Speaks line-delimited JSON on stdin/stdout; logs go to stderr.
#[derive(Parser, Debug, Clone)]
#[command(name = "recordbookd", version, about)]
pub struct Config {
    /// Roster dataset: class id -> list of student records.
    #[arg(long = "data", env = "RECORDBOOK_DATA", default_value = "student_records.json")]
    pub data_path: PathBuf,

    /// Per-class passwords. Optional; without it every class is locked.
    #[arg(
        long = "passwords",
        env = "RECORDBOOK_PASSWORDS",
        default_value = "class_passwords.json"
    )]
    pub passwords_path: PathBuf,

    /// Title reported to the UI by `app.info`.
    #[arg(long, env = "RECORDBOOK_TITLE", default_value = "Student record viewer")]
    pub title: String,
}
