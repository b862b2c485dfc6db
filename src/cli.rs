use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "quizdrop", version, about = "Terminal runner for drag-and-drop quizzes")]
pub struct Cli {
    /// Quiz file (.json, .yaml or .yml)
    pub file: PathBuf,

    /// Write a printable version with the answer key and exit
    #[arg(long, value_name = "path")]
    pub export: Option<PathBuf>,

    /// Validate the quiz file and exit without running it
    #[arg(long)]
    pub check: bool,

    /// Feedback window before auto-advance, in milliseconds
    #[arg(long, value_name = "ms", default_value_t = 1500)]
    pub delay_ms: u64,

    /// Require an explicit Enter to check drag answers instead of
    /// confirming as soon as the last slot is filled
    #[arg(long)]
    pub confirm_button: bool,
}
