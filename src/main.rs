use std::time::Duration;

use clap::Parser;

use quizdrop::cli::Cli;
use quizdrop::engine::ConfirmPolicy;
use quizdrop::export;
use quizdrop::loader;
use quizdrop::runner::{RunnerConfig, TestRunner};
use quizdrop::state::AppState;
use quizdrop::tui;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let cli = Cli::parse();

    let payload = loader::load_payload(&cli.file).map_err(|e| e.to_string())?;

    if let Some(path) = &cli.export {
        export::write_printable(&payload, path)?;
        eprintln!("Wrote {}", path.display());
        return Ok(());
    }

    if cli.check {
        let runnable = payload.questions.iter().filter(|q| !q.is_typing()).count();
        eprintln!(
            "{}: {} questions ({} runnable)",
            cli.file.display(),
            payload.questions.len(),
            runnable
        );
        return Ok(());
    }

    let config = RunnerConfig {
        advance_delay: Duration::from_millis(cli.delay_ms),
        confirm_policy: if cli.confirm_button {
            ConfirmPolicy::ExplicitConfirm
        } else {
            ConfirmPolicy::AutoOnFill
        },
        ..RunnerConfig::default()
    };

    let runner = TestRunner::new(&payload, config);
    if runner.question_count() == 0 {
        return Err("This quiz has no runnable questions.".to_string());
    }

    let state = AppState::new(payload.title.clone(), payload.instructions.clone(), runner);
    tui::run_tui(state, config.advance_delay)
}
