//! Purpose: Hold top-level CLI command dispatch for `jsonstat`.
//! Exports: `dispatch_command`.
//! Role: Keep `main.rs` focused on parse/bootstrap and delegate command execution.
//! Invariants: Every command decodes the full input before writing anything to stdout.
//! Invariants: Helpers in `main.rs` remain the source of output and error formatting.

use super::*;

pub(super) fn dispatch_command(command: Command, pretty: bool) -> Result<RunOutcome, Error> {
    match command {
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::aot::generate(shell, &mut cmd, "jsonstat", &mut io::stdout());
            Ok(RunOutcome::ok())
        }
        Command::Inspect { input } => {
            let dataset = load_dataset(&input)?;
            emit_json(summary_json(&dataset)?, pretty)?;
            Ok(RunOutcome::ok())
        }
        Command::Check { input } => {
            let dataset = load_dataset(&input)?;
            emit_json(
                json!({
                    "ok": true,
                    "dimensions": dataset.dimensions().len(),
                    "values": dataset.values().len(),
                }),
                pretty,
            )?;
            Ok(RunOutcome::ok())
        }
        Command::Normalize { input } => {
            let dataset = load_dataset(&input)?;
            emit_json(normalized_json(&dataset)?, pretty)?;
            Ok(RunOutcome::ok())
        }
    }
}
