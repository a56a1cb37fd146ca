//! Purpose: `jsonstat` CLI entry point and command dispatch.
//! Role: Binary crate root; parses args, decodes datasets, emits JSON on stdout.
//! Invariants: Commands emit stable JSON on stdout (compact, or pretty with `--pretty`).
//! Invariants: Non-interactive errors are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
use std::error::Error as StdError;
use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser, Subcommand, ValueHint, error::ErrorKind as ClapErrorKind};
use clap_complete::aot::Shell;
use serde_json::{Map, Value, json};
use tracing_subscriber::EnvFilter;

mod command_dispatch;
mod dataset_json;

use dataset_json::{normalized_json, summary_json};
use jsonstat::api::{Dataset, Error, ErrorKind, to_exit_code};

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }

    fn with_code(exit_code: i32) -> Self {
        Self { exit_code }
    }
}

fn main() {
    init_tracing();
    let exit_code = match run() {
        Ok(outcome) => outcome.exit_code,
        Err(err) => {
            emit_error(&err);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<RunOutcome, Error> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    Error::new(ErrorKind::Io)
                        .with_message("failed to write help")
                        .with_source(io_err)
                })?;
                let exit_code = if matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    2
                } else {
                    0
                };
                return Ok(RunOutcome::with_code(exit_code));
            }
            _ => {
                return Err(Error::new(ErrorKind::Usage)
                    .with_message(clap_error_summary(&err))
                    .with_hint("Try `jsonstat --help`."));
            }
        },
    };

    command_dispatch::dispatch_command(cli.command, cli.pretty)
        .map_err(add_input_hint)
        .map_err(add_internal_hint)
}

#[derive(Parser)]
#[command(
    name = "jsonstat",
    version,
    about = "Decode and check JSON-stat v2 datasets",
    long_about = None,
    after_help = r#"EXAMPLES
  $ jsonstat inspect population.json
  $ curl -s https://data.ssb.no/api/v0/dataset/1102.json | jsonstat check -
  $ jsonstat normalize --pretty population.json

Set RUST_LOG=debug to trace decoding on stderr."#,
    arg_required_else_help = true
)]
struct Cli {
    #[arg(long, global = true, help = "Pretty-print JSON output")]
    pretty: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a summary of the dataset: labels, value counts, ordered dimensions.
    Inspect {
        #[arg(value_name = "INPUT", help = "Dataset file, or `-` for stdin", value_hint = ValueHint::FilePath)]
        input: PathBuf,
    },
    /// Decode and validate the dataset; exit non-zero on the first problem.
    Check {
        #[arg(value_name = "INPUT", help = "Dataset file, or `-` for stdin", value_hint = ValueHint::FilePath)]
        input: PathBuf,
    },
    /// Re-emit the dataset as compact JSON-stat v2 in canonical dimension order.
    Normalize {
        #[arg(value_name = "INPUT", help = "Dataset file, or `-` for stdin", value_hint = ValueHint::FilePath)]
        input: PathBuf,
    },
    /// Generate shell completion scripts.
    Completion {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn is_stdin(input: &Path) -> bool {
    input.as_os_str() == "-"
}

fn load_dataset(input: &Path) -> Result<Dataset, Error> {
    if is_stdin(input) {
        return jsonstat::api::from_reader(io::stdin().lock());
    }
    let file = File::open(input).map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message("failed to open input")
            .with_path(input)
            .with_source(err)
    })?;
    jsonstat::api::from_reader(BufReader::new(file)).map_err(|err| err.with_path(input))
}

fn emit_json(value: Value, pretty: bool) -> Result<(), Error> {
    let text = if pretty {
        serde_json::to_string_pretty(&value)
    } else {
        serde_json::to_string(&value)
    }
    .map_err(|err| {
        Error::new(ErrorKind::Internal)
            .with_message("json encode failed")
            .with_source(err)
    })?;
    println!("{text}");
    Ok(())
}

fn add_input_hint(err: Error) -> Error {
    if err.hint().is_some() {
        return err;
    }
    match err.kind() {
        ErrorKind::Io => err.with_hint("I/O error. Check the path and that the input is readable."),
        _ => err,
    }
}

fn add_internal_hint(err: Error) -> Error {
    if err.kind() != ErrorKind::Internal || err.hint().is_some() {
        return err;
    }
    err.with_hint(
        "Unexpected internal failure. Retry with RUST_BACKTRACE=1 and share the input if it persists.",
    )
}

fn emit_error(err: &Error) {
    if io::stderr().is_terminal() {
        eprintln!("{}", error_text(err));
        return;
    }

    let value = error_json(err);
    let json = serde_json::to_string(&value).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::Internal => "internal error".to_string(),
        ErrorKind::Usage => "usage error".to_string(),
        ErrorKind::Io => "i/o error".to_string(),
        ErrorKind::MalformedInput => "malformed input".to_string(),
        ErrorKind::UnknownDimension => "unknown dimension".to_string(),
        ErrorKind::DimensionMismatch => "dimension mismatch".to_string(),
        ErrorKind::InvalidRole => "invalid role".to_string(),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut cur = err.source();
    while let Some(source) = cur {
        causes.push(source.to_string());
        cur = source.source();
    }
    causes
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(field) = err.field() {
        inner.insert("field".to_string(), json!(field));
    }
    if let Some(dimension) = err.dimension() {
        inner.insert("dimension".to_string(), json!(dimension));
    }
    if let Some(role) = err.role() {
        inner.insert("role".to_string(), json!(role));
    }
    if let Some(path) = err.path() {
        inner.insert("path".to_string(), json!(path.display().to_string()));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_text(err: &Error) -> String {
    let mut lines = vec![format!("error: {}", error_message(err))];
    if let Some(hint) = err.hint() {
        lines.push(format!("hint: {hint}"));
    }
    if let Some(field) = err.field() {
        lines.push(format!("field: {field}"));
    }
    if let Some(dimension) = err.dimension() {
        lines.push(format!("dimension: {dimension}"));
    }
    if let Some(role) = err.role() {
        lines.push(format!("role: {role}"));
    }
    if let Some(path) = err.path() {
        lines.push(format!("path: {}", path.display()));
    }
    if let Some(cause) = error_causes(err).first() {
        lines.push(format!("caused by: {cause}"));
    }
    lines.join("\n")
}

fn clap_error_summary(err: &clap::Error) -> String {
    for line in err.to_string().lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("error:") {
            return rest.trim().to_string();
        }
        return trimmed.to_string();
    }
    "invalid arguments".to_string()
}
