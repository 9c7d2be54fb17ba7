use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use contract_guard_core::{Invocation, ScopeRecord, ValidationFailure, curry, merge_scope};
use contract_guard_registry::{ContractFile, ContractRegistry, validate_contracts};
use serde_json::Value;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Exit status when inputs violate a contract.
const EXIT_VIOLATIONS: i32 = 2;

#[derive(Debug, Parser)]
#[command(name = "contract-guard")]
#[command(about = "Check argument contracts and merge scope records")]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate a JSON argument list against a named function contract.
    CheckArgs(CheckArgsArgs),
    /// Validate an actual record against an expected scope and print the merge.
    MergeScope(MergeScopeArgs),
    /// Validate one or more contract files.
    ValidateContract(ValidateContractArgs),
}

#[derive(Debug, Args)]
struct CheckArgsArgs {
    /// Contract file (YAML, or JSON by extension).
    #[arg(long)]
    contract: PathBuf,
    /// Function name declared in the contract file.
    #[arg(long)]
    function: String,
    /// JSON array of positional arguments (e.g. '["FOO", {"a": 1}]').
    #[arg(long)]
    args: String,
}

#[derive(Debug, Args)]
struct MergeScopeArgs {
    /// Authoritative scope record (JSON or YAML).
    #[arg(long)]
    expected: PathBuf,
    /// Candidate record (JSON or YAML).
    #[arg(long)]
    actual: PathBuf,
    /// Write the merged record here instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct ValidateContractArgs {
    /// Contract files to validate.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

enum CliError {
    Failed(String),
    Violations(ValidationFailure),
}

impl From<String> for CliError {
    fn from(message: String) -> Self {
        Self::Failed(message)
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::CheckArgs(args) => run_check_args(args),
        Command::MergeScope(args) => run_merge_scope(args),
        Command::ValidateContract(args) => run_validate_contract(args),
    };

    match result {
        Ok(()) => {}
        Err(CliError::Failed(err)) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
        Err(CliError::Violations(failure)) => {
            for message in failure.messages() {
                eprintln!("{message}");
            }
            std::process::exit(EXIT_VIOLATIONS);
        }
    }
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "contract_guard=debug,contract_guard_registry=debug"
    } else {
        "contract_guard=warn,contract_guard_registry=warn"
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn run_check_args(args: CheckArgsArgs) -> Result<(), CliError> {
    let registry = ContractRegistry::load(&args.contract).map_err(|err| {
        format!(
            "Failed to load contract '{}': {err}",
            args.contract.display()
        )
    })?;
    let values: Vec<Value> = serde_json::from_str(&args.args)
        .map_err(|err| format!("--args must be a JSON array: {err}"))?;

    let arity = registry
        .get(&args.function)
        .map(|schema| schema.len())
        .ok_or_else(|| format!("Unknown function '{}'", args.function))?;
    let function = registry
        .wrap(&args.function, curry(arity, |_| ()))
        .map_err(|err| err.to_string())?;

    debug!(function = %args.function, supplied = values.len(), "Checking arguments");
    let supplied = values.len();
    match function.call(values).map_err(CliError::Violations)? {
        Invocation::Complete(()) => {
            println!(
                "Function {}: accepted {supplied} argument(s).",
                function.display_name()
            );
        }
        Invocation::Partial(partial) => {
            println!(
                "Function {}: accepted {supplied} argument(s), awaiting {} more.",
                function.display_name(),
                partial.remaining()
            );
        }
    }
    Ok(())
}

fn run_merge_scope(args: MergeScopeArgs) -> Result<(), CliError> {
    let expected = read_record(&args.expected)?;
    let actual = read_record(&args.actual)?;

    debug!(
        expected_keys = expected.len(),
        actual_keys = actual.len(),
        "Merging scope"
    );
    let merged = merge_scope(&expected, &actual).map_err(CliError::Violations)?;

    let raw = serde_json::to_string_pretty(&Value::Object(merged))
        .map_err(|err| format!("Failed to serialize merged record: {err}"))?;
    match args.output {
        Some(path) => {
            fs::write(&path, raw)
                .map_err(|err| format!("Failed to write '{}': {err}", path.display()))?;
            println!("Merged record written to '{}'.", path.display());
        }
        None => println!("{raw}"),
    }
    Ok(())
}

fn run_validate_contract(args: ValidateContractArgs) -> Result<(), CliError> {
    let mut problems = Vec::new();
    let mut functions = 0;

    for path in &args.inputs {
        let file = match ContractFile::load(path) {
            Ok(file) => file,
            Err(err) => {
                problems.push(format!("{}: {err}", path.display()));
                continue;
            }
        };
        functions += file.functions.len();
        problems.extend(
            validate_contracts(&file)
                .into_iter()
                .map(|err| format!("{}: {err}", path.display())),
        );
    }

    if !problems.is_empty() {
        return Err(CliError::Violations(ValidationFailure::from_messages(
            problems,
        )));
    }

    println!(
        "Validated {} contract file(s) declaring {functions} function(s).",
        args.inputs.len()
    );
    Ok(())
}

fn read_record(path: &Path) -> Result<ScopeRecord, String> {
    let raw = fs::read_to_string(path)
        .map_err(|err| format!("Failed to read '{}': {err}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let value: Value = if is_json {
        serde_json::from_str(&raw).map_err(|err| err.to_string())
    } else {
        serde_yaml::from_str(&raw).map_err(|err| err.to_string())
    }
    .map_err(|err| format!("Failed to parse '{}': {err}", path.display()))?;

    match value {
        Value::Object(record) => Ok(record),
        _ => Err(format!("'{}' must contain a record", path.display())),
    }
}
