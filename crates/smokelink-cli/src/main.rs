use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use glob::glob;
use smokelink_core::{
    AnalysisError, DecoderConfig, HexArgsSource, LengthPolicy, Report, SourceError,
    TimestampStyle,
};
use tracing::debug;

mod config;
mod logging;

use config::{CliConfig, load_config};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("SMOKELINK_BUILD_COMMIT"),
    " ",
    env!("SMOKELINK_BUILD_DATE"),
    ")"
);

const EXAMPLES: &str = "Examples:\n  smokelink payload decode A002006F03 --stdout\n  smokelink payload decode -i uplinks.hex -o report.json\n  smokelink payload decode -i 'captures/*.hex' --stdout --pretty";

#[derive(Parser, Debug)]
#[command(name = "smokelink")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Decoder for smoke-alarm LoRaWAN uplink payloads.",
    long_about = None,
    after_help = EXAMPLES
)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Operations on uplink payloads.
    Payload {
        #[command(subcommand)]
        command: PayloadCommands,
    },
}

#[derive(Subcommand, Debug)]
enum PayloadCommands {
    /// Decode hex payloads and generate a versioned JSON report.
    #[command(alias = "dec")]
    #[command(after_help = EXAMPLES)]
    Decode(DecodeArgs),
}

#[derive(Args, Debug)]
struct DecodeArgs {
    /// Hex payloads, e.g. A002006F03 or "A0 02 00 6F 03"
    #[arg(conflicts_with = "input")]
    payloads: Vec<String>,

    /// Hex text file with one payload per line (glob patterns allowed)
    #[arg(short = 'i', long)]
    input: Option<PathBuf>,

    /// Output report path (JSON)
    #[arg(short = 'o', long, required_unless_present = "stdout")]
    report: Option<PathBuf>,

    /// Write JSON report to stdout
    #[arg(long, conflicts_with = "report")]
    stdout: bool,

    /// Pretty-print JSON output
    #[arg(long, conflicts_with = "compact")]
    pretty: bool,

    /// Compact JSON output (default)
    #[arg(long)]
    compact: bool,

    /// Suppress non-error output
    #[arg(long)]
    quiet: bool,

    /// Exit with a non-zero code if any payload failed to decode
    #[arg(long)]
    strict: bool,

    /// List payloads that failed to decode after analysis
    #[arg(long)]
    list_failures: bool,

    /// Reject payloads shorter than their format requires
    #[arg(long)]
    strict_length: bool,

    /// Render timestamps zero-padded (ISO 8601) when they are valid dates
    #[arg(long)]
    iso_timestamps: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let file_config = match cli.config.as_deref() {
        Some(path) => load_config(path).map_err(|err| {
            CliError::new(
                format!("{:#}", err),
                Some("check the TOML file or drop --config".to_string()),
            )
        })?,
        None => CliConfig::default(),
    };

    let Commands::Payload { command } = cli.command;
    let PayloadCommands::Decode(args) = command;

    logging::init_logging(
        cli.log_level.as_deref().or(file_config.log_level.as_deref()),
        args.quiet,
    );
    cmd_payload_decode(args, file_config.decoder)
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{:#}", err), None)
    }
}

impl From<AnalysisError> for CliError {
    fn from(err: AnalysisError) -> Self {
        let hint = match &err {
            AnalysisError::Source(SourceError::InvalidHex { .. }) => {
                Some("payloads are hex bytes, e.g. A002006F03 or \"A0 02 00 6F 03\"".to_string())
            }
            _ => None,
        };
        CliError::new(format!("payload decoding failed: {}", err), hint)
    }
}

fn cmd_payload_decode(args: DecodeArgs, file_decoder: DecoderConfig) -> Result<(), CliError> {
    let decoder = resolve_decoder_config(file_decoder, &args);
    debug!(?decoder, "decoder configuration");

    if args.payloads.is_empty() && args.input.is_none() {
        return Err(CliError::new(
            "no payloads given",
            Some("pass hex payloads as arguments or use -i/--input".to_string()),
        ));
    }

    let report = if args.stdout {
        None
    } else {
        Some(args.report.clone().ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--report or --stdout".to_string()),
            )
        })?)
    };

    let rep = match args.input.as_ref() {
        Some(input) => {
            let resolved_input = resolve_input_path(input)?;
            validate_input_file(&resolved_input)?;
            if let Some(report_path) = report.as_ref() {
                ensure_report_differs(&resolved_input, report_path)?;
            }
            smokelink_core::analyze_hex_file(&resolved_input, &decoder)?
        }
        None => smokelink_core::analyze_source(
            None,
            HexArgsSource::new(args.payloads.clone()),
            &decoder,
        )?,
    };
    let json = serialize_report(&rep, args.pretty, args.compact)?;

    let Some(report) = report else {
        println!("{}", json);
        if args.list_failures && !args.quiet {
            print_failures(&rep);
        }
        return check_strict(&rep, args.strict);
    };

    if let Some(parent) = report.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }

    fs::write(&report, json)
        .with_context(|| format!("Failed to write report: {}", report.display()))?;

    if args.list_failures && !args.quiet {
        print_failures(&rep);
    }
    if !args.quiet {
        eprintln!("OK: report written -> {}", report.display());
    }
    check_strict(&rep, args.strict)
}

fn resolve_decoder_config(mut config: DecoderConfig, args: &DecodeArgs) -> DecoderConfig {
    if args.strict_length {
        config.length_policy = LengthPolicy::Strict;
    }
    if args.iso_timestamps {
        config.timestamp_style = TimestampStyle::Iso8601;
    }
    config
}

fn check_strict(rep: &Report, strict: bool) -> Result<(), CliError> {
    if strict && has_failures(rep) {
        return Err(CliError::new(
            "undecoded payloads detected",
            Some("use --list-failures to inspect".to_string()),
        ));
    }
    Ok(())
}

fn serialize_report(rep: &Report, pretty: bool, compact: bool) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    if pretty {
        serde_json::to_string_pretty(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn has_failures(rep: &Report) -> bool {
    rep.summary.failed > 0 || rep.summary.errors > 0
}

fn print_failures(rep: &Report) {
    eprintln!("Decode failures:");
    for entry in &rep.packets {
        let reason = match (&entry.decoded, &entry.error) {
            (_, Some(error)) => error.as_str(),
            (Some(record), None) if !record.status_decoded => record
                .status_info
                .as_deref()
                .unwrap_or("unrecognized packet"),
            _ => continue,
        };
        eprintln!("  line {} {} ({})", entry.line, entry.payload_hex, reason);
    }
}

fn ensure_report_differs(input: &Path, report_path: &Path) -> Result<(), CliError> {
    let input_abs = fs::canonicalize(input)
        .with_context(|| format!("Failed to resolve input path: {}", input.display()))?;
    let parent = match report_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    // A directory that does not exist yet cannot hold the input.
    if !parent.exists() {
        return Ok(());
    }
    let report_dir = fs::canonicalize(parent)
        .with_context(|| format!("Failed to resolve output path: {}", report_path.display()))?;
    let file_name = report_path
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Invalid report path"))?;
    if report_dir.join(file_name) == input_abs {
        return Err(CliError::new(
            format!(
                "report path must differ from input: {}",
                report_path.display()
            ),
            Some("choose a different output path".to_string()),
        ));
    }
    Ok(())
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("use a .hex or .txt file with one payload per line".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("use a .hex or .txt file with one payload per line".to_string()),
        ));
    }
    let ext = input
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    if ext != "hex" && ext != "txt" {
        return Err(CliError::new(
            format!("unsupported input format '{}'", input.display()),
            Some("expected a .hex or .txt file".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern; expected .hex or .txt".to_string()),
        ));
    }
    if matches.len() > 1 {
        let listed = matches
            .iter()
            .take(3)
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let more = if matches.len() > 3 { ", ..." } else { "" };
        return Err(CliError::new(
            format!(
                "multiple files match pattern '{}' ({} matches); matches: {}{}",
                pattern,
                matches.len(),
                listed,
                more
            ),
            Some("pass a single payload file, or run once per file".to_string()),
        ));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
