use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use glob::glob;
use phoenix_beacon_core::{BeaconReport, DecodeError, FieldSpec, Schema};
use serde::Serialize;
use tracing::Level;

const ACCEPTED_EXTENSIONS: [&str; 2] = ["bin", "txt"];

#[derive(Parser, Debug)]
#[command(name = "phoenix-beacon")]
#[command(version)]
#[command(
    about = "Decode PHOENIX mode UHF beacon dumps (EPS telemetry).",
    long_about = None,
    after_help = "Examples:\n  phoenix-beacon decode beacon.bin\n  phoenix-beacon decode beacon.txt --format json --pretty\n  phoenix-beacon decode beacon.bin --format json -o report.json"
)]
struct Cli {
    /// Log decoder activity to stderr
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode a raw beacon dump (.bin or .txt, read as binary).
    Decode {
        /// Path to a .bin or .txt beacon dump
        input: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Write output to a file instead of stdout
        #[arg(short = 'o', long)]
        report: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long, conflicts_with = "compact")]
        pretty: bool,

        /// Compact JSON output (default for JSON)
        #[arg(long)]
        compact: bool,

        /// Include the frame hex dump
        #[arg(long)]
        show_frame: bool,

        /// Suppress non-error output
        #[arg(long)]
        quiet: bool,
    },
    /// List the beacon field table (offsets, decode kind, unit).
    Fields {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

struct DecodeOptions {
    format: OutputFormat,
    report: Option<PathBuf>,
    pretty: bool,
    compact: bool,
    show_frame: bool,
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Decode {
            input,
            format,
            report,
            pretty,
            compact,
            show_frame,
            quiet,
        } => cmd_decode(
            input,
            DecodeOptions {
                format,
                report,
                pretty,
                compact,
                show_frame,
                quiet,
            },
        ),
        Commands::Fields { format } => cmd_fields(format),
    };

    match result {
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

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
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

fn cmd_decode(input: PathBuf, opts: DecodeOptions) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&input)?;
    validate_input_file(&resolved_input)?;
    if opts.format == OutputFormat::Text && (opts.pretty || opts.compact) {
        return Err(CliError::new(
            "--pretty and --compact only apply to JSON output",
            Some("add --format json".to_string()),
        ));
    }
    if let Some(report_path) = opts.report.as_ref() {
        ensure_distinct_output(&resolved_input, report_path)?;
    }

    let mut report =
        phoenix_beacon_core::decode_beacon_file(&resolved_input).map_err(decode_failure)?;
    if !opts.show_frame {
        report.frame = None;
    }

    let output = match opts.format {
        OutputFormat::Text => render_text(&report),
        OutputFormat::Json => serialize_report(&report, opts.pretty)?,
    };

    let Some(report_path) = opts.report else {
        print!("{}", output);
        return Ok(());
    };
    if let Some(parent) = report_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
    {
        fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create output directory: {}", parent.display())
        })?;
    }
    fs::write(&report_path, output)
        .with_context(|| format!("Failed to write report: {}", report_path.display()))?;
    if !opts.quiet {
        eprintln!("OK: report written -> {}", report_path.display());
    }
    Ok(())
}

fn decode_failure(err: DecodeError) -> CliError {
    let hint = match &err {
        DecodeError::Frame(_) => {
            Some("expected a raw PHOENIX frame of at least 76 bytes".to_string())
        }
        DecodeError::Source(_) | DecodeError::Io(_) => {
            Some("check that the file exists and is readable".to_string())
        }
        DecodeError::NoFrame => None,
    };
    CliError::new(format!("beacon decoding failed: {}", err), hint)
}

fn render_text(report: &BeaconReport) -> String {
    let mut out = String::new();
    if let Some(frame) = report.frame.as_ref() {
        out.push_str(&format!("Frame ({} bytes): {}\n", frame.length, frame.hex));
        if let (Some(header), Some(size)) = (frame.header, frame.size) {
            out.push_str(&format!(
                "Header: {:#04x}  Size: {:#04x} ({})\n",
                header, size, size
            ));
        }
        out.push('\n');
    }
    out.push_str(&report.telemetry.to_string());
    out
}

fn serialize_report(report: &BeaconReport, pretty: bool) -> Result<String, CliError> {
    let json = if pretty {
        serde_json::to_string_pretty(report)
    } else {
        serde_json::to_string(report)
    };
    json.context("JSON serialization failed").map_err(Into::into)
}

#[derive(Debug, Serialize)]
struct FieldRow {
    name: &'static str,
    label: &'static str,
    offsets: String,
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    unit: Option<&'static str>,
}

impl From<&FieldSpec> for FieldRow {
    fn from(spec: &FieldSpec) -> Self {
        Self {
            name: spec.name,
            label: spec.label,
            offsets: spec.kind.location().to_string(),
            kind: spec.kind.name(),
            unit: spec.unit.map(|unit| unit.symbol()),
        }
    }
}

fn cmd_fields(format: OutputFormat) -> Result<(), CliError> {
    let rows: Vec<FieldRow> = Schema::phoenix().fields.iter().map(FieldRow::from).collect();
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&rows).context("JSON serialization failed")?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            for row in rows {
                println!(
                    "{:<32} {:<16} {:<14} {}",
                    row.label,
                    row.offsets,
                    row.kind,
                    row.unit.unwrap_or("-")
                );
            }
        }
    }
    Ok(())
}

fn ensure_distinct_output(input: &Path, report_path: &Path) -> Result<(), CliError> {
    let input_abs = fs::canonicalize(input)
        .with_context(|| format!("Failed to resolve input path: {}", input.display()))?;
    let report_dir = match report_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::canonicalize(parent).ok(),
        _ => fs::canonicalize(".").ok(),
    };
    let (Some(report_dir), Some(file_name)) = (report_dir, report_path.file_name()) else {
        return Ok(());
    };
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
            Some("use a .bin or .txt beacon dump".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("use a .bin or .txt beacon dump".to_string()),
        ));
    }
    let ext = input
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    if !ACCEPTED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(CliError::new(
            format!("unsupported input format '{}'", input.display()),
            Some("expected a .bin or .txt file".to_string()),
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
            Some("check the path or quote the pattern; expected .bin or .txt".to_string()),
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
            Some("pass a single beacon dump, or run once per file".to_string()),
        ));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
