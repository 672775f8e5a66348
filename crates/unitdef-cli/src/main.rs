//! Command-line tool for JP1/AJS unit definition files.
//!
//! Every command takes a file path, or `-` for stdin.
//!
//!   unitdef fmt jobs.txt --in-place     - normalize a file
//!   unitdef check jobs.txt              - syntax check only
//!   unitdef tree jobs.txt               - list units with their type codes
//!   unitdef get jobs.txt /NET/JOB sc    - print a parameter's values

use std::io::{self, Read};
use std::str::FromStr;

use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use unitdef_format::{FormatOptions, Indent, TrailingAttributes, format_units, write_value};
use unitdef_params::DecodeError;
use unitdef_tree::{BuildError, FullQualifiedName, Unit};

// ============================================================================
// Exit codes
// ============================================================================

const EXIT_SUCCESS: i32 = 0;
const EXIT_SYNTAX_ERROR: i32 = 1;
const EXIT_DECODE_ERROR: i32 = 2;
const EXIT_IO_ERROR: i32 = 3;

// ============================================================================
// CLI argument structures
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "unitdef",
    version,
    about = "Parse, check and format JP1/AJS unit definition files"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Format a unit definition file.
    Fmt {
        /// Input file, or "-" for stdin.
        input: String,
        /// Write the result to this file ("-" for stdout).
        #[arg(short, long, conflicts_with = "in_place")]
        output: Option<String>,
        /// Rewrite the input file.
        #[arg(long)]
        in_place: bool,
        /// One unit per line, no indentation.
        #[arg(long)]
        compact: bool,
        /// Indent with this many spaces instead of a tab.
        #[arg(long, value_name = "SPACES")]
        indent: Option<u8>,
        /// Drop empty trailing header fields (`unit=A,,,;` becomes `unit=A;`).
        #[arg(long)]
        elide_attributes: bool,
        /// End lines with CRLF.
        #[arg(long)]
        crlf: bool,
    },

    /// Check that a file parses.
    Check {
        /// Input file, or "-" for stdin.
        input: String,
    },

    /// List every unit with its type code.
    Tree {
        /// Input file, or "-" for stdin.
        input: String,
    },

    /// Print the values of a unit's parameter.
    Get {
        /// Input file, or "-" for stdin.
        input: String,
        /// Full qualified name of the unit, e.g. /NET/JOB.
        fqn: String,
        /// Parameter name.
        param: String,
        /// Print the decoded value instead of the raw text.
        #[arg(long)]
        decode: bool,
    },
}

// ============================================================================
// Main entry point
// ============================================================================

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.cmd {
        Cmd::Fmt {
            input,
            output,
            in_place,
            compact,
            indent,
            elide_attributes,
            crlf,
        } => {
            let options = format_options(compact, indent, elide_attributes, crlf);
            run_fmt(&input, output.as_deref(), in_place, &options)
        }
        Cmd::Check { input } => run_check(&input),
        Cmd::Tree { input } => run_tree(&input),
        Cmd::Get {
            input,
            fqn,
            param,
            decode,
        } => run_get(&input, &fqn, &param, decode),
    };

    match result {
        Ok(()) => std::process::exit(EXIT_SUCCESS),
        Err(e) => {
            match &e {
                CliError::ParseDiagnostic {
                    error,
                    source,
                    filename,
                } => {
                    if let Some(parse_error) = error.as_parse_error() {
                        parse_error.write_report(filename, source, io::stderr());
                    } else {
                        eprintln!("error: {e}");
                    }
                }
                _ => {
                    eprintln!("error: {e}");
                }
            }
            std::process::exit(e.exit_code());
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn format_options(
    compact: bool,
    indent: Option<u8>,
    elide_attributes: bool,
    crlf: bool,
) -> FormatOptions {
    let mut options = if compact {
        FormatOptions::compact()
    } else {
        FormatOptions::default()
    };
    if let Some(width) = indent {
        options = options.indent(Indent::Spaces(width));
    }
    if elide_attributes {
        options = options.trailing_attributes(TrailingAttributes::Elide);
    }
    if crlf {
        options = options.crlf();
    }
    options
}

// ============================================================================
// Error handling
// ============================================================================

#[derive(Debug)]
enum CliError {
    Io(io::Error),
    ParseDiagnostic {
        error: BuildError,
        source: String,
        filename: String,
    },
    Decode(DecodeError),
    NotFound(String),
    Usage(String),
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            CliError::Io(_) => EXIT_IO_ERROR,
            CliError::ParseDiagnostic { .. } => EXIT_SYNTAX_ERROR,
            CliError::Decode(_) => EXIT_DECODE_ERROR,
            CliError::NotFound(_) => EXIT_SYNTAX_ERROR,
            CliError::Usage(_) => EXIT_SYNTAX_ERROR,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "{e}"),
            CliError::ParseDiagnostic {
                error, filename, ..
            } => write!(f, "{filename}: {error}"),
            CliError::Decode(e) => write!(f, "{e}"),
            CliError::NotFound(e) => write!(f, "{e}"),
            CliError::Usage(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<DecodeError> for CliError {
    fn from(e: DecodeError) -> Self {
        CliError::Decode(e)
    }
}

// ============================================================================
// Subcommand implementations
// ============================================================================

fn run_fmt(
    input: &str,
    output: Option<&str>,
    in_place: bool,
    options: &FormatOptions,
) -> Result<(), CliError> {
    if in_place && input == "-" {
        return Err(CliError::Usage(
            "--in-place cannot be used with stdin".into(),
        ));
    }

    // Prevent -o pointing to the input file
    if let Some(output) = output
        && input != "-"
        && output != "-"
        && is_same_file(input, output)
    {
        return Err(CliError::Usage(
            "input and output are the same file\nhint: use --in-place to modify in place".into(),
        ));
    }

    let (source, units) = load(input)?;
    let formatted = format_units(&units, options);
    debug!(units = units.len(), bytes = formatted.len(), "formatted");

    if in_place {
        if formatted == source {
            info!(file = input, "already formatted");
            return Ok(());
        }
        std::fs::write(input, &formatted)?;
    } else {
        write_output(output.unwrap_or("-"), &formatted)?;
    }
    Ok(())
}

fn run_check(input: &str) -> Result<(), CliError> {
    let (_, units) = load(input)?;
    let count: usize = units.iter().map(|unit| unit.iter().count()).sum();
    info!(file = input, units = count, "ok");
    Ok(())
}

fn run_tree(input: &str) -> Result<(), CliError> {
    let (_, units) = load(input)?;
    print!("{}", tree_listing(&units));
    Ok(())
}

fn run_get(input: &str, fqn: &str, param: &str, decode: bool) -> Result<(), CliError> {
    let fqn = FullQualifiedName::from_str(fqn).map_err(|e| CliError::Usage(e.to_string()))?;
    let (_, units) = load(input)?;
    let unit = unitdef_tree::find(&units, &fqn)
        .ok_or_else(|| CliError::NotFound(format!("no unit named {fqn}")))?;
    print!("{}", parameter_listing(unit, param, decode)?);
    Ok(())
}

/// One line per unit: the full qualified name and the `ty` code.
fn tree_listing(units: &[Unit]) -> String {
    let mut out = String::new();
    for unit in units.iter().flat_map(Unit::iter) {
        let code = unit.unit_type_code().unwrap_or("-");
        out.push_str(&format!("{}\t{}\n", unit.fqn(), code));
    }
    out
}

/// One line per parameter named `param`, raw or decoded.
fn parameter_listing(unit: &Unit, param: &str, decode: bool) -> Result<String, CliError> {
    let mut out = String::new();
    let mut found = false;
    for parameter in unit.parameters_named(param) {
        found = true;
        if decode {
            let decoded = unitdef_params::decode(parameter)?;
            out.push_str(&format!("{decoded:?}\n"));
        } else {
            for (i, value) in parameter.values().iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(&mut out, value);
            }
            out.push('\n');
        }
    }
    if !found {
        return Err(CliError::NotFound(format!(
            "{} has no parameter `{param}`",
            unit.fqn()
        )));
    }
    Ok(out)
}

// ============================================================================
// Input / output
// ============================================================================

fn load(input: &str) -> Result<(String, Vec<Unit>), CliError> {
    let source = read_input(Some(input))?;
    let filename = if input == "-" {
        "<stdin>".to_string()
    } else {
        input.to_string()
    };
    match unitdef_tree::parse(&source) {
        Ok(units) => Ok((source, units)),
        Err(error) => Err(CliError::ParseDiagnostic {
            error,
            source,
            filename,
        }),
    }
}

fn read_input(file: Option<&str>) -> Result<String, io::Error> {
    match file {
        Some("-") | None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => std::fs::read_to_string(path),
    }
}

fn write_output(path: &str, content: &str) -> Result<(), io::Error> {
    if path == "-" {
        print!("{content}");
        Ok(())
    } else {
        std::fs::write(path, content)
    }
}

fn is_same_file(a: &str, b: &str) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
