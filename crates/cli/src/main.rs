//! RISC-V assembly generator and validator CLI.
//!
//! This binary is the command-line front end of `rvforge-core`. It provides:
//! 1. **generate:** Random, constraint-respecting instructions for mnemonics, a format, or the
//!    whole catalog.
//! 2. **validate:** Line-by-line checking of an assembly file or stdin, with a text or JSON
//!    report and a pass/fail exit code.
//! 3. **list / catalog export:** Inspection of the active instruction catalog.

use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, ArgGroup, Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use rvforge_core::config::{Config, Radix};
use rvforge_core::generator::{GenerationRequest, RenderOptions, Renderer};
use rvforge_core::validator::ValidationReport;
use rvforge_core::{Catalog, Generator, InstructionFormat, Validator};

#[derive(Parser, Debug)]
#[command(
    name = "rvforge",
    author,
    version,
    about = "RISC-V instruction generator and assembly validator",
    long_about = "Generate random, encodable RV32/RV64 integer instructions and validate assembly \
                  text against the same format constraints.\n\nExamples:\n  \
                  rvforge generate add sub --count 2\n  \
                  rvforge generate --format B --count 4 --seed 7\n  \
                  rvforge validate program.s --verbose\n  \
                  rvforge list --by-format"
)]
struct Cli {
    /// Opcode table JSON to use instead of the builtin catalog.
    #[arg(long, global = true, value_name = "PATH")]
    catalog: Option<PathBuf>,

    /// JSON configuration file.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log more (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short = 'v', long = "verbosity", action = ArgAction::Count, global = true)]
    verbosity: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate random instructions.
    Generate(GenerateArgs),

    /// Validate an assembly file or stdin.
    Validate(ValidateArgs),

    /// List catalog instructions.
    List {
        /// Group instructions under their format.
        #[arg(long)]
        by_format: bool,
    },

    /// Catalog administration.
    Catalog {
        #[command(subcommand)]
        action: CatalogCommand,
    },
}

#[derive(Subcommand, Debug)]
enum CatalogCommand {
    /// Write the active catalog as an opcode-table JSON.
    Export {
        /// Destination file (stdout if omitted).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(clap::Args, Debug)]
struct GenerateArgs {
    /// Mnemonics to generate (e.g. `add sub lw`).
    #[arg(conflicts_with_all = ["format", "all"])]
    mnemonics: Vec<String>,

    /// Generate every instruction of one format (R, I, S, B, U, J).
    #[arg(short, long, conflicts_with = "all")]
    format: Option<InstructionFormat>,

    /// Generate every catalog instruction.
    #[arg(short, long)]
    all: bool,

    /// Instances per instruction.
    #[arg(short = 'n', long)]
    count: Option<usize>,

    /// RNG seed for reproducible output.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Write immediates in hexadecimal.
    #[arg(long)]
    hex: bool,

    /// Write registers by ABI name.
    #[arg(long)]
    abi_names: bool,

    /// Omit the trailing `# rd=..` comments.
    #[arg(long)]
    no_annotate: bool,

    /// Write stores as `rs2, rs1, imm` instead of `rs2, imm(rs1)`.
    #[arg(long)]
    flat_stores: bool,

    /// Start the listing with `.section .text` and `_start:`.
    #[arg(long)]
    prelude: bool,

    /// Emit the generated instructions as JSON instead of assembly.
    #[arg(long)]
    json: bool,

    /// Destination file (stdout if omitted).
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
#[command(group(ArgGroup::new("input").required(true).args(["file", "stdin"])))]
struct ValidateArgs {
    /// Assembly file to validate.
    file: Option<PathBuf>,

    /// Read the assembly from stdin.
    #[arg(long)]
    stdin: bool,

    /// List every instruction line with its verdict.
    #[arg(long)]
    verbose: bool,

    /// Print only VALID or INVALID.
    #[arg(short, long)]
    quiet: bool,

    /// Also write the report as JSON to this file.
    #[arg(long, value_name = "PATH")]
    json_output: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbosity);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Installs a stderr `fmt` subscriber; stdout stays reserved for listings and reports.
fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = match &cli.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::default(),
    };
    let catalog = match &cli.catalog {
        Some(path) => Catalog::from_json_file(path)?,
        None => Catalog::builtin(),
    };
    debug!(instructions = catalog.len(), "catalog ready");

    match cli.command {
        Commands::Generate(args) => cmd_generate(&catalog, &config, args),
        Commands::Validate(args) => cmd_validate(&catalog, &config, &args),
        Commands::List { by_format } => {
            write_output(None, &list_catalog(&catalog, by_format))?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Catalog {
            action: CatalogCommand::Export { output },
        } => {
            let json = serde_json::to_string_pretty(&catalog.to_json_value())?;
            write_output(output.as_deref(), &format!("{json}\n"))?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Generates instructions and writes the listing.
///
/// Command-line flags override the `generator` section of the config. Without a seed from
/// either source a fresh one is drawn and logged at info level.
fn cmd_generate(catalog: &Catalog, config: &Config, args: GenerateArgs) -> Result<ExitCode> {
    let mut settings = config.generator.clone();
    if let Some(count) = args.count {
        settings.count = count;
    }
    if args.hex {
        settings.radix = Radix::Hexadecimal;
    }
    settings.abi_names |= args.abi_names;
    settings.annotate &= !args.no_annotate;
    settings.memory_syntax &= !args.flat_stores;
    settings.prelude |= args.prelude;

    let request = if args.all {
        GenerationRequest::all(settings.count)
    } else if let Some(format) = args.format {
        GenerationRequest::format(format, settings.count)
    } else {
        GenerationRequest::mnemonics(args.mnemonics, settings.count)
    };

    let seed = args.seed.or(settings.seed).unwrap_or_else(rand::random);
    info!(seed, count = settings.count, "generating instructions");

    let generation = Generator::new(catalog)
        .generate_seeded(&request, seed)
        .context("generation request failed")?;

    let text = if args.json {
        format!("{}\n", serde_json::to_string_pretty(&generation)?)
    } else {
        Renderer::new(RenderOptions::from(&settings)).listing(&generation)
    };
    write_output(args.output.as_deref(), &text)?;
    Ok(ExitCode::SUCCESS)
}

/// Validates a file or stdin and prints the report.
///
/// # Returns
///
/// `SUCCESS` when no line carries an error, `FAILURE` otherwise.
fn cmd_validate(catalog: &Catalog, config: &Config, args: &ValidateArgs) -> Result<ExitCode> {
    let validator = Validator::with_config(catalog, config.validator);

    let report = match &args.file {
        Some(path) if !args.stdin => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            validator
                .validate_reader(BufReader::new(file))
                .with_context(|| format!("failed to read {}", path.display()))?
                .with_source(path.display().to_string())
        }
        _ => validator
            .validate_reader(io::stdin().lock())
            .context("failed to read stdin")?
            .with_source("<stdin>"),
    };

    if let Some(path) = &args.json_output {
        write_json_report(path, &report)?;
    }

    if args.quiet {
        write_output(None, if report.is_valid() { "VALID\n" } else { "INVALID\n" })?;
    } else {
        write_output(None, &report.render_text(args.verbose))?;
    }

    Ok(if report.is_valid() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn write_json_report(path: &Path, report: &ValidationReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, format!("{json}\n"))
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "wrote JSON report");
    Ok(())
}

/// One line per instruction, or one block per format with `by_format`.
fn list_catalog(catalog: &Catalog, by_format: bool) -> String {
    let mut out = String::new();
    if by_format {
        for format in InstructionFormat::ALL {
            let specs = catalog.list(Some(format));
            if specs.is_empty() {
                continue;
            }
            let names: Vec<&str> = specs.iter().map(|s| s.mnemonic.as_str()).collect();
            let _ = writeln!(out, "{} ({}):", format.name(), specs.len());
            let _ = writeln!(out, "  {}", names.join(" "));
        }
    } else {
        for spec in catalog.iter() {
            let _ = writeln!(
                out,
                "{:<8} {:<7} {}",
                spec.mnemonic,
                spec.format.name(),
                spec.extension
            );
        }
    }
    out
}

/// Writes `text` to `path`, or to stdout when `path` is `None`.
fn write_output(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "wrote output");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
