mod summary;

use anyhow::{Context as _, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use reaclib_forge::{
    Context, HeaderBanner, Options, ReactionRegistry, SpeciesCatalog, energy_report, ingest_with,
    parse_partition_table, render_header, write_partition_records, write_reactions, write_table,
};
use std::fs::File;
use std::io::{self, BufWriter, IsTerminal, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "reaclib-forge", author, version, about = "REACLIB ingestion and record generation")]
struct Cli {
    /// Log every skipped or culled entry and each parsed reaction.
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Disable ANSI color in the run summary.
    #[arg(long, global = true)]
    no_color: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a REACLIB file into binary records, a registration header or CSV.
    Reactions(ReactionsArgs),
    /// Pack a Rauscher–Thielemann partition-function table into binary records.
    Partition(PartitionArgs),
}

#[derive(Args, Debug)]
struct ReactionsArgs {
    /// REACLIB v2 data file.
    input: PathBuf,
    /// Output path. Binary and CSV default to `reactions.bin`/`reactions.csv`; the header defaults to stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value_t = Format::Bin)]
    format: Format,
    /// Drop reactions whose rate at `--t9` is below this value (0 disables culling).
    #[arg(short, long, default_value_t = 0.0)]
    culling: f64,
    /// Temperature in GK the culling threshold is evaluated at.
    #[arg(short = 'T', long = "t9", default_value_t = 0.01)]
    t9: f64,
    /// Extra `name Z A mass` species table overlaid on the built-in catalog.
    #[arg(long)]
    species: Option<PathBuf>,
    /// Also write a `;`-separated peak-importance report to this path.
    #[arg(long)]
    energy_report: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct PartitionArgs {
    /// Rauscher–Thielemann partition-function text table.
    input: PathBuf,
    #[arg(short, long, default_value = "partition.bin")]
    output: PathBuf,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Bin,
    Header,
    Csv,
}

impl Format {
    fn default_output(self) -> Option<PathBuf> {
        match self {
            Format::Bin => Some(PathBuf::from("reactions.bin")),
            Format::Csv => Some(PathBuf::from("reactions.csv")),
            Format::Header => None,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.parse()?))
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let color = !cli.no_color && io::stderr().is_terminal();
    match cli.command {
        Command::Reactions(args) => run_reactions(args, cli.verbose, color),
        Command::Partition(args) => run_partition(args, color),
    }
}

fn run_reactions(args: ReactionsArgs, verbose: bool, color: bool) -> Result<()> {
    let content =
        std::fs::read_to_string(&args.input).with_context(|| format!("reading {}", args.input.display()))?;

    let catalog = match &args.species {
        Some(path) => {
            let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            SpeciesCatalog::builtin_with(&text).with_context(|| format!("parsing species table {}", path.display()))?
        }
        None => SpeciesCatalog::builtin(),
    };

    let context = Context::new(&catalog);
    let options = Options { culling: args.culling, reference_t9: args.t9, verbose };
    let result = ingest_with(&content, &context, &options)?;

    let output = args.output.clone().or_else(|| args.format.default_output());
    let mut writer = open_output(output.as_deref())?;
    match args.format {
        Format::Bin => {
            write_reactions(&mut writer, &result.reactions)?;
        }
        Format::Csv => write_table(&mut writer, &result.reactions)?,
        Format::Header => {
            let banner =
                HeaderBanner::new(args.input.display().to_string(), content.as_bytes(), args.culling, args.t9);
            let mut registry = ReactionRegistry::new();
            let text = render_header(&banner, &result.reactions, &mut registry)?;
            writer.write_all(text.as_bytes())?;
            writer.flush()?;
        }
    }

    if let Some(path) = &args.energy_report {
        let mut report = open_output(Some(path))?;
        energy_report(&mut report, &result.reactions, &catalog)?;
    }

    summary::print_ingest(&args.input, &result.stats, &result.reactions, output.as_deref(), color);
    Ok(())
}

fn run_partition(args: PartitionArgs, color: bool) -> Result<()> {
    let content =
        std::fs::read_to_string(&args.input).with_context(|| format!("reading {}", args.input.display()))?;
    let (records, skipped) = parse_partition_table(&content);

    let mut writer = open_output(Some(&args.output))?;
    let written = write_partition_records(&mut writer, &records)?;

    summary::print_partition(&args.input, written, skipped, &args.output, color);
    Ok(())
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    })
}
