use anyhow::{bail, Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use sonus_span_engine::{EngineConfig, SpanEngine};
use std::io;
use std::path::{Path, PathBuf};

pub mod batch;
mod report;

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "sonus")]
#[command(about = "Consolidate predicted sound annotations in drama markup", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Consolidate sound spans in a document or a directory of documents
    Process(ProcessArgs),

    /// Print the effective engine configuration as TOML
    Config(ConfigArgs),
}

#[derive(Args)]
struct ProcessArgs {
    /// An .xml document or a directory containing them
    input: PathBuf,

    /// Output directory (defaults to `postprocessed` next to the input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Engine configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Descend into subdirectories
    #[arg(short, long)]
    recursive: bool,

    /// Consolidate and report without writing any file
    #[arg(long)]
    dry_run: bool,

    /// Output JSON summary
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ConfigArgs {
    /// Engine configuration file (TOML) to load instead of the defaults
    #[arg(short, long)]
    config: Option<PathBuf>,
}

pub fn main_entry() -> Result<()> {
    let mut cli = Cli::parse();

    // Keep stdout clean for JSON consumers.
    if matches!(&cli.command, Commands::Process(args) if args.json) {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    match cli.command {
        Commands::Process(args) => run_process(args)?,
        Commands::Config(args) => run_config(args)?,
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::from_path(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

fn run_process(args: ProcessArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let engine = SpanEngine::new(config).context("Invalid engine configuration")?;

    let output_dir = args
        .output
        .clone()
        .unwrap_or_else(|| batch::default_output_dir(&args.input));
    let documents = batch::discover_documents(&args.input, args.recursive, &output_dir)?;
    if documents.is_empty() {
        log::warn!("No .xml documents found in {}", args.input.display());
    }

    if !args.dry_run {
        std::fs::create_dir_all(&output_dir)
            .with_context(|| format!("Failed to create output dir {}", output_dir.display()))?;
    }

    let options = batch::BatchOptions {
        input_root: batch::input_root(&args.input),
        output_dir,
        dry_run: args.dry_run,
    };
    let summary = batch::process_batch(&engine, &documents, &options);

    if args.json {
        print_stdout(&serde_json::to_string_pretty(&summary)?)?;
    } else {
        print_stdout(&report::render_summary(&summary))?;
    }

    if !summary.failed.is_empty() {
        bail!(
            "{} of {} document(s) failed",
            summary.failed.len(),
            summary.documents()
        );
    }
    Ok(())
}

fn run_config(args: ConfigArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let rendered = config
        .to_toml_string()
        .context("Failed to render configuration")?;
    print_stdout(rendered.trim_end())
}
