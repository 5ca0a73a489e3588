mod audit;
mod report;
mod store;
mod util;

use anyhow::{Context, Result};
use clap::Parser;
use draft_lottery::{ConfigSource, DraftConfig, LotteryEngine, validate_initial_order};
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;

use store::{FileConfigSource, JsonPickStore};
use util::{parse_order, resolve_seed};

#[derive(Debug, Parser)]
#[command(name = "draft-lottery", version)]
#[command(about = "Constrained draft-order lottery with weighted per-position odds")]
struct Args {
    /// League configuration as JSON (defaults to the built-in 10-team league)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Initial order as comma-separated original positions (defaults to 1..N)
    #[arg(long)]
    order: Option<String>,

    /// Seed for the draw: decimal, 0x hex, or "random"
    #[arg(long, default_value = "random")]
    seed: String,

    /// Override the configured number of rounds
    #[arg(long)]
    rounds: Option<u32>,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console", "csv"])]
    report: String,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Save the resulting pick list as JSON
    #[arg(long)]
    save: Option<PathBuf>,

    /// Run this many consecutive seeded draws and report movement statistics
    #[arg(long)]
    audit: Option<usize>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    show_config: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let source = build_source(&args)?;
    let config = source
        .load_config()
        .context("failed to load draft configuration")?;
    if maybe_show_config(&args, &config)? {
        return Ok(());
    }
    let order = resolve_order(&source, &config)?;

    let seed = resolve_seed(&args.seed)?;
    if args.report != "console" {
        eprintln!("🎲 seed {seed}");
    }

    if let Some(iterations) = args.audit {
        let summary = audit::run_audit(&config, &order, seed, iterations)?;
        return write_audit_report(&args, &summary);
    }

    let engine = LotteryEngine::new(source, JsonPickStore::new(args.save.clone()));
    let draw = engine.run_draw(seed)?;
    for round in draw.fallback_rounds() {
        eprintln!("⚠️  round {round} kept the original order after exhausting its attempts");
    }
    write_draw_report(&args, &config, &draw)
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn build_source(args: &Args) -> Result<FileConfigSource> {
    let order = args.order.as_deref().map(parse_order).transpose()?;
    Ok(FileConfigSource {
        path: args.config.clone(),
        rounds: args.rounds,
        order,
    })
}

fn resolve_order(source: &FileConfigSource, config: &DraftConfig) -> Result<Vec<u32>> {
    let Some(order) = source.load_initial_order()? else {
        return Ok(config.identity_order());
    };
    validate_initial_order(&order, config.team_count).context("invalid initial order")?;
    Ok(order)
}

fn maybe_show_config(args: &Args, config: &DraftConfig) -> Result<bool> {
    if !args.show_config {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    serde_json::to_writer_pretty(output_target.writer(), config)?;
    writeln!(output_target.writer())?;
    output_target.flush_inner()?;
    Ok(true)
}

fn write_draw_report(
    args: &Args,
    config: &DraftConfig,
    draw: &draft_lottery::LotteryDraw,
) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;
    match args.report.as_str() {
        "json" => report::generate_json_report(output_target.writer(), draw)?,
        "markdown" => report::generate_markdown_report(output_target.writer(), draw)?,
        "csv" => report::generate_csv_report(output_target.writer(), draw)?,
        _ => report::generate_console_report(output_target.writer(), config, draw)?,
    }
    output_target.flush_inner()?;
    Ok(())
}

fn write_audit_report(args: &Args, summary: &audit::AuditSummary) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;
    match args.report.as_str() {
        "json" => audit::generate_json_report(output_target.writer(), summary)?,
        "markdown" => audit::generate_markdown_report(output_target.writer(), summary)?,
        "csv" => audit::generate_csv_report(output_target.writer(), summary)?,
        _ => audit::generate_console_report(output_target.writer(), summary)?,
    }
    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}
