use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use knitkit::output::{render_lines, render_pattern, render_rows};
use knitkit::{
    init_logging, Config, Gauge, Garment, OutputFormat, Panel, PlanContext, BUILD_DATE, VERSION,
};
use knitkit_core::check_size_modifier;
use serde_json::Value;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(
    name = "knitkit",
    version,
    about = "Compile knitting panel shapes into row-by-row instructions"
)]
struct Cli {
    /// Config file (.toml or .json); defaults to the platform config dir.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the instructions for a single panel document.
    Generate(PanelArgs),
    /// Print the per-row stitch counts for a single panel document.
    Rows(PanelArgs),
    /// Print a whole garment pattern at one size.
    Garment(GarmentArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Args, Debug)]
struct GenerationOpts {
    /// Stitches per four inches.
    #[arg(long)]
    stitches: Option<f64>,

    /// Rows per four inches.
    #[arg(long)]
    rows: Option<f64>,

    /// Size multiplier applied to every dimension.
    #[arg(long)]
    size: Option<f64>,

    /// Output format.
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Number the instruction lines.
    #[arg(long, default_value_t = false)]
    numbered: bool,
}

#[derive(Args, Debug)]
struct PanelArgs {
    /// Panel JSON: `{ "shapes": ..., "gauge": ..., "sizeModifier": ... }` or a bare shape.
    input: PathBuf,

    #[command(flatten)]
    opts: GenerationOpts,
}

#[derive(Args, Debug)]
struct GarmentArgs {
    /// Garment JSON with named sizes and panels.
    input: PathBuf,

    /// Size label from the garment's size table.
    #[arg(long, conflicts_with = "size")]
    size_label: Option<String>,

    #[command(flatten)]
    opts: GenerationOpts,
}

/// Settings after merging flags over config over built-in defaults
struct Effective {
    format: OutputFormat,
    numbered: bool,
}

impl Effective {
    fn new(opts: &GenerationOpts, config: &Config) -> Self {
        Self {
            format: opts.format.map_or(config.output.format, Into::into),
            numbered: opts.numbered || config.output.numbered,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load_or_default(cli.config.as_deref()).context("load config")?;

    let level = match cli.verbose {
        0 => config.logging.level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    init_logging(level, config.logging.json)?;
    debug!(version = VERSION, build_date = BUILD_DATE, "knitkit starting");

    match cli.cmd {
        Command::Generate(args) => cmd_generate(args, &config),
        Command::Rows(args) => cmd_rows(args, &config),
        Command::Garment(args) => cmd_garment(args, &config),
    }
}

fn read_json(path: &Path) -> anyhow::Result<Value> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("read '{}'", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse JSON '{}'", path.display()))
}

/// Flags win, then the value found in the document, then the config file
fn resolve_gauge(
    opts: &GenerationOpts,
    document: Option<Gauge>,
    config: &Config,
) -> anyhow::Result<Gauge> {
    let base = document.unwrap_or_else(|| config.gauge.to_gauge());
    let gauge = Gauge::try_new(
        opts.stitches.unwrap_or(base.stitches_per_four_inches()),
        opts.rows.unwrap_or(base.rows_per_four_inches()),
    )?;
    Ok(gauge)
}

fn load_panel(args: &PanelArgs, config: &Config) -> anyhow::Result<Panel> {
    let value = read_json(&args.input)?;
    let panel = Panel::from_value(&value)
        .with_context(|| format!("load panel '{}'", args.input.display()))?;

    let document = value.get("shapes").is_some();
    let has_gauge = document && value.get("gauge").is_some_and(|g| !g.is_null());
    let has_size = document && value.get("sizeModifier").is_some_and(|s| !s.is_null());

    let gauge = resolve_gauge(&args.opts, has_gauge.then(|| panel.gauge()), config)?;
    let size = match args.opts.size {
        Some(size) => size,
        None if has_size => panel.size_modifier(),
        None => config.generation.size_modifier,
    };
    let size = check_size_modifier(size)?;
    let panel = panel.with_gauge(gauge).with_size_modifier(size);

    if let Some(shape) = panel.shape() {
        shape
            .validate()
            .and_then(|()| shape.check_stitch_counts(&panel.context()))
            .with_context(|| format!("invalid shape in '{}'", args.input.display()))?;
    }

    info!(input = %args.input.display(), %gauge, size, "loaded panel");
    Ok(panel)
}

fn write_stdout(text: &str) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(text.as_bytes()).context("write output")?;
    if !text.is_empty() && !text.ends_with('\n') {
        stdout.write_all(b"\n").context("write output")?;
    }
    stdout.flush().context("write output")
}

fn cmd_generate(args: PanelArgs, config: &Config) -> anyhow::Result<()> {
    let panel = load_panel(&args, config)?;
    let effective = Effective::new(&args.opts, config);
    let instructions = panel.instructions();

    let text = match effective.format {
        OutputFormat::Text => render_lines(&instructions, effective.numbered),
        OutputFormat::Json => serde_json::to_string_pretty(&instructions)?,
    };
    write_stdout(&text)
}

fn cmd_rows(args: PanelArgs, config: &Config) -> anyhow::Result<()> {
    let panel = load_panel(&args, config)?;
    let effective = Effective::new(&args.opts, config);
    let plans = panel.stitch_plans();

    let text = match effective.format {
        OutputFormat::Text => render_rows(&plans),
        OutputFormat::Json => serde_json::to_string_pretty(&plans)?,
    };
    write_stdout(&text)
}

fn cmd_garment(args: GarmentArgs, config: &Config) -> anyhow::Result<()> {
    let garment = Garment::from_path(&args.input)
        .with_context(|| format!("load garment '{}'", args.input.display()))?;
    let gauge = resolve_gauge(&args.opts, None, config)?;
    let label = args
        .size_label
        .as_deref()
        .or(config.generation.size_label.as_deref());
    let size = match (args.opts.size, label) {
        (Some(size), _) => size,
        (None, Some(label)) => garment.size(label)?,
        (None, None) => garment
            .sizes
            .first()
            .map_or(config.generation.size_modifier, |(_, size)| *size),
    };
    let size = check_size_modifier(size)?;

    let ctx = PlanContext::new(gauge, size);
    for (name, shape) in &garment.shapes {
        shape
            .validate()
            .and_then(|()| shape.check_stitch_counts(&ctx))
            .with_context(|| format!("invalid shape in panel '{}'", name))?;
    }

    info!(garment = %garment.permalink, %gauge, size, "generating garment");
    let pattern = garment.generate_pattern(gauge, size);
    let effective = Effective::new(&args.opts, config);

    let text = match effective.format {
        OutputFormat::Text => render_pattern(&pattern, effective.numbered),
        OutputFormat::Json => serde_json::to_string_pretty(&pattern)?,
    };
    write_stdout(&text)
}
