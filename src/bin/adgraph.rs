use std::{
    fs::File,
    io::{BufReader, Write as _},
    path::{Path, PathBuf},
};

use adgraph::GraphView as _;
use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "adgraph", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the pipeline over a scenario JSON file and dump every stage snapshot.
    Run(RunArgs),
    /// Run one of the built-in scenes.
    Scenario(ScenarioArgs),
    /// Interpolate between two stage snapshots.
    Tween(TweenArgs),
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Input scenario JSON (`records` plus optional `pipeline`).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output JSON path. Defaults to stdout.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Attribute kind to link records on (overrides the scenario).
    #[arg(long)]
    kind: Option<String>,

    /// Star radius (overrides the scenario).
    #[arg(long)]
    radius: Option<f64>,
}

#[derive(Parser, Debug)]
struct ScenarioArgs {
    #[arg(value_enum)]
    name: ScenarioChoice,

    /// Scenario config JSON. Flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the false links (giant-component only).
    #[arg(long)]
    seed: Option<u64>,

    /// Number of clusters (giant-component only).
    #[arg(long)]
    clusters: Option<usize>,

    /// Number of false links (giant-component only).
    #[arg(long)]
    false_links: Option<usize>,

    /// Output JSON path. Defaults to stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct TweenArgs {
    /// Snapshots JSON written by `run` or `scenario`.
    #[arg(long = "in")]
    in_path: PathBuf,

    #[arg(long, value_enum, default_value_t = StageChoice::Match)]
    from: StageChoice,

    #[arg(long, value_enum, default_value_t = StageChoice::Merge)]
    to: StageChoice,

    /// Frames to emit, both endpoints included.
    #[arg(long, default_value_t = 30)]
    frames: usize,

    #[arg(long, value_enum, default_value_t = EaseChoice::InOutCubic)]
    ease: EaseChoice,

    /// Output JSON path. Defaults to stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum ScenarioChoice {
    AdLinkage,
    GiantComponent,
    StolenImage,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum StageChoice {
    Build,
    Layout,
    Match,
    Merge,
}

impl From<StageChoice> for adgraph::Stage {
    fn from(value: StageChoice) -> Self {
        match value {
            StageChoice::Build => Self::Build,
            StageChoice::Layout => Self::Layout,
            StageChoice::Match => Self::Match,
            StageChoice::Merge => Self::Merge,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum EaseChoice {
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
}

impl From<EaseChoice> for adgraph::Ease {
    fn from(value: EaseChoice) -> Self {
        match value {
            EaseChoice::Linear => Self::Linear,
            EaseChoice::InQuad => Self::InQuad,
            EaseChoice::OutQuad => Self::OutQuad,
            EaseChoice::InOutQuad => Self::InOutQuad,
            EaseChoice::InCubic => Self::InCubic,
            EaseChoice::OutCubic => Self::OutCubic,
            EaseChoice::InOutCubic => Self::InOutCubic,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Run(args) => cmd_run(args),
        Command::Scenario(args) => cmd_scenario(args),
        Command::Tween(args) => cmd_tween(args),
    }
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let mut scenario = adgraph::Scenario::from_path(&args.in_path)?;
    if let Some(kind) = &args.kind {
        scenario.pipeline.match_kind = kind
            .parse()
            .with_context(|| format!("parse --kind '{kind}'"))?;
    }
    if let Some(radius) = args.radius {
        scenario.pipeline.radius = radius;
    }

    let run = scenario
        .run()
        .with_context(|| format!("run scenario '{}'", args.in_path.display()))?;
    write_json(&run.snapshots, args.out.as_deref())?;
    print_summary(&run);
    Ok(())
}

fn cmd_scenario(args: ScenarioArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => adgraph::ScenarioConfig::from_path(path)?,
        None => match args.name {
            ScenarioChoice::AdLinkage => adgraph::ScenarioConfig::AdLinkage,
            ScenarioChoice::GiantComponent => {
                adgraph::ScenarioConfig::GiantComponent(adgraph::GiantComponentConfig::default())
            }
            ScenarioChoice::StolenImage => {
                adgraph::ScenarioConfig::StolenImage(adgraph::StolenImageConfig::default())
            }
        },
    };

    match (&mut config, args.name) {
        (adgraph::ScenarioConfig::GiantComponent(cfg), ScenarioChoice::GiantComponent) => {
            if let Some(seed) = args.seed {
                cfg.seed = seed;
            }
            if let Some(clusters) = args.clusters {
                cfg.clusters = clusters;
            }
            if let Some(false_links) = args.false_links {
                cfg.false_links = false_links;
            }
        }
        (adgraph::ScenarioConfig::AdLinkage, ScenarioChoice::AdLinkage)
        | (adgraph::ScenarioConfig::StolenImage(_), ScenarioChoice::StolenImage) => {
            if args.seed.is_some() || args.clusters.is_some() || args.false_links.is_some() {
                anyhow::bail!("--seed, --clusters and --false-links only apply to giant-component");
            }
        }
        (cfg, name) => {
            anyhow::bail!("config describes {cfg:?} but scenario {name:?} was requested");
        }
    }

    let scenario = config.build()?;
    let run = scenario
        .run()
        .with_context(|| format!("run scenario '{}'", scenario.name))?;
    write_json(&run.snapshots, args.out.as_deref())?;
    print_summary(&run);
    Ok(())
}

fn cmd_tween(args: TweenArgs) -> anyhow::Result<()> {
    let snapshots = read_snapshots_json(&args.in_path)?;
    let pick = |stage: adgraph::Stage| {
        snapshots
            .iter()
            .find(|s| s.stage == stage)
            .with_context(|| format!("no {stage:?} snapshot in '{}'", args.in_path.display()))
    };
    let from = pick(args.from.into())?;
    let to = pick(args.to.into())?;

    let frames = adgraph::tween_frames(from, to, args.frames, args.ease.into())?;
    write_json(&frames, args.out.as_deref())?;
    eprintln!("{} frames", frames.len());
    Ok(())
}

fn read_snapshots_json(path: &Path) -> anyhow::Result<Vec<adgraph::Snapshot>> {
    let f = File::open(path).with_context(|| format!("open snapshots '{}'", path.display()))?;
    let r = BufReader::new(f);
    let snapshots = serde_json::from_reader(r)
        .with_context(|| format!("parse snapshots json '{}'", path.display()))?;
    Ok(snapshots)
}

fn write_json<T: serde::Serialize + ?Sized>(value: &T, out: Option<&Path>) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialize snapshots")?;
    match out {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(path, json).with_context(|| format!("write '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").context("write stdout")?;
        }
    }
    Ok(())
}

fn print_summary(run: &adgraph::PipelineRun) {
    let components = run.components();
    eprintln!(
        "{} match groups, {} nodes after merge, {} components",
        run.matches.len(),
        run.merged.nodes().len(),
        components.len()
    );
    for (i, c) in components.iter().enumerate() {
        let titles: Vec<String> = c.titles.iter().map(ToString::to_string).collect();
        eprintln!("  component {i}: {} nodes, titles [{}]", c.nodes.len(), titles.join(", "));
    }
}
