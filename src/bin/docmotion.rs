use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use docmotion::{
    AnalysisResult, NarrationStep, PlanConfig, PresentationPlan, build_bounds_cache, build_plan,
    group_sections, sample,
};

#[derive(Parser, Debug)]
#[command(name = "docmotion", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a presentation plan from analysis and narration JSON.
    Plan(PlanArgs),
    /// Print the section map derived from an analysis result.
    Sections(SectionsArgs),
    /// Sample a plan's viewport state on a frame grid.
    Probe(ProbeArgs),
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Document-analysis result JSON.
    #[arg(long)]
    analysis: PathBuf,

    /// Narration script JSON (array of steps).
    #[arg(long)]
    narration: PathBuf,

    /// Optional planning config JSON; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output plan JSON path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct SectionsArgs {
    /// Document-analysis result JSON.
    #[arg(long)]
    analysis: PathBuf,

    /// Optional planning config JSON; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ProbeArgs {
    /// Plan JSON produced by `docmotion plan`.
    #[arg(long)]
    plan: PathBuf,

    /// Sampling interval in seconds.
    #[arg(long, default_value_t = 1.0)]
    every: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Plan(args) => cmd_plan(args),
        Command::Sections(args) => cmd_sections(args),
        Command::Probe(args) => cmd_probe(args),
    }
}

fn load_json<T: serde::de::DeserializeOwned>(path: &PathBuf) -> anyhow::Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<PlanConfig> {
    match path {
        Some(p) => load_json(p),
        None => Ok(PlanConfig::default()),
    }
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let analysis: AnalysisResult = load_json(&args.analysis)?;
    let steps: Vec<NarrationStep> = load_json(&args.narration)?;
    let config = load_config(args.config.as_ref())?;

    let plan = build_plan(&analysis, &steps, &config)?;
    std::fs::write(&args.out, serde_json::to_string_pretty(&plan)?)
        .with_context(|| format!("failed to write {}", args.out.display()))?;

    println!(
        "planned {} steps over {:.2}s ({} flagged for review)",
        plan.timeline.entries.len(),
        plan.timeline.total_secs,
        plan.review.len(),
    );
    Ok(())
}

fn cmd_sections(args: SectionsArgs) -> anyhow::Result<()> {
    let analysis: AnalysisResult = load_json(&args.analysis)?;
    let config = load_config(args.config.as_ref())?;
    config.validate()?;

    let page = analysis.primary_page()?.to_page_size()?;
    let elements = analysis.collect_elements();
    let bounds = build_bounds_cache(
        &elements,
        page,
        config.viewport,
        config.scale,
        config.page_origin,
    );
    let sections = group_sections(&elements, &bounds, &config.taxonomy, config.proximity_px);

    for section in sections.values() {
        match section.bounding_box {
            Some(b) => println!(
                "{:<12} {:>3} elements  {:>2} clusters  [{:.0},{:.0} {:.0}x{:.0}]",
                section.key,
                section.elements.len(),
                section.sub_sections.len(),
                b.x,
                b.y,
                b.width,
                b.height,
            ),
            None => println!("{:<12}   0 elements", section.key),
        }
    }
    Ok(())
}

fn cmd_probe(args: ProbeArgs) -> anyhow::Result<()> {
    let plan: PresentationPlan = load_json(&args.plan)?;
    plan.timeline.validate()?;

    let mut t = 0.0f64;
    while t <= plan.timeline.total_secs {
        let state = sample(&plan.timeline, t);
        println!(
            "t={:>7.2}s zoom={:.2} pan=({:.1}, {:.1}) opacity={:.2}",
            t, state.zoom, state.pan_x, state.pan_y, state.opacity,
        );
        t += args.every.max(1e-3);
    }
    Ok(())
}
