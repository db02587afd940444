use crate::cli::Cli;
use crate::domain::figure::{Figure, Overlays};
use crate::domain::models::{Delivery, RenderMode, RenderReport, RiskContext};
use crate::errors::{Result, RpgError};
use crate::services::assets::{load_background, search_dirs};
use crate::services::canvas::{FigureSink, PlottersCanvas};
use crate::services::figure::{build_donut, build_scatter, RenderProfile};
use crate::services::jitter::JitterPlacer;
use crate::services::loader::load_context;
use crate::services::output::{print_out, report_row};
use rand::Rng;
use std::path::{Path, PathBuf};

/// One invocation's worth of plotting work.
#[derive(Debug, Clone)]
pub struct PlotRequest {
    pub modes: Vec<RenderMode>,
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub overlays: Overlays,
    pub asset_dirs: Vec<PathBuf>,
}

impl PlotRequest {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let modes = cli.modes();
        if modes.is_empty() {
            return Err(RpgError::Config(
                "select at least one of --grid, --donut, --recommendations".to_string(),
            ));
        }
        Ok(Self {
            modes,
            input: cli.input_csv_file.clone(),
            output: cli.output_png_file.clone(),
            overlays: cli.overlays(),
            asset_dirs: search_dirs(cli.asset_dir.as_deref()),
        })
    }
}

pub fn handle_plot(cli: &Cli) -> anyhow::Result<()> {
    let request = PlotRequest::from_cli(cli)?;
    let mut placer = JitterPlacer::from_seed_option(cli.seed);
    let mut canvas = PlottersCanvas::from_env();
    let reports = run_plots(&request, &mut placer, &mut canvas)?;
    print_out(cli.json, &reports, report_row)?;
    Ok(())
}

struct Planned {
    figure: Figure,
    target: Option<PathBuf>,
    report: RenderReport,
}

/// Loads, builds every figure, then delivers them in order.
///
/// Nothing reaches `sink` until all input rows and background assets have
/// been validated, so a failure never leaves partial output behind.
pub fn run_plots<R: Rng>(
    request: &PlotRequest,
    placer: &mut JitterPlacer<R>,
    sink: &mut dyn FigureSink,
) -> Result<Vec<RenderReport>> {
    let contexts = load_contexts(request)?;

    let mut planned = Vec::with_capacity(request.modes.len());
    for &mode in &request.modes {
        let ctx = contexts
            .iter()
            .find(|c| c.schema == mode.schema())
            .ok_or_else(|| RpgError::Config(format!("no data loaded for {}", mode.name())))?;
        planned.push(plan_mode(request, mode, ctx, placer)?);
    }

    let mut reports = Vec::with_capacity(planned.len());
    for p in planned {
        match &p.target {
            Some(path) => sink.save(&p.figure, path)?,
            None => sink.display(&p.figure)?,
        }
        reports.push(p.report);
    }
    Ok(reports)
}

/// One context per schema the selected modes need, each loaded once.
fn load_contexts(request: &PlotRequest) -> Result<Vec<RiskContext>> {
    let mut contexts: Vec<RiskContext> = Vec::new();
    for mode in &request.modes {
        let schema = mode.schema();
        if !contexts.iter().any(|c| c.schema == schema) {
            contexts.push(load_context(&request.input, schema)?);
        }
    }
    Ok(contexts)
}

fn plan_mode<R: Rng>(
    request: &PlotRequest,
    mode: RenderMode,
    ctx: &RiskContext,
    placer: &mut JitterPlacer<R>,
) -> Result<Planned> {
    let target = request
        .output
        .as_deref()
        .map(|p| output_path_for(p, mode, request.modes.len() > 1));

    let (figure, counts, exposure_level) = match RenderProfile::for_mode(mode) {
        Some(profile) => {
            let background = load_background(profile.background, &request.asset_dirs)?;
            let fig = build_scatter(ctx, &profile, request.overlays, placer, background);
            (Figure::Scatter(fig), None, None)
        }
        None => {
            let counts = ctx.counts.unwrap_or_default();
            let fig = build_donut(&counts, request.overlays);
            tracing::info!(
                high = counts.high,
                medium = counts.medium,
                low = counts.low,
                exposure = %fig.exposure_level,
                "aggregated ratings"
            );
            let level = fig.exposure_level;
            (Figure::Donut(fig), Some(counts), Some(level))
        }
    };

    let report = RenderReport {
        mode,
        outcome: if target.is_some() {
            Delivery::Wrote
        } else {
            Delivery::Displayed
        },
        path: target.as_ref().map(|p| p.display().to_string()),
        observations: ctx.observations.len(),
        counts,
        exposure_level,
    };
    Ok(Planned {
        figure,
        target,
        report,
    })
}

/// With several modes sharing one output path, each gets `<stem>-<mode>.<ext>`.
pub fn output_path_for(path: &Path, mode: RenderMode, several: bool) -> PathBuf {
    if !several {
        return path.to_path_buf();
    }
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{}-{}.{}", stem, mode.name(), ext.to_string_lossy()),
        None => format!("{}-{}", stem, mode.name()),
    };
    path.with_file_name(name)
}
