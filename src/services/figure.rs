use crate::domain::constants::{
    GRID_BACKGROUND, GRID_LABEL_PT, GRID_MARKER_AREA, HIGH_MARKER_RGB, HIGH_WEDGE_RGB,
    LOW_MARKER_RGB, LOW_WEDGE_RGB, MEDIUM_MARKER_RGB, MEDIUM_WEDGE_RGB, RECOMMENDATIONS_BACKGROUND,
    RECOMMENDATION_LABEL_PT, RECOMMENDATION_MARKER_AREA, RECOMMENDATION_MARKER_RGB,
};
use crate::domain::figure::{
    Background, DonutFigure, Marker, MarkerStyle, Overlays, ScatterFigure, Wedge, BLACK, WHITE,
};
use crate::domain::models::{AggregateCounts, Level, RenderMode, RiskContext, Schema};
use crate::services::jitter::{JitterPlacer, Placement};
use crate::services::severity::exposure_level;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Palette {
    /// Fill by each observation's own risk rating.
    Severity,
    /// One style for every marker.
    Uniform(MarkerStyle),
}

/// Everything that differs between the scatter modes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderProfile {
    pub mode: RenderMode,
    pub schema: Schema,
    pub palette: Palette,
    pub placement: Placement,
    pub background: &'static str,
}

impl RenderProfile {
    pub const GRID: RenderProfile = RenderProfile {
        mode: RenderMode::Grid,
        schema: Schema::RiskRated,
        palette: Palette::Severity,
        placement: Placement::GRID,
        background: GRID_BACKGROUND,
    };

    pub const RECOMMENDATIONS: RenderProfile = RenderProfile {
        mode: RenderMode::Recommendations,
        schema: Schema::Recommendations,
        palette: Palette::Uniform(MarkerStyle {
            fill: RECOMMENDATION_MARKER_RGB,
            area: RECOMMENDATION_MARKER_AREA,
            label_color: WHITE,
            label_pt: RECOMMENDATION_LABEL_PT,
        }),
        placement: Placement::RECOMMENDATIONS,
        background: RECOMMENDATIONS_BACKGROUND,
    };

    /// Scatter profile for `mode`; the donut has none.
    pub fn for_mode(mode: RenderMode) -> Option<RenderProfile> {
        match mode {
            RenderMode::Grid => Some(Self::GRID),
            RenderMode::Recommendations => Some(Self::RECOMMENDATIONS),
            RenderMode::Donut => None,
        }
    }
}

pub fn severity_style(level: Level) -> MarkerStyle {
    let (fill, label_color) = match level {
        Level::High => (HIGH_MARKER_RGB, WHITE),
        Level::Medium => (MEDIUM_MARKER_RGB, WHITE),
        Level::Low => (LOW_MARKER_RGB, BLACK),
    };
    MarkerStyle {
        fill,
        area: GRID_MARKER_AREA,
        label_color,
        label_pt: GRID_LABEL_PT,
    }
}

pub fn build_scatter<R: Rng>(
    ctx: &RiskContext,
    profile: &RenderProfile,
    overlays: Overlays,
    placer: &mut JitterPlacer<R>,
    background: Background,
) -> ScatterFigure {
    let mut markers = Vec::with_capacity(ctx.observations.len());
    for o in &ctx.observations {
        let style = match (profile.palette, o.risk_rating) {
            (Palette::Uniform(style), _) => style,
            (Palette::Severity, Some(level)) => severity_style(level),
            (Palette::Severity, None) => {
                tracing::warn!(
                    id = %o.id,
                    line = o.line,
                    "observation has no risk rating, skipped"
                );
                continue;
            }
        };
        markers.push(Marker {
            point: placer.place(o.quadrant, profile.placement),
            label: o.id.clone(),
            style,
        });
    }

    let legend = if overlays.legend {
        ctx.observations.iter().map(|o| o.legend_label()).collect()
    } else {
        Vec::new()
    };

    ScatterFigure {
        mode: profile.mode,
        background,
        markers,
        legend,
        axis_arrows: overlays.axis_arrows,
        axis_labels: overlays.axis_labels,
    }
}

pub fn build_donut(counts: &AggregateCounts, overlays: Overlays) -> DonutFigure {
    let wedge = |level: Level, fill| Wedge {
        level,
        count: counts.get(level),
        fill,
    };
    DonutFigure {
        wedges: [
            wedge(Level::High, HIGH_WEDGE_RGB),
            wedge(Level::Medium, MEDIUM_WEDGE_RGB),
            wedge(Level::Low, LOW_WEDGE_RGB),
        ],
        exposure_level: exposure_level(counts),
        legend: overlays.legend,
    }
}
