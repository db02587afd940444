//! Drawing backend.
//!
//! [`FigureSink`] is the seam between plot decisions and pixels. The
//! production sink, [`PlottersCanvas`], draws with `plotters` into an
//! in-memory RGB buffer, then keys the background out to alpha, crops to the
//! drawn content and encodes PNG with `image`.

use crate::domain::constants::{
    FIGURE_HEIGHT_IN, FIGURE_WIDTH_IN, GRID_STEP_X, GRID_STEP_Y, OUTPUT_DPI, PLOT_HEIGHT,
    PLOT_WIDTH, RING_WIDTH, VIEWER_ENV,
};
use crate::domain::figure::{DonutFigure, Figure, Rgb, ScatterFigure, Wedge};
use crate::domain::models::RenderMode;
use crate::errors::{Result, RpgError};
use image::imageops::FilterType;
use image::{ImageFormat, Rgba, RgbaImage};
use plotters::coord::Shift;
use plotters::element::{BitMapElement, Pie};
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::Command;

type PlotResult<T> = std::result::Result<T, Box<dyn Error>>;
type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

/// Where finished figures go. Each call delivers exactly one figure.
pub trait FigureSink {
    fn save(&mut self, figure: &Figure, path: &Path) -> Result<()>;
    fn display(&mut self, figure: &Figure) -> Result<()>;
}

/// Never drawn by content; becomes the transparent background.
const KEY: RGBColor = RGBColor(254, 254, 254);
const CROP_PAD: u32 = 12;
const FONT: &str = "sans-serif";
const CHART_MARGIN: i32 = 24;
/// Extra room above and right of the plot for the axis-arrow labels.
const ARROW_LABEL_ROOM: i32 = 64;

pub struct PlottersCanvas {
    viewer: Vec<String>,
    staging: PathBuf,
}

impl PlottersCanvas {
    pub fn new(viewer: Vec<String>) -> Self {
        Self {
            viewer,
            staging: std::env::temp_dir(),
        }
    }

    /// Directory that receives the PNGs handed to the viewer.
    pub fn with_staging_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.staging = dir.into();
        self
    }

    /// Viewer from `RPG_VIEWER`, else the platform opener.
    pub fn from_env() -> Self {
        let viewer = std::env::var(VIEWER_ENV)
            .ok()
            .map(|v| v.split_whitespace().map(str::to_string).collect::<Vec<_>>())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(default_viewer);
        Self::new(viewer)
    }
}

fn default_viewer() -> Vec<String> {
    let argv: &[&str] = if cfg!(target_os = "macos") {
        &["open"]
    } else if cfg!(windows) {
        &["cmd", "/C", "start", ""]
    } else {
        &["xdg-open"]
    };
    argv.iter().map(|s| s.to_string()).collect()
}

impl FigureSink for PlottersCanvas {
    fn save(&mut self, figure: &Figure, path: &Path) -> Result<()> {
        let image = render(figure)?;
        write_png(&image, path)?;
        tracing::info!(
            mode = figure.mode().name(),
            path = %path.display(),
            "wrote figure"
        );
        Ok(())
    }

    fn display(&mut self, figure: &Figure) -> Result<()> {
        let image = render(figure)?;
        self.open_in_viewer(figure.mode(), &image)?;
        Ok(())
    }
}

impl PlottersCanvas {
    /// Stages `image` as a kept temp PNG and launches the viewer on it.
    ///
    /// The file is only kept once it is fully written and is removed again
    /// if the viewer cannot be started.
    fn open_in_viewer(&self, mode: RenderMode, image: &RgbaImage) -> Result<PathBuf> {
        let (program, args) = self
            .viewer
            .split_first()
            .ok_or_else(|| RpgError::Config(format!("{} is empty", VIEWER_ENV)))?;

        let tmp = tempfile::Builder::new()
            .prefix(&format!("rpg-{}-", mode.name()))
            .suffix(".png")
            .tempfile_in(&self.staging)
            .map_err(|e| RpgError::io(&self.staging, e))?;
        write_png(image, tmp.path())?;
        // The viewer runs detached and needs the file after we exit.
        let (_, path) = tmp
            .keep()
            .map_err(|e| RpgError::io(e.file.path(), e.error))?;

        if let Err(e) = Command::new(program).args(args).arg(&path).spawn() {
            let _ = std::fs::remove_file(&path);
            return Err(RpgError::io(PathBuf::from(program), e));
        }
        tracing::info!(viewer = %program, path = %path.display(), "opened figure");
        Ok(path)
    }
}

fn write_png(image: &RgbaImage, path: &Path) -> Result<()> {
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| match e {
            image::ImageError::IoError(io) => RpgError::io(path, io),
            other => RpgError::render(other),
        })
}

pub fn canvas_size() -> (u32, u32) {
    (
        (FIGURE_WIDTH_IN * OUTPUT_DPI as f64).round() as u32,
        (FIGURE_HEIGHT_IN * OUTPUT_DPI as f64).round() as u32,
    )
}

/// Typographic points to pixels at the output DPI.
pub fn pt_to_px(pt: f64) -> f64 {
    pt * OUTPUT_DPI as f64 / 72.0
}

/// Radius in pixels of a marker whose area is given in pt².
pub fn marker_radius_px(area: f64) -> i32 {
    pt_to_px((area / std::f64::consts::PI).sqrt()).round() as i32
}

fn color(rgb: Rgb) -> RGBColor {
    RGBColor(rgb.0, rgb.1, rgb.2)
}

pub fn render(figure: &Figure) -> Result<RgbaImage> {
    let (w, h) = canvas_size();
    let mut buf = vec![0u8; (w * h * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buf, (w, h)).into_drawing_area();
        root.fill(&KEY).map_err(RpgError::render)?;
        let drawn = match figure {
            Figure::Scatter(s) => draw_scatter(&root, s),
            Figure::Donut(d) => draw_donut(&root, d),
        };
        drawn.map_err(RpgError::render)?;
        root.present().map_err(RpgError::render)?;
    }
    Ok(tight_transparent(w, h, &buf))
}

/// Keys the background out and crops to the drawn content plus padding.
pub fn tight_transparent(w: u32, h: u32, rgb: &[u8]) -> RgbaImage {
    let key = [KEY.0, KEY.1, KEY.2];
    let mut out = RgbaImage::new(w, h);
    let (mut x0, mut y0, mut x1, mut y1) = (w, h, 0u32, 0u32);
    for (i, px) in rgb.chunks_exact(3).enumerate() {
        let (x, y) = (i as u32 % w, i as u32 / w);
        if px == key.as_slice() {
            out.put_pixel(x, y, Rgba([0, 0, 0, 0]));
            continue;
        }
        out.put_pixel(x, y, Rgba([px[0], px[1], px[2], 255]));
        x0 = x0.min(x);
        y0 = y0.min(y);
        x1 = x1.max(x);
        y1 = y1.max(y);
    }
    if x0 > x1 || y0 > y1 {
        return out;
    }
    let left = x0.saturating_sub(CROP_PAD);
    let top = y0.saturating_sub(CROP_PAD);
    let right = (x1 + CROP_PAD).min(w - 1);
    let bottom = (y1 + CROP_PAD).min(h - 1);
    image::imageops::crop_imm(&out, left, top, right - left + 1, bottom - top + 1)
        .to_image()
}

fn text_style(pt: f64, rgb: Rgb, bold: bool, pos: Pos) -> TextStyle<'static> {
    let font = (FONT, pt_to_px(pt)).into_font();
    let font = if bold {
        font.style(FontStyle::Bold)
    } else {
        font
    };
    font.color(&color(rgb)).pos(pos)
}

fn split_for_legend<'a>(root: &Area<'a>, legend: bool) -> (Area<'a>, Option<Area<'a>>) {
    if !legend {
        return (root.clone(), None);
    }
    let (w, _) = root.dim_in_pixel();
    let (left, right) = root.split_horizontally((w as f64 * 0.66) as i32);
    (left, Some(right))
}

fn draw_legend_lines(area: &Area, entries: &[(Option<Rgb>, String)]) -> PlotResult<()> {
    let line_h = pt_to_px(10.0).round() as i32;
    let swatch = line_h / 2;
    let left = 16;
    let top = 16;
    let style = text_style(8.0, (0, 0, 0), false, Pos::new(HPos::Left, VPos::Center));
    let mut widest = 0i32;
    for (i, (fill, label)) in entries.iter().enumerate() {
        let y = top + line_h / 2 + i as i32 * line_h + 8;
        let mut x = left + 12;
        if let Some(rgb) = fill {
            area.draw(&Rectangle::new(
                [(x, y - swatch / 2), (x + swatch, y + swatch / 2)],
                color(*rgb).filled(),
            ))?;
            x += swatch + 10;
        }
        area.draw(&Text::new(label.clone(), (x, y), style.clone()))?;
        let (tw, _) = area.estimate_text_size(label, &style)?;
        widest = widest.max(x + tw as i32);
    }
    let bottom = top + entries.len() as i32 * line_h + 16;
    area.draw(&Rectangle::new(
        [(left, top), (widest + 12, bottom)],
        BLACK.mix(0.6).stroke_width(1),
    ))?;
    Ok(())
}

fn draw_scatter(root: &Area, fig: &ScatterFigure) -> PlotResult<()> {
    let (plot_root, legend_area) = split_for_legend(root, !fig.legend.is_empty());
    let label_area = if fig.axis_arrows || fig.axis_labels {
        90
    } else {
        16
    };
    let arrow_room = if fig.axis_arrows { ARROW_LABEL_ROOM } else { 0 };

    let mut chart = ChartBuilder::on(&plot_root)
        .margin(CHART_MARGIN)
        .margin_top(CHART_MARGIN + arrow_room)
        .margin_right(CHART_MARGIN + arrow_room)
        .x_label_area_size(label_area)
        .y_label_area_size(label_area)
        .build_cartesian_2d(0f64..PLOT_WIDTH, 0f64..PLOT_HEIGHT)?;

    let blank = |_: &f64| String::new();
    let desc_style = text_style(10.0, (0, 0, 0), false, Pos::new(HPos::Center, VPos::Center));
    let mut mesh = chart.configure_mesh();
    mesh.disable_mesh()
        .x_label_formatter(&blank)
        .y_label_formatter(&blank)
        .axis_desc_style(desc_style);
    if fig.axis_labels {
        mesh.x_desc("Likelihood").y_desc("Impact");
    }
    mesh.draw()?;

    let (pw, ph) = chart.plotting_area().dim_in_pixel();
    let background = fig
        .background
        .image
        .resize_exact(pw, ph, FilterType::Triangle);
    let background: BitMapElement<_> = ((0.0, PLOT_HEIGHT), background).into();
    chart.draw_series(std::iter::once(background))?;

    let dashed = BLACK.mix(0.5).stroke_width(2);
    let mut x = GRID_STEP_X;
    while x < PLOT_WIDTH {
        chart.draw_series(DashedLineSeries::new(
            vec![(x, 0.0), (x, PLOT_HEIGHT)],
            12,
            8,
            dashed,
        ))?;
        x += GRID_STEP_X;
    }
    let mut y = GRID_STEP_Y;
    while y < PLOT_HEIGHT {
        chart.draw_series(DashedLineSeries::new(
            vec![(0.0, y), (PLOT_WIDTH, y)],
            12,
            8,
            dashed,
        ))?;
        y += GRID_STEP_Y;
    }

    chart.draw_series(fig.markers.iter().map(|m| {
        let radius = marker_radius_px(m.style.area);
        let label = text_style(
            m.style.label_pt,
            m.style.label_color,
            true,
            Pos::new(HPos::Center, VPos::Center),
        );
        EmptyElement::at((m.point.x as f64, m.point.y as f64))
            + Circle::new((0, 0), radius, color(m.style.fill).filled())
            + Circle::new((0, 0), radius, BLACK.stroke_width(2))
            + Text::new(m.label.clone(), (0, 0), label)
    }))?;

    if fig.axis_arrows {
        let (xr, yr) = chart.plotting_area().get_pixel_range();
        draw_axis_arrows(&plot_root, xr, yr)?;
    }

    if let Some(area) = legend_area {
        let entries: Vec<(Option<Rgb>, String)> =
            fig.legend.iter().map(|l| (None, l.clone())).collect();
        draw_legend_lines(&area, &entries)?;
    }
    Ok(())
}

/// "High" arrows along the bottom and left edges, pointing away from the origin.
fn draw_axis_arrows(
    area: &Area,
    xr: std::ops::Range<i32>,
    yr: std::ops::Range<i32>,
) -> PlotResult<()> {
    let stroke = BLACK.stroke_width(2);
    let head = 14;
    let label = text_style(9.0, (0, 0, 0), false, Pos::new(HPos::Left, VPos::Center));

    let y = yr.end + 40;
    area.draw(&PathElement::new(
        vec![(xr.start, y), (xr.end - head, y)],
        stroke,
    ))?;
    area.draw(&Polygon::new(
        vec![
            (xr.end, y),
            (xr.end - head, y - head / 2),
            (xr.end - head, y + head / 2),
        ],
        BLACK.filled(),
    ))?;
    area.draw(&Text::new("High", (xr.end + 8, y), label))?;

    let x = xr.start - 40;
    let label = text_style(9.0, (0, 0, 0), false, Pos::new(HPos::Center, VPos::Bottom));
    area.draw(&PathElement::new(
        vec![(x, yr.end), (x, yr.start + head)],
        stroke,
    ))?;
    area.draw(&Polygon::new(
        vec![
            (x, yr.start),
            (x - head / 2, yr.start + head),
            (x + head / 2, yr.start + head),
        ],
        BLACK.filled(),
    ))?;
    area.draw(&Text::new("High", (x, yr.start - 8), label))?;
    Ok(())
}

/// Screen angle of 12 o'clock, in degrees.
const TWELVE_OCLOCK: f64 = -90.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct WedgeSpan {
    wedge: Wedge,
    /// Screen angle in degrees where plotters starts this wedge's clockwise sweep.
    start: f64,
}

/// Ring layout: High runs counter-clockwise from 12 o'clock, followed by
/// Medium and Low. Returned in plotters' clockwise drawing order.
fn wedge_spans(fig: &DonutFigure) -> Vec<WedgeSpan> {
    let total = fig.total() as f64;
    let mut start = TWELVE_OCLOCK;
    fig.wedges
        .iter()
        .rev()
        .map(|w| {
            let sweep = if total > 0.0 {
                w.count as f64 / total * 360.0
            } else {
                0.0
            };
            let span = WedgeSpan { wedge: *w, start };
            start += sweep;
            span
        })
        .collect()
}

fn draw_donut(root: &Area, fig: &DonutFigure) -> PlotResult<()> {
    let (ring_area, legend_area) = split_for_legend(root, fig.legend);
    let (w, h) = ring_area.dim_in_pixel();
    let center = (w as i32 / 2, h as i32 / 2);
    let radius = w.min(h) as f64 * 0.4;
    let hole = radius * (1.0 - RING_WIDTH);

    let edge = BLACK.stroke_width(2);
    if fig.total() > 0 {
        let spans = wedge_spans(fig);
        let sizes: Vec<f64> = spans.iter().map(|s| s.wedge.count as f64).collect();
        let colors: Vec<RGBColor> = spans.iter().map(|s| color(s.wedge.fill)).collect();
        let labels: Vec<String> = spans.iter().map(|s| s.wedge.count.to_string()).collect();
        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.start_angle(TWELVE_OCLOCK);
        pie.donut_hole(hole);
        pie.label_style((FONT, pt_to_px(10.0)).into_font().color(&BLACK));
        ring_area.draw(&pie)?;

        // Wedge edges.
        for span in &spans {
            let (s, c) = span.start.to_radians().sin_cos();
            let inner = (center.0 + (hole * c) as i32, center.1 + (hole * s) as i32);
            let outer = (
                center.0 + (radius * c) as i32,
                center.1 + (radius * s) as i32,
            );
            ring_area.draw(&PathElement::new(vec![inner, outer], edge))?;
        }
    }
    ring_area.draw(&Circle::new(center, radius as i32, edge))?;
    ring_area.draw(&Circle::new(center, hole as i32, edge))?;

    let caption = text_style(16.0, (0, 0, 0), false, Pos::new(HPos::Center, VPos::Bottom));
    let level = text_style(24.0, (0, 0, 0), true, Pos::new(HPos::Center, VPos::Top));
    ring_area.draw(&Text::new(
        "Exposure level",
        (center.0, center.1 - 6),
        caption,
    ))?;
    ring_area.draw(&Text::new(
        fig.exposure_level.label(),
        (center.0, center.1 + 6),
        level,
    ))?;

    if let Some(area) = legend_area {
        let entries: Vec<(Option<Rgb>, String)> = fig
            .wedges
            .iter()
            .map(|w| (Some(w.fill), w.level.label().to_string()))
            .collect();
        draw_legend_lines(&area, &entries)?;
    }
    Ok(())
}
