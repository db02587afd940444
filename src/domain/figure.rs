//! Backend-independent description of a plot.
//!
//! A [`Figure`] is everything a drawing backend needs and nothing more: the
//! placement, palette and overlay decisions have already been made.

use super::models::{DisplayPoint, ExposureLevel, Level, RenderMode};
use image::DynamicImage;
use std::path::PathBuf;

pub type Rgb = (u8, u8, u8);

pub const WHITE: Rgb = (0xff, 0xff, 0xff);
pub const BLACK: Rgb = (0x00, 0x00, 0x00);

/// Optional decorations, toggled independently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overlays {
    pub legend: bool,
    pub axis_arrows: bool,
    pub axis_labels: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    pub fill: Rgb,
    /// Marker area in pt².
    pub area: f64,
    pub label_color: Rgb,
    pub label_pt: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub point: DisplayPoint,
    pub label: String,
    pub style: MarkerStyle,
}

/// A background image, already decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct Background {
    pub path: PathBuf,
    pub image: DynamicImage,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterFigure {
    pub mode: RenderMode,
    pub background: Background,
    pub markers: Vec<Marker>,
    /// Legend lines in insertion order; empty when the legend is off.
    pub legend: Vec<String>,
    pub axis_arrows: bool,
    pub axis_labels: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wedge {
    pub level: Level,
    pub count: usize,
    pub fill: Rgb,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonutFigure {
    /// High, Medium, Low in that order.
    pub wedges: [Wedge; 3],
    pub exposure_level: ExposureLevel,
    pub legend: bool,
}

impl DonutFigure {
    pub fn total(&self) -> usize {
        self.wedges.iter().map(|w| w.count).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Figure {
    Scatter(ScatterFigure),
    Donut(DonutFigure),
}

impl Figure {
    pub fn mode(&self) -> RenderMode {
        match self {
            Figure::Scatter(s) => s.mode,
            Figure::Donut(_) => RenderMode::Donut,
        }
    }
}
