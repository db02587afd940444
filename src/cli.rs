use crate::domain::figure::Overlays;
use crate::domain::models::RenderMode;
use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Parser, Debug)]
#[command(
    name = "rpg",
    version,
    about = "Risk plot generator: turns risk assessment tables into report graphics"
)]
pub struct Cli {
    #[arg(short = 'g', long, help = "Generate a risk grid plot")]
    pub grid: bool,
    #[arg(
        short = 'd',
        long,
        visible_alias = "ring",
        help = "Generate a risk donut"
    )]
    pub donut: bool,
    #[arg(short = 'r', long, help = "Generate a risk recommendations plot")]
    pub recommendations: bool,
    #[arg(
        short = 'i',
        long = "input-csv-file",
        value_name = "CSV",
        help = "Input CSV file (e.g. data.csv)"
    )]
    pub input_csv_file: PathBuf,
    #[arg(
        short = 'o',
        long = "output-png-file",
        value_name = "PNG",
        help = "Output PNG file (e.g. risk.png); shows the plot when omitted"
    )]
    pub output_png_file: Option<PathBuf>,
    #[arg(long, help = "Print the axis labels")]
    pub axis_labels: bool,
    #[arg(long, help = "Print arrows along the axes")]
    pub axis_arrows: bool,
    #[arg(long, help = "Print the legend")]
    pub legend: bool,
    #[arg(long, help = "Seed the point placement for reproducible plots")]
    pub seed: Option<u64>,
    #[arg(
        long,
        value_name = "DIR",
        help = "Directory searched first for background images"
    )]
    pub asset_dir: Option<PathBuf>,
    #[arg(long, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        default_value = DEFAULT_LOG_LEVEL,
        help = "Log filter used when RUST_LOG is unset"
    )]
    pub log_level: String,
}

impl Cli {
    /// Selected modes in delivery order.
    pub fn modes(&self) -> Vec<RenderMode> {
        [
            (self.donut, RenderMode::Donut),
            (self.grid, RenderMode::Grid),
            (self.recommendations, RenderMode::Recommendations),
        ]
        .into_iter()
        .filter_map(|(on, mode)| on.then_some(mode))
        .collect()
    }

    pub fn overlays(&self) -> Overlays {
        Overlays {
            legend: self.legend,
            axis_arrows: self.axis_arrows,
            axis_labels: self.axis_labels,
        }
    }
}
