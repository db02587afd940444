//! Fixed layout, palette and asset constants.

/// Plot space spans `0..=PLOT_WIDTH` by `0..=PLOT_HEIGHT`.
pub const PLOT_WIDTH: f64 = 450.0;
pub const PLOT_HEIGHT: f64 = 300.0;

/// Reference grid spacing (quadrant boundaries).
pub const GRID_STEP_X: f64 = 150.0;
pub const GRID_STEP_Y: f64 = 100.0;

pub const OUTPUT_DPI: u32 = 200;
pub const FIGURE_WIDTH_IN: f64 = 6.4;
pub const FIGURE_HEIGHT_IN: f64 = 4.8;

pub const GRID_BACKGROUND: &str = "grid-bg.png";
pub const RECOMMENDATIONS_BACKGROUND: &str = "recommendations-bg.png";
pub const LOCAL_ASSET_DIR: &str = "data";
pub const INSTALLED_ASSET_DIR: &str = "/usr/share/rpg/data";

pub const VIEWER_ENV: &str = "RPG_VIEWER";

/// Stepped jitter offsets relative to the quadrant center: `(start, end, step)`,
/// sampled as `center - start ..= center - end` exclusive of the upper bound.
pub const GRID_X_OFFSETS: (i32, i32, i32) = (90, 10, 25);
pub const RECOMMENDATIONS_X_OFFSETS: (i32, i32, i32) = (130, 10, 25);
pub const Y_OFFSETS: (i32, i32, i32) = (80, 10, 20);

pub const HIGH_MARKER_RGB: (u8, u8, u8) = (0xe2, 0x00, 0x00);
pub const MEDIUM_MARKER_RGB: (u8, u8, u8) = (0xfe, 0xcb, 0x00);
pub const LOW_MARKER_RGB: (u8, u8, u8) = (0xff, 0xff, 0x00);
pub const RECOMMENDATION_MARKER_RGB: (u8, u8, u8) = (0x4f, 0x81, 0xbd);

/// Ring wedge colors (red, orange, yellow).
pub const HIGH_WEDGE_RGB: (u8, u8, u8) = (0xff, 0x00, 0x00);
pub const MEDIUM_WEDGE_RGB: (u8, u8, u8) = (0xff, 0xa5, 0x00);
pub const LOW_WEDGE_RGB: (u8, u8, u8) = (0xff, 0xff, 0x00);

/// Marker areas in pt², label sizes in pt.
pub const GRID_MARKER_AREA: f64 = 200.0;
pub const RECOMMENDATION_MARKER_AREA: f64 = 250.0;
pub const GRID_LABEL_PT: f64 = 7.0;
pub const RECOMMENDATION_LABEL_PT: f64 = 6.0;

/// Ring width as a fraction of the outer radius.
pub const RING_WIDTH: f64 = 0.25;
