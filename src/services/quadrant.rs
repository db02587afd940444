use crate::domain::models::{Level, QuadrantCoordinate};
use crate::errors::Result;

fn likelihood_x(level: Level) -> i32 {
    match level {
        Level::High => 450,
        Level::Medium => 300,
        Level::Low => 150,
    }
}

fn impact_y(level: Level) -> i32 {
    match level {
        Level::High => 300,
        Level::Medium => 200,
        Level::Low => 100,
    }
}

pub fn quadrant_center(likelihood: Level, impact: Level) -> QuadrantCoordinate {
    QuadrantCoordinate {
        x: likelihood_x(likelihood),
        y: impact_y(impact),
    }
}

/// Maps raw `H`/`M`/`L` codes; anything else is `UnknownCategory`.
pub fn quadrant_for_codes(likelihood: &str, impact: &str) -> Result<QuadrantCoordinate> {
    Ok(quadrant_center(likelihood.parse()?, impact.parse()?))
}
