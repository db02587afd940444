use crate::domain::models::{AggregateCounts, ExposureLevel, Level, Observation};

pub fn tally(observations: &[Observation]) -> AggregateCounts {
    let mut counts = AggregateCounts::default();
    for rating in observations.iter().filter_map(|o| o.risk_rating) {
        match rating {
            Level::High => counts.high += 1,
            Level::Medium => counts.medium += 1,
            Level::Low => counts.low += 1,
        }
    }
    counts
}

/// Level with the largest count; ties go to the higher severity.
pub fn exposure_level(counts: &AggregateCounts) -> ExposureLevel {
    let mut best = Level::High;
    for level in Level::PRIORITY {
        if counts.get(level) > counts.get(best) {
            best = level;
        }
    }
    best
}
