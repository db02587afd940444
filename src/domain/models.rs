use crate::errors::RpgError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

/// A High/Medium/Low category, written as `H`, `M` or `L` in input tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    High,
    Medium,
    Low,
}

impl Level {
    /// Severity priority, highest first. Tie-breaks follow this order.
    pub const PRIORITY: [Level; 3] = [Level::High, Level::Medium, Level::Low];

    pub fn label(self) -> &'static str {
        match self {
            Level::High => "High",
            Level::Medium => "Medium",
            Level::Low => "Low",
        }
    }
}

impl FromStr for Level {
    type Err = RpgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "H" => Ok(Level::High),
            "M" => Ok(Level::Medium),
            "L" => Ok(Level::Low),
            other => Err(RpgError::UnknownCategory(other.to_string())),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Serialized by label so `--json` matches the text output.
impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Dominant severity of a whole assessment.
pub type ExposureLevel = Level;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schema {
    /// `number, name, likelihood, impact, risk_rating`
    RiskRated,
    /// `number, name, likelihood, impact`
    Recommendations,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuadrantCoordinate {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayPoint {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub id: String,
    pub name: String,
    pub likelihood: Level,
    pub impact: Level,
    pub risk_rating: Option<Level>,
    pub quadrant: QuadrantCoordinate,
    /// 1-based line in the source table.
    pub line: u64,
}

impl Observation {
    pub fn legend_label(&self) -> String {
        format!("{} {}", self.id, self.name)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AggregateCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl AggregateCounts {
    pub fn get(&self, level: Level) -> usize {
        match level {
            Level::High => self.high,
            Level::Medium => self.medium,
            Level::Low => self.low,
        }
    }

    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }
}

/// Everything one invocation knows about one input table.
#[derive(Debug, Clone)]
pub struct RiskContext {
    pub schema: Schema,
    pub observations: Vec<Observation>,
    /// Present for [`Schema::RiskRated`] only.
    pub counts: Option<AggregateCounts>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    Donut,
    Grid,
    Recommendations,
}

impl RenderMode {
    pub fn name(self) -> &'static str {
        match self {
            RenderMode::Donut => "donut",
            RenderMode::Grid => "grid",
            RenderMode::Recommendations => "recommendations",
        }
    }

    pub fn schema(self) -> Schema {
        match self {
            RenderMode::Donut | RenderMode::Grid => Schema::RiskRated,
            RenderMode::Recommendations => Schema::Recommendations,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Delivery {
    Wrote,
    Displayed,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderReport {
    pub mode: RenderMode,
    pub outcome: Delivery,
    pub path: Option<String>,
    pub observations: usize,
    pub counts: Option<AggregateCounts>,
    pub exposure_level: Option<ExposureLevel>,
}
