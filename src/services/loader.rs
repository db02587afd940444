use crate::domain::models::{Level, Observation, RiskContext, Schema};
use crate::errors::{Result, RowIssue, RpgError};
use crate::services::quadrant::quadrant_center;
use crate::services::severity::tally;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const COL_ID: usize = 0;
const COL_NAME: usize = 1;
const COL_LIKELIHOOD: usize = 2;
const COL_IMPACT: usize = 3;
const COL_RISK_RATING: usize = 4;

/// Reads `path` under `schema` into a fresh context.
///
/// Every row is checked before failing, so a single `MalformedRow` error
/// carries all bad rows of the file.
pub fn load_context(path: &Path, schema: Schema) -> Result<RiskContext> {
    let file = File::open(path).map_err(|e| RpgError::io(path, e))?;
    let observations = read_observations(file, schema, path)?;
    if observations.is_empty() {
        tracing::warn!(path = %path.display(), "input table has no rows");
    }
    let counts = match schema {
        Schema::RiskRated => Some(tally(&observations)),
        Schema::Recommendations => None,
    };
    tracing::info!(
        path = %path.display(),
        schema = ?schema,
        rows = observations.len(),
        "loaded observations"
    );
    Ok(RiskContext {
        schema,
        observations,
        counts,
    })
}

pub fn read_observations<R: Read>(
    reader: R,
    schema: Schema,
    path: &Path,
) -> Result<Vec<Observation>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut observations = Vec::new();
    let mut issues = Vec::new();
    for (idx, record) in rdr.records().enumerate() {
        let record = record.map_err(|e| csv_error(path, e))?;
        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(idx as u64 + 2);
        match parse_row(&record, schema, line) {
            Ok(o) => observations.push(o),
            Err(mut row_issues) => issues.append(&mut row_issues),
        }
    }

    if !issues.is_empty() {
        return Err(RpgError::MalformedRow {
            path: path.to_path_buf(),
            issues,
        });
    }
    Ok(observations)
}

fn parse_row(
    record: &csv::StringRecord,
    schema: Schema,
    line: u64,
) -> std::result::Result<Observation, Vec<RowIssue>> {
    let mut issues = Vec::new();
    let mut text = |idx: usize, column: &'static str| -> Option<String> {
        let v = record.get(idx).map(str::to_string);
        if v.is_none() {
            issues.push(RowIssue {
                line,
                column,
                value: None,
            });
        }
        v
    };
    let id = text(COL_ID, "number");
    let name = text(COL_NAME, "name");
    let likelihood = text(COL_LIKELIHOOD, "likelihood");
    let impact = text(COL_IMPACT, "impact");
    let rating = match schema {
        Schema::RiskRated => text(COL_RISK_RATING, "risk_rating"),
        Schema::Recommendations => None,
    };

    let mut level = |raw: Option<String>, column: &'static str| -> Option<Level> {
        let raw = raw?;
        match raw.parse::<Level>() {
            Ok(l) => Some(l),
            Err(_) => {
                issues.push(RowIssue {
                    line,
                    column,
                    value: Some(raw),
                });
                None
            }
        }
    };
    let likelihood = level(likelihood, "likelihood");
    let impact = level(impact, "impact");
    let risk_rating = level(rating, "risk_rating");

    match (id, name, likelihood, impact) {
        (Some(id), Some(name), Some(likelihood), Some(impact)) if issues.is_empty() => {
            Ok(Observation {
                id,
                name,
                likelihood,
                impact,
                risk_rating,
                quadrant: quadrant_center(likelihood, impact),
                line,
            })
        }
        _ => Err(issues),
    }
}

fn csv_error(path: &Path, err: csv::Error) -> RpgError {
    match err.into_kind() {
        csv::ErrorKind::Io(e) => RpgError::io(path, e),
        other => RpgError::io(
            path,
            std::io::Error::new(std::io::ErrorKind::InvalidData, format!("{:?}", other)),
        ),
    }
}
