use std::fmt;
use std::path::PathBuf;

/// One invalid cell (or missing column) found while loading a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowIssue {
    pub line: u64,
    pub column: &'static str,
    pub value: Option<String>,
}

impl fmt::Display for RowIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(v) => write!(
                f,
                "line {}: {} must be one of H, M, L (got {:?})",
                self.line, self.column, v
            ),
            None => write!(f, "line {}: missing {} column", self.line, self.column),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum RpgError {
    #[error("invalid invocation: {0}")]
    Config(String),
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed rows in {}:\n{}", .path.display(), join_issues(.issues))]
    MalformedRow {
        path: PathBuf,
        issues: Vec<RowIssue>,
    },
    #[error("background image {name} not found (searched: {})", join_paths(.searched))]
    MissingAsset {
        name: String,
        searched: Vec<PathBuf>,
    },
    #[error("background image {} could not be decoded: {reason}", .path.display())]
    BadAsset {
        path: PathBuf,
        reason: String,
    },
    #[error("unknown category {0:?}, expected H, M or L")]
    UnknownCategory(String),
    #[error("rendering failed: {0}")]
    Render(String),
}

impl RpgError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RpgError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn render(err: impl fmt::Display) -> Self {
        RpgError::Render(err.to_string())
    }
}

fn join_issues(issues: &[RowIssue]) -> String {
    issues
        .iter()
        .map(|i| format!("  {}", i))
        .collect::<Vec<_>>()
        .join("\n")
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, RpgError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_row_lists_every_issue() {
        let err = RpgError::MalformedRow {
            path: PathBuf::from("risk.csv"),
            issues: vec![
                RowIssue {
                    line: 2,
                    column: "likelihood",
                    value: Some("X".to_string()),
                },
                RowIssue {
                    line: 4,
                    column: "risk_rating",
                    value: None,
                },
            ],
        };
        let msg = err.to_string();
        assert!(msg.contains("line 2: likelihood must be one of H, M, L (got \"X\")"));
        assert!(msg.contains("line 4: missing risk_rating column"));
    }

    #[test]
    fn missing_asset_names_searched_paths() {
        let err = RpgError::MissingAsset {
            name: "grid-bg.png".to_string(),
            searched: vec![
                PathBuf::from("data/grid-bg.png"),
                PathBuf::from("/usr/share/rpg/data/grid-bg.png"),
            ],
        };
        assert_eq!(
            err.to_string(),
            "background image grid-bg.png not found (searched: data/grid-bg.png, /usr/share/rpg/data/grid-bg.png)"
        );
    }
}
