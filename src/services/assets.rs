use crate::domain::constants::{INSTALLED_ASSET_DIR, LOCAL_ASSET_DIR};
use crate::domain::figure::Background;
use crate::errors::{Result, RpgError};
use std::path::{Path, PathBuf};

/// Search order for background images: an explicit directory (if any), the
/// working-directory `data/`, then the system install location.
pub fn search_dirs(override_dir: Option<&Path>) -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Some(d) = override_dir {
        dirs.push(d.to_path_buf());
    }
    dirs.push(PathBuf::from(LOCAL_ASSET_DIR));
    dirs.push(PathBuf::from(INSTALLED_ASSET_DIR));
    dirs
}

pub fn resolve_asset(name: &str, dirs: &[PathBuf]) -> Result<PathBuf> {
    let searched: Vec<PathBuf> = dirs.iter().map(|d| d.join(name)).collect();
    match searched.iter().find(|p| p.is_file()) {
        Some(found) => {
            tracing::info!(asset = name, path = %found.display(), "resolved background");
            Ok(found.clone())
        }
        None => Err(RpgError::MissingAsset {
            name: name.to_string(),
            searched,
        }),
    }
}

/// Resolves `name` and decodes it, so a broken image fails before any
/// figure is delivered.
pub fn load_background(name: &str, dirs: &[PathBuf]) -> Result<Background> {
    let path = resolve_asset(name, dirs)?;
    let image = image::open(&path).map_err(|e| match e {
        image::ImageError::IoError(io) => RpgError::io(&path, io),
        other => RpgError::BadAsset {
            path: path.clone(),
            reason: other.to_string(),
        },
    })?;
    tracing::debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "decoded background"
    );
    Ok(Background { path, image })
}
