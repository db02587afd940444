#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use image::{Rgb, RgbImage};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const RATED_CSV: &str = "\
Number,Observation,Likelihood,Impact,Risk
1,Outdated TLS configuration,H,M,H
2,Default credentials on admin panel,H,H,H
3,Verbose error messages,M,L,M
";

pub const RECOMMENDATIONS_CSV: &str = "\
Number,Recommendation,Likelihood,Impact
R1,Enforce TLS 1.2+,H,M
R2,Rotate admin credentials,H,H
";

pub struct TestEnv {
    tmp: TempDir,
    pub assets: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let assets = tmp.path().join("assets");
        fs::create_dir_all(&assets).expect("create asset dir");
        for name in ["grid-bg.png", "recommendations-bg.png"] {
            write_background(&assets.join(name));
        }
        Self { tmp, assets }
    }

    /// Replaces a background with bytes that are not an image.
    pub fn corrupt_asset(&self, name: &str) {
        fs::write(self.assets.join(name), b"not a png").expect("write corrupt background");
    }

    pub fn dir(&self) -> &Path {
        self.tmp.path()
    }

    pub fn write_csv(&self, name: &str, body: &str) -> PathBuf {
        let path = self.tmp.path().join(name);
        fs::write(&path, body).expect("write csv fixture");
        path
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.tmp.path().join(name)
    }

    /// Binary run from inside the temp dir so `data/` lookups stay isolated.
    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("rpg");
        cmd.current_dir(self.tmp.path())
            .env_remove("RUST_LOG")
            .env("RPG_VIEWER", "true");
        cmd
    }
}

/// Small 3x3 quadrant-tinted PNG, enough for the renderer to scale up.
pub fn write_background(path: &Path) {
    let img = RgbImage::from_fn(45, 30, |x, y| {
        let (col, row) = ((x / 15) as u8, (y / 10) as u8);
        Rgb([200 + 20 * col, 240 - 20 * row, 200])
    });
    img.save(path).expect("write background fixture");
}
