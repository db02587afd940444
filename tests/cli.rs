mod common;

use common::{TestEnv, RATED_CSV, RECOMMENDATIONS_CSV};
use predicates::str::contains;
use std::path::Path;

fn assert_transparent_png(path: &Path) {
    assert!(path.exists(), "{} was not written", path.display());
    let img = image::open(path).expect("decode written png");
    assert!(img.color().has_alpha());
    let rgba = img.to_rgba8();
    assert!(rgba.pixels().any(|p| p.0[3] == 0), "no transparent pixels");
    assert!(rgba.pixels().any(|p| p.0[3] == 255), "nothing drawn");
}

fn png_files(dir: &Path) -> Vec<std::path::PathBuf> {
    std::fs::read_dir(dir)
        .expect("read staging dir")
        .map(|e| e.expect("dir entry").path())
        .filter(|p| p.extension().is_some_and(|x| x == "png"))
        .collect()
}

#[test]
fn help_lists_every_flag() {
    let env = TestEnv::new();
    let out = env.cmd().arg("--help").output().expect("run --help");
    assert!(out.status.success());
    let help = String::from_utf8(out.stdout).expect("utf8 help");
    for flag in [
        "--grid",
        "--donut",
        "--recommendations",
        "--input-csv-file",
        "--output-png-file",
        "--axis-labels",
        "--axis-arrows",
        "--legend",
        "--seed",
        "--json",
        "ring",
    ] {
        assert!(help.contains(flag), "help is missing {}", flag);
    }
}

#[test]
fn input_file_is_required() {
    let env = TestEnv::new();
    env.cmd()
        .arg("--grid")
        .assert()
        .failure()
        .stderr(contains("--input-csv-file"));
}

#[test]
fn selecting_no_mode_is_rejected() {
    let env = TestEnv::new();
    let csv = env.write_csv("risk.csv", RATED_CSV);
    env.cmd()
        .arg("-i")
        .arg(&csv)
        .assert()
        .failure()
        .stderr(contains("select at least one of"));
}

#[test]
fn unreadable_input_fails() {
    let env = TestEnv::new();
    env.cmd()
        .args(["--donut", "-i", "missing.csv"])
        .assert()
        .failure()
        .stderr(contains("missing.csv"));
}

#[test]
fn malformed_rows_abort_before_any_output() {
    let env = TestEnv::new();
    let csv = env.write_csv(
        "risk.csv",
        "Number,Observation,Likelihood,Impact,Risk\n1,ok,H,H,H\n2,bad,X,H,H\n3,worse,H,H,Z\n",
    );
    let out = env.path("risk.png");
    env.cmd()
        .arg("--grid")
        .arg("-i")
        .arg(&csv)
        .arg("-o")
        .arg(&out)
        .arg("--asset-dir")
        .arg(&env.assets)
        .assert()
        .failure()
        .stderr(contains("line 3: likelihood"))
        .stderr(contains("line 4: risk_rating"));
    assert!(!out.exists());
}

#[test]
fn missing_background_is_fatal() {
    let env = TestEnv::new();
    let csv = env.write_csv("risk.csv", RATED_CSV);
    let out = env.path("risk.png");
    env.cmd()
        .arg("--grid")
        .arg("-i")
        .arg(&csv)
        .arg("-o")
        .arg(&out)
        .assert()
        .failure()
        .stderr(contains("grid-bg.png not found"));
    assert!(!out.exists());
}

#[test]
fn grid_writes_a_transparent_png() {
    let env = TestEnv::new();
    let csv = env.write_csv("risk.csv", RATED_CSV);
    let out = env.path("risk.png");
    env.cmd()
        .args(["--grid", "--seed", "7"])
        .args(["--legend", "--axis-arrows", "--axis-labels"])
        .arg("-i")
        .arg(&csv)
        .arg("-o")
        .arg(&out)
        .arg("--asset-dir")
        .arg(&env.assets)
        .assert()
        .success()
        .stdout(contains(format!("grid\twrote\t{}", out.display())))
        .stdout(contains("3 observations"));
    assert_transparent_png(&out);
}

#[test]
fn donut_writes_a_transparent_png() {
    let env = TestEnv::new();
    let csv = env.write_csv("risk.csv", RATED_CSV);
    let out = env.path("ring.png");
    env.cmd()
        .args(["--donut", "--legend"])
        .arg("-i")
        .arg(&csv)
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(contains("donut\twrote"))
        .stdout(contains("exposure=High"));
    assert_transparent_png(&out);
}

#[test]
fn recommendations_write_a_transparent_png() {
    let env = TestEnv::new();
    let csv = env.write_csv("recs.csv", RECOMMENDATIONS_CSV);
    let out = env.path("recs.png");
    env.cmd()
        .args(["-r", "--seed", "3"])
        .arg("-i")
        .arg(&csv)
        .arg("-o")
        .arg(&out)
        .arg("--asset-dir")
        .arg(&env.assets)
        .assert()
        .success()
        .stdout(contains("recommendations\twrote"))
        .stdout(contains("2 observations"));
    assert_transparent_png(&out);
}

#[test]
fn json_summary_lists_each_written_mode() {
    let env = TestEnv::new();
    let csv = env.write_csv("risk.csv", RATED_CSV);
    let out = env.path("out.png");
    let output = env
        .cmd()
        .args(["-d", "-g", "--json", "--seed", "11"])
        .arg("-i")
        .arg(&csv)
        .arg("-o")
        .arg(&out)
        .arg("--asset-dir")
        .arg(&env.assets)
        .output()
        .expect("run rpg");
    assert!(output.status.success());
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json stdout");
    assert_eq!(v["ok"], true);
    let data = v["data"].as_array().expect("data array");
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["mode"], "donut");
    assert_eq!(data[0]["outcome"], "wrote");
    assert_eq!(data[0]["exposure_level"], "High");
    assert_eq!(data[0]["counts"]["medium"], 1);
    assert_eq!(data[1]["mode"], "grid");
    assert_eq!(data[1]["observations"], 3);
    assert_transparent_png(&env.path("out-donut.png"));
    assert_transparent_png(&env.path("out-grid.png"));
}

#[test]
fn undecodable_background_aborts_before_any_output() {
    let env = TestEnv::new();
    env.corrupt_asset("grid-bg.png");
    let csv = env.write_csv("risk.csv", RATED_CSV);
    let out = env.path("out.png");
    env.cmd()
        .args(["-d", "-g"])
        .arg("-i")
        .arg(&csv)
        .arg("-o")
        .arg(&out)
        .arg("--asset-dir")
        .arg(&env.assets)
        .assert()
        .failure()
        .stderr(contains("could not be decoded"))
        .stderr(contains("grid-bg.png"));
    assert!(!env.path("out-donut.png").exists());
    assert!(!env.path("out-grid.png").exists());
}

#[test]
fn failed_display_leaves_no_temp_file() {
    let env = TestEnv::new();
    env.corrupt_asset("grid-bg.png");
    let csv = env.write_csv("risk.csv", RATED_CSV);
    let staging = env.path("staging");
    std::fs::create_dir_all(&staging).expect("create staging dir");
    env.cmd()
        .env("TMPDIR", &staging)
        .arg("-g")
        .arg("-i")
        .arg(&csv)
        .arg("--asset-dir")
        .arg(&env.assets)
        .assert()
        .failure();
    assert!(png_files(&staging).is_empty());
}

#[cfg(unix)]
#[test]
fn display_hands_one_png_to_the_viewer() {
    let env = TestEnv::new();
    let csv = env.write_csv("risk.csv", RATED_CSV);
    let staging = env.path("staging");
    std::fs::create_dir_all(&staging).expect("create staging dir");
    env.cmd()
        .env("TMPDIR", &staging)
        .arg("--donut")
        .arg("-i")
        .arg(&csv)
        .assert()
        .success()
        .stdout(contains("donut\tdisplayed"));
    let staged = png_files(&staging);
    assert_eq!(staged.len(), 1);
    assert_transparent_png(&staged[0]);
}
