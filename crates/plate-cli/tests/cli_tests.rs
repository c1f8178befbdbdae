use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

const CORNER: &str = r#"<svg width="20mm" height="20mm" viewBox="0 0 2 2">
  <rect x="0" y="0" width="2" height="2" fill="black"/>
  <rect x="1" y="0" width="1" height="1" fill="white"/>
  <rect x="0" y="1" width="1" height="1" fill="white"/>
  <rect x="1" y="1" width="1" height="1" fill="white"/>
</svg>"#;

fn write_marker(dir: &Path, name: &str, svg: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, svg).expect("write marker");
    path
}

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("marker-plates").expect("binary built");
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn writes_binary_stl_pair_from_flags() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let image = write_marker(tmp.path(), "corner.svg", CORNER);
    let out = tmp.path().join("out");

    cli()
        .arg(&image)
        .args(["--base", "2", "--cut", "1", "--checker-thickness", "0.5", "--grid", "2x2"])
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("corner_base.stl"))
        .stdout(predicate::str::contains("corner_cut.stl"));

    let cut = fs::read(out.join("corner_cut.stl")).expect("cut stl");
    assert_eq!(&cut[80..84], &12u32.to_le_bytes());
    assert!(out.join("corner_base.stl").exists());
}

#[test]
fn interactive_prompts_drive_generation() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let image = write_marker(tmp.path(), "prompted.svg", CORNER);
    let input = format!("{}\n2\n1\nn\n", image.display());

    cli()
        .arg("--out")
        .arg(tmp.path())
        .arg("--format")
        .arg("stl-ascii")
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Image dir:"))
        .stdout(predicate::str::contains("Use checkerboard? (y/n):"))
        .stdout(predicate::str::contains("Checkerboard thickness:").not());

    let text = fs::read_to_string(tmp.path().join("prompted_cut.stl")).expect("ascii stl");
    assert!(text.starts_with("solid prompted_cut"));
}

#[test]
fn step_format_and_report() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let image = write_marker(tmp.path(), "corner.svg", CORNER);
    let report = tmp.path().join("report.json");

    cli()
        .arg(&image)
        .args(["--no-prompt", "--no-checkerboard", "--format", "step"])
        .arg("--out")
        .arg(tmp.path())
        .arg("--report")
        .arg(&report)
        .assert()
        .success();

    let step = fs::read_to_string(tmp.path().join("corner_base.step")).expect("step");
    assert!(step.starts_with("ISO-10303-21;"));
    let json = fs::read_to_string(&report).expect("report");
    assert!(json.contains("\"rects_subtracted\": 3"));
}

#[test]
fn config_file_values_are_used() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let image = write_marker(tmp.path(), "corner.svg", CORNER);
    let config = tmp.path().join("plates.json");
    fs::write(
        &config,
        r#"{"base_thickness": 3.0, "cut_thickness": 1.0, "checkerboard": {"enabled": false}}"#,
    )
    .expect("write config");
    let report = tmp.path().join("r.json");

    // No stdin: a prompt here would fail the run.
    cli()
        .arg(&image)
        .arg("--config")
        .arg(&config)
        .arg("--out")
        .arg(tmp.path())
        .arg("--report")
        .arg(&report)
        .assert()
        .success();

    let json = fs::read_to_string(&report).expect("report");
    // 20 x 20 x 3 base plate.
    assert!(json.contains("\"base_volume\": 1200.0"));
}

#[test]
fn missing_image_reports_path() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let missing = tmp.path().join("nope.svg");

    cli()
        .arg(&missing)
        .arg("--no-prompt")
        .arg("--out")
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.svg"));
}

#[test]
fn malformed_svg_reports_path() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let image = write_marker(tmp.path(), "broken.svg", "<svg width=\"20mm\"");

    cli()
        .arg(&image)
        .arg("--no-prompt")
        .arg("--out")
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken.svg"));
}

#[test]
fn invalid_parameter_is_named() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let image = write_marker(tmp.path(), "corner.svg", CORNER);

    cli()
        .arg(&image)
        .args(["--no-prompt", "--base=-1"])
        .arg("--out")
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("base_thickness"));
}

#[test]
fn closed_stdin_names_missing_value() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let image = write_marker(tmp.path(), "corner.svg", CORNER);

    cli()
        .arg(&image)
        .arg("--out")
        .arg(tmp.path())
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("base_thickness"));
}
