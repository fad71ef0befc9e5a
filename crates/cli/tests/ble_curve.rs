use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

const CONFIG: &str = r#"
- name: whipple
  angle_deg: 0
  projectile: { material: Al2017-T4, density_g_cm3: 2.796 }
  sweep: { start_km_s: 1.0, end_km_s: 15.0, samples: 15 }
  shield:
    model: nno
    bumper: { thickness_cm: 0.127, density_g_cm3: 2.713 }
    wall: { thickness_cm: 0.48, density_g_cm3: 2.851, yield_mpa: 399.9 }
    standoff_cm: 11.43
- name: window
  angle_deg: 15
  projectile: { density_g_cm3: 2.8 }
  shield: { model: transparent, material: quartz, thickness_cm: 1.0 }
"#;

fn write_config(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("analyses.yaml");
    fs::write(&path, CONFIG).expect("write config");
    path
}

#[test]
fn curve_streams_to_stdout() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = write_config(dir.path());
    let results = dir.path().join("results");

    let assert = Command::cargo_bin("ble_curve")
        .expect("ble_curve bin")
        .arg(&config)
        .args(["--output", "-", "--results-dir"])
        .arg(&results)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("velocity_km_s,dc_whipple_cm\n"));

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8");
    assert_eq!(stdout.lines().count(), 16);
    let sidecars: Vec<_> = fs::read_dir(&results)
        .expect("results dir")
        .filter_map(|e| e.ok())
        .collect();
    assert_eq!(sidecars.len(), 1, "one JSON sidecar expected");
}

#[test]
fn named_analysis_with_sweep_override_writes_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = write_config(dir.path());
    let output = dir.path().join("out").join("blc_data_window.csv");

    Command::cargo_bin("ble_curve")
        .expect("ble_curve bin")
        .arg(&config)
        .args(["--name", "WINDOW", "--samples", "5", "--output"])
        .arg(&output)
        .assert()
        .success();

    let csv = fs::read_to_string(&output).expect("curve csv");
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(lines[0], "velocity_km_s,dc_window_cm");
    assert_eq!(lines.len(), 6);

    let sidecar = dir.path().join("out").join("config_data_window.json");
    let json = fs::read_to_string(sidecar).expect("sidecar");
    assert!(json.contains("\"samples\": 5"), "{json}");
    assert!(json.contains("\"model\": \"transparent (quartz)\""), "{json}");
}

#[test]
fn unknown_analysis_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = write_config(dir.path());

    Command::cargo_bin("ble_curve")
        .expect("ble_curve bin")
        .arg(&config)
        .args(["--name", "missing", "--output", "-"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn invalid_sweep_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = write_config(dir.path());

    Command::cargo_bin("ble_curve")
        .expect("ble_curve bin")
        .arg(&config)
        .args(["--start", "0", "--output", "-"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("sweep start velocity"));
}
