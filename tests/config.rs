use blossum::ble::{Shield, VelocityGrid, generate_curve};
use blossum::config::{ConfigError, load_analyses, load_analysis_records};

#[test]
fn shipped_yaml_analyses_resolve_and_sweep() {
    let analyses = load_analyses("configs/analyses.yaml").expect("load analyses");
    let names: Vec<_> = analyses.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(
        names,
        ["iss-whipple", "columbus-stuffed", "honeycomb-panel", "cupola-window"]
    );

    let panel = &analyses[2];
    assert!(matches!(panel.shield, Shield::HoneycombSandwich(_)));
    assert_eq!(panel.grid.samples, 91);
    assert_eq!(analyses[0].grid, VelocityGrid::default());

    for analysis in &analyses {
        let curve = generate_curve(&analysis.shield, &analysis.impact, &analysis.grid)
            .unwrap_or_else(|err| panic!("{}: {err}", analysis.name));
        assert_eq!(curve.len(), analysis.grid.samples);
        assert!(curve.iter().all(|p| p.critical_diameter_cm.is_finite()));
    }
}

#[test]
fn shipped_toml_directory_loads_sorted() {
    let analyses = load_analyses("configs/analyses").expect("load directory");
    let names: Vec<_> = analyses.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["hybrid-multishock", "titanium-tank"]);
    assert_eq!(analyses[0].shield.obliquity_ceiling_deg(), Some(75.0));
}

#[test]
fn yield_in_mpa_reaches_the_model_in_ksi() {
    let analyses = load_analyses("configs/analyses.yaml").expect("load analyses");
    let Shield::Jsc(jsc) = &analyses[0].shield else {
        panic!("expected JSC Whipple");
    };
    let ksi = jsc.shield.wall.yield_ksi.expect("wall yield");
    assert!((ksi - 57.0).abs() < 0.01, "{ksi}");
}

#[test]
fn missing_file_is_an_io_error() {
    let err = load_analysis_records("configs/does-not-exist.yaml").expect_err("missing");
    assert!(matches!(err, ConfigError::Io(_)), "{err}");
}

#[test]
fn malformed_yaml_is_a_parse_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("broken.yaml");
    std::fs::write(&path, "- name: [unterminated").expect("write");
    let err = load_analysis_records(&path).expect_err("malformed");
    assert!(matches!(err, ConfigError::Parse(_)), "{err}");
}
