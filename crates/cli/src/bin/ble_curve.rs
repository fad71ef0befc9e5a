use anyhow::anyhow;
use blossum::ble::generate_curve;
use blossum::config::{Analysis, AnalysisRecord, SweepConfig, load_analysis_records};
use blossum::export::{curve as export_curve, sidecar};
use clap::Parser;
use std::path::{Path, PathBuf};

/// Sweep one shield over impact velocity and write its ballistic limit curve.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Ballistic limit curve generator (critical diameter vs. velocity)"
)]
struct Cli {
    /// Analysis file (YAML list or TOML record) or a directory of TOML records
    config: PathBuf,

    /// Analysis to run (case-insensitive); defaults to the first record
    #[arg(long)]
    name: Option<String>,

    /// Output CSV file (use '-' for stdout); defaults to <results-dir>/blc_data_<timestamp>.csv
    #[arg(long)]
    output: Option<PathBuf>,

    /// Directory for timestamped outputs
    #[arg(long, default_value = "results")]
    results_dir: PathBuf,

    /// First sweep velocity in km/s
    #[arg(long)]
    start: Option<f64>,

    /// Last sweep velocity in km/s
    #[arg(long)]
    end: Option<f64>,

    /// Number of sweep samples
    #[arg(long)]
    samples: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let records = load_analysis_records(&cli.config)?;
    let mut record = select(&records, cli.name.as_deref())?;
    if records.len() > 1 && cli.name.is_none() {
        log::warn!(
            "{} analyses in {}, running the first ({}); pass --name to pick another",
            records.len(),
            cli.config.display(),
            record.name
        );
    }
    apply_sweep_overrides(&mut record, &cli);

    let analysis = Analysis::try_from(&record)?;
    let transitions = analysis.shield.transition_velocities(&analysis.impact)?;
    let points = generate_curve(&analysis.shield, &analysis.impact, &analysis.grid)?;

    let stamp = chrono::Local::now();
    let stamp_str = stamp.format("%Y%m%d_%H%M%S").to_string();
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| cli.results_dir.join(format!("blc_data_{stamp_str}.csv")));

    let mut writer = export_curve::curve_writer(&output)?;
    let written = export_curve::write_curve(
        writer.as_mut(),
        &analysis.name,
        points.iter().map(|point| export_curve::Record {
            velocity_km_s: point.velocity_km_s,
            critical_diameter_cm: point.critical_diameter_cm,
        }),
    )?;

    let sidecar_path = if output == Path::new("-") {
        cli.results_dir.join(format!("config_data_{stamp_str}.json"))
    } else {
        sidecar::sidecar_path(&output)
    };
    let generated_at = stamp.format("%Y-%m-%dT%H:%M:%S").to_string();
    let curve_file = output.display().to_string();
    let meta = sidecar::Metadata {
        generated_at: &generated_at,
        model: analysis.shield.name(),
        obliquity_ceiling_deg: analysis.shield.obliquity_ceiling_deg(),
        transition_velocities_km_s: transitions,
        samples: written,
        curve_file: &curve_file,
    };
    sidecar::write_config_sidecar(&sidecar_path, &meta, &record)?;

    log::info!(
        "{} ({}): {written} samples written to {curve_file}",
        analysis.name,
        analysis.shield.name()
    );
    log::info!("configuration saved to {}", sidecar_path.display());
    Ok(())
}

fn select(records: &[AnalysisRecord], name: Option<&str>) -> anyhow::Result<AnalysisRecord> {
    match name {
        Some(name) => records
            .iter()
            .find(|r| r.name.eq_ignore_ascii_case(name))
            .cloned()
            .ok_or_else(|| anyhow!("Analysis '{}' not found in configuration", name)),
        None => records
            .first()
            .cloned()
            .ok_or_else(|| anyhow!("configuration contains no analyses")),
    }
}

fn apply_sweep_overrides(record: &mut AnalysisRecord, cli: &Cli) {
    let sweep = record.sweep.get_or_insert_with(SweepConfig::default);
    if let Some(start) = cli.start {
        sweep.start_km_s = start;
    }
    if let Some(end) = cli.end {
        sweep.end_km_s = end;
    }
    if let Some(samples) = cli.samples {
        sweep.samples = samples;
    }
}
