use anyhow::anyhow;
use blossum::export::curve::VELOCITY_COLUMN;
use clap::Parser;
use csv::ReaderBuilder;
use plotters::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Render ballistic limit curves from CSV as a line chart"
)]
struct Cli {
    /// Curve CSV files written by ble_curve
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
    /// Output PNG; defaults to results/plot_<timestamp>.png
    #[arg(long)]
    output: Option<PathBuf>,
    #[arg(long, default_value_t = 1000)]
    width: u32,
    #[arg(long, default_value_t = 750)]
    height: u32,
    /// Upper diameter limit (cm); defaults to twice the mid-sweep diameter
    #[arg(long)]
    y_max: Option<f64>,
    #[arg(long, default_value = "Ballistic limit curve")]
    title: String,
}

#[derive(Debug, Clone)]
struct Series {
    label: String,
    points: Vec<(f64, f64)>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut series = Vec::new();
    for input in &cli.inputs {
        series.extend(read_series(input)?);
    }
    if series.iter().all(|s| s.points.is_empty()) {
        return Err(anyhow!("No finite curve samples in the provided CSV"));
    }

    let (v_min, v_max) = velocity_range(&series);
    let y_max = match cli.y_max {
        Some(limit) if limit > 0.0 => limit,
        Some(limit) => return Err(anyhow!("--y-max must be positive (got {limit})")),
        None => default_y_limit(&series),
    };

    let output = cli.output.clone().unwrap_or_else(|| {
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        PathBuf::from("results").join(format!("plot_{stamp}.png"))
    });
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let output_str = output
        .to_str()
        .ok_or_else(|| anyhow!("Output path contains invalid UTF-8"))?;

    let root = BitMapBackend::new(output_str, (cli.width, cli.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let font_family = select_font_family();
    let caption_font = FontDesc::new(font_family, 24.0, FontStyle::Bold);
    let label_font = FontDesc::new(font_family, 18.0, FontStyle::Normal);

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(cli.title.clone(), caption_font)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(v_min..v_max, 0.0..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Velocity (km/s)")
        .y_desc("Projectile diameter (cm)")
        .label_style(label_font.clone())
        .axis_desc_style(label_font.clone())
        .y_label_formatter(&|d| format!("{d:.2}"))
        .draw()?;

    for (index, curve) in series.iter().enumerate() {
        let color = Palette99::pick(index).to_rgba();
        chart
            .draw_series(LineSeries::new(
                curve.points.iter().map(|&(v, d)| (v, d.min(y_max))),
                ShapeStyle::from(&color).stroke_width(2),
            ))?
            .label(curve.label.clone())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], ShapeStyle::from(&color).stroke_width(2))
            });
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .label_font(label_font)
        .draw()?;

    root.present()?;
    log::info!("Ballistic limit plot saved to {}", output.display());
    Ok(())
}

fn select_font_family() -> FontFamily<'static> {
    if cfg!(target_os = "macos") {
        FontFamily::Name("Helvetica")
    } else if cfg!(target_os = "windows") {
        FontFamily::Name("Arial")
    } else {
        FontFamily::Name("DejaVu Sans")
    }
}

/// Every `dc_*` column of the file, paired with the velocity column.
fn read_series(path: &Path) -> anyhow::Result<Vec<Series>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let headers = rdr.headers()?.clone();
    let velocity_idx = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(VELOCITY_COLUMN))
        .ok_or_else(|| {
            anyhow!(
                "CSV {} missing '{}' column",
                path.display(),
                VELOCITY_COLUMN
            )
        })?;
    let mut series: Vec<(usize, Series)> = headers
        .iter()
        .enumerate()
        .filter(|(idx, h)| *idx != velocity_idx && h.starts_with("dc_"))
        .map(|(idx, h)| {
            let label = h
                .trim_start_matches("dc_")
                .trim_end_matches("_cm")
                .replace('_', " ");
            (
                idx,
                Series {
                    label,
                    points: Vec::new(),
                },
            )
        })
        .collect();
    if series.is_empty() {
        return Err(anyhow!("CSV {} has no dc_* columns", path.display()));
    }

    for rec in rdr.records() {
        let r = rec?;
        let velocity: f64 = r.get(velocity_idx).unwrap_or("").parse().unwrap_or(f64::NAN);
        if !velocity.is_finite() {
            continue;
        }
        for (idx, curve) in &mut series {
            let diameter: f64 = r.get(*idx).unwrap_or("").parse().unwrap_or(f64::NAN);
            if diameter.is_finite() {
                curve.points.push((velocity, diameter));
            }
        }
    }
    Ok(series.into_iter().map(|(_, s)| s).collect())
}

fn velocity_range(series: &[Series]) -> (f64, f64) {
    let (lo, hi) = series
        .iter()
        .flat_map(|s| s.points.iter().map(|&(v, _)| v))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if hi > lo { (lo, hi) } else { (lo - 0.5, lo + 0.5) }
}

/// Twice the largest mid-sweep diameter, falling back to the overall maximum.
fn default_y_limit(series: &[Series]) -> f64 {
    let mid_sweep = series
        .iter()
        .filter_map(|s| s.points.get(s.points.len() / 2))
        .map(|&(_, d)| 2.0 * d)
        .fold(0.0_f64, f64::max);
    if mid_sweep > 0.0 {
        return mid_sweep;
    }
    let largest = series
        .iter()
        .flat_map(|s| s.points.iter().map(|&(_, d)| d))
        .fold(0.0_f64, f64::max);
    if largest > 0.0 { largest * 1.1 } else { 1.0 }
}
