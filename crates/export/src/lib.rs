//! Export helpers for ballistic limit curves and their configuration sidecars.

use std::fs;
use std::io;
use std::path::Path;

fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

pub mod curve {
    use std::fs::File;
    use std::io::{self, BufWriter, Write};
    use std::path::Path;

    /// First column of every curve file.
    pub const VELOCITY_COLUMN: &str = "velocity_km_s";

    /// Destination of a curve CSV: stdout for `-`, otherwise the file, with its
    /// results directory created on demand.
    pub fn curve_writer(path: &Path) -> io::Result<Box<dyn Write>> {
        let sink: Box<dyn Write> = if path == Path::new("-") {
            Box::new(io::stdout())
        } else {
            super::ensure_parent_dir(path)?;
            Box::new(File::create(path)?)
        };
        Ok(Box::new(BufWriter::new(sink)))
    }

    /// Critical diameter column for an analysis, e.g. `dc_iss_module_cm`.
    pub fn column_name(analysis: &str) -> String {
        let slug: String = analysis
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
            .collect();
        format!("dc_{}_cm", slug.trim_matches('_'))
    }

    pub fn write_header(writer: &mut dyn Write, analysis: &str) -> io::Result<()> {
        writeln!(writer, "{},{}", VELOCITY_COLUMN, column_name(analysis))
    }

    /// One sampled point of a curve.
    #[derive(Debug, Clone, Copy)]
    pub struct Record {
        pub velocity_km_s: f64,
        pub critical_diameter_cm: f64,
    }

    impl Record {
        /// Serialize the record to CSV, matching the header ordering.
        pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
            writeln!(
                writer,
                "{:.6},{:.8}",
                self.velocity_km_s, self.critical_diameter_cm
            )
        }
    }

    /// Header plus every record, flushed at the end.
    pub fn write_curve(
        writer: &mut dyn Write,
        analysis: &str,
        records: impl IntoIterator<Item = Record>,
    ) -> io::Result<usize> {
        write_header(writer, analysis)?;
        let mut count = 0;
        for record in records {
            record.write_to(writer)?;
            count += 1;
        }
        writer.flush()?;
        Ok(count)
    }
}

pub mod sidecar {
    use serde::Serialize;
    use serde_json::to_writer_pretty;
    use std::fs::File;
    use std::io;
    use std::path::{Path, PathBuf};

    /// What was evaluated, alongside the configuration it came from.
    #[derive(Debug)]
    pub struct Metadata<'a> {
        pub generated_at: &'a str,
        pub model: &'a str,
        pub obliquity_ceiling_deg: Option<f64>,
        /// Low and high transition velocities (km/s) at the sweep's obliquity.
        pub transition_velocities_km_s: Option<(f64, f64)>,
        pub samples: usize,
        pub curve_file: &'a str,
    }

    #[derive(Serialize)]
    struct ConfigSidecar<'a, T: Serialize> {
        generated_at: &'a str,
        model: &'a str,
        obliquity_ceiling_deg: Option<f64>,
        low_velocity_transition_km_s: Option<f64>,
        hypervelocity_transition_km_s: Option<f64>,
        samples: usize,
        curve_file: &'a str,
        analysis: &'a T,
    }

    /// `results/blc_data_<stamp>.csv` pairs with `results/config_data_<stamp>.json`.
    pub fn sidecar_path(curve: &Path) -> PathBuf {
        let parent = curve.parent().unwrap_or_else(|| Path::new("."));
        let stem = curve
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("curve");
        let name = match stem.strip_prefix("blc_data_") {
            Some(stamp) => format!("config_data_{stamp}.json"),
            None => format!("{stem}_config.json"),
        };
        parent.join(name)
    }

    /// Write the JSON sidecar describing a curve run.
    pub fn write_config_sidecar<T: Serialize>(
        path: &Path,
        meta: &Metadata<'_>,
        analysis: &T,
    ) -> io::Result<()> {
        super::ensure_parent_dir(path)?;
        let sidecar = ConfigSidecar {
            generated_at: meta.generated_at,
            model: meta.model,
            obliquity_ceiling_deg: meta.obliquity_ceiling_deg,
            low_velocity_transition_km_s: meta.transition_velocities_km_s.map(|(low, _)| low),
            hypervelocity_transition_km_s: meta.transition_velocities_km_s.map(|(_, high)| high),
            samples: meta.samples,
            curve_file: meta.curve_file,
            analysis,
        };
        to_writer_pretty(File::create(path)?, &sidecar)?;
        Ok(())
    }
}
