//! Ballistic limit curves: critical diameter sampled over a velocity grid.

use thiserror::Error;

use crate::error::{BleError, require_positive};
use crate::inputs::ImpactCondition;
use crate::Shield;

/// Linearly spaced impact velocities, end points included.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocityGrid {
    pub start_km_s: f64,
    pub end_km_s: f64,
    pub samples: usize,
}

impl Default for VelocityGrid {
    fn default() -> Self {
        Self {
            start_km_s: 0.1,
            end_km_s: 15.0,
            samples: 150,
        }
    }
}

impl VelocityGrid {
    pub fn validate(&self) -> Result<(), BleError> {
        require_positive("sweep start velocity", self.start_km_s)?;
        require_positive("sweep end velocity", self.end_km_s)?;
        if self.end_km_s < self.start_km_s {
            return Err(BleError::Domain {
                field: "sweep end velocity".to_string(),
                requirement: "at least the start velocity",
                value: self.end_km_s,
            });
        }
        if self.samples == 0 {
            return Err(BleError::Domain {
                field: "sweep samples".to_string(),
                requirement: "at least one",
                value: 0.0,
            });
        }
        Ok(())
    }

    pub fn velocities(&self) -> impl Iterator<Item = f64> + '_ {
        let step = if self.samples > 1 {
            (self.end_km_s - self.start_km_s) / (self.samples - 1) as f64
        } else {
            0.0
        };
        (0..self.samples).map(move |i| {
            if i + 1 == self.samples && self.samples > 1 {
                self.end_km_s
            } else {
                self.start_km_s + step * i as f64
            }
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePoint {
    pub velocity_km_s: f64,
    pub critical_diameter_cm: f64,
}

/// A sample of a sweep that could not be evaluated.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("sample {index} at {velocity_km_s} km/s failed: {source}")]
pub struct CurveError {
    pub index: usize,
    pub velocity_km_s: f64,
    #[source]
    pub source: BleError,
}

/// Lazily evaluate `shield` at each velocity, all other impact fields held fixed.
pub fn sweep<'a, I>(
    shield: &'a Shield,
    impact: &'a ImpactCondition,
    velocities: I,
) -> impl Iterator<Item = Result<CurvePoint, CurveError>> + 'a
where
    I: IntoIterator<Item = f64>,
    I::IntoIter: 'a,
{
    velocities
        .into_iter()
        .enumerate()
        .map(move |(index, velocity_km_s)| {
            shield
                .critical_diameter(&impact.at_velocity(velocity_km_s))
                .map(|critical_diameter_cm| CurvePoint {
                    velocity_km_s,
                    critical_diameter_cm,
                })
                .map_err(|source| CurveError {
                    index,
                    velocity_km_s,
                    source,
                })
        })
}

/// Evaluate the whole grid, stopping at the first failing sample.
pub fn generate_curve(
    shield: &Shield,
    impact: &ImpactCondition,
    grid: &VelocityGrid,
) -> Result<Vec<CurvePoint>, CurveError> {
    grid.validate().map_err(|source| CurveError {
        index: 0,
        velocity_km_s: grid.start_km_s,
        source,
    })?;
    let points = sweep(shield, impact, grid.velocities()).collect::<Result<Vec<_>, _>>()?;
    log::debug!(
        "{}: {} samples from {} to {} km/s",
        shield.name(),
        points.len(),
        grid.start_km_s,
        grid.end_km_s
    );
    Ok(points)
}
