use blossum_solver::SolverError;
use thiserror::Error;

/// Failure of a single ballistic limit evaluation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BleError {
    #[error("{field} must be {requirement} (got {value})")]
    Domain {
        field: String,
        requirement: &'static str,
        value: f64,
    },
    #[error("missing required input: {0}")]
    MissingField(String),
    #[error("unsupported {category}: {value}")]
    Unsupported {
        category: &'static str,
        value: String,
    },
    #[error("degenerate shatter regime: both transition velocities equal {0} km/s")]
    DegenerateRegime(f64),
    #[error("solved low-velocity transition {low_km_s} km/s lies above the hypervelocity transition {high_km_s} km/s")]
    InvertedRegime { low_km_s: f64, high_km_s: f64 },
    #[error("{model} produced a non-physical critical diameter ({value}) at {velocity_km_s} km/s")]
    NonPhysical {
        model: &'static str,
        velocity_km_s: f64,
        value: f64,
    },
    #[error("numerical convergence failure while solving the {stage}: {source}")]
    Convergence {
        stage: &'static str,
        #[source]
        source: SolverError,
    },
}

impl BleError {
    pub(crate) fn convergence(stage: &'static str) -> impl FnOnce(SolverError) -> Self {
        move |source| Self::Convergence { stage, source }
    }
}

pub(crate) fn require_positive(field: impl Into<String>, value: f64) -> Result<f64, BleError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(BleError::Domain {
            field: field.into(),
            requirement: "positive and finite",
            value,
        })
    }
}

pub(crate) fn require_non_negative(field: impl Into<String>, value: f64) -> Result<f64, BleError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(BleError::Domain {
            field: field.into(),
            requirement: "non-negative and finite",
            value,
        })
    }
}
