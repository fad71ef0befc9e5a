//! Core units, reference constants, and shared primitives for the BLOSSUM workspace.
//!
//! Every ballistic limit equation in the workspace is dimensionally keyed to the
//! same unit system: centimetres, g/cm³, g/cm², km/s, degrees, and ksi.

/// Reference material constants shared by several ballistic limit equations.
pub mod constants {
    /// Density of the AA2024-T81 reference aluminium (g/cm³).
    pub const REFERENCE_DENSITY_G_CM3: f64 = 2.78;
    /// Yield strength of the AA2024-T81 reference aluminium (ksi).
    pub const REFERENCE_YIELD_KSI: f64 = 59.5;
    /// Multiplier converting an external MLI areal density into equivalent bumper thickness.
    pub const EXTERNAL_MLI_FACTOR: f64 = 3.0;
    /// Multiplier applied to MLI placed inside the standoff (offset term).
    pub const INTERNAL_MLI_FACTOR: f64 = 1.4;
    /// Megapascal to kilopound-per-square-inch factor.
    pub const KSI_PER_MPA: f64 = 0.145_038;
}

/// Unit conversion helpers used at the I/O boundary.
pub mod units {
    use super::constants::KSI_PER_MPA;

    /// Convert megapascals to ksi.
    #[inline]
    pub fn mpa_to_ksi(v: f64) -> f64 {
        v * KSI_PER_MPA
    }

    /// Convert ksi to megapascals.
    #[inline]
    pub fn ksi_to_mpa(v: f64) -> f64 {
        v / KSI_PER_MPA
    }

    /// Areal density (g/cm²) of a uniform layer.
    #[inline]
    pub fn areal_density(thickness_cm: f64, density_g_cm3: f64) -> f64 {
        thickness_cm * density_g_cm3
    }

    /// Thickness (cm) of a uniform layer with the given areal density.
    #[inline]
    pub fn thickness(areal_density_g_cm2: f64, density_g_cm3: f64) -> f64 {
        areal_density_g_cm2 / density_g_cm3
    }
}

/// Impact geometry helpers.
pub mod geometry {
    /// Obliquity of an impact after applying a model's angle ceiling.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Obliquity {
        /// Angle actually used by the model (degrees from the surface normal).
        pub degrees: f64,
        pub radians: f64,
        pub cos: f64,
    }

    impl Obliquity {
        /// Build an obliquity from an angle in degrees, clamped to `ceiling_deg` when given.
        pub fn clamped(angle_deg: f64, ceiling_deg: Option<f64>) -> Self {
            let degrees = match ceiling_deg {
                Some(limit) if angle_deg > limit => limit,
                _ => angle_deg,
            };
            let radians = degrees.to_radians();
            Self {
                degrees,
                radians,
                cos: radians.cos(),
            }
        }

        /// Power of the obliquity cosine, the most common term in every equation.
        #[inline]
        pub fn cos_pow(&self, exponent: f64) -> f64 {
            self.cos.powf(exponent)
        }

        /// Normal component of an impact velocity.
        #[inline]
        pub fn normal(&self, velocity_km_s: f64) -> f64 {
            velocity_km_s * self.cos
        }
    }
}

#[cfg(test)]
mod tests {
    use super::geometry::Obliquity;
    use super::units;

    #[test]
    fn yield_round_trip() {
        let mpa = 276.0;
        let back = units::ksi_to_mpa(units::mpa_to_ksi(mpa));
        assert!((back - mpa).abs() < 1e-9);
    }

    #[test]
    fn clamp_only_above_ceiling() {
        let ob = Obliquity::clamped(80.0, Some(65.0));
        assert_eq!(ob.degrees, 65.0);
        let ob = Obliquity::clamped(30.0, Some(65.0));
        assert_eq!(ob.degrees, 30.0);
        let ob = Obliquity::clamped(80.0, None);
        assert_eq!(ob.degrees, 80.0);
    }
}
