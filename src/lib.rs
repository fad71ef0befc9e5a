//! Ballistic limit equations for spacecraft shielding against micrometeoroids and
//! orbital debris.
//!
//! The physics lives in the member crates; this crate ties them together so that
//! front-ends (the `ble_curve` and `ble_plot` binaries, tests) share one entry point.

pub use blossum_ble as ble;
pub use blossum_config as config;
pub use blossum_core::{constants, geometry, units};
pub use blossum_export as export;
pub use blossum_solver as solver;

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
