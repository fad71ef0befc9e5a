pub mod jsc;
pub mod mesh;
pub mod mli;
pub mod multishock;
pub mod reimerdes;
pub mod sandwich;
pub mod single_wall;
pub mod stuffed;
pub mod transparent;
pub mod triple_wall;
pub mod whipple;

pub use jsc::{JscVariant, JscWhipple};
pub use mesh::MeshDoubleBumper;
pub use mli::{MliBlanket, MliKind};
pub use multishock::{MultiShock, MultiShockKind};
pub use reimerdes::Reimerdes;
pub use sandwich::{BumperClass, FoamCore, FoamSandwichPanel, HoneycombSandwichPanel};
pub use single_wall::{FailureMode, SingleWall, WallMaterial};
pub use stuffed::StuffedWhipple;
pub use transparent::{TransparentFailure, TransparentMaterial, TransparentWall};
pub use triple_wall::TripleWall;
pub use whipple::{ModifiedNno, NnoSizing, NnoWhipple, WhippleShield, nno_design};
