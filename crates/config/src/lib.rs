//! Analysis files for the ballistic limit tools.
//!
//! A record names one shield, the projectile and obliquity it is hit with, and the
//! velocity sweep to evaluate. Records are read from YAML (a list) or TOML (one per
//! file, or a directory of them). Physical inputs are written in the units engineers
//! quote them in; yield strength in MPa is converted to ksi here and nowhere else.

use std::fs::File;
use std::path::{Path, PathBuf};

use blossum_ble::{
    BleError, BumperClass, FailureMode, FoamCore, FoamSandwichPanel, HoneycombSandwichPanel,
    ImpactCondition, JscVariant, JscWhipple, Layer, MeshDoubleBumper, MliBlanket, MliKind,
    MliPlacement, ModifiedNno, MultiShock, MultiShockKind, NnoWhipple, Projectile, Reimerdes,
    Shield, SingleWall, StuffedWhipple, TransparentFailure, TransparentMaterial,
    TransparentWall, TripleWall, VelocityGrid, WallMaterial, WhippleShield,
};
use blossum_core::units;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Relative disagreement tolerated between a layer's thickness and areal density.
const AREAL_DENSITY_TOLERANCE: f64 = 1e-3;

/// One analysis as written in a configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub name: String,
    pub angle_deg: f64,
    pub projectile: ProjectileConfig,
    #[serde(default)]
    pub sweep: Option<SweepConfig>,
    pub shield: ShieldConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileConfig {
    #[serde(default = "default_projectile_material")]
    pub material: String,
    pub density_g_cm3: f64,
}

fn default_projectile_material() -> String {
    "aluminium".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    #[serde(default = "default_start")]
    pub start_km_s: f64,
    #[serde(default = "default_end")]
    pub end_km_s: f64,
    #[serde(default = "default_samples")]
    pub samples: usize,
}

fn default_start() -> f64 {
    VelocityGrid::default().start_km_s
}

fn default_end() -> f64 {
    VelocityGrid::default().end_km_s
}

fn default_samples() -> usize {
    VelocityGrid::default().samples
}

impl Default for SweepConfig {
    fn default() -> Self {
        let grid = VelocityGrid::default();
        Self {
            start_km_s: grid.start_km_s,
            end_km_s: grid.end_km_s,
            samples: grid.samples,
        }
    }
}

impl From<SweepConfig> for VelocityGrid {
    fn from(sweep: SweepConfig) -> Self {
        VelocityGrid {
            start_km_s: sweep.start_km_s,
            end_km_s: sweep.end_km_s,
            samples: sweep.samples,
        }
    }
}

/// A plate given by thickness, areal density, or both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerConfig {
    #[serde(default)]
    pub material: String,
    #[serde(default)]
    pub thickness_cm: Option<f64>,
    #[serde(default)]
    pub areal_density_g_cm2: Option<f64>,
    pub density_g_cm3: f64,
    #[serde(default)]
    pub yield_mpa: Option<f64>,
}

impl LayerConfig {
    fn to_layer(&self, role: &str) -> Result<Layer, String> {
        let thickness_cm = match (self.thickness_cm, self.areal_density_g_cm2) {
            (Some(thickness), Some(areal_density)) => {
                let derived = units::areal_density(thickness, self.density_g_cm3);
                if (derived - areal_density).abs()
                    > AREAL_DENSITY_TOLERANCE * areal_density.abs().max(f64::MIN_POSITIVE)
                {
                    return Err(format!(
                        "{role} areal density {areal_density} g/cm² disagrees with thickness × density = {derived} g/cm²"
                    ));
                }
                thickness
            }
            (Some(thickness), None) => thickness,
            (None, Some(areal_density)) => units::thickness(areal_density, self.density_g_cm3),
            (None, None) => {
                return Err(format!(
                    "{role} needs thickness_cm or areal_density_g_cm2"
                ));
            }
        };
        let layer = Layer::new(self.material.clone(), thickness_cm, self.density_g_cm3);
        Ok(match self.yield_mpa {
            Some(mpa) => layer.with_yield_ksi(units::mpa_to_ksi(mpa)),
            None => layer,
        })
    }
}

/// Blanket position for the Whipple family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "placement")]
pub enum MliConfig {
    #[serde(rename = "external")]
    External { areal_density_g_cm2: f64 },
    #[serde(rename = "internal")]
    Internal {
        areal_density_g_cm2: f64,
        standoff_cm: f64,
    },
    #[serde(other)]
    Unsupported,
}

impl MliConfig {
    fn resolve(&self) -> Result<MliPlacement, String> {
        match *self {
            MliConfig::External {
                areal_density_g_cm2,
            } => Ok(MliPlacement::External {
                areal_density_g_cm2,
            }),
            MliConfig::Internal {
                areal_density_g_cm2,
                standoff_cm,
            } => Ok(MliPlacement::Internal {
                areal_density_g_cm2,
                standoff_cm,
            }),
            MliConfig::Unsupported => Err("unsupported MLI placement".to_string()),
        }
    }
}

macro_rules! categorical {
    ($(#[$meta:meta])* $name:ident => $target:ty, $label:literal { $($variant:ident => $mapped:expr),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant,)*
            #[serde(other)]
            Unsupported,
        }

        impl $name {
            fn resolve(self) -> Result<$target, String> {
                match self {
                    $(Self::$variant => Ok($mapped),)*
                    Self::Unsupported => Err(format!("unsupported {}", $label)),
                }
            }
        }
    };
}

categorical!(BumperClassConfig => BumperClass, "bumper class" {
    Cfrp => BumperClass::Cfrp,
    Other => BumperClass::Other,
    Metallic => BumperClass::Metallic,
});

categorical!(MultiShockKindConfig => MultiShockKind, "multi-shock configuration" {
    NextelWall => MultiShockKind::NextelWall,
    KevlarWall => MultiShockKind::KevlarWall,
    AluminumWall => MultiShockKind::AluminumWall,
    Hybrid => MultiShockKind::Hybrid,
});

categorical!(MliKindConfig => MliKind, "MLI blanket" {
    Baseline => MliKind::Baseline,
    Toughened => MliKind::Toughened,
    Enhanced => MliKind::Enhanced,
});

categorical!(WallMaterialConfig => WallMaterial, "wall material" {
    Titanium => WallMaterial::Titanium,
    Steel => WallMaterial::Steel,
    Aluminum => WallMaterial::Aluminum,
    Cfrp => WallMaterial::Cfrp,
    Fibreglass => WallMaterial::Fibreglass,
});

categorical!(FailureModeConfig => FailureMode, "failure mode" {
    Perforation => FailureMode::Perforation,
    DetachedSpall => FailureMode::DetachedSpall,
    IncipientSpall => FailureMode::IncipientSpall,
});

categorical!(TransparentMaterialConfig => TransparentMaterial, "window material" {
    FusedSilica => TransparentMaterial::FusedSilica,
    Quartz => TransparentMaterial::Quartz,
    Polycarbonate => TransparentMaterial::Polycarbonate,
});

/// Window failure; `damage` also needs `max_damage_diameter_cm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransparentFailureConfig {
    Perforation,
    DetachedSpall,
    IncipientSpall,
    Damage,
    #[serde(other)]
    Unsupported,
}

fn default_perforation() -> FailureModeConfig {
    FailureModeConfig::Perforation
}

fn default_window_perforation() -> TransparentFailureConfig {
    TransparentFailureConfig::Perforation
}

/// Bumper, rear wall and spacing shared by the Whipple family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhippleConfig {
    pub bumper: LayerConfig,
    pub wall: LayerConfig,
    pub standoff_cm: f64,
    #[serde(default)]
    pub mli: Option<MliConfig>,
}

impl WhippleConfig {
    fn to_shield(&self) -> Result<WhippleShield, String> {
        let mli = match &self.mli {
            Some(mli) => mli.resolve()?,
            None => MliPlacement::None,
        };
        Ok(WhippleShield::new(
            self.bumper.to_layer("bumper")?,
            self.wall.to_layer("wall")?,
            self.standoff_cm,
        )
        .with_mli(mli))
    }
}

/// Foam core description; the first one given wins, in field order.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FoamCoreConfig {
    #[serde(default)]
    pub panel_mass: Option<f64>,
    #[serde(default)]
    pub panel_areal_density_g_cm2: Option<f64>,
    #[serde(default)]
    pub density_g_cm3: Option<f64>,
    #[serde(default)]
    pub areal_density_g_cm2: Option<f64>,
}

impl FoamCoreConfig {
    fn resolve(&self) -> Result<FoamCore, String> {
        self.panel_mass
            .map(FoamCore::PanelMass)
            .or(self.panel_areal_density_g_cm2.map(FoamCore::PanelArealDensity))
            .or(self.density_g_cm3.map(FoamCore::Density))
            .or(self.areal_density_g_cm2.map(FoamCore::ArealDensity))
            .ok_or_else(|| {
                "foam core needs one of panel_mass, panel_areal_density_g_cm2, density_g_cm3, areal_density_g_cm2"
                    .to_string()
            })
    }
}

/// Shield description, selected by its `model` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model")]
pub enum ShieldConfig {
    #[serde(rename = "nno")]
    Nno(WhippleConfig),
    #[serde(rename = "modified_nno")]
    ModifiedNno(WhippleConfig),
    #[serde(rename = "jsc")]
    Jsc(WhippleConfig),
    #[serde(rename = "jsc_modified")]
    JscModified(WhippleConfig),
    #[serde(rename = "reimerdes")]
    Reimerdes(WhippleConfig),
    #[serde(rename = "stuffed_whipple")]
    Stuffed {
        bumper: LayerConfig,
        wall: LayerConfig,
        standoff_cm: f64,
        kevlar_areal_density_g_cm2: f64,
        nextel_areal_density_g_cm2: f64,
        #[serde(default)]
        mli_areal_density_g_cm2: f64,
    },
    #[serde(rename = "foam_sandwich")]
    FoamSandwich {
        bumper: LayerConfig,
        wall: LayerConfig,
        core_thickness_cm: f64,
        core: FoamCoreConfig,
        #[serde(default)]
        mli_areal_density_g_cm2: f64,
    },
    #[serde(rename = "honeycomb_sandwich")]
    HoneycombSandwich {
        bumper: LayerConfig,
        bumper_class: BumperClassConfig,
        wall: LayerConfig,
        standoff_cm: f64,
        #[serde(default)]
        mli_areal_density_g_cm2: f64,
    },
    #[serde(rename = "triple_wall")]
    TripleWall {
        outer_bumper: LayerConfig,
        outer_class: BumperClassConfig,
        inner_bumper: LayerConfig,
        inner_class: BumperClassConfig,
        wall: LayerConfig,
        outer_standoff_cm: f64,
        inner_standoff_cm: f64,
        #[serde(default)]
        mli_areal_density_g_cm2: f64,
    },
    #[serde(rename = "mesh_double_bumper")]
    Mesh {
        mesh_areal_density_g_cm2: f64,
        bumper: LayerConfig,
        kevlar_areal_density_g_cm2: f64,
        wall: LayerConfig,
        standoff_cm: f64,
    },
    #[serde(rename = "multi_shock")]
    MultiShock {
        kind: MultiShockKindConfig,
        bumper_areal_density_g_cm2: f64,
        wall: LayerConfig,
        standoff_cm: f64,
    },
    #[serde(rename = "mli")]
    Mli {
        kind: MliKindConfig,
        bumper_areal_density_g_cm2: f64,
        wall: LayerConfig,
        mli_areal_density_g_cm2: f64,
        #[serde(default)]
        total_thickness_cm: Option<f64>,
    },
    #[serde(rename = "single_wall")]
    SingleWall {
        material: WallMaterialConfig,
        #[serde(default = "default_perforation")]
        failure: FailureModeConfig,
        wall: LayerConfig,
        #[serde(default)]
        brinell_hardness: Option<f64>,
        #[serde(default)]
        sound_speed_km_s: Option<f64>,
        #[serde(default)]
        mli_areal_density_g_cm2: f64,
    },
    #[serde(rename = "transparent")]
    Transparent {
        material: TransparentMaterialConfig,
        #[serde(default = "default_window_perforation")]
        failure: TransparentFailureConfig,
        thickness_cm: f64,
        #[serde(default)]
        max_damage_diameter_cm: Option<f64>,
    },
    #[serde(other)]
    Unsupported,
}

impl ShieldConfig {
    fn to_shield(&self) -> Result<Shield, String> {
        Ok(match self {
            ShieldConfig::Nno(whipple) => NnoWhipple {
                shield: whipple.to_shield()?,
            }
            .into(),
            ShieldConfig::ModifiedNno(whipple) => ModifiedNno {
                shield: whipple.to_shield()?,
            }
            .into(),
            ShieldConfig::Jsc(whipple) => {
                JscWhipple::new(whipple.to_shield()?, JscVariant::Standard).into()
            }
            ShieldConfig::JscModified(whipple) => {
                JscWhipple::new(whipple.to_shield()?, JscVariant::Modified).into()
            }
            ShieldConfig::Reimerdes(whipple) => Reimerdes {
                shield: whipple.to_shield()?,
            }
            .into(),
            ShieldConfig::Stuffed {
                bumper,
                wall,
                standoff_cm,
                kevlar_areal_density_g_cm2,
                nextel_areal_density_g_cm2,
                mli_areal_density_g_cm2,
            } => StuffedWhipple {
                bumper: bumper.to_layer("bumper")?,
                wall: wall.to_layer("wall")?,
                standoff_cm: *standoff_cm,
                kevlar_areal_density: *kevlar_areal_density_g_cm2,
                nextel_areal_density: *nextel_areal_density_g_cm2,
                mli_areal_density: *mli_areal_density_g_cm2,
            }
            .into(),
            ShieldConfig::FoamSandwich {
                bumper,
                wall,
                core_thickness_cm,
                core,
                mli_areal_density_g_cm2,
            } => FoamSandwichPanel {
                bumper: bumper.to_layer("front facesheet")?,
                wall: wall.to_layer("rear facesheet")?,
                core_thickness_cm: *core_thickness_cm,
                core: core.resolve()?,
                mli_areal_density: *mli_areal_density_g_cm2,
            }
            .into(),
            ShieldConfig::HoneycombSandwich {
                bumper,
                bumper_class,
                wall,
                standoff_cm,
                mli_areal_density_g_cm2,
            } => HoneycombSandwichPanel {
                bumper: bumper.to_layer("front facesheet")?,
                bumper_class: bumper_class.resolve()?,
                wall: wall.to_layer("rear facesheet")?,
                standoff_cm: *standoff_cm,
                mli_areal_density: *mli_areal_density_g_cm2,
            }
            .into(),
            ShieldConfig::TripleWall {
                outer_bumper,
                outer_class,
                inner_bumper,
                inner_class,
                wall,
                outer_standoff_cm,
                inner_standoff_cm,
                mli_areal_density_g_cm2,
            } => TripleWall {
                outer_bumper: outer_bumper.to_layer("outer bumper")?,
                outer_class: outer_class.resolve()?,
                inner_bumper: inner_bumper.to_layer("inner bumper")?,
                inner_class: inner_class.resolve()?,
                wall: wall.to_layer("wall")?,
                outer_standoff_cm: *outer_standoff_cm,
                inner_standoff_cm: *inner_standoff_cm,
                mli_areal_density: *mli_areal_density_g_cm2,
            }
            .into(),
            ShieldConfig::Mesh {
                mesh_areal_density_g_cm2,
                bumper,
                kevlar_areal_density_g_cm2,
                wall,
                standoff_cm,
            } => MeshDoubleBumper {
                mesh_areal_density: *mesh_areal_density_g_cm2,
                bumper: bumper.to_layer("bumper")?,
                kevlar_areal_density: *kevlar_areal_density_g_cm2,
                wall: wall.to_layer("wall")?,
                standoff_cm: *standoff_cm,
            }
            .into(),
            ShieldConfig::MultiShock {
                kind,
                bumper_areal_density_g_cm2,
                wall,
                standoff_cm,
            } => MultiShock {
                kind: kind.resolve()?,
                bumper_areal_density: *bumper_areal_density_g_cm2,
                wall: wall.to_layer("wall")?,
                standoff_cm: *standoff_cm,
            }
            .into(),
            ShieldConfig::Mli {
                kind,
                bumper_areal_density_g_cm2,
                wall,
                mli_areal_density_g_cm2,
                total_thickness_cm,
            } => MliBlanket {
                kind: kind.resolve()?,
                bumper_areal_density: *bumper_areal_density_g_cm2,
                wall: wall.to_layer("wall")?,
                mli_areal_density: *mli_areal_density_g_cm2,
                total_thickness_cm: *total_thickness_cm,
            }
            .into(),
            ShieldConfig::SingleWall {
                material,
                failure,
                wall,
                brinell_hardness,
                sound_speed_km_s,
                mli_areal_density_g_cm2,
            } => SingleWall {
                material: material.resolve()?,
                failure: failure.resolve()?,
                wall: wall.to_layer("wall")?,
                brinell_hardness: *brinell_hardness,
                sound_speed_km_s: *sound_speed_km_s,
                mli_areal_density: *mli_areal_density_g_cm2,
            }
            .into(),
            ShieldConfig::Transparent {
                material,
                failure,
                thickness_cm,
                max_damage_diameter_cm,
            } => {
                let failure = match failure {
                    TransparentFailureConfig::Perforation => TransparentFailure::Perforation,
                    TransparentFailureConfig::DetachedSpall => TransparentFailure::DetachedSpall,
                    TransparentFailureConfig::IncipientSpall => TransparentFailure::IncipientSpall,
                    TransparentFailureConfig::Damage => TransparentFailure::SurfaceDamage {
                        max_damage_diameter_cm: max_damage_diameter_cm.ok_or_else(|| {
                            "damage failure needs max_damage_diameter_cm".to_string()
                        })?,
                    },
                    TransparentFailureConfig::Unsupported => {
                        return Err("unsupported failure mode".to_string());
                    }
                };
                TransparentWall {
                    material: material.resolve()?,
                    failure,
                    thickness_cm: *thickness_cm,
                }
                .into()
            }
            ShieldConfig::Unsupported => return Err("unsupported shield model".to_string()),
        })
    }
}

/// A record resolved into model inputs, ready to sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub name: String,
    pub shield: Shield,
    /// Velocity is the sweep start; curves replace it per sample.
    pub impact: ImpactCondition,
    pub grid: VelocityGrid,
}

impl TryFrom<&AnalysisRecord> for Analysis {
    type Error = ConfigError;

    fn try_from(record: &AnalysisRecord) -> Result<Self, Self::Error> {
        let invalid = |reason: String| ConfigError::Invalid {
            record: record.name.clone(),
            reason,
        };
        let rejected = |source: BleError| ConfigError::Model {
            record: record.name.clone(),
            source,
        };

        let shield = record.shield.to_shield().map_err(invalid)?;
        let grid: VelocityGrid = record.sweep.unwrap_or_default().into();
        let projectile = Projectile::new(
            record.projectile.material.clone(),
            record.projectile.density_g_cm3,
        );
        let impact = ImpactCondition::new(projectile, grid.start_km_s, record.angle_deg);

        shield.validate().map_err(rejected)?;
        impact.validate().map_err(rejected)?;
        grid.validate().map_err(rejected)?;

        if let Some(ceiling) = shield.obliquity_ceiling_deg() {
            if record.angle_deg > ceiling {
                log::warn!(
                    "{}: angle {}° exceeds the {} ceiling, evaluating at {ceiling}°",
                    record.name,
                    record.angle_deg,
                    shield.name()
                );
            }
        }

        Ok(Analysis {
            name: record.name.clone(),
            shield,
            impact,
            grid,
        })
    }
}

/// Errors that can occur while loading analysis files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("record `{record}`: {reason}")]
    Invalid { record: String, reason: String },
    #[error("record `{record}`: {source}")]
    Model {
        record: String,
        #[source]
        source: BleError,
    },
}

/// Load analysis records without resolving them.
pub fn load_analysis_records<P: AsRef<Path>>(path: P) -> Result<Vec<AnalysisRecord>, ConfigError> {
    let records: Vec<AnalysisRecord> = load_records(path)?;
    log::debug!("loaded {} analysis record(s)", records.len());
    Ok(records)
}

/// Load and resolve every analysis in a file or directory.
pub fn load_analyses<P: AsRef<Path>>(path: P) -> Result<Vec<Analysis>, ConfigError> {
    load_analysis_records(path)?
        .iter()
        .map(Analysis::try_from)
        .collect()
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map(|ext| ext == "toml").unwrap_or(false))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}
