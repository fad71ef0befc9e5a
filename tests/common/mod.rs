#![allow(dead_code)]

use blossum::ble::{
    BumperClass, FailureMode, FoamCore, FoamSandwichPanel, HoneycombSandwichPanel,
    ImpactCondition, JscVariant, JscWhipple, Layer, MeshDoubleBumper, MliBlanket, MliKind,
    MliPlacement, ModifiedNno, MultiShock, MultiShockKind, NnoWhipple, Projectile, Reimerdes,
    Shield, SingleWall, StuffedWhipple, TransparentFailure, TransparentMaterial,
    TransparentWall, TripleWall, WallMaterial, WhippleShield,
};

pub fn projectile() -> Projectile {
    Projectile::new("Al2017-T4", 2.8)
}

pub fn impact(velocity_km_s: f64, angle_deg: f64) -> ImpactCondition {
    ImpactCondition::new(projectile(), velocity_km_s, angle_deg)
}

/// 0.2 cm bumper, 0.32 cm 40 ksi wall, 10 cm apart.
pub fn whipple() -> WhippleShield {
    WhippleShield::new(
        Layer::new("AA6061-T6", 0.2, 2.71),
        Layer::new("AA2024-T3", 0.32, 2.78).with_yield_ksi(40.0),
        10.0,
    )
}

pub fn regime_shields() -> Vec<Shield> {
    vec![
        NnoWhipple { shield: whipple() }.into(),
        NnoWhipple {
            shield: whipple().with_mli(MliPlacement::External {
                areal_density_g_cm2: 0.05,
            }),
        }
        .into(),
        NnoWhipple {
            shield: whipple().with_mli(MliPlacement::Internal {
                areal_density_g_cm2: 0.05,
                standoff_cm: 5.0,
            }),
        }
        .into(),
        ModifiedNno { shield: whipple() }.into(),
        JscWhipple::new(whipple(), JscVariant::Standard).into(),
        JscWhipple::new(whipple(), JscVariant::Modified).into(),
        JscWhipple::new(
            whipple().with_mli(MliPlacement::Internal {
                areal_density_g_cm2: 0.05,
                standoff_cm: 5.0,
            }),
            JscVariant::Standard,
        )
        .into(),
        Reimerdes { shield: whipple() }.into(),
        StuffedWhipple {
            bumper: Layer::new("AA6061-T6", 0.2, 2.71),
            wall: Layer::new("AA2219-T87", 0.48, 2.85).with_yield_ksi(57.0),
            standoff_cm: 11.4,
            kevlar_areal_density: 0.125,
            nextel_areal_density: 0.125,
            mli_areal_density: 0.05,
        }
        .into(),
        FoamSandwichPanel {
            bumper: Layer::new("AA7075-T6", 0.1, 2.81),
            wall: Layer::new("AA7075-T6", 0.1, 2.81).with_yield_ksi(73.0),
            core_thickness_cm: 2.0,
            core: FoamCore::Density(0.1),
            mli_areal_density: 0.0,
        }
        .into(),
        HoneycombSandwichPanel {
            bumper: Layer::new("CFRP", 0.15, 1.56),
            bumper_class: BumperClass::Cfrp,
            wall: Layer::new("CFRP", 0.15, 1.56),
            standoff_cm: 5.0,
            mli_areal_density: 0.0,
        }
        .into(),
        HoneycombSandwichPanel {
            bumper: Layer::new("AA5056", 0.08, 2.64),
            bumper_class: BumperClass::Metallic,
            wall: Layer::new("AA5056", 0.08, 2.64).with_yield_ksi(50.0),
            standoff_cm: 2.5,
            mli_areal_density: 0.03,
        }
        .into(),
        TripleWall {
            outer_bumper: Layer::new("AA6061-T6", 0.1, 2.71),
            outer_class: BumperClass::Metallic,
            inner_bumper: Layer::new("CFRP", 0.1, 1.56),
            inner_class: BumperClass::Cfrp,
            wall: Layer::new("AA2024-T3", 0.2, 2.78).with_yield_ksi(47.0),
            outer_standoff_cm: 5.0,
            inner_standoff_cm: 5.0,
            mli_areal_density: 0.0,
        }
        .into(),
        MeshDoubleBumper {
            mesh_areal_density: 0.05,
            bumper: Layer::new("AA6061-T6", 0.1, 2.71),
            kevlar_areal_density: 0.1,
            wall: Layer::new("AA2219-T87", 0.3, 2.85).with_yield_ksi(57.0),
            standoff_cm: 10.0,
        }
        .into(),
        MultiShock {
            kind: MultiShockKind::NextelWall,
            bumper_areal_density: 0.4,
            wall: Layer::from_areal_density("Nextel AF62", 0.3, 2.7),
            standoff_cm: 15.0,
        }
        .into(),
        MultiShock {
            kind: MultiShockKind::AluminumWall,
            bumper_areal_density: 0.4,
            wall: Layer::new("AA6061-T6", 0.16, 2.71).with_yield_ksi(40.0),
            standoff_cm: 15.0,
        }
        .into(),
        MultiShock {
            kind: MultiShockKind::Hybrid,
            bumper_areal_density: 0.4,
            wall: Layer::new("AA6061-T6", 0.16, 2.71).with_yield_ksi(40.0),
            standoff_cm: 15.0,
        }
        .into(),
        MliBlanket {
            kind: MliKind::Baseline,
            bumper_areal_density: 0.19,
            wall: Layer::new("AA6061-T6", 0.1, 2.71).with_yield_ksi(40.0),
            mli_areal_density: 0.19,
            total_thickness_cm: None,
        }
        .into(),
        MliBlanket {
            kind: MliKind::Enhanced,
            bumper_areal_density: 0.19,
            wall: Layer::new("AA6061-T6", 0.1, 2.71).with_yield_ksi(40.0),
            mli_areal_density: 0.19,
            total_thickness_cm: Some(1.5),
        }
        .into(),
    ]
}

pub fn closed_form_shields() -> Vec<Shield> {
    vec![
        SingleWall {
            material: WallMaterial::Aluminum,
            failure: FailureMode::Perforation,
            wall: Layer::new("AA6061-T6", 0.5, 2.71),
            brinell_hardness: Some(95.0),
            sound_speed_km_s: Some(5.1),
            mli_areal_density: 0.0,
        }
        .into(),
        SingleWall {
            material: WallMaterial::Titanium,
            failure: FailureMode::DetachedSpall,
            wall: Layer::new("Ti-6Al-4V", 0.3, 4.43),
            brinell_hardness: Some(334.0),
            sound_speed_km_s: Some(4.99),
            mli_areal_density: 0.05,
        }
        .into(),
        SingleWall {
            material: WallMaterial::Steel,
            failure: FailureMode::Perforation,
            wall: Layer::new("SS304", 0.2, 7.9),
            brinell_hardness: None,
            sound_speed_km_s: None,
            mli_areal_density: 0.0,
        }
        .into(),
        SingleWall {
            material: WallMaterial::Cfrp,
            failure: FailureMode::IncipientSpall,
            wall: Layer::new("CFRP", 0.4, 1.56),
            brinell_hardness: None,
            sound_speed_km_s: None,
            mli_areal_density: 0.05,
        }
        .into(),
        TransparentWall {
            material: TransparentMaterial::FusedSilica,
            failure: TransparentFailure::Perforation,
            thickness_cm: 1.2,
        }
        .into(),
        TransparentWall {
            material: TransparentMaterial::Quartz,
            failure: TransparentFailure::SurfaceDamage {
                max_damage_diameter_cm: 0.5,
            },
            thickness_cm: 1.0,
        }
        .into(),
        TransparentWall {
            material: TransparentMaterial::Polycarbonate,
            failure: TransparentFailure::DetachedSpall,
            thickness_cm: 0.8,
        }
        .into(),
    ]
}

pub fn all_shields() -> Vec<Shield> {
    let mut shields = regime_shields();
    shields.extend(closed_form_shields());
    shields
}

pub fn assert_close(actual: f64, expected: f64, rel: f64, what: &str) {
    let scale = expected.abs().max(1e-12);
    assert!(
        (actual - expected).abs() <= rel * scale,
        "{what}: expected {expected}, got {actual}"
    );
}
