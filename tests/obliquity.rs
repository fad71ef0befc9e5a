mod common;

use common::{all_shields, assert_close, impact};

#[test]
fn angles_beyond_the_ceiling_evaluate_at_the_ceiling() {
    let mut checked = 0;
    for shield in all_shields() {
        let Some(ceiling) = shield.obliquity_ceiling_deg() else {
            continue;
        };
        let beyond = (ceiling + 10.0).min(89.0);
        for velocity in [2.0, 5.0, 10.0, 14.0] {
            let at = shield
                .critical_diameter(&impact(velocity, ceiling))
                .expect("at ceiling");
            let past = shield
                .critical_diameter(&impact(velocity, beyond))
                .expect("beyond ceiling");
            assert_close(
                past,
                at,
                1e-12,
                &format!("{} at {velocity} km/s", shield.name()),
            );
        }
        checked += 1;
    }
    assert!(checked >= 8, "only {checked} shields have a ceiling");
}

#[test]
fn closed_form_walls_have_no_ceiling() {
    for shield in common::closed_form_shields() {
        assert_eq!(shield.obliquity_ceiling_deg(), None, "{}", shield.name());
        assert!(shield.regime_model().is_none());
    }
}

#[test]
fn oblique_impacts_raise_the_normal_incidence_limit() {
    // Lower normal velocity means a larger projectile is needed to perforate.
    let shield = common::closed_form_shields().remove(0);
    let normal = shield.critical_diameter(&impact(7.0, 0.0)).expect("normal");
    let oblique = shield.critical_diameter(&impact(7.0, 45.0)).expect("oblique");
    assert!(oblique > normal);
}
