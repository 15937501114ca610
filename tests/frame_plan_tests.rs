//! Frame Plan Tests
//!
//! The pass sequence is a fixed contract: scene geometry first, then
//! bloom extraction, the two blur legs, and finally the composite.

use glaze::render::passes::{FramePlan, PassKind};

#[test]
fn standard_plan_order_is_fixed() {
    let plan = FramePlan::standard();
    assert_eq!(
        plan.passes(),
        &[
            PassKind::Scene,
            PassKind::PreEffects,
            PassKind::BlurHorizontal,
            PassKind::BlurVertical,
            PassKind::PostComposite,
        ]
    );
}

#[test]
fn scene_always_precedes_post_stages() {
    let plan = FramePlan::standard();
    let position = |kind| plan.passes().iter().position(|p| *p == kind).unwrap();
    assert!(position(PassKind::Scene) < position(PassKind::PreEffects));
    assert!(position(PassKind::PreEffects) < position(PassKind::BlurHorizontal));
    assert!(position(PassKind::BlurHorizontal) < position(PassKind::BlurVertical));
    assert!(position(PassKind::BlurVertical) < position(PassKind::PostComposite));
}

#[test]
fn default_plan_is_the_standard_plan() {
    assert_eq!(FramePlan::default(), FramePlan::standard());
}
