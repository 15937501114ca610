//! Fade & Camera Tests
//!
//! Tests for:
//! - Fade: accumulation, boundary reporting, clamping, direct set
//! - view_matrix_from_camera_world: basis transpose, translation carry,
//!   identity round trip
//! - projection_matrix: aspect handling

use glam::{Mat4, Vec3, Vec4};

use glaze::engine::Fade;
use glaze::scene::camera::{projection_matrix, view_matrix_from_camera_world, Camera};

const EPSILON: f32 = 1e-4;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn mat_approx(a: &Mat4, b: &Mat4) -> bool {
    a.to_cols_array()
        .iter()
        .zip(b.to_cols_array())
        .all(|(x, y)| approx(*x, y))
}

// ============================================================================
// Fade Tests
// ============================================================================

#[test]
fn fade_in_reports_true_exactly_at_the_boundary() {
    let mut fade = Fade::default();
    fade.set(0.0);
    for call in 1..=9 {
        assert!(!fade.fade(true, 0.1), "call {call} reached 1.0 early");
    }
    assert!(fade.fade(true, 0.1));
    assert!(approx(fade.value(), 1.0));
}

#[test]
fn fade_out_is_symmetric() {
    let mut fade = Fade::default();
    fade.set(1.0);
    for _ in 1..=3 {
        assert!(!fade.fade(false, 0.25));
    }
    assert!(fade.fade(false, 0.25));
    assert!(approx(fade.value(), 0.0));
}

#[test]
fn fade_clamps_and_keeps_reporting_done() {
    let mut fade = Fade::default();
    fade.set(0.9);
    assert!(fade.fade(true, 0.5));
    assert!(approx(fade.value(), 1.0));
    assert!(fade.fade(true, 0.5));
    assert!(approx(fade.value(), 1.0));
}

#[test]
fn fade_set_clamps_out_of_range_values() {
    let mut fade = Fade::default();
    fade.set(2.5);
    assert!(approx(fade.value(), 1.0));
    fade.set(-1.0);
    assert!(approx(fade.value(), 0.0));
}

#[test]
fn fade_direction_matters_at_the_opposite_boundary() {
    let mut fade = Fade::default();
    fade.set(0.0);
    // Fading out while already at 0 reports done immediately.
    assert!(fade.fade(false, 0.1));
    // Fading in from 0 does not.
    assert!(!fade.fade(true, 0.1));
}

// ============================================================================
// View Matrix Conversion Tests
// ============================================================================

#[test]
fn identity_camera_yields_identity_view() {
    let view = view_matrix_from_camera_world(&Mat4::IDENTITY);
    assert!(mat_approx(&view, &Mat4::IDENTITY));
}

#[test]
fn translation_is_carried_then_inverted() {
    let world = Mat4::from_translation(Vec3::new(10.0, -4.0, 7.0));
    let view = view_matrix_from_camera_world(&world);
    // The view matrix undoes the camera translation.
    let origin = view * Vec4::new(10.0, -4.0, 7.0, 1.0);
    assert!(approx(origin.x, 0.0));
    assert!(approx(origin.y, 0.0));
    assert!(approx(origin.z, 0.0));
}

#[test]
fn basis_is_transposed_before_inversion() {
    let world = Mat4::from_rotation_y(std::f32::consts::FRAC_PI_2);
    let converted = view_matrix_from_camera_world(&world);
    // transpose(R) then invert == R for a pure rotation.
    let expected = Mat4::from_mat3(glam::Mat3::from_mat4(world));
    assert!(mat_approx(&converted, &expected));
}

#[test]
fn camera_update_tracks_position_and_basis() {
    let mut camera = Camera::new(800, 600);
    camera.view_updated = false;

    let world = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
    camera.update(&world);
    assert!(camera.view_updated);
    assert_eq!(camera.position, Vec3::new(1.0, 2.0, 3.0));
    assert!(approx(camera.right.length(), 1.0));
    assert!(approx(camera.up.length(), 1.0));
}

// ============================================================================
// Projection Tests
// ============================================================================

#[test]
fn projection_guards_against_zero_height() {
    let projection = projection_matrix(800, 0);
    assert!(projection.to_cols_array().iter().all(|v| v.is_finite()));
}

#[test]
fn projection_changes_with_aspect() {
    let wide = projection_matrix(1600, 900);
    let square = projection_matrix(900, 900);
    assert!(!mat_approx(&wide, &square));
    // Vertical FOV term is aspect-independent.
    assert!(approx(wide.y_axis.y, square.y_axis.y));
}
