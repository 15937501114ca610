//! Render State Machine Tests
//!
//! Tests for:
//! - DrawState: wireframe folding, cull/wireframe queries
//! - RenderState: change detection per axis, applied-transition counters,
//!   shader selection, frame reset

use glaze::render::state::{DrawState, RenderState};

// ============================================================================
// DrawState Tests
// ============================================================================

#[test]
fn draw_state_wireframe_folding() {
    assert_eq!(DrawState::Cull.with_wireframe(true), DrawState::CullWire);
    assert_eq!(DrawState::Cull.with_wireframe(false), DrawState::Cull);
    assert_eq!(DrawState::NoCull.with_wireframe(true), DrawState::NoCullWire);
    assert_eq!(DrawState::CullWire.with_wireframe(false), DrawState::Cull);
    assert_eq!(DrawState::NoCullWire.with_wireframe(false), DrawState::NoCull);
}

#[test]
fn draw_state_queries() {
    assert!(DrawState::Cull.culls());
    assert!(DrawState::CullWire.culls());
    assert!(!DrawState::NoCull.culls());
    assert!(DrawState::CullWire.wireframe());
    assert!(DrawState::NoCullWire.wireframe());
    assert!(!DrawState::Cull.wireframe());
}

// ============================================================================
// RenderState Tests
// ============================================================================

#[test]
fn initial_state_has_nothing_bound() {
    let state = RenderState::new();
    assert_eq!(state.draw_state(), None);
    assert!(!state.alpha_blending());
    assert!(!state.depth_writing());
    assert_eq!(state.selected_shader(), None);
}

#[test]
fn first_draw_state_request_always_applies() {
    let mut state = RenderState::new();
    assert!(state.set_draw_state(DrawState::NoCull));
}

#[test]
fn requesting_the_initial_blend_state_is_a_noop() {
    let mut state = RenderState::new();
    assert!(!state.enable_alpha_blending(false));
    assert!(state.enable_alpha_blending(true));
}

#[test]
fn repeated_request_is_a_noop() {
    let mut state = RenderState::new();
    assert!(state.set_draw_state(DrawState::Cull));
    assert!(!state.set_draw_state(DrawState::Cull));
    assert!(!state.set_draw_state(DrawState::Cull));
    assert_eq!(state.counters().draw_state, 1);
}

#[test]
fn apply_fires_exactly_once_per_distinct_state() {
    let mut state = RenderState::new();
    let sequence = [
        DrawState::Cull,
        DrawState::Cull,
        DrawState::NoCull,
        DrawState::NoCull,
        DrawState::NoCull,
        DrawState::CullWire,
        DrawState::Cull,
        DrawState::Cull,
    ];
    for requested in sequence {
        state.set_draw_state(requested);
    }
    // Distinct transitions: Cull, NoCull, CullWire, Cull
    assert_eq!(state.counters().draw_state, 4);
}

#[test]
fn blend_and_depth_axes_are_independent() {
    let mut state = RenderState::new();
    state.enable_alpha_blending(true);
    state.enable_depth_write(true);
    state.enable_alpha_blending(true);
    state.enable_depth_write(true);
    state.enable_alpha_blending(false);
    assert_eq!(state.counters().alpha_blend, 2);
    assert_eq!(state.counters().depth_write, 1);
    assert_eq!(state.counters().draw_state, 0);
}

#[test]
fn select_shader_reports_change_exactly_once() {
    let mut state = RenderState::new();
    assert!(state.select_shader(3));
    assert!(!state.select_shader(3));
    assert!(state.select_shader(5));
    assert!(!state.select_shader(5));
    assert_eq!(state.counters().shader, 2);
}

#[test]
fn begin_frame_forgets_shader_selection_only() {
    let mut state = RenderState::new();
    state.set_draw_state(DrawState::Cull);
    state.enable_alpha_blending(true);
    state.select_shader(2);

    state.begin_frame();
    assert_eq!(state.selected_shader(), None);
    // The other axes persist across frames.
    assert_eq!(state.draw_state(), Some(DrawState::Cull));
    assert!(state.alpha_blending());
    // Re-selecting the same shader after a frame boundary applies again.
    assert!(state.select_shader(2));
}

#[test]
fn all_draw_state_combinations_are_legal() {
    let mut state = RenderState::new();
    let all = [
        DrawState::NoCull,
        DrawState::Cull,
        DrawState::CullWire,
        DrawState::NoCullWire,
    ];
    for ds in all {
        for blend in [false, true] {
            for depth in [false, true] {
                state.set_draw_state(ds);
                state.enable_alpha_blending(blend);
                state.enable_depth_write(depth);
            }
        }
    }
    assert_eq!(state.draw_state(), Some(DrawState::NoCullWire));
}
