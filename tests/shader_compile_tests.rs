//! Shader Compilation Tests
//!
//! The CPU-side compile path (parse + validate through naga) runs without
//! a device, so diagnostics and the built-in programs are testable here.

use glaze::render::shader::{compile_diagnostics, validate_wgsl};
use glaze::shaders;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// ============================================================================
// Built-in Program Tests
// ============================================================================

#[test]
fn all_builtin_programs_validate() {
    init_logging();
    let programs = [
        ("post", shaders::POST),
        ("pre_effects", shaders::PRE_EFFECTS),
        ("blur_horizontal", shaders::BLUR_HORIZONTAL),
        ("blur_vertical", shaders::BLUR_VERTICAL),
        ("water", shaders::WATER),
        ("particle", shaders::PARTICLE),
        ("mesh", shaders::MESH),
    ];
    for (name, source) in programs {
        let diagnostics = compile_diagnostics(name, source);
        assert!(diagnostics.is_empty(), "{name}: {diagnostics}");
    }
}

#[test]
fn reserved_table_covers_the_reserved_slots() {
    use glaze::scene::ShaderIndex;
    let table = shaders::reserved();
    assert_eq!(table.len(), ShaderIndex::RESERVED);
    assert_eq!(table[ShaderIndex::POST].name, "post");
    assert_eq!(table[ShaderIndex::WATER].name, "water");
    assert_eq!(table[ShaderIndex::PARTICLE].name, "particle");
}

#[test]
fn builtin_texture_slot_counts_are_introspectable() {
    let (module, _) = validate_wgsl("mesh", shaders::MESH).unwrap();
    let images = module
        .global_variables
        .iter()
        .filter(|(_, var)| matches!(module.types[var.ty].inner, naga::TypeInner::Image { .. }))
        .count();
    // diffuse, normal, specular
    assert_eq!(images, 3);
}

// ============================================================================
// Diagnostic Tests
// ============================================================================

#[test]
fn invalid_wgsl_yields_named_nonempty_diagnostics() {
    let diagnostics = compile_diagnostics("broken", "fn vs_main( {");
    assert!(!diagnostics.is_empty());
    assert!(diagnostics.starts_with("broken:"));
}

#[test]
fn type_errors_are_caught_by_validation() {
    let source = "
        @fragment
        fn fs_main() -> @location(0) vec4f {
            return 1;
        }
    ";
    let diagnostics = compile_diagnostics("typed", source);
    assert!(!diagnostics.is_empty());
}

#[test]
fn corrected_source_then_compiles_cleanly() {
    let broken = "fn vs_main( {";
    assert!(!compile_diagnostics("stages", broken).is_empty());

    let corrected = "
        @vertex
        fn vs_main(@builtin(vertex_index) index: u32) -> @builtin(position) vec4f {
            return vec4f(0.0, 0.0, 0.0, 1.0);
        }
    ";
    assert!(compile_diagnostics("stages", corrected).is_empty());
}

#[test]
fn validate_wgsl_returns_the_module_on_success() {
    let (module, _info) = validate_wgsl("tiny", "const ANSWER: i32 = 42;").unwrap();
    assert_eq!(module.global_variables.iter().count(), 0);
}
