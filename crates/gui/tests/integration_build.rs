//! Integration tests for body carving.
//!
//! Tests end-to-end: placed shapes -> BodyCompositor / FitBuilder -> validate
//! the carved mesh and its volume.

use shared::ShapeParams;
use xactfit_lib::build::text::signed_area;
use xactfit_lib::build::{carve, BlockGlyphs, BodyCompositor, ComposeError, FontGlyphs, GlyphOutliner};
use xactfit_lib::fixtures::*;
use xactfit_lib::helpers::MIN_LAYER_OFFSET;
use xactfit_lib::validation::MeshValidator;

fn stock_volume([w, h, d]: [f64; 3]) -> f64 {
    w * (h - 2.0 * MIN_LAYER_OFFSET) * d
}

#[test]
fn test_bare_stock_end_to_end() {
    let mut h = xactfit_lib::harness::TestHarness::new();
    let [w, ht, d] = REFERENCE_STOCK;
    let body = h.draw_body(w, ht, d).unwrap();
    assert_eq!(body.shape_count, 0);
    assert!((body.volume - stock_volume(REFERENCE_STOCK)).abs() < 1e-6);

    let v = h.validate_body().unwrap();
    let errors = v.validate_all();
    assert!(errors.is_empty(), "Validation errors: {:?}", errors);
    assert!(v.dimensions_approx([3.0, 2.0 - 2.0 * MIN_LAYER_OFFSET as f32, 5.0], 1e-3));
    // The block hangs below the ground plane
    assert!(v.is_below(0.0));
}

#[test]
fn test_reference_scenario_removes_both_cavities() {
    let (mut h, box_id, sphere_id) = reference_session();
    // Keep the cavities apart so their volumes add up
    h.drag_by(&sphere_id, 0.0, 1.8).unwrap();

    let removed: f64 = [&box_id, &sphere_id]
        .iter()
        .map(|id| removed_volume(&h.shape(id).unwrap().params))
        .sum();
    let expected = stock_volume(REFERENCE_STOCK) - removed;
    let volume = h.body_volume().unwrap();

    // Tessellated sphere removes a little less than the exact half ellipsoid
    assert!(volume > expected - 0.01, "volume {volume} < expected {expected}");
    assert!(volume < expected + 0.08, "volume {volume} > expected {expected}");

    let v = h.validate_body().unwrap();
    assert!(v.validate_all().is_empty());
    assert!((v.volume() - volume).abs() < 1e-2);
}

#[test]
fn test_rebuild_is_idempotent() {
    let (mut h, _, _) = reference_session();
    let [w, ht, d] = REFERENCE_STOCK;

    let first = h.draw_body(w, ht, d).unwrap().clone();
    let second = h.draw_body(w, ht, d).unwrap().clone();

    assert_eq!(second.generation, first.generation + 1);
    assert!((first.volume - second.volume).abs() < 1e-9);
    assert_eq!(first.mesh.triangle_count(), second.mesh.triangle_count());
}

#[test]
fn test_shapes_added_after_drawing_carve_immediately() {
    let mut h = xactfit_lib::harness::TestHarness::new();
    let [w, ht, d] = REFERENCE_STOCK;
    h.draw_body(w, ht, d).unwrap();
    let bare = h.body_volume().unwrap();
    let gen = h.body_generation().unwrap();

    h.add_box(1.0, 0.6, 2.0).unwrap();

    assert_eq!(h.body_generation(), Some(gen + 1));
    let carved = h.body_volume().unwrap();
    let removed = removed_volume(&box_params(1.0, 0.6, 2.0));
    // The box top sits on the ground, the stock top just below it
    assert!((bare - carved - removed).abs() < 0.01, "removed {}", bare - carved);
}

#[test]
fn test_shapes_before_drawing_do_not_build() {
    let mut h = xactfit_lib::harness::TestHarness::new();
    h.add_box(1.0, 0.6, 2.0).unwrap();
    h.add_sphere(1.5, 1.0, 1.0, 16).unwrap();
    assert!(h.body_volume().is_none());

    let [w, ht, d] = REFERENCE_STOCK;
    let body = h.draw_body(w, ht, d).unwrap();
    assert_eq!(body.shape_count, 2);
}

#[test]
fn test_horizontal_cylinder_removes_lower_half() {
    let upright = shape_at("up", cylinder_params(2.0, 1.0, 1.0, false), -0.8, 0.0);
    let lying = shape_at("lying", cylinder_params(2.0, 1.0, 1.0, true), 0.8, 0.0);
    let [w, ht, d] = REFERENCE_STOCK;

    let (_, bare) = carve(w, ht, d, &[], &BlockGlyphs).unwrap();
    let (_, after_up) = carve(w, ht, d, std::slice::from_ref(&upright), &BlockGlyphs).unwrap();
    let (_, after_lying) = carve(w, ht, d, std::slice::from_ref(&lying), &BlockGlyphs).unwrap();

    let removed_up = bare - after_up;
    let removed_lying = bare - after_lying;
    assert!(removed_up > 0.0 && removed_lying > 0.0);
    // Polygonal section removes a little less than the exact cylinder
    assert!(removed_up < removed_volume(&upright.params));
    assert!(removed_up > 0.9 * removed_volume(&upright.params));
    // Lying cylinder only ever removes the half below the ground
    assert!(removed_lying <= removed_volume(&lying.params) + 1e-6);
    assert!(removed_lying > 0.8 * removed_volume(&lying.params));
}

#[test]
fn test_text_carves_an_engraving() {
    let mut h = xactfit_lib::harness::TestHarness::new();
    let [w, ht, d] = REFERENCE_STOCK;
    h.draw_body(w, ht, d).unwrap();
    let bare = h.body_volume().unwrap();

    h.add_text("HSO", 0.25, 0.5).unwrap();

    assert!(h.builder.last_error().is_none());
    assert!(h.body_volume().unwrap() < bare);
}

#[test]
fn test_failed_rebuild_keeps_previous_body() {
    let (mut h, _, _) = reference_session();
    let before = h.builder.body().unwrap().clone();

    let err = h.draw_body(0.0, 2.0, 5.0).unwrap_err();
    assert!(matches!(err, ComposeError::InvalidStock { .. }));

    let kept = h.builder.body().unwrap();
    assert_eq!(kept.generation, before.generation);
    assert!((kept.volume - before.volume).abs() < 1e-12);
    assert!(h.builder.last_error().is_some());
}

#[test]
fn test_unknown_shape_aborts_rebuild() {
    let mut compositor = BodyCompositor::new();
    let [w, ht, d] = REFERENCE_STOCK;
    compositor.rebuild(w, ht, d, &[], &BlockGlyphs).unwrap();

    let shapes = vec![
        shape_at("box", box_params(1.0, 0.6, 2.0), 0.0, 0.0),
        shape_at("mystery", ShapeParams::Unknown, 1.0, 1.0),
    ];
    let err = compositor.rebuild(w, ht, d, &shapes, &BlockGlyphs).unwrap_err();

    assert_eq!(err, ComposeError::DegenerateSolid { id: "mystery".to_string() });
    assert_eq!(compositor.body().unwrap().shape_count, 0);
    assert_eq!(compositor.generation(), 1);
}

#[test]
fn test_carved_mesh_stays_valid() {
    let shapes = vec![
        shape_at("b", box_params(1.0, 0.6, 2.0), -0.8, -1.0),
        shape_at("s", sphere_params(1.5, 1.0, 1.0), 0.6, 1.4),
        shape_at("c", cylinder_params(1.0, 0.6, 0.4, false), 0.8, -1.5),
    ];
    let [w, ht, d] = REFERENCE_STOCK;
    let (mesh, volume) = carve(w, ht, d, &shapes, &BlockGlyphs).unwrap();

    let v = MeshValidator::new(&mesh);
    let errors = v.validate_all();
    assert!(errors.is_empty(), "Validation errors: {:?}", errors);
    assert!(volume < stock_volume(REFERENCE_STOCK));
    assert!(v.is_below(1e-4));
}

#[test]
fn test_failed_draw_keeps_last_valid_stock() {
    let (mut h, box_id, _) = reference_session();
    assert!(h.draw_body(0.0, 2.0, 5.0).is_err());
    assert_eq!(h.builder.stock(), Some(REFERENCE_STOCK));
    let gen = h.body_generation().unwrap();

    h.press(&box_id, 0.0, 0.0).unwrap();
    h.move_to(0.4, 0.3);
    assert_eq!(h.release(), Some(box_id));

    // The drop rebuilds against the 3×2×5 stock, not the rejected one
    assert_eq!(h.body_generation(), Some(gen + 1));
    let body = h.builder.body().unwrap();
    assert_eq!(body.stock, REFERENCE_STOCK);
    assert_eq!(body.shape_count, 2);
}

#[test]
fn test_overlapping_shapes_at_origin() {
    // Both reference shapes left where they were added
    let (h, box_id, sphere_id) = reference_session();
    let bare = stock_volume(REFERENCE_STOCK);
    let removed = bare - h.body_volume().unwrap();

    let box_removed = removed_volume(&h.shape(&box_id).unwrap().params);
    let sphere_removed = removed_volume(&h.shape(&sphere_id).unwrap().params);
    // The sphere pokes out of the box sides, the overlap is only counted once
    assert!(removed >= box_removed.max(sphere_removed) - 0.01, "removed {removed}");
    assert!(removed < box_removed + sphere_removed, "removed {removed}");

    let v = h.validate_body().unwrap();
    let errors = v.validate_all();
    assert!(errors.is_empty(), "Validation errors: {:?}", errors);

    // Vertices on the stock top that are not on its border outline the holes
    let mesh = &h.builder.body().unwrap().mesh;
    let top = -MIN_LAYER_OFFSET as f32;
    let (half_w, half_d) = (REFERENCE_STOCK[0] as f32 / 2.0, REFERENCE_STOCK[2] as f32 / 2.0);
    let (mut lo, mut hi) = ([f32::MAX; 2], [f32::MIN; 2]);
    for i in 0..mesh.vertex_count() {
        let p = mesh.position(i);
        let inside = p.x.abs() < half_w - 1e-3 && p.z.abs() < half_d - 1e-3;
        if (p.y - top).abs() < 1e-4 && inside {
            lo = [lo[0].min(p.x), lo[1].min(p.z)];
            hi = [hi[0].max(p.x), hi[1].max(p.z)];
        }
    }
    assert!((lo[0] + 0.75).abs() < 0.02 && (hi[0] - 0.75).abs() < 0.02, "x {lo:?}..{hi:?}");
    assert!((lo[1] + 1.0).abs() < 1e-3 && (hi[1] - 1.0).abs() < 1e-3, "z {lo:?}..{hi:?}");
}

#[test]
fn test_font_text_keeps_letter_counters() {
    let (size, depth) = (1.0, 0.5);
    let o = shape_at("o", text_params("O", size, depth), 0.0, 0.0);
    let [w, ht, d] = REFERENCE_STOCK;

    let (_, bare) = carve(w, ht, d, &[], &FontGlyphs::default()).unwrap();
    let (mesh, after) = carve(w, ht, d, std::slice::from_ref(&o), &FontGlyphs::default()).unwrap();
    let removed = bare - after;

    let glyphs = FontGlyphs::default().outline("O", size);
    let outer_area = glyphs[0].iter().map(|c| signed_area(c)).fold(0.0, f64::max);
    assert!(removed > 0.0);
    // A solid "O" would remove outer area × depth; the counter stays in the stock
    assert!(removed < 0.8 * outer_area * depth, "removed {removed}, outer {}", outer_area * depth);
    assert!(MeshValidator::new(&mesh).validate_all().is_empty());
}
