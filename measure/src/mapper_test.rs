#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn metrics(w: f64, h: f64) -> ImageMetrics {
    ImageMetrics::new(w, h).expect("valid metrics")
}

fn uniform(w: f64, h: f64) -> SurfaceSize {
    SurfaceSize::uniform(w, h).expect("valid surface")
}

// --- ImageMetrics ---

#[test]
fn metrics_reports_aspect() {
    let m = metrics(800.0, 600.0);
    assert!(approx_eq(m.aspect(), 4.0 / 3.0));
    assert_eq!(m.natural_width(), 800.0);
    assert_eq!(m.natural_height(), 600.0);
}

#[test]
fn metrics_rejects_zero_and_negative() {
    assert!(matches!(ImageMetrics::new(0.0, 10.0), Err(MeasureError::InvalidDimensions { .. })));
    assert!(matches!(ImageMetrics::new(10.0, -1.0), Err(MeasureError::InvalidDimensions { .. })));
}

#[test]
fn valid_dimensions_requires_finite_positive() {
    assert!(valid_dimensions(1280.0, 720.0));
    assert!(!valid_dimensions(f64::INFINITY, 720.0));
    assert!(!valid_dimensions(1280.0, f64::NAN));
    assert!(!valid_dimensions(0.0, 720.0));
}

#[test]
fn metrics_rejects_non_finite() {
    assert!(ImageMetrics::new(f64::NAN, 10.0).is_err());
    assert!(ImageMetrics::new(10.0, f64::INFINITY).is_err());
}

// --- SurfaceSize ---

#[test]
fn surface_uniform_has_unit_scale() {
    let s = uniform(400.0, 300.0);
    assert_eq!(s.scale(), (1.0, 1.0));
}

#[test]
fn surface_with_dpr_scales_backing() {
    let s = SurfaceSize::with_dpr(400.0, 300.0, 2.0).expect("valid surface");
    assert_eq!(s.backing_w, 800.0);
    assert_eq!(s.backing_h, 600.0);
    assert_eq!(s.scale(), (2.0, 2.0));
}

#[test]
fn surface_rejects_zero_dpr() {
    assert!(SurfaceSize::with_dpr(400.0, 300.0, 0.0).is_err());
}

#[test]
fn surface_scale_can_differ_per_axis() {
    let s = SurfaceSize::new(200.0, 100.0, 600.0, 400.0).expect("valid surface");
    assert_eq!(s.scale(), (3.0, 4.0));
}

// --- compute_draw_rect ---

#[test]
fn draw_rect_letterboxes_wide_image_in_square_surface() {
    let rect = compute_draw_rect(400.0, 400.0, &metrics(800.0, 600.0));
    assert_eq!(rect, DrawRect { offset_x: 0.0, offset_y: 50.0, width: 400.0, height: 300.0 });
}

#[test]
fn draw_rect_pillarboxes_tall_image() {
    let rect = compute_draw_rect(400.0, 400.0, &metrics(300.0, 600.0));
    assert!(approx_eq(rect.width, 200.0));
    assert!(approx_eq(rect.height, 400.0));
    assert!(approx_eq(rect.offset_x, 100.0));
    assert!(approx_eq(rect.offset_y, 0.0));
}

#[test]
fn draw_rect_exact_fit_has_no_offset() {
    let rect = compute_draw_rect(640.0, 480.0, &metrics(1280.0, 960.0));
    assert_eq!(rect, DrawRect { offset_x: 0.0, offset_y: 0.0, width: 640.0, height: 480.0 });
}

#[test]
fn draw_rect_preserves_aspect_and_fits_for_many_sizes() {
    let sizes = [1.0, 3.0, 17.0, 240.0, 400.0, 1024.0, 4032.0];
    for &sw in &sizes {
        for &sh in &sizes {
            for &nw in &sizes {
                for &nh in &sizes {
                    let rect = compute_draw_rect(sw, sh, &metrics(nw, nh));
                    let ratio_err = (rect.width / rect.height - nw / nh).abs() / (nw / nh);
                    assert!(ratio_err < 1e-9, "aspect drift for {sw}x{sh} / {nw}x{nh}");
                    assert!(rect.width <= sw + EPSILON);
                    assert!(rect.height <= sh + EPSILON);
                    assert!(rect.width == sw || rect.height == sh, "no side touches the surface");
                    assert!(rect.offset_x >= -EPSILON && rect.offset_y >= -EPSILON);
                }
            }
        }
    }
}

#[test]
fn draw_rect_is_deterministic() {
    let m = metrics(1234.0, 567.0);
    assert_eq!(compute_draw_rect(333.0, 222.0, &m), compute_draw_rect(333.0, 222.0, &m));
}

// --- DrawRect::contains ---

#[test]
fn contains_is_inclusive_on_edges() {
    let rect = DrawRect { offset_x: 10.0, offset_y: 20.0, width: 100.0, height: 50.0 };
    assert!(rect.contains(Point::new(10.0, 20.0)));
    assert!(rect.contains(Point::new(110.0, 70.0)));
    assert!(!rect.contains(Point::new(9.999, 30.0)));
    assert!(!rect.contains(Point::new(50.0, 70.001)));
}

// --- to_image_relative ---

#[test]
fn relative_point_in_letterboxed_surface() {
    let surface = uniform(400.0, 400.0);
    let rect = compute_draw_rect(400.0, 400.0, &metrics(800.0, 600.0));
    let rel = to_image_relative(Point::new(100.0, 150.0), &surface, &rect).expect("inside");
    assert!(approx_eq(rel.rel_x, 0.25));
    assert!(approx_eq(rel.rel_y, 1.0 / 3.0));
}

#[test]
fn click_in_letterbox_band_is_out_of_bounds() {
    let surface = uniform(400.0, 400.0);
    let rect = compute_draw_rect(400.0, 400.0, &metrics(800.0, 600.0));
    let err = to_image_relative(Point::new(200.0, 10.0), &surface, &rect).expect_err("outside");
    assert!(matches!(err, MeasureError::OutOfBounds { .. }));
}

#[test]
fn out_of_bounds_reports_backing_position() {
    let surface = SurfaceSize::with_dpr(400.0, 400.0, 2.0).expect("valid surface");
    let rect = compute_draw_rect(800.0, 800.0, &metrics(800.0, 600.0));
    let err = to_image_relative(Point::new(10.0, 5.0), &surface, &rect).expect_err("outside");
    assert_eq!(err, MeasureError::OutOfBounds { x: 20.0, y: 10.0 });
}

#[test]
fn high_density_surface_maps_logical_pointer() {
    // Logical 400x400 at dpr 2 -> backing 800x800; image fills 800x600 with 100px bands.
    let surface = SurfaceSize::with_dpr(400.0, 400.0, 2.0).expect("valid surface");
    let rect = compute_draw_rect(surface.backing_w, surface.backing_h, &metrics(800.0, 600.0));
    assert_eq!(rect, DrawRect { offset_x: 0.0, offset_y: 100.0, width: 800.0, height: 600.0 });

    let rel = to_image_relative(Point::new(100.0, 150.0), &surface, &rect).expect("inside");
    assert!(approx_eq(rel.rel_x, 0.25));
    assert!(approx_eq(rel.rel_y, 1.0 / 3.0));
}

#[test]
fn stretched_element_uses_per_axis_scale() {
    // Element rendered at 200x100 CSS px over a 400x400 buffer.
    let surface = SurfaceSize::new(200.0, 100.0, 400.0, 400.0).expect("valid surface");
    let rect = compute_draw_rect(400.0, 400.0, &metrics(800.0, 600.0));
    let rel = to_image_relative(Point::new(50.0, 37.5), &surface, &rect).expect("inside");
    assert!(approx_eq(rel.rel_x, 0.25));
    assert!(approx_eq(rel.rel_y, 1.0 / 3.0));
}

#[test]
fn corners_map_to_unit_square_bounds() {
    let surface = uniform(400.0, 400.0);
    let rect = compute_draw_rect(400.0, 400.0, &metrics(800.0, 600.0));
    let top_left = to_image_relative(Point::new(0.0, 50.0), &surface, &rect).expect("inside");
    let bottom_right = to_image_relative(Point::new(400.0, 350.0), &surface, &rect).expect("inside");
    assert_eq!(top_left, RelPoint { rel_x: 0.0, rel_y: 0.0 });
    assert_eq!(bottom_right, RelPoint { rel_x: 1.0, rel_y: 1.0 });
}

// --- to_surface_pixel ---

#[test]
fn surface_pixel_of_center_is_rect_center() {
    let rect = DrawRect { offset_x: 0.0, offset_y: 50.0, width: 400.0, height: 300.0 };
    let p = to_surface_pixel(RelPoint::new(0.5, 0.5), &rect);
    assert!(point_approx_eq(p, Point::new(200.0, 200.0)));
}

#[test]
fn round_trip_inside_draw_rect() {
    let surface = uniform(517.0, 389.0);
    let rect = compute_draw_rect(517.0, 389.0, &metrics(4032.0, 3024.0));
    let mut x = rect.offset_x + 0.5;
    while x < rect.offset_x + rect.width {
        let mut y = rect.offset_y + 0.5;
        while y < rect.offset_y + rect.height {
            let rel = to_image_relative(Point::new(x, y), &surface, &rect).expect("inside");
            let back = to_surface_pixel(rel, &rect);
            assert!(point_approx_eq(back, Point::new(x, y)), "({x}, {y}) -> {back:?}");
            y += 37.0;
        }
        x += 41.0;
    }
}

// --- RelPoint ---

#[test]
fn rel_point_clamps_into_unit_range() {
    let p = RelPoint::new(-0.1, 1.2);
    assert_eq!(p, RelPoint { rel_x: 0.0, rel_y: 1.0 });
}

// --- fit_surface ---

#[test]
fn fit_surface_caps_at_natural_size() {
    let (w, h) = fit_surface(&metrics(320.0, 240.0), 1920.0, 1080.0);
    assert!(approx_eq(w, 320.0));
    assert!(approx_eq(h, 240.0));
}

#[test]
fn fit_surface_limits_to_viewport_share() {
    // 0.8 * 1000 = 800 wide, 0.6 * 1000 = 600 tall budget.
    let (w, h) = fit_surface(&metrics(4000.0, 3000.0), 1000.0, 1000.0);
    assert!(approx_eq(w, 800.0));
    assert!(approx_eq(h, 600.0));
}

#[test]
fn fit_surface_height_bound_shrinks_width() {
    let (w, h) = fit_surface(&metrics(3000.0, 4000.0), 1000.0, 1000.0);
    assert!(approx_eq(h, 600.0));
    assert!(approx_eq(w, 450.0));
}
