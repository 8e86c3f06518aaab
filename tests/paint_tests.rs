// Host-side tests for the canvas paint helpers.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod paint {
    include!("../src/paint.rs");
}

use ambient_core::GooFilter;
use glam::Vec2;
use paint::*;

#[test]
fn color_matrix_thresholds_alpha_only() {
    let m = goo_color_matrix(&GooFilter::default());
    assert_eq!(m, "1 0 0 0 0  0 1 0 0 0  0 0 1 0 0  0 0 0 35 -10");
    assert_eq!(m.split_whitespace().count(), 20);
}

#[test]
fn color_matrix_follows_custom_tuning() {
    let goo = GooFilter {
        blur_std_dev: 3.0,
        alpha_gain: 20.5,
        alpha_offset: -7.0,
    };
    assert!(goo_color_matrix(&goo).ends_with("0 0 0 20.5 -7"));
}

#[test]
fn svg_markup_defines_blur_matrix_and_composite() {
    let svg = goo_svg_markup("goo-test", &GooFilter::default(), 1.0);
    assert!(svg.starts_with("<svg"));
    assert!(svg.ends_with("</svg>"));
    assert!(svg.contains(r#"<filter id="goo-test">"#));
    assert!(svg.contains(r#"stdDeviation="5""#));
    assert!(svg.contains(r#"values="1 0 0 0 0  0 1 0 0 0  0 0 1 0 0  0 0 0 35 -10""#));
    assert!(svg.contains(r#"operator="atop""#));
    let blur = svg.find("feGaussianBlur").unwrap();
    let matrix = svg.find("feColorMatrix").unwrap();
    let composite = svg.find("feComposite").unwrap();
    assert!(blur < matrix && matrix < composite);
}

#[test]
fn goo_blur_is_sized_in_css_pixels_on_hidpi_backing() {
    let goo = GooFilter::default();
    assert_eq!(device_blur(&goo, 1.0), 5.0);
    assert_eq!(device_blur(&goo, 2.0), 10.0);
    assert_eq!(device_blur(&goo, 1.5), 7.5);

    let svg = goo_svg_markup("goo-test", &goo, 2.0);
    assert!(svg.contains(r#"stdDeviation="10""#));
    assert!(!svg.contains(r#"stdDeviation="5""#));
}

#[test]
fn blur_primitive_is_addressable_by_id() {
    assert_eq!(blur_element_id("ambient-goo"), "ambient-goo-blur");
    let svg = goo_svg_markup("ambient-goo", &GooFilter::default(), 1.0);
    assert!(svg.contains(r#"<feGaussianBlur id="ambient-goo-blur""#));
}

#[test]
fn teardown_detaches_only_inserted_overlays() {
    assert!(Provenance::Created.detach_on_teardown());
    assert!(!Provenance::Page.detach_on_teardown());
}

#[test]
fn filter_url_references_id() {
    assert_eq!(filter_url("ambient-goo"), "url(#ambient-goo)");
}

#[test]
fn effective_dpr_clamps_and_defaults() {
    assert_eq!(effective_dpr(1.5, 2.0), 1.5);
    assert_eq!(effective_dpr(3.0, 2.0), 2.0);
    assert_eq!(effective_dpr(0.0, 2.0), 1.0);
    assert_eq!(effective_dpr(-1.0, 2.0), 1.0);
    assert_eq!(effective_dpr(f64::NAN, 2.0), 1.0);
}

#[test]
fn backing_size_scales_and_never_hits_zero() {
    assert_eq!(backing_size(Vec2::new(1280.0, 720.0), 2.0), (2560, 1440));
    assert_eq!(backing_size(Vec2::new(333.3, 100.0), 1.5), (500, 150));
    assert_eq!(backing_size(Vec2::ZERO, 2.0), (1, 1));
    assert_eq!(backing_size(Vec2::new(-10.0, 50.0), 1.0), (1, 50));
}

#[test]
fn overlay_style_covers_viewport_and_ignores_pointer() {
    let css = overlay_style(9999, Some("difference"));
    assert!(css.contains("position:fixed"));
    assert!(css.contains("pointer-events:none"));
    assert!(css.contains("z-index:9999;"));
    assert!(css.ends_with("mix-blend-mode:difference;"));

    let plain = overlay_style(0, None);
    assert!(!plain.contains("mix-blend-mode"));
}
