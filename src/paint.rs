// Target-independent paint helpers for the canvas renderer.

use ambient_core::GooFilter;
use glam::Vec2;

/// `values` attribute of the colour matrix: RGB pass through, alpha is
/// multiplied by the gain and shifted by the offset.
pub fn goo_color_matrix(goo: &GooFilter) -> String {
    format!(
        "1 0 0 0 0  0 1 0 0 0  0 0 1 0 0  0 0 0 {} {}",
        goo.alpha_gain, goo.alpha_offset
    )
}

/// Hidden SVG document defining the goo filter under `id`, with the blur
/// sized for a backing store at `dpr`.
pub fn goo_svg_markup(id: &str, goo: &GooFilter, dpr: f64) -> String {
    format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="0" height="0" "#,
            r#"style="position:absolute;width:0;height:0" aria-hidden="true">"#,
            r#"<defs><filter id="{id}">"#,
            r#"<feGaussianBlur id="{blur_id}" in="SourceGraphic" stdDeviation="{blur}" result="blur"/>"#,
            r#"<feColorMatrix in="blur" mode="matrix" values="{matrix}" result="goo"/>"#,
            r#"<feComposite in="SourceGraphic" in2="goo" operator="atop"/>"#,
            r#"</filter></defs></svg>"#
        ),
        id = id,
        blur_id = blur_element_id(id),
        blur = device_blur(goo, dpr),
        matrix = goo_color_matrix(goo),
    )
}

/// Id of the `feGaussianBlur` primitive inside the filter `id`.
pub fn blur_element_id(id: &str) -> String {
    format!("{id}-blur")
}

/// Blur standard deviation in backing-store pixels. The filter runs on a
/// canvas scaled by `dpr`, while `blur_std_dev` is given in CSS pixels.
pub fn device_blur(goo: &GooFilter, dpr: f64) -> f64 {
    goo.blur_std_dev as f64 * dpr
}

/// Canvas `filter` value referencing the SVG filter.
pub fn filter_url(id: &str) -> String {
    format!("url(#{id})")
}

/// Device pixel ratio clamped to `(0, max_ratio]`; 1 for nonsense input.
pub fn effective_dpr(device_pixel_ratio: f64, max_ratio: f64) -> f64 {
    if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        device_pixel_ratio.min(max_ratio)
    } else {
        1.0
    }
}

/// Backing store size for a canvas covering `viewport` CSS pixels.
pub fn backing_size(viewport: Vec2, dpr: f64) -> (u32, u32) {
    let w = (viewport.x.max(0.0) as f64 * dpr).round() as u32;
    let h = (viewport.y.max(0.0) as f64 * dpr).round() as u32;
    (w.max(1), h.max(1))
}

/// Inline style for a full-viewport overlay canvas.
pub fn overlay_style(z_index: i32, blend_mode: Option<&str>) -> String {
    let mut css = format!(
        "position:fixed;inset:0;width:100vw;height:100vh;pointer-events:none;z-index:{z_index};"
    );
    if let Some(mode) = blend_mode {
        css.push_str("mix-blend-mode:");
        css.push_str(mode);
        css.push(';');
    }
    css
}

/// Where an overlay element came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Provenance {
    /// Supplied by the page markup; left in place and blanked on teardown.
    Page,
    /// Inserted by the renderer; removed from the document on teardown.
    Created,
}

impl Provenance {
    pub fn detach_on_teardown(self) -> bool {
        matches!(self, Provenance::Created)
    }
}
