use crate::paint::{self, Provenance};
use anyhow::anyhow;
use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Viewport size in CSS pixels; zero when the window reports nothing usable.
pub fn inner_size(window: &web::Window) -> Vec2 {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    Vec2::new(w as f32, h as f32)
}

fn body(document: &web::Document) -> anyhow::Result<web::HtmlElement> {
    document.body().ok_or_else(|| anyhow!("document has no body"))
}

/// Find `#id` or append a fixed full-viewport canvas with that id.
pub fn overlay_canvas(
    document: &web::Document,
    id: &str,
    z_index: i32,
    blend_mode: Option<&str>,
) -> anyhow::Result<(web::HtmlCanvasElement, Provenance)> {
    let (el, provenance) = match document.get_element_by_id(id) {
        Some(el) => (el, Provenance::Page),
        None => {
            let el = document
                .create_element("canvas")
                .map_err(|e| anyhow!("create canvas: {:?}", e))?;
            el.set_id(id);
            el.set_attribute("aria-hidden", "true")
                .map_err(|e| anyhow!("{:?}", e))?;
            el.set_attribute("style", &paint::overlay_style(z_index, blend_mode))
                .map_err(|e| anyhow!("{:?}", e))?;
            body(document)?
                .append_child(&el)
                .map_err(|e| anyhow!("append #{id}: {:?}", e))?;
            (el, Provenance::Created)
        }
    };
    let canvas = el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|_| anyhow!("#{id} is not a canvas"))?;
    Ok((canvas, provenance))
}

/// Detached canvas used as an intermediate layer.
pub fn scratch_canvas(document: &web::Document) -> anyhow::Result<web::HtmlCanvasElement> {
    document
        .create_element("canvas")
        .map_err(|e| anyhow!("create canvas: {:?}", e))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|_| anyhow!("created element is not a canvas"))
}

pub fn context_2d(canvas: &web::HtmlCanvasElement) -> anyhow::Result<web::CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .map_err(|e| anyhow!("{:?}", e))?
        .ok_or_else(|| anyhow!("2d context unavailable"))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|_| anyhow!("unexpected 2d context type"))
}

/// Inject hidden SVG markup (filter definitions) once per id. Returns the
/// holder element when it was inserted by this call.
pub fn install_svg(
    document: &web::Document,
    id: &str,
    markup: &str,
) -> anyhow::Result<Option<web::Element>> {
    if document.get_element_by_id(id).is_some() {
        return Ok(None);
    }
    let holder = document
        .create_element("div")
        .map_err(|e| anyhow!("create div: {:?}", e))?;
    holder.set_inner_html(markup);
    body(document)?
        .append_child(&holder)
        .map_err(|e| anyhow!("append svg: {:?}", e))?;
    Ok(Some(holder))
}

/// Resize the backing store to match the viewport; returns true on change.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, size: (u32, u32)) -> bool {
    if canvas.width() == size.0 && canvas.height() == size.1 {
        return false;
    }
    canvas.set_width(size.0);
    canvas.set_height(size.1);
    true
}
