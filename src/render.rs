use crate::constants::*;
use crate::dom;
use crate::paint::{self, Provenance};
use ambient_core::{FrameDraw, GooFilter, Renderer, StarSprite, TrailShape, Viewport};
use glam::Vec2;
use std::f64::consts::TAU;
use wasm_bindgen::JsValue;
use web_sys as web;

pub struct WindowViewport {
    window: web::Window,
}

impl WindowViewport {
    pub fn new(window: web::Window) -> Self {
        Self { window }
    }
}

impl Viewport for WindowViewport {
    fn size(&self) -> Vec2 {
        dom::inner_size(&self.window)
    }
}

struct Layer {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    provenance: Provenance,
}

impl Layer {
    fn new((canvas, provenance): (web::HtmlCanvasElement, Provenance)) -> anyhow::Result<Self> {
        let ctx = dom::context_2d(&canvas)?;
        Ok(Self {
            canvas,
            ctx,
            provenance,
        })
    }

    /// Blank the canvas and detach it if the renderer inserted it.
    fn teardown(&self) {
        _ = self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
        if self.provenance.detach_on_teardown() {
            self.canvas.remove();
        }
    }

    /// Match the backing store to the viewport and reset to a cleared,
    /// CSS-pixel coordinate space.
    fn begin(&self, size: (u32, u32), dpr: f64) {
        dom::sync_canvas_backing_size(&self.canvas, size);
        _ = self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        self.ctx.clear_rect(0.0, 0.0, size.0 as f64, size.1 as f64);
        _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
        self.ctx.set_global_alpha(1.0);
    }

    fn circle(&self, center: Vec2, radius: f32) {
        self.ctx.begin_path();
        _ = self
            .ctx
            .arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU);
        self.ctx.fill();
    }

    fn ellipse(&self, center: Vec2, rx: f32, ry: f32, rotation_rad: f32) {
        self.ctx.begin_path();
        _ = self.ctx.ellipse(
            center.x as f64,
            center.y as f64,
            rx.max(0.0) as f64,
            ry.max(0.0) as f64,
            rotation_rad as f64,
            0.0,
            TAU,
        );
        self.ctx.fill();
    }
}

/// Draws stars and the goo trail onto two fixed overlay canvases.
///
/// The leader and blob are painted onto a detached scratch canvas which is
/// then composited through the SVG goo filter. Browsers without canvas
/// filters get the two shapes unfused. Dropping the renderer blanks the
/// overlays and removes every element it inserted.
pub struct CanvasRenderer {
    window: web::Window,
    stars: Layer,
    trail: Layer,
    scratch: Layer,
    goo: GooFilter,
    goo_filter: Option<GooInstall>,
    frames: u64,
}

struct GooInstall {
    url: String,
    // absent when the page shipped its own filter under the same id
    holder: Option<web::Element>,
    blur: Option<web::Element>,
    dpr: f64,
}

impl GooInstall {
    /// Keep the blur radius constant in CSS pixels as the DPR changes.
    fn sync_dpr(&mut self, goo: &GooFilter, dpr: f64) {
        if self.dpr == dpr {
            return;
        }
        if let Some(blur) = &self.blur {
            let std_dev = paint::device_blur(goo, dpr).to_string();
            if let Err(e) = blur.set_attribute("stdDeviation", &std_dev) {
                log::warn!("[render] goo blur not rescaled: {:?}", e);
            }
        }
        self.dpr = dpr;
    }
}

impl CanvasRenderer {
    pub fn new(
        window: &web::Window,
        document: &web::Document,
        goo: &GooFilter,
    ) -> anyhow::Result<Self> {
        let stars = Layer::new(dom::overlay_canvas(
            document,
            STARS_CANVAS_ID,
            STARS_Z_INDEX,
            None,
        )?)?;
        let trail = Layer::new(dom::overlay_canvas(
            document,
            TRAIL_CANVAS_ID,
            TRAIL_Z_INDEX,
            Some(TRAIL_BLEND_MODE),
        )?)?;
        let scratch = Layer::new((dom::scratch_canvas(document)?, Provenance::Created))?;
        let dpr = paint::effective_dpr(window.device_pixel_ratio(), MAX_DEVICE_PIXEL_RATIO);
        let goo_filter = match install_goo(document, &trail.ctx, goo, dpr) {
            Ok(install) => Some(install),
            Err(e) => {
                log::warn!("[render] goo filter unavailable, trail shapes drawn unfused: {e}");
                None
            }
        };
        Ok(Self {
            window: window.clone(),
            stars,
            trail,
            scratch,
            goo: *goo,
            goo_filter,
            frames: 0,
        })
    }

    fn draw_stars(&self, stars: &[StarSprite]) {
        let ctx = &self.stars.ctx;
        ctx.set_fill_style_str(STAR_COLOR);
        for s in stars {
            ctx.set_global_alpha(s.opacity as f64);
            self.stars.circle(s.center, s.size * 0.5);
        }
        ctx.set_global_alpha(1.0);
    }

    fn draw_trail(&self, t: &TrailShape, dpr: f64) {
        match &self.goo_filter {
            Some(install) => {
                paint_goo_shapes(&self.scratch, t);
                let ctx = &self.trail.ctx;
                _ = ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
                ctx.set_filter(&install.url);
                _ = ctx.draw_image_with_html_canvas_element(&self.scratch.canvas, 0.0, 0.0);
                ctx.set_filter("none");
                _ = ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
            }
            None => paint_goo_shapes(&self.trail, t),
        }

        if t.hole_opacity > 0.0 {
            let ctx = &self.trail.ctx;
            ctx.set_global_alpha(t.hole_opacity as f64);
            ctx.set_fill_style_str(HOLE_COLOR);
            self.trail.circle(t.leader, t.hole_radius);
            ctx.set_global_alpha(1.0);
        }
    }
}

impl Renderer for CanvasRenderer {
    fn draw(&mut self, frame: &FrameDraw<'_>) {
        let dpr = paint::effective_dpr(self.window.device_pixel_ratio(), MAX_DEVICE_PIXEL_RATIO);
        let size = paint::backing_size(frame.viewport, dpr);

        self.stars.begin(size, dpr);
        self.draw_stars(frame.stars);

        self.trail.begin(size, dpr);
        if let Some(install) = &mut self.goo_filter {
            install.sync_dpr(&self.goo, dpr);
            self.scratch.begin(size, dpr);
        }
        if let Some(t) = &frame.trail {
            self.draw_trail(t, dpr);
        }

        self.frames += 1;
        if self.frames % STATS_LOG_EVERY_FRAMES == 0 {
            log::debug!(
                "[render] {} frames, {} stars, viewport {}x{} @{:.2}",
                self.frames,
                frame.stars.len(),
                frame.viewport.x,
                frame.viewport.y,
                dpr
            );
        }
    }
}

impl Drop for CanvasRenderer {
    fn drop(&mut self) {
        self.stars.teardown();
        self.trail.teardown();
        if let Some(holder) = self.goo_filter.as_mut().and_then(|g| g.holder.take()) {
            holder.remove();
        }
        log::debug!("[render] overlays torn down after {} frames", self.frames);
    }
}

fn paint_goo_shapes(layer: &Layer, t: &TrailShape) {
    layer.ctx.set_fill_style_str(TRAIL_COLOR);
    layer.circle(t.leader, t.leader_radius);
    layer.ellipse(t.blob, t.major_radius, t.minor_radius, t.angle_rad());
}

fn install_goo(
    document: &web::Document,
    ctx: &web::CanvasRenderingContext2d,
    goo: &GooFilter,
    dpr: f64,
) -> anyhow::Result<GooInstall> {
    let supported = js_sys::Reflect::has(ctx.as_ref(), &JsValue::from_str("filter"))
        .unwrap_or(false);
    if !supported {
        anyhow::bail!("CanvasRenderingContext2D.filter is not supported");
    }
    let holder = dom::install_svg(
        document,
        GOO_FILTER_ID,
        &paint::goo_svg_markup(GOO_FILTER_ID, goo, dpr),
    )?;
    Ok(GooInstall {
        url: paint::filter_url(GOO_FILTER_ID),
        blur: document.get_element_by_id(&paint::blur_element_id(GOO_FILTER_ID)),
        holder,
        dpr,
    })
}
