#![cfg(target_arch = "wasm32")]
use ambient_core::{AmbientFx, FxConfig, Task};
use anyhow::anyhow;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod paint;
mod render;

pub(crate) type WebFx =
    AmbientFx<frame::WebScheduler, StdRng, render::WindowViewport, render::CanvasRenderer>;

struct Mounted {
    fx: Rc<RefCell<WebFx>>,
    // dropped after fx is stopped, removing the pointermove listener
    _pointer: events::PointerSubscription,
}

thread_local! {
    static MOUNTED: RefCell<Option<Mounted>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("ambient-web starting");
    if let Err(e) = mount() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

/// Tear down and rebuild the effects, e.g. after the page swapped its body.
#[wasm_bindgen]
pub fn remount() {
    if let Err(e) = mount() {
        log::error!("remount error: {:?}", e);
    }
}

/// Stop every timer and frame callback, detach from pointer input and clear
/// the overlays. Calling it again is a no-op.
#[wasm_bindgen]
pub fn unmount() {
    let mounted = MOUNTED.with(|m| m.borrow_mut().take());
    if let Some(m) = mounted {
        m.fx.borrow_mut().stop();
        // sole strong owner: dropping it drops the renderer, which blanks and
        // removes the canvases and the filter markup
        drop(m);
        log::info!("ambient-web unmounted");
    }
}

fn mount() -> anyhow::Result<()> {
    unmount();

    let window = web::window().ok_or_else(|| anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow!("no document"))?;

    let config = FxConfig::default();
    let renderer = render::CanvasRenderer::new(&window, &document, &config.trail.goo)?;

    // The scheduler needs a route back into the effects before they exist.
    let target: Rc<RefCell<Weak<RefCell<WebFx>>>> = Rc::new(RefCell::new(Weak::new()));
    let scheduler = frame::WebScheduler::new(window.clone(), dispatcher(target.clone()));

    let fx = AmbientFx::new(
        config,
        scheduler,
        StdRng::from_entropy(),
        render::WindowViewport::new(window.clone()),
        renderer,
    )?;
    let fx = Rc::new(RefCell::new(fx));
    *target.borrow_mut() = Rc::downgrade(&fx);

    let pointer = events::PointerSubscription::attach(&window, Rc::downgrade(&fx))?;
    fx.borrow_mut().start();

    MOUNTED.with(|m| {
        *m.borrow_mut() = Some(Mounted {
            fx,
            _pointer: pointer,
        })
    });
    Ok(())
}

fn dispatcher(target: Rc<RefCell<Weak<RefCell<WebFx>>>>) -> frame::Dispatch {
    Rc::new(move |task: Task| {
        let Some(fx) = target.borrow().upgrade() else {
            return;
        };
        match fx.try_borrow_mut() {
            Ok(mut fx) => fx.run(task),
            Err(_) => log::warn!("[fx] {:?} skipped: effects busy", task),
        };
    })
}
