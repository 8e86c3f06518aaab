use crate::WebFx;
use anyhow::anyhow;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Weak;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Window-level `pointermove` listener feeding the effects' pointer sampler.
/// The listener is removed when the subscription is dropped.
pub struct PointerSubscription {
    window: web::Window,
    closure: Closure<dyn FnMut(web::PointerEvent)>,
}

impl PointerSubscription {
    pub fn attach(window: &web::Window, fx: Weak<RefCell<WebFx>>) -> anyhow::Result<Self> {
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            // secondary touch points are ignored
            if !ev.is_primary() {
                return;
            }
            let Some(fx) = fx.upgrade() else {
                return;
            };
            let pos = Vec2::new(ev.client_x() as f32, ev.client_y() as f32);
            match fx.try_borrow_mut() {
                Ok(mut fx) => fx.pointer_move(pos),
                Err(_) => log::warn!("[pointer] move dropped: effects busy"),
            }
        }) as Box<dyn FnMut(_)>);

        window
            .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref())
            .map_err(|e| anyhow!("pointermove listener: {:?}", e))?;

        Ok(Self {
            window: window.clone(),
            closure,
        })
    }
}

impl Drop for PointerSubscription {
    fn drop(&mut self) {
        _ = self.window.remove_event_listener_with_callback(
            "pointermove",
            self.closure.as_ref().unchecked_ref(),
        );
    }
}
