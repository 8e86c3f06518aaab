use ambient_core::{Scheduler, Task, TaskHandle};
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Routes a fired task back into the effects.
pub type Dispatch = Rc<dyn Fn(Task)>;

#[derive(Clone, Copy, Debug)]
enum JsTimer {
    Interval(i32),
    Timeout(i32),
    Frame(i32),
}

#[derive(Clone, Copy)]
enum Arm {
    Every(Duration),
    After(Duration),
    Frame,
}

struct Live {
    timer: JsTimer,
    _closure: Closure<dyn FnMut()>,
}

/// [`Scheduler`] over `setInterval`, `setTimeout` and `requestAnimationFrame`.
///
/// Closures stay owned here until their timer is cancelled or, for one-shot
/// timers, has fired. Retired closures are parked for one more call so a
/// callback is never dropped while it is still on the stack.
pub struct WebScheduler {
    window: web::Window,
    origin: Instant,
    dispatch: Dispatch,
    next_id: u64,
    live: HashMap<u64, Live>,
    finished: Rc<RefCell<Vec<u64>>>,
    busy: Rc<Cell<Option<u64>>>,
    retired: Vec<(u64, Live)>,
}

impl WebScheduler {
    pub fn new(window: web::Window, dispatch: Dispatch) -> Self {
        Self {
            window,
            origin: Instant::now(),
            dispatch,
            next_id: 0,
            live: HashMap::new(),
            finished: Rc::new(RefCell::new(Vec::new())),
            busy: Rc::new(Cell::new(None)),
            retired: Vec::new(),
        }
    }

    fn reap(&mut self) {
        let busy = self.busy.get();
        self.retired.retain(|(id, _)| Some(*id) == busy);
        for id in self.finished.borrow_mut().drain(..) {
            if let Some(live) = self.live.remove(&id) {
                self.retired.push((id, live));
            }
        }
    }

    fn clear(&self, timer: JsTimer) {
        match timer {
            JsTimer::Interval(h) => self.window.clear_interval_with_handle(h),
            JsTimer::Timeout(h) => self.window.clear_timeout_with_handle(h),
            JsTimer::Frame(h) => {
                _ = self.window.cancel_animation_frame(h);
            }
        }
    }

    fn arm(&mut self, arm: Arm, task: Task) -> TaskHandle {
        self.reap();
        self.next_id += 1;
        let id = self.next_id;
        let one_shot = !matches!(arm, Arm::Every(_));

        let dispatch = self.dispatch.clone();
        let finished = self.finished.clone();
        let busy = self.busy.clone();
        let closure = Closure::wrap(Box::new(move || {
            if one_shot {
                finished.borrow_mut().push(id);
            }
            let outer = busy.replace(Some(id));
            dispatch(task);
            busy.set(outer);
        }) as Box<dyn FnMut()>);

        let f = closure.as_ref().unchecked_ref();
        let registered = match arm {
            Arm::Every(period) => self
                .window
                .set_interval_with_callback_and_timeout_and_arguments_0(f, millis(period))
                .map(JsTimer::Interval),
            Arm::After(delay) => self
                .window
                .set_timeout_with_callback_and_timeout_and_arguments_0(f, millis(delay))
                .map(JsTimer::Timeout),
            Arm::Frame => self.window.request_animation_frame(f).map(JsTimer::Frame),
        };
        match registered {
            Ok(timer) => {
                self.live.insert(
                    id,
                    Live {
                        timer,
                        _closure: closure,
                    },
                );
            }
            Err(e) => log::error!("[sched] could not schedule {:?}: {:?}", task, e),
        }
        TaskHandle::new(id)
    }
}

fn millis(d: Duration) -> i32 {
    d.as_millis().min(i32::MAX as u128) as i32
}

impl Scheduler for WebScheduler {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn every(&mut self, period: Duration, task: Task) -> TaskHandle {
        self.arm(Arm::Every(period), task)
    }

    fn after(&mut self, delay: Duration, task: Task) -> TaskHandle {
        self.arm(Arm::After(delay), task)
    }

    fn next_frame(&mut self, task: Task) -> TaskHandle {
        self.arm(Arm::Frame, task)
    }

    fn cancel(&mut self, handle: TaskHandle) {
        self.reap();
        if let Some(live) = self.live.remove(&handle.id()) {
            self.clear(live.timer);
            self.retired.push((handle.id(), live));
        }
    }
}

impl Drop for WebScheduler {
    fn drop(&mut self) {
        let live: Vec<Live> = self.live.drain().map(|(_, l)| l).collect();
        for l in &live {
            self.clear(l.timer);
        }
        if !live.is_empty() {
            log::debug!("[sched] cleared {} timers on drop", live.len());
        }
    }
}
