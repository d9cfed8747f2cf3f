// File: src/timer.rs
// Purpose: Scheduler backed by window.setTimeout

use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use darna_forms_core::{Scheduler, TaskId};
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

struct Pending {
    handle: i32,
    callback: Closure<dyn FnMut()>,
}

/// Delivers task ids back through `on_fire` once their delay elapsed
///
/// Owns the callback of every armed timeout; a cancelled one is freed
/// right away, a delivered one on the next schedule or cancel.
pub struct BrowserScheduler {
    window: Window,
    on_fire: Rc<dyn Fn(TaskId)>,
    pending: HashMap<TaskId, Pending>,
    // A callback cannot be freed while it is still running
    spent: Vec<Closure<dyn FnMut()>>,
}

impl BrowserScheduler {
    pub fn new(window: Window, on_fire: Rc<dyn Fn(TaskId)>) -> Self {
        Self {
            window,
            on_fire,
            pending: HashMap::new(),
            spent: Vec::new(),
        }
    }

    /// Retire the callback of a task that has run
    pub fn delivered(&mut self, id: TaskId) {
        if let Some(pending) = self.pending.remove(&id) {
            self.spent.push(pending.callback);
        }
    }

    #[cfg(test)]
    fn armed(&self) -> usize {
        self.pending.len()
    }
}

impl Scheduler for BrowserScheduler {
    fn schedule(&mut self, id: TaskId, delay: Duration) {
        self.spent.clear();
        let on_fire = Rc::clone(&self.on_fire);
        let callback = Closure::<dyn FnMut()>::new(move || on_fire(id));
        let timeout = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                timeout,
            ) {
            Ok(handle) => {
                self.pending.insert(id, Pending { handle, callback });
            }
            Err(err) => warn!(task = id.0, error = ?err, "setTimeout failed"),
        }
    }

    fn cancel(&mut self, id: TaskId) {
        self.spent.clear();
        if let Some(pending) = self.pending.remove(&id) {
            self.window.clear_timeout_with_handle(pending.handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use wasm_bindgen_test::*;

    fn scheduler() -> (BrowserScheduler, Rc<RefCell<Vec<TaskId>>>) {
        let fired = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&fired);
        let on_fire: Rc<dyn Fn(TaskId)> = Rc::new(move |id| log.borrow_mut().push(id));
        let window = web_sys::window().unwrap();
        (BrowserScheduler::new(window, on_fire), fired)
    }

    #[wasm_bindgen_test]
    fn test_cancel_frees_the_callback() {
        let (mut scheduler, fired) = scheduler();
        scheduler.schedule(TaskId(1), Duration::from_secs(60));
        scheduler.schedule(TaskId(2), Duration::from_secs(60));
        assert_eq!(scheduler.armed(), 2);

        scheduler.cancel(TaskId(1));
        assert_eq!(scheduler.armed(), 1);
        scheduler.cancel(TaskId(2));
        assert_eq!(scheduler.armed(), 0);
        assert!(fired.borrow().is_empty());
    }

    #[wasm_bindgen_test]
    fn test_delivered_task_is_retired() {
        let (mut scheduler, _fired) = scheduler();
        scheduler.schedule(TaskId(7), Duration::from_secs(60));
        scheduler.delivered(TaskId(7));
        assert_eq!(scheduler.armed(), 0);
        // Cancelling a delivered task is a no-op
        scheduler.cancel(TaskId(7));
        assert_eq!(scheduler.armed(), 0);
    }
}
