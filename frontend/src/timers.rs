use gloo_timers::callback::Timeout;
use loader_shared::{Scheduler, TimerHandle};

/// Schedules loader timers with the browser's `setTimeout`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserScheduler;

/// A pending `setTimeout`. Dropping it clears the timeout.
pub struct BrowserTimer(Timeout);

impl Scheduler for BrowserScheduler {
    type Handle = BrowserTimer;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> BrowserTimer {
        BrowserTimer(Timeout::new(delay_ms, task))
    }
}

impl TimerHandle for BrowserTimer {
    fn cancel(self) {
        let _ = self.0.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gloo_timers::future::TimeoutFuture;
    use std::cell::Cell;
    use std::rc::Rc;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn flag() -> (Rc<Cell<bool>>, Box<dyn FnOnce()>) {
        let fired = Rc::new(Cell::new(false));
        let fired_clone = fired.clone();
        (fired, Box::new(move || fired_clone.set(true)))
    }

    #[wasm_bindgen_test]
    async fn test_scheduled_timer_fires() {
        let (fired, task) = flag();

        let _timer = BrowserScheduler.schedule(10, task);
        assert!(!fired.get());

        TimeoutFuture::new(50).await;
        assert!(fired.get());
    }

    #[wasm_bindgen_test]
    async fn test_cancelled_timer_does_not_fire() {
        let (fired, task) = flag();

        let timer = BrowserScheduler.schedule(10, task);
        timer.cancel();

        TimeoutFuture::new(50).await;
        assert!(!fired.get());
    }
}
