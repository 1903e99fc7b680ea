use core::cell::Cell;
use core::time::Duration;
use std::rc::Rc;

use crate::Millis;

/// Source of wall-clock time for the engine.
pub trait Clock {
    fn now(&self) -> Millis;
}

/// Real time, backed by `web-time` so it also works on wasm32.
#[derive(Copy, Clone, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Millis {
        use web_time::{SystemTime, UNIX_EPOCH};

        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(elapsed) => elapsed.as_millis().try_into().unwrap_or(Millis::MAX),
            Err(err) => {
                log::warn!("System clock is before the Unix epoch: {}", err);
                0
            }
        }
    }
}

/// Hand-driven clock. Clones share the same time, so a test can keep one
/// handle while the engine owns another.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<Millis>>,
}

impl ManualClock {
    pub fn new(start: Millis) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn set(&self, now: Millis) {
        self.now.set(now);
    }

    pub fn advance(&self, by: Duration) {
        let by: Millis = by.as_millis().try_into().unwrap_or(Millis::MAX);
        self.now.set(self.now.get().saturating_add(by));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Millis {
        self.now.get()
    }
}
