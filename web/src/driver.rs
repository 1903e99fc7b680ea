use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo::timers::callback::Interval;
use memoria_core::{
    CardId, Difficulty, GameEngine, HighScoreStore, JsonHighScoreStore, SystemClock,
};
use wasm_bindgen::prelude::*;

use crate::storage::LocalStorageBackend;
use crate::utils::js_random_seed;

type WebEngine = GameEngine<JsonHighScoreStore<LocalStorageBackend>, SystemClock>;

/// How often pending mismatch resets and timer ticks are checked.
const POLL_INTERVAL_MS: u32 = 50;

struct Inner {
    engine: WebEngine,
    on_change: Option<js_sys::Function>,
}

/// Engine handle for the JavaScript presentation shell.
///
/// The shell forwards clicks to the methods below and re-reads `stateJson`
/// and `elapsedSecs` whenever it renders. Deferred work (flipping a
/// mismatched pair back, counting seconds) runs on an internal interval that
/// invokes the `onChange` callback after it touched the state.
#[wasm_bindgen]
pub struct MemoryGame {
    inner: Rc<RefCell<Inner>>,
    _poller: Interval,
}

#[wasm_bindgen]
impl MemoryGame {
    #[wasm_bindgen(constructor)]
    pub fn new(difficulty: &str) -> Result<MemoryGame, JsError> {
        let difficulty: Difficulty = difficulty.parse()?;
        let seed = crate::launch_seed().unwrap_or_else(js_random_seed);
        log::debug!("seed: {}", seed);

        let store = JsonHighScoreStore::new(LocalStorageBackend);
        let mut engine = GameEngine::new(store, SystemClock, seed)?;
        engine.start_new_game(difficulty);

        let inner = Rc::new(RefCell::new(Inner {
            engine,
            on_change: None,
        }));
        let poller = Self::create_poller(Rc::downgrade(&inner));

        Ok(Self {
            inner,
            _poller: poller,
        })
    }

    #[wasm_bindgen(js_name = startNewGame)]
    pub fn start_new_game(&self, difficulty: &str) -> Result<(), JsError> {
        let difficulty: Difficulty = difficulty.parse()?;
        self.inner.borrow_mut().engine.start_new_game(difficulty);
        Ok(())
    }

    /// Returns the outcome name: `noChange`, `flipped`, `matched`,
    /// `mismatched` or `won`. Any outcome but `noChange` also fires
    /// `onChange`.
    #[wasm_bindgen(js_name = flipCard)]
    pub fn flip_card(&self, card_id: CardId) -> String {
        let (outcome, callback) = {
            let mut state = self.inner.borrow_mut();
            let outcome = state.engine.flip_card(card_id);
            (outcome, state.on_change.clone())
        };
        if outcome.has_update() {
            notify(callback);
        }
        outcome.name().to_string()
    }

    #[wasm_bindgen(js_name = togglePause)]
    pub fn toggle_pause(&self) -> bool {
        self.inner.borrow_mut().engine.toggle_pause()
    }

    /// Summary JSON of a won game, `undefined` otherwise.
    #[wasm_bindgen(js_name = finalizeSession)]
    pub fn finalize_session(&self) -> Result<Option<String>, JsError> {
        let summary = self.inner.borrow_mut().engine.finalize_session();
        Ok(summary.map(|summary| serde_json::to_string(&summary)).transpose()?)
    }

    #[wasm_bindgen(js_name = stateJson)]
    pub fn state_json(&self) -> Result<String, JsError> {
        Ok(serde_json::to_string(self.inner.borrow().engine.session())?)
    }

    pub fn status(&self) -> String {
        self.inner.borrow().engine.status().name().to_string()
    }

    #[wasm_bindgen(js_name = elapsedSecs)]
    pub fn elapsed_secs(&self) -> u32 {
        self.inner.borrow().engine.elapsed_secs()
    }

    #[wasm_bindgen(js_name = highScoresJson)]
    pub fn high_scores_json(&self) -> Result<String, JsError> {
        let scores = self.inner.borrow().engine.store().load();
        Ok(serde_json::to_string(&scores)?)
    }

    #[wasm_bindgen(js_name = setOnChange)]
    pub fn set_on_change(&self, callback: Option<js_sys::Function>) {
        self.inner.borrow_mut().on_change = callback;
    }
}

impl MemoryGame {
    fn create_poller(inner: Weak<RefCell<Inner>>) -> Interval {
        Interval::new(POLL_INTERVAL_MS, move || {
            let Some(inner) = inner.upgrade() else {
                return;
            };

            let callback = {
                let Ok(mut state) = inner.try_borrow_mut() else {
                    log::trace!("engine busy, retrying on next poll");
                    return;
                };
                if state.engine.run_due() == 0 {
                    return;
                }
                state.on_change.clone()
            };

            notify(callback);
        })
    }
}

fn notify(callback: Option<js_sys::Function>) {
    if let Some(callback) = callback {
        if let Err(err) = callback.call0(&JsValue::NULL) {
            log::error!("onChange callback failed: {:?}", err);
        }
    }
}

/// Menu label for a difficulty, e.g. `Medium (4×4)`.
#[wasm_bindgen(js_name = difficultyDisplayName)]
pub fn difficulty_display_name(difficulty: &str) -> Result<String, JsError> {
    let difficulty: Difficulty = difficulty.parse()?;
    Ok(difficulty.display_name().to_string())
}

#[wasm_bindgen(js_name = difficultyDescription)]
pub fn difficulty_description(difficulty: &str) -> Result<String, JsError> {
    let difficulty: Difficulty = difficulty.parse()?;
    Ok(difficulty.description().to_string())
}

/// Whole seconds as `MM:SS`.
#[wasm_bindgen(js_name = formatTime)]
pub fn format_time(total_secs: u32) -> String {
    memoria_core::format_time(total_secs)
}
