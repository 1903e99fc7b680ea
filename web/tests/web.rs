#![cfg(target_arch = "wasm32")]

use memoria_core::{Difficulty, HighScoreStore, JsonHighScoreStore, StorageBackend};
use memoria_web::{
    LocalStorageBackend, MemoryGame, difficulty_description, difficulty_display_name,
    format_time,
};
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

const TEST_KEY: &str = "memoria:test:scores";

fn new_game(difficulty: &str) -> MemoryGame {
    match MemoryGame::new(difficulty) {
        Ok(game) => game,
        Err(_) => panic!("could not create a {} game", difficulty),
    }
}

fn state_of(game: &MemoryGame) -> serde_json::Value {
    let Ok(raw) = game.state_json() else {
        panic!("state did not serialize");
    };
    serde_json::from_str(&raw).unwrap()
}

#[wasm_bindgen_test]
fn local_storage_backend_round_trips() {
    let mut backend = LocalStorageBackend;
    backend.write("memoria:test:raw", "42").unwrap();

    assert_eq!(
        backend.read("memoria:test:raw").unwrap().as_deref(),
        Some("42")
    );
    assert_eq!(backend.read("memoria:test:absent").unwrap(), None);
}

#[wasm_bindgen_test]
fn high_scores_persist_in_local_storage() {
    LocalStorageBackend.write(TEST_KEY, "{}").unwrap();
    let mut store = JsonHighScoreStore::with_key(LocalStorageBackend, TEST_KEY);

    assert!(store.save(Difficulty::Hard, 700));
    assert!(!store.save(Difficulty::Hard, 600));

    let reopened = JsonHighScoreStore::with_key(LocalStorageBackend, TEST_KEY);
    assert_eq!(reopened.load().hard, 700);
    assert_eq!(reopened.load().easy, 0);
}

#[wasm_bindgen_test]
fn new_game_is_playable() {
    let game = new_game("medium");
    let state = state_of(&game);

    assert_eq!(game.status(), "playing");
    assert_eq!(state["cards"].as_array().unwrap().len(), 16);
    assert_eq!(game.flip_card(999), "noChange");
    assert_eq!(game.flip_card(0), "flipped");
    assert_eq!(game.finalize_session().ok().flatten(), None);
}

#[wasm_bindgen_test]
fn pause_round_trips() {
    let game = new_game("easy");

    assert!(game.toggle_pause());
    assert_eq!(game.status(), "paused");
    assert_eq!(game.flip_card(0), "noChange");
    assert!(game.toggle_pause());
    assert_eq!(game.status(), "playing");
}

#[wasm_bindgen_test]
fn unknown_difficulty_is_rejected() {
    assert!(MemoryGame::new("nightmare").is_err());
    let game = new_game("easy");
    assert!(game.start_new_game("nightmare").is_err());
    assert!(game.start_new_game("expert").is_ok());
}

#[wasm_bindgen_test]
fn difficulty_labels_reach_the_shell() {
    assert_eq!(difficulty_display_name("hard").ok().as_deref(), Some("Hard (6×4)"));
    assert_eq!(
        difficulty_description("Expert").ok().as_deref(),
        Some("Ultimate challenge - 36 cards to match")
    );
    assert!(difficulty_display_name("nightmare").is_err());
    assert_eq!(format_time(125), "02:05");
}

#[wasm_bindgen_test]
fn successful_flips_fire_on_change() {
    let game = new_game("easy");
    let calls = Rc::new(Cell::new(0));
    let counter = calls.clone();
    let callback = Closure::<dyn FnMut()>::new(move || counter.set(counter.get() + 1));
    game.set_on_change(Some(callback.as_ref().unchecked_ref::<js_sys::Function>().clone()));

    assert_eq!(game.flip_card(999), "noChange");
    assert_eq!(calls.get(), 0);
    assert_eq!(game.flip_card(0), "flipped");
    assert_eq!(calls.get(), 1);
}
