//! Imports of the game-logic `Game` class.
//!
//! The class is looked up on the global object, so the host page must load the
//! game-logic module and expose `Game` before this crate starts.

use js_sys::{Float64Array, Uint8Array};
use wasm_bindgen::prelude::*;

use crate::error::Result;
use crate::game::{GameModel, Projectile};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = Game)]
    pub type JsGame;

    #[wasm_bindgen(constructor, js_class = "Game", catch)]
    fn construct() -> std::result::Result<JsGame, JsValue>;

    #[wasm_bindgen(method, js_name = start)]
    fn js_start(this: &JsGame);
    #[wasm_bindgen(method, js_name = move_up)]
    fn js_move_up(this: &JsGame);
    #[wasm_bindgen(method, js_name = move_down)]
    fn js_move_down(this: &JsGame);
    #[wasm_bindgen(method, js_name = fire)]
    fn js_fire(this: &JsGame);
    #[wasm_bindgen(method, js_name = update)]
    fn js_update(this: &JsGame);

    #[wasm_bindgen(method)]
    fn get_visible_map(this: &JsGame) -> Uint8Array;
    #[wasm_bindgen(method)]
    fn get_visible_width(this: &JsGame) -> u32;
    #[wasm_bindgen(method)]
    fn get_visible_height(this: &JsGame) -> u32;
    #[wasm_bindgen(method)]
    fn get_visible_offset(this: &JsGame) -> f64;
    #[wasm_bindgen(method)]
    fn get_player(this: &JsGame) -> JsPlayer;
    #[wasm_bindgen(method)]
    fn get_projectiles(this: &JsGame) -> Float64Array;
    #[wasm_bindgen(method, js_name = is_ended)]
    fn js_is_ended(this: &JsGame) -> bool;
    #[wasm_bindgen(method, js_name = is_won)]
    fn js_is_won(this: &JsGame) -> bool;

    pub type JsPlayer;

    #[wasm_bindgen(method)]
    fn y(this: &JsPlayer) -> f64;
}

impl JsGame {
    /// `new Game()`; fails if the class is missing or its constructor throws.
    pub fn create() -> Result<JsGame> {
        Ok(JsGame::construct()?)
    }
}

impl GameModel for JsGame {
    fn start(&mut self) {
        self.js_start();
    }

    fn move_up(&mut self) {
        self.js_move_up();
    }

    fn move_down(&mut self) {
        self.js_move_down();
    }

    fn fire(&mut self) {
        self.js_fire();
    }

    fn update(&mut self) {
        self.js_update();
    }

    fn visible_map(&self) -> Vec<u8> {
        self.get_visible_map().to_vec()
    }

    fn visible_width(&self) -> u32 {
        self.get_visible_width()
    }

    fn visible_height(&self) -> u32 {
        self.get_visible_height()
    }

    fn scroll_offset(&self) -> f64 {
        self.get_visible_offset()
    }

    fn player_row(&self) -> f64 {
        self.get_player().y()
    }

    fn projectiles(&self) -> Vec<Projectile> {
        // Flat [x0, y0, x1, y1, ...].
        self.get_projectiles()
            .to_vec()
            .chunks_exact(2)
            .map(|xy| Projectile { x: xy[0], y: xy[1] })
            .collect()
    }

    fn is_ended(&self) -> bool {
        self.js_is_ended()
    }

    fn is_won(&self) -> bool {
        self.js_is_won()
    }
}
