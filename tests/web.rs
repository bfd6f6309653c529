#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen_futures::JsFuture;

use shooter_viz::session::RESTART_LABEL;
use shooter_viz::{
    CanvasSurface, Config, DomHud, FrameLoop, GameModel, Hud, JsGame, Projectile, Renderer, Scene,
};

wasm_bindgen_test_configure!(run_in_browser);

const STUB_GAME: &str = r#"
globalThis.Game = class {
    constructor() { this.row = 1; this.ticks = 0; this.shots = 0; }
    start() {}
    move_up() { this.row -= 1; }
    move_down() { this.row += 1; }
    fire() { this.shots += 1; }
    update() { this.ticks += 1; }
    get_visible_map() { return new Uint8Array([0, 1, 2, 1, 0, 2]); }
    get_visible_width() { return 3; }
    get_visible_height() { return 2; }
    get_visible_offset() { return this.ticks * 0.25; }
    get_player() { const y = this.row; return { y: () => y }; }
    get_projectiles() { return new Float64Array([1, 0.5, 2, 1.5]); }
    is_ended() { return this.ticks >= 2; }
    is_won() { return this.shots > 0; }
};
"#;

fn install_stub() {
    js_sys::eval(STUB_GAME).expect("stub Game class");
}

fn canvas() -> web_sys::HtmlCanvasElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let canvas = document
        .create_element("canvas")
        .unwrap()
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .unwrap();
    canvas.set_width(300);
    canvas.set_height(200);
    document.body().unwrap().append_child(&canvas).unwrap();
    canvas
}

#[wasm_bindgen_test]
fn game_binding_reads_accessors() {
    install_stub();
    let mut game = JsGame::create().expect("construct Game");

    assert_eq!(game.visible_width(), 3);
    assert_eq!(game.visible_height(), 2);
    assert_eq!(game.visible_map(), vec![0, 1, 2, 1, 0, 2]);
    assert_eq!(
        game.projectiles(),
        vec![Projectile { x: 1.0, y: 0.5 }, Projectile { x: 2.0, y: 1.5 }]
    );

    game.move_down();
    assert_eq!(game.player_row(), 2.0);

    game.update();
    assert_eq!(game.scroll_offset(), 0.25);
    assert!(!game.is_ended());
    game.update();
    assert!(game.is_ended());
    assert!(!game.is_won());
    game.fire();
    assert!(game.is_won());
}

#[wasm_bindgen_test]
fn canvas_surface_draws_full_grid() {
    install_stub();
    let game = JsGame::create().unwrap();
    let config = Config {
        player_sprite: "missing/ship.png".into(),
        obstacle_sprite: "missing/rock.png".into(),
        ..Config::default()
    };

    let mut surface = CanvasSurface::new(canvas(), &config).expect("2d context");
    let renderer = Renderer::new(config);
    let stats = renderer.draw(&mut surface, &Scene::capture(&game));

    assert_eq!(stats.tiles, 6);
    assert_eq!(stats.projectiles, 2);
}

/// Resolves on the next animation frame, after callbacks queued earlier.
async fn next_frame() {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        web_sys::window()
            .unwrap()
            .request_animation_frame(&resolve)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

#[wasm_bindgen_test(async)]
async fn frame_loop_runs_until_stopped() {
    let frames = Rc::new(Cell::new(0u32));
    let counter = frames.clone();
    let frame_loop = FrameLoop::start(move || counter.set(counter.get() + 1)).unwrap();

    for _ in 0..3 {
        next_frame().await;
    }
    let before_stop = frames.get();
    assert!(before_stop >= 3, "ran {before_stop} frames");

    frame_loop.stop();
    assert!(!frame_loop.is_running());
    for _ in 0..3 {
        next_frame().await;
    }
    assert_eq!(frames.get(), before_stop);
}

#[wasm_bindgen_test]
fn dom_hud_shows_and_clears_status() {
    let document = web_sys::window().unwrap().document().unwrap();
    let button = document
        .create_element("button")
        .unwrap()
        .dyn_into::<web_sys::HtmlButtonElement>()
        .unwrap();
    button.set_text_content(Some("Start"));
    button.set_disabled(true);
    let status = document
        .create_element("p")
        .unwrap()
        .dyn_into::<web_sys::HtmlElement>()
        .unwrap();

    let mut hud = DomHud {
        button: button.clone(),
        status: status.clone(),
    };
    hud.set_start_enabled(true);
    hud.set_start_label(RESTART_LABEL);
    hud.set_status(Some(("Game Over", "red")));

    assert!(!button.disabled());
    assert_eq!(button.text_content().as_deref(), Some("Restart"));
    assert_eq!(status.text_content().as_deref(), Some("Game Over"));
    assert_eq!(status.style().get_property_value("color").unwrap(), "red");

    hud.set_start_enabled(false);
    hud.set_status(None);
    assert!(button.disabled());
    assert_eq!(status.text_content().as_deref(), Some(""));
    assert_eq!(status.style().get_property_value("color").unwrap(), "");
}
