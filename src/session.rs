//! Session controller shared by the frame and tick callbacks.
//!
//! Owns the current game instance, the debounced keyboard, the session phase
//! and the update-timer handle. Timer cancellation is dropping the handle.

use log::{debug, error, info, trace};

use crate::config::Config;
use crate::error::Result;
use crate::game::{GameModel, Scene};
use crate::input::Keyboard;
use crate::render::{FrameStats, Renderer, Surface};

pub const RESTART_LABEL: &str = "Restart";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

impl Outcome {
    pub fn message(self) -> &'static str {
        match self {
            Outcome::Won => "You win!",
            Outcome::Lost => "Game Over",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Running,
    Ended(Outcome),
}

/// Page controls outside the canvas.
pub trait Hud {
    fn set_start_enabled(&mut self, enabled: bool);
    fn set_start_label(&mut self, label: &str);
    /// `None` clears both text and color.
    fn set_status(&mut self, status: Option<(&str, &str)>);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickResult {
    /// Not running; nothing happened.
    Skipped,
    Advanced,
    Ended(Outcome),
}

type GameFactory<G> = Box<dyn Fn() -> Result<G>>;

pub struct Session<G, H> {
    new_game: GameFactory<G>,
    game: G,
    keys: Keyboard,
    phase: Phase,
    ticker: Option<H>,
    win_color: String,
    loss_color: String,
}

impl<G: GameModel, H> Session<G, H> {
    /// Builds the initial game instance shown before the first start.
    pub fn new(config: &Config, new_game: impl Fn() -> Result<G> + 'static) -> Result<Self> {
        let game = new_game()?;
        let palette = &config.palette;
        Ok(Self {
            new_game: Box::new(new_game),
            game,
            keys: Keyboard::new(),
            phase: Phase::Idle,
            ticker: None,
            win_color: palette.win.clone(),
            loss_color: palette.loss.clone(),
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn has_ticker(&self) -> bool {
        self.ticker.is_some()
    }

    pub fn key_down(&mut self, key: &str) -> bool {
        self.keys.key_down(key)
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        self.keys.key_up(key)
    }

    /// Handles a start/restart click.
    ///
    /// Replaces the game with a fresh instance, then calls `arm` to start the
    /// update timer. Ignored while running. Returns whether a session started.
    pub fn start(
        &mut self,
        hud: &mut dyn Hud,
        arm: impl FnOnce() -> Result<H>,
    ) -> Result<bool> {
        if self.is_running() {
            debug!("start ignored, session already running");
            return Ok(false);
        }

        let mut game = (self.new_game)()?;
        game.start();
        let ticker = arm()?;

        self.game = game;
        self.ticker = Some(ticker);
        self.keys.discard_pending();
        self.phase = Phase::Running;

        hud.set_start_enabled(false);
        hud.set_status(None);
        info!("session started");
        Ok(true)
    }

    /// Advances the game one tick and handles the end of the session.
    pub fn tick(&mut self, hud: &mut dyn Hud) -> TickResult {
        if !self.is_running() {
            return TickResult::Skipped;
        }

        self.game.update();
        if !self.game.is_ended() {
            return TickResult::Advanced;
        }

        let outcome = if self.game.is_won() {
            Outcome::Won
        } else {
            Outcome::Lost
        };
        self.phase = Phase::Ended(outcome);
        self.ticker = None;

        let color = match outcome {
            Outcome::Won => &self.win_color,
            Outcome::Lost => &self.loss_color,
        };
        hud.set_start_enabled(true);
        hud.set_start_label(RESTART_LABEL);
        hud.set_status(Some((outcome.message(), color)));
        info!("session ended: {outcome:?}");
        TickResult::Ended(outcome)
    }

    /// One display frame: draw, then apply debounced input while running.
    pub fn frame(&mut self, renderer: &Renderer, surface: &mut dyn Surface) -> FrameStats {
        let scene = Scene::capture(&self.game);
        let stats = renderer.draw(surface, &scene);

        if self.is_running() {
            for command in self.keys.take_commands() {
                trace!("command {command:?}");
                self.game.apply(command);
            }
        }
        stats
    }

    /// Like [`Session::start`] but logs instead of failing; used from event
    /// callbacks that have nowhere to return an error.
    pub fn start_or_log(&mut self, hud: &mut dyn Hud, arm: impl FnOnce() -> Result<H>) {
        if let Err(err) = self.start(hud, arm) {
            error!("failed to start session: {err}");
        }
    }
}
