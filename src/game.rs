//! Boundary to the external game logic.

use crate::input::Command;

/// A projectile position in map tiles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub x: f64,
    pub y: f64,
}

/// Capabilities this layer needs from the game-logic object.
///
/// The game owns all simulation state; the presentation layer only issues
/// commands and reads accessors.
pub trait GameModel {
    fn start(&mut self);
    fn move_up(&mut self);
    fn move_down(&mut self);
    fn fire(&mut self);
    /// Advance the simulation by one tick.
    fn update(&mut self);

    /// Row-major tile codes of the visible window.
    fn visible_map(&self) -> Vec<u8>;
    fn visible_width(&self) -> u32;
    fn visible_height(&self) -> u32;
    /// Horizontal scroll of the visible window, in tiles.
    fn scroll_offset(&self) -> f64;
    fn player_row(&self) -> f64;
    fn projectiles(&self) -> Vec<Projectile>;

    fn is_ended(&self) -> bool;
    fn is_won(&self) -> bool;

    fn apply(&mut self, command: Command) {
        match command {
            Command::MoveUp => self.move_up(),
            Command::MoveDown => self.move_down(),
            Command::Fire => self.fire(),
        }
    }
}

/// Everything the renderer needs from one frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    pub map: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub scroll: f64,
    pub player_row: f64,
    pub projectiles: Vec<Projectile>,
}

impl Scene {
    pub fn capture<G: GameModel + ?Sized>(game: &G) -> Self {
        Scene {
            map: game.visible_map(),
            width: game.visible_width(),
            height: game.visible_height(),
            scroll: game.scroll_offset(),
            player_row: game.player_row(),
            projectiles: game.projectiles(),
        }
    }

    /// Tile code at `(x, y)`; positions past the end of the buffer read as 0.
    pub fn tile_code(&self, x: u32, y: u32) -> u8 {
        let index = y as usize * self.width as usize + x as usize;
        self.map.get(index).copied().unwrap_or(0)
    }
}
