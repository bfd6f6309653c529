//! Backend-independent frame drawing.
//!
//! The renderer walks a [`Scene`] and issues primitive calls on a [`Surface`].
//! In the browser the surface is a 2D canvas; tests use a recording surface.

use crate::config::Config;
use crate::game::Scene;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn inset(self, by: f64) -> Self {
        Rect::new(self.x + by, self.y + by, self.w - 2.0 * by, self.h - 2.0 * by)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    Player,
    Obstacle,
}

pub trait Surface {
    /// Canvas size in pixels.
    fn size(&self) -> (f64, f64);
    fn clear(&mut self);
    fn fill_rect(&mut self, rect: Rect, color: &str);
    fn stroke_rect(&mut self, rect: Rect, color: &str, line_width: f64);
    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: &str);
    /// Draws `sprite` into `rect`. Returns `false` if the image is not loaded
    /// yet, in which case nothing was drawn.
    fn draw_sprite(&mut self, sprite: Sprite, rect: Rect) -> bool;
}

/// Kinds of map tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Empty = 0,
    Highlight = 1,
    Obstacle = 2,
}

impl Tile {
    pub fn from_code(code: u8) -> Tile {
        match code {
            1 => Tile::Highlight,
            2 => Tile::Obstacle,
            _ => Tile::Empty,
        }
    }

    pub fn strategy(self) -> TileStrategy {
        TILE_STRATEGIES[self as usize]
    }
}

/// Color slot in the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ink {
    EmptyBorder,
    HighlightBorder,
    ObstacleFallback,
}

impl Ink {
    fn resolve(self, config: &Config) -> &str {
        let p = &config.palette;
        match self {
            Ink::EmptyBorder => &p.empty_border,
            Ink::HighlightBorder => &p.highlight_border,
            Ink::ObstacleFallback => &p.obstacle_fallback,
        }
    }
}

/// How a tile kind is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileStrategy {
    Outline(Ink),
    Sprite { sprite: Sprite, fallback: Ink },
}

/// Indexed by `Tile as usize`.
const TILE_STRATEGIES: [TileStrategy; 3] = [
    TileStrategy::Outline(Ink::EmptyBorder),
    TileStrategy::Outline(Ink::HighlightBorder),
    TileStrategy::Sprite {
        sprite: Sprite::Obstacle,
        fallback: Ink::ObstacleFallback,
    },
];

const TILE_PADDING: f64 = 0.05;
const TILE_LINE_WIDTH: f64 = 3.0;
const PROJECTILE_RADIUS: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    pub tiles: usize,
    pub projectiles: usize,
}

pub struct Renderer {
    config: Config,
}

impl Renderer {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn draw(&self, surface: &mut dyn Surface, scene: &Scene) -> FrameStats {
        let (w, h) = surface.size();
        surface.clear();
        surface.fill_rect(Rect::new(0.0, 0.0, w, h), &self.config.palette.background);

        let tiles = self.draw_map(surface, scene);
        self.draw_player(surface, scene);
        let projectiles = self.draw_projectiles(surface, scene);
        FrameStats { tiles, projectiles }
    }

    fn draw_map(&self, surface: &mut dyn Surface, scene: &Scene) -> usize {
        let ts = self.config.tile_size;
        let mut drawn = 0;
        for y in 0..scene.height {
            for x in 0..scene.width {
                let cell = Rect::new(x as f64 * ts, y as f64 * ts, ts, ts);
                let tile = Tile::from_code(scene.tile_code(x, y));
                self.draw_tile(surface, tile, cell);
                drawn += 1;
            }
        }
        drawn
    }

    fn draw_tile(&self, surface: &mut dyn Surface, tile: Tile, cell: Rect) {
        match tile.strategy() {
            TileStrategy::Outline(ink) => {
                let rect = cell.inset(self.config.tile_size * TILE_PADDING);
                surface.stroke_rect(rect, ink.resolve(&self.config), TILE_LINE_WIDTH);
            }
            TileStrategy::Sprite { sprite, fallback } => {
                if !surface.draw_sprite(sprite, cell) {
                    surface.fill_rect(cell, fallback.resolve(&self.config));
                }
            }
        }
    }

    fn draw_player(&self, surface: &mut dyn Surface, scene: &Scene) {
        let ts = self.config.tile_size;
        let rect = Rect::new(0.0, scene.player_row * ts, ts, ts);
        if !surface.draw_sprite(Sprite::Player, rect) {
            surface.fill_rect(rect, &self.config.palette.player_fallback);
        }
    }

    fn draw_projectiles(&self, surface: &mut dyn Surface, scene: &Scene) -> usize {
        let ts = self.config.tile_size;
        for p in &scene.projectiles {
            let cx = (p.x - scene.scroll) * ts + ts / 2.0;
            let cy = p.y * ts + ts / 2.0;
            surface.fill_circle(cx, cy, ts * PROJECTILE_RADIUS, &self.config.palette.projectile);
        }
        scene.projectiles.len()
    }
}
