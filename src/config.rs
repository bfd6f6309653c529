use std::time::Duration;

use log::LevelFilter;

use crate::error::{Error, Result};

/// CSS colors used when drawing and in the status line.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub background: String,
    pub empty_border: String,
    pub highlight_border: String,
    pub obstacle_fallback: String,
    pub player_fallback: String,
    pub projectile: String,
    pub win: String,
    pub loss: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: "#000".into(),
            empty_border: "#080808".into(),
            highlight_border: "#00FFFF".into(),
            obstacle_fallback: "#FF8800".into(),
            player_fallback: "red".into(),
            projectile: "#FFFF00".into(),
            win: "green".into(),
            loss: "red".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub canvas_id: String,
    pub start_button_id: String,
    pub status_id: String,
    /// Logical pixels per tile.
    pub tile_size: f64,
    pub tick_interval: Duration,
    pub player_sprite: String,
    pub obstacle_sprite: String,
    pub log_level: LevelFilter,
    pub palette: Palette,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            canvas_id: "gameCanvas".into(),
            start_button_id: "startButton".into(),
            status_id: "gameStatus".into(),
            tile_size: 100.0,
            tick_interval: Duration::from_millis(375),
            player_sprite: "images/spaceship.png".into(),
            obstacle_sprite: "images/asteroid.png".into(),
            log_level: LevelFilter::Info,
            palette: Palette::default(),
        }
    }
}

impl Config {
    /// Applies `data-*` overrides. `lookup` receives the dataset key
    /// (camelCase, as `HTMLElement.dataset` exposes it).
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(value) = lookup("tickMs") {
            let ms = parse_tick_millis(&value)?;
            self.tick_interval = Duration::from_millis(u64::from(ms));
        }
        if let Some(value) = lookup("tileSize") {
            self.tile_size = parse_positive(&value, "tile-size")?;
        }
        if let Some(value) = lookup("playerSprite") {
            self.player_sprite = value;
        }
        if let Some(value) = lookup("obstacleSprite") {
            self.obstacle_sprite = value;
        }
        if let Some(value) = lookup("logLevel") {
            self.log_level = value.trim().parse().map_err(|_| Error::InvalidConfig {
                key: "log-level",
                value: value.clone(),
            })?;
        }
        Ok(self)
    }

    /// Interval in whole milliseconds, as the browser timer API expects.
    ///
    /// Clamped to `1..=MAX_TICK_MS`; `setInterval` converts its delay to a
    /// signed 32-bit integer.
    pub fn tick_millis(&self) -> u32 {
        let ms = u32::try_from(self.tick_interval.as_millis()).unwrap_or(MAX_TICK_MS);
        ms.clamp(1, MAX_TICK_MS)
    }
}

/// Largest delay `setInterval` accepts without wrapping.
pub const MAX_TICK_MS: u32 = i32::MAX as u32;

fn parse_tick_millis(value: &str) -> Result<u32> {
    match value.trim().parse::<u32>() {
        Ok(ms) if (1..=MAX_TICK_MS).contains(&ms) => Ok(ms),
        _ => Err(Error::InvalidConfig {
            key: "tick-ms",
            value: value.to_string(),
        }),
    }
}

fn parse_positive(value: &str, key: &'static str) -> Result<f64> {
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(Error::InvalidConfig {
            key,
            value: value.to_string(),
        }),
    }
}
