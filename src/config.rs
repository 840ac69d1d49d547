//! Arena configuration
//!
//! Screen size, speeds and spawn odds. Built once (default or JSON file) and
//! handed to `GameState::new`; never mutated afterwards.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Which growth rule a store follows when an append hits capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GrowthPolicy {
    /// New capacity is twice the old one
    #[default]
    Doubling,
    /// New capacity is the old one plus a fixed step
    Additive(usize),
}

impl GrowthPolicy {
    /// Capacity after growing from `capacity`. Always strictly larger.
    pub fn grow(&self, capacity: usize) -> usize {
        match *self {
            GrowthPolicy::Doubling => (capacity * 2).max(capacity + 1),
            GrowthPolicy::Additive(step) => capacity + step.max(1),
        }
    }
}

/// Arena tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Visible area width in pixels
    pub screen_width: f32,
    /// Visible area height in pixels
    pub screen_height: f32,

    // === Ship ===
    /// Where a fresh ship appears
    pub ship_start: (f32, f32),
    /// Heading change per rotate input (radians)
    pub ship_rotation_step: f32,
    /// Distance per thrust input
    pub ship_move_step: f32,

    // === Projectiles ===
    /// Distance a projectile travels each tick
    pub projectile_speed: f32,
    /// Starting capacity of the projectile store
    pub projectile_capacity: usize,
    /// How the projectile store grows
    pub projectile_growth: GrowthPolicy,

    // === Asteroids ===
    /// Starting capacity of the asteroid store; also the spawn cap
    pub max_asteroids: usize,
    /// One spawn roll succeeds with probability 1 / spawn_one_in
    pub spawn_one_in: u32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            screen_width: 1800.0,
            screen_height: 1450.0,

            ship_start: (500.0, 500.0),
            ship_rotation_step: 0.06,
            ship_move_step: 3.0,

            projectile_speed: 9.0,
            projectile_capacity: 16,
            projectile_growth: GrowthPolicy::Doubling,

            max_asteroids: 9,
            spawn_one_in: 61,
        }
    }
}

impl ArenaConfig {
    /// Load and validate a JSON config file. Missing fields take defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config: ArenaConfig = serde_json::from_str(&json)?;
        config.validate()?;
        log::info!("Loaded arena config from {}", path.display());
        Ok(config)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        if !(self.screen_width > 0.0 && self.screen_height > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "screen must be positive, got {}x{}",
                self.screen_width, self.screen_height
            )));
        }
        let speeds = [
            ("ship_rotation_step", self.ship_rotation_step),
            ("ship_move_step", self.ship_move_step),
            ("projectile_speed", self.projectile_speed),
            ("ship_start.x", self.ship_start.0),
            ("ship_start.y", self.ship_start.1),
        ];
        if let Some((name, _)) = speeds.iter().find(|(_, v)| !v.is_finite()) {
            return Err(Error::InvalidConfig(format!("{name} must be finite")));
        }
        if self.spawn_one_in == 0 {
            return Err(Error::InvalidConfig("spawn_one_in must be at least 1".into()));
        }
        Ok(())
    }

    /// Chance that a single spawn roll triggers. Zero odds count as one in one.
    pub fn spawn_probability(&self) -> f64 {
        1.0 / self.spawn_one_in.max(1) as f64
    }
}
