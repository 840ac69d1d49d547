//! Polar Asteroids - a fixed-tick asteroid arena
//!
//! Core modules:
//! - `sim`: Deterministic simulation (outlines, entity stores, collisions, game state)
//! - `config`: Immutable arena tuning threaded into the simulation
//! - `persistence`: `name,score` results file
//! - `highscores`: Sorted results listing

pub mod config;
pub mod error;
pub mod highscores;
pub mod persistence;
pub mod sim;

pub use config::ArenaConfig;
pub use error::{Error, Result};
pub use highscores::Leaderboard;
pub use persistence::{ResultsFile, ScoreRecord};

/// Fixed geometry that never changes between rounds
pub mod consts {
    use std::f32::consts::PI;

    /// Target simulation rate
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICKS_PER_SECOND as f32;

    /// Ship bounding radius (also the distance of every triangle vertex from the center)
    pub const SHIP_RADIUS: f32 = 30.0;
    /// Ship triangle as polar offsets: nose, then the two rear corners
    pub const SHIP_OUTLINE: [(f32, f32); 3] = [
        (SHIP_RADIUS, 0.0),
        (SHIP_RADIUS, -3.0 * PI / 4.0),
        (SHIP_RADIUS, -5.0 * PI / 4.0),
    ];

    /// Projectile bounding radius
    pub const PROJECTILE_RADIUS: f32 = 5.0;

    /// Asteroid bounding radius (largest outline sample)
    pub const ASTEROID_RADIUS: f32 = 50.0;
    /// Asteroid outline as (radius, angle) samples
    pub const ASTEROID_OUTLINE: [(f32, f32); 7] = [
        (50.0, 0.0),
        (45.0, 7.0 * PI / 4.0),
        (30.0, 4.0 * PI / 3.0),
        (50.0, 3.0 * PI / 4.0),
        (20.0, PI / 2.0),
        (30.0, PI / 3.0),
        (50.0, PI / 6.0),
    ];

    /// Longest player name accepted on the game over screen
    pub const MAX_NAME_LEN: usize = 16;
}

/// Wrap an angle into (-2π, 2π) keeping its sign, like C `fmod`
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    angle % std::f32::consts::TAU
}
