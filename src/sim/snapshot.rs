//! Read-only frame snapshot for whatever draws the arena
//!
//! Copies out everything a renderer needs so it never holds a reference into
//! the live state.

use glam::Vec2;
use serde::Serialize;

use super::state::{Body, BodyKind, GamePhase, GameState};
use crate::persistence::ScoreRecord;

/// One body as the renderer sees it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodySnapshot {
    pub kind: BodyKind,
    pub center: Vec2,
    pub radius: f32,
    /// World-space outline; empty for projectiles (drawn as circles)
    pub outline: Vec<Vec2>,
}

impl BodySnapshot {
    pub fn of(body: &impl Body) -> Self {
        Self {
            kind: body.kind(),
            center: body.center(),
            radius: body.bounding_radius(),
            outline: body.outline().to_vec(),
        }
    }

    /// Closed outline as line segments (last vertex joins the first)
    pub fn segments(&self) -> Vec<(Vec2, Vec2)> {
        let n = self.outline.len();
        if n < 2 {
            return Vec::new();
        }
        (0..n)
            .map(|i| (self.outline[i], self.outline[(i + 1) % n]))
            .collect()
    }
}

/// Everything drawn in one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot {
    pub phase: GamePhase,
    pub score: u32,
    pub tick: u64,
    pub ship: BodySnapshot,
    pub asteroids: Vec<BodySnapshot>,
    pub projectiles: Vec<BodySnapshot>,
    /// Name typed so far on the game over screen
    pub player_name: String,
    /// Listed results on the results screen
    pub results: Vec<ScoreRecord>,
}

impl FrameSnapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            phase: state.phase,
            score: state.score,
            tick: state.time_ticks,
            ship: BodySnapshot::of(&state.ship),
            asteroids: state.asteroids.iter().map(BodySnapshot::of).collect(),
            projectiles: state.projectiles.iter().map(BodySnapshot::of).collect(),
            player_name: state.player_name.clone(),
            results: state.leaderboard.entries.clone(),
        }
    }

    /// HUD lines shown while playing
    pub fn info_lines(&self) -> [String; 3] {
        [
            format!("Projectiles: {}", self.projectiles.len()),
            format!("Asteroids: {}", self.asteroids.len()),
            format!("Score: {}", self.score),
        ]
    }
}
