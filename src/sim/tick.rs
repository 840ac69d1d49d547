//! Fixed timestep simulation tick
//!
//! One call advances the round by exactly one frame. While playing the order
//! is fixed: ship input, projectiles, asteroids, collision scan, deferred
//! removals, spawn roll.

use std::collections::BTreeSet;

use glam::Vec2;
use rand::Rng;

use super::collision::collides;
use super::state::{Asteroid, Body, GameEvent, GamePhase, GameState, Projectile};
use crate::config::ArenaConfig;
use crate::consts::MAX_NAME_LEN;
use crate::persistence::ScoreRecord;

/// Input signals for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub thrust_forward: bool,
    pub thrust_back: bool,
    /// Edge-triggered: one projectile per press
    pub fire: bool,
    /// Edge-triggered: submit name / leave the results screen
    pub confirm: bool,
    /// Edge-triggered: delete the last name character
    pub backspace: bool,
    /// Printable character typed this frame
    pub typed: Option<char>,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    match state.phase {
        GamePhase::Playing => tick_playing(state, input),
        GamePhase::GameOver => tick_name_entry(state, input),
        GamePhase::Results => {
            if input.confirm {
                let seed = state.rng.random();
                state.restart(seed);
            }
        }
    }
}

fn tick_playing(state: &mut GameState, input: &TickInput) {
    state.time_ticks += 1;

    apply_ship_input(state, input);

    // Projectiles: move, then drop the ones that left the screen (back to front)
    let speed = state.config.projectile_speed;
    for projectile in state.projectiles.iter_mut() {
        projectile.advance(speed);
    }
    for i in (0..state.projectiles.len()).rev() {
        if !state.projectiles[i].is_visible(&state.config) {
            state.projectiles.remove_at(i);
        }
    }

    for asteroid in state.asteroids.iter_mut() {
        asteroid.advance();
    }

    let outcome = scan_collisions(state);
    if outcome.ship_hit {
        log::info!(
            "Ship destroyed at tick {} with score {}",
            state.time_ticks,
            state.score
        );
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::ShipDestroyed { score: state.score });
        return;
    }

    for _ in 0..outcome.shots {
        state.score += 1;
        state.events.push(GameEvent::AsteroidShot { score: state.score });
    }
    for _ in 0..outcome.asteroid_pairs {
        state.events.push(GameEvent::AsteroidsCollided);
    }

    if !outcome.dead_asteroids.is_empty() || !outcome.dead_projectiles.is_empty() {
        log::debug!(
            "Removing {} asteroids, {} projectiles",
            outcome.dead_asteroids.len(),
            outcome.dead_projectiles.len()
        );
    }
    state.asteroids.remove_descending(outcome.dead_asteroids);
    state.projectiles.remove_descending(outcome.dead_projectiles);

    try_spawn_asteroid(state);
}

fn apply_ship_input(state: &mut GameState, input: &TickInput) {
    let config = &state.config;
    let ship = &mut state.ship;

    if input.rotate_left {
        ship.rotate(config.ship_rotation_step);
    }
    if input.rotate_right {
        ship.rotate(-config.ship_rotation_step);
    }
    if input.thrust_forward {
        ship.thrust(config.ship_move_step, config);
    }
    if input.thrust_back {
        ship.thrust(-config.ship_move_step, config);
    }

    if input.fire {
        let projectile = Projectile::new(ship.nose(), ship.heading());
        state.projectiles.append(projectile);
    }
}

/// Everything the collision scan decided, applied only after the scan
#[derive(Debug, Default)]
struct CollisionOutcome {
    ship_hit: bool,
    dead_asteroids: BTreeSet<usize>,
    dead_projectiles: BTreeSet<usize>,
    shots: u32,
    asteroid_pairs: u32,
}

/// Read-only pass over both stores. The ship is tested against every
/// asteroid, visible or not; off-screen asteroids are then marked without
/// further tests.
fn scan_collisions(state: &GameState) -> CollisionOutcome {
    let mut outcome = CollisionOutcome::default();
    let ship = state.ship.collider();
    let asteroids = &state.asteroids;
    let projectiles = &state.projectiles;

    for (i, asteroid) in asteroids.iter().enumerate() {
        let rock = asteroid.collider();
        if collides(&ship, &rock) {
            outcome.ship_hit = true;
            return outcome;
        }

        if !asteroid.is_visible(&state.config) {
            outcome.dead_asteroids.insert(i);
            continue;
        }

        for (j, projectile) in projectiles.iter().enumerate() {
            if collides(&projectile.collider(), &rock) {
                outcome.dead_projectiles.insert(j);
                outcome.dead_asteroids.insert(i);
                outcome.shots += 1;
            }
        }

        for (k, other) in asteroids.iter().enumerate().skip(i + 1) {
            if collides(&rock, &other.collider()) {
                outcome.dead_asteroids.insert(i);
                outcome.dead_asteroids.insert(k);
                outcome.asteroid_pairs += 1;
            }
        }
    }

    outcome
}

/// Screen edge an asteroid enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Right,
    Top,
    Left,
    Bottom,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Right, Edge::Top, Edge::Left, Edge::Bottom];

    /// Random point on this edge and a heading that points into the screen
    pub fn spawn_point(self, config: &ArenaConfig, rng: &mut impl Rng) -> (Vec2, f32) {
        let (w, h) = (config.screen_width, config.screen_height);
        let (center, degrees) = match self {
            Edge::Right => (Vec2::new(w, rng.random_range(0.0..=h)), rng.random_range(90..=270)),
            Edge::Top => (Vec2::new(rng.random_range(0.0..=w), 0.0), rng.random_range(180..=360)),
            Edge::Left => (
                Vec2::new(0.0, rng.random_range(0.0..=h)),
                rng.random_range(270..=450) % 360,
            ),
            Edge::Bottom => (Vec2::new(rng.random_range(0.0..=w), h), rng.random_range(0..=180)),
        };
        (center, (degrees as f32).to_radians())
    }
}

/// Roll for a new asteroid while the store has room
fn try_spawn_asteroid(state: &mut GameState) {
    if !state.asteroids.has_room() {
        return;
    }
    let rng = &mut state.rng;
    if !rng.random_bool(state.config.spawn_probability()) {
        return;
    }

    let edge = Edge::ALL[rng.random_range(0..Edge::ALL.len())];
    let (center, heading) = edge.spawn_point(&state.config, rng);
    let asteroid = Asteroid::random(center, heading, rng);
    log::debug!("Spawning asteroid at {center} from {edge:?} heading {heading:.2}");
    state.asteroids.append(asteroid);
}

/// Name entry on the game over screen
fn tick_name_entry(state: &mut GameState, input: &TickInput) {
    if input.backspace {
        state.player_name.pop();
    }
    if let Some(c) = input.typed {
        if is_name_char(c) && state.player_name.chars().count() < MAX_NAME_LEN {
            state.player_name.push(c);
        }
    }
    if input.confirm {
        let record = ScoreRecord::new(&state.player_name, state.score);
        log::info!("Round finished: {record}");
        state.events.push(GameEvent::RoundFinished(record));
        state.phase = GamePhase::Results;
    }
}

/// Characters that can appear in a `name,score` record
fn is_name_char(c: char) -> bool {
    !c.is_control() && c != ','
}
