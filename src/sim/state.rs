//! Game state and core simulation types
//!
//! Bodies keep their world-space outline cached. The fields that feed the
//! cache (center, rotation) are private and only change through methods that
//! re-project the outline in the same call.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Collider;
use super::polar::{PolarCoords, project_outline, step_along};
use super::store::EntityStore;
use crate::config::ArenaConfig;
use crate::consts::*;
use crate::highscores::Leaderboard;
use crate::persistence::ScoreRecord;
use crate::wrap_angle;

/// Current phase of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Ship destroyed; player is entering a name
    GameOver,
    /// Name submitted; stored results are listed
    Results,
}

/// Entity kinds sharing the `Body` capability set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    Ship,
    Asteroid,
    Projectile,
}

/// Capabilities shared by every body in the arena
pub trait Body {
    fn kind(&self) -> BodyKind;
    fn center(&self) -> Vec2;
    /// Direction of travel
    fn heading(&self) -> f32;
    /// Broad-phase radius
    fn bounding_radius(&self) -> f32;
    /// Cached world-space outline (empty for point-like bodies)
    fn outline(&self) -> &[Vec2];
    /// Narrow-phase view of this body
    fn collider(&self) -> Collider<'_>;

    /// Any part of the bounding circle overlaps the visible area
    fn is_visible(&self, config: &ArenaConfig) -> bool {
        let c = self.center();
        let r = self.bounding_radius();
        c.x + r >= 0.0
            && c.x - r <= config.screen_width
            && c.y + r >= 0.0
            && c.y - r <= config.screen_height
    }
}

/// The player's craft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    center: Vec2,
    heading: f32,
    vertices: [Vec2; 3],
}

impl Ship {
    pub fn new(center: Vec2) -> Self {
        let mut ship = Self {
            center,
            heading: 0.0,
            vertices: [Vec2::ZERO; 3],
        };
        ship.refresh_vertices();
        ship
    }

    /// Triangle vertices, nose first
    pub fn vertices(&self) -> &[Vec2; 3] {
        &self.vertices
    }

    /// Where projectiles leave the ship
    pub fn nose(&self) -> Vec2 {
        self.vertices[0]
    }

    /// Turn by `delta` radians (positive turns left on screen)
    pub fn rotate(&mut self, delta: f32) {
        self.heading = wrap_angle(self.heading + delta);
        self.refresh_vertices();
    }

    /// Move `distance` along the heading (negative backs up), then wrap
    /// around the screen once the ship has fully left it
    pub fn thrust(&mut self, distance: f32, config: &ArenaConfig) {
        self.center = step_along(self.center, self.heading, distance);
        self.wrap(config);
        self.refresh_vertices();
    }

    fn wrap(&mut self, config: &ArenaConfig) {
        let r = SHIP_RADIUS;
        let (w, h) = (config.screen_width, config.screen_height);

        if self.center.x + r < 0.0 {
            self.center.x = w + r - 1.0;
        } else if self.center.x - r > w {
            self.center.x = -r + 1.0;
        }

        if self.center.y + r < 0.0 {
            self.center.y = h + r - 1.0;
        } else if self.center.y - r > h {
            self.center.y = -r + 1.0;
        }
    }

    fn refresh_vertices(&mut self) {
        for (vertex, &sample) in self.vertices.iter_mut().zip(SHIP_OUTLINE.iter()) {
            *vertex = PolarCoords::from(sample).to_world(self.center, self.heading);
        }
    }
}

impl Body for Ship {
    fn kind(&self) -> BodyKind {
        BodyKind::Ship
    }

    fn center(&self) -> Vec2 {
        self.center
    }

    fn heading(&self) -> f32 {
        self.heading
    }

    fn bounding_radius(&self) -> f32 {
        SHIP_RADIUS
    }

    fn outline(&self) -> &[Vec2] {
        &self.vertices
    }

    fn collider(&self) -> Collider<'_> {
        Collider::triangle(self.center, SHIP_RADIUS, &self.vertices)
    }
}

/// A drifting, spinning rock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    center: Vec2,
    /// Direction of travel
    heading: f32,
    /// Visual spin, decreasing by `rotation_speed` each tick
    angle: f32,
    rotation_speed: f32,
    move_speed: f32,
    outline: Vec<PolarCoords>,
    vertices: Vec<Vec2>,
}

impl Asteroid {
    /// Rock with explicit speeds and the standard outline
    pub fn new(center: Vec2, heading: f32, rotation_speed: f32, move_speed: f32) -> Self {
        let outline: Vec<PolarCoords> = ASTEROID_OUTLINE.iter().copied().map(Into::into).collect();
        let mut asteroid = Self {
            center,
            heading,
            angle: 0.0,
            rotation_speed,
            move_speed,
            vertices: Vec::with_capacity(outline.len()),
            outline,
        };
        asteroid.refresh_vertices();
        asteroid
    }

    /// Rock whose spin and drift speeds are drawn once from `rng`
    pub fn random(center: Vec2, heading: f32, rng: &mut impl Rng) -> Self {
        let rotation_speed = rng.random_range(1..=10) as f32 / 100.0;
        let move_speed = rng.random_range(1..=10) as f32 / 10.0;
        Self::new(center, heading, rotation_speed, move_speed)
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn rotation_speed(&self) -> f32 {
        self.rotation_speed
    }

    pub fn move_speed(&self) -> f32 {
        self.move_speed
    }

    /// Spin, drift, and re-project the outline
    pub fn advance(&mut self) {
        self.angle = wrap_angle(self.angle - self.rotation_speed);
        self.center = step_along(self.center, self.heading, self.move_speed);
        self.refresh_vertices();
    }

    fn refresh_vertices(&mut self) {
        project_outline(&self.outline, self.center, self.angle, &mut self.vertices);
    }
}

impl Body for Asteroid {
    fn kind(&self) -> BodyKind {
        BodyKind::Asteroid
    }

    fn center(&self) -> Vec2 {
        self.center
    }

    fn heading(&self) -> f32 {
        self.heading
    }

    fn bounding_radius(&self) -> f32 {
        ASTEROID_RADIUS
    }

    fn outline(&self) -> &[Vec2] {
        &self.vertices
    }

    fn collider(&self) -> Collider<'_> {
        Collider::polygon(self.center, ASTEROID_RADIUS, &self.vertices)
    }
}

/// A shot fired by the ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    center: Vec2,
    heading: f32,
}

impl Projectile {
    pub fn new(center: Vec2, heading: f32) -> Self {
        Self { center, heading }
    }

    pub fn advance(&mut self, speed: f32) {
        self.center = step_along(self.center, self.heading, speed);
    }
}

impl Body for Projectile {
    fn kind(&self) -> BodyKind {
        BodyKind::Projectile
    }

    fn center(&self) -> Vec2 {
        self.center
    }

    fn heading(&self) -> f32 {
        self.heading
    }

    fn bounding_radius(&self) -> f32 {
        PROJECTILE_RADIUS
    }

    fn outline(&self) -> &[Vec2] {
        &[]
    }

    fn collider(&self) -> Collider<'_> {
        Collider::circle(self.center, PROJECTILE_RADIUS)
    }
}

/// Something the driver may want to react to (sound, persistence, logs)
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A projectile destroyed an asteroid
    AsteroidShot { score: u32 },
    /// Two asteroids destroyed each other
    AsteroidsCollided,
    /// The ship hit an asteroid; the round is over
    ShipDestroyed { score: u32 },
    /// The player confirmed their name; append this record to the results store
    RoundFinished(ScoreRecord),
}

/// Complete state of one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Immutable arena tuning
    pub config: ArenaConfig,
    /// Seed of the current round
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    pub score: u32,
    /// Simulation tick counter for the current round
    pub time_ticks: u64,
    pub ship: Ship,
    pub asteroids: EntityStore<Asteroid>,
    pub projectiles: EntityStore<Projectile>,
    /// Name typed on the game over screen
    pub player_name: String,
    /// Stored results shown in the Results phase
    pub leaderboard: Leaderboard,
    /// Pending events, drained by the driver
    pub events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(config: ArenaConfig, seed: u64) -> Self {
        let (x, y) = config.ship_start;
        Self {
            rng: Pcg32::seed_from_u64(seed),
            seed,
            phase: GamePhase::Playing,
            score: 0,
            time_ticks: 0,
            ship: Ship::new(Vec2::new(x, y)),
            asteroids: EntityStore::new(config.max_asteroids),
            projectiles: EntityStore::with_growth(
                config.projectile_capacity,
                config.projectile_growth,
            ),
            player_name: String::new(),
            leaderboard: Leaderboard::new(),
            events: Vec::new(),
            config,
        }
    }

    /// Fresh ship, empty stores, zero score. The only way back to `Playing`.
    pub fn restart(&mut self, seed: u64) {
        log::info!("New round with seed {seed}");
        *self = Self::new(self.config.clone(), seed);
    }

    /// Hand the stored results to the Results screen
    pub fn show_results(&mut self, records: impl IntoIterator<Item = ScoreRecord>) {
        self.leaderboard = Leaderboard::from_records(records);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_ship_starts_pointing_right() {
        let ship = Ship::new(Vec2::new(500.0, 500.0));
        assert!((ship.nose() - Vec2::new(530.0, 500.0)).length() < 1e-3);
        assert_eq!(ship.outline().len(), 3);
    }

    #[test]
    fn test_ship_rotate_refreshes_vertices() {
        let mut ship = Ship::new(Vec2::new(100.0, 100.0));
        ship.rotate(PI / 2.0);
        // Heading pi/2 points up on screen (y decreasing)
        assert!((ship.nose() - Vec2::new(100.0, 70.0)).length() < 1e-3);
    }

    #[test]
    fn test_ship_thrust_forward_and_back() {
        let config = ArenaConfig::default();
        let mut ship = Ship::new(Vec2::new(100.0, 100.0));
        ship.thrust(3.0, &config);
        assert!((ship.center() - Vec2::new(103.0, 100.0)).length() < 1e-4);
        ship.thrust(-3.0, &config);
        assert!((ship.center() - Vec2::new(100.0, 100.0)).length() < 1e-4);
        assert!((ship.nose() - Vec2::new(130.0, 100.0)).length() < 1e-3);
    }

    #[test]
    fn test_ship_wraps_once_fully_off_screen() {
        let config = ArenaConfig::default();
        let mut ship = Ship::new(Vec2::new(-29.0, 300.0));
        ship.rotate(PI);
        ship.thrust(3.0, &config);
        assert_eq!(ship.center().x, config.screen_width + SHIP_RADIUS - 1.0);
        // Vertices follow the wrapped center
        assert!(ship.nose().x < ship.center().x);
    }

    #[test]
    fn test_ship_partially_off_screen_does_not_wrap() {
        let config = ArenaConfig::default();
        let mut ship = Ship::new(Vec2::new(5.0, 300.0));
        ship.rotate(PI);
        ship.thrust(3.0, &config);
        assert!((ship.center().x - 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_asteroid_advance_moves_once_and_spins() {
        let mut rock = Asteroid::new(Vec2::new(100.0, 100.0), 0.0, 0.05, 1.0);
        let before = rock.outline().to_vec();
        rock.advance();
        assert!((rock.center() - Vec2::new(101.0, 100.0)).length() < 1e-4);
        assert!((rock.angle() + 0.05).abs() < 1e-6);
        assert_ne!(before, rock.outline());

        // Cache equals a fresh projection of the current state
        let expected: Vec<Vec2> = ASTEROID_OUTLINE
            .iter()
            .map(|&s| PolarCoords::from(s).to_world(rock.center(), rock.angle()))
            .collect();
        assert_eq!(rock.outline(), expected.as_slice());
    }

    #[test]
    fn test_asteroid_angle_stays_within_full_turn() {
        let mut rock = Asteroid::new(Vec2::ZERO, 0.0, 0.1, 0.0);
        for _ in 0..500 {
            rock.advance();
        }
        assert!(rock.angle() > -std::f32::consts::TAU && rock.angle() <= 0.0);
    }

    #[test]
    fn test_random_asteroid_speed_ranges() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..100 {
            let rock = Asteroid::random(Vec2::ZERO, 0.0, &mut rng);
            assert!((0.01..=0.1 + 1e-6).contains(&rock.rotation_speed()));
            assert!((0.1..=1.0 + 1e-6).contains(&rock.move_speed()));
        }
    }

    #[test]
    fn test_visibility_uses_bounding_radius() {
        let config = ArenaConfig::default();
        assert!(Projectile::new(Vec2::new(-4.0, 10.0), 0.0).is_visible(&config));
        assert!(!Projectile::new(Vec2::new(-6.0, 10.0), 0.0).is_visible(&config));
        assert!(Asteroid::new(Vec2::new(config.screen_width, 10.0), 0.0, 0.1, 1.0).is_visible(&config));
    }

    #[test]
    fn test_restart_resets_round() {
        let mut state = GameState::new(ArenaConfig::default(), 1);
        state.score = 12;
        state.phase = GamePhase::Results;
        state.projectiles.append(Projectile::new(Vec2::ZERO, 0.0));
        state.asteroids.append(Asteroid::new(Vec2::ZERO, 0.0, 0.1, 1.0));

        state.restart(2);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.seed, 2);
        assert!(state.projectiles.is_empty());
        assert!(state.asteroids.is_empty());
        assert_eq!(state.asteroids.capacity(), 9);
    }
}
