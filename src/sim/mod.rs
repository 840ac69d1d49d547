//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Fixed tick only (no wall-clock time)
//! - Seeded RNG only
//! - Stable store order (insertion order, compacted on removal)
//! - No rendering, input polling or file I/O

pub mod collision;
pub mod polar;
pub mod snapshot;
pub mod state;
pub mod store;
pub mod tick;

pub use collision::{Collider, Shape, circles_overlap, collides, point_in_polygon, point_in_triangle};
pub use polar::{PolarCoords, project_outline, step_along};
pub use snapshot::{BodySnapshot, FrameSnapshot};
pub use state::{
    Asteroid, Body, BodyKind, GameEvent, GamePhase, GameState, Projectile, Ship,
};
pub use store::EntityStore;
pub use tick::{Edge, TickInput, tick};
