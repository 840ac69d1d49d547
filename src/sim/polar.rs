//! Polar outlines
//!
//! Bodies describe their outline as (radius, angle) samples around their own
//! center. World-space vertices are derived from the current center and
//! rotation with one convention used everywhere in the crate:
//!
//! `world = center + r * (cos(angle - theta), sin(angle - theta))`
//!
//! Screen y grows downward, so a positive heading points up-right.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// One outline sample relative to a body's center
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolarCoords {
    pub radius: f32,
    pub angle: f32,
}

impl PolarCoords {
    pub const fn new(radius: f32, angle: f32) -> Self {
        Self { radius, angle }
    }

    /// World position of this sample for a body at `center` rotated by `theta`
    #[inline]
    pub fn to_world(self, center: Vec2, theta: f32) -> Vec2 {
        let phi = self.angle - theta;
        center + self.radius * Vec2::new(phi.cos(), phi.sin())
    }
}

impl From<(f32, f32)> for PolarCoords {
    fn from((radius, angle): (f32, f32)) -> Self {
        Self::new(radius, angle)
    }
}

/// Project a whole outline into `out`, reusing its allocation
pub fn project_outline(outline: &[PolarCoords], center: Vec2, theta: f32, out: &mut Vec<Vec2>) {
    out.clear();
    out.extend(outline.iter().map(|pc| pc.to_world(center, theta)));
}

/// Position reached by moving `distance` along `heading`
#[inline]
pub fn step_along(center: Vec2, heading: f32, distance: f32) -> Vec2 {
    PolarCoords::new(distance, 0.0).to_world(center, heading)
}
