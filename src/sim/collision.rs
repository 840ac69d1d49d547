//! Collision detection between circles, triangles and polygons
//!
//! Every pair goes through a bounding-circle broad phase first. Pairs that
//! survive get a shape-specific narrow phase built from point containment
//! tests. None of this is exact polygon intersection: circles are sampled at
//! five points and polygons only by their vertices (plus the polygon center
//! against triangles).

use glam::Vec2;

/// Narrow-phase geometry of a body, borrowed from its cached world outline
#[derive(Debug, Clone, Copy)]
pub enum Shape<'a> {
    /// Point-like body of the given radius around the collider center
    Circle,
    /// Three world-space vertices
    Triangle(&'a [Vec2; 3]),
    /// Closed outline of world-space vertices
    Polygon(&'a [Vec2]),
}

/// Everything the detector needs to know about one body
#[derive(Debug, Clone, Copy)]
pub struct Collider<'a> {
    pub center: Vec2,
    pub radius: f32,
    pub shape: Shape<'a>,
}

impl<'a> Collider<'a> {
    pub fn circle(center: Vec2, radius: f32) -> Self {
        Self {
            center,
            radius,
            shape: Shape::Circle,
        }
    }

    pub fn triangle(center: Vec2, radius: f32, vertices: &'a [Vec2; 3]) -> Self {
        Self {
            center,
            radius,
            shape: Shape::Triangle(vertices),
        }
    }

    pub fn polygon(center: Vec2, radius: f32, vertices: &'a [Vec2]) -> Self {
        Self {
            center,
            radius,
            shape: Shape::Polygon(vertices),
        }
    }

    /// Outline vertices, empty for circles
    fn vertices(&self) -> &'a [Vec2] {
        match self.shape {
            Shape::Circle => &[],
            Shape::Triangle(v) => v.as_slice(),
            Shape::Polygon(v) => v,
        }
    }

    /// Whether `point` lies inside this collider's narrow-phase shape
    fn contains(&self, point: Vec2) -> bool {
        match self.shape {
            Shape::Circle => point.distance_squared(self.center) <= self.radius * self.radius,
            Shape::Triangle(v) => point_in_triangle(point, v[0], v[1], v[2]),
            Shape::Polygon(v) => point_in_polygon(point, v),
        }
    }
}

/// Bounding-circle overlap (touching counts)
#[inline]
pub fn circles_overlap(a_center: Vec2, a_radius: f32, b_center: Vec2, b_radius: f32) -> bool {
    let reach = a_radius + b_radius;
    a_center.distance_squared(b_center) <= reach * reach
}

/// Even-odd ray cast. Fewer than three vertices contain nothing.
pub fn point_in_polygon(point: Vec2, vertices: &[Vec2]) -> bool {
    if vertices.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let (vi, vj) = (vertices[i], vertices[j]);
        if (vi.y > point.y) != (vj.y > point.y)
            && point.x < (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Barycentric containment; points on an edge count as inside
pub fn point_in_triangle(point: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    let denom = (b.y - c.y) * (a.x - c.x) + (c.x - b.x) * (a.y - c.y);
    if denom == 0.0 {
        return false;
    }
    let alpha = ((b.y - c.y) * (point.x - c.x) + (c.x - b.x) * (point.y - c.y)) / denom;
    let beta = ((c.y - a.y) * (point.x - c.x) + (a.x - c.x) * (point.y - c.y)) / denom;
    let gamma = 1.0 - alpha - beta;
    alpha >= 0.0 && beta >= 0.0 && gamma >= 0.0
}

/// The circle's center plus its four axis extremes
#[inline]
pub fn circle_samples(center: Vec2, radius: f32) -> [Vec2; 5] {
    [
        center,
        center + Vec2::new(radius, 0.0),
        center + Vec2::new(0.0, radius),
        center - Vec2::new(radius, 0.0),
        center - Vec2::new(0.0, radius),
    ]
}

/// Five-point approximation: any sample inside the outline is a hit
fn circle_vs_outline(circle: &Collider, outline: &Collider) -> bool {
    circle_samples(circle.center, circle.radius)
        .into_iter()
        .any(|p| outline.contains(p))
}

/// Vertex containment tested in both directions
fn polygon_vs_polygon(a: &Collider, b: &Collider) -> bool {
    a.vertices().iter().any(|&v| b.contains(v)) || b.vertices().iter().any(|&v| a.contains(v))
}

/// Polygon center or vertex inside the triangle, or triangle vertex inside the polygon
fn triangle_vs_polygon(triangle: &Collider, polygon: &Collider) -> bool {
    triangle.contains(polygon.center) || polygon_vs_polygon(triangle, polygon)
}

/// Full two-phase test. Symmetric: `collides(a, b) == collides(b, a)`.
pub fn collides(a: &Collider, b: &Collider) -> bool {
    if !circles_overlap(a.center, a.radius, b.center, b.radius) {
        return false;
    }
    narrow_phase(a, b)
}

/// Shape-specific test, assuming the broad phase already passed
fn narrow_phase(a: &Collider, b: &Collider) -> bool {
    match (a.shape, b.shape) {
        (Shape::Circle, Shape::Circle) => true,
        (Shape::Circle, _) => circle_vs_outline(a, b),
        (_, Shape::Circle) => circle_vs_outline(b, a),
        (Shape::Triangle(_), Shape::Polygon(_)) => triangle_vs_polygon(a, b),
        (Shape::Polygon(_), Shape::Triangle(_)) => triangle_vs_polygon(b, a),
        (Shape::Triangle(_), Shape::Triangle(_)) | (Shape::Polygon(_), Shape::Polygon(_)) => {
            polygon_vs_polygon(a, b)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{ASTEROID_OUTLINE, ASTEROID_RADIUS, SHIP_OUTLINE, SHIP_RADIUS};
    use crate::sim::polar::PolarCoords;
    use proptest::prelude::*;

    fn outline_at(samples: &[(f32, f32)], center: Vec2, theta: f32) -> Vec<Vec2> {
        samples
            .iter()
            .map(|&s| PolarCoords::from(s).to_world(center, theta))
            .collect()
    }

    fn ship_at(center: Vec2, heading: f32) -> [Vec2; 3] {
        let v = outline_at(&SHIP_OUTLINE, center, heading);
        [v[0], v[1], v[2]]
    }

    fn square(center: Vec2, half: f32) -> Vec<Vec2> {
        vec![
            center + Vec2::new(-half, -half),
            center + Vec2::new(half, -half),
            center + Vec2::new(half, half),
            center + Vec2::new(-half, half),
        ]
    }

    #[test]
    fn test_point_in_polygon_square() {
        let sq = square(Vec2::ZERO, 10.0);
        assert!(point_in_polygon(Vec2::ZERO, &sq));
        assert!(point_in_polygon(Vec2::new(9.0, -9.0), &sq));
        assert!(!point_in_polygon(Vec2::new(11.0, 0.0), &sq));
        assert!(!point_in_polygon(Vec2::ZERO, &sq[..2]));
    }

    #[test]
    fn test_point_in_polygon_concave_notch() {
        // U shape open at the top: the notch is outside
        let u = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(30.0, 0.0),
            Vec2::new(30.0, 30.0),
            Vec2::new(20.0, 30.0),
            Vec2::new(20.0, 10.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(10.0, 30.0),
            Vec2::new(0.0, 30.0),
        ];
        assert!(point_in_polygon(Vec2::new(5.0, 20.0), &u));
        assert!(!point_in_polygon(Vec2::new(15.0, 20.0), &u));
    }

    #[test]
    fn test_point_in_triangle() {
        let (a, b, c) = (Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0));
        assert!(point_in_triangle(Vec2::new(2.0, 2.0), a, b, c));
        assert!(point_in_triangle(Vec2::new(5.0, 0.0), a, b, c));
        assert!(!point_in_triangle(Vec2::new(8.0, 8.0), a, b, c));
        assert!(!point_in_triangle(Vec2::ZERO, a, a, a));
    }

    #[test]
    fn test_projectile_on_asteroid_center_hits() {
        let center = Vec2::new(100.0, 100.0);
        let rock = outline_at(&ASTEROID_OUTLINE, center, 0.0);
        let asteroid = Collider::polygon(center, ASTEROID_RADIUS, &rock);
        let shot = Collider::circle(center, 5.0);

        assert!(circles_overlap(center, ASTEROID_RADIUS, center, 5.0));
        assert!(collides(&shot, &asteroid));
        assert!(collides(&asteroid, &shot));
    }

    #[test]
    fn test_circle_edge_sample_hits_polygon() {
        let sq = square(Vec2::ZERO, 10.0);
        let poly = Collider::polygon(Vec2::ZERO, 15.0, &sq);
        // Center outside, left sample reaches inside
        let shot = Collider::circle(Vec2::new(13.0, 0.0), 5.0);
        assert!(collides(&shot, &poly));
    }

    #[test]
    fn test_circle_sampling_misses_corner_clip() {
        // Circle clips the square's corner between sample points: approximation misses it
        let sq = square(Vec2::ZERO, 10.0);
        let poly = Collider::polygon(Vec2::ZERO, 15.0, &sq);
        let shot = Collider::circle(Vec2::new(13.0, 13.0), 5.0);
        assert!(!collides(&shot, &poly));
    }

    #[test]
    fn test_asteroid_center_inside_ship_triangle() {
        let center = Vec2::new(500.0, 500.0);
        let tri = ship_at(center, 0.0);
        let rock = outline_at(&ASTEROID_OUTLINE, center, 0.0);
        let ship = Collider::triangle(center, SHIP_RADIUS, &tri);
        let asteroid = Collider::polygon(center, ASTEROID_RADIUS, &rock);

        assert!(point_in_triangle(center, tri[0], tri[1], tri[2]));
        assert!(collides(&ship, &asteroid));
        assert!(collides(&asteroid, &ship));
    }

    #[test]
    fn test_ship_nose_inside_asteroid() {
        let rock_center = Vec2::new(200.0, 200.0);
        let rock = outline_at(&ASTEROID_OUTLINE, rock_center, 0.0);
        // Ship pointing at the rock (heading pi = facing -x) from its right side
        let ship_center = rock_center + Vec2::new(45.0, 0.0);
        let tri = ship_at(ship_center, std::f32::consts::PI);
        let ship = Collider::triangle(ship_center, SHIP_RADIUS, &tri);
        let asteroid = Collider::polygon(rock_center, ASTEROID_RADIUS, &rock);
        assert!(collides(&ship, &asteroid));
    }

    #[test]
    fn test_enclosed_polygon_caught_from_both_sides() {
        let big = square(Vec2::ZERO, 40.0);
        let small = square(Vec2::ZERO, 5.0);
        let outer = Collider::polygon(Vec2::ZERO, 57.0, &big);
        let inner = Collider::polygon(Vec2::ZERO, 8.0, &small);
        assert!(collides(&outer, &inner));
        assert!(collides(&inner, &outer));
    }

    #[test]
    fn test_far_asteroids_fail_broad_phase() {
        let a_center = Vec2::new(0.0, 0.0);
        let b_center = Vec2::new(101.0, 0.0);
        let a = outline_at(&ASTEROID_OUTLINE, a_center, 0.0);
        let b = outline_at(&ASTEROID_OUTLINE, b_center, 0.0);
        let ca = Collider::polygon(a_center, ASTEROID_RADIUS, &a);
        let cb = Collider::polygon(b_center, ASTEROID_RADIUS, &b);

        assert!(!circles_overlap(a_center, ASTEROID_RADIUS, b_center, ASTEROID_RADIUS));
        assert!(!collides(&ca, &cb));
    }

    #[test]
    fn test_broad_phase_gates_narrow_phase() {
        // Geometry that would overlap if the stated radii were honest
        let sq = square(Vec2::ZERO, 10.0);
        let poly = Collider::polygon(Vec2::ZERO, 1.0, &sq);
        let shot = Collider::circle(Vec2::new(8.0, 0.0), 1.0);
        assert!(!collides(&shot, &poly));
    }

    fn arb_point() -> impl Strategy<Value = Vec2> {
        (-150.0f32..150.0, -150.0f32..150.0).prop_map(|(x, y)| Vec2::new(x, y))
    }

    proptest! {
        #[test]
        fn prop_collision_is_symmetric(
            ship_c in arb_point(),
            heading in -7.0f32..7.0,
            rock_c in arb_point(),
            spin in -7.0f32..7.0,
            rock2_c in arb_point(),
            spin2 in -7.0f32..7.0,
            shot_c in arb_point(),
        ) {
            let tri = ship_at(ship_c, heading);
            let rock = outline_at(&ASTEROID_OUTLINE, rock_c, spin);
            let rock2 = outline_at(&ASTEROID_OUTLINE, rock2_c, spin2);
            let colliders = [
                Collider::triangle(ship_c, SHIP_RADIUS, &tri),
                Collider::polygon(rock_c, ASTEROID_RADIUS, &rock),
                Collider::polygon(rock2_c, ASTEROID_RADIUS, &rock2),
                Collider::circle(shot_c, 5.0),
            ];
            for a in &colliders {
                for b in &colliders {
                    prop_assert_eq!(collides(a, b), collides(b, a));
                }
            }
        }
    }
}
