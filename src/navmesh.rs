//! Navigation mesh: a graph of convex polygons describing walkable surface.
//!
//! Regions are addressed by [`RegionId`]. Callers hold ids, never regions,
//! so the mesh stays the single owner of its geometry.

use crate::constants::NAVMESH_CONTAINS_EPSILON;
use glam::{Vec2, Vec3};
use std::collections::HashMap;

pub type RegionId = usize;

/// Plane in Hessian normal form: `normal · p + constant = 0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub constant: f32,
}

impl Plane {
    /// Plane through three points, normal pointing up. None if the points are
    /// collinear or the plane is vertical.
    pub fn from_points(a: Vec3, b: Vec3, c: Vec3) -> Option<Self> {
        let mut normal = (b - a).cross(c - a).try_normalize()?;
        if normal.y.abs() < 1e-4 {
            return None;
        }
        if normal.y < 0.0 {
            normal = -normal;
        }
        Some(Self {
            normal,
            constant: -normal.dot(a),
        })
    }

    /// Positive above the plane, negative below
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.constant
    }
}

/// One convex walkable polygon
#[derive(Debug, Clone)]
pub struct Region {
    pub vertices: Vec<Vec3>,
    pub plane: Plane,
    pub neighbors: Vec<RegionId>,
}

impl Region {
    fn edges(&self) -> impl Iterator<Item = (Vec3, Vec3)> + '_ {
        self.vertices
            .iter()
            .zip(self.vertices.iter().cycle().skip(1))
            .map(|(a, b)| (*a, *b))
    }

    /// Point lies inside the polygon seen from above and within `epsilon` of its plane
    pub fn contains(&self, point: Vec3, epsilon: f32) -> bool {
        if self.plane.distance_to_point(point).abs() > epsilon {
            return false;
        }
        let p = flat(point);
        let mut sign = 0.0f32;
        for (a, b) in self.edges() {
            let (a, b) = (flat(a), flat(b));
            let cross = (b - a).perp_dot(p - a);
            if cross.abs() <= 1e-6 {
                continue;
            }
            if sign == 0.0 {
                sign = cross.signum();
            } else if cross.signum() != sign {
                return false;
            }
        }
        true
    }

    /// Closest point on the polygon outline to `point`, measured from above.
    /// Height is taken from the region plane.
    pub fn closest_boundary_point(&self, point: Vec3) -> Vec3 {
        let p = flat(point);
        let mut best = flat(self.vertices[0]);
        let mut best_dist = f32::MAX;
        for (a, b) in self.edges() {
            let candidate = closest_on_segment(flat(a), flat(b), p);
            let dist = candidate.distance_squared(p);
            if dist < best_dist {
                best_dist = dist;
                best = candidate;
            }
        }
        self.lift(best)
    }

    /// Point on the plane straight above/below a ground position
    fn lift(&self, xz: Vec2) -> Vec3 {
        let n = self.plane.normal;
        let y = -(n.x * xz.x + n.z * xz.y + self.plane.constant) / n.y;
        Vec3::new(xz.x, y, xz.y)
    }
}

fn flat(v: Vec3) -> Vec2 {
    Vec2::new(v.x, v.z)
}

fn closest_on_segment(a: Vec2, b: Vec2, p: Vec2) -> Vec2 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f32::EPSILON {
        return a;
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

#[derive(Debug, Clone)]
pub struct NavMesh {
    regions: Vec<Region>,
    epsilon: f32,
}

impl NavMesh {
    /// Build from convex polygons. Polygons sharing an edge become neighbours.
    /// Degenerate or vertical polygons are skipped with a warning.
    pub fn from_polygons(polygons: Vec<Vec<Vec3>>) -> Self {
        let mut regions: Vec<Region> = Vec::with_capacity(polygons.len());
        for (index, vertices) in polygons.into_iter().enumerate() {
            let plane = match vertices.as_slice() {
                [a, b, c, ..] => Plane::from_points(*a, *b, *c),
                _ => None,
            };
            let Some(plane) = plane else {
                log::warn!("Skipping navmesh polygon {}: not a walkable surface", index);
                continue;
            };
            regions.push(Region {
                vertices,
                plane,
                neighbors: Vec::new(),
            });
        }

        // Shared edges are found by quantized endpoint keys, either direction
        let mut edge_owners: HashMap<(VertexKey, VertexKey), Vec<RegionId>> = HashMap::new();
        for (id, region) in regions.iter().enumerate() {
            for (a, b) in region.edges() {
                let (ka, kb) = (VertexKey::from(a), VertexKey::from(b));
                let key = if ka <= kb { (ka, kb) } else { (kb, ka) };
                edge_owners.entry(key).or_default().push(id);
            }
        }
        for owners in edge_owners.values() {
            for &a in owners {
                for &b in owners {
                    if a != b && !regions[a].neighbors.contains(&b) {
                        regions[a].neighbors.push(b);
                    }
                }
            }
        }

        Self {
            regions,
            epsilon: NAVMESH_CONTAINS_EPSILON,
        }
    }

    /// Single flat square centred on the origin, used when no mesh was loaded
    pub fn debug_floor(half_extent: f32) -> Self {
        let h = half_extent;
        Self::from_polygons(vec![vec![
            Vec3::new(-h, 0.0, -h),
            Vec3::new(-h, 0.0, h),
            Vec3::new(h, 0.0, h),
            Vec3::new(h, 0.0, -h),
        ]])
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn region(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(id)
    }

    /// Region containing the point, preferring the one whose plane is nearest
    pub fn get_region_for_point(&self, point: Vec3) -> Option<RegionId> {
        self.regions
            .iter()
            .enumerate()
            .filter(|(_, region)| region.contains(point, self.epsilon))
            .min_by(|(_, a), (_, b)| {
                let da = a.plane.distance_to_point(point).abs();
                let db = b.plane.distance_to_point(point).abs();
                da.total_cmp(&db)
            })
            .map(|(id, _)| id)
    }

    /// Clamp a move from `start` to `end` to the walkable surface.
    ///
    /// Returns the corrected position and the region it lies in. If the
    /// mover has no region and none can be found at `start`, the move is
    /// returned unclamped with no region.
    pub fn clamp_movement(
        &self,
        current: Option<RegionId>,
        start: Vec3,
        end: Vec3,
    ) -> (Vec3, Option<RegionId>) {
        let current = current
            .filter(|id| *id < self.regions.len())
            .or_else(|| self.get_region_for_point(start));

        let Some(current) = current else {
            return (end, self.get_region_for_point(end));
        };

        let region = &self.regions[current];
        if region.contains(end, self.epsilon) {
            return (end, Some(current));
        }
        if let Some(&next) = region
            .neighbors
            .iter()
            .find(|&&n| self.regions[n].contains(end, self.epsilon))
        {
            return (end, Some(next));
        }
        if let Some(found) = self.get_region_for_point(end) {
            return (end, Some(found));
        }

        let mut clamped = region.closest_boundary_point(end);
        clamped.y = end.y;
        (clamped, Some(current))
    }

    /// First surface hit along a ray, as (point, normal)
    pub fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<(Vec3, Vec3)> {
        let direction = direction.try_normalize()?;
        self.regions
            .iter()
            .filter_map(|region| {
                let denom = region.plane.normal.dot(direction);
                if denom.abs() < 1e-6 {
                    return None;
                }
                let t = -region.plane.distance_to_point(origin) / denom;
                if !(0.0..=max_distance).contains(&t) {
                    return None;
                }
                let hit = origin + direction * t;
                region
                    .contains(hit, 1e-3)
                    .then_some((t, hit, region.plane.normal))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, hit, normal)| (hit, normal))
    }
}

/// Vertex position quantized to millimetres for edge matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct VertexKey(i64, i64, i64);

impl From<Vec3> for VertexKey {
    fn from(v: Vec3) -> Self {
        let q = |f: f32| (f * 1000.0).round() as i64;
        VertexKey(q(v.x), q(v.y), q(v.z))
    }
}
