//! The hub's winding path: nine points (the door plus one per day)
//! joined by a cardinal curve. Purely visual; nothing in the game logic
//! depends on where the camera is.

use bevy::prelude::*;

/// Door, then Rose … Valentine.
pub const PATH_POINTS: [Vec3; 9] = [
    Vec3::new(0.0, 5.0, -4.0),
    Vec3::new(0.0, 2.0, -15.0),
    Vec3::new(-4.0, 2.0, -20.0),
    Vec3::new(3.0, 2.0, -30.0),
    Vec3::new(-3.0, 2.5, -45.0),
    Vec3::new(2.0, 3.0, -55.0),
    Vec3::new(0.0, 3.0, -65.0),
    Vec3::new(-2.0, 3.0, -70.0),
    Vec3::new(0.0, 3.5, -80.0),
];

/// Checkpoint orbs sit a little to the side of the path.
pub const CHECKPOINT_SIDE_OFFSET: Vec3 = Vec3::new(1.5, 0.0, 0.0);

/// The camera stops short of the final point.
pub const TRAVEL_SCALE: f32 = 0.95;
pub const LOOK_AHEAD: f32 = 0.05;

const ARC_SAMPLES: usize = 200;

#[derive(Debug, Clone)]
pub struct HubPath {
    points: Vec<Vec3>,
    tension: f32,
    /// Cumulative length at each of ARC_SAMPLES + 1 evenly spaced params.
    arc: Vec<f32>,
}

impl Default for HubPath {
    fn default() -> Self {
        Self::new(PATH_POINTS.to_vec(), 0.5)
    }
}

impl HubPath {
    /// Needs at least two points.
    pub fn new(points: Vec<Vec3>, tension: f32) -> Self {
        assert!(points.len() >= 2, "a path needs two points");
        let mut path = Self {
            points,
            tension,
            arc: Vec::with_capacity(ARC_SAMPLES + 1),
        };
        let mut total = 0.0;
        let mut last = path.point(0.0);
        path.arc.push(0.0);
        for i in 1..=ARC_SAMPLES {
            let p = path.point(i as f32 / ARC_SAMPLES as f32);
            total += p.distance(last);
            path.arc.push(total);
            last = p;
        }
        path
    }

    pub fn len(&self) -> f32 {
        self.arc.last().copied().unwrap_or(0.0)
    }

    /// Point at curve parameter `t` in [0, 1] (segments evenly spaced).
    pub fn point(&self, t: f32) -> Vec3 {
        let n = self.points.len();
        let scaled = t.clamp(0.0, 1.0) * (n - 1) as f32;
        let i = (scaled.floor() as usize).min(n - 2);
        let w = scaled - i as f32;

        let p1 = self.points[i];
        let p2 = self.points[i + 1];
        let p0 = if i == 0 { p1 * 2.0 - p2 } else { self.points[i - 1] };
        let p3 = if i + 2 < n {
            self.points[i + 2]
        } else {
            p2 * 2.0 - p1
        };

        let m1 = (p2 - p0) * self.tension;
        let m2 = (p3 - p1) * self.tension;
        let w2 = w * w;
        let w3 = w2 * w;
        p1 * (2.0 * w3 - 3.0 * w2 + 1.0)
            + m1 * (w3 - 2.0 * w2 + w)
            + p2 * (-2.0 * w3 + 3.0 * w2)
            + m2 * (w3 - w2)
    }

    /// Point at fraction `u` of the total arc length.
    pub fn point_at(&self, u: f32) -> Vec3 {
        let target = u.clamp(0.0, 1.0) * self.len();
        let idx = self.arc.partition_point(|&len| len < target);
        if idx == 0 {
            return self.point(0.0);
        }
        if idx > ARC_SAMPLES {
            return self.point(1.0);
        }
        let before = self.arc[idx - 1];
        let span = self.arc[idx] - before;
        let local = if span > 0.0 { (target - before) / span } else { 0.0 };
        self.point((idx as f32 - 1.0 + local) / ARC_SAMPLES as f32)
    }

    /// Camera position and look-at point for a hub progress offset.
    pub fn camera_target(&self, offset: f32) -> (Vec3, Vec3) {
        let u = offset.clamp(0.0, 1.0) * TRAVEL_SCALE;
        (self.point_at(u), self.point_at((u + LOOK_AHEAD).min(1.0)))
    }

    /// Where the orb for day `index` floats.
    pub fn checkpoint_position(&self, index: usize) -> Option<Vec3> {
        self.points.get(index + 1).map(|p| *p + CHECKPOINT_SIDE_OFFSET)
    }

    pub fn checkpoint_count(&self) -> usize {
        self.points.len() - 1
    }

    /// The day whose segment the camera is currently travelling.
    pub fn nearest_checkpoint(&self, offset: f32) -> usize {
        let segments = self.checkpoint_count();
        let u = offset.clamp(0.0, 1.0) * TRAVEL_SCALE;
        ((u * segments as f32).floor() as usize).min(segments - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curve_passes_through_endpoints() {
        let path = HubPath::default();
        assert!(path.point(0.0).distance(PATH_POINTS[0]) < 1e-4);
        assert!(path.point(1.0).distance(PATH_POINTS[8]) < 1e-4);
        assert!(path.point_at(0.0).distance(PATH_POINTS[0]) < 1e-4);
        assert!(path.point_at(1.0).distance(PATH_POINTS[8]) < 1e-3);
    }

    #[test]
    fn test_curve_passes_through_interior_points() {
        let path = HubPath::default();
        for (i, p) in PATH_POINTS.iter().enumerate() {
            let t = i as f32 / 8.0;
            assert!(path.point(t).distance(*p) < 1e-3, "point {} off the curve", i);
        }
    }

    #[test]
    fn test_camera_looks_ahead() {
        let path = HubPath::default();
        let (pos, look) = path.camera_target(0.3);
        assert!(look.z < pos.z, "look-at should be further down the path");
    }

    #[test]
    fn test_nearest_checkpoint_is_clamped() {
        let path = HubPath::default();
        assert_eq!(path.nearest_checkpoint(0.0), 0);
        assert_eq!(path.nearest_checkpoint(1.0), 7);
        assert_eq!(path.nearest_checkpoint(5.0), 7);
        assert_eq!(path.nearest_checkpoint(-1.0), 0);
    }

    #[test]
    fn test_checkpoint_positions_are_offset_days() {
        let path = HubPath::default();
        assert_eq!(path.checkpoint_count(), 8);
        assert_eq!(
            path.checkpoint_position(0),
            Some(PATH_POINTS[1] + CHECKPOINT_SIDE_OFFSET)
        );
        assert_eq!(path.checkpoint_position(8), None);
    }
}
