use crate::Vec2;

/// "Nearest reachable point" oracle.
///
/// Every steering behaviour funnels its destination through this before committing to it, so a
/// geometrically correct target the agent cannot walk to is never produced.
pub trait NavProjection {
    fn nearest_point(&self, point: Vec2) -> Vec2;
}

impl<F> NavProjection for F
where
    F: Fn(Vec2) -> Vec2,
{
    fn nearest_point(&self, point: Vec2) -> Vec2 {
        self(point)
    }
}

/// Everything is reachable.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenField;

impl NavProjection for OpenField {
    fn nearest_point(&self, point: Vec2) -> Vec2 {
        point
    }
}

/// Axis-aligned walkable rectangle; points outside are clamped onto its border.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl RectBounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn centered(center: Vec2, dimensions: Vec2) -> Self {
        let half = dimensions / 2.0;
        Self::new(center - half, center + half)
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

impl NavProjection for RectBounds {
    fn nearest_point(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            point.x.clamp(self.min.x, self.max.x),
            point.y.clamp(self.min.y, self.max.y),
        )
    }
}
