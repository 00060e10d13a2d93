use glam::DVec3;

/// Axis-aligned box. Membership is inclusive on every face.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Zone {
    low: DVec3,
    high: DVec3,
}

impl Zone {
    /// Builds the box spanned by two opposite corners, given in any order.
    pub fn new(corner_a: DVec3, corner_b: DVec3) -> Self {
        Self {
            low: corner_a.min(corner_b),
            high: corner_a.max(corner_b),
        }
    }

    pub fn contains(&self, point: DVec3) -> bool {
        self.low.cmple(point).all() && point.cmple(self.high).all()
    }

    pub fn center(&self) -> DVec3 {
        (self.low + self.high) * 0.5
    }

    pub fn low(&self) -> DVec3 {
        self.low
    }

    pub fn high(&self) -> DVec3 {
        self.high
    }
}
