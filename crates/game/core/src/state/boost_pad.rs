use glam::DVec3;

/// A boost pad on the field floor.
///
/// A pad is active while its respawn countdown is zero. The countdown never
/// goes negative.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoostPad {
    position: DVec3,
    respawn_time_left: f64,
    big: bool,
}

impl BoostPad {
    /// Distance from the pad center within which a car picks it up.
    pub const PICKUP_RADIUS: f64 = 165.0;
    pub const COUNT_BIG: usize = 6;
    pub const COUNT_SMALL: usize = 28;
    pub const COUNT_TOTAL: usize = Self::COUNT_BIG + Self::COUNT_SMALL;
    pub const AMOUNT_BIG: f64 = 100.0;
    pub const AMOUNT_SMALL: f64 = 12.0;
    pub const RESPAWN_TIME_BIG: f64 = 10.0;
    pub const RESPAWN_TIME_SMALL: f64 = 3.0;

    /// Creates an active pad. The position is projected onto the floor.
    pub fn new(position: DVec3, big: bool) -> Self {
        Self {
            position: position.with_z(0.0),
            respawn_time_left: 0.0,
            big,
        }
    }

    #[must_use]
    pub fn with_respawn_time_left(mut self, time: f64) -> Self {
        self.set_respawn_time_left(time);
        self
    }

    pub fn position(&self) -> DVec3 {
        self.position
    }

    pub fn is_big(&self) -> bool {
        self.big
    }

    pub fn is_active(&self) -> bool {
        self.respawn_time_left <= 0.0
    }

    pub fn respawn_time_left(&self) -> f64 {
        self.respawn_time_left
    }

    pub fn set_respawn_time_left(&mut self, time: f64) {
        self.respawn_time_left = time.max(0.0);
    }

    /// Counts the respawn timer down. Returns whether the pad is active afterwards.
    pub fn reduce_respawn_time_left(&mut self, amount: f64) -> bool {
        self.set_respawn_time_left(self.respawn_time_left - amount);
        self.is_active()
    }

    /// Starts the full respawn countdown for this pad's size.
    pub fn refresh_respawn_timer(&mut self) {
        self.respawn_time_left = if self.big {
            Self::RESPAWN_TIME_BIG
        } else {
            Self::RESPAWN_TIME_SMALL
        };
    }

    pub fn set_active(&mut self) {
        self.respawn_time_left = 0.0;
    }

    /// Boost granted on pickup.
    pub fn boost_amount(&self) -> f64 {
        if self.big {
            Self::AMOUNT_BIG
        } else {
            Self::AMOUNT_SMALL
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_never_goes_negative() {
        let mut pad = BoostPad::new(DVec3::new(0.0, 0.0, 70.0), false);
        assert_eq!(pad.position().z, 0.0);
        pad.refresh_respawn_timer();
        assert_eq!(pad.respawn_time_left(), BoostPad::RESPAWN_TIME_SMALL);
        assert!(!pad.is_active());

        assert!(!pad.reduce_respawn_time_left(1.0));
        assert!(pad.reduce_respawn_time_left(5.0));
        assert_eq!(pad.respawn_time_left(), 0.0);
        assert!(pad.is_active());
    }

    #[test]
    fn tier_sets_duration_and_amount() {
        let mut big = BoostPad::new(DVec3::ZERO, true);
        big.refresh_respawn_timer();
        assert_eq!(big.respawn_time_left(), BoostPad::RESPAWN_TIME_BIG);
        assert_eq!(big.boost_amount(), 100.0);
        big.set_active();
        assert!(big.is_active());

        let small = BoostPad::new(DVec3::ZERO, false).with_respawn_time_left(-2.0);
        assert_eq!(small.respawn_time_left(), 0.0);
        assert_eq!(small.boost_amount(), 12.0);
    }
}
