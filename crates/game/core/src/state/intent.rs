use core::hash::{Hash, Hasher};

use bitflags::bitflags;

bitflags! {
    /// Digital outputs of a [`ControlIntent`].
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Buttons: u8 {
        const JUMP = 1 << 0;
        const BOOST = 1 << 1;
        const SLIDE = 1 << 2;
        /// Not a controller button: asks the scheduler to keep re-invoking
        /// the leaf that produced this intent.
        const HIGH_PRIORITY = 1 << 3;
    }
}

/// Controller output for one tick.
///
/// Analog axes are clamped to `[-1, 1]` by every setter. Equality and hashing
/// compare every field bit for bit.
#[derive(Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControlIntent {
    steer: f64,
    pitch: f64,
    roll: f64,
    throttle: f64,
    buttons: Buttons,
}

fn clamp_axis(value: f64) -> f64 {
    value.clamp(-1.0, 1.0)
}

impl ControlIntent {
    /// No input at all.
    pub const NEUTRAL: Self = Self {
        steer: 0.0,
        pitch: 0.0,
        roll: 0.0,
        throttle: 0.0,
        buttons: Buttons::empty(),
    };

    pub fn new() -> Self {
        Self::NEUTRAL
    }

    /// 0 is straight, -1 hard left, 1 hard right.
    #[must_use]
    pub fn with_steer(mut self, steer: f64) -> Self {
        self.steer = clamp_axis(steer);
        self
    }

    /// -1 tilts the nose down (front flip), 1 up (back flip).
    #[must_use]
    pub fn with_pitch(mut self, pitch: f64) -> Self {
        self.pitch = clamp_axis(pitch);
        self
    }

    #[must_use]
    pub fn with_roll(mut self, roll: f64) -> Self {
        self.roll = clamp_axis(roll);
        self
    }

    /// 1 is forwards, -1 backwards.
    #[must_use]
    pub fn with_throttle(mut self, throttle: f64) -> Self {
        self.throttle = clamp_axis(throttle);
        self
    }

    #[must_use]
    pub fn with_jump(self, pressed: bool) -> Self {
        self.with_button(Buttons::JUMP, pressed)
    }

    #[must_use]
    pub fn with_boost(self, pressed: bool) -> Self {
        self.with_button(Buttons::BOOST, pressed)
    }

    #[must_use]
    pub fn with_slide(self, pressed: bool) -> Self {
        self.with_button(Buttons::SLIDE, pressed)
    }

    #[must_use]
    pub fn with_high_priority(self, high_priority: bool) -> Self {
        self.with_button(Buttons::HIGH_PRIORITY, high_priority)
    }

    fn with_button(mut self, button: Buttons, pressed: bool) -> Self {
        self.buttons.set(button, pressed);
        self
    }

    pub fn steer(&self) -> f64 {
        self.steer
    }

    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    pub fn roll(&self) -> f64 {
        self.roll
    }

    pub fn throttle(&self) -> f64 {
        self.throttle
    }

    pub fn buttons(&self) -> Buttons {
        self.buttons
    }

    pub fn jump(&self) -> bool {
        self.buttons.contains(Buttons::JUMP)
    }

    pub fn boost(&self) -> bool {
        self.buttons.contains(Buttons::BOOST)
    }

    pub fn slide(&self) -> bool {
        self.buttons.contains(Buttons::SLIDE)
    }

    pub fn is_high_priority(&self) -> bool {
        self.buttons.contains(Buttons::HIGH_PRIORITY)
    }

    fn axis_bits(&self) -> [u64; 4] {
        [
            self.steer.to_bits(),
            self.pitch.to_bits(),
            self.roll.to_bits(),
            self.throttle.to_bits(),
        ]
    }
}

impl PartialEq for ControlIntent {
    fn eq(&self, other: &Self) -> bool {
        self.axis_bits() == other.axis_bits() && self.buttons == other.buttons
    }
}

impl Eq for ControlIntent {}

impl Hash for ControlIntent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.axis_bits().hash(state);
        self.buttons.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn axes_are_clamped() {
        let intent = ControlIntent::new()
            .with_steer(5.0)
            .with_throttle(-5.0)
            .with_pitch(0.5)
            .with_roll(-1.5);
        assert_eq!(intent.steer(), 1.0);
        assert_eq!(intent.throttle(), -1.0);
        assert_eq!(intent.pitch(), 0.5);
        assert_eq!(intent.roll(), -1.0);
        assert_eq!(ControlIntent::new().with_steer(-5.0).steer(), -1.0);
    }

    #[test]
    fn buttons_toggle_independently() {
        let intent = ControlIntent::new().with_jump(true).with_boost(true).with_jump(false);
        assert!(!intent.jump());
        assert!(intent.boost());
        assert!(!intent.slide());
        assert!(!intent.is_high_priority());
        assert_eq!(intent.buttons(), Buttons::BOOST);
    }

    #[test]
    fn equality_and_hash_cover_every_field() {
        let a = ControlIntent::new().with_throttle(1.0).with_slide(true);
        let b = ControlIntent::new().with_throttle(1.0).with_slide(true);
        let c = b.with_high_priority(true);
        assert_eq!(a, b);
        assert_ne!(b, c);

        let set: HashSet<ControlIntent> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }
}
