//! Error types for game-core.
//!
//! Only invalid input is an error here. A prediction that never comes true
//! (a body that never reaches a height, a plan that never fulfils its goal) is
//! a normal outcome and is reported through `Option` or a best-effort value
//! instead.

/// Invalid arguments passed to a physics or prediction function.
///
/// These are rejected at the call boundary and never clamped.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum PhysicsError {
    #[error("time must be zero or positive, got {time}")]
    NegativeTime { time: f64 },

    #[error("time must be finite, got {time}")]
    NonFiniteTime { time: f64 },

    #[error("step size must be positive, got {step}")]
    NonPositiveStepSize { step: f64 },

    #[error("speed factor {speed} is too small, must be at least {minimum}")]
    SpeedTooSmall { speed: f64, minimum: f64 },

    #[error("path of {duration}s every {step}s needs more than {max} samples")]
    TooManySamples { duration: f64, step: f64, max: usize },
}

impl PhysicsError {
    /// Rejects negative, infinite and NaN durations.
    pub(crate) fn check_time(time: f64) -> Result<(), Self> {
        if !time.is_finite() {
            Err(Self::NonFiniteTime { time })
        } else if time < 0.0 {
            Err(Self::NegativeTime { time })
        } else {
            Ok(())
        }
    }

    /// Rejects zero, negative and NaN step sizes.
    pub(crate) fn check_step(step: f64) -> Result<(), Self> {
        if step > 0.0 {
            Ok(())
        } else {
            Err(Self::NonPositiveStepSize { step })
        }
    }
}

/// Errors raised while building a [`Timeline`](crate::Timeline).
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum TimelineError {
    #[error("key at {time}s is earlier than the last key at {last}s")]
    OutOfOrder { time: f64, last: f64 },

    #[error("timeline already ended at {end}s")]
    AlreadyEnded { end: f64 },
}

/// Errors raised while building a [`Situation`](crate::Situation) from a raw packet.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    #[error("packet has no player at index {index} ({count} players present)")]
    MissingPlayer { index: usize, count: usize },

    #[error("packet lists {count} boost pads, at most {max} are supported")]
    TooManyBoostPads { count: usize, max: usize },
}
