//! Raw per-tick world state as delivered by the host game.
//!
//! Vectors are `[x, y, z]` arrays and rotations `[pitch, yaw, roll]`, which
//! keeps the JSON form independent of the math library.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsInfo {
    pub location: [f64; 3],
    pub velocity: [f64; 3],
    pub rotation: [f64; 3],
    pub angular_velocity: [f64; 3],
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerInfo {
    pub physics: PhysicsInfo,
    pub boost: f64,
    pub jumped: bool,
    pub double_jumped: bool,
    pub demolished: bool,
    pub has_wheel_contact: bool,
    pub team: u8,
}

impl Default for PlayerInfo {
    fn default() -> Self {
        Self {
            physics: PhysicsInfo::default(),
            boost: 0.0,
            jumped: false,
            double_jumped: false,
            demolished: false,
            has_wheel_contact: true,
            team: 0,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallInfo {
    pub physics: PhysicsInfo,
}

/// Match phase flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameInfo {
    pub kickoff_pause: bool,
    pub match_ended: bool,
    pub overtime: bool,
    pub round_active: bool,
}

impl Default for GameInfo {
    fn default() -> Self {
        Self {
            kickoff_pause: false,
            match_ended: false,
            overtime: false,
            round_active: true,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoostPadInfo {
    pub location: [f64; 3],
    pub is_full_boost: bool,
    /// Seconds until the pad respawns, 0 if active.
    pub timer: f64,
}

/// Everything the host reports for one tick.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldPacket {
    pub players: Vec<PlayerInfo>,
    pub ball: BallInfo,
    pub game_info: GameInfo,
    pub boost_pads: Vec<BoostPadInfo>,
}
