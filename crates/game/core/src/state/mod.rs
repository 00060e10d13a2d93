//! World state: bodies, cars, boost pads, control intents and the per-tick snapshot.

mod body;
mod boost_pad;
mod car;
mod intent;
pub mod packet;
mod situation;

pub use body::{Ball, Body, RigidBody};
pub use boost_pad::BoostPad;
pub use car::{BallRelation, Car};
pub use intent::{Buttons, ControlIntent};
pub use packet::{BallInfo, BoostPadInfo, GameInfo, PhysicsInfo, PlayerInfo, WorldPacket};
pub use situation::{BoostPads, Situation};
