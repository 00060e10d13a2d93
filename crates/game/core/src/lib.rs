//! Deterministic world model, physics and planning for a car-and-ball game agent.
//!
//! `game-core` owns the per-tick snapshot ([`Situation`]), the closed-form
//! predictions and bouncing-ball integration in [`physics`], the one-tick
//! forward [`simulation`], and the [`search`] that turns a goal into a timed
//! sequence of [`ControlIntent`]s. Everything here is a pure function over
//! copies: no call mutates a snapshot it was given.
pub mod arena;
pub mod config;
pub mod error;
pub mod estimates;
pub mod math;
pub mod physics;
pub mod search;
pub mod simulation;
pub mod state;
pub mod timeline;

pub use arena::{Arena, Team};
pub use config::SearchConfig;
pub use error::{PhysicsError, SnapshotError, TimelineError};
pub use estimates::time_till_car_can_hit_ball;
pub use math::{DVec2, DVec3, Lerp, Rotator, Zone};
pub use physics::{GRAVITY, Wall};
pub use search::{IntentionFunction, Plan, find_sequence};
pub use simulation::simulate;
pub use state::{
    Ball, BallRelation, Body, BoostPad, BoostPads, Buttons, Car, ControlIntent, GameInfo,
    RigidBody, Situation, WorldPacket,
};
pub use timeline::{SteppedTimeline, Timeline};
