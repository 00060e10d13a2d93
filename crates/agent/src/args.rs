//! Translation of textual leaf arguments into situation-dependent values.
//!
//! Leaf signatures are plain text, so a leaf that steers towards "the ball"
//! or checks "my goal box" receives a name that is resolved against every new
//! snapshot. Literal coordinates are written `x,y,z`.

use core::str::FromStr;

use game_core::{Arena, Body, DVec3, Situation, Zone};

use crate::error::ArgumentError;

/// A point argument, resolved per tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointArg {
    BallPosition,
    BallLandingPosition,
    MyPosition,
    EnemyPosition,
    MyGoal,
    EnemyGoal,
    BestBoostPad,
    Fixed(DVec3),
}

impl PointArg {
    /// The point in `situation`, or `None` if it does not exist right now
    /// (no active boost pad worth taking).
    pub fn resolve(&self, situation: &Situation) -> Option<DVec3> {
        let my_team = situation.my_car().team();
        match self {
            Self::BallPosition => Some(situation.ball().position),
            Self::BallLandingPosition => Some(situation.ball_landing_position()),
            Self::MyPosition => Some(situation.my_car().position()),
            Self::EnemyPosition => Some(situation.enemy_car().position()),
            Self::MyGoal => Some(Arena::goal_position(my_team)),
            Self::EnemyGoal => Some(Arena::goal_position(my_team.opponent())),
            Self::BestBoostPad => situation.best_boost_pad().map(|pad| pad.position()),
            Self::Fixed(point) => Some(*point),
        }
    }
}

impl FromStr for PointArg {
    type Err = ArgumentError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let point = match value {
            "ball_pos" => Self::BallPosition,
            "ball_land_pos" => Self::BallLandingPosition,
            "my_pos" => Self::MyPosition,
            "enemy_pos" => Self::EnemyPosition,
            "my_goal" => Self::MyGoal,
            "enemy_goal" => Self::EnemyGoal,
            "best_boost" => Self::BestBoostPad,
            _ => Self::Fixed(parse_vector(value)?),
        };
        Ok(point)
    }
}

fn parse_vector(value: &str) -> Result<DVec3, ArgumentError> {
    let invalid = || ArgumentError::InvalidPoint {
        value: value.to_owned(),
    };
    let mut components = value.split(',').map(|part| part.trim().parse::<f64>());
    let mut next = || components.next().and_then(Result::ok).ok_or_else(invalid);
    let point = DVec3::new(next()?, next()?, next()?);
    if components.next().is_some() {
        return Err(invalid());
    }
    Ok(point)
}

/// A zone argument, resolved per tick relative to our team.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::EnumString, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ZoneArg {
    MyGoalBox,
    EnemyGoalBox,
    MyGoalInside,
    EnemyGoalInside,
}

impl ZoneArg {
    pub fn resolve(&self, situation: &Situation) -> Zone {
        let my_team = situation.my_car().team();
        match self {
            Self::MyGoalBox => Arena::goal_box(my_team),
            Self::EnemyGoalBox => Arena::goal_box(my_team.opponent()),
            Self::MyGoalInside => Arena::goal_inside(my_team),
            Self::EnemyGoalInside => Arena::goal_inside(my_team.opponent()),
        }
    }
}

pub fn parse_point(value: &str) -> Result<PointArg, ArgumentError> {
    value.parse()
}

pub fn parse_zone(value: &str) -> Result<ZoneArg, ArgumentError> {
    value.parse().map_err(|_| ArgumentError::InvalidZone {
        value: value.to_owned(),
    })
}

pub fn parse_number(value: &str) -> Result<f64, ArgumentError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
        .ok_or_else(|| ArgumentError::InvalidNumber {
            value: value.to_owned(),
        })
}

pub fn parse_bool(value: &str) -> Result<bool, ArgumentError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ArgumentError::InvalidBool {
            value: value.to_owned(),
        }),
    }
}

/// Rejects an argument list whose length is outside `min..=max`.
pub fn check_arity(
    leaf: &'static str,
    args: &[&str],
    min: usize,
    max: usize,
) -> Result<(), ArgumentError> {
    if (min..=max).contains(&args.len()) {
        Ok(())
    } else {
        Err(ArgumentError::Arity {
            leaf,
            min,
            max,
            got: args.len(),
        })
    }
}
