//! Field geometry.

use glam::{DVec2, DVec3};

use crate::math::Zone;

/// One of the two sides of a match.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Team {
    /// Defends the goal at negative y.
    #[default]
    Blue,
    /// Defends the goal at positive y.
    Orange,
}

impl Team {
    /// Team from the raw packet id (0 is blue, anything else orange).
    pub const fn from_id(id: u8) -> Self {
        if id == 0 { Self::Blue } else { Self::Orange }
    }

    pub const fn opponent(self) -> Self {
        match self {
            Self::Blue => Self::Orange,
            Self::Orange => Self::Blue,
        }
    }

    /// Sign of the y coordinate of this team's own goal.
    pub const fn goal_direction(self) -> f64 {
        match self {
            Self::Blue => -1.0,
            Self::Orange => 1.0,
        }
    }
}

/// Field dimensions and landmarks. x spans the width, y the length.
pub struct Arena;

impl Arena {
    pub const LENGTH: f64 = 10280.0;
    pub const WIDTH: f64 = 8240.0;
    pub const HEIGHT: f64 = 4060.0;
    pub const DIAGONAL: f64 = 14300.0;

    pub const WALL_X: f64 = Self::WIDTH / 2.0;
    pub const WALL_Y: f64 = Self::LENGTH / 2.0;

    pub const GOAL_POST_X_OFFSET: f64 = 720.0;
    pub const GOAL_HEIGHT: f64 = 700.0;
    pub const GOAL_DEPTH: f64 = 800.0;
    /// Distance from the goal line to the point in front of the goal.
    pub const GOAL_POSITION_Y: f64 = 4850.0;
    pub const GOAL_BOX_DEPTH: f64 = 1000.0;
    pub const GOAL_BOX_HEIGHT: f64 = 1500.0;

    /// The whole field.
    pub fn field() -> Zone {
        Self::field_with_wall_offset(0.0)
    }

    /// The field with every wall moved inwards by `offset`.
    pub fn field_with_wall_offset(offset: f64) -> Zone {
        let wx = Self::WALL_X - offset;
        let wy = Self::WALL_Y - offset;
        Zone::new(DVec3::new(wx, wy, Self::HEIGHT), DVec3::new(-wx, -wy, 0.0))
    }

    /// The area in front of `team`'s goal.
    pub fn goal_box(team: Team) -> Zone {
        let dir = team.goal_direction();
        Zone::new(
            DVec3::new(-Self::GOAL_POST_X_OFFSET, dir * Self::WALL_Y, 0.0),
            DVec3::new(
                Self::GOAL_POST_X_OFFSET,
                dir * (Self::WALL_Y - Self::GOAL_BOX_DEPTH),
                Self::GOAL_BOX_HEIGHT,
            ),
        )
    }

    /// The space behind `team`'s goal line.
    pub fn goal_inside(team: Team) -> Zone {
        let dir = team.goal_direction();
        Zone::new(
            DVec3::new(-Self::GOAL_POST_X_OFFSET, dir * Self::WALL_Y, 0.0),
            DVec3::new(
                Self::GOAL_POST_X_OFFSET,
                dir * (Self::WALL_Y + Self::GOAL_DEPTH),
                Self::GOAL_HEIGHT,
            ),
        )
    }

    /// A point just in front of `team`'s goal.
    pub fn goal_position(team: Team) -> DVec3 {
        DVec3::new(0.0, team.goal_direction() * Self::GOAL_POSITION_Y, 0.0)
    }

    /// The center of `team`'s goal line.
    pub fn goal_line_position(team: Team) -> DVec3 {
        DVec3::new(0.0, team.goal_direction() * Self::WALL_Y, 0.0)
    }

    /// Left and right post of `team`'s goal, seen from the field.
    pub fn goal_posts(team: Team) -> [DVec2; 2] {
        let y = team.goal_direction() * Self::WALL_Y;
        [
            DVec2::new(-Self::GOAL_POST_X_OFFSET, y),
            DVec2::new(Self::GOAL_POST_X_OFFSET, y),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goal_boxes_sit_on_their_own_side() {
        assert!(Arena::goal_box(Team::Blue).contains(DVec3::new(0.0, -4800.0, 100.0)));
        assert!(!Arena::goal_box(Team::Blue).contains(DVec3::new(0.0, 4800.0, 100.0)));
        assert!(Arena::goal_inside(Team::Orange).contains(DVec3::new(100.0, 5500.0, 300.0)));
        assert_eq!(Arena::goal_position(Team::Orange).y, 4850.0);
    }

    #[test]
    fn wall_offset_shrinks_the_field() {
        let inner = Arena::field_with_wall_offset(100.0);
        assert!(Arena::field().contains(DVec3::new(Arena::WALL_X - 50.0, 0.0, 10.0)));
        assert!(!inner.contains(DVec3::new(Arena::WALL_X - 50.0, 0.0, 10.0)));
    }

    #[test]
    fn team_names() {
        assert_eq!(Team::Blue.to_string(), "blue");
        assert_eq!(Team::from_id(1), Team::Orange);
        assert_eq!(Team::Orange.opponent(), Team::Blue);
    }
}
