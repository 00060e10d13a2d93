//! Snapshot fixtures shared by the unit tests.

use game_core::{BoostPads, Car, DVec3, RigidBody, Rotator, Situation, Team};

/// A grounded, standing car.
pub fn car(index: usize, team: Team, position: DVec3, yaw: f64) -> Car {
    let body = RigidBody::new(position.with_z(Car::GROUND_OFFSET), DVec3::ZERO)
        .with_rotation(Rotator::new(0.0, yaw, 0.0));
    Car::new(index, team, body)
}

/// `me` against an idle opponent parked in front of the far goal.
pub fn situation(me: Car, ball: RigidBody) -> Situation {
    situation_with_pads(me, ball, BoostPads::new())
}

pub fn situation_with_pads(mut me: Car, ball: RigidBody, pads: BoostPads) -> Situation {
    let enemy_index = if me.index() == 0 { 1 } else { 0 };
    let enemy_team = me.team().opponent();
    let y = enemy_team.goal_direction() * 4500.0;
    let mut enemy = car(enemy_index, enemy_team, DVec3::new(0.0, y, 0.0), 0.0);
    me.set_ball_dependent_variables(&ball);
    enemy.set_ball_dependent_variables(&ball);
    Situation::new(me, enemy, ball, pads)
}
