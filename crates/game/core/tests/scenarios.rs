use game_core::physics::{self, GRAVITY};
use game_core::{
    Ball, Body, BoostPads, Car, ControlIntent, DVec3, Rotator, RigidBody, SearchConfig, Situation,
    Team, find_sequence, simulate,
};

fn car(index: usize, position: DVec3) -> Car {
    Car::new(
        index,
        Team::from_id(index as u8),
        RigidBody::new(position.with_z(Car::GROUND_OFFSET), DVec3::ZERO),
    )
}

fn centred(ball: RigidBody) -> Situation {
    let mut me = car(0, DVec3::ZERO);
    me.set_ball_dependent_variables(&ball);
    let mut enemy = car(1, DVec3::new(0.0, 4000.0, 0.0));
    enemy.set_ball_dependent_variables(&ball);
    Situation::new(me, enemy, ball, BoostPads::new())
}

#[test]
fn collision_time_for_ball_rolling_at_centred_car() {
    let approaching = RigidBody::new(DVec3::new(2500.0, 0.0, 200.0), DVec3::new(-600.0, 0.0, 0.0));
    let time = centred(approaching).collision_time();
    assert!(time > 0.0 && time < 5.0, "{time}");

    let nearly_still = RigidBody::new(DVec3::new(2500.0, 0.0, 200.0), DVec3::new(-9.0, 0.0, 0.0));
    assert_eq!(centred(nearly_still).collision_time(), 0.0);
}

#[test]
fn dropped_ball_lands_and_bounces() {
    let height = 1000.0;
    let ball = RigidBody::new(DVec3::new(0.0, 0.0, Ball::RADIUS + height), DVec3::ZERO);

    let time = physics::predict_arrival_at_height(&ball, Ball::RADIUS, true).unwrap();
    let expected = (2.0 * height / -GRAVITY.z).sqrt();
    assert!((time - expected).abs() < 1e-9);

    let landed = physics::ball_after(&ball, time).unwrap();
    let impact = GRAVITY.z * time;
    assert!((landed.velocity().z - impact * Ball::GROUND_BOUNCINESS).abs() < 1e-6);
    assert!((landed.position().z - Ball::RADIUS).abs() < 1e-6);
}

#[test]
fn simulated_drive_matches_planner_output() {
    let ball = RigidBody::new(DVec3::new(0.0, 2000.0, Ball::RADIUS), DVec3::ZERO);
    let start = centred(ball);

    struct FacingBall;
    impl game_core::IntentionFunction for FacingBall {
        fn remaining_cost(&self, situation: &Situation) -> f64 {
            situation.my_car().angle_to_ball().abs()
        }
        fn is_fulfilled(&self, situation: &Situation) -> bool {
            situation.my_car().angle_to_ball().abs() < 0.1
        }
    }

    let config = SearchConfig::new();
    let plan = find_sequence(&start, &FacingBall, &config).unwrap();
    assert!(plan.fulfilled);

    let mut current = start;
    for (_, intent) in plan.timeline.values() {
        current = simulate(&current, intent, config.step_size).unwrap();
    }
    assert!(current.my_car().angle_to_ball().abs() < 0.1);
}

#[test]
fn steering_left_increases_yaw() {
    let ball = RigidBody::new(DVec3::new(0.0, 2000.0, Ball::RADIUS), DVec3::ZERO);
    let mut me = car(0, DVec3::ZERO);
    me.set_velocity(DVec3::new(800.0, 0.0, 0.0));
    me.set_rotation(Rotator::ZERO);
    let start = Situation::new(me, car(1, DVec3::new(0.0, 4000.0, 0.0)), ball, BoostPads::new());

    let left = ControlIntent::new().with_throttle(1.0).with_steer(1.0);
    let next = simulate(&start, &left, 0.1).unwrap();
    assert!(next.my_car().rotation().yaw > 0.0);
}
