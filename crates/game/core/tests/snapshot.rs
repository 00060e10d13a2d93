use game_core::{Ball, Body, Situation, SnapshotError, Team, WorldPacket};

const PACKET: &str = r#"{
    "players": [
        {
            "physics": {
                "location": [0.0, -2000.0, 17.03],
                "velocity": [0.0, 500.0, 0.0],
                "rotation": [0.0, 1.5707963267948966, 0.0]
            },
            "boost": 34.0,
            "team": 0
        },
        {
            "physics": {
                "location": [0.0, 3000.0, 300.0],
                "velocity": [0.0, -200.0, 100.0]
            },
            "boost": 80.0,
            "jumped": true,
            "has_wheel_contact": false,
            "team": 1
        }
    ],
    "ball": { "physics": { "location": [0.0, 0.0, 92.2] } },
    "game_info": { "kickoff_pause": true },
    "boost_pads": [
        { "location": [0.0, -1000.0, 70.0], "is_full_boost": false },
        { "location": [3584.0, 0.0, 73.0], "is_full_boost": true, "timer": 4.0 }
    ]
}"#;

fn packet() -> WorldPacket {
    serde_json::from_str(PACKET).unwrap()
}

#[test]
fn builds_snapshot_from_json_packet() {
    let situation = Situation::from_packet(&packet(), 0).unwrap();

    assert_eq!(situation.my_index(), 0);
    assert_eq!(situation.enemy_index(), 1);
    assert_eq!(situation.player_count(), 2);
    assert!(situation.is_kickoff_pause());
    assert!(situation.is_round_active());
    assert!(!situation.is_match_over());

    let me = situation.my_car();
    assert_eq!(me.team(), Team::Blue);
    assert_eq!(me.boost(), 34.0);
    assert!(me.is_on_ground());
    assert!(!me.is_airborne());
    assert!(me.angle_to_ball().abs() < 1e-9);
    assert!((me.distance_to_ball() - 2000.0).abs() < 2.0);

    let enemy = situation.enemy_car();
    assert_eq!(enemy.team(), Team::Orange);
    assert!(enemy.has_jumped());
    assert!(enemy.is_airborne());

    assert_eq!(situation.boost_pads().len(), 2);
    assert_eq!(situation.boost_pads()[0].position().z, 0.0);
    assert!(situation.boost_pads()[0].is_active());
    assert!(!situation.boost_pads()[1].is_active());
    assert_eq!(situation.best_boost_pad(), Some(&situation.boost_pads()[0]));

    assert_eq!(situation.ball_landing_time(), 0.0);
    assert!(situation.has_possession(0));
    assert!(!situation.has_possession(1));
}

#[test]
fn second_player_sees_first_as_opponent() {
    let situation = Situation::from_packet(&packet(), 1).unwrap();
    assert_eq!(situation.my_index(), 1);
    assert_eq!(situation.enemy_index(), 0);
    assert_eq!(situation.my_car().team(), Team::Orange);
    assert_eq!(situation.car(0).boost(), 34.0);
}

#[test]
fn missing_opponent_is_rejected() {
    let mut packet = packet();
    packet.players.truncate(1);
    assert_eq!(
        Situation::from_packet(&packet, 0),
        Err(SnapshotError::MissingPlayer { index: 1, count: 1 })
    );
}

#[test]
fn accessors_do_not_leak_mutation() {
    let situation = Situation::from_packet(&packet(), 0).unwrap();
    let mut ball = *situation.ball();
    ball.set_position(ball.position() + game_core::DVec3::new(0.0, 0.0, 500.0));
    assert_eq!(situation.ball().position.z, Ball::RADIUS);
}
