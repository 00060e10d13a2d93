use arrayvec::ArrayVec;
use glam::DVec3;

use crate::arena::{Arena, Team};
use crate::error::SnapshotError;
use crate::math::{Rotator, angle_to_point};
use crate::physics::{predict_arrival_at_height, step_body};
use crate::state::packet::{GameInfo, PhysicsInfo, PlayerInfo, WorldPacket};
use crate::state::{Ball, Body, BoostPad, Car, RigidBody};

/// Fixed-capacity list of the pads on a standard field.
pub type BoostPads = ArrayVec<BoostPad, { BoostPad::COUNT_TOTAL }>;

/// Immutable snapshot of the world for one tick, seen from one car.
///
/// Derived facts (ball landing, possession, best boost pad) are computed once
/// at construction. Accessors hand out shared references; callers that want
/// to modify a body clone it first.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Situation {
    my_car: Car,
    enemy_car: Car,
    ball: RigidBody,
    boost_pads: BoostPads,
    game: GameInfo,
    player_count: usize,

    ball_landing_time: f64,
    ball_landing_position: DVec3,
    best_boost_pad: Option<usize>,
    my_possession: f64,
    enemy_possession: f64,
}

impl Situation {
    /// Builds a snapshot from its parts. The cars' ball-dependent values are
    /// taken as they are.
    pub fn new(my_car: Car, enemy_car: Car, ball: RigidBody, boost_pads: BoostPads) -> Self {
        let (ball_landing_time, ball_landing_position) =
            match predict_arrival_at_height(&ball, Ball::RADIUS, true) {
                Some(time) => {
                    let mut landed = ball;
                    step_body(&mut landed, time, true);
                    (time, landed.position)
                }
                None => (0.0, ball.position),
            };

        let my_possession = possession_utility(&my_car, &ball);
        let enemy_possession = possession_utility(&enemy_car, &ball);
        let best_boost_pad = best_boost_pad(&my_car, &boost_pads);

        Self {
            my_car,
            enemy_car,
            ball,
            boost_pads,
            game: GameInfo::default(),
            player_count: 2,
            ball_landing_time,
            ball_landing_position,
            best_boost_pad,
            my_possession,
            enemy_possession,
        }
    }

    #[must_use]
    pub fn with_game_info(mut self, game: GameInfo) -> Self {
        self.game = game;
        self
    }

    /// Builds the snapshot for the car at `index` from a raw packet.
    ///
    /// The opponent is player 0, or player 1 when `index` is 0.
    ///
    /// # Errors
    ///
    /// [`SnapshotError`] if either car is missing or the packet lists more
    /// pads than a field has.
    pub fn from_packet(packet: &WorldPacket, index: usize) -> Result<Self, SnapshotError> {
        let enemy_index = if index == 0 { 1 } else { 0 };
        let ball = body_from(&packet.ball.physics);

        let player = |i: usize| {
            packet
                .players
                .get(i)
                .map(|info| car_from(i, info, &ball))
                .ok_or(SnapshotError::MissingPlayer {
                    index: i,
                    count: packet.players.len(),
                })
        };
        let my_car = player(index)?;
        let enemy_car = player(enemy_index)?;

        if packet.boost_pads.len() > BoostPad::COUNT_TOTAL {
            return Err(SnapshotError::TooManyBoostPads {
                count: packet.boost_pads.len(),
                max: BoostPad::COUNT_TOTAL,
            });
        }
        let boost_pads = packet
            .boost_pads
            .iter()
            .map(|pad| {
                BoostPad::new(pad.location.into(), pad.is_full_boost)
                    .with_respawn_time_left(pad.timer)
            })
            .collect();

        let mut situation =
            Self::new(my_car, enemy_car, ball, boost_pads).with_game_info(packet.game_info);
        situation.player_count = packet.players.len();
        Ok(situation)
    }

    pub fn my_index(&self) -> usize {
        self.my_car.index()
    }

    pub fn enemy_index(&self) -> usize {
        self.enemy_car.index()
    }

    pub fn my_car(&self) -> &Car {
        &self.my_car
    }

    pub fn enemy_car(&self) -> &Car {
        &self.enemy_car
    }

    /// The car with player `index`; any index other than ours is the opponent.
    pub fn car(&self, index: usize) -> &Car {
        if index == self.my_car.index() {
            &self.my_car
        } else {
            &self.enemy_car
        }
    }

    pub fn ball(&self) -> &RigidBody {
        &self.ball
    }

    pub fn boost_pads(&self) -> &[BoostPad] {
        &self.boost_pads
    }

    /// Seconds until the ball is next at resting height, 0 if it never gets there.
    pub fn ball_landing_time(&self) -> f64 {
        self.ball_landing_time
    }

    pub fn ball_landing_position(&self) -> DVec3 {
        self.ball_landing_position
    }

    pub fn game_info(&self) -> &GameInfo {
        &self.game
    }

    pub fn is_kickoff_pause(&self) -> bool {
        self.game.kickoff_pause
    }

    pub fn is_match_over(&self) -> bool {
        self.game.match_ended
    }

    pub fn is_overtime(&self) -> bool {
        self.game.overtime
    }

    pub fn is_round_active(&self) -> bool {
        self.game.round_active
    }

    pub fn player_count(&self) -> usize {
        self.player_count
    }

    /// The active pad with the best mix of closeness and facing for our car.
    pub fn best_boost_pad(&self) -> Option<&BoostPad> {
        self.best_boost_pad.map(|i| &self.boost_pads[i])
    }

    /// Whether the car with player `index` has the ball. Exactly one side does.
    pub fn has_possession(&self, index: usize) -> bool {
        let enemy_has_it = self.my_possession < self.enemy_possession;
        if index == self.my_car.index() {
            !enemy_has_it
        } else {
            enemy_has_it
        }
    }

    /// Whether `point` lies behind the car with player `index`.
    pub fn is_point_behind_car(&self, index: usize, point: DVec3) -> bool {
        let car = self.car(index);
        car.front().dot(point - car.position()) < 0.0
    }

    /// Seconds until our car, driving straight on, meets the ball.
    ///
    /// Scans ahead in 0.02 s steps for the first moment at least 0.1 s away
    /// where the distance from the car's nose to the ball matches how far the
    /// car gets by then (within 25 units). A car slower than 800 is assumed
    /// to drive at 800. Returns 0 when the ball is still or no moment matches.
    pub fn collision_time(&self) -> f64 {
        const STEP: f64 = 0.02;
        const LIMIT: f64 = 5.0;
        const MIN_TIME: f64 = 0.1;
        const TOLERANCE: f64 = 25.0;
        const NOSE: f64 = 70.0;
        const MIN_CAR_SPEED: f64 = 800.0;

        let ball_velocity = self.ball.velocity;
        if ball_velocity.length() < Ball::STILL_SPEED {
            return 0.0;
        }

        let nose = self.my_car.position() + self.my_car.front() * NOSE;
        let car_speed = self.my_car.velocity().length().max(MIN_CAR_SPEED);

        let steps = (LIMIT / STEP).round() as usize;
        (1..=steps)
            .map(|i| i as f64 * STEP)
            .filter(|time| *time >= MIN_TIME - 1e-9)
            .find(|time| {
                let expected = self.ball.position + ball_velocity * *time;
                (expected.distance(nose) - car_speed * time).abs() < TOLERANCE
            })
            .unwrap_or(0.0)
    }

    /// Whether the ball is within three ball radii of a wall.
    pub fn is_ball_near_wall(&self) -> bool {
        !Arena::field_with_wall_offset(Ball::RADIUS * 3.0).contains(self.ball.position)
    }

    pub fn is_car_near_wall(&self, index: usize) -> bool {
        self.car(index).is_near_wall()
    }
}

fn body_from(physics: &PhysicsInfo) -> RigidBody {
    RigidBody {
        position: physics.location.into(),
        velocity: physics.velocity.into(),
        acceleration: DVec3::ZERO,
        rotation: Rotator::from(physics.rotation),
        angular_velocity: physics.angular_velocity.into(),
    }
}

fn car_from(index: usize, info: &PlayerInfo, ball: &RigidBody) -> Car {
    let mut car = Car::new(index, Team::from_id(info.team), body_from(&info.physics));
    car.set_boost(info.boost);
    car.set_has_jumped(info.jumped);
    car.set_has_double_jumped(info.double_jumped);
    car.set_demolished(info.demolished);
    car.set_airborne(!info.has_wheel_contact);
    car.set_ball_dependent_variables(ball);
    car
}

/// Distance, facing and speed terms, weighted equally.
fn possession_utility(car: &Car, ball: &RigidBody) -> f64 {
    let distance = 1.0 - car.position().distance(ball.position) / Arena::LENGTH;
    let angle = car.angle_to_ball().cos();
    let speed = car.velocity().length() / Car::MAX_VELOCITY;
    distance + angle + speed
}

fn best_boost_pad(car: &Car, pads: &[BoostPad]) -> Option<usize> {
    let position = car.position();
    let yaw = car.rotation().yaw;
    pads.iter()
        .enumerate()
        .filter(|(_, pad)| pad.is_active())
        .map(|(i, pad)| {
            let angle = angle_to_point(position.truncate(), yaw, pad.position().truncate());
            let closeness = (Arena::LENGTH - position.distance(pad.position())) / Arena::LENGTH;
            (i, angle.cos() * closeness)
        })
        .filter(|(_, utility)| *utility > 0.0)
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(i, _)| i)
}
