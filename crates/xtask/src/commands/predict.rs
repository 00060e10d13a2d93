//! Print the predicted ball path of a recorded world packet
//!
//! Samples the bouncing-ball prediction at a fixed step and reports where
//! the ball first lands and meets a wall.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use game_core::physics::{self, Wall};
use game_core::{Ball, RigidBody};

use super::packet;

/// Print the predicted ball path of a recorded world packet
#[derive(Parser)]
pub struct Predict {
    /// JSON world packet to read the ball from
    #[arg(value_name = "PACKET")]
    packet: PathBuf,

    /// Seconds to predict
    #[arg(short, long, default_value_t = 3.0)]
    duration: f64,

    /// Seconds between samples
    #[arg(short, long, default_value_t = 0.1)]
    step: f64,

    /// Print samples as JSON
    #[arg(long)]
    json: bool,
}

impl Predict {
    pub fn execute(self) -> Result<()> {
        let packet = packet::load(&self.packet)?;
        let [x, y, z] = packet.ball.physics.location;
        let [vx, vy, vz] = packet.ball.physics.velocity;
        let ball = RigidBody::new([x, y, z].into(), [vx, vy, vz].into());

        let path = physics::ball_path(&ball, self.duration, self.step).with_context(|| {
            format!(
                "Invalid prediction window (duration {}, step {})",
                self.duration, self.step
            )
        })?;

        if self.json {
            let samples: Vec<_> = path
                .keys()
                .iter()
                .map(|(time, position)| {
                    serde_json::json!({ "t": time, "position": position.to_array() })
                })
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&samples).context("Failed to serialize path to JSON")?
            );
            return Ok(());
        }

        println!("{} {}", style("Packet:").bold().cyan(), self.packet.display());
        println!(
            "{} ({:.1}, {:.1}, {:.1})  velocity ({:.1}, {:.1}, {:.1})",
            style("Ball:").bold().cyan(),
            x,
            y,
            z,
            vx,
            vy,
            vz
        );
        print_events(&ball);
        println!();

        println!("{}", style("=== Predicted Path ===").bold().green());
        for (time, position) in path.keys() {
            println!(
                "  {:>6.2}s  ({:>8.1}, {:>8.1}, {:>7.1})",
                time, position.x, position.y, position.z
            );
        }

        Ok(())
    }
}

fn print_events(ball: &RigidBody) {
    let landing = physics::predict_arrival_at_height(ball, Ball::RADIUS, true);
    let wall = physics::next_wall_hit(ball, Ball::RADIUS);

    match landing {
        Some(time) => println!("{} in {:.3}s", style("Lands:").bold().yellow(), time),
        None => println!("{} never", style("Lands:").bold().yellow()),
    }
    match wall {
        Some((wall, time)) => println!(
            "{} {} in {:.3}s",
            style("Wall:").bold().yellow(),
            wall_name(wall),
            time
        ),
        None => println!("{} none ahead", style("Wall:").bold().yellow()),
    }
}

fn wall_name(wall: Wall) -> &'static str {
    match wall {
        Wall::XPositive => "+x side wall",
        Wall::XNegative => "-x side wall",
        Wall::YPositive => "+y end wall",
        Wall::YNegative => "-y end wall",
    }
}
