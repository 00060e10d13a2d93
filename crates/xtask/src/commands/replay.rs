//! Replay a recorded world packet through the default agent
//!
//! The packet is turned into a snapshot once; every following tick is the
//! forward simulation of the previous one under the intent the agent chose.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use agent::{Agent, AgentConfig, Clock, LeafFactory, ManualClock, presets};
use game_core::{Body, ControlIntent, Situation, simulate};

use super::packet;

/// Run the default agent against a recorded world packet
#[derive(Parser)]
pub struct Replay {
    /// JSON world packet to start from
    #[arg(value_name = "PACKET")]
    packet: PathBuf,

    /// Number of ticks to run
    #[arg(short, long, default_value_t = 60)]
    ticks: usize,

    /// Player index of the controlled car
    #[arg(short, long, default_value_t = 0)]
    index: usize,

    /// Seconds per tick
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f64,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// One line per tick with intent and activity
    Summary,
    /// One JSON object per tick
    Json,
}

impl Replay {
    pub fn execute(self) -> Result<()> {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            anyhow::bail!("--dt must be positive, got {}", self.dt);
        }

        let packet = packet::load(&self.packet)?;
        let mut situation = Situation::from_packet(&packet, self.index)
            .with_context(|| format!("Failed to build snapshot for car {}", self.index))?;

        // Timed leaves follow simulated time, not wall time.
        let clock = Arc::new(ManualClock::new(0.0));
        let config = AgentConfig::from_env().with_clock(clock.clone());
        tracing::info!(
            step = config.search.step_size,
            expansions = config.search.max_expansions,
            depth = config.search.max_depth,
            "agent configured"
        );

        let tree =
            presets::striker(&LeafFactory::new(config)).context("Failed to build agent tree")?;
        let mut agent = Agent::new(self.index, tree);

        if matches!(self.format, OutputFormat::Summary) {
            println!("{} {}", style("Packet:").bold().cyan(), self.packet.display());
            println!("{} {}", style("Car:").bold().cyan(), self.index);
            println!("{} {}", style("Ticks:").bold().cyan(), self.ticks);
            println!();
        }

        for tick in 0..self.ticks {
            let intent = agent
                .process(situation.clone())
                .with_context(|| format!("Agent failed on tick {tick}"))?;
            let activity = agent.activity().to_string();

            match self.format {
                OutputFormat::Summary => {
                    print_tick(tick, clock.now(), &situation, &intent, &activity)
                }
                OutputFormat::Json => print_json(tick, &situation, &intent, &activity)?,
            }

            situation = simulate(&situation, &intent, self.dt)
                .with_context(|| format!("Simulation failed after tick {tick}"))?;
            clock.advance(self.dt);
        }

        Ok(())
    }
}

fn print_tick(tick: usize, time: f64, situation: &Situation, intent: &ControlIntent, activity: &str) {
    let car = situation.my_car();
    let position = car.position();
    println!(
        "{} {} {}",
        style(format!("[{tick:>4}]")).dim(),
        style(format!("{time:>6.3}s")).dim(),
        style(activity).bold().yellow()
    );
    println!(
        "       car ({:>8.1}, {:>8.1}, {:>6.1})  speed {:>6.1}  boost {:>5.1}  ball {:>7.1}",
        position.x,
        position.y,
        position.z,
        car.velocity().length(),
        car.boost(),
        car.distance_to_ball()
    );
    println!(
        "       steer {:>5.2}  throttle {:>5.2}  pitch {:>5.2}  {}{}{}{}",
        intent.steer(),
        intent.throttle(),
        intent.pitch(),
        flag("jump", intent.jump()),
        flag("boost", intent.boost()),
        flag("slide", intent.slide()),
        flag("held", intent.is_high_priority()),
    );
}

fn flag(name: &str, on: bool) -> String {
    if on {
        format!(" {}", style(name).green())
    } else {
        String::new()
    }
}

fn print_json(tick: usize, situation: &Situation, intent: &ControlIntent, activity: &str) -> Result<()> {
    let line = serde_json::json!({
        "tick": tick,
        "activity": activity,
        "intent": intent,
        "car": situation.my_car().position().to_array(),
        "ball": situation.ball().position.to_array(),
    });
    println!(
        "{}",
        serde_json::to_string(&line).context("Failed to serialize tick to JSON")?
    );
    Ok(())
}
