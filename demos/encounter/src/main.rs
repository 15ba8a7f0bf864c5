//! encounter — one ego craft flying a three-track corridor through randomly
//! placed background traffic.
//!
//! Runs a decision-step episode loop: each decision forwards one high-level
//! action to the ego, then integrates `simulation_frequency /
//! policy_frequency` ticks, stopping early once the episode is terminal.
//! Reward favours high velocity and punishes crashing.  Trajectories go to
//! `output/encounter/*.csv`.
//!
//! Set `RUST_LOG=debug` to see collisions and ignored track changes.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use log::info;

use sc_core::{CraftId, SimConfig, Tick, Vec2};
use sc_craft::{Craft, Guidance, HighLevelAction, Route};
use sc_output::{CsvWriter, OutputWriter, TrajectoryObserver};
use sc_space::{ProximityIndex, Space, SpaceBuilder, SpaceObserver};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:                 u64 = 42;
const BACKGROUND_CRAFT:     usize = 12;
const AREA:                 f64 = 240.0;
const HIGH_VELOCITY_REWARD: f64 = 1.0;
/// Velocity the scripted policy tries to hold.
const CRUISE_VELOCITY:      f64 = 60.0;
/// Gap to the craft ahead below which the policy dodges or brakes.
const SAFE_GAP:             f64 = 30.0;
const CORRIDOR_TRACKS:      usize = 3;
const TRACK_SPACING:        f64 = 6.0;

// ── Observer wrapper ──────────────────────────────────────────────────────────

/// Forwards every tick to the trajectory writer but holds back `on_run_end`
/// so the episode can drive `run_ticks` one tick at a time.
struct EpisodeObserver<W: OutputWriter> {
    inner:      TrajectoryObserver<W>,
    collisions: usize,
}

impl<W: OutputWriter> SpaceObserver for EpisodeObserver<W> {
    fn on_tick_start(&mut self, tick: Tick) {
        self.inner.on_tick_start(tick);
    }

    fn on_collision(&mut self, tick: Tick, a: CraftId, b: CraftId) {
        self.collisions += 1;
        info!("{tick}: {a} collided with {b}");
        self.inner.on_collision(tick, a, b);
    }

    fn on_tick_end(&mut self, tick: Tick, crashed: usize) {
        self.inner.on_tick_end(tick, crashed);
    }

    fn on_snapshot(&mut self, tick: Tick, space: &Space) {
        self.inner.on_snapshot(tick, space);
    }
}

// ── Episode ───────────────────────────────────────────────────────────────────

struct Episode {
    config: SimConfig,
    space:  Space,
    ego:    CraftId,
    steps:  u64,
}

impl Episode {
    fn reset(config: SimConfig) -> Result<Self> {
        let corridor = Route::straight(Vec2::new(-AREA, 0.0), 0.0, 4.0 * AREA)?
            .with_tracks(CORRIDOR_TRACKS, TRACK_SPACING)?;
        let guidance = Guidance::new(50.0).with_route(corridor).on_track(1);
        let ego = Craft::controlled(Vec2::new(-AREA / 2.0, -TRACK_SPACING), 0.0, 50.0, guidance);

        let mut space = SpaceBuilder::new(config.clone())
            .craft(ego)
            .random_craft(config.craft_count)
            .area(AREA)
            .build()
            .context("building the encounter space")?;
        let ego = space.ids().next().context("ego craft missing")?;
        let space = space.randomize_behavior();

        Ok(Self { config, space, ego, steps: 0 })
    }

    fn ego(&self) -> Result<&Craft> {
        self.space.get(self.ego).context("ego craft left the space")
    }

    /// Forward `action`, then integrate one decision step worth of ticks.
    fn step<O: SpaceObserver>(&mut self, action: HighLevelAction, obs: &mut O) -> Result<(f64, bool)> {
        self.steps += 1;
        self.space.act_on(self.ego, action)?;
        for _ in 0..self.config.steps_per_decision() {
            self.space.run_ticks(1, self.config.dt(), obs)?;
            if self.is_terminal()? {
                break;
            }
        }
        Ok((self.reward()?, self.is_terminal()?))
    }

    fn reward(&self) -> Result<f64> {
        let ego = self.ego()?;
        let crashed = if ego.is_crashed() { 1.0 } else { 0.0 };
        Ok(self.config.collision_reward * crashed
            + HIGH_VELOCITY_REWARD * ego.velocity() / Craft::MAX_VELOCITY)
    }

    fn is_terminal(&self) -> Result<bool> {
        Ok(self.ego()?.is_crashed() || self.steps >= self.config.duration)
    }
}

// ── Scripted policy ───────────────────────────────────────────────────────────

/// Dodge or brake for traffic ahead, otherwise cruise.
fn choose_action(episode: &Episode) -> Result<HighLevelAction> {
    let ego = episode.ego()?;
    let (ahead, _) = episode.space.neighbours(episode.ego)?;

    if let Some(other) = ahead.and_then(|id| episode.space.get(id)) {
        if other.position().distance(ego.position()) < SAFE_GAP {
            let track = ego.guidance().map_or(0, Guidance::track);
            return Ok(if track + 1 < CORRIDOR_TRACKS {
                HighLevelAction::Right
            } else if track > 0 {
                HighLevelAction::Left
            } else {
                HighLevelAction::Slower
            });
        }
    }

    let target = ego.guidance().map_or(0.0, |g| g.target_velocity);
    Ok(if target < CRUISE_VELOCITY { HighLevelAction::Faster } else { HighLevelAction::Idle })
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    let config = SimConfig {
        seed:           SEED,
        craft_count:    BACKGROUND_CRAFT,
        record_history: true,
        ..SimConfig::default()
    };
    config.validate()?;

    println!("=== encounter — spacecraft simulation ===");
    println!(
        "Background craft: {}  |  Decisions: {}  |  {} Hz / {} Hz  |  Seed: {SEED}",
        config.craft_count, config.duration, config.simulation_frequency, config.policy_frequency
    );
    println!();

    let mut episode = Episode::reset(config.clone())?;

    std::fs::create_dir_all("output/encounter")?;
    let writer = CsvWriter::new(Path::new("output/encounter"))?;
    let mut obs = EpisodeObserver {
        inner:      TrajectoryObserver::new(writer, &config),
        collisions: 0,
    };

    let t0 = Instant::now();
    let mut total_reward = 0.0;
    loop {
        let action = choose_action(&episode)?;
        let (reward, terminal) = episode.step(action, &mut obs)?;
        total_reward += reward;

        let ego = episode.ego()?;
        let view = episode.space.simplified(episode.ego, config.perception_distance)?;
        info!(
            "step {:>2}: {action:<6} v={:5.1} reward={reward:+.3} perceived={}",
            episode.steps,
            ego.velocity(),
            view.len() - 1
        );
        if terminal {
            break;
        }
    }
    let elapsed = t0.elapsed();

    obs.inner.on_run_end(episode.space.current_tick());
    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // Summary.
    let ego = episode.ego()?;
    println!("Episode complete in {:.3} s", elapsed.as_secs_f64());
    println!("  decisions      : {}", episode.steps);
    println!("  ticks          : {}", episode.space.current_tick().0);
    println!("  total reward   : {total_reward:+.3}");
    println!("  ego crashed    : {}", if ego.is_crashed() { "yes" } else { "no" });
    println!("  collisions     : {}", obs.collisions);
    println!("  crashed craft  : {}", episode.space.crashed_count());
    println!();

    // Final positions, nearest to the ego first.
    let index = ProximityIndex::build(&episode.space);
    println!("{:<12} {:<11} {:>9} {:>9} {:>7} {:<7}", "Craft", "Kind", "x", "y", "v", "Crashed");
    println!("{}", "-".repeat(60));
    for id in index.k_nearest(ego.position(), 8) {
        let Some(c) = episode.space.get(id) else { continue };
        println!(
            "{:<12} {:<11} {:>9.1} {:>9.1} {:>7.1} {:<7}",
            id.to_string(),
            c.kind().label(),
            c.position().x,
            c.position().y,
            c.velocity(),
            if c.is_crashed() { "yes" } else { "no" },
        );
    }

    Ok(())
}
