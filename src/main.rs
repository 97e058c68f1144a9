use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;

use skirmish::engine::input::{Action, InputEvent};
use skirmish::engine::time::PHYSICS_DT;
use skirmish::logging;
use skirmish::scene::test_arena::{patrol_waypoints, BOT_SPAWNS, PATROL_SPAWN, PLAYER_SPAWN};
use skirmish::{Arena, PhysicsConfig, Simulation};

#[derive(Parser)]
#[command(name = "skirmish", about = "Headless arena locomotion sandbox")]
struct Args {
    /// Fixed ticks to simulate
    #[arg(long, default_value_t = 600)]
    ticks: u32,
    /// Bots chasing the player
    #[arg(long, default_value_t = 2)]
    bots: usize,
    /// JSON physics config; missing fields keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,
    /// JSON arena description; the built-in test arena when omitted
    #[arg(long)]
    arena: Option<PathBuf>,
    /// Log grounded/airborne transitions
    #[arg(long, short)]
    verbose: bool,
}

/// Scripted player: sprint forward, hop every second and a half, sweep the view.
fn scripted_events(tick: u32) -> Vec<InputEvent> {
    let mut events = Vec::new();
    if tick == 0 {
        events.push(InputEvent::Pressed(Action::Forward));
        events.push(InputEvent::Pressed(Action::Sprint));
    }
    match tick % 90 {
        45 => events.push(InputEvent::Pressed(Action::Jump)),
        46 => events.push(InputEvent::Released(Action::Jump)),
        _ => {}
    }
    if tick % 120 < 30 {
        events.push(InputEvent::Look { dx: 10.0, dy: 0.0 });
    }
    events
}

/// Player spawn and the spawns bots cycle through.
///
/// Prefers the test arena's names and falls back to whatever a loaded map
/// defines: the first spawn for the player and every spawn for bots.
fn spawn_plan(arena: &Arena) -> anyhow::Result<(String, Vec<String>)> {
    let names: Vec<String> = arena.spawn_points().iter().map(|s| s.name.clone()).collect();
    let Some(first) = names.first() else {
        anyhow::bail!("arena defines no spawn points");
    };
    let player = if arena.spawn_point(PLAYER_SPAWN).is_some() {
        PLAYER_SPAWN.to_string()
    } else {
        first.clone()
    };
    let preferred: Vec<String> = BOT_SPAWNS
        .iter()
        .filter(|name| arena.spawn_point(name).is_some())
        .map(|name| name.to_string())
        .collect();
    let bots = if preferred.is_empty() { names } else { preferred };
    Ok((player, bots))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let config = match &args.config {
        Some(path) => PhysicsConfig::load(path)
            .with_context(|| format!("loading physics config {}", path.display()))?,
        None => PhysicsConfig::default(),
    };

    let mut sim = match &args.arena {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading arena {}", path.display()))?;
            let arena = Arena::from_json_str(&json)
                .with_context(|| format!("loading arena {}", path.display()))?;
            Simulation::new(arena, config)
        }
        None => Simulation::with_test_arena(config).context("building test arena")?,
    };

    let (player_spawn, bot_spawns) = spawn_plan(sim.arena())?;
    let player = sim.spawn_player(&player_spawn)?;
    let mut bots = Vec::with_capacity(args.bots);
    for i in 0..args.bots {
        bots.push(sim.spawn_bot(&bot_spawns[i % bot_spawns.len()], Some(player))?);
    }
    let mut patrols = Vec::new();
    if args.arena.is_none() {
        patrols.push(sim.spawn_patrol_bot(PATROL_SPAWN, patrol_waypoints())?);
    }

    info!("running {} ticks with {} bots", args.ticks, args.bots);
    for tick in 0..args.ticks {
        sim.frame(PHYSICS_DT, scripted_events(tick));
    }

    for entity in std::iter::once(player).chain(bots.iter().copied()).chain(patrols) {
        if let (Some(state), Some(movement)) = (sim.state(entity), sim.move_state(entity)) {
            info!(
                "{entity:?}: position={:.2} feet_y={:.2} grounded={} state={}",
                state.position,
                state.feet_y,
                state.grounded,
                movement.label()
            );
        }
    }
    for &bot in &bots {
        info!(
            "{bot:?} sees player: {}",
            sim.has_line_of_sight(bot, player)?
        );
    }
    info!("simulated {} ticks", sim.ticks());
    Ok(())
}
