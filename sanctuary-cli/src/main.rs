use std::error::Error;
use std::io;
use std::process::ExitCode;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sanctuary_core::{
    DayOutcome, EngineError, Location, RandomSource, Role, SimulationEngine, Snapshot,
};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod player;
mod render;

use player::{Player, RandomPlayer, Terminal};
use render::Renderer;

/// Sanctuary City - survive the occupation, or enforce it
#[derive(Parser, Debug)]
#[command(name = "sanctuary")]
#[command(about = "Turn-based survival in an occupied city")]
struct Args {
    /// Side to play: denizen or occupier
    #[arg(long, value_parser = parse_role)]
    role: Role,

    /// City: portland or newyork
    #[arg(long, default_value = "portland", value_parser = parse_location)]
    location: Location,

    /// Random seed for reproducible runs (random when absent)
    #[arg(long, env = "SANCTUARY_SEED")]
    seed: Option<u64>,

    /// Pick choices at random instead of reading stdin
    #[arg(long, default_value_t = false)]
    autoplay: bool,

    /// Stop after this many days if the game has not ended
    #[arg(long, default_value_t = 60)]
    max_days: u32,

    /// Print only a JSON report of the final state
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn parse_role(s: &str) -> Result<Role, String> {
    s.parse().map_err(|e: EngineError| e.to_string())
}

fn parse_location(s: &str) -> Result<Location, String> {
    s.parse().map_err(|e: EngineError| e.to_string())
}

/// How a run finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum Ending {
    GameOver,
    DayLimit,
    Quit,
}

#[derive(Debug, Serialize)]
struct Report {
    seed: u64,
    ending: Ending,
    snapshot: Snapshot,
}

/// Drive one session until it ends, the day limit passes, or the player quits.
fn play<R, P>(
    engine: &mut SimulationEngine<R>,
    player: &mut P,
    renderer: &mut Renderer,
    role: Role,
    location: Location,
    max_days: u32,
) -> Result<Ending, Box<dyn Error>>
where
    R: RandomSource,
    P: Player,
{
    let mut event = engine.start_game(role, location)?;

    loop {
        let state = engine.state().ok_or("session vanished")?;
        renderer.log(state);
        renderer.stats(state);
        if state.is_terminated() {
            return Ok(Ending::GameOver);
        }
        if state.day() > max_days {
            return Ok(Ending::DayLimit);
        }

        renderer.choices(&event);
        let Some(index) = player.choose(&event, state)? else {
            return Ok(Ending::Quit);
        };
        let result = engine.resolve_choice_index(index)?;

        let state = engine.state().ok_or("session vanished")?;
        renderer.log(state);
        if result.terminated {
            renderer.stats(state);
            return Ok(Ending::GameOver);
        }
        if !player.end_day(state)? {
            return Ok(Ending::Quit);
        }

        if let DayOutcome::Event(next) = engine.advance_day()? {
            event = next;
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, role = %args.role, location = %args.location, "Starting run");

    let mut engine = SimulationEngine::seeded(seed);
    let mut renderer = Renderer::new(args.json);
    let (role, location, max_days) = (args.role, args.location, args.max_days);
    let ending = if args.autoplay {
        let mut player = RandomPlayer::new(StdRng::seed_from_u64(seed.wrapping_add(1)));
        play(&mut engine, &mut player, &mut renderer, role, location, max_days)?
    } else {
        let mut player = Terminal::new(io::stdin().lock());
        play(&mut engine, &mut player, &mut renderer, role, location, max_days)?
    };

    let snapshot = engine.snapshot().ok_or("no session to report")?;
    if args.json {
        let report = Report {
            seed,
            ending,
            snapshot,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        match ending {
            Ending::GameOver => println!("Survived until day {}.", snapshot.day),
            Ending::DayLimit => println!("Day limit reached on day {}.", snapshot.day),
            Ending::Quit => println!("You walked away on day {}.", snapshot.day),
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn autoplay(role: Role, seed: u64, max_days: u32) -> (Ending, Snapshot) {
        let mut engine = SimulationEngine::seeded(seed);
        let mut player = RandomPlayer::new(StdRng::seed_from_u64(seed));
        let mut renderer = Renderer::new(true);
        let ending = play(
            &mut engine,
            &mut player,
            &mut renderer,
            role,
            Location::NewYork,
            max_days,
        )
        .unwrap();
        (ending, engine.snapshot().unwrap())
    }

    #[test]
    fn autoplay_finishes_within_day_limit() {
        for seed in 0..20 {
            for role in Role::ALL {
                let (ending, snapshot) = autoplay(role, seed, 40);
                match ending {
                    Ending::GameOver => assert!(snapshot.terminated),
                    Ending::DayLimit => assert_eq!(snapshot.day, 41),
                    Ending::Quit => panic!("random player never quits"),
                }
            }
        }
    }

    #[test]
    fn same_seed_replays_identically() {
        assert_eq!(autoplay(Role::Denizen, 77, 30), autoplay(Role::Denizen, 77, 30));
    }

    #[test]
    fn terminal_quit_stops_the_run() {
        let mut engine = SimulationEngine::seeded(3);
        let mut player = Terminal::new("1\nq\n".as_bytes());
        let mut renderer = Renderer::new(true);
        let ending = play(
            &mut engine,
            &mut player,
            &mut renderer,
            Role::Denizen,
            Location::Portland,
            10,
        )
        .unwrap();

        assert_eq!(ending, Ending::Quit);
        let state = engine.state().unwrap();
        assert_eq!(state.day(), 1);
        assert_eq!(state.value(sanctuary_core::DenizenStat::Supplies), Some(15));
    }

    #[test]
    fn report_serializes_ending_and_snapshot() {
        let (ending, snapshot) = autoplay(Role::Occupier, 1, 5);
        let report = Report {
            seed: 1,
            ending,
            snapshot,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["seed"], 1);
        assert_eq!(json["snapshot"]["role"], "occupier");
        assert!(json["ending"].is_string());
    }

    #[test]
    fn args_parse_role_and_location() {
        let args = Args::try_parse_from([
            "sanctuary",
            "--role",
            "occupier",
            "--location",
            "new-york",
            "--seed",
            "9",
            "--autoplay",
        ])
        .unwrap();
        assert_eq!(args.role, Role::Occupier);
        assert_eq!(args.location, Location::NewYork);
        assert_eq!(args.seed, Some(9));
        assert!(args.autoplay);

        assert!(Args::try_parse_from(["sanctuary", "--role", "mayor"]).is_err());
    }
}
