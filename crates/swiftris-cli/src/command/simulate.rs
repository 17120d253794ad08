use std::path::PathBuf;

use anyhow::Context as _;
use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::Serialize;
use swiftris_engine::{GameConfig, GameSeed, GameSession, GameStats, ShapeGenerator};

use crate::util::{self, Output};

const DEFAULT_GAMES: usize = 1;
const DEFAULT_MAX_TICKS: usize = 100_000;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Seed for shapes and player moves, as 32 hexadecimal digits [default: random]
    #[arg(long)]
    seed: Option<GameSeed>,
    /// Number of games to play
    #[arg(long, default_value_t = DEFAULT_GAMES)]
    games: usize,
    /// Tick limit per game. A game that reaches it ends the run
    #[arg(long, default_value_t = DEFAULT_MAX_TICKS)]
    max_ticks: usize,
    /// JSON file with the game configuration; missing fields use defaults
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

impl Default for SimulateArg {
    fn default() -> Self {
        Self {
            seed: None,
            games: DEFAULT_GAMES,
            max_ticks: DEFAULT_MAX_TICKS,
            config: None,
            output: None,
        }
    }
}

#[derive(Debug, Serialize)]
struct SimulationSummary {
    seed: GameSeed,
    config: GameConfig,
    games: Vec<GameReport>,
    stats: GameStats,
}

#[derive(Debug, Serialize)]
struct GameReport {
    game: usize,
    ticks: usize,
    /// `false` if the tick limit was reached before game over.
    finished: bool,
    score: u32,
    level: u32,
    completed_shapes: usize,
    cleared_lines: usize,
    tick_length_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Intent {
    Rotate,
    MoveLeft,
    MoveRight,
    Drop,
    Wait,
}

impl Distribution<Intent> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Intent {
        match rng.random_range(0..10) {
            0 | 1 => Intent::Rotate,
            2 | 3 => Intent::MoveLeft,
            4 | 5 => Intent::MoveRight,
            6 => Intent::Drop,
            _ => Intent::Wait,
        }
    }
}

/// Picks one random intent before every gravity tick.
#[derive(Debug, Clone)]
struct RandomPlayer {
    rng: Pcg32,
}

impl RandomPlayer {
    fn new(seed: GameSeed) -> Self {
        // Little-endian bytes keep this stream apart from the shape generator's.
        Self {
            rng: Pcg32::from_seed(seed.as_u128().to_le_bytes()),
        }
    }

    fn act(&mut self, session: &mut GameSession) -> Intent {
        let intent = self.rng.random();
        match intent {
            Intent::Rotate => {
                session.rotate();
            }
            Intent::MoveLeft => {
                session.move_left();
            }
            Intent::MoveRight => {
                session.move_right();
            }
            Intent::Drop => session.drop(),
            Intent::Wait => {}
        }
        intent
    }
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let config = match &arg.config {
        Some(path) => util::read_config_file(path)?,
        None => GameConfig::default(),
    };
    let seed = arg.seed.unwrap_or_else(|| rand::rng().random());
    tracing::info!(%seed, games = arg.games, max_ticks = arg.max_ticks, "starting simulation");

    let mut session =
        GameSession::with_generator(config.clone(), ShapeGenerator::with_seed(seed))
            .context("Invalid game configuration")?;
    let mut player = RandomPlayer::new(seed);

    let mut games = Vec::with_capacity(arg.games);
    for game in 0..arg.games {
        session.restart();
        let report = play_game(&mut session, &mut player, game, arg.max_ticks);
        let finished = report.finished;
        games.push(report);
        if !finished {
            tracing::warn!(game, max_ticks = arg.max_ticks, "tick limit reached, stopping");
            break;
        }
    }

    let summary = SimulationSummary {
        seed,
        config,
        games,
        stats: session.stats().clone(),
    };
    Output::save_json(&summary, arg.output.clone())
}

fn play_game(
    session: &mut GameSession,
    player: &mut RandomPlayer,
    game: usize,
    max_ticks: usize,
) -> GameReport {
    let before = session.stats().clone();
    let mut ticks = 0;
    while session.state().is_playing() && ticks < max_ticks {
        player.act(session);
        session.tick();
        ticks += 1;
    }

    let stats = session.stats();
    let report = GameReport {
        game,
        ticks,
        finished: session.state().is_game_over(),
        score: session.game_score(),
        level: session.game_level(),
        completed_shapes: stats.completed_shapes() - before.completed_shapes(),
        cleared_lines: stats.total_cleared_lines() - before.total_cleared_lines(),
        tick_length_ms: u64::try_from(session.tick_length().as_millis()).unwrap_or(u64::MAX),
    };
    tracing::info!(
        game,
        ticks,
        score = report.score,
        level = report.level,
        shapes = report.completed_shapes,
        lines = report.cleared_lines,
        "game finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(seed: GameSeed) -> GameSession {
        GameSession::with_generator(GameConfig::default(), ShapeGenerator::with_seed(seed))
            .unwrap()
    }

    #[test]
    fn test_random_player_is_reproducible() {
        let seed = GameSeed::from_u128(99);
        let mut a = RandomPlayer::new(seed);
        let mut b = RandomPlayer::new(seed);
        let mut session_a = session(seed);
        let mut session_b = session(seed);
        for _ in 0..200 {
            assert_eq!(a.act(&mut session_a), b.act(&mut session_b));
        }
        assert_eq!(session_a.stats(), session_b.stats());
    }

    #[test]
    fn test_games_run_to_completion() {
        let seed = GameSeed::from_u128(7);
        let mut session = session(seed);
        let mut player = RandomPlayer::new(seed);
        let first = play_game(&mut session, &mut player, 0, DEFAULT_MAX_TICKS);
        assert!(first.finished);
        assert!(first.completed_shapes > 0);
        assert_eq!(session.stats().games_played(), 1);

        session.restart();
        let second = play_game(&mut session, &mut player, 1, DEFAULT_MAX_TICKS);
        assert!(second.finished);
        assert_eq!(session.stats().games_played(), 2);
        assert_eq!(
            session.stats().completed_shapes(),
            first.completed_shapes + second.completed_shapes
        );
        assert_eq!(
            session.stats().best_score(),
            first.score.max(second.score)
        );
    }

    #[test]
    fn test_tick_limit_leaves_game_unfinished() {
        let seed = GameSeed::from_u128(8);
        let mut session = session(seed);
        let mut player = RandomPlayer::new(seed);
        let report = play_game(&mut session, &mut player, 0, 3);
        assert_eq!(report.ticks, 3);
        assert!(!report.finished);
        assert_eq!(session.stats().games_played(), 0);
    }
}
