use std::{mem, time::Duration};

use super::{
    GameStats,
    config::{ConfigError, GameConfig},
    event::GameEvent,
    shape_generator::ShapeGenerator,
    swiftris::Swiftris,
};

/// Tick length at level one.
pub const TICK_LENGTH_LEVEL_ONE: Duration = Duration::from_millis(600);

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Playing,
    GameOver,
}

/// A headless host for [`Swiftris`].
///
/// The session reacts to engine events the way an interactive front end
/// would, minus the drawing:
///
/// - a new game immediately spawns its first shape,
/// - a hard drop is followed by one gravity tick,
/// - a landing removes completed lines (repeating until none are left) and
///   spawns the next shape,
/// - a level-up shortens the suggested tick length,
/// - game over sweeps the board and waits for [`Self::restart`].
///
/// The session never sleeps. [`Self::tick_length`] is the interval at which
/// the host should call [`Self::tick`].
#[derive(Debug, Clone)]
pub struct GameSession {
    engine: Swiftris<Vec<GameEvent>>,
    stats: GameStats,
    session_state: SessionState,
    tick_length: Duration,
    game_score: u32,
    game_level: u32,
}

fn shortened_tick_length(tick_length: Duration) -> Duration {
    const STEP: Duration = Duration::from_millis(100);
    const FINE_STEP: Duration = Duration::from_millis(50);
    if tick_length >= STEP {
        tick_length - STEP
    } else if tick_length > FINE_STEP {
        tick_length - FINE_STEP
    } else {
        tick_length
    }
}

impl GameSession {
    /// Starts a session with the default configuration and a random seed.
    #[must_use]
    pub fn new() -> Self {
        let engine = Swiftris::new(Vec::new());
        Self::start(engine)
    }

    /// Starts a session with shapes drawn from `generator`.
    pub fn with_generator(
        config: GameConfig,
        generator: ShapeGenerator,
    ) -> Result<Self, ConfigError> {
        let engine = Swiftris::with_generator(config, generator, Vec::new())?;
        Ok(Self::start(engine))
    }

    fn start(engine: Swiftris<Vec<GameEvent>>) -> Self {
        let mut this = Self {
            engine,
            stats: GameStats::new(),
            session_state: SessionState::Playing,
            tick_length: TICK_LENGTH_LEVEL_ONE,
            game_score: 0,
            game_level: 1,
        };
        this.engine.begin_game();
        this.process_events();
        this
    }

    #[must_use]
    pub fn engine(&self) -> &Swiftris<Vec<GameEvent>> {
        &self.engine
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.session_state
    }

    #[must_use]
    pub fn tick_length(&self) -> Duration {
        self.tick_length
    }

    /// Score of the running game, or of the last game once it is over.
    #[must_use]
    pub fn game_score(&self) -> u32 {
        self.game_score
    }

    /// Level of the running game, or of the last game once it is over.
    #[must_use]
    pub fn game_level(&self) -> u32 {
        self.game_level
    }

    pub fn tick(&mut self) {
        self.command(Swiftris::let_shape_fall);
    }

    pub fn rotate(&mut self) -> bool {
        self.command(Swiftris::rotate_shape).unwrap_or(false)
    }

    pub fn move_left(&mut self) -> bool {
        self.command(Swiftris::move_shape_left).unwrap_or(false)
    }

    pub fn move_right(&mut self) -> bool {
        self.command(Swiftris::move_shape_right).unwrap_or(false)
    }

    pub fn drop(&mut self) {
        self.command(Swiftris::drop_shape);
    }

    /// Starts the next game after a game over. Does nothing while playing.
    pub fn restart(&mut self) {
        if self.session_state.is_game_over() {
            self.engine.begin_game();
            self.process_events();
        }
    }

    fn command<T>(&mut self, f: impl FnOnce(&mut Swiftris<Vec<GameEvent>>) -> T) -> Option<T> {
        if !self.session_state.is_playing() {
            return None;
        }
        let result = f(&mut self.engine);
        self.process_events();
        Some(result)
    }

    fn process_events(&mut self) {
        loop {
            let events = mem::take(self.engine.listener_mut());
            if events.is_empty() {
                break;
            }
            for event in events {
                self.handle_event(event);
            }
        }
    }

    fn handle_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::GameBegan => {
                self.session_state = SessionState::Playing;
                self.tick_length = TICK_LENGTH_LEVEL_ONE;
                self.game_score = self.engine.score();
                self.game_level = self.engine.level();
                self.engine.new_shape();
            }
            GameEvent::ShapeDropped => self.engine.let_shape_fall(),
            GameEvent::ShapeLanded => {
                let mut cleared_lines = 0;
                loop {
                    let clear = self.engine.remove_completed_lines();
                    if clear.is_empty() {
                        break;
                    }
                    cleared_lines += clear.lines();
                }
                self.game_score = self.engine.score();
                self.game_level = self.engine.level();
                self.stats.complete_shape_landing(cleared_lines);
                self.engine.new_shape();
            }
            GameEvent::LevelUp => {
                self.tick_length = shortened_tick_length(self.tick_length);
                tracing::debug!(tick_length = ?self.tick_length, "tick length shortened");
            }
            GameEvent::GameEnded => {
                self.stats.complete_game(self.game_score, self.game_level);
                let swept: usize = self.engine.remove_all_blocks().iter().map(Vec::len).sum();
                tracing::debug!(
                    swept,
                    score = self.game_score,
                    level = self.game_level,
                    "board swept after game over"
                );
                self.session_state = SessionState::GameOver;
            }
            GameEvent::ShapeMoved => {}
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
