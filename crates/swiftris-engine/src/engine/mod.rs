//! Game rules and state management.
//!
//! This module builds the rules of the game on top of the core geometry:
//!
//! - [`Swiftris`] - The rules engine (grid, falling and preview shapes, score, level)
//! - [`GameListener`] - Receiver of [`GameEvent`] notifications
//! - [`GameConfig`] - Board dimensions, anchors and scoring constants
//! - [`ShapeGenerator`] - Seeded random shape generation
//! - [`GameSeed`] - Seed for deterministic shape generation
//! - [`GameSession`] - Headless host driving the engine from its own events
//! - [`GameStats`] - Statistics accumulated over one or more games
//!
//! # Game Flow
//!
//! 1. [`Swiftris::begin_game`] creates the preview shape
//! 2. [`Swiftris::new_shape`] promotes it to the falling shape
//! 3. The player rotates, shifts or drops the falling shape while
//!    [`Swiftris::let_shape_fall`] advances gravity
//! 4. A landed shape is followed by [`Swiftris::remove_completed_lines`] and
//!    the next [`Swiftris::new_shape`]
//! 5. The game ends when a new shape cannot be placed
//!
//! The engine only reports what happened; the host decides what to call next.
//! [`GameSession`] is such a host with the usual reactions built in.
//!
//! # Example
//!
//! ```
//! use swiftris_engine::{GameConfig, GameSeed, GameSession, ShapeGenerator};
//!
//! let generator = ShapeGenerator::with_seed(GameSeed::from_u128(42));
//! let mut session = GameSession::with_generator(GameConfig::default(), generator).unwrap();
//!
//! session.move_left();
//! session.rotate();
//! session.drop();
//!
//! assert_eq!(session.stats().completed_shapes(), 1);
//! ```

pub use self::{
    config::*, event::*, game_session::*, game_stats::*, shape_generator::*, swiftris::*,
};

mod config;
mod event;
mod game_session;
mod game_stats;
mod shape_generator;
mod swiftris;
