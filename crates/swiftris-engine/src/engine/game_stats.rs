use serde::{Deserialize, Serialize};

/// Statistics accumulated over one or more games.
///
/// Tracks:
///
/// - **Completed shapes**: shapes settled into the grid
/// - **Cleared lines**: total, and a histogram of lines removed per landing
/// - **Games**: number of finished games, best score and highest level
///
/// Score and level of the running game live in the engine; they are folded
/// into the statistics by [`Self::complete_game`].
///
/// # Example
///
/// ```
/// use swiftris_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_shape_landing(2);
/// stats.complete_shape_landing(0);
/// stats.complete_game(20, 1);
///
/// assert_eq!(stats.completed_shapes(), 2);
/// assert_eq!(stats.total_cleared_lines(), 2);
/// assert_eq!(stats.line_cleared_counter()[2], 1);
/// assert_eq!(stats.best_score(), 20);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GameStats {
    completed_shapes: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
    games_played: usize,
    best_score: u32,
    highest_level: u32,
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            completed_shapes: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
            games_played: 0,
            best_score: 0,
            highest_level: 1,
        }
    }

    #[must_use]
    pub const fn completed_shapes(&self) -> usize {
        self.completed_shapes
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of lines removed per landing.
    ///
    /// Index `n` counts landings that removed `n` lines; the last entry also
    /// counts landings whose follow-up clears removed more than four lines.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    #[must_use]
    pub const fn games_played(&self) -> usize {
        self.games_played
    }

    #[must_use]
    pub const fn best_score(&self) -> u32 {
        self.best_score
    }

    #[must_use]
    pub const fn highest_level(&self) -> u32 {
        self.highest_level
    }

    /// Records a shape landing that removed `cleared_lines` lines in total.
    pub fn complete_shape_landing(&mut self, cleared_lines: usize) {
        self.completed_shapes += 1;
        self.total_cleared_lines += cleared_lines;
        let bucket = cleared_lines.min(self.line_cleared_counter.len() - 1);
        self.line_cleared_counter[bucket] += 1;
    }

    /// Records the end of a game that reached `score` points at `level`.
    pub fn complete_game(&mut self, score: u32, level: u32) {
        self.games_played += 1;
        self.best_score = self.best_score.max(score);
        self.highest_level = self.highest_level.max(level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stats_are_zero() {
        let stats = GameStats::new();
        assert_eq!(stats.completed_shapes(), 0);
        assert_eq!(stats.total_cleared_lines(), 0);
        assert_eq!(stats.line_cleared_counter(), &[0; 5]);
        assert_eq!(stats.games_played(), 0);
        assert_eq!(stats.highest_level(), 1);
    }

    #[test]
    fn test_landing_histogram() {
        let mut stats = GameStats::new();
        for lines in [0, 0, 1, 4, 3, 6] {
            stats.complete_shape_landing(lines);
        }
        assert_eq!(stats.completed_shapes(), 6);
        assert_eq!(stats.total_cleared_lines(), 14);
        assert_eq!(stats.line_cleared_counter(), &[2, 1, 0, 1, 2]);
    }

    #[test]
    fn test_complete_game_keeps_best() {
        let mut stats = GameStats::new();
        stats.complete_game(120, 1);
        stats.complete_game(40, 1);
        stats.complete_game(600, 2);
        assert_eq!(stats.games_played(), 3);
        assert_eq!(stats.best_score(), 600);
        assert_eq!(stats.highest_level(), 2);
    }

    #[test]
    fn test_stats_serialization() {
        let mut stats = GameStats::new();
        stats.complete_shape_landing(1);
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["completed_shapes"], 1);
        assert_eq!(json["line_cleared_counter"][1], 1);
        let back: GameStats = serde_json::from_value(json).unwrap();
        assert_eq!(back, stats);
    }
}
