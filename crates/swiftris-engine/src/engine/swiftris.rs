use crate::core::{array2d::Array2D, block::Block, shape::Shape};

use super::{
    config::{ConfigError, GameConfig},
    event::{GameEvent, GameListener},
    shape_generator::ShapeGenerator,
};

/// The board of settled blocks.
pub type Grid = Array2D<Block>;

/// Lifecycle of the game held by a [`Swiftris`] engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum GameStatus {
    /// `begin_game` has not been called yet.
    NotStarted,
    InProgress,
    /// The last game ended; `begin_game` starts another one.
    Ended,
}

/// Result of [`Swiftris::remove_completed_lines`].
///
/// Both vectors are empty when no line was completed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineClear {
    /// Blocks of every removed row, bottom row first, each row left to right.
    pub removed_lines: Vec<Vec<Block>>,
    /// Blocks that were relocated after the clear, grouped by column in
    /// ascending column order. Each group lists blocks bottom-up with their
    /// new positions. Columns without relocated blocks are omitted.
    pub fallen_blocks: Vec<Vec<Block>>,
}

impl LineClear {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.removed_lines.is_empty()
    }

    /// Number of removed rows.
    #[must_use]
    pub fn lines(&self) -> usize {
        self.removed_lines.len()
    }
}

/// Everything the engine knows about the current game.
///
/// Listeners receive a shared reference to this with every event.
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    grid: Grid,
    falling_shape: Option<Shape>,
    next_shape: Option<Shape>,
    score: u32,
    level: u32,
    status: GameStatus,
}

impl GameState {
    fn new(config: GameConfig) -> Self {
        let grid = Grid::new(usize::from(config.columns), usize::from(config.rows));
        Self {
            config,
            grid,
            falling_shape: None,
            next_shape: None,
            score: 0,
            level: 1,
            status: GameStatus::NotStarted,
        }
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn falling_shape(&self) -> Option<&Shape> {
        self.falling_shape.as_ref()
    }

    #[must_use]
    pub fn next_shape(&self) -> Option<&Shape> {
        self.next_shape.as_ref()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    fn columns(&self) -> i32 {
        i32::from(self.config.columns)
    }

    fn rows(&self) -> i32 {
        i32::from(self.config.rows)
    }

    /// Returns `true` if the falling shape cannot exist where it is: a block
    /// lies outside the board or on a settled block.
    ///
    /// Returns `false` when there is no falling shape.
    #[must_use]
    pub fn detect_illegal_placement(&self) -> bool {
        self.falling_shape
            .as_ref()
            .is_some_and(|shape| is_illegal_placement(&self.grid, shape))
    }

    /// Returns `true` if the falling shape rests on the floor or on a settled
    /// block.
    #[must_use]
    pub fn detect_touch(&self) -> bool {
        let Some(shape) = &self.falling_shape else {
            return false;
        };
        let last_row = self.rows() - 1;
        shape.bottom_blocks().iter().any(|block| {
            block.row() == last_row || self.grid.is_occupied(block.column(), block.row() + 1)
        })
    }
}

fn is_illegal_placement(grid: &Grid, shape: &Shape) -> bool {
    shape.blocks().iter().any(|block| {
        match grid.try_get(block.column(), block.row()) {
            Ok(cell) => cell.is_some(),
            Err(_) => true,
        }
    })
}

/// The rules engine.
///
/// `Swiftris` owns the grid of settled blocks, the falling shape and the
/// preview shape. It validates every move against the grid, settles shapes,
/// clears completed lines and keeps score. Progress is reported to the
/// [`GameListener`] `L`.
///
/// Every mutation of the falling shape is speculative: the change is applied,
/// the new placement is checked with
/// [`detect_illegal_placement`](GameState::detect_illegal_placement), and the
/// exact inverse change is applied if it turned out illegal. Illegal moves are
/// never reported as errors.
///
/// # Example
///
/// ```
/// use swiftris_engine::{GameEvent, Swiftris};
///
/// let mut game = Swiftris::new(Vec::new());
/// game.begin_game();
/// assert!(game.new_shape().is_some());
///
/// game.move_shape_left();
/// game.drop_shape();
/// game.let_shape_fall();
///
/// assert!(game.falling_shape().is_none());
/// assert_eq!(game.grid().iter().count(), 4);
/// assert!(game.listener().contains(&GameEvent::ShapeLanded));
/// ```
#[derive(Debug, Clone)]
pub struct Swiftris<L> {
    state: GameState,
    generator: ShapeGenerator,
    listener: L,
}

impl<L> Swiftris<L>
where
    L: GameListener,
{
    /// Creates an engine with the default configuration and a random seed.
    #[must_use]
    pub fn new(listener: L) -> Self {
        Self::from_parts(GameConfig::default(), ShapeGenerator::new(), listener)
    }

    /// Creates an engine with the given configuration and a random seed.
    pub fn with_config(config: GameConfig, listener: L) -> Result<Self, ConfigError> {
        Self::with_generator(config, ShapeGenerator::new(), listener)
    }

    /// Creates an engine whose shapes come from `generator`.
    pub fn with_generator(
        config: GameConfig,
        generator: ShapeGenerator,
        listener: L,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_parts(config, generator, listener))
    }

    fn from_parts(config: GameConfig, generator: ShapeGenerator, listener: L) -> Self {
        Self {
            state: GameState::new(config),
            generator,
            listener,
        }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        self.state.config()
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        self.state.grid()
    }

    #[must_use]
    pub fn falling_shape(&self) -> Option<&Shape> {
        self.state.falling_shape()
    }

    #[must_use]
    pub fn next_shape(&self) -> Option<&Shape> {
        self.state.next_shape()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.state.score()
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.state.level()
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.state.status()
    }

    #[must_use]
    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    #[must_use]
    pub fn detect_illegal_placement(&self) -> bool {
        self.state.detect_illegal_placement()
    }

    #[must_use]
    pub fn detect_touch(&self) -> bool {
        self.state.detect_touch()
    }

    /// Gives mutable access to the grid, e.g. to set up a board position.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.state.grid
    }

    /// Replaces the falling shape without any legality check.
    pub fn set_falling_shape(&mut self, shape: Option<Shape>) {
        self.state.falling_shape = shape;
    }

    fn emit(&mut self, event: GameEvent) {
        match event {
            GameEvent::ShapeMoved => tracing::trace!(?event, "shape event"),
            GameEvent::LevelUp => {
                tracing::info!(level = self.state.level, score = self.state.score, "level up");
            }
            GameEvent::GameEnded => tracing::info!("game ended"),
            _ => tracing::debug!(
                ?event,
                score = self.state.score,
                level = self.state.level,
                "game event"
            ),
        }
        self.listener.on_event(event, &self.state);
    }

    fn spawn_preview(&mut self) -> Shape {
        let GameConfig {
            preview_column,
            preview_row,
            ..
        } = self.state.config;
        self.generator.spawn(preview_column, preview_row)
    }

    /// Starts a game. Creates the preview shape if there is none.
    pub fn begin_game(&mut self) {
        if self.state.next_shape.is_none() {
            let shape = self.spawn_preview();
            self.state.next_shape = Some(shape);
        }
        self.state.status = GameStatus::InProgress;
        self.emit(GameEvent::GameBegan);
    }

    /// Promotes the preview shape to the falling shape at the spawn anchor and
    /// generates a fresh preview shape.
    ///
    /// If the promoted shape cannot be placed, it is moved back into the
    /// preview slot, the game ends and `None` is returned. Otherwise returns
    /// copies of the new falling and preview shapes.
    pub fn new_shape(&mut self) -> Option<(Shape, Shape)> {
        let mut falling = match self.state.next_shape.take() {
            Some(shape) => shape,
            None => self.spawn_preview(),
        };
        falling.move_to(self.state.config.starting_column, self.state.config.starting_row);
        self.state.falling_shape = Some(falling);
        let next = self.spawn_preview();
        self.state.next_shape = Some(next);

        if self.state.detect_illegal_placement() {
            let mut shape = self.state.falling_shape.take()?;
            tracing::debug!(%shape, "spawn position blocked");
            shape.move_to(self.state.config.preview_column, self.state.config.preview_row);
            self.state.next_shape = Some(shape);
            self.end_game();
            return None;
        }

        let falling = self.state.falling_shape.clone()?;
        let next = self.state.next_shape.clone()?;
        tracing::trace!(%falling, "new falling shape");
        Some((falling, next))
    }

    /// Applies `apply` to the falling shape and keeps the result if it is
    /// legal; otherwise applies `revert` and reports no movement.
    fn transform_falling(&mut self, apply: fn(&mut Shape), revert: fn(&mut Shape)) -> bool {
        let GameState {
            grid,
            falling_shape,
            ..
        } = &mut self.state;
        let Some(shape) = falling_shape else {
            return false;
        };
        apply(shape);
        if is_illegal_placement(grid, shape) {
            revert(shape);
            return false;
        }
        self.emit(GameEvent::ShapeMoved);
        true
    }

    /// Rotates the falling shape clockwise if the result is legal.
    pub fn rotate_shape(&mut self) -> bool {
        self.transform_falling(Shape::rotate_clockwise, Shape::rotate_counter_clockwise)
    }

    pub fn move_shape_left(&mut self) -> bool {
        self.transform_falling(
            Shape::shift_left_by_one_column,
            Shape::shift_right_by_one_column,
        )
    }

    pub fn move_shape_right(&mut self) -> bool {
        self.transform_falling(
            Shape::shift_right_by_one_column,
            Shape::shift_left_by_one_column,
        )
    }

    /// Moves the falling shape straight down to the lowest legal position.
    ///
    /// The shape is not settled; the host is expected to keep ticking (or
    /// call [`let_shape_fall`](Self::let_shape_fall)) after the
    /// [`GameEvent::ShapeDropped`] notification.
    pub fn drop_shape(&mut self) {
        let GameState {
            grid,
            falling_shape,
            ..
        } = &mut self.state;
        let Some(shape) = falling_shape else {
            return;
        };
        while !is_illegal_placement(grid, shape) {
            shape.lower_by_one_row();
        }
        shape.raise_by_one_row();
        self.emit(GameEvent::ShapeDropped);
    }

    /// Advances gravity by one tick.
    ///
    /// The falling shape moves down one row. If that is illegal, it moves back
    /// and settles, or, when even its previous position is illegal, the game
    /// ends. If the move is legal and the shape now rests on something, it
    /// settles.
    pub fn let_shape_fall(&mut self) {
        let GameState {
            grid,
            falling_shape,
            ..
        } = &mut self.state;
        let Some(shape) = falling_shape else {
            return;
        };
        shape.lower_by_one_row();
        if is_illegal_placement(grid, shape) {
            shape.raise_by_one_row();
            if is_illegal_placement(grid, shape) {
                self.end_game();
            } else {
                self.settle_shape();
            }
            return;
        }
        self.emit(GameEvent::ShapeMoved);
        if self.state.detect_touch() {
            self.settle_shape();
        }
    }

    /// Writes the falling shape's blocks into the grid and clears the falling
    /// shape.
    pub fn settle_shape(&mut self) {
        let Some(shape) = self.state.falling_shape.take() else {
            return;
        };
        for block in shape.into_blocks() {
            if let Err(err) = self
                .state
                .grid
                .set(block.column(), block.row(), Some(block))
            {
                tracing::warn!(%err, %block, "settled block outside the grid");
            }
        }
        self.emit(GameEvent::ShapeLanded);
    }

    /// Resets score and level and notifies the listener that the game is over.
    pub fn end_game(&mut self) {
        self.state.score = 0;
        self.state.level = 1;
        self.state.status = GameStatus::Ended;
        self.emit(GameEvent::GameEnded);
    }

    /// Removes every completed row and lets the blocks above fall.
    ///
    /// Rows are examined from the bottom up. Row 0, the spawn row, is never
    /// removed even when full. Each removed line scores
    /// `points_per_line × level`; reaching `level × level_threshold` points
    /// raises the level by one.
    ///
    /// After removal, every column is handled on its own: scanning upward
    /// from just above the lowest removed row, each block drops to the lowest
    /// empty cell beneath it.
    pub fn remove_completed_lines(&mut self) -> LineClear {
        let columns = self.state.columns();
        let rows = self.state.rows();
        let width = usize::from(self.state.config.columns);

        let mut removed_lines = Vec::new();
        for row in (1..rows).rev() {
            let row_blocks: Vec<Block> = (0..columns)
                .filter_map(|column| self.state.grid.get(column, row).copied())
                .collect();
            if row_blocks.len() == width {
                for block in &row_blocks {
                    // In range: the block was just read from this cell.
                    let _ = self.state.grid.take(block.column(), block.row());
                }
                removed_lines.push(row_blocks);
            }
        }

        let Some(lowest_removed_row) = removed_lines.first().and_then(|line| line.first()) else {
            return LineClear::default();
        };
        let lowest_removed_row = lowest_removed_row.row();

        let lines = u32::try_from(removed_lines.len()).unwrap_or(u32::MAX);
        let points = lines
            .saturating_mul(self.state.config.points_per_line)
            .saturating_mul(self.state.level);
        self.state.score = self.state.score.saturating_add(points);
        tracing::debug!(lines, points, score = self.state.score, "lines removed");
        if self.state.score
            >= self
                .state
                .level
                .saturating_mul(self.state.config.level_threshold)
        {
            self.state.level += 1;
            self.emit(GameEvent::LevelUp);
        }

        let grid = &mut self.state.grid;
        let mut fallen_blocks = Vec::new();
        for column in 0..columns {
            let mut fallen = Vec::new();
            for row in (1..lowest_removed_row).rev() {
                let Ok(Some(mut block)) = grid.take(column, row) else {
                    continue;
                };
                let mut new_row = row;
                while new_row < rows - 1 && !grid.is_occupied(column, new_row + 1) {
                    new_row += 1;
                }
                block.set_position(column, new_row);
                // In range: new_row lies between row and the last row.
                let _ = grid.set(column, new_row, Some(block));
                fallen.push(block);
            }
            if !fallen.is_empty() {
                fallen_blocks.push(fallen);
            }
        }

        LineClear {
            removed_lines,
            fallen_blocks,
        }
    }

    /// Empties the grid and returns its blocks, one vector per row from the
    /// top row down. Rows without blocks yield empty vectors.
    pub fn remove_all_blocks(&mut self) -> Vec<Vec<Block>> {
        let columns = self.state.columns();
        let rows = self.state.rows();
        let grid = &mut self.state.grid;
        (0..rows)
            .map(|row| {
                (0..columns)
                    .filter_map(|column| grid.take(column, row).ok().flatten())
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::{BlockColor, GameSeed, Orientation, ShapeKind};

    use super::*;

    fn engine() -> Swiftris<Vec<GameEvent>> {
        Swiftris::with_generator(
            GameConfig::default(),
            ShapeGenerator::with_seed(GameSeed::from_u128(5)),
            Vec::new(),
        )
        .unwrap()
    }

    fn place(engine: &mut Swiftris<Vec<GameEvent>>, kind: ShapeKind, column: i32, row: i32) {
        engine.set_falling_shape(Some(Shape::new(
            kind,
            column,
            row,
            BlockColor::Blue,
            Orientation::Zero,
        )));
    }

    fn fill(engine: &mut Swiftris<Vec<GameEvent>>, column: i32, row: i32) {
        engine
            .grid_mut()
            .set(column, row, Some(Block::new(column, row, BlockColor::Red)))
            .unwrap();
    }

    fn positions(shape: &Shape) -> Vec<(i32, i32)> {
        shape.blocks().iter().map(|b| (b.column(), b.row())).collect()
    }

    #[test]
    fn test_begin_game_creates_preview() {
        let mut engine = engine();
        assert!(engine.status().is_not_started());
        engine.begin_game();
        let next = engine.next_shape().unwrap();
        assert_eq!((next.column(), next.row()), (12, 1));
        assert!(engine.falling_shape().is_none());
        assert!(engine.status().is_in_progress());
        assert_eq!(engine.listener(), &[GameEvent::GameBegan]);
    }

    #[test]
    fn test_new_shape_promotes_preview() {
        let mut engine = engine();
        engine.begin_game();
        let preview_kind = engine.next_shape().unwrap().kind();
        let (falling, next) = engine.new_shape().unwrap();
        assert_eq!(falling.kind(), preview_kind);
        assert_eq!((falling.column(), falling.row()), (4, 0));
        assert_eq!((next.column(), next.row()), (12, 1));
        assert_eq!(engine.falling_shape(), Some(&falling));
        assert!(!engine.detect_illegal_placement());
    }

    #[test]
    fn test_illegal_placement_bounds_and_overlap() {
        let mut engine = engine();
        place(&mut engine, ShapeKind::O, 0, 0);
        assert!(!engine.detect_illegal_placement());
        place(&mut engine, ShapeKind::O, -1, 0);
        assert!(engine.detect_illegal_placement());
        place(&mut engine, ShapeKind::O, 9, 0);
        assert!(engine.detect_illegal_placement());
        place(&mut engine, ShapeKind::O, 0, 19);
        assert!(engine.detect_illegal_placement());
        place(&mut engine, ShapeKind::O, 0, -1);
        assert!(engine.detect_illegal_placement());
        place(&mut engine, ShapeKind::O, 3, 3);
        fill(&mut engine, 4, 4);
        assert!(engine.detect_illegal_placement());
        engine.set_falling_shape(None);
        assert!(!engine.detect_illegal_placement());
    }

    #[test]
    fn test_move_left_at_wall_rolls_back() {
        let mut engine = engine();
        place(&mut engine, ShapeKind::O, 0, 5);
        let before = positions(engine.falling_shape().unwrap());
        assert!(!engine.move_shape_left());
        assert_eq!(positions(engine.falling_shape().unwrap()), before);
        assert!(engine.listener().is_empty());

        assert!(engine.move_shape_right());
        assert_eq!(engine.falling_shape().unwrap().column(), 1);
        assert_eq!(engine.listener(), &[GameEvent::ShapeMoved]);
    }

    #[test]
    fn test_rotate_into_stack_rolls_back() {
        let mut engine = engine();
        // Vertical I at column 5; rotating makes it horizontal across 4..=7.
        engine.set_falling_shape(Some(Shape::new(
            ShapeKind::I,
            5,
            5,
            BlockColor::Teal,
            Orientation::Zero,
        )));
        fill(&mut engine, 7, 5);
        assert!(!engine.rotate_shape());
        let shape = engine.falling_shape().unwrap();
        assert_eq!(shape.orientation(), Orientation::Zero);
        assert_eq!(positions(shape), vec![(5, 5), (5, 6), (5, 7), (5, 8)]);

        engine.grid_mut().take(7, 5).unwrap();
        assert!(engine.rotate_shape());
        assert_eq!(
            engine.falling_shape().unwrap().orientation(),
            Orientation::Ninety
        );
    }

    #[test]
    fn test_operations_without_shape_are_noops() {
        let mut engine = engine();
        assert!(!engine.rotate_shape());
        assert!(!engine.move_shape_left());
        assert!(!engine.move_shape_right());
        engine.drop_shape();
        engine.let_shape_fall();
        engine.settle_shape();
        assert!(!engine.detect_touch());
        assert!(engine.listener().is_empty());
        assert!(engine.grid().is_empty());
    }

    #[test]
    fn test_drop_shape_stops_above_stack() {
        let mut engine = engine();
        place(&mut engine, ShapeKind::O, 2, 0);
        fill(&mut engine, 3, 15);
        engine.drop_shape();
        let shape = engine.falling_shape().unwrap();
        assert_eq!(positions(shape), vec![(2, 13), (3, 13), (2, 14), (3, 14)]);
        assert_eq!(engine.listener(), &[GameEvent::ShapeDropped]);
        assert!(engine.detect_touch());
    }

    #[test]
    fn test_drop_then_fall_settles() {
        let mut engine = engine();
        place(&mut engine, ShapeKind::T, 0, 0);
        engine.drop_shape();
        engine.let_shape_fall();
        assert!(engine.falling_shape().is_none());
        assert_eq!(
            engine.listener(),
            &[GameEvent::ShapeDropped, GameEvent::ShapeLanded]
        );
        for (column, row) in [(1, 18), (0, 19), (1, 19), (2, 19)] {
            let block = engine.grid().get(column, row).unwrap();
            assert_eq!((block.column(), block.row()), (column, row));
        }
    }

    #[test]
    fn test_fall_settles_on_touch() {
        let mut engine = engine();
        place(&mut engine, ShapeKind::O, 4, 17);
        engine.let_shape_fall();
        assert!(engine.falling_shape().is_none());
        assert_eq!(
            engine.listener(),
            &[GameEvent::ShapeMoved, GameEvent::ShapeLanded]
        );
        assert!(engine.grid().is_occupied(4, 19));
    }

    #[test]
    fn test_fall_when_stuck_ends_game() {
        let mut engine = engine();
        place(&mut engine, ShapeKind::O, 4, 0);
        fill(&mut engine, 4, 1);
        engine.let_shape_fall();
        assert_eq!(engine.listener(), &[GameEvent::GameEnded]);
        assert!(engine.status().is_ended());
    }

    #[test]
    fn test_touch_detection_uses_bottom_blocks() {
        let mut engine = engine();
        // T at 0°: bottom blocks are the three in row + 1.
        place(&mut engine, ShapeKind::T, 3, 5);
        assert!(!engine.detect_touch());
        fill(&mut engine, 5, 7);
        assert!(engine.detect_touch());
        engine.grid_mut().take(5, 7).unwrap();
        fill(&mut engine, 4, 4);
        fill(&mut engine, 6, 6);
        assert!(!engine.detect_touch());
    }

    #[test]
    fn test_spawn_collision_ends_game() {
        let mut engine = engine();
        engine.begin_game();
        for column in 0..10 {
            for row in 0..4 {
                fill(&mut engine, column, row);
            }
        }
        let before = engine.grid().clone();
        engine.listener_mut().clear();

        assert_eq!(engine.new_shape(), None);
        assert!(engine.falling_shape().is_none());
        let next = engine.next_shape().unwrap();
        assert_eq!((next.column(), next.row()), (12, 1));
        assert_eq!(engine.grid(), &before);
        assert_eq!(engine.listener(), &[GameEvent::GameEnded]);
    }

    #[test]
    fn test_end_game_resets_score() {
        let mut engine = engine();
        for column in 0..10 {
            fill(&mut engine, column, 19);
        }
        engine.remove_completed_lines();
        assert_eq!(engine.score(), 10);
        engine.end_game();
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.level(), 1);
    }

    #[test]
    fn test_row_zero_is_never_cleared() {
        let mut engine = engine();
        for column in 0..10 {
            fill(&mut engine, column, 0);
        }
        let clear = engine.remove_completed_lines();
        assert!(clear.is_empty());
        assert!(clear.fallen_blocks.is_empty());
        assert_eq!(engine.grid().iter().count(), 10);
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn test_remove_all_blocks_groups_by_row() {
        let mut engine = engine();
        fill(&mut engine, 3, 2);
        fill(&mut engine, 1, 2);
        fill(&mut engine, 0, 19);
        let rows = engine.remove_all_blocks();
        assert_eq!(rows.len(), 20);
        assert_eq!(
            rows[2],
            vec![
                Block::new(1, 2, BlockColor::Red),
                Block::new(3, 2, BlockColor::Red)
            ]
        );
        assert_eq!(rows[19], vec![Block::new(0, 19, BlockColor::Red)]);
        assert_eq!(rows.iter().map(Vec::len).sum::<usize>(), 3);
        assert!(engine.grid().is_empty());
    }

    #[test]
    fn test_closure_listener_sees_state() {
        let mut scores = Vec::new();
        let mut engine = Swiftris::with_generator(
            GameConfig::default(),
            ShapeGenerator::with_seed(GameSeed::from_u128(9)),
            |event: GameEvent, state: &GameState| {
                if event.is_game_began() {
                    scores.push((state.score(), state.level(), state.next_shape().is_some()));
                }
            },
        )
        .unwrap();
        engine.begin_game();
        drop(engine);
        assert_eq!(scores, vec![(0, 1, true)]);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GameConfig {
            rows: 0,
            ..GameConfig::default()
        };
        assert!(Swiftris::with_config(config, ()).is_err());

        let config = GameConfig {
            preview_column: i32::MAX,
            ..GameConfig::default()
        };
        assert_eq!(
            Swiftris::with_config(config, ()).err(),
            Some(ConfigError::PreviewAnchorOverflow {
                column: i32::MAX,
                row: 1
            })
        );
    }
}
