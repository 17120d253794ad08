use super::swiftris::GameState;

/// Notification raised by [`Swiftris`](super::Swiftris) to its host.
///
/// Events are delivered synchronously from inside the operation that caused
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum GameEvent {
    /// A game has begun and the preview shape is available.
    GameBegan,
    /// The game is over; score and level have been reset.
    GameEnded,
    /// The falling shape changed position or orientation without landing.
    ShapeMoved,
    /// A hard drop finished. The shape has not been settled yet.
    ShapeDropped,
    /// The falling shape was settled into the grid.
    ShapeLanded,
    /// The score crossed the threshold for the next level.
    LevelUp,
}

/// Receiver of [`GameEvent`]s.
///
/// The listener gets read access to the engine state along with every event,
/// but it cannot call back into the engine. Hosts that need to react with
/// further engine calls (like [`GameSession`](super::GameSession)) record the
/// events and handle them once the triggering call has returned.
pub trait GameListener {
    fn on_event(&mut self, event: GameEvent, state: &GameState);
}

impl GameListener for () {
    fn on_event(&mut self, _event: GameEvent, _state: &GameState) {}
}

impl GameListener for Vec<GameEvent> {
    fn on_event(&mut self, event: GameEvent, _state: &GameState) {
        self.push(event);
    }
}

impl<F> GameListener for F
where
    F: FnMut(GameEvent, &GameState),
{
    fn on_event(&mut self, event: GameEvent, state: &GameState) {
        self(event, state);
    }
}
