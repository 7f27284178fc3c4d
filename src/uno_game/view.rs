use super::game::UnoGame;

/// Something that redraws itself from the engine's state.
///
/// Views only read the game; the engine calls `update` after each change.
pub trait GameView {
    fn update(&self, game: &UnoGame);
}
