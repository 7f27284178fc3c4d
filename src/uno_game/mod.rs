pub mod card;
pub mod controller;
pub mod game;
pub mod player;
pub mod snapshot;
pub mod ui;
pub mod view;

pub use card::{Card, CardType, Color};
pub use controller::{GameController, TurnOutcome};
pub use game::{Direction, GameConfig, GameError, GameEvent, UnoGame, HAND_SIZE, SCORE_TO_WIN};
pub use player::Player;
pub use snapshot::GameSnapshot;
pub use ui::ConsoleUI;
pub use view::GameView;
