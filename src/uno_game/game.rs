use super::card::{Card, CardType, Color};
use super::player::Player;
use super::view::GameView;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

/// Cards dealt to every player at the start of a round.
pub const HAND_SIZE: usize = 7;
/// Cumulative score that ends the match.
pub const SCORE_TO_WIN: u32 = 500;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("the game has no players")]
    NoPlayers,
    #[error("no round has been started")]
    RoundNotStarted,
    #[error("players cannot join once the first round has started")]
    GameStarted,
    #[error("a player named {0} already exists")]
    DuplicatePlayer(String),
    #[error("no player named {0}")]
    UnknownPlayer(String),
    #[error("{0} is not in the current player's hand")]
    CardNotInHand(Card),
    #[error("{0} cannot be played on the current top card")]
    InvalidMove(Card),
    #[error("no colour was chosen for the wild card")]
    NoColorChosen,
    #[error("unknown colour {0:?}")]
    InvalidColor(String),
}

/// What happened during a turn, for the front end to report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    CardPlayed {
        player_name: String,
        card: Card,
    },
    CardDrawn {
        player_name: String,
        card: Card,
    },
    DrawOne {
        player_name: String,
        card: Card,
    },
    Reverse {
        direction: Direction,
    },
    Skip {
        player_name: String,
    },
    WildColorChosen {
        player_name: String,
        color: Color,
    },
    WildDrawTwo {
        player_name: String,
        next_player_name: String,
        cards: Vec<Card>,
        color: Color,
    },
    RoundWon {
        player_name: String,
        points: u32,
        total: u32,
    },
    MatchWon {
        player_name: String,
        total: u32,
    },
}

/// Represents the direction of play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    pub fn reverse(&self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }

    /// Seat offset of one turn: +1 or -1.
    pub fn step(&self) -> isize {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub hand_size: usize,
    pub target_score: u32,
    /// Fixed RNG seed; `None` seeds from the operating system.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            hand_size: HAND_SIZE,
            target_score: SCORE_TO_WIN,
            seed: None,
        }
    }
}

/// Game state for a match of simplified UNO.
///
/// There is no deck: every drawn card is generated at random, so any card can
/// show up any number of times. Legality is advisory; [`UnoGame::play_card`]
/// trusts its caller, and effects are applied by the caller after the play.
pub struct UnoGame {
    players: Vec<Player>,
    current_turn: usize,
    direction: Direction,
    top_card: Option<Card>,
    scores: HashMap<String, u32>,
    rounds_played: u32,
    config: GameConfig,
    rng: StdRng,
    views: Vec<Rc<dyn GameView>>,
}

impl fmt::Debug for UnoGame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnoGame")
            .field("players", &self.players)
            .field("current_turn", &self.current_turn)
            .field("direction", &self.direction)
            .field("top_card", &self.top_card)
            .field("scores", &self.scores)
            .field("rounds_played", &self.rounds_played)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for UnoGame {
    fn default() -> Self {
        Self::new()
    }
}

fn random_card_from(rng: &mut StdRng) -> Card {
    let card_type = CardType::ALL[rng.random_range(0..CardType::ALL.len())];
    match card_type {
        CardType::Wild => Card::wild(),
        CardType::WildDrawTwo => Card::wild_draw_two(),
        _ => Card::new(Color::ALL[rng.random_range(0..Color::ALL.len())], card_type),
    }
}

impl UnoGame {
    pub fn new() -> Self {
        Self::with_config(GameConfig::default())
    }

    pub fn with_config(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            players: Vec::new(),
            current_turn: 0,
            direction: Direction::Clockwise,
            top_card: None,
            scores: HashMap::new(),
            rounds_played: 0,
            config,
            rng,
            views: Vec::new(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Adds a player at the end of the turn order with a cumulative score of 0.
    pub fn add_player(&mut self, name: impl Into<String>) -> Result<(), GameError> {
        let name = name.into();
        if self.rounds_played > 0 {
            return Err(GameError::GameStarted);
        }
        if self.scores.contains_key(&name) {
            return Err(GameError::DuplicatePlayer(name));
        }
        debug!("Adding player {}", name);
        self.scores.insert(name.clone(), 0);
        self.players.push(Player::new(name));
        Ok(())
    }

    /// Generates a card out of thin air: a uniformly random kind, and for
    /// non-wild kinds a uniformly random colour.
    pub fn random_card(&mut self) -> Card {
        random_card_from(&mut self.rng)
    }

    /// Deals fresh hands, turns up a non-wild top card, and resets the turn
    /// to the first player going clockwise. Cumulative scores are kept.
    pub fn new_round(&mut self) -> Result<(), GameError> {
        if self.players.is_empty() {
            return Err(GameError::NoPlayers);
        }

        let rng = &mut self.rng;
        for player in self.players.iter_mut() {
            player.clear_hand();
            for _ in 0..self.config.hand_size {
                player.add_card(random_card_from(rng));
            }
        }

        let top_card = loop {
            let card = random_card_from(rng);
            if !card.is_wild() {
                break card;
            }
        };

        self.top_card = Some(top_card);
        self.current_turn = 0;
        self.direction = Direction::Clockwise;
        self.rounds_played += 1;
        info!(
            "Round {} started with {} players, top card {}",
            self.rounds_played,
            self.players.len(),
            top_card
        );
        self.notify_views();
        Ok(())
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn current_turn(&self) -> usize {
        self.current_turn
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    pub fn top_card(&self) -> Option<&Card> {
        self.top_card.as_ref()
    }

    pub fn set_top_card(&mut self, card: Card) {
        self.top_card = Some(card);
        self.notify_views();
    }

    pub fn current_player(&self) -> Result<&Player, GameError> {
        self.players
            .get(self.current_turn)
            .ok_or(GameError::NoPlayers)
    }

    /// The player who would move after an `advance`, without advancing.
    pub fn next_player(&self) -> Result<&Player, GameError> {
        self.ensure_round()?;
        let index = self.seat_after(1)?;
        Ok(&self.players[index])
    }

    /// Index of the seat `turns` turns away in the current direction.
    fn seat_after(&self, turns: isize) -> Result<usize, GameError> {
        if self.players.is_empty() {
            return Err(GameError::NoPlayers);
        }
        let count = self.players.len() as isize;
        let seat = (self.current_turn as isize + turns * self.direction.step()).rem_euclid(count);
        Ok(seat as usize)
    }

    fn ensure_round(&self) -> Result<(), GameError> {
        if self.players.is_empty() {
            return Err(GameError::NoPlayers);
        }
        if self.rounds_played == 0 {
            return Err(GameError::RoundNotStarted);
        }
        Ok(())
    }

    /// Updates the current turn based on the direction of play.
    pub fn advance(&mut self) -> Result<(), GameError> {
        self.ensure_round()?;
        self.current_turn = self.seat_after(1)?;
        debug!("Turn passes to {}", self.players[self.current_turn].name);
        self.notify_views();
        Ok(())
    }

    /// Checks if a card can be played on top of another card.
    pub fn can_play_card(card: &Card, top_card: &Card) -> bool {
        if card.is_wild() {
            return true;
        }

        // An unassigned colour never matches, not even another unassigned one
        let same_color = matches!(
            (card.color(), top_card.color()),
            (Some(ours), Some(theirs)) if ours == theirs
        );
        same_color || card.card_type() == top_card.card_type()
    }

    /// Checks `card` against the current top card.
    pub fn is_playable(&self, card: &Card) -> Result<bool, GameError> {
        let top_card = self.top_card.as_ref().ok_or(GameError::RoundNotStarted)?;
        Ok(Self::can_play_card(card, top_card))
    }

    /// The current player draws one card for themselves.
    pub fn draw_card(&mut self) -> Result<Card, GameError> {
        self.ensure_round()?;
        let card = self.random_card();
        self.players[self.current_turn].add_card(card);
        debug!("{} drew {}", self.players[self.current_turn].name, card);
        self.notify_views();
        Ok(card)
    }

    /// Moves `card` from the current player's hand onto the discard pile.
    ///
    /// The first card equal to `card` is taken. Legality is not checked here;
    /// see [`UnoGame::play_legal_card`].
    pub fn play_card(&mut self, card: &Card) -> Result<(), GameError> {
        self.ensure_round()?;
        let player = &mut self.players[self.current_turn];
        let played = player
            .remove_card(card)
            .ok_or(GameError::CardNotInHand(*card))?;
        debug!("{} played {}", player.name, played);
        self.top_card = Some(played);
        self.notify_views();
        Ok(())
    }

    /// Like [`UnoGame::play_card`] but rejects a card that does not match
    /// the top card.
    pub fn play_legal_card(&mut self, card: &Card) -> Result<(), GameError> {
        if !self.is_playable(card)? {
            return Err(GameError::InvalidMove(*card));
        }
        self.play_card(card)
    }

    /// The next player draws one card. The turn does not move.
    pub fn draw_one(&mut self) -> Result<Card, GameError> {
        self.ensure_round()?;
        let next = self.seat_after(1)?;
        let card = self.random_card();
        self.players[next].add_card(card);
        debug!("{} draws one: {}", self.players[next].name, card);
        self.notify_views();
        Ok(card)
    }

    /// Reverses the direction of play.
    pub fn reverse(&mut self) -> Result<(), GameError> {
        self.ensure_round()?;
        self.direction = self.direction.reverse();
        debug!("Direction is now {:?}", self.direction);
        self.notify_views();
        Ok(())
    }

    /// Jumps two seats, so the next player loses their turn. This replaces
    /// the `advance` for the turn.
    pub fn skip(&mut self) -> Result<(), GameError> {
        self.ensure_round()?;
        self.current_turn = self.seat_after(2)?;
        debug!("Skip; turn passes to {}", self.players[self.current_turn].name);
        self.notify_views();
        Ok(())
    }

    /// Colours the top card. With no colour the top card is left as it is.
    pub fn wild(&mut self, color: Option<Color>) -> Result<(), GameError> {
        self.ensure_round()?;
        let color = color.ok_or(GameError::NoColorChosen)?;
        if let Some(top_card) = self.top_card.as_mut() {
            top_card.set_color(color);
        }
        debug!("Wild colour set to {}", color);
        self.notify_views();
        Ok(())
    }

    /// Colours the top card, makes the next player draw two cards, then skips
    /// that player. Returns the drawn cards.
    pub fn wild_draw_two(&mut self, color: Option<Color>) -> Result<Vec<Card>, GameError> {
        self.ensure_round()?;
        let color = color.ok_or(GameError::NoColorChosen)?;
        if let Some(top_card) = self.top_card.as_mut() {
            top_card.set_color(color);
        }

        let next = self.seat_after(1)?;
        let drawn = vec![self.random_card(), self.random_card()];
        for card in &drawn {
            self.players[next].add_card(*card);
        }
        debug!(
            "Wild draw two ({}): {} draws {:?}",
            color, self.players[next].name, drawn
        );

        self.current_turn = self.seat_after(2)?;
        self.notify_views();
        Ok(drawn)
    }

    /// Points the round winner earns: the value of every card left in the
    /// other players' hands.
    pub fn round_score(&self, winner: &str) -> Result<u32, GameError> {
        self.ensure_round()?;
        if !self.players.iter().any(|p| p.name == winner) {
            return Err(GameError::UnknownPlayer(winner.to_string()));
        }
        Ok(self
            .players
            .iter()
            .filter(|p| p.name != winner)
            .map(Player::hand_points)
            .sum())
    }

    /// Credits the round score to `winner` and reports whether anyone has now
    /// reached the target score. Call once per finished round.
    pub fn check_winner(&mut self, winner: &str) -> Result<bool, GameError> {
        let points = self.round_score(winner)?;
        let total = self
            .scores
            .get_mut(winner)
            .ok_or_else(|| GameError::UnknownPlayer(winner.to_string()))?;
        *total += points;
        info!("{} wins the round for {} points ({} total)", winner, points, total);

        let match_over = self.match_winner().is_some();
        if let Some(champion) = self.match_winner() {
            info!("{} has reached {} points", champion, self.config.target_score);
        }
        self.notify_views();
        Ok(match_over)
    }

    /// First player in turn order whose total has reached the target score.
    pub fn match_winner(&self) -> Option<&str> {
        self.players
            .iter()
            .map(|p| p.name.as_str())
            .find(|name| self.cumulative_score(name).unwrap_or(0) >= self.config.target_score)
    }

    pub fn cumulative_score(&self, name: &str) -> Option<u32> {
        self.scores.get(name).copied()
    }

    pub fn scores(&self) -> &HashMap<String, u32> {
        &self.scores
    }

    /// True when the current player has no cards left.
    pub fn is_hand_empty(&self) -> Result<bool, GameError> {
        self.ensure_round()?;
        Ok(self.current_player()?.has_won())
    }

    /// Registers a view. Adding the same view twice has no effect.
    pub fn add_view(&mut self, view: Rc<dyn GameView>) {
        if !self.views.iter().any(|v| Rc::ptr_eq(v, &view)) {
            self.views.push(view);
        }
    }

    pub fn remove_view(&mut self, view: &Rc<dyn GameView>) {
        self.views.retain(|v| !Rc::ptr_eq(v, view));
    }

    pub fn notify_views(&self) {
        for view in &self.views {
            view.update(self);
        }
    }

    #[cfg(test)]
    pub(crate) fn replace_hand(&mut self, seat: usize, cards: Vec<Card>) {
        let player = &mut self.players[seat];
        player.clear_hand();
        for card in cards {
            player.add_card(card);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn seeded_game(names: &[&str]) -> UnoGame {
        let mut game = UnoGame::with_config(GameConfig {
            seed: Some(42),
            ..GameConfig::default()
        });
        for name in names {
            game.add_player(*name).unwrap();
        }
        game.new_round().unwrap();
        game
    }

    fn current_name(game: &UnoGame) -> String {
        game.current_player().unwrap().name.clone()
    }

    #[test]
    fn test_random_card_has_colour_unless_wild() {
        let mut game = UnoGame::with_config(GameConfig {
            seed: Some(1),
            ..GameConfig::default()
        });
        for _ in 0..200 {
            let card = game.random_card();
            assert_eq!(card.color().is_none(), card.is_wild());
            if let CardType::Number(n) = card.card_type() {
                assert!(n <= 9);
            }
        }
    }

    #[test]
    fn test_new_round() {
        let game = seeded_game(&["Alice", "Bob", "Charlie"]);

        for player in game.players() {
            assert_eq!(player.hand().len(), 7);
        }
        assert!(!game.top_card().unwrap().is_wild());
        assert_eq!(game.current_turn(), 0);
        assert_eq!(game.direction(), Direction::Clockwise);
        assert_eq!(game.rounds_played(), 1);
    }

    #[test]
    fn test_new_round_resets_turn_and_direction() {
        let mut game = seeded_game(&["Alice", "Bob", "Charlie"]);
        game.reverse().unwrap();
        game.advance().unwrap();
        game.draw_card().unwrap();

        game.new_round().unwrap();

        assert_eq!(game.current_turn(), 0);
        assert_eq!(game.direction(), Direction::Clockwise);
        for player in game.players() {
            assert_eq!(player.hand().len(), 7);
        }
    }

    #[test]
    fn test_new_round_without_players() {
        let mut game = UnoGame::new();
        assert!(matches!(game.new_round(), Err(GameError::NoPlayers)));
        assert!(matches!(game.advance(), Err(GameError::NoPlayers)));
        assert!(matches!(game.current_player(), Err(GameError::NoPlayers)));
    }

    #[test]
    fn test_operations_before_first_round() {
        let mut game = UnoGame::new();
        game.add_player("Alice").unwrap();
        game.add_player("Bob").unwrap();

        assert!(matches!(game.advance(), Err(GameError::RoundNotStarted)));
        assert!(matches!(game.skip(), Err(GameError::RoundNotStarted)));
        assert!(matches!(game.draw_card(), Err(GameError::RoundNotStarted)));
        assert!(matches!(
            game.is_playable(&Card::new(Color::Red, CardType::Number(1))),
            Err(GameError::RoundNotStarted)
        ));
        assert!(matches!(
            game.wild(Some(Color::Red)),
            Err(GameError::RoundNotStarted)
        ));
        assert!(matches!(game.is_hand_empty(), Err(GameError::RoundNotStarted)));
        assert!(matches!(game.next_player(), Err(GameError::RoundNotStarted)));
        assert!(matches!(
            game.round_score("Alice"),
            Err(GameError::RoundNotStarted)
        ));
        assert!(matches!(
            game.check_winner("Alice"),
            Err(GameError::RoundNotStarted)
        ));
        assert_eq!(game.rounds_played(), 0);
        assert_eq!(game.cumulative_score("Alice"), Some(0));
        assert!(matches!(game.reverse(), Err(GameError::RoundNotStarted)));
        assert_eq!(game.direction(), Direction::Clockwise);
    }

    #[test]
    fn test_add_player_rules() {
        let mut game = UnoGame::new();
        game.add_player("Alice").unwrap();
        assert!(matches!(
            game.add_player("Alice"),
            Err(GameError::DuplicatePlayer(name)) if name == "Alice"
        ));
        game.add_player("Bob").unwrap();
        assert_eq!(game.cumulative_score("Bob"), Some(0));

        game.new_round().unwrap();
        assert!(matches!(game.add_player("Carol"), Err(GameError::GameStarted)));
        assert_eq!(game.players().len(), 2);
    }

    #[test]
    fn test_advance() {
        let mut game = seeded_game(&["Alice", "Bob", "Charlie"]);

        game.advance().unwrap();
        assert_eq!(game.current_turn(), 1);
        game.advance().unwrap();
        assert_eq!(game.current_turn(), 2);
        // Wraps around
        game.advance().unwrap();
        assert_eq!(game.current_turn(), 0);
    }

    #[test]
    fn test_advance_reversed() {
        let mut game = seeded_game(&["Alice", "Bob", "Charlie"]);
        game.reverse().unwrap();
        assert_eq!(game.direction(), Direction::CounterClockwise);

        game.advance().unwrap();
        assert_eq!(current_name(&game), "Charlie");
        game.advance().unwrap();
        assert_eq!(current_name(&game), "Bob");
        game.advance().unwrap();
        assert_eq!(current_name(&game), "Alice");
    }

    #[test]
    fn test_next_player_does_not_move_turn() {
        let mut game = seeded_game(&["A", "B", "C"]);
        assert_eq!(game.next_player().unwrap().name, "B");
        assert_eq!(game.current_turn(), 0);

        game.reverse().unwrap();
        assert_eq!(game.next_player().unwrap().name, "C");

        game.advance().unwrap();
        assert_eq!(current_name(&game), "C");
        assert_eq!(game.next_player().unwrap().name, "B");
    }

    #[test]
    fn test_skip() {
        let mut game = seeded_game(&["A", "B", "C"]);
        game.skip().unwrap();
        assert_eq!(current_name(&game), "C");
    }

    #[test]
    fn test_reverse_then_skip() {
        let mut game = seeded_game(&["A", "B", "C"]);
        assert_eq!(current_name(&game), "A");
        game.reverse().unwrap();
        game.skip().unwrap();
        assert_eq!(current_name(&game), "B");
    }

    #[test]
    fn test_reverse_with_two_players_repeats_turn() {
        let mut game = seeded_game(&["A", "B"]);
        let before = game.next_player().unwrap().name.clone();
        game.reverse().unwrap();
        // Next and previous are the same seat with two players
        assert_eq!(game.next_player().unwrap().name, before);
        game.advance().unwrap();
        assert_eq!(current_name(&game), "B");
        game.skip().unwrap();
        assert_eq!(current_name(&game), "B");
    }

    #[test]
    fn test_draw_card() {
        let mut game = seeded_game(&["Alice", "Bob"]);
        let card = game.draw_card().unwrap();

        let hand = game.players()[0].hand();
        assert_eq!(hand.len(), 8);
        assert_eq!(hand.last(), Some(&card));
        assert_eq!(game.players()[1].hand().len(), 7);
        assert_eq!(game.current_turn(), 0);
    }

    #[test]
    fn test_draw_one_goes_to_next_player() {
        let mut game = seeded_game(&["John", "Mark"]);
        game.draw_one().unwrap();
        assert_eq!(game.current_turn(), 0);
        game.advance().unwrap();
        assert_eq!(game.current_player().unwrap().hand().len(), 8);
    }

    #[test]
    fn test_draw_one_follows_direction() {
        let mut game = seeded_game(&["A", "B", "C"]);
        game.reverse().unwrap();
        game.draw_one().unwrap();
        assert_eq!(game.players()[2].hand().len(), 8);
        assert_eq!(game.players()[1].hand().len(), 7);
    }

    #[test]
    fn test_play_card() {
        let mut game = seeded_game(&["Alice", "Bob"]);
        let card = game.players()[0].hand()[0];

        game.play_card(&card).unwrap();

        assert_eq!(game.players()[0].hand().len(), 6);
        assert_eq!(game.top_card(), Some(&card));
        // Playing does not move the turn
        assert_eq!(game.current_turn(), 0);
    }

    #[test]
    fn test_play_card_does_not_check_legality() {
        let mut game = seeded_game(&["Alice", "Bob"]);
        game.set_top_card(Card::new(Color::Red, CardType::Number(1)));
        let blue_five = Card::new(Color::Blue, CardType::Number(5));
        game.replace_hand(0, vec![blue_five]);

        game.play_card(&blue_five).unwrap();
        assert_eq!(game.top_card(), Some(&blue_five));
    }

    #[test]
    fn test_play_card_not_in_hand() {
        let mut game = seeded_game(&["Alice", "Bob"]);
        let top = *game.top_card().unwrap();
        game.replace_hand(0, vec![Card::new(Color::Red, CardType::Number(2))]);

        let result = game.play_card(&Card::new(Color::Green, CardType::Skip));
        assert!(matches!(result, Err(GameError::CardNotInHand(_))));
        assert_eq!(game.top_card(), Some(&top));
        assert_eq!(game.players()[0].hand().len(), 1);
    }

    #[test]
    fn test_play_legal_card() {
        let mut game = seeded_game(&["Alice", "Bob"]);
        game.set_top_card(Card::new(Color::Red, CardType::Number(1)));
        let blue_five = Card::new(Color::Blue, CardType::Number(5));
        let red_nine = Card::new(Color::Red, CardType::Number(9));
        game.replace_hand(0, vec![blue_five, red_nine]);

        assert!(matches!(
            game.play_legal_card(&blue_five),
            Err(GameError::InvalidMove(_))
        ));
        assert_eq!(game.players()[0].hand().len(), 2);

        game.play_legal_card(&red_nine).unwrap();
        assert_eq!(game.players()[0].hand(), &[blue_five]);
    }

    #[test]
    fn test_can_play_card() {
        let red_one = Card::new(Color::Red, CardType::Number(1));
        let blue_one = Card::new(Color::Blue, CardType::Number(1));
        let red_skip = Card::new(Color::Red, CardType::Skip);
        let blue_skip = Card::new(Color::Blue, CardType::Skip);
        let green_two = Card::new(Color::Green, CardType::Number(2));
        let wild = Card::wild();

        // Same color
        assert!(UnoGame::can_play_card(&red_skip, &red_one));
        // Same number, different color
        assert!(UnoGame::can_play_card(&blue_one, &red_one));
        // Same action, different color
        assert!(UnoGame::can_play_card(&blue_skip, &red_skip));
        // Neither
        assert!(!UnoGame::can_play_card(&green_two, &red_one));
        // Wild cards can be played on anything
        assert!(UnoGame::can_play_card(&wild, &red_one));
        assert!(UnoGame::can_play_card(&Card::wild_draw_two(), &green_two));
    }

    #[test]
    fn test_uncoloured_top_card_matches_no_colour() {
        let uncoloured = Card::wild();
        assert!(!UnoGame::can_play_card(
            &Card::new(Color::Red, CardType::Number(4)),
            &uncoloured
        ));

        let coloured = Card::wild().with_color(Color::Red);
        assert!(UnoGame::can_play_card(
            &Card::new(Color::Red, CardType::Number(4)),
            &coloured
        ));
    }

    #[test]
    fn test_wild_sets_colour() {
        let mut game = seeded_game(&["Alice", "Bob"]);
        game.set_top_card(Card::wild());
        game.wild(Some(Color::Red)).unwrap();
        assert_eq!(game.top_card().unwrap().color(), Some(Color::Red));
        assert_eq!(game.current_turn(), 0);
    }

    #[test]
    fn test_wild_without_colour() {
        let mut game = seeded_game(&["Alice", "Bob"]);
        game.set_top_card(Card::wild());

        assert!(matches!(game.wild(None), Err(GameError::NoColorChosen)));
        assert_eq!(game.top_card().unwrap().color(), None);
    }

    #[test]
    fn test_wild_draw_two() {
        let mut game = seeded_game(&["John", "Mark"]);
        let mark_start = game.players()[1].hand().len();

        let drawn = game.wild_draw_two(Some(Color::Green)).unwrap();

        assert_eq!(drawn.len(), 2);
        assert_eq!(game.top_card().unwrap().color(), Some(Color::Green));
        assert_eq!(game.players()[1].hand().len(), mark_start + 2);
        assert_eq!(&game.players()[1].hand()[mark_start..], drawn.as_slice());
        // Mark's turn is skipped
        assert_eq!(current_name(&game), "John");
    }

    #[test]
    fn test_wild_draw_two_three_players() {
        let mut game = seeded_game(&["A", "B", "C"]);
        game.wild_draw_two(Some(Color::Blue)).unwrap();
        assert_eq!(game.players()[1].hand().len(), 9);
        assert_eq!(current_name(&game), "C");
    }

    #[test]
    fn test_wild_draw_two_without_colour() {
        let mut game = seeded_game(&["A", "B", "C"]);
        game.set_top_card(Card::wild_draw_two());

        assert!(matches!(
            game.wild_draw_two(None),
            Err(GameError::NoColorChosen)
        ));
        assert_eq!(game.players()[1].hand().len(), 7);
        assert_eq!(game.current_turn(), 0);
        assert_eq!(game.top_card().unwrap().color(), None);
    }

    #[test]
    fn test_round_score() {
        let mut game = seeded_game(&["John", "Mark"]);
        game.replace_hand(
            1,
            vec![
                Card::new(Color::Red, CardType::Number(1)),
                Card::new(Color::Yellow, CardType::Skip),
                Card::wild(),
            ],
        );

        assert_eq!(game.round_score("John").unwrap(), 71);
        // Scoring is read-only
        assert_eq!(game.players()[1].hand().len(), 3);
    }

    #[test]
    fn test_round_score_excludes_winner() {
        let mut game = seeded_game(&["A", "B", "C"]);
        game.replace_hand(0, vec![Card::wild()]);
        game.replace_hand(1, vec![Card::new(Color::Blue, CardType::DrawOne)]);
        game.replace_hand(2, vec![Card::wild_draw_two()]);

        assert_eq!(game.round_score("A").unwrap(), 35);
        assert_eq!(game.round_score("B").unwrap(), 75);
        assert!(matches!(
            game.round_score("Zed"),
            Err(GameError::UnknownPlayer(_))
        ));
    }

    #[test]
    fn test_check_winner() {
        let mut game = seeded_game(&["A", "B"]);
        game.replace_hand(0, Vec::new());
        game.replace_hand(1, vec![Card::wild(); 5]);

        assert!(!game.check_winner("A").unwrap());
        assert_eq!(game.cumulative_score("A"), Some(250));
        assert_eq!(game.cumulative_score("B"), Some(0));
        assert_eq!(game.match_winner(), None);

        // Same hands again: totals accumulate on every call
        assert!(game.check_winner("A").unwrap());
        assert_eq!(game.cumulative_score("A"), Some(500));
        assert_eq!(game.match_winner(), Some("A"));
    }

    #[test]
    fn test_scores_survive_new_round() {
        let mut game = seeded_game(&["A", "B"]);
        game.replace_hand(1, vec![Card::new(Color::Red, CardType::Number(9))]);
        game.check_winner("A").unwrap();

        game.new_round().unwrap();
        assert_eq!(game.cumulative_score("A"), Some(9));
    }

    #[test]
    fn test_target_score_from_config() {
        let mut game = UnoGame::with_config(GameConfig {
            hand_size: 3,
            target_score: 20,
            seed: Some(3),
        });
        game.add_player("A").unwrap();
        game.add_player("B").unwrap();
        game.new_round().unwrap();
        assert_eq!(game.players()[0].hand().len(), 3);

        game.replace_hand(1, vec![Card::new(Color::Red, CardType::Skip)]);
        assert!(game.check_winner("A").unwrap());
    }

    #[test]
    fn test_is_hand_empty() {
        let mut game = seeded_game(&["John", "Mark"]);
        assert!(!game.is_hand_empty().unwrap());
        game.replace_hand(0, Vec::new());
        assert!(game.is_hand_empty().unwrap());
        game.draw_card().unwrap();
        assert!(!game.is_hand_empty().unwrap());
    }

    #[test]
    fn test_set_top_card() {
        let mut game = seeded_game(&["John", "Mark"]);
        let chosen = Card::new(Color::Blue, CardType::Number(3));
        game.set_top_card(chosen);
        assert_eq!(game.top_card(), Some(&chosen));
    }

    #[test]
    fn test_seeded_games_deal_the_same() {
        let first = seeded_game(&["A", "B"]);
        let second = seeded_game(&["A", "B"]);
        assert_eq!(first.players(), second.players());
        assert_eq!(first.top_card(), second.top_card());
    }

    struct CountingView {
        updates: Cell<usize>,
    }

    impl GameView for CountingView {
        fn update(&self, _game: &UnoGame) {
            self.updates.set(self.updates.get() + 1);
        }
    }

    #[test]
    fn test_views_are_notified() {
        let mut game = UnoGame::with_config(GameConfig {
            seed: Some(9),
            ..GameConfig::default()
        });
        game.add_player("A").unwrap();
        game.add_player("B").unwrap();

        let counter = Rc::new(CountingView {
            updates: Cell::new(0),
        });
        let view: Rc<dyn GameView> = counter.clone();
        game.add_view(view.clone());
        game.add_view(view.clone());

        game.new_round().unwrap();
        game.advance().unwrap();
        game.reverse().unwrap();
        assert_eq!(counter.updates.get(), 3);

        // Failed operations do not notify
        assert!(game.wild(None).is_err());
        assert_eq!(counter.updates.get(), 3);

        game.remove_view(&view);
        game.advance().unwrap();
        assert_eq!(counter.updates.get(), 3);
    }

    #[test]
    fn test_events_serialize_for_logging() {
        let played = GameEvent::CardPlayed {
            player_name: "Alice".to_string(),
            card: Card::new(Color::Red, CardType::Number(3)),
        };
        let json = serde_json::to_value(&played).unwrap();
        assert_eq!(json["CardPlayed"]["player_name"], "Alice");
        assert_eq!(json["CardPlayed"]["card"]["color"], "Red");
        assert_eq!(json["CardPlayed"]["card"]["card_type"]["Number"], 3);

        let reversed = GameEvent::Reverse {
            direction: Direction::CounterClockwise,
        };
        assert_eq!(
            serde_json::to_string(&reversed).unwrap(),
            r#"{"Reverse":{"direction":"CounterClockwise"}}"#
        );
    }
}
