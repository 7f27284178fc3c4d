use super::card::{Card, CardType, Color};
use super::game::{GameError, GameEvent, UnoGame};
use super::snapshot::GameSnapshot;
use super::ui::{ConsoleUI, PlayerAction};
use log::{debug, info};
use std::error::Error;

/// How a turn ended, from the controller's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    Continue,
    RoundOver,
    MatchOver,
    Quit,
}

pub struct GameController {
    game: UnoGame,
    ui: ConsoleUI,
}

impl GameController {
    pub fn new(game: UnoGame, ui: ConsoleUI) -> Self {
        GameController { game, ui }
    }

    pub fn game(&self) -> &UnoGame {
        &self.game
    }

    /// Seats the given players, asking on the console for more when fewer
    /// than two were supplied.
    pub fn seat_players(&mut self, mut names: Vec<String>) -> Result<(), Box<dyn Error>> {
        if names.len() < 2 {
            info!("{} player(s) given, prompting for the rest", names.len());
            names = self.ui.get_player_names(names)?;
        }
        for name in names {
            self.game.add_player(name)?;
        }
        Ok(())
    }

    /// Plays rounds until somebody reaches the target score or a player quits.
    pub fn run(&mut self) -> Result<(), Box<dyn Error>> {
        self.ui.show_message("Welcome to Uno!")?;

        loop {
            self.game.new_round()?;
            let outcome = loop {
                match self.take_turn()? {
                    TurnOutcome::Continue => continue,
                    other => break other,
                }
            };

            match outcome {
                TurnOutcome::RoundOver => {
                    self.ui.show_message("Starting the next round.")?;
                }
                TurnOutcome::MatchOver => return Ok(()),
                TurnOutcome::Quit | TurnOutcome::Continue => {
                    self.ui.show_message("Goodbye!")?;
                    return Ok(());
                }
            }
        }
    }

    /// Shows the table, asks the current player for one action and applies it.
    ///
    /// A rejected action (bad index, illegal card, cancelled colour) leaves the
    /// same player on turn.
    pub fn take_turn(&mut self) -> Result<TurnOutcome, Box<dyn Error>> {
        self.ui.display_game_state(&self.game)?;
        let player = self.game.current_player()?;
        self.ui
            .display_player_hand(&player.name, player.hand(), self.game.top_card())?;

        match self.ui.get_player_action()? {
            PlayerAction::Play => self.play_turn(),
            PlayerAction::Draw => {
                let player_name = self.game.current_player()?.name.clone();
                let card = self.game.draw_card()?;
                self.ui
                    .handle_game_event(&GameEvent::CardDrawn { player_name, card })?;
                // Drawing ends the turn
                self.game.advance()?;
                Ok(TurnOutcome::Continue)
            }
            PlayerAction::ShowState => {
                self.ui
                    .display_snapshot(&GameSnapshot::from_game(&self.game))?;
                Ok(TurnOutcome::Continue)
            }
            PlayerAction::Quit => Ok(TurnOutcome::Quit),
            PlayerAction::Unknown(choice) => {
                self.ui
                    .show_message(&format!("Invalid choice {:?}. Please enter 1 to 4.", choice))?;
                Ok(TurnOutcome::Continue)
            }
        }
    }

    fn play_turn(&mut self) -> Result<TurnOutcome, Box<dyn Error>> {
        let Some(index) = self.ui.get_card_index()? else {
            return Ok(TurnOutcome::Continue);
        };
        let player = self.game.current_player()?;
        let player_name = player.name.clone();
        let Some(card) = player.hand().get(index).copied() else {
            self.ui
                .show_message(&format!("There is no card at index {}.", index))?;
            return Ok(TurnOutcome::Continue);
        };

        if !self.game.is_playable(&card)? {
            self.ui
                .show_message("Placing that card is not a valid move. Try again.")?;
            return Ok(TurnOutcome::Continue);
        }

        // The colour is settled before the card leaves the hand
        let color = if card.is_wild() {
            match self.ui.choose_color()? {
                Some(color) => Some(color),
                None => {
                    self.ui
                        .show_message("No colour chosen, the card stays in your hand.")?;
                    return Ok(TurnOutcome::Continue);
                }
            }
        } else {
            None
        };

        self.game.play_card(&card)?;
        self.ui.handle_game_event(&GameEvent::CardPlayed {
            player_name: player_name.clone(),
            card,
        })?;
        let round_won = self.game.is_hand_empty()?;

        let turn_moved = self.resolve_effect(&card, color, &player_name)?;

        if round_won {
            return self.finish_round(&player_name);
        }
        if !turn_moved {
            self.game.advance()?;
        }
        Ok(TurnOutcome::Continue)
    }

    /// Applies the played card's effect. Returns true when the effect already
    /// moved the turn on.
    fn resolve_effect(
        &mut self,
        card: &Card,
        color: Option<Color>,
        player_name: &str,
    ) -> Result<bool, Box<dyn Error>> {
        debug!("Resolving {:?} played by {}", card.card_type(), player_name);
        let event = match card.card_type() {
            CardType::Number(_) => return Ok(false),
            CardType::DrawOne => {
                let next_player_name = self.game.next_player()?.name.clone();
                let drawn = self.game.draw_one()?;
                GameEvent::DrawOne {
                    player_name: next_player_name,
                    card: drawn,
                }
            }
            CardType::Reverse => {
                self.game.reverse()?;
                GameEvent::Reverse {
                    direction: self.game.direction(),
                }
            }
            CardType::Skip => {
                let skipped = self.game.next_player()?.name.clone();
                self.game.skip()?;
                GameEvent::Skip {
                    player_name: skipped,
                }
            }
            CardType::Wild => {
                let color = color.ok_or(GameError::NoColorChosen)?;
                self.game.wild(Some(color))?;
                GameEvent::WildColorChosen {
                    player_name: player_name.to_string(),
                    color,
                }
            }
            CardType::WildDrawTwo => {
                let color = color.ok_or(GameError::NoColorChosen)?;
                let next_player_name = self.game.next_player()?.name.clone();
                let cards = self.game.wild_draw_two(Some(color))?;
                GameEvent::WildDrawTwo {
                    player_name: player_name.to_string(),
                    next_player_name,
                    cards,
                    color,
                }
            }
        };
        self.ui.handle_game_event(&event)?;
        Ok(matches!(
            card.card_type(),
            CardType::Skip | CardType::WildDrawTwo
        ))
    }

    fn finish_round(&mut self, winner: &str) -> Result<TurnOutcome, Box<dyn Error>> {
        let points = self.game.round_score(winner)?;
        let match_over = self.game.check_winner(winner)?;
        let total = self.game.cumulative_score(winner).unwrap_or(0);
        self.ui.handle_game_event(&GameEvent::RoundWon {
            player_name: winner.to_string(),
            points,
            total,
        })?;

        if !match_over {
            return Ok(TurnOutcome::RoundOver);
        }
        if let Some(champion) = self.game.match_winner() {
            let total = self.game.cumulative_score(champion).unwrap_or(0);
            info!("Match over, {} wins with {} points", champion, total);
            self.ui.handle_game_event(&GameEvent::MatchWon {
                player_name: champion.to_string(),
                total,
            })?;
        }
        Ok(TurnOutcome::MatchOver)
    }
}
