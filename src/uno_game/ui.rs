use super::card::{Card, Color};
use super::game::{GameEvent, UnoGame};
use super::snapshot::GameSnapshot;
use std::io::{self, BufRead, BufReader, Write};

/// What the current player asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerAction {
    Play,
    Draw,
    ShowState,
    Quit,
    Unknown(String),
}

pub struct ConsoleUI {
    input: Box<dyn BufRead>,
    output: Box<dyn Write>,
}

impl Default for ConsoleUI {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleUI {
    pub fn new() -> Self {
        Self {
            input: Box::new(BufReader::new(io::stdin())),
            output: Box::new(io::stdout()),
        }
    }

    pub fn with_streams(input: Box<dyn BufRead>, output: Box<dyn Write>) -> Self {
        Self { input, output }
    }

    /// Reads one trimmed line; `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        self.read_line()
    }

    pub fn show_message(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{}", message)
    }

    /// Prompts for names until at least two players are seated. Names in
    /// `player_names` are kept and count towards the minimum.
    pub fn get_player_names(
        &mut self,
        mut player_names: Vec<String>,
    ) -> io::Result<Vec<String>> {
        if !player_names.is_empty() {
            writeln!(self.output, "Already seated: {}", player_names.join(", "))?;
        }
        loop {
            let Some(name) = self.prompt("Enter player name (or '.' to finish): ")? else {
                if player_names.len() < 2 {
                    return Err(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "input ended before two players were entered",
                    ));
                }
                break;
            };

            if name == "." {
                if player_names.len() < 2 {
                    writeln!(self.output, "You need at least 2 players to start the game.")?;
                    continue;
                }
                break;
            }
            if name.is_empty() {
                continue;
            }
            if player_names.contains(&name) {
                writeln!(self.output, "{} is already playing, pick another name.", name)?;
                continue;
            }

            player_names.push(name);
        }
        Ok(player_names)
    }

    pub fn display_game_state(&mut self, game: &UnoGame) -> io::Result<()> {
        writeln!(self.output, "\n--- Round {} ---", game.rounds_played())?;
        writeln!(self.output, "Direction: {:?}", game.direction())?;
        match game.top_card() {
            Some(card) => writeln!(self.output, "Top Card: {}", card)?,
            None => writeln!(self.output, "Top Card: none")?,
        }
        for player in game.players() {
            writeln!(
                self.output,
                "  {}: {} cards, {} points",
                player.name,
                player.hand().len(),
                game.cumulative_score(&player.name).unwrap_or(0)
            )?;
        }
        if let Ok(next) = game.next_player() {
            writeln!(self.output, "Next up: {}", next.name)?;
        }
        Ok(())
    }

    /// Lists the hand with indexes; playable cards are starred.
    pub fn display_player_hand(
        &mut self,
        player_name: &str,
        hand: &[Card],
        top_card: Option<&Card>,
    ) -> io::Result<()> {
        writeln!(self.output, "\nPlayer {}'s hand:", player_name)?;
        for (i, card) in hand.iter().enumerate() {
            let playable = top_card.is_some_and(|top| UnoGame::can_play_card(card, top));
            let marker = if playable { "*" } else { " " };
            writeln!(self.output, "{}{}. {}", marker, i, card)?;
        }
        Ok(())
    }

    pub fn get_player_action(&mut self) -> io::Result<PlayerAction> {
        writeln!(self.output, "\nWhat would you like to do?")?;
        writeln!(self.output, "1. Play a card")?;
        writeln!(self.output, "2. Draw a card")?;
        writeln!(self.output, "3. Show game state")?;
        writeln!(self.output, "4. Quit")?;

        let Some(choice) = self.prompt("Enter your choice: ")? else {
            return Ok(PlayerAction::Quit);
        };
        Ok(match choice.to_lowercase().as_str() {
            "1" | "p" | "play" => PlayerAction::Play,
            "2" | "d" | "draw" => PlayerAction::Draw,
            "3" | "s" | "state" => PlayerAction::ShowState,
            "4" | "q" | "quit" => PlayerAction::Quit,
            _ => PlayerAction::Unknown(choice),
        })
    }

    /// Returns `None` when the input is not a number.
    pub fn get_card_index(&mut self) -> io::Result<Option<usize>> {
        let Some(index) = self.prompt("Enter the index of the card you want to play: ")? else {
            return Ok(None);
        };
        match index.parse::<usize>() {
            Ok(i) => Ok(Some(i)),
            Err(_) => {
                writeln!(self.output, "Invalid input. Please enter a number.")?;
                Ok(None)
            }
        }
    }

    /// Asks for a colour by number or name. A blank line cancels.
    pub fn choose_color(&mut self) -> io::Result<Option<Color>> {
        loop {
            writeln!(self.output, "Choose a color:")?;
            for (i, color) in Color::ALL.iter().enumerate() {
                writeln!(self.output, "{}. {}", i + 1, color)?;
            }
            let Some(choice) = self.prompt("Enter your choice (blank to cancel): ")? else {
                return Ok(None);
            };
            if choice.is_empty() {
                return Ok(None);
            }

            let by_number = choice
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|n| Color::ALL.get(n).copied());
            match by_number.or_else(|| choice.parse::<Color>().ok()) {
                Some(color) => return Ok(Some(color)),
                None => writeln!(self.output, "Invalid choice. Please enter 1, 2, 3, or 4.")?,
            }
        }
    }

    pub fn display_snapshot(&mut self, snapshot: &GameSnapshot) -> io::Result<()> {
        let json = snapshot.to_json().map_err(io::Error::other)?;
        writeln!(self.output, "{}", json)
    }

    pub fn handle_game_event(&mut self, event: &GameEvent) -> io::Result<()> {
        match event {
            GameEvent::CardPlayed { player_name, card } => {
                writeln!(self.output, "Player {} played {}", player_name, card)
            }
            GameEvent::CardDrawn { player_name, card } => {
                writeln!(self.output, "Player {} drew {}", player_name, card)
            }
            GameEvent::DrawOne { player_name, card } => {
                writeln!(self.output, "Player {} draws one card: {}", player_name, card)
            }
            GameEvent::Reverse { direction } => {
                writeln!(self.output, "Direction reversed! Now {:?}.", direction)
            }
            GameEvent::Skip { player_name } => {
                writeln!(self.output, "Player {} skips their turn.", player_name)
            }
            GameEvent::WildColorChosen { player_name, color } => {
                writeln!(self.output, "Player {} chose color {}", player_name, color)
            }
            GameEvent::WildDrawTwo {
                player_name,
                next_player_name,
                cards,
                color,
            } => {
                writeln!(
                    self.output,
                    "Player {} chose color {}. Player {} draws 2 cards and skips their turn.",
                    player_name, color, next_player_name
                )?;
                let drawn: Vec<String> = cards.iter().map(Card::to_string).collect();
                writeln!(self.output, "  Drawn: {}", drawn.join(", "))
            }
            GameEvent::RoundWon {
                player_name,
                points,
                total,
            } => writeln!(
                self.output,
                "Player {} wins the round and scores {} points ({} total).",
                player_name, points, total
            ),
            GameEvent::MatchWon { player_name, total } => writeln!(
                self.output,
                "Player {} has won the game with {} points!",
                player_name, total
            ),
        }
    }
}
