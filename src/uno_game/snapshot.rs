use super::card::Card;
use super::game::UnoGame;
use serde::Serialize;

/// Read-only picture of a game, as printed by the `state` command.
#[derive(Debug, Serialize)]
pub struct GameSnapshot {
    pub round: u32,
    pub current_turn: usize,
    pub direction: String,
    pub players: Vec<PlayerSnapshot>,
    pub top_card: Option<CardSnapshot>,
    pub target_score: u32,
    pub match_winner: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PlayerSnapshot {
    pub name: String,
    pub hand_size: usize,
    pub score: u32,
}

#[derive(Debug, Serialize)]
pub struct CardSnapshot {
    pub color: Option<String>,
    pub card_type: String,
    pub asset: String,
}

impl GameSnapshot {
    pub fn from_game(game: &UnoGame) -> Self {
        Self {
            round: game.rounds_played(),
            current_turn: game.current_turn(),
            direction: format!("{:?}", game.direction()),
            players: game
                .players()
                .iter()
                .map(|p| PlayerSnapshot {
                    name: p.name.clone(),
                    hand_size: p.hand().len(),
                    score: game.cumulative_score(&p.name).unwrap_or(0),
                })
                .collect(),
            top_card: game.top_card().map(CardSnapshot::from_card),
            target_score: game.config().target_score,
            match_winner: game.match_winner().map(str::to_string),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl CardSnapshot {
    fn from_card(card: &Card) -> Self {
        Self {
            color: card.color().map(|c| format!("{:?}", c)),
            card_type: format!("{:?}", card.card_type()),
            asset: card.asset_path(),
        }
    }
}
