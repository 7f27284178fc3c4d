use super::card::Card;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Player {
    pub name: String,
    hand: Vec<Card>,
}

impl Player {
    pub fn new(name: String) -> Self {
        Self {
            name,
            hand: Vec::new(),
        }
    }

    /// Cards held, in the order they were received.
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    /// Adds a card to the player's hand.
    pub(crate) fn add_card(&mut self, card: Card) {
        self.hand.push(card);
    }

    /// Removes the first card equal to `card`.
    /// Returns `None` if the player holds no such card.
    pub(crate) fn remove_card(&mut self, card: &Card) -> Option<Card> {
        let index = self.hand.iter().position(|held| held == card)?;
        Some(self.hand.remove(index))
    }

    pub(crate) fn clear_hand(&mut self) {
        self.hand.clear();
    }

    /// Checks if the player has won (i.e., their hand is empty).
    pub fn has_won(&self) -> bool {
        self.hand.is_empty()
    }

    /// Sum of the point values of every card still held.
    pub fn hand_points(&self) -> u32 {
        self.hand.iter().map(Card::points).sum()
    }
}
