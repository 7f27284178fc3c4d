use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::game::GameError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Yellow,
    Green,
    Blue,
}

impl Color {
    pub const ALL: [Color; 4] = [Color::Red, Color::Yellow, Color::Green, Color::Blue];

    /// Upper-case name used in asset paths.
    pub fn asset_name(&self) -> &'static str {
        match self {
            Color::Red => "RED",
            Color::Yellow => "YELLOW",
            Color::Green => "GREEN",
            Color::Blue => "BLUE",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Color::Red => "Red",
            Color::Yellow => "Yellow",
            Color::Green => "Green",
            Color::Blue => "Blue",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Color {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "red" => Ok(Color::Red),
            "yellow" => Ok(Color::Yellow),
            "green" => Ok(Color::Green),
            "blue" => Ok(Color::Blue),
            _ => Err(GameError::InvalidColor(s.to_string())),
        }
    }
}

/// The fifteen card kinds. `Number` only ever carries 0 through 9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Number(u8),
    DrawOne,
    Reverse,
    Skip,
    Wild,
    WildDrawTwo,
}

impl CardType {
    pub const ALL: [CardType; 15] = [
        CardType::Number(0),
        CardType::Number(1),
        CardType::Number(2),
        CardType::Number(3),
        CardType::Number(4),
        CardType::Number(5),
        CardType::Number(6),
        CardType::Number(7),
        CardType::Number(8),
        CardType::Number(9),
        CardType::DrawOne,
        CardType::Reverse,
        CardType::Skip,
        CardType::Wild,
        CardType::WildDrawTwo,
    ];

    pub fn is_wild(&self) -> bool {
        matches!(self, CardType::Wild | CardType::WildDrawTwo)
    }

    /// Points this kind is worth to the round winner when left in a hand.
    pub fn points(&self) -> u32 {
        match self {
            CardType::Number(n) => u32::from(*n),
            CardType::DrawOne => 10,
            CardType::Reverse | CardType::Skip => 20,
            CardType::WildDrawTwo => 25,
            CardType::Wild => 50,
        }
    }

    pub fn asset_name(&self) -> &'static str {
        match self {
            CardType::Number(0) => "ZERO",
            CardType::Number(1) => "ONE",
            CardType::Number(2) => "TWO",
            CardType::Number(3) => "THREE",
            CardType::Number(4) => "FOUR",
            CardType::Number(5) => "FIVE",
            CardType::Number(6) => "SIX",
            CardType::Number(7) => "SEVEN",
            CardType::Number(8) => "EIGHT",
            CardType::Number(_) => "NINE",
            CardType::DrawOne => "DRAW_ONE",
            CardType::Reverse => "REVERSE",
            CardType::Skip => "SKIP",
            CardType::Wild => "WILD",
            CardType::WildDrawTwo => "WILD_DRAW_TWO",
        }
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardType::Number(n) => write!(f, "{}", n),
            CardType::DrawOne => write!(f, "Draw One"),
            CardType::Reverse => write!(f, "Reverse"),
            CardType::Skip => write!(f, "Skip"),
            CardType::Wild => write!(f, "Wild"),
            CardType::WildDrawTwo => write!(f, "Wild Draw Two"),
        }
    }
}

/// A card on the table or in a hand.
///
/// Wild kinds are dealt without a colour; the colour is assigned once the
/// card has been played and a colour chosen. Every other kind always carries
/// a colour. Equality compares both fields, so two uncoloured wilds of the
/// same kind are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Card {
    color: Option<Color>,
    card_type: CardType,
}

impl Card {
    pub fn new(color: Color, card_type: CardType) -> Self {
        Self {
            color: Some(color),
            card_type,
        }
    }

    /// An uncoloured Wild, as dealt.
    pub fn wild() -> Self {
        Self {
            color: None,
            card_type: CardType::Wild,
        }
    }

    /// An uncoloured Wild Draw Two, as dealt.
    pub fn wild_draw_two() -> Self {
        Self {
            color: None,
            card_type: CardType::WildDrawTwo,
        }
    }

    /// The card as it comes off the random supply: wild kinds drop `color`.
    pub fn dealt(card_type: CardType, color: Color) -> Self {
        match card_type {
            CardType::Wild => Self::wild(),
            CardType::WildDrawTwo => Self::wild_draw_two(),
            _ => Self::new(color, card_type),
        }
    }

    /// The same card with `color` assigned.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn card_type(&self) -> CardType {
        self.card_type
    }

    pub(crate) fn set_color(&mut self, color: Color) {
        self.color = Some(color);
    }

    pub fn is_wild(&self) -> bool {
        self.card_type.is_wild()
    }

    pub fn points(&self) -> u32 {
        self.card_type.points()
    }

    /// Path of the image the view draws for this card.
    pub fn asset_path(&self) -> String {
        match self.color {
            Some(color) if !self.is_wild() => format!(
                "images/{}_{}.png",
                color.asset_name(),
                self.card_type.asset_name()
            ),
            _ => format!("images/{}.png", self.card_type.asset_name()),
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.color, self.is_wild()) {
            (Some(color), true) => write!(f, "{} ({})", self.card_type, color),
            (Some(color), false) => write!(f, "{} {}", color, self.card_type),
            (None, _) => write!(f, "{}", self.card_type),
        }
    }
}
