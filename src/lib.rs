//! Engine for a simplified UNO game: random card supply, Draw One,
//! Reverse, Skip, Wild and Wild Draw Two, scored to 500 points.

pub mod uno_game;
