pub mod cards;

pub use cards::hand::{evaluate_6_cards, EvalError, HandCategory, HandEval};
pub use cards::{card, deck, hand};
pub use cards::{Card, Deck, Rank, Suit};

/// Number of private cards dealt to each player.
pub const HOLE_CARDS: usize = 2;
/// Number of shared community cards in this variant.
pub const COMMUNITY_CARDS: usize = 4;
