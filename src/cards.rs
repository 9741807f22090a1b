pub mod card;
pub mod deck;
pub mod hand;

pub use card::{Card, Rank, Suit};
pub use deck::{Deck, DeckManager, DeckSeed};
pub use hand::{best_hands, evaluate_6_cards, HandCategory, HandEval, WinState};
