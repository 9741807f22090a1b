use super::card::{all_cards, Card, DECK_LEN};
use base64ct::{Base64, Encoding};
use rand::prelude::*;
use rand_chacha::ChaChaRng;
use std::fmt;
use std::str::FromStr;

const SEED_LEN: usize = 32;
const ENCODED_SEED_LEN: usize = 4 * ((SEED_LEN + 3 - 1) / 3); // 4 * ceil(SEED_LEN / 3)

#[derive(Debug, PartialEq, derive_more::Display)]
pub enum DeckError {
    #[display(fmt = "{}", _0)]
    SeedDecode(base64ct::Error),
}

impl std::error::Error for DeckError {}

impl From<base64ct::Error> for DeckError {
    fn from(e: base64ct::Error) -> Self {
        Self::SeedDecode(e)
    }
}

/// A single 52-card deck. Cards are dealt from the back of the vec.
#[derive(Debug, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

/// A full deck in new-box order, unshuffled
impl Default for Deck {
    fn default() -> Self {
        let cards = all_cards().to_vec();
        assert_eq!(cards.len(), DECK_LEN);
        Deck { cards }
    }
}

impl Deck {
    pub fn new(shuffle: bool) -> Self {
        let mut d = Deck::default();
        if shuffle {
            d.shuffle();
        }
        d
    }

    /// A deck whose order is fully determined by the given seed
    pub fn seeded(seed: &DeckSeed) -> Self {
        let mut d = Deck::default();
        d.seeded_shuffle(seed);
        d
    }

    /// Fisher-Yates shuffle of the remaining cards, in place
    pub fn shuffle(&mut self) {
        self.cards.shuffle(&mut thread_rng());
    }

    pub fn seeded_shuffle(&mut self, seed: &DeckSeed) {
        let mut rng = ChaChaRng::from_seed(seed.0);
        // For determinism given the same seed, the cards need to be in a known
        // order before shuffling.
        self.cards
            .sort_unstable_by_key(|c| (c.rank, c.suit as u8));
        self.cards.shuffle(&mut rng)
    }

    /// Deal the topmost card, or None if the deck is exhausted
    pub fn deal_card(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Deal up to `count` cards. The result is shorter than `count` when the
    /// deck runs out.
    pub fn deal_cards(&mut self, count: usize) -> Vec<Card> {
        let mut v = Vec::with_capacity(count.min(self.cards.len()));
        for _ in 0..count {
            match self.deal_card() {
                Some(c) => v.push(c),
                None => break,
            }
        }
        v
    }

    /// Look at the next card to be dealt without dealing it
    pub fn peek_top(&self) -> Option<Card> {
        self.cards.last().copied()
    }

    /// Return a card to the bottom of the deck
    pub fn add_card(&mut self, card: Card) {
        self.cards.insert(0, card);
    }

    pub fn add_cards(&mut self, cards: &[Card]) {
        for c in cards {
            self.add_card(*c);
        }
    }

    /// Restore the full 52 cards, optionally shuffling
    pub fn reset(&mut self, shuffle: bool) {
        *self = Deck::new(shuffle);
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards_remaining(&self) -> usize {
        self.cards.len()
    }
}

/// Owns a shuffled deck and keeps callers supplied with cards. This is an
/// explicit instance handed to whoever deals; there is no process-wide deck.
#[derive(Debug)]
pub struct DeckManager {
    deck: Deck,
}

impl Default for DeckManager {
    fn default() -> Self {
        Self {
            deck: Deck::new(true),
        }
    }
}

impl DeckManager {
    /// Deal `count` cards. If fewer remain, the deck is reset and reshuffled
    /// first, which puts previously dealt cards back in play.
    pub fn take_cards(&mut self, count: usize) -> Vec<Card> {
        if count > self.deck.cards_remaining() {
            self.deck.reset(true);
        }
        self.deck.deal_cards(count)
    }

    pub fn reset(&mut self) {
        self.deck.reset(true);
    }

    pub fn cards_remaining(&self) -> usize {
        self.deck.cards_remaining()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeckSeed([u8; SEED_LEN]);

impl DeckSeed {
    pub fn new(b: [u8; SEED_LEN]) -> Self {
        Self(b)
    }
}

impl Default for DeckSeed {
    fn default() -> Self {
        let mut b = [0u8; SEED_LEN];
        thread_rng().fill_bytes(&mut b);
        Self(b)
    }
}

impl fmt::Display for DeckSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut b = [0u8; ENCODED_SEED_LEN];
        Base64::encode(&self.0, &mut b).unwrap();
        write!(f, "{}", String::from_utf8_lossy(&b))
    }
}

impl FromStr for DeckSeed {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut b: [u8; SEED_LEN] = [0; SEED_LEN];
        Base64::decode(s, &mut b)?;
        Ok(DeckSeed(b))
    }
}
