use enum_map::Enum;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const SPADE: char = 's';
pub const HEART: char = 'h';
pub const DIAMOND: char = 'd';
pub const CLUB: char = 'c';
pub const ALL_SUITS: [Suit; 4] = [Suit::Club, Suit::Diamond, Suit::Heart, Suit::Spade];
pub const ALL_RANKS: [Rank; 13] = [
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
    Rank::Ace,
];
pub const DECK_LEN: usize = ALL_RANKS.len() * ALL_SUITS.len();

#[derive(
    Hash, Enum, Clone, Copy, Debug, PartialEq, PartialOrd, Eq, Ord, Serialize, Deserialize,
)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    /// Numeric value of the rank, 2 through 14. Ace is always 14 here; the
    /// hand evaluator handles the ace-low straight itself.
    pub fn value(&self) -> u8 {
        use Rank::*;
        match *self {
            Two => 2,
            Three => 3,
            Four => 4,
            Five => 5,
            Six => 6,
            Seven => 7,
            Eight => 8,
            Nine => 9,
            Ten => 10,
            Jack => 11,
            Queen => 12,
            King => 13,
            Ace => 14,
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Two => write!(f, "2"),
            Self::Three => write!(f, "3"),
            Self::Four => write!(f, "4"),
            Self::Five => write!(f, "5"),
            Self::Six => write!(f, "6"),
            Self::Seven => write!(f, "7"),
            Self::Eight => write!(f, "8"),
            Self::Nine => write!(f, "9"),
            Self::Ten => write!(f, "T"),
            Self::Jack => write!(f, "J"),
            Self::Queen => write!(f, "Q"),
            Self::King => write!(f, "K"),
            Self::Ace => write!(f, "A"),
        }
    }
}

impl From<char> for Rank {
    fn from(c: char) -> Self {
        match c {
            '2' => Rank::Two,
            '3' => Rank::Three,
            '4' => Rank::Four,
            '5' => Rank::Five,
            '6' => Rank::Six,
            '7' => Rank::Seven,
            '8' => Rank::Eight,
            '9' => Rank::Nine,
            'T' => Rank::Ten,
            'J' => Rank::Jack,
            'Q' => Rank::Queen,
            'K' => Rank::King,
            'A' => Rank::Ace,
            _ => unreachable!("Bad Rank -> Card Parse"),
        }
    }
}

/// Suits carry no ordering. Only rank matters when comparing cards, so Suit
/// implements equality and nothing more.
#[derive(Hash, Enum, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Suit {
    Club,
    Diamond,
    Heart,
    Spade,
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Club => write!(f, "{}", CLUB),
            Self::Diamond => write!(f, "{}", DIAMOND),
            Self::Heart => write!(f, "{}", HEART),
            Self::Spade => write!(f, "{}", SPADE),
        }
    }
}

impl From<char> for Suit {
    fn from(c: char) -> Self {
        match c {
            CLUB => Self::Club,
            DIAMOND => Self::Diamond,
            HEART => Self::Heart,
            SPADE => Self::Spade,
            _ => unreachable!("Bad Suit -> Card parse"),
        }
    }
}

#[derive(Hash, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl FromStr for Card {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut i = s.chars();
        match (i.next(), i.next(), i.next()) {
            (Some(r), Some(su), None) => Ok(Card::from([r, su])),
            _ => Err(String::from("Failed to parse card")),
        }
    }
}

impl From<[char; 2]> for Card {
    fn from(cs: [char; 2]) -> Self {
        Self {
            rank: cs[0].into(),
            suit: cs[1].into(),
        }
    }
}

/// We only consider Card Rank when determining order
impl std::cmp::PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// We only consider Card Rank when determining order
impl std::cmp::Ord for Card {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank.cmp(&other.rank)
    }
}

impl Card {
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Card { rank, suit }
    }

    pub fn is_red(self) -> bool {
        matches!(self.suit, Suit::Heart | Suit::Diamond)
    }

    pub fn is_black(self) -> bool {
        !self.is_red()
    }

    pub fn is_face_card(self) -> bool {
        matches!(self.rank, Rank::Jack | Rank::Queen | Rank::King)
    }

    pub fn is_ace(self) -> bool {
        self.rank == Rank::Ace
    }
}

/// Returns an UNSHUFFLED array of cards
pub fn all_cards() -> [Card; DECK_LEN] {
    use itertools::Itertools;
    let mut cards: [Card; DECK_LEN] = [Card::new(Suit::Club, Rank::Ace); DECK_LEN];
    let c_iter = ALL_SUITS
        .iter()
        .cartesian_product(ALL_RANKS.iter())
        .map(|x| Card::new(*x.0, *x.1));
    for (i, c) in c_iter.enumerate() {
        cards[i] = c;
    }
    cards
}

#[cfg(test)]
pub(crate) fn cards_from_str(s: &str) -> Vec<Card> {
    let mut v = vec![];
    let mut s_chars = s.chars();
    while let Some(r) = s_chars.next() {
        let su = s_chars.next().expect("Need even number of chars");
        v.push([r, su].into())
    }
    v
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    #[test]
    /// Becuase the sort order of cards is used as logic, this test simply
    /// exists to highlight when that fails
    fn sort_order() {
        for (i, r) in ALL_RANKS.into_iter().sorted_unstable().rev().enumerate() {
            assert_eq!(r.value(), 14u8 - (i as u8));
        }
    }

    #[test]
    fn string_single() {
        let mut s = "Ah".chars();
        let ch = [s.next().unwrap(), s.next().unwrap()];
        let c = Card::from(ch);
        assert_eq!(c.rank, Rank::Ace);
        assert_eq!(c.suit, Suit::Heart);
    }

    #[test]
    fn parse_rejects_bad_len() {
        assert!("".parse::<Card>().is_err());
        assert!("A".parse::<Card>().is_err());
        assert!("Ahh".parse::<Card>().is_err());
        assert!("Ah".parse::<Card>().is_ok());
    }

    #[test]
    fn test_card_rank() {
        let c1 = Card::new(Suit::Club, Rank::Jack);
        let c2 = Card::new(Suit::Diamond, Rank::Queen);
        let c3 = Card::new(Suit::Heart, Rank::Jack);
        assert!(c1 < c2);
        // Equal rank compares equal in order even though the cards differ
        assert_eq!(c1.cmp(&c3), std::cmp::Ordering::Equal);
        assert_ne!(c1, c3);
    }

    #[test]
    fn colors_and_faces() {
        let ah: Card = "Ah".parse().unwrap();
        let kd: Card = "Kd".parse().unwrap();
        let ts: Card = "Ts".parse().unwrap();
        let jc: Card = "Jc".parse().unwrap();
        assert!(ah.is_red() && ah.is_ace() && !ah.is_face_card());
        assert!(kd.is_red() && kd.is_face_card());
        assert!(ts.is_black() && !ts.is_face_card());
        assert!(jc.is_black() && jc.is_face_card() && !jc.is_ace());
    }

    #[test]
    fn all_cards_distinct() {
        let cards = all_cards();
        assert_eq!(cards.len(), DECK_LEN);
        assert_eq!(cards.iter().unique().count(), DECK_LEN);
    }

    #[test]
    fn display_round_trip() {
        for c in all_cards() {
            let c2: Card = c.to_string().parse().unwrap();
            assert_eq!(c, c2);
        }
    }
}
