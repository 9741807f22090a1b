use super::card::{Card, Rank};
use crate::{COMMUNITY_CARDS, HOLE_CARDS};
use enum_map::EnumMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::cmp::{Ordering, Reverse};
use std::fmt;

/// Every made hand is exactly 5 cards.
pub const HAND_SIZE: usize = 5;
const INPUT_SIZE: usize = HOLE_CARDS + COMMUNITY_CARDS;

/// Hand categories in strictly increasing strength. The discriminants are
/// the canonical strength table; `strength()` restates it so a test can
/// catch anyone reordering the variants.
///
/// A royal flush is not its own category. It is the ace-high
/// StraightFlush, surfaced as a display label only.
#[derive(
    Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

pub const ALL_HAND_CATEGORIES: [HandCategory; 9] = [
    HandCategory::HighCard,
    HandCategory::OnePair,
    HandCategory::TwoPair,
    HandCategory::ThreeOfAKind,
    HandCategory::Straight,
    HandCategory::Flush,
    HandCategory::FullHouse,
    HandCategory::FourOfAKind,
    HandCategory::StraightFlush,
];

impl HandCategory {
    pub fn strength(self) -> u8 {
        use HandCategory::*;
        match self {
            HighCard => 0,
            OnePair => 1,
            TwoPair => 2,
            ThreeOfAKind => 3,
            Straight => 4,
            Flush => 5,
            FullHouse => 6,
            FourOfAKind => 7,
            StraightFlush => 8,
        }
    }

    pub fn name(self) -> &'static str {
        use HandCategory::*;
        match self {
            HighCard => "High Card",
            OnePair => "One Pair",
            TwoPair => "Two Pair",
            ThreeOfAKind => "Three of a Kind",
            Straight => "Straight",
            Flush => "Flush",
            FullHouse => "Full House",
            FourOfAKind => "Four of a Kind",
            StraightFlush => "Straight Flush",
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Tie-break rank values in descending significance. Lexicographic array
/// order is exactly the in-category hand order. The ace is worth 1 instead
/// of 14 in a wheel straight's sequence, and nowhere else.
pub type Kickers = [u8; HAND_SIZE];

#[derive(Debug, PartialEq, Eq)]
pub enum WinState {
    Win,
    Tie,
    Lose,
}

impl From<Ordering> for WinState {
    fn from(o: Ordering) -> Self {
        match o {
            Ordering::Less => WinState::Lose,
            Ordering::Greater => WinState::Win,
            Ordering::Equal => WinState::Tie,
        }
    }
}

/// The outcome of evaluating a hand: its category, the kicker sequence that
/// breaks ties within the category, and the five cards that made it, in
/// descending significance matching `kickers`.
///
/// Equality and ordering consider only `(category, kickers)`. Two results
/// built from different physical cards compare Equal when their categories
/// and kickers match; that is a split pot.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct HandEval {
    pub category: HandCategory,
    pub kickers: Kickers,
    pub best_five: [Card; HAND_SIZE],
}

impl PartialEq for HandEval {
    fn eq(&self, other: &Self) -> bool {
        self.category == other.category && self.kickers == other.kickers
    }
}

impl Eq for HandEval {}

impl PartialOrd for HandEval {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HandEval {
    fn cmp(&self, other: &Self) -> Ordering {
        self.category
            .cmp(&other.category)
            .then_with(|| self.kickers.cmp(&other.kickers))
    }
}

impl fmt::Display for HandEval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (", self.category_label())?;
        for c in &self.best_five {
            write!(f, "{}", c)?;
        }
        write!(f, ")")
    }
}

impl HandEval {
    pub fn beats(&self, other: &Self) -> WinState {
        self.cmp(other).into()
    }

    pub fn is_royal_flush(&self) -> bool {
        self.category == HandCategory::StraightFlush && self.kickers[0] == Rank::Ace.value()
    }

    /// The category name, with the ace-high straight flush called out by its
    /// traditional name.
    pub fn category_label(&self) -> &'static str {
        if self.is_royal_flush() {
            "Royal Flush"
        } else {
            self.category.name()
        }
    }
}

#[derive(Debug, PartialEq, derive_more::Display)]
pub enum EvalError {
    #[display(fmt = "wrong number of cards: {} hole and {} community", _0, _1)]
    WrongCardCount(usize, usize),
    #[display(fmt = "duplicate card: {}", _0)]
    DuplicateCard(Card),
}

impl std::error::Error for EvalError {}

/// Best 5-card hand from 2 hole cards and 4 community cards.
///
/// Fails before any classification work if the counts are off or any card
/// appears twice. Pure: no shared state, same inputs always give the same
/// result.
pub fn evaluate_6_cards(hole: &[Card], community: &[Card]) -> Result<HandEval, EvalError> {
    if hole.len() != HOLE_CARDS || community.len() != COMMUNITY_CARDS {
        return Err(EvalError::WrongCardCount(hole.len(), community.len()));
    }
    let mut all = [hole[0]; INPUT_SIZE];
    all[..HOLE_CARDS].copy_from_slice(hole);
    all[HOLE_CARDS..].copy_from_slice(community);
    for (i, c) in all.iter().enumerate() {
        if all[..i].contains(c) {
            return Err(EvalError::DuplicateCard(*c));
        }
    }

    // Strictly-greater keeps the first of any exact tie, so the winner is
    // the earliest subset in drop order.
    let subsets = five_card_subsets(&all);
    let mut best = evaluate_five(&subsets[0]);
    for subset in &subsets[1..] {
        let eval = evaluate_five(subset);
        if eval > best {
            best = eval;
        }
    }
    Ok(best)
}

/// Classify exactly 5 distinct cards into the hand they make.
pub fn evaluate_five(cards: &[Card; HAND_SIZE]) -> HandEval {
    let (category, kickers) = classify_five(cards);
    let wheel = kickers[0] == 5
        && matches!(
            category,
            HandCategory::Straight | HandCategory::StraightFlush
        );
    HandEval {
        category,
        kickers,
        best_five: order_best_five(*cards, wheel),
    }
}

/// Indices of the hands tied for best. Callers split the pot across them.
pub fn best_hands(evals: &[HandEval]) -> Vec<usize> {
    let best = match evals.iter().max() {
        Some(b) => *b,
        None => return vec![],
    };
    evals
        .iter()
        .enumerate()
        .filter(|(_, e)| **e == best)
        .map(|(i, _)| i)
        .collect()
}

/// The 6 choose-5 subsets, produced by dropping each index in ascending
/// order.
fn five_card_subsets(cards: &[Card; INPUT_SIZE]) -> [[Card; HAND_SIZE]; INPUT_SIZE] {
    let mut subsets = [[cards[0]; HAND_SIZE]; INPUT_SIZE];
    for (drop, subset) in subsets.iter_mut().enumerate() {
        let mut k = 0;
        for (i, c) in cards.iter().enumerate() {
            if i != drop {
                subset[k] = *c;
                k += 1;
            }
        }
    }
    subsets
}

fn classify_five(cards: &[Card; HAND_SIZE]) -> (HandCategory, Kickers) {
    use HandCategory::*;

    let is_flush = cards.iter().map(|c| c.suit).all_equal();

    let mut values = [0u8; HAND_SIZE];
    for (i, c) in cards.iter().enumerate() {
        values[i] = c.rank.value();
    }
    values.sort_unstable();
    let wheel = values == [2, 3, 4, 5, 14];
    let is_straight = wheel || values.iter().tuple_windows().all(|(a, b)| *b == a + 1);
    // The wheel is 5-high; its ace never counts 14.
    let high = if wheel { 5 } else { values[4] };

    let mut counts: EnumMap<Rank, u8> = EnumMap::default();
    for c in cards.iter() {
        counts[c.rank] += 1;
    }
    // (count desc, rank desc) is the canonical order kickers flatten from.
    // With 5 distinct cards there are always at least 2 groups.
    let groups: Vec<(Rank, u8)> = counts
        .into_iter()
        .filter(|(_, n)| *n > 0)
        .sorted_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.cmp(&a.0)))
        .collect();

    let category = if is_straight && is_flush {
        StraightFlush
    } else if groups[0].1 == 4 {
        FourOfAKind
    } else if groups[0].1 == 3 && groups[1].1 == 2 {
        FullHouse
    } else if is_flush {
        Flush
    } else if is_straight {
        Straight
    } else if groups[0].1 == 3 {
        ThreeOfAKind
    } else if groups[0].1 == 2 && groups[1].1 == 2 {
        TwoPair
    } else if groups[0].1 == 2 {
        OnePair
    } else {
        HighCard
    };

    let kickers = match category {
        StraightFlush | Straight => [high, high - 1, high - 2, high - 3, high - 4],
        Flush | HighCard => {
            let mut k = values;
            k.reverse();
            k
        }
        _ => {
            let mut k = [0u8; HAND_SIZE];
            let mut i = 0;
            for (rank, n) in groups {
                for _ in 0..n {
                    k[i] = rank.value();
                    i += 1;
                }
            }
            k
        }
    };
    (category, kickers)
}

/// Order the made hand by descending significance: grouped ranks first
/// (count, then rank), everything else by rank, the wheel's ace last.
fn order_best_five(mut five: [Card; HAND_SIZE], wheel: bool) -> [Card; HAND_SIZE] {
    let mut counts: EnumMap<Rank, u8> = EnumMap::default();
    for c in &five {
        counts[c.rank] += 1;
    }
    five.sort_unstable_by_key(|c| {
        let v = if wheel && c.rank == Rank::Ace {
            1
        } else {
            c.rank.value()
        };
        Reverse((counts[c.rank], v))
    });
    five
}



#[cfg(test)]
mod test_evaluate {
    use super::*;
    use crate::cards::card::cards_from_str;
    use crate::cards::deck::{Deck, DeckSeed};

    fn eval(hole: &str, community: &str) -> Result<HandEval, EvalError> {
        evaluate_6_cards(&cards_from_str(hole), &cards_from_str(community))
    }

    #[test]
    fn wrong_card_counts() {
        for (hole, community) in [
            ("As", "KdQc2h3s"),
            ("AsKh2d", "KdQc2h3s"),
            ("AsKh", "KdQc2h"),
            ("AsKh", "KdQc2h3s4c"),
            ("", ""),
        ] {
            let res = eval(hole, community);
            assert_eq!(
                res,
                Err(EvalError::WrongCardCount(
                    hole.len() / 2,
                    community.len() / 2
                ))
            );
        }
    }

    #[test]
    fn duplicate_card() {
        // As appears in both the hole and the community
        let res = eval("AsKh", "As2d3c4h");
        assert_eq!(res, Err(EvalError::DuplicateCard("As".parse().unwrap())));
        // duplicate within the community
        let res = eval("AsKh", "2d2d3c4h");
        assert_eq!(res, Err(EvalError::DuplicateCard("2d".parse().unwrap())));
    }

    #[test]
    fn two_pair_example() {
        let e = eval("AsKh", "AdKcQhJs").unwrap();
        assert_eq!(e.category, HandCategory::TwoPair);
        assert_eq!(e.kickers, [14, 14, 13, 13, 12]);
        let ranks: Vec<Rank> = e.best_five.iter().map(|c| c.rank).collect();
        assert_eq!(
            ranks,
            [Rank::Ace, Rank::Ace, Rank::King, Rank::King, Rank::Queen]
        );
    }

    #[test]
    fn full_house_example() {
        let e = eval("2c7d", "2d2h7c9s").unwrap();
        assert_eq!(e.category, HandCategory::FullHouse);
        // trip twos beat the pair of sevens in the grouping order
        assert_eq!(e.kickers, [2, 2, 2, 7, 7]);
    }

    #[test]
    fn straight_uses_both_hole_cards() {
        let e = eval("9hTd", "JcQdKs2h").unwrap();
        assert_eq!(e.category, HandCategory::Straight);
        assert_eq!(e.kickers, [13, 12, 11, 10, 9]);
    }

    #[test]
    fn ties_keep_first_subset() {
        // Dropping either deuce gives the same two pair; drop order says the
        // heart (index 4 of the merged input) goes first, keeping the spade.
        let e = eval("AsAd", "KhKc2h2s").unwrap();
        assert_eq!(e.category, HandCategory::TwoPair);
        assert_eq!(e.kickers, [14, 14, 13, 13, 2]);
        let two_spades: Card = "2s".parse().unwrap();
        let two_hearts: Card = "2h".parse().unwrap();
        assert!(e.best_five.contains(&two_spades));
        assert!(!e.best_five.contains(&two_hearts));
    }

    #[test]
    fn evaluation_is_pure() {
        let a = eval("AsKh", "AdKcQhJs").unwrap();
        let b = eval("AsKh", "AdKcQhJs").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.best_five, b.best_five);
    }

    /// Any duplicate-free 6 cards evaluate, and the made hand is five of them.
    #[test]
    fn best_five_is_subset_of_input() {
        for n in 0..100u8 {
            let mut deck = Deck::seeded(&DeckSeed::new([n; 32]));
            let hole = deck.deal_cards(2);
            let community = deck.deal_cards(4);
            let e = evaluate_6_cards(&hole, &community).unwrap();
            let mut seen = vec![];
            for c in e.best_five {
                assert!(hole.contains(&c) || community.contains(&c));
                assert!(!seen.contains(&c));
                seen.push(c);
            }
            // kickers are always 5 rank values, descending within groups
            assert!(e.kickers.iter().all(|k| (1..=14).contains(k)));
        }
    }

    #[test]
    fn best_hands_single_winner() {
        let board = "KhKcQhJs";
        let evals = vec![
            eval("As2d", board).unwrap(),
            eval("3c4d", board).unwrap(),
            eval("KdKs", board).unwrap(),
        ];
        assert_eq!(best_hands(&evals), vec![2]);
    }

    #[test]
    fn best_hands_split_pot() {
        let board = "KhKcQhJs";
        let evals = vec![
            eval("As2d", board).unwrap(),
            eval("Ad2c", board).unwrap(),
            eval("3c4d", board).unwrap(),
        ];
        assert_eq!(best_hands(&evals), vec![0, 1]);
        assert!(best_hands(&[]).is_empty());
    }

    #[test]
    fn display_labels() {
        let royal = eval("AsKs", "QsJsTs2d").unwrap();
        assert_eq!(royal.to_string(), "Royal Flush (AsKsQsJsTs)");
        let boat = eval("2c7d", "2d2h7c9s").unwrap();
        assert!(boat.to_string().starts_with("Full House ("));
    }

    #[test]
    fn serde_round_trip() {
        let e = eval("AsKh", "AdKcQhJs").unwrap();
        let s = serde_json::to_string(&e).unwrap();
        let e2: HandEval = serde_json::from_str(&s).unwrap();
        assert_eq!(e, e2);
        assert_eq!(e.best_five, e2.best_five);
    }
}
