use super::evaluator::Evaluator;
use super::hand::Hand;
use super::kicks::Kickers;
use super::ranking::Ranking;

/// A hand's strength.
///
/// This will always be constructed from a Hand, which is an unordered
/// set of Cards. The strength is determined by the Hand's value, and the
/// kicker cards are used to break ties.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord)]
pub struct Strength {
    value: Ranking,
    pub kicks: Kickers,
}

impl From<Hand> for Strength {
    fn from(hand: Hand) -> Self {
        Self::from(Evaluator::from(hand))
    }
}

impl From<Evaluator> for Strength {
    fn from(e: Evaluator) -> Self {
        let value = e.find_ranking();
        let kicks = e.find_kickers(value);
        Self::from((value, kicks))
    }
}

impl From<(Ranking, Kickers)> for Strength {
    fn from((value, kicks): (Ranking, Kickers)) -> Self {
        Self { value, kicks }
    }
}

impl Strength {
    pub fn value(&self) -> Ranking {
        self.value
    }

    /// `(category << 20) | kicker_1 << 16 | ... | kicker_5`, a single
    /// monotone integer sufficient to totally order hands (§4.6).
    pub fn score(&self) -> u32 {
        let mut score = self.value.category() << 20;
        let kicks: Vec<u32> = self.kicks.ranks_desc().iter().map(|r| r.value() as u32).collect();
        for (i, v) in kicks.iter().take(5).enumerate() {
            score |= v << (16 - 4 * i as u32);
        }
        score
    }
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:<18}{:>5}", self.value, self.kicks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::card::Card;
    use crate::cards::rank::Rank;
    use crate::cards::suit::Suit;

    #[test]
    fn orders_by_category_before_kickers() {
        let pair = Strength::from(Hand::from(vec![
            Card::new(Rank::Ace, Suit::Spade),
            Card::new(Rank::Ace, Suit::Heart),
            Card::new(Rank::King, Suit::Diamond),
            Card::new(Rank::Queen, Suit::Club),
            Card::new(Rank::Jack, Suit::Spade),
        ]));
        let two_pair = Strength::from(Hand::from(vec![
            Card::new(Rank::Two, Suit::Spade),
            Card::new(Rank::Two, Suit::Heart),
            Card::new(Rank::Three, Suit::Diamond),
            Card::new(Rank::Three, Suit::Club),
            Card::new(Rank::Four, Suit::Spade),
        ]));
        assert!(two_pair > pair);
    }

    #[test]
    fn score_is_consistent_with_ord() {
        let a = Strength::from(Hand::from(vec![
            Card::new(Rank::Ace, Suit::Spade),
            Card::new(Rank::Ace, Suit::Heart),
            Card::new(Rank::King, Suit::Diamond),
            Card::new(Rank::Queen, Suit::Club),
            Card::new(Rank::Jack, Suit::Spade),
        ]));
        let b = Strength::from(Hand::from(vec![
            Card::new(Rank::King, Suit::Spade),
            Card::new(Rank::King, Suit::Heart),
            Card::new(Rank::Queen, Suit::Diamond),
            Card::new(Rank::Jack, Suit::Club),
            Card::new(Rank::Ten, Suit::Spade),
        ]));
        assert!(a > b);
        assert!(a.score() > b.score());
    }
}
