use super::card::Card;
use std::fmt::{Display, Formatter, Result};

/// A player's two private cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Hole(Card, Card);

impl Hole {
    pub fn new(a: Card, b: Card) -> Self {
        Self(a, b)
    }
    pub fn cards(&self) -> [Card; 2] {
        [self.0, self.1]
    }
    /// rank-desc, suit-asc order, making `"AhKs"` and `"KsAh"` identical.
    pub fn canonical(&self) -> String {
        let mut cards = self.cards();
        cards.sort();
        cards.iter().map(|c| c.to_string()).collect()
    }
}

impl From<Hole> for Vec<Card> {
    fn from(hole: Hole) -> Self {
        vec![hole.0, hole.1]
    }
}

impl Display for Hole {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "{}{}", self.0, self.1)
    }
}

impl crate::Arbitrary for Hole {
    fn random() -> Self {
        use super::deck::Deck;
        let mut deck = Deck::new();
        let drawn = deck.draw(2).expect("52 cards always yields 2");
        let cards = Vec::<Card>::from(drawn);
        Self(cards[0], cards[1])
    }
}
