use super::card::Card;
use std::fmt::{Display, Formatter, Result};

/// Community cards dealt so far (0, 3, 4, or 5 long). Street is tracked by
/// the owning `GameState`, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Board(Vec<Card>);

impl Board {
    pub fn empty() -> Self {
        Self(Vec::with_capacity(5))
    }
    pub fn cards(&self) -> &[Card] {
        &self.0
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn extend(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.0.extend(cards);
    }
    /// rank-desc, suit-asc concatenation; the canonical board key.
    pub fn canonical(&self) -> String {
        let mut cards = self.0.clone();
        cards.sort();
        cards.iter().map(|c| c.to_string()).collect()
    }
}

impl From<Vec<Card>> for Board {
    fn from(cards: Vec<Card>) -> Self {
        Self(cards)
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter) -> Result {
        for card in &self.0 {
            write!(f, "{card} ")?;
        }
        Ok(())
    }
}
