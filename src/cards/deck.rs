use super::card::Card;
use super::hand::Hand;
use crate::error::GameError;
use crate::rng::Rng;

/// The 52-card universe, in a fixed canonical (rank-major) order. Shuffling
/// and drawing are pure: each takes/returns the `Rng` state explicitly.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn new() -> Self {
        Self {
            cards: (0..52u8).map(Card::from).collect(),
        }
    }

    /// The full deck minus the given cards (scenario hole/board/dead cards).
    pub fn excluding(removed: Hand) -> Self {
        Self {
            cards: (0..52u8)
                .map(Card::from)
                .filter(|c| !removed.contains(*c))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
    pub fn contains(&self, card: &Card) -> bool {
        self.cards.contains(card)
    }

    /// Fisher-Yates, descending, using `rng.randint(i+1)` at each step.
    pub fn shuffle(mut self, mut rng: Rng) -> (Self, Rng) {
        let mut i = self.cards.len();
        while i > 1 {
            i -= 1;
            let (j, next) = rng.randint((i + 1) as u64);
            rng = next;
            self.cards.swap(i, j as usize);
        }
        (self, rng)
    }

    /// Pops `n` cards from the front; fails if the deck is too small.
    pub fn draw(&mut self, n: usize) -> Result<Hand, GameError> {
        if n > self.cards.len() {
            return Err(GameError::invalid_amount(format!(
                "cannot draw {n} cards from a deck of {}",
                self.cards.len()
            )));
        }
        let drawn: Vec<Card> = self.cards.drain(0..n).collect();
        Ok(Hand::from(drawn))
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}
