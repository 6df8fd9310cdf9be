use super::rank::Rank;
use super::suit::Suit;
use std::fmt::{Display, Formatter, Result};

/// `(rank, suit)`. Canonical string `"<rank><suit>"`, e.g. `"Ah"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }
    pub fn rank(&self) -> Rank {
        self.rank
    }
    pub fn suit(&self) -> Suit {
        self.suit
    }
    pub fn to_bits(&self) -> u64 {
        1u64 << u8::from(*self)
    }
}

/// rank-major u8 isomorphism, `rank*4 + suit`.
impl From<Card> for u8 {
    fn from(c: Card) -> u8 {
        (c.rank as u8) * 4 + (c.suit as u8)
    }
}
impl From<u8> for Card {
    fn from(n: u8) -> Self {
        Self {
            rank: Rank::from(n / 4),
            suit: Suit::from(n % 4),
        }
    }
}
impl From<(Rank, Suit)> for Card {
    fn from((rank, suit): (Rank, Suit)) -> Self {
        Self { rank, suit }
    }
}

/// order by rank-descending, then suit-ascending: the canonicalization order
/// mandated for infoset keys and board/hole serialization.
impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Card {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .rank
            .cmp(&self.rank)
            .then_with(|| self.suit.cmp(&other.suit))
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl std::str::FromStr for Card {
    type Err = crate::error::GameError;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(crate::error::GameError::invalid_amount(format!(
                "card code must be 2 characters: {s}"
            )));
        }
        let rank = match bytes[0].to_ascii_uppercase() {
            b'2' => Rank::Two,
            b'3' => Rank::Three,
            b'4' => Rank::Four,
            b'5' => Rank::Five,
            b'6' => Rank::Six,
            b'7' => Rank::Seven,
            b'8' => Rank::Eight,
            b'9' => Rank::Nine,
            b'T' => Rank::Ten,
            b'J' => Rank::Jack,
            b'Q' => Rank::Queen,
            b'K' => Rank::King,
            b'A' => Rank::Ace,
            _ => {
                return Err(crate::error::GameError::invalid_amount(format!(
                    "unknown rank character in {s}"
                )))
            }
        };
        let suit = match bytes[1].to_ascii_lowercase() {
            b'c' => Suit::Club,
            b'd' => Suit::Diamond,
            b'h' => Suit::Heart,
            b's' => Suit::Spade,
            _ => {
                return Err(crate::error::GameError::invalid_amount(format!(
                    "unknown suit character in {s}"
                )))
            }
        };
        Ok(Card::new(rank, suit))
    }
}

impl crate::Arbitrary for Card {
    fn random() -> Self {
        use rand::Rng;
        Card::from(rand::rng().random_range(0..52u8))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips_through_u8() {
        for n in 0..52u8 {
            let card = Card::from(n);
            assert_eq!(u8::from(card), n);
        }
    }

    #[test]
    fn parses_and_displays() {
        let card: Card = "As".parse().unwrap();
        assert_eq!(card.rank(), Rank::Ace);
        assert_eq!(card.suit(), Suit::Spade);
        assert_eq!(format!("{card}"), "As");
    }

    #[test]
    fn canonical_order_is_rank_desc_suit_asc() {
        let ah: Card = "Ah".parse().unwrap();
        let as_: Card = "As".parse().unwrap();
        let kd: Card = "Kd".parse().unwrap();
        assert!(ah < as_);
        assert!(as_ < kd);
    }
}
