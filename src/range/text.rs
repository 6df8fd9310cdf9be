use super::{HandClass, Range};
use crate::cards::{Card, Rank, Suit};
use crate::error::GameError;

/// Parses the comma-separated range notation from the external interface
/// (§6): each token is either a class (`AA`, `AKs`, `AKo`) or an explicit
/// two-card combo (`"As Ah"`). Combos that collide with `board` or `hero`
/// cards are silently skipped; a token that parses as neither shape is an
/// error.
pub fn parse_range_text(text: &str, board: &[Card], hero: &[Card]) -> Result<Range, GameError> {
    let mut range = Range::empty();
    let dead: Vec<Card> = board.iter().chain(hero.iter()).copied().collect();

    for raw in text.split(',') {
        let token = raw.trim();
        if token.is_empty() {
            continue;
        }
        if let Some((a, b)) = parse_combo(token) {
            if dead.contains(&a) || dead.contains(&b) || a == b {
                continue;
            }
            let class = class_of(a, b);
            range.bump_weight(class, 1.0 / class.raw_combos() as f64);
        } else {
            let class: HandClass = token
                .parse()
                .map_err(|_| GameError::invalid_amount(format!("unrecognized range token: {token}")))?;
            range.set_weight(class, 1.0);
        }
    }
    Ok(range)
}

/// `"As Ah"` / `"As,Ah"` style explicit combo: two card tokens separated by
/// whitespace.
fn parse_combo(token: &str) -> Option<(Card, Card)> {
    let parts: Vec<&str> = token.split_whitespace().collect();
    if parts.len() != 2 {
        return None;
    }
    Some((parse_card(parts[0])?, parse_card(parts[1])?))
}

fn parse_card(s: &str) -> Option<Card> {
    let bytes = s.as_bytes();
    if bytes.len() != 2 {
        return None;
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
        _ => return None,
    };
    let suit = match bytes[1].to_ascii_lowercase() {
        b'c' => Suit::Club,
        b'd' => Suit::Diamond,
        b'h' => Suit::Heart,
        b's' => Suit::Spade,
        _ => return None,
    };
    Some(Card::new(rank, suit))
}

fn class_of(a: Card, b: Card) -> HandClass {
    let (hi, lo) = if a.rank() >= b.rank() { (a, b) } else { (b, a) };
    if hi.rank() == lo.rank() {
        HandClass::Pair(hi.rank())
    } else if hi.suit() == lo.suit() {
        HandClass::Suited(hi.rank(), lo.rank())
    } else {
        HandClass::Offsuit(hi.rank(), lo.rank())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_class_and_combo_tokens() {
        let range = parse_range_text("AA, AKs, As Kh", &[], &[]).unwrap();
        assert_eq!(range.weight(HandClass::Pair(Rank::Ace)), 1.0);
        assert_eq!(range.weight(HandClass::Suited(Rank::Ace, Rank::King)), 1.0);
        assert!(range.weight(HandClass::Offsuit(Rank::Ace, Rank::King)) > 0.0);
    }

    #[test]
    fn skips_combos_colliding_with_dead_cards() {
        let board = [Card::new(Rank::Ace, Suit::Spade)];
        let range = parse_range_text("As Kh", &board, &[]).unwrap();
        assert_eq!(range.weight(HandClass::Offsuit(Rank::Ace, Rank::King)), 0.0);
    }

    #[test]
    fn rejects_garbage_tokens() {
        assert!(parse_range_text("ZZ", &[], &[]).is_err());
    }
}
