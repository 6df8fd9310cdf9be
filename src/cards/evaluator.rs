use super::card::Card;
use super::hand::Hand;
use super::kicks::Kickers;
use super::rank::Rank;
use super::ranking::Ranking;
use super::suit::Suit;

/// Evaluates any 5-7 card `Hand` by bitwise inspection rather than by
/// enumerating 5-card subsets: rank/suit counts are read directly off the
/// 52-bit mask, which is equivalent to (and much cheaper than) taking the
/// max over every 5-card subset.
pub struct Evaluator(Hand);

impl From<Hand> for Evaluator {
    fn from(h: Hand) -> Self {
        Self(h)
    }
}

impl Evaluator {
    pub fn hand(&self) -> Hand {
        self.0
    }

    pub fn evaluate(&self) -> Result<Ranking, crate::error::GameError> {
        let n = self.0.size();
        if !(5..=7).contains(&n) {
            return Err(crate::error::GameError::invalid_amount(format!(
                "evaluator requires 5-7 cards, got {n}"
            )));
        }
        Ok(self.find_ranking())
    }

    pub fn find_ranking(&self) -> Ranking {
        None.or_else(|| self.find_straight_flush())
            .or_else(|| self.find_4_oak())
            .or_else(|| self.find_3_oak_2_oak())
            .or_else(|| self.find_flush())
            .or_else(|| self.find_straight())
            .or_else(|| self.find_3_oak())
            .or_else(|| self.find_2_oak_2_oak())
            .or_else(|| self.find_2_oak())
            .or_else(|| self.find_1_oak())
            .expect("at least one card in Hand")
    }

    pub fn find_kickers(&self, value: Ranking) -> Kickers {
        let n = value.n_kickers();
        if n == 0 {
            return Kickers::from(0u16);
        }
        let mut bits = !value.mask() & self.rank_masks();
        while bits.count_ones() as usize > n {
            bits &= !(1 << bits.trailing_zeros());
        }
        Kickers::from(bits)
    }

    /// `(category << 20) | kicker_1 << 16 | ... | kicker_5` — a single
    /// monotone integer sufficient to totally order hands (§4.6).
    pub fn score(&self, ranking: Ranking, kickers: Kickers) -> u32 {
        let mut score = ranking.category() << 20;
        let primary: Vec<u32> = match ranking {
            Ranking::HighCard(r)
            | Ranking::OnePair(r)
            | Ranking::ThreeOAK(r)
            | Ranking::FourOAK(r)
            | Ranking::Straight(r)
            | Ranking::Flush(r)
            | Ranking::StraightFlush(r) => vec![r.value() as u32],
            Ranking::TwoPair(hi, lo) | Ranking::FullHouse(hi, lo) => {
                vec![hi.value() as u32, lo.value() as u32]
            }
        };
        let kicks: Vec<u32> = kickers.ranks_desc().iter().map(|r| r.value() as u32).collect();
        let mut slots = primary;
        slots.extend(kicks);
        slots.truncate(5);
        for (i, v) in slots.iter().enumerate() {
            score |= v << (16 - 4 * i as u32);
        }
        score
    }

    /// Reconstructs the concrete 5-card hand backing a `Ranking`, choosing
    /// cards from the original 5-7 card set. Wheel straights are displayed
    /// with the ace at the low end, per the evaluator's documented edge case.
    pub fn best_five(&self, ranking: Ranking, kickers: Kickers) -> Vec<Card> {
        let cards = Vec::<Card>::from(self.0);
        let pick = |rank: Rank, suit: Option<Suit>, take: usize, exclude: &[Card]| -> Vec<Card> {
            cards
                .iter()
                .copied()
                .filter(|c| c.rank() == rank)
                .filter(|c| suit.map_or(true, |s| c.suit() == s))
                .filter(|c| !exclude.contains(c))
                .take(take)
                .collect()
        };
        let mut result: Vec<Card> = Vec::with_capacity(5);
        match ranking {
            Ranking::FourOAK(r) => {
                result.extend(pick(r, None, 4, &[]));
            }
            Ranking::FullHouse(hi, lo) => {
                result.extend(pick(hi, None, 3, &[]));
                result.extend(pick(lo, None, 2, &[]));
            }
            Ranking::ThreeOAK(r) => {
                result.extend(pick(r, None, 3, &[]));
            }
            Ranking::TwoPair(hi, lo) => {
                result.extend(pick(hi, None, 2, &[]));
                result.extend(pick(lo, None, 2, &[]));
            }
            Ranking::OnePair(r) => {
                result.extend(pick(r, None, 2, &[]));
            }
            Ranking::StraightFlush(r) | Ranking::Straight(r) => {
                let suit = match ranking {
                    Ranking::StraightFlush(_) => Some(self.straight_flush_suit(r)),
                    _ => None,
                };
                // the evaluator only ever reports Five as a straight's top
                // card for the wheel (A-2-3-4-5); every other straight's
                // lowest possible top is Six.
                let is_wheel = r == Rank::Five;
                if is_wheel {
                    for rank in [Rank::Five, Rank::Four, Rank::Three, Rank::Two, Rank::Ace] {
                        result.extend(pick(rank, suit, 1, &result));
                    }
                } else {
                    let top = r as u8;
                    for offset in 0..5 {
                        let rank = Rank::from(top - offset);
                        result.extend(pick(rank, suit, 1, &result));
                    }
                }
                return result;
            }
            Ranking::Flush(_) => {
                let suit = self.find_suit_of_flush().expect("flush implies a flush suit");
                let mut of_suit: Vec<Card> =
                    cards.iter().copied().filter(|c| c.suit() == suit).collect();
                of_suit.sort_by(|a, b| b.rank().cmp(&a.rank()));
                of_suit.truncate(5);
                return of_suit;
            }
            Ranking::HighCard(_) => {}
        }
        for rank in kickers.ranks_desc() {
            if result.len() >= 5 {
                break;
            }
            result.extend(pick(rank, None, 1, &result));
        }
        let mut sorted = result;
        sorted.sort_by(|a, b| b.rank().cmp(&a.rank()));
        sorted
    }

    fn straight_flush_suit(&self, _top: Rank) -> Suit {
        self.find_suit_of_flush().expect("straight flush implies a flush suit")
    }

    fn find_1_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(1).map(Ranking::HighCard)
    }
    fn find_2_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(2).map(Ranking::OnePair)
    }
    fn find_3_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(3).map(Ranking::ThreeOAK)
    }
    fn find_4_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(4).map(Ranking::FourOAK)
    }
    fn find_2_oak_2_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(2).and_then(|hi| {
            self.find_rank_of_n_oak_under(2, Some(hi))
                .map(|lo| Ranking::TwoPair(hi, lo))
                .or(Some(Ranking::OnePair(hi)))
        })
    }
    fn find_3_oak_2_oak(&self) -> Option<Ranking> {
        self.find_rank_of_n_oak(3).and_then(|trips| {
            self.find_rank_of_n_oak_under(2, Some(trips))
                .map(|pairs| Ranking::FullHouse(trips, pairs))
        })
    }
    fn find_straight(&self) -> Option<Ranking> {
        self.find_rank_of_straight(self.rank_masks()).map(Ranking::Straight)
    }
    fn find_straight_flush(&self) -> Option<Ranking> {
        let suit = self.find_suit_of_flush()?;
        self.find_rank_of_straight_flush(suit).map(Ranking::StraightFlush)
    }
    fn find_flush(&self) -> Option<Ranking> {
        let suit = self.find_suit_of_flush()?;
        let bits = self.suit_masks()[suit as usize];
        Some(Ranking::Flush(Rank::from(bits)))
    }

    fn find_rank_of_straight(&self, hand: u16) -> Option<Rank> {
        const WHEEL: u16 = 0b_1_0000_0000_1111;
        let mut bits = hand;
        bits &= bits << 1;
        bits &= bits << 1;
        bits &= bits << 1;
        bits &= bits << 1;
        if bits > 0 {
            Some(Rank::from(bits))
        } else if WHEEL == (WHEEL & hand) {
            Some(Rank::Five)
        } else {
            None
        }
    }
    fn find_rank_of_straight_flush(&self, suit: Suit) -> Option<Rank> {
        let bits = self.suit_masks()[suit as usize];
        self.find_rank_of_straight(bits)
    }
    fn find_suit_of_flush(&self) -> Option<Suit> {
        self.suit_count().iter().position(|&n| n >= 5).map(|i| Suit::from(i as u8))
    }
    fn find_rank_of_n_oak_under(&self, oak: usize, rank: Option<Rank>) -> Option<Rank> {
        let rank = rank.map(|r| r as u8).unwrap_or(13) as u64;
        let below = (1u64 << (4 * rank)) - 1;
        let hand = u64::from(self.0) & below;
        let mut mask = if rank == 0 { 0 } else { 0b_1111_u64 << (4 * (rank - 1)) };
        while mask > 0 {
            if oak <= (hand & mask).count_ones() as usize {
                let r = mask.trailing_zeros() / 4;
                return Some(Rank::from(r as u8));
            }
            mask >>= 4;
        }
        None
    }
    fn find_rank_of_n_oak(&self, n: usize) -> Option<Rank> {
        self.find_rank_of_n_oak_under(n, None)
    }

    /// which ranks are present, neglecting suit.
    fn rank_masks(&self) -> u16 {
        Vec::<Card>::from(self.0)
            .iter()
            .map(|c| u16::from(c.rank()))
            .fold(0, |acc, r| acc | r)
    }
    /// how many of each suit are present, neglecting rank.
    fn suit_count(&self) -> [u8; 4] {
        Vec::<Card>::from(self.0).iter().fold([0; 4], |mut counts, c| {
            counts[c.suit() as usize] += 1;
            counts
        })
    }
    /// which ranks are present, grouped by suit.
    fn suit_masks(&self) -> [u16; 4] {
        Vec::<Card>::from(self.0).iter().fold([0; 4], |mut suits, c| {
            suits[c.suit() as usize] |= u16::from(c.rank());
            suits
        })
    }
}
