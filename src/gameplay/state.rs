use super::config::TableConfig;
use super::player::Player;
use super::pot::Pot;
use crate::cards::{Board, Deck, Street};
use crate::rng::Rng;
use crate::Chips;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Winner {
    pub player_id: String,
    pub amount: Chips,
    pub hand_rank: String,
}

/// Everything needed to determine the next legal action and, given one, the
/// next state (§3 GameState). Produced only by the factory and the engine;
/// never mutated in place.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GameState {
    pub config: TableConfig,
    pub rng: Rng,
    pub deck: Deck,
    pub players: Vec<Player>,
    pub pots: Vec<Pot>,
    pub board: Board,
    pub street: Street,
    pub dealer_seat: u8,
    pub action_seat: Option<u8>,
    pub min_raise: Chips,
    pub current_bet: Chips,
    pub last_aggressor: Option<u8>,
    pub last_raise_is_full: bool,
    pub winners: Option<Vec<Winner>>,
}

impl GameState {
    pub fn player_at(&self, seat: u8) -> Option<&Player> {
        self.players.iter().find(|p| p.seat == seat)
    }
    pub fn player_at_mut(&mut self, seat: u8) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.seat == seat)
    }
    pub fn player_by_id(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }
    pub fn player_by_id_mut(&mut self, id: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn acting_player(&self) -> Option<&Player> {
        self.action_seat.and_then(|seat| self.player_at(seat))
    }

    pub fn in_hand(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_in_hand())
    }
    pub fn active(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_active())
    }

    pub fn n_in_hand(&self) -> usize {
        self.in_hand().count()
    }
    pub fn n_active(&self) -> usize {
        self.active().count()
    }

    /// clockwise seat order starting right after `seat`, wrapping at `maxSeats`.
    pub fn next_seat_after(&self, seat: u8) -> u8 {
        (seat + 1) % self.config.max_seats
    }

    /// first occupied, in-hand-eligible seat strictly clockwise of `seat`
    /// satisfying `pred`, scanning at most `maxSeats` steps.
    pub fn find_seat_after<F: Fn(&Player) -> bool>(&self, seat: u8, pred: F) -> Option<u8> {
        let mut cursor = self.next_seat_after(seat);
        for _ in 0..self.config.max_seats {
            if let Some(p) = self.player_at(cursor) {
                if pred(p) {
                    return Some(cursor);
                }
            }
            cursor = self.next_seat_after(cursor);
        }
        None
    }

    pub fn sum_chips(&self) -> Chips {
        let stacks: Chips = self.players.iter().map(|p| p.stack).sum();
        let bets: Chips = self.players.iter().map(|p| p.bet).sum();
        let pots: Chips = self.pots.iter().map(|p| p.amount).sum();
        stacks + bets + pots
    }
}
