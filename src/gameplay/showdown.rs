use super::rules;
use super::state::{GameState, Winner};
use crate::cards::{Card, Hand, Street, Strength};
use crate::Chips;
use std::collections::HashMap;

/// Awards each pot to its strongest eligible hand(s), splitting a pot's
/// remainder by clockwise seat distance from the dealer, nearest first
/// (§4.7). Called once the board is complete and more than one player is
/// still in the hand.
pub fn resolve_showdown(mut state: GameState) -> GameState {
    let board: Vec<Card> = state.board.cards().to_vec();
    let strengths: HashMap<String, Strength> = state
        .in_hand()
        .filter_map(|p| {
            let hole = p.hole?;
            let mut cards = Vec::from(hole);
            cards.extend(board.iter().copied());
            Some((p.id.clone(), Strength::from(Hand::from(cards))))
        })
        .collect();

    let mut winners: Vec<Winner> = Vec::new();
    for pot in &state.pots {
        if pot.amount == 0 {
            continue;
        }
        let eligible: Vec<&String> = pot.eligible.iter().filter(|id| strengths.contains_key(id.as_str())).collect();
        let Some(&best) = eligible.iter().map(|id| &strengths[id.as_str()]).max() else {
            continue;
        };
        let mut pot_winners: Vec<&String> = eligible.into_iter().filter(|id| strengths[id.as_str()] == best).collect();
        pot_winners.sort_by_key(|id| {
            let seat = state.player_by_id(id).map(|p| p.seat).unwrap_or(0);
            seat_distance(state.dealer_seat, seat, state.config.max_seats)
        });

        let k = pot_winners.len() as Chips;
        let base = pot.amount / k;
        let remainder = pot.amount % k;
        for (i, id) in pot_winners.into_iter().enumerate() {
            let amount = base + if (i as Chips) < remainder { 1 } else { 0 };
            if amount > 0 {
                winners.push(Winner { player_id: id.clone(), amount, hand_rank: best.to_string() });
            }
        }
    }

    let winners = merge_by_player(winners);
    for w in &winners {
        if let Some(p) = state.player_by_id_mut(&w.player_id) {
            p.stack += w.amount;
        }
    }

    state.pots.clear();
    state.current_bet = 0;
    state.street = Street::Showdown;
    state.action_seat = None;
    state.winners = Some(winners);
    state
}

/// The hand ends with exactly one player left in it; the remaining pots
/// (plus any not-yet-collected bets on the current street) go to them
/// uncontested, with no hands revealed.
pub fn resolve_single_winner(mut state: GameState) -> GameState {
    let leftover = rules::resolve_side_pots(&state.players);
    state.pots.extend(leftover);
    for p in state.players.iter_mut() {
        p.bet = 0;
    }

    let total: Chips = state.pots.iter().map(|p| p.amount).sum();
    let winner_id = state.in_hand().next().map(|p| p.id.clone());

    state.winners = Some(match winner_id {
        Some(id) => {
            if let Some(p) = state.player_by_id_mut(&id) {
                p.stack += total;
            }
            vec![Winner { player_id: id, amount: total, hand_rank: "uncontested".to_string() }]
        }
        None => Vec::new(),
    });

    state.pots.clear();
    state.current_bet = 0;
    state.street = Street::Showdown;
    state.action_seat = None;
    state
}

fn merge_by_player(winners: Vec<Winner>) -> Vec<Winner> {
    let mut merged: Vec<Winner> = Vec::new();
    for w in winners {
        if let Some(existing) = merged.iter_mut().find(|m| m.player_id == w.player_id) {
            existing.amount += w.amount;
        } else {
            merged.push(w);
        }
    }
    merged
}

/// clockwise distance from the dealer, 0 if seat == dealer.
fn seat_distance(dealer_seat: u8, seat: u8, max_seats: u8) -> u8 {
    (seat + max_seats - dealer_seat) % max_seats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};
    use crate::gameplay::config::{HandConfig, TableConfig};
    use crate::gameplay::factory::{self, ScenarioConfig, ScenarioPlayer};
    use crate::gameplay::player::PlayerStatus;
    use crate::gameplay::pot::Pot;

    fn river_heads_up(a_cards: (Card, Card), b_cards: (Card, Card), board: Vec<Card>, pot: Chips) -> GameState {
        let hand = HandConfig {
            table: TableConfig { max_seats: 2, small_blind: 5, big_blind: 10, ante: 0, starting_stack: 1000 },
            dealer_seat: 0,
            seats: vec![0, 1],
        };
        let scenario = ScenarioConfig {
            start_street: Street::River,
            initial_pot: pot,
            board_cards: board,
            dead_cards: vec![],
            players: vec![
                ScenarioPlayer { seat: 0, stack: None, cards: Some(a_cards) },
                ScenarioPlayer { seat: 1, stack: None, cards: Some(b_cards) },
            ],
        };
        factory::create_initial_state(hand, Some(scenario)).unwrap()
    }

    #[test]
    fn best_hand_wins_the_pot() {
        let state = river_heads_up(
            (Card::new(Rank::Ace, Suit::Spade), Card::new(Rank::Ace, Suit::Heart)),
            (Card::new(Rank::King, Suit::Spade), Card::new(Rank::Queen, Suit::Heart)),
            vec![
                Card::new(Rank::Two, Suit::Club),
                Card::new(Rank::Seven, Suit::Diamond),
                Card::new(Rank::Nine, Suit::Club),
                Card::new(Rank::Jack, Suit::Spade),
                Card::new(Rank::Four, Suit::Heart),
            ],
            100,
        );
        let state = resolve_showdown(state);
        let winners = state.winners.unwrap();
        assert_eq!(winners.len(), 1);
        assert_eq!(winners[0].player_id, "p0");
        assert_eq!(winners[0].amount, 100);
    }

    #[test]
    fn tied_hands_split_with_remainder_to_nearest_seat_from_dealer() {
        let board = vec![
            Card::new(Rank::Two, Suit::Club),
            Card::new(Rank::Seven, Suit::Diamond),
            Card::new(Rank::Nine, Suit::Club),
            Card::new(Rank::Jack, Suit::Spade),
            Card::new(Rank::Four, Suit::Heart),
        ];
        let mut state = river_heads_up(
            (Card::new(Rank::Ace, Suit::Spade), Card::new(Rank::King, Suit::Heart)),
            (Card::new(Rank::Ace, Suit::Club), Card::new(Rank::King, Suit::Diamond)),
            board,
            101,
        );
        state.pots = vec![Pot::new(101, ["p0".to_string(), "p1".to_string()].into_iter().collect())];
        let state = resolve_showdown(state);
        let winners = state.winners.unwrap();
        assert_eq!(winners.len(), 2);
        let dealer_share = winners.iter().find(|w| w.player_id == "p0").unwrap().amount;
        let other_share = winners.iter().find(|w| w.player_id == "p1").unwrap().amount;
        assert_eq!(dealer_share + other_share, 101);
        assert_eq!(dealer_share, 51);
        assert_eq!(other_share, 50);
    }

    #[test]
    fn single_survivor_takes_everything_uncontested() {
        let hand = HandConfig {
            table: TableConfig { max_seats: 2, small_blind: 5, big_blind: 10, ante: 0, starting_stack: 1000 },
            dealer_seat: 0,
            seats: vec![0, 1],
        };
        let mut state = factory::create_initial_state(hand, None).unwrap();
        state.players[1].status = PlayerStatus::Folded;
        let state = resolve_single_winner(state);
        let winners = state.winners.unwrap();
        assert_eq!(winners.len(), 1);
        assert_eq!(winners[0].player_id, "p0");
        assert_eq!(winners[0].hand_rank, "uncontested");
    }
}
