use super::config::HandConfig;
use super::player::Player;
use super::pot::Pot;
use super::state::GameState;
use crate::cards::{Board, Card, Deck, Hand, Street};
use crate::error::GameError;
use crate::rng::Rng;
use crate::Chips;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScenarioPlayer {
    pub seat: u8,
    pub stack: Option<Chips>,
    pub cards: Option<(Card, Card)>,
}

/// God-mode state override: pre-assigned hole cards, a mid-hand starting
/// street, dead cards, and an initial pot (§4.2, §6 Scenario config).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScenarioConfig {
    pub start_street: Street,
    pub initial_pot: Chips,
    pub board_cards: Vec<Card>,
    pub dead_cards: Vec<Card>,
    pub players: Vec<ScenarioPlayer>,
}

impl ScenarioConfig {
    fn validate(&self) -> Result<(), GameError> {
        let expected = self.start_street.n_observed();
        if self.board_cards.len() != expected {
            return Err(GameError::invalid_config(format!(
                "scenario board length {} does not match street {} (expected {expected})",
                self.board_cards.len(),
                self.start_street
            )));
        }
        let mut seen: BTreeSet<Card> = BTreeSet::new();
        let all = self
            .board_cards
            .iter()
            .chain(self.dead_cards.iter())
            .chain(self.players.iter().flat_map(|p| p.cards.iter().flat_map(|(a, b)| [a, b])));
        for card in all {
            if !seen.insert(*card) {
                return Err(GameError::invalid_config(format!("duplicate card {card} in scenario")));
            }
        }
        Ok(())
    }
}

/// Builds the first `GameState` of a hand from a seating plus an optional
/// scenario override (§4.3).
pub fn create_initial_state(hand: HandConfig, scenario: Option<ScenarioConfig>) -> Result<GameState, GameError> {
    create_initial_state_seeded(hand, scenario, 1)
}

pub fn create_initial_state_seeded(
    hand: HandConfig,
    scenario: Option<ScenarioConfig>,
    seed: u64,
) -> Result<GameState, GameError> {
    create_initial_state_with_rng(hand, scenario, Rng::new(seed))
}

/// Same as [`create_initial_state_seeded`] but continues an existing `Rng`
/// stream rather than reseeding. Used by `prepare_next_hand` so a session's
/// randomness does not restart at every hand boundary.
pub fn create_initial_state_with_rng(
    hand: HandConfig,
    scenario: Option<ScenarioConfig>,
    rng: Rng,
) -> Result<GameState, GameError> {
    hand.validate()?;
    if let Some(s) = &scenario {
        s.validate()?;
    }

    let mut seats = hand.seats.clone();
    seats.sort_unstable();
    let mut players: Vec<Player> = seats
        .iter()
        .map(|&seat| Player::new(format!("p{seat}"), seat, hand.table.starting_stack))
        .collect();

    if let Some(scenario) = &scenario {
        for sp in &scenario.players {
            if let Some(p) = players.iter_mut().find(|p| p.seat == sp.seat) {
                if let Some(stack) = sp.stack {
                    p.stack = stack;
                    p.start_hand_stack = stack;
                }
                if let Some((a, b)) = sp.cards {
                    p.hole = Some(crate::cards::Hole::new(a, b));
                }
            }
        }
    }

    let mut excluded = Hand::empty();
    if let Some(scenario) = &scenario {
        excluded = scenario.board_cards.iter().chain(scenario.dead_cards.iter()).fold(excluded, |h, &c| {
            h.add(Hand::from(vec![c]))
        });
    }
    for p in &players {
        if let Some(hole) = p.hole {
            excluded = excluded.add(Hand::from(Vec::from(hole)));
        }
    }

    let (mut deck, rng) = Deck::excluding(excluded).shuffle(rng);

    let start_street = scenario.as_ref().map(|s| s.start_street).unwrap_or(Street::Preflop);

    let mut state = GameState {
        config: hand.table,
        rng,
        deck: Deck::new(),
        players,
        pots: Vec::new(),
        board: Board::empty(),
        street: start_street,
        dealer_seat: hand.dealer_seat,
        action_seat: None,
        min_raise: hand.table.big_blind,
        current_bet: 0,
        last_aggressor: None,
        last_raise_is_full: true,
        winners: None,
    };

    if start_street != Street::Preflop {
        if let Some(scenario) = &scenario {
            state.board = Board::from(scenario.board_cards.clone());
            state.pots = vec![Pot::new(
                scenario.initial_pot,
                state.players.iter().map(|p| p.id.clone()).collect(),
            )];
        }
        deal_missing_holes(&mut state, &mut deck)?;
        state.deck = deck;
        state.action_seat = state.find_seat_after(state.dealer_seat, |p| p.is_active());
        log::info!("scenario state ready at {}", state.street);
        return Ok(state);
    }

    deal_missing_holes(&mut state, &mut deck)?;
    state.deck = deck;
    post_antes(&mut state);
    let bb_seat = post_blinds(&mut state)?;
    state.action_seat = if state.players.len() == 2 {
        Some(state.dealer_seat)
    } else {
        state.find_seat_after(bb_seat, |p| p.is_active())
    };
    log::info!("initial state ready, dealer seat {}", state.dealer_seat);
    Ok(state)
}

fn deal_missing_holes(state: &mut GameState, deck: &mut Deck) -> Result<(), GameError> {
    let seats: Vec<u8> = state.players.iter().filter(|p| p.hole.is_none()).map(|p| p.seat).collect();
    for seat in seats {
        let drawn = deck.draw(2)?;
        let cards = Vec::<Card>::from(drawn);
        let player = state.player_at_mut(seat).expect("seat exists");
        player.hole = Some(crate::cards::Hole::new(cards[0], cards[1]));
    }
    Ok(())
}

fn post_antes(state: &mut GameState) {
    if state.config.ante == 0 {
        return;
    }
    let mut collected = 0;
    for p in state.players.iter_mut() {
        let amount = state.config.ante.min(p.stack);
        p.stack -= amount;
        p.total_bet += amount;
        collected += amount;
    }
    state.pots.push(Pot::new(collected, state.players.iter().map(|p| p.id.clone()).collect()));
}

/// Heads-up: dealer posts SB. 3+-handed: first active seat after dealer
/// posts SB, unless it is more than one seat away (dead-SB rule), in which
/// case only BB is posted.
fn post_blinds(state: &mut GameState) -> Result<u8, GameError> {
    let heads_up = state.players.len() == 2;
    let dealer = state.dealer_seat;

    let (sb_seat, bb_seat) = if heads_up {
        let bb = state.find_seat_after(dealer, |p| p.is_active()).ok_or_else(no_opponent)?;
        (Some(dealer), bb)
    } else {
        let (gap, next_active) = raw_steps_to_next_active(state, dealer);
        if gap > 1 {
            (None, next_active)
        } else {
            let sb = next_active;
            let bb = state.find_seat_after(sb, |p| p.is_active()).ok_or_else(no_opponent)?;
            (Some(sb), bb)
        }
    };

    if let Some(sb_seat) = sb_seat {
        let sb = state.config.small_blind;
        let player = state.player_at_mut(sb_seat).expect("sb seat exists");
        let amount = sb.min(player.stack);
        player.commit(amount);
    }
    let bb = state.config.big_blind;
    let player = state.player_at_mut(bb_seat).expect("bb seat exists");
    let amount = bb.min(player.stack);
    player.commit(amount);

    state.current_bet = state.config.big_blind;
    state.min_raise = state.config.big_blind;
    state.last_raise_is_full = true;
    state.last_aggressor = None;
    for p in state.players.iter_mut() {
        p.has_acted = false;
        p.acted_on_street = false;
    }
    Ok(bb_seat)
}

fn no_opponent() -> GameError {
    GameError::invalid_config("fewer than 2 active players")
}

/// number of raw seats between `from` and the next active seat clockwise
/// (1 if adjacent), and that seat itself. Used for the dead-SB rule.
fn raw_steps_to_next_active(state: &GameState, from: u8) -> (u8, u8) {
    let mut cursor = from;
    for steps in 1..=state.config.max_seats {
        cursor = state.next_seat_after(cursor);
        if state.player_at(cursor).is_some_and(|p| p.is_active()) {
            return (steps, cursor);
        }
    }
    (1, cursor)
}
