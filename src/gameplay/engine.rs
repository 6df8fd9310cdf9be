use super::action::{Action, ActionType};
use super::config::HandConfig;
use super::factory;
use super::player::{Player, PlayerStatus};
use super::rules::{self, legal_actions};
use super::showdown;
use super::state::GameState;
use crate::cards::{Card, Street};
use crate::error::GameError;
use crate::Chips;

/// The engine's only entry point: `apply(state, action) -> state'` is a
/// pure function from one `GameState` to the next (§4.5). Never mutates its
/// argument; every transition produces a fresh, independent state so replay
/// and branching are just calling this again from an earlier value.
pub fn apply(state: &GameState, action: &Action) -> Result<GameState, GameError> {
    let seat = state
        .action_seat
        .ok_or_else(|| GameError::illegal_action_type("no seat is on act"))?;
    let player = state
        .player_at(seat)
        .ok_or_else(|| GameError::player_not_found(format!("no player seated at {seat}")))?;
    if player.id != action.player_id {
        return Err(GameError::wrong_player(format!(
            "seat {seat} belongs to {}, not {}",
            player.id, action.player_id
        ))
        .with_field("playerId"));
    }

    let legal = legal_actions(state);
    let choice = legal
        .iter()
        .find(|a| a.kind == action.kind)
        .ok_or_else(|| GameError::illegal_action_type(format!("{:?} is not legal for {}", action.kind, player.id)))?;

    let mut state = state.clone();
    match action.kind {
        ActionType::Fold => {
            let p = state.player_at_mut(seat).expect("seat validated above");
            p.status = PlayerStatus::Folded;
            p.has_acted = true;
            p.acted_on_street = true;
        }
        ActionType::Check => {
            let p = state.player_at_mut(seat).expect("seat validated above");
            p.has_acted = true;
            p.acted_on_street = true;
        }
        ActionType::Call => {
            if action.amount != choice.min_amount {
                return Err(
                    GameError::invalid_call_amount(format!("call must be exactly {}", choice.min_amount))
                        .with_field("amount"),
                );
            }
            state.player_at_mut(seat).expect("seat validated above").commit(action.amount);
        }
        ActionType::Bet | ActionType::Raise => {
            if action.amount < choice.min_amount || action.amount > choice.max_amount {
                return Err(GameError::invalid_raise_amount(format!(
                    "amount must be between {} and {}",
                    choice.min_amount, choice.max_amount
                ))
                .with_field("amount"));
            }
            apply_aggression(&mut state, seat, action.amount);
        }
        ActionType::NextHand => {
            return Err(GameError::illegal_action_type("nextHand is not a betting action"));
        }
    }

    let state = advance(state)?;
    log::trace!(
        "seat {} {:?} {} -> pot {} currentBet {}",
        seat,
        action.kind,
        action.amount,
        state.pots.iter().map(|p| p.amount).sum::<Chips>() + state.players.iter().map(|p| p.bet).sum::<Chips>(),
        state.current_bet
    );
    Ok(state)
}

/// Commits `amount`, then updates the table's betting frontier. A raise that
/// increments the bet by at least `minRaise` reopens action for everyone
/// else and becomes the new `minRaise`; a short all-in raise does not.
fn apply_aggression(state: &mut GameState, seat: u8, amount: Chips) {
    state.player_at_mut(seat).expect("seat validated above").commit(amount);
    let new_bet = state.player_at(seat).expect("seat validated above").bet;
    let increment = new_bet - state.current_bet;
    let is_full_raise = increment >= state.min_raise;

    state.current_bet = new_bet;
    state.last_aggressor = Some(seat);
    state.last_raise_is_full = is_full_raise;
    if is_full_raise {
        state.min_raise = increment;
    }
    for p in state.players.iter_mut() {
        if p.seat != seat && p.is_active() {
            p.has_acted = false;
        }
    }
}

/// Post-action bookkeeping shared by every action: check for a lone
/// survivor, then for a closed betting round, then just move to the next
/// seat (§4.4, §4.5).
fn advance(mut state: GameState) -> Result<GameState, GameError> {
    if rules::is_single_survivor(&state) {
        return Ok(showdown::resolve_single_winner(state));
    }

    if rules::is_street_complete(&state) {
        collect_bets(&mut state);
        if state.street == Street::River {
            return Ok(showdown::resolve_showdown(state));
        }
        if rules::is_all_in_runout(&state) {
            deal_remaining_streets(&mut state)?;
            return Ok(showdown::resolve_showdown(state));
        }
        advance_street(&mut state)?;
        return Ok(state);
    }

    let seat = state.action_seat.expect("street incomplete implies someone is left to act");
    state.action_seat = state.find_seat_after(seat, |p| p.is_active());
    Ok(state)
}

/// Folds the current street's bets into the pot structure and resets
/// per-street betting state (§4.4 `resolveSidePots`).
fn collect_bets(state: &mut GameState) {
    state.pots.extend(rules::resolve_side_pots(&state.players));
    for p in state.players.iter_mut() {
        p.reset_for_street();
    }
    state.current_bet = 0;
    state.min_raise = state.config.big_blind;
    state.last_aggressor = None;
    state.last_raise_is_full = true;
}

/// Advances to the next street, burning and dealing the cards it reveals,
/// and sets the first seat to act (first active seat after the dealer).
fn advance_street(state: &mut GameState) -> Result<(), GameError> {
    state.street = state.street.next();
    let n_revealed = state.street.n_revealed();
    if n_revealed > 0 {
        state.deck.draw(1)?;
        let dealt = state.deck.draw(n_revealed)?;
        state.board.extend(Vec::<Card>::from(dealt));
    }
    state.action_seat = state.find_seat_after(state.dealer_seat, |p| p.is_active());
    Ok(())
}

/// All but one remaining player is all-in: there is no more betting, so the
/// board is dealt out street by street to the river before showdown.
fn deal_remaining_streets(state: &mut GameState) -> Result<(), GameError> {
    while state.street != Street::River {
        advance_street(state)?;
    }
    state.action_seat = None;
    Ok(())
}

/// Rotates the dealer, carries stacks and the `Rng` stream forward, and
/// deals and posts blinds for the next hand. Players with no chips left are
/// dropped from the seating.
pub fn prepare_next_hand(previous: &GameState) -> Result<GameState, GameError> {
    let mut seats: Vec<u8> = previous.players.iter().filter(|p| p.stack > 0).map(|p| p.seat).collect();
    seats.sort_unstable();
    if seats.len() < 2 {
        return Err(GameError::invalid_config("fewer than 2 players have chips remaining"));
    }

    let mut dealer_seat = previous.next_seat_after(previous.dealer_seat);
    while !seats.contains(&dealer_seat) {
        dealer_seat = previous.next_seat_after(dealer_seat);
    }

    let hand = HandConfig { table: previous.config, dealer_seat, seats };
    let mut state = factory::create_initial_state_with_rng(hand, None, previous.rng)?;

    for p in state.players.iter_mut() {
        if let Some(prev) = previous.player_by_id(&p.id) {
            let carried: &Player = prev;
            p.name = carried.name.clone();
        }
    }
    Ok(state)
}
