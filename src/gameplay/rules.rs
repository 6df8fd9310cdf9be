use super::action::ActionType;
use super::player::{Player, PlayerStatus};
use super::pot::Pot;
use super::state::GameState;
use crate::Chips;
use std::collections::BTreeSet;

/// One entry of `getLegalActionsDetailed` (§4.4): amounts are deltas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegalAction {
    pub kind: ActionType,
    pub min_amount: Chips,
    pub max_amount: Chips,
}

/// The seat-to-act's legal actions given the current betting state.
pub fn legal_actions(state: &GameState) -> Vec<LegalAction> {
    let Some(seat) = state.action_seat else {
        return Vec::new();
    };
    let Some(player) = state.player_at(seat) else {
        return Vec::new();
    };
    if !player.is_active() {
        return Vec::new();
    }

    let mut actions = Vec::new();
    let to_call = state.current_bet - player.bet;

    if to_call > 0 {
        actions.push(LegalAction { kind: ActionType::Fold, min_amount: 0, max_amount: 0 });
    }
    if to_call == 0 {
        actions.push(LegalAction { kind: ActionType::Check, min_amount: 0, max_amount: 0 });
    }
    if to_call > 0 {
        let call_amount = to_call.min(player.stack);
        actions.push(LegalAction { kind: ActionType::Call, min_amount: call_amount, max_amount: call_amount });
    }
    if state.current_bet == 0 && player.stack > 0 {
        let min_amount = state.min_raise.min(player.stack);
        actions.push(LegalAction { kind: ActionType::Bet, min_amount, max_amount: player.stack });
    }
    if state.current_bet > 0 && player.stack > to_call {
        let may_raise = state.last_raise_is_full || !player.acted_on_street;
        if may_raise {
            let min_amount = ((state.current_bet + state.min_raise) - player.bet).min(player.stack);
            actions.push(LegalAction { kind: ActionType::Raise, min_amount, max_amount: player.stack });
        }
    }
    actions
}

/// Builds one pot per distinct non-zero bet level, eligibility limited to
/// non-folded players who contributed at or above that level (§4.4).
pub fn resolve_side_pots(players: &[Player]) -> Vec<Pot> {
    let mut levels: Vec<Chips> = players.iter().map(|p| p.bet).filter(|&b| b > 0).collect();
    levels.sort_unstable();
    levels.dedup();

    let mut pots = Vec::new();
    let mut previous = 0;
    for level in levels {
        let amount: Chips = players.iter().map(|p| p.bet.min(level) - previous).sum();
        if amount == 0 {
            previous = level;
            continue;
        }
        let eligible: BTreeSet<String> = players
            .iter()
            .filter(|p| !p.is_folded() && p.bet >= level)
            .map(|p| p.id.clone())
            .collect();
        pots.push(Pot::new(amount, eligible));
        previous = level;
    }
    pots
}

/// true iff betting on the current street has closed (§4.4).
pub fn is_street_complete(state: &GameState) -> bool {
    if state.n_in_hand() <= 1 {
        return true;
    }
    let actives: Vec<&Player> = state.active().collect();
    if actives.is_empty() {
        return true;
    }
    actives.iter().all(|p| p.acted_on_street && p.bet == state.current_bet)
}

pub fn is_single_survivor(state: &GameState) -> bool {
    state.n_in_hand() <= 1
}

pub fn is_all_in_runout(state: &GameState) -> bool {
    state.n_in_hand() > 1 && state.n_active() <= 1
}

impl PlayerStatus {
    pub fn can_act(&self) -> bool {
        matches!(self, PlayerStatus::Active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gameplay::config::{HandConfig, TableConfig};
    use crate::gameplay::factory;

    fn heads_up() -> GameState {
        let config = TableConfig { max_seats: 2, small_blind: 5, big_blind: 10, ante: 0, starting_stack: 1000 };
        let hand = HandConfig { table: config, dealer_seat: 0, seats: vec![0, 1] };
        factory::create_initial_state(hand, None).unwrap()
    }

    #[test]
    fn heads_up_dealer_faces_a_call_not_a_check() {
        // seat 0 (dealer/SB) acts first heads-up preflop, facing the BB
        let state = heads_up();
        let actions = legal_actions(&state);
        assert!(actions.iter().any(|a| a.kind == ActionType::Call));
        assert!(!actions.iter().any(|a| a.kind == ActionType::Check));
    }

    #[test]
    fn re_raise_restriction_blocks_short_all_in_caller() {
        let mut players = vec![
            Player::new("a", 0, 1000),
            Player::new("b", 1, 1000),
            Player::new("c", 2, 210),
        ];
        players[0].commit(100); // raise to 100
        players[1].commit(200); // re-raise to 200
        players[2].commit(210); // short all-in to 210, increment 10 < minRaise 100
        let pots = resolve_side_pots(&players);
        let total: Chips = pots.iter().map(|p| p.amount).sum();
        assert_eq!(total, 100 + 200 + 210);
    }
}
