//! Best-response exploitability (§4.12). Walks the same tree CFR trained
//! over, but from one player's perspective holding a fixed hole-card combo
//! and facing the *opponent's trained average strategy* — not a uniform
//! stand-in, which the spec calls out as a bug in the system this was
//! modeled on (§9).

use super::cfr::Trainer;
use super::tree::CFRNode;
use crate::cards::{Hand, Hole, Strength};
use crate::range::{HandClass, Range};
use crate::{Chips, Utility};

#[derive(Debug, Clone, Copy)]
pub struct ExploitabilityConfig {
    pub converged_threshold_pct: f64,
}

impl Default for ExploitabilityConfig {
    fn default() -> Self {
        Self { converged_threshold_pct: 0.5 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Exploitability {
    pub ev0: Utility,
    pub ev1: Utility,
    pub total_pct: f64,
    pub converged: bool,
}

/// One concrete hole-card combo drawn from a range, with that combo's range
/// weight (not yet normalized against the opponent's combo count).
fn enumerate_combos(range: &Range, dead: &[crate::cards::Card]) -> Vec<(Hole, f64)> {
    use crate::cards::{Card, Suit};
    const SUITS: [Suit; 4] = [Suit::Club, Suit::Diamond, Suit::Heart, Suit::Spade];

    let mut out = Vec::new();
    for (class, weight) in range.classes() {
        if weight <= 0.0 {
            continue;
        }
        let combos: Vec<(Card, Card)> = match class {
            HandClass::Pair(r) => {
                let mut combos = Vec::new();
                for i in 0..4 {
                    for j in (i + 1)..4 {
                        combos.push((Card::new(r, SUITS[i]), Card::new(r, SUITS[j])));
                    }
                }
                combos
            }
            HandClass::Suited(hi, lo) => SUITS.iter().map(|&s| (Card::new(hi, s), Card::new(lo, s))).collect(),
            HandClass::Offsuit(hi, lo) => {
                let mut combos = Vec::new();
                for &a in &SUITS {
                    for &b in &SUITS {
                        if a != b {
                            combos.push((Card::new(hi, a), Card::new(lo, b)));
                        }
                    }
                }
                combos
            }
        };
        for (a, b) in combos {
            if dead.contains(&a) || dead.contains(&b) {
                continue;
            }
            out.push((Hole::new(a, b), weight));
        }
    }
    out
}

/// Unnormalized weighted sum of the best-response player's utility over
/// `opp_weights`; callers divide by the opponent-weight total once, at the
/// top level, rather than renormalizing at every node.
fn br_value(trainer: &Trainer, node: &CFRNode, br_player: usize, my_hole: Hole, opp_weights: &[(Hole, f64)]) -> Utility {
    if node.is_terminal {
        let total_weight: f64 = opp_weights.iter().map(|(_, w)| w).sum();
        return match node.payoff {
            Some(p0_utility) => {
                let br_utility = if br_player == 0 { p0_utility } else { -p0_utility };
                br_utility * total_weight
            }
            None => opp_weights
                .iter()
                .map(|(opp_hole, w)| {
                    let (hole0, hole1) = if br_player == 0 { (my_hole, *opp_hole) } else { (*opp_hole, my_hole) };
                    let p0_value = evaluate_showdown(hole0, hole1, trainer.board().cards(), node.pot);
                    let br_value = if br_player == 0 { p0_value } else { -p0_value };
                    br_value * w
                })
                .sum(),
        };
    }

    let acting = node.player_to_act as usize;
    if acting == br_player {
        node.children
            .iter()
            .map(|&child| br_value(trainer, trainer.tree().node(child), br_player, my_hole, opp_weights))
            .fold(Utility::NEG_INFINITY, Utility::max)
    } else {
        node.children
            .iter()
            .enumerate()
            .map(|(i, &child)| {
                let reweighted: Vec<(Hole, f64)> = opp_weights
                    .iter()
                    .map(|(opp_hole, w)| {
                        let strategy = trainer
                            .strategy_at(node.id, *opp_hole)
                            .unwrap_or_else(|| vec![1.0 / node.actions.len() as f64; node.actions.len()]);
                        (*opp_hole, w * strategy[i])
                    })
                    .collect();
                br_value(trainer, trainer.tree().node(child), br_player, my_hole, &reweighted)
            })
            .sum()
    }
}

fn evaluate_showdown(hole0: Hole, hole1: Hole, board: &[crate::cards::Card], pot: Chips) -> Utility {
    let mut h0 = Vec::from(hole0);
    h0.extend(board.iter().copied());
    let mut h1 = Vec::from(hole1);
    h1.extend(board.iter().copied());
    let s0 = Strength::from(Hand::from(h0));
    let s1 = Strength::from(Hand::from(h1));
    match s0.cmp(&s1) {
        std::cmp::Ordering::Greater => pot as Utility / 2.0,
        std::cmp::Ordering::Less => -(pot as Utility) / 2.0,
        std::cmp::Ordering::Equal => 0.0,
    }
}

/// Mean best-response EV for `br_player`'s whole range against the trained
/// opponent average strategy, with card-removal applied against the board
/// and each of the player's own combos.
fn mean_best_response(trainer: &Trainer, br_player: usize, own_range: &Range, opp_range: &Range) -> Utility {
    let board = trainer.board().cards().to_vec();
    let own_combos = enumerate_combos(own_range, &board);
    if own_combos.is_empty() {
        return 0.0;
    }
    let own_total: f64 = own_combos.iter().map(|(_, w)| w).sum();

    let root = trainer.tree().node(trainer.tree().root);
    let mut weighted_sum = 0.0;
    for (my_hole, my_weight) in &own_combos {
        let mut dead = board.clone();
        dead.extend(my_hole.cards());
        let opp_combos = enumerate_combos(opp_range, &dead);
        let opp_total: f64 = opp_combos.iter().map(|(_, w)| w).sum();
        if opp_total <= 0.0 {
            continue;
        }
        let ev = br_value(trainer, root, br_player, *my_hole, &opp_combos) / opp_total;
        weighted_sum += ev * my_weight;
    }
    weighted_sum / own_total
}

pub fn compute(trainer: &Trainer, range0: &Range, range1: &Range, initial_pot: Chips, config: &ExploitabilityConfig) -> Exploitability {
    let ev0 = mean_best_response(trainer, 0, range0, range1);
    let ev1 = mean_best_response(trainer, 1, range1, range0);
    let total_pct = 100.0 * (ev0 + ev1) / (2.0 * initial_pot as Utility);
    Exploitability { ev0, ev1, total_pct, converged: total_pct <= config.converged_threshold_pct }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, Rank, Suit};
    use crate::solver::cfr::{HandPairing, Trainer};
    use crate::solver::tree::{build, TreeConfig};

    fn board() -> crate::cards::Board {
        crate::cards::Board::from(vec![
            Card::new(Rank::Two, Suit::Club),
            Card::new(Rank::Seven, Suit::Diamond),
            Card::new(Rank::Nine, Suit::Club),
            Card::new(Rank::Jack, Suit::Spade),
            Card::new(Rank::Four, Suit::Heart),
        ])
    }

    #[test]
    fn exploitability_is_a_finite_percentage_for_a_trained_strategy() {
        let config = TreeConfig { bet_sizes: vec![1.0], raise_sizes: vec![], max_raises: 1 };
        let tree = build(100, 500, 500, &config);
        let pairing = HandPairing {
            cards0: Hole::new(Card::new(Rank::Ace, Suit::Spade), Card::new(Rank::Ace, Suit::Heart)),
            cards1: Hole::new(Card::new(Rank::King, Suit::Spade), Card::new(Rank::King, Suit::Heart)),
            weight: 1.0,
        };
        let mut trainer = Trainer::new(tree, board(), vec![pairing]);
        trainer.step(200).unwrap();

        let mut range0 = Range::empty();
        range0.set_weight(HandClass::Pair(Rank::Ace), 1.0);
        let mut range1 = Range::empty();
        range1.set_weight(HandClass::Pair(Rank::King), 1.0);

        let result = compute(&trainer, &range0, &range1, 100, &ExploitabilityConfig::default());
        assert!(result.total_pct.is_finite());
    }
}
