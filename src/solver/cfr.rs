//! Recursive (discounted) CFR traversal over a built [`GameTree`] (§4.11).
//!
//! One traversal corresponds to one sampled hand pairing; [`Trainer::step`]
//! runs a batch of iterations, each sweeping every supplied pairing once, as
//! the spec's hand-dispatch convention describes.

use super::discount::Discount;
use super::infoset::{average_strategy, regret_match, InfosetStore};
use super::tree::GameTree;
use crate::cards::{Board, Hand, Hole, Strength};
use crate::error::GameError;
use crate::{Chips, Probability, Utility};

/// One sampled heads-up matchup, scaled by `weight` for range-wide training.
#[derive(Debug, Clone, Copy)]
pub struct HandPairing {
    pub cards0: Hole,
    pub cards1: Hole,
    pub weight: f64,
}

pub struct Trainer {
    tree: GameTree,
    store: InfosetStore,
    board: Board,
    pairings: Vec<HandPairing>,
    iteration: usize,
}

impl Trainer {
    pub fn new(tree: GameTree, board: Board, pairings: Vec<HandPairing>) -> Self {
        Self { tree, store: InfosetStore::new(), board, pairings, iteration: 0 }
    }

    pub fn iterations_done(&self) -> usize {
        self.iteration
    }

    pub fn infosets_trained(&self) -> usize {
        self.store.len()
    }

    /// Runs `iterations` full sweeps over the sampled hand pairings.
    pub fn step(&mut self, iterations: usize) -> Result<usize, GameError> {
        for _ in 0..iterations {
            self.iteration += 1;
            let t = self.iteration;
            for pairing_idx in 0..self.pairings.len() {
                let weight = self.pairings[pairing_idx].weight;
                let root = self.tree.root;
                self.traverse(root, pairing_idx, weight, weight, t)?;
            }
        }
        log::info!("step: {} iterations, t={}, {} infosets", iterations, self.iteration, self.store.len());
        Ok(self.iteration)
    }

    /// Average strategy for `(nodeId, hole, board)`, or `None` if that
    /// infoset was never visited during training.
    pub fn strategy_at(&self, node_id: usize, hole: Hole) -> Option<Vec<Probability>> {
        let key = infoset_key(node_id, hole, &self.board);
        self.store.get(&key).map(|cell| average_strategy(cell.strategy_sum()))
    }

    pub fn tree(&self) -> &GameTree {
        &self.tree
    }

    pub fn store(&self) -> &InfosetStore {
        &self.store
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    fn traverse(&mut self, idx: usize, pairing_idx: usize, reach0: f64, reach1: f64, t: usize) -> Result<Utility, GameError> {
        let node = self.tree.node(idx).clone();
        log::trace!("visit node {} player {} terminal={} pot {}", node.id, node.player_to_act, node.is_terminal, node.pot);
        if node.is_terminal {
            return Ok(match node.payoff {
                Some(fixed) => fixed,
                None => {
                    let pairing = self.pairings[pairing_idx];
                    evaluate_showdown(pairing.cards0, pairing.cards1, &self.board, node.pot)
                }
            });
        }

        let p = node.player_to_act as usize;
        let hole = if p == 0 { self.pairings[pairing_idx].cards0 } else { self.pairings[pairing_idx].cards1 };
        let key = infoset_key(node.id, hole, &self.board);
        let num_actions = node.actions.len();

        let strategy = {
            let cell = self.store.get_or_create(&key, num_actions)?;
            regret_match(cell.regret())
        };

        let mut child_utils = Vec::with_capacity(num_actions);
        for (i, &child) in node.children.iter().enumerate() {
            let (r0, r1) = if p == 0 { (reach0 * strategy[i], reach1) } else { (reach0, reach1 * strategy[i]) };
            child_utils.push(self.traverse(child, pairing_idx, r0, r1, t)?);
        }
        let node_util: Utility = strategy.iter().zip(&child_utils).map(|(s, u)| s * u).sum();

        let opponent_reach = if p == 0 { reach1 } else { reach0 };
        let own_reach = if p == 0 { reach0 } else { reach1 };
        let sign = if p == 0 { 1.0 } else { -1.0 };
        let discount = Discount::default();

        let cell = self.store.get_or_create(&key, num_actions)?;
        for i in 0..num_actions {
            let updated_regret = cell.regret()[i] + sign * (child_utils[i] - node_util) * opponent_reach;
            cell.set_regret(i, discount.discount_regret(t, updated_regret));

            let contribution = strategy[i] * own_reach;
            let blended = discount.blend_cum_strategy(t, cell.strategy_sum()[i], contribution);
            cell.set_strategy_sum(i, blended);
        }

        Ok(node_util)
    }
}

fn infoset_key(node_id: usize, hole: Hole, board: &Board) -> String {
    format!("{node_id}|{}|{}", hole.canonical(), board.canonical())
}

/// `+pot/2` if P0 wins, `-pot/2` if P1 wins, `0` on a tie (§4.11).
fn evaluate_showdown(cards0: Hole, cards1: Hole, board: &Board, pot: Chips) -> Utility {
    let mut hand0 = Vec::from(cards0);
    hand0.extend(board.cards().iter().copied());
    let mut hand1 = Vec::from(cards1);
    hand1.extend(board.cards().iter().copied());

    let s0 = Strength::from(Hand::from(hand0));
    let s1 = Strength::from(Hand::from(hand1));
    match s0.cmp(&s1) {
        std::cmp::Ordering::Greater => pot as Utility / 2.0,
        std::cmp::Ordering::Less => -(pot as Utility) / 2.0,
        std::cmp::Ordering::Equal => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, Rank, Suit};
    use crate::solver::tree::{build, TreeConfig};

    fn toy_tree() -> GameTree {
        // check/check to showdown, or bet/fold, matching §8 scenario 5's
        // two-action toy subtree shape closely enough to exercise discounting.
        let config = TreeConfig { bet_sizes: vec![1.0], raise_sizes: vec![], max_raises: 1 };
        build(100, 500, 500, &config)
    }

    fn pairing() -> HandPairing {
        HandPairing {
            cards0: Hole::new(Card::new(Rank::Ace, Suit::Spade), Card::new(Rank::Ace, Suit::Heart)),
            cards1: Hole::new(Card::new(Rank::King, Suit::Spade), Card::new(Rank::King, Suit::Heart)),
            weight: 1.0,
        }
    }

    fn board() -> Board {
        Board::from(vec![
            Card::new(Rank::Two, Suit::Club),
            Card::new(Rank::Seven, Suit::Diamond),
            Card::new(Rank::Nine, Suit::Club),
            Card::new(Rank::Jack, Suit::Spade),
            Card::new(Rank::Four, Suit::Heart),
        ])
    }

    #[test]
    fn stepping_increments_iteration_count_and_populates_infosets() {
        let mut trainer = Trainer::new(toy_tree(), board(), vec![pairing()]);
        trainer.step(10).unwrap();
        assert_eq!(trainer.iterations_done(), 10);
        assert!(trainer.infosets_trained() > 0);
    }

    #[test]
    fn average_strategy_sums_to_one_for_a_trained_infoset() {
        let mut trainer = Trainer::new(toy_tree(), board(), vec![pairing()]);
        trainer.step(50).unwrap();
        let root = trainer.tree().root;
        let hole = trainer.pairings[0].cards0;
        let strategy = trainer.strategy_at(root, hole).unwrap();
        let total: Probability = strategy.iter().sum();
        assert!((total - 1.0).abs() < 1e-6);
    }
}
