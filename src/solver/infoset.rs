//! Flat numeric infoset storage (§3, §4.9). One contiguous buffer per key:
//! first half regret sums, second half cumulative strategy sums, indexed
//! `action` directly rather than `action·numHands + hand` — this solver
//! trains one hand pairing per traversal rather than a whole range at once,
//! so the per-hand axis collapses and the buffer is just `2·numActions`
//! long, matching §3's literal cell shape.

use crate::error::GameError;
use crate::{Probability, Utility, POLICY_MIN};
use std::collections::HashMap;

pub struct Cell {
    num_actions: usize,
    regret: Vec<Utility>,
    strategy_sum: Vec<Utility>,
}

impl Cell {
    fn zeroed(num_actions: usize) -> Self {
        Self { num_actions, regret: vec![0.0; num_actions], strategy_sum: vec![0.0; num_actions] }
    }

    pub fn regret(&self) -> &[Utility] {
        &self.regret
    }

    pub fn strategy_sum(&self) -> &[Utility] {
        &self.strategy_sum
    }

    pub fn set_regret(&mut self, i: usize, value: Utility) {
        self.regret[i] = value;
    }

    pub fn set_strategy_sum(&mut self, i: usize, value: Utility) {
        self.strategy_sum[i] = value;
    }
}

#[derive(Default)]
pub struct InfosetStore {
    cells: HashMap<String, Cell>,
}

impl InfosetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Lazily creates a zeroed cell on first reference; a later reference
    /// to the same key with a different `numActions` is `INFOSET_SIZE_MISMATCH`.
    pub fn get_or_create(&mut self, key: &str, num_actions: usize) -> Result<&mut Cell, GameError> {
        if let Some(cell) = self.cells.get(key) {
            if cell.num_actions != num_actions {
                return Err(GameError::infoset_size_mismatch(format!(
                    "infoset {key} was created with {} actions, referenced with {num_actions}",
                    cell.num_actions
                )));
            }
        } else {
            self.cells.insert(key.to_string(), Cell::zeroed(num_actions));
        }
        Ok(self.cells.get_mut(key).expect("just inserted or present"))
    }

    pub fn get(&self, key: &str) -> Option<&Cell> {
        self.cells.get(key)
    }
}

/// `r+[i] = max(0, regret[i])`; normalize by their sum, or uniform if the
/// sum is zero (§4.9).
pub fn regret_match(regret: &[Utility]) -> Vec<Probability> {
    let positive: Vec<Utility> = regret.iter().map(|&r| r.max(0.0)).collect();
    let sum: Utility = positive.iter().sum();
    if sum > 0.0 {
        positive.iter().map(|&r| (r / sum).max(POLICY_MIN)).collect()
    } else {
        vec![1.0 / regret.len() as Probability; regret.len()]
    }
}

/// `avg[i] = cumStrategy[i] / sum`; uniform if the sum is zero (§4.9).
pub fn average_strategy(strategy_sum: &[Utility]) -> Vec<Probability> {
    let sum: Utility = strategy_sum.iter().sum();
    if sum > 0.0 {
        strategy_sum.iter().map(|&s| s / sum).collect()
    } else {
        vec![1.0 / strategy_sum.len() as Probability; strategy_sum.len()]
    }
}
