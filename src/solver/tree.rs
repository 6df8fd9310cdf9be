//! Heads-up river game tree (§4.10). Built once from a live `GameState` and
//! a betting configuration; CFR then traverses this arena many times.
//!
//! `pot` on every node is the amount already matched by both players —
//! an outstanding, not-yet-called bet is tracked separately as `facing_bet`
//! and is folded into `pot` only once it is actually called. This keeps a
//! single, consistent meaning for "pot" everywhere in this module, which the
//! prose description of the builder conflates in a couple of spots.

use crate::Chips;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TreeAction {
    Check,
    Bet(Chips),
    Call(Chips),
    Fold,
    Raise(Chips),
}

impl TreeAction {
    pub fn label(&self) -> String {
        match self {
            TreeAction::Check => "check".to_string(),
            TreeAction::Bet(a) => format!("bet {a}"),
            TreeAction::Call(a) => format!("call {a}"),
            TreeAction::Fold => "fold".to_string(),
            TreeAction::Raise(a) => format!("raise {a}"),
        }
    }
}

/// One node in the arena. `player_to_act` is `0`/`1`, or `-1` at a terminal.
#[derive(Debug, Clone)]
pub struct CFRNode {
    pub id: usize,
    pub player_to_act: i8,
    pub actions: Vec<TreeAction>,
    pub children: Vec<usize>,
    pub is_terminal: bool,
    /// `Some(p0_utility)` for a fixed-value terminal (a fold); `None` means
    /// "evaluate by showdown at CFR runtime", the spec's sentinel-0 payoff
    /// made explicit instead of magic-numbered.
    pub payoff: Option<f64>,
    /// Pot contested at a showdown terminal, or the matched pot carried
    /// through an action node.
    pub pot: Chips,
}

#[derive(Debug, Clone)]
pub struct GameTree {
    pub nodes: Vec<CFRNode>,
    pub root: usize,
}

impl GameTree {
    pub fn node(&self, idx: usize) -> &CFRNode {
        &self.nodes[idx]
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TreeConfig {
    /// opening-bet sizes as a fraction of `pot`.
    pub bet_sizes: Vec<f64>,
    /// raise sizes as a fraction of `pot + facingBet`.
    pub raise_sizes: Vec<f64>,
    pub max_raises: usize,
}

struct Builder<'a> {
    nodes: Vec<CFRNode>,
    config: &'a TreeConfig,
}

impl<'a> Builder<'a> {
    fn push(&mut self, player_to_act: i8, actions: Vec<TreeAction>, is_terminal: bool, payoff: Option<f64>, pot: Chips) -> usize {
        let id = self.nodes.len();
        self.nodes.push(CFRNode { id, player_to_act, actions, children: Vec::new(), is_terminal, payoff, pot });
        id
    }

    /// `pot`: already matched. `facing_bet`: 0 if nobody owes a call.
    fn create_node(&mut self, pot: Chips, stack0: Chips, stack1: Chips, to_act: i8, facing_bet: Chips, raises_remaining: usize) -> usize {
        if facing_bet == 0 {
            self.create_open_node(pot, stack0, stack1, to_act, raises_remaining)
        } else {
            self.create_facing_node(pot, stack0, stack1, to_act, facing_bet, raises_remaining)
        }
    }

    fn acting_stack(stack0: Chips, stack1: Chips, to_act: i8) -> Chips {
        if to_act == 0 { stack0 } else { stack1 }
    }

    fn create_open_node(&mut self, pot: Chips, stack0: Chips, stack1: Chips, to_act: i8, raises_remaining: usize) -> usize {
        let mut actions = vec![TreeAction::Check];
        let mut amounts = Vec::new();

        let own_stack = Self::acting_stack(stack0, stack1, to_act);
        if own_stack > 0 && raises_remaining > 0 {
            for &f in &self.config.bet_sizes {
                let amount = ((pot as f64 * f).floor() as Chips).min(own_stack);
                if amount > 0 && !amounts.contains(&amount) {
                    amounts.push(amount);
                }
            }
            if own_stack > 0 && !amounts.contains(&own_stack) {
                amounts.push(own_stack);
            }
        }
        for &amount in &amounts {
            actions.push(TreeAction::Bet(amount));
        }

        let id = self.push(to_act, Vec::new(), false, None, pot);

        let mut children = Vec::with_capacity(actions.len());
        // check: other player acts at the same pot, still not facing a bet;
        // if IP (player 1) checks it back, the street (and subgame) ends.
        if to_act == 0 {
            children.push(self.create_node(pot, stack0, stack1, 1, 0, raises_remaining));
        } else {
            children.push(self.push(-1, Vec::new(), true, None, pot));
        }

        for &amount in &amounts {
            let (next_stack0, next_stack1) = if to_act == 0 { (stack0 - amount, stack1) } else { (stack0, stack1 - amount) };
            let child = self.create_node(pot, next_stack0, next_stack1, 1 - to_act, amount, raises_remaining.saturating_sub(1));
            children.push(child);
        }

        self.nodes[id].actions = actions;
        self.nodes[id].children = children;
        id
    }

    fn create_facing_node(&mut self, pot: Chips, stack0: Chips, stack1: Chips, to_act: i8, facing_bet: Chips, raises_remaining: usize) -> usize {
        let own_stack = Self::acting_stack(stack0, stack1, to_act);
        let call_amount = facing_bet.min(own_stack);

        let mut actions = vec![TreeAction::Fold, TreeAction::Call(call_amount)];
        let mut raise_amounts = Vec::new();
        if raises_remaining > 0 && own_stack > call_amount {
            for &f in &self.config.raise_sizes {
                let raised_to = (((pot + facing_bet) as f64 * f).floor() as Chips) + facing_bet;
                let amount = raised_to.min(own_stack);
                if amount > call_amount && !raise_amounts.contains(&amount) {
                    raise_amounts.push(amount);
                }
            }
            if own_stack > call_amount && !raise_amounts.contains(&own_stack) {
                raise_amounts.push(own_stack);
            }
        }
        for &amount in &raise_amounts {
            actions.push(TreeAction::Raise(amount));
        }

        let id = self.push(to_act, Vec::new(), false, None, pot);
        let mut children = Vec::with_capacity(actions.len());

        // fold: the pot that was already matched (before this bet) splits
        // zero-sum; the uncalled bet simply returns to its owner.
        let fold_payoff = if to_act == 0 { -(pot as f64) / 2.0 } else { (pot as f64) / 2.0 };
        children.push(self.push(-1, Vec::new(), true, Some(fold_payoff), pot));

        // call: both sides' contributions for this increment are now matched.
        let called_pot = pot + 2 * call_amount;
        children.push(self.push(-1, Vec::new(), true, None, called_pot));

        for &amount in &raise_amounts {
            let (next_stack0, next_stack1) = if to_act == 0 { (stack0 - amount, stack1) } else { (stack0, stack1 - amount) };
            let new_pot = pot + 2 * facing_bet;
            let new_facing = amount - facing_bet;
            let child = self.create_node(new_pot, next_stack0, next_stack1, 1 - to_act, new_facing, raises_remaining.saturating_sub(1));
            children.push(child);
        }

        self.nodes[id].actions = actions;
        self.nodes[id].children = children;
        id
    }
}

/// Builds the heads-up river tree. Player 0 = OOP (non-dealer), player 1 =
/// IP (dealer). `pot` is the sum of collected pots plus both players'
/// current-street bets; `stack0`/`stack1` are chips behind.
pub fn build(pot: Chips, stack0: Chips, stack1: Chips, config: &TreeConfig) -> GameTree {
    let mut builder = Builder { nodes: Vec::new(), config };
    let root = builder.create_node(pot, stack0, stack1, 0, 0, config.max_raises);
    GameTree { nodes: builder.nodes, root }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> TreeConfig {
        TreeConfig { bet_sizes: vec![0.5, 1.0], raise_sizes: vec![1.0], max_raises: 2 }
    }

    #[test]
    fn root_is_an_open_action_node_for_player_zero() {
        let tree = build(100, 500, 500, &config());
        let root = tree.node(tree.root);
        assert_eq!(root.player_to_act, 0);
        assert!(!root.is_terminal);
        assert!(root.actions.contains(&TreeAction::Check));
    }

    #[test]
    fn checking_twice_reaches_a_showdown_terminal() {
        let tree = build(100, 500, 500, &config());
        let root = tree.node(tree.root);
        let check_child = root.children[0];
        let node = tree.node(check_child);
        assert_eq!(node.player_to_act, 1);
        let check_again = node.children[0];
        let terminal = tree.node(check_again);
        assert!(terminal.is_terminal);
        assert_eq!(terminal.payoff, None);
        assert_eq!(terminal.pot, 100);
    }

    #[test]
    fn betting_then_folding_refunds_the_bet() {
        let tree = build(100, 500, 500, &config());
        let root = tree.node(tree.root);
        let bet_idx = root.actions.iter().position(|a| matches!(a, TreeAction::Bet(_))).unwrap();
        let after_bet = tree.node(root.children[bet_idx]);
        assert_eq!(after_bet.player_to_act, 1);
        let fold_idx = after_bet.actions.iter().position(|a| matches!(a, TreeAction::Fold)).unwrap();
        let fold_terminal = tree.node(after_bet.children[fold_idx]);
        assert!(fold_terminal.is_terminal);
        assert_eq!(fold_terminal.payoff, Some(-50.0));
    }

    #[test]
    fn all_in_bet_is_always_offered_once_stack_allows() {
        let tree = build(10, 3, 500, &config());
        let root = tree.node(tree.root);
        assert!(root.actions.iter().any(|a| matches!(a, TreeAction::Bet(3))));
    }
}
