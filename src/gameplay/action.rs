use crate::cards::Street;
use crate::Chips;

/// The type of an action, independent of amount (§3 ActionType).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ActionType {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
    NextHand,
}

/// An action submitted by the host on behalf of a seat (§6 Action object).
/// `amount` is always a delta (chips added by this action), never a total.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Action {
    pub street: Street,
    pub player_id: String,
    pub kind: ActionType,
    pub amount: Chips,
    pub is_all_in: bool,
}

impl Action {
    pub fn new(street: Street, player_id: impl Into<String>, kind: ActionType, amount: Chips) -> Self {
        Self { street, player_id: player_id.into(), kind, amount, is_all_in: false }
    }

    pub fn all_in(mut self) -> Self {
        self.is_all_in = true;
        self
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} {:?} {}", self.player_id, self.kind, self.amount)
    }
}
