use crate::Chips;
use std::collections::BTreeSet;

/// A main or side pot: an amount and the player ids still eligible to win it
/// (§3 Pot; §4.4 `resolveSidePots`).
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Pot {
    pub amount: Chips,
    pub eligible: BTreeSet<String>,
}

impl Pot {
    pub fn new(amount: Chips, eligible: BTreeSet<String>) -> Self {
        Self { amount, eligible }
    }
}
