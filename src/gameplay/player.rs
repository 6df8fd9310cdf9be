use crate::cards::Hole;
use crate::Chips;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PlayerStatus {
    Active,
    Folded,
    AllIn,
    SittingOut,
}

/// One seat's full state for the current hand (§3 Player).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Player {
    pub id: String,
    pub seat: u8,
    pub name: String,
    pub stack: Chips,
    pub bet: Chips,
    pub total_bet: Chips,
    pub status: PlayerStatus,
    pub hole: Option<Hole>,
    pub has_acted: bool,
    pub acted_on_street: bool,
    pub start_hand_stack: Chips,
}

impl Player {
    pub fn new(id: impl Into<String>, seat: u8, stack: Chips) -> Self {
        Self {
            id: id.into(),
            seat,
            name: String::new(),
            stack,
            bet: 0,
            total_bet: 0,
            status: PlayerStatus::Active,
            hole: None,
            has_acted: false,
            acted_on_street: false,
            start_hand_stack: stack,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == PlayerStatus::Active
    }
    pub fn is_in_hand(&self) -> bool {
        matches!(self.status, PlayerStatus::Active | PlayerStatus::AllIn)
    }
    pub fn is_folded(&self) -> bool {
        self.status == PlayerStatus::Folded
    }

    /// Moves `amount` from stack into the player's current-street bet,
    /// marking all-in if the stack is exhausted.
    pub fn commit(&mut self, amount: Chips) {
        self.stack -= amount;
        self.bet += amount;
        self.total_bet += amount;
        self.has_acted = true;
        self.acted_on_street = true;
        if self.stack == 0 && self.status == PlayerStatus::Active {
            self.status = PlayerStatus::AllIn;
        }
    }

    pub fn reset_for_street(&mut self) {
        self.bet = 0;
        self.has_acted = false;
        self.acted_on_street = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_moves_chips_and_marks_all_in() {
        let mut p = Player::new("p1", 0, 50);
        p.commit(50);
        assert_eq!(p.stack, 0);
        assert_eq!(p.bet, 50);
        assert_eq!(p.status, PlayerStatus::AllIn);
    }

    #[test]
    fn commit_leaves_active_when_stack_remains() {
        let mut p = Player::new("p1", 0, 100);
        p.commit(20);
        assert_eq!(p.status, PlayerStatus::Active);
    }
}
