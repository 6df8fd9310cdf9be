//! Structured error codes (§7). Every fallible boundary in this crate
//! returns `Result<T, GameError>`; only the CLI binaries convert to
//! `anyhow::Error` with added context.

use std::fmt;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GameError {
    pub code: ErrorCode,
    pub field: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ErrorCode {
    InvalidChipAmount,
    InvalidAmount,
    InvalidConfig,
    PlayerNotFound,
    WrongPlayer,
    PlayerNotActive,
    IllegalActionType,
    InvalidCallAmount,
    InvalidRaiseAmount,
    InsufficientFunds,
    GameNotOver,
    NotAtShowdown,
    BoardIncomplete,
    InfosetSizeMismatch,
}

impl GameError {
    fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            field: None,
            message: message.into(),
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn invalid_chip_amount(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidChipAmount, message)
    }
    pub fn invalid_amount(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidAmount, message)
    }
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidConfig, message)
    }
    pub fn player_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PlayerNotFound, message)
    }
    pub fn wrong_player(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::WrongPlayer, message)
    }
    pub fn player_not_active(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PlayerNotActive, message)
    }
    pub fn illegal_action_type(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::IllegalActionType, message)
    }
    pub fn invalid_call_amount(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidCallAmount, message)
    }
    pub fn invalid_raise_amount(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRaiseAmount, message)
    }
    pub fn insufficient_funds(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InsufficientFunds, message)
    }
    pub fn game_not_over(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::GameNotOver, message)
    }
    pub fn not_at_showdown(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotAtShowdown, message)
    }
    pub fn board_incomplete(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BoardIncomplete, message)
    }
    pub fn infoset_size_mismatch(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InfosetSizeMismatch, message)
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for GameError {}
