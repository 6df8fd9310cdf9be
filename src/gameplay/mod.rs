pub mod action;
pub mod config;
pub mod engine;
pub mod factory;
pub mod player;
pub mod pot;
pub mod rules;
pub mod showdown;
pub mod state;

pub use action::{Action, ActionType};
pub use config::{HandConfig, TableConfig};
pub use engine::{apply, prepare_next_hand};
pub use factory::{create_initial_state, create_initial_state_seeded, ScenarioConfig, ScenarioPlayer};
pub use player::{Player, PlayerStatus};
pub use pot::Pot;
pub use rules::{legal_actions, LegalAction};
pub use state::{GameState, Winner};
