//! Heads-up river DCFR solver: game-tree construction (§4.10), regret
//! matching and discounted updates (§4.9, §4.11), and best-response
//! exploitability (§4.12).

pub mod bestresponse;
pub mod cfr;
pub mod discount;
pub mod infoset;
pub mod tree;

pub use bestresponse::{compute as compute_exploitability, Exploitability, ExploitabilityConfig};
pub use cfr::{HandPairing, Trainer};
pub use discount::Discount;
pub use infoset::{average_strategy, regret_match, InfosetStore};
pub use tree::{build as build_tree, CFRNode, GameTree, TreeAction, TreeConfig};
