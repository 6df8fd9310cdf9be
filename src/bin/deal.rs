//! Scenario runner: deals (or loads) a hand, plays it to showdown with a
//! scripted or random action sequence, and prints the winners.

use clap::Parser;
use river_holdem_toolkit::gameplay::{
    self, Action, ActionType, GameState, HandConfig, ScenarioConfig, TableConfig,
};
use river_holdem_toolkit::rng::Rng;
use river_holdem_toolkit::{Chips, DEFAULT_BIG_BLIND, DEFAULT_SMALL_BLIND, DEFAULT_STACK};
use std::path::PathBuf;

#[derive(Parser)]
struct Args {
    /// JSON file containing a `DealRequest` (`hand` plus optional `scenario`).
    /// When omitted, a default two-handed table is dealt from scratch.
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Number of hands to play out. Each subsequent hand carries the table's
    /// stacks and dealer rotation forward via `prepare_next_hand`.
    #[arg(long, default_value_t = 1)]
    hands: usize,

    /// Seed for the deal/shuffle RNG.
    #[arg(long, default_value_t = 1)]
    seed: u64,
}

#[derive(serde::Deserialize)]
struct DealRequest {
    hand: HandConfig,
    scenario: Option<ScenarioConfig>,
}

fn main() -> anyhow::Result<()> {
    river_holdem_toolkit::init();
    let args = Args::parse();

    let (hand, scenario) = match &args.scenario {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            let request: DealRequest = serde_json::from_str(&text)?;
            (request.hand, request.scenario)
        }
        None => (default_hand(), None),
    };

    let mut state = gameplay::create_initial_state_seeded(hand, scenario, args.seed)?;
    for hand_no in 1..=args.hands {
        log::info!("playing hand {hand_no}");
        state = play_to_showdown(state)?;
        print_winners(&state);
        if hand_no < args.hands {
            state = gameplay::prepare_next_hand(&state)?;
        }
    }
    Ok(())
}

fn default_hand() -> HandConfig {
    HandConfig {
        table: TableConfig {
            max_seats: 2,
            small_blind: DEFAULT_SMALL_BLIND,
            big_blind: DEFAULT_BIG_BLIND,
            ante: 0,
            starting_stack: DEFAULT_STACK,
        },
        dealer_seat: 0,
        seats: vec![0, 1],
    }
}

/// Plays out a hand by always taking the cheapest non-folding legal action
/// (check if free, otherwise call), which is enough to reach a showdown or a
/// lone survivor deterministically without real strategy.
fn play_to_showdown(mut state: GameState) -> anyhow::Result<GameState> {
    let mut rng = Rng::new(state.dealer_seat as u64 + 1);
    while state.winners.is_none() {
        let Some(seat) = state.action_seat else {
            break;
        };
        let player = state
            .player_at(seat)
            .ok_or_else(|| anyhow::anyhow!("no player at seat {seat}"))?;
        let legal = gameplay::legal_actions(&state);
        let choice = legal
            .iter()
            .find(|a| a.kind == ActionType::Check)
            .or_else(|| legal.iter().find(|a| a.kind == ActionType::Call))
            .or_else(|| legal.first())
            .ok_or_else(|| anyhow::anyhow!("no legal action for seat {seat}"))?;
        let amount: Chips = choice.min_amount;
        let action = Action::new(state.street, player.id.clone(), choice.kind, amount);
        let (roll, next) = rng.next();
        rng = next;
        log::debug!("roll {roll:.3} seat {seat} action {action}");
        state = gameplay::apply(&state, &action)?;
    }
    Ok(state)
}

fn print_winners(state: &GameState) {
    match &state.winners {
        Some(winners) => {
            for w in winners {
                println!("{}: +{} ({})", w.player_id, w.amount, w.hand_rank);
            }
        }
        None => println!("hand did not reach a resolution"),
    }
}
