//! River subgame solver demo: builds a tree from a board and two ranges,
//! trains a discounted-CFR strategy, then prints an average strategy and the
//! resulting exploitability.

use clap::Parser;
use river_holdem_toolkit::cards::{Board, Card, Hole};
use river_holdem_toolkit::range::{parse_range_text, HandClass, Range};
use river_holdem_toolkit::solver::{
    build_tree, compute_exploitability, ExploitabilityConfig, HandPairing, Trainer, TreeConfig,
};
use river_holdem_toolkit::Chips;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Parser)]
struct Args {
    /// Five board cards, e.g. "2c 7d 9c Js 4h".
    #[arg(long)]
    board: String,

    /// Range text for the player acting first in the built tree (§6).
    #[arg(long)]
    range0: String,

    /// Range text for the second player.
    #[arg(long)]
    range1: String,

    /// Pot already in the middle before the subgame starts.
    #[arg(long, default_value_t = 100)]
    pot: Chips,

    /// Remaining stack behind for each player.
    #[arg(long, default_value_t = 500)]
    stack: Chips,

    /// Total DCFR iterations to run.
    #[arg(long, default_value_t = 1000)]
    iterations: usize,

    /// Iterations per progress-bar tick.
    #[arg(long, default_value_t = 100)]
    chunk: usize,

    /// Optional JSON file overriding the bet/raise-size tree configuration.
    #[arg(long)]
    tree_config: Option<PathBuf>,

    /// Hand class (e.g. "AKs") to print the root-node average strategy for.
    #[arg(long, default_value = "AA")]
    report_class: String,
}

fn default_tree_config() -> TreeConfig {
    TreeConfig { bet_sizes: vec![0.5, 1.0], raise_sizes: vec![1.0], max_raises: 2 }
}

fn main() -> anyhow::Result<()> {
    river_holdem_toolkit::init();
    let args = Args::parse();

    let board_cards: Vec<Card> =
        args.board.split_whitespace().map(Card::from_str).collect::<Result<_, _>>()?;
    let board = Board::from(board_cards.clone());

    let range0 = parse_range_text(&args.range0, &board_cards, &[])?;
    let range1 = parse_range_text(&args.range1, &board_cards, &[])?;

    let config = match &args.tree_config {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => default_tree_config(),
    };

    let tree = build_tree(args.pot, args.stack, args.stack, &config);
    let pairings = enumerate_pairings(&range0, &range1, &board_cards);
    log::info!("training on {} hand pairings", pairings.len());
    let mut trainer = Trainer::new(tree, board, pairings);

    let bar = river_holdem_toolkit::progress(args.iterations);
    let mut done = 0;
    while done < args.iterations {
        let step = args.chunk.min(args.iterations - done);
        trainer.step(step)?;
        done += step;
        bar.set_position(done as u64);
    }
    bar.finish_and_clear();
    log::info!("trained {} infosets over {} iterations", trainer.infosets_trained(), trainer.iterations_done());

    let report_class: HandClass =
        args.report_class.parse().map_err(|_| anyhow::anyhow!("invalid hand class: {}", args.report_class))?;
    print_strategy(&trainer, report_class);

    let exploitability = compute_exploitability(&trainer, &range0, &range1, args.pot, &ExploitabilityConfig::default());
    println!(
        "exploitability: {:.4} (p0 ev {:.2}, p1 ev {:.2}, converged={})",
        exploitability.total_pct, exploitability.ev0, exploitability.ev1, exploitability.converged
    );
    Ok(())
}

/// Pairs every live combo of `range0` against every live combo of `range1`
/// that doesn't collide with the board or with the first player's combo,
/// weighted by the product of both ranges' per-class weights.
fn enumerate_pairings(range0: &Range, range1: &Range, board: &[Card]) -> Vec<HandPairing> {
    let combos0 = enumerate_combos(range0, board);
    let mut pairings = Vec::new();
    for (hole0, w0) in &combos0 {
        let mut dead = board.to_vec();
        dead.extend(hole0.cards());
        for (hole1, w1) in enumerate_combos(range1, &dead) {
            pairings.push(HandPairing { cards0: *hole0, cards1: hole1, weight: w0 * w1 });
        }
    }
    pairings
}

fn enumerate_combos(range: &Range, dead: &[Card]) -> Vec<(Hole, f64)> {
    use river_holdem_toolkit::cards::Suit;
    const SUITS: [Suit; 4] = [Suit::Club, Suit::Diamond, Suit::Heart, Suit::Spade];

    let mut out = Vec::new();
    for (class, weight) in range.classes() {
        if weight <= 0.0 {
            continue;
        }
        let combos: Vec<(Card, Card)> = match class {
            HandClass::Pair(r) => {
                let mut combos = Vec::new();
                for i in 0..4 {
                    for j in (i + 1)..4 {
                        combos.push((Card::new(r, SUITS[i]), Card::new(r, SUITS[j])));
                    }
                }
                combos
            }
            HandClass::Suited(hi, lo) => SUITS.iter().map(|&s| (Card::new(hi, s), Card::new(lo, s))).collect(),
            HandClass::Offsuit(hi, lo) => {
                let mut combos = Vec::new();
                for &a in &SUITS {
                    for &b in &SUITS {
                        if a != b {
                            combos.push((Card::new(hi, a), Card::new(lo, b)));
                        }
                    }
                }
                combos
            }
        };
        for (a, b) in combos {
            if dead.contains(&a) || dead.contains(&b) {
                continue;
            }
            out.push((Hole::new(a, b), weight));
        }
    }
    out
}

fn print_strategy(trainer: &Trainer, class: HandClass) {
    let combos = enumerate_combos(&{
        let mut r = Range::empty();
        r.set_weight(class, 1.0);
        r
    }, trainer.board().cards());
    let Some((hole, _)) = combos.first() else {
        println!("no live combo for {class} given this board");
        return;
    };
    let root = trainer.tree().root;
    match trainer.strategy_at(root, *hole) {
        Some(strategy) => {
            let node = trainer.tree().node(root);
            for (action, prob) in node.actions.iter().zip(strategy) {
                println!("{class} root {}: {:.4}", action.label(), prob);
            }
        }
        None => println!("{class} was never visited at the root during training"),
    }
}
