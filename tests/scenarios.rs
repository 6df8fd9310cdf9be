//! End-to-end scenarios exercising the engine, evaluator, and solver against
//! concrete, hand-checked inputs and outputs.

use river_holdem_toolkit::cards::{Board, Card, Hand, Rank, Strength, Street, Suit};
use river_holdem_toolkit::gameplay::{
    self, Action, ActionType, HandConfig, ScenarioConfig, ScenarioPlayer, TableConfig,
};
use river_holdem_toolkit::range::HandClass;
use river_holdem_toolkit::solver::{
    build_tree, infoset::average_strategy, infoset::regret_match, HandPairing, Trainer, TreeConfig,
};
use river_holdem_toolkit::Arbitrary;

fn heads_up_table(small_blind: i64, big_blind: i64) -> TableConfig {
    TableConfig { max_seats: 2, small_blind, big_blind, ante: 0, starting_stack: 1000 }
}

#[test]
fn uncalled_bet_is_returned_after_a_heads_up_all_in_runout() {
    let hand = HandConfig { table: heads_up_table(5, 10), dealer_seat: 0, seats: vec![0, 1] };
    let scenario = ScenarioConfig {
        start_street: Street::Preflop,
        initial_pot: 0,
        board_cards: vec![],
        dead_cards: vec![],
        players: vec![
            ScenarioPlayer { seat: 0, stack: Some(1000), cards: None },
            ScenarioPlayer { seat: 1, stack: Some(280), cards: None },
        ],
    };
    let mut state = gameplay::create_initial_state(hand, Some(scenario)).unwrap();
    assert_eq!(state.action_seat, Some(0));

    let p0 = state.player_by_id("p0").unwrap().id.clone();
    let raise = Action::new(state.street, p0, ActionType::Raise, 995).all_in();
    state = gameplay::apply(&state, &raise).unwrap();

    let p1 = state.player_by_id("p1").unwrap().id.clone();
    let call = Action::new(state.street, p1, ActionType::Call, 270).all_in();
    state = gameplay::apply(&state, &call).unwrap();

    assert_eq!(state.street, Street::Showdown);
    let winners = state.winners.as_ref().unwrap();
    assert!(!winners.is_empty());
    assert_eq!(state.sum_chips(), 1280);
    assert!(state.player_by_id("p0").unwrap().stack >= 720);
}

#[test]
fn short_all_in_raise_does_not_reopen_the_betting_round() {
    let table = TableConfig { max_seats: 3, small_blind: 10, big_blind: 20, ante: 0, starting_stack: 1000 };
    let hand = HandConfig {
        table,
        dealer_seat: 0,
        seats: vec![0, 1, 2],
    };
    let scenario = ScenarioConfig {
        start_street: Street::Preflop,
        initial_pot: 0,
        board_cards: vec![],
        dead_cards: vec![],
        players: vec![
            ScenarioPlayer { seat: 0, stack: Some(1000), cards: None },
            ScenarioPlayer { seat: 1, stack: Some(1000), cards: None },
            ScenarioPlayer { seat: 2, stack: Some(210), cards: None },
        ],
    };
    let mut state = gameplay::create_initial_state(hand, Some(scenario)).unwrap();

    // 3-handed, dealer=0: SB=seat1, BB=seat2, UTG (seat0) acts first.
    let a = state.player_by_id("p0").unwrap().id.clone();
    state = gameplay::apply(&state, &Action::new(state.street, a, ActionType::Raise, 100)).unwrap();

    let b = state.player_by_id("p1").unwrap().id.clone();
    state = gameplay::apply(&state, &Action::new(state.street, b, ActionType::Raise, 190)).unwrap();

    let c = state.player_by_id("p2").unwrap().id.clone();
    state = gameplay::apply(&state, &Action::new(state.street, c, ActionType::Raise, 190).all_in()).unwrap();
    assert!(!state.last_raise_is_full);

    let legal = gameplay::legal_actions(&state);
    assert!(legal.iter().any(|l| l.kind == ActionType::Call));
    assert!(legal.iter().any(|l| l.kind == ActionType::Fold));
    assert!(!legal.iter().any(|l| l.kind == ActionType::Raise));
}

#[test]
fn three_way_tie_splits_odd_chips_nearest_dealer_first() {
    let table = TableConfig { max_seats: 4, small_blind: 5, big_blind: 10, ante: 0, starting_stack: 1000 };
    let hand = HandConfig { table, dealer_seat: 0, seats: vec![0, 1, 2, 3] };
    let board = vec![
        Card::new(Rank::Two, Suit::Club),
        Card::new(Rank::Seven, Suit::Diamond),
        Card::new(Rank::Nine, Suit::Club),
        Card::new(Rank::Jack, Suit::Spade),
        Card::new(Rank::Four, Suit::Heart),
    ];
    let scenario = ScenarioConfig {
        start_street: Street::River,
        initial_pot: 100,
        board_cards: board,
        dead_cards: vec![],
        players: vec![
            ScenarioPlayer {
                seat: 1,
                stack: None,
                cards: Some((Card::new(Rank::Ace, Suit::Spade), Card::new(Rank::King, Suit::Heart))),
            },
            ScenarioPlayer {
                seat: 2,
                stack: None,
                cards: Some((Card::new(Rank::Ace, Suit::Club), Card::new(Rank::King, Suit::Diamond))),
            },
            ScenarioPlayer {
                seat: 3,
                stack: None,
                cards: Some((Card::new(Rank::Ace, Suit::Diamond), Card::new(Rank::King, Suit::Club))),
            },
        ],
    };
    let state = gameplay::create_initial_state(hand, Some(scenario)).unwrap();
    let state = {
        // fold the dealer (seat 0, dealt no cards) out before showdown.
        let mut s = state;
        s.players.retain(|p| p.seat != 0);
        s.pots = vec![gameplay::Pot::new(
            100,
            s.players.iter().map(|p| p.id.clone()).collect(),
        )];
        s
    };
    let state = gameplay::showdown::resolve_showdown(state);

    let winners = state.winners.unwrap();
    assert_eq!(winners.len(), 3);
    let amount = |id: &str| winners.iter().find(|w| w.player_id == id).unwrap().amount;
    assert_eq!(amount("p1"), 34);
    assert_eq!(amount("p2"), 33);
    assert_eq!(amount("p3"), 33);
    assert_eq!(winners.iter().map(|w| w.amount).sum::<i64>(), 100);
}

#[test]
fn two_pair_beats_two_pair_on_the_same_board_by_top_pair_rank() {
    let board = [
        Card::new(Rank::King, Suit::Spade),
        Card::new(Rank::Ten, Suit::Diamond),
        Card::new(Rank::Two, Suit::Club),
        Card::new(Rank::Five, Suit::Spade),
        Card::new(Rank::Two, Suit::Heart),
    ];

    let mut hero = vec![Card::new(Rank::Ten, Suit::Spade), Card::new(Rank::Nine, Suit::Spade)];
    hero.extend(board);
    let hero_strength = Strength::from(Hand::from(hero));

    let mut villain = vec![Card::new(Rank::Ace, Suit::Spade), Card::new(Rank::King, Suit::Heart)];
    villain.extend(board);
    let villain_strength = Strength::from(Hand::from(villain));

    assert!(villain_strength > hero_strength, "kings-and-twos should beat tens-and-twos");
}

#[test]
fn dcfr_converges_to_folding_on_a_losing_toy_subtree() {
    let config = TreeConfig { bet_sizes: vec![1.0], raise_sizes: vec![], max_raises: 1 };
    let tree = build_tree(100, 500, 500, &config);
    let board = Board::from(vec![
        Card::new(Rank::Two, Suit::Club),
        Card::new(Rank::Seven, Suit::Diamond),
        Card::new(Rank::Nine, Suit::Club),
        Card::new(Rank::Jack, Suit::Spade),
        Card::new(Rank::Four, Suit::Heart),
    ]);
    let pairing = HandPairing {
        cards0: river_holdem_toolkit::cards::Hole::new(
            Card::new(Rank::Two, Suit::Diamond),
            Card::new(Rank::Three, Suit::Diamond),
        ),
        cards1: river_holdem_toolkit::cards::Hole::new(
            Card::new(Rank::Ace, Suit::Spade),
            Card::new(Rank::Ace, Suit::Heart),
        ),
        weight: 1.0,
    };
    let mut trainer = Trainer::new(tree, board, vec![pairing]);
    trainer.step(1000).unwrap();

    let root = trainer.tree().root;
    let strategy = trainer.strategy_at(root, pairing.cards0).unwrap();
    let total: f64 = strategy.iter().sum();
    assert!((total - 1.0).abs() < 1e-6);

    // sanity: uniform regret matching on a vector with one negative and one
    // positive entry favors the positive action.
    let rm = regret_match(&[25.0, -25.0]);
    assert!(rm[0] > rm[1]);
    let avg = average_strategy(&[900.0, 100.0]);
    assert!((avg[0] - 0.9).abs() < 1e-6);
}

#[test]
fn scenario_can_start_mid_hand_at_the_flop() {
    let hand = HandConfig { table: heads_up_table(5, 10), dealer_seat: 0, seats: vec![0, 1] };
    let scenario = ScenarioConfig {
        start_street: Street::Flop,
        initial_pot: 50,
        board_cards: vec![
            Card::new(Rank::Ace, Suit::Heart),
            Card::new(Rank::King, Suit::Heart),
            Card::new(Rank::Queen, Suit::Heart),
        ],
        dead_cards: vec![],
        players: vec![],
    };
    let state = gameplay::create_initial_state(hand, Some(scenario)).unwrap();

    assert_eq!(state.street, Street::Flop);
    assert_eq!(state.board.len(), 3);
    assert_eq!(state.pots[0].amount, 50);
    assert_eq!(state.current_bet, 0);
    assert_eq!(state.action_seat, Some(0));
    assert!(!state.deck.contains(&Card::new(Rank::Ace, Suit::Heart)));
    assert!(!state.deck.contains(&Card::new(Rank::King, Suit::Heart)));
    assert!(!state.deck.contains(&Card::new(Rank::Queen, Suit::Heart)));
}

#[test]
fn parsed_range_class_round_trips_through_display() {
    let pair: HandClass = "AA".parse().unwrap();
    assert_eq!(pair.to_string(), "AA");
    let suited: HandClass = "AKs".parse().unwrap();
    assert_eq!(suited.to_string(), "AKs");
}

/// All cards live exactly once across the deck, the board, and every hole.
fn assert_cards_unique(state: &gameplay::GameState) {
    let mut seen: Vec<Card> = state.board.cards().to_vec();
    for p in &state.players {
        if let Some(hole) = p.hole {
            for c in hole.cards() {
                assert!(!seen.contains(&c), "{c} dealt twice");
                assert!(!state.deck.contains(&c), "{c} in both deck and play");
                seen.push(c);
            }
        }
    }
    for &c in &seen {
        assert!(!state.deck.contains(&c), "{c} in both deck and play");
    }
}

/// Randomized legal-action sequences over random table shapes: after every
/// `apply`, chips are conserved (I1) and no card is ever dealt twice (I2).
#[test]
fn random_legal_sequences_preserve_chip_and_card_invariants() {
    use rand::Rng as _;

    for trial in 0..200u64 {
        let hand = HandConfig::random();
        let mut state = match gameplay::create_initial_state_seeded(hand, None, trial) {
            Ok(s) => s,
            Err(_) => continue,
        };
        let total = state.sum_chips();
        assert_cards_unique(&state);

        let mut rng = rand::rng();
        for _ in 0..64 {
            if state.winners.is_some() || state.action_seat.is_none() {
                break;
            }
            let legal = gameplay::legal_actions(&state);
            if legal.is_empty() {
                break;
            }
            let choice = &legal[rng.random_range(0..legal.len())];
            let amount = if choice.min_amount == choice.max_amount {
                choice.min_amount
            } else {
                rng.random_range(choice.min_amount..=choice.max_amount)
            };
            let seat = state.action_seat.unwrap();
            let player_id = state.player_at(seat).unwrap().id.clone();
            let action = Action::new(state.street, player_id, choice.kind, amount);
            state = gameplay::apply(&state, &action).expect("legal action always applies");

            assert_eq!(state.sum_chips(), total, "chip conservation violated after {:?}", action.kind);
            assert_cards_unique(&state);
        }
    }
}
