pub mod cards;
pub mod error;
pub mod gameplay;
pub mod range;
pub mod rng;
pub mod solver;
pub mod validation;

/// dimensional analysis types
pub type Chips = i64;
pub type Equity = f32;
pub type Utility = f64;
pub type Probability = f64;

// default table parameters, used by the state factory and CLI demos
pub const DEFAULT_STACK: Chips = 1000;
pub const DEFAULT_BIG_BLIND: Chips = 10;
pub const DEFAULT_SMALL_BLIND: Chips = 5;
pub const MAX_RAISE_REPEATS: usize = 4;

// regret matching parameters
pub const REGRET_MIN: Utility = -3e5;
pub const REGRET_MAX: Utility = Utility::MAX;
pub const POLICY_MIN: Probability = Probability::MIN_POSITIVE;

// discounted CFR defaults (§4.11)
pub const DCFR_ALPHA: f64 = 1.5;
pub const DCFR_BETA: f64 = 0.5;
pub const DCFR_GAMMA: f64 = 2.0;
pub const DCFR_THETA: f64 = 0.9;

/// trait for random generation, mainly (strictly?) for testing
pub trait Arbitrary {
    fn random() -> Self;
}

/// progress bar for long-running solves, gated so the core stays dependency-light
#[cfg(feature = "cli")]
pub fn progress(n: usize) -> indicatif::ProgressBar {
    let tick = std::time::Duration::from_millis(250);
    let style = "{spinner:.cyan} {elapsed} ~ {percent:>3}% {wide_bar:.cyan} {pos}/{len}";
    let style = indicatif::ProgressStyle::with_template(style).unwrap();
    let progress = indicatif::ProgressBar::new(n as u64);
    progress.set_style(style);
    progress.enable_steady_tick(tick);
    progress
}

/// initialize terminal logging for the CLI binaries
#[cfg(feature = "cli")]
pub fn init() {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term]).expect("initialize logger");
}
