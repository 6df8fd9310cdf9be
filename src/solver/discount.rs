//! Discounted-CFR weighting (§4.11). Structurally grounded on the teacher's
//! plain accumulate-and-discount `Discount`, extended with the `theta`
//! cumulative-strategy blend this spec adds on top of it (§9 decision).

use crate::{Probability, Utility, DCFR_ALPHA, DCFR_BETA, DCFR_GAMMA, DCFR_THETA};

#[derive(Debug, Clone, Copy)]
pub struct Discount {
    alpha: f64,
    beta: f64,
    gamma: f64,
    theta: f64,
}

impl Discount {
    pub const fn default() -> &'static Self {
        &Self { alpha: DCFR_ALPHA, beta: DCFR_BETA, gamma: DCFR_GAMMA, theta: DCFR_THETA }
    }

    /// Applies the regret discount to an already-updated regret value:
    /// scale positive regrets toward their asymptote by `c_α`, negative
    /// regrets flatly by `β`.
    pub fn discount_regret(&self, t: usize, updated_regret: Utility) -> Utility {
        if updated_regret > 0.0 {
            let c_alpha = (t as f64).powf(self.alpha);
            updated_regret * c_alpha / (c_alpha + 1.0)
        } else {
            updated_regret * self.beta
        }
    }

    /// `c_γ = (t/(t+1))^γ`, the weight given to this iteration's strategy
    /// contribution before blending into the cumulative strategy sum.
    pub fn strategy_weight(&self, t: usize) -> Probability {
        (t as f64 / (t as f64 + 1.0)).powf(self.gamma)
    }

    /// `cumStrategy ← cumStrategy·θ + currentStrategy·c_γ`.
    pub fn blend_cum_strategy(&self, t: usize, previous: Utility, current_contribution: Utility) -> Utility {
        previous * self.theta + current_contribution * self.strategy_weight(t)
    }
}
