//! 169-class starting-hand range model (§4.8) plus the range-text parser
//! from the external interface (§6).

mod class;
mod text;

pub use class::HandClass;
pub use text::parse_range_text;

use crate::cards::Rank;
use std::collections::BTreeMap;

/// Total raw combinations in a 52-card deck's 2-card starting hands.
pub const TOTAL_COMBOS: u32 = 1326;

/// A weighted subset of the 169 canonical starting-hand classes.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Range(BTreeMap<HandClass, f64>);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeStats {
    pub weighted_combos: f64,
    pub percentage: f64,
    pub hands_included: usize,
}

impl Range {
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    pub fn weight(&self, class: HandClass) -> f64 {
        self.0.get(&class).copied().unwrap_or(0.0)
    }

    /// Weights are clamped to `[0, 1]`; a weight of exactly 0 removes the
    /// entry rather than storing a no-op weight.
    pub fn set_weight(&mut self, class: HandClass, weight: f64) {
        let weight = weight.clamp(0.0, 1.0);
        if weight == 0.0 {
            self.0.remove(&class);
        } else {
            self.0.insert(class, weight);
        }
    }

    /// Adds `delta` to a class's weight, clamped at 1; used by the range-text
    /// parser to accumulate explicit combos onto a class's fractional weight.
    pub fn bump_weight(&mut self, class: HandClass, delta: f64) {
        let current = self.weight(class);
        self.set_weight(class, current + delta);
    }

    pub fn classes(&self) -> impl Iterator<Item = (HandClass, f64)> + '_ {
        self.0.iter().map(|(&c, &w)| (c, w))
    }

    pub fn stats(&self) -> RangeStats {
        let weighted_combos: f64 = self.0.iter().map(|(c, w)| c.raw_combos() as f64 * w).sum();
        RangeStats {
            weighted_combos,
            percentage: 100.0 * weighted_combos / TOTAL_COMBOS as f64,
            hands_included: self.0.len(),
        }
    }

    /// Per-class maximum weight over the union of both ranges.
    pub fn merge(&self, other: &Self) -> Self {
        let mut merged = self.clone();
        for (class, weight) in other.classes() {
            let existing = merged.weight(class);
            merged.set_weight(class, existing.max(weight));
        }
        merged
    }

    /// Per-class minimum weight; classes absent from either range are 0 in
    /// the result.
    pub fn intersect(&self, other: &Self) -> Self {
        let mut out = Self::empty();
        for (class, weight) in self.classes() {
            let min = weight.min(other.weight(class));
            if min > 0.0 {
                out.set_weight(class, min);
            }
        }
        out
    }

    /// Greedily includes hands from [`HandClass::by_canonical_strength`]
    /// until weighted combos reach `pct% · 1326`, giving the last
    /// partially-included class a fractional weight.
    pub fn generate_top_percent(pct: f64) -> Self {
        let target = (pct.clamp(0.0, 100.0) / 100.0) * TOTAL_COMBOS as f64;
        let mut out = Self::empty();
        let mut accumulated = 0.0;
        for class in HandClass::by_canonical_strength() {
            if accumulated >= target {
                break;
            }
            let combos = class.raw_combos() as f64;
            let remaining = target - accumulated;
            if remaining >= combos {
                out.set_weight(class, 1.0);
                accumulated += combos;
            } else {
                out.set_weight(class, remaining / combos);
                accumulated += remaining;
                break;
            }
        }
        out
    }
}
