use std::fs;
use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::Macros;
use crate::planner::constants::*;

/// Which search procedure to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Plain include/exclude search, no caching.
    Exhaustive,
    /// Same search with results cached per (position, floored budgets).
    #[default]
    Memoized,
}

impl Strategy {
    pub fn label(self) -> &'static str {
        match self {
            Strategy::Exhaustive => "exhaustive",
            Strategy::Memoized => "memoized",
        }
    }
}

/// Tolerance windows and limits for one optimization run.
///
/// `satisfy` decides when a remaining budget counts as met; `overshoot`
/// decides how far below zero one extra serving may push it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchPolicy {
    pub strategy: Strategy,
    pub satisfy: Macros,
    pub overshoot: Macros,
    /// Maximum states to visit before giving up. `None` = unbounded.
    pub max_steps: Option<u64>,
}

impl Default for SearchPolicy {
    fn default() -> Self {
        let tolerance = Macros::new(
            CALORIE_TOLERANCE,
            MACRO_TOLERANCE,
            MACRO_TOLERANCE,
            MACRO_TOLERANCE,
        );
        Self {
            strategy: Strategy::default(),
            satisfy: tolerance,
            overshoot: tolerance,
            max_steps: None,
        }
    }
}

impl SearchPolicy {
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Use the same window for satisfaction and overshoot.
    pub fn with_tolerances(mut self, calories: f64, macros: f64) -> Self {
        let tolerance = Macros::new(calories, macros, macros, macros);
        self.satisfy = tolerance;
        self.overshoot = tolerance;
        self
    }

    /// Switch overshoot pruning to the wide preset.
    pub fn with_wide_overshoot(mut self) -> Self {
        self.overshoot = Macros::new(
            WIDE_CALORIE_OVERSHOOT,
            WIDE_PROTEIN_OVERSHOOT,
            WIDE_FAT_OVERSHOOT,
            WIDE_CARB_OVERSHOOT,
        );
        self
    }

    /// Load a policy from a JSON file. Missing fields keep their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Bit-level digest of the fields that shape cached outcomes.
    pub(crate) fn cache_key_bits(&self) -> [u64; 8] {
        let s = self.satisfy.to_array();
        let o = self.overshoot.to_array();
        [s[0], s[1], s[2], s[3], o[0], o[1], o[2], o[3]].map(f64::to_bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_windows_match() {
        let policy = SearchPolicy::default();
        assert_eq!(policy.satisfy, policy.overshoot);
        assert_eq!(policy.satisfy.calories, CALORIE_TOLERANCE);
        assert_eq!(policy.satisfy.carbs, MACRO_TOLERANCE);
        assert_eq!(policy.strategy, Strategy::Memoized);
    }

    #[test]
    fn test_wide_overshoot_keeps_satisfy() {
        let policy = SearchPolicy::default().with_wide_overshoot();
        assert_eq!(policy.satisfy.protein, MACRO_TOLERANCE);
        assert_eq!(policy.overshoot.protein, WIDE_PROTEIN_OVERSHOOT);
    }

    #[test]
    fn test_load_partial_json() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"strategy": "exhaustive", "max_steps": 1000}"#)
            .unwrap();

        let policy = SearchPolicy::load(file.path()).unwrap();
        assert_eq!(policy.strategy, Strategy::Exhaustive);
        assert_eq!(policy.max_steps, Some(1000));
        assert_eq!(policy.satisfy, SearchPolicy::default().satisfy);
    }
}
