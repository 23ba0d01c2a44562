use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::error::Result;
use crate::planner::{SearchPolicy, Strategy};

/// budget-diet — Find the cheapest foods that hit your macro goals.
#[derive(Parser, Debug)]
#[command(name = "budget-diet")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// File containing food info (name,cost,amount,serving,unit,calories,carbs,fat,protein).
    #[arg(long)]
    pub foods: PathBuf,

    /// File containing goal info (calories,carbs,fat,protein; -1 for no goal).
    #[arg(long)]
    pub goals: PathBuf,

    /// Search strategy. Defaults to the policy file's, or memoized.
    #[arg(short, long, value_enum)]
    pub strategy: Option<Mode>,

    /// JSON file with a search policy (tolerances, strategy, step limit).
    #[arg(long)]
    pub policy: Option<PathBuf>,

    /// Calories left that still count as meeting the goal.
    #[arg(long)]
    pub calorie_tolerance: Option<f64>,

    /// Grams of protein, fat or carbs left that still count as meeting the goal.
    #[arg(long)]
    pub macro_tolerance: Option<f64>,

    /// Prune with the wider overshoot windows (50 cal, 15 protein, 10 fat, 10 carbs).
    #[arg(long)]
    pub wide_overshoot: bool,

    /// Give up after visiting this many search states.
    #[arg(long)]
    pub max_steps: Option<u64>,

    /// Print results as JSON instead of text.
    #[arg(long)]
    pub json: bool,

    /// Log level used when RUST_LOG is not set.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

/// Strategy selection on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    Exhaustive,
    Memoized,
    /// Run both and print each result.
    Compare,
}

impl Mode {
    pub fn strategies(self) -> Vec<Strategy> {
        match self {
            Mode::Exhaustive => vec![Strategy::Exhaustive],
            Mode::Memoized => vec![Strategy::Memoized],
            Mode::Compare => vec![Strategy::Exhaustive, Strategy::Memoized],
        }
    }
}

impl Cli {
    /// Policy from the optional file, with command-line overrides applied.
    pub fn search_policy(&self) -> Result<SearchPolicy> {
        let mut policy = match &self.policy {
            Some(path) => SearchPolicy::load(path)?,
            None => SearchPolicy::default(),
        };

        if let Some(cal) = self.calorie_tolerance {
            policy.satisfy.calories = cal;
            policy.overshoot.calories = cal;
        }
        if let Some(tol) = self.macro_tolerance {
            for window in [&mut policy.satisfy, &mut policy.overshoot] {
                window.protein = tol;
                window.fat = tol;
                window.carbs = tol;
            }
        }
        if self.wide_overshoot {
            policy = policy.with_wide_overshoot();
        }
        if self.max_steps.is_some() {
            policy.max_steps = self.max_steps;
        }
        Ok(policy)
    }

    /// Strategies to run, in order.
    pub fn strategies(&self, policy: &SearchPolicy) -> Vec<Strategy> {
        match self.strategy {
            Some(mode) => mode.strategies(),
            None => vec![policy.strategy],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["budget-diet", "--foods", "foods.txt", "--goals", "goals.txt"];
        argv.extend_from_slice(args);
        Cli::parse_from(argv)
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&[]);
        let policy = cli.search_policy().unwrap();
        assert_eq!(policy, SearchPolicy::default());
        assert_eq!(cli.strategies(&policy), vec![Strategy::Memoized]);
    }

    #[test]
    fn test_tolerance_overrides() {
        let cli = parse(&["--calorie-tolerance", "100", "--macro-tolerance", "8"]);
        let policy = cli.search_policy().unwrap();
        assert_eq!(policy.satisfy.calories, 100.0);
        assert_eq!(policy.overshoot.fat, 8.0);
        assert_eq!(policy.satisfy.carbs, 8.0);
    }

    #[test]
    fn test_compare_runs_both() {
        let cli = parse(&["--strategy", "compare"]);
        let policy = cli.search_policy().unwrap();
        assert_eq!(
            cli.strategies(&policy),
            vec![Strategy::Exhaustive, Strategy::Memoized]
        );
    }
}
