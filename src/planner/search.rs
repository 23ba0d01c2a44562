use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::error::{DietError, Result};
use crate::models::{Catalog, Goals, Macros, Selection};
use crate::planner::aggregate::{total_cost, totals, Totals};
use crate::planner::constants::AXIS_NAMES;
use crate::planner::policy::{SearchPolicy, Strategy};

/// Result of searching one state.
///
/// `Infeasible` compares as more expensive than every feasible selection.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Feasible(Selection),
    Infeasible,
}

impl Outcome {
    /// Add one serving of `index`; infeasible stays infeasible.
    fn with_serving(self, index: usize) -> Self {
        match self {
            Outcome::Feasible(mut selection) => {
                selection.add_serving(index);
                Outcome::Feasible(selection)
            }
            Outcome::Infeasible => Outcome::Infeasible,
        }
    }
}

/// Memo key: catalog position, which axes are set, and remaining budgets
/// floored to integers.
///
/// Flooring merges states whose budgets differ only in the fractional part.
/// The axis mask keeps an unset axis apart from one set to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct StateKey {
    position: usize,
    active: [bool; 4],
    budget: [i64; 4],
}

impl StateKey {
    fn new(position: usize, active: [bool; 4], remaining: Macros) -> Self {
        Self {
            position,
            active,
            budget: remaining.to_array().map(|v| v.floor() as i64),
        }
    }
}

/// Outcomes of previously searched states.
///
/// Only valid for the catalog and tolerances it was created with; reusing it
/// elsewhere is rejected with [`DietError::CacheMismatch`].
#[derive(Debug)]
pub struct MemoCache {
    catalog_fingerprint: u64,
    policy_bits: [u64; 8],
    entries: HashMap<StateKey, Outcome>,
}

impl MemoCache {
    pub fn new(catalog: &Catalog, policy: &SearchPolicy) -> Self {
        Self {
            catalog_fingerprint: catalog.fingerprint(),
            policy_bits: policy.cache_key_bits(),
            entries: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn ensure_matches(&self, catalog: &Catalog, policy: &SearchPolicy) -> Result<()> {
        if self.catalog_fingerprint != catalog.fingerprint()
            || self.policy_bits != policy.cache_key_bits()
        {
            return Err(DietError::CacheMismatch);
        }
        Ok(())
    }
}

/// Counters from one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// States entered, including cache hits and leaves.
    pub steps: u64,
    pub cache_hits: u64,
    pub cache_entries: usize,
}

/// A feasible selection with its totals and search counters.
#[derive(Debug, Clone)]
pub struct Solution {
    pub selection: Selection,
    pub totals: Totals,
    pub stats: SearchStats,
}

/// Cheapest selection meeting `goals` within the policy's tolerances.
pub fn solve(catalog: &Catalog, goals: &Goals, policy: &SearchPolicy) -> Result<Selection> {
    solve_detailed(catalog, goals, policy).map(|s| s.selection)
}

/// Like [`solve`], also returning totals and search counters.
///
/// The memoized strategy uses a fresh cache that is dropped on return.
pub fn solve_detailed(catalog: &Catalog, goals: &Goals, policy: &SearchPolicy) -> Result<Solution> {
    match policy.strategy {
        Strategy::Exhaustive => run(catalog, goals, policy, None),
        Strategy::Memoized => {
            let mut cache = MemoCache::new(catalog, policy);
            run(catalog, goals, policy, Some(&mut cache))
        }
    }
}

/// Memoized search reusing a caller-owned cache across calls.
///
/// Remaining budgets and the set of constrained axes, not the original
/// goals, key the cache, so one cache serves any goals over the same catalog
/// and tolerances.
pub fn solve_with_cache(
    catalog: &Catalog,
    goals: &Goals,
    policy: &SearchPolicy,
    cache: &mut MemoCache,
) -> Result<Solution> {
    cache.ensure_matches(catalog, policy)?;
    run(catalog, goals, policy, Some(cache))
}

fn run(
    catalog: &Catalog,
    goals: &Goals,
    policy: &SearchPolicy,
    cache: Option<&mut MemoCache>,
) -> Result<Solution> {
    validate(goals, policy)?;

    let strategy = if cache.is_some() {
        Strategy::Memoized
    } else {
        Strategy::Exhaustive
    };
    let mut search = Search::new(catalog, goals, policy, cache);
    let outcome = search.run(goals.as_budget());
    let stats = search.stats();

    debug!(
        strategy = strategy.label(),
        foods = catalog.len(),
        steps = stats.steps,
        cache_hits = stats.cache_hits,
        cache_entries = stats.cache_entries,
        feasible = matches!(outcome, Ok(Outcome::Feasible(_))),
        "search finished"
    );

    match outcome? {
        Outcome::Feasible(selection) => Ok(Solution {
            totals: totals(catalog, &selection)?,
            selection,
            stats,
        }),
        Outcome::Infeasible => Err(DietError::NoFeasibleSolution),
    }
}

fn validate(goals: &Goals, policy: &SearchPolicy) -> Result<()> {
    for (name, goal) in AXIS_NAMES.iter().zip(goals.to_array()) {
        if let Some(v) = goal {
            if !v.is_finite() {
                return Err(DietError::InvalidInput(format!("{} goal must be finite", name)));
            }
        }
    }
    let windows = policy
        .satisfy
        .to_array()
        .into_iter()
        .chain(policy.overshoot.to_array());
    for v in windows {
        if !v.is_finite() || v < 0.0 {
            return Err(DietError::InvalidInput(
                "tolerances must be finite and non-negative".to_string(),
            ));
        }
    }
    Ok(())
}

/// Where a frame is in the skip/use decision for its food.
enum Stage {
    Enter,
    Skipped,
    Used { skip: Outcome },
}

struct Frame {
    position: usize,
    remaining: Macros,
    stage: Stage,
}

impl Frame {
    fn enter(position: usize, remaining: Macros) -> Self {
        Self {
            position,
            remaining,
            stage: Stage::Enter,
        }
    }
}

/// One in-flight search. Depth-first over (position, remaining budget),
/// visiting the skip branch before the use branch.
struct Search<'a> {
    catalog: &'a Catalog,
    /// Per-food macros with unset axes zeroed.
    foods: Vec<Macros>,
    active: [bool; 4],
    satisfy: [f64; 4],
    overshoot: [f64; 4],
    max_steps: Option<u64>,
    cache: Option<&'a mut MemoCache>,
    steps: u64,
    cache_hits: u64,
}

impl<'a> Search<'a> {
    fn new(
        catalog: &'a Catalog,
        goals: &Goals,
        policy: &SearchPolicy,
        cache: Option<&'a mut MemoCache>,
    ) -> Self {
        let active = goals.active_axes();
        let foods = catalog
            .iter()
            .map(|food| {
                let mut m = food.macros().to_array();
                for (v, on) in m.iter_mut().zip(active) {
                    if !on {
                        *v = 0.0;
                    }
                }
                Macros::from_array(m)
            })
            .collect();

        Self {
            catalog,
            foods,
            active,
            satisfy: policy.satisfy.to_array(),
            overshoot: policy.overshoot.to_array(),
            max_steps: policy.max_steps,
            cache,
            steps: 0,
            cache_hits: 0,
        }
    }

    fn stats(&self) -> SearchStats {
        SearchStats {
            steps: self.steps,
            cache_hits: self.cache_hits,
            cache_entries: self.cache.as_ref().map(|c| c.len()).unwrap_or(0),
        }
    }

    fn run(&mut self, budget: Macros) -> Result<Outcome> {
        let mut frames = vec![Frame::enter(0, budget)];
        let mut results: Vec<Outcome> = Vec::new();

        while let Some(Frame {
            position,
            remaining,
            stage,
        }) = frames.pop()
        {
            match stage {
                Stage::Enter => {
                    self.tick()?;

                    if self.is_satisfied(remaining) {
                        results.push(Outcome::Feasible(Selection::new()));
                        continue;
                    }
                    if position >= self.foods.len() {
                        results.push(Outcome::Infeasible);
                        continue;
                    }
                    if let Some(hit) = self.lookup(position, remaining) {
                        results.push(hit);
                        continue;
                    }

                    frames.push(Frame {
                        position,
                        remaining,
                        stage: Stage::Skipped,
                    });
                    frames.push(Frame::enter(position + 1, remaining));
                }
                Stage::Skipped => {
                    // Every entered frame pushes exactly one result.
                    let skip = results.pop().unwrap_or(Outcome::Infeasible);
                    let food = self.foods[position];

                    if self.overshoots(remaining, food) || self.is_inert(food) {
                        self.store(position, remaining, &skip);
                        results.push(skip);
                        continue;
                    }

                    frames.push(Frame {
                        position,
                        remaining,
                        stage: Stage::Used { skip },
                    });
                    frames.push(Frame::enter(position, remaining.minus(food)));
                }
                Stage::Used { skip } => {
                    let used = results
                        .pop()
                        .unwrap_or(Outcome::Infeasible)
                        .with_serving(position);
                    let best = self.cheaper(skip, used)?;
                    self.store(position, remaining, &best);
                    results.push(best);
                }
            }
        }

        Ok(results.pop().unwrap_or(Outcome::Infeasible))
    }

    fn tick(&mut self) -> Result<()> {
        self.steps += 1;
        match self.max_steps {
            Some(limit) if self.steps > limit => {
                Err(DietError::SearchLimitExceeded { steps: limit })
            }
            _ => Ok(()),
        }
    }

    /// Every active axis has less left than its satisfaction tolerance.
    fn is_satisfied(&self, remaining: Macros) -> bool {
        remaining
            .to_array()
            .iter()
            .zip(self.satisfy)
            .zip(self.active)
            .all(|((left, tol), on)| !on || *left < tol)
    }

    /// One serving would push an active axis past its overshoot window.
    fn overshoots(&self, remaining: Macros, food: Macros) -> bool {
        remaining
            .minus(food)
            .to_array()
            .iter()
            .zip(self.overshoot)
            .zip(self.active)
            .any(|((after, tol), on)| on && *after < -tol)
    }

    /// Contributes nothing to any active axis, so reusing it never terminates.
    fn is_inert(&self, food: Macros) -> bool {
        food.to_array().iter().all(|v| *v == 0.0)
    }

    /// Strictly cheaper `used` wins; ties keep `skip`.
    fn cheaper(&self, skip: Outcome, used: Outcome) -> Result<Outcome> {
        let skip_cost = self.cost_of(&skip)?;
        let used_cost = self.cost_of(&used)?;
        Ok(if skip_cost > used_cost { used } else { skip })
    }

    fn cost_of(&self, outcome: &Outcome) -> Result<f64> {
        match outcome {
            Outcome::Feasible(selection) => total_cost(self.catalog, selection),
            Outcome::Infeasible => Ok(f64::INFINITY),
        }
    }

    fn lookup(&mut self, position: usize, remaining: Macros) -> Option<Outcome> {
        let hit = self
            .cache
            .as_ref()?
            .entries
            .get(&StateKey::new(position, self.active, remaining))
            .cloned();
        if hit.is_some() {
            self.cache_hits += 1;
        }
        hit
    }

    fn store(&mut self, position: usize, remaining: Macros, outcome: &Outcome) {
        if let Some(cache) = self.cache.as_mut() {
            let key = StateKey::new(position, self.active, remaining);
            cache.entries.insert(key, outcome.clone());
        }
    }
}
