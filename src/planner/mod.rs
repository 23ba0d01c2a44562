pub mod aggregate;
pub mod constants;
pub mod policy;
pub mod search;

pub use aggregate::{
    total_calories, total_carbs, total_cost, total_fat, total_protein, totals, Totals,
};
pub use constants::*;
pub use policy::{SearchPolicy, Strategy};
pub use search::{
    solve, solve_detailed, solve_with_cache, MemoCache, Outcome, SearchStats, Solution,
};
