pub mod cli;
pub mod error;
pub mod interface;
pub mod loader;
pub mod logging;
pub mod models;
pub mod planner;

pub use error::{DietError, Result};
pub use models::{Catalog, Food, Goals, Macros, Selection};
pub use planner::{solve, SearchPolicy, Strategy};
