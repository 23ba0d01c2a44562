mod foods;
mod goals;

pub use foods::{load_catalog, parse_catalog};
pub use goals::{load_goals, parse_goals};
