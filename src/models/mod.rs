mod catalog;
mod food;
mod goals;
mod selection;

pub use catalog::Catalog;
pub use food::{Food, Macros};
pub use goals::Goals;
pub use selection::Selection;
