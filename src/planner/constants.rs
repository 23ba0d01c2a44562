/// Calories left below which the calorie goal counts as met.
pub const CALORIE_TOLERANCE: f64 = 50.0;

/// Grams left below which a protein, fat or carb goal counts as met.
pub const MACRO_TOLERANCE: f64 = 5.0;

// ─────────────────────────────────────────────────────────────────────────────
// Wide overshoot preset
// Limits the first script version pruned with. Looser than the satisfaction
// window, so results may exceed a goal by more than its tolerance.
// ─────────────────────────────────────────────────────────────────────────────

/// Calories a single serving may overshoot by before it is pruned.
pub const WIDE_CALORIE_OVERSHOOT: f64 = 50.0;

/// Protein grams a single serving may overshoot by.
pub const WIDE_PROTEIN_OVERSHOOT: f64 = 15.0;

/// Fat grams a single serving may overshoot by.
pub const WIDE_FAT_OVERSHOOT: f64 = 10.0;

/// Carb grams a single serving may overshoot by.
pub const WIDE_CARB_OVERSHOOT: f64 = 10.0;

/// Axis labels in search order.
pub const AXIS_NAMES: [&str; 4] = ["calories", "protein", "fat", "carbs"];
