use serde::{Deserialize, Serialize};

/// A food with its per-serving cost and macro profile.
///
/// All quantities are per serving.
#[derive(Debug, Clone, PartialEq)]
pub struct Food {
    pub name: String,

    /// Cost of one serving (package cost * serving / package amount).
    pub serving_cost: f64,

    /// Human-readable serving, e.g. "100 g".
    pub serving_size: String,

    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

impl Food {
    pub fn new(
        name: impl Into<String>,
        serving_cost: f64,
        calories: f64,
        protein: f64,
        fat: f64,
        carbs: f64,
    ) -> Self {
        Self {
            name: name.into(),
            serving_cost,
            serving_size: String::new(),
            calories,
            protein,
            fat,
            carbs,
        }
    }

    /// Attach a display serving size.
    pub fn with_serving_size(mut self, serving_size: impl Into<String>) -> Self {
        self.serving_size = serving_size.into();
        self
    }

    /// Per-serving macros in axis order.
    #[inline]
    pub fn macros(&self) -> Macros {
        Macros {
            calories: self.calories,
            protein: self.protein,
            fat: self.fat,
            carbs: self.carbs,
        }
    }

    /// Every numeric field is finite and non-negative.
    pub fn is_valid(&self) -> bool {
        [
            self.serving_cost,
            self.calories,
            self.protein,
            self.fat,
            self.carbs,
        ]
        .iter()
        .all(|v| v.is_finite() && *v >= 0.0)
    }

    /// Debug string for logging.
    pub fn debug_string(&self) -> String {
        format!(
            "{}: ${:.2}/serving, {} cal, P:{} F:{} C:{}",
            self.name, self.serving_cost, self.calories, self.protein, self.fat, self.carbs
        )
    }
}

/// The four macro axes, used both for food profiles and remaining budgets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Macros {
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

impl Macros {
    pub fn new(calories: f64, protein: f64, fat: f64, carbs: f64) -> Self {
        Self {
            calories,
            protein,
            fat,
            carbs,
        }
    }

    /// Values as an array in axis order (calories, protein, fat, carbs).
    #[inline]
    pub fn to_array(self) -> [f64; 4] {
        [self.calories, self.protein, self.fat, self.carbs]
    }

    #[inline]
    pub fn from_array([calories, protein, fat, carbs]: [f64; 4]) -> Self {
        Self::new(calories, protein, fat, carbs)
    }

    /// Component-wise subtraction.
    #[inline]
    pub fn minus(self, other: Macros) -> Self {
        Self::new(
            self.calories - other.calories,
            self.protein - other.protein,
            self.fat - other.fat,
            self.carbs - other.carbs,
        )
    }
}
