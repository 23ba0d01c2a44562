use serde::{Deserialize, Serialize};

use crate::models::Macros;

/// Target amounts per macro axis. `None` leaves an axis unconstrained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Goals {
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub fat: Option<f64>,
    pub carbs: Option<f64>,
}

impl Goals {
    /// Goals with every axis set.
    pub fn new(calories: f64, protein: f64, fat: f64, carbs: f64) -> Self {
        Self {
            calories: Some(calories),
            protein: Some(protein),
            fat: Some(fat),
            carbs: Some(carbs),
        }
    }

    /// Axes in order (calories, protein, fat, carbs).
    pub fn to_array(self) -> [Option<f64>; 4] {
        [self.calories, self.protein, self.fat, self.carbs]
    }

    /// Which axes take part in tolerance checks.
    pub fn active_axes(self) -> [bool; 4] {
        self.to_array().map(|g| g.is_some())
    }

    /// Starting remaining budget; unset axes start (and stay) at zero.
    pub fn as_budget(self) -> Macros {
        Macros::from_array(self.to_array().map(|g| g.unwrap_or(0.0)))
    }

    /// Set axes as (name, value), sorted by name for display.
    pub fn named(&self) -> Vec<(&'static str, f64)> {
        let mut named: Vec<(&'static str, f64)> = [
            ("calories", self.calories),
            ("carbs", self.carbs),
            ("fat", self.fat),
            ("protein", self.protein),
        ]
        .into_iter()
        .filter_map(|(name, g)| g.map(|v| (name, v)))
        .collect();
        named.sort_by(|a, b| a.0.cmp(b.0));
        named
    }
}
