use serde::Serialize;

use crate::error::{DietError, Result};
use crate::models::{Catalog, Food, Selection};

/// Aggregate cost and macros of a selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub cost: f64,
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

/// Sum `field(food) * count` over the selection.
fn sum_field(
    catalog: &Catalog,
    selection: &Selection,
    field: impl Fn(&Food) -> f64,
) -> Result<f64> {
    let mut total = 0.0;
    for (index, count) in selection.iter() {
        let food = catalog.get(index).ok_or(DietError::InvalidSelection {
            index,
            len: catalog.len(),
        })?;
        total += field(food) * count as f64;
    }
    Ok(total)
}

pub fn total_cost(catalog: &Catalog, selection: &Selection) -> Result<f64> {
    sum_field(catalog, selection, |f| f.serving_cost)
}

pub fn total_calories(catalog: &Catalog, selection: &Selection) -> Result<f64> {
    sum_field(catalog, selection, |f| f.calories)
}

pub fn total_protein(catalog: &Catalog, selection: &Selection) -> Result<f64> {
    sum_field(catalog, selection, |f| f.protein)
}

pub fn total_fat(catalog: &Catalog, selection: &Selection) -> Result<f64> {
    sum_field(catalog, selection, |f| f.fat)
}

pub fn total_carbs(catalog: &Catalog, selection: &Selection) -> Result<f64> {
    sum_field(catalog, selection, |f| f.carbs)
}

/// All five totals at once.
pub fn totals(catalog: &Catalog, selection: &Selection) -> Result<Totals> {
    Ok(Totals {
        cost: total_cost(catalog, selection)?,
        calories: total_calories(catalog, selection)?,
        protein: total_protein(catalog, selection)?,
        fat: total_fat(catalog, selection)?,
        carbs: total_carbs(catalog, selection)?,
    })
}
