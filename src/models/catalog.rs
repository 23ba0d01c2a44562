use std::hash::{DefaultHasher, Hash, Hasher};
use std::ops::Index;

use crate::error::{DietError, Result};
use crate::models::Food;

/// Ordered, immutable list of foods.
///
/// Insertion order is significant only for tie-breaking between equal-cost
/// selections.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    foods: Vec<Food>,
}

impl Catalog {
    /// Build a catalog, rejecting foods with negative or non-finite fields.
    ///
    /// Errors report the 1-based position of the offending food.
    pub fn new(foods: Vec<Food>) -> Result<Self> {
        if let Some((i, food)) = foods.iter().enumerate().find(|(_, f)| !f.is_valid()) {
            return Err(DietError::malformed(
                i + 1,
                format!("{} has a negative or non-finite value", food.name),
            ));
        }
        Ok(Self { foods })
    }

    pub fn get(&self, index: usize) -> Option<&Food> {
        self.foods.get(index)
    }

    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Food> {
        self.foods.iter()
    }

    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    /// Stable digest of every food's numeric content, used to tie memo
    /// caches to the catalog that produced them.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.foods.len().hash(&mut hasher);
        for food in &self.foods {
            for v in [
                food.serving_cost,
                food.calories,
                food.protein,
                food.fat,
                food.carbs,
            ] {
                v.to_bits().hash(&mut hasher);
            }
        }
        hasher.finish()
    }
}

impl Index<usize> for Catalog {
    type Output = Food;

    fn index(&self, index: usize) -> &Food {
        &self.foods[index]
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Food;
    type IntoIter = std::slice::Iter<'a, Food>;

    fn into_iter(self) -> Self::IntoIter {
        self.foods.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_foods() -> Vec<Food> {
        vec![
            Food::new("Rice", 0.20, 200.0, 4.0, 0.5, 45.0),
            Food::new("Eggs", 0.35, 140.0, 12.0, 10.0, 1.0),
        ]
    }

    #[test]
    fn test_preserves_order() {
        let catalog = Catalog::new(sample_foods()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[0].name, "Rice");
        assert_eq!(catalog.get(1).unwrap().name, "Eggs");
        assert!(catalog.get(2).is_none());
    }

    #[test]
    fn test_rejects_invalid_food() {
        let mut foods = sample_foods();
        foods[1].protein = -3.0;
        match Catalog::new(foods) {
            Err(DietError::MalformedRecord { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected MalformedRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_fingerprint_tracks_content() {
        let a = Catalog::new(sample_foods()).unwrap();
        let b = Catalog::new(sample_foods()).unwrap();
        assert_eq!(a.fingerprint(), b.fingerprint());

        let mut foods = sample_foods();
        foods[0].serving_cost = 0.25;
        let c = Catalog::new(foods).unwrap();
        assert_ne!(a.fingerprint(), c.fingerprint());
    }
}
