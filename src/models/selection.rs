use std::collections::BTreeMap;

/// Servings chosen per catalog index. Counts are always at least one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    counts: BTreeMap<usize, u32>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one serving of the food at `index`.
    pub fn add_serving(&mut self, index: usize) {
        *self.counts.entry(index).or_insert(0) += 1;
    }

    /// Servings of the food at `index` (0 if unused).
    pub fn count(&self, index: usize) -> u32 {
        self.counts.get(&index).copied().unwrap_or(0)
    }

    /// (index, count) pairs in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.counts.iter().map(|(&i, &c)| (i, c))
    }

    /// Number of distinct foods used.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total servings across all foods.
    pub fn servings(&self) -> u32 {
        self.counts.values().sum()
    }
}

impl FromIterator<(usize, u32)> for Selection {
    /// Zero counts are dropped so the at-least-one invariant holds.
    fn from_iter<T: IntoIterator<Item = (usize, u32)>>(iter: T) -> Self {
        let mut selection = Selection::new();
        for (index, count) in iter.into_iter().filter(|(_, c)| *c > 0) {
            *selection.counts.entry(index).or_insert(0) += count;
        }
        selection
    }
}
