//! Level-scoped criteria filtering and theme grouping
//!
//! `ThemedCriteria` is the navigable view over a referential: the subset of
//! criteria in scope at the chosen audit depth, partitioned by theme in
//! referential order. Navigation and the headline score both derive from it.

use super::types::{Criterion, EvaluationLevel, Referential};

/// Level-filtered criteria grouped by theme, in referential order
///
/// Pure value: rebuild it whenever the referential or level changes rather
/// than caching across changes. Themes left empty by the filter are dropped
/// from the navigable list.
#[derive(Debug, Clone)]
pub struct ThemedCriteria {
    groups: Vec<(String, Vec<Criterion>)>,
    total: usize,
}

impl ThemedCriteria {
    /// Build the applicable subset of `referential` at `level`
    ///
    /// The filter is cumulative (see [`EvaluationLevel::includes`]); grouping
    /// preserves the order criteria appear in the referential, and theme
    /// order is the order of each theme's first applicable criterion.
    pub fn build(referential: &Referential, level: EvaluationLevel) -> Self {
        let mut groups: Vec<(String, Vec<Criterion>)> = Vec::new();
        let mut total = 0;

        for criterion in &referential.criteria {
            if !level.includes(criterion.level) {
                continue;
            }
            total += 1;
            match groups.iter_mut().find(|(theme, _)| *theme == criterion.theme) {
                Some((_, list)) => list.push(criterion.clone()),
                None => groups.push((criterion.theme.clone(), vec![criterion.clone()])),
            }
        }

        Self { groups, total }
    }

    /// Number of applicable criteria across all themes
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Ordered theme ids with at least one applicable criterion
    pub fn themes(&self) -> Vec<&str> {
        self.groups.iter().map(|(theme, _)| theme.as_str()).collect()
    }

    pub fn theme_count(&self) -> usize {
        self.groups.len()
    }

    /// Applicable criteria for one theme, in referential order
    pub fn criteria(&self, theme: &str) -> Option<&[Criterion]> {
        self.groups
            .iter()
            .find(|(t, _)| t == theme)
            .map(|(_, list)| list.as_slice())
    }

    /// Index of a theme in navigation order
    pub fn theme_index(&self, theme: &str) -> Option<usize> {
        self.groups.iter().position(|(t, _)| t == theme)
    }

    pub(crate) fn group_at(&self, theme_idx: usize) -> Option<(&str, &[Criterion])> {
        self.groups
            .get(theme_idx)
            .map(|(theme, list)| (theme.as_str(), list.as_slice()))
    }

    /// Criterion at a (theme index, index-within-theme) position
    pub fn criterion_at(&self, theme_idx: usize, index: usize) -> Option<&Criterion> {
        self.groups.get(theme_idx).and_then(|(_, list)| list.get(index))
    }

    /// Resolve a criterion id to its (theme index, index-within-theme)
    pub fn position_of(&self, criterion_id: &str) -> Option<(usize, usize)> {
        for (theme_idx, (_, list)) in self.groups.iter().enumerate() {
            if let Some(index) = list.iter().position(|c| c.id == criterion_id) {
                return Some((theme_idx, index));
            }
        }
        None
    }

    /// All applicable criteria flattened in navigation order
    pub fn iter(&self) -> impl Iterator<Item = &Criterion> {
        self.groups.iter().flat_map(|(_, list)| list.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::referential::test_fixtures::referential_with;

    fn spec(id: &str, theme: &str, level: EvaluationLevel) -> (String, String, EvaluationLevel) {
        (id.to_string(), theme.to_string(), level)
    }

    // ==================== Filter Tests ====================

    #[test]
    fn essential_depth_keeps_essential_only() {
        let referential = referential_with(vec![
            spec("c1", "strategy", EvaluationLevel::Essential),
            spec("c2", "strategy", EvaluationLevel::Recommended),
            spec("c3", "frontend", EvaluationLevel::Advanced),
        ]);

        let filtered = ThemedCriteria::build(&referential, EvaluationLevel::Essential);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.iter().next().unwrap().id, "c1");
    }

    #[test]
    fn filter_is_cumulative_across_depths() {
        let referential = referential_with(vec![
            spec("c1", "strategy", EvaluationLevel::Essential),
            spec("c2", "strategy", EvaluationLevel::Recommended),
            spec("c3", "frontend", EvaluationLevel::Advanced),
        ]);

        let essential = ThemedCriteria::build(&referential, EvaluationLevel::Essential);
        let recommended = ThemedCriteria::build(&referential, EvaluationLevel::Recommended);
        let advanced = ThemedCriteria::build(&referential, EvaluationLevel::Advanced);

        let ids = |view: &ThemedCriteria| -> Vec<String> {
            view.iter().map(|c| c.id.clone()).collect()
        };

        // essential ⊆ recommended ⊆ advanced == all criteria
        let essential_ids = ids(&essential);
        let recommended_ids = ids(&recommended);
        let advanced_ids = ids(&advanced);

        assert!(essential_ids.iter().all(|id| recommended_ids.contains(id)));
        assert!(recommended_ids.iter().all(|id| advanced_ids.contains(id)));
        assert_eq!(advanced_ids.len(), referential.criteria.len());
    }

    // ==================== Grouping Tests ====================

    #[test]
    fn themes_preserve_referential_order() {
        let referential = referential_with(vec![
            spec("c1", "strategy", EvaluationLevel::Essential),
            spec("c2", "frontend", EvaluationLevel::Essential),
            spec("c3", "strategy", EvaluationLevel::Essential),
        ]);

        let filtered = ThemedCriteria::build(&referential, EvaluationLevel::Essential);
        assert_eq!(filtered.themes(), vec!["strategy", "frontend"]);
        // Interleaved criteria regroup under their theme in source order
        let strategy: Vec<_> = filtered
            .criteria("strategy")
            .unwrap()
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(strategy, vec!["c1", "c3"]);
    }

    #[test]
    fn empty_themes_are_dropped_after_filtering() {
        let referential = referential_with(vec![
            spec("c1", "strategy", EvaluationLevel::Essential),
            spec("c2", "hosting", EvaluationLevel::Advanced),
        ]);

        let filtered = ThemedCriteria::build(&referential, EvaluationLevel::Essential);
        assert_eq!(filtered.themes(), vec!["strategy"]);
        assert!(filtered.criteria("hosting").is_none());
    }

    #[test]
    fn empty_referential_yields_empty_view() {
        let referential = referential_with(vec![]);
        let filtered = ThemedCriteria::build(&referential, EvaluationLevel::Advanced);
        assert!(filtered.is_empty());
        assert_eq!(filtered.theme_count(), 0);
        assert!(filtered.iter().next().is_none());
    }

    // ==================== Lookup Tests ====================

    #[test]
    fn position_of_resolves_across_themes() {
        let referential = referential_with(vec![
            spec("c1", "strategy", EvaluationLevel::Essential),
            spec("c2", "strategy", EvaluationLevel::Essential),
            spec("c3", "frontend", EvaluationLevel::Essential),
        ]);

        let filtered = ThemedCriteria::build(&referential, EvaluationLevel::Essential);
        assert_eq!(filtered.position_of("c1"), Some((0, 0)));
        assert_eq!(filtered.position_of("c2"), Some((0, 1)));
        assert_eq!(filtered.position_of("c3"), Some((1, 0)));
        assert_eq!(filtered.position_of("missing"), None);
    }

    #[test]
    fn position_of_ignores_filtered_out_criteria() {
        let referential = referential_with(vec![
            spec("c1", "strategy", EvaluationLevel::Essential),
            spec("c2", "strategy", EvaluationLevel::Advanced),
        ]);

        let filtered = ThemedCriteria::build(&referential, EvaluationLevel::Essential);
        assert_eq!(filtered.position_of("c2"), None);
    }

    #[test]
    fn criterion_at_out_of_bounds_is_none() {
        let referential = referential_with(vec![spec("c1", "strategy", EvaluationLevel::Essential)]);
        let filtered = ThemedCriteria::build(&referential, EvaluationLevel::Essential);
        assert!(filtered.criterion_at(0, 0).is_some());
        assert!(filtered.criterion_at(0, 1).is_none());
        assert!(filtered.criterion_at(1, 0).is_none());
    }
}
