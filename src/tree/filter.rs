//! Live text filter over a display tree.
//!
//! Matching is a case-insensitive substring test against a row's own label. An
//! empty query matches everything. Visibility rules:
//!
//! - simple row: visible iff it matches
//! - parent row: visible iff its label matches or any child matches
//! - child row: visible iff it matches, or its parent's label matches (a parent
//!   matched by its own label keeps all of its children)
//!
//! Filtering only produces a [`Visibility`] map. The tree itself, expansion
//! flags and the active row are never touched.

use crate::tree::display::{DisplayTree, GroupNode, RowId, RowNode};
use std::collections::HashMap;

/// Lower-cases char by char, so every folded char maps back to exactly one
/// source char. Labels and queries both go through this.
fn fold(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars().flat_map(char::to_lowercase)
}

/// Normalizes raw search input into a query: trimmed and lower-cased.
#[must_use]
pub fn normalize_query(raw: &str) -> String {
    fold(raw.trim()).collect()
}

/// Case-insensitive substring match. `query` must already be lower-cased.
#[must_use]
pub fn label_matches(label: &str, query: &str) -> bool {
    query.is_empty() || fold(label).collect::<String>().contains(query)
}

/// Per-row visibility computed for one query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Visibility {
    rows: HashMap<RowId, bool>,
}

impl Visibility {
    /// Whether a row is visible. Rows unknown to the map are hidden.
    #[must_use]
    pub fn is_visible(&self, id: RowId) -> bool {
        self.rows.get(&id).copied().unwrap_or(false)
    }

    /// Whether a group has at least one visible row.
    #[must_use]
    pub fn group_visible(&self, group: &GroupNode) -> bool {
        group.rows.iter().any(|row| self.is_visible(row.id()))
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.rows.values().filter(|v| **v).count()
    }

    /// `true` when every row in the map is visible.
    #[must_use]
    pub fn all_visible(&self) -> bool {
        self.rows.values().all(|v| *v)
    }

    /// Number of rows the map covers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Computes visibility of every row in `tree` for `query`.
///
/// The query is lower-cased here; callers normally pass the already
/// normalized query held in application state.
///
/// # Example
///
/// ```
/// use navrail::domain::Catalog;
/// use navrail::tree::{compute_visibility, render};
///
/// let tree = render(Catalog::builtin().get("tasks").unwrap());
/// let visibility = compute_visibility(&tree, "review");
/// let visible: Vec<&str> = tree
///     .rows()
///     .into_iter()
///     .filter(|r| visibility.is_visible(r.id))
///     .map(|r| r.label)
///     .collect();
/// assert_eq!(visible, vec!["Due today", "Review design mockups"]);
/// ```
#[must_use]
pub fn compute_visibility(tree: &DisplayTree, query: &str) -> Visibility {
    let query: String = fold(query).collect();
    let mut rows = HashMap::with_capacity(tree.row_count());

    for row in tree.groups.iter().flat_map(|g| &g.rows) {
        match row {
            RowNode::Simple(simple) => {
                rows.insert(simple.id, label_matches(&simple.label, &query));
            }
            RowNode::Parent(parent) => {
                let parent_matches = label_matches(&parent.label, &query);
                let mut any_child = false;

                for child in &parent.children {
                    let child_matches = label_matches(&child.label, &query);
                    any_child |= child_matches;
                    rows.insert(child.id, parent_matches || child_matches);
                }

                rows.insert(parent.id, parent_matches || any_child);
            }
        }
    }

    tracing::trace!(
        query = %query,
        visible = rows.values().filter(|v| **v).count(),
        total = rows.len(),
        "visibility computed"
    );

    Visibility { rows }
}

/// Character ranges of every non-overlapping occurrence of `query` in `label`.
///
/// Ranges are `(start, end)` char indices with exclusive end, suitable for
/// highlighting. Empty query yields no ranges.
#[must_use]
pub fn match_ranges(label: &str, query: &str) -> Vec<(usize, usize)> {
    // Folded chars paired with the index of the label char they came from.
    let hay: Vec<(char, usize)> = label
        .chars()
        .enumerate()
        .flat_map(|(index, c)| c.to_lowercase().map(move |lower| (lower, index)))
        .collect();
    let needle: Vec<char> = fold(query).collect();

    if needle.is_empty() || needle.len() > hay.len() {
        return vec![];
    }

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    let mut i = 0;
    while i + needle.len() <= hay.len() {
        let window = &hay[i..i + needle.len()];
        if window.iter().map(|(c, _)| *c).eq(needle.iter().copied()) {
            let start = window[0].1;
            let end = window[needle.len() - 1].1 + 1;
            if ranges.last().map_or(true, |&(_, prev_end)| start >= prev_end) {
                ranges.push((start, end));
            }
            i += needle.len();
        } else {
            i += 1;
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Catalog;
    use crate::tree::display::RowKind;
    use crate::tree::render::render;

    fn visible_labels(tree: &DisplayTree, query: &str) -> Vec<String> {
        let visibility = compute_visibility(tree, query);
        tree.rows()
            .into_iter()
            .filter(|r| visibility.is_visible(r.id))
            .map(|r| r.label.to_string())
            .collect()
    }

    #[test]
    fn test_empty_query_shows_everything() {
        let catalog = Catalog::builtin();
        for section in catalog.sections() {
            let tree = render(section);
            let visibility = compute_visibility(&tree, "");
            assert_eq!(visibility.len(), tree.row_count());
            assert!(visibility.all_visible(), "section {} not fully visible", section.key);
        }
    }

    #[test]
    fn test_review_scenario() {
        let tree = render(Catalog::builtin().get("tasks").unwrap());
        assert_eq!(
            visible_labels(&tree, "review"),
            vec!["Due today", "Review design mockups"]
        );
    }

    #[test]
    fn test_clearing_query_restores_all() {
        let tree = render(Catalog::builtin().get("tasks").unwrap());
        let filtered = compute_visibility(&tree, "review");
        assert!(!filtered.all_visible());
        assert!(compute_visibility(&tree, "").all_visible());
    }

    #[test]
    fn test_parent_label_match_keeps_all_children() {
        let tree = render(Catalog::builtin().get("settings").unwrap());
        assert_eq!(
            visible_labels(&tree, "integr"),
            vec!["Integrations", "Slack", "Jira", "GitHub"]
        );
    }

    #[test]
    fn test_parent_visible_when_any_child_matches() {
        let catalog = Catalog::builtin();
        for section in catalog.sections() {
            let tree = render(section);
            for row in tree.rows() {
                if let RowKind::Child { parent } = row.kind {
                    let query = row.label.to_lowercase();
                    let visibility = compute_visibility(&tree, &query);
                    assert!(visibility.is_visible(parent));
                    assert!(visibility.is_visible(row.id));
                }
            }
        }
    }

    #[test]
    fn test_leaf_matches_iff_label_contains_query() {
        let tree = render(Catalog::builtin().get("dashboard").unwrap());
        for query in ["o", "ops", "CASH", "zzz", "overview"] {
            let visibility = compute_visibility(&tree, query);
            for row in tree.rows() {
                if row.kind == RowKind::Simple {
                    assert_eq!(
                        visibility.is_visible(row.id),
                        row.label.to_lowercase().contains(&query.to_lowercase())
                    );
                }
            }
        }
    }

    #[test]
    fn test_idempotent() {
        let tree = render(Catalog::builtin().get("tasks").unwrap());
        assert_eq!(compute_visibility(&tree, "te"), compute_visibility(&tree, "te"));
    }

    #[test]
    fn test_no_match_hides_groups() {
        let tree = render(Catalog::builtin().get("tasks").unwrap());
        let visibility = compute_visibility(&tree, "archived");
        let shown: Vec<&str> = tree
            .groups
            .iter()
            .filter(|g| visibility.group_visible(g))
            .map(|g| g.label.as_str())
            .collect();
        assert_eq!(shown, vec!["Other"]);
        assert_eq!(visibility.visible_count(), 1);
    }

    #[test]
    fn test_filter_does_not_touch_expansion() {
        let mut tree = render(Catalog::builtin().get("tasks").unwrap());
        let due = tree.rows().into_iter().find(|r| r.label == "Due today").unwrap().id;
        tree.toggle_expanded(due);
        let before = tree.clone();
        let _ = compute_visibility(&tree, "bug");
        assert_eq!(tree, before);
    }

    #[test]
    fn test_normalize_query() {
        assert_eq!(normalize_query("  Review \t"), "review");
        assert_eq!(normalize_query("   "), "");
    }

    #[test]
    fn test_match_ranges() {
        assert_eq!(match_ranges("Review design mockups", "review"), vec![(0, 6)]);
        assert_eq!(match_ranges("Balance Sheet", "e"), vec![(6, 7), (10, 11), (11, 12)]);
        assert_eq!(match_ranges("aaaa", "aa"), vec![(0, 2), (2, 4)]);
        assert!(match_ranges("Jira", "").is_empty());
        assert!(match_ranges("Jira", "jiraaa").is_empty());
    }

    #[test]
    fn test_expanding_lowercase_still_highlights() {
        // 'İ' lower-cases to two chars; ranges stay in label char indices.
        let query = normalize_query("İstan");
        assert_eq!(query, "i\u{307}stan");
        assert!(label_matches("İstanbul", &query));
        assert_eq!(match_ranges("İstanbul", &query), vec![(0, 5)]);
        assert_eq!(match_ranges("İstanbul", "bul"), vec![(5, 8)]);
    }
}
