//! Section renderer.
//!
//! Turns one catalog [`Section`] into a fresh [`DisplayTree`]. Rendering is pure:
//! the output depends only on the section, never on a previous tree. Groups,
//! items and children keep their declared order, parents start collapsed and
//! row ids are handed out sequentially in document order.

use crate::domain::{Item, Section};
use crate::tree::display::{ChildRow, DisplayTree, GroupNode, ParentRow, RowId, RowNode, SimpleRow};

/// Hands out sequential row ids for one render pass.
#[derive(Debug, Default)]
struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    fn allocate(&mut self) -> RowId {
        let id = RowId(self.next);
        self.next += 1;
        id
    }
}

/// Renders a section into a display tree.
///
/// # Example
///
/// ```
/// use navrail::domain::Catalog;
/// use navrail::tree::render;
///
/// let catalog = Catalog::builtin();
/// let tree = render(catalog.get("account").unwrap());
/// assert_eq!(tree.title, "Account");
/// assert_eq!(tree.row_count(), 3);
/// ```
#[must_use]
pub fn render(section: &Section) -> DisplayTree {
    let _span = tracing::debug_span!("render_section", section = %section.key).entered();

    let mut ids = IdAllocator::default();

    let groups = section
        .groups
        .iter()
        .map(|group| GroupNode {
            label: group.label.clone(),
            rows: group.items.iter().map(|item| render_item(item, &mut ids)).collect(),
        })
        .collect();

    let tree = DisplayTree {
        section_key: section.key.clone(),
        title: section.title.clone(),
        groups,
    };

    tracing::debug!(
        group_count = tree.groups.len(),
        row_count = tree.row_count(),
        "section rendered"
    );

    tree
}

fn render_item(item: &Item, ids: &mut IdAllocator) -> RowNode {
    if item.is_parent() {
        let id = ids.allocate();
        let children = item
            .children
            .iter()
            .map(|label| ChildRow {
                id: ids.allocate(),
                label: label.clone(),
            })
            .collect();

        RowNode::Parent(ParentRow {
            id,
            icon: item.icon.clone(),
            label: item.label.clone(),
            expanded: false,
            children,
        })
    } else {
        RowNode::Simple(SimpleRow {
            id: ids.allocate(),
            icon: item.icon.clone(),
            label: item.label.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Catalog, Group};
    use crate::tree::display::RowKind;
    use std::collections::HashSet;

    fn tasks() -> DisplayTree {
        render(Catalog::builtin().get("tasks").unwrap())
    }

    #[test]
    fn test_preserves_declared_order() {
        let tree = tasks();
        let labels: Vec<&str> = tree.rows().iter().map(|r| r.label).collect();
        assert_eq!(
            labels,
            vec![
                "New task",
                "Filter tasks",
                "Due today",
                "Review design mockups",
                "Update documentation",
                "Test new feature",
                "In progress",
                "API integration",
                "Refactor sidebar",
                "Completed",
                "Accessibility pass",
                "Bug fixes",
                "Priority tasks",
                "Critical launch items",
                "Stakeholder feedback",
                "Archived",
            ]
        );
    }

    #[test]
    fn test_ids_unique_and_sequential() {
        let tree = tasks();
        let ids: Vec<RowId> = tree.rows().iter().map(|r| r.id).collect();
        let unique: HashSet<RowId> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len());
        assert_eq!(ids.first(), Some(&RowId(0)));
        assert_eq!(ids.last(), Some(&RowId(u32::try_from(ids.len() - 1).unwrap())));
    }

    #[test]
    fn test_row_kinds_and_default_collapsed() {
        let tree = tasks();
        let due = tree.rows().into_iter().find(|r| r.label == "Due today").unwrap();
        assert_eq!(due.kind, RowKind::Parent);
        assert!(!tree.is_expanded(due.id));

        let review = tree
            .rows()
            .into_iter()
            .find(|r| r.label == "Review design mockups")
            .unwrap();
        assert_eq!(review.kind, RowKind::Child { parent: due.id });

        let archived = tree.rows().into_iter().find(|r| r.label == "Archived").unwrap();
        assert_eq!(archived.kind, RowKind::Simple);
    }

    #[test]
    fn test_deterministic() {
        let catalog = Catalog::builtin();
        let section = catalog.get("settings").unwrap();
        assert_eq!(render(section), render(section));
    }

    #[test]
    fn test_item_with_empty_children_is_simple() {
        let section = Section {
            key: "x".to_string(),
            title: "X".to_string(),
            icon: "circle".to_string(),
            groups: vec![Group {
                label: "G".to_string(),
                items: vec![Item {
                    icon: "add".to_string(),
                    label: "Lonely".to_string(),
                    children: vec![],
                }],
            }],
        };
        let tree = render(&section);
        assert!(matches!(tree.groups[0].rows[0], RowNode::Simple(_)));
    }

    #[test]
    fn test_toggle_expanded_only_parents() {
        let mut tree = tasks();
        let due = tree.rows().into_iter().find(|r| r.label == "Due today").unwrap().id;
        let progress = tree.rows().into_iter().find(|r| r.label == "In progress").unwrap().id;
        let new_task = tree.rows().into_iter().find(|r| r.label == "New task").unwrap().id;

        assert!(tree.toggle_expanded(due));
        assert!(tree.is_expanded(due));
        assert!(!tree.is_expanded(progress));

        assert!(!tree.toggle_expanded(new_task));
        assert!(!tree.toggle_expanded(RowId(999)));
    }

    #[test]
    fn test_parent_of_child() {
        let tree = tasks();
        let due = tree.rows().into_iter().find(|r| r.label == "Due today").unwrap().id;
        let review = tree
            .rows()
            .into_iter()
            .find(|r| r.label == "Review design mockups")
            .unwrap()
            .id;

        assert_eq!(tree.parent_of(review).map(|p| p.id), Some(due));
        assert!(tree.parent_of(due).is_none());
    }
}
