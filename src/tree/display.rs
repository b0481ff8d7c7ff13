//! Display tree node types.
//!
//! A [`DisplayTree`] is the rendered form of one catalog section: an ordered list
//! of group nodes, each holding simple rows and parent rows with their children.
//! Row kinds are a tagged enum resolved at render time, so consumers match on
//! [`RowNode`] instead of inspecting rows at runtime.

use serde::{Deserialize, Serialize};

/// Identifier of a row within one render pass.
///
/// Ids are unique inside a single [`DisplayTree`] and are reassigned every time a
/// section is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RowId(pub u32);

impl std::fmt::Display for RowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "row-{}", self.0)
    }
}

/// A directly selectable row without children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleRow {
    pub id: RowId,
    pub icon: String,
    pub label: String,
}

/// A selectable leaf nested under a [`ParentRow`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildRow {
    pub id: RowId,
    pub label: String,
}

/// An expandable row. Never active itself; only its children are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentRow {
    pub id: RowId,
    pub icon: String,
    pub label: String,
    pub expanded: bool,
    pub children: Vec<ChildRow>,
}

/// A top-level row inside a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowNode {
    Simple(SimpleRow),
    Parent(ParentRow),
}

impl RowNode {
    #[must_use]
    pub const fn id(&self) -> RowId {
        match self {
            Self::Simple(row) => row.id,
            Self::Parent(row) => row.id,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Simple(row) => &row.label,
            Self::Parent(row) => &row.label,
        }
    }

    #[must_use]
    pub fn icon(&self) -> &str {
        match self {
            Self::Simple(row) => &row.icon,
            Self::Parent(row) => &row.icon,
        }
    }
}

/// A labeled block of rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupNode {
    pub label: String,
    pub rows: Vec<RowNode>,
}

/// Row classification returned by tree lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Simple,
    Parent,
    Child {
        /// The parent row this child belongs to.
        parent: RowId,
    },
}

impl RowKind {
    /// Simple rows and children can be marked active; parents cannot.
    #[must_use]
    pub const fn is_selectable(self) -> bool {
        !matches!(self, Self::Parent)
    }
}

/// Flattened, borrowed view of any row in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRef<'a> {
    pub id: RowId,
    pub label: &'a str,
    pub kind: RowKind,
}

/// The rendered form of one section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayTree {
    /// Key of the section this tree was rendered from.
    pub section_key: String,
    /// Section title for the context rail header.
    pub title: String,
    pub groups: Vec<GroupNode>,
}

impl DisplayTree {
    /// Every row in document order: each parent is followed by its children.
    #[must_use]
    pub fn rows(&self) -> Vec<RowRef<'_>> {
        let mut out = Vec::new();
        for group in &self.groups {
            for row in &group.rows {
                match row {
                    RowNode::Simple(simple) => out.push(RowRef {
                        id: simple.id,
                        label: &simple.label,
                        kind: RowKind::Simple,
                    }),
                    RowNode::Parent(parent) => {
                        out.push(RowRef {
                            id: parent.id,
                            label: &parent.label,
                            kind: RowKind::Parent,
                        });
                        out.extend(parent.children.iter().map(|child| RowRef {
                            id: child.id,
                            label: &child.label,
                            kind: RowKind::Child { parent: parent.id },
                        }));
                    }
                }
            }
        }
        out
    }

    /// Number of rows including children.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.groups
            .iter()
            .flat_map(|g| &g.rows)
            .map(|row| match row {
                RowNode::Simple(_) => 1,
                RowNode::Parent(parent) => 1 + parent.children.len(),
            })
            .sum()
    }

    /// Looks up any row by id.
    #[must_use]
    pub fn row(&self, id: RowId) -> Option<RowRef<'_>> {
        self.rows().into_iter().find(|row| row.id == id)
    }

    /// Classifies a row id, or `None` if it is not part of this tree.
    #[must_use]
    pub fn row_kind(&self, id: RowId) -> Option<RowKind> {
        self.row(id).map(|row| row.kind)
    }

    /// Returns the parent a child row is nested under.
    #[must_use]
    pub fn parent_of(&self, child: RowId) -> Option<&ParentRow> {
        self.groups
            .iter()
            .flat_map(|g| &g.rows)
            .find_map(|row| match row {
                RowNode::Parent(parent) if parent.children.iter().any(|c| c.id == child) => {
                    Some(parent)
                }
                _ => None,
            })
    }

    /// Returns the parent row with the given id.
    #[must_use]
    pub fn parent(&self, id: RowId) -> Option<&ParentRow> {
        self.groups
            .iter()
            .flat_map(|g| &g.rows)
            .find_map(|row| match row {
                RowNode::Parent(parent) if parent.id == id => Some(parent),
                _ => None,
            })
    }

    fn parent_mut(&mut self, id: RowId) -> Option<&mut ParentRow> {
        self.groups
            .iter_mut()
            .flat_map(|g| &mut g.rows)
            .find_map(|row| match row {
                RowNode::Parent(parent) if parent.id == id => Some(parent),
                _ => None,
            })
    }

    /// Flips `expanded` on one parent row.
    ///
    /// Returns `false` without changing anything if `id` is not a parent row.
    pub fn toggle_expanded(&mut self, id: RowId) -> bool {
        match self.parent_mut(id) {
            Some(parent) => {
                parent.expanded = !parent.expanded;
                true
            }
            None => false,
        }
    }

    /// Whether the parent row `id` is expanded. `false` for non-parents.
    #[must_use]
    pub fn is_expanded(&self, id: RowId) -> bool {
        self.parent(id).is_some_and(|p| p.expanded)
    }
}
