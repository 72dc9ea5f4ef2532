//! Core entity node types
//!
//! This module provides `EntityNode`, one documented program entity in the
//! navigation forest. A node is always a page, a grouping of nodes, or both;
//! the "neither" case from the wire format has no representation here.

use serde::ser::SerializeTuple;
use serde::{Serialize, Serializer};

/// Children of a node that has any
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Children {
    /// Children listed in place, in declared order
    Inline(Vec<EntityNode>),
    /// Name of a separately shipped member list (`<reference>.js`)
    Deferred(String),
}

impl Children {
    /// Inline children, empty for a deferred list
    pub fn nodes(&self) -> &[EntityNode] {
        match self {
            Children::Inline(nodes) => nodes,
            Children::Deferred(_) => &[],
        }
    }

    /// Deferred member list reference, if any
    pub fn deferred(&self) -> Option<&str> {
        match self {
            Children::Inline(_) => None,
            Children::Deferred(reference) => Some(reference),
        }
    }
}

impl Serialize for Children {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Children::Inline(nodes) => nodes.serialize(serializer),
            Children::Deferred(reference) => serializer.serialize_str(reference),
        }
    }
}

/// One documented entity (namespace, class, struct, concept, specialization)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityNode {
    /// Entity with a detail page and no children
    Page { label: String, target: String },
    /// Grouping node with no page of its own
    Group { label: String, children: Children },
    /// Entity with a detail page that also contains other entities
    PageWithChildren {
        label: String,
        target: String,
        children: Children,
    },
}

impl EntityNode {
    /// Create a leaf page node
    pub fn page(label: impl Into<String>, target: impl Into<String>) -> Self {
        EntityNode::Page {
            label: label.into(),
            target: target.into(),
        }
    }

    /// Create a grouping node
    pub fn group(label: impl Into<String>, children: Vec<EntityNode>) -> Self {
        EntityNode::Group {
            label: label.into(),
            children: Children::Inline(children),
        }
    }

    /// Create a page node with inline children
    pub fn page_with_children(
        label: impl Into<String>,
        target: impl Into<String>,
        children: Vec<EntityNode>,
    ) -> Self {
        EntityNode::PageWithChildren {
            label: label.into(),
            target: target.into(),
            children: Children::Inline(children),
        }
    }

    /// Create a page node whose members live in a separate list
    pub fn page_with_members(
        label: impl Into<String>,
        target: impl Into<String>,
        members: impl Into<String>,
    ) -> Self {
        EntityNode::PageWithChildren {
            label: label.into(),
            target: target.into(),
            children: Children::Deferred(members.into()),
        }
    }

    /// Display label
    pub fn label(&self) -> &str {
        match self {
            EntityNode::Page { label, .. }
            | EntityNode::Group { label, .. }
            | EntityNode::PageWithChildren { label, .. } => label,
        }
    }

    /// Detail page reference, absent for grouping nodes
    pub fn target(&self) -> Option<&str> {
        match self {
            EntityNode::Page { target, .. } | EntityNode::PageWithChildren { target, .. } => {
                Some(target)
            }
            EntityNode::Group { .. } => None,
        }
    }

    /// Children field, absent for leaf pages
    pub fn children_field(&self) -> Option<&Children> {
        match self {
            EntityNode::Page { .. } => None,
            EntityNode::Group { children, .. }
            | EntityNode::PageWithChildren { children, .. } => Some(children),
        }
    }

    /// Declared children in original order, empty if none
    pub fn children(&self) -> &[EntityNode] {
        self.children_field().map(Children::nodes).unwrap_or(&[])
    }

    /// Deferred member list reference, if the children are not inline
    pub fn deferred_children(&self) -> Option<&str> {
        self.children_field().and_then(Children::deferred)
    }

    /// Whether the node has no children field at all
    pub fn is_leaf(&self) -> bool {
        self.children_field().is_none()
    }

    /// Whether the node is a pure grouping node
    pub fn is_group(&self) -> bool {
        matches!(self, EntityNode::Group { .. })
    }

    /// Kind guessed from the generator's page naming
    pub fn kind(&self) -> EntityKind {
        self.target()
            .map(EntityKind::from_target)
            .unwrap_or(EntityKind::Group)
    }

    /// Number of nodes in this subtree, including this one
    pub fn subtree_len(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(EntityNode::subtree_len)
            .sum::<usize>()
    }
}

/// Re-emits the `[label, target_or_null, children_or_null]` triple
impl Serialize for EntityNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(3)?;
        tuple.serialize_element(self.label())?;
        tuple.serialize_element(&self.target())?;
        tuple.serialize_element(&self.children_field())?;
        tuple.end()
    }
}

/// Kind of documented entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityKind {
    /// Namespace page
    Namespace,
    /// Class page
    Class,
    /// Struct page
    Struct,
    /// Union page
    Union,
    /// Concept page
    Concept,
    /// Grouping node without a page
    Group,
    /// Page of unrecognised kind (member anchors, files)
    Other,
}

impl EntityKind {
    /// Classify a target by the generator's page prefix
    pub fn from_target(target: &str) -> Self {
        const PREFIXES: &[(&str, EntityKind)] = &[
            ("namespace", EntityKind::Namespace),
            ("class", EntityKind::Class),
            ("struct", EntityKind::Struct),
            ("union", EntityKind::Union),
            ("concept", EntityKind::Concept),
        ];
        let page = target.rsplit('/').next().unwrap_or(target);
        if page.contains('#') {
            return EntityKind::Other;
        }
        PREFIXES
            .iter()
            .find(|(prefix, _)| page.starts_with(prefix))
            .map(|(_, kind)| *kind)
            .unwrap_or(EntityKind::Other)
    }

    /// Get display name for this kind
    pub fn display_name(&self) -> &'static str {
        match self {
            EntityKind::Namespace => "Namespace",
            EntityKind::Class => "Class",
            EntityKind::Struct => "Struct",
            EntityKind::Union => "Union",
            EntityKind::Concept => "Concept",
            EntityKind::Group => "Group",
            EntityKind::Other => "Entity",
        }
    }

    /// Get CSS class name for styling
    pub fn css_class(&self) -> &'static str {
        match self {
            EntityKind::Namespace => "kind-namespace",
            EntityKind::Class => "kind-class",
            EntityKind::Struct => "kind-struct",
            EntityKind::Union => "kind-union",
            EntityKind::Concept => "kind-concept",
            EntityKind::Group => "kind-group",
            EntityKind::Other => "kind-other",
        }
    }

    /// Get icon character for this kind
    pub fn icon(&self) -> &'static str {
        match self {
            EntityKind::Namespace => "N",
            EntityKind::Class => "C",
            EntityKind::Struct => "S",
            EntityKind::Union => "U",
            EntityKind::Concept => "R",
            EntityKind::Group => "+",
            EntityKind::Other => "·",
        }
    }
}
