//! Entity paths
//!
//! An `EntityPath` is the identity of a node: the labels of its ancestors
//! followed by its own label. Labels repeat across the forest, paths do not.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Full path of an entity, one label per level
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityPath(Vec<String>);

impl EntityPath {
    /// Create an empty path
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a path from label segments
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Return a new path with `label` appended
    pub fn child(&self, label: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(label.into());
        Self(segments)
    }

    /// Label segments, root first
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Final label, if any
    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Path of the parent entity
    pub fn parent(&self) -> Option<EntityPath> {
        if self.0.is_empty() {
            return None;
        }
        Some(Self(self.0[..self.0.len() - 1].to_vec()))
    }

    /// Number of segments
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Whether the path has no segments
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for EntityPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_segments(iter)
    }
}

impl AsRef<[String]> for EntityPath {
    fn as_ref(&self) -> &[String] {
        &self.0
    }
}

/// Joins segments with `::`. Display only: labels may contain `::` themselves.
impl fmt::Display for EntityPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("::")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

/// Render an arbitrary segment slice the way `EntityPath` displays
pub(crate) fn display_segments<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("::")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_display() {
        let path = EntityPath::from_segments(["crab", "opt", "impl"]);
        assert_eq!(path.to_string(), "crab::opt::impl");
        assert_eq!(EntityPath::new().to_string(), "");
    }

    #[test]
    fn test_path_parent_and_child() {
        let path = EntityPath::from_segments(["crab", "boxed"]);
        let child = path.child("Box");
        assert_eq!(child.depth(), 3);
        assert_eq!(child.last(), Some("Box"));
        assert_eq!(child.parent(), Some(path));
        assert_eq!(EntityPath::new().parent(), None);
    }

    #[test]
    fn test_paths_with_same_leaf_differ() {
        let a = EntityPath::from_segments(["crab", "opt", "impl"]);
        let b = EntityPath::from_segments(["crab", "mem", "impl"]);
        assert_eq!(a.last(), b.last());
        assert_ne!(a, b);
    }
}
