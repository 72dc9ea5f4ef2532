//! Forest traversal and label search
//!
//! Both iterators walk the forest in document order: pre-order, depth-first,
//! children in declared order. They hold only borrowed nodes and an explicit
//! stack, so a caller that stops early never touches the rest of the forest.
//! Cloning an iterator restarts nothing; it forks the traversal at its
//! current position. Call `Forest::walk` or `Forest::search` again to start
//! over.

use crate::node::EntityNode;
use crate::path::EntityPath;

/// Options for label search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Compare labels case-insensitively
    pub case_insensitive: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            case_insensitive: true,
        }
    }
}

/// A search or walk result: the node and its full path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit<'a> {
    /// Matching node
    pub node: &'a EntityNode,
    /// Full path to the node
    pub path: EntityPath,
}

/// Pre-order traversal over every node of a forest
#[derive(Debug, Clone)]
pub struct Walk<'a> {
    /// Pending nodes with their depth, next node on top
    stack: Vec<(usize, &'a EntityNode)>,
    /// Labels of the current node and its ancestors
    labels: Vec<&'a str>,
}

impl<'a> Walk<'a> {
    pub(crate) fn new(roots: &'a [EntityNode]) -> Self {
        Self {
            stack: roots.iter().rev().map(|node| (0, node)).collect(),
            labels: Vec::new(),
        }
    }

    /// Advance to the next node without building its path
    fn advance(&mut self) -> Option<&'a EntityNode> {
        let (depth, node) = self.stack.pop()?;
        self.labels.truncate(depth);
        self.labels.push(node.label());
        self.stack
            .extend(node.children().iter().rev().map(|child| (depth + 1, child)));
        Some(node)
    }

    /// Path of the node most recently returned by `advance`
    fn current_path(&self) -> EntityPath {
        EntityPath::from_segments(self.labels.iter().copied())
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = SearchHit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.advance()?;
        Some(SearchHit {
            node,
            path: self.current_path(),
        })
    }
}

/// Lazy label search over a forest
#[derive(Debug, Clone)]
pub struct Search<'a> {
    walk: Walk<'a>,
    needle: String,
    options: SearchOptions,
}

impl<'a> Search<'a> {
    pub(crate) fn new(roots: &'a [EntityNode], needle: &str, options: SearchOptions) -> Self {
        let needle = if options.case_insensitive {
            needle.to_lowercase()
        } else {
            needle.to_string()
        };
        Self {
            walk: Walk::new(roots),
            needle,
            options,
        }
    }

    fn matches(&self, label: &str) -> bool {
        if self.options.case_insensitive {
            label.to_lowercase().contains(&self.needle)
        } else {
            label.contains(&self.needle)
        }
    }
}

impl<'a> Iterator for Search<'a> {
    type Item = SearchHit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.walk.advance() {
            if self.matches(node.label()) {
                return Some(SearchHit {
                    node,
                    path: self.walk.current_path(),
                });
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::sample_nodes;
    use pretty_assertions::assert_eq;

    fn paths<'a>(hits: impl Iterator<Item = SearchHit<'a>>) -> Vec<String> {
        hits.map(|hit| hit.path.to_string()).collect()
    }

    #[test]
    fn test_walk_is_preorder() {
        let nodes = sample_nodes();
        assert_eq!(
            paths(Walk::new(&nodes)),
            vec![
                "crab",
                "crab::boxed",
                "crab::boxed::impl",
                "crab::boxed::impl::BoxStorage",
                "crab::boxed::Box",
                "crab::opt",
                "crab::opt::impl",
                "crab::opt::impl::is_option_type",
                "crab::opt::Option",
                "crab::unit",
                "std",
            ]
        );
    }

    #[test]
    fn test_search_case_insensitive() {
        let nodes = sample_nodes();
        let hits = paths(Search::new(&nodes, "BOX", SearchOptions::default()));
        assert_eq!(
            hits,
            vec!["crab::boxed", "crab::boxed::impl::BoxStorage", "crab::boxed::Box"]
        );
    }

    #[test]
    fn test_search_case_sensitive() {
        let nodes = sample_nodes();
        let options = SearchOptions {
            case_insensitive: false,
        };
        let hits = paths(Search::new(&nodes, "Box", options));
        assert_eq!(hits, vec!["crab::boxed::impl::BoxStorage", "crab::boxed::Box"]);
    }

    #[test]
    fn test_search_duplicate_labels_yield_distinct_paths() {
        let nodes = sample_nodes();
        let hits = paths(Search::new(&nodes, "impl", SearchOptions::default()));
        assert_eq!(hits, vec!["crab::boxed::impl", "crab::opt::impl"]);
    }

    #[test]
    fn test_search_stops_early() {
        let nodes = sample_nodes();
        let mut search = Search::new(&nodes, "", SearchOptions::default());
        let first: Vec<_> = search.by_ref().take(2).collect();
        assert_eq!(first.len(), 2);
        // The stack still holds the unvisited remainder
        assert!(!search.walk.stack.is_empty());
        assert_eq!(search.count(), 9);
    }

    #[test]
    fn test_search_empty_needle_matches_all() {
        let nodes = sample_nodes();
        let all = Search::new(&nodes, "", SearchOptions::default()).count();
        assert_eq!(all, Walk::new(&nodes).count());
    }
}
