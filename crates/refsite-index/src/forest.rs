//! The entity forest
//!
//! `Forest` is the loaded, immutable navigation index. Every lookup is keyed
//! by full path; nothing here resolves an entity by label alone because labels
//! repeat under different parents.

use crate::diagnostics::{IndexError, IndexResult};
use crate::node::{Children, EntityNode};
use crate::path::{display_segments, EntityPath};
use crate::search::{Search, SearchOptions, Walk};
use crate::wire;
use serde::Serialize;
use tracing::debug;

/// Ordered collection of root entity trees
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Forest {
    roots: Vec<EntityNode>,
}

/// A navigation script: variable name plus the forest it defines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavScript {
    /// Script variable name (e.g. "hierarchy")
    pub name: String,
    /// Loaded forest
    pub forest: Forest,
}

/// One step of a breadcrumb trail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb<'a> {
    /// Label of the entity at this level
    pub label: &'a str,
    /// Detail page, if the entity has one
    pub target: Option<&'a str>,
    /// Path from the root to this level
    pub path: EntityPath,
}

impl Forest {
    /// Create a forest from already validated root nodes
    pub fn new(roots: Vec<EntityNode>) -> Self {
        Self { roots }
    }

    /// Parse the nested-list JSON representation
    ///
    /// Fails with `IndexError::Malformed` if the input is not a list of
    /// `[label, target_or_null, children_or_null]` triples or if any node has
    /// neither a target nor children.
    pub fn load(raw: &str) -> IndexResult<Self> {
        let roots = wire::parse_nodes(raw)?;
        debug!(roots = roots.len(), "loaded entity index");
        Ok(Self { roots })
    }

    /// Build a forest from a parsed JSON value
    pub fn from_value(value: serde_json::Value) -> IndexResult<Self> {
        Ok(Self {
            roots: wire::nodes_from_value(value)?,
        })
    }

    /// Parse a generator script of the form `var name = [ ... ];`
    pub fn from_script(src: &str) -> IndexResult<NavScript> {
        let (name, body) = wire::split_script(src)?;
        let forest = Self::load(body)?;
        debug!(name = %name, entities = forest.len(), "loaded navigation script");
        Ok(NavScript {
            name: name.to_string(),
            forest,
        })
    }

    /// Re-emit the wire format as a JSON value
    pub fn to_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }

    /// Re-emit the wire format as a JSON string
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Re-emit the wire format wrapped as `var name = [ ... ];`
    pub fn to_script(&self, name: &str) -> serde_json::Result<String> {
        Ok(wire::wrap_script(name, &self.to_json()?))
    }

    /// Root nodes in declared order
    pub fn roots(&self) -> &[EntityNode] {
        &self.roots
    }

    /// Declared children of `node`, in original order
    pub fn children_of<'a>(&self, node: &'a EntityNode) -> &'a [EntityNode] {
        node.children()
    }

    /// Find the node at `path`, matching one label per level
    pub fn find_by_path<S: AsRef<str>>(&self, path: &[S]) -> IndexResult<&EntityNode> {
        let not_found = || IndexError::not_found(display_segments(path));
        let (first, rest) = path.split_first().ok_or_else(not_found)?;

        let mut node = find_child(&self.roots, first.as_ref()).ok_or_else(not_found)?;
        for segment in rest {
            node = find_child(node.children(), segment.as_ref()).ok_or_else(not_found)?;
        }
        Ok(node)
    }

    /// Pre-order traversal of every node with its path
    pub fn walk(&self) -> Walk<'_> {
        Walk::new(&self.roots)
    }

    /// Case-insensitive label search in document order
    pub fn search(&self, substring: &str) -> Search<'_> {
        self.search_with(substring, SearchOptions::default())
    }

    /// Label search with explicit options
    pub fn search_with(&self, substring: &str, options: SearchOptions) -> Search<'_> {
        Search::new(&self.roots, substring, options)
    }

    /// Breadcrumb trail for `path`, one crumb per level
    pub fn breadcrumbs<S: AsRef<str>>(&self, path: &[S]) -> IndexResult<Vec<Crumb<'_>>> {
        let not_found = || IndexError::not_found(display_segments(path));
        if path.is_empty() {
            return Err(not_found());
        }

        let mut crumbs = Vec::with_capacity(path.len());
        let mut level = self.roots.as_slice();
        let mut prefix = EntityPath::new();
        for segment in path {
            let node = find_child(level, segment.as_ref()).ok_or_else(not_found)?;
            prefix = prefix.child(node.label());
            crumbs.push(Crumb {
                label: node.label(),
                target: node.target(),
                path: prefix.clone(),
            });
            level = node.children();
        }
        Ok(crumbs)
    }

    /// Every path whose node links to `target`
    pub fn paths_to_target(&self, target: &str) -> Vec<EntityPath> {
        self.walk()
            .filter(|hit| hit.node.target() == Some(target))
            .map(|hit| hit.path)
            .collect()
    }

    /// Derive a forest with deferred member lists loaded inline
    ///
    /// `loader` receives each deferred reference and returns the member
    /// forest, or `None` to keep the reference deferred. Loaded members may
    /// themselves contain deferred lists; a reference that reappears inside
    /// its own expansion is rejected.
    pub fn resolve_deferred<F>(&self, mut loader: F) -> IndexResult<Forest>
    where
        F: FnMut(&str) -> IndexResult<Option<Forest>>,
    {
        let mut chain = Vec::new();
        let roots = resolve_nodes(&self.roots, &mut loader, &mut chain)?;
        Ok(Forest { roots })
    }

    /// Total number of nodes
    pub fn len(&self) -> usize {
        self.roots.iter().map(EntityNode::subtree_len).sum()
    }

    /// Whether the forest has no nodes
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

/// First sibling with `label`, in declared order
fn find_child<'a>(siblings: &'a [EntityNode], label: &str) -> Option<&'a EntityNode> {
    siblings.iter().find(|node| node.label() == label)
}

fn resolve_nodes<F>(
    nodes: &[EntityNode],
    loader: &mut F,
    chain: &mut Vec<String>,
) -> IndexResult<Vec<EntityNode>>
where
    F: FnMut(&str) -> IndexResult<Option<Forest>>,
{
    nodes
        .iter()
        .map(|node| resolve_node(node, loader, chain))
        .collect()
}

fn resolve_node<F>(
    node: &EntityNode,
    loader: &mut F,
    chain: &mut Vec<String>,
) -> IndexResult<EntityNode>
where
    F: FnMut(&str) -> IndexResult<Option<Forest>>,
{
    let children = match node.children_field() {
        None => return Ok(node.clone()),
        Some(Children::Inline(nodes)) => Children::Inline(resolve_nodes(nodes, loader, chain)?),
        Some(Children::Deferred(reference)) => {
            if chain.iter().any(|r| r == reference) {
                return Err(IndexError::loader(
                    reference.as_str(),
                    "member list includes itself",
                ));
            }
            match loader(reference)? {
                None => Children::Deferred(reference.clone()),
                Some(members) => {
                    debug!(reference = %reference, members = members.len(), "resolved member list");
                    chain.push(reference.clone());
                    let resolved = resolve_nodes(&members.roots, loader, chain);
                    chain.pop();
                    Children::Inline(resolved?)
                }
            }
        }
    };

    Ok(match node {
        EntityNode::Group { label, .. } => EntityNode::Group {
            label: label.clone(),
            children,
        },
        EntityNode::PageWithChildren { label, target, .. } => EntityNode::PageWithChildren {
            label: label.clone(),
            target: target.clone(),
            children,
        },
        EntityNode::Page { .. } => node.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{sample_forest, SAMPLE_INDEX_JSON, SAMPLE_INDEX_SCRIPT};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_scenario_lookup() {
        let forest = Forest::load(r#"[["A", null, [["B", "b.html", null]]]]"#).unwrap();

        let b = forest.find_by_path(&["A", "B"]).unwrap();
        assert_eq!(b.label(), "B");
        assert_eq!(b.target(), Some("b.html"));

        let err = forest.find_by_path(&["A", "C"]).unwrap_err();
        assert_eq!(err, IndexError::not_found("A::C"));
    }

    #[test]
    fn test_find_by_empty_path() {
        let forest = sample_forest();
        let empty: [&str; 0] = [];
        assert!(forest.find_by_path(&empty).unwrap_err().is_not_found());
    }

    #[test]
    fn test_malformed_node_rejected() {
        let err = Forest::load(r#"[["Foo", null, null]]"#).unwrap_err();
        assert!(matches!(err, IndexError::Malformed { ref path, .. } if path == "Foo"));
    }

    #[test]
    fn test_round_trip_preserves_structure() {
        let input: serde_json::Value = serde_json::from_str(SAMPLE_INDEX_JSON).unwrap();
        let forest = Forest::load(SAMPLE_INDEX_JSON).unwrap();
        assert_eq!(forest.to_value().unwrap(), input);
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&forest.to_json().unwrap()).unwrap(),
            input
        );
    }

    #[test]
    fn test_round_trip_keeps_empty_list_distinct_from_null() {
        let input = json!([["g", null, []], ["p", "p.html", []], ["q", "q.html", null]]);
        let forest = Forest::from_value(input.clone()).unwrap();
        assert_eq!(forest.to_value().unwrap(), input);
    }

    #[test]
    fn test_script_round_trip() {
        let script = Forest::from_script(SAMPLE_INDEX_SCRIPT).unwrap();
        assert_eq!(script.name, "annotated_dup");

        let emitted = script.forest.to_script(&script.name).unwrap();
        let reparsed = Forest::from_script(&emitted).unwrap();
        assert_eq!(reparsed, script);
    }

    #[test]
    fn test_duplicate_labels_resolve_by_path() {
        let forest = sample_forest();
        let boxed_impl = forest.find_by_path(&["crab", "boxed", "impl"]).unwrap();
        let opt_impl = forest.find_by_path(&["crab", "opt", "impl"]).unwrap();

        assert_eq!(boxed_impl.label(), opt_impl.label());
        assert!(!std::ptr::eq(boxed_impl, opt_impl));
        assert_eq!(boxed_impl.children()[0].label(), "BoxStorage");
        assert_eq!(opt_impl.children()[0].label(), "is_option_type");
    }

    #[test]
    fn test_distinct_paths_never_share_a_node() {
        let forest = sample_forest();
        let hits: Vec<_> = forest.walk().collect();
        for (i, a) in hits.iter().enumerate() {
            let found_a = forest.find_by_path(a.path.segments()).unwrap();
            assert!(std::ptr::eq(found_a, a.node));
            for b in &hits[i + 1..] {
                let found_b = forest.find_by_path(b.path.segments()).unwrap();
                assert!(!std::ptr::eq(found_a, found_b), "{} vs {}", a.path, b.path);
            }
        }
    }

    #[test]
    fn test_search_completeness() {
        let forest = sample_forest();
        for needle in ["", "o", "IMPL", "box", "zzz"] {
            let expected: Vec<_> = forest
                .walk()
                .filter(|hit| {
                    hit.node
                        .label()
                        .to_lowercase()
                        .contains(&needle.to_lowercase())
                })
                .map(|hit| hit.path)
                .collect();
            let found: Vec<_> = forest.search(needle).map(|hit| hit.path).collect();
            assert_eq!(found, expected, "needle {needle:?}");
        }
    }

    #[test]
    fn test_search_is_restartable() {
        let forest = sample_forest();
        let first: Vec<_> = forest.search("o").take(1).map(|h| h.path).collect();
        let again: Vec<_> = forest.search("o").take(1).map(|h| h.path).collect();
        assert_eq!(first, again);
    }

    #[test]
    fn test_children_of() {
        let forest = sample_forest();
        let crab = &forest.roots()[0];
        let labels: Vec<_> = forest.children_of(crab).iter().map(|n| n.label()).collect();
        assert_eq!(labels, vec!["boxed", "opt", "unit"]);

        let std = &forest.roots()[1];
        assert!(forest.children_of(std).is_empty());
    }

    #[test]
    fn test_breadcrumbs() {
        let forest = sample_forest();
        let crumbs = forest
            .breadcrumbs(&["crab", "opt", "impl", "is_option_type"])
            .unwrap();
        let labels: Vec<_> = crumbs.iter().map(|c| c.label).collect();
        assert_eq!(labels, vec!["crab", "opt", "impl", "is_option_type"]);
        assert_eq!(crumbs[0].target, Some("namespacecrab.html"));
        assert_eq!(crumbs[1].target, None);
        assert_eq!(crumbs[2].path.to_string(), "crab::opt::impl");

        assert!(forest.breadcrumbs(&["crab", "nope"]).is_err());
    }

    #[test]
    fn test_paths_to_target() {
        let forest = Forest::load(
            r#"[
                ["false_type", null, [["is_const", "s.html", null]]],
                ["true_type", null, [["is_const", "s.html", null]]],
                ["other", "o.html", null]
            ]"#,
        )
        .unwrap();
        let paths: Vec<_> = forest
            .paths_to_target("s.html")
            .into_iter()
            .map(|p| p.to_string())
            .collect();
        assert_eq!(paths, vec!["false_type::is_const", "true_type::is_const"]);
        assert!(forest.paths_to_target("missing.html").is_empty());
    }

    #[test]
    fn test_resolve_deferred() {
        let forest = sample_forest();
        let resolved = forest
            .resolve_deferred(|reference| {
                assert_eq!(reference, "classcrab_1_1boxed_1_1Box");
                Forest::load(r#"[["into_raw", "classcrab_1_1boxed_1_1Box.html#a1", null]]"#)
                    .map(Some)
            })
            .unwrap();

        let boxed = resolved.find_by_path(&["crab", "boxed", "Box"]).unwrap();
        assert_eq!(boxed.deferred_children(), None);
        assert_eq!(boxed.children()[0].label(), "into_raw");

        // the source forest is untouched
        let original = forest.find_by_path(&["crab", "boxed", "Box"]).unwrap();
        assert_eq!(original.deferred_children(), Some("classcrab_1_1boxed_1_1Box"));
        assert_eq!(resolved.len(), forest.len() + 1);
    }

    #[test]
    fn test_resolve_deferred_keeps_unresolved() {
        let forest = sample_forest();
        let resolved = forest.resolve_deferred(|_| Ok(None)).unwrap();
        assert_eq!(resolved, forest);
    }

    #[test]
    fn test_resolve_deferred_rejects_cycles() {
        let forest = Forest::load(r#"[["A", "a.html", "membersA"]]"#).unwrap();
        let err = forest
            .resolve_deferred(|_| Forest::load(r#"[["again", "a.html", "membersA"]]"#).map(Some))
            .unwrap_err();
        assert!(matches!(err, IndexError::Loader { ref reference, .. } if reference == "membersA"));
    }

    #[test]
    fn test_len() {
        assert_eq!(sample_forest().len(), 11);
        assert!(Forest::default().is_empty());
    }
}
