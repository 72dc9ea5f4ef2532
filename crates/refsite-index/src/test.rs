//! Test utilities and fixtures for refsite-index.
//!
//! Provides small hand-built forests that mirror the shapes the generator
//! emits: namespaces with pages, implementation-detail groups without pages,
//! labels reused under different parents, and deferred member lists.
//!
//! # Example
//!
//! ```
//! use refsite_index::test::{sample_forest, SAMPLE_INDEX_JSON};
//!
//! let forest = sample_forest();
//! assert_eq!(forest.roots().len(), 2);
//! assert!(SAMPLE_INDEX_JSON.contains("BoxStorage"));
//! ```

use crate::forest::Forest;
use crate::node::EntityNode;

/// Wire-format rendition of [`sample_forest`]
pub const SAMPLE_INDEX_JSON: &str = r#"[
  ["crab", "namespacecrab.html", [
    ["boxed", "namespacecrab_1_1boxed.html", [
      ["impl", null, [
        ["BoxStorage", "structcrab_1_1boxed_1_1impl_1_1BoxStorage.html", null]
      ]],
      ["Box", "classcrab_1_1boxed_1_1Box.html", "classcrab_1_1boxed_1_1Box"]
    ]],
    ["opt", null, [
      ["impl", null, [
        ["is_option_type", "structcrab_1_1opt_1_1impl_1_1is__option__type.html", null]
      ]],
      ["Option", "classcrab_1_1opt_1_1Option.html", null]
    ]],
    ["unit", "structcrab_1_1unit.html", null]
  ]],
  ["std", "namespacestd.html", null]
]"#;

/// Script-wrapped index in the generator's file layout
pub const SAMPLE_INDEX_SCRIPT: &str = r#"var annotated_dup =
[
    [ "crab", "namespacecrab.html", [
      [ "opt", null, [
        [ "impl", null, [
          [ "is_option_type< opt::Option< T > >", "structcrab_1_1opt_1_1impl_1_1is__option__type_3_01opt_1_1Option_3_01T_01_4_01_4.html", null ]
        ] ],
        [ "Option", "classcrab_1_1opt_1_1Option.html", "classcrab_1_1opt_1_1Option" ]
      ] ]
    ] ]
];"#;

/// Create a grouping node with the given children.
pub fn mock_group(label: &str, children: Vec<EntityNode>) -> EntityNode {
    EntityNode::group(label, children)
}

/// Root nodes of the sample forest.
///
/// Paths in document order:
///
/// ```text
/// crab
/// crab::boxed
/// crab::boxed::impl                 (group)
/// crab::boxed::impl::BoxStorage
/// crab::boxed::Box                  (deferred members)
/// crab::opt                         (group)
/// crab::opt::impl                   (group)
/// crab::opt::impl::is_option_type
/// crab::opt::Option
/// crab::unit
/// std
/// ```
pub fn sample_nodes() -> Vec<EntityNode> {
    vec![
        EntityNode::page_with_children(
            "crab",
            "namespacecrab.html",
            vec![
                EntityNode::page_with_children(
                    "boxed",
                    "namespacecrab_1_1boxed.html",
                    vec![
                        mock_group(
                            "impl",
                            vec![EntityNode::page(
                                "BoxStorage",
                                "structcrab_1_1boxed_1_1impl_1_1BoxStorage.html",
                            )],
                        ),
                        EntityNode::page_with_members(
                            "Box",
                            "classcrab_1_1boxed_1_1Box.html",
                            "classcrab_1_1boxed_1_1Box",
                        ),
                    ],
                ),
                mock_group(
                    "opt",
                    vec![
                        mock_group(
                            "impl",
                            vec![EntityNode::page(
                                "is_option_type",
                                "structcrab_1_1opt_1_1impl_1_1is__option__type.html",
                            )],
                        ),
                        EntityNode::page("Option", "classcrab_1_1opt_1_1Option.html"),
                    ],
                ),
                EntityNode::page("unit", "structcrab_1_1unit.html"),
            ],
        ),
        EntityNode::page("std", "namespacestd.html"),
    ]
}

/// The sample forest as a loaded value.
pub fn sample_forest() -> Forest {
    Forest::new(sample_nodes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_sample_json_matches_nodes() {
        let loaded = Forest::load(SAMPLE_INDEX_JSON).unwrap();
        assert_eq!(loaded, sample_forest());
    }
}
