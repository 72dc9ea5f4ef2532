//! refsite-index: the entity index behind a generated API reference
//!
//! The documentation generator ships its navigation data as nested lists of
//! `[label, target_or_null, children_or_null]` triples. This crate loads that
//! data into an immutable [`Forest`] of [`EntityNode`]s and answers the three
//! questions a reference site asks of it:
//! - what are the children of this node (tree widgets)
//! - which node lives at this full path (deep links, breadcrumbs)
//! - which nodes have a label containing this text (filter-as-you-type)
//!
//! Labels are not unique across the forest (`impl` appears under many
//! namespaces), so every lookup is keyed by [`EntityPath`].
//!
//! # Usage
//!
//! ```
//! use refsite_index::Forest;
//!
//! let forest = Forest::load(r#"[["A", null, [["B", "b.html", null]]]]"#).unwrap();
//! let b = forest.find_by_path(&["A", "B"]).unwrap();
//! assert_eq!(b.target(), Some("b.html"));
//!
//! let first = forest.search("b").next().unwrap();
//! assert_eq!(first.path.to_string(), "A::B");
//! ```

// Core types
pub mod diagnostics;
pub mod forest;
pub mod node;
pub mod path;

// Traversal and wire format
pub mod search;
mod wire;

// Output
pub mod printer;

// Fixtures shared with downstream crate tests
pub mod test;

pub use diagnostics::{IndexError, IndexResult};
pub use forest::{Crumb, Forest, NavScript};
pub use node::{Children, EntityKind, EntityNode};
pub use path::EntityPath;
pub use printer::ForestPrinter;
pub use search::{Search, SearchHit, SearchOptions, Walk};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
