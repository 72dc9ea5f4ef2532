//! refsite-rehydrate: syntax highlighting for generated source listings
//!
//! Documentation generators render code listings one element per line so
//! each line can be linked and anchored. That layout defeats highlighters,
//! which need the whole listing to tokenize multi-line constructs. This crate
//! reads every listing back out of a page, joins its lines, highlights the
//! result and inserts it next to the original container.
//!
//! ```no_run
//! use refsite_rehydrate::{Rehydrator, RehydrateOptions, SyntectHighlighter};
//!
//! let rehydrator = Rehydrator::new(SyntectHighlighter::new(), RehydrateOptions::default())?;
//! let page = rehydrator.rehydrate_page(r#"<div class="fragment"><div class="line">int x;</div></div>"#)?;
//! assert_eq!(page.report.highlighted, 1);
//! # Ok::<(), refsite_rehydrate::RehydrateError>(())
//! ```

pub mod diagnostics;
pub mod fragment;
pub mod highlight;
pub mod rehydrate;

pub use diagnostics::{HighlightError, RehydrateError, RehydrateResult};
pub use fragment::CodeFragment;
pub use highlight::{HighlightRequest, Highlighter, SyntectHighlighter};
pub use rehydrate::{RehydrateOptions, RehydrateReport, RehydratedPage, Rehydrator, REHYDRATED_ATTR};
