//! refsite: post-processing for generated C++ API reference sites
//!
//! Takes the static output of a documentation generator and finishes it:
//! - loads the navigation scripts into entity forests ([`refsite_index`])
//! - re-renders every line-split source listing with syntax highlighting
//!   ([`refsite_rehydrate`])
//! - writes navigation trees, a flat search index and the highlight
//!   stylesheet next to the pages
//!
//! # Usage
//!
//! ```no_run
//! use refsite::SiteBuilder;
//!
//! let output = SiteBuilder::new("build/html")
//!     .output_dir("public")
//!     .build()?;
//! println!("{} listings highlighted", output.report.highlighted);
//! # Ok::<(), refsite::SiteError>(())
//! ```

pub mod builder;
pub mod config;
pub mod diagnostics;
pub mod nav;
pub mod site;

pub use builder::{BuildOutput, SiteBuilder};
pub use config::SiteConfig;
pub use diagnostics::{Diagnostic, DiagnosticSeverity, DiagnosticsCollector, SiteError, SiteResult};
pub use site::Site;

pub use refsite_index;
pub use refsite_rehydrate;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
