//! SiteBuilder - Main API for post-processing a generated site
//!
//! Wraps [`SiteConfig`] in a builder so a run can be set up from code, a
//! TOML file, or a mix of both.

use crate::config::SiteConfig;
use crate::diagnostics::SiteResult;
use crate::site::Site;
use refsite_rehydrate::RehydrateReport;
use std::path::{Path, PathBuf};

/// What a run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutput {
    /// Output directory
    pub output_dir: PathBuf,
    /// Pages written after rehydration
    pub pages: Vec<PathBuf>,
    /// Files copied unchanged
    pub copied: Vec<PathBuf>,
    /// Navigation trees, search index and stylesheet
    pub artifacts: Vec<PathBuf>,
    /// Navigation scripts loaded
    pub index_count: usize,
    /// Entities across all loaded scripts
    pub entity_count: usize,
    /// Listing counters summed over every page
    pub report: RehydrateReport,
}

impl BuildOutput {
    /// Create a new build output
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            pages: vec![],
            copied: vec![],
            artifacts: vec![],
            index_count: 0,
            entity_count: 0,
            report: RehydrateReport::default(),
        }
    }

    /// Get all written files
    pub fn all_files(&self) -> impl Iterator<Item = &PathBuf> {
        self.pages
            .iter()
            .chain(self.copied.iter())
            .chain(self.artifacts.iter())
    }
}

/// Builder for configuring a site run
///
/// # Example
///
/// ```no_run
/// use refsite::SiteBuilder;
///
/// SiteBuilder::new("build/html")
///     .output_dir("public")
///     .language("cpp")
///     .theme("base16-ocean.dark")
///     .build()
///     .expect("Failed to process site");
/// ```
#[derive(Debug, Clone)]
pub struct SiteBuilder {
    config: SiteConfig,
}

impl SiteBuilder {
    /// Create a builder for the site in `input_dir`
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        Self {
            config: SiteConfig::new(input_dir),
        }
    }

    /// Start from an existing configuration
    pub fn from_config(config: SiteConfig) -> Self {
        Self { config }
    }

    /// Start from a TOML configuration file
    pub fn from_config_file(path: impl AsRef<Path>) -> SiteResult<Self> {
        Ok(Self::from_config(SiteConfig::load(path)?))
    }

    /// Set the output directory
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output_dir = Some(path.into());
        self
    }

    /// Rewrite pages where they are
    pub fn in_place(mut self) -> Self {
        self.config.output_dir = None;
        self
    }

    /// Set the listing language
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.config.language = language.into();
        self
    }

    /// Set the highlighting theme
    pub fn theme(mut self, theme: impl Into<String>) -> Self {
        self.config.theme = theme.into();
        self
    }

    /// Set the listing container selector
    pub fn container_selector(mut self, selector: impl Into<String>) -> Self {
        self.config.container_selector = selector.into();
        self
    }

    /// Set the line selector
    pub fn line_selector(mut self, selector: impl Into<String>) -> Self {
        self.config.line_selector = selector.into();
        self
    }

    /// Enable or disable best-effort highlighting
    pub fn ignore_illegals(mut self, ignore: bool) -> Self {
        self.config.ignore_illegals = ignore;
        self
    }

    /// Replace the list of navigation scripts
    pub fn indices<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.indices = names.into_iter().map(Into::into).collect();
        self
    }

    /// Add a navigation script
    pub fn add_index(mut self, name: impl Into<String>) -> Self {
        self.config.indices.push(name.into());
        self
    }

    /// Enable or disable `search-index.json`
    pub fn write_search_index(mut self, enable: bool) -> Self {
        self.config.write_search_index = enable;
        self
    }

    /// Enable or disable `highlight.css`
    pub fn write_highlight_css(mut self, enable: bool) -> Self {
        self.config.write_highlight_css = enable;
        self
    }

    /// Enable or disable the rendered navigation trees
    pub fn write_nav_trees(mut self, enable: bool) -> Self {
        self.config.write_nav_trees = enable;
        self
    }

    /// The configuration built so far
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Run the pipeline
    pub fn build(self) -> SiteResult<BuildOutput> {
        let mut site = Site::new(self.config)?;
        site.run()
    }
}
