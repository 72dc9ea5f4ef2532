//! Site configuration
//!
//! A run is described by a [`SiteConfig`], usually read from a
//! `refsite.toml` next to the generated site:
//!
//! ```toml
//! input_dir = "build/html"
//! output_dir = "public"
//! language = "cpp"
//! theme = "InspiredGitHub"
//! indices = ["annotated_dup", "hierarchy"]
//! ```
//!
//! Every key except `input_dir` has a default.

use crate::diagnostics::{SiteError, SiteResult};
use refsite_rehydrate::RehydrateOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Navigation scripts the generator emits for a C++ project
pub const DEFAULT_INDICES: &[&str] = &["annotated_dup", "hierarchy", "concepts"];

/// Configuration for one site run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Directory holding the generated site
    pub input_dir: PathBuf,
    /// Where to write the processed site; absent rewrites in place
    pub output_dir: Option<PathBuf>,
    /// Language tag for every listing
    pub language: String,
    /// Highlighting theme for `highlight.css`
    pub theme: String,
    /// Selector of listing containers
    pub container_selector: String,
    /// Selector of line elements inside a container
    pub line_selector: String,
    /// Best-effort highlighting of input the grammar rejects
    pub ignore_illegals: bool,
    /// Navigation script names, without the `.js` extension
    pub indices: Vec<String>,
    /// Write `search-index.json`
    pub write_search_index: bool,
    /// Write `highlight.css`
    pub write_highlight_css: bool,
    /// Write one `navtree-<name>.html` per index
    pub write_nav_trees: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        let rehydrate = RehydrateOptions::default();
        Self {
            input_dir: PathBuf::from("html"),
            output_dir: None,
            language: rehydrate.language,
            theme: "InspiredGitHub".to_string(),
            container_selector: rehydrate.container_selector,
            line_selector: rehydrate.line_selector,
            ignore_illegals: rehydrate.ignore_illegals,
            indices: DEFAULT_INDICES.iter().map(|s| s.to_string()).collect(),
            write_search_index: true,
            write_highlight_css: true,
            write_nav_trees: true,
        }
    }
}

impl SiteConfig {
    /// Create a config for a site directory
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            ..Default::default()
        }
    }

    /// Parse a TOML document
    ///
    /// A relative `input_dir` or `output_dir` stays relative; see
    /// [`SiteConfig::load`] for file-relative resolution.
    pub fn from_toml_str(content: &str) -> SiteResult<Self> {
        let config: SiteConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML file, resolving relative directories against its location
    pub fn load(path: impl AsRef<Path>) -> SiteResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&content)?;

        if let Some(base) = path.parent() {
            if config.input_dir.is_relative() {
                config.input_dir = base.join(&config.input_dir);
            }
            if let Some(ref output) = config.output_dir {
                if output.is_relative() {
                    config.output_dir = Some(base.join(output));
                }
            }
        }
        Ok(config)
    }

    /// Check values serde cannot
    pub fn validate(&self) -> SiteResult<()> {
        if self.language.trim().is_empty() {
            return Err(SiteError::config("language must not be empty"));
        }
        if let Some(name) = self.indices.iter().find(|name| !is_script_name(name)) {
            return Err(SiteError::config(format!(
                "invalid index name '{}': expected a bare file stem",
                name
            )));
        }
        Ok(())
    }

    /// The directory pages are written to
    pub fn effective_output_dir(&self) -> &Path {
        self.output_dir.as_deref().unwrap_or(&self.input_dir)
    }

    /// Whether pages are rewritten where they are, comparing the paths as
    /// written
    ///
    /// [`Site::run`](crate::Site::run) compares the resolved directories
    /// instead, so an aliased output directory is also treated as in place.
    pub fn in_place(&self) -> bool {
        self.output_dir.is_none() || self.output_dir.as_deref() == Some(self.input_dir.as_path())
    }

    /// Options for the listing rehydrator
    pub fn rehydrate_options(&self) -> RehydrateOptions {
        RehydrateOptions::new(self.language.clone())
            .container_selector(self.container_selector.clone())
            .line_selector(self.line_selector.clone())
            .ignore_illegals(self.ignore_illegals)
    }
}

fn is_script_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = SiteConfig::new("site");
        assert_eq!(config.language, "cpp");
        assert_eq!(config.container_selector, ".fragment");
        assert_eq!(config.line_selector, ".line");
        assert!(config.ignore_illegals);
        assert_eq!(config.indices, vec!["annotated_dup", "hierarchy", "concepts"]);
        assert!(config.in_place());
        assert_eq!(config.effective_output_dir(), Path::new("site"));
    }

    #[test]
    fn test_partial_toml() {
        let config = SiteConfig::from_toml_str(
            r#"
            input_dir = "build/html"
            output_dir = "public"
            language = "rust"
            indices = ["hierarchy"]
            write_nav_trees = false
            "#,
        )
        .unwrap();

        assert_eq!(config.input_dir, PathBuf::from("build/html"));
        assert_eq!(config.output_dir, Some(PathBuf::from("public")));
        assert_eq!(config.language, "rust");
        assert_eq!(config.indices, vec!["hierarchy"]);
        assert!(!config.write_nav_trees);
        assert!(config.write_search_index);
        assert!(!config.in_place());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = SiteConfig::from_toml_str("langauge = \"cpp\"").unwrap_err();
        assert!(matches!(err, SiteError::Config(_)));
    }

    #[test]
    fn test_invalid_index_name() {
        let err = SiteConfig::from_toml_str("indices = [\"../etc/passwd\"]").unwrap_err();
        assert!(err.to_string().contains("../etc/passwd"));
    }

    #[test]
    fn test_empty_language() {
        assert!(SiteConfig::from_toml_str("language = \" \"").is_err());
    }

    #[test]
    fn test_load_resolves_relative_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("refsite.toml");
        fs::write(&path, "input_dir = \"html\"\noutput_dir = \"out\"\n").unwrap();

        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.input_dir, temp_dir.path().join("html"));
        assert_eq!(config.output_dir, Some(temp_dir.path().join("out")));
    }

    #[test]
    fn test_rehydrate_options() {
        let mut config = SiteConfig::new("site");
        config.language = "c".to_string();
        config.ignore_illegals = false;
        let options = config.rehydrate_options();
        assert_eq!(options.language, "c");
        assert!(!options.ignore_illegals);
        assert_eq!(options.container_selector, ".fragment");
    }
}
