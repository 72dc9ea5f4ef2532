//! Site - post-processing orchestrator
//!
//! Coordinates one run over a generated reference site:
//! 1. Load the configured navigation scripts into forests
//! 2. Pull deferred member lists in from their own scripts
//! 3. Rehydrate the listings of every page, copying everything else
//! 4. Write the navigation trees, search index and highlight stylesheet

use crate::builder::BuildOutput;
use crate::config::SiteConfig;
use crate::diagnostics::{Diagnostic, DiagnosticsCollector, SiteError, SiteResult};
use crate::nav;
use refsite_index::{Forest, ForestPrinter, IndexError, NavScript};
use refsite_rehydrate::{Rehydrator, SyntectHighlighter};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Stylesheet for highlighted listings
pub const HIGHLIGHT_CSS_FILE: &str = "highlight.css";

/// Flat search index over every loaded forest
pub const SEARCH_INDEX_FILE: &str = "search-index.json";

/// File name of the rendered tree for one navigation script
pub fn nav_tree_file(index_name: &str) -> String {
    format!("navtree-{}.html", index_name)
}

/// One post-processing run
pub struct Site {
    /// Configuration
    config: SiteConfig,
    /// Diagnostics collector
    diagnostics: DiagnosticsCollector,
    /// Navigation scripts that loaded
    indices: Vec<NavScript>,
    /// Listing highlighter
    rehydrator: Rehydrator<SyntectHighlighter>,
}

impl Site {
    /// Create a run for the given configuration
    pub fn new(config: SiteConfig) -> SiteResult<Self> {
        config.validate()?;
        let rehydrator = Rehydrator::new(SyntectHighlighter::new(), config.rehydrate_options())
            .map_err(|e| SiteError::config(e.to_string()))?;
        Ok(Self {
            config,
            diagnostics: DiagnosticsCollector::new(),
            indices: Vec::new(),
            rehydrator,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Navigation scripts loaded so far
    pub fn indices(&self) -> &[NavScript] {
        &self.indices
    }

    /// Get the diagnostics collector
    pub fn diagnostics(&self) -> &DiagnosticsCollector {
        &self.diagnostics
    }

    /// Run the whole pipeline
    pub fn run(&mut self) -> SiteResult<BuildOutput> {
        if !self.config.input_dir.is_dir() {
            return Err(SiteError::build(format!(
                "input directory not found: {}",
                self.config.input_dir.display()
            )));
        }

        let output_dir = self.config.effective_output_dir().to_path_buf();
        fs::create_dir_all(&output_dir)?;
        let in_place = same_location(&self.config.input_dir, &output_dir);

        self.load_indices()?;
        self.resolve_members();

        let mut output = BuildOutput::new(&output_dir);
        output.index_count = self.indices.len();
        output.entity_count = self.indices.iter().map(|s| s.forest.len()).sum();

        self.process_pages(&output_dir, in_place, &mut output)?;
        self.write_artifacts(&output_dir, &mut output)?;

        info!(
            pages = output.pages.len(),
            highlighted = output.report.highlighted,
            entities = output.entity_count,
            "site processed"
        );
        self.print_diagnostics();

        Ok(output)
    }

    /// Print every diagnostic and the error/warning summary to stderr
    pub fn print_diagnostics(&self) {
        self.diagnostics.print();
        self.diagnostics.print_summary();
    }

    /// Load every configured navigation script
    ///
    /// A missing script is a warning. A malformed one is an error for that
    /// script only; the others still load.
    pub fn load_indices(&mut self) -> SiteResult<()> {
        self.indices.clear();
        for name in self.config.indices.clone() {
            let path = self.config.input_dir.join(format!("{}.js", name));
            if !path.is_file() {
                self.diagnostics
                    .add(Diagnostic::warning("navigation script not found").in_file(&path));
                continue;
            }

            let content = fs::read_to_string(&path)?;
            match Forest::from_script(&content) {
                Ok(script) => {
                    if script.name != name {
                        debug!(file = %path.display(), variable = %script.name, "script variable differs from file name");
                    }
                    self.diagnostics.info(format!(
                        "Loaded {} entities from {}",
                        script.forest.len(),
                        path.display()
                    ));
                    self.indices.push(NavScript {
                        name,
                        forest: script.forest,
                    });
                }
                Err(e) => {
                    let err = SiteError::index(&path, e);
                    warn!(error = %err, "skipping malformed navigation script");
                    self.diagnostics
                        .add(Diagnostic::error(err.to_string()).in_file(&path));
                }
            }
        }
        Ok(())
    }

    /// Replace deferred member lists with their loaded scripts
    ///
    /// A forest whose members fail to load keeps its deferred references.
    pub fn resolve_members(&mut self) {
        let input_dir = self.config.input_dir.clone();
        for script in &mut self.indices {
            match script
                .forest
                .resolve_deferred(|reference| load_member_script(&input_dir, reference))
            {
                Ok(resolved) => script.forest = resolved,
                Err(e) => {
                    self.diagnostics.add(
                        Diagnostic::warning(format!("member lists not resolved: {}", e))
                            .in_file(input_dir.join(format!("{}.js", script.name))),
                    );
                }
            }
        }
    }

    /// Walk the input, rehydrating pages and copying everything else
    ///
    /// Paths are compared after resolution, so an output directory spelled
    /// differently from the input (`html/../html`, a symlink) still counts as
    /// the same place and nothing is copied onto itself.
    fn process_pages(
        &mut self,
        output_dir: &Path,
        in_place: bool,
        output: &mut BuildOutput,
    ) -> SiteResult<()> {
        let input_dir = fs::canonicalize(&self.config.input_dir)?;
        let resolved_output = fs::canonicalize(output_dir)?;

        for entry in WalkDir::new(&input_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| in_place || e.path() != resolved_output)
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let path = entry.path();
            let relative = path
                .strip_prefix(&input_dir)
                .map_err(|_| SiteError::build(format!("{} escapes the input", path.display())))?;
            let dest = output_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }

            if is_page(path) {
                self.process_page(path, &dest, in_place, output)?;
            } else if !in_place && !same_location(path, &dest) {
                fs::copy(path, &dest)?;
                output.copied.push(dest);
            }
        }
        Ok(())
    }

    fn process_page(
        &mut self,
        path: &Path,
        dest: &Path,
        in_place: bool,
        output: &mut BuildOutput,
    ) -> SiteResult<()> {
        let html = fs::read_to_string(path)?;
        match self.rehydrator.rehydrate_page(&html) {
            Ok(page) => {
                for (index, err) in &page.report.failures {
                    self.diagnostics.add(
                        Diagnostic::warning(format!("listing {} left plain: {}", index + 1, err))
                            .in_file(path),
                    );
                }
                debug!(page = %path.display(), fragments = page.report.fragments, "rehydrated page");
                let changed = page.report.highlighted > 0;
                output.report.absorb(page.report);
                if changed || !in_place {
                    fs::write(dest, page.html)?;
                    output.pages.push(dest.to_path_buf());
                }
            }
            Err(e) => {
                let err = SiteError::rehydrate(path, e);
                warn!(error = %err, "page left unchanged");
                self.diagnostics
                    .add(Diagnostic::error(err.to_string()).in_file(path));
                if !in_place {
                    fs::write(dest, html)?;
                    output.copied.push(dest.to_path_buf());
                }
            }
        }
        Ok(())
    }

    fn write_artifacts(&mut self, output_dir: &Path, output: &mut BuildOutput) -> SiteResult<()> {
        if self.config.write_highlight_css {
            match self.rehydrator.highlighter().theme_css(&self.config.theme) {
                Ok(css) => {
                    let path = output_dir.join(HIGHLIGHT_CSS_FILE);
                    fs::write(&path, css)?;
                    output.artifacts.push(path);
                }
                Err(e) => self
                    .diagnostics
                    .warning(format!("{} not written: {}", HIGHLIGHT_CSS_FILE, e)),
            }
        }

        if self.config.write_search_index {
            let path = output_dir.join(SEARCH_INDEX_FILE);
            fs::write(&path, nav::search_index_json(&self.indices)?)?;
            output.artifacts.push(path);
        }

        if self.config.write_nav_trees {
            for script in &self.indices {
                let path = output_dir.join(nav_tree_file(&script.name));
                fs::write(&path, nav::render_tree_html(&script.forest, &script.name))?;
                output.artifacts.push(path);
            }
        }
        Ok(())
    }

    /// Plain-text preview of every loaded forest, with page targets
    pub fn preview(&self) -> String {
        self.render_preview(true)
    }

    /// Plain-text preview showing labels only
    pub fn preview_plain(&self) -> String {
        self.render_preview(false)
    }

    fn render_preview(&self, show_targets: bool) -> String {
        self.indices
            .iter()
            .map(|script| {
                let printer = ForestPrinter::new(&script.forest, false).show_targets(show_targets);
                format!("{}\n{}", script.name, printer)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Print a colored preview of every loaded forest to stdout
    pub fn print_preview(&self) {
        for script in &self.indices {
            println!("{}", script.name);
            ForestPrinter::new(&script.forest, true).print_to_stdout();
        }
    }
}

/// Whether both paths resolve to the same existing file or directory
fn same_location(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn is_page(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"))
        .unwrap_or(false)
}

/// Load `<dir>/<reference>.js`, or `None` when there is no such script
fn load_member_script(dir: &Path, reference: &str) -> Result<Option<Forest>, IndexError> {
    if reference.contains(['/', '\\']) || reference.starts_with('.') {
        return Ok(None);
    }
    let path: PathBuf = dir.join(format!("{}.js", reference));
    if !path.is_file() {
        return Ok(None);
    }
    let content =
        fs::read_to_string(&path).map_err(|e| IndexError::loader(reference, e.to_string()))?;
    Forest::from_script(&content)
        .map(|script| Some(script.forest))
        .map_err(|e| IndexError::loader(reference, e.to_string()))
}
