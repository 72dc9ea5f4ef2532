//! Code block rehydration
//!
//! A generated page renders each source listing as a container element (the
//! "fragment") holding one element per source line. Rehydration rebuilds the
//! listing as a single string, highlights it, and inserts the highlighted
//! block right after the container. The container itself stays in the page.
//!
//! Pages are processed with two streaming passes: the first collects every
//! fragment's lines, the second inserts the rendered blocks. Fragments are
//! matched between passes by their order of appearance.

use crate::diagnostics::{HighlightError, RehydrateError, RehydrateResult};
use crate::fragment::{CodeFragment, FragmentBuilder};
use crate::highlight::{HighlightRequest, Highlighter};
use lol_html::html_content::ContentType;
use lol_html::{rewrite_str, ElementContentHandlers, RewriteStrSettings, Selector};
use std::borrow::Cow;
use std::cell::RefCell;
use tracing::{debug, warn};

/// Attribute set on containers that already received a highlighted block
pub const REHYDRATED_ATTR: &str = "data-rehydrated";

/// Deployment-wide rehydration settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RehydrateOptions {
    /// Language tag handed to the highlighter for every block
    pub language: String,
    /// Selector of source fragment containers
    pub container_selector: String,
    /// Selector of line elements inside a container
    pub line_selector: String,
    /// Ask the highlighter for best-effort output on malformed input
    pub ignore_illegals: bool,
    /// Class set on the inserted `<pre>` and `<code>` elements
    pub block_class: String,
}

impl Default for RehydrateOptions {
    fn default() -> Self {
        Self {
            language: "cpp".to_string(),
            container_selector: ".fragment".to_string(),
            line_selector: ".line".to_string(),
            ignore_illegals: true,
            block_class: "highlight".to_string(),
        }
    }
}

impl RehydrateOptions {
    /// Create options for a language with default selectors
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            ..Default::default()
        }
    }

    /// Set the container selector
    pub fn container_selector(mut self, selector: impl Into<String>) -> Self {
        self.container_selector = selector.into();
        self
    }

    /// Set the line selector
    pub fn line_selector(mut self, selector: impl Into<String>) -> Self {
        self.line_selector = selector.into();
        self
    }

    /// Set the class of inserted blocks
    pub fn block_class(mut self, class: impl Into<String>) -> Self {
        self.block_class = class.into();
        self
    }

    /// Enable or disable best-effort highlighting
    pub fn ignore_illegals(mut self, ignore: bool) -> Self {
        self.ignore_illegals = ignore;
        self
    }
}

/// Outcome counters for one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RehydrateReport {
    /// Containers found on the page
    pub fragments: usize,
    /// Highlighted blocks inserted
    pub highlighted: usize,
    /// Containers skipped because an earlier pass already handled them
    pub already_processed: usize,
    /// Containers left plain because highlighting failed, by position
    pub failures: Vec<(usize, HighlightError)>,
}

impl RehydrateReport {
    /// Merge another page's counters into this one
    pub fn absorb(&mut self, other: RehydrateReport) {
        let offset = self.fragments;
        self.fragments += other.fragments;
        self.highlighted += other.highlighted;
        self.already_processed += other.already_processed;
        self.failures.extend(
            other
                .failures
                .into_iter()
                .map(|(index, err)| (offset + index, err)),
        );
    }

    /// Whether any container fell back to its plain rendition
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// A page after rehydration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RehydratedPage {
    /// Rewritten HTML
    pub html: String,
    /// What happened to each container
    pub report: RehydrateReport,
}

/// Rebuilds and highlights source fragments
pub struct Rehydrator<H> {
    highlighter: H,
    options: RehydrateOptions,
    container_selector: Selector,
    line_selector: Selector,
}

impl<H: Highlighter> Rehydrator<H> {
    /// Create a rehydrator, validating the configured selectors
    pub fn new(highlighter: H, options: RehydrateOptions) -> RehydrateResult<Self> {
        let container_selector = parse_selector(&options.container_selector)?;
        let line_selector = parse_selector(&format!(
            "{} {}",
            options.container_selector, options.line_selector
        ))?;
        Ok(Self {
            highlighter,
            options,
            container_selector,
            line_selector,
        })
    }

    /// The configured options
    pub fn options(&self) -> &RehydrateOptions {
        &self.options
    }

    /// The underlying highlighter
    pub fn highlighter(&self) -> &H {
        &self.highlighter
    }

    /// Rehydrate one fragment into a highlighted block
    ///
    /// An empty fragment still goes through the highlighter and produces an
    /// empty block.
    pub fn rehydrate(&self, fragment: &CodeFragment) -> Result<String, HighlightError> {
        let source = fragment.source();
        let markup = self.highlighter.highlight(&HighlightRequest {
            text: &source,
            language: &self.options.language,
            ignore_illegals: self.options.ignore_illegals,
        })?;
        Ok(self.wrap_block(&markup))
    }

    /// Collect every qualifying fragment on a page, in document order
    pub fn extract_fragments(&self, html: &str) -> RehydrateResult<Vec<CodeFragment>> {
        Ok(self
            .collect(html)?
            .into_iter()
            .filter(|builder| !builder.already_processed)
            .map(FragmentBuilder::finish)
            .collect())
    }

    /// Rehydrate every fragment on a page
    ///
    /// Each container is handled on its own: a highlighting failure leaves
    /// that container plain and inserts nothing for it.
    pub fn rehydrate_page(&self, html: &str) -> RehydrateResult<RehydratedPage> {
        let builders = self.collect(html)?;
        let mut report = RehydrateReport {
            fragments: builders.len(),
            ..Default::default()
        };

        let blocks: Vec<Option<String>> = builders
            .into_iter()
            .enumerate()
            .map(|(index, builder)| {
                if builder.already_processed {
                    report.already_processed += 1;
                    return None;
                }
                let fragment = builder.finish();
                match self.rehydrate(&fragment) {
                    Ok(block) => {
                        report.highlighted += 1;
                        Some(block)
                    }
                    Err(e) => {
                        warn!(fragment = index, error = %e, "highlighting failed, keeping plain fragment");
                        report.failures.push((index, e));
                        None
                    }
                }
            })
            .collect();

        if report.highlighted == 0 {
            return Ok(RehydratedPage {
                html: html.to_string(),
                report,
            });
        }

        let html = self.insert_blocks(html, blocks)?;
        debug!(
            fragments = report.fragments,
            highlighted = report.highlighted,
            "rehydrated page"
        );
        Ok(RehydratedPage { html, report })
    }

    fn wrap_block(&self, markup: &str) -> String {
        let class = html_escape::encode_double_quoted_attribute(&self.options.block_class);
        let language = html_escape::encode_double_quoted_attribute(&self.options.language);
        format!(
            "<pre class=\"{class}\"><code class=\"{class} language-{language}\">{markup}</code></pre>",
            class = class,
            language = language,
            markup = markup,
        )
    }

    /// First pass: gather raw line text per container
    fn collect(&self, html: &str) -> RehydrateResult<Vec<FragmentBuilder>> {
        let fragments: RefCell<Vec<FragmentBuilder>> = RefCell::new(Vec::new());

        rewrite_str(
            html,
            RewriteStrSettings {
                element_content_handlers: vec![
                    (
                        Cow::Borrowed(&self.container_selector),
                        ElementContentHandlers::default().element(|el| {
                            let processed = el.get_attribute(REHYDRATED_ATTR).is_some();
                            fragments.borrow_mut().push(FragmentBuilder::new(processed));
                            Ok(())
                        }),
                    ),
                    (
                        Cow::Borrowed(&self.line_selector),
                        ElementContentHandlers::default()
                            .element(|_el| {
                                if let Some(fragment) = fragments.borrow_mut().last_mut() {
                                    fragment.start_line();
                                }
                                Ok(())
                            })
                            .text(|chunk| {
                                if let Some(fragment) = fragments.borrow_mut().last_mut() {
                                    fragment.push_text(chunk.as_str());
                                }
                                Ok(())
                            }),
                    ),
                ],
                ..RewriteStrSettings::default()
            },
        )?;

        Ok(fragments.into_inner())
    }

    /// Second pass: insert each rendered block after its container
    fn insert_blocks(&self, html: &str, blocks: Vec<Option<String>>) -> RehydrateResult<String> {
        let mut blocks = blocks.into_iter();

        let html = rewrite_str(
            html,
            RewriteStrSettings {
                element_content_handlers: vec![(
                    Cow::Borrowed(&self.container_selector),
                    ElementContentHandlers::default().element(|el| {
                        let Some(block) = blocks.next().flatten() else {
                            return Ok(());
                        };
                        el.set_attribute(REHYDRATED_ATTR, "")?;
                        match el.end_tag_handlers() {
                            Some(handlers) => handlers.push(Box::new(move |end| {
                                end.after(&block, ContentType::Html);
                                Ok(())
                            })),
                            None => el.after(&block, ContentType::Html),
                        }
                        Ok(())
                    }),
                )],
                ..RewriteStrSettings::default()
            },
        )?;
        Ok(html)
    }
}

fn parse_selector(selector: &str) -> RehydrateResult<Selector> {
    selector
        .parse::<Selector>()
        .map_err(|e| RehydrateError::selector(selector, e.to_string()))
}
