//! Source fragments
//!
//! A `CodeFragment` is the ordered list of line strings pulled out of one
//! source fragment container. It lives only for one rehydration pass.

/// Ordered line texts of one source fragment container
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeFragment {
    lines: Vec<String>,
}

impl CodeFragment {
    /// Create a fragment from already decoded line texts
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a fragment from raw HTML text of each line, decoding entities
    pub fn from_raw_lines<I, S>(raw_lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            lines: raw_lines
                .into_iter()
                .map(|raw| html_escape::decode_html_entities(raw.as_ref()).into_owned())
                .collect(),
        }
    }

    /// Line texts in document order
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the container had no line elements
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The reconstructed source: lines joined by a single `\n`
    ///
    /// N lines give N-1 separators. Empty lines stay as empty strings and no
    /// trailing newline is added.
    pub fn source(&self) -> String {
        self.lines.join("\n")
    }
}

/// Accumulates raw line text while a page is streamed
#[derive(Debug, Default)]
pub(crate) struct FragmentBuilder {
    /// Container was already processed by an earlier pass
    pub(crate) already_processed: bool,
    raw_lines: Vec<String>,
}

impl FragmentBuilder {
    pub(crate) fn new(already_processed: bool) -> Self {
        Self {
            already_processed,
            raw_lines: Vec::new(),
        }
    }

    /// Start a new line element
    pub(crate) fn start_line(&mut self) {
        self.raw_lines.push(String::new());
    }

    /// Append raw text to the current line
    pub(crate) fn push_text(&mut self, text: &str) {
        if let Some(line) = self.raw_lines.last_mut() {
            line.push_str(text);
        }
    }

    pub(crate) fn finish(self) -> CodeFragment {
        CodeFragment::from_raw_lines(self.raw_lines)
    }
}
