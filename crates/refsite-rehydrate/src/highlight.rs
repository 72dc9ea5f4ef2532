//! Highlighting capability
//!
//! The rehydrator treats highlighting as a black box: source text and a
//! language tag in, markup with styling spans out, or an error. The default
//! engine is syntect with its bundled grammars, emitting class-based spans
//! that a theme stylesheet colours.

use crate::diagnostics::HighlightError;
use syntect::highlighting::ThemeSet;
use syntect::html::{css_for_theme_with_class_style, ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;
use tracing::debug;

/// One highlighting call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightRequest<'a> {
    /// Reconstructed source text
    pub text: &'a str,
    /// Language tag (e.g. "cpp")
    pub language: &'a str,
    /// Keep going on input the grammar cannot handle
    pub ignore_illegals: bool,
}

/// Something that turns source text into highlighted markup
pub trait Highlighter {
    /// Highlight `request.text`, returning inner markup with styling spans
    fn highlight(&self, request: &HighlightRequest<'_>) -> Result<String, HighlightError>;
}

impl<H: Highlighter + ?Sized> Highlighter for &H {
    fn highlight(&self, request: &HighlightRequest<'_>) -> Result<String, HighlightError> {
        (**self).highlight(request)
    }
}

/// Highlighter backed by syntect's bundled syntaxes
pub struct SyntectHighlighter {
    syntaxes: SyntaxSet,
    class_style: ClassStyle,
}

impl SyntectHighlighter {
    /// Create a highlighter with the default syntax set
    pub fn new() -> Self {
        Self::with_syntaxes(SyntaxSet::load_defaults_newlines())
    }

    /// Create a highlighter over a custom syntax set
    pub fn with_syntaxes(syntaxes: SyntaxSet) -> Self {
        Self {
            syntaxes,
            class_style: ClassStyle::Spaced,
        }
    }

    /// Whether a grammar exists for `language`
    pub fn supports(&self, language: &str) -> bool {
        self.syntaxes.find_syntax_by_token(language).is_some()
    }

    /// Stylesheet for the class names this highlighter emits
    ///
    /// `theme` names one of syntect's bundled themes (e.g. "InspiredGitHub",
    /// "base16-ocean.dark").
    pub fn theme_css(&self, theme: &str) -> Result<String, HighlightError> {
        let themes = ThemeSet::load_defaults();
        let theme = themes
            .themes
            .get(theme)
            .ok_or_else(|| HighlightError::unavailable(format!("unknown theme '{}'", theme)))?;
        css_for_theme_with_class_style(theme, self.class_style)
            .map_err(|e| HighlightError::engine(e.to_string()))
    }
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter for SyntectHighlighter {
    fn highlight(&self, request: &HighlightRequest<'_>) -> Result<String, HighlightError> {
        let syntax = self
            .syntaxes
            .find_syntax_by_token(request.language)
            .ok_or_else(|| HighlightError::UnknownLanguage(request.language.to_string()))?;

        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntaxes, self.class_style);

        let mut consumed = 0;
        for line in LinesWithEndings::from(request.text) {
            if let Err(e) = generator.parse_html_for_line_which_includes_newline(line) {
                if !request.ignore_illegals {
                    return Err(HighlightError::engine(e.to_string()));
                }
                debug!(error = %e, offset = consumed, "highlighting stopped, emitting rest as plain text");
                let mut html = generator.finalize();
                html.push_str(&html_escape::encode_text(&request.text[consumed..]));
                return Ok(html);
            }
            consumed += line.len();
        }

        Ok(generator.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(text: &str) -> HighlightRequest<'_> {
        HighlightRequest {
            text,
            language: "cpp",
            ignore_illegals: true,
        }
    }

    #[test]
    fn test_highlights_keyword() {
        let highlighter = SyntectHighlighter::new();
        let html = highlighter.highlight(&request("int x = 1;")).unwrap();
        assert!(html.contains("<span class=\""), "expected spans: {html}");
        assert!(html.contains("int"));
    }

    #[test]
    fn test_escapes_markup() {
        let highlighter = SyntectHighlighter::new();
        let html = highlighter
            .highlight(&request("Box<T> b = a && c;"))
            .unwrap();
        assert!(html.contains("&lt;"), "expected escaped angle bracket: {html}");
        assert!(!html.contains("<T>"));
    }

    #[test]
    fn test_keeps_line_breaks() {
        let highlighter = SyntectHighlighter::new();
        let html = highlighter
            .highlight(&request("int x = 1;\n\nreturn x;"))
            .unwrap();
        assert_eq!(html.matches('\n').count(), 2, "{html}");
    }

    #[test]
    fn test_empty_input() {
        let highlighter = SyntectHighlighter::new();
        let html = highlighter.highlight(&request("")).unwrap();
        assert!(!html.contains("int"));
    }

    #[test]
    fn test_tolerates_broken_syntax() {
        let highlighter = SyntectHighlighter::new();
        let html = highlighter.highlight(&request("template< class T\n{{ )) ]")).unwrap();
        assert!(html.contains("template"));
    }

    #[test]
    fn test_unknown_language() {
        let highlighter = SyntectHighlighter::new();
        let err = highlighter
            .highlight(&HighlightRequest {
                text: "x",
                language: "no-such-language",
                ignore_illegals: true,
            })
            .unwrap_err();
        assert_eq!(
            err,
            HighlightError::UnknownLanguage("no-such-language".to_string())
        );
    }

    #[test]
    fn test_supports() {
        let highlighter = SyntectHighlighter::new();
        assert!(highlighter.supports("cpp"));
        assert!(!highlighter.supports("no-such-language"));
    }

    #[test]
    fn test_theme_css() {
        let highlighter = SyntectHighlighter::new();
        let css = highlighter.theme_css("InspiredGitHub").unwrap();
        assert!(css.contains('{'));
        assert!(highlighter.theme_css("missing-theme").is_err());
    }
}
