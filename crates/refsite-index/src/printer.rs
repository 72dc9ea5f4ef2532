//! Terminal preview of an entity forest
//!
//! Renders the forest as a box-drawing tree, one entity per line, with the
//! detail page shown after the label.
//!
//! # Example
//!
//! ```
//! use refsite_index::printer::ForestPrinter;
//! use refsite_index::test::sample_forest;
//!
//! let forest = sample_forest();
//! let printer = ForestPrinter::new(&forest, false);
//! assert!(printer.to_string().starts_with("├── crab"));
//! ```

use crate::forest::Forest;
use crate::node::EntityNode;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Terminal forest printer
pub struct ForestPrinter<'a> {
    /// Forest to print
    forest: &'a Forest,
    /// Whether to use colored output
    use_color: bool,
    /// Whether to show target pages
    show_targets: bool,
}

impl<'a> ForestPrinter<'a> {
    /// Create a new printer
    pub fn new(forest: &'a Forest, use_color: bool) -> Self {
        Self {
            forest,
            use_color,
            show_targets: true,
        }
    }

    /// Hide or show target pages
    pub fn show_targets(mut self, show: bool) -> Self {
        self.show_targets = show;
        self
    }

    /// Print directly to stdout with colors
    pub fn print_to_stdout(&self) {
        let choice = if self.use_color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        let mut stdout = StandardStream::stdout(choice);
        if let Err(e) = self.write_colored(&mut stdout) {
            tracing::warn!(error = %e, "failed to print entity tree");
        }
    }

    /// Write with colors to a WriteColor implementor
    pub fn write_colored<W: WriteColor>(&self, w: &mut W) -> io::Result<()> {
        let mut prefix = String::new();
        self.write_level(w, self.forest.roots(), &mut prefix)
    }

    fn write_level<W: WriteColor>(
        &self,
        w: &mut W,
        nodes: &[EntityNode],
        prefix: &mut String,
    ) -> io::Result<()> {
        for (i, node) in nodes.iter().enumerate() {
            let is_last = i == nodes.len() - 1;
            write!(w, "{}{}", prefix, connector(is_last))?;

            let mut spec = ColorSpec::new();
            if node.is_group() {
                spec.set_fg(Some(Color::Magenta));
            } else {
                spec.set_fg(Some(Color::Cyan)).set_bold(true);
            }
            w.set_color(&spec)?;
            write!(w, "{}", node.label())?;
            w.reset()?;

            self.write_suffix_colored(w, node)?;
            writeln!(w)?;

            let len = prefix.len();
            prefix.push_str(continuation(is_last));
            self.write_level(w, node.children(), prefix)?;
            prefix.truncate(len);
        }
        Ok(())
    }

    fn write_suffix_colored<W: WriteColor>(&self, w: &mut W, node: &EntityNode) -> io::Result<()> {
        if !self.show_targets {
            return Ok(());
        }
        w.set_color(ColorSpec::new().set_dimmed(true))?;
        write!(w, "{}", self.suffix(node))?;
        w.reset()
    }

    fn suffix(&self, node: &EntityNode) -> String {
        if !self.show_targets {
            return String::new();
        }
        let mut suffix = String::new();
        if let Some(target) = node.target() {
            suffix.push_str("  ");
            suffix.push_str(target);
        }
        if let Some(reference) = node.deferred_children() {
            suffix.push_str(&format!("  [members: {}]", reference));
        }
        suffix
    }

    fn format_level(&self, f: &mut Formatter<'_>, nodes: &[EntityNode], prefix: &str) -> FmtResult {
        for (i, node) in nodes.iter().enumerate() {
            let is_last = i == nodes.len() - 1;
            writeln!(
                f,
                "{}{}{}{}",
                prefix,
                connector(is_last),
                node.label(),
                self.suffix(node)
            )?;
            let child_prefix = format!("{}{}", prefix, continuation(is_last));
            self.format_level(f, node.children(), &child_prefix)?;
        }
        Ok(())
    }
}

fn connector(is_last: bool) -> &'static str {
    if is_last {
        "└── "
    } else {
        "├── "
    }
}

fn continuation(is_last: bool) -> &'static str {
    if is_last {
        "    "
    } else {
        "│   "
    }
}

impl Display for ForestPrinter<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        self.format_level(f, self.forest.roots(), "")
    }
}
