//! Error types and diagnostics
//!
//! `SiteError` aborts a run. Everything recoverable (a missing navigation
//! script, a listing the highlighter rejected) is recorded as a
//! [`Diagnostic`] and the run continues.

use refsite_index::IndexError;
use refsite_rehydrate::RehydrateError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for site operations
pub type SiteResult<T> = Result<T, SiteError>;

/// Main error type for refsite
#[derive(Debug, Error)]
pub enum SiteError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Navigation index error
    #[error("Index error in {file}: {source}")]
    Index {
        file: PathBuf,
        #[source]
        source: IndexError,
    },

    /// Page rewriting error
    #[error("Rehydration error in {file}: {source}")]
    Rehydrate {
        file: PathBuf,
        #[source]
        source: RehydrateError,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Build error
    #[error("Build error: {0}")]
    Build(String),
}

impl SiteError {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        SiteError::Config(message.into())
    }

    /// Create an index error for a file
    pub fn index(file: impl Into<PathBuf>, source: IndexError) -> Self {
        SiteError::Index {
            file: file.into(),
            source,
        }
    }

    /// Create a rehydration error for a file
    pub fn rehydrate(file: impl Into<PathBuf>, source: RehydrateError) -> Self {
        SiteError::Rehydrate {
            file: file.into(),
            source,
        }
    }

    /// Create a build error
    pub fn build(message: impl Into<String>) -> Self {
        SiteError::Build(message.into())
    }
}

impl From<toml::de::Error> for SiteError {
    fn from(err: toml::de::Error) -> Self {
        SiteError::Config(err.to_string())
    }
}

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticSeverity {
    /// The affected input was skipped
    Error,
    /// The run continued with reduced output
    Warning,
    /// Informational message
    Info,
}

impl DiagnosticSeverity {
    /// Get display string
    pub fn display(&self) -> &'static str {
        match self {
            DiagnosticSeverity::Error => "error",
            DiagnosticSeverity::Warning => "warning",
            DiagnosticSeverity::Info => "info",
        }
    }

    /// Get ANSI color code
    pub fn color(&self) -> &'static str {
        match self {
            DiagnosticSeverity::Error => "\x1b[31m",
            DiagnosticSeverity::Warning => "\x1b[33m",
            DiagnosticSeverity::Info => "\x1b[34m",
        }
    }
}

/// A diagnostic message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity level
    pub severity: DiagnosticSeverity,
    /// Message
    pub message: String,
    /// File the message is about
    pub file: Option<PathBuf>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(severity: DiagnosticSeverity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            file: None,
        }
    }

    /// Create an error diagnostic
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(DiagnosticSeverity::Error, message)
    }

    /// Create a warning diagnostic
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(DiagnosticSeverity::Warning, message)
    }

    /// Create an info diagnostic
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(DiagnosticSeverity::Info, message)
    }

    /// Set the file
    pub fn in_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Format the diagnostic for display
    pub fn format(&self) -> String {
        match self.file {
            Some(ref file) => format!(
                "{}: {}: {}",
                file.display(),
                self.severity.display(),
                self.message
            ),
            None => format!("{}: {}", self.severity.display(), self.message),
        }
    }

    /// Format with ANSI colors
    pub fn format_colored(&self) -> String {
        let reset = "\x1b[0m";
        let mut result = String::new();
        if let Some(ref file) = self.file {
            result.push_str(&format!("\x1b[2m{}{}: ", file.display(), reset));
        }
        result.push_str(self.severity.color());
        result.push_str(self.severity.display());
        result.push_str(reset);
        result.push_str(": ");
        result.push_str(&self.message);
        result
    }
}

/// Collector for diagnostics during a run
#[derive(Debug, Default, Clone)]
pub struct DiagnosticsCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticsCollector {
    /// Create a new collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic
    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Add an error
    pub fn error(&mut self, message: impl Into<String>) {
        self.add(Diagnostic::error(message));
    }

    /// Add a warning
    pub fn warning(&mut self, message: impl Into<String>) {
        self.add(Diagnostic::warning(message));
    }

    /// Add an info message
    pub fn info(&mut self, message: impl Into<String>) {
        self.add(Diagnostic::info(message));
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.count(DiagnosticSeverity::Error) > 0
    }

    /// Get all diagnostics
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Get error count
    pub fn error_count(&self) -> usize {
        self.count(DiagnosticSeverity::Error)
    }

    /// Get warning count
    pub fn warning_count(&self) -> usize {
        self.count(DiagnosticSeverity::Warning)
    }

    fn count(&self, severity: DiagnosticSeverity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    /// Print all diagnostics to stderr
    pub fn print(&self) {
        for diagnostic in &self.diagnostics {
            eprintln!("{}", diagnostic.format_colored());
        }
    }

    /// Print summary
    pub fn print_summary(&self) {
        let errors = self.error_count();
        let warnings = self.warning_count();

        if errors > 0 || warnings > 0 {
            eprintln!("\n{} error(s), {} warning(s)", errors, warnings);
        }
    }
}
