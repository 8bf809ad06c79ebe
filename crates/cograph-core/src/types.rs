use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A single observation of a method modified in a commit.
///
/// Identity is the full `(commit, file, function)` triple: two records are
/// equal iff all three fields match, and the derived `Hash` follows the same
/// fields so duplicate observations collapse when stored in a `HashSet`.
///
/// # Examples
///
/// ```
/// use std::collections::HashSet;
/// use cograph_core::ChangeRecord;
///
/// let a = ChangeRecord::new("abc123", "src/auth.rs", "login");
/// let b = ChangeRecord::new("abc123", "src/auth.rs", "login");
/// assert_eq!(a, b);
///
/// let mut set = HashSet::new();
/// set.insert(a);
/// set.insert(b);
/// assert_eq!(set.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChangeRecord {
    /// Commit identifier (hash).
    pub commit: String,
    /// File path relative to repo root.
    pub file: String,
    /// Name of the changed method.
    pub function: String,
}

impl ChangeRecord {
    /// Create a record from the observation triple.
    pub fn new(
        commit: impl Into<String>,
        file: impl Into<String>,
        function: impl Into<String>,
    ) -> Self {
        Self {
            commit: commit.into(),
            file: file.into(),
            function: function.into(),
        }
    }

    /// Canonical graph node key for this record: `"{file}-{function}"`.
    ///
    /// Records that differ only by commit map to the same node.
    ///
    /// # Examples
    ///
    /// ```
    /// use cograph_core::ChangeRecord;
    ///
    /// let a = ChangeRecord::new("abc", "x.py", "f1");
    /// let b = ChangeRecord::new("def", "x.py", "f1");
    /// assert_eq!(a.node_key(), "x.py-f1");
    /// assert_eq!(a.node_key(), b.node_key());
    /// ```
    pub fn node_key(&self) -> String {
        format!("{}-{}", self.file, self.function)
    }
}

impl fmt::Display for ChangeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}-{}", self.commit, self.file, self.function)
    }
}

/// Output format for command results.
///
/// # Examples
///
/// ```
/// use cograph_core::OutputFormat;
///
/// let fmt: OutputFormat = "json".parse().unwrap();
/// assert_eq!(fmt, OutputFormat::Json);
///
/// let fmt: OutputFormat = "md".parse().unwrap();
/// assert_eq!(fmt, OutputFormat::Markdown);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable tables and summaries.
    #[default]
    Text,
    /// Machine-readable JSON.
    Json,
    /// Markdown-formatted output.
    Markdown,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}
