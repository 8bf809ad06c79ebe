use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CographError;

/// Top-level configuration loaded from `.cograph.toml`.
///
/// Supports layered resolution: CLI flags > local config > defaults.
///
/// # Examples
///
/// ```
/// use cograph_core::CographConfig;
///
/// let config = CographConfig::default();
/// assert_eq!(config.mining.since_days, 0);
/// assert_eq!(config.centrality.alpha, 0.8);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CographConfig {
    /// History mining settings.
    #[serde(default)]
    pub mining: MiningConfig,
    /// Centrality computation settings.
    #[serde(default)]
    pub centrality: CentralityConfig,
}

impl CographConfig {
    /// Load configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`CographError::Io`] if the file cannot be read, or
    /// [`CographError::Toml`] if the content is not valid TOML.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use cograph_core::CographConfig;
    /// use std::path::Path;
    ///
    /// let config = CographConfig::from_file(Path::new(".cograph.toml")).unwrap();
    /// ```
    pub fn from_file(path: &Path) -> Result<Self, CographError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`CographError::Toml`] if parsing fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use cograph_core::CographConfig;
    ///
    /// let toml = r#"
    /// [mining]
    /// since_days = 90
    /// "#;
    /// let config = CographConfig::from_toml(toml).unwrap();
    /// assert_eq!(config.mining.since_days, 90);
    /// ```
    pub fn from_toml(content: &str) -> Result<Self, CographError> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }
}

/// History mining configuration.
///
/// # Examples
///
/// ```
/// use cograph_core::MiningConfig;
///
/// let config = MiningConfig::default();
/// assert_eq!(config.since_days, 0);
/// assert_eq!(config.max_files_per_commit, 50);
/// assert!(config.branch.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MiningConfig {
    /// Only include commits from the last N days; 0 walks the full history
    /// (default: 0).
    #[serde(default)]
    pub since_days: u64,
    /// Skip commits touching more files than this; 0 disables the guard
    /// (default: 50).
    #[serde(default = "default_max_files_per_commit")]
    pub max_files_per_commit: usize,
    /// Branch to walk (default: HEAD).
    pub branch: Option<String>,
}

fn default_max_files_per_commit() -> usize {
    50
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            since_days: 0,
            max_files_per_commit: default_max_files_per_commit(),
            branch: None,
        }
    }
}

/// Centrality computation configuration.
///
/// # Examples
///
/// ```
/// use cograph_core::CentralityConfig;
///
/// let config = CentralityConfig::default();
/// assert_eq!(config.damping, 0.85);
/// assert_eq!(config.max_iterations, 100);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CentralityConfig {
    /// Common-neighbor weighting between shared-neighbor count and inverse
    /// distance (default: 0.8).
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    /// PageRank damping factor (default: 0.85).
    #[serde(default = "default_damping")]
    pub damping: f64,
    /// PageRank iteration bound (default: 100).
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    /// PageRank convergence tolerance, scaled by node count (default: 1e-6).
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

fn default_alpha() -> f64 {
    0.8
}

fn default_damping() -> f64 {
    0.85
}

fn default_max_iterations() -> usize {
    100
}

fn default_tolerance() -> f64 {
    1e-6
}

impl Default for CentralityConfig {
    fn default() -> Self {
        Self {
            alpha: default_alpha(),
            damping: default_damping(),
            max_iterations: default_max_iterations(),
            tolerance: default_tolerance(),
        }
    }
}
