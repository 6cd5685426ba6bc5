//! Workspace configuration and initialization.
//!
//! A roster workspace is a directory containing `.roster/`, which holds
//! `config.yaml` and one JSONL snapshot per entity collection.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::access::Role;
use crate::domain::{EmployeeId, EntityKind};
use crate::error::{ConfigError, Result};
use crate::store::StorageBackend;

/// Default company name and id prefix.
pub const DEFAULT_PREFIX: &str = "acme";

/// Name of the workspace directory.
pub const ROSTER_DIR_NAME: &str = ".roster";

/// Name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Name of the gitignore file within `.roster`.
pub const GITIGNORE_FILE_NAME: &str = ".gitignore";

/// Minimum prefix length.
pub const MIN_PREFIX_LENGTH: usize = 2;

/// Maximum prefix length.
pub const MAX_PREFIX_LENGTH: usize = 20;

/// Maximum directory depth to walk when searching for the workspace root.
pub const MAX_TRAVERSAL_DEPTH: usize = 256;

/// Default column width cap for text reports.
pub const DEFAULT_MAX_COLUMN_WIDTH: usize = 24;

/// Contents of `.roster/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct RosterConfig {
    /// Company (tenant) name.
    pub company: String,

    /// Prefix for generated ids (e.g. "acme" for "acme-k3v9").
    pub id_prefix: String,

    /// UI language code.
    #[serde(default = "default_language")]
    pub language: String,

    /// Who is using this workspace.
    #[serde(default)]
    pub session: SessionConfig,

    /// Where data lives.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Report rendering options.
    #[serde(default)]
    pub report: ReportConfig,
}

/// `session:` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct SessionConfig {
    /// Display name of the user.
    pub user: String,
    /// Role of the user.
    pub role: Role,
    /// The user's own employee record.
    #[serde(default)]
    pub employee_id: Option<EmployeeId>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            user: "Administrator".to_string(),
            role: Role::Admin,
            employee_id: None,
        }
    }
}

/// Storage backend kinds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    /// In-memory store persisted to JSONL snapshots.
    #[default]
    Memory,
    /// In-memory only; nothing is written.
    Ephemeral,
}

/// `storage:` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct StorageConfig {
    /// Backend kind.
    pub backend: BackendKind,
    /// Data directory, relative to the workspace root.
    pub data_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Memory,
            data_dir: ROSTER_DIR_NAME.to_string(),
        }
    }
}

/// `report:` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct ReportConfig {
    /// Widest a text-report column may get before values are truncated.
    pub max_column_width: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            max_column_width: DEFAULT_MAX_COLUMN_WIDTH,
        }
    }
}

fn default_language() -> String {
    "en".to_string()
}

impl RosterConfig {
    /// A configuration for `company` using `prefix` for ids.
    pub fn new(company: &str, prefix: &str) -> Self {
        Self {
            company: company.to_string(),
            id_prefix: prefix.to_string(),
            language: default_language(),
            session: SessionConfig::default(),
            storage: StorageConfig::default(),
            report: ReportConfig::default(),
        }
    }

    /// Load configuration from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        let config: Self =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        validate_prefix(&config.id_prefix)?;
        Ok(config)
    }

    /// Save configuration to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub async fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("YAML error: {e}")))?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// Resolve the storage backend against the workspace root.
    pub fn storage_backend(&self, root: &Path) -> StorageBackend {
        match self.storage.backend {
            BackendKind::Memory => StorageBackend::Jsonl(root.join(&self.storage.data_dir)),
            BackendKind::Ephemeral => StorageBackend::InMemory,
        }
    }
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX, DEFAULT_PREFIX)
    }
}

/// Result of [`init`].
#[derive(Debug)]
pub struct InitResult {
    /// The created `.roster` directory.
    pub roster_dir: PathBuf,
    /// The created config file.
    pub config_file: PathBuf,
    /// The created (empty) snapshot files.
    pub data_files: Vec<PathBuf>,
    /// The id prefix in use.
    pub prefix: String,
}

/// Validate an id prefix: 2-20 ASCII letters or digits.
///
/// Expects pre-trimmed input.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidPrefix`] describing the violated rule.
pub fn validate_prefix(prefix: &str) -> std::result::Result<(), ConfigError> {
    if prefix.len() < MIN_PREFIX_LENGTH {
        return Err(ConfigError::InvalidPrefix(format!(
            "must be at least {MIN_PREFIX_LENGTH} characters"
        )));
    }
    if prefix.len() > MAX_PREFIX_LENGTH {
        return Err(ConfigError::InvalidPrefix(format!(
            "cannot exceed {MAX_PREFIX_LENGTH} characters"
        )));
    }
    if !prefix.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ConfigError::InvalidPrefix(
            "must contain only alphanumeric characters".to_string(),
        ));
    }
    Ok(())
}

/// Create a new workspace under `base_dir`.
///
/// The prefix defaults to the lowercased company name when that is a valid
/// prefix, otherwise to [`DEFAULT_PREFIX`].
///
/// # Errors
///
/// - [`ConfigError::AlreadyInitialized`] if `.roster/` exists
/// - [`ConfigError::InvalidPrefix`] for a bad prefix
/// - I/O errors from creating files
pub async fn init(
    base_dir: &Path,
    company: Option<&str>,
    prefix: Option<&str>,
) -> Result<InitResult> {
    let company = company.map_or(DEFAULT_PREFIX, str::trim);
    let prefix = match prefix {
        Some(prefix) => prefix.trim().to_string(),
        None => {
            let derived = company.to_lowercase();
            if validate_prefix(&derived).is_ok() {
                derived
            } else {
                DEFAULT_PREFIX.to_string()
            }
        }
    };
    validate_prefix(&prefix)?;

    let roster_dir = base_dir.join(ROSTER_DIR_NAME);
    if roster_dir.exists() {
        return Err(ConfigError::AlreadyInitialized(roster_dir).into());
    }

    fs::create_dir_all(&roster_dir).await?;

    let config_file = roster_dir.join(CONFIG_FILE_NAME);
    RosterConfig::new(company, &prefix).save(&config_file).await?;

    let mut data_files = Vec::new();
    for kind in [EntityKind::Employee, EntityKind::Position, EntityKind::Payroll] {
        let path = roster_dir.join(kind.file_name());
        fs::write(&path, "").await?;
        data_files.push(path);
    }

    let gitignore = "\
# Temporary files left by interrupted snapshot writes
*.tmp
";
    fs::write(roster_dir.join(GITIGNORE_FILE_NAME), gitignore).await?;

    tracing::debug!(dir = %roster_dir.display(), prefix = %prefix, "Initialized workspace");

    Ok(InitResult {
        roster_dir,
        config_file,
        data_files,
        prefix,
    })
}

/// Find the workspace root by walking up from `start_dir`.
///
/// Returns the directory containing `.roster/`, or `None` if none is found
/// within [`MAX_TRAVERSAL_DEPTH`] levels.
pub fn find_roster_root(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();
    let mut depth = 0;

    loop {
        if current.join(ROSTER_DIR_NAME).is_dir() {
            return Some(current);
        }

        depth += 1;
        if depth > MAX_TRAVERSAL_DEPTH || !current.pop() {
            return None;
        }
    }
}
