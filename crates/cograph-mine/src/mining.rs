//! Git history extraction via git2.
//!
//! Walks commit history from a repository and, per commit, diffs against the
//! first parent to find which files changed and which lines within them,
//! then delegates to [`crate::methods`] to name the changed methods.

use std::collections::HashMap;
use std::path::Path;

use cograph_core::{CographError, MiningConfig};
use git2::{DiffOptions, Oid, Repository, Sort};

use crate::methods::{self, Language};

/// Method-level changes extracted from one commit.
///
/// # Examples
///
/// ```
/// use cograph_mine::mining::{CommitMethodChanges, FileMethodChanges};
///
/// let commit = CommitMethodChanges {
///     hash: "4a5e1e4baab44454c8b45e6c249e5bd659652f9d".into(),
///     timestamp: 1700000000,
///     files: vec![FileMethodChanges {
///         path: "x.py".into(),
///         methods: vec!["f1".into()],
///     }],
/// };
/// assert_eq!(commit.files[0].methods, vec!["f1"]);
/// ```
#[derive(Debug, Clone)]
pub struct CommitMethodChanges {
    /// Full commit hash. Truncating here would let distinct commits collide
    /// and merge their change records; shortening is display-only.
    pub hash: String,
    /// Unix timestamp of the commit.
    pub timestamp: i64,
    /// Files with at least one changed method in this commit.
    pub files: Vec<FileMethodChanges>,
}

/// Changed methods within a single file of a commit.
#[derive(Debug, Clone)]
pub struct FileMethodChanges {
    /// File path relative to repo root.
    pub path: String,
    /// Names of methods whose body changed, sorted and deduplicated.
    pub methods: Vec<String>,
}

/// Options for history mining.
///
/// # Examples
///
/// ```
/// use cograph_mine::mining::MiningOptions;
///
/// let opts = MiningOptions::default();
/// assert_eq!(opts.since_days, 0);
/// assert_eq!(opts.max_files_per_commit, 50);
/// ```
#[derive(Debug, Clone)]
pub struct MiningOptions {
    /// Only include commits from the last N days; 0 walks the full history
    /// (default: 0).
    pub since_days: u64,
    /// Skip commits touching more files than this; 0 disables the guard
    /// (default: 50).
    pub max_files_per_commit: usize,
    /// Branch to walk (default: HEAD).
    pub branch: Option<String>,
}

impl Default for MiningOptions {
    fn default() -> Self {
        Self {
            since_days: 0,
            max_files_per_commit: 50,
            branch: None,
        }
    }
}

impl From<&MiningConfig> for MiningOptions {
    fn from(config: &MiningConfig) -> Self {
        Self {
            since_days: config.since_days,
            max_files_per_commit: config.max_files_per_commit,
            branch: config.branch.clone(),
        }
    }
}

/// Mine method-level changes from a git repository.
///
/// Returns commits in reverse chronological order (newest first). Commits
/// touching more files than `max_files_per_commit` (large refactors, most
/// merges) are skipped. Files in unsupported languages, binary files, and
/// files whose diff touches no method body contribute nothing.
///
/// # Errors
///
/// Returns [`CographError::Git`] if the repository cannot be opened or
/// walked; the failure propagates unchanged to the caller.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use cograph_mine::mining::{mine_method_changes, MiningOptions};
///
/// let commits = mine_method_changes(Path::new("."), &MiningOptions::default()).unwrap();
/// for c in &commits {
///     for f in &c.files {
///         println!("{}: {} ({:?})", c.hash, f.path, f.methods);
///     }
/// }
/// ```
pub fn mine_method_changes(
    repo_path: &Path,
    options: &MiningOptions,
) -> Result<Vec<CommitMethodChanges>, CographError> {
    let repo = Repository::open(repo_path)
        .map_err(|e| CographError::Git(format!("failed to open repository: {e}")))?;

    // A repository with no commits yields an empty history, not an error.
    if options.branch.is_none() && repo.is_empty().unwrap_or(false) {
        return Ok(Vec::new());
    }

    let mut revwalk = repo
        .revwalk()
        .map_err(|e| CographError::Git(format!("failed to create revwalk: {e}")))?;

    revwalk.set_sorting(Sort::TIME).ok();

    if let Some(ref branch) = options.branch {
        let reference = repo
            .resolve_reference_from_short_name(branch)
            .map_err(|e| CographError::Git(format!("failed to resolve branch '{branch}': {e}")))?;
        let oid = reference
            .target()
            .ok_or_else(|| CographError::Git("branch has no target".into()))?;
        revwalk
            .push(oid)
            .map_err(|e| CographError::Git(format!("failed to push oid: {e}")))?;
    } else {
        revwalk
            .push_head()
            .map_err(|e| CographError::Git(format!("failed to push HEAD: {e}")))?;
    }

    let cutoff = compute_cutoff(options.since_days);
    let mut commits = Vec::new();

    for oid_result in revwalk {
        let oid = oid_result.map_err(|e| CographError::Git(format!("revwalk error: {e}")))?;

        let commit = repo
            .find_commit(oid)
            .map_err(|e| CographError::Git(format!("failed to find commit: {e}")))?;

        let timestamp = commit.time().seconds();
        if let Some(cutoff) = cutoff {
            if timestamp < cutoff {
                break;
            }
        }

        let Some(files) = extract_commit_methods(&repo, &commit, options)? else {
            continue;
        };

        if files.is_empty() {
            continue;
        }

        commits.push(CommitMethodChanges {
            hash: oid.to_string(),
            timestamp,
            files,
        });
    }

    Ok(commits)
}

fn compute_cutoff(since_days: u64) -> Option<i64> {
    if since_days == 0 {
        return None;
    }
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64;
    Some(now - (since_days as i64 * 86400))
}

/// Diff a commit against its first parent and resolve changed methods.
///
/// Returns `None` when the commit is skipped by the file-count guard.
fn extract_commit_methods(
    repo: &Repository,
    commit: &git2::Commit,
    options: &MiningOptions,
) -> Result<Option<Vec<FileMethodChanges>>, CographError> {
    let commit_tree = commit
        .tree()
        .map_err(|e| CographError::Git(format!("failed to get commit tree: {e}")))?;

    let parent_tree = if commit.parent_count() > 0 {
        let parent = commit
            .parent(0)
            .map_err(|e| CographError::Git(format!("failed to get parent: {e}")))?;
        Some(
            parent
                .tree()
                .map_err(|e| CographError::Git(format!("failed to get parent tree: {e}")))?,
        )
    } else {
        None
    };

    let mut diff_opts = DiffOptions::new();
    let diff = repo
        .diff_tree_to_tree(
            parent_tree.as_ref(),
            Some(&commit_tree),
            Some(&mut diff_opts),
        )
        .map_err(|e| CographError::Git(format!("failed to compute diff: {e}")))?;

    if options.max_files_per_commit > 0 && diff.deltas().len() > options.max_files_per_commit {
        return Ok(None);
    }

    // Changed line numbers per file: (deleted lines in the old version,
    // added lines in the new version).
    let mut changed_lines: HashMap<String, (Vec<u32>, Vec<u32>)> = HashMap::new();

    diff.foreach(
        &mut |_delta, _progress| true,
        None,
        None,
        Some(&mut |delta, _hunk, line| {
            let path = delta
                .new_file()
                .path()
                .or_else(|| delta.old_file().path())
                .unwrap_or(Path::new(""))
                .to_string_lossy()
                .to_string();

            let entry = changed_lines.entry(path).or_default();
            match line.origin() {
                '-' => {
                    if let Some(n) = line.old_lineno() {
                        entry.0.push(n);
                    }
                }
                '+' => {
                    if let Some(n) = line.new_lineno() {
                        entry.1.push(n);
                    }
                }
                _ => {}
            }
            true
        }),
    )
    .map_err(|e| CographError::Git(format!("failed to iterate diff lines: {e}")))?;

    let mut files = Vec::new();

    for delta in diff.deltas() {
        let path = delta
            .new_file()
            .path()
            .or_else(|| delta.old_file().path())
            .unwrap_or(Path::new(""))
            .to_string_lossy()
            .to_string();

        if path.is_empty() {
            continue;
        }

        let language = Language::from_path(&path);
        if language == Language::Unknown {
            continue;
        }

        let Some((old_lines, new_lines)) = changed_lines.get(&path) else {
            continue;
        };

        // Binary or non-UTF-8 blobs contribute no observations.
        let Some(old_content) = blob_content(repo, delta.old_file().id()) else {
            continue;
        };
        let Some(new_content) = blob_content(repo, delta.new_file().id()) else {
            continue;
        };

        let methods = methods::changed_methods(
            language,
            &old_content,
            &new_content,
            old_lines,
            new_lines,
        )?;

        if !methods.is_empty() {
            files.push(FileMethodChanges { path, methods });
        }
    }

    Ok(Some(files))
}

fn blob_content(repo: &Repository, id: Oid) -> Option<String> {
    if id.is_zero() {
        return Some(String::new());
    }
    let blob = repo.find_blob(id).ok()?;
    std::str::from_utf8(blob.content()).ok().map(str::to_string)
}
