//! Change collection and deduplication.
//!
//! Drives history mining and flattens the per-commit observations into a
//! set of unique [`ChangeRecord`]s keyed by the full (commit, file,
//! function) triple.

use std::collections::HashSet;
use std::path::Path;

use cograph_core::{ChangeRecord, CographError};

use crate::mining::{self, MiningOptions};

/// Deduplicate a stream of change observations into a set.
///
/// `progress` is invoked once per *unique* record with the running count;
/// repeated observations of the same triple collapse silently. Order of the
/// resulting set is unspecified.
///
/// # Examples
///
/// ```
/// use cograph_core::ChangeRecord;
/// use cograph_mine::collect::dedup_changes;
///
/// let observations = vec![
///     ChangeRecord::new("c1", "x.py", "f1"),
///     ChangeRecord::new("c1", "x.py", "f1"),
///     ChangeRecord::new("c2", "x.py", "f1"),
/// ];
/// let changes = dedup_changes(observations, |_, _| {});
/// assert_eq!(changes.len(), 2);
/// ```
pub fn dedup_changes<I>(
    observations: I,
    mut progress: impl FnMut(usize, &ChangeRecord),
) -> HashSet<ChangeRecord>
where
    I: IntoIterator<Item = ChangeRecord>,
{
    let mut changes = HashSet::new();
    for record in observations {
        if changes.contains(&record) {
            continue;
        }
        progress(changes.len() + 1, &record);
        changes.insert(record);
    }
    changes
}

/// Collect the unique method-level changes of a repository's history.
///
/// Mines the history at `repo_path` and returns one [`ChangeRecord`] per
/// distinct (commit, file, function) triple observed. With `verbose` set,
/// one progress line per unique change is written to stderr.
///
/// # Errors
///
/// Returns [`CographError::Git`] if history traversal fails; the failure is
/// not handled here and terminates the run.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use cograph_mine::collect::collect_changes;
/// use cograph_mine::mining::MiningOptions;
///
/// let changes = collect_changes(Path::new("."), &MiningOptions::default(), false).unwrap();
/// println!("{} unique method changes", changes.len());
/// ```
pub fn collect_changes(
    repo_path: &Path,
    options: &MiningOptions,
    verbose: bool,
) -> Result<HashSet<ChangeRecord>, CographError> {
    let commits = mining::mine_method_changes(repo_path, options)?;

    let observations = commits.iter().flat_map(|commit| {
        commit.files.iter().flat_map(move |file| {
            file.methods
                .iter()
                .map(move |method| ChangeRecord::new(&commit.hash, &file.path, method))
        })
    });

    Ok(dedup_changes(observations, |count, record| {
        if verbose {
            eprintln!("{count} {record}");
        }
    }))
}
