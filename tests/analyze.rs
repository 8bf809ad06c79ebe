use std::path::Path;
use std::process::Command;

use git2::{Repository, Signature, Time};

fn commit_files(repo: &Repository, files: &[(&str, &str)], message: &str, timestamp: i64) {
    let root = repo.workdir().unwrap();
    let mut index = repo.index().unwrap();
    for (path, content) in files {
        std::fs::write(root.join(path), content).unwrap();
        index.add_path(Path::new(path)).unwrap();
    }
    index.write().unwrap();
    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();

    let time = Time::new(timestamp, 0);
    let sig = Signature::new("alice", "alice@example.com", &time).unwrap();

    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .unwrap();
}

fn run_analyze(repo_dir: &Path, extra: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_cograph"))
        .arg("analyze")
        .arg("--path")
        .arg(repo_dir)
        .arg("--quiet")
        .args(extra)
        .output()
        .unwrap()
}

#[test]
fn analyze_ranks_co_changed_functions() {
    let dir = tempfile::tempdir().unwrap();
    let repo = Repository::init(dir.path()).unwrap();

    // Commit A touches f1 and f2; commit B touches only f1.
    commit_files(
        &repo,
        &[("x.py", "def f1():\n    return 1\n\ndef f2():\n    return 2\n")],
        "add f1 and f2",
        1_700_000_000,
    );
    commit_files(
        &repo,
        &[("x.py", "def f1():\n    return 100\n\ndef f2():\n    return 2\n")],
        "tweak f1",
        1_700_000_100,
    );

    let output = run_analyze(dir.path(), &["--format", "json"]);
    assert!(
        output.status.success(),
        "analyze failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let page_rank = report["page_rank"].as_object().unwrap();
    assert_eq!(page_rank.len(), 2);

    let f1 = page_rank["x.py-f1"].as_f64().unwrap();
    let f2 = page_rank["x.py-f2"].as_f64().unwrap();
    assert!(f1 >= f2, "recurring function should rank at least as high");
    assert!((f1 + f2 - 1.0).abs() < 1e-6);

    assert!(report["closeness"].as_object().unwrap().contains_key("x.py-f2"));
    assert!(report["common_neighbor"]
        .as_object()
        .unwrap()
        .contains_key("x.py-f1"));
}

#[test]
fn analyze_empty_history_reports_empty_maps() {
    let dir = tempfile::tempdir().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    commit_files(&repo, &[("README.md", "# docs\n")], "docs", 1_700_000_000);

    let output = run_analyze(dir.path(), &["--format", "json"]);
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(report["page_rank"].as_object().unwrap().is_empty());
    assert!(report["closeness"].as_object().unwrap().is_empty());
    assert!(report["common_neighbor"].as_object().unwrap().is_empty());
}

#[test]
fn analyze_outside_a_repository_fails_with_hint() {
    let dir = tempfile::tempdir().unwrap();

    let output = run_analyze(dir.path(), &[]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Not a git repository"), "stderr: {stderr}");
}

#[test]
fn analyze_text_output_prints_all_three_tables() {
    let dir = tempfile::tempdir().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    commit_files(
        &repo,
        &[("x.py", "def f1():\n    return 1\n\ndef f2():\n    return 2\n")],
        "add functions",
        1_700_000_000,
    );

    let output = run_analyze(dir.path(), &[]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("PageRank:"));
    assert!(stdout.contains("Closeness centrality:"));
    assert!(stdout.contains("Common-neighbor centrality:"));
    assert!(stdout.contains("x.py-f1"));
}
