#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn root(dir: &TempDir) -> PathBuf {
    dir.path().join("ana-speksi")
}

fn speksi(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ana-speksi").unwrap();
    cmd.current_dir(dir.path())
        .env("ANA_SPEKSI_ROOT", root(dir))
        .env_remove("ANA_SPEKSI_AUTO_CONFIRM")
        .env_remove("RUST_LOG");
    cmd
}

fn write(path: &Path, text: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, text).unwrap();
}

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}

fn json_of(cmd: &mut Command) -> serde_json::Value {
    let out = cmd.output().unwrap();
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    serde_json::from_slice(&out.stdout).unwrap()
}

/// A spec with an accepted proposal, an index and two stories whose
/// functional specs are still drafts.
fn storify_spec(dir: &TempDir) -> PathBuf {
    let spec = root(dir).join("ongoing/PROJ-1.auth");
    write(&spec.join("proposal.md"), "# Proposal\n\n**Status**: Accepted\n");
    write(
        &spec.join("index.md"),
        "\
# Index
- [Accepted] [proposal.md](proposal.md)
- [Draft] [functional-spec.md](specs/01-login/functional-spec.md)
- [Draft] [functional-spec.md](specs/02-logout/functional-spec.md)
- [tasks.md](specs/01-login/tasks.md) (0/0 tasks complete)
",
    );
    write(
        &spec.join("specs/01-login/functional-spec.md"),
        "# Login\n\n**Status**: Draft\n",
    );
    write(
        &spec.join("specs/02-logout/functional-spec.md"),
        "# Logout\n\n**Status**: Draft\n",
    );
    spec
}

// ---------------------------------------------------------------------------
// ana-speksi init
// ---------------------------------------------------------------------------

#[test]
fn init_creates_layout() {
    let dir = TempDir::new().unwrap();
    speksi(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("created: config.yaml"));

    let root = root(&dir);
    assert!(root.join("ongoing/.gitkeep").exists());
    assert!(root.join("truth/enums").is_dir());
    assert!(root.join("archive").is_dir());
    assert!(root.join("technical-debt").is_dir());
    assert!(read(&root.join("config.yaml")).contains("auto_confirm: false"));
}

#[test]
fn init_is_idempotent() {
    let dir = TempDir::new().unwrap();
    speksi(&dir).arg("init").assert().success();
    speksi(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("exists:  config.yaml"));
}

// ---------------------------------------------------------------------------
// ana-speksi new / status
// ---------------------------------------------------------------------------

#[test]
fn new_creates_draft_proposal() {
    let dir = TempDir::new().unwrap();
    speksi(&dir)
        .args(["new", "PROJ-9", "Add", "User", "Auth"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PROJ-9.add-user-auth"));

    let proposal = root(&dir).join("ongoing/PROJ-9.add-user-auth/proposal.md");
    assert!(read(&proposal).contains("**Status**: Draft"));

    speksi(&dir)
        .args(["new", "PROJ-9", "add user auth"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn new_rejects_ticket_with_path_separators() {
    let dir = TempDir::new().unwrap();
    speksi(&dir)
        .args(["new", "../escape", "auth"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid ticket '../escape'"));
    assert!(!root(&dir).join("escape.auth").exists());
}

#[test]
fn new_without_usable_name_fails() {
    let dir = TempDir::new().unwrap();
    speksi(&dir)
        .args(["new", "PROJ-9", "!!!"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--name"));
}

#[test]
fn status_with_no_specs() {
    let dir = TempDir::new().unwrap();
    speksi(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("No ongoing specs"));
}

#[test]
fn status_shows_phase_and_stories() {
    let dir = TempDir::new().unwrap();
    storify_spec(&dir);
    speksi(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Phase:    storify"))
        .stdout(predicate::str::contains("01-login"))
        .stdout(predicate::str::contains("not every functional spec is accepted"));
}

#[test]
fn status_json_reports_stories() {
    let dir = TempDir::new().unwrap();
    storify_spec(&dir);
    let v = json_of(speksi(&dir).args(["status", "--json"]));
    let spec = &v["ongoing"][0];
    assert_eq!(spec["name"], "PROJ-1.auth");
    assert_eq!(spec["phase"], "storify");
    assert_eq!(spec["proposal_status"], "Accepted");
    assert_eq!(spec["stories"][1]["folder"], "02-logout");
    assert_eq!(spec["stories"][1]["functional_spec_status"], "Draft");
    assert_eq!(spec["stories"][1]["technical_spec_status"], "empty");
}

#[test]
fn status_unknown_name_lists_available() {
    let dir = TempDir::new().unwrap();
    storify_spec(&dir);
    speksi(&dir)
        .args(["status", "--name", "billing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("spec not found: billing"))
        .stderr(predicate::str::contains("PROJ-1.auth (storify)"));
}

// ---------------------------------------------------------------------------
// ana-speksi accept
// ---------------------------------------------------------------------------

#[test]
fn accept_proposal_advances_to_storify() {
    let dir = TempDir::new().unwrap();
    speksi(&dir).args(["new", "PROJ-1", "auth"]).assert().success();
    let spec = root(&dir).join("ongoing/PROJ-1.auth");

    speksi(&dir)
        .arg("accept")
        .assert()
        .success()
        .stdout(predicate::str::contains("proposal.md -- done"));
    assert!(read(&spec.join("proposal.md")).contains("**Status**: Accepted"));

    write(&spec.join("index.md"), "# Index\n");
    let v = json_of(speksi(&dir).args(["status", "-j"]));
    assert_eq!(v["ongoing"][0]["phase"], "storify");
}

#[test]
fn accept_functional_specs_updates_index_and_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let spec = storify_spec(&dir);
    write(&spec.join("specs/01-login/tasks.md"), "- [x] a\n- [ ] b\n");

    speksi(&dir)
        .args(["accept", "PROJ-1.auth"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Accepting 2 file(s)"))
        .stdout(predicate::str::contains("01-login: 1/2"));

    let index = read(&spec.join("index.md"));
    assert!(index.contains("- [Accepted] [functional-spec.md](specs/01-login/functional-spec.md)"));
    assert!(index.contains("- [Accepted] [functional-spec.md](specs/02-logout/functional-spec.md)"));
    assert!(index.contains("(1/2 tasks complete)"));
    assert!(read(&spec.join("specs/02-logout/functional-spec.md")).starts_with("# Logout\n"));

    // Phase moved on to research; nothing left to accept for it.
    let before = read(&spec.join("index.md"));
    speksi(&dir).arg("accept").assert().success();
    assert_eq!(read(&spec.join("index.md")), before);
}

#[test]
fn accept_json_lists_outcomes() {
    let dir = TempDir::new().unwrap();
    storify_spec(&dir);
    let v = json_of(speksi(&dir).args(["accept", "--json"]));
    assert_eq!(v["acceptance"]["acceptance_target"], "functional specs");
    assert_eq!(v["accepted"].as_array().unwrap().len(), 2);
    assert_eq!(v["accepted"][0]["accepted"], true);
    assert_eq!(v["accepted"][0]["index_updated"], true);
}

#[test]
fn accept_dry_run_changes_nothing() {
    let dir = TempDir::new().unwrap();
    let spec = storify_spec(&dir);
    let login = spec.join("specs/01-login/functional-spec.md");
    let index_before = read(&spec.join("index.md"));

    let v = json_of(speksi(&dir).args(["accept", "--dry-run", "--json"]));
    assert_eq!(v["acceptance"]["acceptance_target"], "functional specs");
    assert_eq!(v["acceptance"]["files_to_accept"].as_array().unwrap().len(), 2);
    assert!(v.get("accepted").is_none());
    assert_eq!(read(&login), "# Login\n\n**Status**: Draft\n");
    assert_eq!(read(&spec.join("index.md")), index_before);

    speksi(&dir)
        .args(["accept", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would accept 2 file(s):"))
        .stdout(predicate::str::contains("specs/01-login/functional-spec.md"));
    assert_eq!(read(&login), "# Login\n\n**Status**: Draft\n");
}

#[test]
fn accept_in_codify_has_no_target() {
    let dir = TempDir::new().unwrap();
    let spec = root(&dir).join("ongoing/PROJ-1.auth");
    write(&spec.join("proposal.md"), "**Status**: Accepted\n");
    write(&spec.join("index.md"), "");
    write(&spec.join("research.md"), "");
    for doc in ["functional-spec.md", "technical-spec.md"] {
        write(&spec.join("specs/01-login").join(doc), "**Status**: Accepted\n");
    }
    write(
        &spec.join("specs/01-login/tasks.md"),
        "**Status**: Accepted\n- [ ] a\n",
    );

    speksi(&dir)
        .arg("accept")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no acceptance action available for phase: codify"));
}

#[test]
fn accept_with_several_specs_needs_a_name() {
    let dir = TempDir::new().unwrap();
    speksi(&dir).args(["new", "PROJ-1", "auth"]).assert().success();
    speksi(&dir).args(["new", "PROJ-2", "billing"]).assert().success();
    speksi(&dir)
        .arg("accept")
        .assert()
        .failure()
        .stderr(predicate::str::contains("multiple ongoing specs"));
}

#[test]
fn accept_without_specs_fails() {
    let dir = TempDir::new().unwrap();
    speksi(&dir)
        .arg("accept")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no ongoing specs found"));
}

// ---------------------------------------------------------------------------
// ana-speksi continue
// ---------------------------------------------------------------------------

#[test]
fn continue_blocked_by_gate() {
    let dir = TempDir::new().unwrap();
    storify_spec(&dir);
    speksi(&dir)
        .arg("continue")
        .assert()
        .success()
        .stdout(predicate::str::contains("Acceptance gate not satisfied"))
        .stdout(predicate::str::contains("specs/01-login/functional-spec.md"));
}

#[test]
fn continue_names_next_skill() {
    let dir = TempDir::new().unwrap();
    storify_spec(&dir);
    speksi(&dir).arg("accept").assert().success();

    speksi(&dir)
        .arg("continue")
        .assert()
        .success()
        .stdout(predicate::str::contains("Current phase: research"))
        .stdout(predicate::str::contains("Stories needing work: 2 of 2"))
        .stdout(predicate::str::contains("Invoke skill: as-techify"));

    let v = json_of(speksi(&dir).args(["continue", "-j"]));
    assert_eq!(v["next_skill"], "as-techify");
    assert_eq!(v["blocked_by"], "research_exists");
    assert_eq!(v["acceptance_gate"]["satisfied"], true);
}

// ---------------------------------------------------------------------------
// ana-speksi next
// ---------------------------------------------------------------------------

#[test]
fn next_shows_first_open_task_with_sections() {
    let dir = TempDir::new().unwrap();
    let spec = storify_spec(&dir);
    write(&spec.join("specs/01-login/tasks.md"), "- [x] Scaffold\n");
    write(
        &spec.join("specs/02-logout/tasks.md"),
        "- [x] Scaffold\n- [ ] Implement auth\n### Details\nUse OAuth2\n### Context\nSee RFC 6749\n- [ ] Later\n",
    );

    speksi(&dir)
        .arg("next")
        .assert()
        .success()
        .stdout(predicate::str::contains("Story:    02-logout"))
        .stdout(predicate::str::contains("Progress: 1/3 tasks complete"))
        .stdout(predicate::str::contains("Implement auth"))
        .stdout(predicate::str::contains("Use OAuth2"))
        .stdout(predicate::str::contains("See RFC 6749"));

    let v = json_of(speksi(&dir).args(["next", "--json"]));
    assert_eq!(v["story_folder"], "02-logout");
    assert_eq!(v["next_task"]["task_text"], "Implement auth");
    assert_eq!(v["next_task"]["description"], "Use OAuth2");
    assert_eq!(v["next_task"]["context"], "See RFC 6749");
}

#[test]
fn next_with_everything_done() {
    let dir = TempDir::new().unwrap();
    let spec = storify_spec(&dir);
    write(&spec.join("specs/01-login/tasks.md"), "- [x] a\n");
    speksi(&dir)
        .arg("next")
        .assert()
        .success()
        .stdout(predicate::str::contains("No pending tasks"));
}

#[test]
fn next_unknown_story_fails() {
    let dir = TempDir::new().unwrap();
    storify_spec(&dir);
    speksi(&dir)
        .args(["next", "--story", "signup"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("story not found"));
}

// ---------------------------------------------------------------------------
// ana-speksi sync-counts
// ---------------------------------------------------------------------------

#[test]
fn sync_counts_rewrites_then_is_noop() {
    let dir = TempDir::new().unwrap();
    let spec = storify_spec(&dir);
    write(&spec.join("specs/01-login/tasks.md"), "- [x] a\n- [x] b\n- [ ] c\n");

    speksi(&dir)
        .arg("sync-counts")
        .assert()
        .success()
        .stdout(predicate::str::contains("01-login: 2/3 tasks complete"));
    let index = read(&spec.join("index.md"));
    assert!(index.contains("[tasks.md](specs/01-login/tasks.md) (2/3 tasks complete)"));

    speksi(&dir)
        .args(["sync-counts", "PROJ-1.auth"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes needed."));
    assert_eq!(read(&spec.join("index.md")), index);
}

// ---------------------------------------------------------------------------
// ana-speksi archive
// ---------------------------------------------------------------------------

#[test]
fn archive_requires_docufy_unless_forced() {
    let dir = TempDir::new().unwrap();
    speksi(&dir).args(["new", "PROJ-1", "auth"]).assert().success();

    speksi(&dir)
        .arg("archive")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not docufy"));

    speksi(&dir)
        .args(["archive", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Archived PROJ-1.auth"));
    assert!(!root(&dir).join("ongoing/PROJ-1.auth").exists());

    let archived: Vec<_> = std::fs::read_dir(root(&dir).join("archive"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with("-PROJ-1.auth"))
        .collect();
    assert_eq!(archived.len(), 1);
}

// ---------------------------------------------------------------------------
// ana-speksi truth
// ---------------------------------------------------------------------------

#[test]
fn truth_show_when_empty() {
    let dir = TempDir::new().unwrap();
    speksi(&dir)
        .args(["truth", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ground truth is empty."));

    let v = json_of(speksi(&dir).args(["truth", "show", "--json"]));
    assert_eq!(v["truth"], serde_json::json!([]));
}

#[test]
fn truth_show_prints_indented_tree() {
    let dir = TempDir::new().unwrap();
    let truth = root(&dir).join("truth");
    write(&truth.join("overview.md"), "# Overview\n");
    write(&truth.join("data-models/user.md"), "# User\n");
    write(&truth.join("data-models/.gitkeep"), "");

    speksi(&dir)
        .args(["truth", "show"])
        .assert()
        .success()
        .stdout(predicate::str::diff(
            "ana-speksi/truth/\n  data-models/\n    user.md\n  overview.md\n",
        ));

    let v = json_of(speksi(&dir).args(["truth", "show", "--json"]));
    let paths: Vec<_> = v["truth"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["path"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(paths, ["data-models", "data-models/user.md", "overview.md"]);
    assert_eq!(v["truth"][0]["is_dir"], true);
}
