//! End-to-end `pack` runs against a real git repository.

mod util;

use assert_cmd::Command;
use predicates::prelude::*;

fn bpk() -> Command {
    Command::cargo_bin("bpk").expect("binary built")
}

#[test]
fn pack_assembles_the_changed_subset() {
    let tmp = util::make_repo_fixture();
    let root = tmp.path();

    bpk()
        .current_dir(root)
        .args([
            "pack",
            "--parent",
            "develop",
            "--current",
            "feature",
            "--directory",
            "out",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("change(s) into out"));

    let out = root.join("out/force-app/main/default");

    // Bundle closure: one changed file pulls the whole aura bundle.
    assert!(out.join("aura/widget/widget.js").is_file());
    assert!(out.join("aura/widget/widget.cmp").is_file());

    // Plain file plus its unchanged sidecar descriptor.
    assert!(out.join("classes/Alpha.cls").is_file());
    assert!(out.join("classes/Alpha.cls-meta.xml").is_file());

    // Added file with no sidecar: copied alone, no descriptor fabricated.
    assert!(out.join("pages/Home.page").is_file());
    assert!(!out.join("pages/Home.page-meta.xml").exists());

    // Unchanged files stay out of the package.
    assert!(!out.join("triggers/Keep.trigger").exists());
}

#[test]
fn packed_profile_is_the_sparse_differential() {
    let tmp = util::make_repo_fixture();
    let root = tmp.path();

    bpk()
        .current_dir(root)
        .args([
            "pack",
            "--parent",
            "develop",
            "--current",
            "feature",
            "--directory",
            "out",
        ])
        .assert()
        .success();

    let document = std::fs::read_to_string(
        root.join("out/force-app/main/default/profiles/Admin.profile-meta.xml"),
    )
    .expect("differential written");

    assert!(document.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n"));
    assert!(document.contains("<Profile xmlns=\"http://soap.sforce.com/2006/04/metadata\">"));
    assert!(document.ends_with("</Profile>"));

    // Changed element and always-required element are present; the
    // unchanged, unlisted element is reduced away.
    assert!(document.contains("<tab>B</tab>"));
    assert!(document.contains("<custom>true</custom>"));
    assert!(!document.contains("classAccesses"));
}

#[test]
fn repeated_runs_are_byte_identical() {
    let tmp = util::make_repo_fixture();
    let root = tmp.path();
    let args = [
        "pack",
        "--parent",
        "develop",
        "--current",
        "feature",
        "--directory",
        "out",
    ];

    bpk().current_dir(root).args(args).assert().success();
    let first = std::fs::read_to_string(
        root.join("out/force-app/main/default/profiles/Admin.profile-meta.xml"),
    )
    .unwrap();

    bpk().current_dir(root).args(args).assert().success();
    let second = std::fs::read_to_string(
        root.join("out/force-app/main/default/profiles/Admin.profile-meta.xml"),
    )
    .unwrap();

    assert_eq!(first, second);
}

#[test]
fn pack_rebuilds_the_output_from_scratch() {
    let tmp = util::make_repo_fixture();
    let root = tmp.path();

    std::fs::create_dir_all(root.join("out")).unwrap();
    std::fs::write(root.join("out/stale.txt"), "from a previous run\n").unwrap();

    bpk()
        .current_dir(root)
        .args([
            "pack",
            "--parent",
            "develop",
            "--current",
            "feature",
            "--directory",
            "out",
        ])
        .assert()
        .success();

    assert!(!root.join("out/stale.txt").exists());
    assert!(root
        .join("out/force-app/main/default/classes/Alpha.cls")
        .is_file());
}

#[test]
fn dry_run_plans_without_touching_the_filesystem() {
    let tmp = util::make_repo_fixture();
    let root = tmp.path();

    bpk()
        .current_dir(root)
        .args([
            "pack",
            "--dry-run",
            "--parent",
            "develop",
            "--current",
            "feature",
            "--directory",
            "out",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("DRY RUN"))
        .stdout(predicate::str::contains("aura/widget (whole bundle)"))
        .stdout(predicate::str::contains("Admin.profile-meta.xml (differential)"));

    assert!(!root.join("out").exists());
}

#[test]
fn quiet_pack_prints_nothing() {
    let tmp = util::make_repo_fixture();
    let root = tmp.path();

    bpk()
        .current_dir(root)
        .args([
            "pack",
            "--quiet",
            "--parent",
            "develop",
            "--current",
            "feature",
            "--directory",
            "out",
        ])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn pack_fails_without_a_common_ancestor() {
    let tmp = util::make_repo_fixture();
    let root = tmp.path();

    util::git(root, &["checkout", "-q", "--orphan", "island"]);
    util::git(root, &["commit", "-q", "--allow-empty", "-m", "isolated"]);

    bpk()
        .current_dir(root)
        .args([
            "pack",
            "--parent",
            "develop",
            "--current",
            "island",
            "--directory",
            "out",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no common history"));
}
