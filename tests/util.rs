//! Shared test utilities for integration tests
//!
//! Builds a small git repository shaped like a metadata project: a base
//! commit on `develop`, then bundle, class, and profile changes on a
//! `feature` branch.

use std::path::Path;
use std::process::Command;

use assert_fs::prelude::*;

pub const OLD_PROFILE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Profile xmlns="http://soap.sforce.com/2006/04/metadata">
    <custom>true</custom>
    <tabVisibilities>
        <tab>A</tab>
    </tabVisibilities>
    <classAccesses>
        <apexClass>Alpha</apexClass>
    </classAccesses>
</Profile>
"#;

pub const NEW_PROFILE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Profile xmlns="http://soap.sforce.com/2006/04/metadata">
    <custom>true</custom>
    <tabVisibilities>
        <tab>B</tab>
    </tabVisibilities>
    <classAccesses>
        <apexClass>Alpha</apexClass>
    </classAccesses>
</Profile>
"#;

/// Run one git command in `root`, with identity pinned so commits work in
/// any environment.
pub fn git(root: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args([
            "-c",
            "user.email=test@example.com",
            "-c",
            "user.name=Test",
            "-c",
            "commit.gpgsign=false",
        ])
        .args(args)
        .current_dir(root)
        .output()
        .expect("run git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Base commit on `develop`, changes committed on `feature`:
/// - `aura/widget/widget.js` modified (bundle closure case)
/// - `classes/Alpha.cls` modified, with an unchanged sidecar descriptor
/// - `profiles/Admin.profile-meta.xml` modified (differential case)
/// - `pages/Home.page` added, no sidecar
/// - `triggers/Keep.trigger` untouched (must not be packed)
pub fn make_repo_fixture() -> assert_fs::TempDir {
    let tmp = assert_fs::TempDir::new().expect("tempdir");
    let root = tmp.path();

    git(root, &["init", "-q"]);
    git(root, &["checkout", "-q", "-b", "develop"]);

    tmp.child("force-app/main/default/aura/widget/widget.js")
        .write_str("({ render: function () { return 'old'; } })\n")
        .expect("write");
    tmp.child("force-app/main/default/aura/widget/widget.cmp")
        .write_str("<aura:component/>\n")
        .expect("write");
    tmp.child("force-app/main/default/classes/Alpha.cls")
        .write_str("public class Alpha {}\n")
        .expect("write");
    tmp.child("force-app/main/default/classes/Alpha.cls-meta.xml")
        .write_str("<ApexClass/>\n")
        .expect("write");
    tmp.child("force-app/main/default/profiles/Admin.profile-meta.xml")
        .write_str(OLD_PROFILE)
        .expect("write");
    tmp.child("force-app/main/default/triggers/Keep.trigger")
        .write_str("trigger Keep on Thing (before insert) {}\n")
        .expect("write");

    git(root, &["add", "-A"]);
    git(root, &["commit", "-q", "-m", "base"]);

    git(root, &["checkout", "-q", "-b", "feature"]);

    tmp.child("force-app/main/default/aura/widget/widget.js")
        .write_str("({ render: function () { return 'new'; } })\n")
        .expect("write");
    tmp.child("force-app/main/default/classes/Alpha.cls")
        .write_str("public class Alpha { public void m() {} }\n")
        .expect("write");
    tmp.child("force-app/main/default/profiles/Admin.profile-meta.xml")
        .write_str(NEW_PROFILE)
        .expect("write");
    tmp.child("force-app/main/default/pages/Home.page")
        .write_str("<apex:page/>\n")
        .expect("write");

    git(root, &["add", "-A"]);
    git(root, &["commit", "-q", "-m", "feature work"]);

    tmp
}
