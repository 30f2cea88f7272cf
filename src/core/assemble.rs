//! Change-set assembly: walk the changed paths in order and build the
//! output tree, routing each path through the profile differential, a
//! whole-bundle copy, or a verbatim file copy, with sidecar descriptors
//! carried alongside.
//!
//! Sequential and single-owner: the run deletes and rebuilds the output
//! directory, so nothing else may touch it while a run is in flight. The
//! first copy or write failure aborts the whole batch; a partially built
//! output is left for the next run's clean rebuild.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use owo_colors::{OwoColorize, Stream};
use tracing::{debug, warn};

use crate::cli::{AppContext, ChangesArgs, PackArgs};
use crate::core::closure;
use crate::core::policy::DeployPolicy;
use crate::core::profile;
use crate::infra::config::load_config;
use crate::infra::fsops;
use crate::infra::git::Repo;

pub fn run(args: PackArgs, ctx: &AppContext) -> Result<()> {
    let config = load_config().unwrap_or_default();
    let directory = args.directory.unwrap_or(config.output_dir);
    let current = args.current.unwrap_or(config.current_ref);
    let parent = args.parent.unwrap_or(config.parent_ref);

    let repo = Repo::open(".")?;
    let fork = repo.merge_base(&parent, &current)?;
    let changed = repo.changed_paths(&fork, &current)?;

    for path in &changed {
        debug!("file change found: {path}");
    }

    let policy = DeployPolicy::default();

    if ctx.dry_run {
        print_plan(&changed, &policy, &directory, ctx);
        return Ok(());
    }

    assemble(&repo, &changed, &fork, directory.as_std_path(), &policy)?;

    if !ctx.quiet {
        println!(
            "{} {} change(s) into {}",
            "Packed".if_supports_color(Stream::Stdout, |t| t.green()),
            changed.len(),
            directory
        );
    }
    Ok(())
}

pub fn changes(args: ChangesArgs, ctx: &AppContext) -> Result<()> {
    let config = load_config().unwrap_or_default();
    let current = args.current.unwrap_or(config.current_ref);
    let parent = args.parent.unwrap_or(config.parent_ref);

    let repo = Repo::open(".")?;
    let fork = repo.merge_base(&parent, &current)?;
    let changed = repo.changed_paths(&fork, &current)?;

    if !ctx.quiet {
        println!("fork point: {fork}");
    }
    for path in &changed {
        println!("{path}");
    }
    Ok(())
}

/// Rebuild `output_root` from scratch out of the changed paths.
pub fn assemble(
    repo: &Repo,
    changed: &[Utf8PathBuf],
    fork: &str,
    output_root: &Path,
    policy: &DeployPolicy,
) -> Result<()> {
    fsops::clear_output_dir(output_root)?;

    for path in changed {
        let unit = closure::copy_unit(path, policy);

        if policy.is_profile(path.as_str()) {
            // Profiles are always file-granular: the differential replaces
            // the working-tree document at the original path.
            let old = repo.show_at(fork, path)?;
            let new = fsops::read_working_file(&repo.root().join(path.as_std_path()))?;
            let document = profile::differential(&old, &new, policy)
                .with_context(|| format!("building differential for {path}"))?;
            fsops::write_output_file(&output_root.join(path.as_std_path()), document.as_bytes())?;
        } else {
            let unit_src = repo.root().join(unit.as_std_path());
            if fsops::is_directory(&unit_src) {
                copy_bundle(&unit_src, &output_root.join(unit.as_std_path()))?;
            } else {
                fsops::copy_file_verbatim(
                    &repo.root().join(path.as_std_path()),
                    &output_root.join(path.as_std_path()),
                )?;
            }
        }

        // Sidecar descriptors ride along file-granular, never widened to a
        // bundle and never reduced. A path that already is a descriptor
        // does not get a second one.
        if !policy.is_sidecar(path.as_str()) {
            let sidecar = Utf8PathBuf::from(policy.sidecar_for(path.as_str()));
            let sidecar_src = repo.root().join(sidecar.as_std_path());
            if fsops::file_exists(&sidecar_src) {
                fsops::copy_file_verbatim(
                    &sidecar_src,
                    &output_root.join(sidecar.as_std_path()),
                )?;
            }
        }
    }

    Ok(())
}

/// Copy a bundle directory, skipping work already done this run.
///
/// The pre-copy stat probe is best-effort: a failed probe downgrades to a
/// warning and skips this one unit. Copies themselves stay strict.
fn copy_bundle(src: &Path, dest: &Path) -> Result<()> {
    let metadata = match fs::metadata(src) {
        Ok(metadata) => metadata,
        Err(err) => {
            warn!("stat {} failed ({err}), skipping unit", src.display());
            return Ok(());
        }
    };

    if !metadata.is_dir() {
        warn!("{} is not a directory, skipping unit", src.display());
        return Ok(());
    }

    if fsops::is_directory(dest) {
        debug!("directory already exists, skipping: {}", dest.display());
        return Ok(());
    }

    fsops::copy_dir_recursive(src, dest)
}

fn print_plan(
    changed: &[Utf8PathBuf],
    policy: &DeployPolicy,
    directory: &Utf8Path,
    ctx: &AppContext,
) {
    if ctx.quiet {
        return;
    }

    println!(
        "{}",
        "DRY RUN: would assemble:".if_supports_color(Stream::Stdout, |t| t.yellow())
    );
    for path in changed {
        let unit = closure::copy_unit(path, policy);
        if policy.is_profile(path.as_str()) {
            println!(
                "  {} {path} (differential)",
                "profile".if_supports_color(Stream::Stdout, |t| t.cyan())
            );
        } else if unit != *path {
            println!(
                "  {} {unit} (whole bundle)",
                "bundle".if_supports_color(Stream::Stdout, |t| t.magenta())
            );
        } else {
            println!(
                "  {} {path}",
                "file".if_supports_color(Stream::Stdout, |t| t.blue())
            );
        }
    }
    println!("  into {directory}");
}
