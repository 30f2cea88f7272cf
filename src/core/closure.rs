//! Copy-unit resolution for changed paths.
//!
//! Bundle component types deploy atomically: one changed file inside a
//! bundle pulls in the whole bundle directory. Everything else stays
//! file-granular.

use camino::{Utf8Path, Utf8PathBuf};

use crate::core::policy::DeployPolicy;

/// Resolve the filesystem unit to copy for a changed path.
///
/// Scans the directory segments (excluding the last, which is the bundle
/// directory itself when a match lands) for a bundle-type name. The last
/// matching segment wins when recognized names nest. On a match the unit
/// is the prefix ending one segment past the match — the bundle root, the
/// immediate child of the matched type directory. Without a match the unit
/// is the original path.
pub fn copy_unit(path: &Utf8Path, policy: &DeployPolicy) -> Utf8PathBuf {
    let Some(parent) = path.parent() else {
        return path.to_owned();
    };

    let segments: Vec<&str> = parent
        .as_str()
        .split('/')
        .filter(|s| !s.is_empty())
        .collect();

    let mut unit = path.to_owned();
    for (i, segment) in segments
        .iter()
        .enumerate()
        .take(segments.len().saturating_sub(1))
    {
        if policy.is_bundle_type(segment) {
            unit = Utf8PathBuf::from(segments[..=i + 1].join("/"));
        }
    }

    unit
}
