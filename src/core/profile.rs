//! Profile differential: reduce a full profile document to the elements
//! that are new or changed since the fork point, plus the handful of
//! identity fields the deploy target always expects.
//!
//! The differential is additive-only. Elements dropped between the two
//! versions are simply absent from the output; the deploy target merges
//! rather than replaces, so removals are never expressed here.

use anyhow::{Context, Result};

use crate::core::fingerprint::FingerprintIndex;
use crate::core::policy::DeployPolicy;

/// Fixed document header for every differential.
pub const HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<Profile xmlns=\"http://soap.sforce.com/2006/04/metadata\">\n";

/// Fixed document footer.
pub const FOOTER: &str = "</Profile>";

/// Build the sparse replacement document for a changed profile.
///
/// Emits, in lexicographic `name|digest` order, every element of `new`
/// whose key is absent from `old` plus every element on the required
/// allow-list. Identical inputs produce byte-identical output.
pub fn differential(old: &str, new: &str, policy: &DeployPolicy) -> Result<String> {
    let old_index = FingerprintIndex::parse(old).context("profile content at the fork point")?;
    let new_index = FingerprintIndex::parse(new).context("profile content in the working tree")?;

    let mut output = String::with_capacity(HEADER.len() + FOOTER.len() + new.len());
    output.push_str(HEADER);

    for (key, entry) in new_index.iter() {
        if !old_index.contains(key) || policy.is_required_element(&entry.name) {
            output.push_str(&entry.xml);
            output.push('\n');
        }
    }

    output.push_str(FOOTER);
    Ok(output)
}
