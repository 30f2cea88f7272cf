//! Deployment policy: which component types are atomic bundles, which
//! profile elements must always ship, and the file-name suffixes that
//! mark profile documents and sidecar descriptors.
//!
//! The defaults mirror the target metadata platform and are compiled in;
//! the struct exists so tests can substitute their own sets without any
//! process-wide state.

use std::collections::BTreeSet;

/// Suffix marking a profile metadata document.
pub const PROFILE_SUFFIX: &str = ".profile-meta.xml";

/// Suffix marking a sidecar descriptor for a primary file.
pub const SIDECAR_SUFFIX: &str = "-meta.xml";

/// Immutable deployment policy consulted by closure resolution and the
/// profile differential.
#[derive(Debug, Clone)]
pub struct DeployPolicy {
    /// Directory-segment names whose contents deploy as one unit.
    bundle_types: BTreeSet<String>,

    /// Profile element names emitted even when their content is unchanged.
    required_elements: BTreeSet<String>,
}

impl Default for DeployPolicy {
    fn default() -> Self {
        Self::new(
            ["aura", "experiences", "lwc"],
            ["custom", "description", "fullName", "userLicense"],
        )
    }
}

impl DeployPolicy {
    pub fn new<B, R>(bundle_types: B, required_elements: R) -> Self
    where
        B: IntoIterator,
        B::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        Self {
            bundle_types: bundle_types.into_iter().map(Into::into).collect(),
            required_elements: required_elements.into_iter().map(Into::into).collect(),
        }
    }

    /// Does a directory segment name an atomic-bundle component type?
    pub fn is_bundle_type(&self, segment: &str) -> bool {
        self.bundle_types.contains(segment)
    }

    /// Must this profile element always appear in the differential?
    pub fn is_required_element(&self, name: &str) -> bool {
        self.required_elements.contains(name)
    }

    /// Is this path a profile metadata document?
    pub fn is_profile(&self, path: &str) -> bool {
        path.ends_with(PROFILE_SUFFIX)
    }

    /// Is this path itself a sidecar descriptor?
    pub fn is_sidecar(&self, path: &str) -> bool {
        path.ends_with(SIDECAR_SUFFIX)
    }

    /// The sidecar descriptor path for a primary file.
    pub fn sidecar_for(&self, path: &str) -> String {
        format!("{path}{SIDECAR_SUFFIX}")
    }
}
