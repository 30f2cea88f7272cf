//! **branchpack** - Assemble minimal deploy packages from the files changed on a branch
//!
//! Resolves the fork point against a parent branch, walks the changed paths,
//! widens bundle-style components to whole directories, reduces profile
//! metadata to a sparse differential, and carries sidecar descriptors along.

/// Command-line interface with clap integration
pub mod cli;

/// Shell completion generation
pub mod completion;

/// Core pipeline - closure resolution, fingerprinting, differential, assembly
pub mod core {
    /// Compiled-in deployment policy (bundle types, required profile elements)
    pub mod policy;
    pub use policy::DeployPolicy;

    /// Content fingerprints over a metadata document's top-level elements
    pub mod fingerprint;
    pub use fingerprint::{FingerprintEntry, FingerprintIndex};

    /// Sparse profile differential between fork point and working tree
    pub mod profile;
    pub use profile::differential;

    /// Copy-unit resolution for atomic-bundle component types
    pub mod closure;
    pub use closure::copy_unit;

    /// Per-path orchestration and output-tree assembly
    pub mod assemble;
    pub use assemble::{changes as changes_run, run as pack_run};
}

/// Infrastructure - configuration, git plumbing, filesystem operations
pub mod infra {
    /// Configuration management with TOML support
    pub mod config;
    pub use config::{Config, init as config_init, load_config};

    /// Git subprocess plumbing (merge-base, diff, show)
    pub mod git;
    pub use git::{GitError, Repo};

    /// Strict copy/write primitives for the output tree
    pub mod fsops;
}

// Convenience re-exports at the crate root
pub use crate::core::{changes_run, pack_run};
