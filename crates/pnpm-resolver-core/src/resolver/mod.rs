//! Bare specifier resolver for content-addressed `node_modules` layouts.
//!
//! A resolution runs three stages:
//! 1. [`filter`]: is the specifier eligible at all?
//! 2. [`locate`]: which search path holds the package directory?
//! 3. [`entry`]: which file inside that directory is the entry point?
//!
//! Nothing is cached and nothing is written; every call re-reads the
//! filesystem, so two calls against the same tree give the same answer.

pub mod entry;
pub mod filter;
pub mod locate;
pub mod trace;

pub use entry::{derive_entry_file, entry_candidates, read_manifest};
pub use filter::{check_specifier, is_eligible, is_path_like, Ineligible};
pub use locate::{locate_entry, locate_package_dir, lookup_in_store};
pub use trace::{
    steps as trace_steps, warning_codes as trace_warning_codes, ResolveTrace, ResolveTraceStep,
    TraceWarning,
};

use crate::config::ResolverConfig;
use crate::fs::{RealFs, ResolverFs};
use crate::LOG_TARGET;
use serde::Serialize;
use std::path::PathBuf;

/// Resolution status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolveStatus {
    Resolved,
    Unresolved,
}

/// Reason codes for unresolved specifiers.
///
/// None of these are errors: the host falls back to its default resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResolveReasonCode {
    /// Relative/absolute specifier, or excluded by the allow-list.
    Ineligible,
    /// No search path contains the package.
    NotFound,
    /// Package directories were found but none yielded an entry file.
    NoEntry,
}

impl std::fmt::Display for ResolveReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Ineligible => "INELIGIBLE",
            Self::NotFound => "NOT_FOUND",
            Self::NoEntry => "NO_ENTRY",
        };
        write!(f, "{s}")
    }
}

/// Resolution result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Resolved absolute entry file (if successful).
    pub resolved: Option<PathBuf>,
    /// Status.
    pub status: ResolveStatus,
    /// Reason code if unresolved.
    pub reason: Option<ResolveReasonCode>,
    /// Diagnostics collected on the way (e.g. malformed manifests).
    pub warnings: Vec<TraceWarning>,
}

impl Resolution {
    fn resolved(path: PathBuf, warnings: Vec<TraceWarning>) -> Self {
        Self {
            resolved: Some(path),
            status: ResolveStatus::Resolved,
            reason: None,
            warnings,
        }
    }

    fn unresolved(reason: ResolveReasonCode, warnings: Vec<TraceWarning>) -> Self {
        Self {
            resolved: None,
            status: ResolveStatus::Unresolved,
            reason: Some(reason),
            warnings,
        }
    }

    /// Whether the resolver has an opinion on this specifier.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.status == ResolveStatus::Resolved
    }
}

/// Result of resolution with trace.
#[derive(Debug, Clone)]
pub struct ResolutionWithTrace {
    /// The resolution result.
    pub resolution: Resolution,
    /// The resolution trace.
    pub trace: ResolveTrace,
}

/// The shared resolver used by every host adapter.
///
/// Holds an immutable [`ResolverConfig`] and a filesystem capability. It has
/// no interior state, so a single instance can be shared across threads and
/// used for concurrent resolutions.
#[derive(Debug, Clone)]
pub struct Resolver<F = RealFs> {
    config: ResolverConfig,
    fs: F,
}

impl Resolver<RealFs> {
    /// Create a resolver over the real filesystem.
    #[must_use]
    pub fn new(config: ResolverConfig) -> Self {
        Self::with_fs(config, RealFs)
    }
}

impl<F: ResolverFs> Resolver<F> {
    /// Create a resolver over a custom filesystem.
    pub fn with_fs(config: ResolverConfig, fs: F) -> Self {
        Self { config, fs }
    }

    /// The resolver's configuration.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve `specifier` imported from `importer`.
    ///
    /// `importer` only feeds diagnostics; it does not affect the result.
    pub fn resolve(&self, specifier: &str, importer: Option<&str>) -> Resolution {
        self.resolve_with_trace(specifier, importer).resolution
    }

    /// Resolve `specifier` and return the step-by-step trace as well.
    pub fn resolve_with_trace(&self, specifier: &str, importer: Option<&str>) -> ResolutionWithTrace {
        let mut trace = ResolveTrace::new();

        if let Err(why) = check_specifier(specifier, self.config.packages()) {
            trace.failure(trace_steps::FILTER_SPECIFIER, why.to_string());
            return ResolutionWithTrace {
                resolution: Resolution::unresolved(ResolveReasonCode::Ineligible, Vec::new()),
                trace,
            };
        }
        trace.success(
            trace_steps::FILTER_SPECIFIER,
            format!("Eligible bare specifier: {specifier}"),
        );

        let debug = self.config.debug();
        let importer = importer.unwrap_or("<entry>");
        if debug {
            tracing::info!(
                target: LOG_TARGET,
                specifier,
                importer,
                "Resolving {specifier} from {importer}"
            );
        }

        let search_paths = self.config.search_paths();
        let outcome = locate_entry(&self.fs, specifier, &search_paths, &mut trace);
        let warnings = trace.warnings.clone();

        let resolution = match outcome {
            Ok(path) => {
                if debug {
                    tracing::info!(
                        target: LOG_TARGET,
                        specifier,
                        importer,
                        resolved = %path.display(),
                        "Resolved {specifier} to {}",
                        path.display()
                    );
                }
                Resolution::resolved(path, warnings)
            }
            Err(reason) => {
                if debug {
                    tracing::warn!(
                        target: LOG_TARGET,
                        specifier,
                        importer,
                        reason = %reason,
                        "Unable to resolve {specifier}"
                    );
                }
                Resolution::unresolved(reason, warnings)
            }
        };

        ResolutionWithTrace { resolution, trace }
    }
}
