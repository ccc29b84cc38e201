//! Entry file derivation.
//!
//! Given a package directory, pick the file an ESM-first bundler would load:
//! `module`, then `main`, then `exports`, then `index.js`.

use super::trace::{steps, warning_codes, ResolveTrace, ResolveTraceStep, TraceWarning};
use crate::error::Error;
use crate::fs::ResolverFs;
use crate::manifest::{Exports, PackageManifest};
use crate::LOG_TARGET;
use pnpm_resolver_util::path::join_relative;
use std::path::{Path, PathBuf};

/// Manifest file name.
pub const PACKAGE_JSON: &str = "package.json";

/// Index file probed inside entry directories and as the package fallback.
pub const INDEX_FILE: &str = "index.js";

/// Suffixes appended to an entry value, in probe order.
pub const ENTRY_SUFFIXES: &[&str] = &[".js", ".mjs"];

/// Derive the entry file of the package in `package_dir`.
///
/// Returns `None` when there is no manifest, the manifest cannot be read or
/// parsed, or no candidate file exists. Manifest failures are logged and
/// recorded as trace warnings; they never abort resolution.
pub fn derive_entry_file(
    fs: &dyn ResolverFs,
    package_dir: &Path,
    trace: &mut ResolveTrace,
) -> Option<PathBuf> {
    let manifest_path = package_dir.join(PACKAGE_JSON);
    if !fs.exists(&manifest_path) {
        trace.add_step(
            ResolveTraceStep::new(steps::READ_MANIFEST, false, "No package.json")
                .with_path(&manifest_path),
        );
        return None;
    }

    let manifest = match read_manifest(fs, &manifest_path) {
        Ok(manifest) => manifest,
        Err(err) => {
            tracing::warn!(target: LOG_TARGET, "{err}");
            let code = match err {
                Error::ManifestRead { .. } => warning_codes::MANIFEST_READ_ERROR,
                _ => warning_codes::MANIFEST_PARSE_ERROR,
            };
            trace.add_warning(TraceWarning::new(code, err.to_string()));
            trace.add_step(
                ResolveTraceStep::new(steps::READ_MANIFEST, false, "Invalid package.json")
                    .with_path(&manifest_path),
            );
            return None;
        }
    };
    trace.add_step(
        ResolveTraceStep::new(steps::READ_MANIFEST, true, "Read package.json")
            .with_path(&manifest_path),
    );

    for (field, value) in manifest.entry_candidates() {
        trace.success(steps::ENTRY_FIELD, format!("Using {field} field: {value}"));
        if let Some(found) = probe_entry(fs, package_dir, value, trace) {
            return Some(found);
        }
    }

    // Only reached once `module` and `main` yielded nothing.
    if manifest.exports == Exports::Unsupported {
        trace.add_warning(TraceWarning::new(
            warning_codes::UNSUPPORTED_EXPORTS,
            format!(
                "exports field in {} has no root import target, skipping it",
                manifest_path.display()
            ),
        ));
    }

    let fallback = package_dir.join(INDEX_FILE);
    if fs.is_file(&fallback) {
        trace.add_step(
            ResolveTraceStep::new(steps::FALLBACK_INDEX, true, "Using index.js fallback")
                .with_path(&fallback),
        );
        return Some(fallback);
    }

    trace.add_step(
        ResolveTraceStep::new(steps::FALLBACK_INDEX, false, "Package has no entry file")
            .with_path(package_dir),
    );
    None
}

/// Read and parse a manifest.
pub fn read_manifest(fs: &dyn ResolverFs, path: &Path) -> Result<PackageManifest, Error> {
    let content = fs.read_to_string(path).map_err(|source| Error::ManifestRead {
        path: path.to_path_buf(),
        source,
    })?;
    PackageManifest::parse(&content).map_err(|source| Error::ManifestParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Files probed for an entry value, in order.
#[must_use]
pub fn entry_candidates(package_dir: &Path, entry: &str) -> Vec<PathBuf> {
    let exact = join_relative(package_dir, entry);
    let mut candidates = Vec::with_capacity(ENTRY_SUFFIXES.len() + 2);
    candidates.push(exact.clone());
    for suffix in ENTRY_SUFFIXES {
        candidates.push(join_relative(package_dir, &format!("{entry}{suffix}")));
    }
    candidates.push(exact.join(INDEX_FILE));
    candidates
}

fn probe_entry(
    fs: &dyn ResolverFs,
    package_dir: &Path,
    entry: &str,
    trace: &mut ResolveTrace,
) -> Option<PathBuf> {
    for candidate in entry_candidates(package_dir, entry) {
        if fs.is_file(&candidate) {
            trace.add_step(
                ResolveTraceStep::new(steps::PROBE_FILE, true, "File exists").with_path(&candidate),
            );
            return Some(candidate);
        }
    }
    trace.failure(
        steps::PROBE_FILE,
        format!("No file found for entry value: {entry}"),
    );
    None
}
