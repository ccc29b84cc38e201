//! Package directory location.
//!
//! Search paths are tried in priority order. Conventional `node_modules`
//! directories are searched by joining the specifier; content-store
//! directories are searched by matching the store's directory naming scheme
//! (`<name>-npm-<version>-<hash>/node_modules/<name>`).

use super::entry::derive_entry_file;
use super::trace::{steps, warning_codes, ResolveTrace, ResolveTraceStep, TraceWarning};
use super::ResolveReasonCode;
use crate::config::{LookupStrategy, NODE_MODULES};
use crate::fs::ResolverFs;
use pnpm_resolver_util::layout::store_dir_prefix;
use std::path::{Path, PathBuf};

/// Find the entry file for `specifier`, trying `search_paths` in order.
///
/// Stops at the first search path that yields an entry file. Returns
/// [`ResolveReasonCode::NotFound`] if no package directory was found at all,
/// and [`ResolveReasonCode::NoEntry`] if directories were found but none had
/// a derivable entry.
pub fn locate_entry(
    fs: &dyn ResolverFs,
    specifier: &str,
    search_paths: &[&Path],
    trace: &mut ResolveTrace,
) -> Result<PathBuf, ResolveReasonCode> {
    let mut found_package = false;

    for base in search_paths {
        let strategy = LookupStrategy::for_path(base);
        trace.add_step(
            ResolveTraceStep::new(
                steps::SEARCH_PATH,
                true,
                format!("Searching ({} lookup)", strategy.as_str()),
            )
            .with_path(*base),
        );

        let Some(package_dir) = locate_package_dir(fs, specifier, base, strategy, trace) else {
            continue;
        };
        found_package = true;

        if let Some(entry) = derive_entry_file(fs, &package_dir, trace) {
            trace.add_step(
                ResolveTraceStep::new(steps::FINAL_PATH, true, "Resolution complete")
                    .with_path(&entry),
            );
            return Ok(entry);
        }
    }

    if found_package {
        Err(ResolveReasonCode::NoEntry)
    } else {
        Err(ResolveReasonCode::NotFound)
    }
}

/// Locate the package directory for `specifier` under a single search path.
pub fn locate_package_dir(
    fs: &dyn ResolverFs,
    specifier: &str,
    base: &Path,
    strategy: LookupStrategy,
    trace: &mut ResolveTrace,
) -> Option<PathBuf> {
    let candidate = match strategy {
        LookupStrategy::Store => lookup_in_store(fs, specifier, base, trace)?,
        LookupStrategy::DirectJoin => base.join(specifier),
    };

    if fs.exists(&candidate) {
        trace.add_step(
            ResolveTraceStep::new(steps::FIND_PACKAGE_DIR, true, "Found package directory")
                .with_path(&candidate),
        );
        Some(candidate)
    } else {
        trace.add_step(
            ResolveTraceStep::new(steps::FIND_PACKAGE_DIR, false, "Package directory missing")
                .with_path(&candidate),
        );
        None
    }
}

/// Locate `specifier` inside a content store rooted at `store_root`.
///
/// Store directories are matched on the `<name>-npm-` prefix; the version and
/// integrity hash that follow are not known in advance. When several
/// installed versions match, the first in directory listing order wins.
pub fn lookup_in_store(
    fs: &dyn ResolverFs,
    specifier: &str,
    store_root: &Path,
    trace: &mut ResolveTrace,
) -> Option<PathBuf> {
    if !fs.exists(store_root) {
        trace.add_step(
            ResolveTraceStep::new(steps::STORE_LOOKUP, false, "Store does not exist")
                .with_path(store_root),
        );
        return None;
    }

    let names = match fs.read_dir_names(store_root) {
        Ok(names) => names,
        Err(err) => {
            trace.add_warning(TraceWarning::new(
                warning_codes::STORE_UNREADABLE,
                format!("Failed to list store {}: {err}", store_root.display()),
            ));
            trace.add_step(
                ResolveTraceStep::new(steps::STORE_LOOKUP, false, "Store could not be listed")
                    .with_path(store_root),
            );
            return None;
        }
    };

    let prefix = store_dir_prefix(specifier);
    let mut matched = 0usize;
    for name in names.iter().filter(|name| name.starts_with(&prefix)) {
        matched += 1;
        let candidate = store_root.join(name).join(NODE_MODULES).join(specifier);
        if fs.exists(&candidate) {
            trace.add_step(
                ResolveTraceStep::new(
                    steps::STORE_LOOKUP,
                    true,
                    format!("Matched store entry {name} (prefix {prefix})"),
                )
                .with_path(&candidate),
            );
            return Some(candidate);
        }
    }

    trace.add_step(
        ResolveTraceStep::new(
            steps::STORE_LOOKUP,
            false,
            format!("No usable store entry with prefix {prefix} ({matched} matched)"),
        )
        .with_path(store_root),
    );
    None
}
