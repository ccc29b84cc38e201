//! Specifier eligibility.
//!
//! Decides, before any filesystem work, whether a specifier is ours to
//! resolve. Anything rejected here is left to the host's default resolver.

use std::collections::BTreeSet;
use std::fmt;

/// Why a specifier was left to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ineligible {
    /// Empty specifier.
    Empty,
    /// Relative (`./x`, `../x`, `.x`) or absolute (`/x`) specifier.
    PathLike,
    /// A non-empty allow-list is configured and does not contain the specifier.
    NotAllowed,
}

impl fmt::Display for Ineligible {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Empty => "specifier is empty",
            Self::PathLike => "relative or absolute specifier",
            Self::NotAllowed => "specifier not in packages allow-list",
        };
        f.write_str(s)
    }
}

/// Returns true for specifiers that start with `.` or `/`.
#[must_use]
pub fn is_path_like(specifier: &str) -> bool {
    specifier.starts_with('.') || specifier.starts_with('/')
}

/// Check whether `specifier` should be resolved against node_modules at all.
///
/// An empty `packages` set allows every bare specifier.
pub fn check_specifier(specifier: &str, packages: &BTreeSet<String>) -> Result<(), Ineligible> {
    if specifier.is_empty() {
        return Err(Ineligible::Empty);
    }
    if is_path_like(specifier) {
        return Err(Ineligible::PathLike);
    }
    if !packages.is_empty() && !packages.contains(specifier) {
        return Err(Ineligible::NotAllowed);
    }
    Ok(())
}

/// Convenience predicate over [`check_specifier`].
#[must_use]
pub fn is_eligible(specifier: &str, packages: &BTreeSet<String>) -> bool {
    check_specifier(specifier, packages).is_ok()
}
