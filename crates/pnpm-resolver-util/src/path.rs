use path_clean::PathClean;
use std::path::{Path, PathBuf};

/// Join a manifest-relative path onto a package directory.
///
/// Leading slashes in `rel` are ignored so the result always stays rooted
/// at `base`, then the joined path is cleaned lexically.
#[must_use]
pub fn join_relative(base: &Path, rel: &str) -> PathBuf {
    base.join(rel.trim_start_matches('/')).clean()
}
