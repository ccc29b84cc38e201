//! On-disk layout conventions of content-addressed `node_modules` stores.

use std::path::Path;

/// Path substrings that mark a content-store directory.
///
/// `.store` is the store directory name used by the workspace tooling this
/// resolver ships with; `.pnpm` is pnpm's virtual store.
pub const STORE_MARKERS: &[&str] = &[".store", ".pnpm"];

/// Infix separating a package identity from its install record in a store
/// directory name (`react-npm-18.2.0-<hash>`).
pub const NPM_ORIGIN_INFIX: &str = "-npm-";

/// Returns true if `path` points into a content store and should be searched
/// by store-directory name rather than by direct join.
#[must_use]
pub fn is_store_path(path: &Path) -> bool {
    let s = path.to_string_lossy();
    STORE_MARKERS.iter().any(|marker| s.contains(marker))
}

/// Demangle a specifier into the directory-name prefix used by the store.
///
/// Only the first `/` is replaced, so `@scope/name` becomes `@scope-name`.
/// Unscoped names are returned unchanged.
#[must_use]
pub fn store_name(specifier: &str) -> String {
    specifier.replacen('/', "-", 1)
}

/// Full prefix a store directory name must start with to belong to `specifier`.
#[must_use]
pub fn store_dir_prefix(specifier: &str) -> String {
    format!("{}{NPM_ORIGIN_INFIX}", store_name(specifier))
}
