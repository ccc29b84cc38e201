//! Filesystem capability consumed by the resolver.
//!
//! The resolver only ever asks three kinds of questions: does a path exist,
//! what is in this text file, and what is in this directory. Keeping that
//! behind a trait lets the same algorithm run against the real disk or an
//! in-memory tree in tests.

use std::io;
use std::path::Path;

/// Read-only filesystem operations needed by resolution.
///
/// Implementations must be thread-safe (Send + Sync) so one resolver can
/// serve concurrent requests.
pub trait ResolverFs: Send + Sync {
    /// Whether anything (file or directory) exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Whether `path` exists and is a regular file (after following symlinks).
    fn is_file(&self, path: &Path) -> bool;

    /// Read a UTF-8 text file.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Names of the immediate children of `dir`, in listing order.
    fn read_dir_names(&self, dir: &Path) -> io::Result<Vec<String>>;
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFs;

impl ResolverFs for RealFs {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        pnpm_resolver_util::fs::read_to_string_lossy(path)
    }

    fn read_dir_names(&self, dir: &Path) -> io::Result<Vec<String>> {
        pnpm_resolver_util::fs::dir_entry_names(dir)
    }
}

impl<T: ResolverFs + ?Sized> ResolverFs for &T {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn is_file(&self, path: &Path) -> bool {
        (**self).is_file(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        (**self).read_to_string(path)
    }

    fn read_dir_names(&self, dir: &Path) -> io::Result<Vec<String>> {
        (**self).read_dir_names(dir)
    }
}
